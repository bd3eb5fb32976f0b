//! Resolving scene nodes back to domain tables.
//!
//! Pointer events carry the shape node they landed on; what interaction
//! actually needs is the enclosing table. [`find_table_root`] walks the
//! ancestor chain to the nearest table root, and [`resolve_table`] maps a
//! table root back to its domain table through the `table.<name>` naming
//! scheme.
//!
//! A failed resolution means the visual tree is stale relative to the
//! snapshot (the table was renamed or removed); the error propagates so the
//! caller can trigger a fresh render.

use sigma_core::{
    model::{Project, ProjectError, Table},
    scene::{NodeId, Scene},
};

/// Prefix of table-root node names.
const TABLE_NODE_PREFIX: &str = "table.";

/// Walks from `node` up through its ancestor chain and returns the nearest
/// table root, or `None` when the walk reaches the tree root without a match.
///
/// The starting node itself counts: hit-testing a table root returns it.
pub fn find_table_root(scene: &Scene, node: NodeId) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        if scene.is_table_root(id) {
            return Some(id);
        }
        current = scene.parent(id);
    }
    None
}

/// Maps a table-root node back to its domain table by name.
///
/// # Errors
///
/// Returns [`ProjectError::UnknownTable`] when the node's name does not
/// follow the `table.<name>` scheme or no table of that name exists in the
/// project — both indicate a stale node.
pub fn resolve_table<'p>(
    scene: &Scene,
    root: NodeId,
    project: &'p Project,
) -> Result<&'p Table, ProjectError> {
    let node_name = scene.name(root).to_string();
    let table_name = node_name
        .strip_prefix(TABLE_NODE_PREFIX)
        .ok_or_else(|| ProjectError::UnknownTable(node_name.clone()))?;

    project
        .table(table_name)
        .ok_or_else(|| ProjectError::UnknownTable(table_name.to_string()))
}

#[cfg(test)]
mod tests {
    use sigma_core::geometry::Point;
    use sigma_core::identifier::Id;
    use sigma_core::model::{Column, DataType, SqlDialect, TableView};
    use sigma_core::scene::RectStyle;

    use super::*;

    fn sample_project() -> Project {
        Project::new(
            "1",
            "test1",
            SqlDialect::PostgreSql,
            vec![Table::new(
                "Person",
                vec![Column::new("ID", DataType::new("string")).primary_key()],
                TableView::new(50.0, 100.0),
            )],
        )
    }

    /// table root > group > rect, plus a rect outside any table
    fn nested_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene.add_table_root(Id::new("table.Person"), Point::default());
        let group = scene.add_group(Id::new("table.Person.restColumns"));
        let leaf = scene.add_rect(Id::new("table.Person.restColumnsBox"), RectStyle::default());
        scene.append_child(root, group);
        scene.append_child(group, leaf);

        let outside = scene.add_rect(Id::new("backdrop"), RectStyle::default());
        (scene, root, leaf, outside)
    }

    #[test]
    fn test_walk_finds_root_from_deep_leaf() {
        let (scene, root, leaf, _) = nested_scene();
        assert_eq!(find_table_root(&scene, leaf), Some(root));
    }

    #[test]
    fn test_walk_from_root_returns_itself() {
        let (scene, root, _, _) = nested_scene();
        assert_eq!(find_table_root(&scene, root), Some(root));
    }

    #[test]
    fn test_walk_outside_any_table_returns_none() {
        let (scene, _, _, outside) = nested_scene();
        assert_eq!(find_table_root(&scene, outside), None);
    }

    #[test]
    fn test_resolve_finds_table_by_name() {
        let (scene, root, _, _) = nested_scene();
        let project = sample_project();

        let table = resolve_table(&scene, root, &project).unwrap();
        assert_eq!(table.name(), "Person");
    }

    #[test]
    fn test_resolve_stale_node_is_not_found() {
        let mut scene = Scene::new();
        let stale = scene.add_table_root(Id::new("table.Removed"), Point::default());
        let project = sample_project();

        let result = resolve_table(&scene, stale, &project);
        assert!(matches!(
            result,
            Err(ProjectError::UnknownTable(name)) if name == "Removed"
        ));
    }
}
