//! Scene construction from a project snapshot.
//!
//! The builder maps the domain snapshot into a drawable tree: one pannable
//! viewport group holding a table-root sub-tree per table. Each table is a
//! padded container with an absolute background box, a static title, and the
//! column groupings — the primary-key column in its own group ahead of the
//! remaining columns, or a divider plus a note for empty tables.
//!
//! Every container is laid out as it is assembled, bottom-up, because the
//! absolute children and the container's own box depend on the computed
//! extents of the static children.

use log::debug;

use sigma_core::{
    color::Color,
    geometry::{Offset, Point},
    identifier::Id,
    model::{Column, Project, Table},
    scene::{NodeId, RectStyle, Scene, Stroke},
    text::TextStyle,
};

use crate::{
    config::StyleConfig,
    error::SigmaError,
    layout::{self, AbsolutePosition, Child, Container},
};

/// Padding of a table's outer container.
const TABLE_PADDING: (f32, f32, f32, f32) = (10.0, 20.0, 10.0, 20.0);
/// Padding of a column group container.
const COLUMN_GROUP_PADDING: (f32, f32, f32, f32) = (5.0, 10.0, 5.0, 10.0);
/// Vertical distance of the empty-table divider below the container's top padding.
const DIVIDER_DROP: f32 = 20.0;
/// Top margin of the empty-table note.
const NO_COLUMNS_MARGIN: f32 = 10.0;
/// Top margin of the rest-columns group when a primary-key group precedes it.
const REST_GROUP_MARGIN: f32 = 3.0;

const NO_COLUMNS_TEXT: &str = "Table contains no columns";

/// Builds drawable scenes from project snapshots.
pub struct SceneBuilder<'a> {
    style: &'a StyleConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Builds the full scene for a project: a viewport group at the
    /// persisted origin containing one table root per table.
    ///
    /// Returns the scene together with the viewport node.
    pub fn build(
        &self,
        project: &Project,
        viewport_origin: Point,
    ) -> Result<(Scene, NodeId), SigmaError> {
        debug!(
            project_id = project.id(),
            table_count = project.tables().len();
            "Building scene"
        );

        let mut scene = Scene::new();
        let viewport = scene.add_group(Id::new("viewport"));
        scene.set_position(viewport, viewport_origin);

        for table in project.tables() {
            let root = self.build_table(&mut scene, table)?;
            scene.append_child(viewport, root);
        }

        Ok((scene, viewport))
    }

    /// Builds the sub-tree for one table and returns its table-root node.
    pub fn build_table(&self, scene: &mut Scene, table: &Table) -> Result<NodeId, SigmaError> {
        let prefix = Id::new(&format!("table.{}", table.name()));
        let root = scene.add_table_root(prefix, Point::new(table.view().x, table.view().y));

        let background = scene.add_rect(
            prefix.suffixed("box"),
            RectStyle::new(Some(self.table_fill()?), Some(Stroke::new(self.stroke_color()?, 2.0))),
        );
        let title = scene.add_text(
            prefix.suffixed("name"),
            table.name(),
            self.text_style(self.style.title_font_size()),
        );

        let mut children = vec![
            Child::anchored(background, Offset::sides(0.0, 0.0, 0.0, 0.0)),
            Child::flow(title),
        ];
        children.extend(self.column_children(scene, table, prefix)?);

        self.assemble(scene, Container::new(root, table_padding()), children)?;
        Ok(root)
    }

    /// Builds the column grouping children of a table container.
    fn column_children(
        &self,
        scene: &mut Scene,
        table: &Table,
        prefix: Id,
    ) -> Result<Vec<Child>, SigmaError> {
        if table.columns().is_empty() {
            let divider = scene.add_line(
                prefix.suffixed("headerDivider"),
                Stroke::new(self.stroke_color()?, 1.0),
            );
            let note = scene.add_text(
                prefix.suffixed("noColumns"),
                NO_COLUMNS_TEXT,
                self.text_style(self.style.note_font_size()),
            );
            return Ok(vec![
                Child::computed(divider, |container, width, _| {
                    let y = container.padding().resolve().top() + DIVIDER_DROP;
                    AbsolutePosition::Segment(Point::new(0.0, y), Point::new(width, y))
                }),
                Child::flow(note).with_margin(Offset::top(NO_COLUMNS_MARGIN)),
            ]);
        }

        let pk_index = table.columns().iter().position(Column::is_primary_key);
        let mut children = Vec::new();

        if let Some(pk_index) = pk_index {
            let pk = &table.columns()[pk_index];
            let group_name = prefix.suffixed(pk.name());
            children.push(self.column_group(
                scene,
                group_name,
                group_name.suffixed("box"),
                prefix,
                &[pk],
                Offset::none(),
            )?);
        }

        let rest: Vec<&Column> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != pk_index)
            .map(|(_, col)| col)
            .collect();
        if !rest.is_empty() {
            let margin = if pk_index.is_some() {
                Offset::top(REST_GROUP_MARGIN)
            } else {
                Offset::none()
            };
            children.push(self.column_group(
                scene,
                prefix.suffixed("restColumns"),
                Id::new(&format!("{prefix}.restColumnsBox")),
                prefix,
                &rest,
                margin,
            )?);
        }

        Ok(children)
    }

    /// Builds one padded column group: a filled background box plus one
    /// `"<name>:<type>"` text row per column. Returns it as a flow child of
    /// the table container.
    fn column_group(
        &self,
        scene: &mut Scene,
        group_name: Id,
        box_name: Id,
        prefix: Id,
        columns: &[&Column],
        margin: Offset,
    ) -> Result<Child, SigmaError> {
        let group = scene.add_group(group_name);
        let background = scene.add_rect(
            box_name,
            RectStyle::new(Some(self.table_fill()?), Some(Stroke::new(self.stroke_color()?, 1.0))),
        );

        let mut children = vec![Child::anchored(background, Offset::sides(0.0, 0.0, 0.0, 0.0))];
        for column in columns {
            let row = scene.add_text(
                prefix.suffixed(column.name()).suffixed("name"),
                &format!("{}:{}", column.name(), column.data_type().name()),
                self.text_style(self.style.column_font_size()),
            );
            children.push(Child::flow(row));
        }

        self.assemble(scene, Container::new(group, column_group_padding()), children)?;
        Ok(Child::flow(group).with_margin(margin))
    }

    /// Runs layout on the container, then attaches the children to it.
    fn assemble(
        &self,
        scene: &mut Scene,
        container: Container,
        children: Vec<Child>,
    ) -> Result<(), SigmaError> {
        layout::layout(scene, &container, &children)?;
        for child in &children {
            scene.append_child(container.node(), child.node());
        }
        Ok(())
    }

    fn text_style(&self, font_size: u16) -> TextStyle {
        TextStyle::new()
            .with_font_family(self.style.font_family())
            .with_font_size(font_size)
    }

    fn table_fill(&self) -> Result<Color, SigmaError> {
        self.style.table_fill().map_err(SigmaError::Config)
    }

    fn stroke_color(&self) -> Result<Color, SigmaError> {
        self.style.stroke_color().map_err(SigmaError::Config)
    }
}

fn table_padding() -> Offset {
    let (top, right, bottom, left) = TABLE_PADDING;
    Offset::sides(top, right, bottom, left)
}

fn column_group_padding() -> Offset {
    let (top, right, bottom, left) = COLUMN_GROUP_PADDING;
    Offset::sides(top, right, bottom, left)
}
