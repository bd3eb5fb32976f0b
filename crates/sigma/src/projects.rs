//! The domain collaborator: project persistence operations.
//!
//! The engine never mutates snapshots itself; it delegates to a
//! [`ProjectSource`], which owns the stored projects and answers every
//! mutation with a whole new [`Project`] snapshot. [`MemoryProjectSource`]
//! is the in-process realization: an explicit store object constructed with
//! seed data (or any project list) and injected into the engine, with all
//! reads and writes going through its methods.

use log::debug;

use sigma_core::model::{Column, DataType, Project, ProjectError, SqlDialect, Table, TableView};

/// Persistence operations the engine delegates to.
///
/// Every mutation returns the whole updated project snapshot; the caller
/// replaces its copy atomically.
pub trait ProjectSource {
    /// Returns all stored projects.
    fn load_projects(&self) -> Vec<Project>;

    /// Returns the project with the given id.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when no project has that id.
    fn load_project(&self, id: &str) -> Result<Project, ProjectError>;

    /// Returns the column types available to this source.
    fn load_column_types(&self) -> Vec<DataType>;

    /// Appends a new empty table to the project and returns the updated
    /// snapshot.
    ///
    /// The new table is named `Table <n+1>` where n counts existing tables
    /// whose name contains `Table <integer>`. The count (not the highest
    /// suffix) drives the name, so non-contiguous names can produce a
    /// duplicate; callers relying on uniqueness must not delete tables.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] when the project id is not stored.
    fn create_new_table(&mut self, project: &Project) -> Result<Project, ProjectError>;

    /// Replaces the named table's canvas position and returns the updated
    /// snapshot.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownProject`] / [`ProjectError::UnknownTable`]
    /// when the project or table is not stored, and
    /// [`ProjectError::NonFinitePosition`] for non-finite coordinates.
    fn move_table(
        &mut self,
        project: &Project,
        table: &Table,
        x: f32,
        y: f32,
    ) -> Result<Project, ProjectError>;
}

/// In-memory project store with explicit lifecycle.
#[derive(Debug)]
pub struct MemoryProjectSource {
    projects: Vec<Project>,
    types: Vec<DataType>,
}

impl MemoryProjectSource {
    /// Creates a store over the given projects with the default column types.
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            types: vec![
                DataType::new("string"),
                DataType::new("number"),
                DataType::new("boolean"),
            ],
        }
    }

    /// Creates a store seeded with the sample data set: project "1"
    /// ("test1", one "Person" table) and project "2" ("test2", empty).
    pub fn seeded() -> Self {
        let source = Self::new(Vec::new());
        let string_type = source
            .type_by_name("string")
            .expect("'string' is a default column type");

        let person = Table::new(
            "Person",
            vec![
                Column::new("ID", string_type.clone()).primary_key(),
                Column::new("name", string_type.clone()),
                Column::new("birthDate", string_type),
            ],
            TableView::new(50.0, 100.0),
        );

        Self {
            projects: vec![
                Project::new("1", "test1", SqlDialect::PostgreSql, vec![person]),
                Project::new("2", "test2", SqlDialect::PostgreSql, vec![]),
            ],
            ..source
        }
    }

    /// Looks a column type up by name.
    ///
    /// # Errors
    ///
    /// [`ProjectError::UnknownType`] when the name is not registered.
    pub fn type_by_name(&self, name: &str) -> Result<DataType, ProjectError> {
        self.types
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| ProjectError::UnknownType(name.to_string()))
    }

    fn project_index(&self, id: &str) -> Result<usize, ProjectError> {
        self.projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ProjectError::UnknownProject(id.to_string()))
    }
}

impl ProjectSource for MemoryProjectSource {
    fn load_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    fn load_project(&self, id: &str) -> Result<Project, ProjectError> {
        let idx = self.project_index(id)?;
        Ok(self.projects[idx].clone())
    }

    fn load_column_types(&self) -> Vec<DataType> {
        self.types.clone()
    }

    fn create_new_table(&mut self, project: &Project) -> Result<Project, ProjectError> {
        let project_idx = self.project_index(project.id())?;

        let counter = project
            .tables()
            .iter()
            .filter(|t| has_numbered_table_name(t.name()))
            .count();
        let new_table = Table::new(
            format!("Table {}", counter + 1),
            vec![],
            TableView::new(0.0, 0.0),
        );
        debug!(table_name = new_table.name(); "Creating table");

        let mut tables = project.tables().to_vec();
        tables.push(new_table);
        let updated = project.with_tables(tables);

        self.projects[project_idx] = updated.clone();
        Ok(updated)
    }

    fn move_table(
        &mut self,
        project: &Project,
        table: &Table,
        x: f32,
        y: f32,
    ) -> Result<Project, ProjectError> {
        let project_idx = self.project_index(project.id())?;
        let table_idx = project
            .tables()
            .iter()
            .position(|t| t.name() == table.name())
            .ok_or_else(|| ProjectError::UnknownTable(table.name().to_string()))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectError::NonFinitePosition { x, y });
        }
        debug!(table_name = table.name(), x, y; "Moving table");

        let mut tables = project.tables().to_vec();
        tables[table_idx] = table.with_view(x, y);
        let updated = project.with_tables(tables);

        self.projects[project_idx] = updated.clone();
        Ok(updated)
    }
}

/// True when the name contains `Table ` immediately followed by a digit,
/// anywhere in the string (the create-naming pattern).
fn has_numbered_table_name(name: &str) -> bool {
    name.match_indices("Table ").any(|(idx, matched)| {
        name[idx + matched.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_tables(names: &[&str]) -> (MemoryProjectSource, Project) {
        let tables = names
            .iter()
            .map(|name| Table::new(*name, vec![], TableView::new(0.0, 0.0)))
            .collect();
        let project = Project::new("1", "test1", SqlDialect::PostgreSql, tables);
        let source = MemoryProjectSource::new(vec![project.clone()]);
        (source, project)
    }

    #[test]
    fn test_seeded_fixture() {
        let source = MemoryProjectSource::seeded();
        let projects = source.load_projects();
        assert_eq!(projects.len(), 2);

        let person = projects[0].table("Person").expect("seed has Person");
        assert_eq!(person.view(), TableView::new(50.0, 100.0));
        assert_eq!(person.columns().len(), 3);
        assert_eq!(person.primary_key_column().unwrap().name(), "ID");

        assert!(projects[1].tables().is_empty());
    }

    #[test]
    fn test_load_project_unknown_id() {
        let source = MemoryProjectSource::seeded();
        assert!(matches!(
            source.load_project("99"),
            Err(ProjectError::UnknownProject(id)) if id == "99"
        ));
    }

    #[test]
    fn test_column_types() {
        let source = MemoryProjectSource::seeded();
        let types = source.load_column_types();
        assert_eq!(types.len(), 3);
        assert!(source.type_by_name("number").is_ok());
        assert!(matches!(
            source.type_by_name("blob"),
            Err(ProjectError::UnknownType(name)) if name == "blob"
        ));
    }

    #[test]
    fn test_create_names_by_count() {
        let (mut source, project) = project_with_tables(&["Table 1"]);
        let updated = source.create_new_table(&project).unwrap();

        assert_eq!(updated.tables().len(), 2);
        assert_eq!(updated.tables()[1].name(), "Table 2");
    }

    #[test]
    fn test_create_count_based_naming_can_duplicate() {
        // Two names match the pattern, so the next is "Table 3" even though
        // that name already exists. Pins the count-based behavior.
        let (mut source, project) = project_with_tables(&["Table 1", "Table 3"]);
        let updated = source.create_new_table(&project).unwrap();

        assert_eq!(updated.tables()[2].name(), "Table 3");
    }

    #[test]
    fn test_create_ignores_non_matching_names() {
        let (mut source, project) = project_with_tables(&["Person", "Table x"]);
        let updated = source.create_new_table(&project).unwrap();

        assert_eq!(updated.tables()[2].name(), "Table 1");
    }

    #[test]
    fn test_create_unknown_project() {
        let mut source = MemoryProjectSource::new(vec![]);
        let project = Project::new("7", "ghost", SqlDialect::PostgreSql, vec![]);

        assert!(matches!(
            source.create_new_table(&project),
            Err(ProjectError::UnknownProject(id)) if id == "7"
        ));
    }

    #[test]
    fn test_move_replaces_view_only() {
        let source = &mut MemoryProjectSource::seeded();
        let project = source.load_project("1").unwrap();
        let person = project.table("Person").unwrap().clone();

        let updated = source.move_table(&project, &person, 120.0, 80.0).unwrap();

        let moved = updated.table("Person").unwrap();
        assert_eq!(moved.view(), TableView::new(120.0, 80.0));
        assert_eq!(moved.columns(), person.columns());
        assert_eq!(updated.tables().len(), project.tables().len());

        // The store now answers with the updated snapshot
        let reloaded = source.load_project("1").unwrap();
        assert_eq!(reloaded.table("Person").unwrap().view(), TableView::new(120.0, 80.0));
    }

    #[test]
    fn test_move_unknown_table() {
        let source = &mut MemoryProjectSource::seeded();
        let project = source.load_project("1").unwrap();
        let ghost = Table::new("Ghost", vec![], TableView::new(0.0, 0.0));

        assert!(matches!(
            source.move_table(&project, &ghost, 1.0, 2.0),
            Err(ProjectError::UnknownTable(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_move_rejects_non_finite() {
        let source = &mut MemoryProjectSource::seeded();
        let project = source.load_project("1").unwrap();
        let person = project.table("Person").unwrap().clone();

        assert!(matches!(
            source.move_table(&project, &person, f32::NAN, 0.0),
            Err(ProjectError::NonFinitePosition { .. })
        ));

        // The stored snapshot is untouched
        let reloaded = source.load_project("1").unwrap();
        assert_eq!(reloaded.table("Person").unwrap().view(), TableView::new(50.0, 100.0));
    }

    #[test]
    fn test_numbered_name_pattern() {
        assert!(has_numbered_table_name("Table 1"));
        assert!(has_numbered_table_name("Table 42"));
        assert!(has_numbered_table_name("Table 12abc"));
        assert!(has_numbered_table_name("xTable 3"));
        assert!(!has_numbered_table_name("Table"));
        assert!(!has_numbered_table_name("Table x"));
        assert!(!has_numbered_table_name("Person"));
    }
}
