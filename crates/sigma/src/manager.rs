//! The project state store.
//!
//! [`ProjectManager`] owns the current [`Project`] snapshot and the selection
//! (at most one table name), and exposes the engine's intent operations:
//! moving a table and creating a new one. Intents delegate to the injected
//! [`ProjectSource`] and, on success, atomically replace the snapshot and
//! notify subscribers. On failure the prior snapshot stays authoritative and
//! the error propagates to the caller.
//!
//! Subscriptions are token-based; listeners are notified synchronously, in
//! registration order, with the new value. Setting the selection to its
//! current value is a no-op with no notification.

use log::debug;

use sigma_core::model::{Project, ProjectError, Table};

use crate::projects::ProjectSource;

/// Token returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// An ordered listener registry with unsubscribe tokens.
struct Listeners<T> {
    next_token: u64,
    entries: Vec<(u64, Box<dyn FnMut(&T)>)>,
}

impl<T> Listeners<T> {
    fn new() -> Self {
        Self {
            next_token: 0,
            entries: Vec::new(),
        }
    }

    fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let token = self.next_token;
        self.next_token += 1;
        self.entries.push((token, Box::new(listener)));
        Subscription(token)
    }

    fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(t, _)| *t != token.0);
        self.entries.len() != before
    }

    /// Invokes every listener with the value, in registration order.
    fn notify(&mut self, value: &T) {
        for (_, listener) in &mut self.entries {
            listener(value);
        }
    }
}

/// Holds the current project snapshot and selection, and routes intents to
/// the domain collaborator.
pub struct ProjectManager {
    source: Box<dyn ProjectSource>,
    project: Project,
    selection: Option<String>,
    project_listeners: Listeners<Project>,
    selection_listeners: Listeners<Option<String>>,
}

impl ProjectManager {
    /// Creates a manager over an already-loaded project snapshot.
    pub fn new(source: Box<dyn ProjectSource>, project: Project) -> Self {
        Self {
            source,
            project,
            selection: None,
            project_listeners: Listeners::new(),
            selection_listeners: Listeners::new(),
        }
    }

    /// Creates a manager by loading the project with the given id from the
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownProject`] when the id is not stored.
    pub fn load(source: Box<dyn ProjectSource>, project_id: &str) -> Result<Self, ProjectError> {
        let project = source.load_project(project_id)?;
        Ok(Self::new(source, project))
    }

    /// Returns the current project snapshot.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the currently selected table name, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Subscribes to snapshot replacements. The listener receives each new
    /// snapshot, synchronously, in registration order.
    pub fn on_project_changed(&mut self, listener: impl FnMut(&Project) + 'static) -> Subscription {
        self.project_listeners.subscribe(listener)
    }

    /// Removes a project-changed subscription. Returns whether it existed.
    pub fn unsubscribe_project_changed(&mut self, token: Subscription) -> bool {
        self.project_listeners.unsubscribe(token)
    }

    /// Subscribes to selection changes. The listener receives the new
    /// selection (a table name or `None`).
    pub fn on_selection_changed(
        &mut self,
        listener: impl FnMut(&Option<String>) + 'static,
    ) -> Subscription {
        self.selection_listeners.subscribe(listener)
    }

    /// Removes a selection-changed subscription. Returns whether it existed.
    pub fn unsubscribe_selection_changed(&mut self, token: Subscription) -> bool {
        self.selection_listeners.unsubscribe(token)
    }

    /// Sets the selection to the given table (compared by name) or clears
    /// it. An unchanged value notifies nobody. Returns whether the
    /// selection changed.
    pub fn set_selection(&mut self, table: Option<&Table>) -> bool {
        let new_selection = table.map(|t| t.name().to_string());
        if self.selection == new_selection {
            return false;
        }
        self.selection = new_selection;
        debug!(selection:? = self.selection; "Selection changed");

        // Listeners run against a clone so they may inspect the manager
        let selection = self.selection.clone();
        self.selection_listeners.notify(&selection);
        true
    }

    /// Moves a table to the given canvas position through the collaborator,
    /// then replaces the snapshot and notifies project listeners.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's rejection; the snapshot is left
    /// untouched in that case.
    pub fn move_table(&mut self, table: &Table, x: f32, y: f32) -> Result<(), ProjectError> {
        let updated = self.source.move_table(&self.project, table, x, y)?;
        self.set_project(updated);
        Ok(())
    }

    /// Appends a new table through the collaborator, then replaces the
    /// snapshot and notifies project listeners.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's rejection; the snapshot is left
    /// untouched in that case.
    pub fn create_new_table(&mut self) -> Result<(), ProjectError> {
        let updated = self.source.create_new_table(&self.project)?;
        self.set_project(updated);
        Ok(())
    }

    fn set_project(&mut self, project: Project) {
        self.project = project;
        let snapshot = self.project.clone();
        self.project_listeners.notify(&snapshot);
    }
}
