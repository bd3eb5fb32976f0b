//! Sigma - A layout and interaction engine for relational-schema diagrams.
//!
//! Tables from a schema project are placed on an infinite 2D canvas as
//! drawable shape trees; pointer gestures select tables, drag them to new
//! positions, and pan the viewport. Every snapshot or selection change
//! triggers a full rebuild of the scene from the current project state.

pub mod config;

mod error;
mod export;
mod hittest;
mod interaction;
mod layout;
mod manager;
mod projects;
mod render;

pub use sigma_core::{color, geometry, identifier, model, scene, text};

pub use error::SigmaError;
pub use hittest::{find_table_root, resolve_table};
pub use interaction::{Cursor, EventOutcome, InteractionController, PointerButton, PointerEvent};
pub use layout::{AbsolutePosition, Child, Container, LayoutError, Placement, layout};
pub use manager::{ProjectManager, Subscription};
pub use projects::{MemoryProjectSource, ProjectSource};
pub use render::SceneBuilder;

use log::{debug, info};

use sigma_core::{
    geometry::Point,
    identifier::Id,
    scene::{NodeId, Scene},
};

use config::AppConfig;

/// The engine façade tying the pipeline together.
///
/// A `CanvasEngine` owns the project state store, the interaction
/// controller, and the current scene. Hosts feed it pointer events through
/// [`dispatch`](Self::dispatch) and present the scene (or its SVG export)
/// after each render.
///
/// # Examples
///
/// ```
/// use sigma::{CanvasEngine, MemoryProjectSource, ProjectManager, config::AppConfig};
///
/// let manager = ProjectManager::load(Box::new(MemoryProjectSource::seeded()), "1")
///     .expect("seed project exists");
/// let engine = CanvasEngine::new(AppConfig::default(), manager)
///     .expect("initial render succeeds");
///
/// let svg = engine.render_svg().expect("export succeeds");
/// assert!(svg.contains("<svg"));
/// ```
pub struct CanvasEngine {
    config: AppConfig,
    manager: ProjectManager,
    controller: InteractionController,
    scene: Scene,
    viewport: NodeId,
}

impl CanvasEngine {
    /// Creates an engine over the given store and performs the initial
    /// render.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError` when the initial scene build fails (malformed
    /// style configuration).
    pub fn new(config: AppConfig, manager: ProjectManager) -> Result<Self, SigmaError> {
        info!(project_id = manager.project().id(); "Starting canvas engine");

        let controller = InteractionController::new();
        let (scene, viewport) = SceneBuilder::new(config.style())
            .build(manager.project(), controller.viewport_origin())?;

        Ok(Self {
            config,
            manager,
            controller,
            scene,
            viewport,
        })
    }

    /// Returns the current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the current scene mutably, for the host drawing layer's
    /// manual-drag behavior (moving draggable nodes between events).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Returns the viewport group node of the current scene.
    pub fn viewport(&self) -> NodeId {
        self.viewport
    }

    /// Returns the project state store.
    pub fn manager(&self) -> &ProjectManager {
        &self.manager
    }

    /// Returns the project state store mutably (for host-driven intents
    /// such as the "add a new table" action).
    pub fn manager_mut(&mut self) -> &mut ProjectManager {
        &mut self.manager
    }

    /// Returns the interaction controller.
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Returns the topmost shape node at the given scene-space point, for
    /// hosts without their own pointer dispatch.
    pub fn hit(&self, point: Point) -> Option<NodeId> {
        self.scene.node_at(point)
    }

    /// Rebuilds the scene from the current snapshot and the persisted
    /// viewport origin, then re-resolves the selection target by name.
    ///
    /// Node handles from the previous scene are invalid afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError` for malformed style configuration or layout
    /// descriptors.
    pub fn render(&mut self) -> Result<(), SigmaError> {
        let builder = SceneBuilder::new(self.config.style());
        let (scene, viewport) =
            builder.build(self.manager.project(), self.controller.viewport_origin())?;
        self.scene = scene;
        self.viewport = viewport;

        // The old scene's node handles are gone; find the selected table's
        // root again by name.
        let target = self
            .manager
            .selection()
            .map(|name| Id::new(&format!("table.{name}")))
            .and_then(|name| self.scene.find_by_name(name));
        self.controller.set_selection_target(target);

        debug!(node_count = self.scene.len(); "Scene rebuilt");
        Ok(())
    }

    /// Routes one pointer event through the interaction controller and
    /// re-renders when the outcome requires it.
    ///
    /// # Errors
    ///
    /// Propagates stale-reference resolution failures and store-intent
    /// rejections.
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<EventOutcome, SigmaError> {
        let outcome =
            self.controller
                .handle(&mut self.scene, self.viewport, &mut self.manager, event)?;
        if outcome.needs_redraw() {
            self.render()?;
        }
        Ok(outcome)
    }

    /// Creates a new table through the store and re-renders.
    ///
    /// # Errors
    ///
    /// Propagates the store's rejection; the scene is left as-is then.
    pub fn create_new_table(&mut self) -> Result<(), SigmaError> {
        self.manager.create_new_table()?;
        self.render()
    }

    /// Exports the current scene as an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::Config` for a malformed background color.
    pub fn render_svg(&self) -> Result<String, SigmaError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(SigmaError::Config)?;
        Ok(export::render_document(&self.scene, self.config.canvas(), background).to_string())
    }
}
