//! The pointer-event state machine.
//!
//! The controller turns pointer gestures into selection changes, table-move
//! intents, and viewport panning. It is idle or panning; dragging itself is
//! the host drawing layer's manual-drag behavior, which surfaces here only
//! as the final `DragEnd` event.
//!
//! Panning state and the persisted viewport origin are view-local: they are
//! never written to the project store and survive scene rebuilds. The
//! controller never retains node handles across a rebuild except the
//! selection target, which the engine re-resolves by name after every
//! render.

use log::debug;

use sigma_core::{
    geometry::Point,
    scene::{NodeId, Scene},
};

use crate::{error::SigmaError, hittest, manager::ProjectManager};

/// Pointer buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Pointer events delivered by the host drawing layer.
///
/// `target` carries the shape node the host's pointer dispatch resolved, if
/// any ([`Scene::node_at`] provides geometric picking for hosts without
/// their own).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A click or tap.
    Click { target: Option<NodeId> },
    /// A manual drag of a draggable node completed.
    DragEnd { target: Option<NodeId> },
    /// A button was pressed; `screen` is in screen coordinates.
    ButtonDown {
        button: PointerButton,
        screen: Point,
    },
    /// The pointer moved with an optional button held.
    PointerMove {
        button: Option<PointerButton>,
        screen: Point,
    },
    /// A button was released.
    ButtonUp { button: PointerButton },
    /// The pointer entered a shape node.
    PointerEnter { target: NodeId },
    /// The pointer left a shape node.
    PointerLeave { target: NodeId },
}

/// The cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Pointer,
}

/// What the engine should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    redraw: bool,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self { redraw: true }
    }

    fn none() -> Self {
        Self { redraw: false }
    }

    /// True when the scene must be rebuilt from the snapshot.
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }
}

/// Active panning gesture: where it started on screen and where the
/// viewport was at that moment.
#[derive(Debug, Clone, Copy)]
struct PanState {
    start_screen: Point,
    origin: Point,
}

/// The interaction state machine.
#[derive(Debug, Default)]
pub struct InteractionController {
    viewport_origin: Point,
    pan: Option<PanState>,
    selection_target: Option<NodeId>,
    cursor: Cursor,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the persisted viewport origin, the baseline scenes are
    /// rebuilt against.
    pub fn viewport_origin(&self) -> Point {
        self.viewport_origin
    }

    /// Returns the cursor the host should display.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns true while a middle-button pan is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Returns the current selection target node, if any.
    pub fn selection_target(&self) -> Option<NodeId> {
        self.selection_target
    }

    /// Replaces the selection target. The engine calls this after each
    /// rebuild with the re-resolved node of the selected table.
    pub fn set_selection_target(&mut self, target: Option<NodeId>) {
        self.selection_target = target;
    }

    /// Handles one pointer event against the current scene and store.
    ///
    /// # Errors
    ///
    /// Propagates stale-reference resolution failures and store-intent
    /// rejections; the interaction state is left consistent either way.
    pub fn handle(
        &mut self,
        scene: &mut Scene,
        viewport: NodeId,
        manager: &mut ProjectManager,
        event: PointerEvent,
    ) -> Result<EventOutcome, SigmaError> {
        match event {
            PointerEvent::Click { target } => self.handle_click(scene, manager, target),
            PointerEvent::DragEnd { target } => self.handle_drag_end(scene, manager, target),
            PointerEvent::ButtonDown { button, screen } => {
                Ok(self.handle_button_down(scene, viewport, button, screen))
            }
            PointerEvent::PointerMove { button, screen } => {
                Ok(self.handle_pointer_move(scene, viewport, button, screen))
            }
            PointerEvent::ButtonUp { button } => Ok(self.handle_button_up(scene, viewport, button)),
            PointerEvent::PointerEnter { target } => Ok(self.handle_hover(scene, Some(target))),
            PointerEvent::PointerLeave { target: _ } => Ok(self.handle_hover(scene, None)),
        }
    }

    fn handle_click(
        &mut self,
        scene: &Scene,
        manager: &mut ProjectManager,
        target: Option<NodeId>,
    ) -> Result<EventOutcome, SigmaError> {
        match target.and_then(|t| hittest::find_table_root(scene, t)) {
            Some(root) => {
                let table = hittest::resolve_table(scene, root, manager.project())?.clone();
                self.selection_target = Some(root);
                let changed = manager.set_selection(Some(&table));
                Ok(if changed {
                    EventOutcome::redraw()
                } else {
                    EventOutcome::none()
                })
            }
            None => {
                self.selection_target = None;
                let changed = manager.set_selection(None);
                Ok(if changed {
                    EventOutcome::redraw()
                } else {
                    EventOutcome::none()
                })
            }
        }
    }

    fn handle_drag_end(
        &mut self,
        scene: &Scene,
        manager: &mut ProjectManager,
        target: Option<NodeId>,
    ) -> Result<EventOutcome, SigmaError> {
        let Some(root) = target.and_then(|t| hittest::find_table_root(scene, t)) else {
            // Drag-end on non-table elements is ignored
            return Ok(EventOutcome::none());
        };

        let table = hittest::resolve_table(scene, root, manager.project())?.clone();
        let position = scene.position(root);
        manager.move_table(&table, position.x(), position.y())?;
        Ok(EventOutcome::redraw())
    }

    fn handle_button_down(
        &mut self,
        scene: &Scene,
        viewport: NodeId,
        button: PointerButton,
        screen: Point,
    ) -> EventOutcome {
        if button != PointerButton::Middle {
            return EventOutcome::none();
        }
        self.pan = Some(PanState {
            start_screen: screen,
            origin: scene.position(viewport),
        });
        self.cursor = Cursor::Move;
        EventOutcome::none()
    }

    fn handle_pointer_move(
        &mut self,
        scene: &mut Scene,
        viewport: NodeId,
        button: Option<PointerButton>,
        screen: Point,
    ) -> EventOutcome {
        if button != Some(PointerButton::Middle) {
            return EventOutcome::none();
        }
        let Some(pan) = self.pan else {
            return EventOutcome::none();
        };

        let delta = pan.start_screen.sub_point(screen);
        scene.set_position(viewport, pan.origin.add_point(delta));
        EventOutcome::none()
    }

    fn handle_button_up(
        &mut self,
        scene: &Scene,
        viewport: NodeId,
        button: PointerButton,
    ) -> EventOutcome {
        if button != PointerButton::Middle || self.pan.is_none() {
            return EventOutcome::none();
        }
        self.pan = None;
        self.viewport_origin = scene.position(viewport);
        self.cursor = Cursor::Default;
        debug!(
            x = self.viewport_origin.x(),
            y = self.viewport_origin.y();
            "Viewport origin committed"
        );
        EventOutcome::none()
    }

    fn handle_hover(&mut self, scene: &Scene, target: Option<NodeId>) -> EventOutcome {
        // Hover never fights the pan cursor
        if self.pan.is_some() {
            return EventOutcome::none();
        }
        self.cursor = match target.and_then(|t| hittest::find_table_root(scene, t)) {
            Some(_) => Cursor::Pointer,
            None => Cursor::Default,
        };
        EventOutcome::none()
    }
}
