//! Box layout for scene containers.
//!
//! This module positions the children of a container node and computes the
//! container's resulting size. Children participate either in a vertical
//! *static flow* (stacked top to bottom, respecting margins and the
//! container's padding) or are *absolutely* positioned against the
//! container's computed size, via fixed edge insets or a position callback.
//!
//! The callback form exists for elements whose geometry depends on the
//! computed container extent, such as a divider line spanning the full
//! container width. Callbacks run after the static pass, when the container
//! size is known.
//!
//! # Pipeline Position
//!
//! ```text
//! Project snapshot
//!     ↓ render
//! Scene + layout descriptors
//!     ↓ layout (this module)
//! Positioned nodes, sized containers
//!     ↓ export / interaction
//! ```
//!
//! Line nodes never participate in the static flow: a connector line's
//! geometry is only meaningful through a position callback, so a static line
//! child is skipped entirely (no height or width contribution).

use thiserror::Error;

use sigma_core::{
    geometry::{Offset, Point, Size},
    identifier::Id,
    scene::{NodeId, NodeKind, Scene},
};

/// Errors raised by the layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// An absolute child supplied neither edge insets nor a position
    /// callback. This is a descriptor bug; it fails fast at render time
    /// rather than silently drawing at the origin.
    #[error("absolute child `{0}` has neither edge insets nor a position callback")]
    UnresolvedPlacement(Id),
}

/// The result of a position callback: a point for box-like nodes, or a
/// segment (start and end point) for line nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbsolutePosition {
    Point(Point),
    Segment(Point, Point),
}

/// Callback computing an absolute child's geometry from the container and
/// its computed width and height.
pub type PositionFn = Box<dyn Fn(&Container, f32, f32) -> AbsolutePosition>;

/// A layout parent: the container node plus its padding.
#[derive(Debug, Clone, Copy)]
pub struct Container {
    node: NodeId,
    padding: Offset,
}

impl Container {
    pub fn new(node: NodeId, padding: Offset) -> Self {
        Self { node, padding }
    }

    /// Returns the container's scene node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the container's padding record
    pub fn padding(&self) -> Offset {
        self.padding
    }
}

/// How a child is positioned within its container.
pub enum Placement {
    /// Participates in the vertical flow.
    Static,
    /// Positioned independently of the flow.
    Absolute {
        insets: Option<Offset>,
        position: Option<PositionFn>,
    },
}

impl std::fmt::Debug for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => write!(f, "Static"),
            Self::Absolute { insets, position } => f
                .debug_struct("Absolute")
                .field("insets", insets)
                .field("position", &position.as_ref().map(|_| "<fn>"))
                .finish(),
        }
    }
}

/// A layout child: the scene node, its margin, and its placement.
#[derive(Debug)]
pub struct Child {
    node: NodeId,
    margin: Offset,
    placement: Placement,
}

impl Child {
    /// A child participating in the vertical flow.
    pub fn flow(node: NodeId) -> Self {
        Self {
            node,
            margin: Offset::none(),
            placement: Placement::Static,
        }
    }

    /// An absolute child with no geometry source yet. Laying it out without
    /// adding insets or a position callback fails with
    /// [`LayoutError::UnresolvedPlacement`].
    pub fn absolute(node: NodeId) -> Self {
        Self {
            node,
            margin: Offset::none(),
            placement: Placement::Absolute {
                insets: None,
                position: None,
            },
        }
    }

    /// An absolute child positioned by edge insets: x = left, y = top,
    /// width = container width − right, height = container height − bottom.
    pub fn anchored(node: NodeId, insets: Offset) -> Self {
        Self {
            node,
            margin: Offset::none(),
            placement: Placement::Absolute {
                insets: Some(insets),
                position: None,
            },
        }
    }

    /// An absolute child positioned by a callback receiving the container
    /// and its computed width and height.
    pub fn computed(
        node: NodeId,
        position: impl Fn(&Container, f32, f32) -> AbsolutePosition + 'static,
    ) -> Self {
        Self {
            node,
            margin: Offset::none(),
            placement: Placement::Absolute {
                insets: None,
                position: Some(Box::new(position)),
            },
        }
    }

    /// Sets the child's margin (builder style). Only static children consult
    /// their margin.
    pub fn with_margin(mut self, margin: Offset) -> Self {
        self.margin = margin;
        self
    }

    /// Returns the child's scene node
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn is_static(&self) -> bool {
        matches!(self.placement, Placement::Static)
    }
}

/// Positions `children` within `container` and sizes the container.
///
/// Static children flow top to bottom in input order; absolute children are
/// then placed against the computed container size. Child positions, line
/// endpoints, absolute child sizes, and the container's own size are written
/// back into the scene.
///
/// # Errors
///
/// Returns [`LayoutError::UnresolvedPlacement`] for an absolute child with
/// neither insets nor a position callback.
pub fn layout(scene: &mut Scene, container: &Container, children: &[Child]) -> Result<(), LayoutError> {
    let padding = container.padding().resolve();

    let mut max_width: f32 = 0.0;
    let mut cursor = padding.top();

    for child in children.iter().filter(|c| c.is_static()) {
        // Lines carry no flow geometry; see the module docs.
        if matches!(scene.kind(child.node), NodeKind::Line { .. }) {
            continue;
        }

        let margin = child.margin.resolve();
        let x = padding.left() + margin.left();
        let y = cursor + margin.top();
        scene.set_position(child.node, Point::new(x, y));

        let child_size = scene.size(child.node);
        cursor = y + child_size.height();
        max_width = max_width.max(child_size.width());
    }

    let container_height = cursor + padding.bottom();
    let container_width = padding.left() + max_width + padding.right();

    for child in children.iter().filter(|c| !c.is_static()) {
        let Placement::Absolute { insets, position } = &child.placement else {
            continue;
        };

        if let Some(position) = position {
            match position(container, container_width, container_height) {
                AbsolutePosition::Point(point) => scene.set_position(child.node, point),
                AbsolutePosition::Segment(start, end) => {
                    scene.set_line_points(child.node, start, end);
                }
            }
        } else if let Some(insets) = insets {
            let insets = insets.resolve();
            scene.set_position(child.node, Point::new(insets.left(), insets.top()));
            scene.set_size(
                child.node,
                Size::new(
                    container_width - insets.right(),
                    container_height - insets.bottom(),
                ),
            );
        } else {
            return Err(LayoutError::UnresolvedPlacement(scene.name(child.node)));
        }
    }

    scene.set_size(container.node(), Size::new(container_width, container_height));
    Ok(())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use sigma_core::color::Color;
    use sigma_core::scene::{RectStyle, Stroke};

    use super::*;

    fn scene_with_group() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let group = scene.add_group(Id::new("container"));
        (scene, group)
    }

    fn sized_rect(scene: &mut Scene, name: &str, width: f32, height: f32) -> NodeId {
        let rect = scene.add_rect(Id::new(name), RectStyle::default());
        scene.set_size(rect, Size::new(width, height));
        rect
    }

    #[test]
    fn test_static_children_stack_in_order() {
        let (mut scene, group) = scene_with_group();
        let a = sized_rect(&mut scene, "a", 30.0, 10.0);
        let b = sized_rect(&mut scene, "b", 20.0, 20.0);

        let container = Container::new(group, Offset::none());
        layout(
            &mut scene,
            &container,
            &[Child::flow(a), Child::flow(b).with_margin(Offset::top(5.0))],
        )
        .unwrap();

        assert_approx_eq!(f32, scene.position(a).y(), 0.0);
        assert_approx_eq!(f32, scene.position(b).y(), 15.0); // a.height + b.margin.top
        assert!(scene.position(a).y() < scene.position(b).y());
    }

    #[test]
    fn test_container_size_from_static_children() {
        let (mut scene, group) = scene_with_group();
        let a = sized_rect(&mut scene, "a", 30.0, 10.0);
        let b = sized_rect(&mut scene, "b", 50.0, 20.0);

        let container = Container::new(group, Offset::sides(10.0, 20.0, 10.0, 20.0));
        layout(&mut scene, &container, &[Child::flow(a), Child::flow(b)]).unwrap();

        // height = top + a + b + bottom; width = left + max(widths) + right
        assert_approx_eq!(f32, scene.size(group).height(), 50.0);
        assert_approx_eq!(f32, scene.size(group).width(), 90.0);
    }

    #[test]
    fn test_empty_container_collapses_to_padding() {
        let (mut scene, group) = scene_with_group();
        let container = Container::new(group, Offset::sides(10.0, 20.0, 10.0, 20.0));
        layout(&mut scene, &container, &[]).unwrap();

        assert_approx_eq!(f32, scene.size(group).height(), 20.0);
        assert_approx_eq!(f32, scene.size(group).width(), 40.0);
    }

    #[test]
    fn test_static_child_x_includes_padding_and_margin() {
        let (mut scene, group) = scene_with_group();
        let a = sized_rect(&mut scene, "a", 30.0, 10.0);

        let container = Container::new(group, Offset::sides(10.0, 20.0, 10.0, 20.0));
        layout(
            &mut scene,
            &container,
            &[Child::flow(a).with_margin(Offset::sides(2.0, 0.0, 0.0, 3.0))],
        )
        .unwrap();

        assert_approx_eq!(f32, scene.position(a).x(), 23.0); // padding.left + margin.left
        assert_approx_eq!(f32, scene.position(a).y(), 12.0); // padding.top + margin.top
    }

    #[test]
    fn test_absolute_zero_insets_fill_container() {
        let (mut scene, group) = scene_with_group();
        let background = sized_rect(&mut scene, "background", 0.0, 0.0);
        let content = sized_rect(&mut scene, "content", 60.0, 25.0);

        let container = Container::new(group, Offset::sides(10.0, 20.0, 10.0, 20.0));
        layout(
            &mut scene,
            &container,
            &[
                Child::anchored(background, Offset::sides(0.0, 0.0, 0.0, 0.0)),
                Child::flow(content),
            ],
        )
        .unwrap();

        assert_eq!(scene.position(background), Point::new(0.0, 0.0));
        assert_eq!(scene.size(background), scene.size(group));
    }

    #[test]
    fn test_absolute_insets_shrink_from_edges() {
        let (mut scene, group) = scene_with_group();
        let content = sized_rect(&mut scene, "content", 60.0, 25.0);
        let inset = sized_rect(&mut scene, "inset", 0.0, 0.0);

        let container = Container::new(group, Offset::none());
        layout(
            &mut scene,
            &container,
            &[
                Child::flow(content),
                Child::anchored(inset, Offset::sides(1.0, 2.0, 3.0, 4.0)),
            ],
        )
        .unwrap();

        assert_eq!(scene.position(inset), Point::new(4.0, 1.0));
        assert_approx_eq!(f32, scene.size(inset).width(), 58.0); // 60 - right
        assert_approx_eq!(f32, scene.size(inset).height(), 22.0); // 25 - bottom
    }

    #[test]
    fn test_position_callback_receives_container_size() {
        let (mut scene, group) = scene_with_group();
        let content = sized_rect(&mut scene, "content", 80.0, 40.0);
        let stroke = Stroke::new(Color::default(), 1.0);
        let divider = scene.add_line(Id::new("divider"), stroke);

        let container = Container::new(group, Offset::sides(10.0, 0.0, 0.0, 0.0));
        layout(
            &mut scene,
            &container,
            &[
                Child::flow(content),
                Child::computed(divider, |container, width, _| {
                    let y = container.padding().resolve().top() + 20.0;
                    AbsolutePosition::Segment(Point::new(0.0, y), Point::new(width, y))
                }),
            ],
        )
        .unwrap();

        assert_eq!(
            scene.line_points(divider),
            Some((Point::new(0.0, 30.0), Point::new(80.0, 30.0)))
        );
    }

    #[test]
    fn test_unresolved_absolute_child_fails_fast() {
        let (mut scene, group) = scene_with_group();
        let orphan = sized_rect(&mut scene, "orphan", 10.0, 10.0);

        let container = Container::new(group, Offset::none());
        let result = layout(&mut scene, &container, &[Child::absolute(orphan)]);

        assert!(matches!(
            result,
            Err(LayoutError::UnresolvedPlacement(name)) if name == "orphan"
        ));
    }

    #[test]
    fn test_static_line_is_skipped_entirely() {
        let (mut scene, group) = scene_with_group();
        let content = sized_rect(&mut scene, "content", 40.0, 10.0);
        let stroke = Stroke::new(Color::default(), 1.0);
        let line = scene.add_line(Id::new("stray"), stroke);
        scene.set_size(line, Size::new(500.0, 500.0));

        let container = Container::new(group, Offset::none());
        layout(
            &mut scene,
            &container,
            &[Child::flow(line), Child::flow(content)],
        )
        .unwrap();

        // The line contributed neither height nor width
        assert_approx_eq!(f32, scene.size(group).height(), 10.0);
        assert_approx_eq!(f32, scene.size(group).width(), 40.0);
        assert_approx_eq!(f32, scene.position(content).y(), 0.0);
    }
}
