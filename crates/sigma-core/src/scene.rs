//! The drawable node tree.
//!
//! A [`Scene`] is the engine's realization of the drawing-primitive
//! capability: a tree of group/rect/text/line nodes with settable position,
//! size, fill and stroke, parent/child traversal, a draggable flag, and
//! geometric point picking. Nodes live in a flat arena and are addressed by
//! copyable [`NodeId`] handles; parent links make the upward hit-test walk a
//! simple loop.
//!
//! Table roots are a dedicated [`NodeKind`] variant rather than a marker
//! property, so distinguishing them from plain groups is a structural match.
//!
//! A scene is exclusively owned by the render pass that created it. `NodeId`s
//! must not be retained across a rebuild; they are indices into one scene's
//! arena and mean nothing in the next.

use crate::{
    color::Color,
    geometry::{Point, Size},
    identifier::Id,
    text::{self, TextStyle},
};

/// Handle to a node within one [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Stroke properties for rects and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    color: Color,
    width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Fill and stroke properties for rect nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectStyle {
    fill: Option<Color>,
    stroke: Option<Stroke>,
}

impl RectStyle {
    pub fn new(fill: Option<Color>, stroke: Option<Stroke>) -> Self {
        Self { fill, stroke }
    }

    /// Returns the fill color, if any
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Returns the stroke, if any
    pub fn stroke(&self) -> Option<Stroke> {
        self.stroke
    }
}

/// The typed variants a scene node can take.
///
/// `TableRoot` is a group that represents one domain table; it is the unit
/// of hit-testing and dragging.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    TableRoot,
    Rect(RectStyle),
    Text { content: String, style: TextStyle },
    Line {
        stroke: Stroke,
        points: Option<(Point, Point)>,
    },
}

#[derive(Debug)]
struct Node {
    name: Id,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Point,
    size: Size,
    draggable: bool,
}

/// A drawable node tree backed by a flat arena.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the scene
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the scene holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_node(&mut self, name: Id, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            kind,
            parent: None,
            children: Vec::new(),
            position: Point::default(),
            size: Size::default(),
            draggable: false,
        });
        id
    }

    /// Adds a plain group node
    pub fn add_group(&mut self, name: Id) -> NodeId {
        self.add_node(name, NodeKind::Group)
    }

    /// Adds a table-root group at the given position.
    ///
    /// Table roots are draggable: the host's manual-drag behavior moves them
    /// directly, independent of the layout engine.
    pub fn add_table_root(&mut self, name: Id, position: Point) -> NodeId {
        let id = self.add_node(name, NodeKind::TableRoot);
        self.nodes[id.0].position = position;
        self.nodes[id.0].draggable = true;
        id
    }

    /// Adds a rect node with the given style
    pub fn add_rect(&mut self, name: Id, style: RectStyle) -> NodeId {
        self.add_node(name, NodeKind::Rect(style))
    }

    /// Adds a text node; its intrinsic size is measured from the content
    /// and style.
    pub fn add_text(&mut self, name: Id, content: &str, style: TextStyle) -> NodeId {
        let size = text::measure(content, &style);
        let id = self.add_node(
            name,
            NodeKind::Text {
                content: content.to_string(),
                style,
            },
        );
        self.nodes[id.0].size = size;
        id
    }

    /// Adds a line node. Its endpoints are set later by the layout engine's
    /// position callback.
    pub fn add_line(&mut self, name: Id, stroke: Stroke) -> NodeId {
        self.add_node(
            name,
            NodeKind::Line {
                stroke,
                points: None,
            },
        )
    }

    /// Appends `child` to `parent`'s children, establishing the parent link.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "node already has a parent"
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Returns the node's name
    pub fn name(&self, id: NodeId) -> Id {
        self.nodes[id.0].name
    }

    /// Returns the node's kind
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns true when the node is a table root
    pub fn is_table_root(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::TableRoot)
    }

    /// Returns the node's parent, or `None` at a tree root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the node's children, in z-order (later children draw on top)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the node's position, local to its parent
    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id.0].position
    }

    /// Sets the node's position, local to its parent
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.nodes[id.0].position = position;
    }

    /// Returns the node's size
    pub fn size(&self, id: NodeId) -> Size {
        self.nodes[id.0].size
    }

    /// Sets the node's size
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        self.nodes[id.0].size = size;
    }

    /// Returns true when the node participates in manual dragging
    pub fn is_draggable(&self, id: NodeId) -> bool {
        self.nodes[id.0].draggable
    }

    /// Sets the endpoints of a line node, local to its parent.
    pub fn set_line_points(&mut self, id: NodeId, start: Point, end: Point) {
        debug_assert!(
            matches!(self.nodes[id.0].kind, NodeKind::Line { .. }),
            "set_line_points on a non-line node"
        );
        if let NodeKind::Line { points, .. } = &mut self.nodes[id.0].kind {
            *points = Some((start, end));
        }
    }

    /// Returns a line node's endpoints, if set
    pub fn line_points(&self, id: NodeId) -> Option<(Point, Point)> {
        match self.nodes[id.0].kind {
            NodeKind::Line { points, .. } => points,
            _ => None,
        }
    }

    /// Finds the first node carrying the given name.
    pub fn find_by_name(&self, name: Id) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    /// Returns the parentless nodes in insertion order (later roots draw on top)
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| NodeId(idx))
    }

    /// Returns the topmost shape node containing the given scene-space point.
    ///
    /// Groups and lines are transparent to picking; only rects and texts are
    /// hit targets, matching how the host's pointer dispatch resolves event
    /// targets to shapes.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        let mut hit = None;
        for root in self.roots() {
            if let Some(found) = self.hit_node(root, point, Point::default()) {
                hit = Some(found);
            }
        }
        hit
    }

    fn hit_node(&self, id: NodeId, point: Point, origin: Point) -> Option<NodeId> {
        let node = &self.nodes[id.0];
        let position = origin.add_point(node.position);

        let mut hit = match node.kind {
            NodeKind::Rect(_) | NodeKind::Text { .. }
                if position.to_bounds(node.size).contains(point) =>
            {
                Some(id)
            }
            _ => None,
        };

        // Later children draw on top, so the last hit wins
        for child in &node.children {
            if let Some(found) = self.hit_node(*child, point, position) {
                hit = Some(found);
            }
        }
        hit
    }
}
