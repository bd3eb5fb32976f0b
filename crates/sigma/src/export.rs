//! SVG serialization of laid-out scenes.
//!
//! The exporter walks a scene from its roots and emits nested SVG groups
//! mirroring the node tree: groups and table roots become `<g>` elements
//! with translate transforms, rects/texts/lines become the corresponding
//! SVG shapes. Text is top-left anchored to match the scene coordinate
//! model.

use svg::node::element as svg_element;
use svg::Document;

use sigma_core::{
    color::Color,
    scene::{NodeId, NodeKind, Scene},
};

use crate::config::CanvasConfig;

/// Type alias for boxed SVG nodes.
type SvgNode = Box<dyn svg::Node>;

/// Renders a scene into an SVG document of the given canvas size, with an
/// optional background fill.
pub fn render_document(
    scene: &Scene,
    canvas: &CanvasConfig,
    background: Option<Color>,
) -> Document {
    let mut document = Document::new()
        .set("width", canvas.width())
        .set("height", canvas.height())
        .set(
            "viewBox",
            format!("0 0 {} {}", canvas.width(), canvas.height()),
        );

    if let Some(background) = background {
        let backdrop = svg_element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", background.to_string())
            .set("fill-opacity", background.alpha());
        document = document.add(backdrop);
    }

    for root in scene.roots() {
        document = document.add(render_node(scene, root));
    }
    document
}

fn render_node(scene: &Scene, id: NodeId) -> SvgNode {
    let position = scene.position(id);
    let size = scene.size(id);

    match scene.kind(id) {
        NodeKind::Group | NodeKind::TableRoot => {
            let mut group = svg_element::Group::new()
                .set("data-name", scene.name(id).to_string())
                .set(
                    "transform",
                    format!("translate({} {})", position.x(), position.y()),
                );
            for child in scene.children(id) {
                group = group.add(render_node(scene, *child));
            }
            Box::new(group)
        }
        NodeKind::Rect(style) => {
            let mut rect = svg_element::Rectangle::new()
                .set("x", position.x())
                .set("y", position.y())
                .set("width", size.width())
                .set("height", size.height());
            rect = match style.fill() {
                Some(fill) => rect
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha()),
                None => rect.set("fill", "none"),
            };
            if let Some(stroke) = style.stroke() {
                rect = rect
                    .set("stroke", stroke.color().to_string())
                    .set("stroke-width", stroke.width());
            }
            Box::new(rect)
        }
        NodeKind::Text { content, style } => {
            let text = svg_element::Text::new(content.clone())
                .set("x", position.x())
                .set("y", position.y())
                .set("dominant-baseline", "hanging")
                .set("font-family", style.font_family())
                .set("font-size", style.font_size());
            Box::new(text)
        }
        NodeKind::Line { stroke, points } => {
            let (start, end) = (*points).unwrap_or_default();
            let line = svg_element::Line::new()
                .set("x1", position.x() + start.x())
                .set("y1", position.y() + start.y())
                .set("x2", position.x() + end.x())
                .set("y2", position.y() + end.y())
                .set("stroke", stroke.color().to_string())
                .set("stroke-width", stroke.width());
            Box::new(line)
        }
    }
}
