// Rasterizes a laid-out topology: edges as arrows, nodes as discs, names on top

use crate::error::Result;
use crate::label::{draw_text_centered, glyph_scale, text_size};
use crate::layout::Layout;
use crate::options::RenderOptions;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use petgraph::visit::EdgeRef;
use topoviz_core::TopologyGraph;
use topoviz_core::hops::is_unknown_hop;
use tracing::{debug, info};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const NODE_FILL: Rgb<u8> = Rgb([0x1f, 0x78, 0xb4]);
const EDGE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Disc radius in points (a 300 pt² marker)
const NODE_RADIUS_PT: f64 = 9.77;
const EDGE_WIDTH_PT: f64 = 1.0;
const ARROW_LENGTH_PT: f64 = 10.0;
const PADDING_PT: f64 = 4.0;

/// Pixel measurements derived from the options for one render
#[derive(Debug, Clone, Copy)]
struct Metrics {
    width: u32,
    height: u32,
    node_radius: f64,
    line_width: u32,
    arrow_length: f64,
    glyph_scale: u32,
    margin_x: f64,
    margin_y: f64,
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn layout(&self, graph: &TopologyGraph) -> Layout {
        Layout::compute(graph.inner(), &self.options)
    }

    /// Lay out and draw in one pass
    pub fn render(&self, graph: &TopologyGraph) -> RgbImage {
        let layout = self.layout(graph);
        self.draw(graph, &layout)
    }

    pub fn draw(&self, graph: &TopologyGraph, layout: &Layout) -> RgbImage {
        let metrics = self.metrics(graph);
        let mut image = RgbImage::from_pixel(metrics.width, metrics.height, BACKGROUND);
        info!(
            "Rendering {} nodes and {} edges at {}x{} px",
            graph.node_count(),
            graph.edge_count(),
            metrics.width,
            metrics.height
        );

        let inner = graph.inner();
        let to_pixel = |node| {
            let (x, y) = layout.position(node).unwrap_or((0.0, 0.0));
            project(&metrics, layout.scale(), x, y)
        };

        for edge in inner.edge_references() {
            let from = to_pixel(edge.source());
            let to = to_pixel(edge.target());
            if edge.source() == edge.target() {
                draw_self_loop(&mut image, &metrics, from);
            } else {
                draw_arrow(&mut image, &metrics, from, to);
            }
        }

        for node in inner.node_indices() {
            let center = to_pixel(node);
            draw_node(&mut image, &metrics, center, is_unknown_hop(&inner[node]));
        }

        for node in inner.node_indices() {
            draw_text_centered(
                &mut image,
                to_pixel(node),
                &inner[node],
                metrics.glyph_scale,
                LABEL_COLOR,
            );
        }

        image
    }

    fn metrics(&self, graph: &TopologyGraph) -> Metrics {
        let (width, height) = self.options.pixel_size();
        let node_radius = self.options.points_to_pixels(NODE_RADIUS_PT);
        let glyph_scale = glyph_scale(self.options.points_to_pixels(self.options.font_size));
        let padding = self.options.points_to_pixels(PADDING_PT);

        // Keep the widest label inside the canvas when its node sits on the border
        let widest_label = graph
            .node_names()
            .map(|name| text_size(name, glyph_scale).0)
            .max()
            .unwrap_or(0) as f64;
        let label_height = text_size("", glyph_scale).1 as f64;

        let margin_x = (node_radius.max(widest_label / 2.0) + padding).min(width as f64 / 2.0);
        let margin_y = (node_radius.max(label_height / 2.0) + padding).min(height as f64 / 2.0);
        debug!("Canvas margins {:.1}x{:.1} px", margin_x, margin_y);

        Metrics {
            width,
            height,
            node_radius,
            line_width: self.options.points_to_pixels(EDGE_WIDTH_PT).round().max(1.0) as u32,
            arrow_length: self.options.points_to_pixels(ARROW_LENGTH_PT),
            glyph_scale,
            margin_x,
            margin_y,
        }
    }
}

// Layout space is [-scale, scale] with y up; pixels have y down
fn project(metrics: &Metrics, scale: f64, x: f64, y: f64) -> (f64, f64) {
    let usable_w = metrics.width as f64 - 2.0 * metrics.margin_x;
    let usable_h = metrics.height as f64 - 2.0 * metrics.margin_y;
    (
        metrics.margin_x + (x + scale) / (2.0 * scale) * usable_w,
        metrics.margin_y + (scale - y) / (2.0 * scale) * usable_h,
    )
}

fn draw_thick_line(image: &mut RgbImage, from: (f64, f64), to: (f64, f64), width: u32) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return;
    }
    let (nx, ny) = (-dy / length, dx / length);
    for i in 0..width {
        let offset = i as f64 - (width as f64 - 1.0) / 2.0;
        draw_line_segment_mut(
            image,
            ((from.0 + nx * offset) as f32, (from.1 + ny * offset) as f32),
            ((to.0 + nx * offset) as f32, (to.1 + ny * offset) as f32),
            EDGE_COLOR,
        );
    }
}

fn draw_arrow(image: &mut RgbImage, metrics: &Metrics, from: (f64, f64), to: (f64, f64)) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    let (ux, uy) = if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (0.0, 0.0)
    };

    // Overlapping discs: nothing sensible to point at
    if length <= 2.0 * metrics.node_radius + metrics.arrow_length {
        draw_thick_line(image, from, to, metrics.line_width);
        return;
    }

    let start = (from.0 + ux * metrics.node_radius, from.1 + uy * metrics.node_radius);
    let tip = (to.0 - ux * metrics.node_radius, to.1 - uy * metrics.node_radius);
    let base = (tip.0 - ux * metrics.arrow_length, tip.1 - uy * metrics.arrow_length);
    draw_thick_line(image, start, base, metrics.line_width);

    let half_width = metrics.arrow_length * 0.4;
    let head = [
        Point::new(tip.0.round() as i32, tip.1.round() as i32),
        Point::new(
            (base.0 - uy * half_width).round() as i32,
            (base.1 + ux * half_width).round() as i32,
        ),
        Point::new(
            (base.0 + uy * half_width).round() as i32,
            (base.1 - ux * half_width).round() as i32,
        ),
    ];
    if head[0] != head[2] && head[1] != head[2] && head[0] != head[1] {
        draw_polygon_mut(image, &head, EDGE_COLOR);
    }
}

fn draw_self_loop(image: &mut RgbImage, metrics: &Metrics, center: (f64, f64)) {
    let radius = (metrics.node_radius * 0.8).round().max(1.0) as i32;
    let loop_center = (
        center.0.round() as i32,
        (center.1 - metrics.node_radius * 1.2).round() as i32,
    );
    for ring in 0..metrics.line_width as i32 {
        draw_hollow_circle_mut(image, loop_center, radius + ring, EDGE_COLOR);
    }
}

fn draw_node(image: &mut RgbImage, metrics: &Metrics, center: (f64, f64), unknown: bool) {
    let center = (center.0.round() as i32, center.1.round() as i32);
    let radius = metrics.node_radius.round().max(1.0) as i32;
    if unknown {
        draw_filled_circle_mut(image, center, radius, BACKGROUND);
        for ring in 0..(metrics.line_width as i32 * 2).min(radius) {
            draw_hollow_circle_mut(image, center, radius - ring, NODE_FILL);
        }
    } else {
        draw_filled_circle_mut(image, center, radius, NODE_FILL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> Metrics {
        Metrics {
            width: 200,
            height: 100,
            node_radius: 5.0,
            line_width: 1,
            arrow_length: 6.0,
            glyph_scale: 1,
            margin_x: 10.0,
            margin_y: 10.0,
        }
    }

    #[test]
    fn test_project_corners() {
        let m = metrics();
        assert_eq!(project(&m, 1.0, -1.0, 1.0), (10.0, 10.0));
        assert_eq!(project(&m, 1.0, 1.0, -1.0), (190.0, 90.0));
        assert_eq!(project(&m, 1.0, 0.0, 0.0), (100.0, 50.0));
    }

    #[test]
    fn test_project_respects_scale() {
        let m = metrics();
        assert_eq!(project(&m, 2.0, 2.0, 2.0), (190.0, 10.0));
    }
}
