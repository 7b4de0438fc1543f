use bevy::prelude::*;

use crate::graph::{EdgeShape, Highlight, arrow_head};
use crate::scene::{GraphScene, ListScene};

pub const NODE_COLOR: Color = Color::srgb(0.85, 0.88, 0.95);
pub const PRIMARY_COLOR: Color = Color::srgb(1.0, 0.55, 0.15);
pub const SECONDARY_COLOR: Color = Color::srgb(0.35, 0.75, 1.0);
pub const EDGE_COLOR: Color = Color::srgb(0.55, 0.6, 0.7);
pub const EDGE_HIGHLIGHT_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);

/// Segments used to approximate a self-loop arc
const LOOP_SEGMENTS: usize = 24;

pub fn highlight_color(highlight: Highlight) -> Color {
    match highlight {
        Highlight::None => NODE_COLOR,
        Highlight::Primary => PRIMARY_COLOR,
        Highlight::Secondary => SECONDARY_COLOR,
    }
}

fn draw_arrow(gizmos: &mut Gizmos, [tip, left, right]: [Vec2; 3], color: Color) {
    gizmos.linestrip_2d([tip, left, right, tip], color);
}

fn draw_edge(gizmos: &mut Gizmos, shape: EdgeShape, source_radius: f32, color: Color) {
    match shape {
        EdgeShape::Hidden => {}
        EdgeShape::Line { start, end, arrow } => {
            // Start on the source boundary instead of its center
            let start = start + (end - start).normalize_or_zero() * source_radius;
            gizmos.line_2d(start, end, color);
            if let Some(arrow) = arrow {
                draw_arrow(gizmos, arrow, color);
            }
        }
        EdgeShape::Loop {
            center,
            radius,
            start_angle,
            end_angle,
            arrow,
        } => {
            let points = (0..=LOOP_SEGMENTS).map(|i| {
                let t = i as f32 / LOOP_SEGMENTS as f32;
                center + Vec2::from_angle(start_angle + (end_angle - start_angle) * t) * radius
            });
            gizmos.linestrip_2d(points, color);
            draw_arrow(gizmos, arrow, color);
        }
    }
}

pub fn draw_graph(mut gizmos: Gizmos, scene: Res<GraphScene>) {
    let graph = scene.graph();

    for node in graph.nodes() {
        for edge in node.out_edges() {
            let color = if edge.is_highlighted() {
                EDGE_HIGHLIGHT_COLOR
            } else {
                EDGE_COLOR
            };
            draw_edge(&mut gizmos, edge.shape(node.position(), node.radius()), node.radius(), color);
        }
    }

    for node in graph.nodes() {
        gizmos.circle_2d(node.position(), node.radius(), highlight_color(node.highlight()));
    }
}

pub fn draw_list(mut gizmos: Gizmos, scene: Res<ListScene>) {
    let view = scene.view();
    let radius = scene.config().node_radius;
    let count = view.positions.len();

    // Each node links to the next; the last wraps back to the head
    if count > 1 {
        for (i, &from) in view.positions.iter().enumerate() {
            let to = view.positions[(i + 1) % count];
            let dir = (to - from).normalize_or_zero();
            let start = from + dir * radius;
            let end = to - dir * radius;
            gizmos.line_2d(start, end, EDGE_COLOR);
            draw_arrow(&mut gizmos, arrow_head(start, end), EDGE_COLOR);
        }
    }

    for (i, &position) in view.positions.iter().enumerate() {
        let color = if view.highlight == Some(i) {
            PRIMARY_COLOR
        } else {
            NODE_COLOR
        };
        gizmos.circle_2d(position, radius, color);
    }
}
