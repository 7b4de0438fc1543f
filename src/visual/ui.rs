use bevy::prelude::*;

use crate::input::help;
use crate::scene::{ActiveScene, GraphScene, ListScene, Status};
use crate::visual::render::{EDGE_HIGHLIGHT_COLOR, PRIMARY_COLOR};

const LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.15);
const WEIGHT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const HUD_COLOR: Color = Color::srgb(0.9, 0.92, 0.95);
const SUCCESS_COLOR: Color = Color::srgb(0.3, 0.9, 0.4);
const FAILURE_COLOR: Color = Color::srgb(1.0, 0.3, 0.3);

const NODE_FONT_SIZE: f32 = 22.0;
const WEIGHT_FONT_SIZE: f32 = 16.0;
const HUD_FONT_SIZE: f32 = 16.0;
const STATUS_FONT_SIZE: f32 = 26.0;

/// Pooled world-space text, reused frame to frame
#[derive(Component)]
pub struct SceneLabel;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct StatusText;

struct LabelSpec {
    text: String,
    position: Vec2,
    size: f32,
    color: Color,
}

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.spawn((
        StatusText,
        Text::new(""),
        TextFont {
            font_size: STATUS_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_COLOR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn graph_labels(scene: &GraphScene) -> Vec<LabelSpec> {
    let graph = scene.graph();
    let mut labels = Vec::with_capacity(graph.node_count() + graph.edge_count());

    for node in graph.nodes() {
        labels.push(LabelSpec {
            text: node.label().to_string(),
            position: node.position(),
            size: NODE_FONT_SIZE * node.scale(),
            color: LABEL_COLOR,
        });
    }

    if graph.is_weighted() {
        let offset = scene.settings().weight_label_offset;
        for node in graph.nodes() {
            for edge in node.out_edges().iter().filter(|edge| !edge.is_circular()) {
                let dir = (edge.destination() - node.position()).normalize_or_zero();
                let anchor = edge.label_anchor(node.position(), dir.perp() * offset);
                labels.push(LabelSpec {
                    text: edge.weight().to_string(),
                    position: anchor,
                    size: WEIGHT_FONT_SIZE,
                    color: if edge.is_highlighted() {
                        EDGE_HIGHLIGHT_COLOR
                    } else {
                        WEIGHT_COLOR
                    },
                });
            }
        }
    }

    labels
}

fn list_labels(scene: &ListScene) -> Vec<LabelSpec> {
    let view = scene.view();
    let radius = scene.config().node_radius;

    let mut labels: Vec<LabelSpec> = view
        .positions
        .iter()
        .zip(&view.values)
        .map(|(&position, value)| LabelSpec {
            text: value.to_string(),
            position,
            size: NODE_FONT_SIZE,
            color: LABEL_COLOR,
        })
        .collect();

    if let Some(&head) = view.positions.first() {
        labels.push(LabelSpec {
            text: "head".into(),
            position: head - Vec2::Y * (radius + 14.0),
            size: WEIGHT_FONT_SIZE,
            color: PRIMARY_COLOR,
        });
    }

    labels
}

/// Point the label pool at this frame's labels, spawning more when short
pub fn sync_labels(
    mut commands: Commands,
    active: Res<ActiveScene>,
    graph: Res<GraphScene>,
    list: Res<ListScene>,
    mut pool: Query<
        (&mut Text2d, &mut TextFont, &mut TextColor, &mut Transform, &mut Visibility),
        With<SceneLabel>,
    >,
) {
    let specs = match *active {
        ActiveScene::Graph => graph_labels(&graph),
        ActiveScene::List => list_labels(&list),
    };
    let mut specs = specs.into_iter();

    for (mut text, mut font, mut color, mut transform, mut visibility) in &mut pool {
        let Some(spec) = specs.next() else {
            *visibility = Visibility::Hidden;
            continue;
        };

        if text.0 != spec.text {
            text.0 = spec.text;
        }
        font.font_size = spec.size;
        color.0 = spec.color;
        transform.translation = spec.position.extend(1.0);
        *visibility = Visibility::Visible;
    }

    for spec in specs {
        commands.spawn((
            SceneLabel,
            Text2d::new(spec.text),
            TextFont {
                font_size: spec.size,
                ..default()
            },
            TextColor(spec.color),
            Transform::from_translation(spec.position.extend(1.0)),
        ));
    }
}

fn status_color(status: Status) -> Color {
    if status.is_success() {
        SUCCESS_COLOR
    } else if status.is_failure() {
        FAILURE_COLOR
    } else {
        HUD_COLOR
    }
}

pub fn update_hud(
    active: Res<ActiveScene>,
    graph: Res<GraphScene>,
    list: Res<ListScene>,
    mut hud: Query<&mut Text, (With<HudText>, Without<StatusText>)>,
    mut status: Query<(&mut Text, &mut TextColor), (With<StatusText>, Without<HudText>)>,
) {
    let (summary, line, color) = match *active {
        ActiveScene::Graph => {
            let graph_ref = graph.graph();
            let summary = format!(
                "Nodes: {}  Edges: {}  Directed: {}  Weighted: {}  Layout: {} ({})",
                graph_ref.node_count(),
                graph_ref.edge_count(),
                graph_ref.is_directed(),
                graph_ref.is_weighted(),
                graph.preset_name(),
                if graph_ref.layout().is_active() { "settling" } else { "idle" },
            );
            (summary, String::new(), HUD_COLOR)
        }
        ActiveScene::List => {
            let summary = format!(
                "Nodes: {}  Queued: {}  Speed: {:.1}x{}",
                list.len(),
                list.queued(),
                list.speed(),
                if list.is_paused() { "  (paused)" } else { "" },
            );

            match (list.dialog(), list.status()) {
                (Some(dialog), _) => (
                    summary,
                    format!("{} {}_", dialog.caption(), dialog.input().text()),
                    HUD_COLOR,
                ),
                (None, Some(current)) => (summary, current.to_string(), status_color(current)),
                (None, None) => (summary, String::new(), HUD_COLOR),
            }
        }
    };

    if let Ok(mut text) = hud.single_mut() {
        let content = format!("{}  [Tab] switch scene\n{}\n{}", active.title(), help(*active), summary);
        if text.0 != content {
            text.0 = content;
        }
    }

    if let Ok((mut text, mut text_color)) = status.single_mut() {
        if text.0 != line {
            text.0 = line;
        }
        text_color.0 = color;
    }
}
