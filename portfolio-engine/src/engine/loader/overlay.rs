use bevy::prelude::*;
use constants::loader::PROGRESS_BAR_WIDTH;
use constants::palette::{CYAN, INDIGO, LOADER_TRACK};

use super::LoaderEntity;
use super::progress::LoadProgress;
use super::scene::LoaderScene;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Component)]
pub struct LoaderOverlay;

#[derive(Component)]
pub struct OverlayPercent;

#[derive(Component)]
pub struct OverlayPhase;

#[derive(Component)]
pub struct OverlayBarFill;

/// Full-screen, non-interactive overlay on top of the 3D scene.
pub fn spawn_loader_overlay(commands: &mut Commands) {
    commands
        .spawn((
            LoaderEntity,
            LoaderOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            GlobalZIndex(i32::MAX),
        ))
        .with_children(|overlay| {
            overlay.spawn((
                OverlayPercent,
                Text::new("0%"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(INDIGO),
            ));
            overlay.spawn((
                OverlayPhase,
                Text::new(LoadProgress::ZERO.phase().label()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            overlay
                .spawn((
                    Node {
                        width: Val::Px(PROGRESS_BAR_WIDTH),
                        height: Val::Px(4.0),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(LOADER_TRACK),
                    BorderRadius::MAX,
                ))
                .with_children(|bar| {
                    bar.spawn((
                        OverlayBarFill,
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(CYAN),
                    ));
                });
        });
}

/// Mirror the loader progress into the overlay and to the host page.
pub fn update_loader_overlay(
    scene: Option<Res<LoaderScene>>,
    mut percent_text: Query<&mut Text, (With<OverlayPercent>, Without<OverlayPhase>)>,
    mut phase_text: Query<&mut Text, (With<OverlayPhase>, Without<OverlayPercent>)>,
    mut bar_fill: Query<&mut Node, With<OverlayBarFill>>,
    mut overlay: Query<&mut Visibility, With<LoaderOverlay>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_percent: Local<Option<u32>>,
) {
    let Some(scene) = scene else {
        return;
    };

    if !scene.sequence.is_visible() {
        for mut visibility in &mut overlay {
            *visibility = Visibility::Hidden;
        }
        return;
    }

    let progress = scene.frame.0;
    let percent = progress.percent();
    if *last_percent == Some(percent) {
        return;
    }
    *last_percent = Some(percent);

    for mut text in &mut percent_text {
        text.0 = format!("{percent}%");
    }
    for mut text in &mut phase_text {
        text.0 = progress.phase().label().to_string();
    }
    for mut node in &mut bar_fill {
        node.width = Val::Percent(percent as f32);
    }

    rpc_interface.send_notification(
        "loader_progress",
        serde_json::json!({
            "percent": percent,
            "phase": progress.phase().label(),
        }),
    );
}
