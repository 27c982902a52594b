use bevy::prelude::*;

use super::widgets::{
    BODY_SIZE, HEADING_SIZE, SMALL_SIZE, card_node, card_surface, localized_text, reveal_block,
    section_heading, spawn_section, text,
};
use crate::content::locale::ActiveLocale;
use crate::content::site_manifest::SiteManifest;
use crate::engine::systems::reveal::{RevealOptions, StaggeredItem};
use crate::engine::systems::theme::{ThemeRole, ThemedBorder};

pub fn spawn_skills(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    manifest: &SiteManifest,
) {
    spawn_section(
        parent,
        "skills",
        RevealOptions::SKILLS,
        ThemeRole::Surface,
        |section| {
            section_heading(section, locale, "skills.title", "skills.subtitle");

            let technologies: Vec<_> = manifest
                .skills
                .technologies
                .iter()
                .map(|technology| {
                    let accent = technology.colour().unwrap_or_else(|e| {
                        warn!("Technology '{}': {}", technology.name, e);
                        None
                    });
                    (technology.name.as_str(), accent)
                })
                .collect();

            section
                .spawn(Node {
                    width: Val::Percent(100.0),
                    max_width: Val::Px(1100.0),
                    display: Display::Flex,
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(32.0),
                    row_gap: Val::Px(32.0),
                    ..default()
                })
                .with_children(|panels| {
                    panels
                        .spawn((
                            Name::new("TechnologiesPanel"),
                            reveal_block(panel_node(640.0)),
                            card_surface(),
                        ))
                        .with_children(|panel| {
                            localized_text(
                                panel,
                                locale,
                                "skills.technologies",
                                HEADING_SIZE,
                                ThemeRole::TextPrimary,
                            );
                            panel
                                .spawn(Node {
                                    display: Display::Flex,
                                    flex_wrap: FlexWrap::Wrap,
                                    column_gap: Val::Px(12.0),
                                    row_gap: Val::Px(12.0),
                                    ..default()
                                })
                                .with_children(|tiles| {
                                    for (name, accent) in technologies {
                                        spawn_technology(tiles, name, accent);
                                    }
                                });
                        });

                    panels
                        .spawn((
                            Name::new("ConceptsPanel"),
                            reveal_block(panel_node(360.0)),
                            card_surface(),
                        ))
                        .with_children(|panel| {
                            localized_text(
                                panel,
                                locale,
                                "skills.concepts",
                                HEADING_SIZE,
                                ThemeRole::TextPrimary,
                            );
                            for concept in &manifest.skills.concepts {
                                panel
                                    .spawn((
                                        StaggeredItem,
                                        Visibility::Hidden,
                                        Node {
                                            padding: UiRect::axes(Val::Px(14.0), Val::Px(10.0)),
                                            border: UiRect::all(Val::Px(1.0)),
                                            ..default()
                                        },
                                        ThemedBorder(ThemeRole::Border),
                                        BorderColor(Color::NONE),
                                        BorderRadius::all(Val::Px(10.0)),
                                    ))
                                    .with_children(|item| {
                                        text(item, concept.as_str(), BODY_SIZE, ThemeRole::TextSecondary);
                                    });
                            }
                        });
                });

            section
                .spawn((
                    Name::new("HighlightsPanel"),
                    reveal_block(Node {
                        width: Val::Percent(100.0),
                        max_width: Val::Px(1100.0),
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(24.0),
                        ..default()
                    }),
                ))
                .with_children(|panel| {
                    localized_text(
                        panel,
                        locale,
                        "skills.highlights.title",
                        HEADING_SIZE,
                        ThemeRole::TextPrimary,
                    );
                    panel
                        .spawn(Node {
                            width: Val::Percent(100.0),
                            display: Display::Flex,
                            flex_wrap: FlexWrap::Wrap,
                            justify_content: JustifyContent::Center,
                            column_gap: Val::Px(20.0),
                            row_gap: Val::Px(20.0),
                            ..default()
                        })
                        .with_children(|cards| {
                            for highlight in &manifest.skills.highlights {
                                cards
                                    .spawn((
                                        card_surface(),
                                        Node {
                                            width: Val::Px(320.0),
                                            top: Val::Auto,
                                            ..card_node()
                                        },
                                    ))
                                    .with_children(|card| {
                                        localized_text(
                                            card,
                                            locale,
                                            &highlight.title_key,
                                            HEADING_SIZE,
                                            ThemeRole::Primary,
                                        );
                                        localized_text(
                                            card,
                                            locale,
                                            &highlight.description_key,
                                            BODY_SIZE,
                                            ThemeRole::TextSecondary,
                                        );
                                    });
                            }
                        });
                });
        },
    );
}

fn panel_node(width: f32) -> Node {
    Node {
        width: Val::Px(width),
        max_width: Val::Percent(100.0),
        flex_grow: 1.0,
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(28.0)),
        row_gap: Val::Px(20.0),
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

/// Technology tile; tinted with the brand colour when the manifest has one.
fn spawn_technology(parent: &mut ChildSpawnerCommands, name: &str, accent: Option<Color>) {
    let mut tile = parent.spawn((
        StaggeredItem,
        Visibility::Hidden,
        Node {
            width: Val::Px(150.0),
            padding: UiRect::all(Val::Px(14.0)),
            border: UiRect::all(Val::Px(1.0)),
            display: Display::Flex,
            justify_content: JustifyContent::Center,
            ..default()
        },
        BorderRadius::all(Val::Px(10.0)),
    ));
    match accent {
        Some(colour) => {
            tile.insert(BorderColor(colour));
        }
        None => {
            tile.insert((ThemedBorder(ThemeRole::Border), BorderColor(Color::NONE)));
        }
    }
    tile.with_children(|tile| {
        text(tile, name, SMALL_SIZE + 2.0, ThemeRole::TextPrimary);
    });
}
