use bevy::prelude::*;

use super::widgets::{
    BODY_SIZE, HEADING_SIZE, SMALL_SIZE, card_bundle, card_node, chip, localized_text,
    section_heading, spawn_section, text,
};
use crate::content::locale::ActiveLocale;
use crate::content::site_manifest::TimelineEntry;
use crate::engine::systems::reveal::RevealOptions;
use crate::engine::systems::theme::{ThemeRole, ThemedBackground, ThemedBorder};

/// Experience or education history as a vertical timeline.
pub fn spawn_timeline(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    id: &'static str,
    background: ThemeRole,
    entries: &[TimelineEntry],
) {
    let title_key = format!("{id}.title");
    let subtitle_key = format!("{id}.subtitle");
    spawn_section(parent, id, RevealOptions::TIMELINE, background, |section| {
        section_heading(section, locale, &title_key, &subtitle_key);
        section
            .spawn(Node {
                width: Val::Percent(100.0),
                max_width: Val::Px(900.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(24.0),
                border: UiRect::left(Val::Px(2.0)),
                padding: UiRect::left(Val::Px(28.0)),
                ..default()
            })
            .insert((
                ThemedBorder(ThemeRole::Primary),
                BorderColor(Color::NONE),
            ))
            .with_children(|line| {
                for entry in entries {
                    spawn_entry(line, locale, entry);
                }
            });
    });
}

fn spawn_entry(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale, entry: &TimelineEntry) {
    parent
        .spawn((
            Name::new(format!("TimelineEntry:{}", entry.id)),
            card_bundle(),
            card_node(),
        ))
        .with_children(|card| {
            // Marker sitting on the timeline rule.
            card.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(-38.0),
                    top: Val::Px(24.0),
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                ThemedBackground(ThemeRole::Primary),
                BackgroundColor(Color::NONE),
                BorderRadius::MAX,
            ));

            text(card, entry.period.as_str(), SMALL_SIZE, ThemeRole::Primary);
            localized_text(card, locale, &entry.title_key, HEADING_SIZE, ThemeRole::TextPrimary);
            text(
                card,
                format!("{} · {}", entry.organization, entry.location),
                BODY_SIZE,
                ThemeRole::TextMuted,
            );
            localized_text(
                card,
                locale,
                &entry.description_key,
                BODY_SIZE,
                ThemeRole::TextSecondary,
            );

            for key in &entry.highlight_keys {
                card.spawn(Node {
                    display: Display::Flex,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    text(row, "›", BODY_SIZE, ThemeRole::Accent);
                    localized_text(row, locale, key, BODY_SIZE, ThemeRole::TextSecondary);
                });
            }

            if !entry.skill_keys.is_empty() {
                card.spawn(Node {
                    display: Display::Flex,
                    flex_wrap: FlexWrap::Wrap,
                    column_gap: Val::Px(6.0),
                    row_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|skills| {
                    for key in &entry.skill_keys {
                        chip(skills, locale.t(key));
                    }
                });
            }
        });
}
