use bevy::prelude::*;

use crate::content::locale::{ActiveLocale, Localized};
use crate::content::settings::Settings;
use crate::engine::systems::reveal::{RevealOptions, RevealScope, hidden_offset, reveal_bundle};
use crate::engine::systems::scroll::{NodeBounds, ScrollToSection, SectionAnchor};
use crate::engine::systems::theme::{ThemeRole, ThemedBackground, ThemedBorder, ThemedText};

pub const TITLE_SIZE: f32 = 40.0;
pub const HEADING_SIZE: f32 = 22.0;
pub const BODY_SIZE: f32 = 16.0;
pub const SMALL_SIZE: f32 = 13.0;

/// Background roles a button switches between on hover.
#[derive(Component, Debug, Clone, Copy)]
pub struct HoverHighlight {
    pub idle: ThemeRole,
    pub hover: ThemeRole,
}

impl HoverHighlight {
    pub const SUBTLE: Self = Self {
        idle: ThemeRole::Surface,
        hover: ThemeRole::SurfaceElevated,
    };

    pub const PRIMARY: Self = Self {
        idle: ThemeRole::Primary,
        hover: ThemeRole::Accent,
    };
}

pub fn text(
    parent: &mut ChildSpawnerCommands,
    value: impl Into<String>,
    size: f32,
    role: ThemeRole,
) -> Entity {
    parent
        .spawn((
            Text::new(value),
            TextFont {
                font_size: size,
                ..default()
            },
            TextColor(role.colour(Default::default())),
            ThemedText(role),
        ))
        .id()
}

/// Text bound to a translation key; retranslated on language change.
pub fn localized_text(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    key: &str,
    size: f32,
    role: ThemeRole,
) -> Entity {
    parent
        .spawn((
            Text::new(locale.t(key)),
            TextFont {
                font_size: size,
                ..default()
            },
            TextColor(role.colour(Default::default())),
            ThemedText(role),
            Localized(key.to_string()),
        ))
        .id()
}

/// Point an existing localized text at another key.
pub fn relabel(localized: &mut Localized, text: &mut Text, locale: &ActiveLocale, key: &str) {
    if localized.0 != key {
        localized.0 = key.to_string();
        text.0 = locale.t(key);
    }
}

/// Full-width page section. The section itself is always shown; its
/// headings, panels and cards reveal themselves on scroll.
pub fn spawn_section(
    parent: &mut ChildSpawnerCommands,
    id: &'static str,
    options: RevealOptions,
    background: ThemeRole,
    build: impl FnOnce(&mut ChildSpawnerCommands),
) -> Entity {
    parent
        .spawn((
            Name::new(format!("Section:{id}")),
            SectionAnchor { id },
            RevealScope::new(options),
            NodeBounds::default(),
            ThemedBackground(background),
            BackgroundColor(Color::NONE),
            Node {
                width: Val::Percent(100.0),
                min_height: Val::Vh(60.0),
                padding: UiRect::axes(Val::Px(48.0), Val::Px(96.0)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(32.0),
                ..default()
            },
        ))
        .with_children(build)
        .id()
}

pub fn section_heading(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    title_key: &str,
    subtitle_key: &str,
) {
    parent
        .spawn((
            reveal_bundle(),
            Node {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                top: hidden_offset(),
                ..default()
            },
        ))
        .with_children(|heading| {
            localized_text(heading, locale, title_key, TITLE_SIZE, ThemeRole::Primary);
            localized_text(heading, locale, subtitle_key, BODY_SIZE, ThemeRole::TextSecondary);
        });
}

/// Rounded, bordered panel used for cards.
pub fn card_node() -> Node {
    Node {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(20.0)),
        row_gap: Val::Px(10.0),
        border: UiRect::all(Val::Px(1.0)),
        top: hidden_offset(),
        ..default()
    }
}

/// Card that reveals itself on scroll.
pub fn card_bundle() -> impl Bundle {
    (reveal_bundle(), card_surface())
}

pub fn card_surface() -> impl Bundle {
    (
        ThemedBackground(ThemeRole::Surface),
        BackgroundColor(Color::NONE),
        ThemedBorder(ThemeRole::Border),
        BorderColor(Color::NONE),
        BorderRadius::all(Val::Px(12.0)),
    )
}

/// Plain block that reveals itself on scroll, e.g. a tab row or a panel.
pub fn reveal_block(node: Node) -> impl Bundle {
    (
        reveal_bundle(),
        Node {
            top: hidden_offset(),
            ..node
        },
    )
}

/// Small rounded label, e.g. a project tag.
pub fn chip(parent: &mut ChildSpawnerCommands, label: impl Into<String>) {
    parent
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            ThemedBorder(ThemeRole::Primary),
            BorderColor(Color::NONE),
            BorderRadius::MAX,
        ))
        .with_children(|chip| {
            text(chip, label, SMALL_SIZE, ThemeRole::Primary);
        });
}

pub fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(18.0), Val::Px(10.0)),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        column_gap: Val::Px(8.0),
        ..default()
    }
}

/// Button with a themed, hover-aware background.
pub fn button_bundle(highlight: HoverHighlight) -> impl Bundle {
    (
        Button,
        highlight,
        ThemedBackground(highlight.idle),
        BackgroundColor(Color::NONE),
        BorderRadius::all(Val::Px(8.0)),
    )
}

pub fn highlight_hovered_buttons(
    settings: Res<Settings>,
    mut buttons: Query<
        (
            &Interaction,
            &HoverHighlight,
            &mut ThemedBackground,
            &mut BackgroundColor,
        ),
        Changed<Interaction>,
    >,
) {
    for (interaction, highlight, mut themed, mut background) in &mut buttons {
        themed.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => highlight.hover,
            Interaction::None => highlight.idle,
        };
        background.0 = themed.0.colour(settings.theme());
    }
}

/// Button that scrolls the page to a section.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScrollLink(pub &'static str);

pub fn follow_scroll_links(
    links: Query<(&Interaction, &ScrollLink), Changed<Interaction>>,
    mut requests: EventWriter<ScrollToSection>,
) {
    for (interaction, link) in &links {
        if *interaction == Interaction::Pressed {
            requests.write(ScrollToSection(link.0.to_string()));
        }
    }
}

/// Open an external link in a new browser tab.
pub fn open_external(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let opened = web_sys::window().map(|window| window.open_with_url_and_target(url, "_blank"));
        if !matches!(opened, Some(Ok(_))) {
            warn!("Could not open {}", url);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        info!("External link requested: {}", url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::systems::reveal::{
        RevealState, RevealTarget, TargetRevealed, attach_reveal_scopes, observe_reveal_targets,
    };
    use crate::engine::systems::scroll::PageViewport;
    use crate::rpc::web_rpc::WebRpcInterface;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    const PHONE: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::new(375.0, 667.0),
    };

    #[test]
    fn cards_in_a_section_taller_than_the_viewport_are_revealed() {
        let mut world = World::new();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<Events<TargetRevealed>>();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(PageViewport {
            rect: PHONE,
            content_height: 4000.0,
        });

        let (section, card) = world
            .run_system_once(|mut commands: Commands| {
                let mut spawned = (Entity::PLACEHOLDER, Entity::PLACEHOLDER);
                commands.spawn(Node::default()).with_children(|page| {
                    let mut card = Entity::PLACEHOLDER;
                    let section = spawn_section(
                        page,
                        "projects",
                        RevealOptions::SECTION,
                        ThemeRole::Background,
                        |section| {
                            card = section.spawn((card_bundle(), card_node())).id();
                        },
                    );
                    spawned = (section, card);
                });
                spawned
            })
            .expect("spawn section");

        assert!(world.entity(section).get::<RevealTarget>().is_none());
        assert_ne!(world.entity(section).get::<Visibility>(), Some(&Visibility::Hidden));

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(60));
        world.run_system_once(attach_reveal_scopes).expect("attach");

        // Scroll a 3200 px section holding a 300 px card through the viewport.
        for scroll in (0..=2600).step_by(100) {
            let offset = scroll as f32;
            world.entity_mut(section).insert(NodeBounds(Rect::new(
                0.0,
                -offset,
                375.0,
                3200.0 - offset,
            )));
            world.entity_mut(card).insert(NodeBounds(Rect::new(
                24.0,
                1500.0 - offset,
                351.0,
                1800.0 - offset,
            )));
            world.run_system_once(observe_reveal_targets).expect("observe");
        }

        let card = world.entity(card);
        assert_eq!(
            card.get::<RevealTarget>().map(RevealTarget::state),
            Some(RevealState::Revealed)
        );
        assert_eq!(card.get::<Visibility>(), Some(&Visibility::Inherited));
        assert_ne!(world.entity(section).get::<Visibility>(), Some(&Visibility::Hidden));
    }
}
