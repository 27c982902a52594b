//! Fixed header: section links with scrollspy highlighting, theme and
//! language switches, a collapsible menu on narrow windows and a scroll
//! progress bar.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::layout::{HEADER_HEIGHT, MOBILE_BREAKPOINT, SECTION_IDS};

use super::widgets::{
    BODY_SIZE, HoverHighlight, SMALL_SIZE, ScrollLink, button_bundle, button_node, text,
};
use crate::content::locale::{ActiveLocale, Language, Localized};
use crate::content::settings::{Settings, SettingsRequest, Theme};
use crate::engine::systems::scroll::{PageScroll, ScrollToSection};
use crate::engine::systems::theme::{ThemeRole, ThemedBackground, ThemedText, palette};

#[derive(Component)]
pub struct Header;

/// Inline link row, hidden on narrow windows.
#[derive(Component)]
pub struct DesktopNav;

/// Drop-down link list for narrow windows.
#[derive(Component)]
pub struct MobileMenu;

#[derive(Component)]
pub struct MenuToggle;

/// Label of a section link.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavLabel(pub &'static str);

#[derive(Component)]
pub struct ThemeToggle;

#[derive(Component)]
pub struct ThemeToggleLabel;

#[derive(Component, Debug, Clone, Copy)]
pub struct LanguageButton(pub Language);

#[derive(Component)]
pub struct ProgressBar;

#[derive(Resource, Debug, Default)]
pub struct HeaderMenu {
    pub open: bool,
    pub narrow: bool,
}

fn nav_key(id: &str) -> String {
    // The landing section is labelled "home".
    let name = if id == "hero" { "home" } else { id };
    format!("nav.{name}")
}

fn nav_role(id: &str, active: Option<&str>) -> ThemeRole {
    if active == Some(id) {
        ThemeRole::Primary
    } else {
        ThemeRole::TextSecondary
    }
}

/// Label of the theme button: the theme a click switches to.
fn theme_toggle_label(theme: Theme) -> &'static str {
    match theme.toggled() {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    }
}

fn language_highlight(language: Language, current: Language) -> HoverHighlight {
    if language == current {
        HoverHighlight::PRIMARY
    } else {
        HoverHighlight::SUBTLE
    }
}

pub fn spawn_header(commands: &mut Commands, locale: &ActiveLocale, settings: &Settings) {
    commands
        .spawn((
            Name::new("Header"),
            Header,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::NONE),
            GlobalZIndex(10),
        ))
        .with_children(|header| {
            header
                .spawn(Node {
                    height: Val::Px(HEADER_HEIGHT),
                    padding: UiRect::horizontal(Val::Px(32.0)),
                    display: Display::Flex,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceBetween,
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|bar| {
                    bar.spawn((button_bundle(HoverHighlight::SUBTLE), ScrollLink("hero"), button_node()))
                        .with_children(|logo| {
                            text(logo, "Portfolio", BODY_SIZE, ThemeRole::Primary);
                        });

                    bar.spawn((
                        DesktopNav,
                        Node {
                            display: Display::Flex,
                            column_gap: Val::Px(4.0),
                            ..default()
                        },
                    ))
                    .with_children(|nav| spawn_nav_links(nav, locale));

                    bar.spawn(Node {
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|controls| spawn_controls(controls, settings));
                });

            header.spawn((
                MobileMenu,
                ThemedBackground(ThemeRole::Surface),
                BackgroundColor(Color::NONE),
                Node {
                    display: Display::None,
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(16.0)),
                    row_gap: Val::Px(4.0),
                    ..default()
                },
            ))
            .with_children(|menu| spawn_nav_links(menu, locale));

            header
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(3.0),
                        ..default()
                    },
                    ThemedBackground(ThemeRole::Border),
                    BackgroundColor(Color::NONE),
                ))
                .with_children(|track| {
                    track.spawn((
                        ProgressBar,
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        ThemedBackground(ThemeRole::Primary),
                        BackgroundColor(Color::NONE),
                    ));
                });
        });
}

fn spawn_nav_links(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale) {
    for id in SECTION_IDS {
        parent
            .spawn((button_bundle(HoverHighlight::SUBTLE), ScrollLink(id), button_node()))
            .with_children(|link| {
                let key = nav_key(id);
                link.spawn((
                    NavLabel(id),
                    Text::new(locale.t(&key)),
                    TextFont {
                        font_size: SMALL_SIZE,
                        ..default()
                    },
                    TextColor(Color::NONE),
                    ThemedText(ThemeRole::TextSecondary),
                    Localized(key),
                ));
            });
    }
}

fn spawn_controls(parent: &mut ChildSpawnerCommands, settings: &Settings) {
    parent
        .spawn((button_bundle(HoverHighlight::SUBTLE), ThemeToggle, button_node()))
        .with_children(|toggle| {
            let label = theme_toggle_label(settings.theme());
            toggle.spawn((
                ThemeToggleLabel,
                Text::new(label),
                TextFont {
                    font_size: SMALL_SIZE,
                    ..default()
                },
                TextColor(Color::NONE),
                ThemedText(ThemeRole::TextPrimary),
            ));
        });

    for language in Language::ALL {
        parent
            .spawn((
                button_bundle(language_highlight(language, settings.language())),
                LanguageButton(language),
                button_node(),
            ))
            .with_children(|button| {
                text(
                    button,
                    language.code().to_uppercase(),
                    SMALL_SIZE,
                    ThemeRole::TextPrimary,
                );
            });
    }

    parent
        .spawn((
            button_bundle(HoverHighlight::SUBTLE),
            MenuToggle,
            Node {
                display: Display::None,
                ..button_node()
            },
        ))
        .with_children(|toggle| {
            text(toggle, "Menu", SMALL_SIZE, ThemeRole::TextPrimary);
        });
}

pub fn press_header_buttons(
    themes: Query<&Interaction, (Changed<Interaction>, With<ThemeToggle>)>,
    languages: Query<(&Interaction, &LanguageButton), Changed<Interaction>>,
    menus: Query<&Interaction, (Changed<Interaction>, With<MenuToggle>)>,
    mut requests: EventWriter<SettingsRequest>,
    mut menu: ResMut<HeaderMenu>,
) {
    let pressed = |interaction: &Interaction| *interaction == Interaction::Pressed;
    if themes.iter().any(pressed) {
        requests.write(SettingsRequest::ToggleTheme);
    }
    for (interaction, button) in &languages {
        if pressed(interaction) {
            requests.write(SettingsRequest::SetLanguage(button.0));
        }
    }
    if menus.iter().any(pressed) {
        menu.open = !menu.open;
    }
}

/// Track the window width and close the menu once navigation happened.
pub fn update_header_menu(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut navigation: EventReader<ScrollToSection>,
    mut menu: ResMut<HeaderMenu>,
) {
    if navigation.read().count() > 0 && menu.open {
        menu.open = false;
    }
    if let Ok(window) = windows.single() {
        let narrow = window.width() < MOBILE_BREAKPOINT;
        if menu.narrow != narrow {
            menu.narrow = narrow;
            if !narrow {
                menu.open = false;
            }
        }
    }
}

pub fn layout_header(
    menu: Res<HeaderMenu>,
    mut desktop: Query<&mut Node, (With<DesktopNav>, Without<MobileMenu>, Without<MenuToggle>)>,
    mut mobile: Query<&mut Node, (With<MobileMenu>, Without<DesktopNav>, Without<MenuToggle>)>,
    mut toggles: Query<&mut Node, (With<MenuToggle>, Without<DesktopNav>, Without<MobileMenu>)>,
) {
    if !menu.is_changed() {
        return;
    }
    let shown = |visible: bool| if visible { Display::Flex } else { Display::None };
    for mut node in &mut desktop {
        node.display = shown(!menu.narrow);
    }
    for mut node in &mut toggles {
        node.display = shown(menu.narrow);
    }
    for mut node in &mut mobile {
        node.display = shown(menu.narrow && menu.open);
    }
}

/// Scrolled backdrop, progress bar, active link and switch labels.
pub fn refresh_header(
    scroll: Res<PageScroll>,
    settings: Res<Settings>,
    mut headers: Query<&mut BackgroundColor, With<Header>>,
    mut bars: Query<&mut Node, With<ProgressBar>>,
    mut labels: Query<(&NavLabel, &mut ThemedText, &mut TextColor)>,
    mut toggle_labels: Query<&mut Text, With<ThemeToggleLabel>>,
    mut languages: Query<(
        &LanguageButton,
        &mut HoverHighlight,
        &mut ThemedBackground,
        &mut BackgroundColor,
    ), Without<Header>>,
) {
    if !scroll.is_changed() && !settings.is_changed() {
        return;
    }
    let theme = settings.theme();

    for mut background in &mut headers {
        background.0 = if scroll.scrolled {
            palette(theme).surface.with_alpha(0.92)
        } else {
            Color::NONE
        };
    }
    for mut bar in &mut bars {
        bar.width = Val::Percent(scroll.progress);
    }
    for (label, mut themed, mut colour) in &mut labels {
        themed.0 = nav_role(label.0, scroll.active_section);
        colour.0 = themed.0.colour(theme);
    }

    if settings.is_changed() {
        for mut text in &mut toggle_labels {
            text.0 = theme_toggle_label(theme).to_string();
        }
        for (button, mut highlight, mut themed, mut background) in &mut languages {
            *highlight = language_highlight(button.0, settings.language());
            themed.0 = highlight.idle;
            background.0 = themed.0.colour(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_keys_follow_section_ids() {
        assert_eq!(nav_key("hero"), "nav.home");
        assert_eq!(nav_key("education"), "nav.education");
    }

    #[test]
    fn only_the_active_section_is_highlighted() {
        assert_eq!(nav_role("skills", Some("skills")), ThemeRole::Primary);
        assert_eq!(nav_role("skills", Some("hero")), ThemeRole::TextSecondary);
        assert_eq!(nav_role("skills", None), ThemeRole::TextSecondary);
    }

    #[test]
    fn theme_button_offers_the_other_theme() {
        assert_eq!(theme_toggle_label(Theme::Dark), "Light");
        assert_eq!(theme_toggle_label(Theme::Light), "Dark");
    }

    #[test]
    fn navigation_closes_the_mobile_menu() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ScrollToSection>()
            .insert_resource(HeaderMenu {
                open: true,
                narrow: true,
            })
            .add_systems(Update, update_header_menu);

        app.update();
        assert!(app.world().resource::<HeaderMenu>().open);

        app.world_mut()
            .send_event(ScrollToSection("contact".to_string()));
        app.update();
        assert!(!app.world().resource::<HeaderMenu>().open);
    }
}
