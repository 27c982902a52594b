//! Project cards with kind filter tabs and a screenshot gallery.
//!
//! Changing the filter rebuilds the card grid; the section's reveal scope is
//! re-armed so the new cards are observed once they have been laid out.

/// Screenshot modal with wrap-around navigation.
pub mod gallery;

use bevy::prelude::*;

use super::widgets::{
    BODY_SIZE, HEADING_SIZE, HoverHighlight, SMALL_SIZE, button_bundle, button_node, card_bundle,
    card_node, chip, localized_text, open_external, reveal_block, section_heading, spawn_section,
    text,
};
use crate::content::ContentHandles;
use crate::content::locale::ActiveLocale;
use crate::content::settings::Settings;
use crate::content::site_manifest::{Project, ProjectFilter, SiteManifest};
use crate::engine::systems::reveal::{RevealOptions, RevealScope};
use crate::engine::systems::theme::{ThemeRole, ThemedBackground};
use gallery::GalleryRequest;

/// Tags shown on a card before collapsing into "+N".
const VISIBLE_TAGS: usize = 3;

/// Card grid and the filter it currently shows.
#[derive(Component, Debug)]
pub struct ProjectBoard {
    pub filter: ProjectFilter,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct FilterTab(pub ProjectFilter);

#[derive(Component, Debug, Clone)]
pub enum ProjectAction {
    Details(String),
    Open(String),
}

pub fn spawn_projects(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    manifest: &SiteManifest,
    asset_server: &AssetServer,
) {
    spawn_section(
        parent,
        "projects",
        RevealOptions::SECTION,
        ThemeRole::Background,
        |section| {
            section_heading(section, locale, "projects.title", "projects.subtitle");
            section
                .spawn((
                    Name::new("ProjectTabs"),
                    reveal_block(Node {
                        display: Display::Flex,
                        flex_wrap: FlexWrap::Wrap,
                        justify_content: JustifyContent::Center,
                        column_gap: Val::Px(12.0),
                        row_gap: Val::Px(12.0),
                        ..default()
                    }),
                ))
                .with_children(|tabs| {
                    for filter in ProjectFilter::TABS {
                        spawn_tab(tabs, locale, filter, manifest.project_count(filter));
                    }
                });
            section
                .spawn((
                    Name::new("ProjectBoard"),
                    ProjectBoard {
                        filter: ProjectFilter::default(),
                    },
                    grid_node(),
                ))
                .with_children(|grid| {
                    spawn_cards(grid, locale, manifest, asset_server, ProjectFilter::default());
                });
        },
    );
}

fn grid_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        max_width: Val::Px(1200.0),
        display: Display::Flex,
        flex_wrap: FlexWrap::Wrap,
        justify_content: JustifyContent::Center,
        column_gap: Val::Px(24.0),
        row_gap: Val::Px(24.0),
        ..default()
    }
}

fn tab_highlight(active: bool) -> HoverHighlight {
    if active {
        HoverHighlight::PRIMARY
    } else {
        HoverHighlight::SUBTLE
    }
}

fn spawn_tab(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    filter: ProjectFilter,
    count: usize,
) {
    let active = filter == ProjectFilter::default();
    parent
        .spawn((
            button_bundle(tab_highlight(active)),
            FilterTab(filter),
            button_node(),
        ))
        .with_children(|tab| {
            localized_text(tab, locale, filter.label_key(), BODY_SIZE, ThemeRole::TextPrimary);
            text(tab, format!("({count})"), SMALL_SIZE, ThemeRole::TextMuted);
        });
}

fn spawn_cards(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    manifest: &SiteManifest,
    asset_server: &AssetServer,
    filter: ProjectFilter,
) {
    for project in manifest.filtered_projects(filter) {
        spawn_card(parent, locale, project, asset_server);
    }
}

fn spawn_card(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    project: &Project,
    asset_server: &AssetServer,
) {
    parent
        .spawn((
            Name::new(format!("ProjectCard:{}", project.id)),
            card_bundle(),
            Node {
                width: Val::Px(360.0),
                ..card_node()
            },
        ))
        .with_children(|card| {
            card.spawn((
                ImageNode::new(asset_server.load(&project.image)),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(190.0),
                    ..default()
                },
                BorderRadius::all(Val::Px(8.0)),
            ));
            localized_text(card, locale, &project.title_key, HEADING_SIZE, ThemeRole::TextPrimary);
            localized_text(
                card,
                locale,
                &project.description_key,
                BODY_SIZE,
                ThemeRole::TextSecondary,
            );

            card.spawn(Node {
                display: Display::Flex,
                flex_wrap: FlexWrap::Wrap,
                align_items: AlignItems::Center,
                column_gap: Val::Px(6.0),
                row_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|tags| {
                for tag in project.tags.iter().take(VISIBLE_TAGS) {
                    chip(tags, tag.as_str());
                }
                let hidden = project.tags.len().saturating_sub(VISIBLE_TAGS);
                if hidden > 0 {
                    text(tags, format!("+{hidden}"), SMALL_SIZE, ThemeRole::TextMuted);
                    localized_text(tags, locale, "projects.moreTags", SMALL_SIZE, ThemeRole::TextMuted);
                }
            });

            card.spawn(Node {
                display: Display::Flex,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(8.0),
                row_gap: Val::Px(8.0),
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            })
            .with_children(|actions| {
                spawn_action(
                    actions,
                    locale,
                    ProjectAction::Details(project.id.clone()),
                    "projects.viewDetails",
                    HoverHighlight::PRIMARY,
                );
                if let Some(link) = usable_link(project.link.as_deref()) {
                    spawn_action(
                        actions,
                        locale,
                        ProjectAction::Open(link.to_string()),
                        "projects.liveDemo",
                        HoverHighlight::SUBTLE,
                    );
                }
                if let Some(code) = usable_link(project.github.as_deref()) {
                    spawn_action(
                        actions,
                        locale,
                        ProjectAction::Open(code.to_string()),
                        "projects.viewCode",
                        HoverHighlight::SUBTLE,
                    );
                }
            });
        });
}

/// Placeholder links ("#") are not rendered.
fn usable_link(link: Option<&str>) -> Option<&str> {
    link.filter(|link| !link.is_empty() && *link != "#")
}

fn spawn_action(
    parent: &mut ChildSpawnerCommands,
    locale: &ActiveLocale,
    action: ProjectAction,
    label_key: &str,
    highlight: HoverHighlight,
) {
    let label_role = if matches!(action, ProjectAction::Details(_)) {
        ThemeRole::Background
    } else {
        ThemeRole::Primary
    };
    parent
        .spawn((button_bundle(highlight), action, button_node()))
        .with_children(|button| {
            localized_text(button, locale, label_key, SMALL_SIZE, label_role);
        });
}

/// Switch tabs, rebuild the grid and re-arm reveal observation.
pub fn select_project_filter(
    mut commands: Commands,
    pressed: Query<(&Interaction, &FilterTab), Changed<Interaction>>,
    mut tabs: Query<(
        &FilterTab,
        &mut HoverHighlight,
        &mut ThemedBackground,
        &mut BackgroundColor,
    )>,
    mut boards: Query<(Entity, &mut ProjectBoard)>,
    parents: Query<&ChildOf>,
    mut scopes: Query<&mut RevealScope>,
    settings: Res<Settings>,
    content: Res<ContentHandles>,
    manifests: Res<Assets<SiteManifest>>,
    locale: Res<ActiveLocale>,
    asset_server: Res<AssetServer>,
) {
    let Some(filter) = pressed
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, tab)| tab.0)
    else {
        return;
    };
    let Some(manifest) = manifests.get(&content.manifest) else {
        return;
    };

    for (entity, mut board) in &mut boards {
        if board.filter == filter {
            continue;
        }
        board.filter = filter;
        commands.entity(entity).despawn_related::<Children>();
        commands.entity(entity).with_children(|grid| {
            spawn_cards(grid, &locale, manifest, &asset_server, filter);
        });
        if let Some(scope) = parents
            .iter_ancestors(entity)
            .find(|ancestor| scopes.contains(*ancestor))
        {
            if let Ok(mut scope) = scopes.get_mut(scope) {
                scope.rearm();
            }
        }
        info!(
            "Project filter: {:?} ({} projects)",
            filter,
            manifest.project_count(filter)
        );
    }

    for (tab, mut highlight, mut themed, mut background) in &mut tabs {
        *highlight = tab_highlight(tab.0 == filter);
        themed.0 = highlight.idle;
        background.0 = themed.0.colour(settings.theme());
    }
}

pub fn run_project_actions(
    actions: Query<(&Interaction, &ProjectAction), Changed<Interaction>>,
    mut gallery: EventWriter<GalleryRequest>,
) {
    for (interaction, action) in &actions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            ProjectAction::Details(id) => {
                gallery.write(GalleryRequest::Open(id.clone()));
            }
            ProjectAction::Open(url) => open_external(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_links_are_hidden() {
        assert_eq!(usable_link(Some("#")), None);
        assert_eq!(usable_link(Some("")), None);
        assert_eq!(usable_link(None), None);
        assert_eq!(
            usable_link(Some("https://example.com")),
            Some("https://example.com")
        );
    }

    #[test]
    fn only_the_active_tab_is_highlighted() {
        assert_eq!(tab_highlight(true).idle, ThemeRole::Primary);
        assert_eq!(tab_highlight(false).idle, ThemeRole::Surface);
    }
}
