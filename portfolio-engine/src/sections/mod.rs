//! Portfolio page content, built once the loader hands over.
//!
//! The page is a single scroll container holding every section in order;
//! the header and the gallery modal are separate root nodes drawn on top.

/// Contact details and the contact form.
pub mod contact;

/// Fixed navigation header.
pub mod header;

/// Landing section with the cycling title and the ambient canvas.
pub mod hero;

/// Project cards, filter tabs and the gallery.
pub mod projects;

/// Technologies, concepts and highlight cards.
pub mod skills;

/// Experience and education timelines.
pub mod timeline;

/// Shared node builders and button behaviour.
pub mod widgets;

use bevy::prelude::*;

use crate::content::ContentHandles;
use crate::content::locale::ActiveLocale;
use crate::content::settings::Settings;
use crate::content::site_manifest::SiteManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::systems::reveal::{
    TargetRevealed, animate_reveals, attach_reveal_scopes, observe_reveal_targets,
    show_staggered_items, stagger_revealed_items,
};
use crate::engine::systems::scroll::{
    NodeBounds, PageColumn, PageRoot, PageScroll, PageViewport, ScrollToSection,
    apply_scroll_requests, measure_node_bounds, measure_page_viewport, scroll_page_on_wheel,
    update_page_scroll,
};
use crate::engine::systems::theme::{
    PortfolioCamera, ThemeRole, ThemedBackground, apply_theme, clear_with_theme_background,
};
use projects::gallery::{GalleryRequest, GalleryState};

pub struct SectionsPlugin;

impl Plugin for SectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageScroll>()
            .init_resource::<PageViewport>()
            .init_resource::<GalleryState>()
            .init_resource::<header::HeaderMenu>()
            .add_event::<ScrollToSection>()
            .add_event::<TargetRevealed>()
            .add_event::<GalleryRequest>()
            .add_systems(Startup, spawn_portfolio_camera)
            .add_systems(OnEnter(AppState::Portfolio), clear_with_theme_background)
            .add_systems(
                Update,
                (
                    build_portfolio_page,
                    (
                        measure_node_bounds,
                        measure_page_viewport,
                        scroll_page_on_wheel,
                        widgets::follow_scroll_links,
                        apply_scroll_requests,
                        update_page_scroll,
                        attach_reveal_scopes,
                        observe_reveal_targets,
                        stagger_revealed_items,
                        show_staggered_items,
                        animate_reveals,
                    )
                        .chain(),
                    (
                        header::press_header_buttons,
                        header::update_header_menu,
                        header::layout_header,
                        header::refresh_header,
                    )
                        .chain(),
                    (hero::cycle_hero_title, hero::drift_ambient_particles),
                    (
                        projects::select_project_filter,
                        projects::run_project_actions,
                        projects::gallery::gallery_buttons,
                        projects::gallery::gallery_keyboard,
                        projects::gallery::apply_gallery_requests,
                        projects::gallery::render_gallery,
                    )
                        .chain(),
                    (
                        contact::focus_contact_fields,
                        contact::type_into_contact_form,
                        contact::press_contact_buttons,
                        contact::tick_contact_form,
                        contact::render_contact_form,
                    )
                        .chain(),
                )
                    .run_if(in_state(AppState::Portfolio)),
            )
            .add_systems(
                Update,
                (
                    widgets::highlight_hovered_buttons,
                    apply_theme,
                    clear_with_theme_background
                        .run_if(in_state(AppState::Portfolio).and(resource_changed::<Settings>)),
                ),
            );
    }
}

/// UI camera. Draws over the loader scene without clearing it until the
/// portfolio takes over.
fn spawn_portfolio_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("PortfolioCamera"),
        PortfolioCamera,
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}

/// Spawn the page once content and the active locale are available.
pub fn build_portfolio_page(
    mut commands: Commands,
    pages: Query<(), With<PageRoot>>,
    content: Res<ContentHandles>,
    manifests: Res<Assets<SiteManifest>>,
    locale: Res<ActiveLocale>,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
) {
    if !pages.is_empty() || !locale.ready {
        return;
    }
    let Some(manifest) = manifests.get(&content.manifest) else {
        return;
    };

    commands
        .spawn((
            Name::new("PageRoot"),
            PageRoot,
            NodeBounds::default(),
            ScrollPosition::default(),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                overflow: Overflow::scroll_y(),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                Name::new("PageColumn"),
                PageColumn,
                NodeBounds::default(),
                Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    flex_shrink: 0.0,
                    ..default()
                },
            ))
            .with_children(|page| {
                hero::spawn_hero(page, &locale, manifest, &asset_server);
                skills::spawn_skills(page, &locale, manifest);
                projects::spawn_projects(page, &locale, manifest, &asset_server);
                timeline::spawn_timeline(
                    page,
                    &locale,
                    "experience",
                    ThemeRole::Surface,
                    &manifest.experience,
                );
                timeline::spawn_timeline(
                    page,
                    &locale,
                    "education",
                    ThemeRole::Background,
                    &manifest.education,
                );
                contact::spawn_contact(page, &locale, &manifest.profile);
                spawn_footer(page, manifest);
            });
        });

    header::spawn_header(&mut commands, &locale, &settings);
    info!(
        "Portfolio page built: {} projects, language '{}'",
        manifest.projects.len(),
        locale.language.code()
    );
}

fn spawn_footer(parent: &mut ChildSpawnerCommands, manifest: &SiteManifest) {
    parent
        .spawn((
            Name::new("Footer"),
            ThemedBackground(ThemeRole::Surface),
            BackgroundColor(Color::NONE),
            Node {
                width: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(24.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|footer| {
            widgets::text(
                footer,
                format!("© {}", manifest.profile.name),
                widgets::SMALL_SIZE,
                ThemeRole::TextMuted,
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::locale::LocaleTable;
    use crate::content::settings::MemoryStore;
    use crate::engine::systems::scroll::SectionAnchor;
    use bevy::ecs::system::RunSystemOnce;

    const MANIFEST: &str = r##"{
        "profile": {
            "name": "Ada",
            "image": "images/profile.png",
            "email": "ada@example.com",
            "location": "Paris",
            "github": "https://github.com/ada"
        },
        "skills": { "technologies": [{ "name": "Rust", "colour": "#DEA584" }], "concepts": [], "highlights": [] },
        "projects": [],
        "experience": [],
        "education": []
    }"##;

    fn page_app(locale_ready: bool) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<SiteManifest>()
            .init_asset::<Image>();
        let manifest: SiteManifest = serde_json::from_str(MANIFEST).unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<SiteManifest>>()
            .add(manifest);
        app.insert_resource(ContentHandles { manifest: handle })
            .insert_resource(ActiveLocale {
                table: LocaleTable::default(),
                ready: locale_ready,
                ..default()
            })
            .insert_resource(Settings::load(Box::new(MemoryStore::default()), None));
        app
    }

    fn section_ids(world: &mut World) -> Vec<&'static str> {
        let mut anchors = world.query::<&SectionAnchor>();
        let mut ids: Vec<_> = anchors.iter(world).map(|anchor| anchor.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn page_waits_for_the_locale() {
        let mut app = page_app(false);
        let world = app.world_mut();
        world.run_system_once(build_portfolio_page).unwrap();
        assert!(section_ids(world).is_empty());
    }

    #[test]
    fn page_is_built_once_with_every_section() {
        let mut app = page_app(true);
        let world = app.world_mut();
        world.run_system_once(build_portfolio_page).unwrap();
        world.run_system_once(build_portfolio_page).unwrap();

        let mut expected = constants::layout::SECTION_IDS.to_vec();
        expected.sort();
        assert_eq!(section_ids(world), expected);
        let mut roots = world.query_filtered::<(), With<PageRoot>>();
        assert_eq!(roots.iter(world).count(), 1);
    }
}
