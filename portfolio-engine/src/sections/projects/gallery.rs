use bevy::prelude::*;

use super::super::widgets::{
    BODY_SIZE, HEADING_SIZE, HoverHighlight, SMALL_SIZE, button_bundle, button_node, chip,
    localized_text, text,
};
use crate::content::ContentHandles;
use crate::content::locale::ActiveLocale;
use crate::content::site_manifest::{Project, SiteManifest};
use crate::engine::systems::theme::{ThemeRole, ThemedBackground};

/// Image position inside one project's screenshot set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    project_id: String,
    index: usize,
    len: usize,
}

impl Gallery {
    pub fn open(project_id: impl Into<String>, len: usize) -> Self {
        Self {
            project_id: project_id.into(),
            index: 0,
            len: len.max(1),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn previous(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// "2 / 4" style counter.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.len)
    }
}

#[derive(Resource, Default, Debug)]
pub struct GalleryState(pub Option<Gallery>);

#[derive(Event, Debug, Clone, PartialEq)]
pub enum GalleryRequest {
    Open(String),
    Next,
    Previous,
    Close,
}

/// Root of the modal overlay.
#[derive(Component)]
pub struct GalleryModal;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryButton {
    Previous,
    Next,
    Close,
}

fn image_count(project: &Project) -> usize {
    project.images.len().max(1)
}

pub fn apply_gallery_requests(
    mut requests: EventReader<GalleryRequest>,
    mut state: ResMut<GalleryState>,
    content: Res<ContentHandles>,
    manifests: Res<Assets<SiteManifest>>,
) {
    for request in requests.read() {
        match request {
            GalleryRequest::Open(id) => {
                let Some(project) = manifests
                    .get(&content.manifest)
                    .and_then(|manifest| manifest.project(id))
                else {
                    warn!("Gallery requested for unknown project '{}'", id);
                    continue;
                };
                state.0 = Some(Gallery::open(id.clone(), image_count(project)));
            }
            GalleryRequest::Next => {
                if let Some(gallery) = state.0.as_mut() {
                    gallery.next();
                }
            }
            GalleryRequest::Previous => {
                if let Some(gallery) = state.0.as_mut() {
                    gallery.previous();
                }
            }
            GalleryRequest::Close => state.0 = None,
        }
    }
}

pub fn gallery_buttons(
    buttons: Query<(&Interaction, &GalleryButton), Changed<Interaction>>,
    mut requests: EventWriter<GalleryRequest>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        requests.write(match button {
            GalleryButton::Previous => GalleryRequest::Previous,
            GalleryButton::Next => GalleryRequest::Next,
            GalleryButton::Close => GalleryRequest::Close,
        });
    }
}

pub fn gallery_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<GalleryState>,
    mut requests: EventWriter<GalleryRequest>,
) {
    if state.0.is_none() {
        return;
    }
    if keys.just_pressed(KeyCode::Escape) {
        requests.write(GalleryRequest::Close);
    } else if keys.just_pressed(KeyCode::ArrowRight) {
        requests.write(GalleryRequest::Next);
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        requests.write(GalleryRequest::Previous);
    }
}

/// Rebuild the modal whenever the gallery opens, moves or closes.
pub fn render_gallery(
    mut commands: Commands,
    state: Res<GalleryState>,
    modals: Query<Entity, With<GalleryModal>>,
    content: Res<ContentHandles>,
    manifests: Res<Assets<SiteManifest>>,
    locale: Res<ActiveLocale>,
    asset_server: Res<AssetServer>,
) {
    if !state.is_changed() {
        return;
    }
    for modal in &modals {
        commands.entity(modal).despawn();
    }

    let Some(gallery) = state.0.as_ref() else {
        return;
    };
    let Some(project) = manifests
        .get(&content.manifest)
        .and_then(|manifest| manifest.project(gallery.project_id()))
    else {
        return;
    };

    let (image_path, caption_key) = match project.images.get(gallery.index()) {
        Some(image) => (image.url.clone(), Some(project.caption_key(image))),
        None => (project.image.clone(), None),
    };
    let description_key = project
        .full_description_key
        .as_deref()
        .unwrap_or(&project.description_key);

    commands
        .spawn((
            GalleryModal,
            Name::new("GalleryModal"),
            GlobalZIndex(50),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    ThemedBackground(ThemeRole::Surface),
                    BackgroundColor(Color::NONE),
                    BorderRadius::all(Val::Px(16.0)),
                    Node {
                        width: Val::Percent(90.0),
                        max_width: Val::Px(960.0),
                        max_height: Val::Percent(90.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(14.0),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                ))
                .with_children(|panel| {
                    panel
                        .spawn(Node {
                            display: Display::Flex,
                            justify_content: JustifyContent::SpaceBetween,
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|bar| {
                            localized_text(
                                bar,
                                &locale,
                                &project.title_key,
                                HEADING_SIZE,
                                ThemeRole::TextPrimary,
                            );
                            spawn_control(bar, GalleryButton::Close, "X");
                        });

                    panel.spawn((
                        ImageNode::new(asset_server.load(image_path)),
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(420.0),
                            ..default()
                        },
                        BorderRadius::all(Val::Px(8.0)),
                    ));

                    panel
                        .spawn(Node {
                            display: Display::Flex,
                            justify_content: JustifyContent::SpaceBetween,
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|controls| {
                            spawn_control(controls, GalleryButton::Previous, "<");
                            match &caption_key {
                                Some(key) => {
                                    localized_text(
                                        controls,
                                        &locale,
                                        key,
                                        SMALL_SIZE,
                                        ThemeRole::TextSecondary,
                                    );
                                }
                                None => {
                                    text(controls, "", SMALL_SIZE, ThemeRole::TextSecondary);
                                }
                            }
                            text(controls, gallery.counter(), SMALL_SIZE, ThemeRole::TextMuted);
                            spawn_control(controls, GalleryButton::Next, ">");
                        });

                    localized_text(
                        panel,
                        &locale,
                        description_key,
                        BODY_SIZE,
                        ThemeRole::TextSecondary,
                    );
                    panel
                        .spawn(Node {
                            display: Display::Flex,
                            flex_wrap: FlexWrap::Wrap,
                            column_gap: Val::Px(8.0),
                            row_gap: Val::Px(8.0),
                            ..default()
                        })
                        .with_children(|tags| {
                            for tag in &project.tags {
                                chip(tags, tag.as_str());
                            }
                        });
                });
        });
}

fn spawn_control(parent: &mut ChildSpawnerCommands, button: GalleryButton, label: &str) {
    parent
        .spawn((button_bundle(HoverHighlight::SUBTLE), button, button_node()))
        .with_children(|control| {
            text(control, label, BODY_SIZE, ThemeRole::TextPrimary);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut gallery = Gallery::open("hms", 4);
        gallery.previous();
        assert_eq!(gallery.index(), 3);
        assert_eq!(gallery.counter(), "4 / 4");
        gallery.next();
        assert_eq!(gallery.index(), 0);
        gallery.next();
        gallery.next();
        assert_eq!(gallery.counter(), "3 / 4");
    }

    #[test]
    fn projects_without_screenshots_still_show_one_image() {
        let mut gallery = Gallery::open("site", 0);
        assert_eq!(gallery.len(), 1);
        gallery.next();
        gallery.previous();
        assert_eq!(gallery.index(), 0);
    }

    #[test]
    fn escape_closes_an_open_gallery() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(GalleryState(Some(Gallery::open("hms", 2))))
            .add_event::<GalleryRequest>()
            .add_systems(Update, gallery_keyboard);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        let requests = app.world().resource::<Events<GalleryRequest>>();
        let sent: Vec<_> = requests.get_cursor().read(requests).cloned().collect();
        assert_eq!(sent, vec![GalleryRequest::Close]);
    }
}
