//! Contact details and a keyboard-driven message form.
//!
//! Sending is simulated: the form shows a sending state, then a success
//! state, and the host page is told about the submission over RPC.

/// Field values, focus and the simulated send cycle.
pub mod contact_form;

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use super::widgets::{
    BODY_SIZE, HEADING_SIZE, HoverHighlight, SMALL_SIZE, button_bundle, button_node, card_bundle,
    card_node, localized_text, open_external, relabel, section_heading, spawn_section, text,
};
use crate::content::locale::{ActiveLocale, Localized};
use crate::content::settings::Settings;
use crate::content::site_manifest::Profile;
use crate::engine::systems::reveal::RevealOptions;
use crate::engine::systems::theme::{ThemeRole, ThemedBorder, ThemedText};
use crate::rpc::web_rpc::WebRpcInterface;
use contact_form::{ContactForm, FormField, SubmitStatus};

/// Form container owning the form state.
#[derive(Component, Default)]
pub struct ContactPanel {
    form: ContactForm,
}

impl ContactPanel {
    pub fn form(&self) -> &ContactForm {
        &self.form
    }
}

/// Clickable box that focuses a field.
#[derive(Component, Debug, Clone, Copy)]
pub struct FieldBox(pub FormField);

/// Text showing a field's value.
#[derive(Component, Debug, Clone, Copy)]
pub struct FieldValue(pub FormField);

#[derive(Component)]
pub struct SubmitButton;

#[derive(Component)]
pub struct SubmitLabel;

#[derive(Component, Debug, Clone)]
pub struct ContactLink(pub String);

pub fn spawn_contact(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale, profile: &Profile) {
    spawn_section(
        parent,
        "contact",
        RevealOptions::CONTACT,
        ThemeRole::Background,
        |section| {
            section_heading(section, locale, "contact.title", "contact.subtitle");
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
                .with_children(|columns| {
                    spawn_info(columns, locale, profile);
                    spawn_form(columns, locale);
                });
        },
    );
}

fn spawn_info(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale, profile: &Profile) {
    parent
        .spawn((
            Name::new("ContactInfo"),
            card_bundle(),
            Node {
                width: Val::Px(420.0),
                ..card_node()
            },
        ))
        .with_children(|info| {
            localized_text(info, locale, "contact.stayInTouch", HEADING_SIZE, ThemeRole::TextPrimary);
            localized_text(info, locale, "contact.description", BODY_SIZE, ThemeRole::TextSecondary);

            localized_text(info, locale, "contact.info.email", SMALL_SIZE, ThemeRole::TextMuted);
            spawn_link(info, &profile.email, format!("mailto:{}", profile.email));

            localized_text(info, locale, "contact.info.location", SMALL_SIZE, ThemeRole::TextMuted);
            text(info, profile.location.as_str(), BODY_SIZE, ThemeRole::TextPrimary);

            text(info, "GitHub", SMALL_SIZE, ThemeRole::TextMuted);
            spawn_link(info, &profile.github, profile.github.clone());
        });
}

fn spawn_link(parent: &mut ChildSpawnerCommands, label: &str, url: String) {
    parent
        .spawn((
            button_bundle(HoverHighlight::SUBTLE),
            ContactLink(url),
            button_node(),
        ))
        .with_children(|link| {
            text(link, label, BODY_SIZE, ThemeRole::Primary);
        });
}

fn spawn_form(parent: &mut ChildSpawnerCommands, locale: &ActiveLocale) {
    parent
        .spawn((
            Name::new("ContactForm"),
            ContactPanel::default(),
            card_bundle(),
            Node {
                width: Val::Px(520.0),
                ..card_node()
            },
        ))
        .with_children(|form| {
            for field in FormField::ALL {
                localized_text(form, locale, field.label_key(), SMALL_SIZE, ThemeRole::TextSecondary);
                form.spawn((
                    button_bundle(HoverHighlight::SUBTLE),
                    FieldBox(field),
                    ThemedBorder(ThemeRole::Border),
                    BorderColor(Color::NONE),
                    Node {
                        width: Val::Percent(100.0),
                        min_height: Val::Px(if field == FormField::Message {
                            120.0
                        } else {
                            44.0
                        }),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(10.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        align_items: AlignItems::FlexStart,
                        ..default()
                    },
                ))
                .with_children(|field_box| {
                    field_box.spawn((
                        FieldValue(field),
                        Text::new(""),
                        TextFont {
                            font_size: BODY_SIZE,
                            ..default()
                        },
                        TextColor(Color::NONE),
                        ThemedText(ThemeRole::TextPrimary),
                    ));
                });
            }

            form.spawn((
                button_bundle(HoverHighlight::PRIMARY),
                SubmitButton,
                Node {
                    margin: UiRect::top(Val::Px(8.0)),
                    ..button_node()
                },
            ))
            .with_children(|button| {
                let key = SubmitStatus::Idle.label_key();
                button.spawn((
                    SubmitLabel,
                    Text::new(locale.t(key)),
                    TextFont {
                        font_size: BODY_SIZE,
                        ..default()
                    },
                    TextColor(Color::NONE),
                    ThemedText(ThemeRole::Background),
                    Localized(key.to_string()),
                ));
            });
        });
}

pub fn focus_contact_fields(
    fields: Query<(&Interaction, &FieldBox), Changed<Interaction>>,
    mut panels: Query<&mut ContactPanel>,
) {
    let Some(field) = fields
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, field_box)| field_box.0)
    else {
        return;
    };
    for mut panel in &mut panels {
        panel.form.set_focus(Some(field));
    }
}

/// Route key presses into the focused field.
pub fn type_into_contact_form(
    mut keys: EventReader<KeyboardInput>,
    mut panels: Query<&mut ContactPanel>,
    time: Res<Time>,
) {
    let Ok(mut panel) = panels.single_mut() else {
        keys.clear();
        return;
    };
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        let Some(focus) = panel.form.focus() else {
            continue;
        };
        let form = &mut panel.form;
        match &key.logical_key {
            Key::Character(input) => {
                form.insert(input);
            }
            Key::Space => {
                form.insert(" ");
            }
            Key::Backspace => {
                form.backspace();
            }
            Key::Tab => form.focus_next(),
            Key::Escape => form.set_focus(None),
            Key::Enter if focus == FormField::Message => {
                form.insert("\n");
            }
            Key::Enter => submit(form, time.elapsed_secs()),
            _ => {}
        }
    }
}

pub fn press_contact_buttons(
    submits: Query<&Interaction, (Changed<Interaction>, With<SubmitButton>)>,
    links: Query<(&Interaction, &ContactLink), Changed<Interaction>>,
    mut panels: Query<&mut ContactPanel>,
    time: Res<Time>,
) {
    if submits.iter().any(|interaction| *interaction == Interaction::Pressed) {
        for mut panel in &mut panels {
            submit(&mut panel.form, time.elapsed_secs());
        }
    }
    for (interaction, link) in &links {
        if *interaction == Interaction::Pressed {
            open_external(&link.0);
        }
    }
}

fn submit(form: &mut ContactForm, now: f32) {
    match form.submit(now) {
        Ok(()) => info!("Sending contact message"),
        Err(error) => warn!("Contact form rejected: {}", error),
    }
}

/// Run the send cycle and announce finished submissions.
pub fn tick_contact_form(
    mut panels: Query<&mut ContactPanel>,
    time: Res<Time>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let now = time.elapsed_secs();
    for mut panel in &mut panels {
        let status = panel.form.status();
        if !matches!(
            status,
            SubmitStatus::Submitting { .. } | SubmitStatus::Success { .. }
        ) {
            continue;
        }
        if let Some(submission) = panel.form.tick(now) {
            info!("Contact message from {} sent", submission.name);
            rpc_interface.send_notification(
                "contact_submitted",
                serde_json::json!({
                    "name": submission.name,
                    "email": submission.email,
                }),
            );
        }
    }
}

/// Mirror the form state into field texts, borders and the submit label.
pub fn render_contact_form(
    panels: Query<&ContactPanel, Changed<ContactPanel>>,
    mut values: Query<(&FieldValue, &mut Text), Without<SubmitLabel>>,
    mut boxes: Query<(&FieldBox, &mut ThemedBorder, &mut BorderColor)>,
    mut labels: Query<(&mut Localized, &mut Text), With<SubmitLabel>>,
    locale: Res<ActiveLocale>,
    settings: Res<Settings>,
) {
    let Ok(panel) = panels.single() else {
        return;
    };
    let form = panel.form();

    for (value, mut text) in &mut values {
        let caret = if form.focus() == Some(value.0) { "|" } else { "" };
        let rendered = format!("{}{}", form.value(value.0), caret);
        if text.0 != rendered {
            text.0 = rendered;
        }
    }

    for (field_box, mut themed, mut colour) in &mut boxes {
        let role = if form.focus() == Some(field_box.0) {
            ThemeRole::Primary
        } else {
            ThemeRole::Border
        };
        if themed.0 != role {
            themed.0 = role;
            colour.0 = role.colour(settings.theme());
        }
    }

    for (mut localized, mut text) in &mut labels {
        relabel(&mut localized, &mut text, &locale, form.status().label_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::settings::MemoryStore;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn contact_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<KeyboardInput>()
            .init_resource::<WebRpcInterface>()
            .init_resource::<ActiveLocale>()
            .insert_resource(Settings::load(Box::new(MemoryStore::default()), None))
            .add_systems(
                Update,
                (type_into_contact_form, tick_contact_form, render_contact_form).chain(),
            );
        app
    }

    fn press(app: &mut App, key: Key) {
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(KeyboardInput {
            key_code: KeyCode::KeyA,
            logical_key: key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window,
        });
    }

    #[test]
    fn typed_keys_fill_the_focused_field() {
        let mut app = contact_app();
        let mut panel = ContactPanel::default();
        panel.form.set_focus(Some(FormField::Name));
        let form = app.world_mut().spawn(panel).id();
        let value = app
            .world_mut()
            .spawn((FieldValue(FormField::Name), Text::new("")))
            .id();

        press(&mut app, Key::Character("A".into()));
        press(&mut app, Key::Character("b".into()));
        press(&mut app, Key::Backspace);
        press(&mut app, Key::Character("l".into()));
        app.update();

        let panel = app.world().get::<ContactPanel>(form).unwrap();
        assert_eq!(panel.form().value(FormField::Name), "Al");
        assert_eq!(app.world().get::<Text>(value).unwrap().0, "Al|");
    }

    #[test]
    fn finished_submission_is_announced() {
        let mut app = contact_app();
        let mut panel = ContactPanel::default();
        for (field, value) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Message, "Hi"),
        ] {
            panel.form.set_focus(Some(field));
            panel.form.insert(value);
        }
        panel.form.submit(0.0).unwrap();
        let form = app.world_mut().spawn(panel).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(2));
        app.world_mut().run_system_once(tick_contact_form).unwrap();

        let panel = app.world().get::<ContactPanel>(form).unwrap();
        assert!(panel.form().value(FormField::Name).is_empty());
        let sent = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, "contact_submitted");
        assert_eq!(sent[0].params["email"], "ada@example.com");
    }
}
