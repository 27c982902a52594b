use bevy::prelude::*;
use constants::palette::{DARK_THEME, LIGHT_THEME, ThemePalette};

use crate::content::settings::{Settings, SettingsChanged, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRole {
    Background,
    Surface,
    SurfaceElevated,
    Border,
    Primary,
    Accent,
    TextPrimary,
    TextSecondary,
    TextMuted,
}

impl ThemeRole {
    pub fn colour(self, theme: Theme) -> Color {
        let palette = palette(theme);
        match self {
            ThemeRole::Background => palette.background,
            ThemeRole::Surface => palette.surface,
            ThemeRole::SurfaceElevated => palette.surface_elevated,
            ThemeRole::Border => palette.border,
            ThemeRole::Primary => palette.primary,
            ThemeRole::Accent => palette.accent,
            ThemeRole::TextPrimary => palette.text_primary,
            ThemeRole::TextSecondary => palette.text_secondary,
            ThemeRole::TextMuted => palette.text_muted,
        }
    }
}

pub fn palette(theme: Theme) -> &'static ThemePalette {
    match theme {
        Theme::Light => &LIGHT_THEME,
        Theme::Dark => &DARK_THEME,
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ThemedBackground(pub ThemeRole);

#[derive(Component, Debug, Clone, Copy)]
pub struct ThemedText(pub ThemeRole);

#[derive(Component, Debug, Clone, Copy)]
pub struct ThemedBorder(pub ThemeRole);

/// Camera drawing the portfolio UI; cleared with the theme background.
#[derive(Component)]
pub struct PortfolioCamera;

/// Colour newly spawned themed nodes, and everything on a theme switch.
pub fn apply_theme(
    settings: Res<Settings>,
    mut changes: EventReader<SettingsChanged>,
    mut backgrounds: Query<(Ref<ThemedBackground>, &mut BackgroundColor)>,
    mut texts: Query<(Ref<ThemedText>, &mut TextColor)>,
    mut borders: Query<(Ref<ThemedBorder>, &mut BorderColor)>,
) {
    let switched = changes
        .read()
        .any(|change| matches!(change, SettingsChanged::Theme(_)));
    let theme = settings.theme();

    for (themed, mut colour) in &mut backgrounds {
        if switched || themed.is_added() {
            colour.0 = themed.0.colour(theme);
        }
    }
    for (themed, mut colour) in &mut texts {
        if switched || themed.is_added() {
            colour.0 = themed.0.colour(theme);
        }
    }
    for (themed, mut colour) in &mut borders {
        if switched || themed.is_added() {
            colour.0 = themed.0.colour(theme);
        }
    }
}

pub fn clear_with_theme_background(
    settings: Res<Settings>,
    mut cameras: Query<&mut Camera, With<PortfolioCamera>>,
) {
    let background = ThemeRole::Background.colour(settings.theme());
    for mut camera in &mut cameras {
        camera.clear_color = ClearColorConfig::Custom(background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::settings::{MemoryStore, SettingsRequest};
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn theme_switch_recolours_existing_nodes() {
        let mut world = World::new();
        world.init_resource::<Events<SettingsChanged>>();
        world.insert_resource(Settings::load(Box::new(MemoryStore::default()), None));

        let card = world
            .spawn((
                ThemedBackground(ThemeRole::Surface),
                BackgroundColor(Color::NONE),
            ))
            .id();
        world.run_system_once(apply_theme).expect("theme");
        assert_eq!(
            world.entity(card).get::<BackgroundColor>().map(|c| c.0),
            Some(DARK_THEME.surface)
        );

        let change = world
            .resource_mut::<Settings>()
            .apply(SettingsRequest::ToggleTheme)
            .expect("toggle")
            .expect("changed");
        world.send_event(change);
        world.run_system_once(apply_theme).expect("theme");
        assert_eq!(
            world.entity(card).get::<BackgroundColor>().map(|c| c.0),
            Some(LIGHT_THEME.surface)
        );
    }
}
