//! Portfolio content and user preferences.
//!
//! Content tables and locales are JSON assets loaded through the asset
//! server; preferences persist through an injected key-value store.

/// Locale tables, dotted-key lookup and the active language.
pub mod locale;

/// Theme and language preferences with a pluggable persistent store.
pub mod settings;

/// Projects, timeline entries, skills and profile details.
pub mod site_manifest;

use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::SITE_MANIFEST_PATH;
use thiserror::Error;

use locale::{ActiveLocale, Language, LocaleTable, LocaleHandles};
use settings::{Settings, SettingsChanged, SettingsRequest};
use site_manifest::SiteManifest;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
    #[error("invalid colour '{value}': {reason}")]
    InvalidColour { value: String, reason: String },
}

/// Handle to the content manifest requested at startup.
#[derive(Resource, Default)]
pub struct ContentHandles {
    pub manifest: Handle<SiteManifest>,
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<SiteManifest>::new(&["site.json"]))
            .add_plugins(JsonAssetPlugin::<LocaleTable>::new(&["locale.json"]))
            .init_resource::<ContentHandles>()
            .init_resource::<LocaleHandles>()
            .init_resource::<ActiveLocale>()
            .insert_resource(Settings::from_platform())
            .add_event::<SettingsRequest>()
            .add_event::<SettingsChanged>()
            .add_systems(PreStartup, start_content_loading)
            .add_systems(
                Update,
                (settings::apply_settings_requests, locale::refresh_active_locale).chain(),
            );
    }
}

fn start_content_loading(
    mut content: ResMut<ContentHandles>,
    mut locales: ResMut<LocaleHandles>,
    asset_server: Res<AssetServer>,
) {
    content.manifest = asset_server.load(SITE_MANIFEST_PATH);
    for language in Language::ALL {
        locales.insert(language, asset_server.load(language.asset_path()));
    }
    info!("Loading content from {}", SITE_MANIFEST_PATH);
}
