use bevy::prelude::*;
use constants::path::{LANGUAGE_SETTING_KEY, THEME_SETTING_KEY};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

use super::ContentError;
use super::locale::Language;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage rejected '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

/// Key-value persistence for user preferences.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// In-process store used natively and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore(HashMap<String, String>);

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser `localStorage`. Looked up on every call since web handles are
/// not `Send`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, SettingsError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(SettingsError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl SettingsStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SettingsError::Rejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SettingsError::Rejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ContentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ContentError::UnknownTheme(other.to_string())),
        }
    }
}

/// Requests from the UI or the host page.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SettingsRequest {
    SetTheme(Theme),
    ToggleTheme,
    SetLanguage(Language),
}

/// Published after a preference actually changed.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SettingsChanged {
    Theme(Theme),
    Language(Language),
}

/// Current preferences backed by a persistent store.
#[derive(Resource)]
pub struct Settings {
    store: Box<dyn SettingsStore>,
    theme: Theme,
    language: Language,
}

impl Settings {
    /// Restore from the store; without a saved theme, follow the host's
    /// colour-scheme preference, else dark.
    pub fn load(store: Box<dyn SettingsStore>, prefers_dark: Option<bool>) -> Self {
        let saved = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read preference '{}': {}", key, e);
                None
            }
        };

        let theme = saved(THEME_SETTING_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(match prefers_dark {
                Some(false) => Theme::Light,
                _ => Theme::Dark,
            });
        let language = saved(LANGUAGE_SETTING_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            store,
            theme,
            language,
        }
    }

    pub fn from_platform() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::load(Box::new(LocalStorageStore), prefers_dark_scheme())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::load(Box::new(MemoryStore::default()), None)
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Apply a request; returns the resulting change, if any.
    pub fn apply(&mut self, request: SettingsRequest) -> Result<Option<SettingsChanged>, SettingsError> {
        match request {
            SettingsRequest::ToggleTheme => self.set_theme(self.theme.toggled()),
            SettingsRequest::SetTheme(theme) => self.set_theme(theme),
            SettingsRequest::SetLanguage(language) => {
                if language == self.language {
                    return Ok(None);
                }
                self.language = language;
                self.store.set(LANGUAGE_SETTING_KEY, language.code())?;
                Ok(Some(SettingsChanged::Language(language)))
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) -> Result<Option<SettingsChanged>, SettingsError> {
        if theme == self.theme {
            return Ok(None);
        }
        self.theme = theme;
        self.store.set(THEME_SETTING_KEY, theme.as_str())?;
        Ok(Some(SettingsChanged::Theme(theme)))
    }
}

#[cfg(target_arch = "wasm32")]
fn prefers_dark_scheme() -> Option<bool> {
    web_sys::window()?
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|query| query.matches())
}

pub fn apply_settings_requests(
    mut settings: ResMut<Settings>,
    mut requests: EventReader<SettingsRequest>,
    mut changes: EventWriter<SettingsChanged>,
) {
    for request in requests.read() {
        match settings.apply(*request) {
            Ok(Some(change)) => {
                info!("Preference changed: {:?}", change);
                changes.write(change);
            }
            Ok(None) => {}
            Err(e) => error!("Failed to persist preference: {}", e),
        }
    }
}
