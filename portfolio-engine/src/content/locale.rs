use bevy::prelude::*;
use constants::path::LOCALE_DIRECTORY;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use super::ContentError;
use super::settings::{Settings, SettingsChanged};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn asset_path(self) -> String {
        format!("{}/{}.locale.json", LOCALE_DIRECTORY, self.code())
    }
}

impl FromStr for Language {
    type Err = ContentError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        // Region suffixes ("fr-FR") fall back to the base language.
        let base = code.split(['-', '_']).next().unwrap_or(code);
        Language::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(base))
            .ok_or_else(|| ContentError::UnknownLanguage(code.to_string()))
    }
}

/// Nested string table for one language.
#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct LocaleTable(Value);

impl LocaleTable {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Resolve a dotted key such as `contact.info.email`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.0, |node, segment| node.get(segment))
    }

    /// Translated string, or the key itself when missing.
    pub fn text(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(text)) => text.clone(),
            _ => key.to_string(),
        }
    }

    /// Translated string list, empty when missing.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.lookup(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Resource, Default)]
pub struct LocaleHandles(HashMap<Language, Handle<LocaleTable>>);

impl LocaleHandles {
    pub fn insert(&mut self, language: Language, handle: Handle<LocaleTable>) {
        self.0.insert(language, handle);
    }

    pub fn get(&self, language: Language) -> Option<&Handle<LocaleTable>> {
        self.0.get(&language)
    }
}

/// Copy of the table for the current language, used by every text lookup.
#[derive(Resource, Default)]
pub struct ActiveLocale {
    pub language: Language,
    pub table: LocaleTable,
    pub ready: bool,
}

impl ActiveLocale {
    pub fn t(&self, key: &str) -> String {
        self.table.text(key)
    }
}

/// Text node showing a translated key. Refreshed on language change.
#[derive(Component, Debug, Clone)]
pub struct Localized(pub String);

/// Keep `ActiveLocale` matching the chosen language, then retranslate.
pub fn refresh_active_locale(
    settings: Res<Settings>,
    handles: Res<LocaleHandles>,
    tables: Res<Assets<LocaleTable>>,
    mut active: ResMut<ActiveLocale>,
    mut changes: EventReader<SettingsChanged>,
    mut texts: Query<(&Localized, &mut Text)>,
) {
    let language_changed = changes
        .read()
        .any(|change| matches!(change, SettingsChanged::Language(_)));
    let wanted = settings.language();
    if active.ready && active.language == wanted && !language_changed {
        return;
    }

    let Some(table) = handles.get(wanted).and_then(|handle| tables.get(handle)) else {
        return;
    };
    active.language = wanted;
    active.table = table.clone();
    active.ready = true;
    info!("Locale '{}' active", wanted.code());

    for (localized, mut text) in &mut texts {
        text.0 = active.t(&localized.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> LocaleTable {
        LocaleTable::from_value(json!({
            "nav": { "home": "Home" },
            "hero": { "titles": ["Frontend Developer", "Creative Coder"] },
            "contact": { "info": { "email": "Email" } }
        }))
    }

    #[test]
    fn dotted_keys_resolve_nested_strings() {
        assert_eq!(table().text("contact.info.email"), "Email");
        assert_eq!(table().text("nav.home"), "Home");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        assert_eq!(table().text("nav.blog"), "nav.blog");
        assert_eq!(table().text("hero.titles"), "hero.titles");
        assert!(table().list("nav.home").is_empty());
    }

    #[test]
    fn arrays_resolve_as_lists() {
        assert_eq!(
            table().list("hero.titles"),
            vec!["Frontend Developer", "Creative Coder"]
        );
    }

    #[test]
    fn language_codes_parse_with_region() {
        assert_eq!("fr-FR".parse::<Language>().ok(), Some(Language::Fr));
        assert_eq!("EN".parse::<Language>().ok(), Some(Language::En));
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::Fr.asset_path(), "locales/fr.locale.json");
    }
}
