/// glTF model shown by the loader; a procedural crane replaces it on failure.
pub const LOADER_MODEL_PATH: &str = "models/origami_crane.glb";

/// Portfolio content tables.
pub const SITE_MANIFEST_PATH: &str = "content/portfolio.site.json";

/// Locale tables, one per supported language code.
pub const LOCALE_DIRECTORY: &str = "locales";

/// Canvas the WASM build renders into.
pub const CANVAS_SELECTOR: &str = "#portfolio";

/// Keys used by the persistent preference store.
pub const THEME_SETTING_KEY: &str = "theme";
pub const LANGUAGE_SETTING_KEY: &str = "language";
