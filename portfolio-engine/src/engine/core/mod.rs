//! Core application setup and state management.
//!
//! Handles the application lifecycle, window configuration, the loader to
//! portfolio transition and plugin initialisation for native and WASM targets.

/// Application setup and plugin configuration.
///
/// Creates the app with logging, asset loading, the loader, the content
/// layer and the portfolio sections.
pub mod app_setup;

/// Application state machine driven by the loader's completion event.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
