use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::content::ContentPlugin;
use crate::engine::core::app_state::{AppState, transition_to_portfolio};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loader::LoaderPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::sections::SectionsPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,portfolio_engine=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(ContentPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(LoaderPlugin)
        .add_plugins(SectionsPlugin);

    app.add_systems(
        Update,
        transition_to_portfolio.run_if(in_state(AppState::Loading)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: bevy::log::Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
