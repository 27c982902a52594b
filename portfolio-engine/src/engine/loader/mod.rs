//! Full-screen 3D loading sequence shown before the portfolio content.
//!
//! The clock, the model request and the particle shells are independent:
//! the animation never waits for the model, and a model resolving after
//! teardown is dropped by the liveness check in [`sequence::LoadSequence`].

/// Model fitting, glTF flattening and the procedural fallback crane.
pub mod model;

/// Overlay text and progress bar drawn over the scene.
pub mod overlay;

/// Point shells that spin and fly apart near the end of the run.
pub mod particle_shells;

/// Progress value, phase labels and the scale/opacity envelopes.
pub mod progress;

/// Scene setup, per-frame animation and teardown systems.
pub mod scene;

/// Pure lifecycle state machine with exactly-once completion.
pub mod sequence;

/// Window resize tracking for the loader camera.
pub mod viewport;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::rpc::web_rpc::WebRpcInterface;

/// Tags every top-level entity the loader spawns.
#[derive(Component)]
pub struct LoaderEntity;

#[derive(Component)]
pub struct LoaderCamera;

/// Fired exactly once when the loading run is over.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoaderCompleted;

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LoaderCompleted>()
            .add_systems(OnEnter(AppState::Loading), scene::setup_loader_scene)
            .add_systems(
                Update,
                (
                    viewport::handle_loader_resize,
                    scene::poll_loader_model,
                    scene::advance_loader_clock,
                    scene::animate_loader_model,
                    scene::animate_particle_shells,
                    overlay::update_loader_overlay,
                    notify_loader_complete,
                )
                    .chain()
                    .run_if(in_state(AppState::Loading)),
            )
            .add_systems(OnExit(AppState::Loading), scene::dispose_loader_scene);
    }
}

fn notify_loader_complete(
    mut events: EventReader<LoaderCompleted>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for _ in events.read() {
        rpc_interface.send_notification("loader_complete", serde_json::json!({}));
    }
}

#[cfg(test)]
mod tests {
    use super::scene::{LoaderScene, dispose_loader_scene};
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with_scene() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();

        let mut scene = LoaderScene::new(Handle::default(), 5);
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::default());
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        scene.owned_meshes.push(mesh);
        scene.owned_materials.push(material);
        scene.sequence.start(0.0);
        world.insert_resource(scene);

        world.spawn((LoaderEntity, LoaderCamera));
        world.spawn(LoaderEntity);
        world
    }

    #[test]
    fn teardown_releases_everything_once() {
        let mut world = world_with_scene();

        world
            .run_system_once(dispose_loader_scene)
            .expect("first teardown");
        assert!(world.get_resource::<LoaderScene>().is_none());
        assert_eq!(world.resource::<Assets<Mesh>>().len(), 0);
        assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 0);
        let mut remaining = world.query_filtered::<Entity, With<LoaderEntity>>();
        assert_eq!(remaining.iter(&world).count(), 0);

        world
            .run_system_once(dispose_loader_scene)
            .expect("second teardown is a no-op");
        let mut cameras = world.query_filtered::<Entity, With<LoaderCamera>>();
        assert_eq!(cameras.iter(&world).count(), 0);
    }
}
