use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::loader::{
    AMBIENT_BRIGHTNESS, CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    FILL_LIGHT_ILLUMINANCE, KEY_LIGHT_ILLUMINANCE, MODEL_SPIN_PER_FRAME, MODEL_TILT_AMPLITUDE,
    PARTICLE_OPACITY, PARTICLE_SHELL_COUNT, PARTICLES_PER_SHELL, POINT_LIGHT_INTENSITY,
    POINT_LIGHT_RANGE,
};
use constants::palette::{CYAN, INDIGO, LOADER_BACKGROUND, SHELL_COLOURS, VIOLET};
use constants::path::LOADER_MODEL_PATH;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::model::{LoaderModel, collect_model_parts, spawn_fallback_model, spawn_loaded_model};
use super::overlay::spawn_loader_overlay;
use super::particle_shells::{ParticleShell, position_attribute, shell_spin};
use super::progress::LoadProgress;
use super::sequence::{FrameOutcome, LoadSequence, ModelKind};
use super::viewport::LoaderViewport;
use super::{LoaderCamera, LoaderCompleted, LoaderEntity};

/// Everything one loader run owns. Removing this resource is the teardown.
#[derive(Resource)]
pub struct LoaderScene {
    pub sequence: LoadSequence,
    pub model_handle: Handle<Gltf>,
    /// Progress and elapsed seconds of the latest animated frame.
    pub frame: (LoadProgress, f32),
    /// Set by the clock when this tick produced a new animated frame.
    pub animate_this_frame: bool,
    pub owned_meshes: Vec<Handle<Mesh>>,
    pub owned_materials: Vec<Handle<StandardMaterial>>,
    rng: SmallRng,
}

impl LoaderScene {
    pub fn new(model_handle: Handle<Gltf>, seed: u64) -> Self {
        Self {
            sequence: LoadSequence::default(),
            model_handle,
            frame: (LoadProgress::ZERO, 0.0),
            animate_this_frame: false,
            owned_meshes: Vec::new(),
            owned_materials: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

/// A point shell and the mesh whose positions it rewrites.
#[derive(Component)]
pub struct LoaderShell {
    pub shell: ParticleShell,
    pub mesh: Handle<Mesh>,
    pub spin: Vec2,
}

/// Build camera, lights and shells, issue the model request and start the clock.
pub fn setup_loader_scene(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut completed: EventWriter<LoaderCompleted>,
) {
    let Ok(window) = windows.single() else {
        // Nothing to render into: skip the scene and let the content through.
        debug!("No primary window, skipping loader scene");
        completed.write(LoaderCompleted);
        return;
    };

    let viewport = LoaderViewport::new(window.width(), window.height());
    let mut scene = LoaderScene::new(
        asset_server.load(LOADER_MODEL_PATH),
        rand::random(),
    );
    scene.sequence.request_model();

    spawn_loader_camera(&mut commands, &viewport);
    spawn_loader_lights(&mut commands);
    spawn_particle_shells(&mut commands, &mut scene, &mut meshes, &mut materials);
    spawn_loader_overlay(&mut commands);

    scene.sequence.start(time.elapsed_secs());
    info!("Loader started, requesting {}", LOADER_MODEL_PATH);

    commands.insert_resource(viewport);
    commands.insert_resource(scene);
}

fn spawn_loader_camera(commands: &mut Commands, viewport: &LoaderViewport) {
    commands.spawn((
        LoaderEntity,
        LoaderCamera,
        Camera3d::default(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(LOADER_BACKGROUND),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            aspect_ratio: viewport.aspect_ratio(),
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_loader_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        LoaderEntity,
        DirectionalLight {
            color: INDIGO,
            illuminance: KEY_LIGHT_ILLUMINANCE,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        LoaderEntity,
        DirectionalLight {
            color: VIOLET,
            illuminance: FILL_LIGHT_ILLUMINANCE,
            ..default()
        },
        Transform::from_xyz(-5.0, -5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        LoaderEntity,
        PointLight {
            color: CYAN,
            intensity: POINT_LIGHT_INTENSITY,
            range: POINT_LIGHT_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 3.0),
    ));
}

fn spawn_particle_shells(
    commands: &mut Commands,
    scene: &mut LoaderScene,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    for index in 0..PARTICLE_SHELL_COUNT {
        let shell = ParticleShell::generate(index, PARTICLES_PER_SHELL, &mut scene.rng);
        let colour = SHELL_COLOURS[index % SHELL_COLOURS.len()];
        let mesh = meshes.add(shell.to_mesh(colour));
        let material = materials.add(StandardMaterial {
            base_color: Color::WHITE.with_alpha(PARTICLE_OPACITY),
            alpha_mode: AlphaMode::Add,
            unlit: true,
            ..default()
        });
        scene.owned_meshes.push(mesh.clone());
        scene.owned_materials.push(material.clone());

        commands.spawn((
            LoaderEntity,
            LoaderShell {
                shell,
                mesh: mesh.clone(),
                spin: Vec2::ZERO,
            },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::IDENTITY,
        ));
    }
}

/// Attach the glTF once it resolves, or the fallback crane if it fails.
/// Runs only while the scene resource is alive.
pub fn poll_loader_model(
    mut commands: Commands,
    scene: Option<ResMut<LoaderScene>>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    if !scene.sequence.is_alive() || scene.sequence.model().is_some() {
        return;
    }

    let handle = scene.model_handle.clone();
    let failed = match asset_server.get_load_state(&handle) {
        Some(LoadState::Failed(error)) => Some(error.to_string()),
        _ => match asset_server.get_recursive_dependency_load_state(&handle) {
            Some(RecursiveDependencyLoadState::Failed(error)) => Some(error.to_string()),
            _ => None,
        },
    };

    if let Some(reason) = failed {
        if scene.sequence.attach_model(ModelKind::Fallback) {
            warn!("Model {} failed to load ({}), using fallback crane", LOADER_MODEL_PATH, reason);
            let (_, fallback_meshes) = spawn_fallback_model(&mut commands, &mut meshes, &mut materials);
            scene.owned_meshes.extend(fallback_meshes);
        }
        return;
    }

    if !asset_server.is_loaded_with_dependencies(&handle) {
        return;
    }
    let Some(gltf) = gltfs.get(&handle) else {
        return;
    };

    let parts = collect_model_parts(gltf, &gltf_nodes, &gltf_meshes);
    if scene.sequence.attach_model(ModelKind::Loaded) {
        info!("✓ Model loaded with {} primitives", parts.len());
        spawn_loaded_model(&mut commands, &parts, &meshes, &mut materials);
    }
}

/// Advance the loader clock and fire completion exactly once.
pub fn advance_loader_clock(
    scene: Option<ResMut<LoaderScene>>,
    time: Res<Time>,
    mut completed: EventWriter<LoaderCompleted>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    let now = time.elapsed_secs();
    scene.animate_this_frame = false;
    match scene.sequence.advance(now) {
        FrameOutcome::Animate(progress) => {
            let elapsed = scene.sequence.elapsed(now);
            scene.frame = (progress, elapsed);
            scene.animate_this_frame = true;
        }
        FrameOutcome::Complete => {
            info!("✓ Loader finished");
            completed.write(LoaderCompleted);
        }
        FrameOutcome::Hold | FrameOutcome::Idle => {}
    }
}

/// Spin, unfold, explode and fade the model.
pub fn animate_loader_model(
    scene: Option<Res<LoaderScene>>,
    mut models: Query<(&mut LoaderModel, &mut Transform)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(scene) = scene else {
        return;
    };
    if !scene.animate_this_frame {
        return;
    }
    let (progress, elapsed) = scene.frame;

    for (mut model, mut transform) in &mut models {
        model.spin += MODEL_SPIN_PER_FRAME;
        let tilt = elapsed.sin() * MODEL_TILT_AMPLITUDE;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, tilt, model.spin, 0.0);
        transform.scale = progress.model_scale() * model.fit_scale;

        let opacity = progress.model_opacity();
        if opacity < 1.0 {
            for handle in &model.materials {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color.set_alpha(opacity);
                }
            }
        }
    }
}

/// Spin the shells and push exploded positions to their meshes.
pub fn animate_particle_shells(
    scene: Option<ResMut<LoaderScene>>,
    mut shells: Query<(&mut LoaderShell, &mut Transform)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    if !scene.animate_this_frame {
        return;
    }
    let (progress, elapsed) = scene.frame;

    for (mut shell, mut transform) in &mut shells {
        let spin = shell_spin(shell.shell.index);
        shell.spin += spin;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, shell.spin.x, shell.spin.y, 0.0);

        let shell = shell.as_mut();
        if shell.shell.displace(progress, elapsed, &mut scene.rng) {
            if let Some(mesh) = meshes.get_mut(&shell.mesh) {
                mesh.insert_attribute(
                    Mesh::ATTRIBUTE_POSITION,
                    position_attribute(shell.shell.positions()),
                );
            }
        }
    }
}

/// Release every graphics object the loader created. Safe to run twice.
pub fn dispose_loader_scene(
    mut commands: Commands,
    scene: Option<ResMut<LoaderScene>>,
    entities: Query<Entity, With<LoaderEntity>>,
    models: Query<&LoaderModel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    if !scene.sequence.dispose() {
        return;
    }

    for model in &models {
        for handle in &model.materials {
            materials.remove(handle);
        }
    }
    for handle in scene.owned_meshes.drain(..) {
        meshes.remove(&handle);
    }
    for handle in scene.owned_materials.drain(..) {
        materials.remove(&handle);
    }
    for entity in &entities {
        commands.entity(entity).despawn();
    }

    commands.insert_resource(AmbientLight::default());
    commands.remove_resource::<LoaderViewport>();
    commands.remove_resource::<LoaderScene>();
    info!("Loader scene disposed");
}
