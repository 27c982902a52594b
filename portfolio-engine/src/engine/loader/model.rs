use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use constants::loader::MODEL_TARGET_SIZE;
use constants::palette::{CYAN, INDIGO, VIOLET};
use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, PI};

use super::LoaderEntity;

/// Pivot of whichever model made it into the scene. The loader animates its
/// transform and fades the listed materials, which are private clones.
#[derive(Component)]
pub struct LoaderModel {
    pub fit_scale: f32,
    pub spin: f32,
    pub materials: Vec<Handle<StandardMaterial>>,
}

/// A mesh primitive flattened out of the glTF node hierarchy.
#[derive(Debug, Clone)]
pub struct ModelPart {
    pub mesh: Handle<Mesh>,
    pub material: Option<Handle<StandardMaterial>>,
    pub transform: Transform,
}

/// Offset and uniform scale that centre a model and bring its largest
/// dimension to the target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelFit {
    pub offset: Vec3,
    pub scale: f32,
}

pub fn fit_bounds(min: Vec3, max: Vec3, target_size: f32) -> ModelFit {
    let size = max - min;
    let largest = size.max_element();
    let scale = if largest > f32::EPSILON {
        target_size / largest
    } else {
        1.0
    };
    ModelFit {
        offset: -(min + max) * 0.5,
        scale,
    }
}

/// Walk every root node of the glTF and collect its mesh primitives with
/// their accumulated transforms.
pub fn collect_model_parts(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
) -> Vec<ModelPart> {
    let child_ids: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter().map(|child| child.id()))
        .collect();

    let mut parts = Vec::new();
    for root in gltf.nodes.iter().filter(|h| !child_ids.contains(&h.id())) {
        collect_node(root, Transform::IDENTITY, nodes, gltf_meshes, &mut parts);
    }
    parts
}

fn collect_node(
    handle: &Handle<GltfNode>,
    parent: Transform,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    parts: &mut Vec<ModelPart>,
) {
    let Some(node) = nodes.get(handle) else {
        return;
    };
    let transform = parent.mul_transform(node.transform);

    if let Some(gltf_mesh) = node.mesh.as_ref().and_then(|h| gltf_meshes.get(h)) {
        parts.extend(gltf_mesh.primitives.iter().map(|primitive| ModelPart {
            mesh: primitive.mesh.clone(),
            material: primitive.material.clone(),
            transform,
        }));
    }

    for child in &node.children {
        collect_node(child, transform, nodes, gltf_meshes, parts);
    }
}

/// Axis-aligned bounds of all parts in model space.
pub fn model_bounds(parts: &[ModelPart], meshes: &Assets<Mesh>) -> Option<(Vec3, Vec3)> {
    let mut bounds: Option<(Vec3, Vec3)> = None;
    for part in parts {
        let Some(aabb) = meshes.get(&part.mesh).and_then(Mesh::compute_aabb) else {
            continue;
        };
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        for corner in 0..8 {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            let point = part.transform.transform_point(center + half * sign);
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(point), max.max(point)),
                None => (point, point),
            });
        }
    }
    bounds
}

/// Clone a material so fading one mesh never touches a shared instance.
pub fn transparent_clone(
    source: Option<&StandardMaterial>,
    materials: &mut Assets<StandardMaterial>,
) -> Handle<StandardMaterial> {
    let mut material = source.cloned().unwrap_or_default();
    material.alpha_mode = AlphaMode::Blend;
    material.base_color.set_alpha(1.0);
    materials.add(material)
}

/// Attach a loaded glTF model: centred, fitted and with private materials.
pub fn spawn_loaded_model(
    commands: &mut Commands,
    parts: &[ModelPart],
    meshes: &Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let fit = model_bounds(parts, meshes)
        .map(|(min, max)| fit_bounds(min, max, MODEL_TARGET_SIZE))
        .unwrap_or(ModelFit {
            offset: Vec3::ZERO,
            scale: 1.0,
        });

    let mut owned = Vec::with_capacity(parts.len());
    let children: Vec<(Mesh3d, MeshMaterial3d<StandardMaterial>, Transform)> = parts
        .iter()
        .map(|part| {
            let source = part.material.as_ref().and_then(|h| materials.get(h)).cloned();
            let material = transparent_clone(source.as_ref(), materials);
            owned.push(material.clone());
            (
                Mesh3d(part.mesh.clone()),
                MeshMaterial3d(material),
                part.transform,
            )
        })
        .collect();

    spawn_pivot(commands, fit.scale, fit.offset, owned, children)
}

/// One cone of the procedural crane.
#[derive(Debug, Clone, Copy)]
pub struct CranePiece {
    pub radius: f32,
    pub height: f32,
    pub sides: u32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub colour: Color,
    pub double_sided: bool,
}

/// Body, two wings, head and tail.
pub fn fallback_crane() -> [CranePiece; 5] {
    let piece = |radius, height, sides, translation, rotation, colour, double_sided| CranePiece {
        radius,
        height,
        sides,
        translation,
        rotation,
        colour,
        double_sided,
    };
    [
        piece(0.8, 1.5, 4, Vec3::ZERO, Quat::from_rotation_z(FRAC_PI_4), INDIGO, true),
        piece(0.6, 1.2, 3, Vec3::new(-1.0, 0.2, 0.0), Quat::from_rotation_z(FRAC_PI_3), VIOLET, true),
        piece(0.6, 1.2, 3, Vec3::new(1.0, 0.2, 0.0), Quat::from_rotation_z(-FRAC_PI_3), VIOLET, true),
        piece(0.3, 0.6, 4, Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, CYAN, false),
        piece(0.2, 1.0, 4, Vec3::new(0.0, -1.2, 0.0), Quat::from_rotation_x(PI), INDIGO, true),
    ]
}

/// Attach the procedural crane. Every generated mesh and material is
/// returned so teardown can release them.
pub fn spawn_fallback_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> (Entity, Vec<Handle<Mesh>>) {
    let mut mesh_handles = Vec::new();
    let mut owned = Vec::new();
    let children: Vec<(Mesh3d, MeshMaterial3d<StandardMaterial>, Transform)> = fallback_crane()
        .iter()
        .map(|piece| {
            let mesh = meshes.add(
                Cone {
                    radius: piece.radius,
                    height: piece.height,
                }
                .mesh()
                .resolution(piece.sides)
                .build(),
            );
            let material = materials.add(StandardMaterial {
                base_color: piece.colour,
                perceptual_roughness: 0.2,
                reflectance: 0.8,
                alpha_mode: AlphaMode::Blend,
                double_sided: piece.double_sided,
                cull_mode: if piece.double_sided {
                    None
                } else {
                    StandardMaterial::default().cull_mode
                },
                ..default()
            });
            mesh_handles.push(mesh.clone());
            owned.push(material.clone());
            (
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(piece.translation).with_rotation(piece.rotation),
            )
        })
        .collect();

    let entity = spawn_pivot(commands, 1.0, Vec3::ZERO, owned, children);
    (entity, mesh_handles)
}

fn spawn_pivot(
    commands: &mut Commands,
    fit_scale: f32,
    offset: Vec3,
    materials: Vec<Handle<StandardMaterial>>,
    children: Vec<(Mesh3d, MeshMaterial3d<StandardMaterial>, Transform)>,
) -> Entity {
    commands
        .spawn((
            LoaderEntity,
            LoaderModel {
                fit_scale,
                spin: 0.0,
                materials,
            },
            Transform::from_scale(Vec3::splat(fit_scale)),
            Visibility::Visible,
        ))
        .with_children(|pivot| {
            pivot
                .spawn((Transform::from_translation(offset), Visibility::Inherited))
                .with_children(|centred| {
                    for child in children {
                        centred.spawn(child);
                    }
                });
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centres_and_scales_largest_dimension() {
        let fit = fit_bounds(Vec3::new(1.0, 0.0, -2.0), Vec3::new(3.0, 10.0, 2.0), 2.5);
        assert_eq!(fit.offset, Vec3::new(-2.0, -5.0, 0.0));
        assert!((fit.scale - 0.25).abs() < 1e-6);
    }

    #[test]
    fn degenerate_bounds_keep_unit_scale() {
        let fit = fit_bounds(Vec3::ONE, Vec3::ONE, 2.5);
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset, -Vec3::ONE);
    }

    #[test]
    fn bounds_include_part_transforms() {
        let mut meshes = Assets::<Mesh>::default();
        let cuboid = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
        let parts = vec![
            ModelPart {
                mesh: cuboid.clone(),
                material: None,
                transform: Transform::IDENTITY,
            },
            ModelPart {
                mesh: cuboid,
                material: None,
                transform: Transform::from_xyz(4.0, 0.0, 0.0),
            },
        ];
        let (min, max) = model_bounds(&parts, &meshes).expect("bounds");
        assert!((min - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
        assert!((max - Vec3::new(5.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn material_clones_are_independent() {
        let mut materials = Assets::<StandardMaterial>::default();
        let shared = StandardMaterial {
            base_color: Color::srgba(1.0, 0.0, 0.0, 0.4),
            ..default()
        };
        let a = transparent_clone(Some(&shared), &mut materials);
        let b = transparent_clone(Some(&shared), &mut materials);
        assert_ne!(a.id(), b.id());

        materials.get_mut(&a).expect("clone a").base_color.set_alpha(0.0);
        let b = materials.get(&b).expect("clone b");
        assert_eq!(b.base_color.alpha(), 1.0);
        assert_eq!(b.alpha_mode, AlphaMode::Blend);
    }

    #[test]
    fn crane_has_body_wings_head_and_tail() {
        let crane = fallback_crane();
        assert_eq!(crane.len(), 5);
        assert_eq!(crane.iter().filter(|p| p.sides == 3).count(), 2);
        assert_eq!(crane[3].translation, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(crane[4].translation, Vec3::new(0.0, -1.2, 0.0));
    }
}
