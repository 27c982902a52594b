use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::loader::{
    PARTICLE_BASE_RADIUS, PARTICLE_EXPLOSION_DISTANCE, PARTICLE_EXPLOSION_START,
    SHELL_SPIN_X_PER_FRAME, SHELL_SPIN_Y_PER_FRAME,
};
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::progress::LoadProgress;

/// One concentric shell of points. Rest positions never change after
/// generation; `current` is rebuilt from them every frame once the
/// explosion starts.
#[derive(Debug, Clone)]
pub struct ParticleShell {
    pub index: usize,
    rest: Vec<Vec3>,
    current: Vec<Vec3>,
}

impl ParticleShell {
    /// Scatter `count` points on the sphere of radius `base + index`.
    pub fn generate(index: usize, count: usize, rng: &mut impl Rng) -> Self {
        let radius = PARTICLE_BASE_RADIUS + index as f32;
        let rest: Vec<Vec3> = (0..count)
            .map(|_| {
                let theta = rng.gen_range(0.0..TAU);
                let phi = rng.gen_range(0.0..PI);
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            })
            .collect();
        Self {
            index,
            current: rest.clone(),
            rest,
        }
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    /// Recompute positions for this frame. Returns false when nothing moved,
    /// which is the case until progress passes the explosion start.
    pub fn displace(&mut self, progress: LoadProgress, elapsed_secs: f32, rng: &mut impl Rng) -> bool {
        let p = progress.value();
        if p <= PARTICLE_EXPLOSION_START {
            return false;
        }
        let distance =
            (p - PARTICLE_EXPLOSION_START) / (1.0 - PARTICLE_EXPLOSION_START) * PARTICLE_EXPLOSION_DISTANCE;
        let count = self.rest.len().max(1) as f32;

        for (i, (current, rest)) in self.current.iter_mut().zip(&self.rest).enumerate() {
            let angle = explosion_angle(i, count, elapsed_secs);
            let jitter = rng.gen_range(-0.5..0.5) * distance;
            *current = *rest + Vec3::new(angle.cos() * distance, angle.sin() * distance, jitter);
        }
        true
    }

    pub fn to_mesh(&self, colour: Color) -> Mesh {
        let linear = colour.to_linear().to_f32_array();
        let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, position_attribute(&self.current));
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, vec![linear; self.current.len()]);
        mesh
    }
}

/// Direction of travel is tied to the particle index and the clock, not to
/// the rest angle.
pub fn explosion_angle(index: usize, count: f32, elapsed_secs: f32) -> f32 {
    index as f32 / count * TAU + elapsed_secs
}

pub fn position_attribute(points: &[Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

/// Per-frame spin applied to a shell entity.
pub fn shell_spin(index: usize) -> Vec2 {
    let factor = (index + 1) as f32;
    Vec2::new(SHELL_SPIN_X_PER_FRAME * factor, SHELL_SPIN_Y_PER_FRAME * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shells_sit_on_their_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for index in 0..3 {
            let shell = ParticleShell::generate(index, 200, &mut rng);
            let radius = PARTICLE_BASE_RADIUS + index as f32;
            assert_eq!(shell.positions().len(), 200);
            for point in shell.rest_positions() {
                assert!((point.length() - radius).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn positions_stay_at_rest_before_explosion() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shell = ParticleShell::generate(1, 100, &mut rng);
        for step in 0..=60 {
            let progress = LoadProgress::from_elapsed_with(step as f32 / 100.0, 1.0);
            assert!(!shell.displace(progress, step as f32, &mut rng));
            assert_eq!(shell.positions(), shell.rest_positions());
        }
    }

    #[test]
    fn planar_displacement_depends_only_on_clock() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut a = ParticleShell::generate(0, 50, &mut rng);
        let mut b = a.clone();
        let progress = LoadProgress::from_elapsed_with(0.8, 1.0);

        // Skip intermediate frames on one copy: the result must not drift.
        for t in [0.1, 0.5, 0.9] {
            a.displace(LoadProgress::from_elapsed_with(t, 1.0), t, &mut rng);
        }
        a.displace(progress, 2.0, &mut rng);
        b.displace(progress, 2.0, &mut rng);

        let distance = 0.5 * PARTICLE_EXPLOSION_DISTANCE;
        for (i, ((pa, pb), rest)) in a
            .positions()
            .iter()
            .zip(b.positions())
            .zip(a.rest_positions())
            .enumerate()
        {
            assert!((pa.truncate() - pb.truncate()).length() < 1e-4);
            let angle = explosion_angle(i, 50.0, 2.0);
            let expected = rest.truncate() + Vec2::new(angle.cos(), angle.sin()) * distance;
            assert!((pa.truncate() - expected).length() < 1e-3);
            assert!((pa.z - rest.z).abs() <= distance * 0.5 + 1e-4);
        }
    }

    #[test]
    fn outer_shells_spin_faster() {
        assert!(shell_spin(2).y > shell_spin(0).y);
        assert_eq!(shell_spin(0), Vec2::new(0.0005, 0.001));
    }
}
