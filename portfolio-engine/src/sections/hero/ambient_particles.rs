use bevy::math::Vec2;
use rand::Rng;

/// One drifting dot on the ambient canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

/// Fixed population of dots bouncing inside a square surface.
#[derive(Debug, Clone)]
pub struct AmbientField {
    size: Vec2,
    particles: Vec<AmbientParticle>,
}

impl AmbientField {
    pub fn new(size: Vec2, count: usize, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| AmbientParticle {
                position: Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y)),
                velocity: Vec2::new(rng.gen_range(-0.25..0.25), rng.gen_range(-0.25..0.25)),
                radius: rng.gen_range(1.0..3.0),
                opacity: rng.gen_range(0.2..0.7),
            })
            .collect();
        Self { size, particles }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    /// Move every particle one frame, reflecting off the four edges.
    pub fn step(&mut self) {
        let size = self.size;
        for particle in &mut self.particles {
            let next = particle.position + particle.velocity;
            if next.x < 0.0 || next.x > size.x {
                particle.velocity.x = -particle.velocity.x;
            }
            if next.y < 0.0 || next.y > size.y {
                particle.velocity.y = -particle.velocity.y;
            }
            particle.position += particle.velocity;
        }
    }
}
