//! Success confetti

use glam::Vec2;
use rand::Rng;

use crate::consts::{CANVAS_CENTER_X, CANVAS_HEIGHT};
use crate::renderer::{Color, DrawSurface};

/// Hard cap across bursts
pub const MAX_PARTICLES: usize = 256;

const GRAVITY: f32 = 320.0;

const PALETTE: [Color; 5] = [
    [1.0, 0.84, 0.25, 1.0],
    [0.42, 0.85, 0.55, 1.0],
    [0.4, 0.7, 1.0, 1.0],
    [1.0, 0.45, 0.6, 1.0],
    [0.75, 0.55, 1.0, 1.0],
];

/// A confetti particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Launch `count` particles upward from the panel center
    pub fn burst<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let origin = Vec2::new(CANVAS_CENTER_X, CANVAS_HEIGHT * 0.45);
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                // Remove oldest particles to make room
                self.particles.remove(0);
            }
            let angle = rng.random_range(-2.6f32..-0.5);
            let speed = rng.random_range(180.0f32..420.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                life: rng.random_range(0.7f32..1.0),
                size: rng.random_range(3.0f32..6.0),
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.vel.y += GRAVITY * dt;
            particle.pos += particle.vel * dt;
            particle.life -= dt * 0.6;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        for particle in &self.particles {
            let mut color = particle.color;
            color[3] = particle.life.clamp(0.0, 1.0);
            surface.fill_circle(particle.pos, particle.size, color);
        }
    }
}
