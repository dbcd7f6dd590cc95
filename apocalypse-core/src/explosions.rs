//! Particle bursts for destruction effects. Purely cosmetic: nothing
//! collides with a particle.

use crate::constants::NOMINAL_FPS;
use crate::rng::SeededRng;
use crate::services::Canvas;

#[derive(Debug, Clone)]
struct Particle {
    x: f64,
    y: f64,
    vel_x: f64,
    vel_y: f64,
    /// Remaining life in nominal frames.
    life: f64,
}

#[derive(Debug, Default)]
pub struct ExplosionManager {
    bursts: Vec<Vec<Particle>>,
}

impl ExplosionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
    }

    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Scatter `count` particles from (x, y), each with its own speed and
    /// direction and a 20-40 frame lifetime.
    pub fn spawn_burst(&mut self, rng: &mut SeededRng, x: f64, y: f64, count: usize) {
        let particles = (0..count)
            .map(|_| {
                let angle = rng.range_f64(0.0, std::f64::consts::TAU);
                let speed = rng.range_f64(1.8, 5.4);
                Particle {
                    x,
                    y,
                    vel_x: speed * angle.cos(),
                    vel_y: speed * angle.sin(),
                    life: rng.range_f64(20.0, 40.0),
                }
            })
            .collect();
        self.bursts.push(particles);
    }

    pub fn update(&mut self, dt: f64) {
        let scale = dt * NOMINAL_FPS;
        for burst in &mut self.bursts {
            for p in burst.iter_mut() {
                p.x += p.vel_x * scale;
                p.y += p.vel_y * scale;
                p.life -= scale;
            }
            burst.retain(|p| p.life > 0.0);
        }
        self.bursts.retain(|b| !b.is_empty());
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for burst in &self.bursts {
            for p in burst {
                canvas.draw_point((p.x, p.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn burst_spawns_requested_particle_count() {
        let mut rng = SeededRng::new(7);
        let mut mgr = ExplosionManager::new();
        mgr.spawn_burst(&mut rng, 100.0, 100.0, 8);
        assert_eq!(mgr.burst_count(), 1);
        assert_eq!(mgr.bursts[0].len(), 8);
    }

    #[test]
    fn particles_expire_and_burst_is_removed() {
        let mut rng = SeededRng::new(7);
        let mut mgr = ExplosionManager::new();
        mgr.spawn_burst(&mut rng, 0.0, 0.0, 10);

        // Max lifetime is 40 nominal frames.
        for _ in 0..41 {
            mgr.update(DT);
        }
        assert_eq!(mgr.burst_count(), 0);
    }

    #[test]
    fn particles_move_outward() {
        let mut rng = SeededRng::new(7);
        let mut mgr = ExplosionManager::new();
        mgr.spawn_burst(&mut rng, 0.0, 0.0, 10);
        mgr.update(DT);
        for p in &mgr.bursts[0] {
            assert!(p.x != 0.0 || p.y != 0.0);
        }
    }
}
