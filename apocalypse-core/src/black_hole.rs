//! Black hole hazard. Drifts slowly across the torus through a fade-in /
//! active / fade-out life cycle; while active it swallows a spawned ship
//! (invulnerability does not help), which recenters the ship with a long
//! invulnerability window and a rapid-fire reward.

use crate::constants::{
    BLACK_HOLE_ACTIVE_MS, BLACK_HOLE_DRIFT_SPEED, BLACK_HOLE_FADE_IN_MS, BLACK_HOLE_FADE_OUT_MS,
    BLACK_HOLE_GRACE_MS, BLACK_HOLE_RADIUS, NOMINAL_FPS, SHIP_RADIUS, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::geometry::{distance, wrap_position, Point};
use crate::rng::SeededRng;
use crate::services::Canvas;

#[derive(Debug, Clone)]
pub struct BlackHole {
    pub x: f64,
    pub y: f64,
    vel_x: f64,
    vel_y: f64,
    rotation_deg: f64,
    spiral: Vec<Point>,
    spawn_ms: f64,
    opacity: f64,
}

impl BlackHole {
    pub fn spawn(rng: &mut SeededRng, now_ms: f64) -> Self {
        let x = rng.range_f64(0.0, WORLD_WIDTH);
        let y = rng.range_f64(0.0, WORLD_HEIGHT);
        let direction = rng.range_f64(0.0, std::f64::consts::TAU);

        // Five-turn Archimedean spiral, sampled once at spawn.
        let coeff = BLACK_HOLE_RADIUS / (std::f64::consts::TAU * 5.0);
        let steps = (std::f64::consts::TAU * 5.0 / 0.1) as usize + 1;
        let spiral = (0..steps)
            .map(|i| {
                let theta = i as f64 * 0.1;
                let r = coeff * theta;
                (r * theta.cos(), r * theta.sin())
            })
            .collect();

        Self {
            x,
            y,
            vel_x: BLACK_HOLE_DRIFT_SPEED * direction.cos(),
            vel_y: BLACK_HOLE_DRIFT_SPEED * direction.sin(),
            rotation_deg: 0.0,
            spiral,
            spawn_ms: now_ms,
            opacity: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64, now_ms: f64) {
        let elapsed = now_ms - self.spawn_ms;
        let fade_out_start = BLACK_HOLE_FADE_IN_MS + BLACK_HOLE_ACTIVE_MS;

        self.opacity = if elapsed < BLACK_HOLE_FADE_IN_MS {
            elapsed / BLACK_HOLE_FADE_IN_MS
        } else if elapsed < fade_out_start {
            1.0
        } else {
            (1.0 - (elapsed - fade_out_start) / BLACK_HOLE_FADE_OUT_MS).max(0.0)
        };

        let scale = dt * NOMINAL_FPS;
        self.rotation_deg -= 2.0 * scale;
        (self.x, self.y) = wrap_position(self.x + self.vel_x * scale, self.y + self.vel_y * scale);
    }

    /// Lethal window: a grace period after spawn and before full fade-out.
    pub fn is_active(&self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.spawn_ms;
        let fade_out_start = BLACK_HOLE_FADE_IN_MS + BLACK_HOLE_ACTIVE_MS;
        elapsed >= BLACK_HOLE_GRACE_MS && elapsed < fade_out_start + BLACK_HOLE_GRACE_MS
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_ms >= BLACK_HOLE_FADE_IN_MS + BLACK_HOLE_ACTIVE_MS + BLACK_HOLE_FADE_OUT_MS
    }

    /// Proximity check only; the pull is strong enough that the outline
    /// does not matter. Invulnerability is deliberately not consulted.
    pub fn swallows(&self, ship_x: f64, ship_y: f64) -> bool {
        distance((ship_x, ship_y), (self.x, self.y)) < BLACK_HOLE_RADIUS + SHIP_RADIUS
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_alpha(self.opacity);
        let rad = self.rotation_deg.to_radians();
        let (cos_a, sin_a) = (rad.cos(), rad.sin());
        let points: Vec<Point> = self
            .spiral
            .iter()
            .map(|&(px, py)| {
                (
                    self.x + px * cos_a - py * sin_a,
                    self.y + px * sin_a + py * cos_a,
                )
            })
            .collect();
        canvas.draw_polyline(&points);
        canvas.draw_circle((self.x, self.y), 2.0);
        canvas.set_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn hole(now_ms: f64) -> BlackHole {
        let mut rng = SeededRng::new(0xB1AC);
        BlackHole::spawn(&mut rng, now_ms)
    }

    #[test]
    fn lethal_window_respects_grace_periods() {
        let bh = hole(0.0);
        assert!(!bh.is_active(999.0));
        assert!(bh.is_active(1_000.0));
        assert!(bh.is_active(13_999.0));
        assert!(!bh.is_active(14_000.0));
    }

    #[test]
    fn expires_after_full_life_cycle() {
        let bh = hole(0.0);
        assert!(!bh.is_expired(14_999.0));
        assert!(bh.is_expired(15_000.0));
    }

    #[test]
    fn opacity_ramps_in_and_out() {
        let mut bh = hole(0.0);
        bh.update(DT, 1_000.0);
        assert!((bh.opacity - 0.5).abs() < 1e-9);
        bh.update(DT, 5_000.0);
        assert!((bh.opacity - 1.0).abs() < 1e-9);
        bh.update(DT, 14_000.0);
        assert!((bh.opacity - 0.5).abs() < 1e-9);
        bh.update(DT, 20_000.0);
        assert_eq!(bh.opacity, 0.0);
    }

    #[test]
    fn swallow_is_distance_based() {
        let bh = hole(0.0);
        assert!(bh.swallows(bh.x, bh.y));
        assert!(bh.swallows(bh.x + BLACK_HOLE_RADIUS + SHIP_RADIUS - 1.0, bh.y));
        assert!(!bh.swallows(bh.x + BLACK_HOLE_RADIUS + SHIP_RADIUS + 1.0, bh.y));
    }

    #[test]
    fn drifts_and_wraps() {
        let mut bh = hole(0.0);
        let (sx, sy) = (bh.x, bh.y);
        for i in 0..600 {
            bh.update(DT, i as f64 * DT * 1_000.0);
        }
        assert!(bh.x != sx || bh.y != sy);
        assert!(bh.x >= 0.0 && bh.x < WORLD_WIDTH);
        assert!(bh.y >= 0.0 && bh.y < WORLD_HEIGHT);
    }
}
