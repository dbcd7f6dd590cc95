//! Homing missiles launched by the UFO. A missile steers toward the ship
//! with a clamped turn rate, accelerates to a cap, and avoids screen edges
//! so it cannot park itself in a corner; it burns out after a fixed
//! lifetime. Missiles clamp to the screen instead of wrapping.

use crate::constants::{
    BURST_MISSILE, BURST_SHIP, MISSILE_ACCEL, MISSILE_BODY_RADIUS, MISSILE_HIT_RADIUS,
    MISSILE_INITIAL_SPEED, MISSILE_LIFETIME_MS, MISSILE_MAX_SPEED, MISSILE_TURN_RATE, NOMINAL_FPS,
    SCORE_MISSILE, SHIP_RADIUS, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::bullets::BulletManager;
use crate::explosions::ExplosionManager;
use crate::geometry::{distance, point_in_polygon, polygons_collide, shortest_angle_diff, Point};
use crate::rng::SeededRng;
use crate::services::{AudioDirector, Canvas, LoopCue, SoundCue};
use crate::ship::Ship;

#[derive(Debug, Clone)]
pub struct Missile {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, screen convention (+y down).
    pub angle: f64,
    pub speed: f64,
    spawn_ms: f64,
    pub active: bool,
}

impl Missile {
    fn new(x: f64, y: f64, now_ms: f64) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            speed: MISSILE_INITIAL_SPEED,
            spawn_ms: now_ms,
            active: true,
        }
    }

    /// Steer and advance one tick, homing toward `target` unless close to
    /// a screen edge, in which case edge avoidance takes priority.
    fn update(&mut self, dt: f64, now_ms: f64, target: Point) {
        if now_ms - self.spawn_ms >= MISSILE_LIFETIME_MS {
            self.active = false;
            return;
        }

        // Turning circle radius; stay two radii clear of the walls.
        let margin = 2.0 * self.speed / MISSILE_TURN_RATE;
        let mut avoid_x: f64 = 0.0;
        let mut avoid_y: f64 = 0.0;
        if self.x < margin {
            avoid_x += 1.0;
        }
        if self.x > WORLD_WIDTH - margin {
            avoid_x -= 1.0;
        }
        if self.y < margin {
            avoid_y += 1.0;
        }
        if self.y > WORLD_HEIGHT - margin {
            avoid_y -= 1.0;
        }

        let desired = if avoid_x != 0.0 || avoid_y != 0.0 {
            avoid_y.atan2(avoid_x)
        } else {
            let dx = target.0 - self.x;
            let dy = target.1 - self.y;
            let mag = (dx * dx + dy * dy).sqrt().max(0.001);
            (dy / mag).atan2(dx / mag)
        };

        let scale = dt * NOMINAL_FPS;
        let max_turn = MISSILE_TURN_RATE * scale;
        let diff = shortest_angle_diff(self.angle, desired).clamp(-max_turn, max_turn);
        self.angle += diff;

        self.speed = (self.speed + MISSILE_ACCEL * scale).min(MISSILE_MAX_SPEED);
        self.x += self.speed * self.angle.cos() * scale;
        self.y += self.speed * self.angle.sin() * scale;
        self.x = self.x.clamp(0.0, WORLD_WIDTH);
        self.y = self.y.clamp(0.0, WORLD_HEIGHT);
    }

    /// Body triangle (tip, base left, base right) in world space.
    pub fn polygon(&self) -> [Point; 3] {
        let length = 21.6;
        let width = 7.2;
        let (sin_a, cos_a) = self.angle.sin_cos();
        let tip = (self.x + length * cos_a, self.y + length * sin_a);
        let base_left = (
            self.x - length * 0.5 * cos_a - width * sin_a,
            self.y - length * 0.5 * sin_a + width * cos_a,
        );
        let base_right = (
            self.x - length * 0.5 * cos_a + width * sin_a,
            self.y - length * 0.5 * sin_a - width * cos_a,
        );
        [tip, base_left, base_right]
    }
}

#[derive(Debug, Default)]
pub struct MissileManager {
    pub(crate) missiles: Vec<Missile>,
}

impl MissileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active(&self) -> bool {
        !self.missiles.is_empty()
    }

    pub fn spawn_missile(&mut self, x: f64, y: f64, now_ms: f64, audio: &mut AudioDirector) {
        self.missiles.push(Missile::new(x, y, now_ms));
        audio.start_loop(LoopCue::Missile);
    }

    pub fn update(&mut self, dt: f64, now_ms: f64, target: Point, audio: &mut AudioDirector) {
        for m in &mut self.missiles {
            m.update(dt, now_ms, target);
        }
        self.missiles.retain(|m| m.active);
        if self.missiles.is_empty() {
            audio.stop_loop(LoopCue::Missile);
        }
    }

    /// Resolve bullet hits; one bullet destroys one missile.
    pub fn handle_bullet_collisions(
        &mut self,
        rng: &mut SeededRng,
        bullets: &mut BulletManager,
        explosions: &mut ExplosionManager,
        audio: &mut AudioDirector,
    ) -> u32 {
        let mut scored = 0;
        for bullet in &mut bullets.bullets {
            if !bullet.alive {
                continue;
            }
            for m in &mut self.missiles {
                if !m.active {
                    continue;
                }
                if distance((bullet.x, bullet.y), (m.x, m.y)) >= MISSILE_HIT_RADIUS {
                    continue;
                }
                if !point_in_polygon(bullet.x, bullet.y, &m.polygon()) {
                    continue;
                }
                m.active = false;
                bullet.alive = false;
                explosions.spawn_burst(rng, m.x, m.y, BURST_MISSILE);
                audio.play(SoundCue::Explosion);
                scored += SCORE_MISSILE;
                break;
            }
        }
        bullets.bullets.retain(|b| b.alive);
        let any_destroyed = self.missiles.iter().any(|m| !m.active);
        self.missiles.retain(|m| m.active);
        if any_destroyed && self.missiles.is_empty() {
            audio.stop_loop(LoopCue::Missile);
        }
        scored
    }

    /// Check for a missile striking a vulnerable ship. The striking missile
    /// is consumed and the burst is spawned here; the caller handles lives
    /// and respawn.
    pub fn handle_ship_collision(
        &mut self,
        rng: &mut SeededRng,
        ship: &Ship,
        explosions: &mut ExplosionManager,
        audio: &mut AudioDirector,
    ) -> bool {
        if !ship.is_vulnerable() {
            return false;
        }
        let ship_poly = ship.polygon();
        let mut hit = false;
        for m in &mut self.missiles {
            if distance((ship.x, ship.y), (m.x, m.y)) < SHIP_RADIUS + MISSILE_BODY_RADIUS
                && polygons_collide(&ship_poly, &m.polygon())
            {
                m.active = false;
                explosions.spawn_burst(rng, ship.x, ship.y, BURST_SHIP);
                audio.play(SoundCue::Explosion);
                hit = true;
                break;
            }
        }
        if hit {
            self.missiles.retain(|m| m.active);
            if self.missiles.is_empty() {
                audio.stop_loop(LoopCue::Missile);
            }
        }
        hit
    }

    pub fn clear(&mut self, audio: &mut AudioDirector) {
        self.missiles.clear();
        audio.stop_loop(LoopCue::Missile);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for m in &self.missiles {
            canvas.fill_polygon(&m.polygon());

            let (sin_a, cos_a) = m.angle.sin_cos();
            let flame_base = (m.x - 21.6 * 0.6 * cos_a, m.y - 21.6 * 0.6 * sin_a);
            let flame = [
                (flame_base.0 + 3.6 * sin_a, flame_base.1 - 3.6 * cos_a),
                (flame_base.0 - 9.0 * cos_a, flame_base.1 - 9.0 * sin_a),
                (flame_base.0 - 3.6 * sin_a, flame_base.1 + 3.6 * cos_a),
            ];
            canvas.fill_polygon(&flame);
        }
    }
}
