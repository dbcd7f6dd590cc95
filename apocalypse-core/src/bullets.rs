//! Player bullets. Fixed-velocity projectiles that despawn off-screen
//! rather than wrapping, gated by a cooldown and a post-unpause grace
//! window so the fire key held through a menu does not discharge
//! instantly.

use crate::constants::{
    BULLET_COOLDOWN_FRAMES, BULLET_RAPID_COOLDOWN_FRAMES, BULLET_SPEED, NOMINAL_FPS,
    SHOOT_GRACE_FRAMES, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::services::{AudioDirector, Canvas, SoundCue};
use crate::ship::Ship;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub alive: bool,
}

#[derive(Debug, Default)]
pub struct BulletManager {
    pub(crate) bullets: Vec<Bullet>,
    cooldown_frames: f64,
    grace_frames: f64,
}

impl BulletManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.cooldown_frames = 0.0;
        self.grace_frames = 0.0;
    }

    /// Suppress firing briefly, e.g. right after leaving the pause menu.
    pub fn arm_grace(&mut self) {
        self.grace_frames = SHOOT_GRACE_FRAMES;
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// Fire from the ship nose if the cooldown and grace windows allow it.
    pub fn try_shoot(&mut self, ship: &Ship, audio: &mut AudioDirector) {
        if !ship.spawned || self.cooldown_frames > 0.0 || self.grace_frames > 0.0 {
            return;
        }
        let (x, y) = ship.nose();
        let heading = ship.angle.to_radians();
        self.bullets.push(Bullet {
            x,
            y,
            vel_x: BULLET_SPEED * heading.cos(),
            vel_y: -BULLET_SPEED * heading.sin(),
            alive: true,
        });
        self.cooldown_frames = if ship.rapid_fire {
            BULLET_RAPID_COOLDOWN_FRAMES
        } else {
            BULLET_COOLDOWN_FRAMES
        };
        audio.play(SoundCue::Laser);
    }

    pub fn update(&mut self, dt: f64) {
        let scale = dt * NOMINAL_FPS;
        self.cooldown_frames = (self.cooldown_frames - scale).max(0.0);
        self.grace_frames = (self.grace_frames - scale).max(0.0);

        for bullet in &mut self.bullets {
            bullet.x += bullet.vel_x * scale;
            bullet.y += bullet.vel_y * scale;
        }
        self.bullets.retain(|b| {
            b.alive && b.x >= 0.0 && b.x <= WORLD_WIDTH && b.y >= 0.0 && b.y <= WORLD_HEIGHT
        });
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for bullet in &self.bullets {
            canvas.fill_circle((bullet.x, bullet.y), 3.0);
        }
    }
}
