//! Player ship: thrust/friction integration, heading control, and the
//! respawn state machine (not-spawned -> pending -> spawned+invulnerable).
//!
//! The ship is created once per session. "Destruction" only arms a respawn
//! timer; the entity is never removed. All timers compare against the
//! world's simulation clock, passed in as `now_ms`.

use crate::constants::{
    NOMINAL_FPS, SHIP_FRICTION, SHIP_LENGTH, SHIP_MAX_SPEED, SHIP_THRUST, SHIP_TURN_STEP_DEG,
    SHIP_WING, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::geometry::{wrap_position, Point};
use crate::input::InputFrame;
use crate::services::{AudioDirector, Canvas, LoopCue};

#[derive(Debug, Clone)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    /// Heading in degrees; 0 = +x, counter-clockwise positive with screen-y
    /// inverted (sin is subtracted when projecting).
    pub angle: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub spawned: bool,
    pub invulnerable: bool,
    pub thrusting: bool,
    pub rapid_fire: bool,
    invuln_start_ms: f64,
    invuln_duration_ms: f64,
    rapid_fire_start_ms: f64,
    rapid_fire_duration_ms: f64,
    pending_respawn: bool,
    respawn_armed_at_ms: f64,
    respawn_delay_ms: f64,
    respawn_invuln_ms: f64,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        Self {
            x: WORLD_WIDTH / 2.0,
            y: WORLD_HEIGHT / 2.0,
            angle: 0.0,
            vel_x: 0.0,
            vel_y: 0.0,
            spawned: false,
            invulnerable: false,
            thrusting: false,
            rapid_fire: false,
            invuln_start_ms: 0.0,
            invuln_duration_ms: 0.0,
            rapid_fire_start_ms: 0.0,
            rapid_fire_duration_ms: 0.0,
            pending_respawn: false,
            respawn_armed_at_ms: 0.0,
            respawn_delay_ms: 0.0,
            respawn_invuln_ms: 0.0,
        }
    }

    /// End the current life and arm a respawn `delay_ms` from now; on
    /// respawn the ship comes back at center with `invuln_ms` of
    /// invulnerability.
    pub fn trigger_respawn(
        &mut self,
        now_ms: f64,
        delay_ms: f64,
        invuln_ms: f64,
        audio: &mut AudioDirector,
    ) {
        self.spawned = false;
        self.pending_respawn = true;
        self.respawn_armed_at_ms = now_ms;
        self.respawn_delay_ms = delay_ms;
        self.respawn_invuln_ms = invuln_ms;
        self.vel_x = 0.0;
        self.vel_y = 0.0;
        self.thrusting = false;
        audio.stop_loop(LoopCue::Thruster);
    }

    pub fn grant_rapid_fire(&mut self, now_ms: f64, duration_ms: f64) {
        self.rapid_fire = true;
        self.rapid_fire_start_ms = now_ms;
        self.rapid_fire_duration_ms = duration_ms;
    }

    pub fn cancel_rapid_fire(&mut self) {
        self.rapid_fire = false;
    }

    pub fn pending_respawn(&self) -> bool {
        self.pending_respawn
    }

    /// Collidable right now: spawned and not inside an invulnerability
    /// window.
    pub fn is_vulnerable(&self) -> bool {
        self.spawned && !self.invulnerable
    }

    /// Apply held rotation/thrust input for this tick. Rotation and thrust
    /// impulses are per-tick steps, tuned for 60 ticks/second.
    pub fn handle_input(&mut self, input: &InputFrame, audio: &mut AudioDirector) {
        if input.left {
            self.angle += SHIP_TURN_STEP_DEG;
        }
        if input.right {
            self.angle -= SHIP_TURN_STEP_DEG;
        }
        if input.thrust {
            self.thrusting = true;
            let heading = self.angle.to_radians();
            self.vel_x += SHIP_THRUST * heading.cos();
            self.vel_y -= SHIP_THRUST * heading.sin();
            audio.start_loop(LoopCue::Thruster);
        } else {
            self.thrusting = false;
            audio.stop_loop(LoopCue::Thruster);
        }
    }

    pub fn update(&mut self, dt: f64, now_ms: f64) {
        if self.pending_respawn && now_ms - self.respawn_armed_at_ms >= self.respawn_delay_ms {
            self.x = WORLD_WIDTH / 2.0;
            self.y = WORLD_HEIGHT / 2.0;
            self.vel_x = 0.0;
            self.vel_y = 0.0;
            self.angle = 0.0;
            self.thrusting = false;
            self.spawned = true;
            self.invulnerable = true;
            self.invuln_start_ms = now_ms;
            self.invuln_duration_ms = self.respawn_invuln_ms;
            self.pending_respawn = false;
        }

        if !self.spawned {
            return;
        }

        let scale = dt * NOMINAL_FPS;
        self.x += self.vel_x * scale;
        self.y += self.vel_y * scale;

        let speed = (self.vel_x * self.vel_x + self.vel_y * self.vel_y).sqrt();
        if speed > SHIP_MAX_SPEED {
            let factor = SHIP_MAX_SPEED / speed;
            self.vel_x *= factor;
            self.vel_y *= factor;
        }

        // Friction as a per-nominal-frame factor raised to the elapsed time
        // ratio, so decay is frame-rate-independent.
        let decay = SHIP_FRICTION.powf(scale);
        self.vel_x *= decay;
        self.vel_y *= decay;

        (self.x, self.y) = wrap_position(self.x, self.y);

        if self.invulnerable && now_ms - self.invuln_start_ms >= self.invuln_duration_ms {
            self.invulnerable = false;
        }
        if self.rapid_fire && now_ms - self.rapid_fire_start_ms >= self.rapid_fire_duration_ms {
            self.rapid_fire = false;
        }
    }

    /// Muzzle point at the ship nose.
    pub fn nose(&self) -> Point {
        let heading = self.angle.to_radians();
        (
            self.x + SHIP_LENGTH * heading.cos(),
            self.y - SHIP_LENGTH * heading.sin(),
        )
    }

    /// Hull triangle (tip, left wing, right wing) in world space.
    pub fn polygon(&self) -> [Point; 3] {
        let tip = self.nose();
        let left_rad = (self.angle + 135.0).to_radians();
        let right_rad = (self.angle - 135.0).to_radians();
        let left = (
            self.x + SHIP_WING * left_rad.cos(),
            self.y - SHIP_WING * left_rad.sin(),
        );
        let right = (
            self.x + SHIP_WING * right_rad.cos(),
            self.y - SHIP_WING * right_rad.sin(),
        );
        [tip, left, right]
    }

    /// Render pass; `blink_ms` drives the invulnerability flicker and may be
    /// any steadily advancing clock.
    pub fn draw(&self, canvas: &mut dyn Canvas, blink_ms: f64) {
        if !self.spawned {
            return;
        }
        if self.invulnerable && (blink_ms / 100.0) as i64 % 2 == 0 {
            return;
        }

        let [tip, left, right] = self.polygon();
        canvas.draw_line(tip, left);
        canvas.draw_line(left, right);
        canvas.draw_line(right, tip);

        if self.thrusting {
            let heading = self.angle.to_radians();
            let flame_offset = 27.0;
            let flame_size = 12.6;
            let base = (
                self.x - flame_offset * heading.cos(),
                self.y + flame_offset * heading.sin(),
            );
            let l_rad = (self.angle + 160.0).to_radians();
            let r_rad = (self.angle - 160.0).to_radians();
            let flame_l = (
                self.x + flame_size * l_rad.cos(),
                self.y - flame_size * l_rad.sin(),
            );
            let flame_r = (
                self.x + flame_size * r_rad.cos(),
                self.y - flame_size * r_rad.sin(),
            );
            canvas.fill_polygon(&[flame_l, base, flame_r]);
        }
    }
}
