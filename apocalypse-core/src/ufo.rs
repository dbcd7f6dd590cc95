//! The UFO: a slow pursuer that enters from a screen edge, tracks the ship
//! with a clamped turn rate, drags the ship in with a tractor cone, and
//! launches homing missiles. At most one is alive at a time; collision
//! resolution against bullets and the ship lives in the world pass.

use crate::constants::{
    NOMINAL_FPS, UFO_BASE_SPEED, UFO_DETECTION_RADIUS, UFO_HEALTH, UFO_HEIGHT, UFO_TURN_RATE,
    UFO_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::geometry::{shortest_angle_diff, wrap_position, Point};
use crate::rng::SeededRng;
use crate::services::Canvas;

#[derive(Debug, Clone)]
pub struct Ufo {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, screen convention (+y down).
    pub angle: f64,
    pub health: i32,
    rib_offset: f64,
    tractor_wave_offset: f64,
}

impl Ufo {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            angle: 0.0,
            health: UFO_HEALTH,
            rib_offset: 0.0,
            tractor_wave_offset: 0.0,
        }
    }

    /// Enter the field at a random point on a random screen edge.
    pub fn spawn_on_edge(rng: &mut SeededRng) -> Self {
        match rng.next() % 4 {
            0 => Self::new(0.0, rng.range_f64(0.0, WORLD_HEIGHT)),
            1 => Self::new(WORLD_WIDTH, rng.range_f64(0.0, WORLD_HEIGHT)),
            2 => Self::new(rng.range_f64(0.0, WORLD_WIDTH), 0.0),
            _ => Self::new(rng.range_f64(0.0, WORLD_WIDTH), WORLD_HEIGHT),
        }
    }

    /// Steer toward the ship and advance one tick.
    pub fn update(&mut self, dt: f64, ship_x: f64, ship_y: f64) {
        let scale = dt * NOMINAL_FPS;
        let desired = (ship_y - self.y).atan2(ship_x - self.x);
        let max_turn = UFO_TURN_RATE * scale;
        let diff = shortest_angle_diff(self.angle, desired).clamp(-max_turn, max_turn);
        self.angle += diff;

        let vel_x = UFO_BASE_SPEED * self.angle.cos();
        let vel_y = UFO_BASE_SPEED * self.angle.sin();
        (self.x, self.y) = wrap_position(self.x + vel_x * scale, self.y + vel_y * scale);

        self.rib_offset += 0.54 * scale;
        self.tractor_wave_offset += 2.0 * scale;
    }

    /// Collision outline: six points along the lower hull ellipse plus four
    /// on the dome.
    pub fn polygon(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(10);
        for i in 0..6 {
            let angle = std::f64::consts::PI - i as f64 * (std::f64::consts::PI / 5.0);
            points.push((
                self.x + (UFO_WIDTH / 2.0) * angle.cos(),
                self.y + (UFO_HEIGHT / 2.0) * angle.sin(),
            ));
        }
        let dome_cx = self.x;
        let dome_cy = self.y - UFO_HEIGHT / 2.0;
        let dome_r = UFO_HEIGHT / 2.0;
        for i in 0..4 {
            let angle = -std::f64::consts::FRAC_PI_2 - i as f64 * (std::f64::consts::PI / 3.0);
            points.push((dome_cx + dome_r * angle.cos(), dome_cy + dome_r * angle.sin()));
        }
        points
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_ellipse((self.x, self.y), UFO_WIDTH / 2.0, UFO_HEIGHT / 2.0);
        canvas.fill_circle((self.x, self.y - UFO_HEIGHT / 2.0), UFO_HEIGHT / 2.0);

        // Scrolling ribs across the hull, tapered toward the rim.
        let rib_count = 5;
        let rib_spacing = UFO_WIDTH / rib_count as f64;
        let full_height = UFO_HEIGHT / 2.0;
        for i in 0..rib_count {
            let rel_x = -UFO_WIDTH / 2.0 + i as f64 * rib_spacing;
            let rib_x = self.x
                + ((rel_x + self.rib_offset + UFO_WIDTH / 2.0).rem_euclid(UFO_WIDTH)
                    - UFO_WIDTH / 2.0);
            let taper = 0.5 + 0.5 * (1.0 - ((rib_x - self.x) / (UFO_WIDTH / 2.0)).abs());
            let h = full_height * taper;
            canvas.draw_line((rib_x, self.y - h / 2.0), (rib_x, self.y + h / 2.0));
        }
    }

    /// Concentric wave arcs sweeping inward along the cone toward the ship.
    pub fn draw_tractor_beam(&self, canvas: &mut dyn Canvas, ship_x: f64, ship_y: f64) {
        let angle_to_ship = (ship_y - self.y).atan2(ship_x - self.x);
        let half_cone = 22.5_f64.to_radians();
        let num_waves = 5;
        let wave_interval = UFO_DETECTION_RADIUS / num_waves as f64;
        let points_per_wave = 30;

        for i in 0..num_waves {
            let r = UFO_DETECTION_RADIUS
                - (i as f64 * wave_interval + self.tractor_wave_offset.rem_euclid(wave_interval));
            if !(0.0..=UFO_DETECTION_RADIUS).contains(&r) {
                continue;
            }
            let wave: Vec<Point> = (0..points_per_wave)
                .map(|j| {
                    let factor = j as f64 / (points_per_wave - 1) as f64;
                    let cur = angle_to_ship - half_cone + factor * (2.0 * half_cone);
                    (self.x + r * cur.cos(), self.y + r * cur.sin())
                })
                .collect();
            canvas.draw_polyline(&wave);
        }
    }
}
