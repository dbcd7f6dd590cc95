//! Asteroid field. Each asteroid carries a randomized outline generated at
//! spawn (local-space offsets) and a slow spin; large rocks split into two
//! mediums, mediums into two smalls, smalls vanish.

use crate::constants::{
    ASTEROID_OUTLINE_POINTS, ASTEROID_RADIUS_LARGE, ASTEROID_RADIUS_MEDIUM, ASTEROID_RADIUS_SMALL,
    ASTEROID_SAFE_SPAWN_DIST, ASTEROID_VELOCITY_JITTER, BURST_ASTEROID, NOMINAL_FPS, SHIP_RADIUS,
    SCORE_LARGE_ASTEROID, SCORE_MEDIUM_ASTEROID, SCORE_SMALL_ASTEROID, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::bullets::BulletManager;
use crate::explosions::ExplosionManager;
use crate::geometry::{distance, point_in_polygon, polygons_collide, wrap_position, Point};
use crate::rng::SeededRng;
use crate::services::{AudioDirector, Canvas, SoundCue};
use crate::ship::Ship;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f64 {
        match self {
            AsteroidSize::Large => ASTEROID_RADIUS_LARGE,
            AsteroidSize::Medium => ASTEROID_RADIUS_MEDIUM,
            AsteroidSize::Small => ASTEROID_RADIUS_SMALL,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => SCORE_LARGE_ASTEROID,
            AsteroidSize::Medium => SCORE_MEDIUM_ASTEROID,
            AsteroidSize::Small => SCORE_SMALL_ASTEROID,
        }
    }

    /// Size of the fragments a destroyed rock splits into, if any.
    pub fn child(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub size: AsteroidSize,
    /// Local-space outline offsets, fixed at spawn.
    shape: Vec<Point>,
    /// Current spin angle in degrees.
    rotation_deg: f64,
    rot_speed_deg: f64,
    /// Radius of the outline's farthest vertex, for broad-phase culling.
    pub bounding_radius: f64,
    pub alive: bool,
}

impl Asteroid {
    /// Outline in world space at the current spin angle.
    pub fn world_polygon(&self) -> Vec<Point> {
        let rad = self.rotation_deg.to_radians();
        let (cos_a, sin_a) = (rad.cos(), rad.sin());
        self.shape
            .iter()
            .map(|&(px, py)| {
                (
                    self.x + px * cos_a - py * sin_a,
                    self.y + px * sin_a + py * cos_a,
                )
            })
            .collect()
    }
}

fn make_shape(rng: &mut SeededRng, radius: f64) -> Vec<Point> {
    let step = std::f64::consts::TAU / ASTEROID_OUTLINE_POINTS as f64;
    (0..ASTEROID_OUTLINE_POINTS)
        .map(|i| {
            let angle = i as f64 * step + rng.range_f64(-0.25, 0.25);
            // One in five vertices gets a wider wobble band.
            let variation = if rng.chance(0.2) {
                rng.range_f64(-0.6, 0.6)
            } else {
                rng.range_f64(-0.4, 0.4)
            };
            let r = radius * (1.0 + variation);
            (r * angle.cos(), r * angle.sin())
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct AsteroidManager {
    pub(crate) asteroids: Vec<Asteroid>,
}

impl AsteroidManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter()
    }

    pub fn clear(&mut self) {
        self.asteroids.clear();
    }

    /// Build a rock at (x, y), inheriting the parent's velocity when
    /// spawned as a fragment.
    pub fn spawn_asteroid(
        rng: &mut SeededRng,
        size: AsteroidSize,
        x: f64,
        y: f64,
        parent_vel: (f64, f64),
    ) -> Asteroid {
        let vel_x = parent_vel.0 + rng.range_f64(-ASTEROID_VELOCITY_JITTER, ASTEROID_VELOCITY_JITTER);
        let vel_y = parent_vel.1 + rng.range_f64(-ASTEROID_VELOCITY_JITTER, ASTEROID_VELOCITY_JITTER);
        let shape = make_shape(rng, size.radius());
        let rot_speed_deg = {
            let base = rng.range_f64(-0.6, 0.6);
            // Occasional fast spinner.
            if rng.chance(0.2) {
                base * if rng.chance(0.5) { 2.0 } else { 3.0 }
            } else {
                base
            }
        };
        let bounding_radius = shape
            .iter()
            .map(|&(px, py)| (px * px + py * py).sqrt())
            .fold(0.0, f64::max);
        Asteroid {
            x,
            y,
            vel_x,
            vel_y,
            size,
            shape,
            rotation_deg: 0.0,
            rot_speed_deg,
            bounding_radius,
            alive: true,
        }
    }

    /// Spawn at a random spot at least `ASTEROID_SAFE_SPAWN_DIST` from the
    /// ship, rerolling until clear.
    pub fn spawn_safe(
        rng: &mut SeededRng,
        size: AsteroidSize,
        ship_x: f64,
        ship_y: f64,
    ) -> Asteroid {
        loop {
            let x = rng.range_f64(0.0, WORLD_WIDTH);
            let y = rng.range_f64(0.0, WORLD_HEIGHT);
            if distance((x, y), (ship_x, ship_y)) > ASTEROID_SAFE_SPAWN_DIST {
                return Self::spawn_asteroid(rng, size, x, y, (0.0, 0.0));
            }
        }
    }

    /// Populate a fresh wave: `floor((3 + wave) * 1.3)` large rocks away
    /// from the ship.
    pub fn start_wave(&mut self, rng: &mut SeededRng, wave_count: u32, ship_x: f64, ship_y: f64) {
        let count = ((3 + wave_count) as f64 * 1.3) as usize;
        for _ in 0..count {
            self.asteroids
                .push(Self::spawn_safe(rng, AsteroidSize::Large, ship_x, ship_y));
        }
    }

    pub fn update(&mut self, dt: f64) {
        let scale = dt * NOMINAL_FPS;
        for ast in &mut self.asteroids {
            (ast.x, ast.y) = wrap_position(ast.x + ast.vel_x * scale, ast.y + ast.vel_y * scale);
            ast.rotation_deg += ast.rot_speed_deg * scale;
        }
    }

    /// Resolve bullet hits. Each bullet kills at most one rock; fragments
    /// spawned this pass are not hit-tested until the next tick.
    pub fn handle_bullet_collisions(
        &mut self,
        rng: &mut SeededRng,
        bullets: &mut BulletManager,
        explosions: &mut ExplosionManager,
        audio: &mut AudioDirector,
    ) -> u32 {
        let mut scored = 0;
        let mut children: Vec<Asteroid> = Vec::new();

        for bullet in &mut bullets.bullets {
            if !bullet.alive {
                continue;
            }
            for ast in &mut self.asteroids {
                if !ast.alive {
                    continue;
                }
                if distance((bullet.x, bullet.y), (ast.x, ast.y)) >= ast.bounding_radius {
                    continue;
                }
                if !point_in_polygon(bullet.x, bullet.y, &ast.world_polygon()) {
                    continue;
                }
                explosions.spawn_burst(rng, ast.x, ast.y, BURST_ASTEROID);
                audio.play(SoundCue::Explosion);
                scored += ast.size.score();
                if let Some(child) = ast.size.child() {
                    for _ in 0..2 {
                        children.push(Self::spawn_asteroid(
                            rng,
                            child,
                            ast.x,
                            ast.y,
                            (ast.vel_x, ast.vel_y),
                        ));
                    }
                }
                ast.alive = false;
                bullet.alive = false;
                break;
            }
        }

        self.asteroids.retain(|a| a.alive);
        bullets.bullets.retain(|b| b.alive);
        self.asteroids.extend(children);
        scored
    }

    /// True when any rock overlaps a vulnerable ship.
    pub fn ship_collides(&self, ship: &Ship) -> bool {
        if !ship.is_vulnerable() {
            return false;
        }
        let ship_poly = ship.polygon();
        self.asteroids.iter().any(|ast| {
            distance((ship.x, ship.y), (ast.x, ast.y)) < SHIP_RADIUS + ast.bounding_radius
                && polygons_collide(&ship_poly, &ast.world_polygon())
        })
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for ast in &self.asteroids {
            canvas.draw_polygon(&ast.world_polygon());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::NullAudio;

    const DT: f64 = 1.0 / 60.0;

    fn audio() -> AudioDirector {
        AudioDirector::new(Box::new(NullAudio))
    }

    fn rng() -> SeededRng {
        SeededRng::new(0x5EED)
    }

    fn bullet_at(x: f64, y: f64) -> crate::bullets::Bullet {
        crate::bullets::Bullet {
            x,
            y,
            vel_x: 0.0,
            vel_y: 0.0,
            alive: true,
        }
    }

    #[test]
    fn wave_count_follows_formula() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        mgr.start_wave(&mut rng, 0, 960.0, 540.0);
        assert_eq!(mgr.len(), 3); // floor(3 * 1.3)

        mgr.clear();
        mgr.start_wave(&mut rng, 4, 960.0, 540.0);
        assert_eq!(mgr.len(), 9); // floor(7 * 1.3)
    }

    #[test]
    fn safe_spawn_keeps_distance_from_ship() {
        let mut rng = rng();
        for _ in 0..50 {
            let ast = AsteroidManager::spawn_safe(&mut rng, AsteroidSize::Large, 960.0, 540.0);
            assert!(distance((ast.x, ast.y), (960.0, 540.0)) > ASTEROID_SAFE_SPAWN_DIST);
        }
    }

    #[test]
    fn outline_stays_near_nominal_radius() {
        let mut rng = rng();
        let ast =
            AsteroidManager::spawn_asteroid(&mut rng, AsteroidSize::Large, 0.0, 0.0, (0.0, 0.0));
        assert_eq!(ast.world_polygon().len(), ASTEROID_OUTLINE_POINTS);
        assert!(ast.bounding_radius <= ASTEROID_RADIUS_LARGE * 1.6 + 1e-9);
        assert!(ast.bounding_radius >= ASTEROID_RADIUS_LARGE * 0.4);
    }

    #[test]
    fn large_splits_into_two_mediums() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut bullets = BulletManager::new();
        let mut explosions = ExplosionManager::new();
        let mut audio = audio();

        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Large,
            500.0,
            500.0,
            (0.0, 0.0),
        ));
        bullets.bullets.push(bullet_at(500.0, 500.0));

        let score =
            mgr.handle_bullet_collisions(&mut rng, &mut bullets, &mut explosions, &mut audio);
        assert_eq!(score, SCORE_LARGE_ASTEROID);
        assert_eq!(mgr.len(), 2);
        assert!(mgr.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
        assert!(bullets.is_empty());
        assert_eq!(explosions.burst_count(), 1);
    }

    #[test]
    fn medium_splits_into_two_smalls() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut bullets = BulletManager::new();
        let mut explosions = ExplosionManager::new();
        let mut audio = audio();

        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Medium,
            500.0,
            500.0,
            (0.0, 0.0),
        ));
        bullets.bullets.push(bullet_at(500.0, 500.0));

        let score =
            mgr.handle_bullet_collisions(&mut rng, &mut bullets, &mut explosions, &mut audio);
        assert_eq!(score, SCORE_MEDIUM_ASTEROID);
        assert_eq!(mgr.len(), 2);
        assert!(mgr.asteroids.iter().all(|a| a.size == AsteroidSize::Small));
        assert!(bullets.is_empty());
    }

    #[test]
    fn small_asteroid_leaves_no_fragments() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut bullets = BulletManager::new();
        let mut explosions = ExplosionManager::new();
        let mut audio = audio();

        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Small,
            300.0,
            300.0,
            (0.0, 0.0),
        ));
        bullets.bullets.push(bullet_at(300.0, 300.0));

        let score =
            mgr.handle_bullet_collisions(&mut rng, &mut bullets, &mut explosions, &mut audio);
        assert_eq!(score, SCORE_SMALL_ASTEROID);
        assert!(mgr.is_empty());
    }

    #[test]
    fn one_bullet_kills_at_most_one_rock() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut bullets = BulletManager::new();
        let mut explosions = ExplosionManager::new();
        let mut audio = audio();

        // Two small rocks stacked at the same point.
        for _ in 0..2 {
            mgr.asteroids.push(AsteroidManager::spawn_asteroid(
                &mut rng,
                AsteroidSize::Small,
                400.0,
                400.0,
                (0.0, 0.0),
            ));
        }
        bullets.bullets.push(bullet_at(400.0, 400.0));

        let score =
            mgr.handle_bullet_collisions(&mut rng, &mut bullets, &mut explosions, &mut audio);
        assert_eq!(score, SCORE_SMALL_ASTEROID);
        assert_eq!(mgr.len(), 1);
    }

    #[test]
    fn invulnerable_ship_never_collides() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut audio = audio();
        let mut ship = Ship::new();
        ship.trigger_respawn(0.0, 0.0, 10_000.0, &mut audio);
        ship.update(DT, 0.0);
        assert!(ship.invulnerable);

        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Large,
            ship.x,
            ship.y,
            (0.0, 0.0),
        ));
        assert!(!mgr.ship_collides(&ship));
    }

    #[test]
    fn overlapping_rock_hits_vulnerable_ship() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut audio = audio();
        let mut ship = Ship::new();
        ship.trigger_respawn(0.0, 0.0, 0.0, &mut audio);
        ship.update(DT, 0.0);
        assert!(ship.is_vulnerable());

        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Large,
            ship.x,
            ship.y,
            (0.0, 0.0),
        ));
        assert!(mgr.ship_collides(&ship));

        mgr.clear();
        mgr.asteroids.push(AsteroidManager::spawn_asteroid(
            &mut rng,
            AsteroidSize::Small,
            ship.x + 500.0,
            ship.y,
            (0.0, 0.0),
        ));
        assert!(!mgr.ship_collides(&ship));
    }

    #[test]
    fn rocks_wrap_around_edges() {
        let mut rng = rng();
        let mut mgr = AsteroidManager::new();
        let mut ast =
            AsteroidManager::spawn_asteroid(&mut rng, AsteroidSize::Large, WORLD_WIDTH - 1.0, 10.0, (0.0, 0.0));
        ast.vel_x = 5.0;
        ast.vel_y = 0.0;
        mgr.asteroids.push(ast);
        mgr.update(DT);
        let a = &mgr.asteroids[0];
        assert!(a.x >= 0.0 && a.x < WORLD_WIDTH);
    }
}
