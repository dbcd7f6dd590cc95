//! Gameplay tunables.
//!
//! Velocities and per-tick impulses are tuned for 60 updates/second; motion
//! code multiplies by `dt * NOMINAL_FPS` so the simulation stays correct at
//! other tick rates. Durations are simulation-clock milliseconds.

// World dimensions (toroidal plane)
pub const WORLD_WIDTH: f64 = 1920.0;
pub const WORLD_HEIGHT: f64 = 1080.0;
pub const NOMINAL_FPS: f64 = 60.0;

// Starting state
pub const STARTING_LIVES: i32 = 3;
pub const STAR_COUNT: usize = 180;

// Ship
pub const SHIP_RADIUS: f64 = 36.0;
pub const SHIP_LENGTH: f64 = 36.0;
pub const SHIP_WING: f64 = 18.0;
pub const SHIP_TURN_STEP_DEG: f64 = 3.0;
pub const SHIP_THRUST: f64 = 0.18;
pub const SHIP_FRICTION: f64 = 0.99;
pub const SHIP_MAX_SPEED: f64 = 9.9;
pub const RESPAWN_DELAY_MS: f64 = 2_000.0;
pub const RESPAWN_INVULN_MS: f64 = 5_000.0;

// Bullets (frame-denominated counters, decremented by dt * NOMINAL_FPS)
pub const BULLET_SPEED: f64 = 10.8;
pub const BULLET_COOLDOWN_FRAMES: f64 = 15.0;
pub const BULLET_RAPID_COOLDOWN_FRAMES: f64 = 5.0;
pub const SHOOT_GRACE_FRAMES: f64 = 15.0;

// Asteroids
pub const ASTEROID_RADIUS_LARGE: f64 = 54.0;
pub const ASTEROID_RADIUS_MEDIUM: f64 = 36.0;
pub const ASTEROID_RADIUS_SMALL: f64 = 18.0;
pub const ASTEROID_OUTLINE_POINTS: usize = 12;
pub const ASTEROID_VELOCITY_JITTER: f64 = 1.17;
pub const ASTEROID_SAFE_SPAWN_DIST: f64 = 180.0;

// UFO
pub const UFO_SPAWN_CHANCE: f64 = 0.001;
pub const UFO_WIDTH: f64 = 108.0;
pub const UFO_HEIGHT: f64 = 36.0;
pub const UFO_HEALTH: i32 = 5;
pub const UFO_HULL_RADIUS: f64 = 45.0;
pub const UFO_TURN_RATE: f64 = 0.02;
pub const UFO_BASE_SPEED: f64 = 1.0;
pub const UFO_DETECTION_RADIUS: f64 = 225.0;
pub const UFO_TRACTOR_PULL: f64 = 0.09;
pub const UFO_MISSILE_FIRE_CHANCE: f64 = 0.0006;

// Missiles
pub const MISSILE_LIFETIME_MS: f64 = 15_000.0;
pub const MISSILE_INITIAL_SPEED: f64 = 1.08;
pub const MISSILE_ACCEL: f64 = 0.005;
pub const MISSILE_MAX_SPEED: f64 = 4.0;
pub const MISSILE_TURN_RATE: f64 = 0.5;
pub const MISSILE_HIT_RADIUS: f64 = 18.0;
pub const MISSILE_BODY_RADIUS: f64 = 14.4;

// Black hole
pub const BLACK_HOLE_SPAWN_CHANCE: f64 = 0.0005;
pub const BLACK_HOLE_RADIUS: f64 = 90.0;
pub const BLACK_HOLE_DRIFT_SPEED: f64 = 0.09;
pub const BLACK_HOLE_FADE_IN_MS: f64 = 2_000.0;
pub const BLACK_HOLE_ACTIVE_MS: f64 = 11_000.0;
pub const BLACK_HOLE_FADE_OUT_MS: f64 = 2_000.0;
pub const BLACK_HOLE_GRACE_MS: f64 = 1_000.0;
pub const BLACK_HOLE_INVULN_MS: f64 = 10_000.0;
pub const BLACK_HOLE_RAPID_FIRE_MS: f64 = 10_000.0;

// Scoring
pub const SCORE_LARGE_ASTEROID: u32 = 20;
pub const SCORE_MEDIUM_ASTEROID: u32 = 50;
pub const SCORE_SMALL_ASTEROID: u32 = 100;
pub const SCORE_UFO: u32 = 200;
pub const SCORE_MISSILE: u32 = 500;

// Explosions (particle counts per destruction event)
pub const BURST_ASTEROID: usize = 8;
pub const BURST_MISSILE: usize = 10;
pub const BURST_UFO_HIT: usize = 3;
pub const BURST_UFO_KILL: usize = 20;
pub const BURST_SHIP: usize = 30;

// HUD / menus
pub const WAVE_BANNER_MS: f64 = 1_500.0;
pub const PAUSE_NAV_REPEAT_MS: f64 = 200.0;
