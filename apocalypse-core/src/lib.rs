//! Headless simulation core for Asteroids: Apocalypse.
//!
//! The crate owns everything deterministic: entity motion on a toroidal
//! plane, collision resolution, scoring, wave progression, and the game
//! state machine. Anything host-facing (rendering, audio output, key
//! scanning, high-score storage) enters through the traits in
//! [`services`], so the same world runs under a windowed front end, the
//! autopilot harness, or a unit test without modification.
//!
//! Determinism contract: two worlds built with the same seed and fed the
//! same `(dt, InputFrame)` sequence produce bit-identical trajectories.
//! All randomness flows through the single [`rng::SeededRng`] owned by
//! [`world::World`]; nothing reads wall-clock time.

pub mod asteroids;
pub mod black_hole;
pub mod bullets;
pub mod constants;
pub mod explosions;
pub mod geometry;
pub mod input;
pub mod missiles;
pub mod rng;
pub mod services;
pub mod ship;
pub mod ufo;
pub mod world;

pub use input::InputFrame;
pub use rng::SeededRng;
pub use services::{AudioSink, Canvas, HighScoreStore, LoopCue, SoundCue};
pub use world::{GameState, World};
