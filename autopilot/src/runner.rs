//! Fixed-step run loop: one pilot, one seed, 60 ticks per simulated
//! second, until game over or the frame cap.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use apocalypse_core::services::{HighScoreStore, NullHighScoreStore};
use apocalypse_core::{GameState, InputFrame, World};

use crate::pilots::create_pilot;
use crate::util::seed_to_hex;

pub const TICK_DT: f64 = 1.0 / 60.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub seed_hex: String,
    pub max_frames: u32,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub final_wave: u32,
    pub game_over: bool,
    pub action_frames: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
}

/// Run a pilot headless with no persistence.
pub fn run_pilot(pilot_id: &str, seed: u32, max_frames: u32) -> Result<RunMetrics> {
    run_pilot_with_store(pilot_id, seed, max_frames, Box::new(NullHighScoreStore))
}

/// Run a pilot against a real high-score store, so a record run persists
/// the same way a played session would.
pub fn run_pilot_with_store(
    pilot_id: &str,
    seed: u32,
    max_frames: u32,
    store: Box<dyn HighScoreStore>,
) -> Result<RunMetrics> {
    let mut pilot = create_pilot(pilot_id)
        .ok_or_else(|| anyhow!("unknown pilot '{pilot_id}'"))?;

    let mut world = World::new(seed, Box::new(apocalypse_core::services::NullAudio), store);
    world.handle_input(&InputFrame {
        start: true,
        ..InputFrame::default()
    });

    let mut frame_count = 0;
    let mut action_frames = 0;
    let mut turn_frames = 0;
    let mut thrust_frames = 0;
    let mut fire_frames = 0;

    while world.state() == GameState::Playing && frame_count < max_frames {
        let input = pilot.decide(&world, frame_count);
        if input != InputFrame::default() {
            action_frames += 1;
        }
        if input.left || input.right {
            turn_frames += 1;
        }
        if input.thrust {
            thrust_frames += 1;
        }
        if input.fire {
            fire_frames += 1;
        }

        world.handle_input(&input);
        world.update(TICK_DT);
        frame_count += 1;
    }

    Ok(RunMetrics {
        pilot_id: pilot_id.to_string(),
        seed,
        seed_hex: seed_to_hex(seed),
        max_frames,
        frame_count,
        final_score: world.score(),
        final_lives: world.lives(),
        final_wave: world.wave_count(),
        game_over: world.state() == GameState::GameOver,
        action_frames,
        turn_frames,
        thrust_frames,
        fire_frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pilot_is_an_error() {
        let err = run_pilot("no-such-pilot", 1, 60).unwrap_err();
        assert!(err.to_string().contains("no-such-pilot"));
    }

    #[test]
    fn frame_cap_is_respected() {
        let metrics = run_pilot("idle", 7, 120).unwrap();
        assert!(metrics.frame_count <= 120);
        assert_eq!(metrics.max_frames, 120);
        assert_eq!(metrics.action_frames, 0);
    }

    #[test]
    fn turret_counts_its_input_frames() {
        let metrics = run_pilot("turret", 7, 300).unwrap();
        assert_eq!(metrics.action_frames, metrics.frame_count);
        assert_eq!(metrics.turn_frames, metrics.frame_count);
        assert_eq!(metrics.fire_frames, metrics.frame_count);
        assert_eq!(metrics.thrust_frames, 0);
    }

    #[test]
    fn same_seed_same_metrics() {
        let a = run_pilot("drifter", 0xFEED, 3_600).unwrap();
        let b = run_pilot("drifter", 0xFEED, 3_600).unwrap();
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.frame_count, b.frame_count);
        assert_eq!(a.final_lives, b.final_lives);
        assert_eq!(a.final_wave, b.final_wave);
    }
}
