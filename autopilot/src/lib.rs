//! Headless harness around `apocalypse-core`: scripted pilots, a fixed-step
//! runner, a multi-seed benchmark, and the JSON high-score store the game
//! persists through.

pub mod benchmark;
pub mod highscore;
pub mod pilots;
pub mod runner;
pub mod util;
