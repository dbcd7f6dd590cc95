//! Per-tick input record supplied by the frontend.
//!
//! Held flags are sampled key state; `start` and `pause` are edge-triggered
//! by the frontend (one tick per key press). Menu navigation flags are held
//! state — the world applies its own repeat delay while paused.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Edge: start from the menu, or restart after game over.
    pub start: bool,
    /// Edge: toggle pause while playing/paused.
    pub pause: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_confirm: bool,
}

impl InputFrame {
    pub fn held(left: bool, right: bool, thrust: bool, fire: bool) -> Self {
        Self {
            left,
            right,
            thrust,
            fire,
            ..Self::default()
        }
    }
}
