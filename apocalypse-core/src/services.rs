//! Collaborator traits for everything the simulation does not own:
//! rasterization, audio playback, and high-score persistence. The core hands
//! these world-space geometry, fire-and-forget cues, and a single scalar; it
//! never touches a display, a mixer, or the filesystem itself. Null
//! implementations keep the whole engine runnable headless.

use crate::geometry::Point;

// ── Rendering ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Large,
    SemiLarge,
    Regular,
    Tiny,
}

/// Draw target. All coordinates are world-space; rasterization, color and
/// font handling live behind this trait.
pub trait Canvas {
    fn clear(&mut self);
    fn draw_point(&mut self, at: Point);
    fn draw_line(&mut self, a: Point, b: Point);
    /// Open path (tractor waves, black-hole spiral).
    fn draw_polyline(&mut self, points: &[Point]);
    /// Closed outline.
    fn draw_polygon(&mut self, points: &[Point]);
    fn fill_polygon(&mut self, points: &[Point]);
    fn draw_circle(&mut self, center: Point, radius: f64);
    fn fill_circle(&mut self, center: Point, radius: f64);
    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64);
    /// Text centered on `at`.
    fn draw_text(&mut self, text: &str, at: Point, size: TextSize);
    /// Opacity hint for subsequent draws, in [0, 1]. Optional.
    fn set_alpha(&mut self, _alpha: f64) {}
}

/// Discards every draw call.
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self) {}
    fn draw_point(&mut self, _at: Point) {}
    fn draw_line(&mut self, _a: Point, _b: Point) {}
    fn draw_polyline(&mut self, _points: &[Point]) {}
    fn draw_polygon(&mut self, _points: &[Point]) {}
    fn fill_polygon(&mut self, _points: &[Point]) {}
    fn draw_circle(&mut self, _center: Point, _radius: f64) {}
    fn fill_circle(&mut self, _center: Point, _radius: f64) {}
    fn draw_ellipse(&mut self, _center: Point, _rx: f64, _ry: f64) {}
    fn draw_text(&mut self, _text: &str, _at: Point, _size: TextSize) {}
}

// ── Audio ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Laser,
    Explosion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCue {
    Thruster,
    Ufo,
    Missile,
    BlackHole,
}

const LOOP_CUE_COUNT: usize = 4;

impl LoopCue {
    fn index(self) -> usize {
        match self {
            LoopCue::Thruster => 0,
            LoopCue::Ufo => 1,
            LoopCue::Missile => 2,
            LoopCue::BlackHole => 3,
        }
    }
}

/// Playback backend. One voice per loop category; the director below
/// guarantees start/stop are only forwarded on actual state changes.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn start_loop(&mut self, cue: LoopCue);
    fn stop_loop(&mut self, cue: LoopCue);
}

pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
    fn start_loop(&mut self, _cue: LoopCue) {}
    fn stop_loop(&mut self, _cue: LoopCue) {}
}

/// Tracks which loop cues are live so that repeated start/stop triggers from
/// the simulation are idempotent at the sink.
pub struct AudioDirector {
    sink: Box<dyn AudioSink>,
    looping: [bool; LOOP_CUE_COUNT],
}

impl AudioDirector {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            looping: [false; LOOP_CUE_COUNT],
        }
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.sink.play(cue);
    }

    pub fn start_loop(&mut self, cue: LoopCue) {
        let slot = &mut self.looping[cue.index()];
        if !*slot {
            *slot = true;
            self.sink.start_loop(cue);
        }
    }

    pub fn stop_loop(&mut self, cue: LoopCue) {
        let slot = &mut self.looping[cue.index()];
        if *slot {
            *slot = false;
            self.sink.stop_loop(cue);
        }
    }

    pub fn stop_all_loops(&mut self) {
        for cue in [
            LoopCue::Thruster,
            LoopCue::Ufo,
            LoopCue::Missile,
            LoopCue::BlackHole,
        ] {
            self.stop_loop(cue);
        }
    }

    pub fn is_looping(&self, cue: LoopCue) -> bool {
        self.looping[cue.index()]
    }
}

// ── Persistence ─────────────────────────────────────────────────────

/// External high-score record. `load` must default to 0 when the backing
/// record is missing or unreadable; `save` is best-effort.
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, high_score: u32);
}

pub struct NullHighScoreStore;

impl HighScoreStore for NullHighScoreStore {
    fn load(&mut self) -> u32 {
        0
    }

    fn save(&mut self, _high_score: u32) {}
}
