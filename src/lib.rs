//! Portal Worlds - challenge engine for a three-world educational platformer
//!
//! Core modules:
//! - `challenge`: The nine challenge variants and their problem generators
//! - `session`: Session controller, lives/credits economy, timed transitions
//! - `world`: World/progression and companion collaborator contracts
//! - `renderer`: 2D draw surface abstraction (the host owns the canvas)
//! - `input`: Normalized keyboard/pointer events
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod challenge;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod tuning;
pub mod world;

pub use challenge::{Challenge, ChallengeKind, Family};
pub use session::{ChallengeSession, Economy, Hooks, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;
pub use world::{ChallengeZone, World, WorldProgression};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size. Pointer input is normalized into this space.
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;
    pub const CANVAS_CENTER_X: f32 = CANVAS_WIDTH / 2.0;

    /// Economy defaults
    pub const MAX_LIVES: u8 = 3;
    pub const HINT_COST: u32 = 1;
    /// Wrong answers in a row that fail a question/answer challenge
    pub const MISTAKE_CAP: u8 = 3;

    /// Post-round display countdowns (seconds)
    pub const SUCCESS_DISPLAY_SECS: f32 = 1.5;
    pub const FAIL_DISPLAY_SECS: f32 = 1.5;
    pub const TRY_AGAIN_SECS: f32 = 3.0;

    /// Feedback banner durations (seconds)
    pub const FEEDBACK_CORRECT_SECS: f32 = 1.0;
    pub const FEEDBACK_WRONG_SECS: f32 = 1.5;
    /// Panel shake frames after a wrong answer
    pub const SHAKE_FRAMES: u32 = 8;

    /// Largest frame delta fed to the reaction sub-simulations
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Axis-aligned rectangle in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Inclusive hit test (edges count as inside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Copy shifted horizontally (used for panel shake)
    pub fn offset_x(&self, dx: f32) -> Self {
        Self::new(self.x + dx, self.y, self.w, self.h)
    }
}
