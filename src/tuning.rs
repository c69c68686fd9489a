//! Data-driven game balance
//!
//! Every gameplay constant the engine uses can be overridden from JSON.
//! Missing fields take their defaults, so a tuning file only needs the values
//! it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Click Battle balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickRaceTuning {
    /// Race window in seconds
    pub duration_secs: f32,
    /// Rival clicks per second
    pub rival_rate: f32,
}

impl Default for ClickRaceTuning {
    fn default() -> Self {
        Self {
            duration_secs: 5.0,
            rival_rate: 6.0,
        }
    }
}

/// Lightning Catch balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchTuning {
    pub rounds: u32,
    pub wins_to_pass: u32,
    /// Random delay before the bolt appears
    pub min_wait_secs: f32,
    pub max_wait_secs: f32,
    /// Rival speed toward the bolt (px/s)
    pub rival_speed: f32,
    /// Rival claims the bolt inside this distance
    pub rival_reach_radius: f32,
    /// Player click must land inside this distance of the bolt
    pub click_radius: f32,
    /// Pause after a round before the next starts
    pub win_pause_secs: f32,
    pub loss_pause_secs: f32,
}

impl Default for CatchTuning {
    fn default() -> Self {
        Self {
            rounds: 5,
            wins_to_pass: 3,
            min_wait_secs: 1.0,
            max_wait_secs: 3.0,
            rival_speed: 300.0,
            rival_reach_radius: 30.0,
            click_radius: 55.0,
            win_pause_secs: 0.8,
            loss_pause_secs: 1.0,
        }
    }
}

/// Rhythm Drums balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhythmTuning {
    pub total_markers: u32,
    pub pass_hits: u32,
    pub spawn_interval_secs: f32,
    /// Scroll speed (px/s, leftward)
    pub speed: f32,
    pub spawn_x: f32,
    pub hit_line_x: f32,
    /// Accepted distance from the hit line (px)
    pub hit_window: f32,
    /// Markers left of this are removed
    pub despawn_x: f32,
}

impl Default for RhythmTuning {
    fn default() -> Self {
        Self {
            total_markers: 16,
            pass_hits: 12,
            spawn_interval_secs: 0.5,
            speed: 120.0,
            spawn_x: 850.0,
            hit_line_x: 180.0,
            hit_window: 40.0,
            despawn_x: -60.0,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub mistake_cap: u8,
    pub success_display_secs: f32,
    pub fail_display_secs: f32,
    pub try_again_secs: f32,
    pub click_race: ClickRaceTuning,
    pub catch: CatchTuning,
    pub rhythm: RhythmTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mistake_cap: MISTAKE_CAP,
            success_display_secs: SUCCESS_DISPLAY_SECS,
            fail_display_secs: FAIL_DISPLAY_SECS,
            try_again_secs: TRY_AGAIN_SECS,
            click_race: ClickRaceTuning::default(),
            catch: CatchTuning::default(),
            rhythm: RhythmTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse `json` if present, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Some(Err(err)) => {
                log::warn!("Ignoring tuning file: {}", err);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Reject values that would make a challenge unwinnable or instant
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.mistake_cap == 0 {
            return invalid("mistake_cap", "must be at least 1");
        }
        if self.success_display_secs <= 0.0 {
            return invalid("success_display_secs", "must be positive");
        }
        if self.fail_display_secs <= 0.0 {
            return invalid("fail_display_secs", "must be positive");
        }
        if self.try_again_secs <= 0.0 {
            return invalid("try_again_secs", "must be positive");
        }
        if self.click_race.duration_secs <= 0.0 {
            return invalid("click_race.duration_secs", "must be positive");
        }
        if self.catch.rounds == 0 || self.catch.wins_to_pass > self.catch.rounds {
            return invalid("catch.wins_to_pass", "must be within 1..=rounds");
        }
        if self.catch.min_wait_secs > self.catch.max_wait_secs {
            return invalid("catch.min_wait_secs", "must not exceed max_wait_secs");
        }
        if self.catch.rival_speed <= 0.0 {
            return invalid("catch.rival_speed", "must be positive");
        }
        if self.catch.rival_reach_radius <= 0.0 {
            return invalid("catch.rival_reach_radius", "must be positive");
        }
        if self.catch.click_radius <= 0.0 {
            return invalid("catch.click_radius", "must be positive");
        }
        if self.rhythm.total_markers == 0 || self.rhythm.pass_hits > self.rhythm.total_markers {
            return invalid("rhythm.pass_hits", "must be within 1..=total_markers");
        }
        if self.rhythm.speed <= 0.0 || self.rhythm.spawn_interval_secs <= 0.0 {
            return invalid("rhythm.speed", "speed and spawn interval must be positive");
        }
        if self.rhythm.hit_window < 0.0 {
            return invalid("rhythm.hit_window", "must not be negative");
        }
        // Markers must be counted as missed before they are removed
        if self.rhythm.despawn_x >= self.rhythm.hit_line_x - self.rhythm.hit_window {
            return invalid("rhythm.despawn_x", "must lie left of the hit window");
        }
        Ok(())
    }
}
