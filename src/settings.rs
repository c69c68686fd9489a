//! Player preferences
//!
//! Stored by the host as JSON. The engine reads them to decide how much
//! celebration and shake to show.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::particles::MAX_PARTICLES;

/// Errors from decoding stored settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Success confetti
    pub particles: bool,
    /// Confetti pieces per solved challenge
    pub confetti_burst: usize,
    /// Panel shake on wrong answers
    pub screen_shake: bool,
    /// Minimize shake and motion
    pub reduced_motion: bool,
    /// Silence sound cues
    pub sfx_muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            confetti_burst: 60,
            screen_shake: true,
            reduced_motion: false,
            sfx_muted: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Confetti pieces to launch on success, within the global cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.confetti_burst.min(MAX_PARTICLES)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode stored settings, or defaults when absent or unreadable
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(err)) => {
                log::warn!("Using default settings: {}", err);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(Settings::default().effective_screen_shake());
    }

    #[test]
    fn test_particles_off_means_zero_budget() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(Settings::default().max_particles(), 60);
    }

    #[test]
    fn test_burst_budget_is_capped() {
        let settings = Settings::from_json(r#"{ "confetti_burst": 10000 }"#).unwrap();
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
    }

    #[test]
    fn test_load_or_default() {
        let stored = Settings {
            sfx_muted: true,
            ..Default::default()
        }
        .to_json()
        .unwrap();
        assert!(Settings::load_or_default(Some(&stored)).sfx_muted);
        assert_eq!(Settings::load_or_default(Some("oops")), Settings::default());
    }
}
