//! Audio cue contract
//!
//! Sound synthesis lives in the host. The engine only names the cue to play;
//! a missing audio backend changes nothing in game logic.

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A sub-answer or round was correct
    Correct,
    /// A sub-answer, submission, or round was wrong
    Wrong,
    /// Soft hit feedback (rhythm markers)
    Tap,
    /// Challenge solved
    SuccessFanfare,
    /// Challenge overlay opened
    ZoneEntry,
    /// Last zone in the world solved, portal opened
    PortalUnlock,
    /// Companion acknowledged a hint request
    Bark,
}

/// Fire-and-forget audio sink
pub trait AudioCues {
    fn play(&mut self, cue: SoundCue);
}

/// Audio sink that records cues (headless runs and tests)
#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: Vec<SoundCue>,
    pub muted: bool,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AudioCues for CueLog {
    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        log::debug!("cue: {:?}", cue);
        self.cues.push(cue);
    }
}
