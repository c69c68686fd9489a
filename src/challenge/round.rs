//! Uniform per-challenge progress value
//!
//! Every variant tracks its progress in a `RoundState`. Transitions return a
//! new value instead of mutating in place, so a before/after pair fully
//! describes what an input did.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title card, waiting for the start gesture
    Intro,
    /// Accepting answers / running the sub-simulation
    Active,
    /// Passed (terminal)
    Done,
    /// Failed (terminal)
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    /// Current problem or round; only ever increases
    pub problem_index: u32,
    /// Wrong answers since the last correct one
    pub mistakes: u8,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundState {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Intro,
            problem_index: 0,
            mistakes: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Done | Phase::Failed)
    }

    /// Intro -> Active
    #[must_use]
    pub fn start(self) -> Self {
        match self.phase {
            Phase::Intro => Self {
                phase: Phase::Active,
                ..self
            },
            _ => self,
        }
    }

    /// A correct answer: clear the mistake streak and move on. Completing
    /// the last of `total` problems resolves to `Done`.
    #[must_use]
    pub fn correct(self, total: u32) -> Self {
        if !self.is_active() {
            return self;
        }
        let problem_index = self.problem_index + 1;
        Self {
            phase: if problem_index >= total {
                Phase::Done
            } else {
                Phase::Active
            },
            problem_index,
            mistakes: 0,
        }
    }

    /// A wrong answer. Reaching `cap` mistakes in a row resolves to `Failed`.
    #[must_use]
    pub fn wrong(self, cap: u8) -> Self {
        if !self.is_active() {
            return self;
        }
        let mistakes = self.mistakes.saturating_add(1).min(cap);
        Self {
            phase: if mistakes >= cap {
                Phase::Failed
            } else {
                Phase::Active
            },
            mistakes,
            ..self
        }
    }

    /// Move to the next round without judging it (reaction games)
    #[must_use]
    pub fn advance(self) -> Self {
        if !self.is_active() {
            return self;
        }
        Self {
            problem_index: self.problem_index + 1,
            ..self
        }
    }

    /// Resolve against a threshold evaluated by the variant
    #[must_use]
    pub fn resolve(self, passed: bool) -> Self {
        if !self.is_active() {
            return self;
        }
        Self {
            phase: if passed { Phase::Done } else { Phase::Failed },
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_state_is_unresolved() {
        let state = RoundState::new();
        assert_eq!(state.phase, Phase::Intro);
        assert!(!state.is_done());
        assert!(!state.is_failed());
    }

    #[test]
    fn test_answers_ignored_during_intro() {
        let state = RoundState::new();
        assert_eq!(state.correct(3), state);
        assert_eq!(state.wrong(3), state);
    }

    #[test]
    fn test_correct_resets_mistakes() {
        let state = RoundState::new().start().wrong(3).wrong(3);
        assert_eq!(state.mistakes, 2);
        let state = state.correct(3);
        assert_eq!(state.mistakes, 0);
        assert_eq!(state.problem_index, 1);
        assert!(state.is_active());
    }

    #[test]
    fn test_three_wrong_fails() {
        let state = RoundState::new().start().wrong(3).wrong(3).wrong(3);
        assert!(state.is_failed());
        // Terminal: nothing moves it any more
        assert_eq!(state.correct(3), state);
    }

    #[test]
    fn test_resolve() {
        assert!(RoundState::new().start().resolve(true).is_done());
        assert!(RoundState::new().start().resolve(false).is_failed());
        assert_eq!(RoundState::new().resolve(true).phase, Phase::Intro);
    }

    proptest! {
        #[test]
        fn prop_problem_index_never_decreases(moves in prop::collection::vec(0u8..4, 0..40)) {
            let mut state = RoundState::new().start();
            for m in moves {
                let before = state;
                state = match m {
                    0 => state.correct(5),
                    1 => state.wrong(3),
                    2 => state.advance(),
                    _ => state.start(),
                };
                prop_assert!(state.problem_index >= before.problem_index);
                prop_assert!(state.mistakes <= 3);
                prop_assert!(!(state.is_done() && state.is_failed()));
            }
        }

        #[test]
        fn prop_all_correct_is_done(total in 1u32..10) {
            let mut state = RoundState::new().start();
            for _ in 0..total {
                prop_assert!(!state.is_resolved());
                state = state.correct(total);
            }
            prop_assert!(state.is_done());
        }
    }
}
