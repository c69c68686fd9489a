//! Challenge variants
//!
//! Nine variants in three families. Each is a self-contained state machine:
//! it consumes canvas-space input, advances on an explicit frame delta, draws
//! its own panel and exposes read-only completion signals. Variants never touch
//! the economy; they report scoring through `ChallengeEvent`s that the session
//! turns into credits and sound cues.

pub mod arithmetic;
pub mod deduction;
pub mod generators;
pub mod pattern;
pub mod quiz;
pub mod reaction;
pub mod round;

pub use round::{Phase, RoundState};

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::InputEvent;
use crate::renderer::DrawSurface;
use crate::tuning::Tuning;

/// Challenge family (one per world)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    Arithmetic,
    Deduction,
    Reaction,
}

/// Which variant a zone runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    NumberGnome,
    WitchsCauldron,
    DragonsRiddle,
    CloudSequence,
    OraclesDeduction,
    RuleMachine,
    ClickBattle,
    LightningCatch,
    RhythmDrums,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 9] = [
        ChallengeKind::NumberGnome,
        ChallengeKind::WitchsCauldron,
        ChallengeKind::DragonsRiddle,
        ChallengeKind::CloudSequence,
        ChallengeKind::OraclesDeduction,
        ChallengeKind::RuleMachine,
        ChallengeKind::ClickBattle,
        ChallengeKind::LightningCatch,
        ChallengeKind::RhythmDrums,
    ];

    /// Display label, also used as the zone sign
    pub fn label(&self) -> &'static str {
        match self {
            ChallengeKind::NumberGnome => "Number Gnome",
            ChallengeKind::WitchsCauldron => "Witch's Cauldron",
            ChallengeKind::DragonsRiddle => "Dragon's Riddle",
            ChallengeKind::CloudSequence => "Cloud Sequence",
            ChallengeKind::OraclesDeduction => "Oracle's Deduction",
            ChallengeKind::RuleMachine => "Rule Machine",
            ChallengeKind::ClickBattle => "Click Battle",
            ChallengeKind::LightningCatch => "Lightning Catch",
            ChallengeKind::RhythmDrums => "Rhythm Drums",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            ChallengeKind::NumberGnome
            | ChallengeKind::WitchsCauldron
            | ChallengeKind::DragonsRiddle => Family::Arithmetic,
            ChallengeKind::CloudSequence
            | ChallengeKind::OraclesDeduction
            | ChallengeKind::RuleMachine => Family::Deduction,
            ChallengeKind::ClickBattle
            | ChallengeKind::LightningCatch
            | ChallengeKind::RhythmDrums => Family::Reaction,
        }
    }
}

/// Scoring signals a variant reports to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEvent {
    /// One individually correct sub-answer (earns a credit)
    Correct,
    /// A wrong answer, failed submission, or lost round
    Wrong,
    /// Hit feedback with no economy effect. Rhythm Drums hits are not
    /// credited; only the run as a whole is judged.
    Tap,
}

/// Per-call services lent to a variant by its host
pub struct ChallengeCtx<'a> {
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<ChallengeEvent>,
}

impl<'a> ChallengeCtx<'a> {
    pub fn new(rng: &'a mut Pcg32, events: &'a mut Vec<ChallengeEvent>) -> Self {
        Self { rng, events }
    }

    pub fn emit(&mut self, event: ChallengeEvent) {
        self.events.push(event);
    }
}

/// Visual options forwarded from player settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFx {
    pub shake: bool,
}

impl Default for RenderFx {
    fn default() -> Self {
        Self { shake: true }
    }
}

/// Contract shared by all nine variants
pub trait Challenge {
    fn kind(&self) -> ChallengeKind;

    /// Regenerate content and return to the intro card
    fn init(&mut self, rng: &mut Pcg32);

    /// Advance timers and sub-simulations by `dt` seconds
    fn update(&mut self, dt: f32, ctx: &mut ChallengeCtx<'_>);

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut ChallengeCtx<'_>);

    fn render(&self, surface: &mut dyn DrawSurface, fx: RenderFx);

    fn round(&self) -> RoundState;

    fn is_done(&self) -> bool {
        self.round().is_done()
    }

    fn is_failed(&self) -> bool {
        self.round().is_failed()
    }

    /// Plain-text description of what is on screen, for hint requests
    fn context(&self) -> String;
}

/// Build the variant for `kind`
pub fn create(kind: ChallengeKind, tuning: &Tuning) -> Box<dyn Challenge> {
    let cap = tuning.mistake_cap;
    match kind {
        ChallengeKind::NumberGnome => Box::new(arithmetic::number_gnome(cap)),
        ChallengeKind::WitchsCauldron => Box::new(arithmetic::witchs_cauldron(cap)),
        ChallengeKind::DragonsRiddle => Box::new(arithmetic::dragons_riddle(cap)),
        ChallengeKind::CloudSequence => Box::new(pattern::cloud_sequence(cap)),
        ChallengeKind::OraclesDeduction => Box::new(deduction::OraclesDeduction::new(cap)),
        ChallengeKind::RuleMachine => Box::new(pattern::rule_machine(cap)),
        ChallengeKind::ClickBattle => Box::new(reaction::ClickBattle::new(tuning.click_race.clone())),
        ChallengeKind::LightningCatch => {
            Box::new(reaction::LightningCatch::new(tuning.catch.clone()))
        }
        ChallengeKind::RhythmDrums => Box::new(reaction::RhythmDrums::new(tuning.rhythm.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use rand::SeedableRng;

    #[test]
    fn test_factory_builds_matching_kind() {
        let tuning = Tuning::default();
        for kind in ChallengeKind::ALL {
            assert_eq!(create(kind, &tuning).kind(), kind);
        }
    }

    #[test]
    fn test_fresh_challenge_is_unresolved() {
        let tuning = Tuning::default();
        for (seed, kind) in ChallengeKind::ALL.into_iter().enumerate() {
            let mut rng = Pcg32::seed_from_u64(seed as u64);
            let mut challenge = create(kind, &tuning);
            challenge.init(&mut rng);
            assert_eq!(
                (challenge.is_done(), challenge.is_failed()),
                (false, false),
                "{:?} resolved on init",
                kind
            );
        }
    }

    #[test]
    fn test_every_variant_renders_and_describes_itself() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for kind in ChallengeKind::ALL {
            let mut challenge = create(kind, &tuning);
            challenge.init(&mut rng);
            let mut list = DrawList::new();
            challenge.render(&mut list, RenderFx::default());
            assert!(!list.is_empty(), "{:?} drew nothing", kind);
            assert!(challenge.context().contains(kind.label()));
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(ChallengeKind::DragonsRiddle.family(), Family::Arithmetic);
        assert_eq!(ChallengeKind::OraclesDeduction.family(), Family::Deduction);
        assert_eq!(ChallengeKind::RhythmDrums.family(), Family::Reaction);
    }
}
