//! Sky Kingdom pattern challenges: number sequences and rule machines.

use super::generators;
use super::quiz::{OptionLayout, PromptStyle, Quiz, QuizInfo};
use super::ChallengeKind;
use crate::renderer::colors;

static CLOUD_SEQUENCE: QuizInfo = QuizInfo {
    kind: ChallengeKind::CloudSequence,
    topic: "pattern",
    heading: "Cloud Sequence Challenge",
    unit: "Sequence",
    count: 3,
    blurb: &["Spot the pattern and pick", "the number that comes next."],
    layout: OptionLayout::new(228.0, 44.0, 9.0, 280.0),
    panel: (580.0, 400.0),
    title_color: colors::TITLE_SKY,
    prompt_style: PromptStyle::Large,
    correct_text: "✓ Correct!",
    wrong_text: "✗ Try again",
    generate: generators::sequences,
};

static RULE_MACHINE: QuizInfo = QuizInfo {
    kind: ChallengeKind::RuleMachine,
    topic: "find the rule",
    heading: "Rule Machine Challenge",
    unit: "Machine",
    count: 3,
    blurb: &["Each machine turns inputs into outputs.", "Work out which rule it follows."],
    layout: OptionLayout::new(268.0, 38.0, 7.0, 280.0),
    panel: (580.0, 400.0),
    title_color: colors::TITLE_EMBER,
    prompt_style: PromptStyle::Pairs,
    correct_text: "✓ You found the rule!",
    wrong_text: "✗ Not quite, look at the pattern again",
    generate: generators::rule_machines,
};

pub fn cloud_sequence(mistake_cap: u8) -> Quiz {
    Quiz::new(&CLOUD_SEQUENCE, mistake_cap)
}

pub fn rule_machine(mistake_cap: u8) -> Quiz {
    Quiz::new(&RULE_MACHINE, mistake_cap)
}
