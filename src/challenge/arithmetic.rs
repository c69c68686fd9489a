//! Enchanted Forest challenges: speed arithmetic, order of operations, word
//! problems.

use super::generators;
use super::quiz::{OptionLayout, PromptStyle, Quiz, QuizInfo};
use super::ChallengeKind;
use crate::renderer::colors;

static NUMBER_GNOME: QuizInfo = QuizInfo {
    kind: ChallengeKind::NumberGnome,
    topic: "speed arithmetic",
    heading: "Number Gnome Challenge",
    unit: "Problem",
    count: 5,
    blurb: &["Solve five times-table facts.", "Three misses in a row and the gnome wins!"],
    layout: OptionLayout::new(242.0, 38.0, 9.0, 260.0),
    panel: (580.0, 380.0),
    title_color: colors::TITLE_GOLD,
    prompt_style: PromptStyle::Large,
    correct_text: "✓ Correct!",
    wrong_text: "✗ Try again",
    generate: generators::number_facts,
};

static WITCHS_CAULDRON: QuizInfo = QuizInfo {
    kind: ChallengeKind::WitchsCauldron,
    topic: "order of operations",
    heading: "Witch's Cauldron: Order of Operations",
    unit: "Problem",
    count: 3,
    blurb: &["Brackets first, then × and ÷, then + and −.", "Pick the right answer for each brew."],
    layout: OptionLayout::new(242.0, 38.0, 9.0, 260.0),
    panel: (580.0, 380.0),
    title_color: colors::TITLE_GOLD,
    prompt_style: PromptStyle::Large,
    correct_text: "✓ Correct!",
    wrong_text: "✗ Not quite, try again",
    generate: generators::order_of_operations,
};

static DRAGONS_RIDDLE: QuizInfo = QuizInfo {
    kind: ChallengeKind::DragonsRiddle,
    topic: "fractions/percentages",
    heading: "Dragon's Riddle: Fractions",
    unit: "Riddle",
    count: 3,
    blurb: &["The dragon asks three riddles about", "fractions and percentages."],
    layout: OptionLayout::new(260.0, 48.0, 10.0, 260.0),
    panel: (600.0, 380.0),
    title_color: colors::TITLE_GOLD,
    prompt_style: PromptStyle::Wrapped,
    correct_text: "✓ Correct!",
    wrong_text: "✗ Wrong, try again",
    generate: generators::word_problems,
};

pub fn number_gnome(mistake_cap: u8) -> Quiz {
    Quiz::new(&NUMBER_GNOME, mistake_cap)
}

pub fn witchs_cauldron(mistake_cap: u8) -> Quiz {
    Quiz::new(&WITCHS_CAULDRON, mistake_cap)
}

pub fn dragons_riddle(mistake_cap: u8) -> Quiz {
    Quiz::new(&DRAGONS_RIDDLE, mistake_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::{Challenge, ChallengeCtx, ChallengeEvent};
    use crate::input::InputEvent;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn all(cap: u8) -> [Quiz; 3] {
        [number_gnome(cap), witchs_cauldron(cap), dragons_riddle(cap)]
    }

    fn start(quiz: &mut Quiz, rng: &mut Pcg32, events: &mut Vec<ChallengeEvent>) {
        quiz.init(rng);
        quiz.handle_input(&InputEvent::click(450.0, 240.0), &mut ChallengeCtx::new(rng, events));
    }

    #[test]
    fn test_problem_counts() {
        let mut rng = Pcg32::seed_from_u64(11);
        let expected = [5, 3, 3];
        for (mut quiz, n) in all(3).into_iter().zip(expected) {
            quiz.init(&mut rng);
            assert_eq!(quiz.questions().len(), n);
        }
    }

    #[test]
    fn test_number_gnome_has_four_options() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut quiz = number_gnome(3);
        quiz.init(&mut rng);
        assert!(quiz.questions().iter().all(|q| q.options.len() == 4));
    }

    #[test]
    fn test_digit_keys_answer() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut events = Vec::new();
        let mut quiz = dragons_riddle(3);
        start(&mut quiz, &mut rng, &mut events);
        let key = char::from_digit(quiz.current().unwrap().correct as u32 + 1, 10).unwrap();
        quiz.handle_input(&InputEvent::key(key), &mut ChallengeCtx::new(&mut rng, &mut events));
        assert_eq!(events, vec![ChallengeEvent::Correct]);
    }

    proptest! {
        #[test]
        fn prop_all_correct_is_done(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for mut quiz in all(3) {
                let mut events = Vec::new();
                start(&mut quiz, &mut rng, &mut events);
                while let Some(correct) = quiz.current().map(|q| q.correct) {
                    quiz.answer(correct, &mut ChallengeCtx::new(&mut rng, &mut events));
                }
                prop_assert!(quiz.is_done());
                prop_assert!(!quiz.is_failed());
                prop_assert_eq!(
                    events.iter().filter(|e| **e == ChallengeEvent::Correct).count(),
                    quiz.questions().len()
                );
            }
        }

        #[test]
        fn prop_three_wrong_fails(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for mut quiz in all(3) {
                let mut events = Vec::new();
                start(&mut quiz, &mut rng, &mut events);
                for _ in 0..3 {
                    let wrong = quiz.current().map(|q| q.wrong_index()).unwrap();
                    quiz.answer(wrong, &mut ChallengeCtx::new(&mut rng, &mut events));
                }
                prop_assert!(quiz.is_failed());
                prop_assert!(!quiz.is_done());
            }
        }

        #[test]
        fn prop_correct_resets_mistake_streak(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut events = Vec::new();
            let mut quiz = number_gnome(3);
            start(&mut quiz, &mut rng, &mut events);
            // Two misses, a hit, two more misses: never three in a row
            for step in [false, false, true, false, false] {
                let q = quiz.current().unwrap();
                let choice = if step { q.correct } else { q.wrong_index() };
                quiz.answer(choice, &mut ChallengeCtx::new(&mut rng, &mut events));
            }
            prop_assert!(!quiz.is_failed());
            prop_assert_eq!(quiz.round().mistakes, 2);
        }
    }
}
