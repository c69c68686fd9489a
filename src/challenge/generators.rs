//! Problem pools and generators
//!
//! Pure functions of a random source. Every generated question has exactly
//! one correct option, fixed at generation time.

use rand::Rng;
use rand::seq::SliceRandom;

/// A multiple-choice question, immutable once generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Headline shown above the options
    pub prompt: String,
    /// Supporting lines (rule machine input→output pairs)
    pub details: Vec<String>,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    /// Any valid index that is not the correct one
    pub fn wrong_index(&self) -> usize {
        (self.correct + 1) % self.options.len()
    }
}

/// Arithmetic operator of a number fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mul,
    Div,
}

/// A times-table fact such as `7 × 8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact {
    pub a: i32,
    pub op: Op,
    pub b: i32,
}

impl Fact {
    pub const fn new(a: i32, op: Op, b: i32) -> Self {
        Self { a, op, b }
    }

    pub fn answer(&self) -> i32 {
        match self.op {
            Op::Mul => self.a * self.b,
            Op::Div => self.a / self.b,
        }
    }

    /// What a student gets by applying the wrong operator
    pub fn wrong_operator(&self) -> i32 {
        match self.op {
            Op::Mul => self.a + self.b,
            Op::Div => self.a - self.b,
        }
    }

    pub fn prompt(&self) -> String {
        let sym = match self.op {
            Op::Mul => '×',
            Op::Div => '÷',
        };
        format!("{} {} {}", self.a, sym, self.b)
    }
}

pub const NUMBER_FACTS: [Fact; 8] = [
    Fact::new(7, Op::Mul, 8),
    Fact::new(63, Op::Div, 9),
    Fact::new(12, Op::Mul, 6),
    Fact::new(144, Op::Div, 12),
    Fact::new(9, Op::Mul, 7),
    Fact::new(56, Op::Div, 7),
    Fact::new(15, Op::Mul, 4),
    Fact::new(108, Op::Div, 9),
];

/// Static pool entry with a fixed option list
struct Fixed {
    prompt: &'static str,
    options: &'static [&'static str],
    correct: usize,
}

const ORDER_OF_OPERATIONS: [Fixed; 5] = [
    Fixed { prompt: "3 + 4 × 2 = ?", options: &["14", "11", "10", "8"], correct: 1 },
    Fixed { prompt: "(5 + 3) × 2 = ?", options: &["11", "16", "13", "18"], correct: 1 },
    Fixed { prompt: "20 ÷ 4 + 3 = ?", options: &["8", "23", "5", "7"], correct: 0 },
    Fixed { prompt: "2 + 6² ÷ 4 = ?", options: &["2", "11", "20", "9"], correct: 1 },
    Fixed { prompt: "(8 − 3) × (2 + 1) = ?", options: &["15", "10", "13", "18"], correct: 0 },
];

const WORD_PROBLEMS: [Fixed; 4] = [
    Fixed {
        prompt: "A dragon has 24 coins and gives away 3/8. How many remain?",
        options: &["9", "15", "6"],
        correct: 1,
    },
    Fixed {
        prompt: "A wizard's 80 spells: 25% are fire spells. How many fire spells?",
        options: &["25", "20", "30"],
        correct: 1,
    },
    Fixed {
        prompt: "36 magic gems split equally among 4 dragons. Each gets?",
        options: &["8", "10", "9"],
        correct: 2,
    },
    Fixed {
        prompt: "A forest has 60 trees. If 40% are oak, how many are NOT oak?",
        options: &["24", "36", "40"],
        correct: 1,
    },
];

struct Sequence {
    terms: &'static [&'static str],
    options: [&'static str; 4],
    correct: usize,
}

const SEQUENCES: [Sequence; 5] = [
    Sequence { terms: &["2", "6", "18", "54"], options: ["108", "162", "58", "72"], correct: 1 },
    Sequence { terms: &["1", "4", "9", "16"], options: ["20", "25", "24", "30"], correct: 1 },
    Sequence { terms: &["3", "7", "11", "15"], options: ["18", "19", "20", "17"], correct: 1 },
    Sequence { terms: &["5", "10", "20", "40"], options: ["60", "80", "70", "50"], correct: 1 },
    Sequence { terms: &["100", "50", "25"], options: ["10", "12.5", "15", "20"], correct: 1 },
];

struct Machine {
    pairs: [(i32, i32); 4],
    rules: [&'static str; 4],
    correct: usize,
}

const RULE_MACHINES: [Machine; 3] = [
    Machine {
        pairs: [(3, 7), (5, 11), (8, 17), (2, 5)],
        rules: ["×2+1", "×3−2", "+4", "×2+2"],
        correct: 0,
    },
    Machine {
        pairs: [(2, 8), (4, 16), (6, 24), (1, 4)],
        rules: ["×4", "×3+2", "+6", "×5−2"],
        correct: 0,
    },
    Machine {
        pairs: [(10, 7), (8, 5), (12, 9), (6, 3)],
        rules: ["−3", "−2", "÷2+2", "×0.7"],
        correct: 0,
    },
];

/// Draw `count` distinct entries from a pool in random order
fn draw<'a, T, R: Rng + ?Sized>(pool: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T> {
    let mut picked: Vec<&T> = pool.iter().collect();
    picked.shuffle(rng);
    picked.truncate(count);
    picked
}

fn nearest_ten(answer: i32) -> i32 {
    let rounded = ((answer + 5) / 10) * 10;
    if rounded == answer { answer + 10 } else { rounded }
}

/// Four options for a number fact: the answer plus a near miss, a
/// wrong-operator result and a round-number decoy. Collisions are replaced
/// by nearby values so there are always exactly three distinct positive
/// wrong options. Returns the options and the index of the answer.
pub fn arithmetic_options<R: Rng + ?Sized>(fact: &Fact, rng: &mut R) -> (Vec<i32>, usize) {
    let answer = fact.answer();
    let sign = if rng.random_bool(0.5) { 1 } else { -1 };
    let near_miss = answer + sign * rng.random_range(1..=3);

    let mut wrong: Vec<i32> = Vec::with_capacity(4);
    let offer = |candidate: i32, wrong: &mut Vec<i32>| {
        if wrong.len() < 3 && candidate > 0 && candidate != answer && !wrong.contains(&candidate) {
            wrong.push(candidate);
        }
    };
    for candidate in [near_miss, fact.wrong_operator(), nearest_ten(answer)] {
        offer(candidate, &mut wrong);
    }
    let mut step = 1;
    while wrong.len() < 3 {
        offer(answer + step, &mut wrong);
        offer(answer - step, &mut wrong);
        step += 1;
    }

    wrong.shuffle(rng);
    let correct = rng.random_range(0..=wrong.len());
    wrong.insert(correct, answer);
    (wrong, correct)
}

/// Number Gnome: `count` facts with procedurally generated options
pub fn number_facts<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    draw(&NUMBER_FACTS, count, rng)
        .into_iter()
        .map(|fact| {
            let (options, correct) = arithmetic_options(fact, rng);
            Question {
                prompt: format!("{} = ?", fact.prompt()),
                details: Vec::new(),
                options: options.iter().map(|v| v.to_string()).collect(),
                correct,
            }
        })
        .collect()
}

fn fixed_questions<R: Rng + ?Sized>(pool: &[Fixed], count: usize, rng: &mut R) -> Vec<Question> {
    draw(pool, count, rng)
        .into_iter()
        .map(|f| Question {
            prompt: f.prompt.to_string(),
            details: Vec::new(),
            options: f.options.iter().map(|o| o.to_string()).collect(),
            correct: f.correct,
        })
        .collect()
}

/// Witch's Cauldron: order-of-operations problems
pub fn order_of_operations<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    fixed_questions(&ORDER_OF_OPERATIONS, count, rng)
}

/// Dragon's Riddle: fraction and percentage word problems
pub fn word_problems<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    fixed_questions(&WORD_PROBLEMS, count, rng)
}

/// Cloud Sequence: what comes next?
pub fn sequences<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    draw(&SEQUENCES, count, rng)
        .into_iter()
        .map(|s| Question {
            prompt: format!("{}, ?", s.terms.join(", ")),
            details: Vec::new(),
            options: s.options.iter().map(|o| o.to_string()).collect(),
            correct: s.correct,
        })
        .collect()
}

/// Rule Machine: which rule maps every input to its output?
pub fn rule_machines<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    draw(&RULE_MACHINES, count, rng)
        .into_iter()
        .map(|m| Question {
            prompt: "Which rule produces these results?".to_string(),
            details: m.pairs.iter().map(|(i, o)| format!("{} → {}", i, o)).collect(),
            options: m.rules.iter().map(|r| format!("n → {}", r)).collect(),
            correct: m.correct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fact_strategy() -> impl Strategy<Value = Fact> {
        (1i32..20, 1i32..13, prop::bool::ANY).prop_map(|(a, b, mul)| {
            if mul {
                Fact::new(a, Op::Mul, b)
            } else {
                Fact::new(a * b, Op::Div, b)
            }
        })
    }

    #[test]
    fn test_fact_answers() {
        assert_eq!(Fact::new(7, Op::Mul, 8).answer(), 56);
        assert_eq!(Fact::new(144, Op::Div, 12).answer(), 12);
        assert_eq!(Fact::new(63, Op::Div, 9).wrong_operator(), 54);
        assert_eq!(Fact::new(7, Op::Mul, 8).prompt(), "7 × 8");
    }

    #[test]
    fn test_nearest_ten_never_equals_answer() {
        assert_eq!(nearest_ten(56), 60);
        assert_eq!(nearest_ten(7), 10);
        assert_eq!(nearest_ten(60), 70);
    }

    #[test]
    fn test_draw_is_without_replacement() {
        let mut rng = Pcg32::seed_from_u64(7);
        let qs = number_facts(5, &mut rng);
        assert_eq!(qs.len(), 5);
        for (i, q) in qs.iter().enumerate() {
            assert!(qs[i + 1..].iter().all(|other| other.prompt != q.prompt));
        }
    }

    #[test]
    fn test_pool_sizes() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(order_of_operations(3, &mut rng).len(), 3);
        assert_eq!(word_problems(3, &mut rng).len(), 3);
        assert_eq!(sequences(3, &mut rng).len(), 3);
        let machines = rule_machines(3, &mut rng);
        assert_eq!(machines.len(), 3);
        assert!(machines.iter().all(|m| m.details.len() == 4));
        // Asking for more than the pool holds returns the whole pool
        assert_eq!(word_problems(10, &mut rng).len(), 4);
    }

    #[test]
    fn test_fixed_pool_answers() {
        let mut rng = Pcg32::seed_from_u64(3);
        for q in order_of_operations(5, &mut rng) {
            let expected = match q.prompt.as_str() {
                "3 + 4 × 2 = ?" => "11",
                "(5 + 3) × 2 = ?" => "16",
                "20 ÷ 4 + 3 = ?" => "8",
                "2 + 6² ÷ 4 = ?" => "11",
                _ => "15",
            };
            assert_eq!(q.correct_option(), expected);
        }
    }

    #[test]
    fn test_wrong_index_differs() {
        let mut rng = Pcg32::seed_from_u64(9);
        for q in sequences(5, &mut rng) {
            assert_ne!(q.wrong_index(), q.correct);
            assert!(q.wrong_index() < q.options.len());
        }
    }

    proptest! {
        #[test]
        fn prop_distractors_distinct_from_answer(fact in fact_strategy(), seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (options, correct) = arithmetic_options(&fact, &mut rng);
            prop_assert_eq!(options.len(), 4);
            prop_assert!(correct < 4);
            prop_assert_eq!(options[correct], fact.answer());
            for (i, opt) in options.iter().enumerate() {
                prop_assert!(*opt > 0);
                if i != correct {
                    prop_assert_ne!(*opt, fact.answer());
                }
                prop_assert!(options[i + 1..].iter().all(|o| o != opt));
            }
        }

        #[test]
        fn prop_number_facts_option_text_matches(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for q in number_facts(5, &mut rng) {
                let fact = NUMBER_FACTS
                    .iter()
                    .find(|f| format!("{} = ?", f.prompt()) == q.prompt)
                    .expect("prompt comes from the pool");
                prop_assert_eq!(q.correct_option(), fact.answer().to_string());
            }
        }
    }
}
