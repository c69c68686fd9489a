//! Shared multiple-choice engine
//!
//! The arithmetic variants plus Cloud Sequence and Rule Machine are all the
//! same machine: a list of questions, numbered option buttons, a mistake cap.
//! They differ only in their `QuizInfo` descriptor.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::generators::Question;
use super::{Challenge, ChallengeCtx, ChallengeEvent, ChallengeKind, Phase, RenderFx, RoundState};
use crate::Rect;
use crate::consts::*;
use crate::input::InputEvent;
use crate::renderer::shapes::{self, centered_text};
use crate::renderer::{Align, Color, DrawSurface, TextStyle, colors};

/// Vertical stack of option buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionLayout {
    pub start_y: f32,
    pub opt_h: f32,
    pub gap: f32,
    pub opt_w: f32,
    pub cx: f32,
}

impl OptionLayout {
    pub const fn new(start_y: f32, opt_h: f32, gap: f32, opt_w: f32) -> Self {
        Self {
            start_y,
            opt_h,
            gap,
            opt_w,
            cx: CANVAS_CENTER_X,
        }
    }

    pub fn rect(&self, i: usize) -> Rect {
        Rect::new(
            self.cx - self.opt_w / 2.0,
            self.start_y + i as f32 * (self.opt_h + self.gap),
            self.opt_w,
            self.opt_h,
        )
    }

    pub fn rects(&self, n: usize) -> Vec<Rect> {
        (0..n).map(|i| self.rect(i)).collect()
    }

    /// Index of the option under `pos`, if any
    pub fn hit(&self, pos: Vec2, n: usize) -> Option<usize> {
        (0..n).find(|&i| self.rect(i).contains(pos))
    }

    /// Baseline just below the last of `n` options
    pub fn bottom(&self, n: usize) -> f32 {
        self.start_y + n as f32 * (self.opt_h + self.gap) + 16.0
    }
}

/// Short-lived banner under the options
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub text: &'static str,
    pub remaining: f32,
    pub positive: bool,
}

impl Feedback {
    pub fn correct(text: &'static str) -> Self {
        Self {
            text,
            remaining: FEEDBACK_CORRECT_SECS,
            positive: true,
        }
    }

    pub fn wrong(text: &'static str) -> Self {
        Self {
            text,
            remaining: FEEDBACK_WRONG_SECS,
            positive: false,
        }
    }

    /// Count down; returns false once expired
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }

    pub fn color(&self) -> Color {
        if self.positive {
            colors::RIGHT
        } else {
            colors::WRONG
        }
    }
}

/// How the question prompt is laid out above the options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// One large line
    Large,
    /// Word-wrapped sentence
    Wrapped,
    /// Two columns of `details` under a fixed question
    Pairs,
}

/// Static description of one multiple-choice variant
pub struct QuizInfo {
    pub kind: ChallengeKind,
    /// Subject shown in the context text, e.g. "order of operations"
    pub topic: &'static str,
    pub heading: &'static str,
    /// Counter noun: "Problem", "Riddle", ...
    pub unit: &'static str,
    pub count: usize,
    pub blurb: &'static [&'static str],
    pub layout: OptionLayout,
    pub panel: (f32, f32),
    pub title_color: Color,
    pub prompt_style: PromptStyle,
    pub correct_text: &'static str,
    pub wrong_text: &'static str,
    pub generate: fn(usize, &mut Pcg32) -> Vec<Question>,
}

pub struct Quiz {
    info: &'static QuizInfo,
    mistake_cap: u8,
    questions: Vec<Question>,
    round: RoundState,
    wrong_flash: bool,
    feedback: Option<Feedback>,
    shake: u32,
}

impl Quiz {
    pub fn new(info: &'static QuizInfo, mistake_cap: u8) -> Self {
        Self {
            info,
            mistake_cap,
            questions: Vec::new(),
            round: RoundState::new(),
            wrong_flash: false,
            feedback: None,
            shake: 0,
        }
    }

    pub fn info(&self) -> &'static QuizInfo {
        self.info
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question awaiting an answer (none outside the active phase)
    pub fn current(&self) -> Option<&Question> {
        if !self.round.is_active() {
            return None;
        }
        self.questions.get(self.round.problem_index as usize)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn shake(&self) -> u32 {
        self.shake
    }

    /// Judge option `choice` for the current question
    pub fn answer(&mut self, choice: usize, ctx: &mut ChallengeCtx<'_>) {
        let Some(question) = self.current() else {
            return;
        };
        if choice >= question.options.len() {
            return;
        }

        if choice == question.correct {
            self.round = self.round.correct(self.questions.len() as u32);
            self.wrong_flash = false;
            self.feedback = Some(Feedback::correct(self.info.correct_text));
            ctx.emit(ChallengeEvent::Correct);
            log::debug!(
                "{}: correct, {}/{}",
                self.info.kind.label(),
                self.round.problem_index,
                self.questions.len()
            );
        } else {
            self.round = self.round.wrong(self.mistake_cap);
            self.wrong_flash = true;
            self.shake = SHAKE_FRAMES;
            self.feedback = Some(Feedback::wrong(self.info.wrong_text));
            ctx.emit(ChallengeEvent::Wrong);
            log::debug!(
                "{}: wrong, {} in a row",
                self.info.kind.label(),
                self.round.mistakes
            );
        }
    }

    fn render_prompt(&self, surface: &mut dyn DrawSurface, question: &Question, dx: f32) {
        let x = CANVAS_CENTER_X + dx;
        match self.info.prompt_style {
            PromptStyle::Large => {
                surface.text(
                    &question.prompt,
                    Vec2::new(x, 206.0),
                    TextStyle::new(30.0, colors::TEXT).bold(),
                );
            }
            PromptStyle::Wrapped => {
                shapes::wrap_text(
                    surface,
                    &question.prompt,
                    Vec2::new(x, 186.0),
                    48,
                    24.0,
                    TextStyle::new(19.0, colors::TEXT),
                );
            }
            PromptStyle::Pairs => {
                for (i, pair) in question.details.iter().enumerate() {
                    let (px, align) = if i % 2 == 0 {
                        (310.0, Align::Right)
                    } else {
                        (530.0, Align::Left)
                    };
                    surface.text(
                        pair,
                        Vec2::new(px + dx, 162.0 + (i / 2) as f32 * 26.0),
                        TextStyle::new(17.0, colors::TEXT).align(align),
                    );
                }
                centered_text(
                    surface,
                    &question.prompt,
                    228.0,
                    TextStyle::new(14.0, colors::TEXT_DIM),
                );
            }
        }
    }
}

impl Challenge for Quiz {
    fn kind(&self) -> ChallengeKind {
        self.info.kind
    }

    fn init(&mut self, rng: &mut Pcg32) {
        self.questions = (self.info.generate)(self.info.count, rng);
        self.round = RoundState::new();
        self.wrong_flash = false;
        self.feedback = None;
        self.shake = 0;
    }

    fn update(&mut self, dt: f32, _ctx: &mut ChallengeCtx<'_>) {
        if let Some(feedback) = self.feedback.as_mut() {
            if !feedback.tick(dt) {
                self.feedback = None;
            }
        }
        self.shake = self.shake.saturating_sub(1);
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut ChallengeCtx<'_>) {
        if self.round.phase == Phase::Intro {
            if event.is_start_gesture() {
                self.round = self.round.start();
            }
            return;
        }
        let Some(question) = self.current() else {
            return;
        };
        let n = question.options.len();
        let choice = match event {
            InputEvent::KeyDown(key) => key
                .digit()
                .and_then(|d| (d as usize).checked_sub(1))
                .filter(|&i| i < n),
            InputEvent::Click(pos) => self.info.layout.hit(*pos, n),
            _ => None,
        };
        if let Some(choice) = choice {
            self.answer(choice, ctx);
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface, fx: RenderFx) {
        let info = self.info;
        if self.round.phase == Phase::Intro {
            shapes::intro_card(
                surface,
                info.heading,
                info.title_color,
                info.blurb,
                colors::PANEL_BORDER,
            );
            return;
        }

        let dx = if fx.shake {
            shapes::shake_offset(self.shake, 3.0)
        } else {
            0.0
        };
        let (w, h) = info.panel;
        shapes::panel(surface, CANVAS_CENTER_X + dx, CANVAS_HEIGHT / 2.0, w, h, colors::PANEL_BORDER);
        centered_text(
            surface,
            info.heading,
            112.0,
            TextStyle::new(18.0, info.title_color).bold(),
        );

        let shown = (self.round.problem_index as usize + 1).min(self.questions.len());
        centered_text(
            surface,
            &format!("{} {}/{}", info.unit, shown, self.questions.len()),
            140.0,
            TextStyle::new(15.0, colors::TEXT_SOFT),
        );

        let Some(question) = self.current() else {
            return;
        };
        self.render_prompt(surface, question, dx);

        let n = question.options.len();
        let keys: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
        centered_text(
            surface,
            &format!("Click or press {}", keys.join(" / ")),
            info.layout.start_y - 10.0,
            TextStyle::new(13.0, colors::TEXT_DIM),
        );

        shapes::option_buttons(
            surface,
            &info.layout.rects(n),
            &question.options,
            self.wrong_flash,
            dx,
        );

        if let Some(feedback) = &self.feedback {
            centered_text(
                surface,
                feedback.text,
                info.layout.bottom(n),
                TextStyle::new(16.0, feedback.color()),
            );
        }
    }

    fn round(&self) -> RoundState {
        self.round
    }

    fn context(&self) -> String {
        let info = self.info;
        match self.round.phase {
            Phase::Intro => format!(
                "{} ({}): not started yet. Press Space or click to begin.",
                info.kind.label(),
                info.topic
            ),
            Phase::Done => format!("{} complete!", info.kind.label()),
            Phase::Failed => format!("{} failed. Press Esc to close.", info.kind.label()),
            Phase::Active => {
                let Some(question) = self.current() else {
                    return format!("{} complete!", info.kind.label());
                };
                let details = if question.details.is_empty() {
                    String::new()
                } else {
                    format!(" Input→output pairs: {}.", question.details.join(", "))
                };
                let options: Vec<String> = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("{}) {}", i + 1, o))
                    .collect();
                let keys: Vec<String> =
                    (1..=question.options.len()).map(|i| i.to_string()).collect();
                format!(
                    "{} ({}): {} {}/{}: \"{}\"{} Options: {}. Press {} or click to choose.",
                    info.kind.label(),
                    info.topic,
                    info.unit,
                    self.round.problem_index + 1,
                    self.questions.len(),
                    question.prompt,
                    details,
                    options.join("  "),
                    keys.join("/"),
                )
            }
        }
    }
}
