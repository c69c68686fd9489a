//! Oracle's Deduction: place three heroes on a 3×3 grid from written clues.
//!
//! Select-then-place: clicking a token selects it (or deselects it if it was
//! already selected), clicking a cell puts the selected hero there. Clicking
//! a cell with nothing selected clears it. Only cells with an expected hero
//! are checked on submit; every other cell is a wildcard.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::quiz::Feedback;
use super::{Challenge, ChallengeCtx, ChallengeEvent, ChallengeKind, Phase, RenderFx, RoundState};
use crate::Rect;
use crate::consts::*;
use crate::input::InputEvent;
use crate::renderer::shapes::{self, centered_text};
use crate::renderer::{Align, DrawSurface, TextStyle, colors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hero {
    Knight,
    Wizard,
    Archer,
}

impl Hero {
    /// Token order along the bottom of the panel
    pub const ALL: [Hero; 3] = [Hero::Knight, Hero::Wizard, Hero::Archer];

    pub fn name(&self) -> &'static str {
        match self {
            Hero::Knight => "Knight",
            Hero::Wizard => "Wizard",
            Hero::Archer => "Archer",
        }
    }
}

pub type Grid = [[Option<Hero>; 3]; 3];

/// Expected heroes; `None` cells are not checked
pub const SOLUTION: Grid = [
    [Some(Hero::Wizard), None, None],
    [None, Some(Hero::Knight), None],
    [None, None, Some(Hero::Archer)],
];

pub const CLUES: [&str; 4] = [
    "The Wizard is in the top row.",
    "The Knight is in the middle row.",
    "The Archer is in the bottom row.",
    "The heroes line up diagonally, top-left to bottom-right.",
];

const GRID_ORIGIN: Vec2 = Vec2::new(310.0, 168.0);
const CELL_W: f32 = 92.0;
const CELL_H: f32 = 58.0;
const TOKEN_Y: f32 = 382.0;
const SUBMIT: Rect = Rect::new(350.0, 426.0, 200.0, 28.0);

fn cell_rect(row: usize, col: usize) -> Rect {
    Rect::new(
        GRID_ORIGIN.x + col as f32 * CELL_W,
        GRID_ORIGIN.y + row as f32 * CELL_H,
        CELL_W,
        CELL_H,
    )
}

fn token_rect(i: usize) -> Rect {
    Rect::new(180.0 + i as f32 * 120.0, TOKEN_Y, 100.0, 36.0)
}

/// Solution cells whose occupant differs from the expected hero
pub fn mismatches(grid: &Grid) -> Vec<(usize, usize)> {
    let mut wrong = Vec::new();
    for (r, row) in SOLUTION.iter().enumerate() {
        for (c, expected) in row.iter().enumerate() {
            if expected.is_some() && grid[r][c] != *expected {
                wrong.push((r, c));
            }
        }
    }
    wrong
}

pub struct OraclesDeduction {
    mistake_cap: u8,
    grid: Grid,
    selected: Option<Hero>,
    /// Cells flagged by the last failed submit
    errors: Vec<(usize, usize)>,
    round: RoundState,
    feedback: Option<Feedback>,
    shake: u32,
}

impl OraclesDeduction {
    pub fn new(mistake_cap: u8) -> Self {
        Self {
            mistake_cap,
            grid: [[None; 3]; 3],
            selected: None,
            errors: Vec::new(),
            round: RoundState::new(),
            feedback: None,
            shake: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selected(&self) -> Option<Hero> {
        self.selected
    }

    pub fn errors(&self) -> &[(usize, usize)] {
        &self.errors
    }

    /// Toggle the selection of `hero`
    pub fn select_token(&mut self, hero: Hero) {
        if !self.round.is_active() {
            return;
        }
        self.selected = if self.selected == Some(hero) {
            None
        } else {
            Some(hero)
        };
        self.errors.clear();
    }

    /// Place the selected hero at `(row, col)`, or clear the cell when nothing
    /// is selected
    pub fn click_cell(&mut self, row: usize, col: usize) {
        if !self.round.is_active() || row >= 3 || col >= 3 {
            return;
        }
        match self.selected.take() {
            Some(hero) => {
                for cell in self.grid.iter_mut().flatten() {
                    if *cell == Some(hero) {
                        *cell = None;
                    }
                }
                self.grid[row][col] = Some(hero);
            }
            None => self.grid[row][col] = None,
        }
        self.errors.clear();
    }

    /// Check the grid. Returns the mismatched solution cells (empty on
    /// success).
    pub fn submit(&mut self, ctx: &mut ChallengeCtx<'_>) -> Vec<(usize, usize)> {
        if !self.round.is_active() {
            return Vec::new();
        }
        let wrong = mismatches(&self.grid);
        if wrong.is_empty() {
            self.round = self.round.correct(1);
            ctx.emit(ChallengeEvent::Correct);
            log::debug!("Oracle's Deduction solved");
        } else {
            self.round = self.round.wrong(self.mistake_cap);
            self.shake = SHAKE_FRAMES;
            self.feedback = Some(Feedback::wrong(
                "✗ Some placements are wrong, re-read the clues",
            ));
            ctx.emit(ChallengeEvent::Wrong);
            log::debug!("Oracle's Deduction: {} cells wrong", wrong.len());
        }
        self.errors = wrong.clone();
        wrong
    }

    fn placements(&self) -> String {
        Hero::ALL
            .iter()
            .map(|hero| {
                self.grid
                    .iter()
                    .enumerate()
                    .find_map(|(r, row)| {
                        row.iter()
                            .position(|cell| *cell == Some(*hero))
                            .map(|c| format!("{} at Row {}/Col {}", hero.name(), r + 1, c + 1))
                    })
                    .unwrap_or_else(|| format!("{} not placed yet", hero.name()))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Challenge for OraclesDeduction {
    fn kind(&self) -> ChallengeKind {
        ChallengeKind::OraclesDeduction
    }

    fn init(&mut self, _rng: &mut Pcg32) {
        self.grid = [[None; 3]; 3];
        self.selected = None;
        self.errors.clear();
        self.round = RoundState::new();
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
        let Some(pos) = event.click_pos() else {
            return;
        };
        if SUBMIT.contains(pos) {
            self.submit(ctx);
            return;
        }
        if let Some(i) = (0..3).find(|&i| token_rect(i).contains(pos)) {
            self.select_token(Hero::ALL[i]);
            return;
        }
        for row in 0..3 {
            for col in 0..3 {
                if cell_rect(row, col).contains(pos) {
                    self.click_cell(row, col);
                    return;
                }
            }
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface, fx: RenderFx) {
        if self.round.phase == Phase::Intro {
            shapes::intro_card(
                surface,
                "Oracle's Deduction",
                colors::TITLE_SKY,
                &["Read the clues, then place each hero", "on the grid and press Submit."],
                colors::PANEL_BORDER,
            );
            return;
        }

        let dx = if fx.shake {
            shapes::shake_offset(self.shake, 2.0)
        } else {
            0.0
        };
        shapes::panel(surface, CANVAS_CENTER_X + dx, CANVAS_HEIGHT / 2.0, 640.0, 440.0, colors::PANEL_BORDER);
        centered_text(
            surface,
            "Oracle's Deduction: Grid Puzzle",
            80.0,
            TextStyle::new(17.0, colors::TITLE_GOLD).bold(),
        );
        for (i, clue) in CLUES.iter().enumerate() {
            let color = if i < 3 { colors::TITLE_SKY } else { colors::TITLE_GOLD };
            surface.text(
                &format!("{}. {}", i + 1, clue),
                Vec2::new(142.0, 104.0 + i as f32 * 18.0),
                TextStyle::new(13.0, color).align(Align::Left),
            );
        }

        let label = TextStyle::new(12.0, colors::TEXT_DIM);
        for i in 0..3 {
            surface.text(
                &format!("Col {}", i + 1),
                Vec2::new(GRID_ORIGIN.x + (i as f32 + 0.5) * CELL_W, GRID_ORIGIN.y - 8.0),
                label,
            );
            surface.text(
                &format!("Row {}", i + 1),
                Vec2::new(GRID_ORIGIN.x - 36.0, GRID_ORIGIN.y + (i as f32 + 0.5) * CELL_H + 4.0),
                label,
            );
        }
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let rect = cell_rect(r, c);
                let flagged = self.errors.contains(&(r, c));
                let (fill, border) = if flagged {
                    (colors::WRONG_FILL, colors::WRONG)
                } else {
                    (colors::OPTION_FILL, colors::OPTION_BORDER)
                };
                surface.fill_rect(rect, fill);
                surface.stroke_rect(rect, border, 2.0);
                if let Some(hero) = cell {
                    surface.text(
                        hero.name(),
                        rect.center() + Vec2::new(0.0, 5.0),
                        TextStyle::new(14.0, colors::TEXT).bold(),
                    );
                }
            }
        }

        let instruction = match self.selected {
            Some(hero) => format!("\"{}\" selected, click a cell to place", hero.name()),
            None => "Click a name to select it, then click a grid cell".to_string(),
        };
        centered_text(surface, &instruction, 373.0, TextStyle::new(13.0, colors::TEXT_SOFT));
        for (i, hero) in Hero::ALL.iter().enumerate() {
            let rect = token_rect(i);
            let selected = self.selected == Some(*hero);
            let fill = if selected { colors::TOKEN_SELECTED } else { colors::TOKEN_FILL };
            surface.fill_rect(rect, fill);
            surface.stroke_rect(rect, colors::OPTION_BORDER, if selected { 3.0 } else { 2.0 });
            surface.text(
                hero.name(),
                Vec2::new(rect.center().x, rect.y + 23.0),
                TextStyle::new(14.0, colors::TEXT).bold(),
            );
        }

        surface.fill_rect(SUBMIT, colors::SUBMIT_FILL);
        surface.stroke_rect(SUBMIT, colors::RIGHT, 2.0);
        centered_text(surface, "Submit", 445.0, TextStyle::new(15.0, colors::TEXT).bold());

        if let Some(feedback) = &self.feedback {
            centered_text(surface, feedback.text, 458.0, TextStyle::new(13.0, feedback.color()));
        }
    }

    fn round(&self) -> RoundState {
        self.round
    }

    fn context(&self) -> String {
        format!(
            "Oracle's Deduction: Click a name below to select it, then click a grid cell to place it. \
             Click Submit when done. Clues: {} Current placements: {}.",
            CLUES.join(" "),
            self.placements()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn started() -> (OraclesDeduction, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut puzzle = OraclesDeduction::new(MISTAKE_CAP);
        puzzle.init(&mut rng);
        let mut events = Vec::new();
        puzzle.handle_input(&InputEvent::click(450.0, 240.0), &mut ChallengeCtx::new(&mut rng, &mut events));
        assert!(events.is_empty());
        (puzzle, rng)
    }

    fn place(puzzle: &mut OraclesDeduction, hero: Hero, row: usize, col: usize) {
        puzzle.select_token(hero);
        puzzle.click_cell(row, col);
    }

    #[test]
    fn test_empty_grid_flags_solution_cells() {
        let (mut puzzle, mut rng) = started();
        let mut events = Vec::new();
        let wrong = puzzle.submit(&mut ChallengeCtx::new(&mut rng, &mut events));
        assert_eq!(wrong, vec![(0, 0), (1, 1), (2, 2)]);
        assert!(!puzzle.is_done());
        assert_eq!(puzzle.round().mistakes, 1);
        assert_eq!(events, vec![ChallengeEvent::Wrong]);
    }

    #[test]
    fn test_correct_placement_done_on_first_submit() {
        let (mut puzzle, mut rng) = started();
        place(&mut puzzle, Hero::Wizard, 0, 0);
        place(&mut puzzle, Hero::Knight, 1, 1);
        place(&mut puzzle, Hero::Archer, 2, 2);
        let mut events = Vec::new();
        let wrong = puzzle.submit(&mut ChallengeCtx::new(&mut rng, &mut events));
        assert!(wrong.is_empty());
        assert!(puzzle.is_done());
        assert_eq!(events, vec![ChallengeEvent::Correct]);
    }

    #[test]
    fn test_select_toggles() {
        let (mut puzzle, _) = started();
        puzzle.select_token(Hero::Knight);
        assert_eq!(puzzle.selected(), Some(Hero::Knight));
        puzzle.select_token(Hero::Knight);
        assert_eq!(puzzle.selected(), None);
    }

    #[test]
    fn test_placing_moves_hero_and_evicts_occupant() {
        let (mut puzzle, _) = started();
        place(&mut puzzle, Hero::Knight, 0, 0);
        place(&mut puzzle, Hero::Knight, 1, 1);
        assert_eq!(puzzle.grid()[0][0], None);
        assert_eq!(puzzle.grid()[1][1], Some(Hero::Knight));

        place(&mut puzzle, Hero::Archer, 1, 1);
        assert_eq!(puzzle.grid()[1][1], Some(Hero::Archer));
        assert_eq!(puzzle.grid().iter().flatten().flatten().count(), 1);

        // No selection: clears the cell
        puzzle.click_cell(1, 1);
        assert_eq!(puzzle.grid()[1][1], None);
    }

    #[test]
    fn test_wildcards_ignored() {
        let mut grid = SOLUTION;
        grid[0][2] = Some(Hero::Knight);
        assert!(mismatches(&grid).is_empty());
    }

    #[test]
    fn test_three_failed_submits_fail() {
        let (mut puzzle, mut rng) = started();
        let mut events = Vec::new();
        let submit = SUBMIT.center();
        for _ in 0..3 {
            puzzle.handle_input(&InputEvent::Click(submit), &mut ChallengeCtx::new(&mut rng, &mut events));
        }
        assert!(puzzle.is_failed());
    }

    #[test]
    fn test_clicks_drive_placement() {
        let (mut puzzle, mut rng) = started();
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        puzzle.handle_input(&InputEvent::Click(token_rect(1).center()), &mut ctx);
        puzzle.handle_input(&InputEvent::Click(cell_rect(0, 0).center()), &mut ctx);
        assert_eq!(puzzle.grid()[0][0], Some(Hero::Wizard));
        assert!(puzzle.context().contains("Wizard at Row 1/Col 1"));
        assert!(puzzle.context().contains("Knight not placed yet"));
    }

    #[test]
    fn test_errors_cleared_on_edit() {
        let (mut puzzle, mut rng) = started();
        let mut events = Vec::new();
        puzzle.submit(&mut ChallengeCtx::new(&mut rng, &mut events));
        assert_eq!(puzzle.errors().len(), 3);
        puzzle.select_token(Hero::Archer);
        assert!(puzzle.errors().is_empty());
    }
}
