//! Volcano Arena challenges: click race, reactive catch, rhythm match.
//!
//! These are small real-time simulations stepped by the `dt` handed to
//! `update`. They judge a threshold when the run ends instead of counting
//! mistakes.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Challenge, ChallengeCtx, ChallengeEvent, ChallengeKind, Phase, RenderFx, RoundState};
use crate::Rect;
use crate::consts::*;
use crate::input::InputEvent;
use crate::renderer::shapes::{self, centered_text};
use crate::renderer::{Align, DrawSurface, TextStyle, colors};
use crate::tuning::{CatchTuning, ClickRaceTuning, RhythmTuning};

fn result_banner(surface: &mut dyn DrawSurface, passed: bool, win: &str, lose: &str, y: f32) {
    let (text, color) = if passed {
        (win, colors::RIGHT)
    } else {
        (lose, colors::WRONG)
    };
    centered_text(surface, text, y, TextStyle::new(28.0, color).bold());
    if !passed {
        centered_text(
            surface,
            "Press Esc and try again",
            y + 90.0,
            TextStyle::new(15.0, colors::TITLE_GOLD),
        );
    }
}

// Click Battle

/// The big button players hammer
pub const CLICK_BUTTON: Rect = Rect::new(350.0, 215.0, 200.0, 80.0);

pub struct ClickBattle {
    tuning: ClickRaceTuning,
    round: RoundState,
    elapsed: f32,
    player_clicks: u32,
}

impl ClickBattle {
    pub fn new(tuning: ClickRaceTuning) -> Self {
        Self {
            tuning,
            round: RoundState::new(),
            elapsed: 0.0,
            player_clicks: 0,
        }
    }

    pub fn player_clicks(&self) -> u32 {
        self.player_clicks
    }

    /// Rival total, accrued at a constant rate over the window
    pub fn rival_clicks(&self) -> u32 {
        (self.elapsed.min(self.tuning.duration_secs) * self.tuning.rival_rate).floor() as u32
    }

    pub fn remaining(&self) -> f32 {
        (self.tuning.duration_secs - self.elapsed).max(0.0)
    }
}

impl Challenge for ClickBattle {
    fn kind(&self) -> ChallengeKind {
        ChallengeKind::ClickBattle
    }

    fn init(&mut self, _rng: &mut Pcg32) {
        self.round = RoundState::new();
        self.elapsed = 0.0;
        self.player_clicks = 0;
    }

    fn update(&mut self, dt: f32, ctx: &mut ChallengeCtx<'_>) {
        if !self.round.is_active() {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.tuning.duration_secs {
            let passed = self.player_clicks > self.rival_clicks();
            self.round = self.round.resolve(passed);
            if passed {
                ctx.emit(ChallengeEvent::Correct);
            }
            log::debug!(
                "Click Battle over: {} vs {}",
                self.player_clicks,
                self.rival_clicks()
            );
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut ChallengeCtx<'_>) {
        match self.round.phase {
            Phase::Intro if event.is_start_gesture() => self.round = self.round.start(),
            Phase::Active => {
                if event.click_pos().is_some_and(|pos| CLICK_BUTTON.contains(pos)) {
                    self.player_clicks += 1;
                }
            }
            _ => {}
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface, _fx: RenderFx) {
        if self.round.phase == Phase::Intro {
            let rate = format!(
                "Beat the rival ({} clicks/sec) in {} seconds.",
                self.tuning.rival_rate, self.tuning.duration_secs
            );
            shapes::intro_card(
                surface,
                "Click Battle",
                colors::TITLE_EMBER,
                &["Click as fast as you can!", rate.as_str()],
                colors::PANEL_BORDER_ACTION,
            );
            return;
        }

        shapes::panel(surface, CANVAS_CENTER_X, CANVAS_HEIGHT / 2.0, 500.0, 360.0, colors::PANEL_BORDER_ACTION);
        centered_text(surface, "Click Battle", 110.0, TextStyle::new(20.0, colors::TITLE_EMBER).bold());
        let score = format!("You: {}   Rival: {}", self.player_clicks, self.rival_clicks());

        if self.round.is_resolved() {
            result_banner(surface, self.round.is_done(), "You Win!", "Rival Wins!", 200.0);
            centered_text(surface, &score, 240.0, TextStyle::new(20.0, colors::TEXT));
            return;
        }

        let body = TextStyle::new(18.0, colors::TEXT);
        centered_text(surface, &format!("{:.1}s", self.remaining()), 150.0, body);
        centered_text(surface, &score, 185.0, body);
        surface.fill_rounded_rect(CLICK_BUTTON, 16.0, colors::BUTTON_FILL, colors::TITLE_EMBER);
        centered_text(surface, "CLICK!", 264.0, TextStyle::new(28.0, colors::TEXT).bold());
    }

    fn round(&self) -> RoundState {
        self.round
    }

    fn context(&self) -> String {
        format!(
            "Click Battle: click the big button as FAST as possible! You have {} clicks vs rival's {}. {}s left.",
            self.player_clicks,
            self.rival_clicks(),
            self.remaining().ceil()
        )
    }
}

// Lightning Catch

/// Where the current catch round stands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatchStage {
    /// Counting down to the bolt
    Waiting { remaining: f32 },
    /// Bolt visible, rival running
    Showing,
    /// Round decided, pausing before the next
    Result { won: bool, remaining: f32 },
}

const ARENA: Rect = Rect::new(150.0, 100.0, 600.0, 260.0);

pub struct LightningCatch {
    tuning: CatchTuning,
    round: RoundState,
    stage: CatchStage,
    bolt: Vec2,
    rival: Vec2,
    wins: u32,
}

impl LightningCatch {
    pub fn new(tuning: CatchTuning) -> Self {
        Self {
            tuning,
            round: RoundState::new(),
            stage: CatchStage::Waiting { remaining: 0.0 },
            bolt: Vec2::ZERO,
            rival: Vec2::new(680.0, 230.0),
            wins: 0,
        }
    }

    pub fn stage(&self) -> CatchStage {
        self.stage
    }

    /// Bolt position while it is showing
    pub fn bolt(&self) -> Option<Vec2> {
        (self.stage == CatchStage::Showing).then_some(self.bolt)
    }

    pub fn rival(&self) -> Vec2 {
        self.rival
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    fn begin_round(&mut self, rng: &mut Pcg32) {
        let t = &self.tuning;
        self.stage = CatchStage::Waiting {
            remaining: rng.random_range(t.min_wait_secs..=t.max_wait_secs),
        };
        let x = if rng.random_bool(0.5) { 700.0 } else { 200.0 };
        self.rival = Vec2::new(x, rng.random_range(180.0..300.0));
    }

    fn finish_round(&mut self, won: bool, ctx: &mut ChallengeCtx<'_>) {
        let remaining = if won {
            self.wins += 1;
            ctx.emit(ChallengeEvent::Correct);
            self.tuning.win_pause_secs
        } else {
            ctx.emit(ChallengeEvent::Wrong);
            self.tuning.loss_pause_secs
        };
        self.stage = CatchStage::Result { won, remaining };
        log::debug!(
            "Lightning Catch round {}: {}",
            self.round.problem_index + 1,
            if won { "won" } else { "lost" }
        );
    }
}

impl Challenge for LightningCatch {
    fn kind(&self) -> ChallengeKind {
        ChallengeKind::LightningCatch
    }

    fn init(&mut self, _rng: &mut Pcg32) {
        self.round = RoundState::new();
        self.stage = CatchStage::Waiting { remaining: 0.0 };
        self.rival = Vec2::new(680.0, 230.0);
        self.wins = 0;
    }

    fn update(&mut self, dt: f32, ctx: &mut ChallengeCtx<'_>) {
        if !self.round.is_active() {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        match self.stage {
            CatchStage::Waiting { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.bolt = Vec2::new(
                        ctx.rng.random_range(300.0..600.0),
                        ctx.rng.random_range(160.0..290.0),
                    );
                    self.stage = CatchStage::Showing;
                } else {
                    self.stage = CatchStage::Waiting { remaining };
                }
            }
            CatchStage::Showing => {
                let to_bolt = self.bolt - self.rival;
                let dist = to_bolt.length();
                if dist < self.tuning.rival_reach_radius {
                    self.finish_round(false, ctx);
                } else if dist > 0.0 {
                    let step = (self.tuning.rival_speed * dt).min(dist);
                    self.rival += to_bolt / dist * step;
                }
            }
            CatchStage::Result { won, remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.stage = CatchStage::Result { won, remaining };
                    return;
                }
                self.round = self.round.advance();
                if self.round.problem_index >= self.tuning.rounds {
                    self.round = self.round.resolve(self.wins >= self.tuning.wins_to_pass);
                } else {
                    self.begin_round(ctx.rng);
                }
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut ChallengeCtx<'_>) {
        match self.round.phase {
            Phase::Intro if event.is_start_gesture() => {
                self.round = self.round.start();
                self.begin_round(ctx.rng);
            }
            Phase::Active => {
                let Some(pos) = event.click_pos() else {
                    return;
                };
                if self.stage == CatchStage::Showing
                    && pos.distance(self.bolt) < self.tuning.click_radius
                {
                    self.finish_round(true, ctx);
                }
            }
            _ => {}
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface, _fx: RenderFx) {
        let t = &self.tuning;
        if self.round.phase == Phase::Intro {
            let goal = format!("Win {} of {} rounds.", t.wins_to_pass, t.rounds);
            shapes::intro_card(
                surface,
                "Lightning Catch",
                colors::BOLT,
                &[
                    "Click the lightning bolt before the rival!",
                    "The rival will RACE toward it, be faster!",
                    goal.as_str(),
                ],
                colors::PANEL_BORDER_ACTION,
            );
            return;
        }

        shapes::panel(surface, CANVAS_CENTER_X, CANVAS_HEIGHT / 2.0, 620.0, 400.0, colors::PANEL_BORDER_ACTION);
        centered_text(surface, "Lightning Catch", 62.0, TextStyle::new(20.0, colors::BOLT).bold());

        if self.round.is_resolved() {
            result_banner(surface, self.round.is_done(), "Lightning fast!", "Not this time", 200.0);
            centered_text(
                surface,
                &format!("You won {}/{} rounds", self.wins, t.rounds),
                245.0,
                TextStyle::new(18.0, colors::TEXT),
            );
            return;
        }

        centered_text(
            surface,
            &format!(
                "Round {}/{}  ·  Wins: {}",
                self.round.problem_index + 1,
                t.rounds,
                self.wins
            ),
            90.0,
            TextStyle::new(15.0, colors::TEXT_SOFT),
        );
        surface.fill_rect(ARENA, colors::OPTION_FILL);
        surface.stroke_rect(ARENA, colors::PANEL_BORDER_ACTION, 2.0);

        // Rival
        surface.fill_rect(Rect::centered(self.rival.x, self.rival.y - 5.0, 20.0, 22.0), colors::RIVAL);
        surface.fill_rect(Rect::centered(self.rival.x, self.rival.y - 22.0, 18.0, 16.0), colors::RIVAL);
        surface.text(
            "RIVAL",
            self.rival - Vec2::new(0.0, 43.0),
            TextStyle::new(11.0, colors::RIVAL).bold(),
        );

        match self.stage {
            CatchStage::Showing => {
                surface.fill_circle(self.bolt, 30.0, colors::BOLT);
                surface.text(
                    "Click!",
                    self.bolt - Vec2::new(0.0, 36.0),
                    TextStyle::new(13.0, colors::TEXT),
                );
            }
            CatchStage::Waiting { .. } => {
                centered_text(surface, "Waiting for bolt...", 230.0, TextStyle::new(16.0, colors::TEXT_DIM));
            }
            CatchStage::Result { won, .. } => {
                let (text, color) = if won {
                    ("You got it!", colors::RIGHT)
                } else {
                    ("Too slow!", colors::WRONG)
                };
                centered_text(surface, text, 390.0, TextStyle::new(26.0, color).bold());
            }
        }
    }

    fn round(&self) -> RoundState {
        self.round
    }

    fn context(&self) -> String {
        format!(
            "Lightning Catch: a lightning bolt appears at a random spot, click it BEFORE the rival does! \
             Round {}/{}, {} wins. Bolt showing: {}.",
            (self.round.problem_index + 1).min(self.tuning.rounds),
            self.tuning.rounds,
            self.wins,
            self.stage == CatchStage::Showing
        )
    }
}

// Rhythm Drums

/// Lane keys, top to bottom
pub const LANE_KEYS: [char; 3] = ['a', 's', 'd'];
const LANE_Y: [f32; 3] = [200.0, 260.0, 320.0];

/// A scrolling beat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub lane: usize,
    pub x: f32,
    pub hit: bool,
    pub missed: bool,
}

impl Marker {
    fn is_live(&self) -> bool {
        !self.hit && !self.missed
    }
}

/// Hit flash on the line
#[derive(Debug, Clone, Copy, PartialEq)]
struct Burst {
    lane: usize,
    life: f32,
}

pub struct RhythmDrums {
    tuning: RhythmTuning,
    round: RoundState,
    markers: Vec<Marker>,
    bursts: Vec<Burst>,
    spawn_timer: f32,
    spawned: u32,
    hits: u32,
    misses: u32,
}

impl RhythmDrums {
    pub fn new(tuning: RhythmTuning) -> Self {
        Self {
            tuning,
            round: RoundState::new(),
            markers: Vec::new(),
            bursts: Vec::new(),
            spawn_timer: 0.0,
            spawned: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Strike `lane`. Scores only if a live marker in that lane is inside the
    /// window around the hit line.
    pub fn hit_lane(&mut self, lane: usize, ctx: &mut ChallengeCtx<'_>) -> bool {
        if !self.round.is_active() {
            return false;
        }
        let (line, window) = (self.tuning.hit_line_x, self.tuning.hit_window);
        let Some(marker) = self
            .markers
            .iter_mut()
            .find(|m| m.is_live() && m.lane == lane && (m.x - line).abs() <= window)
        else {
            return false;
        };
        marker.hit = true;
        self.hits += 1;
        self.bursts.push(Burst { lane, life: 1.0 });
        ctx.emit(ChallengeEvent::Tap);
        true
    }

    fn spawn(&mut self, rng: &mut Pcg32) {
        self.markers.push(Marker {
            lane: rng.random_range(0..LANE_KEYS.len()),
            x: self.tuning.spawn_x,
            hit: false,
            missed: false,
        });
        self.spawned += 1;
    }
}

impl Challenge for RhythmDrums {
    fn kind(&self) -> ChallengeKind {
        ChallengeKind::RhythmDrums
    }

    fn init(&mut self, _rng: &mut Pcg32) {
        self.round = RoundState::new();
        self.markers.clear();
        self.bursts.clear();
        self.spawn_timer = 0.0;
        self.spawned = 0;
        self.hits = 0;
        self.misses = 0;
    }

    fn update(&mut self, dt: f32, ctx: &mut ChallengeCtx<'_>) {
        if !self.round.is_active() {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        let t = &self.tuning;

        if self.spawned < t.total_markers {
            self.spawn_timer += dt;
            if self.spawn_timer >= t.spawn_interval_secs {
                self.spawn_timer -= t.spawn_interval_secs;
                self.spawn(ctx.rng);
            }
        }

        let t = &self.tuning;
        let miss_x = t.hit_line_x - t.hit_window;
        for marker in &mut self.markers {
            marker.x -= t.speed * dt;
            if marker.is_live() && marker.x < miss_x {
                marker.missed = true;
                self.misses += 1;
            }
        }
        self.markers.retain(|m| m.x > t.despawn_x);

        for burst in &mut self.bursts {
            burst.life -= dt * 2.0;
        }
        self.bursts.retain(|b| b.life > 0.0);

        if self.spawned >= t.total_markers
            && self.hits + self.misses >= t.total_markers
            && self.markers.is_empty()
        {
            let passed = self.hits >= t.pass_hits;
            self.round = self.round.resolve(passed);
            log::debug!("Rhythm Drums over: {}/{} hits", self.hits, t.total_markers);
        }
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut ChallengeCtx<'_>) {
        match self.round.phase {
            Phase::Intro if event.is_start_gesture() => self.round = self.round.start(),
            Phase::Active => {
                let Some(key) = event.key_down() else {
                    return;
                };
                if let Some(lane) = LANE_KEYS.iter().position(|c| key.is_letter(*c)) {
                    self.hit_lane(lane, ctx);
                }
            }
            _ => {}
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface, _fx: RenderFx) {
        let t = &self.tuning;
        if self.round.phase == Phase::Intro {
            let goal = format!("Hit {}/{} beats to pass.", t.pass_hits, t.total_markers);
            shapes::intro_card(
                surface,
                "Rhythm Drums",
                colors::TITLE_GOLD,
                &[
                    "Press A, S, D when beats reach the hit zone!",
                    goal.as_str(),
                    "A = Top lane   S = Middle   D = Bottom",
                ],
                colors::PANEL_BORDER_ACTION,
            );
            return;
        }

        shapes::panel(surface, CANVAS_CENTER_X, CANVAS_HEIGHT / 2.0, 780.0, 360.0, colors::PANEL_BORDER_ACTION);
        centered_text(surface, "Rhythm Drums", 160.0, TextStyle::new(16.0, colors::TITLE_GOLD).bold());
        centered_text(
            surface,
            &format!("Hits: {}/{}  (need {})", self.hits, t.total_markers, t.pass_hits),
            183.0,
            TextStyle::new(14.0, colors::TEXT_DIM),
        );

        for (i, y) in LANE_Y.iter().enumerate() {
            let lane = Rect::new(120.0, y - 18.0, 680.0, 36.0);
            surface.fill_rect(lane, colors::LANES[i]);
            surface.text(
                &LANE_KEYS[i].to_ascii_uppercase().to_string(),
                Vec2::new(100.0, y + 6.0),
                TextStyle::new(16.0, colors::TEXT).bold().align(Align::Center),
            );
            surface.line(
                Vec2::new(t.hit_line_x, y - 22.0),
                Vec2::new(t.hit_line_x, y + 22.0),
                colors::TEXT,
                3.0,
            );
        }
        for marker in self.markers.iter().filter(|m| !m.hit) {
            let color = if marker.missed {
                colors::MARKER_MISSED
            } else {
                colors::MARKER
            };
            surface.fill_circle(Vec2::new(marker.x, LANE_Y[marker.lane]), 14.0, color);
        }
        for burst in &self.bursts {
            surface.fill_circle(
                Vec2::new(t.hit_line_x, LANE_Y[burst.lane]),
                18.0 * burst.life,
                colors::RIGHT,
            );
        }

        if self.round.is_resolved() {
            result_banner(surface, self.round.is_done(), "Perfect rhythm!", "Keep practicing!", 375.0);
        }
    }

    fn round(&self) -> RoundState {
        self.round
    }

    fn context(&self) -> String {
        format!(
            "Rhythm Drums: press A (top), S (middle), or D (bottom) when the beat reaches the hit line! \
             {} good hits so far, {} total beats, {} needed.",
            self.hits, self.tuning.total_markers, self.tuning.pass_hits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use rand::SeedableRng;

    const FRAME: f32 = 1.0 / 60.0;

    fn start<C: Challenge>(challenge: &mut C, rng: &mut Pcg32) {
        challenge.init(rng);
        let mut events = Vec::new();
        challenge.handle_input(&InputEvent::KeyDown(Key::Space), &mut ChallengeCtx::new(rng, &mut events));
    }

    #[test]
    fn test_rival_clicks_floor() {
        let mut battle = ClickBattle::new(ClickRaceTuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        start(&mut battle, &mut rng);
        battle.update(0.49, &mut ChallengeCtx::new(&mut rng, &mut events));
        assert_eq!(battle.rival_clicks(), 2);
        battle.update(0.02, &mut ChallengeCtx::new(&mut rng, &mut events));
        assert_eq!(battle.rival_clicks(), 3);
    }

    #[test]
    fn test_click_battle_win_and_loss() {
        for (clicks, expect_pass) in [(31, true), (30, false)] {
            let mut battle = ClickBattle::new(ClickRaceTuning::default());
            let mut rng = Pcg32::seed_from_u64(2);
            let mut events = Vec::new();
            start(&mut battle, &mut rng);
            let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
            for _ in 0..clicks {
                battle.handle_input(&InputEvent::Click(CLICK_BUTTON.center()), &mut ctx);
            }
            // Outside the button does not count
            battle.handle_input(&InputEvent::click(100.0, 100.0), &mut ctx);
            for _ in 0..10 {
                battle.update(0.5, &mut ctx);
            }
            assert_eq!(battle.player_clicks(), clicks);
            assert_eq!(battle.rival_clicks(), 30);
            assert_eq!(battle.is_done(), expect_pass);
            assert_eq!(battle.is_failed(), !expect_pass);
            assert_eq!(events.contains(&ChallengeEvent::Correct), expect_pass);
        }
    }

    #[test]
    fn test_click_battle_clicks_ignored_before_start() {
        let mut battle = ClickBattle::new(ClickRaceTuning::default());
        let mut rng = Pcg32::seed_from_u64(3);
        battle.init(&mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        // First click starts the race, it is not scored
        battle.handle_input(&InputEvent::Click(CLICK_BUTTON.center()), &mut ctx);
        assert_eq!(battle.player_clicks(), 0);
        assert!(battle.round().is_active());
    }

    /// Play a full catch game, clicking the bolt in the given rounds
    fn play_catch(seed: u64, catch_rounds: &[bool]) -> (LightningCatch, Vec<ChallengeEvent>) {
        let mut game = LightningCatch::new(CatchTuning::default());
        let mut rng = Pcg32::seed_from_u64(seed);
        start(&mut game, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        for _ in 0..6000 {
            if game.round().is_resolved() {
                break;
            }
            let round = game.round().problem_index as usize;
            if let Some(bolt) = game.bolt() {
                if catch_rounds[round] {
                    game.handle_input(&InputEvent::Click(bolt + Vec2::new(20.0, 0.0)), &mut ctx);
                }
            }
            game.update(FRAME, &mut ctx);
        }
        (game, events)
    }

    #[test]
    fn test_catch_three_wins_pass() {
        let (game, events) = play_catch(4, &[true, false, true, false, true]);
        assert!(game.is_done());
        assert_eq!(game.wins(), 3);
        assert_eq!(events.iter().filter(|e| **e == ChallengeEvent::Correct).count(), 3);
        assert_eq!(events.iter().filter(|e| **e == ChallengeEvent::Wrong).count(), 2);
    }

    #[test]
    fn test_catch_two_wins_fail() {
        let (game, _) = play_catch(5, &[true, true, false, false, false]);
        assert!(game.is_failed());
        assert_eq!(game.wins(), 2);
    }

    #[test]
    fn test_catch_bolt_in_range_and_miss_click_ignored() {
        let mut game = LightningCatch::new(CatchTuning::default());
        let mut rng = Pcg32::seed_from_u64(6);
        start(&mut game, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        while game.bolt().is_none() {
            game.update(FRAME, &mut ctx);
        }
        let bolt = game.bolt().unwrap();
        assert!((300.0..600.0).contains(&bolt.x));
        assert!((160.0..290.0).contains(&bolt.y));
        game.handle_input(&InputEvent::Click(bolt + Vec2::new(60.0, 0.0)), &mut ctx);
        assert_eq!(game.stage(), CatchStage::Showing);
        assert!(events.is_empty());
    }

    #[test]
    fn test_rival_resting_on_bolt_stays_finite() {
        let tuning = CatchTuning {
            rival_reach_radius: 0.0,
            ..CatchTuning::default()
        };
        let mut game = LightningCatch::new(tuning);
        let mut rng = Pcg32::seed_from_u64(8);
        start(&mut game, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        while game.bolt().is_none() {
            game.update(FRAME, &mut ctx);
        }
        let bolt = game.bolt().unwrap();
        for _ in 0..600 {
            game.update(FRAME, &mut ctx);
        }
        assert!(game.rival().is_finite());
        assert!(game.rival().distance(bolt) < 1e-3);
    }

    #[test]
    fn test_rival_never_overshoots() {
        let mut game = LightningCatch::new(CatchTuning::default());
        let mut rng = Pcg32::seed_from_u64(7);
        start(&mut game, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        while game.bolt().is_none() {
            game.update(FRAME, &mut ctx);
        }
        let bolt = game.bolt().unwrap();
        let mut last = game.rival().distance(bolt);
        while game.stage() == CatchStage::Showing {
            game.update(1.0, &mut ctx);
            let d = game.rival().distance(bolt);
            assert!(d <= last);
            last = d;
        }
        assert!(matches!(game.stage(), CatchStage::Result { won: false, .. }));
    }

    /// Hit markers as they cross the line until `target` hits are scored
    fn play_rhythm(seed: u64, target: u32) -> RhythmDrums {
        let mut drums = RhythmDrums::new(RhythmTuning::default());
        let mut rng = Pcg32::seed_from_u64(seed);
        start(&mut drums, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        for _ in 0..3000 {
            if drums.round().is_resolved() {
                break;
            }
            drums.update(FRAME, &mut ctx);
            let ready: Vec<usize> = drums
                .markers()
                .iter()
                .filter(|m| m.is_live() && (m.x - 180.0).abs() <= 10.0)
                .map(|m| m.lane)
                .collect();
            for lane in ready {
                if drums.hits() < target {
                    let key = LANE_KEYS[lane];
                    drums.handle_input(&InputEvent::key(key), &mut ctx);
                }
            }
        }
        drums
    }

    #[test]
    fn test_rhythm_twelve_hits_pass() {
        let drums = play_rhythm(8, 12);
        assert_eq!(drums.hits(), 12);
        assert_eq!(drums.misses(), 4);
        assert!(drums.is_done());
    }

    #[test]
    fn test_rhythm_eleven_hits_fail() {
        let drums = play_rhythm(9, 11);
        assert_eq!(drums.hits(), 11);
        assert!(drums.is_failed());
    }

    #[test]
    fn test_rhythm_press_outside_window_scores_nothing() {
        let mut drums = RhythmDrums::new(RhythmTuning::default());
        let mut rng = Pcg32::seed_from_u64(10);
        start(&mut drums, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        // First marker spawns at x = 850, far from the line
        for _ in 0..31 {
            drums.update(FRAME, &mut ctx);
        }
        assert_eq!(drums.markers().len(), 1);
        for lane in 0..3 {
            assert!(!drums.hit_lane(lane, &mut ctx));
        }
        assert_eq!(drums.hits(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_rhythm_hit_emits_tap() {
        let mut drums = RhythmDrums::new(RhythmTuning::default());
        let mut rng = Pcg32::seed_from_u64(11);
        start(&mut drums, &mut rng);
        let mut events = Vec::new();
        let mut ctx = ChallengeCtx::new(&mut rng, &mut events);
        let lane = loop {
            drums.update(FRAME, &mut ctx);
            if let Some(m) = drums.markers().iter().find(|m| (m.x - 180.0).abs() <= 5.0) {
                break m.lane;
            }
        };
        assert!(drums.hit_lane(lane, &mut ctx));
        // Same marker cannot be hit twice
        assert!(!drums.hit_lane(lane, &mut ctx));
        assert_eq!(drums.hits(), 1);
        assert_eq!(events[0], ChallengeEvent::Tap);
    }
}
