//! Challenge session controller
//!
//! `ChallengeSession` is the only writer of the economy and the session phase.
//! It opens a zone's challenge as an overlay, routes input to it, turns the
//! variant's scoring events into credits and cues, and drives the timed
//! transitions after a round resolves:
//!
//! ```text
//! Closed -> Active -> Success { remaining } -> (commit_success) -> Closed
//!                  \-> Fail { remaining }    -> (commit_failure) -> Closed
//! ```
//!
//! A failure that empties the last life resets the world and raises the
//! try-again banner, which counts down whether or not a session is open.

pub mod economy;
pub mod hud;
pub mod particles;

pub use economy::Economy;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCues, SoundCue};
use crate::challenge::{self, Challenge, ChallengeCtx, ChallengeEvent, RenderFx};
use crate::consts::{CANVAS_CENTER_X, CANVAS_HEIGHT, CANVAS_WIDTH, HINT_COST};
use crate::input::{DeviceEvent, InputEvent, Key, Viewport};
use crate::renderer::shapes::{self, centered_text};
use crate::renderer::{Align, DrawSurface, TextStyle, colors};
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::world::{ChallengeZone, Companion, HelpRequest, WorldProgression};
use crate::Rect;
use particles::Confetti;

/// Companion line when a hint can't be paid for
pub const NO_CREDITS_LINE: &str = "No bones left! Solve a problem to earn more 🦴";

/// Reserved hint key
pub const HINT_KEY: char = 'b';

/// Overlay lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPhase {
    Closed,
    Active,
    /// Round won; the zone is marked solved when the countdown elapses
    Success { remaining: f32 },
    /// Round lost; the life is taken when the countdown elapses
    Fail { remaining: f32 },
}

/// Host collaborators lent to the session for one call
pub struct Hooks<'a> {
    pub world: &'a mut dyn WorldProgression,
    pub audio: Option<&'a mut dyn AudioCues>,
    pub companion: Option<&'a mut dyn Companion>,
}

impl<'a> Hooks<'a> {
    pub fn new(world: &'a mut dyn WorldProgression) -> Self {
        Self {
            world,
            audio: None,
            companion: None,
        }
    }

    pub fn with_audio(mut self, audio: &'a mut dyn AudioCues) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_companion(mut self, companion: &'a mut dyn Companion) -> Self {
        self.companion = Some(companion);
        self
    }

    fn play(&mut self, cue: SoundCue) {
        if let Some(audio) = self.audio.as_deref_mut() {
            audio.play(cue);
        }
    }
}

/// The challenge currently on screen
struct OpenChallenge {
    zone_id: u32,
    label: String,
    world_index: usize,
    challenge: Box<dyn Challenge>,
}

pub struct ChallengeSession {
    tuning: Tuning,
    settings: Settings,
    economy: Economy,
    phase: SessionPhase,
    /// Try-again banner countdown (seconds, 0 when hidden)
    try_again: f32,
    rng: Pcg32,
    open: Option<OpenChallenge>,
    events: Vec<ChallengeEvent>,
    confetti: Confetti,
}

impl ChallengeSession {
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        Self {
            tuning,
            settings,
            economy: Economy::default(),
            phase: SessionPhase::Closed,
            try_again: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            open: None,
            events: Vec::new(),
            confetti: Confetti::new(),
        }
    }

    pub fn lives(&self) -> u8 {
        self.economy.lives()
    }

    pub fn credits(&self) -> u32 {
        self.economy.credits()
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn try_again_remaining(&self) -> f32 {
        self.try_again
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The running challenge, if any
    pub fn challenge(&self) -> Option<&dyn Challenge> {
        self.open.as_ref().map(|open| open.challenge.as_ref())
    }

    /// Zone id of the running challenge
    pub fn zone_id(&self) -> Option<u32> {
        self.open.as_ref().map(|open| open.zone_id)
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Open `zone`'s challenge. Returns false (and changes nothing) if a
    /// session is already running.
    pub fn open(&mut self, zone: &ChallengeZone, world_index: usize, hooks: &mut Hooks<'_>) -> bool {
        if self.open.is_some() {
            log::debug!("Ignoring open of {}: a session is already running", zone.label);
            return false;
        }
        hooks.world.set_paused(true);
        let mut challenge = challenge::create(zone.kind, &self.tuning);
        challenge.init(&mut self.rng);
        self.open = Some(OpenChallenge {
            zone_id: zone.id,
            label: zone.label.clone(),
            world_index,
            challenge,
        });
        self.events.clear();
        self.phase = SessionPhase::Active;
        self.cue(hooks, SoundCue::ZoneEntry);
        log::info!("Opened {} (world {}, zone {})", zone.label, world_index + 1, zone.id);
        true
    }

    /// Route a canvas-space event. Escape and the hint key are handled here;
    /// everything else goes to the variant while the round is live.
    pub fn handle_input(&mut self, event: &InputEvent, hooks: &mut Hooks<'_>) {
        if self.open.is_none() {
            return;
        }
        match event.key_down() {
            Some(Key::Escape) => {
                self.forfeit(hooks);
                return;
            }
            Some(key) if key.is_letter(HINT_KEY) => {
                self.request_hint(hooks);
                return;
            }
            _ => {}
        }
        if self.phase != SessionPhase::Active {
            return;
        }
        if let Some(open) = self.open.as_mut() {
            let mut ctx = ChallengeCtx::new(&mut self.rng, &mut self.events);
            open.challenge.handle_input(event, &mut ctx);
        }
        self.drain_events(hooks);
    }

    /// Route a device-space event, mapping pointer positions onto the canvas
    pub fn handle_device_input(
        &mut self,
        event: DeviceEvent,
        viewport: &Viewport,
        hooks: &mut Hooks<'_>,
    ) {
        let event = viewport.normalize(event);
        self.handle_input(&event, hooks);
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, hooks: &mut Hooks<'_>) {
        if self.try_again > 0.0 {
            self.try_again = (self.try_again - dt).max(0.0);
        }
        self.confetti.update(dt);

        match self.phase {
            SessionPhase::Closed => {}
            SessionPhase::Active => {
                if let Some(open) = self.open.as_mut() {
                    let mut ctx = ChallengeCtx::new(&mut self.rng, &mut self.events);
                    open.challenge.update(dt, &mut ctx);
                }
                self.drain_events(hooks);
                self.poll_resolution(hooks);
            }
            SessionPhase::Success { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.commit_success(hooks);
                } else {
                    self.phase = SessionPhase::Success { remaining };
                }
            }
            SessionPhase::Fail { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.commit_failure(hooks);
                } else {
                    self.phase = SessionPhase::Fail { remaining };
                }
            }
        }
    }

    /// Escape: cancel a live round for free, or fast-forward a displayed
    /// result
    pub fn forfeit(&mut self, hooks: &mut Hooks<'_>) {
        match self.phase {
            SessionPhase::Closed => {}
            SessionPhase::Active => {
                log::info!("Challenge closed without a result");
                self.close(hooks);
            }
            SessionPhase::Success { .. } => self.commit_success(hooks),
            SessionPhase::Fail { .. } => self.commit_failure(hooks),
        }
    }

    /// Hint key: pay for a hint and hand the on-screen context to the
    /// companion
    pub fn request_hint(&mut self, hooks: &mut Hooks<'_>) {
        if self.phase != SessionPhase::Active {
            return;
        }
        let Some(open) = self.open.as_ref() else {
            return;
        };
        if !self.economy.spend(HINT_COST) {
            log::debug!("Hint refused: no credits");
            if let Some(companion) = hooks.companion.as_deref_mut() {
                companion.say(NO_CREDITS_LINE);
            }
            return;
        }
        let request = HelpRequest {
            zone_label: open.label.clone(),
            context: open.challenge.context(),
            progress: hooks.world.progress(),
        };
        log::info!("Hint bought for {} ({} credits left)", open.label, self.economy.credits());
        self.cue(hooks, SoundCue::Bark);
        if let Some(companion) = hooks.companion.as_deref_mut() {
            companion.request_help(request);
        }
    }

    /// Record the win: solve the zone, maybe open the portal, tell the
    /// companion, and close. Only valid while the success banner is up.
    pub fn commit_success(&mut self, hooks: &mut Hooks<'_>) {
        if !matches!(self.phase, SessionPhase::Success { .. }) {
            return;
        }
        let Some(open) = self.open.as_ref() else {
            return;
        };
        let (zone_id, label) = (open.zone_id, open.label.clone());
        self.close(hooks);

        hooks.world.mark_solved(zone_id);
        self.cue(hooks, SoundCue::SuccessFanfare);
        if hooks.world.check_portal() {
            self.cue(hooks, SoundCue::PortalUnlock);
        }
        let progress = hooks.world.progress();
        log::info!(
            "Solved {} ({}/{} in {})",
            label,
            progress.solved,
            progress.total,
            progress.world_name
        );
        if let Some(companion) = hooks.companion.as_deref_mut() {
            companion.on_challenge_solved(&progress);
        }
    }

    /// Take the life for a lost round. Losing the last one refills lives,
    /// resets the world and raises the try-again banner. Only valid while the
    /// failure banner is up.
    pub fn commit_failure(&mut self, hooks: &mut Hooks<'_>) {
        if !matches!(self.phase, SessionPhase::Fail { .. }) {
            return;
        }
        let label = self
            .open
            .as_ref()
            .map(|open| open.label.clone())
            .unwrap_or_default();
        self.close(hooks);

        if self.economy.lose_life() {
            hooks.world.reset_world();
            self.try_again = self.tuning.try_again_secs;
            log::info!("Out of lives after {}: world reset", label);
        } else {
            log::info!("Lost a life on {} ({} left)", label, self.economy.lives());
        }
    }

    /// Drop the variant and resume the world. Safe when already closed.
    pub fn close(&mut self, hooks: &mut Hooks<'_>) {
        if self.open.take().is_none() && self.phase == SessionPhase::Closed {
            return;
        }
        self.phase = SessionPhase::Closed;
        self.events.clear();
        hooks.world.set_paused(false);
    }

    /// Draw the overlay, result banners, confetti and the try-again banner
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        if let Some(open) = &self.open {
            shapes::overlay_backdrop(surface);
            open.challenge.render(
                surface,
                RenderFx {
                    shake: self.settings.effective_screen_shake(),
                },
            );
            surface.text(
                "[Esc] Close  ·  [B] Ask Buddy",
                Vec2::new(CANVAS_WIDTH - 8.0, 470.0),
                TextStyle::new(13.0, colors::TEXT_DIM).align(Align::Right),
            );
            match self.phase {
                SessionPhase::Success { .. } => {
                    result_banner(surface, "🎉 Challenge Complete!", colors::RIGHT)
                }
                SessionPhase::Fail { .. } => {
                    result_banner(surface, "Challenge Failed: -1 ❤️", colors::WRONG)
                }
                _ => {}
            }
        }

        self.confetti.render(surface);

        if self.try_again > 0.0 {
            shapes::overlay_backdrop(surface);
            centered_text(
                surface,
                "Out of lives!",
                CANVAS_HEIGHT / 2.0 - 20.0,
                TextStyle::new(36.0, colors::WRONG).bold(),
            );
            centered_text(
                surface,
                &format!("Try again! The world restarts in {}…", self.try_again.ceil()),
                CANVAS_HEIGHT / 2.0 + 24.0,
                TextStyle::new(18.0, colors::TEXT),
            );
        }
    }

    /// Spend events the variant pushed since the last drain
    fn drain_events(&mut self, hooks: &mut Hooks<'_>) {
        let muted = self.settings.sfx_muted;
        for event in self.events.drain(..) {
            let cue = match event {
                ChallengeEvent::Correct => {
                    self.economy.earn();
                    log::debug!("Correct answer, credits now {}", self.economy.credits());
                    SoundCue::Correct
                }
                ChallengeEvent::Wrong => SoundCue::Wrong,
                ChallengeEvent::Tap => SoundCue::Tap,
            };
            if !muted {
                hooks.play(cue);
            }
        }
    }

    fn poll_resolution(&mut self, hooks: &mut Hooks<'_>) {
        let Some(open) = self.open.as_ref() else {
            return;
        };
        if open.challenge.is_done() {
            log::info!("{} complete (world {})", open.label, open.world_index + 1);
            self.phase = SessionPhase::Success {
                remaining: self.tuning.success_display_secs,
            };
            self.confetti.burst(self.settings.max_particles(), &mut self.rng);
        } else if open.challenge.is_failed() {
            log::info!("{} failed (world {})", open.label, open.world_index + 1);
            self.phase = SessionPhase::Fail {
                remaining: self.tuning.fail_display_secs,
            };
            self.cue(hooks, SoundCue::Wrong);
        }
    }

    fn cue(&self, hooks: &mut Hooks<'_>, cue: SoundCue) {
        if !self.settings.sfx_muted {
            hooks.play(cue);
        }
    }
}

fn result_banner(surface: &mut dyn DrawSurface, text: &str, color: crate::renderer::Color) {
    let rect = Rect::centered(CANVAS_CENTER_X, 60.0, 420.0, 52.0);
    surface.fill_rounded_rect(rect, 12.0, colors::PANEL_FILL, color);
    centered_text(surface, text, 68.0, TextStyle::new(24.0, color).bold());
}
