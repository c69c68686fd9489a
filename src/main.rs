//! Portal Worlds headless demo
//!
//! Walks an autoplaying player through the three worlds: every zone is opened
//! in turn and played with random key presses and clicks until it resolves or
//! the attempt times out. Outcomes are logged.
//!
//! Usage: `portal-worlds [seed] [tuning.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use portal_worlds::audio::CueLog;
    use portal_worlds::input::{InputEvent, Key};
    use portal_worlds::renderer::DrawList;
    use portal_worlds::session::hud::render_hud;
    use portal_worlds::world::{CompanionLog, World};
    use portal_worlds::{ChallengeSession, Hooks, SessionPhase, Settings, Tuning, WorldProgression};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const FRAMES_PER_ATTEMPT: u32 = 60 * 45;
    const ATTEMPTS_PER_WORLD: u32 = 40;

    struct Host {
        world: World,
        audio: CueLog,
        companion: CompanionLog,
    }

    impl Host {
        fn hooks(&mut self) -> Hooks<'_> {
            Hooks::new(&mut self.world)
                .with_audio(&mut self.audio)
                .with_companion(&mut self.companion)
        }
    }

    /// One random gesture a restless player might make
    fn random_input(rng: &mut Pcg32) -> InputEvent {
        match rng.random_range(0..4) {
            0 => InputEvent::key(char::from(b'1' + rng.random_range(0..4u8))),
            1 => InputEvent::key(['a', 's', 'd'][rng.random_range(0..3)]),
            // Aim near the middle of the panel, where most buttons live
            2 => InputEvent::Click(Vec2::new(
                rng.random_range(350.0..550.0),
                rng.random_range(215.0..295.0),
            )),
            _ => InputEvent::Click(Vec2::new(
                rng.random_range(160.0..740.0),
                rng.random_range(100.0..450.0),
            )),
        }
    }

    /// Play one attempt at `zone_id`. Returns true if the zone ended up solved.
    fn attempt(session: &mut ChallengeSession, host: &mut Host, zone_id: u32, rng: &mut Pcg32) -> bool {
        let Some(zone) = host.world.zone(zone_id).cloned() else {
            return false;
        };
        let world_index = host.world.index;
        if !session.open(&zone, world_index, &mut host.hooks()) {
            return false;
        }
        session.handle_input(&InputEvent::KeyDown(Key::Space), &mut host.hooks());

        // Ask for a hint once we can afford one
        if session.credits() > 2 {
            session.handle_input(&InputEvent::key('b'), &mut host.hooks());
        }

        for _ in 0..FRAMES_PER_ATTEMPT {
            if session.phase() == SessionPhase::Active && rng.random_bool(0.15) {
                let event = random_input(rng);
                session.handle_input(&event, &mut host.hooks());
            }
            session.update(FRAME_DT, &mut host.hooks());
            if !session.is_open() {
                break;
            }
        }
        if session.is_open() {
            log::info!("{} timed out", zone.label);
            session.handle_input(&InputEvent::KeyDown(Key::Escape), &mut host.hooks());
        }
        // Let the try-again banner run out
        while session.try_again_remaining() > 0.0 {
            session.update(FRAME_DT, &mut host.hooks());
        }
        host.world.zone(zone_id).is_some_and(|z| z.solved)
    }

    pub fn run(seed: u64, tuning: Tuning, settings: Settings) {
        let mut rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
        let mut session = ChallengeSession::new(tuning, settings, seed);
        let mut host = Host {
            world: World::load(0),
            audio: CueLog::new(),
            companion: CompanionLog::default(),
        };

        while !host.world.victory {
            let mut attempts = 0;
            while !host.world.all_solved() && attempts < ATTEMPTS_PER_WORLD {
                let Some(zone_id) = host.world.zones.iter().find(|z| !z.solved).map(|z| z.id)
                else {
                    break;
                };
                attempts += 1;
                let solved = attempt(&mut session, &mut host, zone_id, &mut rng);
                log::debug!("Attempt {} on zone {}: solved={}", attempts, zone_id, solved);
            }
            let progress = host.world.progress();
            log::info!(
                "{}: {}/{} zones after {} attempts, lives {}, credits {}",
                progress.world_name,
                progress.solved,
                progress.total,
                attempts,
                session.lives(),
                session.credits()
            );
            if !host.world.advance() {
                log::info!("Portal still locked, stopping");
                break;
            }
        }

        let mut hud = DrawList::new();
        render_hud(&mut hud, session.lives(), session.economy().max_lives(), session.credits());
        log::info!(
            "Done: victory={}, {} cues played, {} companion lines, {} hints, {} HUD commands",
            host.world.victory,
            host.audio.cues.len(),
            host.companion.said.len(),
            host.companion.help.len(),
            hud.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use portal_worlds::{Settings, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let read = |index: usize| {
        args.get(index).and_then(|path| match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::warn!("Could not read {}: {}", path, err);
                None
            }
        })
    };
    let tuning = Tuning::load_or_default(read(2).as_deref());
    let settings = Settings::load_or_default(read(3).as_deref());

    log::info!("Portal Worlds demo starting (seed {})", seed);
    demo::run(seed, tuning, settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives the library directly
}
