//! Worlds, progression and the companion
//!
//! The session talks to the surrounding game only through `WorldProgression`
//! and `Companion`. `World` is the reference progression used by the demo
//! binary and the tests: the three worlds' zone tables, the portal lock and
//! the player/camera reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::challenge::ChallengeKind;

/// Player sprite height, used to stand the player on the ground after a reset
pub const PLAYER_HEIGHT: f32 = 48.0;
/// Player x after a reset or world change
pub const PLAYER_START_X: f32 = 60.0;

/// A challenge trigger area in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeZone {
    pub id: u32,
    pub label: String,
    pub kind: ChallengeKind,
    pub bounds: Rect,
    pub solved: bool,
}

impl ChallengeZone {
    pub fn new(id: u32, kind: ChallengeKind, x: f32, y: f32) -> Self {
        Self {
            id,
            label: kind.label().to_string(),
            kind,
            bounds: Rect::new(x, y, 64.0, 80.0),
            solved: false,
        }
    }
}

/// Exit gate, opened once every zone in the world is solved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub pos: Vec2,
    pub locked: bool,
}

/// Read-only progress summary handed to the companion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub world_index: usize,
    pub world_name: String,
    pub solved: usize,
    pub total: usize,
}

/// A paid hint request
#[derive(Debug, Clone, PartialEq)]
pub struct HelpRequest {
    pub zone_label: String,
    /// What the challenge currently shows
    pub context: String,
    pub progress: ProgressSnapshot,
}

impl HelpRequest {
    /// Prompt text for the hint service
    pub fn text(&self) -> String {
        format!(
            "I'm inside the \"{}\" challenge and need help! Here's what's on screen right now: {} \
             Please give me a helpful hint without spoiling the answer.",
            self.zone_label, self.context
        )
    }
}

/// Host-side progression the session drives
pub trait WorldProgression {
    /// Freeze or resume the platformer simulation
    fn set_paused(&mut self, paused: bool);
    fn mark_solved(&mut self, zone_id: u32);
    /// Unlock the portal if every zone is solved. Returns true when this call
    /// unlocked it.
    fn check_portal(&mut self) -> bool;
    /// Unsolve every zone, relock the portal, put the player back at the
    /// start and reset the camera
    fn reset_world(&mut self);
    fn progress(&self) -> ProgressSnapshot;
}

/// In-game helper character
pub trait Companion {
    fn on_challenge_solved(&mut self, progress: &ProgressSnapshot);
    fn request_help(&mut self, request: HelpRequest);
    fn say(&mut self, text: &str);
}

/// Static description of one world
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLayout {
    pub name: &'static str,
    pub width: f32,
    pub ground_y: f32,
    /// (kind, x, y) per zone, ids assigned in order from 1
    pub zones: [(ChallengeKind, f32, f32); 3],
    pub portal: Vec2,
}

/// The three worlds in play order
pub fn layouts() -> [WorldLayout; 3] {
    [
        WorldLayout {
            name: "Enchanted Forest",
            width: 3600.0,
            ground_y: 400.0,
            zones: [
                (ChallengeKind::NumberGnome, 508.0, 170.0),
                (ChallengeKind::WitchsCauldron, 1198.0, 150.0),
                (ChallengeKind::DragonsRiddle, 2318.0, 115.0),
            ],
            portal: Vec2::new(3400.0, 280.0),
        },
        WorldLayout {
            name: "Sky Kingdom",
            width: 3600.0,
            ground_y: 430.0,
            zones: [
                (ChallengeKind::CloudSequence, 568.0, 160.0),
                (ChallengeKind::OraclesDeduction, 1518.0, 155.0),
                (ChallengeKind::RuleMachine, 2648.0, 165.0),
            ],
            portal: Vec2::new(3400.0, 290.0),
        },
        WorldLayout {
            name: "Volcano Arena",
            width: 3600.0,
            ground_y: 415.0,
            zones: [
                (ChallengeKind::ClickBattle, 618.0, 105.0),
                (ChallengeKind::LightningCatch, 1478.0, 115.0),
                (ChallengeKind::RhythmDrums, 2458.0, 85.0),
            ],
            portal: Vec2::new(3400.0, 295.0),
        },
    ]
}

/// Reference progression over the built-in layouts
#[derive(Debug, Clone)]
pub struct World {
    pub index: usize,
    pub name: String,
    pub ground_y: f32,
    pub zones: Vec<ChallengeZone>,
    pub portal: Portal,
    pub player: Vec2,
    pub camera_x: f32,
    pub paused: bool,
    /// Set when the last world's portal is taken
    pub victory: bool,
}

impl World {
    /// Load world `index` (clamped to the last world)
    pub fn load(index: usize) -> Self {
        let all = layouts();
        let index = index.min(all.len() - 1);
        let layout = &all[index];
        let zones = layout
            .zones
            .iter()
            .enumerate()
            .map(|(i, (kind, x, y))| ChallengeZone::new(i as u32 + 1, *kind, *x, *y))
            .collect();
        log::info!("Loaded world {}: {}", index + 1, layout.name);
        Self {
            index,
            name: layout.name.to_string(),
            ground_y: layout.ground_y,
            zones,
            portal: Portal {
                pos: layout.portal,
                locked: true,
            },
            player: Self::start_position(layout.ground_y),
            camera_x: 0.0,
            paused: false,
            victory: false,
        }
    }

    fn start_position(ground_y: f32) -> Vec2 {
        Vec2::new(PLAYER_START_X, ground_y - PLAYER_HEIGHT)
    }

    pub fn zone(&self, id: u32) -> Option<&ChallengeZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// First unsolved zone whose bounds contain `pos`
    pub fn zone_at(&self, pos: Vec2) -> Option<&ChallengeZone> {
        self.zones.iter().find(|z| !z.solved && z.bounds.contains(pos))
    }

    pub fn all_solved(&self) -> bool {
        self.zones.iter().all(|z| z.solved)
    }

    /// Walk through an unlocked portal into the next world. Returns false if
    /// the portal is still locked. Taking the last world's portal sets
    /// `victory` instead.
    pub fn advance(&mut self) -> bool {
        if self.portal.locked {
            return false;
        }
        if self.index + 1 >= layouts().len() {
            self.victory = true;
            log::info!("All worlds complete");
            return true;
        }
        *self = Self::load(self.index + 1);
        true
    }
}

impl WorldProgression for World {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn mark_solved(&mut self, zone_id: u32) {
        if let Some(zone) = self.zones.iter_mut().find(|z| z.id == zone_id) {
            zone.solved = true;
            log::info!("Zone solved: {}", zone.label);
        }
    }

    fn check_portal(&mut self) -> bool {
        if self.portal.locked && self.all_solved() {
            self.portal.locked = false;
            log::info!("Portal unlocked in {}", self.name);
            return true;
        }
        false
    }

    fn reset_world(&mut self) {
        for zone in &mut self.zones {
            zone.solved = false;
        }
        self.portal.locked = true;
        self.player = Self::start_position(self.ground_y);
        self.camera_x = 0.0;
        log::info!("World reset: {}", self.name);
    }

    fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            world_index: self.index,
            world_name: self.name.clone(),
            solved: self.zones.iter().filter(|z| z.solved).count(),
            total: self.zones.len(),
        }
    }
}

/// Companion that writes down everything it is told
#[derive(Debug, Default)]
pub struct CompanionLog {
    pub said: Vec<String>,
    pub help: Vec<HelpRequest>,
    pub celebrations: usize,
}

impl Companion for CompanionLog {
    fn on_challenge_solved(&mut self, progress: &ProgressSnapshot) {
        self.celebrations += 1;
        self.said.push(format!(
            "Yes! Great job! {}/{} done in {}.",
            progress.solved, progress.total, progress.world_name
        ));
    }

    fn request_help(&mut self, request: HelpRequest) {
        log::debug!("Help requested: {}", request.text());
        self.help.push(request);
    }

    fn say(&mut self, text: &str) {
        self.said.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_cover_every_kind_once() {
        let mut kinds: Vec<_> = layouts()
            .iter()
            .flat_map(|l| l.zones.iter().map(|z| z.0))
            .collect();
        assert_eq!(kinds.len(), 9);
        kinds.dedup();
        assert_eq!(kinds.len(), 9);
        assert_eq!(kinds, ChallengeKind::ALL.to_vec());
    }

    #[test]
    fn test_zone_labels_match_kinds() {
        let world = World::load(1);
        assert_eq!(world.zone(2).unwrap().label, "Oracle's Deduction");
        assert_eq!(world.zone(2).unwrap().bounds, Rect::new(1518.0, 155.0, 64.0, 80.0));
    }

    #[test]
    fn test_portal_unlocks_when_all_solved() {
        let mut world = World::load(0);
        world.mark_solved(1);
        world.mark_solved(2);
        assert!(!world.check_portal());
        world.mark_solved(3);
        assert!(world.check_portal());
        assert!(!world.portal.locked);
        // Already open
        assert!(!world.check_portal());
    }

    #[test]
    fn test_reset_world() {
        let mut world = World::load(2);
        world.mark_solved(1);
        world.player = Vec2::new(1500.0, 100.0);
        world.camera_x = 1200.0;
        world.reset_world();
        assert!(world.zones.iter().all(|z| !z.solved));
        assert!(world.portal.locked);
        assert_eq!(world.player, Vec2::new(60.0, 415.0 - 48.0));
        assert_eq!(world.camera_x, 0.0);
    }

    #[test]
    fn test_advance_through_worlds() {
        let mut world = World::load(0);
        assert!(!world.advance());
        for index in 0..3 {
            assert_eq!(world.index, index);
            for id in 1..=3 {
                world.mark_solved(id);
            }
            world.check_portal();
            assert!(world.advance());
        }
        assert!(world.victory);
        assert_eq!(world.name, "Volcano Arena");
    }

    #[test]
    fn test_zone_at() {
        let mut world = World::load(0);
        assert_eq!(world.zone_at(Vec2::new(530.0, 200.0)).map(|z| z.id), Some(1));
        world.mark_solved(1);
        assert!(world.zone_at(Vec2::new(530.0, 200.0)).is_none());
        assert!(world.zone_at(Vec2::new(100.0, 200.0)).is_none());
    }

    #[test]
    fn test_help_text() {
        let request = HelpRequest {
            zone_label: "Rule Machine".into(),
            context: "Machine 1/3".into(),
            progress: ProgressSnapshot::default(),
        };
        let text = request.text();
        assert!(text.starts_with("I'm inside the \"Rule Machine\" challenge"));
        assert!(text.contains("Machine 1/3"));
    }
}
