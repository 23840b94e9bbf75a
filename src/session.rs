//! Session state machine and fixed-step pacing
//!
//! A session owns the tuning and at most one [`World`]. It moves between the
//! weapon menu, a run in progress and the game-over screen, and converts real
//! frame time into whole simulation ticks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{AudioCue, GameEvent, PlayerIntent, WeaponKind, World, WorldSnapshot};
use crate::tuning::{Tuning, TuningError};

/// Per-run seed stride (golden ratio), keeps consecutive runs decorrelated
const RUN_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Choosing a weapon
    Menu,
    Playing,
    /// Run ended; the final world stays visible until restart or menu
    GameOver,
}

/// Weapon menu input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Previous,
    Next,
    /// Pick a weapon directly and start
    Choose(WeaponKind),
    /// Start with the highlighted weapon
    Confirm,
}

pub struct Session {
    tuning: Arc<Tuning>,
    base_seed: u64,
    /// Runs started so far
    runs: u64,
    phase: SessionPhase,
    highlighted: WeaponKind,
    world: Option<World>,
    /// Real time not yet consumed by ticks
    accumulator: f32,
}

impl Session {
    /// Validate `tuning` and open the weapon menu
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning: Arc::new(tuning),
            base_seed: seed,
            runs: 0,
            phase: SessionPhase::Menu,
            highlighted: WeaponKind::SeedBlaster,
            world: None,
            accumulator: 0.0,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Weapon currently highlighted in the menu
    pub fn highlighted(&self) -> WeaponKind {
        self.highlighted
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current or just-finished run
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn snapshot(&self) -> Option<WorldSnapshot<'_>> {
        self.world.as_ref().map(World::snapshot)
    }

    /// Handle weapon menu input; ignored outside the menu
    pub fn menu(&mut self, command: MenuCommand) -> Vec<GameEvent> {
        if self.phase != SessionPhase::Menu {
            return Vec::new();
        }
        let count = WeaponKind::ALL.len();
        let index = self.highlighted.index();
        match command {
            MenuCommand::Previous => {
                self.highlighted = WeaponKind::ALL[(index + count - 1) % count];
                Vec::new()
            }
            MenuCommand::Next => {
                self.highlighted = WeaponKind::ALL[(index + 1) % count];
                Vec::new()
            }
            MenuCommand::Choose(kind) => {
                self.highlighted = kind;
                self.start_run(kind)
            }
            MenuCommand::Confirm => self.start_run(self.highlighted),
        }
    }

    /// Feed one rendered frame: handles restart / menu requests, then runs as
    /// many fixed ticks as the accumulated time allows.
    pub fn frame(&mut self, real_dt: f32, intent: &PlayerIntent) -> Vec<GameEvent> {
        match self.phase {
            SessionPhase::Menu => Vec::new(),
            SessionPhase::Playing | SessionPhase::GameOver => {
                if intent.return_to_menu_requested {
                    return self.return_to_menu();
                }
                if intent.restart_requested {
                    return self.restart();
                }
                if self.phase == SessionPhase::Playing {
                    self.step(real_dt, intent)
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn step(&mut self, real_dt: f32, intent: &PlayerIntent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(world) = self.world.as_mut() else {
            return events;
        };

        if !real_dt.is_finite() || real_dt < 0.0 {
            log::warn!("Ignoring invalid frame time {real_dt}");
            return events;
        }
        self.accumulator += real_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(world.advance(intent, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            if world.terminal {
                self.phase = SessionPhase::GameOver;
                self.accumulator = 0.0;
                events.push(GameEvent::Audio(AudioCue::MusicStop));
                break;
            }
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Substep cap hit, carrying {:.3}s", self.accumulator);
        }
        events
    }

    fn start_run(&mut self, weapon: WeaponKind) -> Vec<GameEvent> {
        let seed = self
            .base_seed
            .wrapping_add(self.runs.wrapping_mul(RUN_SEED_STRIDE));
        self.runs += 1;
        self.world = Some(World::new(Arc::clone(&self.tuning), weapon, seed));
        self.phase = SessionPhase::Playing;
        self.accumulator = 0.0;
        vec![
            GameEvent::Audio(AudioCue::WeaponSelected),
            GameEvent::Audio(AudioCue::MusicStart),
        ]
    }

    /// New run with the same weapon
    fn restart(&mut self) -> Vec<GameEvent> {
        let Some(weapon) = self.world.as_ref().map(|w| w.player.weapon) else {
            return Vec::new();
        };
        let mut events = Vec::new();
        if self.phase == SessionPhase::Playing {
            events.push(GameEvent::Audio(AudioCue::MusicStop));
        }
        log::info!("Restarting with {}", weapon.as_str());
        events.extend(self.start_run(weapon));
        events
    }

    fn return_to_menu(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase == SessionPhase::Playing {
            events.push(GameEvent::Audio(AudioCue::MusicStop));
        }
        self.world = None;
        self.phase = SessionPhase::Menu;
        self.accumulator = 0.0;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyKind, count_cue};

    fn session() -> Session {
        Session::new(Tuning::default(), 1234).expect("default tuning is valid")
    }

    fn ticks(session: &Session) -> u64 {
        session.world().map(|w| w.time_ticks).unwrap_or(0)
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut tuning = Tuning::default();
        tuning.weapons.seed_blaster.fire_interval = -1.0;
        assert!(Session::new(tuning, 1).is_err());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert!(s.menu(MenuCommand::Previous).is_empty());
        assert_eq!(s.highlighted(), WeaponKind::SolarBeam);
        s.menu(MenuCommand::Next);
        s.menu(MenuCommand::Next);
        assert_eq!(s.highlighted(), WeaponKind::ThornFork);

        let events = s.menu(MenuCommand::Confirm);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(count_cue(&events, AudioCue::WeaponSelected), 1);
        assert_eq!(count_cue(&events, AudioCue::MusicStart), 1);
        assert_eq!(s.world().map(|w| w.player.weapon), Some(WeaponKind::ThornFork));

        // Menu input is ignored mid-run
        assert!(s.menu(MenuCommand::Next).is_empty());
        assert_eq!(s.highlighted(), WeaponKind::ThornFork);
    }

    #[test]
    fn test_menu_frames_do_nothing() {
        let mut s = session();
        assert!(s.frame(0.1, &PlayerIntent::default()).is_empty());
        assert!(s.world().is_none());
    }

    #[test]
    fn test_accumulator_runs_whole_ticks() {
        let mut s = session();
        s.menu(MenuCommand::Choose(WeaponKind::SeedBlaster));
        let idle = PlayerIntent::default();

        s.frame(0.04, &idle);
        assert_eq!(ticks(&s), 2);
        s.frame(0.02, &idle);
        assert_eq!(ticks(&s), 3);
        s.frame(0.005, &idle);
        assert_eq!(ticks(&s), 3);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut s = session();
        s.menu(MenuCommand::Choose(WeaponKind::SeedBlaster));
        s.frame(5.0, &PlayerIntent::default());
        let n = ticks(&s);
        assert!((5..=6).contains(&n), "ran {n} ticks");

        let before = ticks(&s);
        s.frame(f32::NAN, &PlayerIntent::default());
        s.frame(-1.0, &PlayerIntent::default());
        assert_eq!(ticks(&s), before);
    }

    #[test]
    fn test_game_over_then_restart_keeps_weapon() {
        let mut s = session();
        s.menu(MenuCommand::Choose(WeaponKind::SolarBeam));
        let first_seed = s.world().map(|w| w.seed);

        let world = s.world.as_mut().expect("run in progress");
        world.player.health = 1;
        let pos = world.player.pos;
        let enemy = Enemy::new(0, EnemyKind::Sproutling, pos, &world.tuning.enemies, 1.0, 1.0);
        world.add_enemy(enemy);

        let events = s.frame(0.02, &PlayerIntent::default());
        assert_eq!(s.phase(), SessionPhase::GameOver);
        assert_eq!(count_cue(&events, AudioCue::GameOver), 1);
        assert_eq!(count_cue(&events, AudioCue::MusicStop), 1);
        assert!(s.snapshot().is_some_and(|snap| snap.terminal));

        // Further frames leave the final world alone
        let ticks_at_end = ticks(&s);
        assert!(s.frame(0.1, &PlayerIntent::default()).is_empty());
        assert_eq!(ticks(&s), ticks_at_end);

        let restart = PlayerIntent {
            restart_requested: true,
            ..Default::default()
        };
        let events = s.frame(0.016, &restart);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(count_cue(&events, AudioCue::MusicStart), 1);
        assert_eq!(count_cue(&events, AudioCue::MusicStop), 0);
        let world = s.world().expect("new run");
        assert_eq!(world.player.weapon, WeaponKind::SolarBeam);
        assert_eq!(world.time_ticks, 0);
        assert_ne!(Some(world.seed), first_seed);
    }

    #[test]
    fn test_return_to_menu_discards_run() {
        let mut s = session();
        s.menu(MenuCommand::Confirm);
        s.frame(0.05, &PlayerIntent::default());

        let leave = PlayerIntent {
            return_to_menu_requested: true,
            ..Default::default()
        };
        let events = s.frame(0.05, &leave);
        assert_eq!(count_cue(&events, AudioCue::MusicStop), 1);
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert!(s.world().is_none());
    }
}
