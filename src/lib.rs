//! Garden Guardians - a top-down garden defence arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, enemies, spawning, collisions)
//! - `session`: Menu / playing / game-over state machine and fixed-step pacing
//! - `autopilot`: Scripted intent source for demo and headless runs
//! - `audio`: Cue sink that the simulation's audio events are forwarded to
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (mute, fullscreen, volumes)

pub mod audio;
pub mod autopilot;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{MenuCommand, Session, SessionPhase};
pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the display rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (matches the 960x540 window)
    pub const PLAYFIELD_WIDTH: f32 = 960.0;
    pub const PLAYFIELD_HEIGHT: f32 = 540.0;

    /// Cooldowns within this distance of zero count as elapsed
    pub const COOLDOWN_EPSILON: f32 = 1e-6;
}

/// Angle of a vector in radians, measured from +X
#[inline]
pub fn dir_to_angle(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

/// Replace non-finite components with zero
#[inline]
pub fn finite_or_zero(v: Vec2) -> Vec2 {
    Vec2::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
    )
}
