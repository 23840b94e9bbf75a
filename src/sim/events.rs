//! Events emitted by the simulation for audio and visual feedback
//!
//! The tick never talks to a mixer or renderer directly; it returns these and
//! the adapters consume them afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::ParticleKind;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    ShotFired,
    EnemyHit,
    EnemyKilled,
    PlayerHit,
    GameOver,
    /// Background music lifecycle, once per run
    MusicStart,
    MusicStop,
    /// A run was started from the menu or restarted
    WeaponSelected,
}

impl AudioCue {
    /// Stable cue identifier understood by audio backends
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::ShotFired => "shot_fired",
            AudioCue::EnemyHit => "enemy_hit",
            AudioCue::EnemyKilled => "enemy_killed",
            AudioCue::PlayerHit => "player_hit",
            AudioCue::GameOver => "game_over",
            AudioCue::MusicStart => "music_start",
            AudioCue::MusicStop => "music_stop",
            AudioCue::WeaponSelected => "weapon_selected",
        }
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioCue),
    /// A particle burst was spawned at `pos`
    Particles { kind: ParticleKind, pos: Vec2 },
}

impl GameEvent {
    pub fn cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::Audio(cue) => Some(*cue),
            GameEvent::Particles { .. } => None,
        }
    }
}

/// Number of events carrying `cue`
pub fn count_cue(events: &[GameEvent], cue: AudioCue) -> usize {
    events.iter().filter(|e| e.cue() == Some(cue)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        assert_eq!(AudioCue::ShotFired.name(), "shot_fired");
        assert_eq!(AudioCue::EnemyKilled.name(), "enemy_killed");
        assert_eq!(AudioCue::GameOver.name(), "game_over");
    }

    #[test]
    fn test_count_cue_ignores_particles() {
        let events = [
            GameEvent::Audio(AudioCue::EnemyHit),
            GameEvent::Particles {
                kind: ParticleKind::HitSpark,
                pos: Vec2::ZERO,
            },
            GameEvent::Audio(AudioCue::EnemyHit),
            GameEvent::Audio(AudioCue::EnemyKilled),
        ];
        assert_eq!(count_cue(&events, AudioCue::EnemyHit), 2);
        assert_eq!(count_cue(&events, AudioCue::PlayerHit), 0);
    }
}
