//! Audio cue dispatch
//!
//! The simulation only emits [`AudioCue`]s. This module maps them to short
//! procedural sound descriptors and forwards them to whatever backend is
//! plugged in through [`AudioSink`]. Mute and volume settings are applied here.

use crate::settings::Settings;
use crate::sim::{AudioCue, GameEvent};

/// Oscillator shape of a sound preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Sine with weighted overtones
    Tone {
        frequency: f32,
        harmonics: &'static [f32],
    },
    /// Decaying white noise
    Noise,
    /// Linear frequency sweep
    Chirp { start: f32, end: f32 },
}

/// Descriptor a synth backend can render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundPreset {
    pub waveform: Waveform,
    /// Seconds
    pub duration: f32,
    /// Peak amplitude before settings are applied (0.0 - 1.0)
    pub volume: f32,
}

impl SoundPreset {
    /// Bright pluck for a trigger pull
    pub const SHOOT: SoundPreset = SoundPreset {
        waveform: Waveform::Tone {
            frequency: 880.0,
            harmonics: &[1.0, 0.4],
        },
        duration: 0.12,
        volume: 0.45,
    };
    /// Noise crack for any impact
    pub const HIT: SoundPreset = SoundPreset {
        waveform: Waveform::Noise,
        duration: 0.18,
        volume: 0.6,
    };
    /// Rising chirp
    pub const POWER: SoundPreset = SoundPreset {
        waveform: Waveform::Chirp {
            start: 440.0,
            end: 880.0,
        },
        duration: 0.38,
        volume: 0.55,
    };
    /// Falling chirp
    pub const DEFEAT: SoundPreset = SoundPreset {
        waveform: Waveform::Chirp {
            start: 660.0,
            end: 165.0,
        },
        duration: 0.9,
        volume: 0.6,
    };

    /// Preset for a one-shot cue; music cues have none
    pub fn for_cue(cue: AudioCue) -> Option<SoundPreset> {
        match cue {
            AudioCue::ShotFired => Some(Self::SHOOT),
            AudioCue::EnemyHit | AudioCue::PlayerHit => Some(Self::HIT),
            AudioCue::EnemyKilled => Some(SoundPreset {
                duration: 0.26,
                ..Self::HIT
            }),
            AudioCue::WeaponSelected => Some(Self::POWER),
            AudioCue::GameOver => Some(Self::DEFEAT),
            AudioCue::MusicStart | AudioCue::MusicStop => None,
        }
    }
}

/// Audio backend
pub trait AudioSink {
    /// Play a one-shot sound at `gain` (already includes settings)
    fn play(&mut self, cue: AudioCue, preset: &SoundPreset, gain: f32);
    /// Start the looping background track
    fn start_music(&mut self, gain: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue, preset: &SoundPreset, gain: f32) {
        log::trace!("sfx {} ({:.2}s @ {:.2})", cue.name(), preset.duration, gain);
    }

    fn start_music(&mut self, gain: f32) {
        log::debug!("music start @ {gain:.2}");
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    settings: Settings,
    music_playing: bool,
    /// One-shot sounds forwarded to the sink
    played: u64,
}

impl<S: AudioSink> AudioManager<S> {
    /// `settings` are expected to have passed validation
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            settings: settings.clone(),
            music_playing: false,
            played: 0,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        if muted && self.music_playing {
            self.sink.stop_music();
            self.music_playing = false;
        }
        self.settings.mute = muted;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a single cue
    pub fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::MusicStart => {
                let gain = self.settings.effective_music_volume();
                if gain > 0.0 && !self.music_playing {
                    self.sink.start_music(gain);
                    self.music_playing = true;
                }
            }
            AudioCue::MusicStop => {
                if self.music_playing {
                    self.sink.stop_music();
                    self.music_playing = false;
                }
            }
            _ => {
                let gain = self.settings.effective_sfx_volume();
                if gain <= 0.0 {
                    return;
                }
                if let Some(preset) = SoundPreset::for_cue(cue) {
                    self.sink.play(cue, &preset, gain * preset.volume);
                    self.played += 1;
                }
            }
        }
    }

    /// Forward every audio cue in `events`, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(GameEvent::cue) {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ParticleKind;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<&'static str>,
        music: Vec<bool>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue, _preset: &SoundPreset, gain: f32) {
            assert!(gain > 0.0);
            self.sounds.push(cue.name());
        }

        fn start_music(&mut self, _gain: f32) {
            self.music.push(true);
        }

        fn stop_music(&mut self) {
            self.music.push(false);
        }
    }

    #[test]
    fn test_dispatch_forwards_cues_in_order() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.dispatch(&[
            GameEvent::Audio(AudioCue::MusicStart),
            GameEvent::Audio(AudioCue::ShotFired),
            GameEvent::Particles {
                kind: ParticleKind::HitSpark,
                pos: Vec2::ZERO,
            },
            GameEvent::Audio(AudioCue::EnemyHit),
            GameEvent::Audio(AudioCue::MusicStart),
        ]);
        assert_eq!(audio.sink().sounds, vec!["shot_fired", "enemy_hit"]);
        assert_eq!(audio.sink().music, vec![true]);
        assert!(audio.is_music_playing());
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_mute_drops_everything() {
        let settings = Settings {
            mute: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.play(AudioCue::MusicStart);
        audio.play(AudioCue::GameOver);
        assert!(audio.sink().sounds.is_empty());
        assert!(audio.sink().music.is_empty());
    }

    #[test]
    fn test_muting_stops_music() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.play(AudioCue::MusicStart);
        audio.set_muted(true);
        assert!(!audio.is_music_playing());
        assert_eq!(audio.sink().music, vec![true, false]);
        // Stop while silent is a no-op
        audio.play(AudioCue::MusicStop);
        assert_eq!(audio.sink().music.len(), 2);
    }

    #[test]
    fn test_every_one_shot_has_a_preset() {
        for cue in [
            AudioCue::ShotFired,
            AudioCue::EnemyHit,
            AudioCue::EnemyKilled,
            AudioCue::PlayerHit,
            AudioCue::GameOver,
            AudioCue::WeaponSelected,
        ] {
            let preset = SoundPreset::for_cue(cue).expect("one-shot preset");
            assert!(preset.duration > 0.0 && preset.volume <= 1.0);
        }
        assert!(SoundPreset::for_cue(AudioCue::MusicStart).is_none());
    }
}
