//! Audio system
//!
//! The game only issues fire-and-forget cues. Decoded sound files are used
//! when available; anything not decoded yet falls back to a procedural
//! oscillator sound instead of waiting.

pub mod music;

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

pub use music::{BATTLE_SEQUENCE, MusicTracker, battle_note};

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound files the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKey {
    BattleTheme,
    Hit,
}

impl SoundKey {
    pub const ALL: [SoundKey; 2] = [SoundKey::BattleTheme, SoundKey::Hit];

    pub fn path(&self) -> &'static str {
        match self {
            SoundKey::BattleTheme => "assets/sounds/battle_theme.mp3",
            SoundKey::Hit => "assets/sounds/hit.wav",
        }
    }
}

/// Cues the core can send to the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Unlock,
    StopMusic,
    BattleMusic,
    Hit,
}

/// Audio backend. Every call returns immediately.
pub trait AudioSink {
    /// Create the audio device after a user gesture (browsers require one)
    fn unlock(&mut self);

    /// Stop the current music track, if any. Safe to call repeatedly.
    fn stop_music(&mut self);

    /// Start the looping battle music, replacing any current track
    fn play_battle_music(&mut self);

    fn play_hit(&mut self);

    /// Advance procedural playback; called once per frame
    fn update(&mut self, _dt: f32) {}
}

/// Shared log of cues received by a [`HeadlessAudio`]
pub type AudioLog = Rc<RefCell<Vec<AudioCue>>>;

/// Audio sink for native runs and tests: logs and records cues, plays nothing
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    log: AudioLog,
    music: MusicTracker,
    time: f64,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink plus a handle to the cues it receives
    pub fn with_log() -> (Self, AudioLog) {
        let sink = Self::default();
        let log = sink.log.clone();
        (sink, log)
    }

    pub fn music(&self) -> &MusicTracker {
        &self.music
    }

    fn record(&self, cue: AudioCue) {
        log::debug!("Audio cue: {:?}", cue);
        self.log.borrow_mut().push(cue);
    }
}

impl AudioSink for HeadlessAudio {
    fn unlock(&mut self) {
        self.record(AudioCue::Unlock);
    }

    fn stop_music(&mut self) {
        self.music.stop();
        self.record(AudioCue::StopMusic);
    }

    fn play_battle_music(&mut self) {
        self.music.start(self.time);
        self.record(AudioCue::BattleMusic);
    }

    fn play_hit(&mut self) {
        self.record(AudioCue::Hit);
    }

    fn update(&mut self, dt: f32) {
        self.time += dt as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_records_cues() {
        let (mut sink, log) = HeadlessAudio::with_log();
        sink.unlock();
        sink.play_battle_music();
        assert!(sink.music().is_playing());
        sink.stop_music();
        sink.stop_music();
        assert!(!sink.music().is_playing());
        assert_eq!(
            *log.borrow(),
            vec![
                AudioCue::Unlock,
                AudioCue::BattleMusic,
                AudioCue::StopMusic,
                AudioCue::StopMusic
            ]
        );
    }
}
