//! Music track bookkeeping
//!
//! Every `start` hands out a new generation number. Anything stepping a track
//! (the procedural sequencer, late-arriving decode callbacks) checks its
//! generation against the current one and bails out if it has been replaced
//! or stopped.

/// Fallback battle melody (Hz), one note per quarter second
pub const BATTLE_SEQUENCE: [f32; 8] = [110.0, 110.0, 165.0, 220.0, 196.0, 165.0, 147.0, 110.0];

/// Notes per second of the fallback melody
const STEPS_PER_SECOND: f64 = 4.0;

/// Note of the fallback melody `t` seconds after it started
pub fn battle_note(t: f64) -> f32 {
    let len = BATTLE_SEQUENCE.len();
    let step = (t.max(0.0) * STEPS_PER_SECOND).floor() as usize % len;
    BATTLE_SEQUENCE[step]
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    generation: u64,
    started_at: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MusicTracker {
    next_generation: u64,
    current: Option<Track>,
}

impl MusicTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new track at time `now`, replacing the current one
    pub fn start(&mut self, now: f64) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.current = Some(Track {
            generation,
            started_at: now,
        });
        generation
    }

    /// Stop the current track. Returns its generation if one was playing.
    pub fn stop(&mut self) -> Option<u64> {
        self.current.take().map(|t| t.generation)
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<u64> {
        self.current.map(|t| t.generation)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == Some(generation)
    }

    /// Fallback melody note for `generation` at time `now`, or `None` if that
    /// track is no longer the one playing
    pub fn note_for(&self, generation: u64, now: f64) -> Option<f32> {
        let track = self.current.filter(|t| t.generation == generation)?;
        Some(battle_note(now - track.started_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_note_steps_and_wraps() {
        assert_eq!(battle_note(0.0), 110.0);
        assert_eq!(battle_note(0.5), 165.0);
        assert_eq!(battle_note(0.75), 220.0);
        assert_eq!(battle_note(1.75), 110.0);
        // Wraps after 2 seconds
        assert_eq!(battle_note(2.5), 165.0);
    }

    #[test]
    fn test_restart_invalidates_old_generation() {
        let mut music = MusicTracker::new();
        let first = music.start(0.0);
        let second = music.start(1.0);
        assert_ne!(first, second);
        assert!(!music.is_current(first));
        assert!(music.is_current(second));
        assert_eq!(music.note_for(first, 1.5), None);
        assert_eq!(music.note_for(second, 1.5), Some(165.0));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut music = MusicTracker::new();
        let generation = music.start(0.0);
        assert_eq!(music.stop(), Some(generation));
        assert_eq!(music.stop(), None);
        assert!(!music.is_current(generation));
    }
}
