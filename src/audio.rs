//! Audio cues and procedural tones
//!
//! The core never plays sound itself. It emits `AudioCue`s to an
//! `AudioSink`; each cue has a short sine tone that a platform backend can
//! render with `ToneBank` - no external files needed.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Ball hits paddle
    PaddleHit,
    /// Ball got past a paddle (played three times per point)
    Miss,
    /// Missile stuns a paddle
    MissileHit,
    /// Missile collects the star
    PowerUpCollected,
    /// Someone reached the winning score
    MatchWon,
    /// Countdown beat
    CountdownTick,
}

impl AudioCue {
    pub const ALL: [AudioCue; 6] = [
        AudioCue::PaddleHit,
        AudioCue::Miss,
        AudioCue::MissileHit,
        AudioCue::PowerUpCollected,
        AudioCue::MatchWon,
        AudioCue::CountdownTick,
    ];

    /// Tone frequency (Hz) and duration (seconds)
    pub fn tone(&self) -> (f32, f32) {
        match self {
            AudioCue::PaddleHit => (440.0, 0.05),
            AudioCue::Miss => (220.0, 0.05),
            AudioCue::MissileHit => (880.0, 0.1),
            AudioCue::PowerUpCollected => (880.0, 0.1),
            AudioCue::MatchWon => (660.0, 0.2),
            AudioCue::CountdownTick => (330.0, 0.1),
        }
    }

    /// Cue a simulation event should play right away, if any
    ///
    /// Scoring is not mapped here: the match controller paces the miss cues
    /// and the win fanfare itself.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { .. } => Some(AudioCue::PaddleHit),
            GameEvent::MissileHit { .. } => Some(AudioCue::MissileHit),
            GameEvent::PowerUpCollected { .. } => Some(AudioCue::PowerUpCollected),
            _ => None,
        }
    }
}

/// Receives cues and plays them
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        self.played += 1;
        log::debug!("audio cue: {:?}", cue);
    }
}

/// Sink that records every cue (tests and tracing)
impl AudioSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}

/// Output sample rate for generated tones
pub const SAMPLE_RATE: u32 = 44_100;
/// Peak amplitude relative to full scale
const TONE_AMPLITUDE: f32 = 0.5;

/// Pre-rendered 16-bit mono PCM for every cue
#[derive(Debug, Clone)]
pub struct ToneBank {
    tones: Vec<(AudioCue, Vec<i16>)>,
}

impl ToneBank {
    pub fn new() -> Self {
        let tones = AudioCue::ALL
            .iter()
            .map(|&cue| {
                let (freq, secs) = cue.tone();
                (cue, sine_wave(freq, secs, SAMPLE_RATE))
            })
            .collect();
        Self { tones }
    }

    pub fn samples(&self, cue: AudioCue) -> &[i16] {
        self.tones
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, s)| s.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for ToneBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a sine tone as signed 16-bit samples
pub fn sine_wave(freq: f32, secs: f32, sample_rate: u32) -> Vec<i16> {
    let count = (sample_rate as f32 * secs) as usize;
    (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let v = (freq * std::f32::consts::TAU * t).sin() * TONE_AMPLITUDE;
            (v * i16::MAX as f32) as i16
        })
        .collect()
}
