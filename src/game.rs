//! Match controller
//!
//! Sequences one match: the opening countdown, play, the pause after each
//! point, the countdown before the next serve and the winner. Pauses are
//! phases counted in frames, so the loop keeps running (and keeps checking
//! for quit) while nothing moves.

use serde::Serialize;

use crate::audio::{AudioCue, AudioSink};
use crate::consts::*;
use crate::input::InputFrame;
use crate::render::RenderFrame;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Score, Side, tick};

/// Which countdown is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownKind {
    /// Before the first serve of a match
    PreRound,
    /// After a point, before the next serve
    PostScore,
}

/// One step of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// Overlay text; empty shows the playfield
    pub label: &'static str,
    pub frames: u32,
    pub cue: bool,
}

const PRE_ROUND_BEATS: [Beat; 4] = [
    Beat { label: "3", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "2", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "1", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "GO!", frames: PRE_ROUND_GO_FRAMES, cue: true },
];

const POST_SCORE_BEATS: [Beat; 5] = [
    Beat { label: "3", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "2", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "1", frames: COUNTDOWN_BEAT_FRAMES, cue: true },
    Beat { label: "GO!", frames: POST_SCORE_GO_FRAMES, cue: true },
    // Show the field for a moment before play resumes
    Beat { label: "", frames: FIELD_REVEAL_FRAMES, cue: false },
];

impl CountdownKind {
    pub fn beats(self) -> &'static [Beat] {
        match self {
            CountdownKind::PreRound => &PRE_ROUND_BEATS,
            CountdownKind::PostScore => &POST_SCORE_BEATS,
        }
    }

    /// Total length in frames
    pub fn frames(self) -> u32 {
        self.beats().iter().map(|b| b.frames).sum()
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    /// Created, not started
    Idle,
    Countdown {
        kind: CountdownKind,
        beat: usize,
        frames_left: u32,
    },
    /// Simulation runs every frame
    Playing,
    /// Miss cues play before the win check
    ScoringPause {
        scorer: Side,
        cues_played: u32,
        frames_left: u32,
    },
    /// Someone reached the winning score
    MatchOver { winner: Side },
    /// Quit before the match finished
    Aborted,
}

impl MatchPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchPhase::MatchOver { .. } | MatchPhase::Aborted)
    }
}

/// Result of a finished (or abandoned) match
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub winner: Option<Side>,
    pub score: Score,
    pub frames: u64,
    pub seed: u64,
    pub ai_miss_episodes: u32,
}

/// One match from countdown to winner
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    phase: MatchPhase,
    settings: Settings,
    /// Unsimulated wall-clock time (seconds)
    accumulator: f32,
    /// Input waiting for the next frame; actions are consumed once
    pending: InputFrame,
    /// Frames run by the controller, in any phase
    frames: u64,
}

impl Game {
    /// New match with a random seed
    pub fn new(settings: Settings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        log::info!(
            "New match: first to {}, AI {} (seed {})",
            settings.winning_score,
            settings.ai_difficulty.as_str(),
            seed
        );
        Self {
            state: GameState::new(settings.winning_score, settings.miss_chance(), seed),
            phase: MatchPhase::Idle,
            settings,
            accumulator: 0.0,
            pending: InputFrame::default(),
            frames: 0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::MatchOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            winner: self.winner(),
            score: self.state.score,
            frames: self.frames,
            seed: self.state.seed,
            ai_miss_episodes: self.state.ai.episodes,
        }
    }

    /// Leave `Idle` and begin the opening countdown
    pub fn start(&mut self, audio: &mut dyn AudioSink) {
        if self.phase == MatchPhase::Idle {
            self.enter_countdown(CountdownKind::PreRound, audio);
        }
    }

    /// Run whole frames for `dt` seconds of wall-clock time
    ///
    /// Returns the simulation events of every frame that ran.
    pub fn advance(
        &mut self,
        dt: f32,
        input: &InputFrame,
        audio: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        self.pending.held = input.held;
        self.pending.actions.extend_from_slice(&input.actions);

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pending.clone();
            events.extend(self.step(&input, audio));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.clear_actions();
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        events
    }

    /// Advance the match by exactly one frame
    pub fn step(&mut self, input: &InputFrame, audio: &mut dyn AudioSink) -> Vec<GameEvent> {
        if self.phase.is_finished() {
            return Vec::new();
        }
        if input.quit_requested() {
            log::info!("Match aborted at {} - {}", self.state.score.player, self.state.score.ai);
            self.phase = MatchPhase::Aborted;
            return Vec::new();
        }
        self.frames += 1;

        match self.phase {
            MatchPhase::Idle | MatchPhase::MatchOver { .. } | MatchPhase::Aborted => Vec::new(),

            MatchPhase::Countdown {
                kind,
                beat,
                frames_left,
            } => {
                if frames_left > 1 {
                    self.phase = MatchPhase::Countdown {
                        kind,
                        beat,
                        frames_left: frames_left - 1,
                    };
                } else if let Some(next) = kind.beats().get(beat + 1) {
                    self.phase = MatchPhase::Countdown {
                        kind,
                        beat: beat + 1,
                        frames_left: next.frames,
                    };
                    if next.cue {
                        audio.play(AudioCue::CountdownTick);
                    }
                } else {
                    self.phase = MatchPhase::Playing;
                }
                Vec::new()
            }

            MatchPhase::Playing => {
                let events = tick(&mut self.state, &input.tick_input());
                for event in &events {
                    if let Some(cue) = AudioCue::for_event(event) {
                        audio.play(cue);
                    }
                    if let GameEvent::Scored { scorer } = *event {
                        audio.play(AudioCue::Miss);
                        self.phase = MatchPhase::ScoringPause {
                            scorer,
                            cues_played: 1,
                            frames_left: MISS_CUE_INTERVAL_FRAMES,
                        };
                    }
                }
                events
            }

            MatchPhase::ScoringPause {
                scorer,
                cues_played,
                frames_left,
            } => {
                if frames_left > 1 {
                    self.phase = MatchPhase::ScoringPause {
                        scorer,
                        cues_played,
                        frames_left: frames_left - 1,
                    };
                } else if cues_played < MISS_CUE_COUNT {
                    audio.play(AudioCue::Miss);
                    self.phase = MatchPhase::ScoringPause {
                        scorer,
                        cues_played: cues_played + 1,
                        frames_left: MISS_CUE_INTERVAL_FRAMES,
                    };
                } else if let Some(winner) = self.state.winner {
                    audio.play(AudioCue::MatchWon);
                    log::info!(
                        "Match over: {} wins {} - {}",
                        winner.label(),
                        self.state.score.player,
                        self.state.score.ai
                    );
                    self.phase = MatchPhase::MatchOver { winner };
                } else {
                    self.enter_countdown(CountdownKind::PostScore, audio);
                }
                Vec::new()
            }
        }
    }

    fn enter_countdown(&mut self, kind: CountdownKind, audio: &mut dyn AudioSink) {
        let first = kind.beats()[0];
        if first.cue {
            audio.play(AudioCue::CountdownTick);
        }
        self.phase = MatchPhase::Countdown {
            kind,
            beat: 0,
            frames_left: first.frames,
        };
    }

    /// Countdown text to draw instead of the field, if any
    pub fn overlay(&self) -> Option<&'static str> {
        match self.phase {
            MatchPhase::Countdown { kind, beat, .. } => kind
                .beats()
                .get(beat)
                .map(|b| b.label)
                .filter(|label| !label.is_empty()),
            _ => None,
        }
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> RenderFrame {
        RenderFrame::from_state(&self.state, self.overlay().map(str::to_string))
    }
}
