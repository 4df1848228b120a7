//! Missile Pong - Pong against an adaptive AI, with missiles and power-up stars
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (physics, collisions, AI, game state)
//! - `game`: Match controller (countdowns, scoring pause, winner)
//! - `app`: Screen flow (splash, menus, match, end screen)
//! - `input` / `render` / `audio`: Collaborator interfaces
//! - `settings`: Winning score and AI difficulty, persisted as `KEY = value`

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod menu;
pub mod render;
pub mod settings;
pub mod sim;

pub use app::{App, Screen};
pub use game::{Game, MatchPhase};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
///
/// Durations are frame counts at `SIM_HZ`; they are the authoritative values.
pub mod consts {
    /// Simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted by one `Game::advance` call
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: i32 = 800;
    pub const ARENA_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 100;
    pub const PADDLE_SPEED: i32 = 7;
    /// Gap between the arena edge and the player paddle
    pub const PADDLE_MARGIN: i32 = 30;
    pub const TALL_PADDLE_FACTOR: f32 = 1.5;
    pub const FAST_MOVEMENT_FACTOR: f32 = 1.25;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 20;
    pub const BALL_SPEED: i32 = 6;
    /// Speed multiplier growth per paddle hit
    pub const BALL_SPEEDUP: f32 = 1.05;
    /// Vertical velocity perturbation range on paddle hit (inclusive)
    pub const BALL_DEFLECT: i32 = 2;

    /// Missiles
    pub const MISSILE_SIZE: i32 = 10;
    pub const MISSILE_SPEED: i32 = 8;
    pub const MISSILE_COOLDOWN_FRAMES: u32 = 90;
    /// AI fire chance per frame
    pub const AI_FIRE_CHANCE: f64 = 0.01;

    /// Power-up star
    pub const STAR_SIZE: i32 = 20;
    pub const STAR_SPAWN_FRAMES: u32 = 600;
    /// Keep-out band above and below the star's spawn range
    pub const STAR_MARGIN: i32 = 50;
    pub const POWER_UP_FRAMES: u32 = 300;
    pub const STUN_FRAMES: u32 = 30;

    /// AI policy
    pub const AI_MISS_PROXIMITY: i32 = 100;
    pub const AI_MISS_MIN_FRAMES: u32 = 20;
    pub const AI_MISS_MAX_FRAMES: u32 = 40;

    /// Controller pacing
    pub const COUNTDOWN_BEAT_FRAMES: u32 = 60;
    pub const PRE_ROUND_GO_FRAMES: u32 = 30;
    pub const POST_SCORE_GO_FRAMES: u32 = 90;
    pub const FIELD_REVEAL_FRAMES: u32 = 60;
    pub const MISS_CUE_COUNT: u32 = 3;
    /// ~60 ms between miss cues
    pub const MISS_CUE_INTERVAL_FRAMES: u32 = 4;
    pub const SPLASH_FRAMES: u32 = 5 * SIM_HZ;

    /// Convert a frame count to seconds of simulated time
    #[inline]
    pub fn frames_to_secs(frames: u32) -> f32 {
        frames as f32 * SIM_DT
    }
}
