//! Fixed timestep simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per frame, durations counted in frames
//! - Randomness only from the state's own RNG
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;

pub use ai::{AiDecision, AiPolicy};
pub use collision::{Wall, ball_wall_contact, goal_crossed, paddle_should_bounce};
pub use rect::Rect;
pub use state::{
    Ball, Effect, GameEvent, GameState, Missile, Paddle, Score, Side, Star, StarKind,
};
pub use tick::{TickInput, tick};
pub use timer::FrameTimer;
