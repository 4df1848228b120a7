//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in `GameState`.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiPolicy;
use super::rect::Rect;
use super::timer::FrameTimer;
use crate::consts::*;
use crate::settings::sanitize_winning_score;

/// Which end of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, left edge
    Player,
    /// Computer opponent, right edge
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Display name ("Player" / "AI")
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        }
    }

    /// Horizontal direction of travel away from this side
    pub fn outward(self) -> i32 {
        match self {
            Side::Player => 1,
            Side::Ai => -1,
        }
    }
}

/// Power-up star types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarKind {
    /// Yellow: stuns the opponent of whoever hit it
    Stun,
    /// Blue: 1.5x paddle height for the hitter
    TallPaddle,
    /// Green: 1.25x paddle speed for the hitter
    FastMovement,
}

impl StarKind {
    pub const ALL: [StarKind; 3] = [StarKind::Stun, StarKind::TallPaddle, StarKind::FastMovement];

    pub fn color_name(self) -> &'static str {
        match self {
            StarKind::Stun => "yellow",
            StarKind::TallPaddle => "blue",
            StarKind::FastMovement => "green",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            StarKind::Stun => [255, 255, 0],
            StarKind::TallPaddle => [0, 0, 255],
            StarKind::FastMovement => [0, 255, 0],
        }
    }
}

/// Timed paddle effects granted by stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    TallPaddle,
    FastMovement,
}

/// A paddle. `x` is fixed, the vertical center moves.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub x: i32,
    pub center_y: i32,
    pub stun: FrameTimer,
    pub tall: FrameTimer,
    pub fast_movement: FrameTimer,
    pub missile_cooldown: FrameTimer,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Player => PADDLE_MARGIN,
            Side::Ai => ARENA_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            side,
            x,
            center_y: ARENA_HEIGHT / 2,
            stun: FrameTimer::default(),
            tall: FrameTimer::default(),
            fast_movement: FrameTimer::default(),
            missile_cooldown: FrameTimer::default(),
        }
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun.is_active()
    }

    /// Effective height (base, or 1.5x while tall)
    pub fn height(&self) -> i32 {
        if self.tall.is_active() {
            (PADDLE_HEIGHT as f32 * TALL_PADDLE_FACTOR) as i32
        } else {
            PADDLE_HEIGHT
        }
    }

    /// Movement per frame (base, or 1.25x while fast)
    pub fn speed(&self) -> i32 {
        if self.fast_movement.is_active() {
            (PADDLE_SPEED as f32 * FAST_MOVEMENT_FACTOR) as i32
        } else {
            PADDLE_SPEED
        }
    }

    /// Collision rectangle at effective height
    pub fn rect(&self) -> Rect {
        let h = self.height();
        Rect::new(self.x, self.center_y - h / 2, PADDLE_WIDTH, h)
    }

    /// Move vertically by `dy`, stopping at the arena edges
    pub fn move_by(&mut self, dy: i32) {
        self.center_y += dy;
        self.clamp_to_arena();
    }

    /// Keep the whole paddle inside `[0, ARENA_HEIGHT]`
    pub fn clamp_to_arena(&mut self) {
        let h = self.height();
        let min = h / 2;
        let max = ARENA_HEIGHT - (h - h / 2);
        self.center_y = self.center_y.clamp(min, max);
    }

    pub fn can_fire(&self) -> bool {
        !self.is_stunned() && !self.missile_cooldown.is_active()
    }

    /// Launch a missile from the paddle face and start the cooldown
    pub fn fire(&mut self) -> Missile {
        self.missile_cooldown.start(MISSILE_COOLDOWN_FRAMES);
        let rect = self.rect();
        let x = match self.side {
            Side::Player => rect.right(),
            Side::Ai => rect.left() - MISSILE_SIZE,
        };
        Missile {
            owner: self.side,
            pos: IVec2::new(x, rect.center_y() - MISSILE_SIZE / 2),
        }
    }

    /// Reset position and all timers (new match)
    pub fn reset(&mut self) {
        *self = Self::new(self.side);
    }
}

/// The ball. Position is the top-left corner.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
    /// Grows 5% per paddle hit, back to 1.0 on every score
    pub speed_multiplier: f32,
}

impl Ball {
    /// Ball parked at the arena center, not moving
    pub fn new() -> Self {
        Self {
            pos: Self::center(),
            vel: IVec2::ZERO,
            speed_multiplier: 1.0,
        }
    }

    fn center() -> IVec2 {
        IVec2::new(
            ARENA_WIDTH / 2 - BALL_SIZE / 2,
            ARENA_HEIGHT / 2 - BALL_SIZE / 2,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, BALL_SIZE, BALL_SIZE)
    }

    /// Back to the center, heading horizontally in `direction` (+1 right,
    /// -1 left) with a random vertical direction
    pub fn serve<R: Rng + ?Sized>(&mut self, direction: i32, rng: &mut R) {
        let vy = if rng.random_bool(0.5) { 1 } else { -1 };
        self.pos = Self::center();
        self.vel = IVec2::new(BALL_SPEED * direction.signum(), BALL_SPEED * vy);
        self.speed_multiplier = 1.0;
    }

    /// Per-frame displacement, truncated toward zero
    pub fn displacement(&self) -> IVec2 {
        IVec2::new(
            (self.vel.x as f32 * self.speed_multiplier) as i32,
            (self.vel.y as f32 * self.speed_multiplier) as i32,
        )
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// A missile in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missile {
    pub owner: Side,
    pub pos: IVec2,
}

impl Missile {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, MISSILE_SIZE, MISSILE_SIZE)
    }

    pub fn advance(&mut self) {
        self.pos.x += MISSILE_SPEED * self.owner.outward();
    }

    /// Past the far edge for its direction of travel
    pub fn out_of_arena(&self) -> bool {
        match self.owner {
            Side::Player => self.pos.x > ARENA_WIDTH,
            Side::Ai => self.pos.x < 0,
        }
    }
}

/// The power-up star
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    pub kind: StarKind,
    pub rect: Rect,
}

impl Star {
    /// Random kind, centered horizontally at a random height
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let y = rng.random_range(STAR_MARGIN..=ARENA_HEIGHT - STAR_MARGIN);
        let kind = StarKind::ALL[rng.random_range(0..StarKind::ALL.len())];
        Self {
            kind,
            rect: Rect::new(ARENA_WIDTH / 2 - STAR_SIZE / 2, y, STAR_SIZE, STAR_SIZE),
        }
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    pub fn increment(&mut self, side: Side) -> u32 {
        let points = match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        };
        *points += 1;
        *points
    }
}

/// Things that happened during one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { side: Side },
    WallBounce,
    Scored { scorer: Side },
    MatchWon { winner: Side },
    MissileFired { owner: Side },
    MissileHit { target: Side },
    StarSpawned { kind: StarKind },
    PowerUpCollected { kind: StarKind, by: Side },
    EffectExpired { side: Side, effect: Effect },
    StunEnded { side: Side },
}

/// Complete simulation state for one match
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from (for logging)
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Paddle,
    pub ai_paddle: Paddle,
    pub ball: Ball,
    pub missiles: Vec<Missile>,
    pub star: Option<Star>,
    /// Frames spent without a star on the field
    pub star_timer: u32,
    pub score: Score,
    pub winning_score: u32,
    pub ai: AiPolicy,
    /// Set once a side reaches `winning_score`; the simulation stops
    pub winner: Option<Side>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh match: paddles centered, scores zeroed, ball served randomly
    pub fn new(winning_score: u32, miss_chance: f64, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Paddle::new(Side::Player),
            ai_paddle: Paddle::new(Side::Ai),
            ball: Ball::new(),
            missiles: Vec::new(),
            star: None,
            star_timer: 0,
            score: Score::default(),
            winning_score: sanitize_winning_score(i64::from(winning_score)),
            ai: AiPolicy::new(miss_chance),
            winner: None,
            time_ticks: 0,
        };

        let direction = if state.rng.random_bool(0.5) { 1 } else { -1 };
        state.ball.serve(direction, &mut state.rng);

        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai_paddle,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddles_start_centered() {
        let state = GameState::new(10, 0.05, 1);
        assert_eq!(state.player.rect(), Rect::new(30, 250, 10, 100));
        assert_eq!(state.ai_paddle.rect(), Rect::new(760, 250, 10, 100));
    }

    #[test]
    fn test_winning_score_repaired() {
        assert_eq!(GameState::new(0, 0.05, 1).winning_score, 10);
        assert_eq!(GameState::new(150, 0.05, 1).winning_score, 99);
        assert_eq!(GameState::new(3, 0.05, 1).winning_score, 3);
    }

    #[test]
    fn test_tall_paddle_grows_around_center() {
        let mut paddle = Paddle::new(Side::Player);
        paddle.tall.start(POWER_UP_FRAMES);
        assert_eq!(paddle.height(), 150);
        assert_eq!(paddle.rect().center_y(), 300);
    }

    #[test]
    fn test_fast_movement_speed() {
        let mut paddle = Paddle::new(Side::Ai);
        assert_eq!(paddle.speed(), 7);
        paddle.fast_movement.start(POWER_UP_FRAMES);
        assert_eq!(paddle.speed(), 8);
    }

    #[test]
    fn test_clamp_to_arena() {
        let mut paddle = Paddle::new(Side::Player);
        paddle.move_by(-1000);
        assert_eq!(paddle.rect().top(), 0);
        paddle.move_by(1000);
        assert_eq!(paddle.rect().bottom(), ARENA_HEIGHT);

        // Growing at the bottom edge pushes the paddle back inside
        paddle.tall.start(POWER_UP_FRAMES);
        paddle.clamp_to_arena();
        assert_eq!(paddle.rect().bottom(), ARENA_HEIGHT);
    }

    #[test]
    fn test_missile_spawn_points() {
        let mut player = Paddle::new(Side::Player);
        let missile = player.fire();
        assert_eq!(missile.pos, IVec2::new(40, 295));
        assert!(!player.can_fire());

        let mut ai = Paddle::new(Side::Ai);
        let missile = ai.fire();
        assert_eq!(missile.pos, IVec2::new(750, 295));
    }

    #[test]
    fn test_serve_resets_to_center() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new();
        ball.pos = IVec2::new(5, 5);
        ball.speed_multiplier = 1.3;
        ball.serve(-1, &mut rng);
        assert_eq!(ball.pos, IVec2::new(390, 290));
        assert_eq!(ball.vel.x, -6);
        assert_eq!(ball.vel.y.abs(), 6);
        assert_eq!(ball.speed_multiplier, 1.0);
    }

    #[test]
    fn test_star_spawns_in_band() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let star = Star::spawn(&mut rng);
            assert_eq!(star.rect.x, 390);
            assert!(star.rect.y >= 50 && star.rect.y <= 550);
        }
    }
}
