//! AI opponent policy
//!
//! The AI tracks the ball's vertical center. Its fallibility comes from
//! miss episodes: while the ball approaches, each frame may roll a miss,
//! after which the paddle ignores the ball for 20-40 frames. One roll
//! produces a sustained lapse instead of single-frame jitter.

use rand::Rng;

use super::rect::Rect;
use super::state::Paddle;
use crate::consts::*;

/// Vertical movement decision for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDecision {
    Up,
    Down,
    Hold,
}

impl AiDecision {
    /// Signed displacement for a paddle moving at `speed`
    pub fn dy(self, speed: i32) -> i32 {
        match self {
            AiDecision::Up => -speed,
            AiDecision::Down => speed,
            AiDecision::Hold => 0,
        }
    }
}

/// Miss-episode state and difficulty for the AI paddle
#[derive(Debug, Clone)]
pub struct AiPolicy {
    miss_chance: f64,
    miss_frames: u32,
    /// Number of miss episodes started (diagnostics)
    pub episodes: u32,
}

impl AiPolicy {
    pub fn new(miss_chance: f64) -> Self {
        Self {
            miss_chance: miss_chance.clamp(0.0, 1.0),
            miss_frames: 0,
            episodes: 0,
        }
    }

    pub fn miss_chance(&self) -> f64 {
        self.miss_chance
    }

    #[inline]
    pub fn in_miss_episode(&self) -> bool {
        self.miss_frames > 0
    }

    /// Abort any miss episode (called when a point is scored)
    pub fn clear_miss(&mut self) {
        self.miss_frames = 0;
    }

    /// Decide this frame's movement for `paddle` given the ball
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        ball: &Rect,
        ball_vx: i32,
        paddle: &Paddle,
        rng: &mut R,
    ) -> AiDecision {
        if paddle.is_stunned() {
            return AiDecision::Hold;
        }

        let paddle_rect = paddle.rect();

        if ball_vx > 0
            && !self.in_miss_episode()
            && rng.random_bool(self.miss_chance)
            && (ball.center_y() - paddle_rect.center_y()).abs() < AI_MISS_PROXIMITY
        {
            self.miss_frames = rng.random_range(AI_MISS_MIN_FRAMES..=AI_MISS_MAX_FRAMES);
            self.episodes += 1;
            log::debug!("AI miss episode for {} frames", self.miss_frames);
        }

        if self.in_miss_episode() {
            self.miss_frames -= 1;
            if self.in_miss_episode() {
                return AiDecision::Hold;
            }
        }

        let target = ball.center_y();
        let center = paddle_rect.center_y();
        if center < target && paddle_rect.bottom() < ARENA_HEIGHT {
            AiDecision::Down
        } else if center > target && paddle_rect.top() > 0 {
            AiDecision::Up
        } else {
            AiDecision::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(y: i32) -> Rect {
        Rect::new(400, y, BALL_SIZE, BALL_SIZE)
    }

    #[test]
    fn test_tracks_ball() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ai = AiPolicy::new(0.0);
        let paddle = Paddle::new(Side::Ai);

        assert_eq!(ai.decide(&ball_at(500), 6, &paddle, &mut rng), AiDecision::Down);
        assert_eq!(ai.decide(&ball_at(20), 6, &paddle, &mut rng), AiDecision::Up);
        assert_eq!(ai.decide(&ball_at(290), 6, &paddle, &mut rng), AiDecision::Hold);
    }

    #[test]
    fn test_stunned_holds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ai = AiPolicy::new(1.0);
        let mut paddle = Paddle::new(Side::Ai);
        paddle.stun.start(STUN_FRAMES);

        assert_eq!(ai.decide(&ball_at(500), 6, &paddle, &mut rng), AiDecision::Hold);
        // No miss roll happens while stunned
        assert!(!ai.in_miss_episode());
    }

    #[test]
    fn test_certain_miss_freezes_tracking() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ai = AiPolicy::new(1.0);
        let paddle = Paddle::new(Side::Ai);

        // Ball close to the paddle center and approaching
        let ball = ball_at(330);
        assert_eq!(ai.decide(&ball, 6, &paddle, &mut rng), AiDecision::Hold);
        assert!(ai.in_miss_episode());
        assert_eq!(ai.episodes, 1);

        let mut frames = 1;
        while ai.in_miss_episode() {
            let decision = ai.decide(&ball, -6, &paddle, &mut rng);
            frames += 1;
            if ai.in_miss_episode() {
                assert_eq!(decision, AiDecision::Hold);
            }
        }
        assert!((AI_MISS_MIN_FRAMES..=AI_MISS_MAX_FRAMES).contains(&frames));
    }

    #[test]
    fn test_no_miss_when_ball_far_or_receding() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ai = AiPolicy::new(1.0);
        let paddle = Paddle::new(Side::Ai);

        // Too far from the paddle center
        ai.decide(&ball_at(500), 6, &paddle, &mut rng);
        assert!(!ai.in_miss_episode());
        // Moving away
        ai.decide(&ball_at(300), -6, &paddle, &mut rng);
        assert!(!ai.in_miss_episode());
    }

    #[test]
    fn test_clear_miss() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut ai = AiPolicy::new(1.0);
        let paddle = Paddle::new(Side::Ai);
        ai.decide(&ball_at(300), 6, &paddle, &mut rng);
        assert!(ai.in_miss_episode());
        ai.clear_miss();
        assert!(!ai.in_miss_episode());
    }
}
