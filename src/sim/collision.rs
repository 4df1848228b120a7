//! Collision tests between the ball, walls, goals and paddles
//!
//! All tests are direction-aware: a contact only counts while the ball is
//! moving into the surface, so a ball still overlapping after a bounce is
//! not bounced again.

use super::rect::Rect;
use super::state::Side;
use crate::consts::*;

/// Which horizontal wall the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Wall the ball is touching while moving into it, if any
pub fn ball_wall_contact(ball: &Rect, vy: i32) -> Option<Wall> {
    if ball.top() <= 0 && vy < 0 {
        Some(Wall::Top)
    } else if ball.bottom() >= ARENA_HEIGHT && vy > 0 {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Side that scores if the ball has crossed a goal line
pub fn goal_crossed(ball: &Rect) -> Option<Side> {
    if ball.left() <= 0 {
        Some(Side::Ai)
    } else if ball.right() >= ARENA_WIDTH {
        Some(Side::Player)
    } else {
        None
    }
}

/// True when the ball overlaps `paddle` while travelling toward it
pub fn paddle_should_bounce(ball: &Rect, vx: i32, paddle: &Rect, side: Side) -> bool {
    let approaching = match side {
        Side::Player => vx < 0,
        Side::Ai => vx > 0,
    };
    approaching && ball.intersects(paddle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: i32, y: i32) -> Rect {
        Rect::new(x, y, BALL_SIZE, BALL_SIZE)
    }

    #[test]
    fn test_wall_contact_requires_approach() {
        assert_eq!(ball_wall_contact(&ball(100, -3), -6), Some(Wall::Top));
        assert_eq!(ball_wall_contact(&ball(100, -3), 6), None);
        assert_eq!(ball_wall_contact(&ball(100, 582), 6), Some(Wall::Bottom));
        assert_eq!(ball_wall_contact(&ball(100, 582), -6), None);
        assert_eq!(ball_wall_contact(&ball(100, 300), 6), None);
    }

    #[test]
    fn test_goal_crossed() {
        assert_eq!(goal_crossed(&ball(0, 300)), Some(Side::Ai));
        assert_eq!(goal_crossed(&ball(780, 300)), Some(Side::Player));
        assert_eq!(goal_crossed(&ball(400, 300)), None);
    }

    #[test]
    fn test_paddle_bounce_only_when_approaching() {
        let paddle = Rect::new(30, 250, PADDLE_WIDTH, PADDLE_HEIGHT);
        let overlapping = ball(26, 290);
        assert!(paddle_should_bounce(&overlapping, -6, &paddle, Side::Player));
        assert!(!paddle_should_bounce(&overlapping, 6, &paddle, Side::Player));

        let ai_paddle = Rect::new(760, 250, PADDLE_WIDTH, PADDLE_HEIGHT);
        let near_ai = ball(745, 290);
        assert!(paddle_should_bounce(&near_ai, 6, &ai_paddle, Side::Ai));
        assert!(!paddle_should_bounce(&near_ai, -6, &ai_paddle, Side::Ai));
    }
}
