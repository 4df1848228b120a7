//! Fixed timestep simulation tick
//!
//! Advances the match by exactly one frame and reports what happened.

use rand::Rng;

use super::collision::{ball_wall_contact, goal_crossed, paddle_should_bounce};
use super::state::{Effect, GameEvent, GameState, Side, Star, StarKind};
use crate::consts::*;

/// Player commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move up (held)
    pub up: bool,
    /// Move down (held)
    pub down: bool,
    /// Fire a missile (edge-triggered)
    pub fire: bool,
}

/// Advance the game state by one frame
///
/// Does nothing once a winner has been decided.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }

    state.time_ticks += 1;

    // Cooldowns and power-up effects
    for side in [Side::Player, Side::Ai] {
        let paddle = state.paddle_mut(side);
        paddle.missile_cooldown.tick();
        if paddle.tall.tick() {
            events.push(GameEvent::EffectExpired {
                side,
                effect: Effect::TallPaddle,
            });
        }
        if paddle.fast_movement.tick() {
            events.push(GameEvent::EffectExpired {
                side,
                effect: Effect::FastMovement,
            });
        }
        paddle.clamp_to_arena();
    }

    // Star spawning
    if state.star.is_none() {
        state.star_timer += 1;
        if state.star_timer >= STAR_SPAWN_FRAMES {
            let star = Star::spawn(&mut state.rng);
            log::debug!("Star spawned: {} at y={}", star.kind.color_name(), star.rect.y);
            events.push(GameEvent::StarSpawned { kind: star.kind });
            state.star = Some(star);
            state.star_timer = 0;
        }
    }

    // Missile launches
    if input.fire && state.player.can_fire() {
        let missile = state.player.fire();
        state.missiles.push(missile);
        events.push(GameEvent::MissileFired { owner: Side::Player });
    }
    if state.ai_paddle.can_fire() && state.rng.random_bool(AI_FIRE_CHANCE) {
        let missile = state.ai_paddle.fire();
        state.missiles.push(missile);
        events.push(GameEvent::MissileFired { owner: Side::Ai });
    }

    // Player movement
    if !state.player.is_stunned() {
        let speed = state.player.speed();
        let mut dy = 0;
        if input.up {
            dy -= speed;
        }
        if input.down {
            dy += speed;
        }
        state.player.move_by(dy);
    }

    // AI movement
    let decision = state.ai.decide(
        &state.ball.rect(),
        state.ball.vel.x,
        &state.ai_paddle,
        &mut state.rng,
    );
    let speed = state.ai_paddle.speed();
    state.ai_paddle.move_by(decision.dy(speed));

    // Stuns run out after movement so a stun blocks exactly STUN_FRAMES moves
    for side in [Side::Player, Side::Ai] {
        if state.paddle_mut(side).stun.tick() {
            events.push(GameEvent::StunEnded { side });
        }
    }

    update_missiles(state, &mut events);
    update_ball(state, &mut events);

    events
}

/// Move missiles and resolve their hits on paddles and the star
fn update_missiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut missiles = std::mem::take(&mut state.missiles);

    missiles.retain_mut(|missile| {
        missile.advance();
        if missile.out_of_arena() {
            return false;
        }

        let target = missile.owner.opponent();
        let rect = missile.rect();

        let paddle = state.paddle_mut(target);
        if rect.intersects(&paddle.rect()) {
            if !paddle.is_stunned() {
                paddle.stun.start(STUN_FRAMES);
                log::debug!("{} paddle stunned by missile", target.label());
                events.push(GameEvent::MissileHit { target });
            }
            return false;
        }

        let struck_star = state
            .star
            .as_ref()
            .is_some_and(|star| rect.intersects(&star.rect));
        if struck_star {
            if let Some(star) = state.star.take() {
                apply_power_up(state, star.kind, missile.owner);
                events.push(GameEvent::PowerUpCollected {
                    kind: star.kind,
                    by: missile.owner,
                });
            }
            return false;
        }

        true
    });

    state.missiles = missiles;
}

/// Apply a star's effect for a missile fired by `by`
fn apply_power_up(state: &mut GameState, kind: StarKind, by: Side) {
    log::debug!("{} collected {} star", by.label(), kind.color_name());
    match kind {
        StarKind::Stun => state.paddle_mut(by.opponent()).stun.start(STUN_FRAMES),
        StarKind::TallPaddle => {
            let paddle = state.paddle_mut(by);
            paddle.tall.start(POWER_UP_FRAMES);
            paddle.clamp_to_arena();
        }
        StarKind::FastMovement => state.paddle_mut(by).fast_movement.start(POWER_UP_FRAMES),
    }
}

/// Move the ball, bounce it off walls and paddles, and handle scoring
fn update_ball(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let displacement = state.ball.displacement();
    state.ball.pos += displacement;

    if ball_wall_contact(&state.ball.rect(), state.ball.vel.y).is_some() {
        state.ball.vel.y = -state.ball.vel.y;
        events.push(GameEvent::WallBounce);
    }

    let mut hit_paddle = false;
    for side in [Side::Player, Side::Ai] {
        let paddle_rect = state.paddle(side).rect();
        if paddle_should_bounce(&state.ball.rect(), state.ball.vel.x, &paddle_rect, side) {
            state.ball.vel.x = -state.ball.vel.x;
            state.ball.vel.y += state.rng.random_range(-BALL_DEFLECT..=BALL_DEFLECT);
            hit_paddle = true;
            events.push(GameEvent::PaddleHit { side });
        }
    }
    if hit_paddle {
        state.ball.speed_multiplier *= BALL_SPEEDUP;
    }

    if let Some(scorer) = goal_crossed(&state.ball.rect()) {
        let points = state.score.increment(scorer);
        log::info!(
            "{} scores ({} - {})",
            scorer.label(),
            state.score.player,
            state.score.ai
        );
        events.push(GameEvent::Scored { scorer });

        // Serve toward the side that just scored
        state.ball.serve(-scorer.outward(), &mut state.rng);
        state.ai.clear_miss();

        if points >= state.winning_score {
            log::info!("{} wins the match", scorer.label());
            state.winner = Some(scorer);
            events.push(GameEvent::MatchWon { winner: scorer });
        }
    }
}
