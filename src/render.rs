//! Render snapshots handed to the drawing backend
//!
//! The core has no drawing code. Once per frame it builds a `View` that a
//! `Renderer` turns into pixels (or text, or JSON).

use serde::Serialize;

use crate::sim::{GameState, Paddle, Rect, Score, Side, StarKind};

/// A paddle as drawn: effective height plus status flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub side: Side,
    pub rect: Rect,
    pub stunned: bool,
    pub tall: bool,
    pub fast: bool,
}

impl PaddleView {
    fn new(paddle: &Paddle) -> Self {
        Self {
            side: paddle.side,
            rect: paddle.rect(),
            stunned: paddle.is_stunned(),
            tall: paddle.tall.is_active(),
            fast: paddle.fast_movement.is_active(),
        }
    }

    /// HUD status lines under the score, top to bottom
    pub fn status_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.stunned {
            labels.push("STUNNED");
        }
        if self.tall {
            labels.push("TALL PADDLE");
        }
        if self.fast {
            labels.push("FAST MOVEMENT");
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissileView {
    pub owner: Side,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarView {
    pub kind: StarKind,
    pub rgb: [u8; 3],
    pub rect: Rect,
}

/// Full playfield snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub player: PaddleView,
    pub ai: PaddleView,
    pub ball: Rect,
    pub missiles: Vec<MissileView>,
    pub star: Option<StarView>,
    pub score: Score,
    /// Large centered text (countdown beat), drawn instead of the field
    pub overlay: Option<String>,
}

impl RenderFrame {
    pub fn from_state(state: &GameState, overlay: Option<String>) -> Self {
        Self {
            player: PaddleView::new(&state.player),
            ai: PaddleView::new(&state.ai_paddle),
            ball: state.ball.rect(),
            missiles: state
                .missiles
                .iter()
                .map(|m| MissileView {
                    owner: m.owner,
                    rect: m.rect(),
                })
                .collect(),
            star: state.star.as_ref().map(|s| StarView {
                kind: s.kind,
                rgb: s.kind.rgb(),
                rect: s.rect,
            }),
            score: state.score,
            overlay,
        }
    }
}

/// A vertical list of options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub title: &'static str,
    pub items: Vec<String>,
    pub selected: usize,
    pub hint: Option<&'static str>,
}

/// What the screen shows this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum View {
    Splash { text: &'static str },
    Menu(MenuView),
    Match(RenderFrame),
    EndScreen { headline: String, prompt: &'static str },
    Blank,
}

/// Drawing backend
pub trait Renderer {
    fn draw(&mut self, view: &View);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_frame_reflects_effects() {
        let mut state = GameState::new(10, 0.05, 5);
        state.player.tall.start(POWER_UP_FRAMES);
        state.ai_paddle.stun.start(STUN_FRAMES);
        state.ai_paddle.fast_movement.start(POWER_UP_FRAMES);

        let frame = RenderFrame::from_state(&state, None);
        assert_eq!(frame.player.rect.h, 150);
        assert_eq!(frame.player.status_labels(), vec!["TALL PADDLE"]);
        assert_eq!(frame.ai.status_labels(), vec!["STUNNED", "FAST MOVEMENT"]);
        assert!(frame.star.is_none());
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(10, 0.05, 5);
        let json = serde_json::to_string(&View::Match(RenderFrame::from_state(
            &state,
            Some("3".to_string()),
        )))
        .unwrap();
        assert!(json.contains("\"overlay\":\"3\""));
    }
}
