//! Input snapshot supplied once per frame by the platform layer
//!
//! Held intents (keys currently down) and edge-triggered actions (key-down
//! events since the previous frame) are kept apart.

use crate::sim::TickInput;

/// Keys held down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldIntent {
    /// Up arrow / W
    pub up: bool,
    /// Down arrow / S
    pub down: bool,
}

/// Discrete key-down or click events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    /// Enter
    Confirm,
    /// Space: missile in a match, select in menus
    Fire,
    /// Window close
    Quit,
    /// Pointer click on the menu entry at this index
    Pick(usize),
}

/// Everything the platform reports for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: HeldIntent,
    pub actions: Vec<InputAction>,
}

impl InputFrame {
    pub fn with_actions(actions: impl IntoIterator<Item = InputAction>) -> Self {
        Self {
            held: HeldIntent::default(),
            actions: actions.into_iter().collect(),
        }
    }

    pub fn pressed(&self, action: InputAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn quit_requested(&self) -> bool {
        self.pressed(InputAction::Quit)
    }

    /// Drop the edge-triggered actions once they have been consumed
    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    /// Simulation commands for this frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.held.up,
            down: self.held.down,
            fire: self.pressed(InputAction::Fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_input_mapping() {
        let mut frame = InputFrame::with_actions([InputAction::Fire]);
        frame.held.up = true;
        let tick = frame.tick_input();
        assert!(tick.up && !tick.down && tick.fire);

        frame.clear_actions();
        assert!(!frame.tick_input().fire);
        // Held state survives clearing
        assert!(frame.tick_input().up);
    }
}
