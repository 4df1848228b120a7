//! Frame countdown timers
//!
//! Every cooldown and effect in the simulation counts whole frames. The
//! match controller decides how many frames run per wall-clock second.

use serde::{Deserialize, Serialize};

/// Remaining frames of a cooldown or effect. Zero means inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTimer {
    remaining: u32,
}

impl FrameTimer {
    /// Arm the timer for `frames` frames, replacing any time left
    pub fn start(&mut self, frames: u32) {
        self.remaining = frames;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one frame. Returns true on the frame the timer runs out.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_exactly_once() {
        let mut timer = FrameTimer::default();
        timer.start(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert!(!timer.is_active());
        // Stays at zero without reporting again
        assert!(!timer.tick());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_restart_replaces_remaining() {
        let mut timer = FrameTimer::default();
        timer.start(10);
        timer.tick();
        timer.start(30);
        assert_eq!(timer.remaining(), 30);
    }
}
