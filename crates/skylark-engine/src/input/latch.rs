//! Held-key state and edge-triggered requests on top of the raw event queue.
//!
//! The queue delivers transitions; the simulation wants levels ("is left
//! held right now") plus two one-shot edges (jump, pause). The latch is the
//! conversion layer: fed once per tick from drained events, consumed once
//! per tick by the game.

use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;

/// Physical key code per action. One key per action, no remapping UI.
///
/// Defaults follow the common keyboard layout for side scrollers:
/// A / D / Space / Escape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: u32,
    pub right: u32,
    pub jump: u32,
    pub pause: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: 65,
            right: 68,
            jump: 32,
            pause: 27,
        }
    }
}

impl KeyBindings {
    /// Whether the event is the pause key going down.
    pub fn is_pause_down(&self, event: &InputEvent) -> bool {
        matches!(event, InputEvent::KeyDown { key_code } if *key_code == self.pause)
    }
}

/// Held-flag and edge state for the four game actions.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    left_held: bool,
    right_held: bool,
    jump_held: bool,
    jump_queued: bool,
    pause_queued: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input event into the latch.
    ///
    /// The jump request arms only on a fresh key-down — while the key stays
    /// held (including host key auto-repeat) no further request is queued
    /// until a key-up re-arms it.
    pub fn apply(&mut self, event: &InputEvent, bindings: &KeyBindings) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if key_code == bindings.left {
                    self.left_held = true;
                } else if key_code == bindings.right {
                    self.right_held = true;
                } else if key_code == bindings.jump {
                    if !self.jump_held {
                        self.jump_queued = true;
                    }
                    self.jump_held = true;
                } else if key_code == bindings.pause {
                    self.pause_queued = true;
                }
            }
            InputEvent::KeyUp { key_code } => {
                if key_code == bindings.left {
                    self.left_held = false;
                } else if key_code == bindings.right {
                    self.right_held = false;
                } else if key_code == bindings.jump {
                    self.jump_held = false;
                }
            }
        }
    }

    pub fn left_held(&self) -> bool {
        self.left_held
    }

    pub fn right_held(&self) -> bool {
        self.right_held
    }

    /// Consume the pending jump request, if any. An unconsumed request does
    /// not persist across ticks — the caller takes it every tick and decides
    /// whether it is honored.
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_queued)
    }

    /// Consume the pending pause edge, if any.
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_queued)
    }

    /// Drop all held and queued state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code: code }
    }

    fn up(code: u32) -> InputEvent {
        InputEvent::KeyUp { key_code: code }
    }

    #[test]
    fn held_flags_track_transitions() {
        let b = KeyBindings::default();
        let mut latch = InputLatch::new();
        latch.apply(&down(b.left), &b);
        assert!(latch.left_held());
        latch.apply(&down(b.right), &b);
        assert!(latch.right_held());
        latch.apply(&up(b.left), &b);
        assert!(!latch.left_held());
        assert!(latch.right_held());
    }

    #[test]
    fn jump_request_is_edge_triggered() {
        let b = KeyBindings::default();
        let mut latch = InputLatch::new();
        latch.apply(&down(b.jump), &b);
        assert!(latch.take_jump_request());
        // Second take in the same hold yields nothing.
        assert!(!latch.take_jump_request());
        // Auto-repeat while held must not re-arm.
        latch.apply(&down(b.jump), &b);
        assert!(!latch.take_jump_request());
        // Key-up then key-down re-arms.
        latch.apply(&up(b.jump), &b);
        latch.apply(&down(b.jump), &b);
        assert!(latch.take_jump_request());
    }

    #[test]
    fn pause_edge_is_consumed_once() {
        let b = KeyBindings::default();
        let mut latch = InputLatch::new();
        latch.apply(&down(b.pause), &b);
        assert!(latch.take_pause_request());
        assert!(!latch.take_pause_request());
    }

    #[test]
    fn clear_drops_everything() {
        let b = KeyBindings::default();
        let mut latch = InputLatch::new();
        latch.apply(&down(b.left), &b);
        latch.apply(&down(b.jump), &b);
        latch.clear();
        assert!(!latch.left_held());
        assert!(!latch.take_jump_request());
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let b = KeyBindings::default();
        let mut latch = InputLatch::new();
        latch.apply(&down(999), &b);
        assert!(!latch.left_held());
        assert!(!latch.right_held());
        assert!(!latch.take_jump_request());
        assert!(!latch.take_pause_request());
    }
}
