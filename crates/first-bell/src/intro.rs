//! Scripted opening: the child steps out, looks back at the house while a
//! voice calls from the door, then turns forward and control is released.
//!
//! A plain tick counter drives the three phases; while it runs it fully
//! overrides horizontal control and facing. Not restartable mid-session —
//! a fresh session rebuilds it.

/// Timer thresholds in ticks.
const LOOK_BACK_START: u32 = 60;
const LOOK_BACK_END: u32 = 260;
const CONTROL_RELEASE: u32 = 300;
const SPEECH_START: u32 = 80;
const SPEECH_END: u32 = 260;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intro {
    pub active: bool,
    pub timer: u32,
}

impl Intro {
    pub fn new() -> Self {
        Self {
            active: true,
            timer: 0,
        }
    }

    /// Facing for a given timer value: looking back at the house during the
    /// middle window, forward otherwise.
    pub fn facing_right_at(timer: u32) -> bool {
        !(timer > LOOK_BACK_START && timer < LOOK_BACK_END)
    }

    /// Advance one tick. Returns the scripted facing for this tick and
    /// releases control once the timer passes its final threshold.
    pub fn tick(&mut self) -> bool {
        self.timer += 1;
        let facing_right = Self::facing_right_at(self.timer);
        if self.timer > CONTROL_RELEASE {
            self.active = false;
        }
        facing_right
    }

    /// Whether the speech bubble at the door is visible this tick.
    pub fn speech_visible(&self) -> bool {
        self.active && self.timer > SPEECH_START && self.timer < SPEECH_END
    }
}

impl Default for Intro {
    fn default() -> Self {
        Self::new()
    }
}
