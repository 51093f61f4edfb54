//! Input latch: the intent flags the update step reads at the start of a tick.

/// Keys the core understands.  The driver maps raw terminal events onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    /// Jumps while playing, starts a run otherwise.
    Space,
    /// Confirm only.
    Enter,
}

impl Key {
    pub fn is_jump(self) -> bool {
        matches!(self, Key::Up | Key::Space)
    }

    pub fn is_confirm(self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// Level-triggered flags.  A flag stays set from its press until the matching
/// release; there is no debouncing and no edge detection here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
}

impl InputLatch {
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up | Key::Space => self.jump_held = pressed,
            Key::Enter => {}
        }
    }

    /// Horizontal intent: -1, 0 or +1.  Right wins when both are held.
    pub fn direction(&self) -> f64 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}
