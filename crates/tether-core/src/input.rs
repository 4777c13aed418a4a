use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

/// A completed click on the global pointer stream, in window coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PointerClick {
    pub position: Vec2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerClick {
    pub fn primary(position: Vec2) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }
}
