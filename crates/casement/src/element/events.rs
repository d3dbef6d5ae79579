//! Pointer events delivered into the element tree.
//!
//! Motion and leave carry no payload beyond coordinates; button events are
//! described by [`ButtonEvent`].

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Left,
    /// Secondary (usually right) button.
    Right,
    /// Middle button (wheel click).
    Middle,
    /// Any other button, by its input-layer code.
    Other(u32),
}

impl PointerButton {
    /// Whether this is the primary button.
    #[inline]
    pub fn is_primary(self) -> bool {
        self == Self::Left
    }
}

/// What happened to a button.
///
/// `Down` and `Up` are raw transitions. The input backend synthesizes a
/// `Click` after an `Up` that followed a `Down` on the same target, and a
/// `DoubleClick` for two clicks in quick succession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEventKind {
    Down,
    Up,
    Click,
    DoubleClick,
}

/// A pointer button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// The button this event is about.
    pub button: PointerButton,
    /// The transition.
    pub kind: ButtonEventKind,
    /// Timestamp in milliseconds.
    pub time_msec: u32,
}

impl ButtonEvent {
    /// Create a new button event.
    pub fn new(button: PointerButton, kind: ButtonEventKind, time_msec: u32) -> Self {
        Self {
            button,
            kind,
            time_msec,
        }
    }

    /// A primary-button event at time zero.
    pub fn primary(kind: ButtonEventKind) -> Self {
        Self::new(PointerButton::Left, kind, 0)
    }
}
