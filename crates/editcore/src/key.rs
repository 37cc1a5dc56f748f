//! Platform-independent key representation

/// One discrete key-input event as seen by the editing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    Home,
    Left,
    Right,
    End,
    Up,
    Down,

    // Special keys
    Escape,
    Backspace,
    Delete,
    Enter,
    Tab,

    /// Printable character, carried literally
    Char(char),

    /// Any key the engine has no binding for
    Other,
}
