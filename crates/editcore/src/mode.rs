//! Editor modes and the key interpretation table

use crate::key::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Keys are commands; the initial mode
    #[default]
    Navigation,
    /// Keys edit the buffer
    Insertion,
    /// Terminal state; the run-loop stops once it sees this
    Exiting,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Navigation => "Navigation",
            Mode::Insertion => "Insertion",
            Mode::Exiting => "Exiting",
        }
    }
}

/// Cursor transitions shared by every live mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Home,
    Left,
    Right,
    End,
    Up,
    Down,
}

/// Buffer edits available in insertion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    DeleteBackward,
    DeleteForward,
    SplitLine,
    Indent,
    Insert(char),
}

/// What a key means in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Motion),
    Switch(Mode),
    Save,
    Edit(Edit),
    Ignore,
}

impl Motion {
    /// The motion bound to `key`, if it is one of the six movement keys.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Home => Some(Motion::Home),
            Key::Left => Some(Motion::Left),
            Key::Right => Some(Motion::Right),
            Key::End => Some(Motion::End),
            Key::Up => Some(Motion::Up),
            Key::Down => Some(Motion::Down),
            _ => None,
        }
    }
}

/// Maps `(mode, key)` to the command it triggers.
///
/// Motion keys are resolved before any mode-specific binding, so they behave
/// the same in navigation and insertion. `Exiting` accepts nothing.
pub fn interpret(mode: Mode, key: Key) -> Command {
    if mode == Mode::Exiting {
        return Command::Ignore;
    }

    if let Some(motion) = Motion::from_key(key) {
        return Command::Move(motion);
    }

    match mode {
        Mode::Navigation => match key {
            Key::Char('x' | 'X') => Command::Switch(Mode::Exiting),
            Key::Char('i' | 'I') => Command::Switch(Mode::Insertion),
            Key::Char('s' | 'S') => Command::Save,
            _ => Command::Ignore,
        },
        Mode::Insertion => match key {
            Key::Escape => Command::Switch(Mode::Navigation),
            Key::Backspace => Command::Edit(Edit::DeleteBackward),
            Key::Delete => Command::Edit(Edit::DeleteForward),
            Key::Enter => Command::Edit(Edit::SplitLine),
            Key::Tab => Command::Edit(Edit::Indent),
            Key::Char(c) => Command::Edit(Edit::Insert(c)),
            _ => Command::Ignore,
        },
        Mode::Exiting => Command::Ignore,
    }
}
