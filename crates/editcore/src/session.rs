use std::path::{Path, PathBuf};

use crate::document;
use crate::key::Key;
use crate::line_buffer::{LineBuffer, TAB_EXPANSION};
use crate::mode::{interpret, Command, Edit, Mode, Motion};
use crate::status::{Notice, NoticeKind, StatusLine};

/// Placeholder target used when a session has no filename of its own.
pub const DEFAULT_FILENAME: &str = "untitled.txt";

const SAVE_ERROR_STATUS: &str = "Error: Cannot open file for writing!";

/// Display ceilings supplied by the renderer.
///
/// `rows` counts text rows only; the status line is not included. The
/// session scrolls so the cursor row stays inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub columns: usize,
    pub rows: usize,
}

impl Viewport {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// No display bound at all, for headless use.
    pub const fn unbounded() -> Self {
        Self {
            columns: usize::MAX,
            rows: usize::MAX,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// What the run-loop should know after one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// A deletion had no target; nothing changed.
    InvalidEdit,
    Saved,
    SaveFailed,
    /// The session reached `Mode::Exiting`.
    Exit,
}

/// One editing session: a line buffer, a cursor into it, and a mode.
///
/// `y` always indexes an existing line and `x` never exceeds the length of
/// line `y`; every operation below preserves that.
#[derive(Debug, Clone)]
pub struct EditorSession {
    x: usize,
    y: usize,
    mode: Mode,
    buffer: LineBuffer,
    filename: Option<PathBuf>,
    fallback_filename: PathBuf,
    viewport: Viewport,
    /// First buffer line shown in the viewport
    top: usize,
    status: StatusLine,
}

impl EditorSession {
    /// A new, empty document.
    pub fn new() -> Self {
        Self::with_buffer(LineBuffer::new(), None)
    }

    /// Opens `path`, falling back to an empty untitled document if it
    /// cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match document::load_lines(&path) {
            Ok(records) => {
                let mut session = Self::with_buffer(LineBuffer::from_lines(records), Some(path));
                let notice = format!(
                    "Opened {} ({} lines)",
                    session.filename().display(),
                    session.buffer.line_count()
                );
                session.status.post(NoticeKind::Info, notice);
                session
            }
            Err(e) => {
                log::warn!("The file {} could not be read: {}", path.display(), e);
                let mut session = Self::new();
                let notice = format!("Could not open {}: {}", path.display(), e);
                session.status.post(NoticeKind::Warning, notice);
                session
            }
        }
    }

    fn with_buffer(buffer: LineBuffer, filename: Option<PathBuf>) -> Self {
        Self {
            x: 0,
            y: 0,
            mode: Mode::Navigation,
            buffer,
            filename,
            fallback_filename: PathBuf::from(DEFAULT_FILENAME),
            viewport: Viewport::default(),
            top: 0,
            status: StatusLine::new(),
        }
    }

    /// Replaces the placeholder used when no filename was set. Empty names
    /// are ignored.
    pub fn with_fallback_filename(mut self, name: impl Into<PathBuf>) -> Self {
        let name = name.into();
        if !name.as_os_str().is_empty() {
            self.fallback_filename = name;
        }
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.follow_cursor();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cursor as `(x, y)`, column first.
    pub fn cursor(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Index of the first line in the viewport.
    pub fn top_line(&self) -> usize {
        self.top
    }

    /// The lines that fit in the viewport, starting at `top_line()`.
    pub fn visible_lines(&self) -> &[String] {
        let lines = self.buffer.lines();
        let start = self.top.min(lines.len());
        let end = start.saturating_add(self.viewport.rows).min(lines.len());
        &lines[start..end]
    }

    /// The file a save would write to.
    pub fn filename(&self) -> &Path {
        match self.filename {
            Some(ref path) if !path.as_os_str().is_empty() => path.as_path(),
            _ => self.fallback_filename.as_path(),
        }
    }

    pub fn status(&self) -> &str {
        self.status.text()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.status.notice()
    }

    /// Recomputes the status line from mode and cursor, and expires old
    /// notices. Called once per render cycle.
    pub fn update_status(&mut self) {
        self.status.refresh(self.mode, self.x, self.y);
    }

    /// Dispatch entry point: applies one key in the current mode.
    pub fn handle_key(&mut self, key: Key) -> Action {
        let action = match interpret(self.mode, key) {
            Command::Move(motion) => {
                self.apply_motion(motion);
                Action::Continue
            }
            Command::Switch(mode) => {
                log::debug!("Mode {:?} -> {:?}", self.mode, mode);
                self.mode = mode;
                if mode == Mode::Exiting {
                    Action::Exit
                } else {
                    Action::Continue
                }
            }
            Command::Save => self.save_file(),
            Command::Edit(edit) => self.apply_edit(edit),
            Command::Ignore => Action::Continue,
        };
        self.follow_cursor();
        action
    }

    fn apply_motion(&mut self, motion: Motion) {
        match motion {
            Motion::Home => self.move_home(),
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::End => self.move_end(),
            Motion::Up => self.move_up(),
            Motion::Down => self.move_down(),
        }
    }

    pub fn move_home(&mut self) {
        self.x = 0;
    }

    pub fn move_left(&mut self) {
        self.x = self.x.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let next = self.x + 1;
        if next <= self.current_line_len() && next < self.viewport.columns {
            self.x = next;
        }
    }

    pub fn move_end(&mut self) {
        self.x = self.current_line_len();
    }

    pub fn move_up(&mut self) {
        self.y = self.y.saturating_sub(1);
        self.clamp_x();
    }

    /// Stops at the last line and at the bottom row of the viewport.
    pub fn move_down(&mut self) {
        let next = self.y + 1;
        let window_end = self.top.saturating_add(self.viewport.rows);
        if next < self.buffer.line_count() && next < window_end {
            self.y = next;
        }
        self.clamp_x();
    }

    fn current_line_len(&self) -> usize {
        self.buffer.line_len(self.y)
    }

    fn clamp_x(&mut self) {
        self.x = self.x.min(self.current_line_len());
    }

    fn follow_cursor(&mut self) {
        if self.y < self.top {
            self.top = self.y;
        } else if self.viewport.rows > 0 && self.y - self.top >= self.viewport.rows {
            self.top = self.y + 1 - self.viewport.rows;
        }
    }

    fn apply_edit(&mut self, edit: Edit) -> Action {
        match edit {
            Edit::DeleteBackward => self.delete_backward(),
            Edit::DeleteForward => self.delete_forward(),
            Edit::SplitLine => {
                self.split_line();
                Action::Continue
            }
            Edit::Indent => {
                self.x += self.buffer.insert_text(self.y, self.x, TAB_EXPANSION);
                Action::Continue
            }
            Edit::Insert(c) => {
                let mut utf8 = [0u8; 4];
                self.x += self.buffer.insert_text(self.y, self.x, c.encode_utf8(&mut utf8));
                Action::Continue
            }
        }
    }

    fn delete_backward(&mut self) -> Action {
        if self.x > 0 {
            self.buffer.remove_char(self.y, self.x - 1);
            self.x -= 1;
            Action::Continue
        } else if self.y > 0 {
            let join_at = self.buffer.line_len(self.y - 1);
            let text = self.buffer.remove_line(self.y);
            self.buffer.push_text(self.y - 1, &text);
            log::debug!("Joined line {} onto line {}", self.y, self.y - 1);
            self.x = join_at;
            self.move_up();
            Action::Continue
        } else {
            self.reject_edit("Nothing to delete before the start of the document")
        }
    }

    fn delete_forward(&mut self) -> Action {
        if self.x < self.current_line_len() {
            self.buffer.remove_char(self.y, self.x);
            Action::Continue
        } else if self.y + 1 < self.buffer.line_count() {
            let text = self.buffer.remove_line(self.y + 1);
            self.buffer.push_text(self.y, &text);
            log::debug!("Joined line {} onto line {}", self.y + 1, self.y);
            Action::Continue
        } else {
            self.reject_edit("Nothing to delete past the end of the document")
        }
    }

    fn split_line(&mut self) {
        let tail = self.buffer.split_off(self.y, self.x);
        self.buffer.insert_line(self.y + 1, &tail);
        log::debug!("Split line {} at column {}", self.y, self.x);
        self.x = 0;
        self.y += 1;
    }

    fn reject_edit(&mut self, reason: &str) -> Action {
        log::warn!("Rejected edit at ({}, {}): {}", self.x, self.y, reason);
        self.status.post(NoticeKind::Warning, reason);
        Action::InvalidEdit
    }

    /// Writes every line to the target file.
    ///
    /// Never fails outward: an I/O error becomes status text and a notice,
    /// and the buffer is left untouched.
    pub fn save_file(&mut self) -> Action {
        let path = self.filename().to_path_buf();
        match document::save_lines(&path, self.buffer.lines()) {
            Ok(count) => {
                log::info!("Saved {} lines to {}", count, path.display());
                let notice = format!("Saved {} lines to {}", count, path.display());
                self.status.post(NoticeKind::Success, notice);
                Action::Saved
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", path.display(), e);
                self.status.override_text(SAVE_ERROR_STATUS);
                self.status.post(NoticeKind::Error, e.to_string());
                Action::SaveFailed
            }
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
