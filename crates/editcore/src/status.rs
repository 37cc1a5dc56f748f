//! Status line text and the one-shot notice shown beside it

use std::time::{Duration, Instant};

use crate::mode::Mode;

/// Severity of a notice; decides its colour and how long it stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn lifetime(self) -> Duration {
        let secs = match self {
            NoticeKind::Success => 2,
            NoticeKind::Info => 3,
            NoticeKind::Warning => 5,
            NoticeKind::Error => 7,
        };
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    kind: NoticeKind,
    posted_at: Instant,
}

impl Notice {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    fn expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) > self.kind.lifetime()
    }
}

/// `"{mode}  COL: {x}  ROW: {y}"`
pub fn status_text(mode: Mode, x: usize, y: usize) -> String {
    format!("{}  COL: {}  ROW: {}", mode.label(), x, y)
}

/// The status projection plus at most one pending notice.
#[derive(Debug, Clone)]
pub struct StatusLine {
    text: String,
    notice: Option<Notice>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            text: status_text(Mode::Navigation, 0, 0),
            notice: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Recomputes the text from mode and cursor and drops a stale notice.
    pub fn refresh(&mut self, mode: Mode, x: usize, y: usize) {
        self.text = status_text(mode, x, y);
        self.expire_at(Instant::now());
    }

    /// Replaces the text until the next `refresh`.
    pub fn override_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Posts a notice, replacing any earlier one.
    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            posted_at: Instant::now(),
        });
    }

    fn expire_at(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.expired_at(now)) {
            self.notice = None;
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
