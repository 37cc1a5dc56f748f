use editcore::{EditorSession, NoticeKind, Viewport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::Config;

/// Paints the text region and the status bar for one frame.
///
/// The text region size becomes the session viewport, which may scroll the
/// session window; buffer and cursor are left alone.
pub fn draw(f: &mut Frame, session: &mut EditorSession, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Text region
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    let (columns, rows) = (chunks[0].width as usize, chunks[0].height as usize);
    session.set_viewport(Viewport::new(columns, rows));

    draw_text(f, session, chunks[0]);
    draw_status_bar(f, session, config, chunks[1]);
}

fn draw_text(f: &mut Frame, session: &EditorSession, area: Rect) {
    let lines: Vec<Line> = session
        .visible_lines()
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    f.render_widget(Paragraph::new(lines), area);

    let (x, y) = session.cursor();
    let row = y.saturating_sub(session.top_line());
    if x < area.width as usize && row < area.height as usize {
        f.set_cursor(area.x + x as u16, area.y + row as u16);
    }
}

fn draw_status_bar(f: &mut Frame, session: &EditorSession, config: &Config, area: Rect) {
    let mut spans = vec![Span::styled(session.status(), status_style(config))];

    if let Some(notice) = session.notice() {
        let color = match notice.kind() {
            NoticeKind::Info => Color::Cyan,
            NoticeKind::Success => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.text(), Style::default().fg(color)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_style(config: &Config) -> Style {
    let foreground = config.status_foreground();
    let background = config.status_background();

    if foreground.is_none() && background.is_none() {
        return if config.ui.reverse_status {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
    }

    let mut style = Style::default();
    if let Some(fg) = foreground {
        style = style.fg(fg);
    }
    if let Some(bg) = background {
        style = style.bg(bg);
    }
    style
}
