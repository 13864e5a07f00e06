//! Notice bar widget: one-line transient success/error message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Whether a notice reports success or a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message shown to the user until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Renders the notice, or nothing when there is none.
///
/// Success is green with a check mark, errors are bold red with a cross.
#[mutants::skip]
pub fn draw_notice_bar(notice: Option<&Notice>, frame: &mut Frame, area: Rect) {
    let Some(notice) = notice else {
        return;
    };

    let (marker, style) = match notice.kind {
        NoticeKind::Success => ("✓ ", Style::default().fg(Color::Green)),
        NoticeKind::Error => (
            "✗ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![
        Span::styled(marker, style),
        Span::styled(notice.text.as_str(), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
