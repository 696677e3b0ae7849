//! Shared rendering helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// What: Centered rectangle taking a percentage of the parent area.
///
/// Inputs:
/// - `percent_x`, `percent_y`: Size as a percentage of `r`
/// - `r`: Parent area
///
/// Output:
/// - The centered sub-rectangle, used for modal dialogs.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

/// A labeled form row, highlighted when it has focus.
#[must_use]
pub fn form_line<'a>(label: &'a str, value: String, focused: bool, th: &Theme) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(th.subtext)
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:>12}: "), label_style),
        Span::styled(value, Style::default().fg(th.text)),
        Span::styled(cursor, Style::default().fg(th.accent)),
    ])
}

/// Footer hint line rendered in subdued text.
#[must_use]
pub fn hint_line<'a>(hints: &'a [(&'a str, &'a str)], th: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, what) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(th.accent),
        ));
        spans.push(Span::styled(
            format!("{what}  "),
            Style::default().fg(th.subtext),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Centered rect stays inside the parent and is roughly centered
    ///
    /// - Input: 50%x50% of a 100x40 area
    /// - Output: Contained sub-rect of about half each dimension
    fn centered_rect_contained() {
        let parent = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, parent);
        assert!(inner.x >= parent.x && inner.right() <= parent.right());
        assert!(inner.y >= parent.y && inner.bottom() <= parent.bottom());
        assert!((inner.width as i32 - 50).abs() <= 2);
        assert!((inner.height as i32 - 20).abs() <= 2);
    }
}
