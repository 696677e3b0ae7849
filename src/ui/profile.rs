//! Profile view: session summary and received reviews.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::state::AppState;
use crate::theme::theme;

/// Render the Profile view into `area`.
pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let mut who: Vec<Line> = Vec::new();
    if let Some(session) = &app.session {
        who.push(Line::from(Span::styled(
            session.user.name.clone(),
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )));
        who.push(Line::from(Span::styled(
            session.user.email.clone(),
            Style::default().fg(th.subtext),
        )));
        let avg = average_rating(app);
        who.push(Line::from(Span::styled(
            avg.map_or_else(
                || "No reviews received yet.".to_string(),
                |a| format!("Average rating: {a:.1} / 5 ({} reviews)", app.reviews.len()),
            ),
            Style::default().fg(th.text),
        )));
        who.push(Line::from(Span::styled(
            "L: log out",
            Style::default().fg(th.subtext),
        )));
    } else {
        who.push(Line::from(Span::styled(
            "Not signed in. Press a to open the auth form.",
            Style::default().fg(th.subtext),
        )));
    }
    f.render_widget(
        Paragraph::new(who).block(
            Block::default()
                .title(" Profile ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.border_focus))
                .style(Style::default().bg(th.panel)),
        ),
        rows[0],
    );

    let mut lines: Vec<Line> = Vec::new();
    for r in &app.reviews {
        let color = if r.rating >= 4 { th.green } else { th.yellow };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} / 5  ", r.rating),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(r.comment.clone(), Style::default().fg(th.text)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No reviews received yet.",
            Style::default().fg(th.subtext),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Reviews Received ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.border))
                .style(Style::default().bg(th.panel)),
        ),
        rows[1],
    );
}

/// Mean rating over received reviews, when any exist.
#[must_use]
pub fn average_rating(app: &AppState) -> Option<f64> {
    if app.reviews.is_empty() {
        return None;
    }
    let sum: u32 = app.reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(sum) / app.reviews.len() as f64)
}
