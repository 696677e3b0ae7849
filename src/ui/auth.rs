//! Auth view: login / register form.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::state::{AppState, AuthField, AuthMode};
use crate::theme::theme;
use crate::ui::helpers::{centered_rect, form_line};

/// Render the auth form centered in `area`.
pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let rect = centered_rect(50, 60, area);

    let mode_label = match app.auth.mode {
        AuthMode::Login => "Sign In",
        AuthMode::Register => "Create Account",
    };
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            mode_label,
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if app.auth.mode == AuthMode::Register {
        lines.push(form_line(
            "Name",
            app.auth.name.clone(),
            app.auth.field == AuthField::Name,
            &th,
        ));
    }
    lines.push(form_line(
        "Email",
        app.auth.email.clone(),
        app.auth.field == AuthField::Email,
        &th,
    ));
    lines.push(form_line(
        "Password",
        "•".repeat(app.auth.password.chars().count()),
        app.auth.field == AuthField::Password,
        &th,
    ));
    lines.push(Line::from(""));
    if let Some(err) = &app.auth.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(th.red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Tab: next field   Ctrl-R: toggle login/register   Enter: submit",
        Style::default().fg(th.subtext),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(" Account ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border_focus))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(ratatui::widgets::Clear, rect);
    f.render_widget(form, rect);
}
