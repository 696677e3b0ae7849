//! Rendering layer: top navigation, the active view, footer, and modals.

pub mod auth;
pub mod browse;
pub mod helpers;
pub mod items;
pub mod modals;
pub mod profile;
pub mod swaps;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::state::{AppState, View};
use crate::theme::theme;

/// Render one full frame.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // Top navigation bar
    let tabs = [
        (View::Browse, "1 Browse"),
        (View::Swaps, "2 Swaps"),
        (View::MyItems, "3 My Items"),
        (View::Profile, "4 Profile"),
    ];
    let mut spans: Vec<Span> = vec![Span::styled(
        " SWAPSEA ",
        Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
    )];
    for (view, label) in tabs {
        let style = if app.view == view {
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext)
        };
        spans.push(Span::styled(format!("  {label}"), style));
    }
    spans.push(Span::styled(
        app.session.as_ref().map_or_else(
            || "   (signed out — press a)".to_string(),
            |s| format!("   {}", s.user.name),
        ),
        Style::default().fg(th.subtext),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    match app.view {
        View::Browse => browse::render(f, app, rows[1]),
        View::Swaps => swaps::render(f, app, rows[1]),
        View::MyItems => items::render(f, app, rows[1]),
        View::Profile => profile::render(f, app, rows[1]),
        View::Auth => auth::render(f, app, rows[1]),
    }

    // Footer: toast or contextual hints for the active view
    let footer = app.toast_message.as_ref().map_or_else(
        || {
            let hints: &[(&str, &str)] = match app.view {
                View::Browse => &[
                    ("Tab", "focus"),
                    ("j/k", "move"),
                    ("n/p", "page"),
                    ("s", "status"),
                    ("o", "sort"),
                    ("Enter", "propose"),
                    ("q", "quit"),
                ],
                View::Swaps => &[
                    ("Tab", "tab"),
                    ("j/k", "move"),
                    ("a", "accept"),
                    ("x", "cancel"),
                    ("u", "pickup"),
                    ("t", "return"),
                    ("f", "finalize"),
                    ("v", "review"),
                    ("d", "dispute"),
                ],
                View::MyItems => &[
                    ("Tab", "tab"),
                    ("j/k", "move"),
                    ("n", "new"),
                    ("e", "edit"),
                    ("d", "delete"),
                    ("r", "refresh"),
                ],
                View::Profile => &[("L", "log out"), ("r", "refresh"), ("q", "quit")],
                View::Auth => &[("Tab", "field"), ("Enter", "submit"), ("Esc", "back")],
            };
            helpers::hint_line(hints, &th)
        },
        |msg| {
            Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(th.yellow),
            ))
        },
    );
    f.render_widget(Paragraph::new(footer), rows[2]);

    modals::render(f, app);
}
