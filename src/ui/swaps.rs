//! Swap dashboard view: tab sidebar with counts, swap list, action hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

use crate::logic::swaps::{allowed_actions, can_dispute, can_review, partner_name, tab_indices};
use crate::state::{AppState, SwapTab};
use crate::theme::{status_color, theme};
use crate::util::{money, short_date};

/// Render the dashboard into `area`.
pub fn render(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    let user_id = app.user_id().to_string();
    let counts = crate::logic::swaps::tab_counts(&app.swaps, &user_id);

    // Tab sidebar with badges
    let tabs = [
        SwapTab::Incoming,
        SwapTab::Outgoing,
        SwapTab::Active,
        SwapTab::History,
    ];
    let mut lines: Vec<Line> = Vec::new();
    for (tab, count) in tabs.iter().zip(counts.iter()) {
        let active = *tab == app.swap_tab;
        let style = if active {
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext)
        };
        lines.push(Line::from(Span::styled(
            format!(" {} ({count})", tab.label()),
            style,
        )));
    }
    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .title(" Swap Status Filter ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(sidebar, cols[0]);

    // Swap list for the active tab
    let indices = tab_indices(&app.swaps, app.swap_tab, &user_id);
    let items: Vec<ListItem> = indices
        .iter()
        .filter_map(|&i| app.swaps.get(i))
        .map(|s| {
            let offer = s.item_offered.as_ref().map_or_else(
                || format!("deposit {}", money(s.deposit_amount)),
                |it| format!("item {}", it.name),
            );
            let mut hints = Vec::new();
            for a in allowed_actions(s, &user_id) {
                hints.push(a.label());
            }
            if can_review(s, &user_id) {
                hints.push("review");
            }
            if can_dispute(s) {
                hints.push("dispute");
            }
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        s.item_requested.name.clone(),
                        Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  [{}]", s.status.label()),
                        Style::default().fg(status_color(s.status, &th)),
                    ),
                    Span::styled(
                        format!("  with {}", partner_name(s, &user_id)),
                        Style::default().fg(th.text),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  offer: {offer}  ·  {} → {}  ·  {}",
                        short_date(Some(s.start_date.as_str())),
                        short_date(Some(s.end_date.as_str())),
                        if hints.is_empty() {
                            "no actions".to_string()
                        } else {
                            hints.join(" / ")
                        }
                    ),
                    Style::default().fg(th.subtext),
                )),
            ];
            ListItem::new(lines)
        })
        .collect();

    let title = if app.loading_swaps {
        format!(" {} (loading…) ", app.swap_tab.label())
    } else {
        format!(" {} ({}) ", app.swap_tab.label(), indices.len())
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.border_focus))
                .style(Style::default().bg(th.panel)),
        )
        .highlight_style(
            Style::default()
                .fg(th.accent)
                .add_modifier(Modifier::REVERSED),
        );
    if indices.is_empty() {
        app.swap_state.select(None);
    } else {
        app.swap_selected = app.swap_selected.min(indices.len() - 1);
        app.swap_state.select(Some(app.swap_selected));
    }
    f.render_stateful_widget(list, cols[1], &mut app.swap_state);
}
