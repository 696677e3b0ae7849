//! My Items view: inventory with edit/delete, and sent requests.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem};

use crate::state::{AppState, MyItemsTab};
use crate::theme::{status_color, theme};
use crate::util::money;

/// Render the My Items view into `area`.
pub fn render(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    match app.my_items_tab {
        MyItemsTab::Inventory => {
            let items: Vec<ListItem> = app
                .my_items
                .iter()
                .map(|l| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            l.name.clone(),
                            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", money(l.estimated_value.unwrap_or(0.0))),
                            Style::default().fg(th.accent),
                        ),
                        Span::styled(
                            format!("  {}", l.status.to_lowercase()),
                            Style::default().fg(if l.status.eq_ignore_ascii_case("available") {
                                th.green
                            } else {
                                th.yellow
                            }),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!(" My Inventory ({}) ", app.my_items.len()))
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
            if app.my_items.is_empty() {
                app.my_items_state.select(None);
            } else {
                app.my_items_selected = app.my_items_selected.min(app.my_items.len() - 1);
                app.my_items_state.select(Some(app.my_items_selected));
            }
            f.render_stateful_widget(list, area, &mut app.my_items_state);
        }
        MyItemsTab::Requests => {
            let user_id = app.user_id().to_string();
            let sent: Vec<ListItem> = app
                .swaps
                .iter()
                .filter(|s| s.from_user.id == user_id)
                .map(|s| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            s.item_requested.name.clone(),
                            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  to {}", s.to_user.name),
                            Style::default().fg(th.subtext),
                        ),
                        Span::styled(
                            format!("  [{}]", s.status.label()),
                            Style::default().fg(status_color(s.status, &th)),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(sent).block(
                Block::default()
                    .title(" Requests Sent ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(th.border_focus))
                    .style(Style::default().bg(th.panel)),
            );
            f.render_widget(list, area);
        }
    }
}
