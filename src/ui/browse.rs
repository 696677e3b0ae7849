//! Browse view: filter sidebar, paginated listing list, details pane.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap};

use crate::state::{AppState, Focus};
use crate::theme::{Theme, theme};
use crate::util::{money, short_date, truncate_to_width};

/// Rows the sidebar exposes: one per category, then status, then sort.
#[must_use]
pub fn sidebar_rows() -> usize {
    crate::state::AVAILABLE_CATEGORIES.len() + 2
}

/// Render the Browse view into `area`.
pub fn render(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(48),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_sidebar(f, app, cols[0], &th);
    render_results(f, app, cols[1], &th);
    render_details(f, app, cols[2], &th);
}

/// Filter sidebar: search box, category checkboxes, status, sort.
fn render_sidebar(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_focused = app.focus == Focus::Search;
    let search = Paragraph::new(Line::from(vec![
        Span::styled("/ ", Style::default().fg(th.accent)),
        Span::styled(app.input.clone(), Style::default().fg(th.text)),
        Span::styled(
            if search_focused { "▏" } else { "" },
            Style::default().fg(th.accent),
        ),
    ]))
    .block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if search_focused {
                th.border_focus
            } else {
                th.border
            }))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(search, rows[0]);

    let sidebar_focused = app.focus == Focus::Sidebar;
    let mut lines: Vec<Line> = Vec::new();
    for (i, cat) in crate::state::AVAILABLE_CATEGORIES.iter().enumerate() {
        let active = app
            .category_filters
            .iter()
            .any(|c| c.eq_ignore_ascii_case(cat));
        let mark = if active { "[x]" } else { "[ ]" };
        let mut style = Style::default().fg(if active { th.accent } else { th.text });
        if sidebar_focused && app.sidebar_row == i {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(format!(" {mark} {cat}"), style)));
    }
    lines.push(Line::from(""));
    let status_row = crate::state::AVAILABLE_CATEGORIES.len();
    let status_label = if app.status_filter.is_empty() {
        "all".to_string()
    } else {
        app.status_filter.clone()
    };
    let mut status_style = Style::default().fg(th.text);
    if sidebar_focused && app.sidebar_row == status_row {
        status_style = status_style.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(Span::styled(
        format!(" Status: {status_label}"),
        status_style,
    )));
    let mut sort_style = Style::default().fg(th.text);
    if sidebar_focused && app.sidebar_row == status_row + 1 {
        sort_style = sort_style.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(Span::styled(
        format!(" Sort: {}", app.sort_key.label()),
        sort_style,
    )));

    let filters = Paragraph::new(lines).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if sidebar_focused {
                th.border_focus
            } else {
                th.border
            }))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(filters, rows[1]);
}

/// Paginated listing list plus the page-number strip.
fn render_results(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let total = app.results.len();
    let (start, end) = app.pager.bounds(total);
    let width = rows[0].width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app.results[start..end]
        .iter()
        .map(|l| {
            let cat = l.category.clone().unwrap_or_default();
            let name = truncate_to_width(&l.name, width.saturating_sub(18));
            let segs = vec![
                Span::styled(
                    name,
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", money(l.estimated_value.unwrap_or(0.0))),
                    Style::default().fg(th.accent),
                ),
                Span::styled(format!("  {cat}"), Style::default().fg(th.subtext)),
                Span::styled(
                    format!("  {}", l.status.to_lowercase()),
                    Style::default().fg(if l.status.eq_ignore_ascii_case("available") {
                        th.green
                    } else {
                        th.red
                    }),
                ),
            ];
            ListItem::new(Line::from(segs))
        })
        .collect();

    let results_focused = app.focus == Focus::Results;
    let title = if app.loading_listings {
        " Listings (loading…) ".to_string()
    } else {
        format!(" Listings ({total}) ")
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if results_focused {
                    th.border_focus
                } else {
                    th.border
                }))
                .style(Style::default().bg(th.panel)),
        )
        .highlight_style(
            Style::default()
                .fg(th.accent)
                .add_modifier(Modifier::REVERSED),
        );

    // The list widget sees only the visible page, so its selection state
    // is page-relative.
    let mut page_state = ratatui::widgets::ListState::default();
    if !app.results.is_empty() && app.selected >= start && app.selected < end {
        page_state.select(Some(app.selected - start));
    }
    f.render_stateful_widget(list, rows[0], &mut page_state);

    let mut spans: Vec<Span> = vec![Span::styled(
        format!(" page {}/{} ", app.pager.page, app.pager.total_pages(total)),
        Style::default().fg(th.subtext),
    )];
    for n in app.pager.window(total) {
        let style = if n == app.pager.page {
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext)
        };
        spans.push(Span::styled(format!(" {n} "), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

/// Details pane for the highlighted listing.
fn render_details(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(l) = app.results.get(app.selected) {
        // Prefer the cached full record when the background fetch has
        // already filled it in.
        let l = app.details_cache.peek(&l.id).unwrap_or(l);
        lines.push(Line::from(Span::styled(
            l.name.clone(),
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{}  ·  {}  ·  listed {}",
                money(l.estimated_value.unwrap_or(0.0)),
                l.condition.clone().unwrap_or_else(|| "used".into()),
                short_date(l.date.as_deref()),
            ),
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(""));
        if let Some(desc) = &l.description {
            lines.push(Line::from(Span::styled(
                desc.clone(),
                Style::default().fg(th.text),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("Category: {}", l.category.clone().unwrap_or_default()),
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(Span::styled(
            format!("Status: {}", l.status.to_lowercase()),
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(Span::styled(
            format!("Images: {}", l.images.len()),
            Style::default().fg(th.subtext),
        )));
        if app.session.is_some() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter: propose a swap for this item",
                Style::default().fg(th.green),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "No items match the current filter and sort settings.",
            Style::default().fg(th.subtext),
        )));
    }
    let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Details ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(details, area);
}
