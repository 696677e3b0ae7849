//! Modal dialog rendering.

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::state::{
    AppState, DisputeDraft, ItemField, ItemForm, Modal, ProposeDraft, ProposeField, ReviewDraft,
};
use crate::theme::{Theme, theme};
use crate::ui::helpers::{centered_rect, form_line};
use crate::util::money;

/// Render the active modal, if any, over the whole frame.
pub fn render(f: &mut Frame, app: &AppState) {
    let th = theme();
    match &app.modal {
        Modal::None => {}
        Modal::Alert { message } => {
            dialog(f, " Notice ", &th, |lines| {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(th.text),
                )));
                lines.push(Line::from(""));
                lines.push(hint(&th, "Esc/Enter: dismiss"));
            });
        }
        Modal::Confirm { message, .. } => {
            dialog(f, " Confirm ", &th, |lines| {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(th.text),
                )));
                lines.push(Line::from(""));
                lines.push(hint(&th, "y: confirm   n/Esc: cancel"));
            });
        }
        Modal::Propose(draft) => render_propose(f, draft, &th),
        Modal::Review(draft) => render_review(f, draft, &th),
        Modal::Dispute(draft) => render_dispute(f, draft, &th),
        Modal::Item(form) => render_item_form(f, form, &th),
    }
}

/// Small centered dialog with a title and caller-provided body lines.
fn dialog(f: &mut Frame, title: &str, th: &Theme, fill: impl FnOnce(&mut Vec<Line>)) {
    let rect = centered_rect(50, 30, f.area());
    let mut lines = Vec::new();
    fill(&mut lines);
    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border_focus))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

/// Propose-swap form: offer selection, deposit, dates.
fn render_propose(f: &mut Frame, draft: &ProposeDraft, th: &Theme) {
    let rect = centered_rect(60, 70, f.area());
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Propose a Swap",
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Offer one of your items (j/k to pick, x to clear):",
            Style::default().fg(th.subtext),
        )),
    ];
    if draft.my_items.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no available items; offer a deposit instead)",
            Style::default().fg(th.subtext),
        )));
    }
    for (i, item) in draft.my_items.iter().enumerate() {
        let picked = draft.offered_index == Some(i);
        let focused = draft.field == ProposeField::OfferedItem && picked;
        let mark = if picked { "(x)" } else { "( )" };
        let mut style = Style::default().fg(if picked { th.accent } else { th.text });
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!(
                "  {mark} {}  {}",
                item.name,
                money(item.estimated_value.unwrap_or(0.0))
            ),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(form_line(
        "Deposit",
        draft.deposit_input.clone(),
        draft.field == ProposeField::Deposit,
        th,
    ));
    lines.push(form_line(
        "Start date",
        draft.start_date.clone(),
        draft.field == ProposeField::StartDate,
        th,
    ));
    lines.push(form_line(
        "End date",
        draft.end_date.clone(),
        draft.field == ProposeField::EndDate,
        th,
    ));
    lines.push(Line::from(""));
    lines.push(hint(th, "Tab: next field   Enter: send   Esc: close"));

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Propose Swap ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border_focus))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

/// Review form: star rating plus comment.
fn render_review(f: &mut Frame, draft: &ReviewDraft, th: &Theme) {
    dialog(f, " Leave Review ", th, |lines| {
        lines.push(Line::from(Span::styled(
            "Rate your swap partner out of 5 stars.",
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(""));
        let stars = "★".repeat(usize::from(draft.rating.min(5)));
        let empty = "☆".repeat(5usize.saturating_sub(usize::from(draft.rating)));
        lines.push(Line::from(vec![
            Span::styled(stars, Style::default().fg(th.accent)),
            Span::styled(empty, Style::default().fg(th.subtext)),
            Span::styled(
                format!("  ({}/5, +/- to adjust)", draft.rating),
                Style::default().fg(th.subtext),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(form_line("Comment", draft.comment.clone(), true, th));
        lines.push(Line::from(""));
        lines.push(hint(th, "Enter: submit   Esc: close"));
    });
}

/// Dispute form: description text plus optional image reference.
fn render_dispute(f: &mut Frame, draft: &DisputeDraft, th: &Theme) {
    dialog(f, " Raise Dispute ", th, |lines| {
        lines.push(Line::from(Span::styled(
            "Provide an image, a description, or both as evidence.",
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(""));
        lines.push(form_line("Description", draft.description.clone(), true, th));
        lines.push(Line::from(Span::styled(
            format!(
                "Image attached: {}",
                if draft.image.is_some() { "yes" } else { "no" }
            ),
            Style::default().fg(th.subtext),
        )));
        lines.push(Line::from(""));
        lines.push(hint(th, "Enter: file dispute   Esc: close"));
    });
}

/// Item create/edit form.
fn render_item_form(f: &mut Frame, form: &ItemForm, th: &Theme) {
    let rect = centered_rect(60, 70, f.area());
    let title = if form.editing_id.is_some() {
        " Edit Item "
    } else {
        " Add Item "
    };
    let mut lines: Vec<Line> = vec![Line::from(""), Line::from("")];
    lines.push(form_line(
        "Name",
        form.draft.name.clone(),
        form.field == ItemField::Name,
        th,
    ));
    lines.push(form_line(
        "Description",
        form.draft.description.clone(),
        form.field == ItemField::Description,
        th,
    ));
    lines.push(form_line(
        "Category",
        form.draft.category.clone(),
        form.field == ItemField::Category,
        th,
    ));
    lines.push(form_line(
        "Value",
        form.value_input.clone(),
        form.field == ItemField::Value,
        th,
    ));
    lines.push(form_line(
        "Condition",
        form.draft.condition.clone(),
        form.field == ItemField::Condition,
        th,
    ));
    lines.push(form_line(
        "Image ref",
        form.image_input.clone(),
        form.field == ItemField::Image,
        th,
    ));
    lines.push(Line::from(Span::styled(
        format!("  images attached: {}", form.draft.images.len()),
        Style::default().fg(th.subtext),
    )));
    lines.push(Line::from(""));
    lines.push(hint(
        th,
        "Tab: next field   Enter on Image: attach   Ctrl-S: save   Esc: close",
    ));

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.border_focus))
            .style(Style::default().bg(th.panel)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

/// Subdued single-line key hint.
fn hint<'a>(th: &Theme, text: &'a str) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(th.subtext)))
}
