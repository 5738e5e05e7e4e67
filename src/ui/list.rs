// Starred list rendering.
// Provides the repository list view with loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, Row, StarredState};

use super::colors;

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Two-line list entry for one starred repository.
fn row_item(row: &Row) -> ListItem<'static> {
    let first = Line::from(vec![
        Span::styled(
            row.full_name(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            row.description_or_empty().to_string(),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let mut second = Vec::new();
    if let Some(lang) = &row.language {
        second.push(Span::styled(
            "● ",
            Style::default().fg(colors::language_color(lang)),
        ));
        second.push(Span::raw(format!("{}  ", lang)));
    }
    second.push(Span::styled(
        format!("{} ★", row.stars),
        Style::default().fg(Color::Yellow),
    ));

    ListItem::new(vec![first, Line::from(second)])
}

/// Render the starred repositories list. Errors take precedence over loading,
/// loading over emptiness.
pub fn render_starred_list(frame: &mut Frame, state: &mut StarredState, area: Rect) {
    match &state.data {
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Idle => render_empty(frame, area, "No data"),
        LoadingState::Loading => {
            let message = match state.progress {
                Some(p) => format!("Loading (page {}, {} repositories)", p.page, p.total),
                None => "Loading".to_string(),
            };
            render_loading(frame, area, &message);
        }
        LoadingState::Loaded(_) => {
            let items: Vec<ListItem> = state.visible_rows().into_iter().map(row_item).collect();
            if items.is_empty() {
                render_empty(frame, area, "No data");
                return;
            }

            let list_widget = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Starred "))
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut state.list_state);
        }
    }
}
