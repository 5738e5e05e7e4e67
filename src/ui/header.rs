// Header rendering.
// Shows the identity, active language filter, repository count, and cache badge.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

use super::list::format_relative_time;

/// Draw the header at the top of the screen.
pub fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    if !app.starred.data.is_error() {
        spans.extend([
            Span::styled(" Language ", label),
            Span::styled(
                app.starred.filter.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", label),
            Span::raw(format!("{} repositories", app.starred.visible_rows().len())),
        ]);
    }

    if let Some(list) = app.starred.data.data().filter(|list| list.cached) {
        let age = list
            .cached_at
            .as_ref()
            .map(|at| format!(" {}", format_relative_time(at)))
            .unwrap_or_default();
        spans.push(Span::styled(" │ ", label));
        spans.push(Span::styled(
            format!("cached{}", age),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
        spans.push(Span::styled("  r ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled("Reload", label));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" gitmarks · {} ", app.identity))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(header, area);
}
