// UI module for rendering the TUI.
// Contains the header, the starred list, and plain-text output.

mod colors;
mod header;
mod list;
pub mod plain;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Starred list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    header::draw_header(frame, app, chunks[0]);
    list::render_starred_list(frame, &mut app.starred, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  ←→ "),
        Span::styled("Language", Style::default().fg(Color::DarkGray)),
        Span::raw("  a "),
        Span::styled("All", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Reload", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    // Cache write failures are not blocking; show them here.
    if let Some(warning) = app
        .starred
        .data
        .data()
        .and_then(|list| list.cache_warning.as_deref())
    {
        hints.push(Span::styled(
            format!("  ⚠ {}", warning),
            Style::default().fg(Color::Yellow),
        ));
    } else if app.starred.data.is_loading() {
        hints.push(Span::styled("  fetching…", Style::default().fg(Color::Yellow)));
    } else if let Some(row) = app.starred.selected_row() {
        hints.push(Span::styled(
            format!("  {}", row.html_url()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 46;
    let popup_height = 12;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = Style::default().fg(Color::Cyan);
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑/↓ or j/k    ", key),
            Span::raw("Navigate list"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→ or h/l    ", key),
            Span::raw("Cycle language filter"),
        ]),
        Line::from(vec![
            Span::styled("  a             ", key),
            Span::raw("Show all languages"),
        ]),
        Line::from(vec![
            Span::styled("  r             ", key),
            Span::raw("Drop cache and reload"),
        ]),
        Line::from(vec![
            Span::styled("  ?             ", key),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![Span::styled("  q             ", key), Span::raw("Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
