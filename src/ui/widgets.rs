//! Small shared widgets: pane blocks and the bottom status line.

use crate::app::AppState;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const HELP_HINT: &str = "Space/v:Select Esc:Clear a:All y:Yank x:Cut p:Paste d:Del z:Zip n/N:New b:Pin Tab:Pins .:Hidden q:Quit";

pub fn accent_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Bordered pane block; the focused pane gets the accent border.
pub fn get_pane_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        accent_style()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title)
}

/// Draws the prompt when one is open, else the status message, else the key hint.
pub fn draw_status(frame: &mut Frame, app: &AppState, area: Rect) {
    let actions = app.actions();

    if let Some(prompt) = actions.prompt() {
        let buffer = actions.input_buffer();
        let line = Line::from(vec![
            Span::styled(prompt.to_string(), accent_style().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::raw(buffer.to_string()),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        let before: String = buffer.chars().take(actions.input_cursor_pos()).collect();
        let offset = prompt.width() + 1 + before.width();
        let x = area.x.saturating_add(offset as u16).min(area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
        return;
    }

    let mut spans = Vec::new();
    match app.status() {
        Some(msg) => spans.push(Span::styled(msg.to_string(), Style::default().fg(Color::Yellow))),
        None => spans.push(Span::styled(
            HELP_HINT,
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    let busy = app.pipeline().in_flight();
    if busy > 0 {
        spans.push(Span::styled(
            format!("  [{busy} preview jobs]"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
