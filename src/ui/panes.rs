//! UI pane drawing module for triptych.
//!
//! Drawers for the pinned, parent, files and preview panes. Used internally by
//! `ui::render`.

use crate::app::{AppState, Focus, PreviewView};
use crate::core::catalog::Entry;
use crate::core::graphics::{HEADER_COLS, HEADER_ROWS};
use crate::core::preview::{fit_width, format_modified, format_size};
use crate::ui::icons::nerd_font_icon;
use crate::ui::widgets::get_pane_block;
use crate::utils::shorten_home_path;

use ansi_to_tui::IntoText;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

fn entry_style(entry: &Entry) -> Style {
    if entry.is_dir() {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn entry_label(entry: &Entry, icons: bool) -> String {
    if icons {
        format!("{} {}", nerd_font_icon(entry), entry.name())
    } else {
        entry.name().to_string()
    }
}

/// Draws the pinned directories. The cursor is only highlighted while the pane has focus.
pub fn draw_pins(frame: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus() == Focus::Pins;
    let block = get_pane_block(" Pinned ".to_string(), focused);

    if app.pins().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("[No pins]", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .pins()
        .pins()
        .iter()
        .map(|p| ListItem::new(shorten_home_path(p)))
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.pins().cursor()));
    }

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
        area,
        &mut state,
    );
}

/// Draws the parent catalog with the current directory highlighted.
pub fn draw_parent(frame: &mut Frame, app: &AppState, area: Rect) {
    let icons = app.config().display().icons();
    let items: Vec<ListItem> = app
        .nav()
        .parent_entries()
        .iter()
        .map(|e| ListItem::new(entry_label(e, icons)).style(entry_style(e)))
        .collect();

    let mut state = ListState::default();
    state.select(app.nav().parent_cursor());

    frame.render_stateful_widget(
        List::new(items)
            .block(get_pane_block(" Parent ".to_string(), false))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
        area,
        &mut state,
    );
}

/// Draws the current catalog: selection markers, icons and a right-aligned size column.
pub fn draw_main(frame: &mut Frame, app: &AppState, area: Rect) {
    let nav = app.nav();
    let focused = app.focus() == Focus::Files;

    let mut title = format!(" {} ", shorten_home_path(nav.current_dir()));
    if !nav.selected().is_empty() {
        title.push_str(&format!("[{} sel] ", nav.selected().len()));
    }
    let block = get_pane_block(title, focused);

    if nav.entries().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("[Empty]", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let height = area.height.saturating_sub(2) as usize;
    let icons = app.config().display().icons();

    let lines: Vec<Line> = nav
        .entries()
        .iter()
        .enumerate()
        .skip(nav.scroll())
        .take(height)
        .map(|(idx, entry)| {
            let is_selected = nav.is_selected(entry.path());
            let mut style = entry_style(entry);
            if is_selected {
                style = style.fg(Color::Yellow);
            }
            if app.clipboard().contains(entry.path()) {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if idx == nav.cursor() {
                style = style.add_modifier(if focused {
                    Modifier::REVERSED
                } else {
                    Modifier::UNDERLINED
                });
            }
            Line::styled(main_row(entry, is_selected, icons, width), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn main_row(entry: &Entry, is_selected: bool, icons: bool, width: usize) -> String {
    let marker = if is_selected { '*' } else { ' ' };
    let size = if entry.is_dir() {
        String::new()
    } else {
        format_size(entry.size())
    };

    let avail = width.saturating_sub(size.width() + 1);
    let left = fit_width(&format!("{marker}{}", entry_label(entry, icons)), avail);
    let pad = avail.saturating_sub(left.width());
    format!("{left}{} {size}", " ".repeat(pad))
}

/// Draws the details header and the preview body.
///
/// Text bodies start [HEADER_ROWS] rows below the pane's top edge, clear of the
/// details header. Images are placed by `core::graphics` and left blank here.
pub fn draw_preview(frame: &mut Frame, app: &AppState, area: Rect) {
    frame.render_widget(get_pane_block(" Preview ".to_string(), false), area);

    let Some(entry) = app.nav().current_entry() else {
        return;
    };

    let inner_width = area.width.saturating_sub(HEADER_COLS * 2);
    let header = Rect {
        x: area.x + HEADER_COLS.min(area.width),
        y: area.y + 2.min(area.height),
        width: inner_width,
        height: 4.min(area.height.saturating_sub(3)),
    };
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let size = if entry.is_dir() {
        "-".to_string()
    } else {
        format_size(entry.size())
    };
    let details = vec![
        Line::styled("Details:", label),
        Line::from(vec![Span::styled("Name: ", label), Span::raw(entry.name().to_string())]),
        Line::from(vec![Span::styled("Size: ", label), Span::raw(size)]),
        Line::from(vec![
            Span::styled("Modified: ", label),
            Span::raw(format_modified(entry.modified())),
        ]),
    ];
    frame.render_widget(Paragraph::new(details), header);

    if area.height <= HEADER_ROWS + 1 {
        return;
    }
    let body = Rect {
        x: area.x + HEADER_COLS.min(area.width),
        y: area.y + HEADER_ROWS,
        width: inner_width,
        height: area.height - HEADER_ROWS - 1,
    };

    let muted = Style::default().fg(Color::DarkGray);
    match app.preview_view() {
        PreviewView::Empty | PreviewView::Image => {}
        PreviewView::Listing(entries) if entries.is_empty() => {
            frame.render_widget(Paragraph::new(Span::styled("[Empty]", muted)), body);
        }
        PreviewView::Listing(entries) => {
            let icons = app.config().display().icons();
            let lines: Vec<Line> = entries
                .iter()
                .take(body.height as usize)
                .map(|e| Line::styled(entry_label(e, icons), entry_style(e)))
                .collect();
            frame.render_widget(Paragraph::new(lines), body);
        }
        PreviewView::Lines(lines) => {
            let joined = lines.join("\n");
            let text = joined
                .as_bytes()
                .into_text()
                .unwrap_or_else(|_| Text::raw(joined.clone()));
            frame.render_widget(Paragraph::new(text), body);
        }
        PreviewView::Unavailable => {
            frame.render_widget(Paragraph::new(Span::styled("no preview", muted)), body);
        }
        PreviewView::Loading => {
            frame.render_widget(Paragraph::new(Span::styled("Loading...", muted)), body);
        }
    }
}
