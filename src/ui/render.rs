//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into pinned/parent/main/preview chunks.
//!
//! This module stays "pure rendering": it reads state and config and produces
//! widgets. The only thing it writes back is the measured layout.

use crate::app::{AppState, LayoutMetrics};
use crate::ui::{panes, widgets};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

/// Pane rectangles for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    pub pins: Option<Rect>,
    pub parent: Rect,
    pub main: Rect,
    pub preview: Rect,
}

/// Renders the whole UI for one frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let [body, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    let panes_area = pane_areas(body, app);

    app.update_layout_metrics(LayoutMetrics {
        preview_area: panes_area.preview,
        list_height: panes_area.main.height.saturating_sub(2) as usize,
    });
    let app = &*app;

    if let Some(area) = panes_area.pins {
        panes::draw_pins(frame, app, area);
    }
    panes::draw_parent(frame, app, panes_area.parent);
    panes::draw_main(frame, app, panes_area.main);
    panes::draw_preview(frame, app, panes_area.preview);
    widgets::draw_status(frame, app, status);
}

/// Splits `area` horizontally by the configured ratios.
///
/// Returns four chunks when the pinned pane is shown, three otherwise.
pub fn layout_chunks(area: Rect, app: &AppState) -> Vec<Rect> {
    let display = app.config().display();
    let with_pins = display.pins();
    let constraints: Vec<Constraint> = display
        .layout()
        .percentages(with_pins)
        .iter()
        .enumerate()
        .filter(|(idx, _)| with_pins || *idx != 0)
        .map(|(_, pct)| Constraint::Percentage(*pct))
        .collect();

    Layout::horizontal(constraints).split(area).to_vec()
}

pub fn pane_areas(area: Rect, app: &AppState) -> PaneAreas {
    let chunks = layout_chunks(area, app);
    match chunks.as_slice() {
        [pins, parent, main, preview] => PaneAreas {
            pins: Some(*pins),
            parent: *parent,
            main: *main,
            preview: *preview,
        },
        [parent, main, preview] => PaneAreas {
            pins: None,
            parent: *parent,
            main: *main,
            preview: *preview,
        },
        _ => PaneAreas {
            pins: None,
            parent: Rect::default(),
            main: area,
            preview: Rect::default(),
        },
    }
}
