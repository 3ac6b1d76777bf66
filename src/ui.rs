//! Terminal UI for triptych, drawn with ratatui.
//!
//! [render] draws one frame from an [AppState](crate::app::AppState). Image previews
//! are not drawn here; `core::terminal` places them after the frame is flushed.

pub mod icons;
pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
