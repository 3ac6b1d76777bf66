//! Application state machine for triptych.
//!
//! Navigation, selection, pins, the clipboard and the preview cache live here, along
//! with the key handlers that mutate them. Drawing lives in `ui`, the event loop in
//! `core::terminal`.

pub mod actions;
pub mod clipboard;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod pins;
pub mod preview;
pub mod state;

pub use clipboard::{Clipboard, PasteReport};
pub use nav::NavState;
pub use pins::{PinList, PinOutcome};
pub use preview::{Dispatch, InlineBody, PreviewSlot, PreviewState};
pub use state::{AppState, Focus, KeypressResult, LayoutMetrics, PreviewView};
