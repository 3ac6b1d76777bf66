//! Configuration for triptych.
//!
//! Settings are read from `triptych.toml` into a [RawConfig] made of the section
//! structs below, then frozen into the [Config] the rest of the app borrows:
//! - [general]: hidden files and the pin/log file locations.
//! - [display]: pane ratios, pinned pane and icons.
//! - [tools]: external programs used for previews, opening and archiving.
//! - [input]: key bindings for every action.
//! - [load]: file discovery, parsing and `--init`.

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod tools;

pub use display::{Display, LayoutRatios};
pub use general::{General, InternalGeneral};
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use tools::{OpenerTools, PreviewTools};
