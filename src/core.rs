//! Core runtime logic for triptych.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [catalog]: directory snapshots as sorted [Entry] lists.
//! - [kind]: extension classification.
//! - [preview]: raw file reads, binary detection and detail formatting.
//! - [proc]: external tools (transcoder, highlighter, archiver, opener).
//! - [worker]: the background preview pipeline.
//! - [graphics]: the Kitty graphics protocol encoder.
//! - [fileops]: filesystem mutations and the paste policy.
//! - [pins]: pin file persistence.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the [FmError] taxonomy.

pub mod catalog;
pub mod error;
pub mod fileops;
pub mod graphics;
pub mod kind;
pub mod pins;
pub mod preview;
pub mod proc;
pub mod terminal;
pub mod worker;

pub use catalog::Entry;
pub use error::{FmError, FmResult};
pub use kind::{EntryKind, PreviewKind};
