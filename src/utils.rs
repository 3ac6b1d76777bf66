//! Miscellaneous utilities for triptych.
//!
//! - [helpers]: home path shortening/expansion and running a program outside the TUI.
//! - [cli]: command line flags.

pub mod cli;
pub mod helpers;

pub use helpers::{expand_home_path, shorten_home_path, with_suspended_terminal};
