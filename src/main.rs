//! main.rs
//! Entry point for triptych

use triptych::app::AppState;
use triptych::config::Config;
use triptych::core::graphics::DELETE_ALL;
use triptych::core::terminal;
use triptych::utils::cli::{CliAction, handle_args};
use triptych::utils::expand_home_path;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(DELETE_ALL.as_bytes());
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[triptych] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    let initial_path = match action {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => {
            let target = fs::canonicalize(expand_home_path(&path_arg)).ok();
            match target {
                Some(dir) if dir.is_dir() => Some(dir),
                _ => {
                    eprintln!("\n[triptych] Error: Path '{}' cannot be opened.", path_arg);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = Config::load();
    init_logging(config.general().log_file());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut app = match initial_path {
        Some(path) => AppState::from_dir(&config, &path)?,
        None => AppState::new(&config)?,
    };
    terminal::run_terminal(&mut app)
}

/// Sends tracing output to `log_file`, filtered by `TRIPTYCH_LOG`.
///
/// Logging stays off when the file cannot be opened; the TUI owns stdout.
fn init_logging(log_file: &Path) {
    if let Some(parent) = log_file.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_file) else {
        return;
    };

    let filter = EnvFilter::try_from_env("TRIPTYCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
