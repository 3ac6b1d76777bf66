//! Command-line argument handling for triptych.
//!
//! `tri` takes at most one argument: a directory to open, or one of the flags below.

use crate::config::Config;

pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args)
}

pub fn parse_args(args: &[String]) -> CliAction {
    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: triptych accepts only one argument at a time.");
        eprintln!("Usage: tri [PATH] or tri [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            println!("triptych {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_help() {
    println!(
        r#"triptych - Miller-columns file browser with inline previews

USAGE:
  tri [PATH]

PATH:
  Directory to open (defaults to current directory)

OPTIONS:
      --init              Write the default configuration file
  -h, --help              Print help information
  -v, --version           Print the version

KEYS:
  j/k, Up/Down            Move            h, Left, Backspace   Parent directory
  l, Right, Enter         Open            g / G                Top / bottom
  space, v                Toggle select   a / Esc              Select all / clear
  y / x / p               Yank, cut, paste
  n / N / r / d / z       New file, new folder, rename, delete, zip
  b / u                   Pin, unpin      Tab                  Focus pinned pane
  .                       Hidden files    q                    Quit

ENVIRONMENT:
  TRIPTYCH_CONFIG         Override the config file path
  TRIPTYCH_LOG            Log filter, e.g. "debug" or "triptych=trace"
"#
    );
}
