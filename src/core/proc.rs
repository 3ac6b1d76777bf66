//! External tool capabilities.
//!
//! Each external program triptych talks to sits behind a small trait so the preview
//! pipeline and the file actions can be driven by fakes in tests:
//! - [Transcoder]: still frame extraction (`ffmpeg`).
//! - [Highlighter]: ANSI colored source lines (`bat`, `batcat`).
//! - [Archiver]: zip archives (`zip`).
//! - [Opener]: hand a file to the desktop opener or a media player.
//!
//! All commands are spawned with an explicit argument vector, never through a shell.

use crate::core::error::{FmError, FmResult};
use crate::core::kind::EntryKind;

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-process counter for scratch frame files.
static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

pub trait Transcoder: Send + Sync {
    /// Produces a scaled PNG still frame of an image or video.
    fn transcode(&self, input: &Path, kind: EntryKind) -> FmResult<Vec<u8>>;
}

pub trait Highlighter: Send + Sync {
    /// Returns at most `max_lines` highlighted lines of `path`.
    fn highlight(&self, path: &Path, max_lines: usize) -> FmResult<Vec<String>>;

    fn name(&self) -> &str;
}

pub trait Archiver {
    /// Archives `names` (relative to `cwd`) into `cwd/dest`.
    fn archive(&self, cwd: &Path, names: &[String], dest: &str) -> FmResult<()>;
}

pub trait Opener {
    fn open(&self, path: &Path, kind: EntryKind) -> FmResult<()>;
}

/// Whether `program` resolves on `PATH` (or is an existing path).
pub fn is_installed(program: &str) -> bool {
    which::which(program).is_ok()
}

fn ensure_installed(program: &str) -> FmResult<()> {
    if is_installed(program) {
        Ok(())
    } else {
        Err(FmError::ToolMissing(program.to_string()))
    }
}

/// Highlighters for the installed names, in the given order.
///
/// Missing binaries are dropped here so preview jobs never try to spawn them.
pub fn installed_highlighters<'n>(
    names: impl IntoIterator<Item = &'n str>,
) -> Vec<Arc<dyn Highlighter>> {
    names
        .into_iter()
        .filter(|name| {
            let found = is_installed(name);
            if !found {
                tracing::info!(tool = *name, "highlighter not installed, skipping");
            }
            found
        })
        .map(|name| Arc::new(CommandHighlighter::new(name)) as Arc<dyn Highlighter>)
        .collect()
}

fn check_status(tool: &str, status: ExitStatus) -> FmResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(FmError::ToolFailed {
            tool: tool.to_string(),
            status: status.to_string(),
        })
    }
}

fn scratch_path() -> PathBuf {
    let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("triptych-{}-{}.png", std::process::id(), seq))
}

/// `ffmpeg` based [Transcoder].
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: String,
    width: u32,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<String>, width: u32) -> Self {
        Self {
            program: program.into(),
            width,
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, kind: EntryKind) -> FmResult<Vec<u8>> {
        ensure_installed(&self.program)?;
        let out = scratch_path();
        let scale = format!("scale={}:-1", self.width);
        let filter = if kind == EntryKind::Video {
            format!("thumbnail,{scale}")
        } else {
            scale
        };

        // One frame only: animated images would otherwise make image2 fail on frame 2.
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-v", "error", "-i"])
            .arg(input)
            .arg("-vf")
            .arg(&filter)
            .args(["-frames:v", "1", "-f", "image2"])
            .arg(&out)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let status = cmd.status().map_err(|e| FmError::spawn(e, &self.program));
        let bytes = status
            .and_then(|s| check_status(&self.program, s))
            .and_then(|_| fs::read(&out).map_err(|e| FmError::at(e, &out)));
        let _ = fs::remove_file(&out);

        let bytes = bytes?;
        if bytes.is_empty() {
            return Err(FmError::EmptyOutput(self.program.clone()));
        }
        Ok(bytes)
    }
}

/// `bat` compatible [Highlighter], parameterised by binary name.
#[derive(Debug, Clone)]
pub struct CommandHighlighter {
    program: String,
}

impl CommandHighlighter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, path: &Path, max_lines: usize) -> FmResult<Vec<String>> {
        let range = format!("--line-range=:{}", max_lines.max(1));
        let output = Command::new(&self.program)
            .args([
                "--color=always",
                "--style=plain",
                "--paging=never",
                range.as_str(),
                "--",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| FmError::spawn(e, &self.program))?;

        check_status(&self.program, output.status)?;

        Ok(output
            .stdout
            .as_slice()
            .lines()
            .take(max_lines)
            .map_while(Result::ok)
            .collect())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// `zip` based [Archiver].
#[derive(Debug, Clone)]
pub struct ZipArchiver {
    program: String,
}

impl ZipArchiver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Archiver for ZipArchiver {
    fn archive(&self, cwd: &Path, names: &[String], dest: &str) -> FmResult<()> {
        ensure_installed(&self.program)?;
        let status = Command::new(&self.program)
            .args(["-r", "-q", dest])
            .args(names.iter().map(|n| Path::new(".").join(n)))
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| FmError::spawn(e, &self.program))?;
        check_status(&self.program, status)
    }
}

/// Opens media with a player and everything else with the platform opener.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    opener: String,
    player: String,
}

impl SystemOpener {
    pub fn new(opener: impl Into<String>, player: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
            player: player.into(),
        }
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path, kind: EntryKind) -> FmResult<()> {
        let program = if kind.is_media() {
            &self.player
        } else {
            &self.opener
        };
        ensure_installed(program)?;
        let status = Command::new(program)
            .arg(path)
            .status()
            .map_err(|e| FmError::spawn(e, program))?;
        check_status(program, status)
    }
}
