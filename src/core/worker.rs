//! Asynchronous preview pipeline.
//!
//! Every dispatch spawns one detached thread that runs a single [PreviewJob] and sends
//! its [PreviewResult] back over a bounded channel. Jobs are never cancelled. The
//! consumer (the UI tick, see `app::preview`) decides on receipt whether a result is
//! still wanted by comparing generation ids, so the producer never touches shared state.
//!
//! Job bodies:
//! - image/video: transcode a still frame and base64 it, empty payload on failure.
//! - text: NUL check, then each highlighter in order, then the raw line reader. A tier
//!   runs only when the previous one produced no lines.

use crate::core::graphics::encode_payload;
use crate::core::kind::{EntryKind, PreviewKind};
use crate::core::preview::{BINARY_MARKER, is_binary, read_lines};
use crate::core::proc::{Highlighter, Transcoder};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Work description for one preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewJob {
    pub generation: u64,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub max_lines: usize,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPayload {
    /// Base64 PNG data, empty when transcoding failed.
    Image(String),
    /// Display lines, possibly carrying ANSI color sequences.
    Text(Vec<String>),
}

impl PreviewPayload {
    /// The "no preview" payload for `kind`.
    pub fn empty(kind: EntryKind) -> Self {
        match kind.preview_kind() {
            PreviewKind::Image => PreviewPayload::Image(String::new()),
            _ => PreviewPayload::Text(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PreviewPayload::Image(data) => data.is_empty(),
            PreviewPayload::Text(lines) => lines.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    pub generation: u64,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub payload: PreviewPayload,
}

/// The external tools a job may use.
pub struct PreviewTools {
    transcoder: Arc<dyn Transcoder>,
    highlighters: Vec<Arc<dyn Highlighter>>,
}

impl PreviewTools {
    pub fn new(transcoder: Arc<dyn Transcoder>, highlighters: Vec<Arc<dyn Highlighter>>) -> Self {
        Self {
            transcoder,
            highlighters,
        }
    }
}

/// Spawns preview jobs and collects their results.
pub struct PreviewPipeline {
    tools: Arc<PreviewTools>,
    result_tx: Sender<PreviewResult>,
    result_rx: Receiver<PreviewResult>,
    in_flight: Arc<AtomicUsize>,
}

impl PreviewPipeline {
    pub fn new(tools: PreviewTools) -> Self {
        let (result_tx, result_rx) = bounded::<PreviewResult>(1);
        Self {
            tools: Arc::new(tools),
            result_tx,
            result_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts `job` on its own thread. The thread is not joined.
    ///
    /// Fails only when the thread cannot be spawned; the job is then dropped.
    pub fn dispatch(&self, job: PreviewJob) -> io::Result<()> {
        let tools = Arc::clone(&self.tools);
        let tx = self.result_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        in_flight.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(generation = job.generation, path = %job.path.display(), "preview job dispatched");

        let spawned = thread::Builder::new()
            .name(format!("preview-{}", job.generation))
            .spawn(move || {
                let result = run_job(&tools, job);
                // The receiver only disappears at shutdown.
                let _ = tx.send(result);
                in_flight.fetch_sub(1, Ordering::AcqRel);
            });

        match spawned {
            Ok(_) => Ok(()),
            Err(e) => {
                self.in_flight.fetch_sub(1, Ordering::AcqRel);
                tracing::error!(error = %e, "failed to spawn preview job");
                Err(e)
            }
        }
    }

    /// Non-blocking poll for a finished job.
    pub fn try_recv(&self) -> Option<PreviewResult> {
        self.result_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for a finished job.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PreviewResult> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(res) => Some(res),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Jobs started but not yet delivered.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Runs one job to completion on the calling thread.
pub fn run_job(tools: &PreviewTools, job: PreviewJob) -> PreviewResult {
    let payload = match job.kind.preview_kind() {
        PreviewKind::Image => PreviewPayload::Image(image_payload(tools, &job.path, job.kind)),
        _ => PreviewPayload::Text(text_payload(tools, &job.path, job.max_lines, job.width)),
    };

    PreviewResult {
        generation: job.generation,
        path: job.path,
        kind: job.kind,
        payload,
    }
}

fn image_payload(tools: &PreviewTools, path: &Path, kind: EntryKind) -> String {
    match tools.transcoder.transcode(path, kind) {
        Ok(bytes) => encode_payload(&bytes),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "thumbnail failed");
            String::new()
        }
    }
}

/// Binary marker, highlighted lines, or raw lines, in that order of preference.
pub fn text_payload(
    tools: &PreviewTools,
    path: &Path,
    max_lines: usize,
    width: usize,
) -> Vec<String> {
    if let Ok(true) = is_binary(path) {
        return vec![BINARY_MARKER.to_string()];
    }

    for highlighter in &tools.highlighters {
        match highlighter.highlight(path, max_lines) {
            Ok(lines) if !lines.is_empty() => return lines,
            Ok(_) => {
                tracing::debug!(tool = highlighter.name(), "highlighter produced no lines")
            }
            Err(e) => tracing::debug!(tool = highlighter.name(), error = %e, "highlighter failed"),
        }
    }

    read_lines(path, max_lines, width)
}
