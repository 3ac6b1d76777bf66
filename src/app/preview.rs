//! Preview cache and commit gate.
//!
//! [PreviewState] owns the single preview slot. Two checks guard it:
//! - at write time ([PreviewState::commit]) a result is accepted only if its generation
//!   equals the latest dispatched generation and is newer than the last commit;
//! - at read time ([PreviewState::cached_for]) the slot is shown only if its path equals
//!   the entry under the cursor.
//!
//! Comparing paths alone would accept a late result in the A -> B -> A case. Comparing
//! generations alone would show a slot for an entry that is no longer selected.

use crate::core::catalog::Entry;
use crate::core::kind::EntryKind;
use crate::core::worker::{PreviewJob, PreviewPayload, PreviewResult};

use std::path::{Path, PathBuf};

/// The committed preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSlot {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub payload: PreviewPayload,
    pub generation: u64,
}

/// Previews built on the UI thread: directory listings and raw reads.
#[derive(Debug, Clone)]
pub enum InlineBody {
    Listing(Vec<Entry>),
    Lines(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct InlinePreview {
    pub path: PathBuf,
    pub body: InlineBody,
}

/// What a call to [PreviewState::plan] decided.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The slot already holds this path.
    Cached,
    /// The latest job is for this path and has not reported yet.
    Waiting,
    /// A new job should be started.
    Start(PreviewJob),
}

#[derive(Debug, Default)]
pub struct PreviewState {
    latest: u64,
    committed: u64,
    in_flight: Option<PathBuf>,
    slot: Option<PreviewSlot>,
    inline: Option<InlinePreview>,
}

impl PreviewState {
    #[inline]
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    #[inline]
    pub fn slot(&self) -> Option<&PreviewSlot> {
        self.slot.as_ref()
    }

    #[inline]
    pub fn in_flight(&self) -> Option<&Path> {
        self.in_flight.as_deref()
    }

    /// Decides how to obtain a preview for `path`.
    ///
    /// Starting a job bumps the generation and empties the slot, which makes every
    /// older job's result uncommittable.
    pub fn plan(&mut self, path: &Path, kind: EntryKind, max_lines: usize, width: usize) -> Dispatch {
        if self.slot.as_ref().is_some_and(|s| s.path == path) {
            return Dispatch::Cached;
        }
        if self.in_flight.as_deref() == Some(path) {
            return Dispatch::Waiting;
        }

        self.latest += 1;
        self.slot = None;
        self.in_flight = Some(path.to_path_buf());

        Dispatch::Start(PreviewJob {
            generation: self.latest,
            path: path.to_path_buf(),
            kind,
            max_lines,
            width,
        })
    }

    /// Applies a finished job. Returns true if the slot changed.
    pub fn commit(&mut self, result: PreviewResult) -> bool {
        if result.generation != self.latest || result.generation <= self.committed {
            tracing::debug!(
                generation = result.generation,
                latest = self.latest,
                path = %result.path.display(),
                "stale preview dropped"
            );
            return false;
        }

        self.committed = result.generation;
        self.in_flight = None;
        self.slot = Some(PreviewSlot {
            path: result.path,
            kind: result.kind,
            payload: result.payload,
            generation: result.generation,
        });
        true
    }

    /// Settles a job that could not be started, so its path shows "no preview"
    /// instead of waiting forever. Returns true if the slot changed.
    pub fn abandon(&mut self, job: &PreviewJob) -> bool {
        self.commit(PreviewResult {
            generation: job.generation,
            path: job.path.clone(),
            kind: job.kind,
            payload: PreviewPayload::empty(job.kind),
        })
    }

    /// The slot, if it belongs to `selected`.
    pub fn cached_for(&self, selected: &Path) -> Option<&PreviewSlot> {
        self.slot.as_ref().filter(|s| s.path == selected)
    }

    /// Drops the slot and supersedes any in-flight job.
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.slot = None;
        self.in_flight = None;
        self.inline = None;
    }

    pub fn set_inline(&mut self, path: PathBuf, body: InlineBody) {
        self.inline = Some(InlinePreview { path, body });
    }

    pub fn inline_for(&self, selected: &Path) -> Option<&InlineBody> {
        self.inline
            .as_ref()
            .filter(|i| i.path == selected)
            .map(|i| &i.body)
    }

    pub fn clear_inline(&mut self) {
        self.inline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(generation: u64, path: &str) -> PreviewResult {
        PreviewResult {
            generation,
            path: PathBuf::from(path),
            kind: EntryKind::Code,
            payload: PreviewPayload::Text(vec![path.to_string()]),
        }
    }

    fn start(state: &mut PreviewState, path: &str) -> u64 {
        match state.plan(Path::new(path), EntryKind::Code, 10, 10) {
            Dispatch::Start(job) => job.generation,
            other => panic!("expected a new job, got {other:?}"),
        }
    }

    #[test]
    fn cached_and_waiting() {
        let mut state = PreviewState::default();
        let g = start(&mut state, "/a");
        assert_eq!(
            state.plan(Path::new("/a"), EntryKind::Code, 10, 10),
            Dispatch::Waiting
        );
        assert!(state.commit(result(g, "/a")));
        assert_eq!(
            state.plan(Path::new("/a"), EntryKind::Code, 10, 10),
            Dispatch::Cached
        );
    }

    #[test]
    fn aba_rejects_first_a() {
        let mut state = PreviewState::default();
        let g1 = start(&mut state, "/a");
        let g2 = start(&mut state, "/b");
        let g3 = start(&mut state, "/a");

        assert!(!state.commit(result(g1, "/a")));
        assert!(state.slot().is_none());
        assert!(!state.commit(result(g2, "/b")));
        assert!(state.commit(result(g3, "/a")));
        assert_eq!(state.slot().map(|s| s.generation), Some(g3));
    }

    #[test]
    fn lower_generation_never_overwrites() {
        let mut state = PreviewState::default();
        let g = start(&mut state, "/a");
        assert!(state.commit(result(g, "/a")));
        assert!(!state.commit(result(g, "/a")));
        assert!(!state.commit(result(g - 1, "/x")));
        assert_eq!(state.slot().map(|s| s.path.as_path()), Some(Path::new("/a")));
    }

    #[test]
    fn freshness_is_by_path() {
        let mut state = PreviewState::default();
        let g = start(&mut state, "/a");
        state.commit(result(g, "/a"));
        assert!(state.cached_for(Path::new("/a")).is_some());
        assert!(state.cached_for(Path::new("/b")).is_none());
    }

    #[test]
    fn invalidate_supersedes_in_flight() {
        let mut state = PreviewState::default();
        let g = start(&mut state, "/a");
        state.invalidate();
        assert!(!state.commit(result(g, "/a")));
        assert!(matches!(
            state.plan(Path::new("/a"), EntryKind::Code, 10, 10),
            Dispatch::Start(_)
        ));
    }

    #[test]
    fn abandoned_job_stops_waiting() {
        let mut state = PreviewState::default();
        let job = match state.plan(Path::new("/a.png"), EntryKind::Image, 10, 10) {
            Dispatch::Start(job) => job,
            other => panic!("expected a new job, got {other:?}"),
        };

        assert!(state.abandon(&job));
        assert!(state.in_flight().is_none());
        let slot = state.cached_for(Path::new("/a.png")).map(|s| &s.payload);
        assert_eq!(slot, Some(&PreviewPayload::Image(String::new())));
        assert_eq!(
            state.plan(Path::new("/a.png"), EntryKind::Image, 10, 10),
            Dispatch::Cached
        );
    }
}
