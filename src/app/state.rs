//! Application state and main controller module for triptych.
//!
//! [AppState] owns every model the UI reads:
//! - configuration and the keymap
//! - navigation, selection, pins and the clipboard
//! - the preview cache slot and the background preview pipeline
//! - the external archiver and opener
//! - current layout metrics and the transient status message
//!
//! The terminal loop calls [AppState::tick] once per iteration to collect finished
//! preview jobs and start new ones, and [AppState::handle_keypress] for every key.

use crate::app::actions::ActionContext;
use crate::app::clipboard::Clipboard;
use crate::app::keymap::{Action, Keymap};
use crate::app::nav::NavState;
use crate::app::pins::PinList;
use crate::app::preview::{Dispatch, InlineBody, PreviewSlot, PreviewState};
use crate::config::Config;
use crate::core::catalog::{self, Entry};
use crate::core::kind::PreviewKind;
use crate::core::preview::raw_preview;
use crate::core::proc::{self, Archiver, FfmpegTranscoder, Opener, SystemOpener, ZipArchiver};
use crate::core::worker::{PreviewPayload, PreviewPipeline, PreviewTools};

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use std::io;
use std::path::Path;
use std::sync::Arc;

/// Outcome of a single keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    /// An external program had the terminal; the screen needs a full clear.
    OpenedExternal,
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Files,
    Pins,
}

/// Sizes measured during the last draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Outer rectangle of the preview pane, border included.
    pub preview_area: Rect,
    /// Rows available to the files list.
    pub list_height: usize,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            preview_area: Rect::new(0, 0, 40, 30),
            list_height: 20,
        }
    }
}

impl LayoutMetrics {
    /// Width and line count of the preview content below the details header.
    pub fn preview_content(&self) -> (usize, usize) {
        let width = self.preview_area.width.saturating_sub(4) as usize;
        let lines = self.preview_area.height.saturating_sub(8) as usize;
        (width, lines)
    }
}

/// What the preview pane should show for the entry under the cursor.
pub enum PreviewView<'s> {
    Empty,
    Listing(&'s [Entry]),
    Lines(&'s [String]),
    Image,
    Unavailable,
    Loading,
}

pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) metrics: LayoutMetrics,
    pub(super) focus: Focus,

    pub(super) nav: NavState,
    pub(super) pins: PinList,
    pub(super) clipboard: Clipboard,
    pub(super) actions: ActionContext,
    pub(super) preview: PreviewState,

    pub(super) pipeline: PreviewPipeline,
    pub(super) busy: usize,
    pub(super) archiver: Box<dyn Archiver>,
    pub(super) opener: Box<dyn Opener>,

    pub(super) status: Option<String>,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config) -> io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    /// Builds the state with the external tools named in the config.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> io::Result<Self> {
        let preview_cfg = config.preview();
        let highlighters = proc::installed_highlighters(preview_cfg.highlighters());
        if !proc::is_installed(preview_cfg.transcoder()) {
            tracing::warn!(
                tool = preview_cfg.transcoder(),
                "transcoder not installed, image previews disabled"
            );
        }
        let tools = PreviewTools::new(
            Arc::new(FfmpegTranscoder::new(
                preview_cfg.transcoder(),
                preview_cfg.thumbnail_width(),
            )),
            highlighters,
        );

        let opener_cfg = config.opener();
        Self::with_tools(
            config,
            initial_path,
            tools,
            Box::new(ZipArchiver::new(opener_cfg.archiver())),
            Box::new(SystemOpener::new(opener_cfg.cmd(), opener_cfg.media_player())),
        )
    }

    /// Builds the state around caller supplied tools.
    pub fn with_tools(
        config: &'a Config,
        initial_path: &Path,
        tools: PreviewTools,
        archiver: Box<dyn Archiver>,
        opener: Box<dyn Opener>,
    ) -> io::Result<Self> {
        let current_dir = if initial_path.is_dir() {
            initial_path.to_path_buf()
        } else {
            std::env::current_dir()?
        };

        Ok(Self {
            config,
            keymap: Keymap::from_config(config),
            metrics: LayoutMetrics::default(),
            focus: Focus::Files,
            nav: NavState::new(current_dir, config.general().show_hidden()),
            pins: PinList::load(config.general().pins_file().to_path_buf()),
            clipboard: Clipboard::default(),
            actions: ActionContext::default(),
            preview: PreviewState::default(),
            pipeline: PreviewPipeline::new(tools),
            busy: 0,
            archiver,
            opener,
            status: None,
        })
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn pins(&self) -> &PinList {
        &self.pins
    }

    #[inline]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[inline]
    pub fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[inline]
    pub fn pipeline(&self) -> &PreviewPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[inline]
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(super) fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Stores the measured layout. A changed preview size drops the cached preview.
    pub fn update_layout_metrics(&mut self, metrics: LayoutMetrics) {
        let resized = metrics.preview_area.width != self.metrics.preview_area.width
            || metrics.preview_area.height != self.metrics.preview_area.height;
        self.metrics = metrics;
        self.nav.ensure_visible(metrics.list_height);
        if resized {
            self.preview.invalidate();
        }
    }

    /// Terminal resize: everything built for the old pane size is stale.
    pub fn on_resize(&mut self) {
        self.preview.invalidate();
    }

    /// Collects finished preview jobs and starts the one the selection needs.
    ///
    /// Returns true when something visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        while let Some(result) = self.pipeline.try_recv() {
            changed |= self.preview.commit(result);
        }

        let busy = self.pipeline.in_flight();
        if busy != self.busy {
            self.busy = busy;
            changed = true;
        }

        changed |= self.sync_preview();
        changed
    }

    /// Makes sure the preview for the entry under the cursor exists or is on its way.
    ///
    /// Directories and raw files are built right here; images and text go through the
    /// pipeline. Returns true when a preview was built or a job was started.
    pub fn sync_preview(&mut self) -> bool {
        let Some(entry) = self.nav.current_entry() else {
            return false;
        };
        let path = entry.path().to_path_buf();
        let kind = entry.kind();
        let (width, max_lines) = self.metrics.preview_content();

        match kind.preview_kind() {
            PreviewKind::Listing => {
                if self.preview.inline_for(&path).is_some() {
                    return false;
                }
                let listing = catalog::load(&path, self.nav.show_hidden());
                self.preview.set_inline(path, InlineBody::Listing(listing));
                true
            }
            PreviewKind::Raw => {
                if self.preview.inline_for(&path).is_some() {
                    return false;
                }
                let lines = raw_preview(&path, max_lines, width);
                self.preview.set_inline(path, InlineBody::Lines(lines));
                true
            }
            PreviewKind::Image | PreviewKind::Text => {
                match self.preview.plan(&path, kind, max_lines, width) {
                    Dispatch::Start(job) => {
                        let settled = job.clone();
                        if self.pipeline.dispatch(job).is_err() {
                            self.preview.abandon(&settled);
                        }
                        true
                    }
                    Dispatch::Cached | Dispatch::Waiting => false,
                }
            }
        }
    }

    /// The committed slot, if it belongs to the entry under the cursor.
    pub fn fresh_slot(&self) -> Option<&PreviewSlot> {
        let entry = self.nav.current_entry()?;
        self.preview.cached_for(entry.path())
    }

    pub fn preview_view(&self) -> PreviewView<'_> {
        let Some(entry) = self.nav.current_entry() else {
            return PreviewView::Empty;
        };

        if let Some(body) = self.preview.inline_for(entry.path()) {
            return match body {
                InlineBody::Listing(entries) => PreviewView::Listing(entries),
                InlineBody::Lines(lines) => PreviewView::Lines(lines),
            };
        }

        match self.fresh_slot() {
            Some(slot) if slot.payload.is_empty() => PreviewView::Unavailable,
            Some(slot) => match &slot.payload {
                PreviewPayload::Image(_) => PreviewView::Image,
                PreviewPayload::Text(lines) => PreviewView::Lines(lines),
            },
            None => match entry.kind().preview_kind() {
                PreviewKind::Image | PreviewKind::Text => PreviewView::Loading,
                _ => PreviewView::Empty,
            },
        }
    }

    /// Image to place in the preview pane: generation, base64 payload and the pane area.
    pub fn image_placement(&self) -> Option<(u64, &str, Rect)> {
        let slot = self.fresh_slot()?;
        match &slot.payload {
            PreviewPayload::Image(data) if !data.is_empty() => {
                Some((slot.generation, data.as_str(), self.metrics.preview_area))
            }
            _ => None,
        }
    }

    /// Central key handler.
    ///
    /// Any keypress outside a prompt replaces the previous status message.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if self.actions.is_input_mode() {
            return self.handle_input_mode(key);
        }

        self.status = None;

        let Some(action) = self.keymap.lookup(key) else {
            return KeypressResult::Continue;
        };

        if self.focus == Focus::Pins
            && let Some(res) = self.handle_pins_focus(action)
        {
            return res;
        }

        match action {
            Action::System(sys_act) => self.handle_sys_action(sys_act),
            Action::Nav(nav_act) => self.handle_nav_action(nav_act),
            Action::File(file_act) => self.handle_file_action(file_act),
            Action::Pin(pin_act) => self.handle_pin_action(pin_act),
        }
    }

    /// Rebuilds the catalogs after a mutation, keeping the cursor on `focus` if listed.
    pub(super) fn reload(&mut self, focus: Option<&str>) {
        self.nav.reload(focus);
        self.preview.invalidate();
    }
}
