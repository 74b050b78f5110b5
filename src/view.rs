use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::BridgeConfig;
use crate::dom::DocumentBinding;
use crate::time::MediaTime;
use crate::watcher::SkinWatcher;

/// Element ids and class tokens the skin page is expected to use. Only the
/// content root is structurally required; everything else is optional and
/// skipped when a skin omits it.
pub const CONTENT_ID: &str = "content";
pub const TIMELINE_ID: &str = "timeline";
pub const ELAPSED_TIME_ID: &str = "elapsed-time";
pub const TITLE_ID: &str = "title";
pub const LIST_COUNT_ID: &str = "list-count";
pub const SUBLIST_COUNT_ID: &str = "sublist-count";

pub const PLAYING_CLASS: &str = "playing";
pub const PAUSED_CLASS: &str = "paused";
pub const SEEKABLE_CLASS: &str = "seekable";

/// The in-memory mirror of native player state. Everything the skin renders
/// comes from here; the DOM is never read back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSnapshot {
    pub position: f32,
    pub playing: bool,
    pub seekable: bool,
    pub current_time: MediaTime,
    pub title: String,
    pub list_count: usize,
    pub sublist_count: usize,
}

/// Keeps a playback snapshot synchronized with the loaded skin page.
///
/// Setters update the snapshot unconditionally and push the matching DOM
/// mutation only while a page binding is installed. While no binding is
/// installed (before the first load, or between a navigation and its
/// load-finished event) the writes are deferred; the full-snapshot flush on
/// the next load-finished picks them up, last write per field winning.
pub struct StyledView<B: DocumentBinding> {
    config: BridgeConfig,
    snapshot: PlaybackSnapshot,
    frame: Option<B>,
    has_loaded_a_first_frame: bool,
    is_set_up: bool,
    reported_missing: HashSet<String>,
    watcher: Option<SkinWatcher>,
}

impl<B: DocumentBinding> StyledView<B> {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            snapshot: PlaybackSnapshot::default(),
            frame: None,
            has_loaded_a_first_frame: false,
            is_set_up: false,
            reported_missing: HashSet::new(),
            watcher: None,
        }
    }

    /// Idempotent. Resets the snapshot to its defaults and registers the
    /// skin-root watch; a failing watch registration degrades to a warning,
    /// the view stays fully usable without it.
    pub fn setup(&mut self) {
        if self.is_set_up {
            return;
        }
        self.snapshot = PlaybackSnapshot::default();
        match SkinWatcher::watch(&self.config.skin_root) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(err) => tracing::warn!("Skin watching disabled: {err}"),
        }
        self.is_set_up = true;
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    /// Logical identifier of the page this view wants loaded.
    pub fn page_name(&self) -> &str {
        &self.config.page_identifier
    }

    pub fn page_path(&self) -> PathBuf {
        self.config.skin_root.join(&self.config.page_identifier)
    }

    pub fn is_frame_loaded(&self) -> bool {
        self.frame.is_some()
    }

    pub fn has_loaded_a_first_frame(&self) -> bool {
        self.has_loaded_a_first_frame
    }

    /// Install the freshly loaded page and flush the whole snapshot into it,
    /// so deferred writes become visible and the skin never renders stale
    /// defaults. A load reported while a page is already live is a
    /// sub-resource completion; the incremental setter pushes have been
    /// keeping that page current, so it is ignored.
    pub fn on_frame_load_finished(&mut self, binding: B) {
        if self.frame.is_some() {
            return;
        }
        self.frame = Some(binding);
        if !self.has_loaded_a_first_frame {
            self.has_loaded_a_first_frame = true;
            tracing::info!("Skin page {} ready", self.config.page_identifier);
        }
        self.flush_snapshot();
    }

    /// The surface is navigating away; drop the stale page. Setters called
    /// from here on update only the snapshot until the next load finishes.
    pub fn begin_navigation(&mut self) {
        if self.frame.take().is_some() {
            tracing::debug!("Page navigation started; deferring DOM writes");
        }
    }

    pub fn set_viewed_position(&mut self, position: f32) {
        if !position.is_finite() {
            return;
        }
        self.snapshot.position = position.clamp(0.0, 1.0);
        self.push_position();
    }

    pub fn set_viewed_playing(&mut self, playing: bool) {
        self.snapshot.playing = playing;
        self.push_playing();
    }

    pub fn set_seekable(&mut self, seekable: bool) {
        self.snapshot.seekable = seekable;
        self.push_seekable();
    }

    pub fn set_current_time(&mut self, time: MediaTime) {
        self.snapshot.current_time = time;
        self.push_current_time();
    }

    pub fn set_window_title(&mut self, title: impl Into<String>) {
        self.snapshot.title = title.into();
        self.push_title();
    }

    pub fn set_list_count(&mut self, count: usize) {
        self.snapshot.list_count = count;
        self.push_count(LIST_COUNT_ID, count);
    }

    pub fn set_sublist_count(&mut self, count: usize) {
        self.snapshot.sublist_count = count;
        self.push_count(SUBLIST_COUNT_ID, count);
    }

    pub fn add_class_to_content(&mut self, class: &str) {
        self.push_content_class(class, true);
    }

    pub fn remove_class_from_content(&mut self, class: &str) {
        self.push_content_class(class, false);
    }

    /// Existence probe for a skin element. A required element that turns out
    /// to be absent is reported once per id; optional absence is silent.
    /// Never panics, and the view stays usable either way.
    pub fn element_for_id(&mut self, id: &str, required: bool) -> bool {
        let Some(frame) = self.frame.as_ref() else {
            return false;
        };
        let found = frame.has_element(id);
        if !found && required {
            self.report_missing(id);
        }
        found
    }

    /// Drain the skin watcher. A relevant change re-applies the snapshot,
    /// the same full flush a load-finished performs.
    pub fn poll_skin_changes(&mut self) -> bool {
        let changed = self.watcher.as_mut().map(|w| w.poll()).unwrap_or(false);
        if changed {
            tracing::info!(
                "Skin resources changed under {}; re-applying player state",
                self.config.skin_root.display()
            );
            if self.frame.is_some() {
                self.flush_snapshot();
            }
        }
        changed
    }

    fn flush_snapshot(&mut self) {
        self.push_title();
        self.push_current_time();
        self.push_position();
        self.push_playing();
        self.push_seekable();
        self.push_count(LIST_COUNT_ID, self.snapshot.list_count);
        self.push_count(SUBLIST_COUNT_ID, self.snapshot.sublist_count);
    }

    /// Snapshot-only position update, for when a scrub gesture owns the
    /// position control and the DOM must not be repainted underneath it.
    pub(crate) fn note_viewed_position(&mut self, position: f32) {
        if position.is_finite() {
            self.snapshot.position = position.clamp(0.0, 1.0);
        }
    }

    pub(crate) fn push_position(&mut self) {
        let position = self.snapshot.position;
        self.push_position_value(position);
    }

    pub(crate) fn push_position_value(&mut self, position: f32) {
        if let Some(frame) = self.frame.as_mut() {
            frame.set_attribute(TIMELINE_ID, "value", &format!("{position}"));
        }
    }

    pub(crate) fn push_text(&mut self, id: &str, text: &str) {
        if let Some(frame) = self.frame.as_mut() {
            frame.set_text(id, text);
        }
    }

    fn push_current_time(&mut self) {
        let text = self.snapshot.current_time.to_string();
        self.push_text(ELAPSED_TIME_ID, &text);
    }

    fn push_title(&mut self) {
        let title = self.snapshot.title.clone();
        self.push_text(TITLE_ID, &title);
    }

    fn push_playing(&mut self) {
        let playing = self.snapshot.playing;
        self.push_content_class(PAUSED_CLASS, !playing);
        self.push_content_class(PLAYING_CLASS, playing);
    }

    fn push_seekable(&mut self) {
        let seekable = self.snapshot.seekable;
        self.push_content_class(SEEKABLE_CLASS, seekable);
    }

    fn push_count(&mut self, id: &str, count: usize) {
        self.push_text(id, &count.to_string());
    }

    fn push_content_class(&mut self, class: &str, enabled: bool) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        let found = if enabled {
            frame.add_class(CONTENT_ID, class)
        } else {
            frame.remove_class(CONTENT_ID, class)
        };
        if !found {
            self.report_missing(CONTENT_ID);
        }
    }

    fn report_missing(&mut self, id: &str) {
        if self.reported_missing.insert(id.to_string()) {
            tracing::warn!("Skin page has no #{id} element; writes to it are skipped");
        }
    }
}
