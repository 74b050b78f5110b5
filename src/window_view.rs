use std::time::Instant;

use crate::config::BridgeConfig;
use crate::dom::DocumentBinding;
use crate::gesture::{GesturePhase, ScrubGesture};
use crate::player::PlayerControl;
use crate::time::MediaTime;
use crate::view::StyledView;

pub const WINDOW_TITLE_ID: &str = "window-title";
pub const KEY_WINDOW_CLASS: &str = "key-window";
pub const MAIN_WINDOW_CLASS: &str = "main-window";

/// The window-chrome variant of the styled view: everything `StyledView`
/// does, plus key/main-window presentation classes, a dedicated window-title
/// node, and pointer scrubbing over the configured tracking region that is
/// translated into native seek commands.
///
/// Composes the base view rather than subclassing it; the wrapped view stays
/// reachable through `view`/`view_mut` for host code that only needs the
/// shared contract.
pub struct StyledWindowView<B: DocumentBinding, P: PlayerControl> {
    view: StyledView<B>,
    player: P,
    gesture: ScrubGesture,
}

impl<B: DocumentBinding, P: PlayerControl> StyledWindowView<B, P> {
    pub fn new(config: BridgeConfig, player: P) -> Self {
        let gesture = ScrubGesture::new(config.seek_throttle());
        Self {
            view: StyledView::new(config),
            player,
            gesture,
        }
    }

    pub fn setup(&mut self) {
        self.view.setup();
    }

    pub fn view(&self) -> &StyledView<B> {
        &self.view
    }

    /// Direct access to the base view. Position updates should go through
    /// `set_viewed_position` on this type so an active scrub is respected.
    pub fn view_mut(&mut self) -> &mut StyledView<B> {
        &mut self.view
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn on_frame_load_finished(&mut self, binding: B) {
        self.view.on_frame_load_finished(binding);
    }

    /// A navigation mid-drag must not strand playback paused: the gesture is
    /// resolved through the normal commit path first, then the stale page is
    /// dropped.
    pub fn begin_navigation(&mut self) {
        if self.gesture.phase() == GesturePhase::Tracking {
            self.commit_gesture(None);
        }
        self.gesture.reset();
        self.view.begin_navigation();
    }

    pub fn poll_skin_changes(&mut self) -> bool {
        self.view.poll_skin_changes()
    }

    pub fn set_key_window(&mut self, is_key: bool) {
        if is_key {
            self.view.add_class_to_content(KEY_WINDOW_CLASS);
        } else {
            self.view.remove_class_from_content(KEY_WINDOW_CLASS);
        }
    }

    pub fn set_main_window(&mut self, is_main: bool) {
        if is_main {
            self.view.add_class_to_content(MAIN_WINDOW_CLASS);
        } else {
            self.view.remove_class_from_content(MAIN_WINDOW_CLASS);
        }
    }

    /// Writes the chrome title node as well as the base view's generic
    /// title field; both are optional in the markup.
    pub fn set_window_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.view.set_window_title(title.clone());
        self.view.push_text(WINDOW_TITLE_ID, &title);
    }

    /// Natively pushed position. While a scrub owns the position control the
    /// snapshot is updated without repainting; once a committed seek is
    /// acknowledged the push path takes the control back.
    pub fn set_viewed_position(&mut self, position: f32) {
        match self.gesture.phase() {
            GesturePhase::Idle => self.view.set_viewed_position(position),
            GesturePhase::Tracking => self.view.note_viewed_position(position),
            GesturePhase::Committing => {
                self.view.note_viewed_position(position);
                if self.gesture.acknowledge(position, Instant::now()) {
                    self.view.push_position();
                }
            }
        }
    }

    pub fn set_viewed_playing(&mut self, playing: bool) {
        self.view.set_viewed_playing(playing);
    }

    pub fn set_seekable(&mut self, seekable: bool) {
        self.view.set_seekable(seekable);
    }

    pub fn set_current_time(&mut self, time: MediaTime) {
        self.view.set_current_time(time);
    }

    pub fn set_list_count(&mut self, count: usize) {
        self.view.set_list_count(count);
    }

    pub fn set_sublist_count(&mut self, count: usize) {
        self.view.set_sublist_count(count);
    }

    /// Pointer entered the surface. Starts a scrub when the point falls
    /// inside the tracking region; a playing player is paused for the drag.
    pub fn pointer_entered(&mut self, x: f32, y: f32) {
        let region = self.view.config().tracking_region;
        if !region.contains(x, y) {
            return;
        }
        let position = region.position_at(x);
        let playing = self.view.snapshot().playing;
        if self.gesture.begin(position, playing, Instant::now()) {
            tracing::debug!("Scrub started at {position:.3}; pausing playback");
            self.player.pause();
        }
        if self.gesture.phase() == GesturePhase::Tracking {
            self.view.push_position_value(self.gesture.tentative());
        }
    }

    /// Pointer moved during a drag. The DOM gets the tentative position on
    /// every move; native preview seeks are throttled by the gesture.
    pub fn pointer_moved(&mut self, x: f32, _y: f32) {
        let position = self.view.config().tracking_region.position_at(x);
        if let Some(outcome) = self.gesture.update(position, Instant::now()) {
            self.view.push_position_value(outcome.tentative);
            if let Some(target) = outcome.native_seek {
                tracing::debug!("Scrub preview seek to {target:.3}");
                self.player.seek_to(target);
            }
        }
    }

    pub fn pointer_released(&mut self, x: f32, _y: f32) {
        let position = self.view.config().tracking_region.position_at(x);
        self.commit_gesture(Some(position));
    }

    /// Pointer left the tracking region without a release. Committing at the
    /// last known position keeps playback from staying paused indefinitely.
    pub fn pointer_exited(&mut self) {
        self.commit_gesture(None);
    }

    fn commit_gesture(&mut self, position: Option<f32>) {
        if let Some(outcome) = self.gesture.finish(position, Instant::now()) {
            self.view.push_position_value(outcome.seek);
            tracing::debug!("Scrub committed; seeking to {:.3}", outcome.seek);
            self.player.seek_to(outcome.seek);
            if outcome.resume {
                self.player.resume();
            }
        }
    }
}
