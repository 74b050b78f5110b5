use std::time::{Duration, Instant};

/// How close a pushed position must land to the committed target before the
/// gesture releases the position control, and how long to wait for that
/// before giving up on the acknowledgment.
const ACK_TOLERANCE: f32 = 0.02;
const ACK_DEADLINE: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Tracking,
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub tentative: f32,
    /// Set when the throttle window elapsed and a preview seek may be
    /// issued natively; most moves only repaint the DOM.
    pub native_seek: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitOutcome {
    pub seek: f32,
    pub resume: bool,
}

/// The pointer-scrub state machine. Time is passed in by the caller, which
/// keeps every transition deterministic under test.
#[derive(Debug)]
pub struct ScrubGesture {
    phase: GesturePhase,
    tentative: f32,
    was_playing: bool,
    throttle: Duration,
    last_native_seek: Option<Instant>,
    commit_target: f32,
    commit_deadline: Option<Instant>,
}

impl ScrubGesture {
    pub fn new(throttle: Duration) -> Self {
        Self {
            phase: GesturePhase::Idle,
            tentative: 0.0,
            was_playing: false,
            throttle,
            last_native_seek: None,
            commit_target: 0.0,
            commit_deadline: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn tentative(&self) -> f32 {
        self.tentative
    }

    /// Enter Tracking. Returns true when the caller must pause the native
    /// player for the duration of the drag. Ignored while already Tracking.
    pub fn begin(&mut self, position: f32, playing: bool, now: Instant) -> bool {
        if self.phase == GesturePhase::Tracking {
            return false;
        }
        self.phase = GesturePhase::Tracking;
        self.tentative = position.clamp(0.0, 1.0);
        self.was_playing = playing;
        self.last_native_seek = Some(now);
        self.commit_deadline = None;
        playing
    }

    /// Record a pointer move. Returns the new tentative position for DOM
    /// feedback, plus a throttled preview seek when the interval allows one.
    pub fn update(&mut self, position: f32, now: Instant) -> Option<MoveOutcome> {
        if self.phase != GesturePhase::Tracking {
            return None;
        }
        let position = position.clamp(0.0, 1.0);
        let moved = (position - self.tentative).abs() > f32::EPSILON;
        self.tentative = position;

        let mut native_seek = None;
        if moved {
            let due = self
                .last_native_seek
                .map(|last| now.duration_since(last) >= self.throttle)
                .unwrap_or(true);
            if due {
                self.last_native_seek = Some(now);
                native_seek = Some(position);
            }
        }

        Some(MoveOutcome {
            tentative: self.tentative,
            native_seek,
        })
    }

    /// Leave Tracking through the commit path: one final seek, resume if the
    /// gesture paused playback. `position` is the release point; `None`
    /// commits at the last known tentative position (pointer exit).
    pub fn finish(&mut self, position: Option<f32>, now: Instant) -> Option<CommitOutcome> {
        if self.phase != GesturePhase::Tracking {
            return None;
        }
        if let Some(position) = position {
            self.tentative = position.clamp(0.0, 1.0);
        }
        self.phase = GesturePhase::Committing;
        self.commit_target = self.tentative;
        self.commit_deadline = Some(now + ACK_DEADLINE);
        Some(CommitOutcome {
            seek: self.commit_target,
            resume: self.was_playing,
        })
    }

    /// Feed a natively pushed position while Committing. Returns true once
    /// the target is acknowledged (or the deadline passed) and the push path
    /// owns the position control again.
    pub fn acknowledge(&mut self, position: f32, now: Instant) -> bool {
        if self.phase != GesturePhase::Committing {
            return false;
        }
        let reached = (position - self.commit_target).abs() <= ACK_TOLERANCE;
        let expired = self
            .commit_deadline
            .map(|deadline| now >= deadline)
            .unwrap_or(true);
        if reached || expired {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.last_native_seek = None;
        self.commit_deadline = None;
    }
}
