//! Virtual clock
//!
//! Implements setTimeout and requestAnimationFrame against simulated time.
//! `Document::advance` is the only thing that moves the clock forward.

use std::time::Duration;

/// Animation frames run on this cadence
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Handle returned by `request_animation_frame`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

type TimerCallback = Box<dyn FnOnce()>;
type FrameCallback = Box<dyn FnOnce(Duration)>;

struct Timer {
    id: TimerId,
    due: Duration,
    callback: TimerCallback,
}

/// Pending timers and frame callbacks
#[derive(Default)]
pub(crate) struct Clock {
    now: Duration,
    last_frame: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    frames: Vec<(FrameId, FrameCallback)>,
}

impl Clock {
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    pub(crate) fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn set_timeout(&mut self, delay: Duration, callback: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id());
        let due = self.now + delay;
        // Keep sorted by due time; equal deadlines fire in scheduling order
        let pos = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(pos, Timer { id, due, callback });
        id
    }

    pub(crate) fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Pop the earliest timer due at or before `deadline`
    pub(crate) fn pop_due(&mut self, deadline: Duration) -> Option<(Duration, TimerCallback)> {
        if self.timers.first().is_some_and(|t| t.due <= deadline) {
            let timer = self.timers.remove(0);
            Some((timer.due, timer.callback))
        } else {
            None
        }
    }

    pub(crate) fn request_frame(&mut self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push((id, callback));
        id
    }

    pub(crate) fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(frame, _)| *frame != id);
        self.frames.len() != before
    }

    pub(crate) fn next_frame_time(&self) -> Duration {
        self.last_frame + FRAME_INTERVAL
    }

    /// Take the frame callbacks queued so far and mark the frame as run
    pub(crate) fn take_frames(&mut self, at: Duration) -> Vec<FrameCallback> {
        self.last_frame = at;
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|(_, callback)| callback)
            .collect()
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}
