//! Headless frame scheduling.
//!
//! [`FrameQueue`] plays the role of the display's refresh callback: at most
//! one frame request is outstanding, it is fired explicitly, and it can be
//! cancelled by id. [`AnimationLoop`] drives a [`Simulator`] from it the same
//! way a browser host drives one from `requestAnimationFrame`.

use crate::prng::RandomSource;
use crate::simulator::Simulator;
use crate::surface::Surface;

/// Handle of a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Single-slot queue of frame requests.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the next frame, replacing any request still pending.
    pub fn request(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending = Some(id);
        id
    }

    /// Cancels `id` if it is still pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self, id: FrameId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Removes and returns the pending request, as the display does when it fires.
    pub fn take_due(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }
}

/// A simulator plus the queue that schedules it.
#[derive(Debug)]
pub struct AnimationLoop<S: Surface, R: RandomSource> {
    simulator: Simulator<S, R>,
    queue: FrameQueue,
}

impl<S: Surface, R: RandomSource> AnimationLoop<S, R> {
    pub fn new(simulator: Simulator<S, R>) -> Self {
        Self {
            simulator,
            queue: FrameQueue::new(),
        }
    }

    /// Requests the first frame.
    pub fn start(&mut self) -> FrameId {
        self.queue.request()
    }

    /// Fires the pending frame, if any, and reschedules while the simulator
    /// keeps drawing. Returns whether a frame was drawn.
    pub fn pump(&mut self) -> bool {
        if self.queue.take_due().is_none() {
            return false;
        }
        let drawn = self.simulator.frame();
        if drawn {
            self.queue.request();
        }
        drawn
    }

    /// Pumps up to `frames` frames. Returns how many were drawn.
    pub fn run(&mut self, frames: usize) -> usize {
        if self.queue.pending().is_none() && !self.simulator.is_cancelled() {
            self.start();
        }
        (0..frames).take_while(|_| self.pump()).count()
    }

    /// Cancels the simulator and then the pending frame request.
    ///
    /// A frame already fired by the host still runs, but draws nothing.
    pub fn stop(&mut self) {
        self.simulator.cancel();
        if let Some(id) = self.queue.pending() {
            self.queue.cancel(id);
        }
    }

    pub fn simulator(&self) -> &Simulator<S, R> {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut Simulator<S, R> {
        &mut self.simulator
    }

    pub fn queue(&self) -> &FrameQueue {
        &self.queue
    }

    pub fn into_simulator(self) -> Simulator<S, R> {
        self.simulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::prng::Xorshift64;
    use crate::surface::RecordingSurface;

    fn looped() -> AnimationLoop<RecordingSurface, Xorshift64> {
        let sim = Simulator::mount(
            Some(RecordingSurface::default()),
            700.0,
            700.0,
            FieldConfig::default(),
            Xorshift64::new(7),
        )
        .unwrap();
        AnimationLoop::new(sim)
    }

    #[test]
    fn queue_holds_one_request() {
        let mut q = FrameQueue::new();
        let a = q.request();
        let b = q.request();
        assert_ne!(a, b);
        assert_eq!(q.pending(), Some(b));
        assert!(!q.cancel(a), "stale id must not cancel the newer request");
        assert!(q.cancel(b));
        assert_eq!(q.take_due(), None);
    }

    #[test]
    fn pump_without_request_does_nothing() {
        let mut l = looped();
        assert!(!l.pump());
        assert_eq!(l.simulator().frames(), 0);
    }

    #[test]
    fn each_frame_reschedules_the_next() {
        let mut l = looped();
        l.start();
        assert!(l.pump());
        assert!(l.queue().pending().is_some());
        assert!(l.pump());
        assert_eq!(l.simulator().frames(), 2);
    }

    #[test]
    fn run_draws_requested_number_of_frames() {
        let mut l = looped();
        assert_eq!(l.run(30), 30);
        assert_eq!(l.simulator().frames(), 30);
        assert_eq!(l.simulator().surface().circle_count(), 30 * 54);
    }

    #[test]
    fn stop_cancels_pending_request() {
        let mut l = looped();
        l.run(3);
        l.stop();
        assert!(l.queue().pending().is_none());
        assert!(!l.pump());
        assert_eq!(l.run(10), 0);
        assert_eq!(l.simulator().frames(), 3);
    }

    #[test]
    fn frame_fired_before_stop_draws_nothing() {
        let mut l = looped();
        l.run(2);
        l.simulator_mut().surface_mut().take_commands();

        // The host has already dequeued the callback when teardown happens.
        let in_flight = l.queue.take_due();
        assert!(in_flight.is_some());
        l.stop();
        assert!(!l.simulator_mut().frame());

        assert!(l.simulator().surface().commands().is_empty());
        assert!(l.queue().pending().is_none());
    }
}
