/// Collapses bursts of requests into at most one unit of work per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCoalescer {
	scheduled: bool,
	requested: bool,
}

impl FrameCoalescer {
	/// An idle coalescer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Note that work is wanted. Returns `true` when the caller has to
	/// schedule a frame, `false` when one is already pending.
	pub fn request(&mut self) -> bool {
		self.requested = true;
		if self.scheduled {
			return false;
		}
		self.scheduled = true;
		true
	}

	/// Called from the frame callback; reports whether any request arrived
	/// since the last frame and re-arms scheduling.
	pub fn take(&mut self) -> bool {
		self.scheduled = false;
		std::mem::take(&mut self.requested)
	}

	/// Whether a frame has been requested and not yet taken.
	pub fn is_pending(&self) -> bool {
		self.requested
	}
}

/// Turns frame timestamps into bounded deltas.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
	last: Option<f64>,
	max_delta: f64,
}

impl FrameClock {
	/// A clock whose deltas never exceed `max_delta_ms`.
	pub fn new(max_delta_ms: f64) -> Self {
		Self {
			last: None,
			max_delta: max_delta_ms.max(0.0),
		}
	}

	/// Milliseconds since the previous frame, 0 for the first frame after a
	/// reset, capped so a backgrounded tab never lurches forward on return.
	pub fn delta(&mut self, now_ms: f64) -> f64 {
		let dt = self
			.last
			.map_or(0.0, |last| (now_ms - last).clamp(0.0, self.max_delta));
		self.last = Some(now_ms);
		dt
	}

	/// Forget the previous timestamp; the next frame starts from zero.
	pub fn reset(&mut self) {
		self.last = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn burst_within_one_frame_runs_once() {
		let mut coalescer = FrameCoalescer::new();
		let schedules = (0..100).filter(|_| coalescer.request()).count();
		assert_eq!(schedules, 1);

		let mut recomputes = 0;
		if coalescer.take() {
			recomputes += 1;
		}
		if coalescer.take() {
			recomputes += 1;
		}
		assert_eq!(recomputes, 1);
	}

	#[test]
	fn rearms_after_each_frame() {
		let mut coalescer = FrameCoalescer::new();
		assert!(coalescer.request());
		assert!(coalescer.take());
		assert!(!coalescer.is_pending());
		assert!(coalescer.request());
	}

	#[test]
	fn clock_clamps_and_resets() {
		let mut clock = FrameClock::new(100.0);
		assert_eq!(clock.delta(1000.0), 0.0);
		assert_eq!(clock.delta(1016.0), 16.0);
		assert_eq!(clock.delta(5000.0), 100.0);
		assert_eq!(clock.delta(4000.0), 0.0);
		clock.reset();
		assert_eq!(clock.delta(9000.0), 0.0);
	}
}
