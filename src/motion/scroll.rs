/// Direction of the most recent scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
	/// Content moving up, offset growing.
	Down,
	/// Offset shrinking.
	Up,
	/// No movement since the last sample.
	#[default]
	Idle,
}

impl ScrollDirection {
	/// `1.0` for down, `-1.0` for up, `0.0` when idle.
	pub fn sign(self) -> f64 {
		match self {
			Self::Down => 1.0,
			Self::Up => -1.0,
			Self::Idle => 0.0,
		}
	}
}

/// One scroll observation mapped onto an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
	/// How far the element has travelled through the viewport, in `[0, 1]`.
	pub progress: f64,
	/// Movement since the previous sample.
	pub direction: ScrollDirection,
}

/// Travel of an element through the viewport: 0 when its top edge sits on
/// the bottom of the viewport, 1 when its bottom edge leaves through the top.
///
/// Clamped to `[0, 1]`; a degenerate viewport yields 0.
pub fn progress(top: f64, height: f64, viewport_height: f64) -> f64 {
	let span = viewport_height + height;
	if !(span > 0.0) {
		return 0.0;
	}
	((viewport_height - top) / span).clamp(0.0, 1.0)
}

/// Derives scroll direction from successive absolute offsets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollTracker {
	last_offset: Option<f64>,
}

impl ScrollTracker {
	/// A tracker with no previous offset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `offset` and report the direction relative to the last one.
	pub fn update(&mut self, offset: f64) -> ScrollDirection {
		let direction = match self.last_offset {
			Some(last) if offset > last => ScrollDirection::Down,
			Some(last) if offset < last => ScrollDirection::Up,
			_ => ScrollDirection::Idle,
		};
		self.last_offset = Some(offset);
		direction
	}

	/// Build a sample for an element from the current layout.
	pub fn sample(&mut self, offset: f64, top: f64, height: f64, viewport_height: f64) -> ScrollSample {
		ScrollSample {
			progress: progress(top, height, viewport_height),
			direction: self.update(offset),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints() {
		assert_eq!(progress(800.0, 200.0, 800.0), 0.0);
		assert_eq!(progress(-200.0, 200.0, 800.0), 1.0);
		assert_eq!(progress(300.0, 200.0, 800.0), 0.5);
	}

	#[test]
	fn clamped_outside_the_viewport() {
		assert_eq!(progress(5000.0, 200.0, 800.0), 0.0);
		assert_eq!(progress(-5000.0, 200.0, 800.0), 1.0);
		assert_eq!(progress(0.0, 0.0, 0.0), 0.0);
		assert_eq!(progress(0.0, f64::NAN, 800.0), 0.0);
	}

	#[test]
	fn monotonic_as_top_decreases() {
		let mut last = -1.0;
		for step in 0..=200 {
			let top = 1000.0 - step as f64 * 7.5;
			let p = progress(top, 240.0, 720.0);
			assert!(p >= last, "progress went backwards at top={top}");
			assert!((0.0..=1.0).contains(&p));
			last = p;
		}
	}

	#[test]
	fn direction_from_successive_offsets() {
		let mut tracker = ScrollTracker::new();
		assert_eq!(tracker.update(100.0), ScrollDirection::Idle);
		assert_eq!(tracker.update(180.0), ScrollDirection::Down);
		assert_eq!(tracker.update(180.0), ScrollDirection::Idle);
		assert_eq!(tracker.update(20.0), ScrollDirection::Up);
		assert_eq!(ScrollDirection::Up.sign(), -1.0);
	}
}
