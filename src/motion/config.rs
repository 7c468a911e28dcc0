/// Site-wide animation settings, shared through the Leptos context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
	/// Visible fraction of a container that opens its reveal.
	pub threshold: f64,
	/// Upper bound on a single frame delta, in milliseconds.
	pub max_frame_ms: f64,
	/// Jump reveals to their final frame and keep ambient loops still.
	pub reduced_motion: bool,
}

impl Default for MotionConfig {
	fn default() -> Self {
		Self {
			threshold: 0.3,
			max_frame_ms: 100.0,
			reduced_motion: false,
		}
	}
}

impl MotionConfig {
	/// Override the reduced-motion preference, usually from the media query.
	pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
		self.reduced_motion = reduced_motion;
		self
	}
}
