/// Lifecycle of a one-shot reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
	/// Waiting for the first sufficient visibility.
	#[default]
	Armed,
	/// The reveal sequence is running.
	Playing,
	/// The reveal sequence has finished.
	Complete,
	/// Torn down; no further transitions.
	Disposed,
}

/// One-time latch that opens the first time an element becomes visible
/// enough.
#[derive(Clone, Copy, Debug)]
pub struct RevealGate {
	threshold: f64,
	state: GateState,
}

impl RevealGate {
	/// `threshold` is the visible fraction, clamped to `[0, 1]`.
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold: threshold.clamp(0.0, 1.0),
			state: GateState::Armed,
		}
	}

	/// Visible fraction that opens the gate.
	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	/// Current lifecycle state.
	pub fn state(&self) -> GateState {
		self.state
	}

	/// Report the current visible fraction. Returns `true` only for the
	/// observation that opens the gate; every later call is a no-op.
	pub fn observe(&mut self, ratio: f64) -> bool {
		if self.state != GateState::Armed || ratio <= 0.0 || ratio < self.threshold {
			return false;
		}
		self.state = GateState::Playing;
		true
	}

	/// Mark the reveal finished.
	pub fn complete(&mut self) {
		if self.state == GateState::Playing {
			self.state = GateState::Complete;
		}
	}

	/// Tear down; the gate never opens again.
	pub fn dispose(&mut self) {
		self.state = GateState::Disposed;
	}

	/// Opened and not yet disposed.
	pub fn is_triggered(&self) -> bool {
		matches!(self.state, GateState::Playing | GateState::Complete)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fires_once_across_many_observations() {
		let mut gate = RevealGate::new(0.3);
		let fired = [0.5, 0.0, 0.9, 0.4, 1.0]
			.into_iter()
			.filter(|&r| gate.observe(r))
			.count();
		assert_eq!(fired, 1);
		assert_eq!(gate.state(), GateState::Playing);
	}

	#[test]
	fn stays_armed_below_threshold() {
		let mut gate = RevealGate::new(0.3);
		assert!(!gate.observe(0.1));
		assert!(!gate.observe(0.0));
		assert_eq!(gate.state(), GateState::Armed);
		assert!(gate.observe(0.3));
	}

	#[test]
	fn zero_threshold_still_needs_some_visibility() {
		let mut gate = RevealGate::new(0.0);
		assert!(!gate.observe(0.0));
		assert!(gate.observe(0.01));
	}

	#[test]
	fn complete_and_dispose_are_terminal() {
		let mut gate = RevealGate::new(0.3);
		gate.complete();
		assert_eq!(gate.state(), GateState::Armed);
		gate.observe(1.0);
		gate.complete();
		assert_eq!(gate.state(), GateState::Complete);
		assert!(!gate.observe(1.0));
		gate.dispose();
		assert!(!gate.observe(1.0));
		assert!(!gate.is_triggered());
	}
}
