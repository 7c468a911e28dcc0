//! Reveal-then-loop choreography shared by the scroll-revealed leaves.

use std::fmt::Display;
use std::hash::Hash;

use log::debug;

use super::gate::{GateState, RevealGate};
use super::scroll::ScrollSample;
use super::style::Stage;
use super::timeline::Timeline;

/// Per-instance animation state driven by the DOM runtime.
///
/// The runtime feeds visibility, scroll and frame time in, and flushes the
/// stage's dirty shapes out after every tick.
pub trait Animated {
	/// Stable logical key of a shape; its `Display` form is the shape's
	/// `data-shape` attribute.
	type Key: Copy + Eq + Hash + Display + 'static;

	/// Report the container's visible fraction. Returns whether this
	/// observation started the reveal.
	fn observe(&mut self, ratio: f64) -> bool;

	/// Advance by `dt_ms`; returns whether any shape changed.
	fn tick(&mut self, dt_ms: f64) -> bool;

	/// Current shape styles.
	fn stage(&self) -> &Stage<Self::Key>;

	/// Mutable access, used by the runtime to drain the dirty set.
	fn stage_mut(&mut self) -> &mut Stage<Self::Key>;

	/// Whether the frame loop has to keep running.
	fn needs_frames(&self) -> bool;

	/// Whether any part of the container was visible at the last observation.
	fn is_visible(&self) -> bool;

	/// Whether scroll samples are wanted at all.
	fn tracks_scroll(&self) -> bool {
		false
	}

	/// Apply one scroll sample.
	fn scroll(&mut self, _sample: ScrollSample) {}

	/// Jump to the end state without animating.
	fn settle(&mut self) {}

	/// Terminal; every later call is a no-op.
	fn dispose(&mut self);
}

/// When ambient loops begin relative to the reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbientStart {
	/// Together with the reveal.
	WithReveal,
	/// Once the reveal has completed.
	#[default]
	AfterReveal,
}

/// A visibility-gated one-shot reveal plus optional ambient loops.
#[derive(Clone, Debug)]
pub struct Choreography<K> {
	stage: Stage<K>,
	gate: RevealGate,
	reveal: Timeline<K>,
	ambient: Vec<Timeline<K>>,
	ambient_start: AmbientStart,
	ambient_running: bool,
	ambient_suppressed: bool,
	visible: bool,
}

impl<K: Copy + Eq + Hash> Choreography<K> {
	/// A choreography that reveals once `threshold` of the container is visible.
	pub fn new(stage: Stage<K>, reveal: Timeline<K>, threshold: f64) -> Self {
		Self {
			stage,
			gate: RevealGate::new(threshold),
			reveal,
			ambient: Vec::new(),
			ambient_start: AmbientStart::default(),
			ambient_running: false,
			ambient_suppressed: false,
			visible: false,
		}
	}

	/// Attach looping timelines, each with its own period and phase.
	pub fn with_ambient(mut self, loops: Vec<Timeline<K>>, start: AmbientStart) -> Self {
		self.ambient = loops;
		self.ambient_start = start;
		self
	}

	/// Current reveal latch state.
	pub fn gate(&self) -> GateState {
		self.gate.state()
	}

	/// The reveal has run to completion.
	pub fn is_revealed(&self) -> bool {
		self.gate.state() == GateState::Complete
	}

	/// Loops have started and were not suppressed.
	pub fn is_ambient_running(&self) -> bool {
		self.ambient_running
	}

	/// Reveal length in milliseconds.
	pub fn reveal_duration(&self) -> f64 {
		self.reveal.duration()
	}

	fn start_ambient(&mut self) {
		if !self.ambient_suppressed && !self.ambient.is_empty() {
			debug!("ambient loops started ({} loops)", self.ambient.len());
			self.ambient_running = true;
		}
	}
}

impl<K: Copy + Eq + Hash + Display + 'static> Animated for Choreography<K> {
	type Key = K;

	fn observe(&mut self, ratio: f64) -> bool {
		if self.gate.state() == GateState::Disposed {
			return false;
		}
		let visible = ratio > 0.0;
		if visible != self.visible && self.gate.is_triggered() {
			debug!("choreography {}", if visible { "resumed" } else { "paused" });
		}
		self.visible = visible;

		let started = self.gate.observe(ratio);
		if started {
			debug!("reveal triggered at {:.2} visibility", ratio);
			if self.ambient_start == AmbientStart::WithReveal {
				self.start_ambient();
			}
		}
		started
	}

	fn tick(&mut self, dt_ms: f64) -> bool {
		if !self.visible || !self.gate.is_triggered() {
			return false;
		}
		let mut changed = false;
		// Loops started by this tick's completion begin on the next one.
		let ambient_was_running = self.ambient_running;
		if self.gate.state() == GateState::Playing {
			changed |= self.reveal.advance(dt_ms, &mut self.stage);
			if self.reveal.is_complete() {
				self.gate.complete();
				debug!("reveal complete");
				if self.ambient_start == AmbientStart::AfterReveal {
					self.start_ambient();
				}
			}
		}
		if ambient_was_running && self.ambient_running {
			for ambient in &mut self.ambient {
				changed |= ambient.advance(dt_ms, &mut self.stage);
			}
		}
		changed
	}

	fn stage(&self) -> &Stage<K> {
		&self.stage
	}

	fn stage_mut(&mut self) -> &mut Stage<K> {
		&mut self.stage
	}

	fn needs_frames(&self) -> bool {
		if !self.visible {
			return false;
		}
		match self.gate.state() {
			GateState::Playing => true,
			GateState::Complete => self.ambient_running,
			GateState::Armed | GateState::Disposed => false,
		}
	}

	fn is_visible(&self) -> bool {
		self.visible
	}

	fn settle(&mut self) {
		self.ambient_suppressed = true;
		self.ambient_running = false;
		if self.gate.state() == GateState::Playing {
			self.reveal.finish(&mut self.stage);
			self.gate.complete();
			debug!("reveal settled without animation");
		}
	}

	fn dispose(&mut self) {
		if self.gate.state() == GateState::Disposed {
			return;
		}
		debug!("choreography disposed");
		self.gate.dispose();
		self.ambient_running = false;
		self.visible = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::motion::ease::Ease;
	use crate::motion::style::{Property, ShapeStyle};
	use crate::motion::timeline::{Motion, Position};

	fn sample(start: AmbientStart) -> Choreography<u8> {
		let mut stage = Stage::new();
		stage.register(1, ShapeStyle::new().with(Property::Opacity, 0.0));
		stage.register(2, ShapeStyle::new().with(Property::Rotate, 0.0));

		let mut reveal = Timeline::new();
		reveal.add(
			&[1],
			&Motion::new(1000.0, Ease::OutQuad).to(Property::Opacity, 1.0),
			Position::At(0.0),
		);
		let mut spin = Timeline::looping();
		spin.add(
			&[2],
			&Motion::new(4000.0, Ease::Linear).from_to(Property::Rotate, 0.0, 360.0),
			Position::At(0.0),
		);
		Choreography::new(stage, reveal, 0.3).with_ambient(vec![spin], start)
	}

	#[test]
	fn never_visible_means_no_mutation() {
		let mut choreo = sample(AmbientStart::WithReveal);
		choreo.stage_mut().take_dirty();
		choreo.observe(0.1);
		choreo.observe(0.0);
		for _ in 0..500 {
			assert!(!choreo.tick(16.0));
		}
		assert!(!choreo.stage().is_dirty());
		assert_eq!(choreo.stage().value(1, Property::Opacity), Some(0.0));
		assert!(!choreo.needs_frames());
	}

	#[test]
	fn repeated_visibility_runs_reveal_once() {
		let mut choreo = sample(AmbientStart::AfterReveal);
		let starts = (0..5).filter(|_| choreo.observe(1.0)).count();
		assert_eq!(starts, 1);
		choreo.tick(2000.0);
		assert!(choreo.is_revealed());

		choreo.observe(0.0);
		choreo.observe(1.0);
		choreo.tick(16.0);
		assert_eq!(choreo.stage().value(1, Property::Opacity), Some(1.0));
		assert_eq!(choreo.gate(), GateState::Complete);
	}

	#[test]
	fn ambient_after_reveal_waits_for_completion() {
		let mut choreo = sample(AmbientStart::AfterReveal);
		choreo.observe(1.0);
		choreo.tick(500.0);
		assert!(!choreo.is_ambient_running());
		choreo.tick(600.0);
		assert!(choreo.is_ambient_running());
		choreo.tick(1000.0);
		assert!((choreo.stage().value(2, Property::Rotate).unwrap() - 90.0).abs() < 1e-9);
	}

	#[test]
	fn ambient_pauses_while_hidden() {
		let mut choreo = sample(AmbientStart::WithReveal);
		choreo.observe(1.0);
		choreo.tick(1000.0);
		let angle = choreo.stage().value(2, Property::Rotate).unwrap();
		assert!(angle > 0.0);

		choreo.observe(0.0);
		assert!(!choreo.needs_frames());
		choreo.tick(1000.0);
		assert_eq!(choreo.stage().value(2, Property::Rotate), Some(angle));

		choreo.observe(0.6);
		assert!(choreo.needs_frames());
		choreo.tick(1000.0);
		assert!(choreo.stage().value(2, Property::Rotate).unwrap() > angle);
	}

	#[test]
	fn settle_jumps_to_end_without_loops() {
		let mut choreo = sample(AmbientStart::WithReveal);
		choreo.observe(1.0);
		choreo.settle();
		assert!(choreo.is_revealed());
		assert!(!choreo.is_ambient_running());
		assert_eq!(choreo.stage().value(1, Property::Opacity), Some(1.0));
		assert!(!choreo.needs_frames());
	}

	#[test]
	fn dispose_is_terminal() {
		let mut choreo = sample(AmbientStart::WithReveal);
		choreo.observe(1.0);
		choreo.dispose();
		assert!(!choreo.tick(100.0));
		assert!(!choreo.observe(1.0));
		assert!(!choreo.needs_frames());
	}

	#[test]
	fn reveal_holds_while_hidden() {
		let mut choreo = sample(AmbientStart::AfterReveal);
		choreo.observe(1.0);
		choreo.tick(100.0);
		let before = choreo.stage().value(1, Property::Opacity);
		choreo.stage_mut().take_dirty();

		choreo.observe(0.0);
		assert!(!choreo.needs_frames());
		assert!(!choreo.tick(500.0));
		assert_eq!(choreo.stage().value(1, Property::Opacity), before);
		assert!(!choreo.stage().is_dirty());
		assert_eq!(choreo.gate(), GateState::Playing);

		choreo.observe(0.5);
		assert!(choreo.needs_frames());
		assert!(choreo.tick(100.0));
		assert!(choreo.stage().value(1, Property::Opacity) > before);
	}

	#[test]
	fn dispose_stops_frames_mid_reveal() {
		let mut choreo = sample(AmbientStart::WithReveal);
		choreo.observe(1.0);
		choreo.tick(100.0);
		assert!(choreo.needs_frames());
		choreo.dispose();
		assert!(!choreo.needs_frames());
		assert!(!choreo.observe(1.0));
		assert!(!choreo.needs_frames());
	}
}
