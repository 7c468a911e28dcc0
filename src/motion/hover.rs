use std::fmt::Display;
use std::hash::Hash;

use log::debug;

use super::choreography::Animated;
use super::style::Stage;
use super::timeline::Timeline;

/// Where a hover-driven element currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverPhase {
	#[default]
	/// Nothing running, disconnected.
	Rest,
	/// The connect transition is running.
	Connecting,
	/// Fully connected, waiting for the pointer to leave.
	Connected,
	/// The disconnect transition is running.
	Disconnecting,
}

/// Symmetric enter/leave transitions where the newest one always wins.
///
/// Both timelines are rebuilt on every transition from "to"-style steps, so a
/// transition that interrupts another starts from the half-applied values and
/// still lands exactly on its own end state.
#[derive(Clone, Debug)]
pub struct HoverSequencer<K> {
	stage: Stage<K>,
	connect: fn() -> Timeline<K>,
	disconnect: fn() -> Timeline<K>,
	current: Option<Timeline<K>>,
	phase: HoverPhase,
	disposed: bool,
}

impl<K: Copy + Eq + Hash> HoverSequencer<K> {
	/// Sequencer over `stage` with builders for both transitions.
	pub fn new(stage: Stage<K>, connect: fn() -> Timeline<K>, disconnect: fn() -> Timeline<K>) -> Self {
		Self {
			stage,
			connect,
			disconnect,
			current: None,
			phase: HoverPhase::Rest,
			disposed: false,
		}
	}

	/// Current phase.
	pub fn phase(&self) -> HoverPhase {
		self.phase
	}

	/// Pointer entered. Returns whether a new transition started.
	pub fn enter(&mut self) -> bool {
		if self.disposed || matches!(self.phase, HoverPhase::Connecting | HoverPhase::Connected) {
			return false;
		}
		self.current = Some((self.connect)());
		self.phase = HoverPhase::Connecting;
		true
	}

	/// Pointer left. Returns whether a new transition started.
	pub fn leave(&mut self) -> bool {
		if self.disposed || matches!(self.phase, HoverPhase::Rest | HoverPhase::Disconnecting) {
			return false;
		}
		self.current = Some((self.disconnect)());
		self.phase = HoverPhase::Disconnecting;
		true
	}

	fn arrive(&mut self) {
		self.phase = match self.phase {
			HoverPhase::Connecting => HoverPhase::Connected,
			HoverPhase::Disconnecting => HoverPhase::Rest,
			settled => settled,
		};
	}
}

impl<K: Copy + Eq + Hash + Display + 'static> Animated for HoverSequencer<K> {
	type Key = K;

	fn observe(&mut self, _ratio: f64) -> bool {
		false
	}

	fn tick(&mut self, dt_ms: f64) -> bool {
		let Some(timeline) = self.current.as_mut() else {
			return false;
		};
		let changed = timeline.advance(dt_ms, &mut self.stage);
		if timeline.is_complete() {
			self.current = None;
			self.arrive();
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
		self.current.is_some()
	}

	fn is_visible(&self) -> bool {
		true
	}

	fn settle(&mut self) {
		if let Some(mut timeline) = self.current.take() {
			timeline.finish(&mut self.stage);
			self.arrive();
		}
	}

	fn dispose(&mut self) {
		if !self.disposed {
			debug!("hover sequencer disposed");
			self.disposed = true;
			self.current = None;
		}
	}
}
