use log::debug;

use super::types::{EDGES, MOTES, NODES, NetworkShape, Tier, find_node};
use crate::motion::{
	AmbientStart, Animated, Choreography, Ease, Motion, Outline, Position, Property, ScrollDirection,
	ScrollSample, ShapeStyle, Stage, Timeline,
};

/// Vertical drift across the whole scroll range, in user units.
pub const PARALLAX_RANGE: f64 = 12.0;
/// Extra lag opposite to the scroll direction, in user units.
pub const DIRECTION_NUDGE: f64 = 1.5;
pub const EDGE_BASE_OPACITY: f64 = 0.35;
/// Progress offset between successive edges.
pub const EDGE_STAGGER: f64 = 0.05;
/// Progress span over which one edge ramps to full opacity.
pub const EDGE_RAMP: f64 = 0.3;

const ELASTIC: Ease = Ease::OutElastic {
	amplitude: 1.0,
	period: 0.5,
};

pub fn parallax_offset(progress: f64, tier: Tier, direction: ScrollDirection) -> f64 {
	((0.5 - progress) * PARALLAX_RANGE - direction.sign() * DIRECTION_NUDGE) * tier.factor()
}

pub fn symbol_rotation(progress: f64) -> f64 {
	progress * 360.0
}

pub fn edge_opacity(progress: f64, index: usize) -> f64 {
	let ramp = ((progress - index as f64 * EDGE_STAGGER) / EDGE_RAMP).clamp(0.0, 1.0);
	EDGE_BASE_OPACITY + (1.0 - EDGE_BASE_OPACITY) * ramp
}

pub fn edge_length(from: u8, to: u8) -> f64 {
	match (find_node(from), find_node(to)) {
		(Some(a), Some(b)) => Outline::line(a.x, a.y, b.x, b.y).length(),
		_ => 0.0,
	}
}

fn stage() -> Stage<NetworkShape> {
	let mut stage = Stage::new();
	let hidden = ShapeStyle::new()
		.with(Property::Opacity, 0.0)
		.with(Property::Scale, 0.0)
		.with(Property::TranslateY, 0.0);
	for node in &NODES {
		stage.register(NetworkShape::Node(node.id), hidden);
		stage.register(NetworkShape::Glow(node.id), hidden);
	}
	for edge in &EDGES {
		stage.register(
			NetworkShape::Edge(edge.from, edge.to),
			ShapeStyle::new()
				.with(Property::DashOffset, edge_length(edge.from, edge.to))
				.with(Property::Opacity, 0.0),
		);
		if let Some(origin) = find_node(edge.from) {
			stage.register(
				NetworkShape::Packet(edge.from, edge.to),
				ShapeStyle::new()
					.with(Property::Cx, origin.x)
					.with(Property::Cy, origin.y)
					.with(Property::Opacity, 0.0),
			);
		}
	}
	for i in 0..MOTES.len() {
		stage.register(
			NetworkShape::Mote(i as u8),
			ShapeStyle::new()
				.with(Property::Opacity, 0.0)
				.with(Property::TranslateY, 0.0),
		);
	}
	stage.register(NetworkShape::Symbol, ShapeStyle::new().with(Property::Rotate, 0.0));
	stage
}

fn reveal() -> Timeline<NetworkShape> {
	let mut tl = Timeline::new();
	let pop = Motion::new(600.0, ELASTIC)
		.from_to(Property::Scale, 0.0, 1.0)
		.from_to(Property::Opacity, 0.0, 1.0);
	let ring = Motion::new(1200.0, Ease::OutQuad)
		.from_to(Property::Scale, 0.0, 1.5)
		.keyframes(Property::Opacity, 0.0, &[0.6, 0.0]);
	for node in &NODES {
		tl.add(&[NetworkShape::Node(node.id)], &pop, Position::At(node.delay_ms));
		tl.add(&[NetworkShape::Glow(node.id)], &ring, Position::At(node.delay_ms));
	}

	let draw = Motion::new(800.0, Ease::InOutQuad)
		.to(Property::DashOffset, 0.0)
		.from_to(Property::Opacity, 0.0, 1.0);
	for edge in &EDGES {
		tl.add(&[NetworkShape::Edge(edge.from, edge.to)], &draw, Position::At(edge.delay_ms));
		let (Some(a), Some(b)) = (find_node(edge.from), find_node(edge.to)) else {
			continue;
		};
		let travel = Motion::new(1000.0, Ease::InOutQuad)
			.from_to(Property::Cx, a.x, b.x)
			.from_to(Property::Cy, a.y, b.y)
			.keyframes(Property::Opacity, 0.0, &[1.0, 1.0, 0.0]);
		tl.add(
			&[NetworkShape::Packet(edge.from, edge.to)],
			&travel,
			Position::At(edge.delay_ms + 400.0),
		);
	}
	tl
}

fn ambient() -> Vec<Timeline<NetworkShape>> {
	let mut loops = Vec::new();
	for hub in NODES.iter().filter(|n| n.tier == Tier::Hub) {
		let mut pulse = Timeline::looping();
		pulse.add(
			&[NetworkShape::Node(hub.id)],
			&Motion::new(2000.0, Ease::InOutSine).keyframes(Property::Scale, 1.0, &[1.2, 1.0]),
			Position::At(0.0),
		);
		loops.push(pulse);
	}
	for (i, mote) in MOTES.iter().enumerate() {
		let mut drift = Timeline::looping().with_phase(mote.delay_ms);
		drift.add(
			&[NetworkShape::Mote(i as u8)],
			&Motion::new(mote.period_ms, Ease::InOutSine)
				.keyframes(Property::TranslateY, 0.0, &[-6.0, 0.0])
				.keyframes(Property::Opacity, 0.0, &[0.5, 0.0]),
			Position::At(0.0),
		);
		loops.push(drift);
	}
	loops
}

/// Integration diagram: reveal, hub pulse and particle drift, plus the
/// scroll-driven parallax once the reveal has finished.
pub struct NetworkState {
	choreo: Choreography<NetworkShape>,
	pending: Option<ScrollSample>,
}

impl NetworkState {
	pub fn new(threshold: f64) -> Self {
		Self {
			choreo: Choreography::new(stage(), reveal(), threshold)
				.with_ambient(ambient(), AmbientStart::AfterReveal),
			pending: None,
		}
	}

	fn apply_scroll(&mut self, sample: ScrollSample) -> bool {
		let stage = self.choreo.stage_mut();
		let mut changed = false;
		for node in &NODES {
			let offset = parallax_offset(sample.progress, node.tier, sample.direction);
			changed |= stage.set(NetworkShape::Node(node.id), Property::TranslateY, offset);
			changed |= stage.set(NetworkShape::Glow(node.id), Property::TranslateY, offset);
		}
		changed |= stage.set(NetworkShape::Symbol, Property::Rotate, symbol_rotation(sample.progress));
		for (i, edge) in EDGES.iter().enumerate() {
			changed |= stage.set(
				NetworkShape::Edge(edge.from, edge.to),
				Property::Opacity,
				edge_opacity(sample.progress, i),
			);
		}
		changed
	}

	fn apply_pending(&mut self) -> bool {
		match self.pending.take() {
			Some(sample) => self.apply_scroll(sample),
			None => false,
		}
	}
}

impl Animated for NetworkState {
	type Key = NetworkShape;

	fn observe(&mut self, ratio: f64) -> bool {
		self.choreo.observe(ratio)
	}

	fn tick(&mut self, dt_ms: f64) -> bool {
		let mut changed = self.choreo.tick(dt_ms);
		if self.choreo.is_visible() && self.choreo.is_revealed() {
			changed |= self.apply_pending();
		}
		changed
	}

	fn stage(&self) -> &Stage<NetworkShape> {
		self.choreo.stage()
	}

	fn stage_mut(&mut self) -> &mut Stage<NetworkShape> {
		self.choreo.stage_mut()
	}

	fn needs_frames(&self) -> bool {
		self.choreo.needs_frames()
			|| (self.choreo.is_visible() && self.choreo.is_revealed() && self.pending.is_some())
	}

	fn is_visible(&self) -> bool {
		self.choreo.is_visible()
	}

	fn tracks_scroll(&self) -> bool {
		true
	}

	/// Samples arriving before the reveal completes are held back; only the
	/// latest one is applied once it does.
	fn scroll(&mut self, sample: ScrollSample) {
		if !self.choreo.is_visible() {
			return;
		}
		if self.pending.replace(sample).is_none() && !self.choreo.is_revealed() {
			debug!("scroll mapping deferred until the reveal completes");
		}
	}

	fn settle(&mut self) {
		self.choreo.settle();
		if self.choreo.is_revealed() {
			self.apply_pending();
		}
	}

	fn dispose(&mut self) {
		self.pending = None;
		self.choreo.dispose();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run_reveal(state: &mut NetworkState) {
		assert!(state.observe(1.0));
		for _ in 0..400 {
			state.tick(16.0);
		}
		assert!(state.choreo.is_revealed());
	}

	#[test]
	fn reveal_draws_every_node_and_edge() {
		let mut state = NetworkState::new(0.3);
		run_reveal(&mut state);

		let stage = state.stage();
		for node in &NODES {
			let style = stage.get(NetworkShape::Node(node.id)).unwrap();
			assert!(style.get(Property::Opacity) > 0.0, "node {} opacity", node.id);
			assert!(style.get(Property::Scale) > 0.0, "node {} scale", node.id);
		}
		for edge in &EDGES {
			let style = stage.get(NetworkShape::Edge(edge.from, edge.to)).unwrap();
			assert_eq!(style.get(Property::DashOffset), 0.0);
		}
		assert_eq!(NODES.len(), 8);
		assert_eq!(EDGES.len(), 10);
	}

	#[test]
	fn replaying_visibility_does_not_reset() {
		let mut state = NetworkState::new(0.3);
		run_reveal(&mut state);
		assert!(!state.observe(0.0));
		assert!(!state.observe(1.0));
		state.tick(16.0);
		for edge in &EDGES {
			assert_eq!(
				state.stage().value(NetworkShape::Edge(edge.from, edge.to), Property::DashOffset),
				Some(0.0)
			);
		}
		for node in &NODES {
			assert!(state.stage().value(NetworkShape::Node(node.id), Property::Opacity).unwrap() > 0.0);
		}
	}

	#[test]
	fn hidden_diagram_ignores_scroll_and_time() {
		let mut state = NetworkState::new(0.3);
		state.stage_mut().take_dirty();
		state.scroll(ScrollSample {
			progress: 0.9,
			direction: ScrollDirection::Down,
		});
		for _ in 0..100 {
			assert!(!state.tick(16.0));
		}
		assert!(!state.stage().is_dirty());
		assert!(!state.needs_frames());
	}

	#[test]
	fn scroll_waits_for_reveal() {
		let mut state = NetworkState::new(0.3);
		state.observe(1.0);
		state.tick(100.0);
		state.scroll(ScrollSample {
			progress: 1.0,
			direction: ScrollDirection::Idle,
		});
		state.tick(16.0);
		assert_eq!(state.stage().value(NetworkShape::Symbol, Property::Rotate), Some(0.0));

		for _ in 0..400 {
			state.tick(16.0);
		}
		assert_eq!(state.stage().value(NetworkShape::Symbol, Property::Rotate), Some(360.0));
		let hub = state.stage().value(NetworkShape::Node(0), Property::TranslateY).unwrap();
		assert_eq!(hub, parallax_offset(1.0, Tier::Hub, ScrollDirection::Idle));
	}

	#[test]
	fn parallax_scales_with_tier() {
		let hub = parallax_offset(0.0, Tier::Hub, ScrollDirection::Idle);
		let tertiary = parallax_offset(0.0, Tier::Tertiary, ScrollDirection::Idle);
		assert_eq!(hub, 3.0);
		assert_eq!(tertiary, 9.0);
		assert_eq!(parallax_offset(0.5, Tier::Secondary, ScrollDirection::Idle), 0.0);
		assert!(parallax_offset(0.5, Tier::Secondary, ScrollDirection::Down) < 0.0);
	}

	#[test]
	fn edges_activate_in_index_order() {
		assert_eq!(edge_opacity(0.0, 0), EDGE_BASE_OPACITY);
		assert!((edge_opacity(1.0, 9) - 1.0).abs() < 1e-12);
		let p = 0.2;
		let ramps: Vec<f64> = (0..EDGES.len()).map(|i| edge_opacity(p, i)).collect();
		assert!(ramps.windows(2).all(|w| w[0] >= w[1]));
		assert!(ramps[0] > ramps[4]);
	}

	#[test]
	fn edge_lengths_follow_node_positions() {
		assert_eq!(edge_length(0, 1), 100.0);
		assert_eq!(edge_length(2, 3), 50.0);
		assert_eq!(edge_length(0, 42), 0.0);
	}
}
