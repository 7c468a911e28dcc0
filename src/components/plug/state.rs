use std::fmt;

use crate::motion::{Ease, HoverSequencer, Motion, Position, Property, ShapeStyle, Stage, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlugPart {
	LeftPlug,
	RightPlug,
	Bridge,
	LeftWire,
	RightWire,
}

impl fmt::Display for PlugPart {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::LeftPlug => "plug-left",
			Self::RightPlug => "plug-right",
			Self::Bridge => "bridge",
			Self::LeftWire => "wire-left",
			Self::RightWire => "wire-right",
		})
	}
}

/// Horizontal distance of an unplugged plug from its socket.
pub const REST_OFFSET: f64 = 60.0;
pub const CONNECTED_OFFSET: f64 = 20.0;
pub const REST_SCALE: f64 = 0.8;
pub const REST_OPACITY: f64 = 0.7;
pub const WIRE_OPACITY: f64 = 0.6;
const OVERSHOOT: f64 = 1.7;

const WIRES: [PlugPart; 2] = [PlugPart::LeftWire, PlugPart::RightWire];

fn stage() -> Stage<PlugPart> {
	let mut stage = Stage::new();
	for (part, x) in [(PlugPart::LeftPlug, -REST_OFFSET), (PlugPart::RightPlug, REST_OFFSET)] {
		stage.register(
			part,
			ShapeStyle::new()
				.with(Property::TranslateX, x)
				.with(Property::Scale, REST_SCALE)
				.with(Property::Opacity, REST_OPACITY),
		);
	}
	let collapsed = ShapeStyle::new()
		.with(Property::ScaleX, 0.0)
		.with(Property::Opacity, 0.0);
	stage.register(PlugPart::Bridge, collapsed);
	for wire in WIRES {
		stage.register(wire, collapsed);
	}
	stage
}

fn plug_in(x: f64) -> Motion {
	Motion::new(300.0, Ease::BackOut(OVERSHOOT))
		.to(Property::TranslateX, x)
		.to(Property::Scale, 1.0)
		.to(Property::Opacity, 1.0)
}

fn plug_out(x: f64) -> Motion {
	Motion::new(400.0, Ease::BackIn(OVERSHOOT))
		.to(Property::TranslateX, x)
		.to(Property::Scale, REST_SCALE)
		.to(Property::Opacity, REST_OPACITY)
}

fn connect() -> Timeline<PlugPart> {
	let mut tl = Timeline::new();
	tl.add(&[PlugPart::LeftPlug], &plug_in(-CONNECTED_OFFSET), Position::At(0.0))
		.add(&[PlugPart::RightPlug], &plug_in(CONNECTED_OFFSET), Position::Relative(-150.0))
		.add(
			&[PlugPart::Bridge],
			&Motion::new(400.0, Ease::OutCubic)
				.to(Property::ScaleX, 1.0)
				.to(Property::Opacity, 1.0),
			Position::Relative(-200.0),
		)
		.add(
			&WIRES,
			&Motion::new(300.0, Ease::OutCubic)
				.to(Property::ScaleX, 1.0)
				.to(Property::Opacity, WIRE_OPACITY),
			Position::Relative(-300.0),
		);
	tl
}

fn disconnect() -> Timeline<PlugPart> {
	let mut tl = Timeline::new();
	tl.add(
		&WIRES,
		&Motion::new(200.0, Ease::InCubic)
			.to(Property::ScaleX, 0.0)
			.to(Property::Opacity, 0.0),
		Position::At(0.0),
	)
	.add(
		&[PlugPart::Bridge],
		&Motion::new(300.0, Ease::InCubic)
			.to(Property::ScaleX, 0.0)
			.to(Property::Opacity, 0.0),
		Position::Relative(-100.0),
	)
	.add(&[PlugPart::LeftPlug], &plug_out(-REST_OFFSET), Position::Relative(-200.0))
	.add(&[PlugPart::RightPlug], &plug_out(REST_OFFSET), Position::WithPrevious(0.0));
	tl
}

/// Two plugs that snap together while the pointer is over the button.
pub fn plug() -> HoverSequencer<PlugPart> {
	HoverSequencer::new(stage(), connect, disconnect)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::motion::{Animated, HoverPhase};

	fn assert_rest(hover: &HoverSequencer<PlugPart>) {
		let stage = hover.stage();
		assert_eq!(stage.value(PlugPart::LeftPlug, Property::TranslateX), Some(-REST_OFFSET));
		assert_eq!(stage.value(PlugPart::RightPlug, Property::TranslateX), Some(REST_OFFSET));
		for part in [PlugPart::LeftPlug, PlugPart::RightPlug] {
			assert_eq!(stage.value(part, Property::Scale), Some(REST_SCALE));
			assert_eq!(stage.value(part, Property::Opacity), Some(REST_OPACITY));
		}
		for part in [PlugPart::Bridge, PlugPart::LeftWire, PlugPart::RightWire] {
			assert_eq!(stage.value(part, Property::ScaleX), Some(0.0));
			assert_eq!(stage.value(part, Property::Opacity), Some(0.0));
		}
	}

	#[test]
	fn timelines_overlap_as_authored() {
		assert_eq!(connect().duration(), 650.0);
		assert_eq!(disconnect().duration(), 600.0);
	}

	#[test]
	fn hover_connects_fully() {
		let mut hover = plug();
		hover.enter();
		for _ in 0..60 {
			hover.tick(16.0);
		}
		assert_eq!(hover.phase(), HoverPhase::Connected);
		let stage = hover.stage();
		assert_eq!(stage.value(PlugPart::LeftPlug, Property::TranslateX), Some(-CONNECTED_OFFSET));
		assert_eq!(stage.value(PlugPart::RightPlug, Property::TranslateX), Some(CONNECTED_OFFSET));
		assert_eq!(stage.value(PlugPart::Bridge, Property::ScaleX), Some(1.0));
		assert_eq!(stage.value(PlugPart::LeftWire, Property::Opacity), Some(WIRE_OPACITY));
	}

	#[test]
	fn enter_then_immediate_leave_ends_disconnected() {
		let mut hover = plug();
		assert!(hover.enter());
		assert!(hover.leave());
		for _ in 0..60 {
			hover.tick(16.0);
		}
		assert_eq!(hover.phase(), HoverPhase::Rest);
		assert_rest(&hover);
	}

	#[test]
	fn leaving_mid_connect_returns_to_rest() {
		let mut hover = plug();
		hover.enter();
		hover.tick(16.0);
		hover.tick(300.0);
		assert!(hover.stage().value(PlugPart::Bridge, Property::ScaleX).unwrap() > 0.0);

		hover.leave();
		hover.tick(16.0);
		assert!(hover.enter());
		hover.tick(100.0);
		hover.leave();
		for _ in 0..60 {
			hover.tick(16.0);
		}
		assert_rest(&hover);
		assert!(!hover.needs_frames());
	}

	#[test]
	fn reduced_motion_lands_on_the_end_state() {
		let mut hover = plug();
		hover.enter();
		hover.settle();
		assert_eq!(hover.phase(), HoverPhase::Connected);
		assert_eq!(hover.stage().value(PlugPart::Bridge, Property::Opacity), Some(1.0));
	}
}
