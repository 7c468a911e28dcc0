use super::types::{GEARS, GearShape, LINK_DRAW_MS, LINKS, SPIN_PERIOD_MS};
use crate::motion::{
	AmbientStart, Choreography, Ease, Motion, Position, Property, ShapeStyle, Stage, Timeline,
};

fn stage() -> Stage<GearShape> {
	let mut stage = Stage::new();
	for (i, link) in LINKS.iter().enumerate() {
		stage.register(
			GearShape::Link(i as u8),
			ShapeStyle::new().with(Property::DashOffset, link.outline().length()),
		);
	}
	for (i, gear) in GEARS.iter().enumerate() {
		let i = i as u8;
		stage.register(GearShape::Group(i), ShapeStyle::new().with(Property::Rotate, 0.0));
		stage.register(
			GearShape::Outline(i),
			ShapeStyle::new().with(Property::DashOffset, gear.outline().length()),
		);
		stage.register(
			GearShape::Hole(i),
			ShapeStyle::new().with(Property::DashOffset, gear.hole().length()),
		);
	}
	stage
}

fn reveal() -> Timeline<GearShape> {
	let mut tl = Timeline::new();
	let links: Vec<_> = (0..LINKS.len() as u8).map(GearShape::Link).collect();
	tl.add(
		&links,
		&Motion::new(LINK_DRAW_MS, Ease::InOutQuad).to(Property::DashOffset, 0.0),
		Position::At(0.0),
	);
	for (i, gear) in GEARS.iter().enumerate() {
		let i = i as u8;
		tl.add(
			&[GearShape::Outline(i), GearShape::Hole(i)],
			&Motion::new(gear.draw_ms, Ease::InOutQuad).to(Property::DashOffset, 0.0),
			Position::At(gear.draw_at_ms),
		);
	}
	tl
}

fn spin() -> Timeline<GearShape> {
	let mut tl = Timeline::looping();
	for (i, gear) in GEARS.iter().enumerate() {
		tl.add(
			&[GearShape::Group(i as u8)],
			&Motion::new(SPIN_PERIOD_MS, Ease::Linear).from_to(Property::Rotate, 0.0, gear.turn_deg),
			Position::At(0.0),
		);
	}
	tl
}

/// Gears that draw themselves in and keep turning while on screen.
pub fn gears(threshold: f64) -> Choreography<GearShape> {
	Choreography::new(stage(), reveal(), threshold).with_ambient(vec![spin()], AmbientStart::WithReveal)
}
