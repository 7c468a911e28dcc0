use super::types::{
	BuildingShape, FADE_OUT_AT, FADE_OUT_MS, GROUND, GROUND_DRAW_MS, SCHEDULE, Structure, pieces,
};
use crate::motion::{Choreography, Ease, Motion, Position, Property, ShapeStyle, Stage, Stagger, Timeline};

fn stage() -> Stage<BuildingShape> {
	let mut stage = Stage::new();
	stage.register(
		BuildingShape::Ground,
		ShapeStyle::new().with(Property::DashOffset, GROUND.outline().length()),
	);
	for structure in Structure::ALL {
		if structure.fades_out() {
			stage.register(
				BuildingShape::Group(structure),
				ShapeStyle::new().with(Property::Opacity, 1.0),
			);
		}
		for piece in pieces(structure) {
			let mut style = ShapeStyle::new().with(Property::DashOffset, piece.segment.outline().length());
			if structure.fades_in() {
				style = style.with(Property::Opacity, 0.0);
			}
			stage.register(BuildingShape::Stroke(structure, piece.part), style);
		}
	}
	stage
}

fn reveal() -> Timeline<BuildingShape> {
	let mut tl = Timeline::new();
	tl.add(
		&[BuildingShape::Ground],
		&Motion::new(GROUND_DRAW_MS, Ease::Linear).to(Property::DashOffset, 0.0),
		Position::At(0.0),
	);

	for step in SCHEDULE {
		let targets: Vec<_> = pieces(step.structure)
			.into_iter()
			.filter(|p| step.select.matches(p.part))
			.map(|p| BuildingShape::Stroke(step.structure, p.part))
			.collect();
		let mut draw = Motion::new(step.duration_ms, Ease::OutQuad).to(Property::DashOffset, 0.0);
		if step.structure.fades_in() {
			draw = draw.to(Property::Opacity, 1.0);
		}
		let at = Position::At(step.at_ms);
		if step.stagger_ms > 0.0 {
			let mut stagger = Stagger::every(step.stagger_ms);
			if step.structure.fades_in() {
				stagger = stagger.from_last();
			}
			tl.add_staggered(&targets, &draw, stagger, at);
		} else {
			tl.add(&targets, &draw, at);
		}
	}

	let fade = Motion::new(FADE_OUT_MS, Ease::InQuad).from_to(Property::Opacity, 1.0, 0.0);
	for (structure, at) in FADE_OUT_AT {
		tl.add(&[BuildingShape::Group(structure)], &fade, Position::At(at));
	}
	tl
}

/// Shop, office block and skyscraper complex drawn one after another.
pub fn building_growth(threshold: f64) -> Choreography<BuildingShape> {
	Choreography::new(stage(), reveal(), threshold)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::building::types::{Part, Select};
	use crate::motion::Animated;

	fn stroke(s: Structure, p: Part) -> BuildingShape {
		BuildingShape::Stroke(s, p)
	}

	#[test]
	fn sequence_ends_with_the_skyscraper_door() {
		assert_eq!(building_growth(0.3).reveal_duration(), 9500.0);
	}

	#[test]
	fn every_step_draws_something() {
		for step in SCHEDULE {
			assert!(
				pieces(step.structure).iter().any(|p| step.select.matches(p.part)),
				"{:?} {:?}",
				step.structure,
				step.select
			);
		}
		assert!(!Select::Windows.matches(Part::Floor(0)));
	}

	#[test]
	fn window_grids_leave_room_for_entrances() {
		let count = |s| {
			pieces(s)
				.iter()
				.filter(|p| matches!(p.part, Part::Window(_)))
				.count()
		};
		assert_eq!(count(Structure::Small), 4);
		assert_eq!(count(Structure::Enterprise), 24);
		assert_eq!(count(Structure::SubLeft), 14);
		assert_eq!(count(Structure::SubRight), 11);
		assert_eq!(count(Structure::Skyscraper), 39);
	}

	#[test]
	fn complex_stands_alone_at_the_end() {
		let mut choreo = building_growth(0.3);
		assert!(choreo.observe(0.4));
		for _ in 0..120 {
			choreo.tick(100.0);
		}
		assert!(choreo.is_revealed());

		let stage = choreo.stage();
		assert_eq!(stage.value(BuildingShape::Group(Structure::Small), Property::Opacity), Some(0.0));
		assert_eq!(stage.value(BuildingShape::Group(Structure::Enterprise), Property::Opacity), Some(0.0));
		assert_eq!(stage.value(BuildingShape::Ground, Property::DashOffset), Some(0.0));
		for structure in [Structure::SubLeft, Structure::SubRight, Structure::Skyscraper] {
			for piece in pieces(structure) {
				let style = stage.get(stroke(structure, piece.part)).unwrap();
				assert_eq!(style.get(Property::DashOffset), 0.0);
				assert_eq!(style.get(Property::Opacity), 1.0);
			}
		}
	}

	#[test]
	fn later_windows_light_up_from_the_bottom() {
		let mut choreo = building_growth(0.3);
		choreo.observe(1.0);
		choreo.tick(4500.0);

		let full = |part| {
			pieces(Structure::Enterprise)
				.into_iter()
				.find(|p| p.part == part)
				.map(|p| p.segment.outline().length())
				.unwrap()
		};
		let stage = choreo.stage();
		let first = stage.value(stroke(Structure::Enterprise, Part::Window(0)), Property::DashOffset);
		let last = stage.value(stroke(Structure::Enterprise, Part::Window(23)), Property::DashOffset);
		assert_eq!(first, Some(full(Part::Window(0))));
		assert!(last.unwrap() < full(Part::Window(23)));
	}

	#[test]
	fn shop_windows_draw_left_to_right() {
		let mut choreo = building_growth(0.3);
		choreo.observe(1.0);
		choreo.tick(1250.0);
		let stage = choreo.stage();
		let first = stage.value(stroke(Structure::Small, Part::Window(0)), Property::DashOffset).unwrap();
		let last = stage.value(stroke(Structure::Small, Part::Window(3)), Property::DashOffset).unwrap();
		assert!(first < last);
	}
}
