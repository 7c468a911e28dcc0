use std::fmt;

use kurbo::Point;

use crate::motion::Outline;
use crate::motion::geometry::gear_outline;

/// One gear of the drivetrain and its part of the draw-in.
#[derive(Clone, Copy, Debug)]
pub struct Gear {
	pub cx: f64,
	pub cy: f64,
	pub outer_radius: f64,
	pub inner_radius: f64,
	pub teeth: u32,
	pub hole_radius: f64,
	pub axle_radius: f64,
	pub draw_at_ms: f64,
	pub draw_ms: f64,
	/// Rotation per spin period, degrees; negative turns counter-clockwise.
	pub turn_deg: f64,
}

impl Gear {
	pub fn outline(&self) -> Outline {
		Outline::Path(gear_outline(
			Point::new(self.cx, self.cy),
			self.outer_radius,
			self.inner_radius,
			self.teeth,
		))
	}

	pub fn hole(&self) -> Outline {
		Outline::circle(self.cx, self.cy, self.hole_radius)
	}
}

/// Schematic line between two axles.
#[derive(Clone, Copy, Debug)]
pub struct Link {
	pub from: (f64, f64),
	pub to: (f64, f64),
}

impl Link {
	pub fn outline(&self) -> Outline {
		Outline::line(self.from.0, self.from.1, self.to.0, self.to.1)
	}
}

/// Time for the largest gear to make one full turn.
pub const SPIN_PERIOD_MS: f64 = 10_000.0;
pub const LINK_DRAW_MS: f64 = 600.0;

pub const GEARS: [Gear; 3] = [
	Gear {
		cx: 60.0,
		cy: 70.0,
		outer_radius: 35.0,
		inner_radius: 30.0,
		teeth: 12,
		hole_radius: 10.0,
		axle_radius: 3.0,
		draw_at_ms: 300.0,
		draw_ms: 1500.0,
		turn_deg: 360.0,
	},
	Gear {
		cx: 120.0,
		cy: 50.0,
		outer_radius: 25.0,
		inner_radius: 20.0,
		teeth: 9,
		hole_radius: 8.0,
		axle_radius: 3.0,
		draw_at_ms: 500.0,
		draw_ms: 1200.0,
		turn_deg: -360.0 * 12.0 / 9.0,
	},
	Gear {
		cx: 150.0,
		cy: 80.0,
		outer_radius: 18.0,
		inner_radius: 14.0,
		teeth: 7,
		hole_radius: 5.0,
		axle_radius: 2.0,
		draw_at_ms: 700.0,
		draw_ms: 1000.0,
		turn_deg: 360.0 * 12.0 / 7.0,
	},
];

pub const LINKS: [Link; 2] = [
	Link {
		from: (60.0, 70.0),
		to: (120.0, 50.0),
	},
	Link {
		from: (120.0, 50.0),
		to: (150.0, 80.0),
	},
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GearShape {
	/// Rotating group holding a gear, its hole and its axle.
	Group(u8),
	Outline(u8),
	Hole(u8),
	Link(u8),
}

impl fmt::Display for GearShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Group(i) => write!(f, "gear-group-{i}"),
			Self::Outline(i) => write!(f, "gear-{i}"),
			Self::Hole(i) => write!(f, "gear-hole-{i}"),
			Self::Link(i) => write!(f, "link-{i}"),
		}
	}
}
