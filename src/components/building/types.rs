use std::fmt;

use Part::*;
use Select::{Floors, One, Pair, Storefronts, Windows};
use Structure::{Enterprise, Skyscraper, Small, SubLeft, SubRight};

use crate::motion::Outline;

/// The buildings drawn, in the order they appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
	Small,
	Enterprise,
	SubLeft,
	SubRight,
	Skyscraper,
}

impl Structure {
	pub const ALL: [Structure; 5] = [
		Self::Small,
		Self::Enterprise,
		Self::SubLeft,
		Self::SubRight,
		Self::Skyscraper,
	];

	fn prefix(self) -> &'static str {
		match self {
			Self::Small => "small",
			Self::Enterprise => "enterprise",
			Self::SubLeft => "sub-left",
			Self::SubRight => "sub-right",
			Self::Skyscraper => "skyscraper",
		}
	}

	/// Later phases start hidden and fade in while they draw.
	pub fn fades_in(self) -> bool {
		self != Self::Small
	}

	/// Phases that fade out to make room for the next one.
	pub fn fades_out(self) -> bool {
		matches!(self, Self::Small | Self::Enterprise)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
	Base,
	LeftWall,
	RightWall,
	Roof,
	/// Parapet, roof cap or crown above the roof line.
	CapLeft,
	CapRight,
	CapTop,
	Door,
	DoorLine,
	/// Awning over the shop door, entrance overhang on the towers.
	Canopy,
	CanopyLeft,
	CanopyRight,
	Floor(u8),
	Window(u8),
	Storefront(u8),
}

impl fmt::Display for Part {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Base => f.write_str("base"),
			Self::LeftWall => f.write_str("left-wall"),
			Self::RightWall => f.write_str("right-wall"),
			Self::Roof => f.write_str("roof"),
			Self::CapLeft => f.write_str("cap-left"),
			Self::CapRight => f.write_str("cap-right"),
			Self::CapTop => f.write_str("cap-top"),
			Self::Door => f.write_str("door"),
			Self::DoorLine => f.write_str("door-line"),
			Self::Canopy => f.write_str("canopy"),
			Self::CanopyLeft => f.write_str("canopy-left"),
			Self::CanopyRight => f.write_str("canopy-right"),
			Self::Floor(i) => write!(f, "floor-{i}"),
			Self::Window(i) => write!(f, "window-{i}"),
			Self::Storefront(i) => write!(f, "storefront-{i}"),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildingShape {
	Ground,
	Group(Structure),
	Stroke(Structure, Part),
}

impl fmt::Display for BuildingShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Ground => f.write_str("ground"),
			Self::Group(s) => write!(f, "{}-group", s.prefix()),
			Self::Stroke(s, part) => write!(f, "{}-{part}", s.prefix()),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
	Line { x1: f64, y1: f64, x2: f64, y2: f64 },
	Rect { x: f64, y: f64, width: f64, height: f64 },
}

impl Segment {
	pub fn outline(self) -> Outline {
		match self {
			Self::Line { x1, y1, x2, y2 } => Outline::line(x1, y1, x2, y2),
			Self::Rect {
				x,
				y,
				width,
				height,
			} => Outline::rect(x, y, width, height),
		}
	}
}

/// One stroked element of a building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Piece {
	pub part: Part,
	pub segment: Segment,
	pub thin: bool,
}

impl Piece {
	fn line(part: Part, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self {
			part,
			segment: Segment::Line { x1, y1, x2, y2 },
			thin: false,
		}
	}

	fn rect(part: Part, x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			part,
			segment: Segment::Rect {
				x,
				y,
				width,
				height,
			},
			thin: false,
		}
	}

	fn thin(mut self) -> Self {
		self.thin = true;
		self
	}
}

pub const GROUND: Segment = Segment::Line {
	x1: 10.0,
	y1: 120.0,
	x2: 190.0,
	y2: 120.0,
};

fn rows(first: f64, step: f64, count: usize) -> Vec<f64> {
	(0..count).map(|i| first + step * i as f64).collect()
}

fn floors(x1: f64, x2: f64, ys: &[f64]) -> impl Iterator<Item = Piece> + '_ {
	ys.iter()
		.enumerate()
		.map(move |(i, &y)| Piece::line(Part::Floor(i as u8), x1, y, x2, y).thin())
}

/// Row-major window grid; the cell at `gap` (row, column) is left for the
/// entrance.
fn windows(xs: &[f64], ys: &[f64], size: (f64, f64), gap: Option<(usize, usize)>) -> Vec<Piece> {
	let cells = ys
		.iter()
		.enumerate()
		.flat_map(|(row, &y)| xs.iter().enumerate().map(move |(col, &x)| ((row, col), x, y)))
		.filter(|(cell, _, _)| Some(*cell) != gap);
	cells
		.enumerate()
		.map(|(i, (_, x, y))| Piece::rect(Part::Window(i as u8), x, y, size.0, size.1).thin())
		.collect()
}

/// Every stroke of one structure, in drawing order within each class.
pub fn pieces(structure: Structure) -> Vec<Piece> {
	let mut out = Vec::new();
	match structure {
		Structure::Small => {
			out.extend([
				Piece::line(Base, 65.0, 120.0, 135.0, 120.0),
				Piece::line(LeftWall, 65.0, 120.0, 65.0, 55.0),
				Piece::line(RightWall, 135.0, 120.0, 135.0, 55.0),
				Piece::line(Roof, 65.0, 55.0, 135.0, 55.0),
				Piece::line(CapLeft, 65.0, 55.0, 65.0, 50.0),
				Piece::line(CapRight, 135.0, 55.0, 135.0, 50.0),
				Piece::line(CapTop, 65.0, 50.0, 135.0, 50.0),
			]);
			out.extend(floors(65.0, 135.0, &[88.0]));
			out.extend(windows(&[70.0, 87.0, 104.0, 121.0], &[62.0], (12.0, 18.0), None));
			out.extend([
				Piece::rect(Door, 90.0, 95.0, 20.0, 25.0),
				Piece::line(DoorLine, 100.0, 95.0, 100.0, 120.0).thin(),
				Piece::line(Canopy, 85.0, 93.0, 115.0, 93.0),
				Piece::line(CanopyLeft, 85.0, 93.0, 88.0, 88.0).thin(),
				Piece::line(CanopyRight, 115.0, 93.0, 112.0, 88.0).thin(),
				Piece::rect(Storefront(0), 68.0, 95.0, 18.0, 20.0).thin(),
				Piece::rect(Storefront(1), 114.0, 95.0, 18.0, 20.0).thin(),
			]);
		}
		Structure::Enterprise => {
			out.extend([
				Piece::line(Base, 55.0, 120.0, 145.0, 120.0),
				Piece::line(LeftWall, 60.0, 120.0, 60.0, 25.0),
				Piece::line(RightWall, 140.0, 120.0, 140.0, 25.0),
				Piece::line(Roof, 60.0, 25.0, 140.0, 25.0),
				Piece::line(CapLeft, 75.0, 25.0, 75.0, 18.0),
				Piece::line(CapRight, 125.0, 25.0, 125.0, 18.0),
				Piece::line(CapTop, 75.0, 18.0, 125.0, 18.0),
			]);
			out.extend(floors(60.0, 140.0, &rows(37.0, 12.0, 5)));
			out.extend(windows(
				&rows(68.0, 14.0, 5),
				&rows(28.0, 12.0, 5),
				(8.0, 6.0),
				Some((4, 2)),
			));
			out.extend([
				Piece::line(Canopy, 82.0, 90.0, 118.0, 90.0),
				Piece::rect(Door, 88.0, 92.0, 24.0, 28.0),
				Piece::line(DoorLine, 100.0, 92.0, 100.0, 120.0).thin(),
			]);
		}
		Structure::SubLeft => {
			out.extend([
				Piece::line(Base, 18.0, 120.0, 58.0, 120.0),
				Piece::line(LeftWall, 20.0, 120.0, 20.0, 55.0),
				Piece::line(RightWall, 56.0, 120.0, 56.0, 55.0),
				Piece::line(Roof, 20.0, 55.0, 56.0, 55.0),
			]);
			out.extend(floors(20.0, 56.0, &rows(68.0, 13.0, 4)));
			out.extend(windows(
				&rows(24.0, 11.0, 3),
				&rows(58.0, 13.0, 5),
				(7.0, 7.0),
				Some((4, 1)),
			));
		}
		Structure::SubRight => {
			out.extend([
				Piece::line(Base, 142.0, 120.0, 182.0, 120.0),
				Piece::line(LeftWall, 144.0, 120.0, 144.0, 68.0),
				Piece::line(RightWall, 180.0, 120.0, 180.0, 68.0),
				Piece::line(Roof, 144.0, 68.0, 180.0, 68.0),
			]);
			out.extend(floors(144.0, 180.0, &rows(81.0, 13.0, 3)));
			out.extend(windows(
				&rows(148.0, 11.0, 3),
				&rows(71.0, 13.0, 4),
				(7.0, 7.0),
				Some((3, 1)),
			));
		}
		Structure::Skyscraper => {
			out.extend([
				Piece::line(Base, 62.0, 120.0, 138.0, 120.0),
				Piece::line(LeftWall, 65.0, 120.0, 65.0, 10.0),
				Piece::line(RightWall, 135.0, 120.0, 135.0, 10.0),
				Piece::line(Roof, 65.0, 10.0, 135.0, 10.0),
				Piece::line(CapLeft, 85.0, 10.0, 85.0, 4.0),
				Piece::line(CapRight, 115.0, 10.0, 115.0, 4.0),
				Piece::line(CapTop, 85.0, 4.0, 115.0, 4.0),
			]);
			out.extend(floors(65.0, 135.0, &rows(21.0, 11.0, 8)));
			out.extend(windows(
				&rows(71.0, 13.0, 5),
				&rows(12.0, 11.0, 8),
				(9.0, 6.0),
				Some((7, 2)),
			));
			out.extend([
				Piece::line(Canopy, 85.0, 100.0, 115.0, 100.0),
				Piece::rect(Door, 90.0, 102.0, 20.0, 18.0),
				Piece::line(DoorLine, 100.0, 102.0, 100.0, 120.0).thin(),
			]);
		}
	}
	out
}

/// Which strokes of a structure a step draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Select {
	One(Part),
	Pair(Part, Part),
	Floors,
	Windows,
	Storefronts,
}

impl Select {
	pub fn matches(self, part: Part) -> bool {
		match self {
			Self::One(p) => p == part,
			Self::Pair(a, b) => a == part || b == part,
			Self::Floors => matches!(part, Part::Floor(_)),
			Self::Windows => matches!(part, Part::Window(_)),
			Self::Storefronts => matches!(part, Part::Storefront(_)),
		}
	}
}

/// One draw step of the growth sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
	pub structure: Structure,
	pub select: Select,
	pub at_ms: f64,
	pub duration_ms: f64,
	/// Delay between successive strokes of a class; 0 draws them together.
	pub stagger_ms: f64,
}

const fn step(structure: Structure, select: Select, at_ms: f64, duration_ms: f64) -> Step {
	Step {
		structure,
		select,
		at_ms,
		duration_ms,
		stagger_ms: 0.0,
	}
}

const fn staggered(structure: Structure, select: Select, at_ms: f64, duration_ms: f64, stagger_ms: f64) -> Step {
	Step {
		structure,
		select,
		at_ms,
		duration_ms,
		stagger_ms,
	}
}

pub const GROUND_DRAW_MS: f64 = 400.0;
/// When each fading phase starts to disappear.
pub const FADE_OUT_AT: [(Structure, f64); 2] = [(Structure::Small, 2200.0), (Structure::Enterprise, 5500.0)];
pub const FADE_OUT_MS: f64 = 600.0;

pub const SCHEDULE: &[Step] = &[
	// small business
	step(Small, One(Base), 200.0, 500.0),
	step(Small, Pair(LeftWall, RightWall), 500.0, 600.0),
	step(Small, One(Roof), 1000.0, 400.0),
	step(Small, Pair(CapLeft, CapRight), 1300.0, 200.0),
	step(Small, One(CapTop), 1400.0, 200.0),
	step(Small, One(Floor(0)), 1100.0, 300.0),
	staggered(Small, Windows, 1200.0, 200.0, 80.0),
	step(Small, One(Door), 1500.0, 300.0),
	step(Small, One(DoorLine), 1700.0, 200.0),
	step(Small, One(Canopy), 1600.0, 250.0),
	step(Small, Pair(CanopyLeft, CanopyRight), 1750.0, 150.0),
	staggered(Small, Storefronts, 1800.0, 200.0, 100.0),
	// enterprise
	step(Enterprise, One(Base), 2800.0, 500.0),
	step(Enterprise, Pair(LeftWall, RightWall), 3100.0, 800.0),
	step(Enterprise, One(Roof), 3700.0, 400.0),
	step(Enterprise, Pair(CapLeft, CapRight), 3900.0, 200.0),
	step(Enterprise, One(CapTop), 4000.0, 300.0),
	staggered(Enterprise, Floors, 4100.0, 200.0, 80.0),
	staggered(Enterprise, Windows, 4400.0, 150.0, 30.0),
	step(Enterprise, One(Canopy), 4900.0, 300.0),
	step(Enterprise, One(Door), 5000.0, 400.0),
	step(Enterprise, One(DoorLine), 5200.0, 200.0),
	// skyscraper complex: wings first
	step(SubLeft, One(Base), 6100.0, 300.0),
	step(SubLeft, Pair(LeftWall, RightWall), 6300.0, 500.0),
	step(SubLeft, One(Roof), 6700.0, 300.0),
	staggered(SubLeft, Floors, 6800.0, 150.0, 60.0),
	staggered(SubLeft, Windows, 6900.0, 100.0, 25.0),
	step(SubRight, One(Base), 6200.0, 300.0),
	step(SubRight, Pair(LeftWall, RightWall), 6400.0, 400.0),
	step(SubRight, One(Roof), 6700.0, 300.0),
	staggered(SubRight, Floors, 6800.0, 150.0, 60.0),
	staggered(SubRight, Windows, 6900.0, 100.0, 25.0),
	step(Skyscraper, One(Base), 7000.0, 400.0),
	step(Skyscraper, Pair(LeftWall, RightWall), 7200.0, 1000.0),
	step(Skyscraper, One(Roof), 8000.0, 300.0),
	step(Skyscraper, Pair(CapLeft, CapRight), 8200.0, 200.0),
	step(Skyscraper, One(CapTop), 8300.0, 250.0),
	staggered(Skyscraper, Floors, 8400.0, 150.0, 40.0),
	staggered(Skyscraper, Windows, 8600.0, 80.0, 15.0),
	step(Skyscraper, One(Canopy), 9000.0, 250.0),
	step(Skyscraper, One(Door), 9100.0, 300.0),
	step(Skyscraper, One(DoorLine), 9300.0, 200.0),
];
