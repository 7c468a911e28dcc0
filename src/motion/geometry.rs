use std::f64::consts::TAU;

use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};

const ACCURACY: f64 = 1e-3;

/// Static outline of a stroked decorative shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
	/// Straight stroke.
	Line(Line),
	/// Rectangle outline.
	Rect(Rect),
	/// Full circle.
	Circle(Circle),
	/// Arbitrary path, measured along its segments.
	Path(BezPath),
}

impl Outline {
	/// Line from `(x1, y1)` to `(x2, y2)`.
	pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self::Line(Line::new((x1, y1), (x2, y2)))
	}

	/// Rectangle with its top-left corner at `(x, y)`.
	pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self::Rect(Rect::from_origin_size((x, y), (width, height)))
	}

	/// Circle around `(cx, cy)`.
	pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
		Self::Circle(Circle::new((cx, cy), r))
	}

	/// Stroke length, which is also the dash offset that hides the stroke
	/// completely.
	pub fn length(&self) -> f64 {
		match self {
			Self::Line(line) => line.perimeter(ACCURACY),
			Self::Rect(rect) => rect.perimeter(ACCURACY),
			Self::Circle(circle) => circle.perimeter(ACCURACY),
			Self::Path(path) => path.perimeter(ACCURACY),
		}
	}
}

/// Closed outline of a gear with trapezoidal teeth, starting at angle 0.
///
/// Each tooth rises from the root circle to the tip over the first 15% of its
/// angular pitch, holds the tip until 35%, and is back at the root by 50%.
pub fn gear_outline(center: Point, outer_radius: f64, inner_radius: f64, teeth: u32) -> BezPath {
	let mut path = BezPath::new();
	let step = TAU / teeth.max(1) as f64;
	let at = |r: f64, a: f64| Point::new(center.x + r * a.cos(), center.y + r * a.sin());

	for i in 0..teeth.max(1) {
		let theta = i as f64 * step;
		let root = at(inner_radius, theta);
		if i == 0 {
			path.move_to(root);
		} else {
			path.line_to(root);
		}
		path.line_to(at(outer_radius, theta + step * 0.15));
		path.line_to(at(outer_radius, theta + step * 0.35));
		path.line_to(at(inner_radius, theta + step * 0.5));
	}
	path.close_path();
	path
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn simple_lengths() {
		assert!((Outline::line(10.0, 120.0, 190.0, 120.0).length() - 180.0).abs() < 1e-6);
		assert!((Outline::rect(70.0, 62.0, 12.0, 18.0).length() - 60.0).abs() < 1e-6);
		assert!((Outline::circle(60.0, 70.0, 10.0).length() - TAU * 10.0).abs() < 1e-2);
	}

	#[test]
	fn gear_has_four_points_per_tooth() {
		let gear = gear_outline(Point::new(60.0, 70.0), 35.0, 30.0, 12);
		let points = gear
			.elements()
			.iter()
			.filter(|el| !matches!(el, kurbo::PathEl::ClosePath))
			.count();
		assert_eq!(points, 48);
		assert!(gear.to_svg().starts_with('M'));
	}

	#[test]
	fn gear_outline_is_longer_than_root_circle() {
		let gear = Outline::Path(gear_outline(Point::new(0.0, 0.0), 25.0, 20.0, 9));
		assert!(gear.length() > TAU * 20.0);
	}
}
