use std::f64::consts::PI;

/// Easing curves mapping normalized progress to eased progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
	/// Constant speed.
	Linear,
	/// Quadratic ease-in.
	InQuad,
	/// Quadratic ease-out.
	OutQuad,
	/// Quadratic ease-in/out.
	InOutQuad,
	/// Cubic ease-in.
	InCubic,
	/// Cubic ease-out.
	OutCubic,
	/// Sine ease-in/out, used by breathing loops.
	InOutSine,
	/// Elastic ease-out. `amplitude` is clamped to `[1, 10]`, `period` to `(0, 2]`.
	OutElastic {
		/// Overshoot height.
		amplitude: f64,
		/// Oscillation period as a fraction of the duration.
		period: f64,
	},
	/// Back ease-in; the argument is the overshoot.
	BackIn(f64),
	/// Back ease-out; the argument is the overshoot.
	BackOut(f64),
}

impl Ease {
	/// Apply the curve to `t`, clamped to `[0, 1]`.
	///
	/// Every curve maps 0 to 0 and 1 to 1; elastic and back curves leave that
	/// range in between.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Self::Linear => t,
			Self::InQuad => t * t,
			Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
			Self::InOutQuad => {
				if t < 0.5 {
					2.0 * t * t
				} else {
					1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
				}
			}
			Self::InCubic => t * t * t,
			Self::OutCubic => 1.0 - (1.0 - t).powi(3),
			Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
			Self::OutElastic { amplitude, period } => 1.0 - in_elastic(1.0 - t, amplitude, period),
			Self::BackIn(s) => t * t * ((s + 1.0) * t - s),
			Self::BackOut(s) => {
				let u = t - 1.0;
				1.0 + (s + 1.0) * u * u * u + s * u * u
			}
		}
	}
}

fn in_elastic(t: f64, amplitude: f64, period: f64) -> f64 {
	if t <= 0.0 || t >= 1.0 {
		return t;
	}
	let a = amplitude.clamp(1.0, 10.0);
	let p = period.clamp(f64::EPSILON, 2.0);
	let s = p / (2.0 * PI) * (1.0 / a).asin();
	-a * 2f64.powf(10.0 * (t - 1.0)) * ((t - 1.0 - s) * (2.0 * PI) / p).sin()
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALL: [Ease; 10] = [
		Ease::Linear,
		Ease::InQuad,
		Ease::OutQuad,
		Ease::InOutQuad,
		Ease::InCubic,
		Ease::OutCubic,
		Ease::InOutSine,
		Ease::OutElastic {
			amplitude: 1.0,
			period: 0.5,
		},
		Ease::BackIn(1.7),
		Ease::BackOut(1.7),
	];

	#[test]
	fn endpoints_are_fixed() {
		for ease in ALL {
			assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
			assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
		}
	}

	#[test]
	fn input_is_clamped() {
		for ease in ALL {
			assert_eq!(ease.apply(-3.0), ease.apply(0.0));
			assert_eq!(ease.apply(7.0), ease.apply(1.0));
		}
	}

	#[test]
	fn quad_midpoints() {
		assert_eq!(Ease::InQuad.apply(0.5), 0.25);
		assert_eq!(Ease::OutQuad.apply(0.5), 0.75);
		assert_eq!(Ease::InOutQuad.apply(0.5), 0.5);
		assert!((Ease::InOutSine.apply(0.5) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn back_out_overshoots_and_back_in_undershoots() {
		let peak = (1..100)
			.map(|i| Ease::BackOut(1.7).apply(i as f64 / 100.0))
			.fold(f64::MIN, f64::max);
		assert!(peak > 1.0);
		assert!(Ease::BackIn(1.7).apply(0.2) < 0.0);
	}

	#[test]
	fn elastic_settles_near_one() {
		let ease = Ease::OutElastic {
			amplitude: 1.0,
			period: 0.5,
		};
		assert!((ease.apply(0.95) - 1.0).abs() < 0.01);
		assert!(ease.apply(0.2) > 1.0);
	}
}
