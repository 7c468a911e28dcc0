use std::hash::Hash;

use log::trace;

use super::ease::Ease;
use super::style::{Property, Stage};

/// Where a step starts on its timeline, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
	/// Absolute offset from the timeline start.
	At(f64),
	/// Offset from the current end of the timeline; negative values overlap
	/// the steps already added.
	Relative(f64),
	/// Offset from the start of the previously added step.
	WithPrevious(f64),
}

/// Which end of a target list a stagger counts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerFrom {
	#[default]
	/// Delays grow from the first target.
	First,
	/// Delays grow from the last target.
	Last,
}

/// Incrementing per-target delay applied across a target list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
	/// Delay added per target.
	pub each_ms: f64,
	/// Which end starts at zero delay.
	pub from: StaggerFrom,
}

impl Stagger {
	/// Stagger by `each_ms` from the first target.
	pub fn every(each_ms: f64) -> Self {
		Self {
			each_ms,
			from: StaggerFrom::First,
		}
	}

	/// Count from the last target instead.
	pub fn from_last(mut self) -> Self {
		self.from = StaggerFrom::Last;
		self
	}

	fn offset(&self, index: usize, count: usize) -> f64 {
		let rank = match self.from {
			StaggerFrom::First => index,
			StaggerFrom::Last => count.saturating_sub(index + 1),
		};
		rank as f64 * self.each_ms
	}
}

#[derive(Clone, Debug)]
struct Track {
	property: Property,
	from: Option<f64>,
	keyframes: Vec<f64>,
}

/// A set of property changes sharing one duration, ease and delay.
///
/// A track without an explicit origin starts from whatever value the shape
/// holds when the step begins.
#[derive(Clone, Debug)]
pub struct Motion {
	duration: f64,
	ease: Ease,
	delay: f64,
	tracks: Vec<Track>,
}

impl Motion {
	/// A motion with no tracks yet.
	pub fn new(duration_ms: f64, ease: Ease) -> Self {
		Self {
			duration: duration_ms.max(0.0),
			ease,
			delay: 0.0,
			tracks: Vec::new(),
		}
	}

	/// Animate from the current value to `value`.
	pub fn to(self, property: Property, value: f64) -> Self {
		self.track(property, None, vec![value])
	}

	/// Animate from an explicit origin to `value`.
	pub fn from_to(self, property: Property, from: f64, to: f64) -> Self {
		self.track(property, Some(from), vec![to])
	}

	/// Animate through several values, splitting the duration evenly and
	/// easing each segment.
	pub fn keyframes(self, property: Property, from: f64, frames: &[f64]) -> Self {
		self.track(property, Some(from), frames.to_vec())
	}

	/// Start `delay_ms` after the step position.
	pub fn delay(mut self, delay_ms: f64) -> Self {
		self.delay = delay_ms.max(0.0);
		self
	}

	fn track(mut self, property: Property, from: Option<f64>, keyframes: Vec<f64>) -> Self {
		if !keyframes.is_empty() {
			self.tracks.push(Track {
				property,
				from,
				keyframes,
			});
		}
		self
	}
}

#[derive(Clone, Debug)]
struct Tween<K> {
	target: K,
	property: Property,
	from: Option<f64>,
	keyframes: Vec<f64>,
	start: f64,
	duration: f64,
	ease: Ease,
	origin: Option<f64>,
	done: bool,
}

impl<K: Copy + Eq + Hash> Tween<K> {
	fn end(&self) -> f64 {
		self.start + self.duration
	}

	fn sample(&self, origin: f64, local: f64) -> f64 {
		let segments = self.keyframes.len();
		let scaled = local * segments as f64;
		let index = (scaled.floor() as usize).min(segments - 1);
		let a = if index == 0 {
			origin
		} else {
			self.keyframes[index - 1]
		};
		let b = self.keyframes[index];
		a + (b - a) * self.ease.apply(scaled - index as f64)
	}

	fn render(&mut self, t: f64, stage: &mut Stage<K>) -> bool {
		if self.done || t < self.start {
			return false;
		}
		let origin = match self.origin {
			Some(origin) => origin,
			None => match self.from.or_else(|| stage.value(self.target, self.property)) {
				Some(origin) => *self.origin.insert(origin),
				None => {
					trace!("skipping tween on unregistered shape");
					self.done = true;
					return false;
				}
			},
		};
		let local = if self.duration <= 0.0 {
			1.0
		} else {
			((t - self.start) / self.duration).clamp(0.0, 1.0)
		};
		let value = if local >= 1.0 {
			self.done = true;
			self.keyframes[self.keyframes.len() - 1]
		} else {
			self.sample(origin, local)
		};
		stage.set(self.target, self.property, value)
	}
}

/// An ordered set of tweens over a shared clock.
///
/// Tweens are applied in the order they were added, so on conflict the later
/// one wins. Nothing is written before a tween's start, and a tween that has
/// passed its end has written exactly its final value.
#[derive(Clone, Debug)]
pub struct Timeline<K> {
	tweens: Vec<Tween<K>>,
	elapsed: f64,
	duration: f64,
	last_start: f64,
	repeat: bool,
	iteration: u64,
}

impl<K> Default for Timeline<K> {
	fn default() -> Self {
		Self {
			tweens: Vec::new(),
			elapsed: 0.0,
			duration: 0.0,
			last_start: 0.0,
			repeat: false,
			iteration: 0,
		}
	}
}

impl<K: Copy + Eq + Hash> Timeline<K> {
	/// A one-shot timeline.
	pub fn new() -> Self {
		Self::default()
	}

	/// A timeline that wraps around its duration forever.
	pub fn looping() -> Self {
		Self {
			repeat: true,
			..Self::default()
		}
	}

	/// Hold the first iteration back by `delay_ms`; later iterations follow
	/// each other without a gap.
	pub fn with_phase(mut self, delay_ms: f64) -> Self {
		self.elapsed = -delay_ms.max(0.0);
		self
	}

	/// Add one step applied to every target at the same start.
	pub fn add(&mut self, targets: &[K], motion: &Motion, position: Position) -> &mut Self {
		self.push_step(targets, motion, position, None)
	}

	/// Add one step with an incrementing per-target delay.
	pub fn add_staggered(
		&mut self,
		targets: &[K],
		motion: &Motion,
		stagger: Stagger,
		position: Position,
	) -> &mut Self {
		self.push_step(targets, motion, position, Some(stagger))
	}

	fn push_step(
		&mut self,
		targets: &[K],
		motion: &Motion,
		position: Position,
		stagger: Option<Stagger>,
	) -> &mut Self {
		let start = match position {
			Position::At(ms) => ms,
			Position::Relative(offset) => self.duration + offset,
			Position::WithPrevious(offset) => self.last_start + offset,
		}
		.max(0.0);
		self.last_start = start;

		for (index, &target) in targets.iter().enumerate() {
			let offset = stagger.map_or(0.0, |s| s.offset(index, targets.len()));
			for track in &motion.tracks {
				let tween = Tween {
					target,
					property: track.property,
					from: track.from,
					keyframes: track.keyframes.clone(),
					start: start + motion.delay + offset,
					duration: motion.duration,
					ease: motion.ease,
					origin: None,
					done: false,
				};
				self.duration = self.duration.max(tween.end());
				self.tweens.push(tween);
			}
		}
		self
	}

	/// Total length in milliseconds.
	pub fn duration(&self) -> f64 {
		self.duration
	}

	/// Clock position in milliseconds.
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	/// Whether the timeline wraps.
	pub fn is_looping(&self) -> bool {
		self.repeat
	}

	/// One-shot timelines complete once their clock passes the duration;
	/// looping ones never do.
	pub fn is_complete(&self) -> bool {
		!self.repeat && self.elapsed >= self.duration
	}

	/// Move the clock forward and write the resulting values.
	pub fn advance(&mut self, dt_ms: f64, stage: &mut Stage<K>) -> bool {
		self.seek(self.elapsed + dt_ms.max(0.0), stage)
	}

	/// Jump the clock to `t` and write the resulting values. Seeking never
	/// rewinds tweens that already finished.
	pub fn seek(&mut self, t: f64, stage: &mut Stage<K>) -> bool {
		self.elapsed = t;
		if t < 0.0 {
			return false;
		}
		let local = if self.repeat && self.duration > 0.0 {
			let iteration = (t / self.duration).floor() as u64;
			if iteration != self.iteration {
				self.iteration = iteration;
				for tween in &mut self.tweens {
					tween.done = false;
				}
			}
			t - iteration as f64 * self.duration
		} else {
			t.min(self.duration)
		};
		let mut changed = false;
		for tween in &mut self.tweens {
			changed |= tween.render(local, stage);
		}
		changed
	}

	/// Jump straight to the end of a one-shot timeline.
	pub fn finish(&mut self, stage: &mut Stage<K>) -> bool {
		if self.repeat {
			return false;
		}
		self.seek(self.duration, stage)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::motion::style::ShapeStyle;

	fn stage(keys: &[u8]) -> Stage<u8> {
		let mut stage = Stage::new();
		for &k in keys {
			stage.register(k, ShapeStyle::new().with(Property::Opacity, 0.0));
		}
		stage
	}

	#[test]
	fn nothing_is_written_before_start() {
		let mut stage = stage(&[1]);
		stage.take_dirty();
		let mut tl = Timeline::new();
		tl.add(
			&[1],
			&Motion::new(100.0, Ease::Linear).to(Property::Opacity, 1.0),
			Position::At(500.0),
		);
		assert!(!tl.advance(499.0, &mut stage));
		assert_eq!(stage.value(1, Property::Opacity), Some(0.0));
		assert!(!stage.is_dirty());
	}

	#[test]
	fn to_captures_current_value() {
		let mut stage = stage(&[1]);
		stage.set(1, Property::Opacity, 0.4);
		let mut tl = Timeline::new();
		tl.add(
			&[1],
			&Motion::new(100.0, Ease::Linear).to(Property::Opacity, 1.0),
			Position::At(0.0),
		);
		tl.advance(50.0, &mut stage);
		let mid = stage.value(1, Property::Opacity).unwrap();
		assert!((mid - 0.7).abs() < 1e-9);
		tl.advance(500.0, &mut stage);
		assert_eq!(stage.value(1, Property::Opacity), Some(1.0));
		assert!(tl.is_complete());
	}

	#[test]
	fn large_step_lands_on_final_values() {
		let mut stage = stage(&[1, 2]);
		let mut tl = Timeline::new();
		tl.add(
			&[1, 2],
			&Motion::new(
				600.0,
				Ease::OutElastic {
					amplitude: 1.0,
					period: 0.5,
				},
			)
			.from_to(Property::Scale, 0.0, 1.0),
			Position::At(0.0),
		);
		tl.advance(10_000.0, &mut stage);
		assert_eq!(stage.value(1, Property::Scale), Some(1.0));
		assert_eq!(stage.value(2, Property::Scale), Some(1.0));
	}

	#[test]
	fn keyframes_split_duration() {
		let mut stage = stage(&[1]);
		let mut tl = Timeline::new();
		tl.add(
			&[1],
			&Motion::new(1000.0, Ease::Linear).keyframes(Property::Opacity, 0.0, &[0.6, 0.0]),
			Position::At(0.0),
		);
		tl.seek(500.0, &mut stage);
		assert!((stage.value(1, Property::Opacity).unwrap() - 0.6).abs() < 1e-9);
		tl.seek(750.0, &mut stage);
		assert!((stage.value(1, Property::Opacity).unwrap() - 0.3).abs() < 1e-9);
		tl.seek(1000.0, &mut stage);
		assert_eq!(stage.value(1, Property::Opacity), Some(0.0));
	}

	#[test]
	fn relative_positions_chain_with_overlap() {
		let motion = Motion::new(300.0, Ease::Linear).to(Property::Opacity, 1.0);
		let mut tl: Timeline<u8> = Timeline::new();
		tl.add(&[1], &motion, Position::At(0.0));
		tl.add(&[2], &motion, Position::Relative(-150.0));
		assert_eq!(tl.duration(), 450.0);
		tl.add(&[3], &motion, Position::WithPrevious(0.0));
		assert_eq!(tl.duration(), 450.0);
		tl.add(&[4], &Motion::new(400.0, Ease::Linear).to(Property::Opacity, 1.0), Position::Relative(-200.0));
		assert_eq!(tl.duration(), 650.0);
	}

	#[test]
	fn stagger_from_last_reverses_order() {
		let mut stage = stage(&[1, 2, 3]);
		let mut tl = Timeline::new();
		tl.add_staggered(
			&[1, 2, 3],
			&Motion::new(10.0, Ease::Linear).to(Property::Opacity, 1.0),
			Stagger::every(100.0).from_last(),
			Position::At(0.0),
		);
		assert_eq!(tl.duration(), 210.0);
		tl.seek(10.0, &mut stage);
		assert_eq!(stage.value(3, Property::Opacity), Some(1.0));
		assert_eq!(stage.value(1, Property::Opacity), Some(0.0));
	}

	#[test]
	fn missing_targets_do_not_disturb_siblings() {
		let mut stage = stage(&[1]);
		let mut tl = Timeline::new();
		tl.add(
			&[9, 1],
			&Motion::new(100.0, Ease::Linear).to(Property::Opacity, 1.0),
			Position::At(0.0),
		);
		tl.advance(100.0, &mut stage);
		assert_eq!(stage.value(1, Property::Opacity), Some(1.0));
		assert_eq!(stage.len(), 1);
	}

	#[test]
	fn looping_wraps_and_honours_phase_once() {
		let mut stage = stage(&[1]);
		let mut tl = Timeline::looping().with_phase(500.0);
		tl.add(
			&[1],
			&Motion::new(1000.0, Ease::Linear).from_to(Property::Rotate, 0.0, 360.0),
			Position::At(0.0),
		);
		assert!(!tl.advance(400.0, &mut stage));
		tl.advance(350.0, &mut stage);
		assert!((stage.value(1, Property::Rotate).unwrap() - 90.0).abs() < 1e-9);
		tl.advance(1000.0, &mut stage);
		assert!((stage.value(1, Property::Rotate).unwrap() - 90.0).abs() < 1e-9);
		assert!(!tl.is_complete());
	}
}
