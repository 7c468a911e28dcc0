use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Numeric visual properties the engine can interpolate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
	/// CSS opacity.
	Opacity,
	/// Uniform scale.
	Scale,
	/// Horizontal scale, multiplied into the uniform scale.
	ScaleX,
	/// Horizontal translation in user units.
	TranslateX,
	/// Vertical translation in user units.
	TranslateY,
	/// Rotation in degrees.
	Rotate,
	/// Stroke dash offset, used for the draw-on effect.
	DashOffset,
	/// Circle center x attribute.
	Cx,
	/// Circle center y attribute.
	Cy,
}

impl Property {
	/// Every property, in storage order.
	pub const ALL: [Property; 9] = [
		Property::Opacity,
		Property::Scale,
		Property::ScaleX,
		Property::TranslateX,
		Property::TranslateY,
		Property::Rotate,
		Property::DashOffset,
		Property::Cx,
		Property::Cy,
	];

	/// Value an element shows when the property was never written.
	pub fn neutral(self) -> f64 {
		match self {
			Self::Opacity | Self::Scale | Self::ScaleX => 1.0,
			_ => 0.0,
		}
	}

	/// Whether the property is rendered through the CSS `transform`.
	pub fn is_transform(self) -> bool {
		matches!(
			self,
			Self::Scale | Self::ScaleX | Self::TranslateX | Self::TranslateY | Self::Rotate
		)
	}

	fn slot(self) -> usize {
		self as usize
	}
}

/// The animated state of one shape. Properties that were never written stay
/// unset so the renderer leaves the element's authored attributes alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeStyle {
	values: [Option<f64>; 9],
}

impl ShapeStyle {
	/// A style with nothing written.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`ShapeStyle::set`].
	pub fn with(mut self, property: Property, value: f64) -> Self {
		self.set(property, value);
		self
	}

	/// Current value, falling back to the property's neutral value.
	pub fn get(&self, property: Property) -> f64 {
		self.values[property.slot()].unwrap_or_else(|| property.neutral())
	}

	/// Whether the property was written.
	pub fn is_set(&self, property: Property) -> bool {
		self.values[property.slot()].is_some()
	}

	/// Write a value, returning whether it changed.
	pub fn set(&mut self, property: Property, value: f64) -> bool {
		let slot = &mut self.values[property.slot()];
		if *slot == Some(value) {
			return false;
		}
		*slot = Some(value);
		true
	}

	/// Properties that have been written at least once.
	pub fn written(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
		Property::ALL
			.iter()
			.filter_map(|&p| self.values[p.slot()].map(|v| (p, v)))
	}

	/// CSS transform for the written transform properties, if any.
	pub fn transform(&self) -> Option<String> {
		if !Property::ALL
			.iter()
			.any(|p| p.is_transform() && self.is_set(*p))
		{
			return None;
		}
		let scale = self.get(Property::Scale);
		Some(format!(
			"translate({}px, {}px) rotate({}deg) scale({}, {})",
			self.get(Property::TranslateX),
			self.get(Property::TranslateY),
			self.get(Property::Rotate),
			scale * self.get(Property::ScaleX),
			scale
		))
	}
}

/// Owned mapping from stable logical shape keys to their animated state.
///
/// Only keys registered up front exist; writes to anything else are dropped,
/// which is how a missing target degrades to "no animation" for that shape.
#[derive(Clone, Debug)]
pub struct Stage<K> {
	styles: HashMap<K, ShapeStyle>,
	order: Vec<K>,
	dirty: HashSet<K>,
}

impl<K> Default for Stage<K> {
	fn default() -> Self {
		Self {
			styles: HashMap::new(),
			order: Vec::new(),
			dirty: HashSet::new(),
		}
	}
}

impl<K: Copy + Eq + Hash> Stage<K> {
	/// An empty stage.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a shape with its initial style. Re-registering replaces the
	/// style. New shapes start dirty so the first flush writes them.
	pub fn register(&mut self, key: K, style: ShapeStyle) {
		if self.styles.insert(key, style).is_none() {
			self.order.push(key);
		}
		self.dirty.insert(key);
	}

	/// Whether `key` was registered.
	pub fn contains(&self, key: K) -> bool {
		self.styles.contains_key(&key)
	}

	/// Style of one shape.
	pub fn get(&self, key: K) -> Option<&ShapeStyle> {
		self.styles.get(&key)
	}

	/// Current value of one property, `None` for an unknown shape.
	pub fn value(&self, key: K, property: Property) -> Option<f64> {
		self.styles.get(&key).map(|s| s.get(property))
	}

	/// Write one property. Returns whether anything changed; unknown keys are
	/// ignored.
	pub fn set(&mut self, key: K, property: Property, value: f64) -> bool {
		let Some(style) = self.styles.get_mut(&key) else {
			return false;
		};
		let changed = style.set(property, value);
		if changed {
			self.dirty.insert(key);
		}
		changed
	}

	/// Keys in registration order.
	pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
		self.order.iter().copied()
	}

	/// Number of registered shapes.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Whether nothing was registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Whether any shape changed since the last drain.
	pub fn is_dirty(&self) -> bool {
		!self.dirty.is_empty()
	}

	/// Drain the shapes changed since the last call, in registration order.
	pub fn take_dirty(&mut self) -> Vec<K> {
		if self.dirty.is_empty() {
			return Vec::new();
		}
		let dirty = std::mem::take(&mut self.dirty);
		self.order
			.iter()
			.copied()
			.filter(|k| dirty.contains(k))
			.collect()
	}
}
