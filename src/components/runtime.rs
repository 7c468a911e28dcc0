//! Browser glue shared by the animated components: shape handles, the
//! visibility observer, the scroll listener and the animation-frame loop.
//! Every registration is owned by a [`Runtime`] and released when it drops.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use log::{debug, trace};
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CssStyleDeclaration, Element, HtmlElement, IntersectionObserver,
	IntersectionObserverEntry, IntersectionObserverInit, SvgElement, Window,
};

use crate::motion::{
	Animated, FrameClock, FrameCoalescer, MotionConfig, Property, ScrollSample, ScrollTracker,
	ShapeStyle, Stage,
};

/// Logical shape keys resolved to their rendered elements, once, at mount.
pub struct ShapeHandles<K> {
	elements: HashMap<K, Element>,
}

impl<K: Copy + Eq + Hash + Display> ShapeHandles<K> {
	/// Resolve every key against the `data-shape` attributes under `root`.
	pub fn collect(root: &Element, keys: impl IntoIterator<Item = K>) -> Self {
		let wanted: HashMap<String, K> = keys.into_iter().map(|k| (k.to_string(), k)).collect();
		let mut elements = HashMap::with_capacity(wanted.len());
		if let Ok(nodes) = root.query_selector_all("[data-shape]") {
			for i in 0..nodes.length() {
				let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
					continue;
				};
				let key = element
					.get_attribute("data-shape")
					.and_then(|attr| wanted.get(&attr).copied());
				if let Some(key) = key {
					elements.insert(key, element);
				}
			}
		}
		if elements.len() < wanted.len() {
			trace!(
				"{} of {} shapes not rendered; their steps are skipped",
				wanted.len() - elements.len(),
				wanted.len()
			);
		}
		Self { elements }
	}

	/// Number of keys that resolved to an element.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Write every dirty shape to its element.
	pub fn flush(&self, stage: &mut Stage<K>) {
		for key in stage.take_dirty() {
			if let (Some(element), Some(style)) = (self.elements.get(&key), stage.get(key)) {
				write_style(element, style);
			}
		}
	}
}

fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
	if let Some(el) = element.dyn_ref::<HtmlElement>() {
		return Some(el.style());
	}
	element.dyn_ref::<SvgElement>().map(|el| el.style())
}

fn write_style(element: &Element, style: &ShapeStyle) {
	let Some(css) = inline_style(element) else {
		return;
	};
	for (property, value) in style.written() {
		let _ = match property {
			Property::Opacity => css.set_property("opacity", &format!("{:.3}", value.clamp(0.0, 1.0))),
			Property::DashOffset => css.set_property("stroke-dashoffset", &format!("{value:.3}")),
			Property::Cx => element.set_attribute("cx", &format!("{value:.3}")),
			Property::Cy => element.set_attribute("cy", &format!("{value:.3}")),
			_ => Ok(()),
		};
	}
	if let Some(transform) = style.transform() {
		let _ = css.set_property("transform", &transform);
	}
}

/// Whether the visitor asked the OS for reduced motion.
pub fn prefers_reduced_motion() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
		.is_some_and(|q| q.matches())
}

struct FrameInner {
	window: Window,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameInner {
	fn schedule(&self) {
		if self.handle.get().is_some() {
			return;
		}
		if let Some(cb) = self.callback.borrow().as_ref() {
			if let Ok(handle) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.handle.set(Some(handle));
			}
		}
	}

	fn cancel(&self) {
		if let Some(handle) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
	}
}

/// `requestAnimationFrame` driver that keeps going while its step returns
/// `true`, and cancels any pending frame when dropped.
pub(crate) struct FrameLoop {
	inner: Rc<FrameInner>,
}

/// Non-owning handle that (re)starts a [`FrameLoop`].
#[derive(Clone)]
pub(crate) struct FrameTrigger(Weak<FrameInner>);

impl FrameTrigger {
	pub(crate) fn wake(&self) {
		if let Some(inner) = self.0.upgrade() {
			inner.schedule();
		}
	}
}

impl FrameLoop {
	pub(crate) fn new(window: Window, mut step: impl FnMut(f64) -> bool + 'static) -> Self {
		let inner = Rc::new(FrameInner {
			window,
			handle: Cell::new(None),
			callback: RefCell::new(None),
		});
		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			if step(now) {
				inner.schedule();
			}
		}));
		Self { inner }
	}

	pub(crate) fn trigger(&self) -> FrameTrigger {
		FrameTrigger(Rc::downgrade(&self.inner))
	}

	pub(crate) fn wake(&self) {
		self.inner.schedule();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.inner.cancel();
		self.inner.callback.borrow_mut().take();
	}
}

/// `IntersectionObserver` on one element, reporting its visible fraction.
/// Disconnects when dropped.
pub(crate) struct VisibilityObserver {
	observer: IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl VisibilityObserver {
	pub(crate) fn observe(target: &Element, threshold: f64, mut on_change: impl FnMut(f64) + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				let ratio = if entry.is_intersecting() {
					entry.intersection_ratio()
				} else {
					0.0
				};
				on_change(ratio);
			}
		});
		let init = IntersectionObserverInit::new();
		let thresholds = js_sys::Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(threshold));
		init.set_threshold(&thresholds);
		let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
		observer.observe(target);
		Some(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for VisibilityObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Passive `scroll` listener on the window, removed when dropped.
pub(crate) struct ScrollListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl ScrollListener {
	pub(crate) fn new(window: Window, on_scroll: impl FnMut() + 'static) -> Self {
		let callback = Closure::<dyn FnMut()>::new(on_scroll);
		let options = AddEventListenerOptions::new();
		options.set_passive(true);
		let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
			"scroll",
			callback.as_ref().unchecked_ref(),
			&options,
		);
		Self { window, callback }
	}
}

impl Drop for ScrollListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
	}
}

#[derive(Default)]
struct ScrollFeed {
	coalescer: FrameCoalescer,
	tracker: ScrollTracker,
}

impl ScrollFeed {
	fn sample(&mut self, window: &Window, container: &Element) -> Option<ScrollSample> {
		if !self.coalescer.take() {
			return None;
		}
		let viewport = window.inner_height().ok()?.as_f64()?;
		let offset = window.scroll_y().ok()?;
		let rect = container.get_bounding_client_rect();
		Some(self.tracker.sample(offset, rect.top(), rect.height(), viewport))
	}
}

/// Everything one mounted component registered with the browser.
///
/// Dropping it disposes the component's state, cancels its frame loop and
/// detaches its observer and listeners.
pub struct Runtime {
	frames: FrameLoop,
	_observer: Option<VisibilityObserver>,
	_scroll: Option<ScrollListener>,
	dispose: Option<Box<dyn FnOnce()>>,
}

impl Runtime {
	/// Drive a visibility-gated component. Scroll sampling is attached when
	/// the state asks for it.
	pub fn reveal<A: Animated + 'static>(
		container: &Element,
		state: Rc<RefCell<A>>,
		config: MotionConfig,
	) -> Option<Self> {
		let window = web_sys::window()?;
		let feed = state
			.borrow()
			.tracks_scroll()
			.then(|| Rc::new(RefCell::new(ScrollFeed::default())));
		let mut runtime = Self::driven(&window, container, state.clone(), feed.clone(), config);

		let trigger = runtime.frames.trigger();
		let (observed, observed_feed) = (state.clone(), feed.clone());
		runtime._observer = VisibilityObserver::observe(container, config.threshold, move |ratio| {
			let Ok(mut s) = observed.try_borrow_mut() else {
				return;
			};
			if s.observe(ratio) && config.reduced_motion {
				s.settle();
			}
			if let Some(feed) = &observed_feed {
				if s.is_visible() {
					feed.borrow_mut().coalescer.request();
				}
			}
			if s.needs_frames() || s.stage().is_dirty() || observed_feed.is_some() {
				trigger.wake();
			}
		});

		if let Some(feed) = feed {
			let trigger = runtime.frames.trigger();
			runtime._scroll = Some(ScrollListener::new(window, move || {
				let visible = state.try_borrow().map(|s| s.is_visible()).unwrap_or(false);
				if visible && feed.borrow_mut().coalescer.request() {
					trigger.wake();
				}
			}));
		}
		Some(runtime)
	}

	/// Drive a component whose transitions are started from event handlers;
	/// call [`Runtime::wake`] after changing its state.
	pub fn interactive<A: Animated + 'static>(
		container: &Element,
		state: Rc<RefCell<A>>,
		config: MotionConfig,
	) -> Option<Self> {
		let window = web_sys::window()?;
		Some(Self::driven(&window, container, state, None, config))
	}

	fn driven<A: Animated + 'static>(
		window: &Window,
		container: &Element,
		state: Rc<RefCell<A>>,
		feed: Option<Rc<RefCell<ScrollFeed>>>,
		config: MotionConfig,
	) -> Self {
		let handles = ShapeHandles::collect(container, state.borrow().stage().keys());
		handles.flush(state.borrow_mut().stage_mut());
		debug!("mounted {} animated shapes", handles.len());

		let (step_state, step_window, step_container) = (state.clone(), window.clone(), container.clone());
		let mut clock = FrameClock::new(config.max_frame_ms);
		let frames = FrameLoop::new(window.clone(), move |now| {
			let Ok(mut s) = step_state.try_borrow_mut() else {
				return true;
			};
			if let Some(sample) = feed
				.as_ref()
				.and_then(|f| f.borrow_mut().sample(&step_window, &step_container))
			{
				s.scroll(sample);
			}
			if config.reduced_motion {
				s.settle();
			} else {
				s.tick(clock.delta(now));
			}
			handles.flush(s.stage_mut());
			let more = s.needs_frames();
			if !more {
				clock.reset();
			}
			more
		});

		Self {
			frames,
			_observer: None,
			_scroll: None,
			dispose: Some(Box::new(move || {
				if let Ok(mut s) = state.try_borrow_mut() {
					s.dispose();
				}
			})),
		}
	}

	/// Make sure a frame is scheduled.
	pub fn wake(&self) {
		self.frames.wake();
	}
}

impl Drop for Runtime {
	fn drop(&mut self) {
		if let Some(dispose) = self.dispose.take() {
			dispose();
		}
		debug!("animation runtime released");
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn dropped_loop_leaves_no_frame_behind() {
		let window = web_sys::window().unwrap();
		let calls = Rc::new(Cell::new(0));
		let counted = calls.clone();
		let frames = FrameLoop::new(window, move |_| {
			counted.set(counted.get() + 1);
			true
		});
		let trigger = frames.trigger();

		frames.wake();
		frames.wake();
		assert!(frames.inner.handle.get().is_some());
		assert_eq!(Rc::strong_count(&calls), 2);

		drop(frames);
		assert!(trigger.0.upgrade().is_none());
		assert_eq!(Rc::strong_count(&calls), 1);
		trigger.wake();
		assert_eq!(calls.get(), 0);
	}
}
