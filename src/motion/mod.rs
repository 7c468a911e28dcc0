//! Headless animation engine: easing, staged shape state, timelines, and the
//! visibility, scroll and hover state machines the decorative components are
//! built from. Nothing in here touches the browser.

/// Reveal-then-loop state behind the scroll-revealed components.
pub mod choreography;
/// Site-wide motion settings.
pub mod config;
/// Easing curves.
pub mod ease;
/// Per-frame request coalescing and frame deltas.
pub mod frame;
/// One-shot reveal latch.
pub mod gate;
/// Stroke lengths and generated outlines.
pub mod geometry;
/// Hover-driven enter/leave transitions.
pub mod hover;
/// Scroll progress and direction.
pub mod scroll;
/// Animated shape properties and the per-instance stage.
pub mod style;
/// Tweens, staggers and the timelines that sequence them.
pub mod timeline;

pub use choreography::{AmbientStart, Animated, Choreography};
pub use config::MotionConfig;
pub use ease::Ease;
pub use frame::{FrameClock, FrameCoalescer};
pub use gate::{GateState, RevealGate};
pub use geometry::Outline;
pub use hover::{HoverPhase, HoverSequencer};
pub use scroll::{ScrollDirection, ScrollSample, ScrollTracker};
pub use style::{Property, ShapeStyle, Stage};
pub use timeline::{Motion, Position, Stagger, Timeline};
