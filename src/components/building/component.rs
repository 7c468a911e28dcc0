use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;

use super::state::building_growth;
use super::types::{BuildingShape, GROUND, Segment, Structure, pieces};
use crate::components::runtime::{Runtime, prefers_reduced_motion};
use crate::motion::MotionConfig;

const GREEN: &str = "#99FF33";
const STROKE_WIDTH: f64 = 1.5;
const THIN_STROKE: f64 = 0.8;

fn render_stroke(key: BuildingShape, segment: Segment, width: f64, hidden: bool) -> AnyView {
	let key = key.to_string();
	let length = format!("{:.3}", segment.outline().length());
	let opacity = hidden.then_some("0");
	match segment {
		Segment::Line { x1, y1, x2, y2 } => view! {
			<line
				data-shape=key
				x1=x1
				y1=y1
				x2=x2
				y2=y2
				stroke=GREEN
				stroke-width=width
				fill="none"
				opacity=opacity
				stroke-dasharray=length.clone()
				stroke-dashoffset=length
			/>
		}
		.into_any(),
		Segment::Rect {
			x,
			y,
			width: w,
			height: h,
		} => view! {
			<rect
				data-shape=key
				x=x
				y=y
				width=w
				height=h
				stroke=GREEN
				stroke-width=width
				fill="none"
				opacity=opacity
				stroke-dasharray=length.clone()
				stroke-dashoffset=length
			/>
		}
		.into_any(),
	}
}

/// Line drawing of a business growing from a corner shop into a skyscraper
/// complex.
#[component]
pub fn BuildingGrowthAnimation(
	/// Extra classes for the container.
	#[prop(optional, into)]
	class: String,
) -> impl IntoView {
	let container = NodeRef::<Div>::new();
	let runtime = StoredValue::new_local(None::<Runtime>);
	let config = use_context::<MotionConfig>()
		.unwrap_or_default()
		.with_reduced_motion(prefers_reduced_motion());

	Effect::new(move |_| {
		let Some(div) = container.get() else {
			return;
		};
		let state = Rc::new(RefCell::new(building_growth(config.threshold)));
		runtime.set_value(Runtime::reveal(div.as_ref(), state, config));
	});
	on_cleanup(move || {
		runtime.try_update_value(|rt| rt.take());
	});

	let structures = Structure::ALL
		.into_iter()
		.map(|structure| {
			let group = structure
				.fades_out()
				.then(|| BuildingShape::Group(structure).to_string());
			let strokes = pieces(structure)
				.into_iter()
				.map(|piece| {
					let width = if piece.thin { THIN_STROKE } else { STROKE_WIDTH };
					render_stroke(
						BuildingShape::Stroke(structure, piece.part),
						piece.segment,
						width,
						structure.fades_in(),
					)
				})
				.collect_view();
			view! { <g data-shape=group>{strokes}</g> }
		})
		.collect_view();

	let ground = render_stroke(BuildingShape::Ground, GROUND, STROKE_WIDTH, false);

	view! {
		<div
			node_ref=container
			class=format!("building-growth-animation {class}")
			role="img"
			aria-label="Animation showing business growth from small business to enterprise skyscraper"
		>
			<svg viewBox="0 0 200 140" preserveAspectRatio="xMidYMid meet">
				{ground}
				{structures}
			</svg>
		</div>
	}
}
