use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;

use super::state::gears;
use super::types::{GEARS, GearShape, LINKS};
use crate::components::runtime::{Runtime, prefers_reduced_motion};
use crate::motion::geometry::gear_outline;
use crate::motion::{MotionConfig, Outline};

const GREEN: &str = "#99FF33";
const STROKE_WIDTH: f64 = 1.5;

fn dash(outline: &Outline) -> String {
	format!("{:.3}", outline.length())
}

/// Three meshed gears that draw themselves in and keep turning while on
/// screen.
#[component]
pub fn SpinningGears(
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
		let state = Rc::new(RefCell::new(gears(config.threshold)));
		runtime.set_value(Runtime::reveal(div.as_ref(), state, config));
	});
	on_cleanup(move || {
		runtime.try_update_value(|rt| rt.take());
	});

	let links = LINKS
		.iter()
		.enumerate()
		.map(|(i, link)| {
			let length = dash(&link.outline());
			view! {
				<line
					data-shape=GearShape::Link(i as u8).to_string()
					x1=link.from.0
					y1=link.from.1
					x2=link.to.0
					y2=link.to.1
					stroke=GREEN
					stroke-width="0.5"
					opacity="0.5"
					stroke-dasharray=length.clone()
					stroke-dashoffset=length
				/>
			}
		})
		.collect_view();

	let gear_groups = GEARS
		.iter()
		.enumerate()
		.map(|(i, gear)| {
			let i = i as u8;
			let path = gear_outline((gear.cx, gear.cy).into(), gear.outer_radius, gear.inner_radius, gear.teeth);
			let (outline, hole) = (dash(&gear.outline()), dash(&gear.hole()));
			view! {
				<g
					data-shape=GearShape::Group(i).to_string()
					style=format!("transform-origin: {}px {}px; transform-box: view-box;", gear.cx, gear.cy)
				>
					<path
						data-shape=GearShape::Outline(i).to_string()
						d=path.to_svg()
						stroke=GREEN
						stroke-width=STROKE_WIDTH
						fill="none"
						stroke-dasharray=outline.clone()
						stroke-dashoffset=outline
					/>
					<circle
						data-shape=GearShape::Hole(i).to_string()
						cx=gear.cx
						cy=gear.cy
						r=gear.hole_radius
						stroke=GREEN
						stroke-width=STROKE_WIDTH
						fill="none"
						stroke-dasharray=hole.clone()
						stroke-dashoffset=hole
					/>
					<circle cx=gear.cx cy=gear.cy r=gear.axle_radius fill=GREEN opacity="0.5" />
				</g>
			}
		})
		.collect_view();

	view! {
		<div
			node_ref=container
			class=format!("spinning-gears-animation {class}")
			role="img"
			aria-label="Animation of spinning gears"
		>
			<svg viewBox="0 0 200 140" preserveAspectRatio="xMidYMid meet">
				{links}
				{gear_groups}
			</svg>
		</div>
	}
}
