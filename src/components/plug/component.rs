use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;
use web_sys::MouseEvent;

use super::state::{PlugPart, plug};
use crate::components::runtime::{Runtime, prefers_reduced_motion};
use crate::motion::MotionConfig;

const PLUG_STYLE: &str = "position: absolute; top: calc(50% - 12px); width: 16px; height: 20px; \
	background: linear-gradient(145deg, #2a2a2a, #1a1a1a); border: 2px solid #99FF33; \
	border-radius: 3px; z-index: 2; box-shadow: 0 2px 8px rgba(153, 255, 51, 0.3);";
const WIRE_STYLE: &str = "position: absolute; top: calc(50% - 1px); width: 40px; height: 2px; \
	border-radius: 1px; z-index: 1;";

fn prongs(side: &'static str) -> impl IntoView {
	[4, 8, 12]
		.into_iter()
		.map(|top| {
			view! {
				<div style=format!(
					"position: absolute; {side}: 3px; top: {top}px; width: 8px; height: 2px; background: #99FF33; border-radius: 1px;",
				) />
			}
		})
		.collect_view()
}

/// Button wrapper whose plugs connect while the pointer is over it.
#[component]
pub fn PlugAnimation(
	/// Content shown between the two plugs, usually a button label.
	children: Children,
	/// Extra classes for the wrapper.
	#[prop(optional, into)]
	class: String,
) -> impl IntoView {
	let container = NodeRef::<Div>::new();
	let runtime = StoredValue::new_local(None::<Runtime>);
	let state = Rc::new(RefCell::new(plug()));
	let config = use_context::<MotionConfig>()
		.unwrap_or_default()
		.with_reduced_motion(prefers_reduced_motion());

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(div) = container.get() else {
			return;
		};
		runtime.set_value(Runtime::interactive(div.as_ref(), state_init.clone(), config));
	});
	on_cleanup(move || {
		runtime.try_update_value(|rt| rt.take());
	});

	let wake = move || {
		runtime.try_with_value(|rt| {
			if let Some(rt) = rt {
				rt.wake();
			}
		});
	};

	let state_enter = state.clone();
	let on_mouseenter = move |_: MouseEvent| {
		if state_enter.borrow_mut().enter() {
			wake();
		}
	};

	let state_leave = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if state_leave.borrow_mut().leave() {
			wake();
		}
	};

	view! {
		<div
			node_ref=container
			class=format!("plug-animation {class}")
			on:mouseenter=on_mouseenter
			on:mouseleave=on_mouseleave
			style="position: relative; display: inline-flex; align-items: center; cursor: pointer;"
		>
			<div
				data-shape=PlugPart::LeftWire.to_string()
				style=format!(
					"{WIRE_STYLE} left: -60px; transform-origin: right center; background: linear-gradient(90deg, #99FF33 0%, #4a9d1f 100%);",
				)
			/>
			<div
				data-shape=PlugPart::RightWire.to_string()
				style=format!(
					"{WIRE_STYLE} right: -60px; transform-origin: left center; background: linear-gradient(90deg, #4a9d1f 0%, #99FF33 100%);",
				)
			/>
			<div data-shape=PlugPart::LeftPlug.to_string() style=format!("{PLUG_STYLE} left: -80px;")>
				{prongs("left")}
			</div>
			<div data-shape=PlugPart::RightPlug.to_string() style=format!("{PLUG_STYLE} right: -80px;")>
				{prongs("right")}
			</div>
			<div
				data-shape=PlugPart::Bridge.to_string()
				style="position: absolute; left: calc(50% - 20px); top: calc(50% - 2px); width: 40px; height: 4px; \
					background: linear-gradient(90deg, #99FF33, #4a9d1f); border-radius: 2px; transform-origin: center; z-index: 1;"
			/>
			<div style="position: relative; z-index: 3;">{children()}</div>
		</div>
	}
}
