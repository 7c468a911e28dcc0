use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;

use super::state::{NetworkState, edge_length};
use super::types::{EDGES, MOTES, NODES, NetworkShape, SYMBOL_CENTER, find_node};
use crate::components::runtime::{Runtime, prefers_reduced_motion};
use crate::motion::MotionConfig;

const GREEN: &str = "#99FF33";

/// Network of nodes that pops in, wires itself up and then drifts with the
/// page scroll.
#[component]
pub fn IntegrationAnimation(
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
		let state = Rc::new(RefCell::new(NetworkState::new(config.threshold)));
		runtime.set_value(Runtime::reveal(div.as_ref(), state, config));
	});
	on_cleanup(move || {
		runtime.try_update_value(|rt| rt.take());
	});

	let edges = EDGES
		.iter()
		.filter_map(|edge| Some((edge, find_node(edge.from)?, find_node(edge.to)?)))
		.map(|(edge, a, b)| {
			let length = format!("{:.3}", edge_length(edge.from, edge.to));
			view! {
				<line
					data-shape=NetworkShape::Edge(edge.from, edge.to).to_string()
					x1=a.x
					y1=a.y
					x2=b.x
					y2=b.y
					stroke="url(#connection-gradient)"
					stroke-width="1.5"
					stroke-linecap="round"
					stroke-dasharray=length.clone()
					stroke-dashoffset=length
				/>
			}
		})
		.collect_view();

	let packets = EDGES
		.iter()
		.filter_map(|edge| Some((edge, find_node(edge.from)?)))
		.map(|(edge, origin)| {
			view! {
				<circle
					data-shape=NetworkShape::Packet(edge.from, edge.to).to_string()
					cx=origin.x
					cy=origin.y
					r="2"
					fill=GREEN
					opacity="0"
				/>
			}
		})
		.collect_view();

	let glows = NODES
		.iter()
		.map(|node| {
			view! {
				<circle
					data-shape=NetworkShape::Glow(node.id).to_string()
					cx=node.x
					cy=node.y
					r=node.radius
					fill="none"
					stroke=GREEN
					stroke-width="2"
					opacity="0"
					style=format!("transform-origin: {}px {}px", node.x, node.y)
				/>
			}
		})
		.collect_view();

	let nodes = NODES
		.iter()
		.map(|node| {
			view! {
				<circle
					data-shape=NetworkShape::Node(node.id).to_string()
					cx=node.x
					cy=node.y
					r=node.radius
					fill="url(#node-gradient)"
					opacity="0"
					style=format!("transform-origin: {}px {}px", node.x, node.y)
				/>
			}
		})
		.collect_view();

	let motes = MOTES
		.iter()
		.enumerate()
		.map(|(i, mote)| {
			view! {
				<circle
					data-shape=NetworkShape::Mote(i as u8).to_string()
					cx=mote.x
					cy=mote.y
					r=mote.size
					fill=GREEN
					opacity="0"
				/>
			}
		})
		.collect_view();

	let (sx, sy) = SYMBOL_CENTER;

	view! {
		<div
			node_ref=container
			class=format!("integration-animation {class}")
			role="img"
			aria-label="Animation of connected systems exchanging data"
		>
			<svg viewBox="0 0 200 100" style="width: 100%; height: 100%; overflow: visible;">
				<defs>
					<linearGradient id="connection-gradient" x1="0%" y1="0%" x2="100%" y2="0%">
						<stop offset="0%" stop-color=GREEN stop-opacity="0.8" />
						<stop offset="50%" stop-color=GREEN stop-opacity="1" />
						<stop offset="100%" stop-color=GREEN stop-opacity="0.8" />
					</linearGradient>
					<radialGradient id="node-gradient" cx="50%" cy="50%" r="50%">
						<stop offset="0%" stop-color=GREEN />
						<stop offset="70%" stop-color="#7ACC29" />
						<stop offset="100%" stop-color="#5A991F" />
					</radialGradient>
				</defs>
				<g class="motes">{motes}</g>
				<g class="connections">{edges}</g>
				<g class="packets">{packets}</g>
				<g class="glows">{glows}</g>
				<g class="nodes">{nodes}</g>
				<g class="integration-symbol" opacity="0.9">
					<path
						data-shape=NetworkShape::Symbol.to_string()
						d=format!("M{} {} L{} {} L{} {} L{} {} Z", sx - 5.0, sy, sx, sy - 5.0, sx + 5.0, sy, sx, sy + 5.0)
						fill=GREEN
						style=format!("transform-origin: {sx}px {sy}px")
					/>
				</g>
			</svg>
		</div>
	}
}
