use std::fmt;

/// Categorical weight of a network node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
	Hub,
	Secondary,
	Tertiary,
}

impl Tier {
	/// Parallax weight: lighter nodes drift further.
	pub fn factor(self) -> f64 {
		match self {
			Self::Hub => 0.5,
			Self::Secondary => 1.0,
			Self::Tertiary => 1.5,
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct NetworkNode {
	pub id: u8,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub tier: Tier,
	pub delay_ms: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct NetworkEdge {
	pub from: u8,
	pub to: u8,
	pub delay_ms: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct AmbientParticle {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub period_ms: f64,
	pub delay_ms: f64,
}

const fn node(id: u8, x: f64, y: f64, radius: f64, tier: Tier, delay_ms: f64) -> NetworkNode {
	NetworkNode {
		id,
		x,
		y,
		radius,
		tier,
		delay_ms,
	}
}

const fn edge(from: u8, to: u8, delay_ms: f64) -> NetworkEdge {
	NetworkEdge { from, to, delay_ms }
}

const fn mote(x: f64, y: f64, size: f64, period_ms: f64, delay_ms: f64) -> AmbientParticle {
	AmbientParticle {
		x,
		y,
		size,
		period_ms,
		delay_ms,
	}
}

pub const NODES: [NetworkNode; 8] = [
	node(0, 50.0, 50.0, 12.0, Tier::Hub, 0.0),
	node(1, 150.0, 50.0, 12.0, Tier::Hub, 100.0),
	node(2, 100.0, 25.0, 8.0, Tier::Secondary, 200.0),
	node(3, 100.0, 75.0, 8.0, Tier::Secondary, 300.0),
	node(4, 25.0, 25.0, 6.0, Tier::Tertiary, 400.0),
	node(5, 25.0, 75.0, 6.0, Tier::Tertiary, 500.0),
	node(6, 175.0, 25.0, 6.0, Tier::Tertiary, 600.0),
	node(7, 175.0, 75.0, 6.0, Tier::Tertiary, 700.0),
];

pub const EDGES: [NetworkEdge; 10] = [
	edge(0, 1, 800.0),
	edge(0, 2, 900.0),
	edge(1, 2, 1000.0),
	edge(0, 3, 1100.0),
	edge(1, 3, 1200.0),
	edge(0, 4, 1300.0),
	edge(0, 5, 1400.0),
	edge(1, 6, 1500.0),
	edge(1, 7, 1600.0),
	edge(2, 3, 1700.0),
];

pub const MOTES: [AmbientParticle; 6] = [
	mote(12.0, 48.0, 1.2, 3200.0, 0.0),
	mote(68.0, 12.0, 1.0, 4100.0, 600.0),
	mote(128.0, 88.0, 1.4, 3600.0, 1200.0),
	mote(188.0, 52.0, 1.1, 4500.0, 300.0),
	mote(84.0, 94.0, 0.9, 3900.0, 900.0),
	mote(142.0, 8.0, 1.3, 3400.0, 1500.0),
];

/// Center of the integration symbol, its rotation origin.
pub const SYMBOL_CENTER: (f64, f64) = (100.0, 45.0);

pub fn find_node(id: u8) -> Option<&'static NetworkNode> {
	NODES.iter().find(|n| n.id == id)
}

/// Stable logical key of every animated shape in the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkShape {
	Node(u8),
	Glow(u8),
	Edge(u8, u8),
	/// Data packet travelling along an edge.
	Packet(u8, u8),
	Mote(u8),
	Symbol,
}

impl fmt::Display for NetworkShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Node(id) => write!(f, "node-{id}"),
			Self::Glow(id) => write!(f, "glow-{id}"),
			Self::Edge(a, b) => write!(f, "edge-{a}-{b}"),
			Self::Packet(a, b) => write!(f, "packet-{a}-{b}"),
			Self::Mote(i) => write!(f, "mote-{i}"),
			Self::Symbol => f.write_str("symbol"),
		}
	}
}
