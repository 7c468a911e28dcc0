mod component;
mod state;
mod types;

pub use component::BuildingGrowthAnimation;
