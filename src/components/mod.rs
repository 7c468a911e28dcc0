//! Decorative animation components and the browser glue driving them.

mod building;
mod gears;
mod integration;
mod plug;
pub mod runtime;

pub use building::BuildingGrowthAnimation;
pub use gears::SpinningGears;
pub use integration::IntegrationAnimation;
pub use plug::PlugAnimation;
