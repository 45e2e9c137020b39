pub mod math;
pub mod params;
pub mod wire;

pub use math::*;
pub use params::*;
pub use wire::*;
