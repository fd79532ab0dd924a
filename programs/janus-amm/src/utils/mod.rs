pub mod curve;
pub mod math;
pub mod token;

pub use curve::*;
pub use math::*;
