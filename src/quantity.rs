#[macro_use]
pub mod macros;

pub mod consumption;
pub mod distance;
pub mod energy;
pub mod percent;
pub mod power;
pub mod speed;
pub mod temperature;
