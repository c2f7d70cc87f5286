pub mod band;
pub mod consumption;
pub mod hvac;
pub mod position;
pub mod range;
pub mod reconcile;
pub mod vehicle;
pub mod weather;
