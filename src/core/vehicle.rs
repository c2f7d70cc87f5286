use crate::quantity::{distance::Kilometres, percent::Percent};

pub const DEFAULT_STATE_OF_CHARGE: Percent = Percent(80.0);
pub const DEFAULT_STATE_OF_HEALTH: Percent = Percent(95.0);

/// Telemetry snapshot as the model consumes it.
///
/// The state-store adapter resolves missing readings to defaults before this
/// record is built: the model never sees «unknown».
#[must_use]
#[derive(Clone, Debug)]
pub struct VehicleState {
    pub state_of_charge: Percent,
    pub state_of_health: Percent,
    pub oem_range: Option<Kilometres>,
    pub odometer: Option<Kilometres>,
    pub charging_status: String,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            state_of_charge: DEFAULT_STATE_OF_CHARGE,
            state_of_health: DEFAULT_STATE_OF_HEALTH,
            oem_range: None,
            odometer: None,
            charging_status: "Unknown".to_string(),
        }
    }
}
