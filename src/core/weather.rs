use crate::quantity::{speed::MetresPerSecond, temperature::Celsius};

/// Weather inputs to the consumption model, always fully populated —
/// the weather adapter substitutes defaults before the model sees them.
#[must_use]
#[derive(Clone, Debug)]
pub struct Observation {
    pub temperature: Celsius,
    pub wind_speed: MetresPerSecond,
    pub description: String,
    pub icon: String,
}

/// A mild day: assumed whenever the weather service is unavailable.
impl Default for Observation {
    fn default() -> Self {
        Self {
            temperature: Celsius(15.0),
            wind_speed: MetresPerSecond(3.0),
            description: "Unknown".to_string(),
            icon: "01d".to_string(),
        }
    }
}
