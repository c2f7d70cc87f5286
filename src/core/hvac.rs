use std::ops::Range;

use crate::quantity::{power::Kilowatts, temperature::Celsius};

/// Climate-control draw per ambient temperature band, half-open on the right.
///
/// The minimum sits in the comfortable 12–22 °C band where the cabin needs
/// almost no conditioning, and the draw rises towards both extremes.
const POWER_BANDS: [(Range<f64>, Kilowatts); 8] = [
    (-30.0..-10.0, Kilowatts(5.0)),
    (-10.0..0.0, Kilowatts(4.0)),
    (0.0..5.0, Kilowatts(3.0)),
    (5.0..12.0, Kilowatts(1.5)),
    (12.0..22.0, Kilowatts(0.3)),
    (22.0..28.0, Kilowatts(1.5)),
    (28.0..35.0, Kilowatts(3.0)),
    (35.0..50.0, Kilowatts(4.5)),
];

/// Assumed outside the bands above.
const FALLBACK_POWER: Kilowatts = Kilowatts(2.0);

/// Estimate the climate-control power draw at the given ambient temperature.
///
/// Total over the entire temperature axis: anything outside the defined bands
/// gets the fallback, so the caller never has to handle «no estimate».
pub fn estimate(temperature: Celsius) -> Kilowatts {
    POWER_BANDS
        .iter()
        .find(|(band, _)| band.contains(&temperature.0))
        .map_or(FALLBACK_POWER, |(_, power)| *power)
}
