use bon::Builder;

use crate::{
    core::consumption::{EnergyModel, Grade},
    quantity::{
        consumption::KilowattHoursPerKilometre,
        distance::Kilometres,
        energy::KilowattHours,
        percent::Percent,
        speed::KilometresPerHour,
    },
};

struct CycleSegment {
    speed: KilometresPerHour,
    grade: Grade,
    weight: f64,
}

/// Hand-tuned urban/highway/motorway mix standing in for a full
/// driving-profile simulation. The weights sum to 1.
const MIXED_CYCLE: [CycleSegment; 3] = [
    CycleSegment { speed: KilometresPerHour(35.0), grade: Grade(2.0), weight: 0.40 },
    CycleSegment { speed: KilometresPerHour(60.0), grade: Grade(5.0), weight: 0.40 },
    CycleSegment { speed: KilometresPerHour(100.0), grade: Grade(3.0), weight: 0.20 },
];

/// Turns battery state into an achievable distance under the model's
/// ambient conditions.
#[derive(Builder)]
pub struct RangeEstimator<'a> {
    model: &'a EnergyModel,
    state_of_charge: Percent,
    state_of_health: Percent,
}

impl RangeEstimator<'_> {
    /// Weighted mixed-cycle consumption under the current conditions.
    pub fn cycle_consumption(&self) -> KilowattHoursPerKilometre {
        MIXED_CYCLE
            .iter()
            .map(|segment| self.model.consumption(segment.speed, segment.grade) * segment.weight)
            .sum()
    }

    /// Energy available for driving at the given usable-energy fraction.
    ///
    /// The reserve buffer is withheld first: range is never advertised into
    /// the last few percent of charge.
    fn usable_energy(&self, energy_fraction: f64) -> KilowattHours {
        let vehicle = self.model.vehicle();
        let usable_charge = (self.state_of_charge - vehicle.reserve_soc).max(Percent::ZERO);
        vehicle.battery_capacity
            * self.state_of_health.to_proportion()
            * usable_charge.to_proportion()
            * energy_fraction
    }

    /// Estimated range at the given usable-energy fraction, never negative.
    pub fn estimate(&self, energy_fraction: f64) -> Kilometres {
        let cycle_consumption = self.cycle_consumption();
        if cycle_consumption > KilowattHoursPerKilometre::ZERO {
            (self.usable_energy(energy_fraction) / cycle_consumption).max(Kilometres::ZERO)
        } else {
            Kilometres::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        cli::VehicleArgs,
        quantity::{speed::MetresPerSecond, temperature::Celsius},
    };

    fn mild_day() -> EnergyModel {
        EnergyModel::builder()
            .vehicle(VehicleArgs::polestar_4())
            .temperature(Celsius(15.0))
            .wind_speed(MetresPerSecond::ZERO)
            .build()
    }

    fn estimator(model: &EnergyModel, state_of_charge: Percent) -> RangeEstimator<'_> {
        RangeEstimator::builder()
            .model(model)
            .state_of_charge(state_of_charge)
            .state_of_health(Percent(95.0))
            .build()
    }

    /// Golden regression pinned to the fixed physical constants.
    #[test]
    fn golden_range_ok() {
        let model = mild_day();
        let estimator = estimator(&model, Percent(80.0));
        assert_relative_eq!(estimator.cycle_consumption().0, 0.147_541_451, epsilon = 1e-9);
        assert_relative_eq!(estimator.estimate(1.0).0, 482.915_136, epsilon = 1e-6);
    }

    #[test]
    fn reserve_is_withheld() {
        let model = mild_day();
        assert_eq!(estimator(&model, Percent(5.0)).estimate(1.0), Kilometres::ZERO);
        assert_eq!(estimator(&model, Percent(3.0)).estimate(1.0), Kilometres::ZERO);
    }

    #[test]
    fn monotone_in_energy_fraction() {
        let model = mild_day();
        let estimator = estimator(&model, Percent(80.0));
        let ranges: Vec<_> =
            [1.00, 0.75, 0.50, 0.25].map(|fraction| estimator.estimate(fraction)).to_vec();
        assert!(ranges.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_relative_eq!(ranges[3].0 * 4.0, ranges[0].0, epsilon = 1e-9);
    }
}
