use std::fmt::{Debug, Formatter};

use bon::Builder;

use crate::{
    cli::VehicleArgs,
    core::hvac,
    quantity::{
        consumption::KilowattHoursPerKilometre,
        power::Kilowatts,
        speed::{KilometresPerHour, MetresPerSecond},
        temperature::Celsius,
    },
};

/// Elevation change in metres per kilometre travelled. Positive is uphill.
#[derive(Copy, Clone, PartialEq, derive_more::From)]
pub struct Grade(pub f64);

impl Debug for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.1}m/km", self.0)
    }
}

const GRAVITY: f64 = 9.81;

/// The drivetrain never draws less than this: pumps, electronics and the BMS
/// are always on.
const POWER_FLOOR: Kilowatts = Kilowatts(0.5);

/// Steady-state consumption model for one set of ambient conditions.
#[derive(Builder)]
pub struct EnergyModel {
    vehicle: VehicleArgs,
    temperature: Celsius,
    wind_speed: MetresPerSecond,
}

impl EnergyModel {
    pub const fn vehicle(&self) -> &VehicleArgs {
        &self.vehicle
    }

    /// Energy drawn per kilometre at a constant speed over the given grade.
    ///
    /// Undefined at standstill: the caller must pass a positive speed.
    pub fn consumption(
        &self,
        speed: KilometresPerHour,
        grade: Grade,
    ) -> KilowattHoursPerKilometre {
        debug_assert!(speed > KilometresPerHour::ZERO);

        let velocity = MetresPerSecond::from(speed);
        // Wind partially, not fully, opposes motion:
        let effective_velocity = velocity + self.wind_speed * 0.5;

        // Forces in newtons:
        let aerodynamic = 0.5
            * self.vehicle.air_density
            * self.vehicle.drag_coefficient
            * self.vehicle.frontal_area
            * effective_velocity.0.powi(2);
        let rolling = self.vehicle.rolling_resistance * self.vehicle.mass * GRAVITY;
        let climbing = self.vehicle.mass * GRAVITY * (grade.0 / 1000.0);

        // Only the uphill component propels; downhill feeds regeneration instead:
        let propulsive = aerodynamic + rolling + climbing.max(0.0);
        let recovered = if climbing < 0.0 {
            Kilowatts(climbing.abs() * velocity.0 * self.vehicle.regen_efficiency / 1000.0)
        } else {
            Kilowatts::ZERO
        };

        let mechanical = Kilowatts(propulsive * velocity.0 / 1000.0);
        let electrical = mechanical / self.vehicle.drivetrain_efficiency;
        let climate = hvac::estimate(self.temperature);

        let total = (electrical + climate + self.vehicle.auxiliary_power - recovered)
            .max(POWER_FLOOR);
        total / speed
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn model(temperature: Celsius, wind_speed: MetresPerSecond) -> EnergyModel {
        EnergyModel::builder()
            .vehicle(VehicleArgs::polestar_4())
            .temperature(temperature)
            .wind_speed(wind_speed)
            .build()
    }

    #[test]
    fn mild_cruise_ok() {
        let consumption = model(Celsius(15.0), MetresPerSecond::ZERO)
            .consumption(KilometresPerHour(60.0), Grade(5.0));
        assert_relative_eq!(consumption.0, 0.153_406_416, epsilon = 1e-9);
    }

    #[test]
    fn always_strictly_positive() {
        // Steep descent: regeneration would make the net power negative
        // without the floor.
        let consumption = model(Celsius(15.0), MetresPerSecond::ZERO)
            .consumption(KilometresPerHour(60.0), Grade(-50.0));
        assert_relative_eq!(consumption.0, 0.5 / 60.0, epsilon = 1e-12);
        assert!(consumption > KilowattHoursPerKilometre::ZERO);
    }

    #[test]
    fn downhill_recovers_some_energy() {
        let model = model(Celsius(15.0), MetresPerSecond::ZERO);
        let flat = model.consumption(KilometresPerHour(60.0), Grade(0.0));
        let downhill = model.consumption(KilometresPerHour(60.0), Grade(-10.0));
        assert!(downhill < flat);
        assert!(downhill > KilowattHoursPerKilometre::ZERO);
    }

    #[test]
    fn headwind_increases_consumption() {
        let calm = model(Celsius(15.0), MetresPerSecond::ZERO)
            .consumption(KilometresPerHour(100.0), Grade(0.0));
        let windy = model(Celsius(15.0), MetresPerSecond(10.0))
            .consumption(KilometresPerHour(100.0), Grade(0.0));
        assert!(windy > calm);
    }

    #[test]
    fn speed_increases_consumption() {
        let model = model(Celsius(15.0), MetresPerSecond::ZERO);
        let moderate = model.consumption(KilometresPerHour(60.0), Grade(0.0));
        let fast = model.consumption(KilometresPerHour(130.0), Grade(0.0));
        assert!(fast > moderate);
    }

    #[test]
    fn climbing_increases_consumption() {
        let model = model(Celsius(15.0), MetresPerSecond::ZERO);
        let flat = model.consumption(KilometresPerHour(60.0), Grade(0.0));
        let uphill = model.consumption(KilometresPerHour(60.0), Grade(10.0));
        assert!(uphill > flat);
    }

    #[test]
    fn cold_weather_increases_consumption() {
        let mild = model(Celsius(15.0), MetresPerSecond::ZERO)
            .consumption(KilometresPerHour(60.0), Grade(0.0));
        let cold = model(Celsius(-15.0), MetresPerSecond::ZERO)
            .consumption(KilometresPerHour(60.0), Grade(0.0));
        assert!(cold > mild);
    }
}
