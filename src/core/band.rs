use crate::{
    api::isodistance::Geometry,
    core::range::RangeEstimator,
    quantity::distance::Kilometres,
};

/// Static description of one energy band.
pub struct BandDescriptor {
    pub label: &'static str,
    pub fraction: f64,
    pub color: &'static str,
}

/// Descending usable-energy fractions; band 0 is always the full usable
/// range.
pub const ENERGY_BANDS: [BandDescriptor; 4] = [
    BandDescriptor { label: "100%", fraction: 1.00, color: "#00e5ff" },
    BandDescriptor { label: "75%", fraction: 0.75, color: "#00b0ff" },
    BandDescriptor { label: "50%", fraction: 0.50, color: "#2979ff" },
    BandDescriptor { label: "25%", fraction: 0.25, color: "#7c4dff" },
];

/// One computed band: an estimated range, and — once reconciled — the
/// matching reachability contour.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyBand {
    pub label: &'static str,
    pub fraction: f64,
    pub color: &'static str,
    pub range: Kilometres,
    pub geometry: Option<Geometry>,
}

/// Evaluate the estimator once per descriptor, preserving order and count.
/// The bands are independent evaluations, not cumulative ones.
pub fn plan(estimator: &RangeEstimator<'_>, descriptors: &[BandDescriptor]) -> Vec<EnergyBand> {
    descriptors
        .iter()
        .map(|descriptor| EnergyBand {
            label: descriptor.label,
            fraction: descriptor.fraction,
            color: descriptor.color,
            range: estimator.estimate(descriptor.fraction),
            geometry: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::VehicleArgs,
        core::consumption::EnergyModel,
        quantity::{percent::Percent, speed::MetresPerSecond, temperature::Celsius},
    };

    #[test]
    fn order_and_count_preserved() {
        let model = EnergyModel::builder()
            .vehicle(VehicleArgs::polestar_4())
            .temperature(Celsius(15.0))
            .wind_speed(MetresPerSecond::ZERO)
            .build();
        let estimator = RangeEstimator::builder()
            .model(&model)
            .state_of_charge(Percent(80.0))
            .state_of_health(Percent(95.0))
            .build();

        let bands = plan(&estimator, &ENERGY_BANDS);

        assert_eq!(bands.len(), 4);
        assert_eq!(
            bands.iter().map(|band| band.label).collect::<Vec<_>>(),
            ["100%", "75%", "50%", "25%"],
        );
        assert!(bands.windows(2).all(|pair| pair[0].range >= pair[1].range));
        assert!(bands.iter().all(|band| band.range >= Kilometres::ZERO));
        assert!(bands.iter().all(|band| band.geometry.is_none()));
    }
}
