use itertools::Itertools;

use crate::{
    api::isodistance::{Contour, Geometry, IsodistanceProvider},
    core::{band::EnergyBand, position::Coordinates},
    prelude::*,
    quantity::distance::Kilometres,
};

/// The engine is free to round or quantize contour distances: accept the
/// first returned contour within this distance of the request.
pub const MATCH_TOLERANCE: Kilometres = Kilometres(1.0);

/// Contours shorter than this are not worth requesting.
pub const MIN_VIABLE_RANGE: Kilometres = Kilometres(1.0);

/// Fetch the contours for all viable bands in one batched request and attach
/// each matching geometry to its band.
///
/// Any engine failure degrades to bands without geometry — the numeric
/// ranges are the primary result and must survive regardless.
#[instrument(skip_all, fields(n_bands = bands.len()))]
pub async fn attach_geometries(
    provider: &dyn IsodistanceProvider,
    origin: Coordinates,
    bands: &mut [EnergyBand],
) {
    let requested = bands
        .iter()
        .filter(|band| band.range >= MIN_VIABLE_RANGE)
        .map(|band| band.range.round_to_tenth())
        .collect_vec();
    if requested.is_empty() {
        info!("no band is long enough to map");
        return;
    }

    let contours = match provider.get_contours(origin, &requested).await {
        Ok(contours) => contours,
        Err(error) => {
            warn!("isodistance request failed: {error:#}");
            Vec::new()
        }
    };

    let mut geometries = match_contours(&requested, &contours).into_iter();
    for band in bands.iter_mut().filter(|band| band.range >= MIN_VIABLE_RANGE) {
        band.geometry = geometries.next().flatten();
    }
}

/// Pair each requested distance with the first returned contour within
/// [`MATCH_TOLERANCE`]. The scan follows the engine's response order, which
/// keeps re-runs over the same response reproducible.
fn match_contours(requested: &[Kilometres], contours: &[Contour]) -> Vec<Option<Geometry>> {
    requested
        .iter()
        .map(|&distance| {
            contours
                .iter()
                .find(|contour| (contour.distance - distance).abs() < MATCH_TOLERANCE)
                .map(|contour| contour.geometry.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    struct FixedEngine(Vec<Contour>);

    #[async_trait]
    impl IsodistanceProvider for FixedEngine {
        async fn get_contours(
            &self,
            _origin: Coordinates,
            _distances: &[Kilometres],
        ) -> Result<Vec<Contour>> {
            Ok(self.0.clone())
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl IsodistanceProvider for FailingEngine {
        async fn get_contours(
            &self,
            _origin: Coordinates,
            _distances: &[Kilometres],
        ) -> Result<Vec<Contour>> {
            bail!("connection refused");
        }
    }

    fn origin() -> Coordinates {
        Coordinates { latitude: 51.3656, longitude: -0.4139 }
    }

    fn band(range: Kilometres) -> EnergyBand {
        EnergyBand { label: "100%", fraction: 1.0, color: "#00e5ff", range, geometry: None }
    }

    fn contour(distance: f64) -> Contour {
        Contour {
            distance: Kilometres(distance),
            geometry: json!({"type": "Polygon", "coordinates": []}),
        }
    }

    #[tokio::test]
    async fn rounded_distance_matches_within_tolerance() {
        let engine = FixedEngine(vec![contour(150.3)]);
        let mut bands = [band(Kilometres(150.0))];
        attach_geometries(&engine, origin(), &mut bands).await;
        assert!(bands[0].geometry.is_some());
    }

    #[tokio::test]
    async fn distant_contour_does_not_match() {
        let engine = FixedEngine(vec![contour(50.0)]);
        let mut bands = [band(Kilometres(10.0))];
        attach_geometries(&engine, origin(), &mut bands).await;
        assert!(bands[0].geometry.is_none());
    }

    #[tokio::test]
    async fn engine_failure_degrades_to_absent_geometries() {
        let mut bands = [band(Kilometres(400.0)), band(Kilometres(100.0))];
        attach_geometries(&FailingEngine, origin(), &mut bands).await;
        assert!(bands.iter().all(|band| band.geometry.is_none()));
        assert_eq!(bands[0].range, Kilometres(400.0));
    }

    #[tokio::test]
    async fn short_band_is_not_requested() {
        // The engine is never called for a sub-kilometre band, so even a
        // failing one must not matter.
        let mut bands = [band(Kilometres(0.4))];
        attach_geometries(&FailingEngine, origin(), &mut bands).await;
        assert!(bands[0].geometry.is_none());
    }

    #[tokio::test]
    async fn reconciliation_is_idempotent() {
        let engine = FixedEngine(vec![contour(400.1), contour(100.0)]);
        let mut first = [band(Kilometres(400.0)), band(Kilometres(100.2)), band(Kilometres(0.5))];
        let mut second = first.clone();
        attach_geometries(&engine, origin(), &mut first).await;
        attach_geometries(&engine, origin(), &mut second).await;
        assert_eq!(first, second);
        assert!(first[0].geometry.is_some());
        assert!(first[1].geometry.is_some());
        assert!(first[2].geometry.is_none());
    }

    #[test]
    fn match_is_deterministic_on_near_ties() {
        let contours = [contour(100.4), contour(99.8)];
        let first = match_contours(&[Kilometres(100.0)], &contours);
        let second = match_contours(&[Kilometres(100.0)], &contours);
        assert_eq!(first, second);
        assert_eq!(first[0], Some(contours[0].geometry.clone()));
    }
}
