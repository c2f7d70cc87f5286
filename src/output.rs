use std::{fs, path::Path, time::Duration};

use bon::bon;
use chrono::{DateTime, Local};
use reqwest::Url;
use serde::Serialize;
use serde_with::serde_as;

use crate::{
    api::isodistance::Geometry,
    core::{
        band::EnergyBand,
        position::{Coordinates, PositionSource},
        vehicle::VehicleState,
        weather::Observation,
    },
    prelude::*,
    quantity::{
        distance::{Kilometres, Miles},
        percent::Percent,
        speed::MetresPerSecond,
        temperature::Celsius,
    },
};

/// GeoJSON document for the dashboard map card: one polygon per mapped band
/// plus the vehicle itself as a point.
#[must_use]
#[derive(Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    collection_type: &'static str,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    properties: Properties,
    geometry: Geometry,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Properties {
    Band {
        band: &'static str,
        range_km: f64,
        range_miles: f64,
        color: &'static str,
        fraction: f64,
    },

    Vehicle {
        #[serde(rename = "type")]
        marker_type: &'static str,
        label: String,
    },
}

fn tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn build_feature_collection(
    origin: Coordinates,
    vehicle_label: &str,
    bands: &[EnergyBand],
) -> FeatureCollection {
    let mut features: Vec<Feature> = bands
        .iter()
        .filter_map(|band| {
            let geometry = band.geometry.clone()?;
            Some(Feature {
                feature_type: "Feature",
                properties: Properties::Band {
                    band: band.label,
                    range_km: tenth(band.range.0),
                    range_miles: tenth(Miles::from(band.range).0),
                    color: band.color,
                    fraction: band.fraction,
                },
                geometry,
            })
        })
        .collect();
    features.push(Feature {
        feature_type: "Feature",
        properties: Properties::Vehicle {
            marker_type: "vehicle",
            label: vehicle_label.to_string(),
        },
        geometry: serde_json::json!({
            "type": "Point",
            "coordinates": [origin.longitude, origin.latitude],
        }),
    });
    FeatureCollection { collection_type: "FeatureCollection", features }
}

/// Run summary for dashboards and debugging, written next to the GeoJSON.
#[must_use]
#[derive(Serialize)]
pub struct Metadata {
    timestamp: DateTime<Local>,
    version: &'static str,
    vehicle: VehicleBlock,
    position: PositionBlock,
    weather: WeatherBlock,
    range: RangeBlock,
    calculation: CalculationBlock,
}

#[derive(Serialize)]
struct VehicleBlock {
    soc_pct: Percent,
    soh_pct: Percent,
    oem_range_km: Option<Kilometres>,
    odometer_km: Option<Kilometres>,
    charging_status: String,
}

#[derive(Serialize)]
struct PositionBlock {
    lat: f64,
    lon: f64,
    source: PositionSource,
}

#[derive(Serialize)]
struct WeatherBlock {
    temp_c: Celsius,
    wind_ms: MetresPerSecond,
    description: String,
    icon: String,
}

#[derive(Serialize)]
struct RangeBlock {
    intelligent_range_km: f64,
    intelligent_range_miles: f64,
    bands: Vec<BandSummary>,
}

#[derive(Serialize)]
struct BandSummary {
    label: &'static str,
    range_km: f64,
    range_miles: f64,
    color: &'static str,
    has_polygon: bool,
}

#[serde_as]
#[derive(Serialize)]
struct CalculationBlock {
    method: &'static str,
    energy_model: &'static str,
    engine_url: String,

    #[serde_as(as = "serde_with::DurationSecondsWithFrac<f64>")]
    duration: Duration,
}

#[bon]
impl Metadata {
    #[builder]
    pub fn new(
        vehicle: &VehicleState,
        position: Coordinates,
        position_source: PositionSource,
        weather: &Observation,
        bands: &[EnergyBand],
        engine_url: &Url,
        elapsed: Duration,
    ) -> Self {
        let max_range = bands.first().map_or(Kilometres::ZERO, |band| band.range);
        Self {
            timestamp: Local::now(),
            version: env!("CARGO_PKG_VERSION"),
            vehicle: VehicleBlock {
                soc_pct: vehicle.state_of_charge,
                soh_pct: vehicle.state_of_health,
                oem_range_km: vehicle.oem_range,
                odometer_km: vehicle.odometer,
                charging_status: vehicle.charging_status.clone(),
            },
            position: PositionBlock {
                lat: position.latitude,
                lon: position.longitude,
                source: position_source,
            },
            weather: WeatherBlock {
                temp_c: weather.temperature,
                wind_ms: weather.wind_speed,
                description: weather.description.clone(),
                icon: weather.icon.clone(),
            },
            range: RangeBlock {
                intelligent_range_km: tenth(max_range.0),
                intelligent_range_miles: tenth(Miles::from(max_range).0),
                bands: bands
                    .iter()
                    .map(|band| BandSummary {
                        label: band.label,
                        range_km: tenth(band.range.0),
                        range_miles: tenth(Miles::from(band.range).0),
                        color: band.color,
                        has_polygon: band.geometry.is_some(),
                    })
                    .collect(),
            },
            calculation: CalculationBlock {
                method: "valhalla_isodistance",
                energy_model: "physics_mixed_driving",
                engine_url: engine_url.to_string(),
                duration: elapsed,
            },
        }
    }
}

/// Compact: the map card fetches this on every refresh.
pub fn write_compact(path: &Path, document: &impl Serialize) -> Result {
    write(path, serde_json::to_string(document)?)
}

/// Pretty-printed: meant for humans peeking at the run.
pub fn write_pretty(path: &Path, document: &impl Serialize) -> Result {
    write(path, serde_json::to_string_pretty(document)?)
}

fn write(path: &Path, contents: String) -> Result {
    fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), "written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bands() -> Vec<EnergyBand> {
        vec![
            EnergyBand {
                label: "100%",
                fraction: 1.0,
                color: "#00e5ff",
                range: Kilometres(482.915_136),
                geometry: Some(json!({"type": "Polygon", "coordinates": []})),
            },
            EnergyBand {
                label: "75%",
                fraction: 0.75,
                color: "#00b0ff",
                range: Kilometres(362.186_352),
                geometry: None,
            },
        ]
    }

    #[test]
    fn feature_collection_ok() -> Result {
        let origin = Coordinates { latitude: 51.3656, longitude: -0.4139 };
        let collection =
            serde_json::to_value(build_feature_collection(origin, "Polestar 4", &bands()))?;

        assert_eq!(collection["type"], "FeatureCollection");
        // The geometry-less band is skipped, the vehicle point is appended:
        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"]["band"], "100%");
        assert_eq!(features[0]["properties"]["range_km"], 482.9);
        assert_eq!(features[1]["properties"]["type"], "vehicle");
        assert_eq!(features[1]["geometry"]["coordinates"], json!([-0.4139, 51.3656]));
        Ok(())
    }

    #[test]
    fn metadata_ok() -> Result {
        let metadata = Metadata::builder()
            .vehicle(&VehicleState::default())
            .position(Coordinates { latitude: 51.3656, longitude: -0.4139 })
            .position_source(PositionSource::Default)
            .weather(&Observation::default())
            .bands(&bands())
            .engine_url(&Url::parse("http://localhost:8002")?)
            .elapsed(Duration::from_millis(2500))
            .build();
        let metadata = serde_json::to_value(&metadata)?;

        assert_eq!(metadata["vehicle"]["soc_pct"], 80.0);
        assert_eq!(metadata["position"]["source"], "default");
        assert_eq!(metadata["range"]["intelligent_range_km"], 482.9);
        assert_eq!(metadata["range"]["bands"][0]["has_polygon"], true);
        assert_eq!(metadata["range"]["bands"][1]["has_polygon"], false);
        assert_eq!(metadata["calculation"]["duration"], 2.5);
        Ok(())
    }
}
