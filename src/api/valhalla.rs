use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    api::isodistance::{Contour, Geometry, IsodistanceProvider},
    core::position::Coordinates,
    prelude::*,
    quantity::distance::Kilometres,
};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    /// Isochrone generation over a country-sized graph takes a while,
    /// hence the long timeout.
    pub fn new(base_url: Url) -> Result<Self> {
        let client =
            Client::builder().user_agent("roam").timeout(Duration::from_secs(120)).build()?;
        Ok(Self { client, base_url })
    }
}

#[derive(Serialize)]
struct IsochroneRequest {
    locations: [Location; 1],
    costing: &'static str,
    contours: Vec<ContourRequest>,
    polygons: bool,
}

#[derive(Serialize)]
struct Location {
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct ContourRequest {
    distance: f64,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Default, Deserialize)]
struct Properties {
    contour: Option<f64>,
}

impl FeatureCollection {
    /// Contours keyed by the engine's own idea of their distance.
    fn into_contours(self) -> Vec<Contour> {
        self.features
            .into_iter()
            .filter_map(|feature| {
                let distance = Kilometres(feature.properties.contour?);
                Some(Contour { distance, geometry: feature.geometry? })
            })
            .collect()
    }
}

#[async_trait]
impl IsodistanceProvider for Api {
    #[instrument(skip_all, fields(n_distances = distances.len()))]
    async fn get_contours(
        &self,
        origin: Coordinates,
        distances: &[Kilometres],
    ) -> Result<Vec<Contour>> {
        let request = IsochroneRequest {
            locations: [Location { lat: origin.latitude, lon: origin.longitude }],
            costing: "auto",
            contours: distances.iter().map(|distance| ContourRequest { distance: distance.0 }).collect(),
            polygons: true,
        };

        info!(?distances, "requesting the contours…");
        let collection: FeatureCollection = self
            .client
            .post(self.base_url.join("isochrone")?)
            .json(&request)
            .send()
            .await
            .context("failed to reach the isochrone endpoint")?
            .error_for_status()?
            .json()
            .await
            .context("failed to deserialize the isochrone response")?;
        info!(n_features = collection.features.len(), "fetched");

        Ok(collection.into_contours())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contours_from_feature_collection_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r##"
            {
                "features": [
                    {
                        "properties": {"contour": 482.9, "color": "#00e5ff"},
                        "geometry": {"type": "Polygon", "coordinates": [[[0.1, 51.0]]]},
                        "type": "Feature"
                    },
                    {
                        "properties": {},
                        "geometry": {"type": "Point", "coordinates": [0.1, 51.0]},
                        "type": "Feature"
                    },
                    {
                        "properties": {"contour": 120.7},
                        "geometry": null,
                        "type": "Feature"
                    }
                ],
                "type": "FeatureCollection"
            }
        "##;
        let contours = serde_json::from_str::<FeatureCollection>(RESPONSE)?.into_contours();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].distance, Kilometres(482.9));
        assert_eq!(contours[0].geometry["type"], "Polygon");
        Ok(())
    }

    #[test]
    fn empty_feature_collection_ok() -> Result {
        let contours = serde_json::from_str::<FeatureCollection>("{}")?.into_contours();
        assert!(contours.is_empty());
        Ok(())
    }
}
