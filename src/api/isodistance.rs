use async_trait::async_trait;

use crate::{core::position::Coordinates, prelude::*, quantity::distance::Kilometres};

/// Opaque polygon or multipolygon as returned by the routing engine.
/// Only its presence matters to the pipeline; the content is passed through
/// to the output untouched.
pub type Geometry = serde_json::Value;

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub distance: Kilometres,
    pub geometry: Geometry,
}

/// A routing engine that can produce isodistance contours around an origin.
#[async_trait]
pub trait IsodistanceProvider: Sync {
    /// Fetch contours for all the distances in one batched request —
    /// never one call per distance, to bound the engine load.
    async fn get_contours(
        &self,
        origin: Coordinates,
        distances: &[Kilometres],
    ) -> Result<Vec<Contour>>;
}
