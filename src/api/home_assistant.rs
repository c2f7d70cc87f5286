use std::{str::FromStr, time::Duration};

use http::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    cli::VehicleEntities,
    core::{
        position::{Coordinates, PositionSource},
        vehicle::{DEFAULT_STATE_OF_CHARGE, DEFAULT_STATE_OF_HEALTH, VehicleState},
    },
    prelude::*,
    quantity::{distance::Kilometres, percent::Percent},
};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(access_token: &str, base_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.append("Authorization", HeaderValue::from_str(&format!("Bearer {access_token}"))?);
        let client = Client::builder()
            .user_agent("roam")
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch an entity state, treating `unknown` and `unavailable` as absent.
    #[instrument(skip_all, fields(entity_id = entity_id))]
    async fn get_state(&self, entity_id: &str) -> Result<Option<EntityState>> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL"))?
            .push("api")
            .push("states")
            .push(entity_id);
        let state: EntityState =
            self.client.get(url).send().await?.error_for_status()?.json().await?;
        Ok(state.is_present().then_some(state))
    }

    /// Same, but degrade any failure to an absent state with a warning —
    /// a telemetry gap must not abort the run.
    async fn try_get_state(&self, entity_id: &str) -> Option<EntityState> {
        match self.get_state(entity_id).await {
            Ok(state) => state,
            Err(error) => {
                warn!(entity_id, "failed to read the entity: {error:#}");
                None
            }
        }
    }

    async fn get_value<T: FromStr>(&self, entity_id: &str) -> Option<T> {
        let state = self.try_get_state(entity_id).await?;
        match state.value.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(entity_id, value = state.value.as_str(), "the state is not numeric");
                None
            }
        }
    }

    /// Read the vehicle telemetry, substituting defaults for whatever is
    /// missing, so that the model always gets a fully defined state.
    #[instrument(skip_all)]
    pub async fn get_vehicle_state(&self, entities: &VehicleEntities) -> VehicleState {
        let state = VehicleState {
            state_of_charge: self
                .get_value(&entities.state_of_charge)
                .await
                .map_or(DEFAULT_STATE_OF_CHARGE, Percent),
            state_of_health: self
                .get_value(&entities.state_of_health)
                .await
                .map_or(DEFAULT_STATE_OF_HEALTH, Percent),
            oem_range: self.get_value(&entities.oem_range).await.map(Kilometres),
            odometer: self.get_value(&entities.odometer).await.map(Kilometres),
            charging_status: self
                .try_get_state(&entities.charging_status)
                .await
                .map_or_else(|| "Unknown".to_string(), |state| state.value),
        };
        info!(
            state_of_charge = %state.state_of_charge,
            state_of_health = %state.state_of_health,
            charging_status = state.charging_status.as_str(),
            "fetched the vehicle state"
        );
        state
    }

    /// Scan the device trackers for a GPS fix, falling back to the
    /// configured default position.
    #[instrument(skip_all)]
    pub async fn get_position(
        &self,
        trackers: &[String],
        fallback: Coordinates,
    ) -> (Coordinates, PositionSource) {
        for entity_id in trackers {
            let Some(state) = self.try_get_state(entity_id).await else {
                continue;
            };
            // Zone states carry no precise fix:
            if matches!(state.value.as_str(), "home" | "not_home") {
                continue;
            }
            if let (Some(latitude), Some(longitude)) =
                (state.attributes.latitude, state.attributes.longitude)
            {
                let coordinates = Coordinates { latitude, longitude };
                info!(entity_id = entity_id.as_str(), ?coordinates, "got a GPS fix");
                return (coordinates, PositionSource::Gps);
            }
        }
        info!(?fallback, "no GPS fix, using the default position");
        (fallback, PositionSource::Default)
    }
}

#[must_use]
#[derive(Deserialize)]
pub struct EntityState {
    #[serde(rename = "state")]
    pub value: String,

    #[serde(default)]
    pub attributes: Attributes,
}

impl EntityState {
    fn is_present(&self) -> bool {
        !matches!(self.value.as_str(), "unknown" | "unavailable")
    }
}

#[must_use]
#[derive(Default, Deserialize)]
pub struct Attributes {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
