use crate::{
    api::{home_assistant, isodistance::IsodistanceProvider, open_weather, valhalla},
    cli::{BurrowIsodistanceArgs, BurrowRangeArgs, BurrowVehicleArgs, BurrowWeatherArgs},
    core::{
        band::{self, ENERGY_BANDS},
        consumption::EnergyModel,
        range::RangeEstimator,
    },
    prelude::*,
    tables::build_bands_table,
};

#[instrument(skip_all)]
pub async fn burrow_vehicle(args: &BurrowVehicleArgs) -> Result {
    let api = home_assistant::Api::try_new(
        &args.home_assistant.access_token,
        args.home_assistant.base_url.clone(),
    )?;
    let vehicle = api.get_vehicle_state(&args.home_assistant.entities).await;
    let (coordinates, source) = api
        .get_position(&args.home_assistant.entities.trackers, args.position.coordinates())
        .await;
    info!(
        ?vehicle.oem_range,
        ?vehicle.odometer,
        ?coordinates,
        ?source,
        "gotcha"
    );
    Ok(())
}

#[instrument(skip_all)]
pub async fn burrow_weather(args: &BurrowWeatherArgs) -> Result {
    let observation = open_weather::Api::new(args.weather.api_key.clone())?
        .get_observation(args.position.coordinates())
        .await;
    info!(
        temperature = %observation.temperature,
        wind_speed = %observation.wind_speed,
        description = observation.description.as_str(),
        icon = observation.icon.as_str(),
        "gotcha"
    );
    Ok(())
}

#[instrument(skip_all)]
pub async fn burrow_isodistance(args: &BurrowIsodistanceArgs) -> Result {
    let contours = valhalla::Api::new(args.isodistance.base_url.clone())?
        .get_contours(args.position.coordinates(), &args.distances)
        .await?;
    for contour in &contours {
        info!(distance = %contour.distance, "contour");
    }
    info!(n_contours = contours.len(), "gotcha");
    Ok(())
}

/// Offline: runs the estimator on explicit conditions, no network involved.
#[instrument(skip_all)]
pub fn burrow_range(args: &BurrowRangeArgs) -> Result {
    let model = EnergyModel::builder()
        .vehicle(args.vehicle)
        .temperature(args.temperature)
        .wind_speed(args.wind_speed)
        .build();
    let estimator = RangeEstimator::builder()
        .model(&model)
        .state_of_charge(args.state_of_charge)
        .state_of_health(args.state_of_health)
        .build();
    info!(cycle_consumption = %estimator.cycle_consumption());
    println!("{}", build_bands_table(&band::plan(&estimator, &ENERGY_BANDS)));
    Ok(())
}
