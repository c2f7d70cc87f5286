use std::time::Instant;

use crate::{
    api::{home_assistant, open_weather, valhalla},
    cli::SurveyArgs,
    core::{
        band::{self, ENERGY_BANDS},
        consumption::EnergyModel,
        range::RangeEstimator,
        reconcile,
    },
    output,
    prelude::*,
    quantity::distance::Kilometres,
    tables::build_bands_table,
};

#[instrument(skip_all)]
pub async fn survey(args: &SurveyArgs) -> Result {
    let started_at = Instant::now();

    let home_assistant = home_assistant::Api::try_new(
        &args.home_assistant.access_token,
        args.home_assistant.base_url.clone(),
    )?;
    let vehicle = home_assistant.get_vehicle_state(&args.home_assistant.entities).await;
    let (origin, position_source) = home_assistant
        .get_position(&args.home_assistant.entities.trackers, args.position.coordinates())
        .await;
    let weather =
        open_weather::Api::new(args.weather.api_key.clone())?.get_observation(origin).await;

    let model = EnergyModel::builder()
        .vehicle(args.vehicle)
        .temperature(weather.temperature)
        .wind_speed(weather.wind_speed)
        .build();
    let estimator = RangeEstimator::builder()
        .model(&model)
        .state_of_charge(vehicle.state_of_charge)
        .state_of_health(vehicle.state_of_health)
        .build();
    let mut bands = band::plan(&estimator, &ENERGY_BANDS);
    for band in &bands {
        info!(label = band.label, range = %band.range, "planned");
    }

    let engine = valhalla::Api::new(args.isodistance.base_url.clone())?;
    reconcile::attach_geometries(&engine, origin, &mut bands).await;
    println!("{}", build_bands_table(&bands));

    let max_range = bands.first().map_or(Kilometres::ZERO, |band| band.range);
    if args.scout {
        info!(%max_range, "scouting, not writing the outputs");
        return Ok(());
    }

    output::write_compact(
        &args.output.geojson_path,
        &output::build_feature_collection(origin, &args.output.vehicle_label, &bands),
    )?;
    let metadata = output::Metadata::builder()
        .vehicle(&vehicle)
        .position(origin)
        .position_source(position_source)
        .weather(&weather)
        .bands(&bands)
        .engine_url(&args.isodistance.base_url)
        .elapsed(started_at.elapsed())
        .build();
    output::write_pretty(&args.output.metadata_path, &metadata)?;

    info!(%max_range, elapsed = ?started_at.elapsed(), "complete");
    Ok(())
}
