mod burrow;
mod survey;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{
    burrow::{burrow_isodistance, burrow_range, burrow_vehicle, burrow_weather},
    survey::survey,
};
use crate::{
    core::position::Coordinates,
    quantity::{
        distance::Kilometres,
        energy::KilowattHours,
        percent::Percent,
        power::Kilowatts,
        speed::MetresPerSecond,
        temperature::Celsius,
    },
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch the telemetry and the weather, estimate the range,
    /// and map the reachable area.
    #[clap(name = "survey")]
    Survey(Box<SurveyArgs>),

    /// Development tools.
    #[clap(name = "burrow")]
    Burrow(Box<BurrowArgs>),
}

#[derive(Parser)]
pub struct SurveyArgs {
    /// Estimate and print only, do not write the output files (dry run).
    #[clap(long)]
    pub scout: bool,

    #[clap(flatten)]
    pub home_assistant: HomeAssistantArgs,

    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(flatten)]
    pub isodistance: IsodistanceArgs,

    #[clap(flatten)]
    pub vehicle: VehicleArgs,

    #[clap(flatten)]
    pub position: PositionArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct HomeAssistantArgs {
    /// Home Assistant API access token.
    #[clap(long = "home-assistant-access-token", env = "HOME_ASSISTANT_ACCESS_TOKEN")]
    pub access_token: String,

    /// Home Assistant base URL. For example: `http://localhost:8123`.
    #[clap(
        long = "home-assistant-url",
        env = "HOME_ASSISTANT_URL",
        default_value = "http://localhost:8123"
    )]
    pub base_url: Url,

    #[clap(flatten)]
    pub entities: VehicleEntities,
}

#[derive(Parser)]
pub struct VehicleEntities {
    #[clap(
        long = "state-of-charge-entity",
        env = "STATE_OF_CHARGE_ENTITY",
        default_value = "sensor.polestar_battery_charge_level"
    )]
    pub state_of_charge: String,

    #[clap(
        long = "state-of-health-entity",
        env = "STATE_OF_HEALTH_ENTITY",
        default_value = "sensor.battery_health_estimate"
    )]
    pub state_of_health: String,

    #[clap(
        long = "oem-range-entity",
        env = "OEM_RANGE_ENTITY",
        default_value = "sensor.polestar_estimated_range"
    )]
    pub oem_range: String,

    #[clap(
        long = "odometer-entity",
        env = "ODOMETER_ENTITY",
        default_value = "sensor.polestar_current_odometer"
    )]
    pub odometer: String,

    #[clap(
        long = "charging-status-entity",
        env = "CHARGING_STATUS_ENTITY",
        default_value = "sensor.polestar_charging_status"
    )]
    pub charging_status: String,

    /// Device trackers to scan for a GPS fix, in order of preference.
    #[clap(
        long = "tracker-entities",
        env = "TRACKER_ENTITIES",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "device_tracker.polestar"
    )]
    pub trackers: Vec<String>,
}

#[derive(Parser)]
pub struct WeatherArgs {
    /// OpenWeatherMap API key; without one, default weather is assumed.
    #[clap(long = "owm-api-key", env = "OWM_API_KEY")]
    pub api_key: Option<String>,
}

#[derive(Parser)]
pub struct IsodistanceArgs {
    /// Valhalla base URL.
    #[clap(long = "valhalla-url", env = "VALHALLA_URL", default_value = "http://localhost:8002")]
    pub base_url: Url,
}

/// Physical profile of the vehicle. The defaults describe a Polestar 4.
#[derive(Copy, Clone, Parser)]
pub struct VehicleArgs {
    /// Kerb mass in kilograms.
    #[clap(long = "vehicle-mass-kg", env = "VEHICLE_MASS_KG", default_value = "2435.0")]
    pub mass: f64,

    #[clap(long = "drag-coefficient", env = "DRAG_COEFFICIENT", default_value = "0.28")]
    pub drag_coefficient: f64,

    /// Frontal area in square metres.
    #[clap(long = "frontal-area-m2", env = "FRONTAL_AREA_M2", default_value = "2.62")]
    pub frontal_area: f64,

    #[clap(long = "rolling-resistance", env = "ROLLING_RESISTANCE", default_value = "0.009")]
    pub rolling_resistance: f64,

    /// Air density in kg/m³.
    #[clap(long = "air-density", env = "AIR_DENSITY", default_value = "1.225")]
    pub air_density: f64,

    /// Electrical-to-mechanical conversion efficiency, below 1.
    #[clap(long = "drivetrain-efficiency", env = "DRIVETRAIN_EFFICIENCY", default_value = "0.90")]
    pub drivetrain_efficiency: f64,

    /// Fraction of the downhill energy recovered back into the battery.
    #[clap(long = "regen-efficiency", env = "REGEN_EFFICIENCY", default_value = "0.65")]
    pub regen_efficiency: f64,

    /// Accessory draw in kilowatts, on top of propulsion and climate.
    #[clap(long = "auxiliary-power-kw", env = "AUX_POWER_KW", default_value = "0.4")]
    pub auxiliary_power: Kilowatts,

    /// Nameplate battery capacity in kilowatt-hours.
    #[clap(long = "battery-capacity-kwh", env = "BATTERY_CAPACITY_KWH", default_value = "100.0")]
    pub battery_capacity: KilowattHours,

    /// Charge percentage always withheld as a safety buffer.
    #[clap(long = "reserve-soc-percent", env = "RESERVE_SOC_PCT", default_value = "5.0")]
    pub reserve_soc: Percent,
}

#[cfg(test)]
impl VehicleArgs {
    /// The default profile, mirroring the clap defaults above.
    pub fn polestar_4() -> Self {
        Self {
            mass: 2435.0,
            drag_coefficient: 0.28,
            frontal_area: 2.62,
            rolling_resistance: 0.009,
            air_density: 1.225,
            drivetrain_efficiency: 0.90,
            regen_efficiency: 0.65,
            auxiliary_power: Kilowatts(0.4),
            battery_capacity: KilowattHours(100.0),
            reserve_soc: Percent(5.0),
        }
    }
}

#[derive(Copy, Clone, Parser)]
pub struct PositionArgs {
    /// Assumed latitude when no tracker has a GPS fix.
    #[clap(
        long = "default-latitude",
        env = "DEFAULT_LAT",
        default_value = "51.3656",
        allow_hyphen_values = true
    )]
    pub latitude: f64,

    /// Assumed longitude when no tracker has a GPS fix.
    #[clap(
        long = "default-longitude",
        env = "DEFAULT_LON",
        default_value = "-0.4139",
        allow_hyphen_values = true
    )]
    pub longitude: f64,
}

impl PositionArgs {
    pub const fn coordinates(self) -> Coordinates {
        Coordinates { latitude: self.latitude, longitude: self.longitude }
    }
}

#[derive(Parser)]
pub struct OutputArgs {
    #[clap(long = "geojson-path", env = "GEOJSON_PATH", default_value = "range_contour.json")]
    pub geojson_path: PathBuf,

    #[clap(long = "metadata-path", env = "METADATA_PATH", default_value = "range_metadata.json")]
    pub metadata_path: PathBuf,

    /// Label for the vehicle point in the GeoJSON output.
    #[clap(long = "vehicle-label", env = "VEHICLE_LABEL", default_value = "Polestar 4")]
    pub vehicle_label: String,
}

#[derive(Parser)]
pub struct BurrowArgs {
    #[command(subcommand)]
    pub command: BurrowCommand,
}

#[derive(Subcommand)]
pub enum BurrowCommand {
    /// Probe the vehicle telemetry and position.
    Vehicle(BurrowVehicleArgs),

    /// Probe the weather service.
    Weather(BurrowWeatherArgs),

    /// Request isodistance contours for explicit distances.
    Isodistance(BurrowIsodistanceArgs),

    /// Estimate the range offline from explicit conditions.
    Range(BurrowRangeArgs),
}

#[derive(Parser)]
pub struct BurrowVehicleArgs {
    #[clap(flatten)]
    pub home_assistant: HomeAssistantArgs,

    #[clap(flatten)]
    pub position: PositionArgs,
}

#[derive(Parser)]
pub struct BurrowWeatherArgs {
    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(flatten)]
    pub position: PositionArgs,
}

#[derive(Parser)]
pub struct BurrowIsodistanceArgs {
    #[clap(flatten)]
    pub isodistance: IsodistanceArgs,

    #[clap(flatten)]
    pub position: PositionArgs,

    /// Contour distances in kilometres.
    #[clap(long, value_delimiter = ',', num_args = 1..)]
    pub distances: Vec<Kilometres>,
}

#[derive(Parser)]
pub struct BurrowRangeArgs {
    #[clap(flatten)]
    pub vehicle: VehicleArgs,

    #[clap(long = "state-of-charge", default_value = "80.0")]
    pub state_of_charge: Percent,

    #[clap(long = "state-of-health", default_value = "95.0")]
    pub state_of_health: Percent,

    /// Ambient temperature in °C.
    #[clap(long, default_value = "15.0", allow_hyphen_values = true)]
    pub temperature: Celsius,

    /// Wind speed in m/s.
    #[clap(long = "wind-speed", default_value = "0.0")]
    pub wind_speed: MetresPerSecond,
}
