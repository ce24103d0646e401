mod alerts;
mod cache;
mod chart;
mod config;
mod error;
mod event_weather;
mod forecast;
mod imagery;
mod observations;
mod types;
mod upstream;
mod utils;

pub use error::EventWeatherError;
pub use event_weather::*;

pub use config::{AdverseThresholds, ConfigError, EventConfig};

pub use types::compass::CompassPoint;
pub use types::forecast_field::ForecastField;
pub use types::hourly_point::HourlyPoint;
pub use types::raw_series::{RawFieldSeries, RawFieldValue};

pub use forecast::conversions::*;
pub use forecast::duration::parse_iso_duration;
pub use forecast::hourly_forecast::HourlyForecast;
pub use forecast::resampler::{
    anchor_hour, expand_to_hourly, hourly_slots, resample, truncate_to_hour, AnchorPolicy, HOURS,
};

pub use chart::chart_spec::*;
pub use chart::renderer::{event_marker_fraction, render_chart, RenderedChart};
pub use chart::scale::YScale;
pub use chart::svg::escape_text;
pub use chart::timeline::{build_timeline, tick_labels, Timeline, TimelineRow};

pub use observations::current_conditions::{describe_cloud_layer, feels_like, CurrentConditions};
pub use observations::nearest_station::{nearest_station, ObservationStation};

pub use alerts::{ActiveAlerts, Alert};

pub use imagery::radar::{parse_time_dimension, RadarFrames, RADAR_LAYER, RADAR_STYLE};
pub use imagery::satellite::{parse_realearth_time, SatelliteChannel, SatelliteFrames};

pub use cache::disk_cache::DiskCache;
pub use cache::error::CacheError;
pub use cache::memory_cache::MemoryCache;

pub use upstream::client::NwsClient;
pub use upstream::error::UpstreamError;
pub use upstream::models::{AlertCollection, GridPoint, StationCollection};
