//! Serde models for the slices of the api.weather.gov GeoJSON responses this crate reads.
//! Everything not listed here is ignored by serde.

use crate::types::forecast_field::ForecastField;
use crate::types::raw_series::{RawFieldSeries, RawFieldValue};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

// --- /points/{lat},{lon} ---

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: GridPoint,
}

/// The forecast grid cell and related endpoints covering a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPoint {
    /// Forecast office identifier, e.g. `"MTR"`.
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    pub forecast: Option<String>,
    pub forecast_hourly: Option<String>,
    /// URL listing the observation stations for this grid cell.
    pub observation_stations: String,
}

// --- /gridpoints/{wfo}/{x},{y} ---

#[derive(Debug, Deserialize)]
pub struct GridpointResponse {
    pub properties: GridpointProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridpointProperties {
    pub update_time: Option<DateTime<Utc>>,
    pub temperature: Option<GridpointLayer>,
    pub dewpoint: Option<GridpointLayer>,
    pub relative_humidity: Option<GridpointLayer>,
    pub wind_speed: Option<GridpointLayer>,
    pub wind_direction: Option<GridpointLayer>,
    pub wind_gust: Option<GridpointLayer>,
    pub probability_of_precipitation: Option<GridpointLayer>,
    pub sky_cover: Option<GridpointLayer>,
    pub quantitative_precipitation: Option<GridpointLayer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridpointLayer {
    pub uom: Option<String>,
    #[serde(default)]
    pub values: Vec<GridpointValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridpointValue {
    pub valid_time: String,
    pub value: Option<f64>,
}

impl GridpointProperties {
    fn layer(&self, field: ForecastField) -> Option<&GridpointLayer> {
        match field {
            ForecastField::Temperature => self.temperature.as_ref(),
            ForecastField::Dewpoint => self.dewpoint.as_ref(),
            ForecastField::RelativeHumidity => self.relative_humidity.as_ref(),
            ForecastField::WindSpeed => self.wind_speed.as_ref(),
            ForecastField::WindDirection => self.wind_direction.as_ref(),
            ForecastField::WindGust => self.wind_gust.as_ref(),
            ForecastField::ProbabilityOfPrecipitation => self.probability_of_precipitation.as_ref(),
            ForecastField::SkyCover => self.sky_cover.as_ref(),
            ForecastField::QuantitativePrecipitation => self.quantitative_precipitation.as_ref(),
        }
    }

    /// Converts every tracked layer into a [`RawFieldSeries`]. A missing layer
    /// becomes an empty series; entries with an unparseable start are skipped.
    pub fn into_series(self) -> Vec<RawFieldSeries> {
        ForecastField::ALL
            .iter()
            .map(|field| {
                let values = self
                    .layer(*field)
                    .map(|layer| {
                        layer
                            .values
                            .iter()
                            .filter_map(|v| {
                                let parsed = RawFieldValue::from_valid_time(&v.valid_time, v.value);
                                if parsed.is_none() {
                                    warn!("Skipping {} entry with bad validTime '{}'", field, v.valid_time);
                                }
                                parsed
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                RawFieldSeries::new(*field, values)
            })
            .collect()
    }
}

// --- observation stations ---

#[derive(Debug, Deserialize)]
pub struct StationCollection {
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
pub struct StationFeature {
    /// Full URL of the station resource.
    pub id: String,
    pub geometry: Option<PointGeometry>,
    pub properties: StationProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// GeoJSON order: longitude, latitude.
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: String,
    pub name: Option<String>,
}

// --- /stations/{id}/observations/latest ---

#[derive(Debug, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObservationProperties {
    pub timestamp: Option<DateTime<Utc>>,
    pub text_description: Option<String>,
    pub temperature: QuantitativeValue,
    pub dewpoint: QuantitativeValue,
    pub relative_humidity: QuantitativeValue,
    pub wind_speed: QuantitativeValue,
    pub wind_direction: QuantitativeValue,
    pub wind_gust: QuantitativeValue,
    pub visibility: QuantitativeValue,
    pub sea_level_pressure: QuantitativeValue,
    pub barometric_pressure: QuantitativeValue,
    pub precipitation_last_hour: QuantitativeValue,
    pub cloud_layers: Vec<CloudLayer>,
}

/// A `{unitCode, value}` pair, e.g. `{"unitCode": "wmoUnit:degC", "value": 12.2}`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuantitativeValue {
    pub unit_code: Option<String>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudLayer {
    #[serde(default)]
    pub base: QuantitativeValue,
    #[serde(default)]
    pub amount: String,
}

// --- /alerts/active?point={lat},{lon} ---

#[derive(Debug, Deserialize)]
pub struct AlertCollection {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub id: String,
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProperties {
    pub event: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub area_desc: Option<String>,
    pub sender_name: Option<String>,
    pub effective: Option<DateTime<Utc>>,
    pub onset: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
}
