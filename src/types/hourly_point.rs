use crate::types::compass::CompassPoint;
use crate::types::forecast_field::ForecastField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hourly slot of the resampled forecast, in display units.
///
/// Every field is `None` when no upstream span covered the hour; gaps are never
/// filled in or defaulted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub time: DateTime<Utc>,
    /// °F
    pub temperature: Option<f64>,
    /// °F
    pub dewpoint: Option<f64>,
    /// %
    pub relative_humidity: Option<f64>,
    /// mph
    pub wind_speed: Option<f64>,
    /// Degrees, rounded to the nearest integer.
    pub wind_direction: Option<f64>,
    pub wind_cardinal: Option<CompassPoint>,
    /// mph
    pub wind_gust: Option<f64>,
    /// %
    pub probability_of_precipitation: Option<f64>,
    /// %
    pub sky_cover: Option<f64>,
    /// Inches
    #[serde(rename = "qpf")]
    pub quantitative_precipitation: Option<f64>,
}

impl HourlyPoint {
    /// An hour with no data for any field.
    pub fn empty(time: DateTime<Utc>) -> Self {
        Self {
            time,
            temperature: None,
            dewpoint: None,
            relative_humidity: None,
            wind_speed: None,
            wind_direction: None,
            wind_cardinal: None,
            wind_gust: None,
            probability_of_precipitation: None,
            sky_cover: None,
            quantitative_precipitation: None,
        }
    }

    pub fn get(&self, field: ForecastField) -> Option<f64> {
        match field {
            ForecastField::Temperature => self.temperature,
            ForecastField::Dewpoint => self.dewpoint,
            ForecastField::RelativeHumidity => self.relative_humidity,
            ForecastField::WindSpeed => self.wind_speed,
            ForecastField::WindDirection => self.wind_direction,
            ForecastField::WindGust => self.wind_gust,
            ForecastField::ProbabilityOfPrecipitation => self.probability_of_precipitation,
            ForecastField::SkyCover => self.sky_cover,
            ForecastField::QuantitativePrecipitation => self.quantitative_precipitation,
        }
    }

    /// Sets a field from an already converted value. Setting the wind direction
    /// also updates the compass label.
    pub fn set(&mut self, field: ForecastField, value: Option<f64>) {
        match field {
            ForecastField::Temperature => self.temperature = value,
            ForecastField::Dewpoint => self.dewpoint = value,
            ForecastField::RelativeHumidity => self.relative_humidity = value,
            ForecastField::WindSpeed => self.wind_speed = value,
            ForecastField::WindDirection => {
                self.wind_direction = value;
                self.wind_cardinal = value.and_then(CompassPoint::from_degrees);
            }
            ForecastField::WindGust => self.wind_gust = value,
            ForecastField::ProbabilityOfPrecipitation => self.probability_of_precipitation = value,
            ForecastField::SkyCover => self.sky_cover = value,
            ForecastField::QuantitativePrecipitation => self.quantitative_precipitation = value,
        }
    }

    /// Extracts one field across a run of hours, as fed to a chart row.
    pub fn series(hours: &[HourlyPoint], field: ForecastField) -> Vec<Option<f64>> {
        hours.iter().map(|h| h.get(field)).collect()
    }
}
