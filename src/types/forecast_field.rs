//! Defines the weather fields tracked from an NWS gridpoint forecast and how each
//! one is converted and rounded when it lands in an hourly slot.

use crate::forecast::conversions::{
    celsius_to_fahrenheit, kmh_to_mph, mm_to_inches, round_half_up,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the gridpoint layers the resampler expands into hourly slots.
///
/// The gridpoint endpoint reports every layer in metric units (°C, km/h, mm, %),
/// see [`ForecastField::convert`] for the display units each field ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ForecastField {
    /// Air temperature, °C upstream, °F after conversion.
    Temperature,
    /// Dew point, °C upstream, °F after conversion.
    Dewpoint,
    /// Relative humidity in percent.
    RelativeHumidity,
    /// Sustained wind speed, km/h upstream, mph after conversion.
    WindSpeed,
    /// Direction the wind blows from, in degrees.
    WindDirection,
    /// Wind gust, km/h upstream, mph after conversion.
    WindGust,
    /// Probability of precipitation in percent.
    ProbabilityOfPrecipitation,
    /// Sky cover in percent.
    SkyCover,
    /// Quantitative precipitation, mm upstream, inches after conversion.
    QuantitativePrecipitation,
}

impl ForecastField {
    /// Every tracked field, in the order the gridpoint payload lists them.
    pub const ALL: [ForecastField; 9] = [
        ForecastField::Temperature,
        ForecastField::Dewpoint,
        ForecastField::RelativeHumidity,
        ForecastField::WindSpeed,
        ForecastField::WindDirection,
        ForecastField::WindGust,
        ForecastField::ProbabilityOfPrecipitation,
        ForecastField::SkyCover,
        ForecastField::QuantitativePrecipitation,
    ];

    /// The property name used for this field in the gridpoint JSON.
    pub fn property_name(&self) -> &'static str {
        match self {
            ForecastField::Temperature => "temperature",
            ForecastField::Dewpoint => "dewpoint",
            ForecastField::RelativeHumidity => "relativeHumidity",
            ForecastField::WindSpeed => "windSpeed",
            ForecastField::WindDirection => "windDirection",
            ForecastField::WindGust => "windGust",
            ForecastField::ProbabilityOfPrecipitation => "probabilityOfPrecipitation",
            ForecastField::SkyCover => "skyCover",
            ForecastField::QuantitativePrecipitation => "quantitativePrecipitation",
        }
    }

    /// Converts a raw upstream value into display units and rounds it.
    ///
    /// * temperature / dewpoint: °C → °F, 1 decimal
    /// * wind speed / gust: km/h → mph, 1 decimal
    /// * humidity / precipitation probability / sky cover / wind direction: nearest integer
    /// * quantitative precipitation: mm → inches, 2 decimals
    ///
    /// # Examples
    ///
    /// ```
    /// use event_weather::ForecastField;
    ///
    /// assert_eq!(ForecastField::Temperature.convert(20.0), 68.0);
    /// assert_eq!(ForecastField::SkyCover.convert(49.6), 50.0);
    /// ```
    pub fn convert(&self, raw: f64) -> f64 {
        match self {
            ForecastField::Temperature | ForecastField::Dewpoint => {
                round_half_up(celsius_to_fahrenheit(raw), 1)
            }
            ForecastField::WindSpeed | ForecastField::WindGust => {
                round_half_up(kmh_to_mph(raw), 1)
            }
            ForecastField::RelativeHumidity
            | ForecastField::ProbabilityOfPrecipitation
            | ForecastField::SkyCover
            | ForecastField::WindDirection => round_half_up(raw, 0),
            ForecastField::QuantitativePrecipitation => round_half_up(mm_to_inches(raw), 2),
        }
    }
}

impl fmt::Display for ForecastField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.property_name())
    }
}
