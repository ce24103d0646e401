//! Latest station observation converted to the imperial units shown on the dashboard.

use crate::forecast::conversions::{
    celsius_to_fahrenheit, kmh_to_mph, meters_to_feet, meters_to_miles, mm_to_inches, ms_to_mph,
    pascals_to_inhg, pascals_to_millibars, round_half_up,
};
use crate::observations::nearest_station::ObservationStation;
use crate::types::compass::CompassPoint;
use crate::upstream::models::{CloudLayer, ObservationProperties, QuantitativeValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// When the observation was fetched.
    pub timestamp: DateTime<Utc>,
    pub observation_time: Option<DateTime<Utc>>,
    pub source: String,
    pub station: ObservationStation,
    pub description: Option<String>,
    /// °F
    pub temperature: Option<f64>,
    /// °F
    pub dewpoint: Option<f64>,
    /// %
    pub relative_humidity: Option<f64>,
    /// mph
    pub wind_speed: Option<f64>,
    /// Degrees true.
    pub wind_direction: Option<f64>,
    pub wind_cardinal: Option<CompassPoint>,
    /// mph
    pub wind_gust: Option<f64>,
    /// Miles.
    pub visibility: Option<f64>,
    /// mb
    pub sea_level_pressure: Option<f64>,
    /// inHg
    pub altimeter: Option<f64>,
    /// Inches.
    pub precipitation_last_hour: Option<f64>,
    /// e.g. `"Broken @ 4,500 ft"`, lowest layer first.
    pub clouds: Vec<String>,
}

fn finite(q: &QuantitativeValue) -> Option<f64> {
    q.value.filter(|v| v.is_finite())
}

fn unit_is(q: &QuantitativeValue, suffix: &str) -> bool {
    q.unit_code.as_deref().is_some_and(|u| u.ends_with(suffix))
}

fn temperature_f(q: &QuantitativeValue) -> Option<f64> {
    let value = finite(q)?;
    let f = if unit_is(q, "degF") {
        value
    } else {
        celsius_to_fahrenheit(value)
    };
    Some(round_half_up(f, 1))
}

/// NWS reports speeds in km/h, some stations in m/s.
fn speed_mph(q: &QuantitativeValue) -> Option<f64> {
    let value = finite(q)?;
    let mph = if unit_is(q, "m_s-1") {
        ms_to_mph(value)
    } else {
        kmh_to_mph(value)
    };
    Some(round_half_up(mph, 1))
}

fn precipitation_in(q: &QuantitativeValue) -> Option<f64> {
    let value = finite(q)?;
    let mm = if unit_is(q, ":m") { value * 1000.0 } else { value };
    Some(round_half_up(mm_to_inches(mm), 2))
}

/// Groups the digits of a non-negative integer in thousands: `4500` → `"4,500"`.
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Describes a cloud layer by its METAR amount code and base height.
pub fn describe_cloud_layer(layer: &CloudLayer) -> String {
    let amount = layer.amount.trim();
    let name = match amount.to_ascii_uppercase().as_str() {
        "CLR" | "SKC" => "Clear",
        "FEW" => "Few",
        "SCT" => "Scattered",
        "BKN" => "Broken",
        "OVC" => "Overcast",
        "VV" => "Vert Vis",
        _ => amount,
    };
    match finite(&layer.base).filter(|base| *base > 0.0) {
        Some(base) => format!(
            "{} @ {} ft",
            name,
            with_thousands(meters_to_feet(base).round() as u64)
        ),
        None => name.to_string(),
    }
}

/// NWS wind chill, defined below 50 °F with wind above 3 mph. Elsewhere the
/// air temperature itself.
pub fn feels_like(temperature_f: f64, wind_mph: Option<f64>) -> f64 {
    match wind_mph {
        Some(v) if temperature_f < 50.0 && v > 3.0 => {
            let v16 = v.powf(0.16);
            35.74 + 0.6215 * temperature_f - 35.75 * v16 + 0.4275 * temperature_f * v16
        }
        _ => temperature_f,
    }
}

impl CurrentConditions {
    pub fn from_observation(
        props: &ObservationProperties,
        station: ObservationStation,
        now: DateTime<Utc>,
    ) -> Self {
        let wind_direction = finite(&props.wind_direction).map(|d| round_half_up(d, 0));
        let altimeter_pa = finite(&props.barometric_pressure).or(finite(&props.sea_level_pressure));
        Self {
            timestamp: now,
            observation_time: props.timestamp,
            source: "NOAA NWS".to_string(),
            station,
            description: props.text_description.clone().filter(|d| !d.is_empty()),
            temperature: temperature_f(&props.temperature),
            dewpoint: temperature_f(&props.dewpoint),
            relative_humidity: finite(&props.relative_humidity).map(|v| round_half_up(v, 1)),
            wind_speed: speed_mph(&props.wind_speed),
            wind_direction,
            wind_cardinal: wind_direction.and_then(CompassPoint::from_degrees),
            wind_gust: speed_mph(&props.wind_gust),
            visibility: finite(&props.visibility).map(|m| round_half_up(meters_to_miles(m), 1)),
            sea_level_pressure: finite(&props.sea_level_pressure)
                .map(|pa| round_half_up(pascals_to_millibars(pa), 1)),
            altimeter: altimeter_pa.map(|pa| round_half_up(pascals_to_inhg(pa), 2)),
            precipitation_last_hour: precipitation_in(&props.precipitation_last_hour),
            clouds: props.cloud_layers.iter().map(describe_cloud_layer).collect(),
        }
    }

    /// Rounded "feels like" temperature, `None` without a temperature reading.
    pub fn feels_like(&self) -> Option<f64> {
        self.temperature
            .map(|t| feels_like(t, self.wind_speed).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::models::ObservationResponse;
    use chrono::TimeZone;

    fn station() -> ObservationStation {
        ObservationStation {
            id: "KSJC".to_string(),
            url: "https://api.weather.gov/stations/KSJC".to_string(),
            name: Some("San Jose Intl".to_string()),
            latitude: Some(37.359),
            longitude: Some(-121.927),
            distance_miles: Some(3.8),
        }
    }

    fn observation(json: &str) -> ObservationProperties {
        serde_json::from_str::<ObservationResponse>(json)
            .expect("valid json")
            .properties
    }

    #[test]
    fn test_imperial_conversion() {
        let props = observation(
            r#"{"properties": {
                "timestamp": "2026-02-08T17:53:00+00:00",
                "textDescription": "Mostly Cloudy",
                "temperature": {"unitCode": "wmoUnit:degC", "value": 12.2},
                "dewpoint": {"unitCode": "wmoUnit:degC", "value": null},
                "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 71.234},
                "windSpeed": {"unitCode": "wmoUnit:km_h-1", "value": 16.0},
                "windDirection": {"unitCode": "wmoUnit:degree_(angle)", "value": 290},
                "visibility": {"unitCode": "wmoUnit:m", "value": 16090},
                "seaLevelPressure": {"unitCode": "wmoUnit:Pa", "value": 101660},
                "barometricPressure": {"unitCode": "wmoUnit:Pa", "value": 101590},
                "precipitationLastHour": {"unitCode": "wmoUnit:mm", "value": 2.54},
                "cloudLayers": [
                    {"base": {"unitCode": "wmoUnit:m", "value": 1370}, "amount": "BKN"},
                    {"base": {"unitCode": "wmoUnit:m", "value": null}, "amount": "CLR"}
                ]
            }}"#,
        );
        let now = Utc.with_ymd_and_hms(2026, 2, 8, 18, 0, 0).unwrap();
        let current = CurrentConditions::from_observation(&props, station(), now);

        assert_eq!(current.temperature, Some(54.0));
        assert_eq!(current.dewpoint, None);
        assert_eq!(current.relative_humidity, Some(71.2));
        assert_eq!(current.wind_speed, Some(9.9));
        assert_eq!(current.wind_cardinal, Some(CompassPoint::WNW));
        assert_eq!(current.visibility, Some(10.0));
        assert_eq!(current.sea_level_pressure, Some(1016.6));
        assert_eq!(current.altimeter, Some(30.0));
        assert_eq!(current.precipitation_last_hour, Some(0.1));
        assert_eq!(current.clouds, vec!["Broken @ 4,495 ft", "Clear"]);
        assert_eq!(current.description.as_deref(), Some("Mostly Cloudy"));
        // No wind chill above 50 °F.
        assert_eq!(current.feels_like(), Some(54.0));
    }

    #[test]
    fn test_metres_per_second_and_missing_direction() {
        let props = observation(
            r#"{"properties": {
                "windSpeed": {"unitCode": "wmoUnit:m_s-1", "value": 5.0},
                "windDirection": {"unitCode": "wmoUnit:degree_(angle)", "value": null}
            }}"#,
        );
        let now = Utc.with_ymd_and_hms(2026, 2, 8, 18, 0, 0).unwrap();
        let current = CurrentConditions::from_observation(&props, station(), now);
        assert_eq!(current.wind_speed, Some(11.2));
        assert_eq!(current.wind_cardinal, None);
        assert_eq!(current.feels_like(), None);
        assert!(current.clouds.is_empty());
    }

    #[test]
    fn test_wind_chill() {
        assert_eq!(feels_like(60.0, Some(20.0)), 60.0);
        assert_eq!(feels_like(40.0, Some(2.0)), 40.0);
        assert_eq!(feels_like(40.0, None), 40.0);
        // NWS chart: 40 °F at 10 mph feels like 34 °F.
        assert_eq!(feels_like(40.0, Some(10.0)).round(), 34.0);
    }

    #[test]
    fn test_cloud_layer_descriptions() {
        let layer = |amount: &str, base: Option<f64>| CloudLayer {
            base: QuantitativeValue {
                unit_code: Some("wmoUnit:m".to_string()),
                value: base,
            },
            amount: amount.to_string(),
        };
        assert_eq!(describe_cloud_layer(&layer("OVC", Some(3048.0))), "Overcast @ 10,000 ft");
        assert_eq!(describe_cloud_layer(&layer("FEW", Some(300.0))), "Few @ 984 ft");
        assert_eq!(describe_cloud_layer(&layer("XYZ", None)), "XYZ");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }
}
