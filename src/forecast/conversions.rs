//! Unit conversions between the metric values NWS reports and the imperial units
//! the dashboard displays.

const KMH_TO_MPH: f64 = 0.621371;
const MS_TO_MPH: f64 = 2.237;
const MM_PER_INCH: f64 = 25.4;
const METERS_PER_MILE: f64 = 1609.34;
const PASCALS_PER_INHG: f64 = 3386.39;
const FEET_PER_METER: f64 = 3.28084;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * KMH_TO_MPH
}

pub fn ms_to_mph(ms: f64) -> f64 {
    ms * MS_TO_MPH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

pub fn pascals_to_inhg(pascals: f64) -> f64 {
    pascals / PASCALS_PER_INHG
}

pub fn pascals_to_millibars(pascals: f64) -> f64 {
    pascals / 100.0
}

/// Rounds to `decimals` places, with halves rounding towards positive infinity
/// (`-2.5` becomes `-2`), which is how the dashboard has always displayed values.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_round_half_up_matches_display_rounding() {
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(1.26, 1), 1.3);
        assert_eq!(round_half_up(0.125, 2), 0.13);
    }

    #[test]
    fn test_pressure_and_distance() {
        assert_eq!(round_half_up(pascals_to_inhg(101_325.0), 2), 29.92);
        assert_eq!(round_half_up(meters_to_miles(16_093.4), 1), 10.0);
        assert_eq!(pascals_to_millibars(101_325.0), 1013.25);
    }
}
