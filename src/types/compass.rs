//! Defines the `CompassPoint` enum, mapping a wind direction in degrees onto one of
//! the 16 points of the compass rose.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-point compass direction, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const POINTS: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::NNE,
    CompassPoint::NE,
    CompassPoint::ENE,
    CompassPoint::E,
    CompassPoint::ESE,
    CompassPoint::SE,
    CompassPoint::SSE,
    CompassPoint::S,
    CompassPoint::SSW,
    CompassPoint::SW,
    CompassPoint::WSW,
    CompassPoint::W,
    CompassPoint::WNW,
    CompassPoint::NW,
    CompassPoint::NNW,
];

impl CompassPoint {
    /// Maps a direction in degrees to the nearest compass point, using
    /// `floor(degrees / 22.5 + 0.5) mod 16`.
    ///
    /// Returns `None` for non-finite input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use event_weather::CompassPoint;
    ///
    /// assert_eq!(CompassPoint::from_degrees(0.0), Some(CompassPoint::N));
    /// assert_eq!(CompassPoint::from_degrees(225.0), Some(CompassPoint::SW));
    /// assert_eq!(CompassPoint::from_degrees(355.0), Some(CompassPoint::N));
    /// ```
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let index = (degrees / 22.5 + 0.5).floor() as i64;
        Some(POINTS[index.rem_euclid(16) as usize])
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
