//! GOES-18 satellite loop frames served as RealEarth tiles.

use crate::imagery::frames::{select_recent_frames, FrameWindow};
use crate::upstream::client::SATELLITE_TILE_URL;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SATELLITE_WINDOW: FrameWindow = FrameWindow {
    window: TimeDelta::minutes(30),
    min_frames: 2,
    fallback: 6,
};

/// The ABI channels offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SatelliteChannel {
    #[default]
    Visible,
    WaterVapor,
    CleanInfrared,
}

impl SatelliteChannel {
    pub const ALL: [SatelliteChannel; 3] = [
        SatelliteChannel::Visible,
        SatelliteChannel::WaterVapor,
        SatelliteChannel::CleanInfrared,
    ];

    /// RealEarth product id.
    pub fn product(&self) -> &'static str {
        match self {
            SatelliteChannel::Visible => "G18-ABI-CONUS-BAND02",
            SatelliteChannel::WaterVapor => "G18-ABI-CONUS-BAND09",
            SatelliteChannel::CleanInfrared => "G18-ABI-CONUS-BAND13",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SatelliteChannel::Visible => "Visible (0.64um)",
            SatelliteChannel::WaterVapor => "Water Vapor (6.9um)",
            SatelliteChannel::CleanInfrared => "Clean IR (10.3um)",
        }
    }

    pub fn from_product(product: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.product() == product)
    }
}

/// Formats as the RealEarth product id.
///
/// ```
/// use event_weather::SatelliteChannel;
///
/// assert_eq!(SatelliteChannel::WaterVapor.to_string(), "G18-ABI-CONUS-BAND09");
/// ```
impl fmt::Display for SatelliteChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.product())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteFrames {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub tile_url: String,
    pub channel: SatelliteChannel,
    pub channel_name: String,
    /// RealEarth times (`YYYYMMDD.HHMMSS`), oldest first.
    pub times: Vec<String>,
    pub total_available: usize,
}

impl SatelliteFrames {
    pub fn from_times(channel: SatelliteChannel, all: &[String], now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            source: "GOES-18 (SSEC RealEarth)".to_string(),
            tile_url: SATELLITE_TILE_URL.to_string(),
            channel,
            channel_name: channel.display_name().to_string(),
            times: select_recent_frames(all, parse_realearth_time, now, SATELLITE_WINDOW),
            total_available: all.len(),
        }
    }
}

/// Parses a RealEarth frame time such as `20260208.183000` as UTC.
pub fn parse_realearth_time(t: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(t, "%Y%m%d.%H%M%S")
        .ok()
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_realearth_time() {
        assert_eq!(
            parse_realearth_time("20260208.183000"),
            Some(Utc.with_ymd_and_hms(2026, 2, 8, 18, 30, 0).unwrap())
        );
        assert_eq!(parse_realearth_time("2026-02-08"), None);
    }

    #[test]
    fn test_channel_lookup() {
        assert_eq!(
            SatelliteChannel::from_product("G18-ABI-CONUS-BAND13"),
            Some(SatelliteChannel::CleanInfrared)
        );
        assert_eq!(SatelliteChannel::from_product("G16-ABI-FD-BAND02"), None);
        assert_eq!(SatelliteChannel::default().display_name(), "Visible (0.64um)");
    }

    #[test]
    fn test_frames_fall_back_to_last_six() {
        let all: Vec<String> = (0..10)
            .map(|i| format!("20260208.{:02}0000", 8 + i))
            .collect();
        let now = Utc.with_ymd_and_hms(2026, 2, 8, 17, 10, 0).unwrap();
        // Only 17:00 is inside the window, fewer than two frames.
        let frames = SatelliteFrames::from_times(SatelliteChannel::Visible, &all, now);
        assert_eq!(frames.times, all[4..].to_vec());
        assert_eq!(frames.total_available, 10);

        let now = Utc.with_ymd_and_hms(2026, 2, 8, 16, 25, 0).unwrap();
        let frames = SatelliteFrames::from_times(SatelliteChannel::Visible, &all, now);
        assert_eq!(frames.times, vec!["20260208.160000", "20260208.170000"]);
    }
}
