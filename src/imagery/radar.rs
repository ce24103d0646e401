//! Radar loop frames from the MRMS base reflectivity WMS layer.

use crate::imagery::frames::{select_recent_frames, FrameWindow};
use crate::upstream::client::RADAR_WMS_URL;
use crate::upstream::error::UpstreamError;
use chrono::{DateTime, TimeDelta, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

pub const RADAR_LAYER: &str = "conus_bref_qcd";
pub const RADAR_STYLE: &str = "radar_reflectivity";

pub const RADAR_WINDOW: FrameWindow = FrameWindow {
    window: TimeDelta::minutes(30),
    min_frames: 3,
    fallback: 15,
};

/// Frame times to animate over the radar WMS layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarFrames {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub wms_url: String,
    pub layer: String,
    pub style: String,
    /// ISO instants, oldest first.
    pub times: Vec<String>,
    pub total_available: usize,
}

impl RadarFrames {
    pub fn from_times(all: &[String], now: DateTime<Utc>) -> Self {
        let times = select_recent_frames(all, parse_radar_time, now, RADAR_WINDOW);
        Self {
            timestamp: now,
            source: "MRMS CONUS Base Reflectivity (QCD)".to_string(),
            wms_url: RADAR_WMS_URL.to_string(),
            layer: RADAR_LAYER.to_string(),
            style: RADAR_STYLE.to_string(),
            times,
            total_available: all.len(),
        }
    }
}

fn parse_radar_time(t: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(t)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Reads the comma separated values of the first `<Dimension name="time">` in a
/// WMS GetCapabilities document.
pub fn parse_time_dimension(xml: &str, url: &str) -> Result<Vec<String>, UpstreamError> {
    let xml_error = |source| UpstreamError::XmlParse {
        url: url.to_string(),
        source,
    };
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_dimension = false;
    let mut content = String::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) if e.name().as_ref() == b"Dimension" => {
                in_dimension = e.attributes().flatten().any(|attr| {
                    attr.key.as_ref() == b"name"
                        && attr.value.as_ref().eq_ignore_ascii_case(b"time")
                });
            }
            Event::Text(t) if in_dimension => {
                content.push_str(&t.unescape().map_err(xml_error)?);
            }
            Event::End(e) if e.name().as_ref() == b"Dimension" && in_dimension => {
                let times: Vec<String> = content
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if !times.is_empty() {
                    return Ok(times);
                }
                in_dimension = false;
                content.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Err(UpstreamError::NoTimeDimension(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0">
  <Capability>
    <Layer>
      <Name>conus_bref_qcd</Name>
      <Dimension name="elevation" units="m">0</Dimension>
      <Dimension name="time" default="current" units="ISO8601">
        2026-02-08T18:00:00.000Z,2026-02-08T18:10:00.000Z,
        2026-02-08T18:20:00.000Z,2026-02-08T18:30:00.000Z
      </Dimension>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    #[test]
    fn test_parse_time_dimension() {
        let times = parse_time_dimension(CAPABILITIES, RADAR_WMS_URL).expect("times");
        assert_eq!(times.len(), 4);
        assert_eq!(times[0], "2026-02-08T18:00:00.000Z");
        assert_eq!(times[3], "2026-02-08T18:30:00.000Z");
    }

    #[test]
    fn test_missing_time_dimension() {
        let xml = r#"<WMS_Capabilities><Layer><Dimension name="elevation">0</Dimension></Layer></WMS_Capabilities>"#;
        assert!(matches!(
            parse_time_dimension(xml, RADAR_WMS_URL),
            Err(UpstreamError::NoTimeDimension(_))
        ));
    }

    #[test]
    fn test_frames_within_half_hour() {
        let times = parse_time_dimension(CAPABILITIES, RADAR_WMS_URL).expect("times");
        let now = Utc.with_ymd_and_hms(2026, 2, 8, 18, 40, 0).unwrap();
        let frames = RadarFrames::from_times(&times, now);
        assert_eq!(frames.times, times[1..].to_vec());
        assert_eq!(frames.total_available, 4);
        assert_eq!(frames.layer, "conus_bref_qcd");

        // An hour later nothing is recent, so the tail is used.
        let stale = RadarFrames::from_times(&times, now + TimeDelta::hours(1));
        assert_eq!(stale.times, times);
    }
}
