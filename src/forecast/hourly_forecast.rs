use crate::config::AdverseThresholds;
use crate::forecast::resampler::{resample, AnchorPolicy};
use crate::types::raw_series::RawFieldSeries;
use crate::upstream::models::GridPoint;
use crate::HourlyPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The resampled forecast handed to the rendering layer.
///
/// When the upstream fetch fails this is still returned, with `error` set and
/// `hours` empty, so callers render an error state instead of propagating a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    /// When the resample ran.
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub hours: Vec<HourlyPoint>,
    pub adverse_thresholds: AdverseThresholds,
    pub error: Option<String>,
}

impl HourlyForecast {
    pub fn from_series(
        fields: &[RawFieldSeries],
        grid: &GridPoint,
        adverse_thresholds: AdverseThresholds,
        now: DateTime<Utc>,
        policy: AnchorPolicy,
    ) -> Self {
        Self {
            timestamp: now,
            source: Some(format!(
                "NWS Gridpoint Forecast ({} {},{})",
                grid.grid_id, grid.grid_x, grid.grid_y
            )),
            hours: resample(fields, now, policy),
            adverse_thresholds,
            error: None,
        }
    }

    pub fn failed(
        message: impl Into<String>,
        adverse_thresholds: AdverseThresholds,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: now,
            source: None,
            hours: Vec::new(),
            adverse_thresholds,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
