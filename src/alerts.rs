//! Active watches, warnings and advisories at the venue.

use crate::upstream::models::{AlertCollection, AlertFeature};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const FETCH_FAILED: &str = "Unable to fetch alert data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// URL of the alert resource.
    pub id: String,
    /// e.g. `"Wind Advisory"`.
    pub event: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub area: Option<String>,
    pub sender: Option<String>,
    pub effective: Option<DateTime<Utc>>,
    pub onset: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
}

impl From<AlertFeature> for Alert {
    fn from(feature: AlertFeature) -> Self {
        let p = feature.properties;
        Self {
            id: feature.id,
            event: p.event,
            headline: p.headline,
            description: p.description,
            instruction: p.instruction,
            severity: p.severity,
            urgency: p.urgency,
            certainty: p.certainty,
            area: p.area_desc,
            sender: p.sender_name,
            effective: p.effective,
            onset: p.onset,
            expires: p.expires,
            ends: p.ends,
        }
    }
}

/// Alerts in effect at one moment. A failed fetch is an empty list carrying
/// `error` rather than an `Err`, so the dashboard can always render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveAlerts {
    pub timestamp: DateTime<Utc>,
    pub alerts: Vec<Alert>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActiveAlerts {
    pub fn from_collection(collection: AlertCollection, now: DateTime<Utc>) -> Self {
        let alerts: Vec<Alert> = collection.features.into_iter().map(Alert::from).collect();
        Self {
            timestamp: now,
            count: alerts.len(),
            alerts,
            error: None,
        }
    }

    pub fn failed(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            alerts: Vec::new(),
            count: 0,
            error: Some(FETCH_FAILED.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
