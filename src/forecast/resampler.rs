//! Resamples irregular gridpoint spans into a fixed run of hourly slots.
//!
//! Each field is expanded independently: every span writes its value into a map
//! keyed by the hour it touches, later spans overwriting earlier ones. The anchor
//! hours are then looked up by exact key; anything missing stays `None`.

use crate::forecast::duration::parse_iso_duration;
use crate::types::compass::CompassPoint;
use crate::types::forecast_field::ForecastField;
use crate::types::hourly_point::HourlyPoint;
use crate::types::raw_series::RawFieldSeries;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use std::collections::HashMap;
use std::ops::Range;

/// Number of hourly slots produced by [`resample`].
pub const HOURS: usize = 24;

const ONE_HOUR: TimeDelta = TimeDelta::hours(1);

/// How the first slot is chosen relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorPolicy {
    /// The first slot is always strictly after now: the current hour is truncated
    /// and then advanced by one hour, even when now sits exactly on the hour.
    #[default]
    NextHour,
    /// When now sits exactly on the hour the first slot is now itself,
    /// otherwise the next full hour.
    CurrentOrNext,
}

/// Truncates an instant down to the start of its hour.
pub fn truncate_to_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    t.duration_trunc(ONE_HOUR).unwrap_or(t)
}

/// Determines the first hourly slot for a resample invoked at `now`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use event_weather::{anchor_hour, AnchorPolicy};
///
/// let now = Utc.with_ymd_and_hms(2026, 2, 8, 9, 42, 0).unwrap();
/// let h0 = anchor_hour(now, AnchorPolicy::NextHour);
/// assert_eq!(h0, Utc.with_ymd_and_hms(2026, 2, 8, 10, 0, 0).unwrap());
/// ```
pub fn anchor_hour(now: DateTime<Utc>, policy: AnchorPolicy) -> DateTime<Utc> {
    let h0 = truncate_to_hour(now);
    match policy {
        AnchorPolicy::NextHour if h0 <= now => h0 + ONE_HOUR,
        AnchorPolicy::CurrentOrNext if h0 < now => h0 + ONE_HOUR,
        _ => h0,
    }
}

/// The [`HOURS`] consecutive slot instants starting at the anchor hour.
pub fn hourly_slots(now: DateTime<Utc>, policy: AnchorPolicy) -> Vec<DateTime<Utc>> {
    let h0 = anchor_hour(now, policy);
    (0..HOURS as i32)
        .map(|i| h0 + TimeDelta::hours(i as i64))
        .collect()
}

/// Expands one field's spans into a map from hour instant to raw value.
///
/// Walks each span in one-hour steps from its start while before its end, keying
/// each step by its truncated hour. Only steps inside `window` are visited, so a
/// span of any length costs at most one step per hour of the window. Spans are
/// applied in order, so where spans overlap the later one wins. An entry whose
/// value is null still overwrites.
pub fn expand_to_hourly(
    series: &RawFieldSeries,
    window: &Range<DateTime<Utc>>,
) -> HashMap<DateTime<Utc>, Option<f64>> {
    let mut map = HashMap::new();
    for entry in &series.values {
        let span = parse_iso_duration(&entry.valid_duration);
        let end = entry
            .valid_start
            .checked_add_signed(span)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .min(window.end);
        let Some(mut t) = first_step_in_window(entry.valid_start, window.start) else {
            continue;
        };
        while t < end {
            map.insert(truncate_to_hour(t), entry.value);
            let Some(next) = t.checked_add_signed(ONE_HOUR) else {
                break;
            };
            t = next;
        }
    }
    map
}

/// First instant `start + k` hours (k >= 0) that is not before `window_start`.
fn first_step_in_window(
    start: DateTime<Utc>,
    window_start: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if start >= window_start {
        return Some(start);
    }
    let behind = (window_start - start).num_milliseconds();
    let hour = ONE_HOUR.num_milliseconds();
    let skip = TimeDelta::try_hours((behind + hour - 1) / hour)?;
    start.checked_add_signed(skip)
}

/// Resamples every given field into [`HOURS`] hourly points anchored at `now`.
///
/// Fields absent from `fields` are `None` in every slot. Values are converted to
/// display units on lookup, see [`crate::ForecastField::convert`]. The wind
/// cardinal is derived from the unrounded direction.
pub fn resample(
    fields: &[RawFieldSeries],
    now: DateTime<Utc>,
    policy: AnchorPolicy,
) -> Vec<HourlyPoint> {
    let slots = hourly_slots(now, policy);
    let window = match (slots.first(), slots.last()) {
        (Some(&first), Some(&last)) => first..last + ONE_HOUR,
        _ => return Vec::new(),
    };
    let expanded: Vec<_> = fields
        .iter()
        .map(|series| (series.field, expand_to_hourly(series, &window)))
        .collect();

    slots
        .into_iter()
        .map(|slot| {
            let mut point = HourlyPoint::empty(slot);
            for (field, map) in &expanded {
                let raw = map.get(&slot).copied().flatten().filter(|v| v.is_finite());
                point.set(*field, raw.map(|v| field.convert(v)));
                if *field == ForecastField::WindDirection {
                    point.wind_cardinal = raw.and_then(CompassPoint::from_degrees);
                }
            }
            point
        })
        .collect()
}
