//! Lenient parsing of the ISO-8601 durations attached to gridpoint values.

use chrono::TimeDelta;

/// Span assumed for a missing, malformed or zero-length duration.
pub const DEFAULT_SPAN: TimeDelta = TimeDelta::hours(1);

/// Parses the day, hour and minute components of an ISO-8601 duration such as
/// `"PT3H"`, `"P1DT6H"` or `"PT30M"`.
///
/// Unknown designators (years, months, weeks, seconds) are ignored. Anything that
/// yields no positive span falls back to [`DEFAULT_SPAN`] rather than failing,
/// so one bad entry never breaks the expansion of a whole field.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use event_weather::parse_iso_duration;
///
/// assert_eq!(parse_iso_duration("P1DT6H"), TimeDelta::hours(30));
/// assert_eq!(parse_iso_duration("PT30M"), TimeDelta::minutes(30));
/// assert_eq!(parse_iso_duration("garbage"), TimeDelta::hours(1));
/// ```
pub fn parse_iso_duration(duration: &str) -> TimeDelta {
    let Some(body) = duration.trim().strip_prefix('P') else {
        return DEFAULT_SPAN;
    };

    let mut total = TimeDelta::zero();
    let mut digits = String::new();
    let mut in_time = false;

    for c in body.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'T' => {
                in_time = true;
                digits.clear();
            }
            designator => {
                let amount = digits.parse::<i64>().ok();
                digits.clear();
                let Some(amount) = amount else { continue };
                let component = match (in_time, designator) {
                    (false, 'D') => TimeDelta::try_days(amount),
                    (true, 'H') => TimeDelta::try_hours(amount),
                    (true, 'M') => TimeDelta::try_minutes(amount),
                    _ => None,
                };
                if let Some(component) = component {
                    total = total.checked_add(&component).unwrap_or(total);
                }
            }
        }
    }

    if total > TimeDelta::zero() {
        total
    } else {
        DEFAULT_SPAN
    }
}
