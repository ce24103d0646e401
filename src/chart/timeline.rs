//! The three-row forecast timeline: temperature, rain chance and cloud cover.

use crate::chart::chart_spec::{ChartMode, ChartSize, ChartSpec, ThresholdDirection, TickLabel};
use crate::chart::renderer::{render_chart, RenderedChart};
use crate::chart::svg::escape_text;
use crate::config::EventConfig;
use crate::forecast::hourly_forecast::HourlyForecast;
use crate::types::forecast_field::ForecastField;
use crate::types::hourly_point::HourlyPoint;
use chrono::{FixedOffset, Utc};

/// Every n-th hour carries a tick label.
const LABEL_EVERY: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub title: &'static str,
    pub id: &'static str,
    pub chart: RenderedChart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Timeline {
    /// Message shown instead of the charts.
    Message(String),
    Rows(Vec<TimelineRow>),
}

/// Tick labels for `hours` in the venue's offset: `"3 PM"` over `"Sun"` on every
/// third hour, `None` elsewhere.
pub fn tick_labels(hours: &[HourlyPoint], offset: FixedOffset) -> Vec<Option<TickLabel>> {
    hours
        .iter()
        .enumerate()
        .map(|(i, hour)| {
            (i % LABEL_EVERY == 0).then(|| {
                let local = hour.time.with_timezone(&offset);
                TickLabel::new(
                    local.format("%-I %p").to_string(),
                    Some(local.format("%a").to_string()),
                )
            })
        })
        .collect()
}

pub fn build_timeline(forecast: &HourlyForecast, config: &EventConfig, size: ChartSize) -> Timeline {
    if let Some(error) = &forecast.error {
        return Timeline::Message(error.clone());
    }
    if forecast.hours.is_empty() {
        return Timeline::Message("No gridpoint data available".to_string());
    }

    let hours = &forecast.hours;
    let thresholds = forecast.adverse_thresholds;
    let labels = tick_labels(hours, config.venue_offset());
    let event_time = config.start_date.with_timezone(&Utc);

    let rows = [
        (
            "Temperature (F)",
            "graph-temp",
            ForecastField::Temperature,
            "#2196f3",
            ChartMode::Natural,
            thresholds.max_temp,
        ),
        (
            "Rain Chance (%)",
            "graph-rain",
            ForecastField::ProbabilityOfPrecipitation,
            "#4caf50",
            ChartMode::Percentage,
            thresholds.min_rain_chance,
        ),
        (
            "Cloud Cover (%)",
            "graph-sky",
            ForecastField::SkyCover,
            "#9e9e9e",
            ChartMode::Percentage,
            thresholds.min_sky_cover,
        ),
    ];

    Timeline::Rows(
        rows.into_iter()
            .map(|(title, id, field, color, mode, threshold)| {
                let spec = ChartSpec::builder()
                    .values(HourlyPoint::series(hours, field))
                    .labels(labels.clone())
                    .color(color)
                    .mode(mode)
                    .threshold(threshold)
                    .direction(ThresholdDirection::Above)
                    .hours(hours)
                    .event_time(event_time)
                    .marker_label(config.marker_label.clone())
                    .build();
                TimelineRow {
                    title,
                    id,
                    chart: render_chart(&spec, size),
                }
            })
            .collect(),
    )
}

impl Timeline {
    /// Renders the timeline as an embeddable HTML fragment.
    pub fn to_html(&self) -> String {
        match self {
            Timeline::Message(message) => {
                format!(r#"<div class="error-msg">{}</div>"#, escape_text(message))
            }
            Timeline::Rows(rows) => {
                let mut html = String::from(r#"<div class="timeline-chart"><div class="timeline-rows">"#);
                for row in rows {
                    html.push_str(&format!(
                        r#"<div class="timeline-row"><div class="row-header">{}</div><div class="row-graph" id="{}">{}</div></div>"#,
                        escape_text(row.title),
                        row.id,
                        row.chart.markup(),
                    ));
                }
                html.push_str("</div></div>");
                html
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdverseThresholds;
    use chrono::{TimeDelta, TimeZone};

    fn config() -> EventConfig {
        serde_json::from_str(
            r#"{
                "name": "Super Bowl LX",
                "location": "Levi's Stadium",
                "latitude": 37.403147,
                "longitude": -121.969814,
                "timezone": "America/Los_Angeles",
                "startDate": "2026-02-08T15:30:00-08:00",
                "endDate": "2026-02-08T22:00:00-08:00"
            }"#,
        )
        .expect("valid config")
    }

    fn forecast() -> HourlyForecast {
        let start = Utc.with_ymd_and_hms(2026, 2, 8, 16, 0, 0).unwrap();
        let hours = (0..24)
            .map(|i| {
                let mut point = HourlyPoint::empty(start + TimeDelta::hours(i));
                point.temperature = Some(60.0 + i as f64);
                point.probability_of_precipitation = Some(if i == 5 { 40.0 } else { 0.0 });
                point
            })
            .collect();
        HourlyForecast {
            timestamp: start,
            source: Some("NWS Gridpoint Forecast (MTR 97,87)".to_string()),
            hours,
            adverse_thresholds: AdverseThresholds::default(),
            error: None,
        }
    }

    #[test]
    fn test_tick_labels_in_venue_offset() {
        let config = config();
        let labels = tick_labels(&forecast().hours, config.venue_offset());
        assert_eq!(labels.len(), 24);
        // 16:00 UTC is 8 AM Pacific.
        assert_eq!(
            labels[0],
            Some(TickLabel::new("8 AM", Some("Sun".to_string())))
        );
        assert_eq!(labels[1], None);
        assert_eq!(labels[3].as_ref().map(|l| l.primary.as_str()), Some("11 AM"));
        assert_eq!(labels.iter().flatten().count(), 8);
    }

    #[test]
    fn test_three_rows_with_cloud_cover_placeholder() {
        let timeline = build_timeline(&forecast(), &config(), ChartSize::default());
        let Timeline::Rows(rows) = &timeline else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 3);
        assert!(rows[0].chart.is_chart());
        assert!(rows[1].chart.is_chart());
        assert!(matches!(rows[2].chart, RenderedChart::NoData(_)));

        let html = timeline.to_html();
        assert!(html.contains("Rain Chance (%)"));
        assert!(html.contains(r#"id="graph-sky""#));
        assert!(html.contains("Kickoff"));
    }

    #[test]
    fn test_error_and_empty_forecasts_render_messages() {
        let config = config();
        let now = Utc.with_ymd_and_hms(2026, 2, 8, 16, 0, 0).unwrap();
        let failed = HourlyForecast::failed(
            "Unable to fetch gridpoint forecast: HTTP 503 from api.weather.gov",
            AdverseThresholds::default(),
            now,
        );
        assert_eq!(
            build_timeline(&failed, &config, ChartSize::default()).to_html(),
            r#"<div class="error-msg">Unable to fetch gridpoint forecast: HTTP 503 from api.weather.gov</div>"#
        );

        let mut empty = forecast();
        empty.hours.clear();
        assert_eq!(
            build_timeline(&empty, &config, ChartSize::default()),
            Timeline::Message("No gridpoint data available".to_string())
        );
    }
}
