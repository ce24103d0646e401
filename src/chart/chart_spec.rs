use crate::types::hourly_point::HourlyPoint;
use bon::Builder;
use chrono::{DateTime, Utc};

pub const DEFAULT_MARKER_LABEL: &str = "Kickoff";

/// How the vertical axis is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    /// Fixed 0 to 100.
    Percentage,
    /// Bounds derived from the data, snapped to multiples of five.
    #[default]
    Natural,
}

/// Which side of the threshold counts as adverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdDirection {
    #[default]
    Above,
    Below,
}

impl ThresholdDirection {
    /// Strict comparison: a value equal to the threshold is never adverse.
    pub fn is_adverse(self, value: f64, threshold: f64) -> bool {
        match self {
            ThresholdDirection::Above => value > threshold,
            ThresholdDirection::Below => value < threshold,
        }
    }
}

/// Two-line label drawn under a vertical tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickLabel {
    pub primary: String,
    pub secondary: Option<String>,
}

impl TickLabel {
    pub fn new(primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary,
        }
    }
}

/// Pixel size of the container a chart is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

impl Default for ChartSize {
    fn default() -> Self {
        Self::new(800.0, 160.0)
    }
}

/// Space reserved around the plot for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 38.0,
            right: 8.0,
            top: 14.0,
            bottom: 28.0,
        }
    }
}

/// Everything needed to draw one chart row.
///
/// ```
/// use event_weather::{ChartMode, ChartSpec};
///
/// let spec = ChartSpec::builder()
///     .values(vec![Some(10.0), Some(85.0), Some(90.0), Some(20.0)])
///     .color("#4caf50")
///     .mode(ChartMode::Percentage)
///     .threshold(80.0)
///     .build();
/// assert_eq!(spec.values.len(), 4);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ChartSpec<'a> {
    pub values: Vec<Option<f64>>,
    /// Same length as `values`; `None` where no tick label is drawn.
    #[builder(default)]
    pub labels: Vec<Option<TickLabel>>,
    #[builder(into)]
    pub color: String,
    #[builder(default)]
    pub mode: ChartMode,
    pub threshold: Option<f64>,
    #[builder(default)]
    pub direction: ThresholdDirection,
    /// The hours the values belong to, used to place the event marker.
    #[builder(default)]
    pub hours: &'a [HourlyPoint],
    pub event_time: Option<DateTime<Utc>>,
    #[builder(into)]
    pub marker_label: Option<String>,
}

impl ChartSpec<'_> {
    pub fn marker_label(&self) -> &str {
        self.marker_label.as_deref().unwrap_or(DEFAULT_MARKER_LABEL)
    }

    /// Values with non-finite numbers treated as missing.
    pub fn clean_values(&self) -> Vec<Option<f64>> {
        self.values
            .iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect()
    }

    pub fn is_adverse(&self, value: f64) -> bool {
        self.threshold
            .is_some_and(|t| t.is_finite() && self.direction.is_adverse(value, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_strict() {
        assert!(ThresholdDirection::Above.is_adverse(81.0, 80.0));
        assert!(!ThresholdDirection::Above.is_adverse(80.0, 80.0));
        assert!(ThresholdDirection::Below.is_adverse(79.0, 80.0));
        assert!(!ThresholdDirection::Below.is_adverse(80.0, 80.0));
    }

    #[test]
    fn test_builder_defaults() {
        let spec = ChartSpec::builder()
            .values(vec![Some(1.0), Some(f64::NAN), None])
            .color("#2196f3")
            .build();
        assert_eq!(spec.mode, ChartMode::Natural);
        assert_eq!(spec.direction, ThresholdDirection::Above);
        assert!(spec.hours.is_empty());
        assert_eq!(spec.marker_label(), "Kickoff");
        assert_eq!(spec.clean_values(), vec![Some(1.0), None, None]);
        assert!(!spec.is_adverse(1000.0));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(ChartSize::new(0.0, 100.0).is_degenerate());
        assert!(ChartSize::new(100.0, 0.0).is_degenerate());
        assert!(ChartSize::new(f64::NAN, 100.0).is_degenerate());
        assert!(!ChartSize::default().is_degenerate());
    }
}
