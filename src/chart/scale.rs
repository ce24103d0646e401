use crate::chart::chart_spec::ChartMode;

/// Vertical axis bounds of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YScale {
    pub min: f64,
    pub max: f64,
}

impl YScale {
    /// Computes the bounds for `values`, or `None` when no value is present.
    ///
    /// Percentage mode is always 0 to 100. Natural mode pads the data by two
    /// units and snaps outwards to multiples of five; a span under ten is widened
    /// around its midpoint.
    pub fn for_values(values: &[Option<f64>], mode: ChartMode) -> Option<Self> {
        let mut valid = values.iter().flatten().copied().filter(|v| v.is_finite());
        let first = valid.next()?;
        if mode == ChartMode::Percentage {
            return Some(Self {
                min: 0.0,
                max: 100.0,
            });
        }

        let (lo, hi) = valid.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let mut min = ((lo - 2.0) / 5.0).floor() * 5.0;
        let mut max = ((hi + 2.0) / 5.0).ceil() * 5.0;
        if max - min < 10.0 {
            let mid = (min + max) / 2.0;
            min = ((mid - 5.0) / 5.0).floor() * 5.0;
            max = ((mid + 5.0) / 5.0).ceil() * 5.0;
        }
        Some(Self { min, max })
    }

    /// `max - min`, never zero.
    pub fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            1.0
        } else {
            range
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Fraction of the axis height `value` sits at, 0 at the bottom.
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds_ignore_data() {
        for values in [vec![Some(0.0); 24], vec![Some(100.0); 24], vec![None, Some(250.0)]] {
            let scale = YScale::for_values(&values, ChartMode::Percentage).expect("has data");
            assert_eq!((scale.min, scale.max), (0.0, 100.0));
        }
    }

    #[test]
    fn test_natural_bounds_snap_to_five() {
        let scale =
            YScale::for_values(&[Some(51.3), None, Some(63.0)], ChartMode::Natural).expect("data");
        assert_eq!((scale.min, scale.max), (45.0, 65.0));
    }

    #[test]
    fn test_natural_narrow_span_is_widened() {
        // 62.5 pads to [60.5, 64.5] which snaps to [60, 65], a span of five.
        let scale = YScale::for_values(&[Some(62.5)], ChartMode::Natural).expect("data");
        assert_eq!((scale.min, scale.max), (55.0, 70.0));
        assert!(scale.max - scale.min >= 10.0);
    }

    #[test]
    fn test_no_values_has_no_scale() {
        assert!(YScale::for_values(&[None, None], ChartMode::Natural).is_none());
        assert!(YScale::for_values(&[], ChartMode::Percentage).is_none());
    }
}
