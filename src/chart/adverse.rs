use crate::chart::chart_spec::ThresholdDirection;

/// Maximal runs of consecutive indices whose value is adverse, as inclusive
/// `(start, end)` pairs. Missing values end a run.
pub fn adverse_runs(
    values: &[Option<f64>],
    threshold: f64,
    direction: ThresholdDirection,
) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, value) in values.iter().enumerate() {
        let adverse = value.is_some_and(|v| direction.is_adverse(v, threshold));
        match (adverse, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, values.len() - 1));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_contiguous_run() {
        let values = [Some(10.0), Some(85.0), Some(90.0), Some(20.0)];
        assert_eq!(adverse_runs(&values, 80.0, ThresholdDirection::Above), vec![(1, 2)]);
    }

    #[test]
    fn test_runs_split_by_gap_and_reach_the_end() {
        let values = [Some(90.0), None, Some(90.0), Some(95.0)];
        assert_eq!(
            adverse_runs(&values, 80.0, ThresholdDirection::Above),
            vec![(0, 0), (2, 3)]
        );
    }

    #[test]
    fn test_below_direction() {
        let values = [Some(10.0), Some(85.0), Some(5.0)];
        assert_eq!(
            adverse_runs(&values, 20.0, ThresholdDirection::Below),
            vec![(0, 0), (2, 2)]
        );
    }

    #[test]
    fn test_equal_to_threshold_is_not_adverse() {
        assert!(adverse_runs(&[Some(80.0)], 80.0, ThresholdDirection::Above).is_empty());
    }
}
