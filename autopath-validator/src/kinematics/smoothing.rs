//! Symmetric moving-average smoothing

/// Smooth `values` with a centered moving average.
///
/// Each output is the mean of the inputs within `±window / 2` of its index.
/// Near the ends the window simply shrinks: there is no padding or wrap, so
/// a constant signal passes through unchanged and short inputs never fail.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    if half == 0 {
        return values.to_vec();
    }

    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(values.len());
            let neighborhood = &values[start..end];
            neighborhood.iter().sum::<f64>() / neighborhood.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_signal_unchanged() {
        let values = vec![1.5; 20];
        for window in [1, 3, 5, 11] {
            let smoothed = moving_average(&values, window);
            for v in smoothed {
                assert_relative_eq!(v, 1.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_window_shrinks_at_edges() {
        let values = [0.0, 3.0, 6.0, 9.0, 12.0];
        let smoothed = moving_average(&values, 3);
        assert_relative_eq!(smoothed[0], 1.5);
        assert_relative_eq!(smoothed[2], 6.0);
        assert_relative_eq!(smoothed[4], 10.5);
    }

    #[test]
    fn test_spike_is_spread() {
        let values = [0.0, 0.0, 10.0, 0.0, 0.0];
        let smoothed = moving_average(&values, 5);
        assert_relative_eq!(smoothed[2], 2.0);
        assert!(smoothed.iter().all(|v| *v < 10.0));
    }

    #[test]
    fn test_short_inputs() {
        assert!(moving_average(&[], 5).is_empty());
        assert_eq!(moving_average(&[4.0], 11), vec![4.0]);
        assert_eq!(moving_average(&[1.0, 3.0], 11), vec![2.0, 2.0]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = [1.0, -2.0, 3.0];
        assert_eq!(moving_average(&values, 1), values.to_vec());
        assert_eq!(moving_average(&values, 0), values.to_vec());
    }
}
