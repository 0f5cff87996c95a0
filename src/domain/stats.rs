//! Summary statistics over a numeric series.
//!
//! Variance is the population variance (sum of squared deviations divided by
//! `n`), applied the same way to every series a bill reports on.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub var: f64,
    pub std: f64,
}

impl SeriesStats {
    /// Returns `None` for an empty series.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

        Some(SeriesStats {
            min,
            avg,
            max,
            var,
            std: var.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_series_has_no_stats() {
        assert!(SeriesStats::compute(&[]).is_none());
    }

    #[test]
    fn single_value() {
        let stats = SeriesStats::compute(&[3.5]).unwrap();
        assert_relative_eq!(stats.min, 3.5);
        assert_relative_eq!(stats.avg, 3.5);
        assert_relative_eq!(stats.max, 3.5);
        assert_relative_eq!(stats.var, 0.0);
        assert_relative_eq!(stats.std, 0.0);
    }

    #[test]
    fn population_variance() {
        let stats = SeriesStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(stats.min, 2.0);
        assert_relative_eq!(stats.max, 9.0);
        assert_relative_eq!(stats.avg, 5.0);
        assert_relative_eq!(stats.var, 4.0);
        assert_relative_eq!(stats.std, 2.0);
    }

    #[test]
    fn negative_values() {
        let stats = SeriesStats::compute(&[-1.0, -3.0]).unwrap();
        assert_relative_eq!(stats.min, -3.0);
        assert_relative_eq!(stats.max, -1.0);
        assert_relative_eq!(stats.avg, -2.0);
        assert_relative_eq!(stats.var, 1.0);
    }
}
