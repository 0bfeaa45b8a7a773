pub struct StatsHelper;

impl StatsHelper {
    /// Largest absolute value, `0.0` for an empty slice.
    pub fn max_abs(samples: &[f64]) -> f64 {
        samples.iter().fold(0.0, |acc: f64, &v| acc.max(v.abs()))
    }

    pub fn sum(samples: &[f64]) -> f64 {
        samples.iter().sum()
    }
}
