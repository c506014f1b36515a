use itertools_num::linspace;

pub const BUCKET_WIDTH: f64 = 0.5;

/// Counts of earthquake magnitudes in fixed-width buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// left edge of the first bucket
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {

    /// Bucket magnitudes with one spare integer unit on either side of the data.
    pub fn from_magnitudes(magnitudes: &[f64]) -> Histogram {
        if magnitudes.is_empty() {
            return Histogram { min: 0.0, max: 0.0, width: BUCKET_WIDTH, counts: Vec::new() };
        }
        let lo = magnitudes.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = magnitudes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = lo.trunc() - 1.0;
        let max = hi.trunc() + 1.0;

        let buckets = ((max - min) / BUCKET_WIDTH) as usize + 1;
        let mut counts = vec![0usize; buckets];
        for m in magnitudes {
            let index = ((m - min) / BUCKET_WIDTH) as usize;
            counts[index.min(buckets - 1)] += 1;
        }
        Histogram { min, max, width: BUCKET_WIDTH, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// left edge of every bucket
    pub fn edges(&self) -> Vec<f64> {
        let n = self.counts.len();
        if n == 0 {
            return Vec::new();
        }
        let last = self.min + self.width * (n - 1) as f64;
        linspace(self.min, last, n).collect()
    }

    /// `ln(count)` per bucket, 0 for empty buckets
    pub fn log_counts(&self) -> Vec<f64> {
        self.counts.iter()
            .map(|&c| if c == 0 { 0.0 } else { (c as f64).ln() })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_histogram() {
        let h = Histogram::from_magnitudes(&[]);
        assert!(h.counts.is_empty());
        assert!(h.edges().is_empty());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn buckets_pad_one_unit_each_side() {
        let h = Histogram::from_magnitudes(&[-1.2, 0.3, 0.4, 2.7]);
        assert_eq!(h.min, -2.0);
        assert_eq!(h.max, 3.0);
        assert_eq!(h.counts.len(), 11);
        assert_eq!(h.total(), 4);
        // 0.3 and 0.4 share [0.0, 0.5)
        assert_eq!(h.counts[4], 2);
        assert_eq!(h.counts[1], 1);
        assert_eq!(h.counts[9], 1);
    }

    #[test]
    fn edges_step_by_bucket_width() {
        let h = Histogram::from_magnitudes(&[1.1]);
        assert_eq!(h.edges(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn log_counts_leave_empty_buckets_at_zero() {
        let h = Histogram::from_magnitudes(&[0.1, 0.2, 0.3]);
        let logs = h.log_counts();
        assert_eq!(logs[2], 3.0f64.ln());
        assert_eq!(logs[0], 0.0);
    }
}
