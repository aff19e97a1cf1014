use std::ops::Range;

use serde::Serialize;

use crate::sorted_f64;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is divided into bins of equal width. Every bin
/// is half-open except the last one, which also includes `max`, so each value
/// lands in exactly one bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from. Will be sorted internally.
    /// * `num_bins` - The number of equal-width bins to create.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vitals_stats::histogram::Histogram;
    /// let histogram = Histogram::new([72, 88, 95, 130, 76], 10);
    /// assert_eq!(histogram.bins.len(), 10);
    /// assert_eq!(histogram.bins[0].range.start, 72.0);
    /// assert_eq!(histogram.bins[9].range.end, 130.0);
    /// ```
    #[must_use]
    pub fn new<T, I>(values: I, num_bins: usize) -> Self
    where
        T: Into<f64>,
        I: IntoIterator<Item = T>,
    {
        Self::from_sorted(&sorted_f64(values), num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// An empty dataset or `num_bins == 0` yields a histogram without bins.
    /// When every value is identical the range is widened to `value ± 0.5`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let (min, max) = if last - first < f64::EPSILON {
            (first - 0.5, last + 0.5)
        } else {
            (first, last)
        };
        let bin_width = (max - min) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute bounds from `min` to avoid accumulating rounding errors
                let start = min + bin_idx as f64 * bin_width;
                let end = if bin_idx == num_bins - 1 {
                    max
                } else {
                    min + (bin_idx + 1) as f64 * bin_width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &value in sorted_values {
            let position = ((value - min) / bin_width).floor();
            let idx = if position <= 0.0 {
                0
            } else {
                (position as usize).min(num_bins - 1)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Count of the fullest bin, or 0 for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evenly_spread_values() {
        let histogram = Histogram::new([60, 65, 70, 75, 80, 85, 90, 95, 100, 105], 10);
        assert_eq!(histogram.bins.len(), 10);
        assert!(histogram.bins.iter().all(|bin| bin.count == 1));
        assert_eq!(histogram.bins[0].range, 60.0..64.5);
        assert_eq!(histogram.bins[9].range.end, 105.0);
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0, 10.0], 5);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[4].count, 2);
        assert_eq!(histogram.max_count(), 2);
    }

    #[test]
    fn test_constant_values_widen_range() {
        let histogram = Histogram::new([80, 80, 80], 10);
        assert_eq!(histogram.bins.first().unwrap().range.start, 79.5);
        assert_eq!(histogram.bins.last().unwrap().range.end, 80.5);
        assert_eq!(histogram.total_count(), 3);
        assert_eq!(histogram.bins.iter().filter(|bin| bin.count > 0).count(), 1);
    }

    #[test]
    fn test_empty_input_or_zero_bins() {
        assert!(Histogram::new(Vec::<i32>::new(), 10).bins.is_empty());
        assert!(Histogram::new([1, 2, 3], 0).bins.is_empty());
        assert_eq!(Histogram::new(Vec::<i32>::new(), 10).max_count(), 0);
    }

    #[test]
    fn test_counts_sum_to_input_length() {
        let values = [72, 74, 76, 88, 91, 99, 101, 103, 118, 125, 131, 140];
        let histogram = Histogram::new(values, 10);
        assert_eq!(histogram.total_count(), values.len() as u64);
    }
}
