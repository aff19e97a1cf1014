//! Statistical building blocks for the clinic vitals analyzer.
//!
//! This crate provides the pure, I/O-free part of the analysis:
//!
//! - **Descriptive statistics**: mean, median and mode over a numeric sequence
//! - **Outlier bounds**: quartiles and IQR-derived fences (Tukey's rule)
//! - **Histogram generation**: equal-width frequency distributions
//!
//! Every function accepts any `Copy + Into<f64>` value type, so integer vitals
//! (`i32`) and decimal ones (`f64`) share the same code paths.
//!
//! # Modules
//!
//! - [`descriptive`]: Mean, median, mode and a combined summary
//! - [`outlier`]: Quartiles and outlier fences
//! - [`histogram`]: Histogram construction for visualizing data distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use vitals_stats::descriptive::DescriptiveStats;
//!
//! let values = [72, 80, 80, 95, 101];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 85.6);
//! assert_eq!(stats.median, 80.0);
//! assert_eq!(stats.mode.values(), &[80]);
//! ```
//!
//! ## Computing outlier fences
//!
//! ```
//! use vitals_stats::outlier::OutlierBounds;
//!
//! let bounds = OutlierBounds::new([1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//! assert_eq!(bounds.lower_fence(), -3.5);
//! assert_eq!(bounds.upper_fence(), 12.5);
//! assert!(bounds.outliers().is_empty());
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use vitals_stats::histogram::Histogram;
//!
//! let histogram = Histogram::new([60, 65, 70, 75, 80, 85, 90, 95, 100, 105], 10);
//! assert_eq!(histogram.bins.len(), 10);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod outlier;

/// Errors raised when a statistic is undefined for its input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("insufficient data: need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

/// Collects values as `f64` and sorts them ascending.
pub(crate) fn sorted_f64<T, I>(values: I) -> Vec<f64>
where
    T: Into<f64>,
    I: IntoIterator<Item = T>,
{
    let mut sorted = values.into_iter().map(Into::into).collect::<Vec<f64>>();
    sorted.sort_by(f64::total_cmp);
    sorted
}
