//! Quartiles and IQR-based outlier fences.
//!
//! Quartiles use the "exclusive halves" convention: the sorted data is split
//! into a lower half (the first `n / 2` values) and an upper half (values from
//! index `ceil(n / 2)` onward), so the median itself is left out of both halves
//! when `n` is odd. Q1 and Q3 are the medians of those halves.

use serde::Serialize;

use crate::{StatsError, descriptive::median_of_sorted, sorted_f64};

/// Multiplier applied to the IQR to place the fences (Tukey's rule).
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Smallest dataset for which both halves are non-empty.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// First and third quartiles of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from unsorted values.
    ///
    /// Fails with [`StatsError::InsufficientData`] for fewer than
    /// [`MIN_SAMPLE_SIZE`] values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vitals_stats::outlier::Quartiles;
    /// let quartiles = Quartiles::new([7, 1, 5, 3, 2, 6, 4]).unwrap();
    /// assert_eq!(quartiles.q1, 2.0);
    /// assert_eq!(quartiles.q3, 6.0);
    /// ```
    pub fn new<T, I>(values: I) -> Result<Self, StatsError>
    where
        T: Into<f64>,
        I: IntoIterator<Item = T>,
    {
        Self::from_sorted(&sorted_f64(values))
    }

    /// Computes quartiles from values sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, StatsError> {
        let n = sorted_values.len();
        let lower_half = &sorted_values[..n / 2];
        let upper_half = &sorted_values[n.div_ceil(2)..];
        match (median_of_sorted(lower_half), median_of_sorted(upper_half)) {
            (Some(q1), Some(q3)) => Ok(Self { q1, q3 }),
            _ => Err(StatsError::InsufficientData {
                required: MIN_SAMPLE_SIZE,
                actual: n,
            }),
        }
    }

    /// Interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Outlier fences for one numeric sequence, plus the values beyond them.
///
/// A value is an outlier when it lies strictly below
/// `Q1 - 1.5 * IQR` or strictly above `Q3 + 1.5 * IQR`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierBounds<T> {
    quartiles: Quartiles,
    lower_fence: f64,
    upper_fence: f64,
    outliers: Vec<T>,
}

impl<T> OutlierBounds<T>
where
    T: Copy + Into<f64>,
{
    /// Computes fences from `values` and collects the outliers in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vitals_stats::outlier::OutlierBounds;
    /// let bounds = OutlierBounds::new([72, 75, 78, 80, 82, 85, 140]).unwrap();
    /// assert_eq!(bounds.outliers(), &[140]);
    /// ```
    pub fn new<I>(values: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let quartiles = Quartiles::new(values.iter().copied())?;

        let iqr = quartiles.iqr();
        let lower_fence = quartiles.q1 - IQR_MULTIPLIER * iqr;
        let upper_fence = quartiles.q3 + IQR_MULTIPLIER * iqr;

        let mut bounds = Self {
            quartiles,
            lower_fence,
            upper_fence,
            outliers: vec![],
        };
        bounds.outliers = values
            .into_iter()
            .filter(|&v| bounds.is_outlier(v))
            .collect();
        Ok(bounds)
    }

    /// Whether `value` falls strictly outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: T) -> bool {
        let value = value.into();
        value < self.lower_fence || value > self.upper_fence
    }
}

impl<T> OutlierBounds<T> {
    #[must_use]
    pub fn q1(&self) -> f64 {
        self.quartiles.q1
    }

    #[must_use]
    pub fn q3(&self) -> f64 {
        self.quartiles.q3
    }

    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.quartiles.iqr()
    }

    #[must_use]
    pub fn lower_fence(&self) -> f64 {
        self.lower_fence
    }

    #[must_use]
    pub fn upper_fence(&self) -> f64 {
        self.upper_fence
    }

    /// Values outside the fences, in the order they were given.
    #[must_use]
    pub fn outliers(&self) -> &[T] {
        &self.outliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_length_known_quartiles() {
        let bounds = OutlierBounds::new([1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(bounds.q1(), 2.5);
        assert_eq!(bounds.q3(), 6.5);
        assert_eq!(bounds.iqr(), 4.0);
        assert_eq!(bounds.lower_fence(), -3.5);
        assert_eq!(bounds.upper_fence(), 12.5);
        assert!(bounds.outliers().is_empty());
    }

    #[test]
    fn test_odd_length_excludes_median_from_halves() {
        let quartiles = Quartiles::new([4, 1, 7, 3, 6, 2, 5]).unwrap();
        assert_eq!(quartiles.q1, 2.0);
        assert_eq!(quartiles.q3, 6.0);
    }

    #[test]
    fn test_fences_are_strict() {
        let bounds = OutlierBounds::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        assert!(!bounds.is_outlier(12.5));
        assert!(!bounds.is_outlier(-3.5));
        assert!(bounds.is_outlier(12.6));
        assert!(bounds.is_outlier(-3.6));
    }

    #[test]
    fn test_outliers_keep_input_order() {
        let bounds = OutlierBounds::new([30, 1, 2, 3, 4, 5, 6, 7, 8, -40]).unwrap();
        assert_eq!(bounds.outliers(), &[30, -40]);
    }

    #[test]
    fn test_high_outlier_detected() {
        let bounds = OutlierBounds::new([1, 2, 3, 4, 5, 6, 7, 8, 30]).unwrap();
        assert_eq!(bounds.q1(), 2.5);
        assert_eq!(bounds.q3(), 7.5);
        assert_eq!(bounds.upper_fence(), 15.0);
        assert_eq!(bounds.outliers(), &[30]);
    }

    #[test]
    fn test_decimal_temperatures() {
        let bounds = OutlierBounds::new([37.0, 36.5, 40.1, 36.8, 37.2, 37.1]).unwrap();
        assert_eq!(bounds.q1(), 36.8);
        assert_eq!(bounds.q3(), 37.2);
        assert_eq!(bounds.outliers(), &[40.1]);
    }

    #[test]
    fn test_two_values_use_single_element_halves() {
        let bounds = OutlierBounds::new([20, 10]).unwrap();
        assert_eq!(bounds.q1(), 10.0);
        assert_eq!(bounds.q3(), 20.0);
        assert_eq!(bounds.lower_fence(), -5.0);
        assert_eq!(bounds.upper_fence(), 35.0);
    }

    #[test]
    fn test_constant_values_have_zero_width_fences() {
        let bounds = OutlierBounds::new([80, 80, 80, 80]).unwrap();
        assert_eq!(bounds.iqr(), 0.0);
        assert_eq!(bounds.lower_fence(), 80.0);
        assert_eq!(bounds.upper_fence(), 80.0);
        assert!(bounds.outliers().is_empty());
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            OutlierBounds::<i32>::new([]).unwrap_err(),
            StatsError::InsufficientData {
                required: 2,
                actual: 0
            }
        );
        assert_eq!(
            OutlierBounds::new([98]).unwrap_err(),
            StatsError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }
}
