use std::fmt;

use serde::Serialize;

use crate::sorted_f64;

/// Returns the arithmetic mean of `values`.
///
/// An empty sequence yields `0.0` rather than `NaN`.
///
/// # Examples
///
/// ```
/// # use vitals_stats::descriptive::mean;
/// assert_eq!(mean([70, 80, 90]), 80.0);
/// assert_eq!(mean(Vec::<i32>::new()), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<T, I>(values: I) -> f64
where
    T: Into<f64>,
    I: IntoIterator<Item = T>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v.into(), count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Returns the median of `values`, or `None` if the sequence is empty.
///
/// Odd-length input yields the middle element of the sorted sequence,
/// even-length input the average of the two central elements.
///
/// # Examples
///
/// ```
/// # use vitals_stats::descriptive::median;
/// assert_eq!(median([3, 1, 2]), Some(2.0));
/// assert_eq!(median([4, 1, 3, 2]), Some(2.5));
/// assert_eq!(median(Vec::<f64>::new()), None);
/// ```
#[must_use]
pub fn median<T, I>(values: I) -> Option<f64>
where
    T: Into<f64>,
    I: IntoIterator<Item = T>,
{
    median_of_sorted(&sorted_f64(values))
}

/// Median of values already sorted in ascending order.
pub(crate) fn median_of_sorted(sorted_values: &[f64]) -> Option<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let n = sorted_values.len();
    let mid = n / 2;
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted_values[mid]),
        _ => Some(f64::midpoint(sorted_values[mid - 1], sorted_values[mid])),
    }
}

/// The most frequent values of a dataset.
///
/// Ties are kept: every value sharing the maximum frequency is a member.
/// Members are unique and stored in ascending order, so two modes compare
/// equal regardless of the order the input was given in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode<T> {
    values: Vec<T>,
    frequency: usize,
}

impl<T> Mode<T> {
    /// The tied most frequent values, ascending.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// How many times each member occurs in the input.
    #[must_use]
    pub fn frequency(&self) -> usize {
        self.frequency
    }

}

/// Writes the members as a bracketed list.
///
/// Members are written in their `Debug` form, so a whole float keeps its
/// decimal point (`[37.0]`) and stays distinguishable from an integer.
impl<T> fmt::Display for Mode<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Debug::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

/// Returns the mode of `values`, or `None` if the sequence is empty.
///
/// # Examples
///
/// ```
/// # use vitals_stats::descriptive::mode;
/// let mode = mode([72, 80, 72, 80, 95]).unwrap();
/// assert_eq!(mode.values(), &[72, 80]);
/// assert_eq!(mode.frequency(), 2);
/// ```
#[must_use]
pub fn mode<T, I>(values: I) -> Option<Mode<T>>
where
    T: Copy + Into<f64>,
    I: IntoIterator<Item = T>,
{
    let mut sorted = values.into_iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| Into::<f64>::into(*a).total_cmp(&(*b).into()));

    let mut members = vec![];
    let mut frequency = 0;
    for run in sorted.chunk_by(|a, b| Into::<f64>::into(*a).total_cmp(&(*b).into()).is_eq()) {
        match run.len().cmp(&frequency) {
            std::cmp::Ordering::Greater => {
                members.clear();
                members.push(run[0]);
                frequency = run.len();
            }
            std::cmp::Ordering::Equal => members.push(run[0]),
            std::cmp::Ordering::Less => {}
        }
    }

    (frequency > 0).then_some(Mode {
        values: members,
        frequency,
    })
}

/// Descriptive statistics summarizing one vital sign across a cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats<T> {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The most frequent value(s) of the dataset.
    pub mode: Mode<T>,
}

impl<T> DescriptiveStats<T>
where
    T: Copy + Into<f64>,
{
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use vitals_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([36.8, 37.0, 37.0, 38.4]).unwrap();
    /// assert_eq!(stats.count, 4);
    /// assert_eq!(stats.min, 36.8);
    /// assert_eq!(stats.max, 38.4);
    /// assert_eq!(stats.median, 37.0);
    /// assert_eq!(stats.mode.values(), &[37.0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let sorted = sorted_f64(values.iter().copied());

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let median = median_of_sorted(&sorted)?;
        let mode = mode(values.iter().copied())?;

        Some(Self {
            count: values.len(),
            min,
            max,
            mean: mean(sorted.iter().copied()),
            median,
            mode,
        })
    }
}
