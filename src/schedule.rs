//! Economy-interval derivation over a power-consumption series.

use std::fmt;

use serde::Serialize;

/// One point of a power series.
///
/// Timestamps are hours from midnight and non-decreasing across a series;
/// duplicates are allowed and treated as distinct points. Wattage may be
/// negative (net export) or positive (net draw).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerSample {
    /// Hours from midnight.
    pub time_hr: f32,
    /// Net power in watts.
    pub watts: f32,
}

impl PowerSample {
    /// Creates a sample at the given time.
    pub fn new(time_hr: f32, watts: f32) -> Self {
        Self { time_hr, watts }
    }
}

/// Maximal contiguous run of samples satisfying the economy predicate.
///
/// `end_hr` is the timestamp of the first sample that fails the predicate
/// after the run, or the last sample of the series when the run extends to
/// the end. A single-sample run yields `start_hr == end_hr`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EconomyInterval {
    pub start_hr: f32,
    pub end_hr: f32,
}

impl EconomyInterval {
    /// Width of the interval in hours.
    pub fn duration_hr(&self) -> f32 {
        self.end_hr - self.start_hr
    }

    /// Half-open containment; a zero-width interval contains exactly its
    /// own timestamp.
    pub fn contains(&self, time_hr: f32) -> bool {
        if self.start_hr == self.end_hr {
            return time_hr == self.start_hr;
        }
        time_hr >= self.start_hr && time_hr < self.end_hr
    }
}

impl fmt::Display for EconomyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}h..{:.2}h", self.start_hr, self.end_hr)
    }
}

/// Stock economy predicate: consumption strictly below `threshold_w`.
pub fn below_threshold(threshold_w: f32) -> impl Fn(&PowerSample) -> bool {
    move |sample| sample.watts < threshold_w
}

/// Run-length encodes `predicate` over `samples` into maximal intervals.
///
/// Walks the series once, opening an interval at the first sample of each
/// true-run and closing it at the first failing sample after the run (or at
/// the final sample, inclusive, when the run reaches the end of the
/// series). The result is non-overlapping and sorted by construction.
///
/// Pure: no I/O, no input mutation, identical output for identical input.
/// Safe to call on a streaming prefix as a lower bound on completed
/// intervals; only the final, possibly-open interval can change as more
/// samples arrive.
///
/// # Examples
///
/// ```
/// use plugdash::schedule::{below_threshold, derive_intervals, PowerSample};
///
/// let samples = vec![
///     PowerSample::new(0.0, 500.0),
///     PowerSample::new(1.0, 100.0),
///     PowerSample::new(2.0, 500.0),
/// ];
/// let intervals = derive_intervals(&samples, below_threshold(400.0));
/// assert_eq!(intervals.len(), 1);
/// assert_eq!(intervals[0].start_hr, 1.0);
/// assert_eq!(intervals[0].end_hr, 2.0);
/// ```
pub fn derive_intervals<P>(samples: &[PowerSample], predicate: P) -> Vec<EconomyInterval>
where
    P: Fn(&PowerSample) -> bool,
{
    let mut intervals = Vec::new();
    let mut open_start: Option<f32> = None;

    for sample in samples {
        if predicate(sample) {
            if open_start.is_none() {
                open_start = Some(sample.time_hr);
            }
        } else if let Some(start_hr) = open_start.take() {
            intervals.push(EconomyInterval {
                start_hr,
                end_hr: sample.time_hr,
            });
        }
    }

    if let (Some(start_hr), Some(last)) = (open_start, samples.last()) {
        intervals.push(EconomyInterval {
            start_hr,
            end_hr: last.time_hr,
        });
    }

    intervals
}

/// Aggregate report over a derived interval set.
///
/// Computed post-hoc so the reported numbers always match the interval
/// data they came from.
#[derive(Debug, Clone)]
pub struct ScheduleSummary {
    /// Number of economy windows.
    pub interval_count: usize,
    /// Total economy time in hours.
    pub economy_hr: f32,
    /// Economy time as a percentage of the day.
    pub economy_pct: f32,
    /// Duration of the longest window in hours.
    pub longest_hr: f32,
}

impl ScheduleSummary {
    /// Computes the summary for a day of `day_hr` hours.
    pub fn from_intervals(intervals: &[EconomyInterval], day_hr: f32) -> Self {
        let economy_hr: f32 = intervals.iter().map(EconomyInterval::duration_hr).sum();
        let longest_hr = intervals
            .iter()
            .map(EconomyInterval::duration_hr)
            .fold(0.0_f32, f32::max);
        let economy_pct = if day_hr > 0.0 {
            100.0 * economy_hr / day_hr
        } else {
            0.0
        };

        Self {
            interval_count: intervals.len(),
            economy_hr,
            economy_pct,
            longest_hr,
        }
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Economy Schedule ---")?;
        writeln!(f, "Economy windows:  {}", self.interval_count)?;
        writeln!(
            f,
            "Economy time:     {:.2} h ({:.1}% of day)",
            self.economy_hr, self.economy_pct
        )?;
        write!(f, "Longest window:   {:.2} h", self.longest_hr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(watts: &[f32]) -> Vec<PowerSample> {
        watts
            .iter()
            .enumerate()
            .map(|(i, &w)| PowerSample::new(i as f32, w))
            .collect()
    }

    #[test]
    fn empty_series_yields_no_intervals() {
        let intervals = derive_intervals(&[], below_threshold(400.0));
        assert!(intervals.is_empty());
    }

    #[test]
    fn no_match_yields_no_intervals() {
        let samples = series(&[500.0, 600.0, 700.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert!(intervals.is_empty());
    }

    #[test]
    fn full_match_yields_one_spanning_interval() {
        let samples = series(&[100.0, 200.0, 300.0, 100.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(
            intervals,
            vec![EconomyInterval {
                start_hr: 0.0,
                end_hr: 3.0
            }]
        );
    }

    #[test]
    fn single_matching_sample_yields_zero_width_interval() {
        let samples = series(&[100.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start_hr, intervals[0].end_hr);
        assert_eq!(intervals[0].duration_hr(), 0.0);
    }

    #[test]
    fn interior_run_closes_at_first_failing_sample() {
        let samples = series(&[500.0, 500.0, 100.0, 100.0, 500.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(
            intervals,
            vec![EconomyInterval {
                start_hr: 2.0,
                end_hr: 4.0
            }]
        );
    }

    #[test]
    fn trailing_run_closes_at_last_sample() {
        let samples = series(&[500.0, 100.0, 100.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(
            intervals,
            vec![EconomyInterval {
                start_hr: 1.0,
                end_hr: 2.0
            }]
        );
    }

    #[test]
    fn separate_runs_stay_separate() {
        let samples = series(&[100.0, 500.0, 100.0, 500.0, 100.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(intervals.len(), 3);
        assert!(
            intervals
                .windows(2)
                .all(|pair| pair[0].end_hr <= pair[1].start_hr)
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let samples = series(&[100.0, 500.0, 100.0, 100.0, 500.0, 100.0]);
        let first = derive_intervals(&samples, below_threshold(400.0));
        let second = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(first, second);
    }

    #[test]
    fn negative_wattage_counts_as_draw_below_threshold() {
        // Net export samples satisfy any positive threshold.
        let samples = series(&[-120.0, 600.0]);
        let intervals = derive_intervals(&samples, below_threshold(400.0));
        assert_eq!(
            intervals,
            vec![EconomyInterval {
                start_hr: 0.0,
                end_hr: 1.0
            }]
        );
    }

    #[test]
    fn containment_is_half_open() {
        let interval = EconomyInterval {
            start_hr: 2.0,
            end_hr: 4.0,
        };
        assert!(interval.contains(2.0));
        assert!(interval.contains(3.9));
        assert!(!interval.contains(4.0));
        assert!(!interval.contains(1.9));
    }

    #[test]
    fn zero_width_interval_contains_only_itself() {
        let interval = EconomyInterval {
            start_hr: 2.0,
            end_hr: 2.0,
        };
        assert!(interval.contains(2.0));
        assert!(!interval.contains(2.1));
    }

    #[test]
    fn summary_totals_match_interval_data() {
        let intervals = vec![
            EconomyInterval {
                start_hr: 1.0,
                end_hr: 3.0,
            },
            EconomyInterval {
                start_hr: 5.0,
                end_hr: 5.5,
            },
        ];
        let summary = ScheduleSummary::from_intervals(&intervals, 24.0);
        assert_eq!(summary.interval_count, 2);
        assert!((summary.economy_hr - 2.5).abs() < 1e-6);
        assert!((summary.longest_hr - 2.0).abs() < 1e-6);
        assert!((summary.economy_pct - 100.0 * 2.5 / 24.0).abs() < 1e-4);
    }

    #[test]
    fn summary_of_empty_set_is_zeroed() {
        let summary = ScheduleSummary::from_intervals(&[], 24.0);
        assert_eq!(summary.interval_count, 0);
        assert_eq!(summary.economy_hr, 0.0);
        assert_eq!(summary.economy_pct, 0.0);
        assert_eq!(summary.longest_hr, 0.0);
    }

    #[test]
    fn summary_display_does_not_panic() {
        let summary = ScheduleSummary::from_intervals(&[], 24.0);
        assert!(!format!("{summary}").is_empty());
    }
}
