//! Per-trial collection of reaction times grouped by marker.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use studylog_stats::SampleSummary;

/// Reaction times observed during one trial, grouped by marker name.
///
/// Markers are kept in lexicographic order. Observations are only ever added,
/// never removed.
///
/// # Examples
///
/// ```
/// use studylog_analysis::aggregator::TrialAggregator;
///
/// let mut trial = TrialAggregator::new();
/// trial.add_event("Tower", 2.0);
/// trial.add_event("Tower", 3.0);
/// trial.add_event("Bridge", 1.5);
///
/// let report = trial.report();
/// assert_eq!(
///     report.to_string(),
///     "Bridge: Mean: 1.5 SD: NaN SE: NaN\n\
///      Tower: Mean: 2.5 SD: 0.7071067811865476 SE: 0.5\n"
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrialAggregator {
    targets: BTreeMap<String, Vec<f64>>,
}

impl TrialAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an elapsed time for a marker.
    ///
    /// Any time is accepted, including negative values.
    pub fn add_event<S>(&mut self, marker: S, time: f64)
    where
        S: Into<String>,
    {
        self.targets.entry(marker.into()).or_default().push(time);
    }

    /// Returns the observations recorded for a marker, in insertion order.
    #[must_use]
    pub fn observations(&self, marker: &str) -> Option<&[f64]> {
        self.targets.get(marker).map(Vec::as_slice)
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Number of distinct markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Total number of observations across all markers.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.targets.values().map(Vec::len).sum()
    }

    /// Summarizes every marker.
    #[must_use]
    pub fn report(&self) -> TrialReport {
        let markers = self
            .targets
            .iter()
            .filter_map(|(marker, times)| {
                Some(MarkerReport {
                    marker: marker.clone(),
                    summary: SampleSummary::new(times)?,
                })
            })
            .collect();
        TrialReport { markers }
    }
}

/// Statistics of every marker of a trial.
///
/// The [`Display`](fmt::Display) form has one line per marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    pub markers: Vec<MarkerReport>,
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for marker in &self.markers {
            writeln!(f, "{marker}")?;
        }
        Ok(())
    }
}

/// Statistics of the reaction times recorded for one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerReport {
    pub marker: String,
    #[serde(flatten)]
    pub summary: SampleSummary,
}

impl fmt::Display for MarkerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { marker, summary } = self;
        write!(
            f,
            "{marker}: Mean: {} SD: {} SE: {}",
            summary.mean, summary.std_dev, summary.std_err
        )
    }
}
