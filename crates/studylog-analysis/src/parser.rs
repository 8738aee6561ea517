//! Trial log parser.
//!
//! Reconstructs `Marker -> Found -> Hit` sequences from the rows of one trial
//! log and records the time between each `Found` and `Hit` against the most
//! recent marker.
//!
//! # State machine
//!
//! The parser tracks the pending marker name and the pending found timestamp.
//! Events of a row are applied in the order `Marker`, `Found`, `Hit`:
//!
//! | Event    | Transition                                                       |
//! |----------|------------------------------------------------------------------|
//! | `Marker` | set the pending marker, clear the pending found timestamp        |
//! | `Found`  | set the pending found timestamp unless one is already pending    |
//! | `Hit`    | record `hit - found` for the pending marker; state is kept as is |
//!
//! A `Hit` with no pending marker or found timestamp is an orphan hit, handled
//! according to the [`OrphanHitPolicy`].
//!
//! # Examples
//!
//! ```
//! use studylog_analysis::parser::{OrphanHitPolicy, parse_reader};
//!
//! let log = "\
//! 0,Marker,0.0,Tower
//! 1,Found,10.0,
//! 2,Hit,12.5,
//! ";
//! let trial = parse_reader("trial.csv", log.as_bytes(), OrphanHitPolicy::Fail).unwrap();
//! assert_eq!(trial.aggregator.observations("Tower"), Some(&[2.5][..]));
//! ```

use std::{io, path::Path};

use crate::{
    aggregator::TrialAggregator,
    row::{self, MalformedRowReason, RowEvent},
};

/// How to handle a `Hit` row that has no pending `Found` or `Marker`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub enum OrphanHitPolicy {
    /// Log a warning and ignore the event.
    #[default]
    Skip,
    /// Abort parsing with [`ParseError::OrphanHit`].
    Fail,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("malformed row {row}: {reason}")]
    MalformedRow {
        row: usize,
        reason: MalformedRowReason,
    },
    #[display("row {row}: hit event without a preceding marker and found event")]
    OrphanHit { row: usize },
    #[display("failed to read CSV input")]
    Csv(csv::Error),
}

impl ParseError {
    /// Returns the 1-based row the error refers to, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MalformedRow { row, .. } | Self::OrphanHit { row } => Some(*row),
            Self::Csv(_) => None,
        }
    }
}

/// Result of parsing one trial log.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrial {
    pub aggregator: TrialAggregator,
    /// Number of records read.
    pub rows: usize,
    /// Number of orphan hits ignored under [`OrphanHitPolicy::Skip`].
    pub skipped_hits: usize,
}

/// Incremental trial log parser.
///
/// Feed rows in file order with [`TrialParser::feed`], then call
/// [`TrialParser::finish`].
#[derive(Debug)]
pub struct TrialParser {
    source: String,
    policy: OrphanHitPolicy,
    aggregator: TrialAggregator,
    pending_marker: Option<String>,
    pending_found: Option<f64>,
    rows: usize,
    skipped_hits: usize,
}

impl TrialParser {
    /// Creates a parser. `source` names the log in diagnostics.
    #[must_use]
    pub fn new<S>(source: S, policy: OrphanHitPolicy) -> Self
    where
        S: Into<String>,
    {
        Self {
            source: source.into(),
            policy,
            aggregator: TrialAggregator::new(),
            pending_marker: None,
            pending_found: None,
            rows: 0,
            skipped_hits: 0,
        }
    }

    /// Applies the events of the next row.
    ///
    /// `row` is the 1-based index of the record, used in errors and warnings.
    pub fn feed(&mut self, row: usize, events: Vec<RowEvent>) -> Result<(), ParseError> {
        self.rows += 1;
        for event in events {
            self.apply(row, event)?;
        }
        Ok(())
    }

    fn apply(&mut self, row: usize, event: RowEvent) -> Result<(), ParseError> {
        match event {
            RowEvent::Marker { name } => {
                self.pending_marker = Some(name);
                self.pending_found = None;
            }
            RowEvent::Found { timestamp } => {
                self.pending_found.get_or_insert(timestamp);
            }
            RowEvent::Hit { timestamp } => match (&self.pending_marker, self.pending_found) {
                (Some(marker), Some(found)) => {
                    self.aggregator.add_event(marker.as_str(), timestamp - found);
                }
                _ => match self.policy {
                    OrphanHitPolicy::Skip => {
                        log::warn!(
                            "{}: row {row}: ignoring hit event without a preceding marker and found event",
                            self.source
                        );
                        self.skipped_hits += 1;
                    }
                    OrphanHitPolicy::Fail => return Err(ParseError::OrphanHit { row }),
                },
            },
        }
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> ParsedTrial {
        ParsedTrial {
            aggregator: self.aggregator,
            rows: self.rows,
            skipped_hits: self.skipped_hits,
        }
    }
}

/// Parses a headerless trial log from a reader.
pub fn parse_reader<S, R>(
    source: S,
    reader: R,
    policy: OrphanHitPolicy,
) -> Result<ParsedTrial, ParseError>
where
    S: Into<String>,
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut parser = TrialParser::new(source, policy);
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(ParseError::Csv)?;
        let events = row::parse_record(&record)
            .map_err(|reason| ParseError::MalformedRow { row, reason })?;
        parser.feed(row, events)?;
    }
    Ok(parser.finish())
}

/// Parses the trial log stored at `path`.
pub fn parse_path<P>(path: P, policy: OrphanHitPolicy) -> Result<ParsedTrial, ParseError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| ParseError::Csv(e.into()))?;
    parse_reader(path.display().to_string(), io::BufReader::new(file), policy)
}
