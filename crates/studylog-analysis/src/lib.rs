//! Offline analysis of user study trial logs
//!
//! This crate turns the CSV event logs recorded during a target-search user
//! study into per-marker reaction time statistics.
//!
//! # Overview
//!
//! Each trial is one CSV file. Within a trial, the subject is shown a marker
//! (the target to look for), the log records when the target was found on
//! screen and when the subject hit it. The reaction time of a segment is the
//! time between the `Found` and the `Hit` event.
//!
//! 1. **Classify Rows** ([`row`]): Extract `Marker`/`Found`/`Hit` events from records
//! 2. **Reconstruct Segments** ([`parser::TrialParser`]): Pair found and hit
//!    events under the most recent marker
//! 3. **Aggregate** ([`aggregator::TrialAggregator`]): Collect reaction times per
//!    marker and summarize them with [`studylog_stats`]
//!
//! Trials are independent: every log gets a fresh aggregator.
//!
//! # Examples
//!
//! ```
//! use studylog_analysis::parser::{OrphanHitPolicy, parse_reader};
//!
//! let log = "\
//! 1,Marker,0.0,Tower
//! 2,Found,10.0,
//! 3,Hit,12.0,
//! 4,Marker,0.0,Tower
//! 5,Found,20.0,
//! 6,Hit,23.0,
//! ";
//! let trial = parse_reader("trial.csv", log.as_bytes(), OrphanHitPolicy::Skip)?;
//! let report = trial.aggregator.report();
//! assert_eq!(report.markers[0].marker, "Tower");
//! assert_eq!(report.markers[0].summary.mean, 2.5);
//! # Ok::<(), studylog_analysis::parser::ParseError>(())
//! ```

pub mod aggregator;
pub mod parser;
pub mod row;
