//! Statistical utilities for the studylog project.
//!
//! This crate provides the small set of sample statistics used to summarize
//! reaction times measured during a user study:
//!
//! - **Descriptive statistics**: sum, mean, sample variance, standard deviation
//!   and standard error of the mean
//! - **Sample summaries**: the above bundled together for a single sample, with
//!   undefined dispersion reported as `NaN`
//!
//! # Modules
//!
//! - [`descriptive`]: Free functions over slices and the [`SampleSummary`] type
//!
//! # Examples
//!
//! ## Computing individual statistics
//!
//! ```
//! use studylog_stats::descriptive;
//!
//! let times = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(descriptive::mean(&times), 5.0);
//! assert!((descriptive::sample_variance(&times) - 32.0 / 7.0).abs() < 1e-12);
//! ```
//!
//! ## Summarizing a sample
//!
//! ```
//! use studylog_stats::SampleSummary;
//!
//! let summary = SampleSummary::new(&[1.5, 2.5]).unwrap();
//! assert_eq!(summary.count, 2);
//! assert_eq!(summary.mean, 2.0);
//! assert!(summary.has_dispersion());
//! ```
//!
//! [`SampleSummary`]: descriptive::SampleSummary

pub use self::descriptive::SampleSummary;

pub mod descriptive;
