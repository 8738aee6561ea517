//! Classification of trial log rows into events.
//!
//! Each CSV record of a trial log is classified by the text in its tag column.
//! A row is tagged with every keyword (`Marker`, `Found`, `Hit`) that occurs in
//! that text, so a single row may produce several events. Rows carrying none of
//! the keywords are ignored by the parser.
//!
//! # Column layout
//!
//! ```text
//! col 0   col 1 (tag)   col 2 (timestamp)   col 3 (marker name)
//! ------  ------------  ------------------  -------------------
//! ...     Marker        ...                 target name
//! ...     Found         seconds (float)     ...
//! ...     Hit           seconds (float)     ...
//! ```

use csv::StringRecord;

/// Column holding the event tag text.
pub const TAG_COLUMN: usize = 1;
/// Column holding the timestamp of `Found` and `Hit` rows.
pub const TIMESTAMP_COLUMN: usize = 2;
/// Column holding the marker name of `Marker` rows.
pub const MARKER_NAME_COLUMN: usize = 3;

/// Kind of event a trial log row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EventTag {
    /// Start of a target-search segment.
    Marker,
    /// The target became visible.
    Found,
    /// The subject selected the target.
    Hit,
}

impl EventTag {
    /// All tags, in the order their transitions are applied to a row.
    pub const ALL: [Self; 3] = [Self::Marker, Self::Found, Self::Hit];

    /// Keyword searched for in the tag column.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Marker => "Marker",
            Self::Found => "Found",
            Self::Hit => "Hit",
        }
    }
}

/// Set of tags found in a row's tag column.
///
/// An empty set stands for rows that carry no event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventTags {
    marker: bool,
    found: bool,
    hit: bool,
}

impl EventTags {
    /// Classifies tag text by keyword occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use studylog_analysis::row::{EventTag, EventTags};
    ///
    /// let tags = EventTags::classify("Target Found");
    /// assert!(tags.contains(EventTag::Found));
    /// assert!(!tags.contains(EventTag::Hit));
    /// assert!(EventTags::classify("Heading").is_empty());
    /// ```
    #[must_use]
    pub fn classify(text: &str) -> Self {
        Self {
            marker: text.contains(EventTag::Marker.keyword()),
            found: text.contains(EventTag::Found.keyword()),
            hit: text.contains(EventTag::Hit.keyword()),
        }
    }

    #[must_use]
    pub const fn contains(self, tag: EventTag) -> bool {
        match tag {
            EventTag::Marker => self.marker,
            EventTag::Found => self.found,
            EventTag::Hit => self.hit,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.marker || self.found || self.hit)
    }

    /// Iterates over the contained tags in transition order.
    pub fn iter(self) -> impl Iterator<Item = EventTag> {
        EventTag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

/// An event extracted from a trial log row.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum RowEvent {
    Marker { name: String },
    Found { timestamp: f64 },
    Hit { timestamp: f64 },
}

/// Why a row could not be turned into events.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MalformedRowReason {
    #[display("{tag} row has no column {column}")]
    MissingColumn { tag: EventTag, column: usize },
    #[display("{tag} row has invalid timestamp {value:?}")]
    InvalidTimestamp { tag: EventTag, value: String },
}

/// Extracts the events of a record, in transition order.
///
/// Returns an empty vector for rows that carry no tag. Only the columns needed
/// by the row's tags are validated.
///
/// # Examples
///
/// ```
/// use csv::StringRecord;
/// use studylog_analysis::row::{parse_record, RowEvent};
///
/// let record = StringRecord::from(vec!["0", "Found", "10.25", ""]);
/// let events = parse_record(&record).unwrap();
/// assert_eq!(events, vec![RowEvent::Found { timestamp: 10.25 }]);
/// ```
pub fn parse_record(record: &StringRecord) -> Result<Vec<RowEvent>, MalformedRowReason> {
    let tags = record
        .get(TAG_COLUMN)
        .map(EventTags::classify)
        .unwrap_or_default();

    tags.iter()
        .map(|tag| match tag {
            EventTag::Marker => {
                let name = column(record, tag, MARKER_NAME_COLUMN)?;
                Ok(RowEvent::Marker {
                    name: name.trim().to_owned(),
                })
            }
            EventTag::Found => Ok(RowEvent::Found {
                timestamp: timestamp(record, tag)?,
            }),
            EventTag::Hit => Ok(RowEvent::Hit {
                timestamp: timestamp(record, tag)?,
            }),
        })
        .collect()
}

fn column(record: &StringRecord, tag: EventTag, column: usize) -> Result<&str, MalformedRowReason> {
    record
        .get(column)
        .ok_or(MalformedRowReason::MissingColumn { tag, column })
}

fn timestamp(record: &StringRecord, tag: EventTag) -> Result<f64, MalformedRowReason> {
    let value = column(record, tag, TIMESTAMP_COLUMN)?;
    value
        .trim()
        .parse()
        .map_err(|_| MalformedRowReason::InvalidTimestamp {
            tag,
            value: value.to_owned(),
        })
}
