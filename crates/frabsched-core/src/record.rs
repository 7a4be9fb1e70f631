//! The normalized event record produced from a Frab schedule.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Language value used when an event has no `language` element or it is empty.
pub const UNKNOWN_LANG: &str = "unknown";

/// One conference event, flattened out of the day/room/event hierarchy.
///
/// Records are built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Source-assigned event identifier (the `id` attribute).
    pub id: String,
    /// Caller-supplied label shared by every record of one parse.
    pub group: String,
    /// Event title, empty if absent.
    pub title: String,
    /// Room name, empty if absent.
    pub place: String,
    /// Abstract with angle-bracket tags removed, empty if absent.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Speaker names in document order, trimmed.
    pub speakers: Vec<String>,
    /// `href` of the first link, empty if there is none.
    pub link: String,
    /// Language code, [`UNKNOWN_LANG`] if absent.
    pub lang: String,
    /// Start instant in UTC.
    pub start: DateTime<Utc>,
    /// Local wall-clock start, `HH:MM`, in the schedule's own offset.
    pub start_str: String,
    /// Local wall-clock end, `HH:MM`, in the schedule's own offset.
    pub end_str: String,
    /// Start as seconds since the Unix epoch.
    pub start_unix: i64,
    /// End as seconds since the Unix epoch.
    pub end_unix: i64,
    /// Length in whole minutes.
    pub duration: i64,
}

impl EventRecord {
    /// Returns the end instant in UTC.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.duration)
    }

    /// Returns true if the event has no length.
    pub fn is_zero_length(&self) -> bool {
        self.start_unix == self.end_unix
    }

    /// Returns true if at least one speaker is listed.
    pub fn has_speakers(&self) -> bool {
        !self.speakers.is_empty()
    }

    /// Returns true if the language was not given by the schedule.
    pub fn is_lang_unknown(&self) -> bool {
        self.lang == UNKNOWN_LANG
    }

    /// Returns the local time range as `HH:MM-HH:MM`.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_str, self.end_str)
    }
}
