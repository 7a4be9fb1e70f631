//! Frab schedule to [`EventRecord`] conversion.
//!
//! The walk is `schedule > day > room > event`, depth-first in document
//! order. Each event becomes one record; any failure aborts the whole
//! document.
//!
//! # Example
//!
//! ```
//! use frabsched_core::schedule::parse;
//!
//! let xml = br#"<schedule><day><room name="A">
//!   <event id="1">
//!     <date>2024-03-01T10:00:00+01:00</date>
//!     <duration>01:30</duration>
//!     <title>Opening</title>
//!   </event>
//! </room></day></schedule>"#;
//!
//! let records = parse(xml, "demo").unwrap();
//! assert_eq!(records[0].duration, 90);
//! assert_eq!(records[0].end_str, "11:30");
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ScheduleError, ScheduleResult};
use crate::record::{EventRecord, UNKNOWN_LANG};
use crate::text::{strip_tags, text_or_default};
use crate::time::{parse_duration, parse_start, wall_clock};
use crate::xml::{Element, parse_document};

/// Parses Frab schedule XML into event records tagged with `group`.
///
/// # Errors
///
/// - [`ScheduleError::MalformedDocument`] if the XML is not well-formed
/// - [`ScheduleError::MissingRequiredField`] if an event has no `id`,
///   `date` or `duration`
/// - [`ScheduleError::UnparsableValue`] if a date or duration is invalid
pub fn parse(xml: &[u8], group: &str) -> ScheduleResult<Vec<EventRecord>> {
    ScheduleParser::new(group).parse(xml)
}

/// Stateless parser carrying the group label to stamp on each record.
#[derive(Debug, Clone)]
pub struct ScheduleParser {
    group: String,
}

impl ScheduleParser {
    /// Creates a parser for the given group.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    /// Returns the group label.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Parses a complete document.
    pub fn parse(&self, xml: &[u8]) -> ScheduleResult<Vec<EventRecord>> {
        let root = parse_document(xml)?;

        let records = all_events(&root)
            .map(|event| self.parse_event(event))
            .collect::<ScheduleResult<Vec<_>>>()?;

        info!(group = %self.group, count = records.len(), "Parsed schedule");
        Ok(records)
    }

    fn parse_event(&self, event: &Element) -> ScheduleResult<EventRecord> {
        let id = event
            .attr("id")
            .ok_or_else(|| ScheduleError::missing("id"))?;

        let date = required_text(event, "date").map_err(|e| e.for_event(id))?;
        let duration_text = required_text(event, "duration").map_err(|e| e.for_event(id))?;

        let start = parse_start(date).map_err(|e| e.for_event(id))?;
        let duration = parse_duration(duration_text).map_err(|e| e.for_event(id))?;
        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| ScheduleError::unparsable("duration", duration_text).for_event(id))?;

        let lang = text_or_default(event, "language", "");
        let record = EventRecord {
            id: id.to_string(),
            group: self.group.clone(),
            title: text_or_default(event, "title", ""),
            place: text_or_default(event, "room", ""),
            abstract_text: strip_tags(&text_or_default(event, "abstract", "")),
            speakers: speakers(event),
            link: first_link(event),
            lang: if lang.is_empty() {
                UNKNOWN_LANG.to_string()
            } else {
                lang
            },
            start: start.with_timezone(&Utc),
            start_str: wall_clock(&start),
            end_str: wall_clock(&end),
            start_unix: start.timestamp(),
            end_unix: end.timestamp(),
            duration: duration.num_seconds() / 60,
        };

        debug!(
            id = %record.id,
            title = %record.title,
            start = %record.start,
            duration = record.duration,
            "Parsed event"
        );

        Ok(record)
    }
}

/// Iterates over every `event` in `day > room > event` document order.
fn all_events(root: &Element) -> impl Iterator<Item = &Element> {
    root.children("day")
        .flat_map(|day| day.children("room"))
        .flat_map(|room| room.children("event"))
}

fn required_text<'a>(event: &'a Element, name: &'static str) -> ScheduleResult<&'a str> {
    event
        .child(name)
        .and_then(Element::text)
        .ok_or_else(|| ScheduleError::missing(name))
}

/// Collects trimmed `persons > person` names, skipping blank entries.
fn speakers(event: &Element) -> Vec<String> {
    event
        .child("persons")
        .map(|persons| {
            persons
                .children("person")
                .filter_map(Element::text)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the `href` of the first `links > link`, or an empty string.
fn first_link(event: &Element) -> String {
    event
        .child("links")
        .and_then(|links| links.child("link"))
        .and_then(|link| link.attr("href"))
        .unwrap_or_default()
        .to_string()
}
