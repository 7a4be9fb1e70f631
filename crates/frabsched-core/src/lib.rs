//! Core types: Frab schedule parsing, event records, time and text helpers
//!
//! The entry point is [`schedule::parse`], which turns the bytes of a Frab
//! schedule document into a list of [`EventRecord`]s. Nothing in this crate
//! performs I/O.

pub mod error;
pub mod record;
pub mod schedule;
pub mod text;
pub mod time;
pub mod tracing;
pub mod xml;

pub use error::{ScheduleError, ScheduleErrorKind, ScheduleResult};
pub use record::{EventRecord, UNKNOWN_LANG};
pub use schedule::{ScheduleParser, parse};
pub use text::{strip_tags, text_or_default};
pub use time::{parse_duration, parse_start, wall_clock};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use xml::{Element, parse_document};
