//! Error types for schedule parsing.
//!
//! Every failure aborts the whole parse: there is no per-event recovery and
//! no partial result. Callers decide whether to skip the document, log, or
//! propagate further.

use std::fmt;
use thiserror::Error;

/// The category of a schedule error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleErrorKind {
    /// The document is not well-formed XML or declares entities.
    MalformedDocument,
    /// An event lacks `date`, `duration`, or its `id` attribute.
    MissingRequiredField,
    /// A date or duration string does not match the expected grammar.
    UnparsableValue,
}

impl ScheduleErrorKind {
    /// Returns a stable machine-readable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedDocument => "malformed_document",
            Self::MissingRequiredField => "missing_required_field",
            Self::UnparsableValue => "unparsable_value",
        }
    }
}

impl fmt::Display for ScheduleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while turning a Frab document into event records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// XML is not well-formed, or contains entity declarations.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// A mandatory element or attribute is absent.
    #[error("missing required field `{field}`{}", event_suffix(.event_id))]
    MissingRequiredField {
        field: &'static str,
        event_id: Option<String>,
    },

    /// A date or duration value could not be parsed.
    #[error("unparsable {field} value {value:?}{}", event_suffix(.event_id))]
    UnparsableValue {
        field: &'static str,
        value: String,
        event_id: Option<String>,
    },
}

impl ScheduleError {
    /// Creates a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField {
            field,
            event_id: None,
        }
    }

    /// Creates an unparsable value error.
    pub fn unparsable(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnparsableValue {
            field,
            value: value.into(),
            event_id: None,
        }
    }

    /// Attaches the id of the event being parsed, when known.
    pub fn for_event(mut self, id: &str) -> Self {
        match &mut self {
            Self::MissingRequiredField { event_id, .. } | Self::UnparsableValue { event_id, .. } => {
                *event_id = Some(id.to_string());
            }
            Self::MalformedDocument { .. } => {}
        }
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ScheduleErrorKind {
        match self {
            Self::MalformedDocument { .. } => ScheduleErrorKind::MalformedDocument,
            Self::MissingRequiredField { .. } => ScheduleErrorKind::MissingRequiredField,
            Self::UnparsableValue { .. } => ScheduleErrorKind::UnparsableValue,
        }
    }

    /// Returns the id of the offending event, if known.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { event_id, .. } | Self::UnparsableValue { event_id, .. } => {
                event_id.as_deref()
            }
            Self::MalformedDocument { .. } => None,
        }
    }
}

fn event_suffix(event_id: &Option<String>) -> String {
    match event_id {
        Some(id) => format!(" in event {id}"),
        None => String::new(),
    }
}

impl From<quick_xml::Error> for ScheduleError {
    fn from(err: quick_xml::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

/// A specialized Result type for schedule parsing.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
