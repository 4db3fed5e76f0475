//! Error types for record transformation.

use thiserror::Error;

/// Result type alias for transformation.
pub type Result<T> = std::result::Result<T, TransformError>;

/// A record that could not be reshaped into its canonical form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A field value could not be interpreted.
    #[error("Failed to parse {field} value '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A field failure tagged with the record it came from.
    #[error("Failed to transform animal {id}: {source}")]
    Record {
        id: i64,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    pub(crate) fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Tag this error with a record id. Already tagged errors keep their id.
    pub fn for_record(self, id: i64) -> Self {
        match self {
            Self::Record { .. } => self,
            other => Self::Record {
                id,
                source: Box::new(other),
            },
        }
    }

    /// Id of the failing record, if tagged.
    pub fn record_id(&self) -> Option<i64> {
        match self {
            Self::Record { id, .. } => Some(*id),
            Self::InvalidField { .. } => None,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidField { field, .. } => field,
            Self::Record { source, .. } => source.field(),
        }
    }

    /// The raw value that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidField { value, .. } => value,
            Self::Record { source, .. } => source.value(),
        }
    }
}
