use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// The column every record carries its submission time in.
pub const SUBMITTED_AT: &str = "submitted_at";

/// The logical collections records are appended to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Applications,
    Contacts,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Applications => "applications",
            Collection::Contacts => "contacts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frozen, timestamped snapshot of a completed form, keyed by backend
/// column names.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    columns: Map<String, Value>,
}

impl Record {
    /// Freezes validated column values, stamping them with
    /// `submitted_at`.
    pub(crate) fn new(
        columns: impl IntoIterator<Item = (String, Value)>,
        submitted_at: OffsetDateTime,
    ) -> Self {
        let mut columns: Map<String, Value> = columns.into_iter().collect();
        columns.insert(
            SUBMITTED_AT.to_owned(),
            Value::String(format_timestamp(submitted_at)),
        );

        Record { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn submitted_at(&self) -> Option<&str> {
        self.columns.get(SUBMITTED_AT).and_then(Value::as_str)
    }
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.unix_timestamp().to_string())
}
