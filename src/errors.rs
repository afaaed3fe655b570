use std::path::PathBuf;

use thiserror::Error;
use warp::reject;

/// Enumerates errors returned while reading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Represents a required environment variable that is not set.
    #[error("must define {name} environment variable")]
    MissingVariable { name: &'static str },

    /// Represents an environment variable that could not be parsed.
    #[error("could not parse {name}: {reason}")]
    InvalidVariable { name: &'static str, reason: String },

    /// Represents a schema override that could not be read.
    #[error("could not read schema file {path:?}")]
    SchemaFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents a schema override that could not be parsed.
    #[error("could not parse schema file {path:?}")]
    SchemaSyntax {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Represents a schema override that parsed but is unusable.
    #[error("invalid schema in {path:?}")]
    InvalidSchema { path: PathBuf, source: SchemaError },
}

/// Enumerates problems with a form schema definition.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("field {name} is declared more than once")]
    DuplicateField { name: String },

    #[error("column {column} is used by more than one field")]
    DuplicateColumn { column: String },

    #[error("field {name} uses the reserved column {column}")]
    ReservedColumn { name: String, column: String },

    #[error("rule {rule} can't apply to field {field}")]
    InapplicableRule { field: String, rule: String },

    #[error("field {field} offers no options")]
    MissingOptions { field: String },

    #[error("pairing names unknown field {name}")]
    UnknownPairedField { name: String },

    #[error("schema is for {found} but {expected} was expected")]
    WrongKind { expected: String, found: String },

    #[error("schema declares no fields")]
    Empty,
}

/// Enumerates errors raised by the form state controller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormError {
    /// Represents an update to a field the schema doesn’t declare.
    #[error("unknown field {name}")]
    UnknownField { name: String },
}

/// Enumerates errors returned by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents an HTTP client that could not be set up.
    #[error("could not create HTTP client")]
    Client { source: reqwest::Error },

    /// Represents a failure to reach the backend at all.
    #[error("request to backend failed")]
    Request { source: reqwest::Error },

    /// Represents a response other than success from the backend.
    #[error("backend rejected insert with status {status}")]
    Rejected { status: u16, body: String },

    /// Represents a collection name that doesn’t form a valid URL.
    #[error("could not build endpoint for {collection}")]
    Endpoint {
        collection: String,
        source: url::ParseError,
    },

    /// Represents a record that could not be encoded.
    #[error("could not encode record")]
    Encoding { source: serde_json::Error },

    /// Represents an insert refused by a test double.
    #[error("insert refused: {reason}")]
    Unavailable { reason: String },
}

/// Enumerates high-level errors returned by the HTTP surface.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Represents a request naming an unknown form.
    #[error("unknown form {0}")]
    UnknownForm(String),

    /// Represents a submission containing a field the form doesn’t have.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Represents a field value of the wrong JSON type.
    #[error("field {name} must be a string, a list of strings or null")]
    MalformedValue { name: String },

    /// Represents a submission that isn’t a JSON object.
    #[error("submission must be a JSON object")]
    MalformedSubmission,
}

impl reject::Reject for IntakeError {}
