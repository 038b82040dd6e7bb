use thiserror::Error;

/// Top-level error returned by [`crate::MojiClient`].
#[derive(Error, Debug)]
pub enum Error {
    /// Required credential is missing; raised while building the client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure of the network collaborator. Passed through to the caller unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A required JSON field is absent, has the wrong JSON type, or is not a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedFieldError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` is not a valid number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// A date or timestamp string does not match its fixed layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalParseError {
    #[error("{input:?} does not match layout {layout}")]
    Layout { input: String, layout: &'static str },

    #[error("{input:?} is not a valid calendar date or time")]
    OutOfRange { input: String },

    /// Wall-clock time skipped by a DST transition in the local zone.
    #[error("{input:?} does not exist in the local time zone")]
    Nonexistent { input: String },
}

/// Any failure while building a decoded value. Nothing partial is ever returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to parse response JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    Field(#[from] MalformedFieldError),

    #[error("Invalid `{field}`: {source}")]
    Temporal {
        field: &'static str,
        #[source]
        source: TemporalParseError,
    },

    /// Only produced in strict mode, see [`crate::DecodeOptions`].
    #[error("Service responded with code {code}: {msg}")]
    Status { code: i64, msg: String },
}
