use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// A line that is not exactly `<label> <value>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("missing value after label `{0}`")]
    MissingValue(String),

    #[error("unexpected tokens after the value: `{0}`")]
    TrailingTokens(String),

    #[error("invalid value `{value}`")]
    InvalidValue {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("unable to open input `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("malformed input on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("received an event after the end of the stream")]
    Finalized,
}
