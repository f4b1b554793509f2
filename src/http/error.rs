//! Error types for request parsing and response writing.

use std::io;

use crate::http::parser::ParseState;
use crate::http::writer::{Operation, WriterState};

/// Broad class of a framing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request line or header line.
    Syntax,
    /// Unusable body length, or the stream ended before the message did.
    Framing,
    /// A writer operation was called out of order.
    State,
    /// The underlying source or sink failed.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("unsupported http version: {0:?}")]
    UnsupportedVersion(String),

    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("malformed header line: {0:?}")]
    InvalidHeader(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("stream ended while {state}")]
    Incomplete { state: ParseState },

    #[error("request head exceeds {limit} bytes")]
    HeadTooLarge { limit: usize },

    #[error("content-length {length} exceeds {limit} bytes")]
    BodyTooLarge { length: usize, limit: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidRequestLine(_)
            | ParseError::InvalidMethod(_)
            | ParseError::UnsupportedVersion(_)
            | ParseError::InvalidHeaderName(_)
            | ParseError::InvalidHeader(_) => ErrorKind::Syntax,
            ParseError::InvalidContentLength(_)
            | ParseError::Incomplete { .. }
            | ParseError::HeadTooLarge { .. }
            | ParseError::BodyTooLarge { .. } => ErrorKind::Framing,
            ParseError::Io(_) => ErrorKind::Io,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("cannot {op} in state {state}")]
    InvalidState { op: Operation, state: WriterState },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WriteError::InvalidState { .. } => ErrorKind::State,
            WriteError::Io(_) => ErrorKind::Io,
        }
    }
}
