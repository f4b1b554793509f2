//! Incremental request parsing.
//!
//! [`RequestParser`] is a synchronous state object: bytes go in through
//! [`RequestParser::feed`] in whatever fragments the transport produced, and
//! it advances as far as the buffered bytes allow without ever assuming the
//! full message is present. [`read_request`] drives it from an async source.

use std::fmt;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::http::error::ParseError;
use crate::http::find_crlf;
use crate::http::headers::{Headers, is_tchar};
use crate::http::request::{Request, RequestLine};

const HTTP_VERSION: &str = "1.1";

/// Position of the parser within a request. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    AwaitingRequestLine,
    AwaitingHeaders,
    AwaitingBody,
    Done,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseState::AwaitingRequestLine => "awaiting request line",
            ParseState::AwaitingHeaders => "awaiting headers",
            ParseState::AwaitingBody => "awaiting body",
            ParseState::Done => "done",
        };
        f.write_str(s)
    }
}

/// Result of feeding bytes into a [`RequestParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More bytes are required before the request is complete.
    NeedMore,
    /// The request is complete; take it with [`RequestParser::into_request`].
    Complete,
}

#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum number of bytes requested from the source per read.
    pub read_chunk_size: usize,
    /// Upper bound on request line plus header block, terminator included.
    pub max_head_size: usize,
    /// Largest `Content-Length` accepted.
    pub max_body_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: 1024,
            max_head_size: 8 * 1024,
            max_body_size: 1024 * 1024,
        }
    }
}

/// Parses the request line at the front of `data`.
///
/// Returns `Ok(None)` while no complete line is buffered. On success returns
/// the line and the number of bytes it occupied, terminator included.
pub fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(end) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..end]).map_err(|_| {
        ParseError::InvalidRequestLine(String::from_utf8_lossy(&data[..end]).into_owned())
    })?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequestLine(line.to_string()));
    };

    if method.is_empty() || !method.bytes().all(is_tchar) {
        return Err(ParseError::InvalidMethod(method.to_string()));
    }
    if target.is_empty() {
        return Err(ParseError::InvalidRequestLine(line.to_string()));
    }

    let version = version
        .strip_prefix("HTTP/")
        .ok_or_else(|| ParseError::InvalidRequestLine(line.to_string()))?;
    if version != HTTP_VERSION {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    };
    Ok(Some((request_line, end + 2)))
}

#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    buf: BytesMut,
    line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
    content_length: usize,
    head_len: usize,
    max_head_size: usize,
    max_body_size: usize,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    /// Creates a parser enforcing the size limits in `config`.
    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            state: ParseState::AwaitingRequestLine,
            buf: BytesMut::with_capacity(1024),
            line: None,
            headers: Headers::new(),
            body: Vec::new(),
            content_length: 0,
            head_len: 0,
            max_head_size: config.max_head_size,
            max_body_size: config.max_body_size,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Appends `data` to the internal buffer and advances as far as possible.
    ///
    /// Bytes fed after the request is complete are kept aside untouched; see
    /// [`RequestParser::leftover`].
    pub fn feed(&mut self, data: &[u8]) -> Result<Progress, ParseError> {
        self.buf.extend_from_slice(data);
        self.advance()
    }

    fn advance(&mut self) -> Result<Progress, ParseError> {
        loop {
            match self.state {
                ParseState::AwaitingRequestLine => match parse_request_line(&self.buf)? {
                    Some((line, n)) => {
                        self.consume_head(n)?;
                        self.line = Some(line);
                        self.transition(ParseState::AwaitingHeaders);
                    }
                    None => return self.need_more(),
                },
                ParseState::AwaitingHeaders => {
                    let (n, done) = self.headers.parse(&self.buf)?;
                    if n == 0 {
                        return self.need_more();
                    }
                    self.consume_head(n)?;

                    if done {
                        self.content_length = content_length(&self.headers)?;
                        if self.content_length > self.max_body_size {
                            return Err(ParseError::BodyTooLarge {
                                length: self.content_length,
                                limit: self.max_body_size,
                            });
                        }
                        if self.content_length == 0 {
                            self.transition(ParseState::Done);
                        } else {
                            self.transition(ParseState::AwaitingBody);
                        }
                    }
                }
                ParseState::AwaitingBody => {
                    let wanted = self.content_length - self.body.len();
                    let take = wanted.min(self.buf.len());
                    self.body.extend_from_slice(&self.buf.split_to(take));

                    if self.body.len() < self.content_length {
                        return Ok(Progress::NeedMore);
                    }
                    self.transition(ParseState::Done);
                }
                ParseState::Done => return Ok(Progress::Complete),
            }
        }
    }

    fn consume_head(&mut self, n: usize) -> Result<(), ParseError> {
        self.buf.advance(n);
        self.head_len += n;
        if self.head_len > self.max_head_size {
            return Err(ParseError::HeadTooLarge {
                limit: self.max_head_size,
            });
        }
        Ok(())
    }

    fn need_more(&self) -> Result<Progress, ParseError> {
        if self.head_len + self.buf.len() > self.max_head_size {
            return Err(ParseError::HeadTooLarge {
                limit: self.max_head_size,
            });
        }
        Ok(Progress::NeedMore)
    }

    fn transition(&mut self, next: ParseState) {
        trace!(from = %self.state, to = %next, "request parser transition");
        self.state = next;
    }

    /// The error to report when the source ends before the request does.
    pub fn end_of_stream(&self) -> ParseError {
        ParseError::Incomplete { state: self.state }
    }

    /// Bytes buffered beyond the end of a completed request.
    pub fn leftover(&self) -> &[u8] {
        match self.state {
            ParseState::Done => &self.buf,
            _ => &[],
        }
    }

    /// Takes the parsed request. Fails unless the parser reached `Done`.
    pub fn into_request(self) -> Result<Request, ParseError> {
        match (self.state, self.line) {
            (ParseState::Done, Some(line)) => Ok(Request {
                line,
                headers: self.headers,
                body: self.body,
            }),
            (state, _) => Err(ParseError::Incomplete { state }),
        }
    }
}

/// `Content-Length = 1*DIGIT`; signs and whitespace are rejected.
fn content_length(headers: &Headers) -> Result<usize, ParseError> {
    let Some(value) = headers.get("content-length") else {
        return Ok(0);
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidContentLength(value.to_string()));
    }
    value
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(value.to_string()))
}

/// Reads one request from `reader`, issuing as many reads as it takes.
///
/// End-of-stream before the request is complete is an
/// [`Incomplete`](ParseError::Incomplete) error. Bytes read past the end of
/// the body are discarded.
pub async fn read_request<R>(reader: &mut R, config: &ParserConfig) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut parser = RequestParser::with_config(config);
    let mut chunk = vec![0u8; config.read_chunk_size.max(1)];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(parser.end_of_stream());
        }

        if parser.feed(&chunk[..n])? == Progress::Complete {
            if !parser.leftover().is_empty() {
                trace!(bytes = parser.leftover().len(), "ignoring bytes past end of request");
            }
            return parser.into_request();
        }
    }
}
