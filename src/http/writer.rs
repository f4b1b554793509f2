//! Response serialization with enforced ordering.
//!
//! A [`ResponseWriter`] only accepts calls that are legal in its current
//! state. Each call renders all of its bytes into one buffer before touching
//! the sink, so a rejected call writes nothing, and the state only moves once
//! the write succeeded. Bytes from earlier calls stay on the sink.

use std::fmt;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error::WriteError;
use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    StatusLine,
    Headers,
    Body,
    Trailers,
    /// Trailers were written; the response is complete.
    Finished,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriterState::StatusLine => "status line",
            WriterState::Headers => "headers",
            WriterState::Body => "body",
            WriterState::Trailers => "trailers",
            WriterState::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// A public [`ResponseWriter`] call, named in state errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    WriteStatusLine,
    WriteHeaders,
    WriteBody,
    WriteChunkedBody,
    WriteChunkedBodyDone,
    WriteTrailers,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::WriteStatusLine => "write status line",
            Operation::WriteHeaders => "write headers",
            Operation::WriteBody => "write body",
            Operation::WriteChunkedBody => "write chunked body",
            Operation::WriteChunkedBodyDone => "finish chunked body",
            Operation::WriteTrailers => "write trailers",
        };
        f.write_str(s)
    }
}

pub struct ResponseWriter<W> {
    state: WriterState,
    sink: W,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: W) -> Self {
        Self {
            state: WriterState::StatusLine,
            sink,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes `HTTP/1.1 <code> [<reason>]\r\n`.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        self.expect(WriterState::StatusLine, Operation::WriteStatusLine)?;
        let line = format!("{} {}\r\n", HTTP_VERSION, status);
        self.emit(line.as_bytes(), WriterState::Headers).await
    }

    /// Writes the header block and its blank-line terminator.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        self.expect(WriterState::Headers, Operation::WriteHeaders)?;
        let mut buf = Vec::new();
        headers.encode(&mut buf);
        self.emit(&buf, WriterState::Body).await
    }

    /// Writes raw body bytes. May be called repeatedly; framing such as a
    /// matching `Content-Length` is up to the caller.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        self.expect(WriterState::Body, Operation::WriteBody)?;
        self.emit(body, WriterState::Body).await?;
        Ok(body.len())
    }

    /// Writes one chunk: `<hex len>\r\n<bytes>\r\n`.
    ///
    /// Returns the number of bytes put on the wire, framing included. An
    /// empty chunk writes nothing, since `0\r\n` would end the body.
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> Result<usize, WriteError> {
        self.expect(WriterState::Body, Operation::WriteChunkedBody)?;
        if chunk.is_empty() {
            return Ok(0);
        }
        let mut buf = Vec::with_capacity(chunk.len() + 12);
        buf.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        buf.extend_from_slice(chunk);
        buf.extend_from_slice(b"\r\n");
        self.emit(&buf, WriterState::Body).await?;
        Ok(buf.len())
    }

    /// Writes the terminal `0\r\n` chunk. Trailers must follow.
    pub async fn write_chunked_body_done(&mut self) -> Result<(), WriteError> {
        self.expect(WriterState::Body, Operation::WriteChunkedBodyDone)?;
        self.emit(b"0\r\n", WriterState::Trailers).await
    }

    /// Writes the trailer block and ends the response. Pass an empty table
    /// to end a chunked body without trailers.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), WriteError> {
        self.expect(WriterState::Trailers, Operation::WriteTrailers)?;
        let mut buf = Vec::new();
        trailers.encode(&mut buf);
        self.emit(&buf, WriterState::Finished).await
    }

    pub async fn flush(&mut self) -> Result<(), WriteError> {
        self.sink.flush().await?;
        Ok(())
    }

    /// Flushes and shuts down the write side of the sink.
    pub async fn shutdown(&mut self) -> Result<(), WriteError> {
        self.sink.shutdown().await?;
        Ok(())
    }

    fn expect(&self, required: WriterState, op: Operation) -> Result<(), WriteError> {
        if self.state != required {
            return Err(WriteError::InvalidState {
                op,
                state: self.state,
            });
        }
        Ok(())
    }

    async fn emit(&mut self, bytes: &[u8], next: WriterState) -> Result<(), WriteError> {
        self.sink.write_all(bytes).await?;
        self.state = next;
        Ok(())
    }
}
