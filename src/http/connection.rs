use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, warn};

use crate::http::error::{ErrorKind, ParseError};
use crate::http::parser::{ParserConfig, read_request};
use crate::http::request::Request;
use crate::http::response::{StatusCode, default_headers};
use crate::http::writer::ResponseWriter;

/// One request/response cycle over a single connection.
///
/// The request is read from `reader`; the handler receives it together with
/// a fresh [`ResponseWriter`] over `writer`. Connections are never reused.
pub struct Connection<R, W> {
    reader: R,
    writer: ResponseWriter<W>,
    config: ParserConfig,
}

impl Connection<OwnedReadHalf, OwnedWriteHalf> {
    pub fn from_tcp(stream: TcpStream, config: ParserConfig) -> Self {
        let (reader, writer) = stream.into_split();
        Self::new(reader, writer, config)
    }
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, config: ParserConfig) -> Self {
        Self {
            reader,
            writer: ResponseWriter::new(writer),
            config,
        }
    }

    /// Reads one request and hands it to `handler`.
    ///
    /// A malformed or truncated request is answered with `400 Bad Request`
    /// and the handler is not called. I/O errors abort the cycle.
    ///
    /// The handler owns the writer. The write side closes when the writer is
    /// dropped, which happens no later than the handler's return; call
    /// [`ResponseWriter::shutdown`] to close it explicitly and observe errors.
    pub async fn run<H, Fut>(mut self, handler: H) -> anyhow::Result<()>
    where
        H: FnOnce(Request, ResponseWriter<W>) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        match read_request(&mut self.reader, &self.config).await {
            Ok(request) => {
                debug!(
                    method = %request.method(),
                    target = %request.target(),
                    headers = request.headers.len(),
                    body_len = request.body.len(),
                    "Parsed request"
                );
                handler(request, self.writer).await
            }
            Err(e) if e.kind() == ErrorKind::Io => Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Rejecting malformed request");
                self.reject(&e).await
            }
        }
    }

    async fn reject(&mut self, err: &ParseError) -> anyhow::Result<()> {
        let body = format!("Error parsing request: {}", err);
        self.writer.write_status_line(StatusCode::BAD_REQUEST).await?;
        self.writer.write_headers(&default_headers(body.len())).await?;
        self.writer.write_body(body.as_bytes()).await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
