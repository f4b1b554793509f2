//! HTTP/1.1 message framing over raw byte streams.
//!
//! # Architecture
//!
//! - **`headers`**: case-insensitive header table with a line-at-a-time parser
//! - **`parser`**: request line parsing and the incremental request state machine
//! - **`request`**: the parsed request representation
//! - **`response`**: status codes and default response headers
//! - **`writer`**: response serializer that enforces legal call ordering
//! - **`connection`**: one read-handle-write cycle over a single connection
//! - **`error`**: parse and write errors
//!
//! # Request State Machine
//!
//! ```text
//!   AwaitingRequestLine ──► AwaitingHeaders ──► AwaitingBody ──► Done
//!                                  │                              ▲
//!                                  └── no Content-Length ─────────┘
//! ```
//!
//! # Response State Machine
//!
//! ```text
//!   StatusLine ──► Headers ──► Body ──► Trailers ──► Finished
//!                              │  ▲
//!                              └──┘ write_body / write_chunked_body
//! ```
//!
//! # Example
//!
//! ```ignore
//! use h1frame::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             let conn = Connection::from_tcp(socket, Default::default());
//!             if let Err(e) = conn.run(handler).await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

pub use error::{ErrorKind, ParseError, WriteError};
pub use headers::Headers;
pub use parser::{ParseState, ParserConfig, Progress, RequestParser, read_request};
pub use request::{Request, RequestLine};
pub use response::StatusCode;
pub use writer::{ResponseWriter, WriterState};

/// Offset of the first `\r\n` in `buf`.
pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
