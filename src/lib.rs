//! h1frame - HTTP/1.1 framing over raw TCP
//!
//! Incremental request parsing and an order-enforcing response writer,
//! plus a minimal server that runs one request per connection.

pub mod config;
pub mod http;
pub mod server;
