//! TCP accept loop feeding connections into the HTTP layer.

pub mod listener;

pub use listener::{Server, TcpResponseWriter};
