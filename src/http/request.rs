use crate::http::headers::Headers;

/// The first line of a request: `METHOD SP TARGET SP HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The method token, e.g. `GET`.
    pub method: String,
    /// The request target exactly as sent; not validated as a URI.
    pub target: String,
    /// The version with the `HTTP/` prefix stripped. Always `1.1`.
    pub version: String,
}

/// Represents a parsed HTTP request from a client.
///
/// Only [`RequestParser`](crate::http::parser::RequestParser) builds these,
/// once the whole message has arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub line: RequestLine,
    pub headers: Headers,
    /// Exactly `Content-Length` bytes, or empty when that header is absent.
    pub body: Vec<u8>,
}

impl Request {
    pub fn method(&self) -> &str {
        &self.line.method
    }

    pub fn target(&self) -> &str {
        &self.line.target
    }

    /// Retrieves a header value by name, ignoring case.
    ///
    /// # Example
    ///
    /// ```
    /// # use h1frame::http::parser::RequestParser;
    /// let mut parser = RequestParser::new();
    /// parser.feed(b"GET / HTTP/1.1\r\nUser-Agent: curl\r\n\r\n").unwrap();
    /// let req = parser.into_request().unwrap();
    /// assert_eq!(req.header("user-agent"), Some("curl"));
    /// assert_eq!(req.header("USER-AGENT"), Some("curl"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}
