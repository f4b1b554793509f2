use h1frame::http::headers::Headers;
use h1frame::http::request::{Request, RequestLine};

fn request(headers: Headers, body: &[u8]) -> Request {
    Request {
        line: RequestLine {
            method: "POST".to_string(),
            target: "/api?debug=1".to_string(),
            version: "1.1".to_string(),
        },
        headers,
        body: body.to_vec(),
    }
}

#[test]
fn test_request_header_retrieval() {
    let mut headers = Headers::new();
    headers.set("Host", "example.com");
    headers.set("Content-Type", "application/json");

    let req = request(headers, b"{}");

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_line_accessors() {
    let req = request(Headers::new(), b"");

    assert_eq!(req.method(), "POST");
    assert_eq!(req.target(), "/api?debug=1");
    assert_eq!(req.line.version, "1.1");
}

#[test]
fn test_request_clone_is_independent() {
    let req = request(Headers::new(), b"payload");
    let mut copy = req.clone();
    copy.body.clear();
    copy.headers.set("X-Extra", "1");

    assert_eq!(req.body, b"payload".to_vec());
    assert!(req.headers.is_empty());
    assert_ne!(req, copy);
}
