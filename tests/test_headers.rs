use h1frame::http::error::{ErrorKind, ParseError};
use h1frame::http::headers::Headers;

#[test]
fn test_valid_single_header() {
    let mut headers = Headers::new();
    let data = b"Host: localhost:42069\r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069"));
    assert_eq!(n, 23);
    assert!(!done);
}

#[test]
fn test_valid_single_header_with_extra_whitespace() {
    let mut headers = Headers::new();
    let data = b"       Host:    localhost:42069                           \r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069"));
    assert_eq!(n, 60);
    assert!(!done);
}

#[test]
fn test_valid_two_headers_with_existing_headers() {
    let mut headers = Headers::new();
    headers.set("host", "localhost:42069");

    let data = b"User-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";
    let mut consumed = 0;

    let (n, done) = headers.parse(&data[consumed..]).unwrap();
    assert_eq!(n, 25);
    assert!(!done);
    consumed += n;

    let (n, done) = headers.parse(&data[consumed..]).unwrap();
    assert!(!done);
    consumed += n;

    let (n, done) = headers.parse(&data[consumed..]).unwrap();
    assert!(done);
    consumed += n;

    assert_eq!(consumed, data.len());
    assert_eq!(headers.get("host"), Some("localhost:42069"));
    assert_eq!(headers.get("user-agent"), Some("curl/7.81.0"));
    assert_eq!(headers.get("accept"), Some("*/*"));
}

#[test]
fn test_valid_done() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"\r\n a bunch of other stuff").unwrap();

    assert!(done);
    assert_eq!(n, 2);
    assert!(headers.is_empty());
}

#[test]
fn test_bare_terminator_only() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"\r\n").unwrap();

    assert!(done);
    assert_eq!(n, 2);
    assert_eq!(headers.len(), 0);
}

#[test]
fn test_partial_line_consumes_nothing() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"Host: localho").unwrap();

    assert_eq!(n, 0);
    assert!(!done);
    assert!(headers.is_empty());
}

#[test]
fn test_invalid_spacing_before_colon() {
    let mut headers = Headers::new();
    let err = headers.parse(b"       Host : localhost:42069       \r\n\r\n").unwrap_err();

    assert!(matches!(err, ParseError::InvalidHeaderName(_)));
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(headers.is_empty());
}

#[test]
fn test_host_space_colon_rejected() {
    let mut headers = Headers::new();
    let result = headers.parse(b"Host : x\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeaderName(_))));
}

#[test]
fn test_invalid_character_in_name() {
    let mut headers = Headers::new();
    let result = headers.parse("H©st: localhost:42069\r\n\r\n".as_bytes());

    assert!(matches!(result, Err(ParseError::InvalidHeaderName(_))));
    assert!(headers.is_empty());
}

#[test]
fn test_non_utf8_value_accepted() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"User-Agent: caf\xe9\r\n\r\n").unwrap();

    assert_eq!(n, 18);
    assert!(!done);
    assert_eq!(headers.get("user-agent"), Some("caf\u{FFFD}"));
}

#[test]
fn test_bare_newline_in_value_rejected() {
    let mut headers = Headers::new();
    let result = headers.parse(b"X-Split: a\nb\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    assert!(headers.is_empty());
}

#[test]
fn test_missing_colon() {
    let mut headers = Headers::new();
    let result = headers.parse(b"BrokenHeader\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
}

#[test]
fn test_empty_name() {
    let mut headers = Headers::new();
    let result = headers.parse(b": value\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeaderName(_))));
}

#[test]
fn test_capitalized_name_becomes_lowercase() {
    let mut mixed = Headers::new();
    let (n, done) = mixed.parse(b"ConTent-TYPE: text/plain\r\n\r\n").unwrap();
    assert_eq!(n, 26);
    assert!(!done);

    let mut lower = Headers::new();
    lower.parse(b"content-type: text/plain\r\n\r\n").unwrap();

    assert_eq!(mixed.get("content-type"), Some("text/plain"));
    assert_eq!(mixed, lower);
    assert_eq!(mixed.iter().next(), Some(("content-type", "text/plain")));
}

#[test]
fn test_multiple_values_for_same_name() {
    let mut headers = Headers::new();

    headers.parse(b"Set-Person: lane-loves-go\r\n").unwrap();
    assert_eq!(headers.get("set-person"), Some("lane-loves-go"));

    headers.parse(b"Set-Person: prime-loves-zig\r\n").unwrap();
    assert_eq!(headers.get("set-person"), Some("lane-loves-go, prime-loves-zig"));

    headers.parse(b"set-person: tj-loves-ocaml\r\n").unwrap();
    assert_eq!(
        headers.get("Set-Person"),
        Some("lane-loves-go, prime-loves-zig, tj-loves-ocaml")
    );
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_split_at_every_offset_matches_single_feed() {
    let data = b"Host: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\nAccept: text/html\r\n\r\n";

    let mut whole = Headers::new();
    let mut whole_consumed = 0;
    loop {
        let (n, done) = whole.parse(&data[whole_consumed..]).unwrap();
        whole_consumed += n;
        if done {
            break;
        }
    }

    for split in 0..=data.len() {
        let mut headers = Headers::new();
        let mut available = split;
        let mut consumed = 0;
        loop {
            let (n, done) = headers.parse(&data[consumed..available]).unwrap();
            consumed += n;
            if done {
                break;
            }
            if n == 0 {
                assert!(available < data.len(), "stalled with all bytes available");
                available = data.len();
            }
        }

        assert_eq!(headers, whole, "split at {}", split);
        assert_eq!(consumed, whole_consumed, "split at {}", split);
    }
    assert_eq!(whole.get("accept"), Some("*/*, text/html"));
}

#[test]
fn test_set_replaces_and_remove() {
    let mut headers = Headers::new();
    headers.set("Content-Length", "10");
    headers.set("content-length", "12");

    assert_eq!(headers.get("CONTENT-LENGTH"), Some("12"));
    assert!(headers.contains("Content-Length"));
    assert_eq!(headers.remove("Content-Length"), Some("12".to_string()));
    assert!(!headers.contains("content-length"));
}

#[test]
fn test_collect_from_pairs() {
    let headers: Headers = [("X-A", "1"), ("x-a", "2"), ("X-B", "3")].into_iter().collect();

    let fields: Vec<_> = headers.iter().collect();
    assert_eq!(fields, vec![("x-a", "1, 2"), ("x-b", "3")]);
}
