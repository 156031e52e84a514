use axum::http::{HeaderMap, HeaderValue};

use pagewise::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_caller_id_when_resolving_then_reuses_it() {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("trace-7"));

    assert_eq!(RequestId::from_headers(&headers).as_str(), "trace-7");
}

#[test]
fn given_no_header_when_resolving_then_generates_uuid() {
    let id = RequestId::from_headers(&HeaderMap::new());

    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}

#[test]
fn given_oversized_header_when_resolving_then_generates_fresh_id() {
    let mut headers = HeaderMap::new();
    let long = "x".repeat(500);
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&long).unwrap());

    assert_ne!(RequestId::from_headers(&headers).as_str(), long);
}
