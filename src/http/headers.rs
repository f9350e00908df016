//! Header inspection for compression normalization.
//!
//! All lookups go through `HeaderMap`, which is already case-insensitive on
//! names and keeps every value of a repeated header.

use axum::http::header::{
    HeaderMap, HeaderName, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, TRANSFER_ENCODING,
};

const GZIP: &[u8] = b"gzip";

/// True if any value of `name` contains `gzip`, ignoring ASCII case.
fn mentions_gzip(headers: &HeaderMap, name: &HeaderName) -> bool {
    headers.get_all(name).iter().any(|value| {
        value
            .as_bytes()
            .windows(GZIP.len())
            .any(|window| window.eq_ignore_ascii_case(GZIP))
    })
}

/// Whether the client advertised gzip in `Accept-Encoding`.
pub fn client_accepts_gzip(request_headers: &HeaderMap) -> bool {
    mentions_gzip(request_headers, &ACCEPT_ENCODING)
}

/// Whether the upstream body is gzip-coded.
///
/// `Content-Encoding` is consulted first; `Transfer-Encoding` only when the
/// content coding does not mention gzip.
pub fn upstream_is_gzip(response_headers: &HeaderMap) -> bool {
    mentions_gzip(response_headers, &CONTENT_ENCODING)
        || mentions_gzip(response_headers, &TRANSFER_ENCODING)
}

/// Drop the headers that describe the coded body.
///
/// After decoding, the advertised coding and length no longer match the bytes
/// sent; the server re-frames the decoded stream itself.
pub fn strip_body_coding(headers: &mut HeaderMap) {
    headers.remove(CONTENT_ENCODING);
    headers.remove(CONTENT_LENGTH);
    headers.remove(TRANSFER_ENCODING);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn accept_encoding_is_case_insensitive() {
        assert!(client_accepts_gzip(&headers(&[("accept-encoding", "GZIP, br")])));
        assert!(client_accepts_gzip(&headers(&[("Accept-Encoding", "deflate, x-gzip")])));
        assert!(!client_accepts_gzip(&headers(&[("accept-encoding", "identity")])));
        assert!(!client_accepts_gzip(&HeaderMap::new()));
    }

    #[test]
    fn accept_encoding_checks_every_value() {
        let map = headers(&[("accept-encoding", "br"), ("accept-encoding", "gzip")]);
        assert!(client_accepts_gzip(&map));
    }

    #[test]
    fn content_encoding_marks_gzip() {
        assert!(upstream_is_gzip(&headers(&[("content-encoding", "Gzip")])));
        assert!(!upstream_is_gzip(&headers(&[("content-encoding", "br")])));
    }

    #[test]
    fn transfer_encoding_is_fallback() {
        let map = headers(&[("content-encoding", "identity"), ("transfer-encoding", "gzip, chunked")]);
        assert!(upstream_is_gzip(&map));
        assert!(!upstream_is_gzip(&headers(&[("transfer-encoding", "chunked")])));
    }

    #[test]
    fn strip_removes_coding_headers_only() {
        let mut map = headers(&[
            ("content-encoding", "gzip"),
            ("content-length", "42"),
            ("transfer-encoding", "chunked"),
            ("x-keep", "1"),
        ]);
        strip_body_coding(&mut map);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("x-keep"));
    }
}
