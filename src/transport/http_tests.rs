//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("https://sandbox.example.com/mpesa/stkpush/v1/processrequest").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_starts_without_headers_or_body() {
        let req = HttpRequest::new(http::Method::PUT, url());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn body_lossy_is_empty_without_body() {
        let mut req = HttpRequest::new(http::Method::POST, url());
        assert_eq!(req.body_lossy(), "");

        req.body = Some(b"{\"amount\":1}".to_vec());
        assert_eq!(req.body_lossy(), r#"{"amount":1}"#);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_only_for_2xx() {
        let ok = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
        let accepted =
            HttpResponse::new(http::StatusCode::ACCEPTED, http::HeaderMap::new(), vec![]);
        let bad = HttpResponse::new(
            http::StatusCode::BAD_REQUEST,
            http::HeaderMap::new(),
            vec![],
        );

        assert!(ok.is_success());
        assert!(accepted.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn whitespace_body_is_blank() {
        let blank = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), b" \n".to_vec());
        let empty = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
        let json = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), b"{}".to_vec());

        assert!(blank.is_blank());
        assert!(empty.is_blank());
        assert!(!json.is_blank());
    }

    #[test]
    fn body_lossy_replaces_invalid_utf8() {
        let response = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xff],
        );

        assert_eq!(response.body_lossy(), "ok\u{fffd}");
    }
}
