//! Tests for `ReqwestClient` against a local mock server.

use super::*;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod construction {
    use super::*;

    #[test]
    fn debug_format_is_readable() {
        let client = ReqwestClient::new();
        let debug = format!("{client:?}");

        assert!(debug.contains("ReqwestClient"));
    }

    #[test]
    fn with_timeout_builds_client() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(5));

        assert!(client.is_ok());
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod round_trip {
    use super::*;

    #[tokio::test]
    async fn forwards_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/charge"))
            .and(header("x-trace", "abc"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let url = url::Url::parse(&format!("{}/charge", server.uri())).unwrap();
        let mut req = HttpRequest::new(::http::Method::POST, url);
        req.headers.insert(
            ::http::HeaderName::from_static("x-trace"),
            ::http::HeaderValue::from_static("abc"),
        );
        req.body = Some(b"payload".to_vec());

        let response = ReqwestClient::new().request(req).await.unwrap();

        assert_eq!(response.status, ::http::StatusCode::CREATED);
        assert_eq!(response.body_lossy(), "created");
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = url::Url::parse(&server.uri()).unwrap();
        let response = ReqwestClient::new()
            .request(HttpRequest::new(::http::Method::GET, url))
            .await
            .unwrap();

        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn slow_server_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ReqwestClient::with_timeout(Duration::from_millis(50)).unwrap();
        let url = url::Url::parse(&server.uri()).unwrap();
        let result = client.request(HttpRequest::new(::http::Method::GET, url)).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
    }
}
