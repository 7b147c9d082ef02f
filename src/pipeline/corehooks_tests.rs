//! Tests for the core hooks.

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

use super::test_support::MockClient;
use super::{Config, Error, Hooks, LogLevel, Operation, Payload, Request, corehooks};
use crate::transport::HttpClient;

fn request_with(client: &Arc<MockClient>, hooks: &Hooks, payload: Option<Payload>) -> Request {
    let config = Config::new("https://api.example.com")
        .with_client(Arc::clone(client) as Arc<dyn HttpClient>);
    Request::new(&config, Operation::post("Test", "/test"), hooks, payload).unwrap()
}

mod build_hooks {
    use super::*;

    #[tokio::test]
    async fn basic_auth_encodes_credentials() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let mut hooks = corehooks::defaults();
        hooks.build.push_back(corehooks::set_basic_auth("key", "secret"));

        request_with(&client, &hooks, None).send().await.unwrap();

        let sent = client.last_request();
        // base64("key:secret")
        assert_eq!(
            sent.headers.get(AUTHORIZATION).unwrap(),
            "Basic a2V5OnNlY3JldA=="
        );
    }

    #[tokio::test]
    async fn request_header_replaces_existing_value() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let mut hooks = corehooks::defaults();
        hooks.build.push_front(corehooks::with_request_header(
            http::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        ));
        hooks.build.push_back(corehooks::with_request_header(
            http::header::ACCEPT,
            HeaderValue::from_static("application/vnd.api+json"),
        ));

        request_with(&client, &hooks, None).send().await.unwrap();

        let sent = client.last_request();
        assert_eq!(sent.headers.get_all(http::header::ACCEPT).iter().count(), 1);
        assert_eq!(
            sent.headers.get(http::header::ACCEPT).unwrap(),
            "application/vnd.api+json"
        );
    }

    #[tokio::test]
    async fn http_client_hook_switches_transport() {
        let configured = Arc::new(MockClient::json(200, "{}"));
        let replacement = Arc::new(MockClient::json(200, "{}"));
        let mut hooks = corehooks::defaults();
        hooks
            .build
            .push_front(corehooks::with_http_client(Arc::clone(&replacement) as Arc<dyn HttpClient>));

        request_with(&configured, &hooks, None).send().await.unwrap();

        assert_eq!(configured.calls(), 0);
        assert_eq!(replacement.calls(), 1);
    }

    #[tokio::test]
    async fn form_payload_is_url_encoded() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let payload = Payload::Form(vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), "a b".to_string()),
        ]);

        request_with(&client, &corehooks::defaults(), Some(payload))
            .send()
            .await
            .unwrap();

        let sent = client.last_request();
        assert_eq!(
            sent.body.as_deref(),
            Some(&b"grant_type=client_credentials&client_id=a+b"[..])
        );
        assert_eq!(
            sent.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }

    #[tokio::test]
    async fn explicit_content_type_is_kept() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let mut hooks = corehooks::defaults();
        hooks.build.push_front(corehooks::with_request_header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.api+json"),
        ));
        let payload = Payload::json(&serde_json::json!({"data": {}})).unwrap();

        request_with(&client, &hooks, Some(payload))
            .send()
            .await
            .unwrap();

        assert_eq!(
            client.last_request().headers.get(CONTENT_TYPE).unwrap(),
            "application/vnd.api+json"
        );
    }

    #[tokio::test]
    async fn raw_payload_is_sent_verbatim() {
        let client = Arc::new(MockClient::json(200, "{}"));

        request_with(
            &client,
            &corehooks::defaults(),
            Some(Payload::Raw(b"opaque".to_vec())),
        )
        .send()
        .await
        .unwrap();

        let sent = client.last_request();
        assert_eq!(sent.body.as_deref(), Some(&b"opaque"[..]));
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn log_level_hook_sets_level() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let mut request = request_with(&client, &Hooks::default(), None);
        assert_eq!(request.log_level, LogLevel::Off);

        let hook = corehooks::with_log_level(LogLevel::DebugWithBody);
        hook.run(&mut request).await.unwrap();

        assert_eq!(request.log_level, LogLevel::DebugWithBody);
    }
}

mod send_hooks {
    use super::*;

    #[tokio::test]
    async fn logging_hooks_do_not_alter_the_exchange() {
        let client = Arc::new(MockClient::json(200, r#"{"ok":true}"#));
        let mut hooks = corehooks::defaults();
        hooks
            .build
            .push_front(corehooks::with_log_level(LogLevel::DebugWithBody));
        hooks.build.push_back(corehooks::set_basic_auth("key", "secret"));
        hooks.send.push_front(corehooks::log_http_request());
        hooks.send.push_back(corehooks::log_http_response());
        hooks.unmarshal.push_back(corehooks::response_decoder());

        let value = request_with(&client, &hooks, None).send().await.unwrap();

        assert_eq!(value, serde_json::json!({"ok": true}));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn decoder_without_response_reports_missing_response() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let mut hooks = Hooks::default();
        hooks.unmarshal.push_back(corehooks::response_decoder());

        let result = request_with(&client, &hooks, None).send().await;

        assert!(matches!(result, Err(Error::MissingResponse)));
        assert_eq!(client.calls(), 0);
    }
}

mod defaults {
    use super::*;

    #[test]
    fn default_hooks_encode_then_send() {
        let hooks = corehooks::defaults();

        assert_eq!(
            hooks.build.names().collect::<Vec<_>>(),
            vec![corehooks::name::ENCODE_REQUEST_BODY]
        );
        assert_eq!(
            hooks.send.names().collect::<Vec<_>>(),
            vec![corehooks::name::SEND]
        );
        assert!(hooks.unmarshal.is_empty());
    }

    #[test]
    fn log_level_parses_from_config_strings() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("OFF".parse::<LogLevel>(), Ok(LogLevel::Off));
        assert_eq!(
            "debug_with_body".parse::<LogLevel>(),
            Ok(LogLevel::DebugWithBody)
        );
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
