//! Tests for `Signer`.

use std::sync::Arc;

use http::header::{AUTHORIZATION, DATE};

use super::{Signer, http_date};
use crate::pipeline::test_support::MockClient;
use crate::pipeline::{Config, Hooks, Operation, Request, corehooks};
use crate::time::ManualClock;
use crate::transport::HttpClient;

const DATE_VALUE: &str = "Tue, 17 Oct 2023 12:00:00 GMT";

mod signature {
    use super::*;

    #[test]
    fn is_deterministic() {
        let signer = Signer::new("key", "secret");

        assert_eq!(signer.signature(DATE_VALUE), signer.signature(DATE_VALUE));
    }

    #[test]
    fn depends_on_secret_and_date() {
        let a = Signer::new("key", "secret");
        let b = Signer::new("key", "other");

        assert_ne!(a.signature(DATE_VALUE), b.signature(DATE_VALUE));
        assert_ne!(
            a.signature(DATE_VALUE),
            a.signature("Wed, 18 Oct 2023 12:00:00 GMT")
        );
    }

    #[test]
    fn accepts_secrets_of_any_length() {
        let long = "s".repeat(200);

        for secret in ["", "x", long.as_str()] {
            let signature = Signer::new("key", secret).signature(DATE_VALUE);
            assert!(!signature.is_empty());
        }
    }

    #[test]
    fn is_url_safe() {
        let signer = Signer::new("key", "secret");

        for day in 1..=28 {
            let date = format!("Tue, {day:02} Oct 2023 12:00:00 GMT");
            let signature = signer.signature(&date);
            assert!(!signature.contains('+'), "{signature}");
            assert!(!signature.contains('/'), "{signature}");
            assert!(!signature.contains('='), "{signature}");
        }
    }

    #[test]
    fn decodes_to_a_sha256_digest() {
        use base64::Engine;

        let signature = Signer::new("key", "secret").signature(DATE_VALUE);
        let decoded = urlencoding::decode(&signature).unwrap();
        let digest = base64::engine::general_purpose::STANDARD
            .decode(decoded.as_bytes())
            .unwrap();

        assert_eq!(digest.len(), 32);
    }

    #[test]
    fn authorization_names_key_and_algorithm() {
        let signer = Signer::new("my-key", "secret");

        let header = signer.authorization(DATE_VALUE);

        assert!(header.starts_with(r#"keyId="my-key",algorithm="hmac-sha256",headers="date",signature=""#));
        assert!(header.ends_with(&format!(r#"signature="{}""#, signer.signature(DATE_VALUE))));
    }
}

mod date {
    use super::*;

    #[test]
    fn formats_as_http_date() {
        let clock = ManualClock::at_unix(1_697_544_000);

        assert_eq!(http_date(crate::time::Clock::now(&clock)), DATE_VALUE);
    }
}

mod hook {
    use super::*;

    #[tokio::test]
    async fn stamps_date_and_authorization() {
        let client = Arc::new(MockClient::json(200, "{}"));
        let config = Config::new("https://api.example.com")
            .with_client(Arc::clone(&client) as Arc<dyn HttpClient>);
        let signer = Signer::new("key", "secret").with_clock(ManualClock::at_unix(1_697_544_000));
        let expected = signer.authorization(DATE_VALUE);

        let mut hooks: Hooks = corehooks::defaults();
        hooks.build.push_front(signer.into_hook());

        Request::new(&config, Operation::post("Charge", "/v1/mpesa/charge"), &hooks, None)
            .unwrap()
            .send()
            .await
            .unwrap();

        let sent = client.last_request();
        assert_eq!(sent.headers.get(DATE).unwrap(), DATE_VALUE);
        assert_eq!(sent.headers.get(AUTHORIZATION).unwrap(), expected.as_str());
    }

    #[test]
    fn debug_hides_secret() {
        let signer = Signer::new("key", "super-secret");

        let debug = format!("{signer:?}");

        assert!(debug.contains("key"));
        assert!(!debug.contains("super-secret"));
    }
}
