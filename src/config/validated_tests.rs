//! Tests for validated configuration.

use std::time::Duration;

use crate::pipeline::LogLevel;
use crate::providers::quikk::WebhookKind;
use crate::providers::{daraja, quikk, tanda};

use super::ConfigError;
use super::cli::{Cli, ProviderArg};
use super::toml::TomlConfig;
use super::validated::{Action, ProviderSettings, ValidatedConfig, WebhookSettings};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["payments"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn provider(config: ValidatedConfig) -> ProviderSettings {
    match config.action {
        Action::Authenticate(settings) => settings,
        other => panic!("expected authenticate, got {other:?}"),
    }
}

fn webhook(config: ValidatedConfig) -> WebhookSettings {
    match config.action {
        Action::Webhook(settings) => settings,
        other => panic!("expected webhook, got {other:?}"),
    }
}

mod credentials {
    use super::*;

    #[test]
    fn missing_key_returns_error() {
        let cli = cli(&["authenticate", "-p", "daraja", "--secret", "s"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "key", .. })
        ));
    }

    #[test]
    fn missing_secret_hint_names_section() {
        let cli = cli(&["authenticate", "-p", "tanda", "--key", "k"]);
        let err = ValidatedConfig::from_raw(&cli, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                field: "secret",
                ..
            }
        ));
        assert!(err.to_string().contains("tanda.secret"));
    }

    #[test]
    fn credentials_from_cli() {
        let cli = cli(&["authenticate", "-p", "daraja", "--key", "k", "--secret", "s"]);
        let settings = provider(ValidatedConfig::from_raw(&cli, None).unwrap());

        assert_eq!(settings.provider, ProviderArg::Daraja);
        assert_eq!(settings.key, "k");
        assert_eq!(settings.secret, "s");
    }

    #[test]
    fn credentials_from_provider_section() {
        let cli = cli(&["authenticate", "-p", "quikk"]);
        let toml = toml(
            r#"
            [daraja]
            key = "wrong"
            secret = "wrong"

            [quikk]
            key = "qk"
            secret = "qs"
        "#,
        );

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.key, "qk");
        assert_eq!(settings.secret, "qs");
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&["authenticate", "-p", "tanda", "--key", "cli-key"]);
        let toml = toml("[tanda]\nkey = \"toml-key\"\nsecret = \"toml-secret\"");

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.key, "cli-key");
        assert_eq!(settings.secret, "toml-secret");
    }

    #[test]
    fn blank_cli_value_falls_through_to_toml() {
        let cli = cli(&["authenticate", "-p", "tanda", "--key", "  "]);
        let toml = toml("[tanda]\nkey = \"toml-key\"\nsecret = \"s\"");

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.key, "toml-key");
    }

    #[test]
    fn debug_hides_secret() {
        let cli = cli(&["authenticate", "-p", "daraja", "--key", "k", "--secret", "hunter2"]);
        let settings = provider(ValidatedConfig::from_raw(&cli, None).unwrap());

        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}

mod endpoint {
    use super::*;

    fn endpoint_for(provider_name: &str) -> String {
        let cli = cli(&["authenticate", "-p", provider_name, "--key", "k", "--secret", "s"]);
        provider(ValidatedConfig::from_raw(&cli, None).unwrap())
            .endpoint
            .to_string()
    }

    #[test]
    fn defaults_to_provider_sandbox() {
        assert!(endpoint_for("daraja").starts_with(daraja::SANDBOX_URL));
        assert!(endpoint_for("quikk").starts_with(quikk::SANDBOX_URL));
        assert!(endpoint_for("tanda").starts_with(tanda::SANDBOX_URL));
    }

    #[test]
    fn toml_endpoint_is_used() {
        let cli = cli(&["authenticate", "-p", "daraja", "--key", "k", "--secret", "s"]);
        let toml = toml("[daraja]\nendpoint = \"https://api.safaricom.co.ke\"");

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.endpoint.as_str(), "https://api.safaricom.co.ke/");
        assert_eq!(
            settings.client_config().endpoint,
            "https://api.safaricom.co.ke"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cli = cli(&[
            "authenticate",
            "-p",
            "daraja",
            "--key",
            "k",
            "--secret",
            "s",
            "--endpoint",
            "not a url",
        ]);

        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod tuning {
    use super::*;

    #[test]
    fn defaults_when_not_specified() {
        let cli = cli(&["authenticate", "-p", "daraja", "--key", "k", "--secret", "s"]);
        let settings = provider(ValidatedConfig::from_raw(&cli, None).unwrap());

        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.log_level, LogLevel::Off);
    }

    #[test]
    fn toml_values_are_used() {
        let cli = cli(&["authenticate", "-p", "tanda", "--key", "k", "--secret", "s"]);
        let toml = toml("[tanda]\ntimeout = 30\nlog_level = \"debug\"");

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.log_level, LogLevel::Debug);

        let client = settings.client_config();
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.log_level, LogLevel::Debug);
    }

    #[test]
    fn cli_values_override_toml() {
        let cli = cli(&[
            "authenticate",
            "-p",
            "tanda",
            "--key",
            "k",
            "--secret",
            "s",
            "--timeout",
            "7",
            "--log-level",
            "debug_with_body",
        ]);
        let toml = toml("[tanda]\ntimeout = 30\nlog_level = \"debug\"");

        let settings = provider(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert_eq!(settings.log_level, LogLevel::DebugWithBody);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = cli(&[
            "authenticate", "-p", "daraja", "--key", "k", "--secret", "s", "--timeout", "0",
        ]);

        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cli = cli(&[
            "authenticate",
            "-p",
            "daraja",
            "--key",
            "k",
            "--secret",
            "s",
            "--log-level",
            "trace",
        ]);

        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(_))));
    }
}

mod webhook_command {
    use super::*;

    #[test]
    fn defaults_success_code() {
        let cli = cli(&["webhook", "-k", "charge", "body.json"]);
        let settings = webhook(ValidatedConfig::from_raw(&cli, None).unwrap());

        assert_eq!(settings.kind, WebhookKind::Charge);
        assert_eq!(settings.success_code, quikk::RESULT_CODE_SUCCESS);
        assert_eq!(settings.file.to_str(), Some("body.json"));
    }

    #[test]
    fn success_code_from_toml() {
        let cli = cli(&["webhook", "-k", "search", "body.json"]);
        let toml = toml("[webhook]\nsuccess_code = \"0\"");

        let settings = webhook(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.success_code, "0");
    }

    #[test]
    fn cli_success_code_wins() {
        let cli = cli(&["webhook", "-k", "search", "--success-code", "201", "body.json"]);
        let toml = toml("[webhook]\nsuccess_code = \"0\"");

        let settings = webhook(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.success_code, "201");
    }

    #[test]
    fn empty_success_code_is_rejected() {
        let cli = cli(&["webhook", "-k", "payout", "--success-code", "", "body.json"]);

        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(result, Err(ConfigError::InvalidSuccessCode)));
    }

    #[test]
    fn does_not_need_credentials() {
        let cli = cli(&["webhook", "-k", "transfer", "body.json"]);

        assert!(ValidatedConfig::from_raw(&cli, None).is_ok());
    }
}

mod loading {
    use super::*;
    use crate::config::write_default_config;

    #[test]
    fn load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payments.toml");
        std::fs::write(&path, "[daraja]\nkey = \"k\"\nsecret = \"s\"\n").unwrap();

        let cli = cli(&[
            "authenticate",
            "-p",
            "daraja",
            "--config",
            path.to_str().unwrap(),
        ]);
        let settings = provider(ValidatedConfig::load(&cli).unwrap());

        assert_eq!(settings.key, "k");
    }

    #[test]
    fn load_reports_missing_file() {
        let cli = cli(&["webhook", "-k", "charge", "x.json", "-c", "/nonexistent/p.toml"]);

        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn init_action_carries_output() {
        let cli = cli(&["init", "-o", "out.toml", "-v"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.verbose);
        assert!(matches!(config.action, Action::Init { ref output } if output.to_str() == Some("out.toml")));
    }

    #[test]
    fn write_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payments.toml");

        write_default_config(&path).unwrap();

        assert!(TomlConfig::load(&path).is_ok());
    }

    #[test]
    fn write_default_config_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("payments.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn authenticate_display_omits_credentials() {
        let cli = cli(&["authenticate", "-p", "daraja", "--key", "k", "--secret", "hunter2"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let shown = config.to_string();

        assert!(shown.contains("authenticate: daraja"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn webhook_display_names_kind() {
        let cli = cli(&["webhook", "-k", "payout", "body.json"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(config.to_string().contains("webhook: payout"));
    }
}
