use super::*;

#[test]
fn defaults_resolve_to_local_upstream() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.upstream.base_url.as_str(), "http://localhost:8080/");
    assert_eq!(settings.upstream.timeout, None);
    assert_eq!(settings.upstream.accept_language, DEFAULT_ACCEPT_LANGUAGE);
    assert_eq!(settings.listing.default_page_size, PageSize::DEFAULT);
    assert_eq!(settings.listing.max_views.get(), DEFAULT_MAX_VIEWS);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.upstream.base_url = Some("http://board.internal:9000".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        upstream_base_url: Some("https://posts.example.com/board".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(
        settings.upstream.base_url.as_str(),
        "https://posts.example.com/board"
    );
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn upstream_timeout_is_optional_but_non_zero() {
    let mut raw = RawSettings::default();
    raw.upstream.timeout_seconds = Some(7);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.upstream.timeout, Some(Duration::from_secs(7)));

    let mut raw = RawSettings::default();
    raw.upstream.timeout_seconds = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero timeout rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "upstream.timeout_seconds",
            ..
        }
    ));
}

#[test]
fn rejects_non_http_upstream() {
    let mut raw = RawSettings::default();
    raw.upstream.base_url = Some("ftp://posts.example.com".to_string());
    let err = Settings::from_raw(raw).expect_err("ftp rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "upstream.base_url",
            ..
        }
    ));

    let mut raw = RawSettings::default();
    raw.upstream.base_url = Some("not a url".to_string());
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn blank_upstream_falls_back_to_default() {
    let mut raw = RawSettings::default();
    raw.upstream.base_url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.upstream.base_url.as_str(), "http://localhost:8080/");
}

#[test]
fn default_page_size_must_be_a_listed_choice() {
    let mut raw = RawSettings::default();
    raw.listing.default_page_size = Some(20);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.listing.default_page_size.get(), 20);

    let mut raw = RawSettings::default();
    raw.listing.default_page_size = Some(15);
    let err = Settings::from_raw(raw).expect_err("15 rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "listing.default_page_size",
            ..
        }
    ));
}

#[test]
fn zero_values_are_rejected() {
    let mut raw = RawSettings::default();
    raw.listing.max_views = Some(0);
    assert!(Settings::from_raw(raw).is_err());

    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    assert!(Settings::from_raw(raw).is_err());

    let mut raw = RawSettings::default();
    raw.server.graceful_shutdown_seconds = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("bad level");
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["postboard"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(ServeArgs::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "postboard",
        "serve",
        "--server-port",
        "8081",
        "--log-json",
        "true",
        "--upstream-base-url",
        "http://api.local:8080",
        "--upstream-timeout-seconds",
        "3",
        "--listing-default-page-size",
        "50",
    ]);

    let Some(Command::Serve(serve)) = args.command else {
        panic!("expected serve command");
    };
    assert_eq!(serve.overrides.server_port, Some(8081));
    assert_eq!(serve.overrides.log_json, Some(true));
    assert_eq!(
        serve.overrides.upstream_base_url.as_deref(),
        Some("http://api.local:8080")
    );
    assert_eq!(serve.overrides.upstream_timeout_seconds, Some(3));
    assert_eq!(serve.overrides.listing_default_page_size, Some(50));
}
