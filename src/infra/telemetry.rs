use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter,
    filter::Directive,
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

/// HTTP client internals log every pooled connection at debug level; keep them
/// at `warn` unless `RUST_LOG` names them.
const QUIET_DEPENDENCIES: &[&str] = &["hyper_util", "reqwest", "h2", "rustls"];

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(logging, std::env::var("RUST_LOG").ok().as_deref())?)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

/// `RUST_LOG` wins over the configured level. Without it, the configured
/// level applies to everything except the dependencies in
/// [`QUIET_DEPENDENCIES`].
fn env_filter(logging: &LoggingSettings, rust_log: Option<&str>) -> Result<EnvFilter, InfraError> {
    let builder = EnvFilter::builder().with_default_directive(logging.level.into());

    if let Some(directives) = rust_log.filter(|value| !value.trim().is_empty()) {
        return builder
            .parse(directives)
            .map_err(|err| InfraError::telemetry(format!("invalid RUST_LOG: {err}")));
    }

    let mut filter = builder.parse_lossy("");
    for name in QUIET_DEPENDENCIES {
        let directive = format!("{name}=warn")
            .parse::<Directive>()
            .map_err(|err| InfraError::telemetry(format!("invalid directive: {err}")))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
