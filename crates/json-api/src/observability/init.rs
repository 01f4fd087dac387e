//! Tracing subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::{ObservabilityError, settings};

/// Marker that logging and request settings were installed.
#[derive(Debug)]
pub(crate) struct Observability {
    format: LogFormat,
}

impl Observability {
    /// Install the global subscriber and apply request logging settings.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let filter = build_env_filter(&config.logging.log_level)?;

        match config.logging.log_format {
            LogFormat::Compact => init_with_layer(
                filter,
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )?,
            LogFormat::Json => init_with_layer(
                filter,
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )?,
        }

        Ok(Self {
            format: config.logging.log_format,
        })
    }

    pub(crate) fn format(&self) -> LogFormat {
        self.format
    }
}

fn build_env_filter(log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    Ok(EnvFilter::try_new(format!(
        "{log_level},h2=warn,hyper=warn,sqlx=warn"
    ))?)
}

fn init_with_layer<L>(filter: EnvFilter, fmt_layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_env_filter_accepts_plain_level() {
        assert!(build_env_filter("debug").is_ok(), "plain level should parse");
    }

    #[test]
    fn build_env_filter_accepts_target_directives() {
        assert!(
            build_env_filter("info,catalog_json=trace").is_ok(),
            "target directives should parse"
        );
    }
}
