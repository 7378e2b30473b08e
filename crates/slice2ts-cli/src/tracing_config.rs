//! Diagnostic logging for `slice2ts` runs.
//!
//! A run opens a `slice2ts` span, loading and binding log under
//! `build_scope`, and each input gets its own `generate_typings` span, so the
//! tree format reads as one branch per generated file:
//!
//! ```bash
//! SLICE2TS_LOG=debug SLICE2TS_LOG_FORMAT=tree slice2ts --root-dir slice slice/**/*.ice
//! SLICE2TS_LOG="slice2ts_binder=trace" slice2ts --root-dir slice slice/Demo.ice
//! ```
//!
//! `SLICE2TS_LOG` takes `RUST_LOG` directive syntax and wins over it. With
//! neither set no subscriber is installed. Logs always go to stderr; stdout
//! is left to the external commands.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "SLICE2TS_LOG";
const LOG_FORMAT_VAR: &str = "SLICE2TS_LOG_FORMAT";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Text,
    /// Indented span tree (`tracing-tree`).
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Unrecognized values fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("tree") {
            Self::Tree
        } else if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Logging requested through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directives, e.g. `debug` or `slice2ts_emitter=trace`.
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// `None` when neither filter variable is set.
    pub fn from_values(
        own: Option<String>,
        fallback: Option<String>,
        format: Option<&str>,
    ) -> Option<Self> {
        let directives = own.or(fallback)?;
        Some(LogSettings {
            directives,
            format: format.map(LogFormat::parse).unwrap_or_default(),
        })
    }

    pub fn from_env() -> Option<Self> {
        let format = std::env::var(LOG_FORMAT_VAR).ok();
        Self::from_values(
            std::env::var(LOG_VAR).ok(),
            std::env::var(FALLBACK_LOG_VAR).ok(),
            format.as_deref(),
        )
    }

    fn install(&self) {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);

        // A subscriber set by an embedding process stays in place.
        let _ = match self.format {
            LogFormat::Tree => Registry::default()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::default()
                        .with_writer(std::io::stderr)
                        .with_indent_amount(2)
                        .with_indent_lines(true)
                        .with_targets(true)
                        .with_span_retrace(true),
                )
                .try_init(),
            LogFormat::Json => Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Text => Registry::default()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };
    }
}

/// Install the global subscriber if logging was requested.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_env() {
        settings.install();
    }
}
