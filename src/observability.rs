//! Logging setup for hosts and the `ucai-tools` binary.

use crate::types::ObservabilityConfig;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// `RUST_LOG` when set, else the configured level.
fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the stderr subscriber once per process; later calls are no-ops.
///
/// `UCAI_LOG_FORMAT` overrides `json_logs` (see [`ObservabilityConfig::with_env_overrides`]).
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let config = config.clone().with_env_overrides();
        let json = config.json_logs;

        let result = tracing_subscriber::registry()
            .with(env_filter(&config))
            .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
            .with((!json).then(|| fmt::layer().compact().with_writer(std::io::stderr)))
            .try_init();

        // Another subscriber (a host's, or a test harness) already owns the global slot.
        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}
