//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize logging with the `affinity=info` fallback.
///
/// Reads `AFFINITY_LOG` for per-module levels, e.g.
/// `AFFINITY_LOG=affinity_analysis::walker=debug,affinity_analysis::pipeline=info`.
pub fn init_tracing() {
    init_tracing_with_default("affinity=info");
}

/// Initialize logging, using `fallback` when `AFFINITY_LOG` is unset or invalid.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_tracing_with_default(fallback: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        // A host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
