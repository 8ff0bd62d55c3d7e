// SPDX-License-Identifier: MPL-2.0

use tracing_subscriber::EnvFilter;

/// The verbosity used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "warn";

pub fn init() {
    tracing_subscriber::fmt()
        // Set the environment variable `RUST_LOG` to one of `TRACE`, `DEBUG`, `INFO`, `WARN`, or
        // `ERROR`. `TRACE` logs every decoded instruction.
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        )
        // The listing goes to stdout.
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_level(true)
        .with_target(false)
        .without_time()
        .init();
}
