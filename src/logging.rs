//! Diagnostics setup for the emitter binary.
//!
//! stdout is the emitted sequence and a reading harness asserts on every
//! byte of it, so tracing output is routed to stderr and stays silent
//! unless `RUST_LOG` raises the level.

use std::{io, sync::Once};

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "sequence_emitter=warn";
static INIT_LOGGER: Once = Once::new();

/// Installs the stderr subscriber; later calls are no-ops.
pub fn init_tracing() {
    INIT_LOGGER.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init()
        {
            eprintln!("sequence-emitter: tracing initialization failed: {err}");
        }
    });
}
