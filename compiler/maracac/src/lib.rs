//! Maraca command-line driver.
//!
//! The driver owns everything around the formatter core: reading files,
//! walking directories, command-line flags, diagnostics and logging setup.
//!
//! ```text
//! source text ──► maraca_parse::parse ──► NodeArena
//!                                            │
//!                                            ▼
//!                          maraca_fmt::format_tree ──► formatted text
//! ```

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Safe to call more than once. Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=maraca_fmt=trace` to watch group decisions.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
