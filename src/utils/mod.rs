pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();
const DEFAULT_DIRECTIVE: &str = "budget_engine=info";

/// Installs the global fmt subscriber; `RUST_LOG` directives are honoured.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A host application may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
