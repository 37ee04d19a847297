use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs a test logger once per test binary. `RUST_LOG` overrides the
/// default `warn` level, e.g. `RUST_LOG=string_hashset=debug`.
pub fn init_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Warn)
            .format_timestamp_millis()
            .is_test(true)
            .parse_default_env();
        // Another harness may already have installed a logger.
        let _ = builder.try_init();
    });
}
