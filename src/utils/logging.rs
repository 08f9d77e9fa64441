//! Logger setup for the simulator binary and for tests.

use log::LevelFilter;

/// Initialise `env_logger` for the binaries. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    env_logger::builder()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init()
}

/// Quiet logger for tests; safe to call from every test.
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .try_init();
}
