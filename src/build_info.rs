//! Build metadata written by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line build description for banners and reports, e.g. `0.1.0 (a1b2c3d, 2026-10-18, release)`.
pub fn version_line() -> String {
    format!(
        "{} ({}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE,
        BUILD_PROFILE
    )
}
