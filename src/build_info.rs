//! Compile-time build information, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string, e.g. `angler 0.1.0 2026-10-16 (a1b2c3d, release)`.
pub fn version_line() -> String {
    format!(
        "angler {} {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT,
        BUILD_PROFILE
    )
}
