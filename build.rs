//! Embeds the commit hash, build date and profile for `angler --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    // CI sets these; local builds fall back to git and the clock
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    fs::write(
        &dest_path,
        format!(
            r#"pub const BUILD_COMMIT: &str = "{}";
pub const BUILD_DATE: &str = "{}";
pub const BUILD_PROFILE: &str = "{}";"#,
            commit, date, profile
        ),
    )
    .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
