//! Build script for the sporltui Spotify terminal remote.
//!
//! Copies the `.env.example` template into the per-user config directory so
//! the credentials template sits next to `config.json` and `token.json` after
//! installation.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the config directory.
///
/// ## Destination
/// - Linux: `~/.config/sporltui/.env.example`
/// - macOS: `~/Library/Application Support/sporltui/.env.example`
/// - Windows: `%APPDATA%/sporltui/.env.example`
///
/// A missing template only produces a `cargo:warning`. Failing to create the
/// directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporltui");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
