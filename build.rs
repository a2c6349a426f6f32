//! Build script for the topspot CLI.
//!
//! Copies the configuration templates shipped with the crate into the user's
//! local data directory so that a fresh install has a `config.ini.example` and
//! `.env.example` next to the place where the application looks for its
//! configuration.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = ["config.ini.example", ".env.example"];

/// Copies each template from the crate root into `<data_local_dir>/topspot/`.
///
/// # Destination
///
/// - Linux: `~/.local/share/topspot/`
/// - macOS: `~/Library/Application Support/topspot/`
/// - Windows: `%LOCALAPPDATA%/topspot/`
///
/// Missing templates only produce a cargo warning; directory or write failures
/// fail the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("topspot");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!(
                "cargo:warning={} not found at {}",
                template,
                source.display()
            );
        }
    }

    Ok(())
}
