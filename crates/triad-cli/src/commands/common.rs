//! Shared helpers for the command implementations.

use anyhow::{Context, Result};
use serde::Serialize;

use triad_proto::SecretProfile;

/// Secret profile from an optional CLI bias; the reference H-T-H secret
/// when none was given.
pub fn secret_profile(p0: Option<f64>) -> SecretProfile {
    match p0 {
        Some(p0) => SecretProfile::Bias(p0),
        None => SecretProfile::Hth,
    }
}

/// Write a value as pretty-printed JSON to `path`.
pub fn export_json(path: &str, value: &impl Serialize) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, value).with_context(|| format!("writing {path}"))?;
    println!("  Wrote {path}");
    Ok(())
}
