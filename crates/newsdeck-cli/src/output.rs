//! Output format selection and shared rendering helpers.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output.
    Text,
    /// Machine-readable JSON for scripting.
    Json,
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a publication timestamp compactly ("Feb 20, 2025").
#[must_use]
pub fn short_date(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%b %e, %Y").to_string()
}
