//! Data Loading
//!
//! Reads survey extracts (comma-separated, one row per institution) and the
//! member roster (tab-separated, institution IDs plus names) with Polars.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Roster column holding the institution identifier
pub const ROSTER_ID_COLUMN: &str = "IPEDS_UnitID";

/// Load a comma-separated survey extract
pub fn read_extract(path: &Path) -> Result<DataFrame> {
    let df = read_delimited(path, b',')
        .with_context(|| format!("Failed to load extract CSV: {:?}", path))?;
    tracing::info!("Loaded extract {:?}: {} rows × {} columns", path, df.height(), df.width());
    Ok(df)
}

/// Load a tab-separated member roster
pub fn read_roster(path: &Path) -> Result<DataFrame> {
    let df = read_delimited(path, b'\t')
        .with_context(|| format!("Failed to load roster TSV: {:?}", path))?;
    tracing::info!("Loaded roster {:?}: {} rows", path, df.height());
    Ok(df)
}

fn read_delimited(path: &Path, separator: u8) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()?;
    Ok(df)
}
