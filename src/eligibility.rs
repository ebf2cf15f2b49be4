//! Qualifying-institution filter
//!
//! An institution qualifies when it is non-profit (control code 1 public,
//! 3 private not-for-profit without religious affiliation, or 4 private
//! not-for-profit with religious affiliation), offers undergraduate degrees,
//! and is active in the current survey year.

use crate::config::EligibilityColumns;
use crate::data::read_extract;
use crate::ids::{IdSet, UNIT_ID};
use crate::utils::lazy_helpers::require_columns;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Control/affiliation codes counted as non-profit
pub const NON_PROFIT_CONTROL_CODES: [i64; 3] = [1, 3, 4];

/// Value of the undergraduate-offering and active flags meaning "yes"
const YES: i64 = 1;

/// Qualifying identifiers from an extract file
pub fn gen_ids_all(path: &Path, columns: &EligibilityColumns) -> Result<IdSet> {
    let raw = read_extract(path)?;
    qualifying_ids(&raw, columns).with_context(|| format!("Eligibility filter on {:?}", path))
}

/// Qualifying identifiers from an in-memory extract
///
/// Null cells never satisfy the predicate.
pub fn qualifying_ids(raw: &DataFrame, columns: &EligibilityColumns) -> Result<IdSet> {
    require_columns(
        raw,
        &[
            UNIT_ID,
            columns.control.as_str(),
            columns.undergraduate.as_str(),
            columns.active.as_str(),
        ],
    )?;

    let control = col(columns.control.as_str()).cast(DataType::Int64);
    let is_non_profit = NON_PROFIT_CONTROL_CODES
        .iter()
        .map(|&code| control.clone().eq(lit(code)))
        .reduce(|acc, is_code| acc.or(is_code))
        .unwrap_or_else(|| lit(false));
    let is_undergraduate = col(columns.undergraduate.as_str())
        .cast(DataType::Int64)
        .eq(lit(YES));
    let is_active = col(columns.active.as_str()).cast(DataType::Int64).eq(lit(YES));

    let meets_criteria = is_non_profit
        .and(is_undergraduate)
        .and(is_active)
        .fill_null(lit(false));

    let qualifying = raw
        .clone()
        .lazy()
        .filter(meets_criteria)
        .select([col(UNIT_ID)])
        .collect()
        .context("Failed to apply eligibility criteria")?;

    let ids = IdSet::from_frame(&qualifying)?;
    tracing::debug!("{} of {} institutions qualify", ids.len(), raw.height());
    Ok(ids)
}
