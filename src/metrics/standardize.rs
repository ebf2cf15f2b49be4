//! Z-score standardization
//!
//! z = (x - mean) / σ with the population standard deviation (ddof = 0).
//! Nulls and NaNs are left out of mean and σ; they stay null (or NaN) in
//! the output without affecting the other rows.

use crate::config::ColumnMapping;
use crate::utils::lazy_helpers::numeric_column;
use anyhow::Result;
use polars::prelude::*;

/// Population mean and standard deviation of the non-null, non-NaN values
pub fn population_stats(values: &[Option<f64>]) -> Option<(f64, f64)> {
    let present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    if present.is_empty() {
        return None;
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some((mean, variance.sqrt()))
}

/// Z-scores of `values`; a constant column yields non-finite scores
pub(crate) fn z_scores(values: &[Option<f64>]) -> Vec<Option<f64>> {
    match population_stats(values) {
        Some((mean, std)) => values.iter().map(|v| v.map(|x| (x - mean) / std)).collect(),
        None => vec![None; values.len()],
    }
}

/// Standardized copy of column `a_var`, keeping its name
pub fn standardized(df: &DataFrame, a_var: &str) -> Result<Series> {
    let values = numeric_column(df, a_var)?;
    Ok(Series::new(a_var.into(), z_scores(&values)))
}

/// Append one standardized column per mapping entry
pub fn gen_standardized_cols(df: &DataFrame, col_dict: &ColumnMapping) -> Result<DataFrame> {
    col_dict.validate(df)?;

    let scaled = col_dict
        .entries()
        .iter()
        .map(|entry| -> Result<Series> {
            Ok(standardized(df, &entry.source)?.with_name(entry.derived.as_str().into()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut out = df.clone();
    for series in scaled {
        out.with_column(series)?;
    }
    Ok(out)
}
