//! Blau (Gini-Simpson) diversity index
//!
//! D = 1 - Σ pᵢ² over category proportions. 0 when one category holds the
//! whole row; approaches 1 - 1/k for k equally sized categories.

use crate::config::DiversityIndexConfig;
use crate::error::MembershipError;
use crate::utils::lazy_helpers::numeric_column;
use anyhow::{Context, Result};
use polars::prelude::*;

/// Default name of the index column
pub const BLAU_INDEX: &str = "blau_index";

/// Blau index per row over the proportion columns in `p_list`
///
/// A null proportion makes that row's index null.
pub fn gen_blau_index<S: AsRef<str>>(df: &DataFrame, p_list: &[S]) -> Result<Series> {
    if p_list.is_empty() {
        return Err(MembershipError::InvalidMapping(
            "Blau index needs at least one proportion column".to_string(),
        )
        .into());
    }

    let proportions = p_list
        .iter()
        .map(|p| numeric_column(df, p.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let index: Vec<Option<f64>> = (0..df.height())
        .map(|row| {
            let sum_sq: Option<f64> = proportions
                .iter()
                .map(|column| column[row].map(|p| p * p))
                .sum();
            sum_sq.map(|d| 1.0 - d)
        })
        .collect();

    Ok(Series::new(BLAU_INDEX.into(), index))
}

/// `df` with the Blau index appended as `name`
pub fn with_blau_index<S: AsRef<str>>(df: &DataFrame, p_list: &[S], name: &str) -> Result<DataFrame> {
    let index = gen_blau_index(df, p_list)?.with_name(name.into());
    let mut out = df.clone();
    out.with_column(index)?;
    Ok(out)
}

/// `df` with one Blau index column appended per configured index
pub fn with_blau_indices(df: &DataFrame, indices: &[DiversityIndexConfig]) -> Result<DataFrame> {
    let mut out = df.clone();
    for config in indices {
        out = with_blau_index(&out, &config.proportions, &config.index)
            .with_context(|| format!("Blau index '{}'", config.index))?;
    }
    Ok(out)
}
