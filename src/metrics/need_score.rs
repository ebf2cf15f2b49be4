//! Composite need score
//!
//! Standardizes each need indicator, flips the sign of indicators where a
//! higher raw value means lower need (gender and race diversity: a more
//! diverse campus needs less help), then sums the z-scores per row.

use crate::config::{ColumnMapping, NeedScoreConfig};
use crate::error::MembershipError;
use crate::metrics::standardize::z_scores;
use crate::utils::lazy_helpers::numeric_column;
use anyhow::Result;
use polars::prelude::*;
use rustc_hash::FxHashSet;

/// Name of the composite score column
pub const NEED_SCORE: &str = "need_score";

/// Append standardized (and sign-flipped) indicators plus `need_score`
///
/// `var_flip` names derived columns of `col_dict`, each at most once. Null
/// and NaN z-scores (e.g. from a constant indicator) are skipped in the row
/// sum but kept as-is in their own column; a row with no usable indicators
/// scores 0.
pub fn compute_need_scores<S: AsRef<str>>(
    df: &DataFrame,
    col_dict: &ColumnMapping,
    var_flip: &[S],
) -> Result<DataFrame> {
    col_dict.validate(df)?;
    let mut flipped = FxHashSet::default();
    for item in var_flip {
        let item = item.as_ref();
        if !col_dict.derived().any(|derived| derived == item) {
            return Err(MembershipError::UnknownFlipColumn(item.to_string()).into());
        }
        if !flipped.insert(item) {
            return Err(MembershipError::InvalidMapping(format!(
                "flip column '{}' listed more than once",
                item
            ))
            .into());
        }
    }

    let mut scaled = Vec::with_capacity(col_dict.len());
    for entry in col_dict.entries() {
        let mut z = z_scores(&numeric_column(df, &entry.source)?);
        if flipped.contains(entry.derived.as_str()) {
            z.iter_mut().for_each(|v| *v = v.map(|x| -x));
        }
        scaled.push((entry.derived.as_str(), z));
    }

    let need_score: Vec<f64> = (0..df.height())
        .map(|row| {
            scaled
                .iter()
                .filter_map(|(_, z)| z[row])
                .filter(|v| !v.is_nan())
                .sum()
        })
        .collect();

    let mut out = df.clone();
    for (name, z) in scaled {
        out.with_column(Series::new(name.into(), z))?;
    }
    out.with_column(Series::new(NEED_SCORE.into(), need_score))?;

    tracing::debug!(
        "Need scores over {} indicators ({} flipped) for {} rows",
        col_dict.len(),
        var_flip.len(),
        out.height()
    );
    Ok(out)
}

/// `compute_need_scores` driven by a `NeedScoreConfig`
pub fn compute_need_scores_with(df: &DataFrame, config: &NeedScoreConfig) -> Result<DataFrame> {
    compute_need_scores(df, &config.standardize, &config.flip)
}
