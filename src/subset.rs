//! Subset raw extracts to an identifier set and a variable list

use crate::data::read_extract;
use crate::ids::IdSet;
use crate::utils::lazy_helpers::{filter_to_ids, materialize_with_columns, require_columns};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Rows of the extract at `path` whose UnitID is in `ids`, projected to `var_list`
pub fn subset<S: AsRef<str>>(path: &Path, ids: &IdSet, var_list: &[S]) -> Result<DataFrame> {
    let raw = read_extract(path)?;
    subset_frame(&raw, ids, var_list).with_context(|| format!("Subset of {:?}", path))
}

/// In-memory form of `subset`
///
/// Row order follows `raw`. Columns are exactly `var_list`, in that order;
/// `UnitID` is only kept if listed.
pub fn subset_frame<S: AsRef<str>>(raw: &DataFrame, ids: &IdSet, var_list: &[S]) -> Result<DataFrame> {
    // Fail on a bad variable list before filtering anything
    require_columns(raw, var_list)?;

    let matched = filter_to_ids(raw, ids, "subset")?;
    let projected = materialize_with_columns(&matched, var_list, "subset")?;

    tracing::debug!(
        "Subset {} of {} rows, {} variables",
        projected.height(),
        raw.height(),
        projected.width()
    );
    Ok(projected)
}
