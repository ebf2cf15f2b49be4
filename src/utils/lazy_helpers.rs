//! DataFrame helpers with column validation
//!
//! Every transformation checks its required columns up front so a missing
//! survey variable surfaces as a `MembershipError::MissingColumn` naming the
//! column, instead of a bare polars "not found" deep inside an expression.

use crate::error::MembershipError;
use crate::ids::{IdSet, UNIT_ID};
use anyhow::{Context, Result};
use polars::prelude::*;

/// Column names of a DataFrame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

/// Fail with `MissingColumn` for the first required column absent from `df`
///
/// # Errors
/// `MembershipError::MissingColumn` naming the column and listing the
/// available ones.
///
/// # Example
/// ```ignore
/// require_columns(&roster, &["IPEDS_UnitID"])?;
/// ```
pub fn require_columns<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<()> {
    let available = column_names(df);
    for column in columns {
        let column = column.as_ref();
        if !available.iter().any(|name| name == column) {
            return Err(MembershipError::MissingColumn {
                column: column.to_string(),
                available,
            }
            .into());
        }
    }
    Ok(())
}

/// Read a column as nullable f64 values, casting integer counts as needed
///
/// # Arguments
/// * `df` - Table holding the column
/// * `name` - Survey variable name (e.g. "Grand total men")
///
/// # Returns
/// One entry per row; null cells become `None`, NaN stays NaN
///
/// # Errors
/// Returns error if:
/// - The column is missing (`MissingColumn`)
/// - The column cannot be cast to Float64
///
/// # Example
/// ```ignore
/// let counts = numeric_column(&extract, "Grand total women")?;
/// ```
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    require_columns(df, &[name])?;
    let cast = df
        .column(name)?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Materialize a projection of `df` with exactly `columns`, in that order
///
/// # Arguments
/// * `df` - Table to project
/// * `columns` - Required column names, in output order
/// * `context` - Context for error messages (e.g., "subset")
///
/// # Returns
/// DataFrame with exactly the specified columns
///
/// # Errors
/// Returns error if:
/// - Any requested column is absent (`MissingColumn`)
/// - Materialization fails
///
/// # Example
/// ```ignore
/// let df = materialize_with_columns(
///     &extract,
///     &["UnitID", "Pell grant percent"],
///     "need indicators",
/// )?;
/// ```
pub fn materialize_with_columns<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    context: &str,
) -> Result<DataFrame> {
    require_columns(df, columns).with_context(|| context.to_string())?;

    let col_exprs: Vec<Expr> = columns.iter().map(|name| col(name.as_ref())).collect();

    df.clone()
        .lazy()
        .select(col_exprs)
        .collect()
        .with_context(|| format!("{}: Failed to materialize columns", context))
}

/// Keep the rows of `df` whose `UnitID` is in `ids`, preserving row order
///
/// # Arguments
/// * `df` - Table to filter (must have a `UnitID` column)
/// * `ids` - Institutions to keep
/// * `context` - Context for error messages (e.g., "subset")
///
/// # Returns
/// Filtered DataFrame; rows with a null `UnitID` never match
///
/// # Errors
/// Returns error if:
/// - `UnitID` is missing (`MissingColumn`)
/// - `UnitID` cannot be cast to Int64
///
/// # Example
/// ```ignore
/// let non_member_rows = filter_to_ids(&extract, &non_members, "subset")?;
/// ```
pub fn filter_to_ids(df: &DataFrame, ids: &IdSet, context: &str) -> Result<DataFrame> {
    require_columns(df, &[UNIT_ID]).with_context(|| context.to_string())?;

    let keys = df.column(UNIT_ID)?.cast(&DataType::Int64)?;
    let mask: BooleanChunked = keys
        .i64()?
        .into_iter()
        .map(|opt| opt.map_or(false, |id| ids.contains(id)))
        .collect();

    df.filter(&mask)
        .with_context(|| format!("{}: Failed to filter on {}", context, UNIT_ID))
}
