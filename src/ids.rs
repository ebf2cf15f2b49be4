//! Institution identifier sets
//!
//! An `IdSet` is the in-memory form of a one-column `UnitID` table: ordered,
//! deduplicated, with constant-time membership tests. Joins between the
//! qualifying set and the member roster are lookups against it.

use crate::error::MembershipError;
use crate::utils::lazy_helpers::require_columns;
use anyhow::Result;
use polars::prelude::*;
use rustc_hash::FxHashSet;

/// Canonical identifier column name
pub const UNIT_ID: &str = "UnitID";

#[derive(Debug, Clone, Default)]
pub struct IdSet {
    ids: Vec<i64>,
    index: FxHashSet<i64>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless already present. Returns whether it was inserted.
    pub fn insert(&mut self, id: i64) -> bool {
        if self.index.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in first-seen order
    pub fn as_slice(&self) -> &[i64] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    /// Number of identifiers shared with `other`
    pub fn intersection_count(&self, other: &IdSet) -> usize {
        self.iter().filter(|id| other.contains(*id)).count()
    }

    /// Build from the identifier column `column` of `df`
    ///
    /// Duplicates collapse to their first occurrence. A null identifier is
    /// an error.
    pub fn from_column(df: &DataFrame, column: &str) -> Result<Self> {
        require_columns(df, &[column])?;
        let keys = df.column(column)?.cast(&DataType::Int64)?;

        let mut set = IdSet::new();
        for (row, key) in keys.i64()?.into_iter().enumerate() {
            let id = key.ok_or(MembershipError::NullKey { row })?;
            set.insert(id);
        }
        Ok(set)
    }

    /// Build from the `UnitID` column of `df`
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        Self::from_column(df, UNIT_ID)
    }

    /// One-column `UnitID` table
    pub fn to_frame(&self) -> Result<DataFrame> {
        let column = Series::new(UNIT_ID.into(), self.ids.as_slice()).into_column();
        Ok(DataFrame::new(vec![column])?)
    }
}

impl PartialEq for IdSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl FromIterator<i64> for IdSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
