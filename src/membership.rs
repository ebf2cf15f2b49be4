//! Member roster, non-members, market share and status tagging
//!
//! Every operation here joins the qualifying set (left) against the member
//! set (right) by UnitID lookup. Left rows are never duplicated or dropped
//! except where an operation says so; members outside the qualifying set
//! are ignored.

use crate::data::{read_roster, ROSTER_ID_COLUMN};
use crate::error::MembershipError;
use crate::ids::{IdSet, UNIT_ID};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of the status column produced by `tag_membership`
pub const MEMBERSHIP_STATUS: &str = "membership_status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Member,
    NonMember,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Member => "member",
            MembershipStatus::NonMember => "non_member",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current member identifiers from a tab-separated roster file
pub fn gen_ids_members(path: &Path) -> Result<IdSet> {
    let roster = read_roster(path)?;
    member_ids(&roster, ROSTER_ID_COLUMN).with_context(|| format!("Member roster {:?}", path))
}

/// Deduplicated member identifiers from the roster column `id_column`
pub fn member_ids(roster: &DataFrame, id_column: &str) -> Result<IdSet> {
    let ids = IdSet::from_column(roster, id_column)?;
    if ids.len() < roster.height() {
        tracing::debug!(
            "Roster lists {} rows for {} distinct institutions",
            roster.height(),
            ids.len()
        );
    }
    Ok(ids)
}

/// Qualifying institutions that are not members, in qualifying order
pub fn gen_ids_nonmembers(ids_all: &IdSet, ids_members: &IdSet) -> IdSet {
    ids_all.iter().filter(|id| !ids_members.contains(*id)).collect()
}

/// Percentage (0-100) of qualifying institutions that are members
///
/// # Errors
/// `EmptyQualifyingSet` when `ids_all` is empty.
pub fn compute_market_share(ids_all: &IdSet, ids_members: &IdSet) -> Result<f64> {
    if ids_all.is_empty() {
        return Err(MembershipError::EmptyQualifyingSet.into());
    }

    let num_members = ids_all.intersection_count(ids_members);
    let num_institutions = ids_all.len();

    Ok(num_members as f64 / num_institutions as f64 * 100.0)
}

/// Status of every qualifying institution, in qualifying order
pub fn membership_statuses(ids_all: &IdSet, ids_members: &IdSet) -> Vec<(i64, MembershipStatus)> {
    ids_all
        .iter()
        .map(|id| {
            let status = if ids_members.contains(id) {
                MembershipStatus::Member
            } else {
                MembershipStatus::NonMember
            };
            (id, status)
        })
        .collect()
}

/// Two-column table: `UnitID` and `membership_status` (`member` / `non_member`)
pub fn tag_membership(ids_all: &IdSet, ids_members: &IdSet) -> Result<DataFrame> {
    let statuses = membership_statuses(ids_all, ids_members);

    let ids: Vec<i64> = statuses.iter().map(|(id, _)| *id).collect();
    let labels: Vec<&str> = statuses.iter().map(|(_, status)| status.as_str()).collect();

    let df = DataFrame::new(vec![
        Series::new(UNIT_ID.into(), ids).into_column(),
        Series::new(MEMBERSHIP_STATUS.into(), labels).into_column(),
    ])?;
    Ok(df)
}
