//! Membership Analysis - coordinator over the qualifying and member sets
//!
//! Holds the two identifier sets once and exposes the set operations as
//! methods, plus a serializable summary for reporting.

use crate::config::EligibilityColumns;
use crate::eligibility::gen_ids_all;
use crate::ids::IdSet;
use crate::membership::{
    compute_market_share, gen_ids_members, gen_ids_nonmembers, membership_statuses,
    tag_membership, MembershipStatus,
};
use anyhow::Result;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub struct MembershipAnalysis {
    ids_all: IdSet,
    ids_members: IdSet,
}

/// Headline counts for one extract/roster pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipSummary {
    pub qualifying: usize,
    pub members: usize,
    pub non_members: usize,
    /// Percentage of qualifying institutions that are members
    pub market_share: f64,
    /// Roster institutions that are not in the qualifying set (ignored)
    pub unmatched_members: usize,
}

impl MembershipAnalysis {
    pub fn new(ids_all: IdSet, ids_members: IdSet) -> Self {
        let unmatched = ids_members.len() - ids_members.intersection_count(&ids_all);
        if unmatched > 0 {
            tracing::warn!(
                "{} roster institutions are not in the qualifying set and will be ignored",
                unmatched
            );
        }
        Self { ids_all, ids_members }
    }

    /// Load the qualifying set from an extract and the member set from a roster
    pub fn from_files(
        extract_path: &Path,
        roster_path: &Path,
        columns: &EligibilityColumns,
    ) -> Result<Self> {
        let ids_all = gen_ids_all(extract_path, columns)?;
        let ids_members = gen_ids_members(roster_path)?;

        tracing::info!(
            "Membership analysis: {} qualifying, {} on roster",
            ids_all.len(),
            ids_members.len()
        );
        Ok(Self::new(ids_all, ids_members))
    }

    pub fn ids_all(&self) -> &IdSet {
        &self.ids_all
    }

    pub fn ids_members(&self) -> &IdSet {
        &self.ids_members
    }

    pub fn non_members(&self) -> IdSet {
        gen_ids_nonmembers(&self.ids_all, &self.ids_members)
    }

    pub fn market_share(&self) -> Result<f64> {
        compute_market_share(&self.ids_all, &self.ids_members)
    }

    pub fn statuses(&self) -> Vec<(i64, MembershipStatus)> {
        membership_statuses(&self.ids_all, &self.ids_members)
    }

    pub fn tag(&self) -> Result<DataFrame> {
        tag_membership(&self.ids_all, &self.ids_members)
    }

    pub fn summary(&self) -> Result<MembershipSummary> {
        let members = self.ids_all.intersection_count(&self.ids_members);
        Ok(MembershipSummary {
            qualifying: self.ids_all.len(),
            members,
            non_members: self.ids_all.len() - members,
            market_share: self.market_share()?,
            unmatched_members: self.ids_members.len() - members,
        })
    }
}
