//! IPEDS Membership Analytics
//!
//! Identifies candidate member institutions from IPEDS survey extracts and
//! derives the indicators used to prioritise them.
//!
//! - `eligibility/`: qualifying-institution filter (non-profit, undergraduate, active)
//! - `membership/`: roster loading, non-members, market share, status tags
//! - `subset/`: restrict an extract to an identifier set and variable list
//! - `metrics/`: proportions, Blau diversity, standardization, need score
//! - `analysis/`: coordinator and summary over one extract/roster pair
//!
//! All tables are Polars `DataFrame`s keyed by `UnitID`; every operation
//! returns a new table.

pub mod analysis;
pub mod config;
pub mod data;
pub mod eligibility;
pub mod error;
pub mod ids;
pub mod membership;
pub mod metrics;
pub mod subset;
pub mod utils;

// Re-export commonly used types
pub use analysis::{MembershipAnalysis, MembershipSummary};
pub use config::{
    AnalysisConfig, ColumnMapping, DiversityIndexConfig, EligibilityColumns, MappingEntry,
    NeedScoreConfig,
};
pub use eligibility::{gen_ids_all, qualifying_ids};
pub use error::MembershipError;
pub use ids::{IdSet, UNIT_ID};
pub use membership::{
    compute_market_share, gen_ids_members, gen_ids_nonmembers, member_ids, membership_statuses,
    tag_membership, MembershipStatus, MEMBERSHIP_STATUS,
};
pub use metrics::*;
pub use subset::{subset, subset_frame};
