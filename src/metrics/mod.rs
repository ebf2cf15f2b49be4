//! Derived institutional metrics
//!
//! Proportions, Blau diversity, z-score standardization and the composite
//! need score. Each function takes a table and returns a new one (or a
//! column); inputs are never modified.

pub mod diversity;
pub mod need_score;
pub mod proportions;
pub mod standardize;

pub use diversity::{gen_blau_index, with_blau_index, with_blau_indices, BLAU_INDEX};
pub use need_score::{compute_need_scores, compute_need_scores_with, NEED_SCORE};
pub use proportions::gen_proportions;
pub use standardize::{gen_standardized_cols, population_stats, standardized};
