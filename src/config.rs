//! Column mappings and analysis configuration
//!
//! Survey variable names change every collection year, so every column a
//! transformation touches is passed in explicitly. `AnalysisConfig` groups
//! them and loads from JSON.

use crate::error::MembershipError;
use crate::utils::lazy_helpers::require_columns;
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Survey year whose variable names are used by default
pub const DEFAULT_SURVEY_YEAR: u16 = 2020;

/// Columns read by the eligibility filter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EligibilityColumns {
    /// Institutional control or affiliation code (1, 3, 4 are non-profit)
    pub control: String,
    /// Undergraduate offering flag (1 = yes)
    pub undergraduate: String,
    /// Active-in-current-year flag (1 = yes)
    pub active: String,
}

impl EligibilityColumns {
    /// Variable names as labelled in the extract for `year`
    pub fn for_survey_year(year: u16) -> Self {
        Self {
            control: format!("Institutional control or affiliation (IC{})", year),
            undergraduate: format!("Undergraduate offering (HD{})", year),
            active: format!("Institution is active in current year (HD{})", year),
        }
    }
}

impl Default for EligibilityColumns {
    fn default() -> Self {
        Self::for_survey_year(DEFAULT_SURVEY_YEAR)
    }
}

/// One source column and the derived column computed from it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingEntry {
    pub source: String,
    pub derived: String,
}

/// Ordered source → derived column-name pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ColumnMapping(Vec<MappingEntry>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(source, derived)| MappingEntry {
                    source: source.into(),
                    derived: derived.into(),
                })
                .collect(),
        )
    }

    /// Builder-style append
    pub fn with(mut self, source: impl Into<String>, derived: impl Into<String>) -> Self {
        self.0.push(MappingEntry {
            source: source.into(),
            derived: derived.into(),
        });
        self
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.source.as_str())
    }

    pub fn derived(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.derived.as_str())
    }

    /// Check the mapping against `df` before any column is computed
    ///
    /// Derived names must be unique and every source column must exist.
    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        let mut seen = FxHashSet::default();
        for derived in self.derived() {
            if !seen.insert(derived) {
                return Err(MembershipError::InvalidMapping(format!(
                    "derived column '{}' appears more than once",
                    derived
                ))
                .into());
            }
        }

        let sources: Vec<&str> = self.sources().collect();
        require_columns(df, &sources)
    }
}

/// Standardized need indicators and the ones whose sign is flipped
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NeedScoreConfig {
    /// Raw variable → standardized column
    pub standardize: ColumnMapping,
    /// Standardized columns where a higher raw value means lower need
    #[serde(default)]
    pub flip: Vec<String>,
}

/// Proportion columns combined into one Blau index column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiversityIndexConfig {
    /// Proportion columns, e.g. the derived names of a proportion group
    pub proportions: Vec<String>,
    /// Name of the index column to append
    pub index: String,
}

/// Everything a full membership analysis needs besides the input files
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub eligibility: EligibilityColumns,
    /// Raw count → proportion column, one group per diversity index
    pub proportions: Vec<ColumnMapping>,
    /// Blau indices computed from the proportion columns
    pub diversity: Vec<DiversityIndexConfig>,
    pub need_score: NeedScoreConfig,
}

impl AnalysisConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis config: {:?}", path))?;

        let config: AnalysisConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse analysis config JSON: {:?}", path))?;

        tracing::debug!(
            "Loaded analysis config: {} proportion groups, {} diversity indices, {} need indicators",
            config.proportions.len(),
            config.diversity.len(),
            config.need_score.standardize.len()
        );
        Ok(config)
    }
}
