//! End-to-end membership pipeline over extract/roster files
//!
//! Writes a small IPEDS-style extract and roster to a temp directory, then
//! runs eligibility → membership → subset → proportions → diversity → need score.

use approx::assert_relative_eq;
use ipeds_membership::{
    compute_market_share, compute_need_scores_with, gen_ids_all, gen_ids_members,
    gen_ids_nonmembers, gen_proportions, subset, tag_membership, with_blau_indices,
    AnalysisConfig, EligibilityColumns, IdSet, MembershipAnalysis, MembershipError,
    MEMBERSHIP_STATUS, NEED_SCORE, UNIT_ID,
};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const EXTRACT: &str = "\
UnitID,Institution Name,Institutional control or affiliation (IC2020),Undergraduate offering (HD2020),Institution is active in current year (HD2020),Grand total men,Grand total women,Pell grant percent
100654,Alabama A & M University,1,1,1,2500,3500,71
100663,University of Alabama at Birmingham,1,1,1,8000,13000,35
100690,Amridge University,4,1,1,300,100,60
100706,University of Alabama in Huntsville,1,1,1,5000,5000,30
100724,Alabama State University,1,1,1,1500,2500,75
100733,For-Profit Beauty Academy,2,1,1,10,90,80
100751,Closed College,3,1,2,400,400,50
100760,Graduate Seminary,4,2,1,50,50,20
";

const ROSTER: &str = "\
IPEDS_UnitID\tInstitution
100663\tUniversity of Alabama at Birmingham
100724\tAlabama State University
100663\tUAB (duplicate listing)
999999\tOut-of-scope Institute
";

const CONFIG: &str = r#"{
    "proportions": [
        [
            {"source": "Grand total men", "derived": "p_men"},
            {"source": "Grand total women", "derived": "p_women"}
        ]
    ],
    "diversity": [
        {"proportions": ["p_men", "p_women"], "index": "gender_blau"}
    ],
    "need_score": {
        "standardize": [
            {"source": "Pell grant percent", "derived": "z_pell"},
            {"source": "gender_blau", "derived": "z_gender"}
        ],
        "flip": ["z_gender"]
    }
}"#;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Fixture {
    _dir: TempDir,
    extract: PathBuf,
    roster: PathBuf,
    config: PathBuf,
}

fn write_fixture() -> Fixture {
    init_logging();
    let dir = TempDir::new().unwrap();
    let extract = dir.path().join("ipeds_extract.csv");
    let roster = dir.path().join("members.txt");
    let config = dir.path().join("analysis.json");
    fs::write(&extract, EXTRACT).unwrap();
    fs::write(&roster, ROSTER).unwrap();
    fs::write(&config, CONFIG).unwrap();
    Fixture { _dir: dir, extract, roster, config }
}

fn i64_column(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name).unwrap().i64().unwrap().into_iter().map(|v| v.unwrap()).collect()
}

fn f64_column(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name).unwrap().f64().unwrap().into_iter().map(|v| v.unwrap()).collect()
}

#[test]
fn test_qualifying_and_member_sets() {
    let fx = write_fixture();

    let ids_all = gen_ids_all(&fx.extract, &EligibilityColumns::default()).unwrap();
    let ids_members = gen_ids_members(&fx.roster).unwrap();

    assert_eq!(ids_all.as_slice(), &[100654, 100663, 100690, 100706, 100724]);
    assert_eq!(ids_members.as_slice(), &[100663, 100724, 999999]);

    let non_members = gen_ids_nonmembers(&ids_all, &ids_members);
    assert_eq!(non_members.as_slice(), &[100654, 100690, 100706]);
    assert_eq!(
        non_members.len(),
        ids_all.len() - ids_all.intersection_count(&ids_members)
    );

    let share = compute_market_share(&ids_all, &ids_members).unwrap();
    assert_relative_eq!(share, 40.0);
}

#[test]
fn test_tagging_round_trip() {
    let fx = write_fixture();
    let ids_all = gen_ids_all(&fx.extract, &EligibilityColumns::default()).unwrap();
    let ids_members = gen_ids_members(&fx.roster).unwrap();

    let tagged = tag_membership(&ids_all, &ids_members).unwrap();
    assert_eq!(tagged.height(), ids_all.len());

    let members = tagged
        .lazy()
        .filter(col(MEMBERSHIP_STATUS).eq(lit("member")))
        .collect()
        .unwrap();
    assert_eq!(i64_column(&members, UNIT_ID), vec![100663, 100724]);
}

#[test]
fn test_analysis_summary_from_files() {
    let fx = write_fixture();

    let analysis =
        MembershipAnalysis::from_files(&fx.extract, &fx.roster, &EligibilityColumns::default())
            .unwrap();
    let summary = analysis.summary().unwrap();

    assert_eq!(summary.qualifying, 5);
    assert_eq!(summary.members, 2);
    assert_eq!(summary.non_members, 3);
    assert_eq!(summary.unmatched_members, 1);
    assert_relative_eq!(summary.market_share, 40.0);
}

#[test]
fn test_need_scores_for_non_members() {
    let fx = write_fixture();
    let config = AnalysisConfig::load(&fx.config).unwrap();

    let ids_all = gen_ids_all(&fx.extract, &config.eligibility).unwrap();
    let ids_members = gen_ids_members(&fx.roster).unwrap();
    let non_members = gen_ids_nonmembers(&ids_all, &ids_members);

    let vars = [UNIT_ID, "Grand total men", "Grand total women", "Pell grant percent"];
    let df = subset(&fx.extract, &non_members, &vars).unwrap();
    assert_eq!(i64_column(&df, UNIT_ID), vec![100654, 100690, 100706]);

    let df = gen_proportions(&df, &config.proportions[0]).unwrap();
    let df = with_blau_indices(&df, &config.diversity).unwrap();

    let blau = f64_column(&df, "gender_blau");
    let (p_men, p_women) = (2500.0f64 / 6000.0, 3500.0f64 / 6000.0);
    assert_relative_eq!(blau[0], 1.0 - (p_men.powi(2) + p_women.powi(2)), epsilon = 1e-12);
    assert_relative_eq!(blau[1], 0.375, epsilon = 1e-12);
    assert_relative_eq!(blau[2], 0.5, epsilon = 1e-12);

    let scored = compute_need_scores_with(&df, &config.need_score).unwrap();
    let scores = f64_column(&scored, NEED_SCORE);
    let z_pell = f64_column(&scored, "z_pell");
    let z_gender = f64_column(&scored, "z_gender");

    for row in 0..scored.height() {
        assert_relative_eq!(scores[row], z_pell[row] + z_gender[row], epsilon = 1e-12);
    }
    // Least gender-diverse campus gets the positive (flipped) diversity term
    assert!(z_gender[1] > 0.0);
    // Highest Pell share and lowest diversity → highest need
    let neediest = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(row, _)| row)
        .unwrap();
    assert_eq!(neediest, 1);
}

#[test]
fn test_missing_roster_column_fails_fast() {
    let fx = write_fixture();
    let bad_roster = fx.roster.with_file_name("bad_roster.txt");
    fs::write(&bad_roster, "UnitID\tInstitution\n100663\tUAB\n").unwrap();

    let err = gen_ids_members(&bad_roster).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MembershipError>(),
        Some(MembershipError::MissingColumn { column, .. }) if column == "IPEDS_UnitID"
    ));
}

#[test]
fn test_missing_file_reports_path() {
    init_logging();
    let err = gen_ids_all(Path::new("no_such_extract.csv"), &EligibilityColumns::default())
        .unwrap_err();
    assert!(format!("{:?}", err).contains("no_such_extract.csv"));
}

#[test]
fn test_empty_qualifying_set() {
    let err = compute_market_share(&IdSet::new(), &IdSet::new()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<MembershipError>(),
        Some(&MembershipError::EmptyQualifyingSet)
    );
}
