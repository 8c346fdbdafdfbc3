// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 默认参数、config_kv 覆写、非法值报错、覆写后评分变化
// ==========================================

mod test_helpers;

use plg_pipeline::config::config_keys::*;
use plg_pipeline::config::{ConfigError, ConfigManager, ScoringProfile};
use plg_pipeline::domain::ComponentScores;
use plg_pipeline::engine::LeadScorer;
use plg_pipeline::LeadTier;
use test_helpers::{create_test_db, insert_config, open_test_connection};

fn load(db_path: &str) -> Result<ScoringProfile, ConfigError> {
    ConfigManager::new(db_path).unwrap().load_scoring_profile()
}

#[test]
fn test_no_overrides_yields_defaults() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let profile = load(&db_path).unwrap();
    assert_eq!(profile, ScoringProfile::default());
    assert_eq!(profile.weights.total_bp(), 10_000);
}

#[test]
fn test_missing_config_table_yields_defaults() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let db_path = tmp.path().to_string_lossy().to_string();
    assert_eq!(load(&db_path).unwrap(), ScoringProfile::default());
}

#[test]
fn test_threshold_and_multiplier_overrides() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, THRESHOLD_HOT, "90").unwrap();
    insert_config(&conn, MULTIPLIER_PRO, "1.4").unwrap();
    drop(conn);

    let profile = load(&db_path).unwrap();
    assert_eq!(profile.thresholds.hot, 90);
    assert_eq!(profile.thresholds.warm, 60);
    assert!((profile.multipliers.pro - 1.4).abs() < 1e-9);

    // 88 分在 hot=90 下降为 Warm
    let scorer = LeadScorer::new(profile.weights, profile.thresholds);
    let scored = scorer.score(&ComponentScores::new(85, 95, 90, 80, 85));
    assert_eq!(scored.total_score, 88);
    assert_eq!(scored.tier, LeadTier::Warm);
}

#[test]
fn test_full_weight_override() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    for key in [
        WEIGHT_COMPANY,
        WEIGHT_USAGE,
        WEIGHT_EXPANSION,
        WEIGHT_CHAMPION,
        WEIGHT_TIMING,
    ] {
        insert_config(&conn, key, "0.2").unwrap();
    }
    drop(conn);

    let profile = load(&db_path).unwrap();
    assert_eq!(profile.weights.company_bp, 2_000);
    assert_eq!(profile.weights.timing_bp, 2_000);
}

#[test]
fn test_partial_weight_override_fails_sum_check() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, WEIGHT_USAGE, "0.5").unwrap();
    drop(conn);

    let err = load(&db_path).unwrap_err();
    assert!(matches!(err, ConfigError::WeightSumMismatch { total_bp: 12_000 }));
}

#[test]
fn test_unparsable_value_is_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, THRESHOLD_WARM, "sixty").unwrap();
    drop(conn);

    let err = load(&db_path).unwrap_err();
    assert!(matches!(err, ConfigError::UnparsableValue { ref key, .. } if key == THRESHOLD_WARM));
}

#[test]
fn test_inverted_thresholds_are_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, THRESHOLD_HOT, "50").unwrap();
    drop(conn);

    let err = load(&db_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidThresholds { hot: 50, .. }));
}

#[test]
fn test_single_value_lookup() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, MULTIPLIER_TEAM, "1.6").unwrap();
    drop(conn);

    let manager = ConfigManager::new(&db_path).unwrap();
    assert_eq!(
        manager.get_global_config_value(MULTIPLIER_TEAM).unwrap().as_deref(),
        Some("1.6")
    );
    assert_eq!(manager.get_global_config_value(MULTIPLIER_FREE).unwrap(), None);
}
