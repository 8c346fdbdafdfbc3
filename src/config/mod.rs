// ==========================================
// PLG 线索评分门户 - 配置层
// ==========================================
// 职责: 评分/测算参数、运行时配置
// 存储: config_kv 表（可选覆写）+ 环境变量
// ==========================================

pub mod app_config;
pub mod config_manager;
pub mod error;
pub mod scoring_profile;

// 重导出
pub use app_config::{get_default_db_path, AppConfig};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use scoring_profile::{
    ScoringProfile, ScoringWeights, TierMultipliers, TierThresholds, WEIGHT_SCALE,
};
