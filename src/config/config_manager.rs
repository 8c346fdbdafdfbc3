// ==========================================
// PLG 线索评分门户 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表加载评分/测算参数覆写
// 存储: config_kv 表 (scope_id='global', key-value)
// 缺表或缺键时回落为默认值；覆写值非法时报错
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::scoring_profile::{
    ScoringProfile, ScoringWeights, TierMultipliers, TierThresholds,
};
use crate::db::open_sqlite_connection_read_only;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const WEIGHT_COMPANY: &str = "scoring/weight/company";
    pub const WEIGHT_USAGE: &str = "scoring/weight/usage";
    pub const WEIGHT_EXPANSION: &str = "scoring/weight/expansion";
    pub const WEIGHT_CHAMPION: &str = "scoring/weight/champion";
    pub const WEIGHT_TIMING: &str = "scoring/weight/timing";

    pub const THRESHOLD_HOT: &str = "scoring/threshold/hot";
    pub const THRESHOLD_WARM: &str = "scoring/threshold/warm";
    pub const THRESHOLD_NURTURE: &str = "scoring/threshold/nurture";

    pub const MULTIPLIER_FREE: &str = "scenario/multiplier/free";
    pub const MULTIPLIER_PRO: &str = "scenario/multiplier/pro";
    pub const MULTIPLIER_TEAM: &str = "scenario/multiplier/team";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 以只读方式打开数据库并创建 ConfigManager
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection_read_only(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 的全部配置
    ///
    /// # 返回
    /// - 空 HashMap: config_kv 表不存在
    fn load_global_values(&self) -> ConfigResult<HashMap<String, String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))?;

        let has_table: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name='config_kv' LIMIT 1",
                [],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if !has_table {
            return Ok(HashMap::new());
        }

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params!["global"], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(values)
    }

    /// 读取单个配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.load_global_values()?.remove(key))
    }

    /// 加载评分/测算参数（默认值 + config_kv 覆写），并做整体校验
    pub fn load_scoring_profile(&self) -> ConfigResult<ScoringProfile> {
        let values = self.load_global_values()?;
        if values.is_empty() {
            tracing::debug!("config_kv 无覆写，使用默认评分参数");
        }
        let profile = profile_from_values(&values)?;
        profile.validate()?;

        tracing::info!(
            weights = ?profile.weights,
            thresholds = ?profile.thresholds,
            multipliers = ?profile.multipliers,
            "评分参数已加载"
        );
        Ok(profile)
    }
}

/// 从键值表构建参数（未出现的键取默认值）
pub fn profile_from_values(values: &HashMap<String, String>) -> ConfigResult<ScoringProfile> {
    use config_keys::*;

    let default_weights = ScoringWeights::default();
    let weight_keys = [
        WEIGHT_COMPANY,
        WEIGHT_USAGE,
        WEIGHT_EXPANSION,
        WEIGHT_CHAMPION,
        WEIGHT_TIMING,
    ];
    let weights = if weight_keys.iter().any(|k| values.contains_key(*k)) {
        // 权重须整体覆写：缺失项按默认值参与合计校验
        let bp = |key: &str, default_bp: i64| -> ConfigResult<f64> {
            match values.get(key) {
                Some(v) => parse_f64(key, v),
                None => Ok(default_bp as f64 / 10_000.0),
            }
        };
        ScoringWeights::from_fractions(
            bp(WEIGHT_COMPANY, default_weights.company_bp)?,
            bp(WEIGHT_USAGE, default_weights.usage_bp)?,
            bp(WEIGHT_EXPANSION, default_weights.expansion_bp)?,
            bp(WEIGHT_CHAMPION, default_weights.champion_bp)?,
            bp(WEIGHT_TIMING, default_weights.timing_bp)?,
        )?
    } else {
        default_weights
    };

    let default_thresholds = TierThresholds::default();
    let thresholds = TierThresholds {
        hot: opt_i64(values, THRESHOLD_HOT)?.unwrap_or(default_thresholds.hot),
        warm: opt_i64(values, THRESHOLD_WARM)?.unwrap_or(default_thresholds.warm),
        nurture: opt_i64(values, THRESHOLD_NURTURE)?.unwrap_or(default_thresholds.nurture),
    };

    let default_multipliers = TierMultipliers::default();
    let multipliers = TierMultipliers {
        free: opt_f64(values, MULTIPLIER_FREE)?.unwrap_or(default_multipliers.free),
        pro: opt_f64(values, MULTIPLIER_PRO)?.unwrap_or(default_multipliers.pro),
        team: opt_f64(values, MULTIPLIER_TEAM)?.unwrap_or(default_multipliers.team),
    };

    Ok(ScoringProfile {
        weights,
        thresholds,
        multipliers,
    })
}

fn parse_f64(key: &str, raw: &str) -> ConfigResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::UnparsableValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn opt_f64(values: &HashMap<String, String>, key: &str) -> ConfigResult<Option<f64>> {
    values.get(key).map(|v| parse_f64(key, v)).transpose()
}

fn opt_i64(values: &HashMap<String, String>, key: &str) -> ConfigResult<Option<i64>> {
    values
        .get(key)
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::UnparsableValue {
                    key: key.to_string(),
                    value: v.to_string(),
                })
        })
        .transpose()
}
