// ==========================================
// PLG 线索评分门户 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("权重无效 (component={component}): {message}")]
    InvalidWeight { component: String, message: String },

    #[error("权重合计必须为 1.0: 实际 {total_bp} 基点")]
    WeightSumMismatch { total_bp: i64 },

    #[error("分级阈值必须满足 hot > warm > nurture >= 0: hot={hot}, warm={warm}, nurture={nurture}")]
    InvalidThresholds { hot: i64, warm: i64, nurture: i64 },

    #[error("增长系数无效 (tier={tier}): {value}")]
    InvalidMultiplier { tier: String, value: f64 },

    #[error("配置值无法解析 (key={key}): {value}")]
    UnparsableValue { key: String, value: String },

    #[error("配置读取失败: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
