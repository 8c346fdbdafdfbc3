// ==========================================
// PLG 线索评分门户 - 运行时配置
// ==========================================
// 来源: 环境变量（CLI 参数可覆写）
// - PLG_PIPELINE_DB_PATH    数据库路径
// - PLG_PIPELINE_ADDR       监听地址
// - PLG_PIPELINE_LOCALE     默认语言
// - PLG_PIPELINE_LOG_FORMAT 日志格式 (text / json)
// ==========================================

use crate::logging::LogFormat;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "PLG_PIPELINE_DB_PATH";
pub const ENV_ADDR: &str = "PLG_PIPELINE_ADDR";
pub const ENV_LOCALE: &str = "PLG_PIPELINE_LOCALE";
pub const ENV_LOG_FORMAT: &str = "PLG_PIPELINE_LOG_FORMAT";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOCALE: &str = "en";

/// 运行时配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub addr: String,
    pub default_locale: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            addr: DEFAULT_ADDR.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// 从环境变量构建（未设置项取默认值）
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(addr) = env_non_empty(ENV_ADDR) {
            config.addr = addr;
        }
        if let Some(locale) = env_non_empty(ENV_LOCALE) {
            config.default_locale = locale;
        }
        if let Some(format) = env_non_empty(ENV_LOG_FORMAT) {
            config.log_format = LogFormat::from_str(&format);
        }
        config
    }

    /// CLI 覆写
    pub fn with_overrides(mut self, db_path: Option<String>, addr: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(addr) = addr {
            self.addr = addr;
        }
        self
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 获取默认数据库路径
///
/// 优先级: PLG_PIPELINE_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Some(path) = env_non_empty(ENV_DB_PATH) {
        return path;
    }

    let mut path = PathBuf::from("./plg_pipeline.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("plg-pipeline-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("plg-pipeline");

        // 目录创建失败时回落到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("plg_pipeline.db");
        }
    }

    path.to_string_lossy().to_string()
}
