// ==========================================
// PLG 线索评分门户 - 核心库
// ==========================================
// 技术栈: tokio + rusqlite + tracing
// 系统定位: 线索优先级看板 + 增长场景测算（只读展示，人工决策）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 只读数据访问
pub mod repository;

// 引擎层 - 评分与测算
pub mod engine;

// 静态样例数据
pub mod fixtures;

// 配置层 - 评分参数 / 运行时配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// Web 层 - HTTP 服务与页面
pub mod web;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BillingTier, LeadTier, SignalType, SubscriptionTier};

// 领域实体
pub use domain::{ComponentScores, DerivedMetrics, Lead, ScenarioInputs, ScoredLead};

// 引擎
pub use engine::{LeadScorer, ScenarioProjector};

// API
pub use api::{LeadApi, ResumeApi, ScenarioApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "PLG Pipeline";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
