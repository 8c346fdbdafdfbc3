// ==========================================
// PLG 线索评分门户 - 引擎层
// ==========================================
// 职责: 纯计算（评分 / 场景测算 / 信号派生）
// 红线: Engine 不拼 SQL，不做 I/O，对任意输入不报错
// ==========================================

pub mod lead_scorer;
pub mod scenario_projector;
pub mod signals;

// 重导出核心引擎
pub use lead_scorer::{LeadScorer, TierCounts};
pub use scenario_projector::ScenarioProjector;
pub use signals::{api_call_growth_pct, features_used, is_company_email, FeatureFlags};
