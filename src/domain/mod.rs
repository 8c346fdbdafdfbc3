// ==========================================
// PLG 线索评分门户 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod lead;
pub mod resume;
pub mod scenario;
pub mod types;

// 重导出核心类型
pub use catalog::{ColumnDoc, TableDoc, ViewDoc};
pub use lead::{ComponentScores, ExpansionSignal, Lead, ScoredLead, Stakeholder};
pub use resume::{Profile, ResumeItem, ResumeSection, ResumeStat};
pub use scenario::{DerivedMetrics, ScenarioInputs};
pub use types::{BillingTier, LeadTier, SignalType, SubscriptionTier};
