// ==========================================
// PLG 线索评分门户 - API 层
// ==========================================
// 职责: 组合数据源与引擎，提供页面/JSON 所需的业务数据
// ==========================================

pub mod error;
pub mod lead_api;
pub mod resume_api;
pub mod scenario_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use lead_api::{LeadApi, LeadBoard, LeadSource, SqliteLeadSource};
pub use resume_api::{ResumeApi, ResumeView, SectionView};
pub use scenario_api::{ScenarioApi, ScenarioView};
