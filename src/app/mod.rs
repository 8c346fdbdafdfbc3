// ==========================================
// PLG 线索评分门户 - 应用层
// ==========================================
// 职责: 组装共享状态，供 HTTP 服务与 CLI 使用
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
