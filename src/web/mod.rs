// ==========================================
// PLG 线索评分门户 - Web 层
// ==========================================
// 职责: HTTP 服务、路由分发、页面渲染、展示格式化
// ==========================================

pub mod format;
pub mod http;
pub mod pages;
pub mod router;

// 重导出
pub use http::{serve, serve_with_shutdown, HttpRequest, HttpResponse};
pub use router::{dispatch, render_page, Page};
