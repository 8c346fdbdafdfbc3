// ==========================================
// PLG 线索评分门户 - 静态样例数据
// ==========================================
// 职责: 外部数据源不可用时的回退数据 + 结构目录文档
// ==========================================

pub mod catalog;
pub mod leads;
pub mod resume;

pub use catalog::{table_docs, view_docs};
pub use leads::sample_leads;
pub use resume::{sample_items, sample_profile, sample_sections, sample_stats};
