// ==========================================
// PLG 线索评分门户 - 页面模板
// ==========================================
// 约定: 所有插值文本经 html_escape；界面文案经 i18n，正文为英文
// ==========================================

pub mod dashboard;
pub mod database;
pub mod layout;
pub mod resume;
pub mod scenario;
pub mod sql;
