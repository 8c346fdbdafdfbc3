// ==========================================
// PLG 线索评分门户 - 数据库结构目录
// ==========================================
// 用途: /database 页面的表/视图说明（只读文档数据）
// ==========================================

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDoc {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub note: &'static str,
    /// 派生列（GENERATED / 由评分引擎计算）
    pub derived: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableDoc {
    pub name: &'static str,
    pub description: &'static str,
    pub purpose: &'static str,
    pub columns: Vec<ColumnDoc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewDoc {
    pub name: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}
