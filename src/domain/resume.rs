// ==========================================
// PLG 线索评分门户 - 简历领域模型
// ==========================================
// 对应表: profile / resume_sections / resume_items / resume_stats
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub headline: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeItem {
    pub id: String,
    pub section_id: String,
    pub sort_order: i32,
    pub item_type: String,
    pub org: Option<String>,
    pub role: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeStat {
    pub id: String,
    pub stat_key: String,
    pub stat_value: String,
    pub stat_label: String,
    pub sort_order: i32,
}
