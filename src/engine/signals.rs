// ==========================================
// PLG 线索评分门户 - 内部信号派生
// ==========================================
// 职责:
// - 由原始信号计算派生字段（增长率 / 企业邮箱 / 功能列表）
// - 看板原始行 → Lead 的规范化与默认值填充
// 红线: 纯函数，无 I/O；缺失字段按默认值吸收，不报错
// ==========================================

use crate::domain::lead::{ComponentScores, ExpansionSignal, Lead, Stakeholder};
use crate::domain::types::BillingTier;
use crate::repository::lead_repo::DashboardRow;

/// 个人邮箱域名（不计入企业线索）
pub const PERSONAL_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
];

pub const DEFAULT_SUGGESTED_ACTION: &str = "Review account for expansion potential.";
const UNKNOWN: &str = "Unknown";

// ==========================================
// 派生字段
// ==========================================

/// 30 天 API 调用增长率（%，保留 1 位小数）
///
/// 以千分位整数做十进制舍入（四舍五入，远离零），避免 f64 把 7.25 舍成 7.2。
/// previous <= 0 时返回 0
pub fn api_call_growth_pct(current: i64, previous: i64) -> f64 {
    if previous <= 0 {
        return 0.0;
    }
    let num = (i128::from(current) - i128::from(previous)) * 1_000;
    let den = i128::from(previous);
    let tenths = (2 * num.abs() + den) / (2 * den) * num.signum();
    tenths as f64 / 10.0
}

/// 是否企业邮箱（按个人邮箱域名后缀过滤，区分大小写）
pub fn is_company_email(email: &str) -> bool {
    !PERSONAL_EMAIL_DOMAINS
        .iter()
        .any(|domain| email.ends_with(&format!("@{}", domain)))
}

/// 功能开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub auth: bool,
    pub storage: bool,
    pub edge_functions: bool,
    pub realtime: bool,
    pub vector: bool,
    pub cron: bool,
}

impl FeatureFlags {
    pub fn from_row(row: &DashboardRow) -> Self {
        Self {
            auth: row.uses_auth,
            storage: row.uses_storage,
            edge_functions: row.uses_edge_functions,
            realtime: row.uses_realtime,
            vector: row.uses_vector,
            cron: row.uses_cron,
        }
    }
}

/// 已启用功能名称（固定顺序）
pub fn features_used(flags: &FeatureFlags) -> Vec<String> {
    [
        (flags.auth, "Auth"),
        (flags.storage, "Storage"),
        (flags.edge_functions, "Edge Functions"),
        (flags.realtime, "Realtime"),
        (flags.vector, "Vector"),
        (flags.cron, "Cron"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name.to_string())
    .collect()
}

// ==========================================
// 规范化
// ==========================================

/// 全默认值线索（未评分）
pub fn empty_lead(id: &str) -> Lead {
    Lead {
        id: id.to_string(),
        email: String::new(),
        champion_name: UNKNOWN.to_string(),
        company_name: UNKNOWN.to_string(),
        company_domain: String::new(),
        industry: "Technology".to_string(),
        employee_count: 0,
        employee_range: UNKNOWN.to_string(),
        funding_stage: "unknown".to_string(),
        total_funding_usd: 0,
        billing_tier: BillingTier::Free,
        team_member_count: 1,
        project_count: 0,
        api_calls_30d: 0,
        api_call_growth_pct: 0.0,
        features_used: Vec::new(),
        components: ComponentScores::default(),
        scored: None,
        stakeholders: Vec::new(),
        signals: Vec::new(),
        suggested_action: DEFAULT_SUGGESTED_ACTION.to_string(),
        last_active_at: None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

/// 看板原始行 → Lead（未评分）
///
/// 缺失或空值按默认值填充，干系人/信号由调用方按域名分组后传入
pub fn normalize_row(
    row: DashboardRow,
    stakeholders: Vec<Stakeholder>,
    signals: Vec<ExpansionSignal>,
) -> Lead {
    let base = empty_lead(&row.developer_id);
    let flags = FeatureFlags::from_row(&row);
    let email = row.email.unwrap_or_default();
    let company_domain = non_empty(row.company_domain);

    let champion_name = non_empty(row.champion_name)
        .or_else(|| {
            email
                .split('@')
                .next()
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or(base.champion_name);
    let company_name = non_empty(row.company_name)
        .or_else(|| company_domain.clone())
        .unwrap_or(base.company_name);

    let components = ComponentScores::new(
        row.company_score.unwrap_or(0),
        row.usage_score.unwrap_or(0),
        row.expansion_score.unwrap_or(0),
        row.champion_score.unwrap_or(0),
        row.timing_score.unwrap_or(0),
    );

    let api_calls_30d = row.api_calls_30d.unwrap_or(0);
    let growth = api_call_growth_pct(api_calls_30d, row.api_calls_prev_30d.unwrap_or(0));

    Lead {
        email,
        champion_name,
        company_name,
        company_domain: company_domain.unwrap_or_default(),
        industry: non_empty(row.industry).unwrap_or(base.industry),
        employee_count: row.employee_count.unwrap_or(0),
        employee_range: non_empty(row.employee_range).unwrap_or(base.employee_range),
        funding_stage: non_empty(row.funding_stage).unwrap_or(base.funding_stage),
        total_funding_usd: row.total_funding_usd.unwrap_or(0),
        billing_tier: row
            .billing_tier
            .as_deref()
            .map(BillingTier::from_str)
            .unwrap_or(BillingTier::Free),
        team_member_count: positive(row.team_member_count).unwrap_or(base.team_member_count),
        project_count: row.project_count.unwrap_or(0),
        api_calls_30d,
        api_call_growth_pct: growth,
        features_used: features_used(&flags),
        components,
        stakeholders,
        signals,
        suggested_action: non_empty(row.suggested_action).unwrap_or(base.suggested_action),
        last_active_at: row.last_active_at,
        ..base
    }
}
