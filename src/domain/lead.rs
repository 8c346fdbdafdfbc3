// ==========================================
// PLG 线索评分门户 - 线索领域模型
// ==========================================
// 数据来源: lead_dashboard 视图 / 静态样例数据
// 红线: total_score 与 tier 只由分项分派生，不独立存储
// ==========================================

use crate::domain::types::{BillingTier, LeadTier, SignalType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ComponentScores - 分项评分
// ==========================================
// 五个分项，约定取值 [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub company: i32,   // 企业画像：是否企业级目标
    pub usage: i32,     // 使用活跃度
    pub expansion: i32, // 扩张信号
    pub champion: i32,  // 开发者拥护者投入度
    pub timing: i32,    // 时机
}

impl ComponentScores {
    pub fn new(company: i32, usage: i32, expansion: i32, champion: i32, timing: i32) -> Self {
        Self {
            company,
            usage,
            expansion,
            champion,
            timing,
        }
    }

    /// 每个分项截断到 [0, 100]
    pub fn clamped(&self) -> Self {
        Self {
            company: self.company.clamp(0, 100),
            usage: self.usage.clamp(0, 100),
            expansion: self.expansion.clamp(0, 100),
            champion: self.champion.clamp(0, 100),
            timing: self.timing.clamp(0, 100),
        }
    }
}

// ==========================================
// ScoredLead - 评分结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredLead {
    /// 四舍五入后的总分
    pub total_score: i32,
    /// 分级（按未取整原始分落档）
    pub tier: LeadTier,
    /// 未取整的加权原始分（万分之一精度）
    pub raw_score_bp: i64,
}

impl ScoredLead {
    /// 原始加权分（浮点，仅用于展示）
    pub fn raw_score(&self) -> f64 {
        self.raw_score_bp as f64 / 10_000.0
    }
}

// ==========================================
// Stakeholder / ExpansionSignal
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSignal {
    pub signal_type: SignalType,
    pub title: String,
}

// ==========================================
// Lead - 线索看板记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub email: String,
    pub champion_name: String,

    // ===== 企业画像 =====
    pub company_name: String,
    pub company_domain: String,
    pub industry: String,
    pub employee_count: i64,
    pub employee_range: String,
    pub funding_stage: String,
    pub total_funding_usd: i64,

    // ===== 内部信号 =====
    pub billing_tier: BillingTier,
    pub team_member_count: i64,
    pub project_count: i64,
    pub api_calls_30d: i64,
    pub api_call_growth_pct: f64,
    pub features_used: Vec<String>,

    // ===== 评分 =====
    pub components: ComponentScores,
    /// 由 LeadScorer 填充；未评分时为 None
    pub scored: Option<ScoredLead>,

    // ===== 外部补充 =====
    pub stakeholders: Vec<Stakeholder>,
    pub signals: Vec<ExpansionSignal>,
    pub suggested_action: String,
    pub last_active_at: Option<NaiveDateTime>,
}

impl Lead {
    /// 总分（未评分视为 0）
    pub fn total_score(&self) -> i32 {
        self.scored.map(|s| s.total_score).unwrap_or(0)
    }

    /// 分级（未评分视为 Monitor）
    pub fn tier(&self) -> LeadTier {
        self.scored.map(|s| s.tier).unwrap_or(LeadTier::Monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_scores_clamped() {
        let c = ComponentScores::new(-5, 120, 50, 100, 0).clamped();
        assert_eq!(c, ComponentScores::new(0, 100, 50, 100, 0));
    }

    #[test]
    fn test_scored_lead_raw_score() {
        let s = ScoredLead {
            total_score: 80,
            tier: LeadTier::Warm,
            raw_score_bp: 795_000,
        };
        assert!((s.raw_score() - 79.5).abs() < 1e-9);
    }
}
