// ==========================================
// PLG 线索评分门户 - 领域类型定义
// ==========================================
// 线索分级 / 计费档位 / 扩张信号类型
// 数据库存储统一使用小写 snake_case 字符串
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 线索分级 (Lead Tier)
// ==========================================
// 红线: 分级是"档位制",由加权原始分落档决定
// 顺序: Monitor < Nurture < Warm < Hot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTier {
    Monitor, // 观察
    Nurture, // 培育
    Warm,    // 温
    Hot,     // 热
}

impl LeadTier {
    /// 全部档位（展示顺序：从高到低）
    pub const ALL: [LeadTier; 4] = [
        LeadTier::Hot,
        LeadTier::Warm,
        LeadTier::Nurture,
        LeadTier::Monitor,
    ];

    /// 从字符串解析档位，未知值回落为 Monitor
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hot" => LeadTier::Hot,
            "warm" => LeadTier::Warm,
            "nurture" => LeadTier::Nurture,
            _ => LeadTier::Monitor,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeadTier::Hot => "hot",
            LeadTier::Warm => "warm",
            LeadTier::Nurture => "nurture",
            LeadTier::Monitor => "monitor",
        }
    }

    /// 档位序号（monitor=0 … hot=3）
    pub fn rank(&self) -> u8 {
        match self {
            LeadTier::Monitor => 0,
            LeadTier::Nurture => 1,
            LeadTier::Warm => 2,
            LeadTier::Hot => 3,
        }
    }
}

impl fmt::Display for LeadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 计费档位 (Billing Tier)
// ==========================================
// 线索看板中的账户计费档位（含 enterprise）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingTier {
    Free,
    Pro,
    Team,
    Enterprise,
}

impl BillingTier {
    /// 从字符串解析，未知值回落为 Free
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pro" => BillingTier::Pro,
            "team" => BillingTier::Team,
            "enterprise" => BillingTier::Enterprise,
            _ => BillingTier::Free,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            BillingTier::Free => "free",
            BillingTier::Pro => "pro",
            BillingTier::Team => "team",
            BillingTier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for BillingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 订阅档位 (Subscription Tier)
// ==========================================
// 增长场景测算器只接受 free / pro / team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Team,
}

impl SubscriptionTier {
    /// 严格解析（用于请求参数校验）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(SubscriptionTier::Free),
            "pro" => Some(SubscriptionTier::Pro),
            "team" => Some(SubscriptionTier::Team),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Team => "team",
        }
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Free
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 扩张信号类型 (Expansion Signal Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Hiring,
    Funding,
    TechMigration,
    News,
    CompetitorChurn,
    Other,
}

impl SignalType {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hiring" => SignalType::Hiring,
            "funding" => SignalType::Funding,
            "tech_migration" => SignalType::TechMigration,
            "news" => SignalType::News,
            "competitor_churn" => SignalType::CompetitorChurn,
            _ => SignalType::Other,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            SignalType::Hiring => "hiring",
            SignalType::Funding => "funding",
            SignalType::TechMigration => "tech_migration",
            SignalType::News => "news",
            SignalType::CompetitorChurn => "competitor_churn",
            SignalType::Other => "other",
        }
    }

    /// 看板图标
    pub fn icon(&self) -> &'static str {
        match self {
            SignalType::Hiring => "👥",
            SignalType::Funding => "💰",
            SignalType::TechMigration => "🔄",
            SignalType::News => "📰",
            SignalType::CompetitorChurn | SignalType::Other => "📌",
        }
    }
}
