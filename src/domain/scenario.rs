// ==========================================
// PLG 线索评分门户 - 增长场景领域模型
// ==========================================
// 输入: 四个可调参数
// 输出: 派生指标（每次输入变化整体重算，无增量语义）
// ==========================================

use crate::domain::types::SubscriptionTier;
use serde::{Deserialize, Serialize};

// ==========================================
// ScenarioInputs - 场景输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInputs {
    pub users: u64,
    pub images_per_day: u64,
    pub team_size: u64,
    pub tier: SubscriptionTier,
}

impl Default for ScenarioInputs {
    /// 测算页初始值
    fn default() -> Self {
        Self {
            users: 1_000,
            images_per_day: 500,
            team_size: 2,
            tier: SubscriptionTier::Free,
        }
    }
}

// ==========================================
// DerivedMetrics - 派生指标
// ==========================================
// 字段按依赖顺序排列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    // ===== 增长基线 =====
    pub tier_multiplier: f64,
    pub growth_rate: f64,

    // ===== 存储与流量 =====
    #[serde(rename = "storageGB")]
    pub storage_gb: u64,
    #[serde(rename = "redundantStorageGB")]
    pub redundant_storage_gb: u64,
    pub monthly_images: u64,

    // ===== 用户增长预测 =====
    pub projected_users_3_mo: u64,
    pub projected_users_6_mo: u64,
    pub projected_users_12_mo: u64,

    // ===== 30 天速赢 =====
    pub storage_savings: u64,
    pub vector_engagement_boost: u64,
    pub stripe_recovery_rate: u64,
    #[serde(rename = "estimatedMRR")]
    pub estimated_mrr: f64,
    pub stripe_recovery: u64,

    // ===== 90 天 =====
    pub api_adoption_rate: u64,
    pub api_revenue_monthly: u64,
    pub batch_savings_percent: u64,
    pub compute_cost_estimate: u64,
    pub batch_savings: u64,
    pub support_tickets_per_month: u64,
    pub realtime_ticket_reduction: u64,
    pub tickets_saved: u64,
    pub conversion_boost: u64,
    pub active_users_now: u64,

    // ===== 企业化 =====
    pub sso_unlock_deal_size: u64,
    pub enterprise_clients_capacity: u64,
    pub concurrent_connections: u64,
    pub read_replica_recommended: bool,
    pub connection_pooling_critical: bool,

    // ===== 平台化 =====
    pub platform_revenue_per_workspace: u64,
    pub potential_workspaces: u64,
    pub platform_revenue_potential: u64,
    #[serde(rename = "dataPointsForML")]
    pub data_points_for_ml: u64,

    // ===== 紧迫度 =====
    pub days_until_storage_limit: u64,
    pub needs_upgrade: bool,
}

impl DerivedMetrics {
    /// 全部数值型指标（用于非负性检查与导出）
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("tierMultiplier", self.tier_multiplier),
            ("growthRate", self.growth_rate),
            ("storageGB", self.storage_gb as f64),
            ("redundantStorageGB", self.redundant_storage_gb as f64),
            ("monthlyImages", self.monthly_images as f64),
            ("projectedUsers3Mo", self.projected_users_3_mo as f64),
            ("projectedUsers6Mo", self.projected_users_6_mo as f64),
            ("projectedUsers12Mo", self.projected_users_12_mo as f64),
            ("storageSavings", self.storage_savings as f64),
            ("vectorEngagementBoost", self.vector_engagement_boost as f64),
            ("stripeRecoveryRate", self.stripe_recovery_rate as f64),
            ("estimatedMRR", self.estimated_mrr),
            ("stripeRecovery", self.stripe_recovery as f64),
            ("apiAdoptionRate", self.api_adoption_rate as f64),
            ("apiRevenueMonthly", self.api_revenue_monthly as f64),
            ("batchSavingsPercent", self.batch_savings_percent as f64),
            ("computeCostEstimate", self.compute_cost_estimate as f64),
            ("batchSavings", self.batch_savings as f64),
            ("supportTicketsPerMonth", self.support_tickets_per_month as f64),
            ("realtimeTicketReduction", self.realtime_ticket_reduction as f64),
            ("ticketsSaved", self.tickets_saved as f64),
            ("conversionBoost", self.conversion_boost as f64),
            ("activeUsersNow", self.active_users_now as f64),
            ("ssoUnlockDealSize", self.sso_unlock_deal_size as f64),
            ("enterpriseClientsCapacity", self.enterprise_clients_capacity as f64),
            ("concurrentConnections", self.concurrent_connections as f64),
            ("platformRevenuePerWorkspace", self.platform_revenue_per_workspace as f64),
            ("potentialWorkspaces", self.potential_workspaces as f64),
            ("platformRevenuePotential", self.platform_revenue_potential as f64),
            ("dataPointsForML", self.data_points_for_ml as f64),
            ("daysUntilStorageLimit", self.days_until_storage_limit as f64),
        ]
    }
}
