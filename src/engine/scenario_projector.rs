// ==========================================
// PLG 线索评分门户 - 增长场景测算引擎
// ==========================================
// 输入: ScenarioInputs (users, images_per_day, team_size, tier)
// 输出: DerivedMetrics（按依赖顺序整体重算）
// 约定:
// - round 为四舍五入（输入非负，.5 进位）
// - 阶梯项使用整数除法（向下取整）
// - 比例项的分母至少为 1，users=0 / images_per_day=0 不会产生 NaN
// - 除档位增长系数外，常量均为固定业务假设
// ==========================================

use crate::config::scoring_profile::TierMultipliers;
use crate::domain::scenario::{DerivedMetrics, ScenarioInputs};
use crate::domain::types::SubscriptionTier;

/// 增长率上限
const MAX_GROWTH_RATE: f64 = 2.5;
/// 3/6/12 个月增长倍数
const PROJECTION_FACTORS: [f64; 3] = [2.0, 8.0, 25.0];

fn round_u64(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x.round() as u64
    } else {
        0
    }
}

fn pct(value: u64) -> f64 {
    value as f64 / 100.0
}

// ==========================================
// 档位相关的固定费率
// ==========================================

/// Stripe 流失挽回率（%）
fn stripe_recovery_rate(tier: SubscriptionTier) -> u64 {
    match tier {
        SubscriptionTier::Free => 5,
        SubscriptionTier::Pro => 8,
        SubscriptionTier::Team => 12,
    }
}

/// 每用户月收入（美元）
fn mrr_per_user(tier: SubscriptionTier) -> f64 {
    match tier {
        SubscriptionTier::Free => 0.5,
        SubscriptionTier::Pro => 2.0,
        SubscriptionTier::Team => 5.0,
    }
}

/// 平台化每工作区月收入（美元）
fn platform_revenue_per_workspace(tier: SubscriptionTier) -> u64 {
    match tier {
        SubscriptionTier::Free => 50,
        SubscriptionTier::Pro => 100,
        SubscriptionTier::Team => 200,
    }
}

/// SSO 解锁的企业单规模
fn sso_unlock_deal_size(team_size: u64) -> u64 {
    if team_size >= 10 {
        100_000
    } else if team_size >= 5 {
        50_000
    } else {
        25_000
    }
}

// ==========================================
// ScenarioProjector - 增长场景测算引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioProjector {
    multipliers: TierMultipliers,
}

impl ScenarioProjector {
    /// 系数须已通过 TierMultipliers::validate
    pub fn new(multipliers: TierMultipliers) -> Self {
        Self { multipliers }
    }

    /// 测算全部派生指标
    pub fn project(&self, inputs: &ScenarioInputs) -> DerivedMetrics {
        let tier = inputs.tier;
        let users = inputs.users;
        let images_per_day = inputs.images_per_day;
        let team_size = inputs.team_size;
        let users_f = users as f64;
        let ipd_f = images_per_day as f64;
        let team_f = team_size as f64;

        // ===== 增长基线 =====
        let tier_multiplier = self.multipliers.for_tier(tier);
        let growth_rate = (1.0 + team_f * 0.1 + tier_multiplier * 0.3).min(MAX_GROWTH_RATE);

        // ===== 存储与流量 =====
        let storage_gb = round_u64(ipd_f * 30.0 * 2.0 / 1000.0);
        let redundant_storage_gb = round_u64(storage_gb as f64 * 0.6);
        let monthly_images = images_per_day.saturating_mul(30);

        // ===== 用户增长预测 =====
        let [p3, p6, p12] = PROJECTION_FACTORS.map(|f| round_u64(users_f * growth_rate * f));

        // ===== 30 天速赢 =====
        let storage_savings = round_u64(redundant_storage_gb as f64 * 0.15);
        let vector_engagement_boost = (15 + (users / 10_000) * 2).min(25);
        let stripe_rate = stripe_recovery_rate(tier);
        let estimated_mrr = users_f * mrr_per_user(tier);
        let stripe_recovery = round_u64(estimated_mrr * pct(stripe_rate));

        // ===== 90 天 =====
        let api_adoption_rate = (10 + (team_size / 5) * 3).min(25);
        let api_revenue_monthly =
            round_u64(monthly_images as f64 * 0.05 * pct(api_adoption_rate));
        let batch_savings_percent = (30 + (images_per_day / 5_000) * 5).min(45);
        let compute_cost_estimate = round_u64(ipd_f * 0.002 * 30.0);
        let batch_savings = round_u64(compute_cost_estimate as f64 * pct(batch_savings_percent));
        let support_tickets_per_month = round_u64(users_f * 0.02);
        let realtime_ticket_reduction = (35 + (images_per_day / 2_000) * 5).min(50);
        let tickets_saved =
            round_u64(support_tickets_per_month as f64 * pct(realtime_ticket_reduction));
        let conversion_boost = (10 + (users / 5_000) * 2).min(20);
        let active_users_now = round_u64(users_f * (ipd_f / (users_f * 2.0).max(1.0)));

        // ===== 企业化 =====
        let enterprise_clients_capacity = round_u64(p6 as f64 / 1000.0);
        let concurrent_connections = round_u64(users_f * 0.05 + team_f * 2.0);

        // ===== 平台化 =====
        let per_workspace = platform_revenue_per_workspace(tier);
        let potential_workspaces = round_u64(p12 as f64 / 500.0);

        // ===== 紧迫度 =====
        let storage_divisor = storage_gb.max(1) as f64;
        let days_until_storage_limit = match tier {
            SubscriptionTier::Free => round_u64(1_000.0 / storage_divisor * 30.0),
            SubscriptionTier::Pro => round_u64(10_000.0 / storage_divisor * 30.0),
            SubscriptionTier::Team => 999,
        };
        let needs_upgrade = match tier {
            SubscriptionTier::Free => users > 5_000,
            SubscriptionTier::Pro => users > 25_000,
            SubscriptionTier::Team => false,
        };

        DerivedMetrics {
            tier_multiplier,
            growth_rate,
            storage_gb,
            redundant_storage_gb,
            monthly_images,
            projected_users_3_mo: p3,
            projected_users_6_mo: p6,
            projected_users_12_mo: p12,
            storage_savings,
            vector_engagement_boost,
            stripe_recovery_rate: stripe_rate,
            estimated_mrr,
            stripe_recovery,
            api_adoption_rate,
            api_revenue_monthly,
            batch_savings_percent,
            compute_cost_estimate,
            batch_savings,
            support_tickets_per_month,
            realtime_ticket_reduction,
            tickets_saved,
            conversion_boost,
            active_users_now,
            sso_unlock_deal_size: sso_unlock_deal_size(team_size),
            enterprise_clients_capacity,
            concurrent_connections,
            read_replica_recommended: p6 > 50_000,
            connection_pooling_critical: concurrent_connections > 100,
            platform_revenue_per_workspace: per_workspace,
            potential_workspaces,
            platform_revenue_potential: potential_workspaces.saturating_mul(per_workspace),
            data_points_for_ml: monthly_images.saturating_mul(12),
            days_until_storage_limit,
            needs_upgrade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(users: u64, ipd: u64, team: u64, tier: SubscriptionTier) -> ScenarioInputs {
        ScenarioInputs {
            users,
            images_per_day: ipd,
            team_size: team,
            tier,
        }
    }

    #[test]
    fn test_pro_tier_rates() {
        let m = ScenarioProjector::default()
            .project(&inputs(20_000, 6_000, 6, SubscriptionTier::Pro));
        assert!((m.tier_multiplier - 1.2).abs() < 1e-12);
        // 1 + 0.6 + 0.36 = 1.96
        assert!((m.growth_rate - 1.96).abs() < 1e-9);
        assert_eq!(m.vector_engagement_boost, 19);
        assert_eq!(m.stripe_recovery_rate, 8);
        assert!((m.estimated_mrr - 40_000.0).abs() < 1e-9);
        assert_eq!(m.stripe_recovery, 3_200);
        assert_eq!(m.api_adoption_rate, 13);
        assert_eq!(m.batch_savings_percent, 35);
        assert_eq!(m.realtime_ticket_reduction, 50);
        assert_eq!(m.conversion_boost, 18);
        assert_eq!(m.sso_unlock_deal_size, 50_000);
        assert_eq!(m.platform_revenue_per_workspace, 100);
        assert!(!m.needs_upgrade);
    }

    #[test]
    fn test_growth_rate_capped() {
        let m = ScenarioProjector::default()
            .project(&inputs(1_000, 500, 50, SubscriptionTier::Team));
        assert_eq!(m.growth_rate, 2.5);
        assert_eq!(m.days_until_storage_limit, 999);
        assert_eq!(m.sso_unlock_deal_size, 100_000);
        assert_eq!(m.api_adoption_rate, 25);
    }

    #[test]
    fn test_zero_inputs_do_not_produce_nan() {
        let m = ScenarioProjector::default().project(&inputs(0, 0, 0, SubscriptionTier::Free));
        assert_eq!(m.active_users_now, 0);
        assert_eq!(m.storage_gb, 0);
        // 分母回落为 1: 1000 / 1 * 30
        assert_eq!(m.days_until_storage_limit, 30_000);
        assert!(m.numeric_fields().iter().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn test_custom_multiplier_changes_growth() {
        let projector = ScenarioProjector::new(TierMultipliers {
            free: 2.0,
            pro: 1.2,
            team: 1.5,
        });
        let m = projector.project(&inputs(1_000, 500, 2, SubscriptionTier::Free));
        // 1 + 0.2 + 0.6 = 1.8
        assert!((m.growth_rate - 1.8).abs() < 1e-9);
        assert_eq!(m.projected_users_3_mo, 3_600);
    }
}
