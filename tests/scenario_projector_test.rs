// ==========================================
// ScenarioProjector 集成测试
// ==========================================
// 测试目标: 初始输入的完整指标、档位差异、非负/有限、增长率上下限
// ==========================================

use plg_pipeline::config::TierMultipliers;
use plg_pipeline::domain::ScenarioInputs;
use plg_pipeline::engine::ScenarioProjector;
use plg_pipeline::SubscriptionTier;
use proptest::prelude::*;

fn inputs(
    users: u64,
    images_per_day: u64,
    team_size: u64,
    tier: SubscriptionTier,
) -> ScenarioInputs {
    ScenarioInputs {
        users,
        images_per_day,
        team_size,
        tier,
    }
}

fn tiers() -> impl Strategy<Value = SubscriptionTier> {
    prop_oneof![
        Just(SubscriptionTier::Free),
        Just(SubscriptionTier::Pro),
        Just(SubscriptionTier::Team),
    ]
}

#[test]
fn test_default_inputs_full_metrics() {
    let m = ScenarioProjector::default().project(&ScenarioInputs::default());

    assert!((m.tier_multiplier - 1.0).abs() < 1e-9);
    assert!((m.growth_rate - 1.5).abs() < 1e-9);
    assert_eq!(m.storage_gb, 30);
    assert_eq!(m.redundant_storage_gb, 18);
    assert_eq!(m.monthly_images, 15_000);
    assert_eq!(
        (m.projected_users_3_mo, m.projected_users_6_mo, m.projected_users_12_mo),
        (3_000, 12_000, 37_500)
    );
    assert_eq!(m.storage_savings, 3);
    assert_eq!(m.vector_engagement_boost, 15);
    assert_eq!(m.stripe_recovery_rate, 5);
    assert!((m.estimated_mrr - 500.0).abs() < 1e-9);
    assert_eq!(m.stripe_recovery, 25);
    assert_eq!(m.api_adoption_rate, 10);
    assert_eq!(m.api_revenue_monthly, 75);
    assert_eq!(m.batch_savings_percent, 30);
    assert_eq!(m.compute_cost_estimate, 30);
    assert_eq!(m.batch_savings, 9);
    assert_eq!(m.support_tickets_per_month, 20);
    assert_eq!(m.realtime_ticket_reduction, 35);
    assert_eq!(m.tickets_saved, 7);
    assert_eq!(m.conversion_boost, 10);
    assert_eq!(m.active_users_now, 250);
    assert_eq!(m.sso_unlock_deal_size, 25_000);
    assert_eq!(m.enterprise_clients_capacity, 12);
    assert_eq!(m.concurrent_connections, 54);
    assert!(!m.read_replica_recommended);
    assert!(!m.connection_pooling_critical);
    assert_eq!(m.platform_revenue_per_workspace, 50);
    assert_eq!(m.potential_workspaces, 75);
    assert_eq!(m.platform_revenue_potential, 3_750);
    assert_eq!(m.data_points_for_ml, 180_000);
    assert_eq!(m.days_until_storage_limit, 1_000);
    assert!(!m.needs_upgrade);
}

#[test]
fn test_upgrade_thresholds_per_tier() {
    let p = ScenarioProjector::default();
    assert!(!p.project(&inputs(5_000, 500, 2, SubscriptionTier::Free)).needs_upgrade);
    assert!(p.project(&inputs(5_001, 500, 2, SubscriptionTier::Free)).needs_upgrade);
    assert!(!p.project(&inputs(25_000, 500, 2, SubscriptionTier::Pro)).needs_upgrade);
    assert!(p.project(&inputs(25_001, 500, 2, SubscriptionTier::Pro)).needs_upgrade);
    assert!(!p.project(&inputs(100_000, 500, 2, SubscriptionTier::Team)).needs_upgrade);
}

#[test]
fn test_team_tier_has_no_storage_limit() {
    let m = ScenarioProjector::default()
        .project(&inputs(1_000, 50_000, 2, SubscriptionTier::Team));
    assert_eq!(m.days_until_storage_limit, 999);
}

#[test]
fn test_scale_flags_at_high_usage() {
    let m = ScenarioProjector::default()
        .project(&inputs(100_000, 50_000, 50, SubscriptionTier::Team));
    assert!((m.growth_rate - 2.5).abs() < 1e-9);
    assert!(m.read_replica_recommended);
    assert!(m.connection_pooling_critical);
    assert_eq!(m.vector_engagement_boost, 25);
    assert_eq!(m.api_adoption_rate, 25);
    assert_eq!(m.batch_savings_percent, 45);
    assert_eq!(m.realtime_ticket_reduction, 50);
    assert_eq!(m.conversion_boost, 20);
    assert_eq!(m.sso_unlock_deal_size, 100_000);
}

#[test]
fn test_custom_multiplier_changes_growth() {
    let projector = ScenarioProjector::new(TierMultipliers {
        free: 2.0,
        pro: 1.2,
        team: 1.5,
    });
    let m = projector.project(&ScenarioInputs::default());
    assert!((m.growth_rate - 1.8).abs() < 1e-9);
    assert_eq!(m.projected_users_3_mo, 3_600);
}

proptest! {
    #[test]
    fn metrics_are_finite_and_non_negative(
        users in 0u64..=200_000,
        ipd in 0u64..=100_000,
        team in 0u64..=100,
        tier in tiers(),
    ) {
        let m = ScenarioProjector::default().project(&inputs(users, ipd, team, tier));
        for (name, value) in m.numeric_fields() {
            prop_assert!(value.is_finite(), "{} not finite", name);
            prop_assert!(value >= 0.0, "{} negative", name);
        }
    }

    #[test]
    fn growth_rate_stays_within_bounds(
        users in 100u64..=100_000,
        ipd in 50u64..=50_000,
        team in 1u64..=50,
        tier in tiers(),
    ) {
        let m = ScenarioProjector::default().project(&inputs(users, ipd, team, tier));
        prop_assert!(m.growth_rate >= 1.0);
        prop_assert!(m.growth_rate <= 2.5);
        prop_assert!(m.projected_users_3_mo <= m.projected_users_6_mo);
        prop_assert!(m.projected_users_6_mo <= m.projected_users_12_mo);
    }

    #[test]
    fn projection_is_deterministic(
        users in 100u64..=100_000,
        ipd in 50u64..=50_000,
        team in 1u64..=50,
        tier in tiers(),
    ) {
        let p = ScenarioProjector::default();
        let i = inputs(users, ipd, team, tier);
        prop_assert_eq!(p.project(&i), p.project(&i));
    }
}
