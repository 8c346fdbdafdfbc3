// ==========================================
// PLG 线索评分门户 - 静态样例线索
// ==========================================
// 用途: 数据源不可用或为空时的回退数据 / /leads 页面
// 分项评分与演示库 (sql/seed.sql) 保持一致
// ==========================================

use crate::domain::lead::{ComponentScores, ExpansionSignal, Lead, Stakeholder};
use crate::domain::types::{BillingTier, SignalType};
use crate::engine::signals::empty_lead;
use chrono::{Duration, NaiveDateTime};

fn stakeholder(name: &str, title: &str) -> Stakeholder {
    Stakeholder {
        name: name.to_string(),
        title: title.to_string(),
    }
}

fn signal(signal_type: SignalType, title: &str) -> ExpansionSignal {
    ExpansionSignal {
        signal_type,
        title: title.to_string(),
    }
}

fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// 5 条样例线索（未评分，最近活跃时间相对 now 计算）
pub fn sample_leads(now: NaiveDateTime) -> Vec<Lead> {
    vec![
        Lead {
            email: "marcus.chen@velocitypay.io".to_string(),
            champion_name: "Marcus Chen".to_string(),
            company_name: "VelocityPay".to_string(),
            company_domain: "velocitypay.io".to_string(),
            industry: "Financial Services".to_string(),
            employee_count: 180,
            employee_range: "51-200".to_string(),
            funding_stage: "series_b".to_string(),
            total_funding_usd: 45_000_000,
            billing_tier: BillingTier::Pro,
            team_member_count: 5,
            project_count: 4,
            api_calls_30d: 2_800_000,
            api_call_growth_pct: 250.0,
            features_used: features(&["Auth", "Storage", "Edge Functions", "Realtime"]),
            components: ComponentScores::new(85, 95, 90, 80, 85),
            stakeholders: vec![
                stakeholder("Sarah Kim", "VP of Engineering"),
                stakeholder("David Park", "CTO"),
            ],
            signals: vec![
                signal(SignalType::Hiring, "Hiring 4 Backend Engineers"),
                signal(SignalType::TechMigration, "Auth0 contract renewal coming up"),
                signal(SignalType::Funding, "Series B closed $30M"),
            ],
            suggested_action: "Champion is highly active (5 team members, 250% API growth). Auth0 contract renewal creates migration window. Reach out to Marcus, offer to connect with VP Eng Sarah Kim for compliance/security conversation.".to_string(),
            last_active_at: Some(now - Duration::hours(2)),
            ..empty_lead("1")
        },
        Lead {
            email: "alex.rivera@homefront.com".to_string(),
            champion_name: "Alex Rivera".to_string(),
            company_name: "HomeFront Technologies".to_string(),
            company_domain: "homefront.com".to_string(),
            industry: "Real Estate".to_string(),
            employee_count: 850,
            employee_range: "501-1000".to_string(),
            funding_stage: "series_c".to_string(),
            total_funding_usd: 120_000_000,
            billing_tier: BillingTier::Team,
            team_member_count: 8,
            project_count: 2,
            api_calls_30d: 1_500_000,
            api_call_growth_pct: 150.0,
            features_used: features(&["Auth", "Storage", "Realtime", "Vector"]),
            components: ComponentScores::new(95, 88, 92, 75, 80),
            stakeholders: vec![
                stakeholder("Michael Torres", "CTO"),
                stakeholder("Lisa Chang", "VP Platform Engineering"),
            ],
            signals: vec![
                signal(SignalType::Hiring, "Building AI/ML team (6 roles)"),
                signal(SignalType::TechMigration, "Firebase scaling issues"),
                signal(SignalType::News, "Expanding to 15 new markets"),
            ],
            suggested_action: "Enterprise account with Team tier already adopted. Using Vector (AI features) - positions well against Firebase limitations. 8 team members indicates organizational buy-in. Connect with Lisa Chang (VP Platform) to discuss enterprise SSO and compliance needs.".to_string(),
            last_active_at: Some(now - Duration::days(1)),
            ..empty_lead("2")
        },
        Lead {
            email: "nina.patel@cloudmetrics.io".to_string(),
            champion_name: "Nina Patel".to_string(),
            company_name: "CloudMetrics".to_string(),
            company_domain: "cloudmetrics.io".to_string(),
            industry: "Software".to_string(),
            employee_count: 75,
            employee_range: "51-200".to_string(),
            funding_stage: "series_a".to_string(),
            total_funding_usd: 12_000_000,
            billing_tier: BillingTier::Pro,
            team_member_count: 3,
            project_count: 2,
            api_calls_30d: 450_000,
            api_call_growth_pct: 125.0,
            features_used: features(&["Auth", "Edge Functions", "Realtime"]),
            components: ComponentScores::new(65, 72, 70, 78, 60),
            stakeholders: vec![stakeholder("James Wilson", "Co-founder & CTO")],
            signals: vec![signal(SignalType::Hiring, "Hiring mentions Supabase as a plus")],
            suggested_action: "Champion is active and expanding usage (125% growth). Company at Series A with hiring momentum. Job posts mention Supabase - internal advocacy happening. Light touch - check in about their use case and offer resources.".to_string(),
            last_active_at: Some(now - Duration::hours(6)),
            ..empty_lead("3")
        },
        Lead {
            email: "tom.jackson@medisync.health".to_string(),
            champion_name: "Tom Jackson".to_string(),
            company_name: "MediSync".to_string(),
            company_domain: "medisync.health".to_string(),
            industry: "Healthcare".to_string(),
            employee_count: 120,
            employee_range: "51-200".to_string(),
            funding_stage: "series_a".to_string(),
            total_funding_usd: 18_000_000,
            billing_tier: BillingTier::Pro,
            team_member_count: 2,
            project_count: 1,
            api_calls_30d: 180_000,
            api_call_growth_pct: 125.0,
            features_used: features(&["Auth", "Storage"]),
            components: ComponentScores::new(75, 58, 65, 55, 70),
            stakeholders: vec![
                stakeholder("Amanda Foster", "VP Engineering"),
                stakeholder("Brian Lee", "Head of Security & Compliance"),
            ],
            signals: vec![
                signal(SignalType::Hiring, "Hiring Security Engineer (HIPAA focus)"),
                signal(SignalType::News, "Partnership with major hospital network"),
            ],
            suggested_action: "Healthcare = high compliance needs (HIPAA). Currently light usage but growing. Hospital partnership signals scaling. Need to address compliance early - share SOC 2 and HIPAA documentation.".to_string(),
            last_active_at: Some(now - Duration::days(3)),
            ..empty_lead("4")
        },
        Lead {
            email: "jason.wright@taskflow.app".to_string(),
            champion_name: "Jason Wright".to_string(),
            company_name: "TaskFlow".to_string(),
            company_domain: "taskflow.app".to_string(),
            industry: "Software".to_string(),
            employee_count: 12,
            employee_range: "11-50".to_string(),
            funding_stage: "seed".to_string(),
            total_funding_usd: 2_500_000,
            billing_tier: BillingTier::Free,
            team_member_count: 1,
            project_count: 1,
            api_calls_30d: 25_000,
            api_call_growth_pct: 150.0,
            features_used: features(&["Auth"]),
            components: ComponentScores::new(35, 45, 40, 50, 55),
            suggested_action: "Early-stage seed startup on free tier. Founder is technical and exploring. Good for long-term nurture. Check back in 3-6 months for growth signals.".to_string(),
            last_active_at: Some(now - Duration::days(8)),
            ..empty_lead("5")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_sample_leads_shape() {
        let leads = sample_leads(now());
        assert_eq!(leads.len(), 5);
        assert!(leads.iter().all(|l| l.scored.is_none()));
        let stakeholders: usize = leads.iter().map(|l| l.stakeholders.len()).sum();
        let signals: usize = leads.iter().map(|l| l.signals.len()).sum();
        assert_eq!(stakeholders, 7);
        assert_eq!(signals, 9);
        assert!(leads[4].stakeholders.is_empty());
    }

    #[test]
    fn test_sample_leads_last_active_relative_to_now() {
        let leads = sample_leads(now());
        assert_eq!(leads[0].last_active_at, Some(now() - Duration::hours(2)));
        assert_eq!(leads[4].last_active_at, Some(now() - Duration::days(8)));
    }
}
