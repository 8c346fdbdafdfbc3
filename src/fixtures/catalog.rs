// ==========================================
// PLG 线索评分门户 - 数据库结构目录
// ==========================================
// /database 页面展示用；derived=true 的列不落库，由评分引擎/信号派生计算
// ==========================================

use crate::domain::catalog::{ColumnDoc, TableDoc, ViewDoc};

const fn col(name: &'static str, sql_type: &'static str, note: &'static str) -> ColumnDoc {
    ColumnDoc {
        name,
        sql_type,
        note,
        derived: false,
    }
}

const fn derived(name: &'static str, sql_type: &'static str, note: &'static str) -> ColumnDoc {
    ColumnDoc {
        name,
        sql_type,
        note,
        derived: true,
    }
}

pub fn table_docs() -> Vec<TableDoc> {
    vec![
        TableDoc {
            name: "developer_signups",
            description: "Core user data - developer accounts signing up for the platform",
            purpose: "Entry point for the PLG funnel. Tracks who signed up and from where.",
            columns: vec![
                col("id", "TEXT", "Primary key"),
                col("email", "TEXT", "Unique user email"),
                col("full_name", "TEXT", "Developer name"),
                col("company_domain", "TEXT", "Extracted from email or provided"),
                col("signup_date", "TEXT", "When they signed up"),
                col("signup_source", "TEXT", "organic, github, google, referral"),
                derived("is_company_email", "BOOLEAN", "Derived - filters out personal emails"),
            ],
        },
        TableDoc {
            name: "internal_signals",
            description: "Usage metrics from the platform",
            purpose: "The heart of PLG scoring - shows actual product adoption and growth.",
            columns: vec![
                col("developer_id", "TEXT", "FK → developer_signups"),
                col("project_count", "INTEGER", "Total projects created"),
                col(
                    "uses_auth / uses_storage / uses_edge_functions / uses_realtime / uses_vector / uses_cron",
                    "INTEGER",
                    "Feature adoption flags",
                ),
                col("billing_tier", "TEXT", "free, pro, team, enterprise"),
                col("team_member_count", "INTEGER", "Team size indicator"),
                col("api_calls_30d", "INTEGER", "Current period usage"),
                col("api_calls_prev_30d", "INTEGER", "Previous period for comparison"),
                derived("api_call_growth_pct", "REAL", "Derived - month-over-month growth"),
                col("last_active_at", "TEXT", "Most recent activity"),
            ],
        },
        TableDoc {
            name: "company_enrichment",
            description: "External firmographic data",
            purpose: "Enriches developer signups with company context for enterprise qualification.",
            columns: vec![
                col("domain", "TEXT", "Primary key - company domain"),
                col("company_name", "TEXT", "Display name"),
                col("industry", "TEXT", "Vertical classification"),
                col("employee_count / employee_range", "INTEGER / TEXT", "Company size"),
                col("funding_stage", "TEXT", "seed through series_d+"),
                col("total_funding_usd", "INTEGER", "Total raised"),
                col("tech_stack", "TEXT", "JSON array of technologies"),
            ],
        },
        TableDoc {
            name: "stakeholders",
            description: "Key people at each company",
            purpose: "Maps the buying committee - who to contact beyond the developer champion.",
            columns: vec![
                col("company_domain", "TEXT", "FK → company_enrichment"),
                col("full_name / title", "TEXT", "Person details"),
                col("department", "TEXT", "engineering, product, security, finance, executive"),
                col("seniority", "TEXT", "ic, manager, director, vp, c-level"),
                col(
                    "is_decision_maker / is_technical / is_budget_holder",
                    "INTEGER",
                    "Role flags for outreach strategy",
                ),
            ],
        },
        TableDoc {
            name: "expansion_signals",
            description: "External triggers indicating expansion opportunity",
            purpose: "Captures hiring, funding, and tech migration signals that indicate buying intent.",
            columns: vec![
                col("company_domain", "TEXT", "FK → company_enrichment"),
                col(
                    "signal_type",
                    "TEXT",
                    "hiring, funding, tech_migration, news, competitor_churn",
                ),
                col("signal_title / signal_detail", "TEXT", "What happened"),
                col("signal_strength", "TEXT", "low, medium, high"),
            ],
        },
        TableDoc {
            name: "lead_scores",
            description: "Component scores for prioritization",
            purpose: "The scoring engine - weights internal + external signals into actionable tiers.",
            columns: vec![
                col("developer_id", "TEXT", "FK → developer_signups"),
                col("company_score", "INTEGER", "25% weight - enterprise fit"),
                col("usage_score", "INTEGER", "30% weight - product adoption (highest!)"),
                col("expansion_score", "INTEGER", "20% weight - buying signals"),
                col("champion_score", "INTEGER", "15% weight - developer engagement"),
                col("timing_score", "INTEGER", "10% weight - recent activity"),
                derived("total_score", "INTEGER", "Derived - weighted sum of components"),
                derived(
                    "tier",
                    "TEXT",
                    "Derived - hot (80+), warm (60+), nurture (40+), monitor",
                ),
                col("suggested_action", "TEXT", "Next best action for AE"),
            ],
        },
        TableDoc {
            name: "ae_activities",
            description: "AE engagement tracking",
            purpose: "Tracks outreach history to prevent duplicate contacts and measure conversion.",
            columns: vec![
                col("developer_id", "TEXT", "FK → developer_signups"),
                col(
                    "activity_type",
                    "TEXT",
                    "viewed, contacted, meeting_scheduled, demo_completed, opportunity_created",
                ),
                col("activity_notes", "TEXT", "Context for handoffs"),
                col("created_by", "TEXT", "Which AE took action"),
            ],
        },
    ]
}

pub fn view_docs() -> Vec<ViewDoc> {
    vec![
        ViewDoc {
            name: "lead_dashboard",
            description: "Main view joining all lead tables for the dashboard",
            sql: "SELECT d.id AS developer_id, d.email, d.full_name AS champion_name,
       c.company_name, c.industry, c.employee_count,
       i.billing_tier, i.api_calls_30d, i.api_calls_prev_30d,
       s.company_score, s.usage_score, s.expansion_score,
       s.champion_score, s.timing_score, s.suggested_action
FROM developer_signups d
LEFT JOIN company_enrichment c ON c.domain = d.company_domain
LEFT JOIN internal_signals i ON i.developer_id = d.id
LEFT JOIN lead_scores s ON s.developer_id = d.id
ORDER BY weighted_score DESC NULLS LAST;",
        },
        ViewDoc {
            name: "hot_leads",
            description: "Leads in the hot tier for urgent follow-up (filtered in the application)",
            sql: "SELECT * FROM lead_dashboard WHERE tier = 'hot' ORDER BY total_score DESC;",
        },
    ]
}
