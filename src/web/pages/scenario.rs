// ==========================================
// 增长场景测算页（/scenarios/ai-startup）
// ==========================================
// 表单 GET 提交，每次请求按查询参数整体重算
// 分区: 输入 → 30 天速赢 → 90 天增长 → 企业化准备 → 平台化
// ==========================================

use crate::api::scenario_api::{IMAGES_PER_DAY_RANGE, TEAM_SIZE_RANGE, USERS_RANGE};
use crate::api::ScenarioView;
use crate::domain::types::SubscriptionTier;
use crate::i18n::t_in;
use crate::web::format::{format_currency, format_number, html_escape};
use crate::web::pages::layout;
use crate::web::router::Page;

/// 存储告警阈值（天）
const STORAGE_WARNING_DAYS: u64 = 90;

fn one_decimal(x: f64) -> String {
    format!("{:.1}", (x * 10.0).round() / 10.0)
}

fn num(n: u64) -> String {
    format_number(n as f64)
}

fn money(n: u64) -> String {
    format_currency(n as f64)
}

/// 单张测算卡片
fn play(tag: &str, area: &str, title: &str, text: &str, result: &str, footnote: &str) -> String {
    format!(
        r#"<div class="card play"><div class="row"><span class="chip">{tag}</span><span class="muted">{area}</span></div><h3>{title}</h3><p class="muted">{text}</p><div class="row"><span class="positive">{result}</span><span class="muted">{footnote}</span></div></div>"#,
        tag = html_escape(tag),
        area = html_escape(area),
        title = html_escape(title),
        text = html_escape(text),
        result = html_escape(result),
        footnote = html_escape(footnote),
    )
}

fn section_head(step: u8, title: &str, subtitle: &str) -> String {
    format!(
        r#"<div class="section-head"><h2><span class="badge">{}</span> {}</h2><p class="muted">{}</p></div>"#,
        step,
        html_escape(title),
        html_escape(subtitle)
    )
}

fn number_input(name: &str, label: &str, value: u64, min: u64, max: u64, step: u64) -> String {
    format!(
        r#"<label>{label}<br><input type="number" name="{name}" value="{value}" min="{min}" max="{max}" step="{step}"></label>"#,
        label = html_escape(label),
        name = name,
        value = value,
        min = min,
        max = max,
        step = step,
    )
}

fn inputs_form(view: &ScenarioView, locale: &str) -> String {
    let inputs = &view.inputs;
    let m = &view.metrics;

    let mut options = String::new();
    for (tier, label) in [
        (SubscriptionTier::Free, "Free"),
        (SubscriptionTier::Pro, "Pro ($25/mo)"),
        (SubscriptionTier::Team, "Team ($599/mo)"),
    ] {
        let selected = if tier == inputs.tier { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            tier.to_db_str(),
            selected,
            label
        ));
    }

    let warning = if m.days_until_storage_limit < STORAGE_WARNING_DAYS {
        format!(
            r#"<div class="warn storage-warning">~{} days until limit</div>"#,
            m.days_until_storage_limit
        )
    } else {
        String::new()
    };

    format!(
        r#"<section class="card"><h2>{title}</h2>
<form method="get" action="{action}">
<input type="hidden" name="lang" value="{lang}">
<div class="cols">{users}{images}{team}<label>{tier_label}<br><select name="tier">{options}</select></label></div>
<p class="muted">Est. storage: {storage}GB/mo</p>{warning}
<button type="submit">{recalc}</button>
</form></section>"#,
        title = html_escape(&t_in("scenario.inputs", locale)),
        action = Page::Scenario.path(),
        lang = locale,
        users = number_input(
            "users",
            &t_in("scenario.users", locale),
            inputs.users,
            *USERS_RANGE.start(),
            *USERS_RANGE.end(),
            100
        ),
        images = number_input(
            "images_per_day",
            &t_in("scenario.images_per_day", locale),
            inputs.images_per_day,
            *IMAGES_PER_DAY_RANGE.start(),
            *IMAGES_PER_DAY_RANGE.end(),
            50
        ),
        team = number_input(
            "team_size",
            &t_in("scenario.team_size", locale),
            inputs.team_size,
            *TEAM_SIZE_RANGE.start(),
            *TEAM_SIZE_RANGE.end(),
            1
        ),
        tier_label = html_escape(&t_in("scenario.tier", locale)),
        options = options,
        storage = m.storage_gb,
        warning = warning,
        recalc = html_escape(&t_in("scenario.recalculate", locale)),
    )
}

fn quick_wins(view: &ScenarioView, locale: &str) -> String {
    let inputs = &view.inputs;
    let m = &view.metrics;
    let engaged = (inputs.users as f64 * m.vector_engagement_boost as f64 / 100.0).round() as u64;

    format!(
        r#"<section id="quick-wins">{}<div class="cols">{}{}{}</div></section>"#,
        section_head(
            1,
            &t_in("scenario.quick_wins", locale),
            "Low-effort, high-impact moves you can make this week"
        ),
        play(
            "COST SAVINGS",
            "Storage",
            "Enable Image Transformations",
            &format!(
                "Serve thumbnails on-the-fly instead of storing 5 sizes of every image. At {} images/day, you're storing ~{}GB of redundant thumbnails.",
                num(inputs.images_per_day),
                m.redundant_storage_gb
            ),
            &format!("Save ~{}/mo", money(m.storage_savings)),
            "60% reduction",
        ),
        play(
            "GROWTH",
            "Vector",
            "Add \"More Like This\" Search",
            &format!(
                "Vector similarity search lets users find images like ones they've created. With {} users, this drives significant engagement.",
                num(inputs.users)
            ),
            &format!("+{}% engagement", m.vector_engagement_boost),
            &format!("+{} active users", num(engaged)),
        ),
        play(
            "REVENUE",
            "Stripe Sync",
            "Sync Stripe to Your DB",
            &format!(
                "One-click sync gets payment data into your database. At {} tier with ~{} MRR, you can recover churned revenue automatically.",
                inputs.tier,
                format_currency(m.estimated_mrr)
            ),
            &format!("Recover ~{}/mo", money(m.stripe_recovery)),
            &format!("{}% recovery rate", m.stripe_recovery_rate),
        ),
    )
}

fn growth_plays(view: &ScenarioView, locale: &str) -> String {
    let inputs = &view.inputs;
    let m = &view.metrics;
    let signups =
        (inputs.users as f64 * 0.1 * m.conversion_boost as f64 / 100.0).round() as u64;

    format!(
        r#"<section id="growth-plays">{}<div class="cols">{}{}{}{}</div></section>"#,
        section_head(
            2,
            &t_in("scenario.growth_plays", locale),
            &format!(
                "At {} users ({}x growth rate), these become high-leverage",
                num(m.projected_users_3_mo),
                one_decimal(m.growth_rate)
            )
        ),
        play(
            "NEW REVENUE",
            "Edge Functions",
            "Launch Your API",
            &format!(
                "Expose image generation as an API for developers. Edge Functions handle auth, rate limiting, and billing integration. With a {}-person team, you can support {}% API adoption.",
                inputs.team_size, m.api_adoption_rate
            ),
            &format!("{}/mo potential", money(m.api_revenue_monthly)),
            &format!(
                "{} images × $0.05 × {}%",
                num(m.monthly_images),
                m.api_adoption_rate
            ),
        ),
        play(
            "COST SAVINGS",
            "Cron + Queues",
            "Batch Processing Off-Peak",
            &format!(
                "At {} images/day, your compute bill is ~{}/mo. Queue non-urgent generations for off-peak hours when compute is cheaper.",
                num(inputs.images_per_day),
                money(m.compute_cost_estimate)
            ),
            &format!("Save {}/mo", money(m.batch_savings)),
            &format!("{}% reduction", m.batch_savings_percent),
        ),
        play(
            "GROWTH",
            "Realtime",
            "Live Generation Progress",
            &format!(
                "With {} users generating {} images/day, you're getting ~{} \"is it working?\" tickets/month. Real-time progress kills these.",
                num(inputs.users),
                num(inputs.images_per_day),
                m.support_tickets_per_month
            ),
            &format!("-{} tickets/mo", m.tickets_saved),
            &format!("{}% reduction", m.realtime_ticket_reduction),
        ),
        play(
            "REVENUE",
            "Realtime Presence",
            &format!("\"{} Users Creating Now\"", num(m.active_users_now)),
            "Show live user count creating images. At your traffic levels, this social proof could boost landing page conversion significantly.",
            &format!("+{}% conversion", m.conversion_boost),
            &format!("+{} signups/mo", num(signups)),
        ),
    )
}

fn feature(name: &str, flag: Option<&str>, text: &str) -> String {
    let flag = flag
        .map(|f| format!(r#"<span class="flag">{}</span>"#, html_escape(f)))
        .unwrap_or_default();
    format!(
        r#"<div class="feature"><strong>{}</strong>{}<div class="muted">{}</div></div>"#,
        html_escape(name),
        flag,
        html_escape(text)
    )
}

fn enterprise(view: &ScenarioView, locale: &str) -> String {
    let inputs = &view.inputs;
    let m = &view.metrics;
    let team = inputs.team_size;

    let upgrade = if m.needs_upgrade {
        format!(
            r#"<div class="warn upgrade-warning">With {} users on {} tier, you're likely hitting limits. Time to talk upgrade.</div>"#,
            num(inputs.users),
            inputs.tier
        )
    } else {
        String::new()
    };

    let audit_text = if team >= 10 {
        format!(
            "At {} team members, compliance teams will require this. Required for SOC 2, HIPAA. Who did what, when.",
            team
        )
    } else {
        "Required for SOC 2, HIPAA. Who did what, when.".to_string()
    };

    let unlock = [
        feature(
            "SSO / SAML Authentication",
            (team >= 5).then_some("HIGH PRIORITY"),
            &format!(
                "With {} team members, SSO becomes critical. Unlocks {}+ enterprise deals.",
                team,
                money(m.sso_unlock_deal_size)
            ),
        ),
        feature("Audit Logs", (team >= 10).then_some("REQUIRED"), &audit_text),
        feature(
            "Row Level Security",
            None,
            &format!(
                "One database, ~{} enterprise clients. Each sees only their data. No separate infrastructure per client.",
                m.enterprise_clients_capacity
            ),
        ),
    ]
    .concat();

    let scale = [
        feature(
            "Read Replicas",
            m.read_replica_recommended.then_some("RECOMMENDED"),
            &format!(
                "At {} projected users, {}. Distribute read load across regions.",
                num(m.projected_users_6_mo),
                if m.read_replica_recommended {
                    "you will need this"
                } else {
                    "good to plan for"
                }
            ),
        ),
        feature(
            "Connection Pooling",
            m.connection_pooling_critical.then_some("CRITICAL"),
            &format!(
                "~{} concurrent connections estimated.{}",
                m.concurrent_connections,
                if m.connection_pooling_critical {
                    " You need pooling now."
                } else {
                    " Plan for 10x during viral moments."
                }
            ),
        ),
        feature(
            "Metrics API",
            None,
            &format!(
                "SLA reporting for your {} potential enterprise clients. Stream to Datadog/Grafana.",
                m.enterprise_clients_capacity
            ),
        ),
    ]
    .concat();

    format!(
        r#"<section id="enterprise">{head}{upgrade}<div class="card"><div class="cols"><div><h4>Unlock Enterprise Sales</h4>{unlock}</div><div><h4>Handle Scale</h4>{scale}</div></div>
<div class="cols"><div><div class="muted">Projected 12-month users</div><div class="score">{p12}</div></div><div><div class="muted">Enterprise client capacity</div><div class="score">{capacity}</div></div><div><div class="muted">Min deal size unlocked</div><div class="score">{deal}</div></div></div></div></section>"#,
        head = section_head(
            3,
            &t_in("scenario.enterprise", locale),
            &format!(
                "At {}+ users, enterprise clients come knocking",
                num(m.projected_users_6_mo)
            )
        ),
        upgrade = upgrade,
        unlock = unlock,
        scale = scale,
        p12 = num(m.projected_users_12_mo),
        capacity = m.enterprise_clients_capacity,
        deal = money(m.sso_unlock_deal_size),
    )
}

fn platform(view: &ScenarioView, locale: &str) -> String {
    let inputs = &view.inputs;
    let m = &view.metrics;

    let team_note = if inputs.tier == SubscriptionTier::Team {
        " At Team tier, you're already positioned for this."
    } else {
        ""
    };
    let moat_note = if m.data_points_for_ml > 10_000_000 {
        " You're building a serious data advantage."
    } else {
        ""
    };

    format!(
        r#"<section id="platform">{head}<div class="card"><div class="cols">
<div><h3>Platforms</h3><p class="muted">{platform_text}</p><div class="score">{potential}/mo</div><div class="muted">{breakdown}</div><p>{margin}</p></div>
<div><h3>Analytics Buckets + ETL</h3><p class="muted">{etl_text}</p><div class="score">{points}</div><div class="muted">images with metadata for model improvement</div><p>{moat}</p></div>
</div></div></section>"#,
        head = section_head(
            4,
            &t_in("scenario.platform", locale),
            "Become the \"Canva for X\" and let others build on you"
        ),
        platform_text = html_escape(&format!(
            "White-label the stack for your customers. At {} users, you could support ~{} workspaces.",
            num(m.projected_users_12_mo),
            m.potential_workspaces
        )),
        potential = html_escape(&money(m.platform_revenue_potential)),
        breakdown = html_escape(&format!(
            "{} workspaces × {}/workspace",
            m.potential_workspaces,
            money(m.platform_revenue_per_workspace)
        )),
        margin = html_escape(&format!(
            "Your margins on top of the infrastructure.{}",
            team_note
        )),
        etl_text = html_escape(&format!(
            "Store all generation data in Analytics Buckets (Apache Iceberg). At {} images/day, that's {} data points/year for ML.",
            num(inputs.images_per_day),
            num(m.data_points_for_ml)
        )),
        points = num(m.data_points_for_ml),
        moat = html_escape(&format!(
            "Competitive moat: better data = better AI = better product.{}",
            moat_note
        )),
    )
}

pub fn render(view: &ScenarioView, locale: &str) -> String {
    let title = t_in("scenario.title", locale);
    let body = [
        format!(
            r#"<section class="hero"><h1>{}</h1><p class="muted">Based on what we've seen with similar AI startups, here's how your infrastructure needs will evolve and how to stay ahead of them.</p></section>"#,
            html_escape(&title)
        ),
        inputs_form(view, locale),
        quick_wins(view, locale),
        growth_plays(view, locale),
        enterprise(view, locale),
        platform(view, locale),
    ]
    .concat();

    layout::render(&title, Page::Scenario, locale, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScenarioApi;
    use crate::domain::scenario::ScenarioInputs;
    use crate::engine::ScenarioProjector;

    fn view(users: u64, ipd: u64, team: u64, tier: SubscriptionTier) -> ScenarioView {
        ScenarioApi::new(ScenarioProjector::default()).project(ScenarioInputs {
            users,
            images_per_day: ipd,
            team_size: team,
            tier,
        })
    }

    #[test]
    fn test_render_default_scenario() {
        let html = render(&view(1_000, 500, 2, SubscriptionTier::Free), "en");
        assert!(html.contains("Est. storage: 30GB/mo"));
        assert!(html.contains(r#"<option value="free" selected>"#));
        assert!(!html.contains("storage-warning"));
        assert!(!html.contains("upgrade-warning"));
        assert!(html.contains("Launch Your API"));
    }

    #[test]
    fn test_storage_warning_below_ninety_days() {
        // free: 1000 / 600GB * 30 = 50 天
        let html = render(&view(1_000, 10_000, 2, SubscriptionTier::Free), "en");
        assert!(html.contains("~50 days until limit"));
    }

    #[test]
    fn test_upgrade_and_priority_flags() {
        let html = render(&view(20_000, 500, 12, SubscriptionTier::Free), "en");
        assert!(html.contains("upgrade-warning"));
        assert!(html.contains("HIGH PRIORITY"));
        assert!(html.contains("REQUIRED"));
        assert!(html.contains("At 12 team members"));
    }

    #[test]
    fn test_team_tier_platform_note() {
        let html = render(&view(1_000, 500, 2, SubscriptionTier::Team), "en");
        assert!(html.contains("already positioned"));
    }
}
