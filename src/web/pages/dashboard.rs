// ==========================================
// 线索看板页（/ 实时，/leads 样例）
// ==========================================
// 统计卡片 → 线索卡片（拥护者/内部信号 | 干系人/扩张信号 | 分项得分/建议动作）
// ==========================================

use chrono::NaiveDateTime;

use crate::api::LeadBoard;
use crate::domain::lead::Lead;
use crate::domain::types::LeadTier;
use crate::i18n::{billing_label, signal_label, t_in, t_with_args_in, tier_label};
use crate::web::format::{
    format_funding, format_funding_stage, format_growth, format_last_active, format_number,
    html_escape,
};
use crate::web::pages::layout;
use crate::web::router::Page;

pub fn render(board: &LeadBoard, page: Page, now: NaiveDateTime, locale: &str) -> String {
    let title = if page == Page::Leads {
        t_in("nav.leads", locale)
    } else {
        t_in("dashboard.title", locale)
    };

    let mut body = String::new();
    body.push_str(&hero(&title, board.is_live, locale));
    body.push_str(&stats(board, locale));
    for lead in &board.leads {
        body.push_str(&lead_card(lead, now, locale));
    }

    layout::render(&title, page, locale, &body)
}

fn hero(title: &str, is_live: bool, locale: &str) -> String {
    let badge = if is_live {
        format!(
            r#"<span class="badge live">{}</span>"#,
            html_escape(&t_in("dashboard.live_badge", locale))
        )
    } else {
        format!(
            r#"<span class="badge sample">{}</span>"#,
            html_escape(&t_in("dashboard.sample_badge", locale))
        )
    };
    format!(
        r#"<section class="hero">{badge}<h1>{title}</h1><p class="muted">{how}</p></section>"#,
        badge = badge,
        title = html_escape(title),
        how = html_escape(&t_in("dashboard.how_it_works", locale)),
    )
}

fn stat_card(value: usize, class: &str, label: &str, hint: &str) -> String {
    format!(
        r#"<div class="card stat"><div class="value {class}">{value}</div><div>{label}</div><div class="hint">{hint}</div></div>"#,
        class = class,
        value = value,
        label = html_escape(label),
        hint = html_escape(hint),
    )
}

fn stats(board: &LeadBoard, locale: &str) -> String {
    let counts = &board.counts;
    let total_hint = if board.is_live {
        "dashboard.total_live"
    } else {
        "dashboard.total_sample"
    };
    format!(
        r#"<section class="stats">{}{}{}{}</section>"#,
        stat_card(
            counts.hot,
            "tier-hot",
            &t_in("dashboard.hot_leads", locale),
            &t_in("dashboard.hot_hint", locale)
        ),
        stat_card(
            counts.warm,
            "tier-warm",
            &t_in("dashboard.warm_leads", locale),
            &t_in("dashboard.warm_hint", locale)
        ),
        stat_card(
            counts.nurture,
            "tier-nurture",
            &t_in("dashboard.nurture", locale),
            &t_in("dashboard.nurture_hint", locale)
        ),
        stat_card(
            counts.total,
            "",
            &t_in("dashboard.total", locale),
            &t_in(total_hint, locale)
        ),
    )
}

fn score_bar(label: &str, score: i32) -> String {
    let width = score.clamp(0, 100);
    format!(
        r#"<div class="bar"><span style="width:5rem">{label}</span><div class="track"><div class="fill" style="width:{width}%"></div></div><span>{score}</span></div>"#,
        label = html_escape(label),
        width = width,
        score = score,
    )
}

fn row(label: &str, value: &str, class: &str) -> String {
    format!(
        r#"<div class="row"><span class="muted">{}</span><span class="{}">{}</span></div>"#,
        html_escape(label),
        class,
        html_escape(value)
    )
}

fn lead_card(lead: &Lead, now: NaiveDateTime, locale: &str) -> String {
    let tier: LeadTier = lead.tier();

    let mut meta = format!(
        "{} • {} {} • {}",
        lead.industry,
        lead.employee_range,
        t_in("dashboard.employees", locale),
        format_funding_stage(&lead.funding_stage)
    );
    if lead.total_funding_usd > 0 {
        meta.push_str(&format!(" ({})", format_funding(lead.total_funding_usd)));
    }

    // 第一列: 拥护者 + 内部信号
    let active = t_with_args_in(
        "dashboard.active",
        locale,
        &[("when", &format_last_active(lead.last_active_at, now))],
    );
    let growth_class = if lead.api_call_growth_pct > 0.0 { "positive" } else { "" };
    let mut champion = format!(
        r#"<h4>{}</h4><div><strong>{}</strong></div><div class="muted">{}</div><div class="hint muted">{}</div><h4>{}</h4>"#,
        html_escape(&t_in("dashboard.champion", locale)),
        html_escape(&lead.champion_name),
        html_escape(&lead.email),
        html_escape(&active),
        html_escape(&t_in("dashboard.internal_signals", locale)),
    );
    champion.push_str(&row(
        &t_in("dashboard.billing", locale),
        &billing_label(lead.billing_tier, locale),
        &format!("billing-{}", lead.billing_tier.to_db_str()),
    ));
    champion.push_str(&row(
        &t_in("dashboard.projects", locale),
        &lead.project_count.to_string(),
        "",
    ));
    champion.push_str(&row(
        &t_in("dashboard.team_members", locale),
        &lead.team_member_count.to_string(),
        "",
    ));
    champion.push_str(&row(
        &t_in("dashboard.api_calls", locale),
        &format_number(lead.api_calls_30d as f64),
        "",
    ));
    champion.push_str(&row(
        &t_in("dashboard.growth", locale),
        &format_growth(lead.api_call_growth_pct),
        growth_class,
    ));
    if !lead.features_used.is_empty() {
        champion.push_str("<div>");
        for feature in &lead.features_used {
            champion.push_str(&format!(r#"<span class="chip">{}</span>"#, html_escape(feature)));
        }
        champion.push_str("</div>");
    }

    // 第二列: 干系人 + 扩张信号
    let mut people = String::new();
    if !lead.stakeholders.is_empty() {
        people.push_str(&format!(
            "<h4>{}</h4>",
            html_escape(&t_in("dashboard.stakeholders", locale))
        ));
        for s in &lead.stakeholders {
            people.push_str(&format!(
                r#"<div><strong>{}</strong><div class="muted">{}</div></div>"#,
                html_escape(&s.name),
                html_escape(&s.title)
            ));
        }
    }
    if !lead.signals.is_empty() {
        people.push_str(&format!("<h4>{}</h4>", html_escape(&t_in("dashboard.signals", locale))));
        for s in &lead.signals {
            people.push_str(&format!(
                r#"<div class="signal signal-{}" title="{}">{} {}</div>"#,
                s.signal_type.to_db_str(),
                html_escape(&signal_label(s.signal_type, locale)),
                s.signal_type.icon(),
                html_escape(&s.title)
            ));
        }
    }

    // 第三列: 分项得分 + 建议动作
    let c = &lead.components;
    let mut scores = format!(
        "<h4>{}</h4>",
        html_escape(&t_in("dashboard.score_breakdown", locale))
    );
    for (key, value) in [
        ("component.company", c.company),
        ("component.usage", c.usage),
        ("component.expansion", c.expansion),
        ("component.champion", c.champion),
        ("component.timing", c.timing),
    ] {
        scores.push_str(&score_bar(&t_in(key, locale), value));
    }
    scores.push_str(&format!(
        r#"<h4>{}</h4><p class="muted">{}</p>"#,
        html_escape(&t_in("dashboard.suggested_action", locale)),
        html_escape(&lead.suggested_action)
    ));

    format!(
        r#"<article class="card lead" id="lead-{id}">
<div class="lead-head"><div><h3>{company} <span class="badge tier-{tier_class}">{tier}</span></h3><div class="muted">{meta}</div></div><div><div class="score">{score}</div><div class="hint muted">{score_label}</div></div></div>
<div class="cols"><div>{champion}</div><div>{people}</div><div>{scores}</div></div>
</article>
"#,
        id = html_escape(&lead.id),
        company = html_escape(&lead.company_name),
        tier_class = tier.to_db_str(),
        tier = html_escape(&tier_label(tier, locale)),
        meta = html_escape(&meta),
        score = lead.total_score(),
        score_label = html_escape(&t_in("dashboard.score", locale)),
        champion = champion,
        people = people,
        scores = scores,
    )
}
