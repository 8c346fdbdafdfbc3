// ==========================================
// 简历页（/resume）
// ==========================================

use crate::api::ResumeView;
use crate::domain::resume::ResumeItem;
use crate::i18n::t_in;
use crate::web::format::html_escape;
use crate::web::pages::layout;
use crate::web::router::Page;

fn link(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" rel="noopener noreferrer">{}</a>"#,
        html_escape(url),
        html_escape(label)
    )
}

fn item_html(item: &ResumeItem) -> String {
    let mut heading = Vec::new();
    if let Some(role) = &item.role {
        heading.push(format!("<strong>{}</strong>", html_escape(role)));
    }
    if let Some(org) = &item.org {
        heading.push(html_escape(org));
    }

    let mut meta = Vec::new();
    if let Some(dates) = &item.dates {
        meta.push(html_escape(dates));
    }
    if let Some(location) = &item.location {
        meta.push(html_escape(location));
    }

    let mut out = format!(r#"<div class="resume-item item-{}">"#, html_escape(&item.item_type));
    if !heading.is_empty() {
        out.push_str(&format!("<div>{}</div>", heading.join(" · ")));
    }
    if !meta.is_empty() {
        out.push_str(&format!(r#"<div class="muted">{}</div>"#, meta.join(" · ")));
    }
    out.push_str(&format!("<p>{}</p></div>", html_escape(&item.body)));
    out
}

pub fn render(view: &ResumeView, locale: &str) -> String {
    let profile = &view.profile;
    let mut body = String::new();

    if !view.is_live {
        body.push_str(&format!(
            r#"<div class="warn">{}</div>"#,
            html_escape(&t_in("resume.sample_notice", locale))
        ));
    }

    let mut contact = Vec::new();
    if let Some(location) = &profile.location {
        contact.push(html_escape(location));
    }
    if let Some(email) = &profile.email {
        contact.push(link(&format!("mailto:{}", email), email));
    }
    if let Some(phone) = &profile.phone {
        contact.push(html_escape(phone));
    }
    if let Some(url) = &profile.linkedin_url {
        contact.push(link(url, "LinkedIn"));
    }
    if let Some(url) = &profile.github_url {
        contact.push(link(url, "GitHub"));
    }

    body.push_str(&format!(
        r#"<section class="hero"><h1>{}</h1><p>{}</p><p class="muted">{}</p></section>"#,
        html_escape(&profile.full_name),
        html_escape(&profile.headline),
        contact.join(" · ")
    ));

    if !view.stats.is_empty() {
        body.push_str(r#"<section class="stats">"#);
        for stat in &view.stats {
            body.push_str(&format!(
                r#"<div class="card stat" id="stat-{}"><div class="value">{}</div><div class="hint">{}</div></div>"#,
                html_escape(&stat.stat_key),
                html_escape(&stat.stat_value),
                html_escape(&stat.stat_label)
            ));
        }
        body.push_str("</section>");
    }

    for section in &view.sections {
        body.push_str(&format!(
            r#"<section class="card" id="{}"><h2>{}</h2>"#,
            html_escape(&section.section.slug),
            html_escape(&section.section.title)
        ));
        for item in &section.items {
            body.push_str(&item_html(item));
        }
        body.push_str("</section>");
    }

    layout::render(&t_in("resume.title", locale), Page::Resume, locale, &body)
}
