// ==========================================
// PLG 线索评分门户 - 占位简历
// ==========================================
// 与 sql/seed.sql 的简历数据一致，数据库不可用时使用
// ==========================================

use crate::domain::resume::{Profile, ResumeItem, ResumeSection, ResumeStat};

pub fn sample_profile() -> Profile {
    Profile {
        id: "profile-main".to_string(),
        full_name: "Jordan Avery".to_string(),
        headline: "Enterprise Account Executive · Developer Platforms".to_string(),
        location: Some("Remote, US".to_string()),
        email: Some("jordan.avery@example.com".to_string()),
        phone: None,
        linkedin_url: Some("https://www.linkedin.com/in/example".to_string()),
        github_url: Some("https://github.com/example".to_string()),
        updated_at: None,
    }
}

pub fn sample_sections() -> Vec<ResumeSection> {
    [
        ("sec-summary", "summary", "Summary"),
        ("sec-experience", "experience", "Experience"),
        ("sec-skills", "skills", "Skills"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((id, slug, title), sort_order)| ResumeSection {
        id: id.to_string(),
        slug: slug.to_string(),
        title: title.to_string(),
        sort_order,
    })
    .collect()
}

fn item(
    id: &str,
    section_id: &str,
    sort_order: i32,
    item_type: &str,
    role: Option<(&str, &str, &str, &str)>,
    body: &str,
) -> ResumeItem {
    let (org, role, dates, location) = match role {
        Some((org, role, dates, location)) => (
            Some(org.to_string()),
            Some(role.to_string()),
            Some(dates.to_string()),
            Some(location.to_string()),
        ),
        None => (None, None, None, None),
    };
    ResumeItem {
        id: id.to_string(),
        section_id: section_id.to_string(),
        sort_order,
        item_type: item_type.to_string(),
        org,
        role,
        dates,
        location,
        body: body.to_string(),
    }
}

pub fn sample_items() -> Vec<ResumeItem> {
    vec![
        item(
            "item-summary-1",
            "sec-summary",
            1,
            "paragraph",
            None,
            "Account executive focused on product-led growth: turning self-serve developer adoption into enterprise agreements.",
        ),
        item(
            "item-exp-1",
            "sec-experience",
            1,
            "role",
            Some(("Northwind Cloud", "Senior Account Executive", "2021 - Present", "Remote")),
            "Owned expansion for a book of self-serve accounts; built usage-based prioritisation for weekly outreach.",
        ),
        item(
            "item-exp-2",
            "sec-experience",
            2,
            "role",
            Some(("Contoso Data", "Account Executive", "2018 - 2021", "Austin, TX")),
            "Closed first enterprise contracts for a developer database product.",
        ),
        item(
            "item-skills-1",
            "sec-skills",
            1,
            "skill",
            None,
            "SQL, Postgres, pipeline analytics, technical discovery, MEDDICC",
        ),
    ]
}

pub fn sample_stats() -> Vec<ResumeStat> {
    [
        ("stat-1", "quota", "142%", "Average quota attainment"),
        ("stat-2", "deals", "38", "Enterprise deals closed"),
        ("stat-3", "arr", "$6.2M", "New ARR sourced"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((id, key, value, label), sort_order)| ResumeStat {
        id: id.to_string(),
        stat_key: key.to_string(),
        stat_value: value.to_string(),
        stat_label: label.to_string(),
        sort_order,
    })
    .collect()
}
