// ==========================================
// PLG 线索评分门户 - 展示格式化
// ==========================================
// 数字缩写 / 金额 / 融资额 / 相对时间 / HTML 转义
// 取整规则: .5 进位（与 toFixed 一致，不用银行家舍入）
// ==========================================

use chrono::NaiveDateTime;

fn fixed(value: f64, decimals: u32) -> String {
    let scale = 10_f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", decimals as usize, rounded)
}

fn abbreviate(n: f64) -> Option<String> {
    if n >= 1_000_000.0 {
        Some(format!("{}M", fixed(n / 1_000_000.0, 1)))
    } else if n >= 1_000.0 {
        Some(format!("{}K", fixed(n / 1_000.0, 0)))
    } else {
        None
    }
}

/// 1_500_000 → "1.5M"，25_000 → "25K"，250 → "250"
pub fn format_number(n: f64) -> String {
    abbreviate(n).unwrap_or_else(|| n.to_string())
}

/// "$" + 数字缩写
pub fn format_currency(n: f64) -> String {
    format!("${}", format_number(n))
}

/// 融资额: 百万级不保留小数（45_000_000 → "$45M"）
pub fn format_funding(n: i64) -> String {
    let v = n as f64;
    if v >= 1_000_000.0 {
        format!("${}M", fixed(v / 1_000_000.0, 0))
    } else if v >= 1_000.0 {
        format!("${}K", fixed(v / 1_000.0, 0))
    } else {
        format!("${}", n)
    }
}

/// 融资阶段展示: 首个下划线换空格后大写（series_b → "SERIES B"）
pub fn format_funding_stage(stage: &str) -> String {
    stage.replacen('_', " ", 1).to_uppercase()
}

/// 最近活跃时间的相对描述
pub fn format_last_active(at: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    let Some(at) = at else {
        return "Unknown".to_string();
    };
    let hours = (now - at).num_hours();
    let days = hours.div_euclid(24);

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        format!("{} week(s) ago", days / 7)
    }
}

/// 增长率展示: 正数带 "+"
pub fn format_growth(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{}%", pct)
    } else {
        format!("{}%", pct)
    }
}

/// HTML 文本/属性转义
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2_800_000.0), "2.8M");
        assert_eq!(format_number(450_000.0), "450K");
        assert_eq!(format_number(2_500.0), "3K");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(0.5), "$0.5");
        assert_eq!(format_currency(25_000.0), "$25K");
        assert_eq!(format_currency(1_250_000.0), "$1.3M");
    }

    #[test]
    fn test_format_funding() {
        assert_eq!(format_funding(45_000_000), "$45M");
        assert_eq!(format_funding(2_500_000), "$3M");
        assert_eq!(format_funding(750_000), "$750K");
        assert_eq!(format_funding(900), "$900");
    }

    #[test]
    fn test_format_funding_stage() {
        assert_eq!(format_funding_stage("series_b"), "SERIES B");
        assert_eq!(format_funding_stage("pre_seed_round"), "PRE SEED_ROUND");
    }

    #[test]
    fn test_format_last_active() {
        let n = now();
        assert_eq!(format_last_active(None, n), "Unknown");
        assert_eq!(format_last_active(Some(n - Duration::minutes(30)), n), "Just now");
        assert_eq!(format_last_active(Some(n - Duration::hours(2)), n), "2 hours ago");
        assert_eq!(format_last_active(Some(n - Duration::days(1)), n), "1 day ago");
        assert_eq!(format_last_active(Some(n - Duration::days(3)), n), "3 days ago");
        assert_eq!(format_last_active(Some(n - Duration::days(8)), n), "1 week(s) ago");
        // 未来时间视为刚刚
        assert_eq!(format_last_active(Some(n + Duration::hours(5)), n), "Just now");
    }

    #[test]
    fn test_format_growth() {
        assert_eq!(format_growth(250.0), "+250%");
        assert_eq!(format_growth(33.3), "+33.3%");
        assert_eq!(format_growth(0.0), "0%");
        assert_eq!(format_growth(-12.5), "-12.5%");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">O'Neil & Co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; Co&lt;/a&gt;"
        );
    }
}
