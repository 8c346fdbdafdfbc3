// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 红线: 渲染时按请求显式传入 locale，不修改全局语言
// ==========================================

use crate::domain::types::{BillingTier, LeadTier, SignalType};

pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 规范化语言代码（"zh" / "zh_cn" / "ZH-CN" → "zh-CN"，"en-US" → "en"）
///
/// 不支持的语言返回 None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    let lower = raw.trim().to_ascii_lowercase().replace('_', "-");
    if lower == "zh" || lower.starts_with("zh-") {
        Some("zh-CN")
    } else if lower == "en" || lower.starts_with("en-") {
        Some("en")
    } else {
        None
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use plg_pipeline::i18n::t_in;
/// let msg = t_in("tier.hot", "zh-CN");
/// ```
pub fn t_in(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
pub fn t_with_args_in(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_in(key, locale);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

pub fn tier_label(tier: LeadTier, locale: &str) -> String {
    t_in(&format!("tier.{}", tier.to_db_str()), locale)
}

pub fn billing_label(tier: BillingTier, locale: &str) -> String {
    t_in(&format!("billing.{}", tier.to_db_str()), locale)
}

pub fn signal_label(signal_type: SignalType, locale: &str) -> String {
    t_in(&format!("signal.{}", signal_type.to_db_str()), locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh"), Some("zh-CN"));
        assert_eq!(normalize_locale("zh_cn"), Some("zh-CN"));
        assert_eq!(normalize_locale("EN-us"), Some("en"));
        assert_eq!(normalize_locale("fr"), None);
    }

    #[test]
    fn test_translate_per_locale() {
        assert_eq!(t_in("tier.hot", "en"), "Hot");
        assert_eq!(t_in("tier.hot", "zh-CN"), "热");
        assert_eq!(billing_label(BillingTier::Team, "en"), "TEAM");
        assert_eq!(signal_label(SignalType::TechMigration, "zh-CN"), "技术迁移");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_with_args_in("dashboard.active", "en", &[("when", "2 hours ago")]);
        assert_eq!(msg, "Active 2 hours ago");

        let msg = t_with_args_in("dashboard.active", "zh-CN", &[("when", "2 hours ago")]);
        assert!(msg.contains("最近活跃"));
        assert!(msg.contains("2 hours ago"));
    }

    #[test]
    fn test_tier_labels_cover_all_tiers() {
        for locale in SUPPORTED_LOCALES {
            assert_eq!(normalize_locale(locale), Some(locale));
            for tier in LeadTier::ALL {
                assert_ne!(tier_label(tier, locale), format!("tier.{}", tier.to_db_str()));
            }
        }
    }
}
