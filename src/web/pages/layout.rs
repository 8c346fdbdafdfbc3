// ==========================================
// 页面骨架: <head> + 导航 + 页脚
// ==========================================

use crate::i18n::t_in;
use crate::web::format::html_escape;
use crate::web::router::Page;

const STYLE: &str = r#"
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Inter,sans-serif;background:#f9fafb;color:#111827}
a{color:#059669}
.nav{display:flex;gap:.5rem;flex-wrap:wrap;padding:1rem 1.5rem;background:#065f46}
.nav a{color:#fff;text-decoration:none;padding:.35rem .75rem;border-radius:.5rem;background:rgba(255,255,255,.1);font-size:.875rem}
.nav a.active{background:rgba(255,255,255,.3)}
.nav .brand{font-weight:700;margin-right:auto;background:none}
main{max-width:72rem;margin:0 auto;padding:2rem 1.5rem}
.hero{margin-bottom:1.5rem}
.badge{display:inline-block;padding:.15rem .6rem;border-radius:999px;font-size:.75rem;border:1px solid #e5e7eb}
.badge.live{background:#dcfce7;color:#166534}
.badge.sample{background:#f3f4f6;color:#4b5563}
.stats{display:grid;grid-template-columns:repeat(auto-fit,minmax(10rem,1fr));gap:1rem;margin-bottom:2rem}
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.75rem;padding:1rem;margin-bottom:1rem}
.stat .value{font-size:1.5rem;font-weight:700}
.stat .hint,.muted{color:#6b7280;font-size:.8rem}
.tier-hot{background:#fee2e2;color:#991b1b}
.tier-warm{background:#ffedd5;color:#9a3412}
.tier-nurture{background:#dbeafe;color:#1e40af}
.tier-monitor{background:#f3f4f6;color:#1f2937}
.lead-head{display:flex;justify-content:space-between;align-items:center;border-bottom:1px solid #f3f4f6;padding-bottom:.75rem}
.score{font-size:1.9rem;font-weight:700;color:#059669;text-align:right}
.cols{display:grid;grid-template-columns:repeat(auto-fit,minmax(15rem,1fr));gap:1.5rem;padding-top:.75rem}
h4{font-size:.7rem;text-transform:uppercase;letter-spacing:.05em;color:#6b7280;margin:.75rem 0 .5rem}
.row{display:flex;justify-content:space-between;font-size:.875rem;padding:.1rem 0}
.chip{display:inline-block;background:#f3f4f6;color:#4b5563;font-size:.75rem;padding:.1rem .5rem;border-radius:.25rem;margin:.15rem}
.bar{display:flex;align-items:center;gap:.5rem;font-size:.75rem}
.bar .track{flex:1;height:.5rem;background:#f3f4f6;border-radius:999px;overflow:hidden}
.bar .fill{height:100%;background:#10b981}
.positive{color:#059669;font-weight:600}
.billing-team{color:#059669}.billing-pro{color:#2563eb}
.warn{background:#fffbeb;border:1px solid #fde68a;color:#92400e;border-radius:.5rem;padding:.75rem;margin-bottom:1rem}
.flag{font-size:.7rem;padding:.1rem .4rem;border-radius:.25rem;background:#ecfdf5;color:#047857;margin-left:.4rem}
pre{background:#111827;color:#e5e7eb;padding:1rem;border-radius:.5rem;overflow-x:auto;font-size:.8rem}
table{border-collapse:collapse;width:100%;font-size:.85rem}
td,th{border-bottom:1px solid #f3f4f6;padding:.35rem .5rem;text-align:left}
footer{text-align:center;color:#9ca3af;font-size:.75rem;padding:2rem 0}
"#;

/// 带语言参数的站内链接
pub fn href(path: &str, locale: &str) -> String {
    format!("{}?lang={}", path, locale)
}

/// 包装完整 HTML 文档；body 须已转义
pub fn render(title: &str, active: Page, locale: &str, body: &str) -> String {
    let mut nav = format!(
        r#"<a class="brand" href="{}">{}</a>"#,
        href("/", locale),
        html_escape(&t_in("app.name", locale))
    );
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        nav.push_str(&format!(
            r#"<a{} href="{}">{}</a>"#,
            class,
            href(page.path(), locale),
            html_escape(&t_in(page.nav_key(), locale))
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<style>{style}</style>
</head>
<body>
<nav class="nav">{nav}</nav>
<main>
{body}
</main>
<footer>{app} v{version} · {tagline}</footer>
</body>
</html>
"#,
        lang = locale,
        title = html_escape(title),
        app = html_escape(&t_in("app.name", locale)),
        style = STYLE,
        nav = nav,
        body = body,
        version = crate::VERSION,
        tagline = html_escape(&t_in("app.tagline", locale)),
    )
}
