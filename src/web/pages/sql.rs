// ==========================================
// SQL 页（/sql）: 建表脚本与演示数据原文
// ==========================================

use crate::db::{schema_sql, seed_sql};
use crate::i18n::t_in;
use crate::web::format::html_escape;
use crate::web::pages::layout;
use crate::web::router::Page;

pub fn render(locale: &str) -> String {
    let body = format!(
        r#"<section class="hero"><h1>{title}</h1></section>
<section><h2>{schema_title}</h2><pre><code>{schema}</code></pre></section>
<section><h2>{seed_title}</h2><pre><code>{seed}</code></pre></section>"#,
        title = html_escape(&t_in("sql.title", locale)),
        schema_title = html_escape(&t_in("sql.schema", locale)),
        schema = html_escape(schema_sql()),
        seed_title = html_escape(&t_in("sql.seed", locale)),
        seed = html_escape(seed_sql()),
    );
    layout::render(&t_in("sql.title", locale), Page::Sql, locale, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sql_page() {
        let html = render("en");
        assert!(html.contains("CREATE TABLE IF NOT EXISTS config_kv"));
        assert!(html.contains("CREATE VIEW IF NOT EXISTS lead_dashboard"));
    }
}
