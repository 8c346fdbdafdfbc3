// ==========================================
// 数据库结构页（/database）
// ==========================================

use crate::domain::catalog::{TableDoc, ViewDoc};
use crate::fixtures::{table_docs, view_docs};
use crate::i18n::t_in;
use crate::web::format::html_escape;
use crate::web::pages::layout;
use crate::web::router::Page;

fn table_html(table: &TableDoc, locale: &str) -> String {
    let mut rows = String::new();
    for column in &table.columns {
        let flag = if column.derived {
            format!(
                r#"<span class="flag">{}</span>"#,
                html_escape(&t_in("database.derived", locale))
            )
        } else {
            String::new()
        };
        rows.push_str(&format!(
            "<tr><td><code>{}</code>{}</td><td>{}</td><td class=\"muted\">{}</td></tr>",
            html_escape(column.name),
            flag,
            html_escape(column.sql_type),
            html_escape(column.note)
        ));
    }
    format!(
        r#"<article class="card" id="table-{name}"><h3><code>{name}</code></h3><p>{description}</p><p class="muted">{purpose}</p><table>{rows}</table></article>"#,
        name = html_escape(table.name),
        description = html_escape(table.description),
        purpose = html_escape(table.purpose),
        rows = rows,
    )
}

fn view_html(view: &ViewDoc) -> String {
    format!(
        r#"<article class="card" id="view-{name}"><h3><code>{name}</code></h3><p>{description}</p><pre><code>{sql}</code></pre></article>"#,
        name = html_escape(view.name),
        description = html_escape(view.description),
        sql = html_escape(view.sql),
    )
}

pub fn render(locale: &str) -> String {
    let mut body = format!(
        r#"<section class="hero"><h1>{}</h1></section><h2>{}</h2>"#,
        html_escape(&t_in("database.title", locale)),
        html_escape(&t_in("database.tables", locale))
    );
    for table in table_docs() {
        body.push_str(&table_html(&table, locale));
    }
    body.push_str(&format!("<h2>{}</h2>", html_escape(&t_in("database.views", locale))));
    for view in view_docs() {
        body.push_str(&view_html(&view));
    }
    layout::render(&t_in("database.title", locale), Page::Database, locale, &body)
}
