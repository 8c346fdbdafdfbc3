// ==========================================
// PLG 线索评分门户 - 路由
// ==========================================
// 页面:  /  /leads  /resume  /scenarios/ai-startup  /sql  /database
// JSON:  /api/leads[?tier=]  /api/scenario  /health
// 错误映射: InvalidInput → 400，未知路由 → 404，其余 → 500
// 语言: ?lang= 优先，其次 AppConfig.default_locale，最后 en
// ==========================================

use std::collections::HashMap;

use serde::Serialize;

use crate::api::{ApiError, ApiResult};
use crate::app::AppState;
use crate::domain::lead::Lead;
use crate::domain::types::LeadTier;
use crate::engine::TierCounts;
use crate::i18n::{normalize_locale, t_in};
use crate::perf::PerfGuard;
use crate::web::http::{HttpRequest, HttpResponse};
use crate::web::pages;

// ==========================================
// Page - 可渲染页面
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Leads,
    Resume,
    Scenario,
    Sql,
    Database,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Leads,
        Page::Resume,
        Page::Scenario,
        Page::Sql,
        Page::Database,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Leads => "/leads",
            Page::Resume => "/resume",
            Page::Scenario => "/scenarios/ai-startup",
            Page::Sql => "/sql",
            Page::Database => "/database",
        }
    }

    /// CLI 使用的页面名
    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Leads => "leads",
            Page::Resume => "resume",
            Page::Scenario => "scenario",
            Page::Sql => "sql",
            Page::Database => "database",
        }
    }

    /// 导航文案的 i18n key
    pub fn nav_key(&self) -> &'static str {
        match self {
            Page::Dashboard => "nav.dashboard",
            Page::Leads => "nav.leads",
            Page::Resume => "nav.resume",
            Page::Scenario => "nav.scenario",
            Page::Sql => "nav.sql",
            Page::Database => "nav.database",
        }
    }

    fn perf_op(&self) -> &'static str {
        match self {
            Page::Dashboard => "render_dashboard",
            Page::Leads => "render_leads",
            Page::Resume => "render_resume",
            Page::Scenario => "render_scenario",
            Page::Sql => "render_sql",
            Page::Database => "render_database",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// 解析请求语言
pub fn resolve_locale(requested: Option<&str>, default_locale: &str) -> &'static str {
    requested
        .and_then(normalize_locale)
        .or_else(|| normalize_locale(default_locale))
        .unwrap_or("en")
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

// ==========================================
// 分发
// ==========================================

/// 处理单个请求（同步，调用方负责放入阻塞线程池）
pub fn dispatch(state: &AppState, req: &HttpRequest) -> HttpResponse {
    let locale = resolve_locale(
        req.query.get("lang").map(String::as_str),
        &state.config.default_locale,
    );

    if req.method != "GET" {
        return HttpResponse::text(405, t_in("error.method_not_allowed", locale));
    }

    let path = normalize_path(&req.path);
    let result = match Page::from_path(path) {
        Some(page) => {
            render_page(state, page, &req.query, locale).map(|html| HttpResponse::html(200, html))
        }
        None => match path {
            "/api/leads" => api_leads(state, &req.query),
            "/api/scenario" => api_scenario(state, &req.query),
            "/health" => Ok(health(state)),
            _ => return HttpResponse::text(404, t_in("error.not_found", locale)),
        },
    };

    result.unwrap_or_else(|e| error_response(&e, locale))
}

fn error_response(err: &ApiError, locale: &str) -> HttpResponse {
    if err.is_client_error() {
        tracing::debug!(error = %err, "请求参数无效");
        HttpResponse::text(400, format!("{}: {}", t_in("error.bad_request", locale), err))
    } else {
        tracing::error!(error = %err, "请求处理失败");
        HttpResponse::text(500, t_in("error.internal", locale))
    }
}

/// 渲染完整 HTML 页面
pub fn render_page(
    state: &AppState,
    page: Page,
    query: &HashMap<String, String>,
    locale: &str,
) -> ApiResult<String> {
    let _perf = PerfGuard::new(page.perf_op());
    let now = chrono::Utc::now().naive_utc();

    let html = match page {
        Page::Dashboard => {
            pages::dashboard::render(&state.lead_api.board(now), page, now, locale)
        }
        Page::Leads => {
            pages::dashboard::render(&state.lead_api.sample_board(now), page, now, locale)
        }
        Page::Resume => pages::resume::render(&state.resume_api.resume(), locale),
        Page::Scenario => {
            pages::scenario::render(&state.scenario_api.project_query(query)?, locale)
        }
        Page::Sql => pages::sql::render(locale),
        Page::Database => pages::database::render(locale),
    };
    Ok(html)
}

// ==========================================
// JSON 端点
// ==========================================

#[derive(Serialize)]
struct LeadsPayload<'a> {
    is_live: bool,
    counts: TierCounts,
    leads: Vec<&'a Lead>,
}

fn parse_tier_filter(query: &HashMap<String, String>) -> ApiResult<Option<LeadTier>> {
    let Some(raw) = query
        .get("tier")
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };
    LeadTier::ALL
        .into_iter()
        .find(|t| t.to_db_str() == raw)
        .map(Some)
        .ok_or_else(|| {
            ApiError::InvalidInput(format!("tier 必须为 hot/warm/nurture/monitor: {}", raw))
        })
}

fn api_leads(state: &AppState, query: &HashMap<String, String>) -> ApiResult<HttpResponse> {
    let _perf = PerfGuard::new("api_leads");
    let tier = parse_tier_filter(query)?;
    let board = state.lead_api.board(chrono::Utc::now().naive_utc());

    let leads = match tier {
        Some(tier) => board.in_tier(tier),
        None => board.leads.iter().collect(),
    };
    let payload = LeadsPayload {
        is_live: board.is_live,
        counts: board.counts,
        leads,
    };
    Ok(HttpResponse::json(200, &payload))
}

fn api_scenario(state: &AppState, query: &HashMap<String, String>) -> ApiResult<HttpResponse> {
    let view = state.scenario_api.project_query(query)?;
    Ok(HttpResponse::json(200, &view))
}

fn health(state: &AppState) -> HttpResponse {
    HttpResponse::json(
        200,
        &serde_json::json!({
            "status": "ok",
            "version": crate::VERSION,
            "db_available": state.db_available,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState::fixture_only(AppConfig {
            db_path: ":memory:".to_string(),
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_page_lookup() {
        assert_eq!(Page::from_path("/scenarios/ai-startup"), Some(Page::Scenario));
        assert_eq!(Page::from_path("/nope"), None);
        assert_eq!(Page::parse("Resume"), Some(Page::Resume));
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
            assert_eq!(Page::parse(page.name()), Some(page));
        }
    }

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(Some("zh"), "en"), "zh-CN");
        assert_eq!(resolve_locale(Some("fr"), "zh-CN"), "zh-CN");
        assert_eq!(resolve_locale(None, "de"), "en");
    }

    #[test]
    fn test_dispatch_pages_render() {
        let state = state();
        for page in Page::ALL {
            let resp = dispatch(&state, &HttpRequest::get(page.path()));
            assert_eq!(resp.status, 200, "page {}", page.name());
            assert!(resp.content_type.starts_with("text/html"));
            assert!(resp.body_str().contains("<!DOCTYPE html>"));
        }
    }

    #[test]
    fn test_dispatch_trailing_slash() {
        let resp = dispatch(&state(), &HttpRequest::get("/resume/"));
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn test_dispatch_unknown_route() {
        let resp = dispatch(&state(), &HttpRequest::get("/missing"));
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body_str(), "Page not found");
    }

    #[test]
    fn test_dispatch_rejects_non_get() {
        let mut req = HttpRequest::get("/");
        req.method = "POST".to_string();
        assert_eq!(dispatch(&state(), &req).status, 405);
    }

    #[test]
    fn test_dispatch_invalid_scenario_input() {
        let resp = dispatch(&state(), &HttpRequest::get("/scenarios/ai-startup?users=lots"));
        assert_eq!(resp.status, 400);
        let resp = dispatch(&state(), &HttpRequest::get("/api/scenario?tier=enterprise"));
        assert_eq!(resp.status, 400);
    }

    #[test]
    fn test_api_leads_filter() {
        let state = state();
        let resp = dispatch(&state, &HttpRequest::get("/api/leads?tier=hot"));
        assert_eq!(resp.status, 200);
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["is_live"], false);
        assert_eq!(body["counts"]["total"], 5);
        let leads = body["leads"].as_array().unwrap();
        assert_eq!(leads.len(), 2);
        assert!(leads.iter().all(|l| l["scored"]["tier"] == "hot"));

        let resp = dispatch(&state, &HttpRequest::get("/api/leads?tier=lukewarm"));
        assert_eq!(resp.status, 400);
    }

    #[test]
    fn test_api_scenario_json() {
        let resp = dispatch(
            &state(),
            &HttpRequest::get("/api/scenario?users=1000&images_per_day=500&team_size=2&tier=free"),
        );
        assert_eq!(resp.status, 200);
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["metrics"]["storageGB"], 30);
        assert_eq!(body["metrics"]["daysUntilStorageLimit"], 1000);
        assert_eq!(body["metrics"]["needsUpgrade"], false);
        assert_eq!(body["inputs"]["tier"], "free");
    }

    #[test]
    fn test_health() {
        let resp = dispatch(&state(), &HttpRequest::get("/health"));
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["db_available"], false);
    }

    #[test]
    fn test_lang_query_switches_chrome() {
        let resp = dispatch(&state(), &HttpRequest::get("/?lang=zh-CN"));
        assert!(resp.body_str().contains("lang=\"zh-CN\""));
    }
}
