// ==========================================
// PLG 线索评分门户 - 线索数据仓储
// ==========================================
// 数据来源: lead_dashboard 视图 / stakeholders / expansion_signals
// 红线: Repository 不含业务逻辑，缺失字段原样返回 None，
//       默认值填充与派生计算由 engine::signals 负责
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DashboardRow - 看板视图原始行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardRow {
    pub developer_id: String,
    pub email: Option<String>,
    pub champion_name: Option<String>,
    pub company_domain: Option<String>,

    // ===== company_enrichment =====
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i64>,
    pub employee_range: Option<String>,
    pub funding_stage: Option<String>,
    pub total_funding_usd: Option<i64>,

    // ===== internal_signals =====
    pub project_count: Option<i64>,
    pub billing_tier: Option<String>,
    pub team_member_count: Option<i64>,
    pub api_calls_30d: Option<i64>,
    pub api_calls_prev_30d: Option<i64>,
    pub uses_auth: bool,
    pub uses_storage: bool,
    pub uses_edge_functions: bool,
    pub uses_realtime: bool,
    pub uses_vector: bool,
    pub uses_cron: bool,
    pub last_active_at: Option<NaiveDateTime>,

    // ===== lead_scores =====
    pub company_score: Option<i32>,
    pub usage_score: Option<i32>,
    pub expansion_score: Option<i32>,
    pub champion_score: Option<i32>,
    pub timing_score: Option<i32>,
    pub suggested_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeholderRow {
    pub company_domain: String,
    pub full_name: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRow {
    pub company_domain: String,
    pub signal_type: String,
    pub signal_title: String,
}

/// 解析 SQLite 文本时间（datetime('now') 格式或 ISO-8601 'T' 分隔）
pub(crate) fn parse_sqlite_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

// ==========================================
// LeadRepository - 线索仓储（只读）
// ==========================================
pub struct LeadRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LeadRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取看板视图（按默认权重的未取整加权分降序）
    pub fn list_dashboard_rows(&self) -> RepositoryResult<Vec<DashboardRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                developer_id, email, champion_name, company_domain,
                company_name, industry, employee_count, employee_range,
                funding_stage, total_funding_usd,
                project_count, billing_tier, team_member_count,
                api_calls_30d, api_calls_prev_30d,
                uses_auth, uses_storage, uses_edge_functions,
                uses_realtime, uses_vector, uses_cron,
                last_active_at,
                company_score, usage_score, expansion_score,
                champion_score, timing_score, suggested_action
            FROM lead_dashboard
            "#,
        )?;

        let rows = stmt.query_map([], map_dashboard_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }

        tracing::debug!(rows = result.len(), "lead_dashboard 读取完成");
        Ok(result)
    }

    /// 全部干系人（按公司域名、排序号）
    pub fn list_stakeholders(&self) -> RepositoryResult<Vec<StakeholderRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT company_domain, full_name, title
            FROM stakeholders
            ORDER BY company_domain, sort_order, full_name
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StakeholderRow {
                company_domain: row.get(0)?,
                full_name: row.get(1)?,
                title: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 全部扩张信号（按公司域名、排序号）
    pub fn list_expansion_signals(&self) -> RepositoryResult<Vec<SignalRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT company_domain, signal_type, signal_title
            FROM expansion_signals
            ORDER BY company_domain, sort_order, signal_title
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SignalRow {
                company_domain: row.get(0)?,
                signal_type: row.get(1)?,
                signal_title: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_dashboard_row(row: &Row<'_>) -> rusqlite::Result<DashboardRow> {
    let flag = |idx: usize| -> rusqlite::Result<bool> {
        Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or(0) != 0)
    };

    Ok(DashboardRow {
        developer_id: row.get(0)?,
        email: row.get(1)?,
        champion_name: row.get(2)?,
        company_domain: row.get(3)?,
        company_name: row.get(4)?,
        industry: row.get(5)?,
        employee_count: row.get(6)?,
        employee_range: row.get(7)?,
        funding_stage: row.get(8)?,
        total_funding_usd: row.get(9)?,
        project_count: row.get(10)?,
        billing_tier: row.get(11)?,
        team_member_count: row.get(12)?,
        api_calls_30d: row.get(13)?,
        api_calls_prev_30d: row.get(14)?,
        uses_auth: flag(15)?,
        uses_storage: flag(16)?,
        uses_edge_functions: flag(17)?,
        uses_realtime: flag(18)?,
        uses_vector: flag(19)?,
        uses_cron: flag(20)?,
        last_active_at: row
            .get::<_, Option<String>>(21)?
            .as_deref()
            .and_then(parse_sqlite_datetime),
        company_score: row.get(22)?,
        usage_score: row.get(23)?,
        expansion_score: row.get(24)?,
        champion_score: row.get(25)?,
        timing_score: row.get(26)?,
        suggested_action: row.get(27)?,
    })
}
