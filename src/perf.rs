// ==========================================
// PLG 线索评分门户 - 性能统计
// ==========================================
// 每次页面渲染 / 数据拉取记录: 耗时 + SQL 语句数 + 慢 SQL 数
// SQL 计数通过 rusqlite 的 trace/profile 回调实现
// 计数器为线程局部: 统计范围是 PerfGuard 所在线程
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ENV_PERF_SQL: &str = "PLG_PIPELINE_PERF_SQL";
pub const ENV_SLOW_SQL_MS: &str = "PLG_PIPELINE_SLOW_SQL_MS";

static PERF_SQL_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static SQL_COUNT: Cell<u64> = Cell::new(0);
    static SLOW_SQL_COUNT: Cell<u64> = Cell::new(0);
}

// ==========================================
// SqlTraceSettings - SQL 追踪开关
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlTraceSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl SqlTraceSettings {
    /// 从环境变量读取
    ///
    /// - Debug 默认开启；Release 默认关闭
    /// - `PLG_PIPELINE_PERF_SQL=1` 强制开启
    /// - `PLG_PIPELINE_SLOW_SQL_MS=50` 慢 SQL 阈值（毫秒）
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(ENV_PERF_SQL).ok().as_deref(),
            std::env::var(ENV_SLOW_SQL_MS).ok().as_deref(),
        )
    }

    pub fn from_values(perf_sql: Option<&str>, slow_ms: Option<&str>) -> Self {
        let enabled = match perf_sql {
            Some(v) => is_true(v),
            None => cfg!(debug_assertions),
        };
        let slow_sql_ms = slow_ms
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
        Self {
            enabled,
            slow_sql_ms,
        }
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn truncate_sql(sql: &str, max_len: usize) -> String {
    let s = sql.trim().replace('\n', " ");
    if s.chars().count() <= max_len {
        return s;
    }
    let cut: String = s.chars().take(max_len).collect();
    format!("{}…", cut)
}

/// 在只读连接上安装 SQL trace/profile
pub fn install_sqlite_tracing(conn: &mut Connection, settings: SqlTraceSettings) {
    PERF_SQL_ENABLED.store(settings.enabled, Ordering::Relaxed);

    if !settings.enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_SQL_THRESHOLD_MS.store(settings.slow_sql_ms, Ordering::Relaxed);
    conn.trace(Some(sql_trace_callback));
    conn.profile(Some(sql_profile_callback));
}

fn sql_trace_callback(_sql: &str) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    if PERF_DEPTH.with(|d| d.get() > 0) {
        SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        tracing::warn!(
            target: "slow_sql",
            duration_ms = ms,
            sql = %truncate_sql(sql, 420),
            "慢 SQL"
        );
        if PERF_DEPTH.with(|d| d.get() > 0) {
            SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
        }
    }
}

/// 单次操作统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerfStats {
    pub elapsed_ms: u64,
    pub sql_count: u64,
    pub slow_sql_count: u64,
}

/// 性能统计 Guard，Drop 时输出 `perf` 日志
///
/// ```ignore
/// let _perf = plg_pipeline::perf::PerfGuard::new("render_dashboard");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
    slow_sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            slow_sql_start: SLOW_SQL_COUNT.with(|c| c.get()),
        }
    }

    /// 当前累计统计（不结束计时）
    pub fn stats(&self) -> PerfStats {
        PerfStats {
            elapsed_ms: self.start.elapsed().as_millis() as u64,
            sql_count: SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start),
            slow_sql_count: SLOW_SQL_COUNT
                .with(|c| c.get())
                .saturating_sub(self.slow_sql_start),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let stats = self.stats();
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = stats.elapsed_ms,
            sql_count = stats.sql_count,
            slow_sql_count = stats.slow_sql_count,
            "done"
        );
        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_values() {
        let s = SqlTraceSettings::from_values(Some("on"), Some("75"));
        assert!(s.enabled);
        assert_eq!(s.slow_sql_ms, 75);

        let s = SqlTraceSettings::from_values(Some("0"), Some("abc"));
        assert!(!s.enabled);
        assert!(s.slow_sql_ms == 50 || s.slow_sql_ms == 200);
    }

    #[test]
    fn test_truncate_sql_keeps_char_boundaries() {
        assert_eq!(truncate_sql("SELECT 1", 20), "SELECT 1");
        let long = "SELECT '线索评分' FROM lead_dashboard";
        let cut = truncate_sql(long, 10);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), 11);
    }

    #[test]
    fn test_guard_counts_traced_statements() {
        let mut conn = Connection::open_in_memory().unwrap();
        install_sqlite_tracing(
            &mut conn,
            SqlTraceSettings {
                enabled: true,
                slow_sql_ms: 10_000,
            },
        );
        let guard = PerfGuard::new("test_op");
        conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")
            .unwrap();
        let _: i64 = conn.query_row("SELECT x FROM t", [], |r| r.get(0)).unwrap();
        assert!(guard.stats().sql_count >= 1);
    }
}
