// ==========================================
// PLG 线索评分门户 - SQLite 连接与建库
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（外键、busy_timeout）
// - 看板读取一律走只读连接
// - init-db 命令与测试共用 schema/seed 脚本
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version（与 sql/schema.sql 对齐）
///
/// 仅用于告警，不做自动迁移
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");
const SEED_SQL: &str = include_str!("../sql/seed.sql");

/// schema 脚本原文（/sql 页面展示）
pub fn schema_sql() -> &'static str {
    SCHEMA_SQL
}

/// 演示数据脚本原文（/sql 页面展示）
pub fn seed_sql() -> &'static str {
    SEED_SQL
}

/// 配置 SQLite 连接的统一 PRAGMA
///
/// foreign_keys 与 busy_timeout 都是"每个连接"单独生效
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开读写连接（文件不存在时创建）
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 打开只读连接（文件不存在时报错，不会创建空库）
pub fn open_sqlite_connection_read_only(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
}

/// 检查 schema_version，不一致时只告警
pub fn warn_if_schema_mismatch(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let version = read_schema_version(conn)?;
    match version {
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        Some(v) => tracing::warn!(
            found = v,
            expected = CURRENT_SCHEMA_VERSION,
            "schema_version 与代码不一致，数据可能无法正确读取"
        ),
        None => tracing::warn!("数据库缺少 schema_version 表，可能尚未执行 init-db"),
    }
    Ok(version)
}

/// 建表（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    tracing::info!(version = CURRENT_SCHEMA_VERSION, "schema 已初始化");
    Ok(())
}

/// 写入演示数据（幂等，单事务）
pub fn seed_demo_data(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SEED_SQL)?;
    tx.commit()?;

    let signups: i64 = conn.query_row("SELECT COUNT(*) FROM developer_signups", [], |r| r.get(0))?;
    tracing::info!(signups, "演示数据已写入");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_seed_demo_data_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        seed_demo_data(&mut conn).unwrap();
        seed_demo_data(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM developer_signups", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 6);

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM lead_dashboard", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 6);
    }

    #[test]
    fn test_read_only_connection_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        assert!(open_sqlite_connection_read_only(path.to_str().unwrap()).is_err());
        assert!(!path.exists());
    }
}
