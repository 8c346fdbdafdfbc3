// ==========================================
// PLG 线索评分门户 - 简历数据仓储
// ==========================================
// 对应表: profile / resume_sections / resume_items / resume_stats
// ==========================================

use crate::domain::resume::{Profile, ResumeItem, ResumeSection, ResumeStat};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lead_repo::parse_sqlite_datetime;
use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ResumeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ResumeRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取简历主档（仅取第一条）
    ///
    /// # 返回
    /// - Ok(None): 表为空
    pub fn get_profile(&self) -> RepositoryResult<Option<Profile>> {
        let conn = self.get_conn()?;
        let profile = conn
            .query_row(
                r#"
                SELECT id, full_name, headline, location, email, phone,
                       linkedin_url, github_url, updated_at
                FROM profile
                ORDER BY id
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok(Profile {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        headline: row.get(2)?,
                        location: row.get(3)?,
                        email: row.get(4)?,
                        phone: row.get(5)?,
                        linkedin_url: row.get(6)?,
                        github_url: row.get(7)?,
                        updated_at: row
                            .get::<_, Option<String>>(8)?
                            .as_deref()
                            .and_then(parse_sqlite_datetime),
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    pub fn list_sections(&self) -> RepositoryResult<Vec<ResumeSection>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, slug, title, sort_order FROM resume_sections ORDER BY sort_order, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ResumeSection {
                id: row.get(0)?,
                slug: row.get(1)?,
                title: row.get(2)?,
                sort_order: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_items(&self) -> RepositoryResult<Vec<ResumeItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, section_id, sort_order, item_type, org, role, dates, location, body
            FROM resume_items
            ORDER BY section_id, sort_order, id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ResumeItem {
                id: row.get(0)?,
                section_id: row.get(1)?,
                sort_order: row.get(2)?,
                item_type: row.get(3)?,
                org: row.get(4)?,
                role: row.get(5)?,
                dates: row.get(6)?,
                location: row.get(7)?,
                body: row.get(8)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_stats(&self) -> RepositoryResult<Vec<ResumeStat>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, stat_key, stat_value, stat_label, sort_order
            FROM resume_stats
            ORDER BY sort_order, id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ResumeStat {
                id: row.get(0)?,
                stat_key: row.get(1)?,
                stat_value: row.get(2)?,
                stat_label: row.get(3)?,
                sort_order: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, seed_demo_data};

    #[test]
    fn test_empty_profile_table_returns_none() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let repo = ResumeRepository::new(Arc::new(Mutex::new(conn)));
        assert_eq!(repo.get_profile().unwrap(), None);
        assert!(repo.list_sections().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_resume() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        seed_demo_data(&mut conn).unwrap();
        let repo = ResumeRepository::new(Arc::new(Mutex::new(conn)));

        let profile = repo.get_profile().unwrap().unwrap();
        assert_eq!(profile.full_name, "Jordan Avery");
        assert!(profile.updated_at.is_some());

        let slugs: Vec<_> = repo
            .list_sections()
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(slugs, vec!["summary", "experience", "skills"]);
        assert_eq!(repo.list_items().unwrap().len(), 4);
        assert_eq!(repo.list_stats().unwrap()[0].stat_key, "quota");
    }
}
