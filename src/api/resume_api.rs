// ==========================================
// PLG 线索评分门户 - 简历 API
// ==========================================
// 数据库优先；仓储缺失、读取失败或主档为空时回退到占位简历
// ==========================================

use crate::domain::resume::{Profile, ResumeItem, ResumeSection, ResumeStat};
use crate::fixtures;
use crate::repository::error::RepositoryResult;
use crate::repository::resume_repo::ResumeRepository;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub section: ResumeSection,
    pub items: Vec<ResumeItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeView {
    pub profile: Profile,
    pub sections: Vec<SectionView>,
    pub stats: Vec<ResumeStat>,
    pub is_live: bool,
}

impl ResumeView {
    fn assemble(
        profile: Profile,
        sections: Vec<ResumeSection>,
        items: Vec<ResumeItem>,
        stats: Vec<ResumeStat>,
        is_live: bool,
    ) -> Self {
        let sections = sections
            .into_iter()
            .map(|section| {
                let items = items
                    .iter()
                    .filter(|i| i.section_id == section.id)
                    .cloned()
                    .collect();
                SectionView { section, items }
            })
            .collect();
        Self {
            profile,
            sections,
            stats,
            is_live,
        }
    }

    /// 占位简历
    pub fn sample() -> Self {
        Self::assemble(
            fixtures::sample_profile(),
            fixtures::sample_sections(),
            fixtures::sample_items(),
            fixtures::sample_stats(),
            false,
        )
    }
}

pub struct ResumeApi {
    repo: Option<ResumeRepository>,
}

impl ResumeApi {
    pub fn new(repo: Option<ResumeRepository>) -> Self {
        Self { repo }
    }

    fn load(repo: &ResumeRepository) -> RepositoryResult<Option<ResumeView>> {
        let Some(profile) = repo.get_profile()? else {
            return Ok(None);
        };
        Ok(Some(ResumeView::assemble(
            profile,
            repo.list_sections()?,
            repo.list_items()?,
            repo.list_stats()?,
            true,
        )))
    }

    pub fn resume(&self) -> ResumeView {
        let Some(repo) = self.repo.as_ref() else {
            return ResumeView::sample();
        };
        match Self::load(repo) {
            Ok(Some(view)) => view,
            Ok(None) => {
                tracing::warn!("profile 表为空，使用占位简历");
                ResumeView::sample()
            }
            Err(e) => {
                tracing::warn!(error = %e, "读取简历失败，使用占位简历");
                ResumeView::sample()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, seed_demo_data};
    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sample_groups_items_by_section() {
        let view = ResumeApi::new(None).resume();
        assert!(!view.is_live);
        assert_eq!(view.sections.len(), 3);
        assert_eq!(view.sections[1].section.slug, "experience");
        assert_eq!(view.sections[1].items.len(), 2);
        assert_eq!(view.stats.len(), 3);
    }

    #[test]
    fn test_live_resume_from_seeded_db() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        seed_demo_data(&mut conn).unwrap();
        let repo = ResumeRepository::new(Arc::new(Mutex::new(conn)));
        let view = ResumeApi::new(Some(repo)).resume();
        assert!(view.is_live);
        assert_eq!(view.profile.full_name, "Jordan Avery");
        assert_eq!(view.sections[0].items.len(), 1);
    }

    #[test]
    fn test_missing_tables_fall_back() {
        let conn = Connection::open_in_memory().unwrap();
        let repo = ResumeRepository::new(Arc::new(Mutex::new(conn)));
        assert!(!ResumeApi::new(Some(repo)).resume().is_live);
    }
}
