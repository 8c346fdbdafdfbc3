// ==========================================
// PLG 线索评分门户 - 线索看板 API
// ==========================================
// 职责:
// - 从数据源读取线索（失败/为空时回退到静态样例）
// - 统一经 LeadScorer 评分、排序、分档计数
// 架构: API 层 → LeadSource (Repository) → Engine
// ==========================================

use crate::domain::lead::{ExpansionSignal, Lead, Stakeholder};
use crate::domain::types::{LeadTier, SignalType};
use crate::engine::lead_scorer::{LeadScorer, TierCounts};
use crate::engine::signals::{is_company_email, normalize_row};
use crate::fixtures;
use crate::repository::error::RepositoryResult;
use crate::repository::lead_repo::{LeadRepository, SignalRow, StakeholderRow};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// LeadSource - 线索数据源能力
// ==========================================
/// 返回 None 表示数据源不可达或无数据，由调用方决定回退
pub trait LeadSource: Send + Sync {
    fn fetch_leads(&self) -> Option<Vec<Lead>>;
}

/// 基于 SQLite lead_dashboard 视图的数据源
pub struct SqliteLeadSource {
    repo: LeadRepository,
}

impl SqliteLeadSource {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo }
    }

    fn load(&self) -> RepositoryResult<Vec<Lead>> {
        // 仅主视图失败才回退样例；干系人/信号读取失败按空处理
        let rows = self.repo.list_dashboard_rows()?;
        let stakeholders = match self.repo.list_stakeholders() {
            Ok(rows) => group_stakeholders(rows),
            Err(e) => {
                tracing::warn!(error = %e, "读取 stakeholders 失败，按空处理");
                HashMap::new()
            }
        };
        let signals = match self.repo.list_expansion_signals() {
            Ok(rows) => group_signals(rows),
            Err(e) => {
                tracing::warn!(error = %e, "读取 expansion_signals 失败，按空处理");
                HashMap::new()
            }
        };

        let leads = rows
            .into_iter()
            .filter(|row| row.email.as_deref().map(is_company_email).unwrap_or(false))
            .map(|row| {
                let domain = row.company_domain.clone().unwrap_or_default();
                let people = stakeholders.get(&domain).cloned().unwrap_or_default();
                let triggers = signals.get(&domain).cloned().unwrap_or_default();
                normalize_row(row, people, triggers)
            })
            .collect();
        Ok(leads)
    }
}

impl LeadSource for SqliteLeadSource {
    fn fetch_leads(&self) -> Option<Vec<Lead>> {
        match self.load() {
            Ok(leads) if leads.is_empty() => {
                tracing::warn!("lead_dashboard 无企业线索，使用样例数据");
                None
            }
            Ok(leads) => Some(leads),
            Err(e) => {
                tracing::warn!(error = %e, "读取 lead_dashboard 失败，使用样例数据");
                None
            }
        }
    }
}

fn group_stakeholders(rows: Vec<StakeholderRow>) -> HashMap<String, Vec<Stakeholder>> {
    let mut grouped: HashMap<String, Vec<Stakeholder>> = HashMap::new();
    for row in rows {
        grouped.entry(row.company_domain).or_default().push(Stakeholder {
            name: row.full_name,
            title: row.title.unwrap_or_default(),
        });
    }
    grouped
}

fn group_signals(rows: Vec<SignalRow>) -> HashMap<String, Vec<ExpansionSignal>> {
    let mut grouped: HashMap<String, Vec<ExpansionSignal>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.company_domain)
            .or_default()
            .push(ExpansionSignal {
                signal_type: SignalType::from_str(&row.signal_type),
                title: row.signal_title,
            });
    }
    grouped
}

// ==========================================
// LeadBoard - 看板数据
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct LeadBoard {
    /// 已评分、已排序
    pub leads: Vec<Lead>,
    /// true: 来自数据源；false: 样例数据
    pub is_live: bool,
    pub counts: TierCounts,
}

impl LeadBoard {
    /// 指定分档的线索（保持排序）
    pub fn in_tier(&self, tier: LeadTier) -> Vec<&Lead> {
        self.leads.iter().filter(|l| l.tier() == tier).collect()
    }
}

// ==========================================
// LeadApi - 线索看板 API
// ==========================================
pub struct LeadApi {
    scorer: LeadScorer,
    source: Option<Arc<dyn LeadSource>>,
}

impl LeadApi {
    /// # 参数
    /// - scorer: 已按当前配置构建的评分器
    /// - source: 数据源（None 表示仅使用样例数据）
    pub fn new(scorer: LeadScorer, source: Option<Arc<dyn LeadSource>>) -> Self {
        Self { scorer, source }
    }

    pub fn scorer(&self) -> &LeadScorer {
        &self.scorer
    }

    /// 实时看板（数据源优先，失败回退样例）
    #[instrument(skip(self))]
    pub fn board(&self, now: NaiveDateTime) -> LeadBoard {
        match self.source.as_ref().and_then(|s| s.fetch_leads()) {
            Some(leads) if !leads.is_empty() => self.build(leads, true),
            _ => self.sample_board(now),
        }
    }

    /// 样例看板（不访问数据源）
    pub fn sample_board(&self, now: NaiveDateTime) -> LeadBoard {
        self.build(fixtures::sample_leads(now), false)
    }

    fn build(&self, leads: Vec<Lead>, is_live: bool) -> LeadBoard {
        let leads = self.scorer.rank(leads);
        let counts = self.scorer.tier_counts(&leads);
        tracing::info!(
            is_live,
            total = counts.total,
            hot = counts.hot,
            warm = counts.warm,
            "线索看板生成"
        );
        LeadBoard {
            leads,
            is_live,
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedSource(Option<Vec<Lead>>);

    impl LeadSource for FixedSource {
        fn fetch_leads(&self) -> Option<Vec<Lead>> {
            self.0.clone()
        }
    }

    fn source(leads: Option<Vec<Lead>>) -> Option<Arc<dyn LeadSource>> {
        let src: Arc<dyn LeadSource> = Arc::new(FixedSource(leads));
        Some(src)
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_board_without_source_uses_samples() {
        let api = LeadApi::new(LeadScorer::default(), None);
        let board = api.board(now());
        assert!(!board.is_live);
        assert_eq!(board.leads.len(), 5);
        assert_eq!(board.counts.hot, 2);
        assert_eq!(board.counts.warm, 2);
        assert_eq!(board.counts.nurture, 1);
        assert_eq!(board.leads[0].company_name, "VelocityPay");
    }

    #[test]
    fn test_board_falls_back_when_source_empty() {
        let api = LeadApi::new(LeadScorer::default(), source(Some(Vec::new())));
        assert!(!api.board(now()).is_live);

        let api = LeadApi::new(LeadScorer::default(), source(None));
        assert!(!api.board(now()).is_live);
    }

    #[test]
    fn test_board_uses_live_source_and_rescores() {
        let live = fixtures::sample_leads(now()).into_iter().take(2).collect();
        let api = LeadApi::new(LeadScorer::default(), source(Some(live)));
        let board = api.board(now());
        assert!(board.is_live);
        assert_eq!(board.counts.total, 2);
        assert!(board.leads.iter().all(|l| l.scored.is_some()));
        assert_eq!(board.in_tier(LeadTier::Hot).len(), 2);
    }

    #[test]
    fn test_group_stakeholders_keeps_order_and_defaults_title() {
        let grouped = group_stakeholders(vec![
            StakeholderRow {
                company_domain: "a.io".into(),
                full_name: "First".into(),
                title: None,
            },
            StakeholderRow {
                company_domain: "a.io".into(),
                full_name: "Second".into(),
                title: Some("CTO".into()),
            },
        ]);
        let people = &grouped["a.io"];
        assert_eq!(people[0].name, "First");
        assert_eq!(people[0].title, "");
        assert_eq!(people[1].title, "CTO");
    }
}
