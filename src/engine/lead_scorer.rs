// ==========================================
// PLG 线索评分门户 - 线索评分引擎
// ==========================================
// 红线: 分级是"档位制"，按未取整加权原始分落档，不用取整后的总分
// ==========================================
// 输入: ComponentScores（五个分项, [0,100]）
// 输出: ScoredLead (total_score, tier, raw_score_bp)
// 计算: 整数基点，无浮点误差；相同输入逐位相同输出
// ==========================================

use crate::config::scoring_profile::{ScoringWeights, TierThresholds, WEIGHT_SCALE};
use crate::domain::lead::{ComponentScores, Lead, ScoredLead};
use crate::domain::types::LeadTier;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::instrument;

// ==========================================
// TierCounts - 分档计数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TierCounts {
    pub hot: usize,
    pub warm: usize,
    pub nurture: usize,
    pub monitor: usize,
    pub total: usize,
}

impl TierCounts {
    pub fn get(&self, tier: LeadTier) -> usize {
        match tier {
            LeadTier::Hot => self.hot,
            LeadTier::Warm => self.warm,
            LeadTier::Nurture => self.nurture,
            LeadTier::Monitor => self.monitor,
        }
    }
}

// ==========================================
// LeadScorer - 线索评分引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct LeadScorer {
    weights: ScoringWeights,
    thresholds: TierThresholds,
}

impl Default for LeadScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), TierThresholds::default())
    }
}

impl LeadScorer {
    /// 参数须已通过 ScoringProfile::validate
    pub fn new(weights: ScoringWeights, thresholds: TierThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 未取整加权原始分（基点：1 分 = 10_000）
    ///
    /// 分项先截断到 [0,100]
    pub fn raw_score_bp(&self, components: &ComponentScores) -> i64 {
        let c = components.clamped();
        let w = &self.weights;
        c.company as i64 * w.company_bp
            + c.usage as i64 * w.usage_bp
            + c.expansion as i64 * w.expansion_bp
            + c.champion as i64 * w.champion_bp
            + c.timing as i64 * w.timing_bp
    }

    /// 评分: 总分四舍五入（.5 进位），分级按原始分
    pub fn score(&self, components: &ComponentScores) -> ScoredLead {
        let raw_bp = self.raw_score_bp(components);
        // raw_bp >= 0，整数除法即向下取整
        let total_score = ((raw_bp + WEIGHT_SCALE / 2) / WEIGHT_SCALE) as i32;
        ScoredLead {
            total_score,
            tier: self.thresholds.classify(raw_bp),
            raw_score_bp: raw_bp,
        }
    }

    /// 为线索挂上评分结果（覆盖已有结果）
    pub fn score_lead(&self, mut lead: Lead) -> Lead {
        lead.scored = Some(self.score(&lead.components));
        lead
    }

    /// 批量评分并排序
    ///
    /// 排序键:
    /// 1) total_score 降序
    /// 2) 原始分降序
    /// 3) 保持输入顺序（稳定排序）
    #[instrument(skip(self, leads), fields(count = leads.len()))]
    pub fn rank(&self, leads: Vec<Lead>) -> Vec<Lead> {
        let mut scored: Vec<Lead> = leads.into_iter().map(|l| self.score_lead(l)).collect();
        scored.sort_by(compare_scored);

        tracing::debug!(
            top = scored.first().map(|l| l.company_name.as_str()).unwrap_or("-"),
            "线索排序完成"
        );
        scored
    }

    /// 分档计数（未评分的线索按 Monitor 计）
    pub fn tier_counts(&self, leads: &[Lead]) -> TierCounts {
        let mut counts = TierCounts::default();
        for lead in leads {
            match lead.tier() {
                LeadTier::Hot => counts.hot += 1,
                LeadTier::Warm => counts.warm += 1,
                LeadTier::Nurture => counts.nurture += 1,
                LeadTier::Monitor => counts.monitor += 1,
            }
        }
        counts.total = leads.len();
        counts
    }
}

fn compare_scored(a: &Lead, b: &Lead) -> Ordering {
    let raw = |l: &Lead| l.scored.map(|s| s.raw_score_bp).unwrap_or(0);
    b.total_score()
        .cmp(&a.total_score())
        .then_with(|| raw(b).cmp(&raw(a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(company: i32, usage: i32, expansion: i32, champion: i32, timing: i32) -> ComponentScores {
        ComponentScores::new(company, usage, expansion, champion, timing)
    }

    #[test]
    fn test_all_hundred_except_timing_is_hot() {
        let scorer = LeadScorer::default();
        let s = scorer.score(&c(100, 100, 100, 100, 0));
        assert_eq!(s.total_score, 90);
        assert_eq!(s.raw_score_bp, 900_000);
        assert_eq!(s.tier, LeadTier::Hot);
    }

    #[test]
    fn test_exact_eighty_is_hot() {
        let s = LeadScorer::default().score(&c(80, 80, 80, 80, 80));
        assert_eq!(s.raw_score_bp, 800_000);
        assert_eq!(s.tier, LeadTier::Hot);
    }

    #[test]
    fn test_rounded_total_does_not_drive_tier() {
        // raw = 79.5 -> total 80, tier 仍为 warm
        let s = LeadScorer::default().score(&c(80, 80, 80, 80, 75));
        assert_eq!(s.raw_score_bp, 795_000);
        assert_eq!(s.total_score, 80);
        assert_eq!(s.tier, LeadTier::Warm);
    }

    #[test]
    fn test_half_rounds_up() {
        // raw = 0.5 (timing=5 * 0.10)
        let s = LeadScorer::default().score(&c(0, 0, 0, 0, 5));
        assert_eq!(s.total_score, 1);
        assert_eq!(s.tier, LeadTier::Monitor);
    }

    #[test]
    fn test_out_of_range_components_are_clamped() {
        let scorer = LeadScorer::default();
        assert_eq!(scorer.score(&c(150, 100, 100, 100, 100)).total_score, 100);
        assert_eq!(scorer.score(&c(-20, 0, 0, 0, 0)).total_score, 0);
    }

    #[test]
    fn test_tier_counts() {
        let scorer = LeadScorer::default();
        let mk = |components| Lead {
            components,
            ..crate::engine::signals::empty_lead("x")
        };
        let leads = scorer.rank(vec![
            mk(c(90, 90, 90, 90, 90)),
            mk(c(65, 65, 65, 65, 65)),
            mk(c(10, 10, 10, 10, 10)),
        ]);
        let counts = scorer.tier_counts(&leads);
        assert_eq!(counts.hot, 1);
        assert_eq!(counts.warm, 1);
        assert_eq!(counts.nurture, 0);
        assert_eq!(counts.monitor, 1);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.get(LeadTier::Warm), 1);
    }
}
