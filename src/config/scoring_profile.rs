// ==========================================
// PLG 线索评分门户 - 评分/测算参数
// ==========================================
// 权重 / 分级阈值 / 订阅档位增长系数
// 进程启动时构建一次，校验后以不可变形式显式传入引擎
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{LeadTier, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// 权重基数：1.0 = 10_000 基点
pub const WEIGHT_SCALE: i64 = 10_000;

// ==========================================
// ScoringWeights - 分项权重（基点）
// ==========================================
// 说明: 用整数基点表示权重，加权和为精确值，
//       阈值比较不受浮点误差影响（与 Postgres NUMERIC 语义一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub company_bp: i64,
    pub usage_bp: i64,
    pub expansion_bp: i64,
    pub champion_bp: i64,
    pub timing_bp: i64,
}

impl Default for ScoringWeights {
    /// company=0.25 usage=0.30 expansion=0.20 champion=0.15 timing=0.10
    fn default() -> Self {
        Self {
            company_bp: 2_500,
            usage_bp: 3_000,
            expansion_bp: 2_000,
            champion_bp: 1_500,
            timing_bp: 1_000,
        }
    }
}

impl ScoringWeights {
    /// 从小数权重构建（如 0.25），四舍五入到基点
    pub fn from_fractions(
        company: f64,
        usage: f64,
        expansion: f64,
        champion: f64,
        timing: f64,
    ) -> ConfigResult<Self> {
        let weights = Self {
            company_bp: fraction_to_bp("company", company)?,
            usage_bp: fraction_to_bp("usage", usage)?,
            expansion_bp: fraction_to_bp("expansion", expansion)?,
            champion_bp: fraction_to_bp("champion", champion)?,
            timing_bp: fraction_to_bp("timing", timing)?,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn total_bp(&self) -> i64 {
        self.company_bp + self.usage_bp + self.expansion_bp + self.champion_bp + self.timing_bp
    }

    /// 校验: 每项非负，合计恰为 1.0
    pub fn validate(&self) -> ConfigResult<()> {
        let items = [
            ("company", self.company_bp),
            ("usage", self.usage_bp),
            ("expansion", self.expansion_bp),
            ("champion", self.champion_bp),
            ("timing", self.timing_bp),
        ];
        for (name, bp) in items {
            if bp < 0 {
                return Err(ConfigError::InvalidWeight {
                    component: name.to_string(),
                    message: format!("权重不能为负: {}", bp),
                });
            }
        }

        let total = self.total_bp();
        if total != WEIGHT_SCALE {
            return Err(ConfigError::WeightSumMismatch { total_bp: total });
        }
        Ok(())
    }
}

fn fraction_to_bp(component: &str, value: f64) -> ConfigResult<i64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidWeight {
            component: component.to_string(),
            message: format!("权重必须在 [0, 1] 内: {}", value),
        });
    }
    Ok((value * WEIGHT_SCALE as f64).round() as i64)
}

// ==========================================
// TierThresholds - 分级阈值（整分）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub hot: i64,
    pub warm: i64,
    pub nurture: i64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            hot: 80,
            warm: 60,
            nurture: 40,
        }
    }
}

impl TierThresholds {
    /// 校验: hot > warm > nurture >= 0
    pub fn validate(&self) -> ConfigResult<()> {
        if self.nurture < 0 || !(self.hot > self.warm && self.warm > self.nurture) {
            return Err(ConfigError::InvalidThresholds {
                hot: self.hot,
                warm: self.warm,
                nurture: self.nurture,
            });
        }
        Ok(())
    }

    /// 按未取整原始分（基点）落档，边界值归入高档
    pub fn classify(&self, raw_bp: i64) -> LeadTier {
        if raw_bp >= self.hot * WEIGHT_SCALE {
            LeadTier::Hot
        } else if raw_bp >= self.warm * WEIGHT_SCALE {
            LeadTier::Warm
        } else if raw_bp >= self.nurture * WEIGHT_SCALE {
            LeadTier::Nurture
        } else {
            LeadTier::Monitor
        }
    }
}

// ==========================================
// TierMultipliers - 订阅档位增长系数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMultipliers {
    pub free: f64,
    pub pro: f64,
    pub team: f64,
}

impl Default for TierMultipliers {
    fn default() -> Self {
        Self {
            free: 1.0,
            pro: 1.2,
            team: 1.5,
        }
    }
}

impl TierMultipliers {
    pub fn validate(&self) -> ConfigResult<()> {
        for (tier, value) in [("free", self.free), ("pro", self.pro), ("team", self.team)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    tier: tier.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn for_tier(&self, tier: SubscriptionTier) -> f64 {
        match tier {
            SubscriptionTier::Free => self.free,
            SubscriptionTier::Pro => self.pro,
            SubscriptionTier::Team => self.team,
        }
    }
}

// ==========================================
// ScoringProfile - 参数全集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringProfile {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: TierThresholds,
    #[serde(default)]
    pub multipliers: TierMultipliers,
}

impl ScoringProfile {
    pub fn validate(&self) -> ConfigResult<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.multipliers.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = ScoringProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.weights.total_bp(), WEIGHT_SCALE);
    }

    #[test]
    fn test_from_fractions_matches_default() {
        let w = ScoringWeights::from_fractions(0.25, 0.30, 0.20, 0.15, 0.10).unwrap();
        assert_eq!(w, ScoringWeights::default());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let err = ScoringWeights::from_fractions(0.25, 0.30, 0.20, 0.15, 0.20).unwrap_err();
        match err {
            ConfigError::WeightSumMismatch { total_bp } => assert_eq!(total_bp, 11_000),
            other => panic!("Expected WeightSumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        assert!(ScoringWeights::from_fractions(-0.1, 0.5, 0.2, 0.2, 0.2).is_err());
        assert!(ScoringWeights::from_fractions(f64::NAN, 0.5, 0.2, 0.2, 0.1).is_err());
    }

    #[test]
    fn test_thresholds_must_be_descending() {
        let bad = TierThresholds {
            hot: 60,
            warm: 60,
            nurture: 40,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_classify_boundaries_inclusive() {
        let t = TierThresholds::default();
        assert_eq!(t.classify(800_000), LeadTier::Hot);
        assert_eq!(t.classify(799_999), LeadTier::Warm);
        assert_eq!(t.classify(600_000), LeadTier::Warm);
        assert_eq!(t.classify(400_000), LeadTier::Nurture);
        assert_eq!(t.classify(399_999), LeadTier::Monitor);
        assert_eq!(t.classify(0), LeadTier::Monitor);
    }

    #[test]
    fn test_multipliers_reject_non_positive() {
        let m = TierMultipliers {
            free: 0.0,
            pro: 1.2,
            team: 1.5,
        };
        assert!(m.validate().is_err());
        assert_eq!(TierMultipliers::default().for_tier(SubscriptionTier::Team), 1.5);
    }
}
