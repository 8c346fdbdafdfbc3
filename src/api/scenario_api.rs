// ==========================================
// PLG 线索评分门户 - 增长场景 API
// ==========================================
// 职责: 解析/校验请求参数 → 截断到界面范围 → ScenarioProjector
// 参数: users / images_per_day / team_size / tier（缺省取初始值）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::scenario::{DerivedMetrics, ScenarioInputs};
use crate::domain::types::SubscriptionTier;
use crate::engine::scenario_projector::ScenarioProjector;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;

pub const USERS_RANGE: RangeInclusive<u64> = 100..=100_000;
pub const IMAGES_PER_DAY_RANGE: RangeInclusive<u64> = 50..=50_000;
pub const TEAM_SIZE_RANGE: RangeInclusive<u64> = 1..=50;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioView {
    pub inputs: ScenarioInputs,
    pub metrics: DerivedMetrics,
}

pub struct ScenarioApi {
    projector: ScenarioProjector,
}

impl ScenarioApi {
    pub fn new(projector: ScenarioProjector) -> Self {
        Self { projector }
    }

    /// 直接测算（不截断）
    pub fn project(&self, inputs: ScenarioInputs) -> ScenarioView {
        ScenarioView {
            inputs,
            metrics: self.projector.project(&inputs),
        }
    }

    /// 按查询参数测算
    ///
    /// # 错误
    /// - InvalidInput: 数值无法解析为非负整数，或 tier 不是 free/pro/team
    pub fn project_query(&self, query: &HashMap<String, String>) -> ApiResult<ScenarioView> {
        let inputs = parse_inputs(query)?;
        tracing::debug!(?inputs, "场景测算");
        Ok(self.project(inputs))
    }
}

fn clamp(value: u64, range: &RangeInclusive<u64>) -> u64 {
    value.clamp(*range.start(), *range.end())
}

fn parse_u64(query: &HashMap<String, String>, key: &str) -> ApiResult<Option<u64>> {
    match query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ApiError::InvalidInput(format!("{} 必须为非负整数: {}", key, raw))),
    }
}

/// 解析查询参数（缺省取初始值，数值截断到界面范围）
pub fn parse_inputs(query: &HashMap<String, String>) -> ApiResult<ScenarioInputs> {
    let defaults = ScenarioInputs::default();

    let tier = match query.get("tier").map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => defaults.tier,
        Some(raw) => SubscriptionTier::parse(raw).ok_or_else(|| {
            ApiError::InvalidInput(format!("tier 必须为 free/pro/team: {}", raw))
        })?,
    };

    Ok(ScenarioInputs {
        users: clamp(
            parse_u64(query, "users")?.unwrap_or(defaults.users),
            &USERS_RANGE,
        ),
        images_per_day: clamp(
            parse_u64(query, "images_per_day")?.unwrap_or(defaults.images_per_day),
            &IMAGES_PER_DAY_RANGE,
        ),
        team_size: clamp(
            parse_u64(query, "team_size")?.unwrap_or(defaults.team_size),
            &TEAM_SIZE_RANGE,
        ),
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_uses_defaults() {
        assert_eq!(parse_inputs(&HashMap::new()).unwrap(), ScenarioInputs::default());
    }

    #[test]
    fn test_values_clamped_to_ui_ranges() {
        let inputs = parse_inputs(&query(&[
            ("users", "5"),
            ("images_per_day", "999999"),
            ("team_size", "0"),
            ("tier", "TEAM"),
        ]))
        .unwrap();
        assert_eq!(inputs.users, 100);
        assert_eq!(inputs.images_per_day, 50_000);
        assert_eq!(inputs.team_size, 1);
        assert_eq!(inputs.tier, SubscriptionTier::Team);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for bad in [("users", "-1"), ("team_size", "ten"), ("tier", "enterprise")] {
            let err = parse_inputs(&query(&[bad])).unwrap_err();
            assert!(err.is_client_error(), "{:?} 应为 InvalidInput", bad);
        }
    }

    #[test]
    fn test_project_query_returns_metrics() {
        let api = ScenarioApi::new(ScenarioProjector::default());
        let view = api.project_query(&query(&[("users", "6000")])).unwrap();
        assert_eq!(view.inputs.users, 6_000);
        assert!(view.metrics.needs_upgrade);
    }
}
