// ==========================================
// PLG 线索评分门户 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 启动流程:
// 1. 只读打开数据库（失败则仅使用样例数据）
// 2. 安装 SQL 追踪，检查 schema_version
// 3. 加载评分参数（config_kv 覆写无效时启动失败）
// 4. 构建 Engine 与 API
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ApiResult, LeadApi, LeadSource, ResumeApi, ScenarioApi, SqliteLeadSource};
use crate::config::{AppConfig, ConfigManager, ScoringProfile};
use crate::db::{open_sqlite_connection_read_only, warn_if_schema_mismatch};
use crate::engine::{LeadScorer, ScenarioProjector};
use crate::perf::{install_sqlite_tracing, SqlTraceSettings};
use crate::repository::{LeadRepository, ResumeRepository};

/// 应用状态
///
/// 构建后只读，通过 Arc 在连接任务间共享
pub struct AppState {
    /// 运行时配置
    pub config: AppConfig,

    /// 当前生效的评分/测算参数
    pub profile: ScoringProfile,

    /// 线索看板API
    pub lead_api: Arc<LeadApi>,

    /// 简历API
    pub resume_api: Arc<ResumeApi>,

    /// 增长场景API
    pub scenario_api: Arc<ScenarioApi>,

    /// 数据库是否可用
    pub db_available: bool,
}

impl AppState {
    /// 按配置创建 AppState
    ///
    /// # 返回
    /// - Err(ApiError::InvalidConfig): config_kv 中的覆写值无效
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        tracing::info!(db_path = %config.db_path, "初始化AppState");

        match open_sqlite_connection_read_only(&config.db_path) {
            Ok(mut conn) => {
                install_sqlite_tracing(&mut conn, SqlTraceSettings::from_env());
                if let Err(e) = warn_if_schema_mismatch(&conn) {
                    tracing::warn!(error = %e, "schema_version 读取失败(将继续启动)");
                }
                Self::from_connection(config, Arc::new(Mutex::new(conn)))
            }
            Err(e) => {
                tracing::warn!(
                    db_path = %config.db_path,
                    error = %e,
                    "数据库不可用，仅使用样例数据"
                );
                Ok(Self::fixture_only(config))
            }
        }
    }

    /// 基于已有连接创建（测试可传入内存库）
    pub fn from_connection(config: AppConfig, conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        let profile = ConfigManager::from_connection(conn.clone()).load_scoring_profile()?;

        let source: Arc<dyn LeadSource> =
            Arc::new(SqliteLeadSource::new(LeadRepository::new(conn.clone())));
        let resume_repo = ResumeRepository::new(conn);

        Ok(Self::assemble(config, profile, Some(source), Some(resume_repo), true))
    }

    /// 无数据库：默认参数 + 样例数据
    pub fn fixture_only(config: AppConfig) -> Self {
        Self::assemble(config, ScoringProfile::default(), None, None, false)
    }

    fn assemble(
        config: AppConfig,
        profile: ScoringProfile,
        source: Option<Arc<dyn LeadSource>>,
        resume_repo: Option<ResumeRepository>,
        db_available: bool,
    ) -> Self {
        let scorer = LeadScorer::new(profile.weights, profile.thresholds);
        let projector = ScenarioProjector::new(profile.multipliers);

        Self {
            config,
            profile,
            lead_api: Arc::new(LeadApi::new(scorer, source)),
            resume_api: Arc::new(ResumeApi::new(resume_repo)),
            scenario_api: Arc::new(ScenarioApi::new(projector)),
            db_available,
        }
    }
}
