// ==========================================
// PLG 线索评分门户 - 命令行入口
// ==========================================
// 子命令:
// - serve    启动 HTTP 服务
// - render   渲染单个页面到 stdout / 文件
// - score    按五个分项计算总分与分档
// - project  增长场景测算
// - init-db  建表并写入演示数据
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use plg_pipeline::config::AppConfig;
use plg_pipeline::db::{init_schema, open_sqlite_connection, seed_demo_data};
use plg_pipeline::domain::{ComponentScores, ScenarioInputs};
use plg_pipeline::web::{render_page, Page};
use plg_pipeline::{logging, web, AppState, SubscriptionTier};

#[derive(Parser)]
#[command(name = "plg-pipeline")]
#[command(version, about = "PLG lead scoring and growth scenario portal")]
struct Cli {
    /// 数据库路径（覆盖 PLG_PIPELINE_DB_PATH）
    #[arg(long, global = true)]
    db: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 HTTP 服务
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
    /// 渲染页面 HTML
    Render {
        #[arg(value_parser = parse_page)]
        page: Page,
        #[arg(long)]
        out: Option<std::path::PathBuf>,
        #[arg(long)]
        lang: Option<String>,
    },
    /// 计算线索总分与分档
    Score {
        company: i32,
        usage: i32,
        expansion: i32,
        champion: i32,
        timing: i32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// 增长场景测算
    Project {
        #[arg(long, default_value_t = 1_000)]
        users: u64,
        #[arg(long, default_value_t = 500)]
        images_per_day: u64,
        #[arg(long, default_value_t = 2)]
        team_size: u64,
        #[arg(long, value_enum, default_value_t = TierArg::Free)]
        tier: TierArg,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// 建表并写入演示数据
    InitDb,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TierArg {
    Free,
    Pro,
    Team,
}

impl From<TierArg> for SubscriptionTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Free => SubscriptionTier::Free,
            TierArg::Pro => SubscriptionTier::Pro,
            TierArg::Team => SubscriptionTier::Team,
        }
    }
}

fn parse_page(raw: &str) -> Result<Page, String> {
    Page::parse(raw).ok_or_else(|| {
        let names: Vec<&str> = Page::ALL.iter().map(|p| p.name()).collect();
        format!("unknown page '{}', expected one of: {}", raw, names.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let addr_override = match &cli.command {
        Commands::Serve { addr } => addr.clone(),
        _ => None,
    };
    let config = AppConfig::from_env().with_overrides(cli.db.clone(), addr_override);
    logging::init_with(config.log_format);

    match cli.command {
        Commands::Serve { .. } => serve(config).await,
        Commands::Render { page, out, lang } => render(config, page, out, lang),
        Commands::Score {
            company,
            usage,
            expansion,
            champion,
            timing,
            json,
        } => score(config, ComponentScores::new(company, usage, expansion, champion, timing), json),
        Commands::Project {
            users,
            images_per_day,
            team_size,
            tier,
            json,
        } => project(
            config,
            ScenarioInputs {
                users,
                images_per_day,
                team_size,
                tier: tier.into(),
            },
            json,
        ),
        Commands::InitDb => init_db(&config),
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("==================================================");
    tracing::info!("{} v{}", plg_pipeline::APP_NAME, plg_pipeline::VERSION);
    tracing::info!("==================================================");

    let addr = config.addr.clone();
    let state = Arc::new(AppState::new(config).context("初始化AppState失败")?);
    let listener = web::http::bind(&addr)
        .await
        .with_context(|| format!("监听 {} 失败", addr))?;

    web::serve_with_shutdown(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "无法监听 Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await
    .context("HTTP 服务异常退出")
}

fn render(
    config: AppConfig,
    page: Page,
    out: Option<std::path::PathBuf>,
    lang: Option<String>,
) -> anyhow::Result<()> {
    let locale = web::router::resolve_locale(lang.as_deref(), &config.default_locale);
    let state = AppState::new(config).context("初始化AppState失败")?;
    let html = render_page(&state, page, &HashMap::new(), locale)?;

    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("写入 {} 失败", path.display()))?;
            tracing::info!(page = page.name(), path = %path.display(), "页面已渲染");
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn score(config: AppConfig, components: ComponentScores, json: bool) -> anyhow::Result<()> {
    let state = AppState::new(config).context("初始化AppState失败")?;
    let scored = state.lead_api.scorer().score(&components);

    if json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
    } else {
        println!(
            "total={} tier={} raw={}",
            scored.total_score,
            scored.tier,
            scored.raw_score()
        );
    }
    Ok(())
}

fn project(config: AppConfig, inputs: ScenarioInputs, json: bool) -> anyhow::Result<()> {
    let state = AppState::new(config).context("初始化AppState失败")?;
    let view = state.scenario_api.project(inputs);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for (name, value) in view.metrics.numeric_fields() {
            println!("{:<28} {}", name, value);
        }
        println!("{:<28} {}", "readReplicaRecommended", view.metrics.read_replica_recommended);
        println!(
            "{:<28} {}",
            "connectionPoolingCritical", view.metrics.connection_pooling_critical
        );
        println!("{:<28} {}", "needsUpgrade", view.metrics.needs_upgrade);
    }
    Ok(())
}

fn init_db(config: &AppConfig) -> anyhow::Result<()> {
    let mut conn = open_sqlite_connection(&config.db_path)
        .with_context(|| format!("打开数据库 {} 失败", config.db_path))?;
    init_schema(&conn).context("建表失败")?;
    seed_demo_data(&mut conn).context("写入演示数据失败")?;
    tracing::info!(db_path = %config.db_path, "数据库初始化完成");
    Ok(())
}
