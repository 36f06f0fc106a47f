// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    client::ApiClient,
    config::AppConfig,
    downloader::{BatchOrchestrator, ConsoleObserver, FileSink, SubtitlePipeline},
    error::{AppError, AppResult},
    extractor::{BatchFileSource, HtmlListSource, ItemSource, SingleItemSource},
    models::{AuthToken, BatchReport},
};
use colored::*;
use log::{debug, info, warn};
use std::{path::PathBuf, sync::Arc};

/// 核心的执行上下文，包含处理任务所需的配置和工具
#[derive(Clone)]
pub struct DownloadJobContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<ApiClient>,
    pub output_dir: PathBuf,
}

impl DownloadJobContext {
    pub fn new(config: Arc<AppConfig>, output_dir: PathBuf) -> AppResult<Self> {
        let http_client = Arc::new(ApiClient::new(&config)?);
        Ok(Self {
            config,
            http_client,
            output_dir,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    if args.cookie_help {
        ui::box_message(
            "获取 B站 Cookie 指南",
            constants::HELP_COOKIE_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: Cookie 等同于登录凭证，请妥善保管，不要分享给他人。",
            ui::Mark::Info
        );
        return Ok(());
    }

    let config = Arc::new(AppConfig::new()?);
    debug!("加载的应用配置: {:?}", config);

    let (cookie, source) =
        config::cookie::resolve_cookie(args.cookie.as_deref(), args.cookie_file.as_deref())?;
    let Some(auth) = cookie else {
        info!("未找到可用的 Cookie");
        return Err(AppError::CookieMissing);
    };
    info!("从 {} 加载 Cookie", source);
    println!("\n{} 已从 {} 加载 Cookie。", ui::Mark::Info, source);

    if args.save_cookie
        && let Err(e) = config::cookie::save_cookie(&auth)
    {
        log::error!("尝试保存 Cookie 时失败: {}", e);
        eprintln!("{} 保存 Cookie 失败: {}", ui::Mark::Warn, e);
    }

    let context = DownloadJobContext::new(config, args.output.clone())?;
    let source = item_source(&args)?;
    let report = run_batch(source.as_ref(), &auth, &context).await?;

    if report.all_succeeded() {
        Ok(())
    } else {
        Err(AppError::BatchFailed(report.stats.error))
    }
}

fn item_source(args: &Cli) -> AppResult<Box<dyn ItemSource>> {
    if let Some(url) = &args.url {
        Ok(Box::new(SingleItemSource::new(url.clone())))
    } else if let Some(bvid) = &args.bvid {
        Ok(Box::new(SingleItemSource::new(bvid.clone())))
    } else if let Some(path) = &args.batch_file {
        Ok(Box::new(BatchFileSource::new(path.clone())))
    } else if let Some(path) = &args.html {
        Ok(Box::new(HtmlListSource::new(path.clone())))
    } else {
        Err(AppError::UserInputError("未指定下载来源。".to_string()))
    }
}

/// 读取条目列表并逐个下载字幕。列表为空时直接返回 `NoItems`，不会开始批次。
pub async fn run_batch(
    source: &dyn ItemSource,
    auth: &AuthToken,
    context: &DownloadJobContext,
) -> AppResult<BatchReport> {
    info!("读取条目来源: {}", source.describe());
    let items = source.items().await?;
    if items.is_empty() {
        warn!("{} 中没有可下载的视频", source.describe());
        return Err(AppError::NoItems);
    }

    std::fs::create_dir_all(&context.output_dir)?;
    let absolute_path = dunce::canonicalize(&context.output_dir)?;
    info!("字幕将保存到目录: \"{}\"", absolute_path.display());
    ui::info(&format!("字幕将保存到目录: \"{}\"", absolute_path.display()));

    ui::print_header(&format!(
        "开始下载字幕 (共 {} 个视频，按 {} 可随时退出)",
        items.len(),
        "Ctrl+C".yellow()
    ));

    let sink = FileSink::new(absolute_path);
    let orchestrator = BatchOrchestrator::new(SubtitlePipeline::new(context, sink));
    let observer = ConsoleObserver::new(items.len());
    let report = orchestrator.run(items, auth, &observer).await?;

    downloader::print_report(&report);
    Ok(report)
}
