// src/downloader/mod.rs

pub mod orchestrator;
mod progress;
pub mod resolver;
pub mod sink;
pub mod transformer;

pub use orchestrator::{BatchEvent, BatchObserver, BatchOrchestrator, BatchState, NoopObserver};
pub use progress::ConsoleObserver;
pub use resolver::SubtitleResolver;
pub use sink::{FileSink, Sink};
pub use transformer::SubtitleTransformer;

use crate::{
    DownloadJobContext,
    error::*,
    models::{AuthToken, BatchReport, Item, SavedFile},
    ui::{self, Mark},
};
use async_trait::async_trait;
use colored::*;
use log::info;
use std::collections::HashMap;

/// 单个条目的完整处理流程
#[async_trait]
pub trait ItemPipeline: Send + Sync {
    async fn process(&self, item: &Item, auth: &AuthToken) -> AppResult<SavedFile>;
}

/// 解析 -> 转换 -> 保存，三步严格按顺序执行
pub struct SubtitlePipeline<S> {
    resolver: SubtitleResolver,
    transformer: SubtitleTransformer,
    sink: S,
}

impl<S: Sink> SubtitlePipeline<S> {
    pub fn new(context: &DownloadJobContext, sink: S) -> Self {
        Self {
            resolver: SubtitleResolver::new(context.http_client.clone(), context.config.clone()),
            transformer: SubtitleTransformer::new(context.http_client.clone()),
            sink,
        }
    }
}

#[async_trait]
impl<S: Sink> ItemPipeline for SubtitlePipeline<S> {
    async fn process(&self, item: &Item, auth: &AuthToken) -> AppResult<SavedFile> {
        let resource = self.resolver.resolve(&item.key, auth).await?;
        let document = self.transformer.transform(&item.key, &resource).await?;
        self.sink
            .save(&document.content.render(), &document.filename)
            .await
    }
}

pub fn print_report(report: &BatchReport) {
    let stats = &report.stats;
    info!(
        "下载报告: Total={}, Success={}, Error={}",
        stats.total, stats.success, stats.error
    );

    if !report.failures.is_empty() {
        ui::print_sub_header("下载详情报告");
        println!("\n{} 失败的视频 ({}个):", Mark::Error, stats.error);
        print_grouped_failures(&report.failures);
    }
    ui::print_sub_header("任务总结");
    if report.all_succeeded() {
        println!("{} 所有 {} 个视频的字幕均已下载成功。", Mark::Ok, stats.total);
    } else {
        println!(
            "{} | {} | 总计: {}",
            format!("成功: {}", stats.success).green(),
            format!("失败: {}", stats.error).red(),
            stats.total
        );
    }
}

fn print_grouped_failures(items: &[(String, String)]) {
    let mut grouped: HashMap<&str, Vec<&str>> = HashMap::new();
    for (key, reason) in items {
        grouped.entry(reason.as_str()).or_default().push(key.as_str());
    }
    let mut sorted: Vec<_> = grouped.into_iter().collect();
    sorted.sort();
    for (reason, mut keys) in sorted {
        println!("  - {}", format!("原因: {}", reason).red());
        keys.sort();
        for key in keys {
            println!("    - {}", key);
        }
    }
}
