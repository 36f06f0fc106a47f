// src/downloader/orchestrator.rs

use super::ItemPipeline;
use crate::{
    constants,
    error::*,
    models::{AuthToken, BatchReport, BatchStats, Item, SavedFile},
};
use log::{error, info};
use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
}

/// 批量任务过程中发给界面的通知
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started,
    ItemSucceeded {
        index: usize,
        item: &'a Item,
        saved: &'a SavedFile,
    },
    ItemFailed {
        index: usize,
        item: &'a Item,
        error: &'a AppError,
    },
    Paused {
        duration: Duration,
    },
    Completed,
}

/// 每次统计更新后都会收到事件和当前的统计快照
pub trait BatchObserver: Send + Sync {
    fn on_event(&self, event: &BatchEvent<'_>, stats: &BatchStats);
}

/// 不关心进度时使用
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_event(&self, _event: &BatchEvent<'_>, _stats: &BatchStats) {}
}

/// 持有期间状态为 Running。`run` 的 future 被中途丢弃时状态退回 Idle
struct RunningGuard<'a> {
    state: &'a Mutex<BatchState>,
    completed: bool,
}

impl RunningGuard<'_> {
    fn complete(mut self) {
        self.completed = true;
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = BatchState::Completed;
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = BatchState::Idle;
        }
    }
}

/// 逐个处理条目: 严格串行，单个条目失败不影响后续条目，每 10 个暂停 1 秒。
pub struct BatchOrchestrator<P> {
    pipeline: P,
    state: Mutex<BatchState>,
}

impl<P: ItemPipeline> BatchOrchestrator<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            state: Mutex::new(BatchState::Idle),
        }
    }

    pub fn state(&self) -> BatchState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 进入 Running 状态；已有批次在运行时拒绝
    fn begin(&self) -> AppResult<RunningGuard<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == BatchState::Running {
            return Err(AppError::BatchInProgress);
        }
        *state = BatchState::Running;
        Ok(RunningGuard {
            state: &self.state,
            completed: false,
        })
    }

    pub async fn run(
        &self,
        items: Vec<Item>,
        auth: &AuthToken,
        observer: &dyn BatchObserver,
    ) -> AppResult<BatchReport> {
        if items.is_empty() {
            return Err(AppError::NoItems);
        }
        let guard = self.begin()?;

        let total = items.len();
        let mut report = BatchReport {
            stats: BatchStats::new(total),
            failures: Vec::new(),
        };
        info!("开始新一批字幕下载任务，总数: {}", total);
        observer.on_event(&BatchEvent::Started, &report.stats);

        for (index, item) in items.iter().enumerate() {
            match self.pipeline.process(item, auth).await {
                Ok(saved) => {
                    report.stats.record_success();
                    info!("({}/{}) {} 下载成功: {}", index + 1, total, item.key, saved.filename);
                    observer.on_event(
                        &BatchEvent::ItemSucceeded {
                            index,
                            item,
                            saved: &saved,
                        },
                        &report.stats,
                    );
                }
                Err(e) => {
                    report.stats.record_error();
                    error!("({}/{}) {} 下载失败: {}", index + 1, total, item.key, e);
                    report.failures.push((item.key.clone(), e.to_string()));
                    observer.on_event(
                        &BatchEvent::ItemFailed {
                            index,
                            item,
                            error: &e,
                        },
                        &report.stats,
                    );
                }
            }

            let completed = index + 1;
            if completed % constants::BATCH_PAUSE_EVERY == 0 && completed < total {
                observer.on_event(
                    &BatchEvent::Paused {
                        duration: constants::BATCH_PAUSE,
                    },
                    &report.stats,
                );
                tokio::time::sleep(constants::BATCH_PAUSE).await;
            }
        }

        guard.complete();
        info!(
            "批量任务完成: Total={}, Success={}, Error={}",
            report.stats.total, report.stats.success, report.stats.error
        );
        observer.on_event(&BatchEvent::Completed, &report.stats);
        Ok(report)
    }
}
