// src/downloader/progress.rs

use super::orchestrator::{BatchEvent, BatchObserver};
use crate::{constants, models::BatchStats, ui::{self, Mark}, utils};
use colored::*;
use indicatif::ProgressBar;

/// 在终端中显示批量进度: 一条进度条 + 每个视频一行带时间戳的状态
pub struct ConsoleObserver {
    pbar: ProgressBar,
}

impl ConsoleObserver {
    pub fn new(total: usize) -> Self {
        Self {
            pbar: ui::new_items_progress_bar(total as u64, "字幕"),
        }
    }

    fn status(&self, mark: Mark, message: String) {
        let line = format!(
            "[{}] {} {}",
            chrono::Local::now().format("%H:%M:%S"),
            mark,
            message
        );
        // 输出不是终端时进度条是隐藏的，println 不会输出任何内容
        if self.pbar.is_hidden() || self.pbar.is_finished() {
            println!("{}", line);
        } else {
            self.pbar.println(line);
        }
    }
}

impl BatchObserver for ConsoleObserver {
    fn on_event(&self, event: &BatchEvent<'_>, stats: &BatchStats) {
        match event {
            BatchEvent::Started => {
                self.status(Mark::Info, format!("找到 {} 个视频，开始下载字幕...", stats.total));
            }
            BatchEvent::ItemSucceeded { index, item, saved } => {
                self.pbar.inc(1);
                self.status(
                    Mark::Ok,
                    format!("({}/{}) {} {}", index + 1, stats.total, item.key, saved.filename),
                );
            }
            BatchEvent::ItemFailed { index, item, error } => {
                self.pbar.inc(1);
                let name = if item.display_name.is_empty() || item.display_name == item.key {
                    String::new()
                } else {
                    format!(" ({})", utils::truncate_text(&item.display_name, constants::TITLE_TRUNCATE_LENGTH))
                };
                self.status(
                    Mark::Error,
                    format!(
                        "({}/{}) {}{} {}",
                        index + 1,
                        stats.total,
                        item.key,
                        name,
                        format!("下载失败: {}", error).red()
                    ),
                );
            }
            BatchEvent::Paused { duration } => {
                self.status(Mark::Pause, format!("暂停 {} 秒...", duration.as_secs()));
            }
            BatchEvent::Completed => {
                self.pbar.finish_and_clear();
                self.status(Mark::Ok, "批量下载完成!".to_string());
                return;
            }
        }
        self.pbar.set_message(format!(
            "{} {}",
            format!("成功 {}", stats.success).green(),
            format!("失败 {}", stats.error).red()
        ));
    }
}
