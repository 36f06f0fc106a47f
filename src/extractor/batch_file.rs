// src/extractor/batch_file.rs

use super::ItemSource;
use crate::{error::*, models::Item, ui::Mark, utils};
use async_trait::async_trait;
use log::{info, warn};
use std::path::PathBuf;

/// 文本文件批量来源。每行一个 BV 号或视频链接，可在其后用空白分隔附加一个标题:
///
/// ```text
/// # 注释行会被忽略
/// BV1xx411c7mD 第一集
/// https://www.bilibili.com/video/BV1GJ411x7h7
/// ```
pub struct BatchFileSource {
    path: PathBuf,
}

impl BatchFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

pub fn parse_batch_lines(content: &str) -> Vec<Item> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (head, rest) = match line.split_once(char::is_whitespace) {
                Some((head, rest)) => (head, rest.trim()),
                None => (line, ""),
            };
            match utils::extract_bvid(head) {
                Some(bvid) => {
                    let display_name = if rest.is_empty() { bvid.clone() } else { rest.to_string() };
                    Some(Item::new(bvid, display_name))
                }
                None => {
                    warn!("跳过无效条目: {}", line);
                    eprintln!("{} 跳过无效条目: {}", Mark::Warn, utils::truncate_text(line, 60));
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ItemSource for BatchFileSource {
    async fn items(&self) -> AppResult<Vec<Item>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            log::error!("读取批量文件 '{}' 失败: {}", self.path.display(), e);
            AppError::from(e)
        })?;
        let items = parse_batch_lines(&content);
        info!("批量文件 '{}' 中共有 {} 个有效条目", self.path.display(), items.len());
        Ok(items)
    }

    fn describe(&self) -> String {
        format!("批量文件 ({})", self.path.display())
    }
}
