// src/extractor/html_list.rs

use super::ItemSource;
use crate::{constants::selectors, error::*, models::Item, utils};
use async_trait::async_trait;
use log::{debug, info, warn};
use scraper::{Html, Selector};
use std::{path::PathBuf, sync::LazyLock};

static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::LIST_CONTAINER).unwrap());
static ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::LIST_ITEM).unwrap());
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::ITEM_TITLE).unwrap());

/// 从浏览器保存下来的合集/列表页面中读取视频列表
pub struct HtmlListSource {
    path: PathBuf,
}

impl HtmlListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// 在第一个列表容器内查找所有条目，`data-key` 缺失或不是 BV 号的节点会被过滤掉
pub fn parse_list_page(html: &str) -> Vec<Item> {
    let document = Html::parse_document(html);
    let Some(container) = document.select(&CONTAINER_SEL).next() else {
        warn!("页面中未找到列表容器 '{}'", selectors::LIST_CONTAINER);
        return Vec::new();
    };

    container
        .select(&ITEM_SEL)
        .filter_map(|node| {
            let key = node
                .value()
                .attr(selectors::ITEM_KEY_ATTR)
                .map(str::trim)
                .filter(|k| !k.is_empty())?;
            if !utils::is_bvid(key) {
                warn!("跳过 data-key 不是 BV 号的条目: {}", utils::truncate_text(key, 60));
                return None;
            }
            let title = node
                .select(&TITLE_SEL)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            debug!("列表条目: {} ({})", key, title);
            Some(Item::new(key, title))
        })
        .collect()
}

#[async_trait]
impl ItemSource for HtmlListSource {
    async fn items(&self) -> AppResult<Vec<Item>> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        let items = parse_list_page(&html);
        info!("页面 '{}' 中共找到 {} 个视频", self.path.display(), items.len());
        Ok(items)
    }

    fn describe(&self) -> String {
        format!("列表页面 ({})", self.path.display())
    }
}
