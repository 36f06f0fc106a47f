// src/extractor/single.rs

use super::ItemSource;
use crate::{error::*, models::Item, utils};
use async_trait::async_trait;
use log::info;

/// 单个视频: 来自 `--url` 或 `--bvid`
pub struct SingleItemSource {
    input: String,
}

impl SingleItemSource {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[async_trait]
impl ItemSource for SingleItemSource {
    async fn items(&self) -> AppResult<Vec<Item>> {
        let bvid = utils::extract_bvid(&self.input).ok_or_else(|| {
            AppError::UserInputError(format!(
                "无法从 '{}' 中提取 BV 号，请确认这是 B站视频页面链接。",
                utils::truncate_text(&self.input, 60)
            ))
        })?;
        info!("提取 BV 号成功: {}", bvid);
        Ok(vec![Item::new(bvid.clone(), bvid)])
    }

    fn describe(&self) -> String {
        format!("单个视频 ({})", utils::truncate_text(&self.input, 60))
    }
}
