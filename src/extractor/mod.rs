// src/extractor/mod.rs

pub mod batch_file;
pub mod html_list;
pub mod single;

pub use batch_file::BatchFileSource;
pub use html_list::HtmlListSource;
pub use single::SingleItemSource;

use crate::{error::*, models::Item};
use async_trait::async_trait;

/// 待处理条目的来源。返回空列表表示"没有可处理的内容"，由调用方决定如何处理。
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn items(&self) -> AppResult<Vec<Item>>;

    /// 用于日志和界面提示
    fn describe(&self) -> String;
}
