// src/downloader/transformer.rs

use crate::{
    client::ApiClient,
    error::*,
    models::{ResolvedResource, SubtitleDocument, SubtitleLine, TransformedContent},
    utils,
};
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// 下载字幕 JSON (`{"body":[{"from":1.5,"content":"..."}]}`) 并转换为纯文本
pub struct SubtitleTransformer {
    http_client: Arc<ApiClient>,
}

impl SubtitleTransformer {
    pub fn new(http_client: Arc<ApiClient>) -> Self {
        Self { http_client }
    }

    pub async fn transform(
        &self,
        key: &str,
        resource: &ResolvedResource,
    ) -> AppResult<SubtitleDocument> {
        // 字幕文件托管在 CDN 上，不需要 Cookie
        let payload: Value = self
            .http_client
            .fetch_json(&resource.locator, &[], None)
            .await
            .map_err(|e| AppError::Transform(format!("获取字幕JSON文件失败: {}", e)))?;

        let content = transform_payload(&payload)?;
        debug!("{} 的字幕共 {} 行", key, content.lines.len());
        Ok(SubtitleDocument {
            filename: utils::subtitle_filename(key, &resource.title),
            content,
        })
    }
}

/// `from` 不是数字或 `content` 不是字符串的条目会被直接跳过
pub fn transform_payload(payload: &Value) -> AppResult<TransformedContent> {
    let body = payload
        .get("body")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Transform("字幕JSON内容格式不正确 (缺少 body 数组)".into()))?;

    let lines: Vec<SubtitleLine> = body
        .iter()
        .filter_map(|entry| {
            let offset = entry.get("from").and_then(Value::as_f64)?;
            let text = entry.get("content").and_then(Value::as_str)?;
            Some(SubtitleLine {
                offset: Some(offset),
                text: text.to_string(),
            })
        })
        .collect();

    if lines.is_empty() {
        return Err(AppError::Transform(
            "未能从字幕数据中提取有效内容，或字幕为空".into(),
        ));
    }
    Ok(TransformedContent { lines })
}
