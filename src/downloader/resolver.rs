// src/downloader/resolver.rs

use crate::{
    client::ApiClient,
    config::AppConfig,
    constants,
    error::*,
    models::{
        AuthToken, ResolvedResource,
        api::{ApiEnvelope, PlayerData, SubtitleDescriptor, ViewData},
    },
    utils,
};
use log::{debug, info};
use std::sync::Arc;
use url::Url;

/// 视频信息接口中解析出的三个必需字段
#[derive(Debug, Clone, PartialEq, Eq)]
struct VideoMeta {
    aid: u64,
    cid: u64,
    title: String,
}

/// 把 BV 号解析为字幕 JSON 的下载地址: view 接口 -> player 接口 -> 第一条字幕
pub struct SubtitleResolver {
    http_client: Arc<ApiClient>,
    config: Arc<AppConfig>,
}

impl SubtitleResolver {
    pub fn new(http_client: Arc<ApiClient>, config: Arc<AppConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub async fn resolve(&self, key: &str, auth: &AuthToken) -> AppResult<ResolvedResource> {
        let meta = self.fetch_video_meta(key, auth).await?;
        info!(
            "获取 {} ({}) 的信息成功: aid={}, cid={}",
            key,
            utils::truncate_text(&meta.title, constants::TITLE_TRUNCATE_LENGTH),
            meta.aid,
            meta.cid
        );

        let descriptors = self.fetch_subtitle_descriptors(&meta, auth).await?;
        // 固定使用第一条字幕，不做语言挑选
        let first = &descriptors[0];
        debug!(
            "{} 共有 {} 条字幕，使用第一条: {}",
            key,
            descriptors.len(),
            first.lan_doc.as_deref().or(first.lan.as_deref()).unwrap_or("未知语言")
        );
        let raw_url = first
            .subtitle_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                AppError::resolution(ResolutionStage::SubResource, "字幕条目中未找到字幕JSON文件的URL")
            })?;

        Ok(ResolvedResource {
            locator: normalize_locator(raw_url)?,
            title: meta.title,
        })
    }

    async fn fetch_video_meta(&self, key: &str, auth: &AuthToken) -> AppResult<VideoMeta> {
        let envelope: ApiEnvelope<ViewData> = self
            .http_client
            .fetch_json(&self.config.view_api_url, &[("bvid", key.to_string())], Some(auth))
            .await
            .map_err(|e| AppError::resolution(ResolutionStage::Metadata, e))?;

        if envelope.code != constants::api::CODE_OK {
            return Err(AppError::resolution(
                ResolutionStage::Metadata,
                envelope.failure_message("响应数据格式不正确"),
            ));
        }
        let data = envelope.data.unwrap_or_default();
        match (data.aid, data.cid, data.title) {
            (Some(aid), Some(cid), Some(title)) if aid != 0 && cid != 0 && !title.is_empty() => {
                Ok(VideoMeta { aid, cid, title })
            }
            _ => Err(AppError::resolution(
                ResolutionStage::Metadata,
                "响应中缺少 aid/cid/title",
            )),
        }
    }

    async fn fetch_subtitle_descriptors(
        &self,
        meta: &VideoMeta,
        auth: &AuthToken,
    ) -> AppResult<Vec<SubtitleDescriptor>> {
        let query = [("aid", meta.aid.to_string()), ("cid", meta.cid.to_string())];
        let envelope: ApiEnvelope<PlayerData> = self
            .http_client
            .fetch_json(&self.config.player_api_url, &query, Some(auth))
            .await
            .map_err(|e| AppError::resolution(ResolutionStage::SubResource, e))?;

        if envelope.code != constants::api::CODE_OK {
            return Err(AppError::resolution(
                ResolutionStage::SubResource,
                envelope.failure_message("响应数据格式不正确或无字幕信息"),
            ));
        }
        let subtitles = envelope
            .data
            .and_then(|d| d.subtitle)
            .and_then(|s| s.subtitles)
            .unwrap_or_default();
        if subtitles.is_empty() {
            return Err(AppError::resolution(
                ResolutionStage::SubResource,
                "未找到可用字幕条目",
            ));
        }
        Ok(subtitles)
    }
}

/// B站返回的字幕地址常常省略协议 (`//aisubtitle.hdslb.com/...`)，补上 `https:`。
/// 其他形式原样保留，但必须是合法的绝对 URL。
pub fn normalize_locator(raw: &str) -> AppResult<String> {
    let raw = raw.trim();
    let locator = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };
    Url::parse(&locator).map_err(|e| {
        AppError::resolution(
            ResolutionStage::SubResource,
            format!("字幕地址 '{}' 无效: {}", locator, e),
        )
    })?;
    Ok(locator)
}
