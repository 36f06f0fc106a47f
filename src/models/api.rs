// src/models/api.rs

use serde::Deserialize;

// --- 通用结构体 ---

/// B站 API 的统一响应外壳
#[derive(Deserialize, Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// 失败时用于展示的说明，优先使用接口返回的 message
    pub fn failure_message(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(msg) if !msg.is_empty() && msg != "0" => format!("{} (code {})", msg, self.code),
            _ => fallback.to_string(),
        }
    }
}

// --- 视频信息 (view) API 响应结构体 ---

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ViewData {
    #[serde(default)]
    pub aid: Option<u64>,
    #[serde(default)]
    pub cid: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

// --- 播放器 (player) API 响应结构体 ---

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlayerData {
    #[serde(default)]
    pub subtitle: Option<SubtitleInfo>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubtitleInfo {
    #[serde(default)]
    pub subtitles: Option<Vec<SubtitleDescriptor>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubtitleDescriptor {
    #[serde(default)]
    pub subtitle_url: Option<String>,
    #[serde(default)]
    pub lan: Option<String>,
    #[serde(default)]
    pub lan_doc: Option<String>,
}
