// src/error.rs

use std::fmt;
use thiserror::Error;

/// 解析阶段，用于区分两次元数据请求各自的失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// 视频信息 (aid / cid / 标题)
    Metadata,
    /// 字幕列表
    SubResource,
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStage::Metadata => write!(f, "获取视频信息失败"),
            ResolutionStage::SubResource => write!(f, "获取字幕元数据失败"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("未找到可下载的视频列表")]
    NoItems,
    #[error("未找到 B站 Cookie，无法进行下载 (使用 --cookie-help 查看获取方法)")]
    CookieMissing,
    #[error("Cookie 无效或已过期")]
    CookieRejected,
    #[error("{stage}: {details}")]
    Resolution {
        stage: ResolutionStage,
        details: String,
    },
    #[error("字幕转换失败: {0}")]
    Transform(String),
    #[error("保存文件失败: {0}")]
    Sink(String),
    #[error("已有批量任务正在运行")]
    BatchInProgress,
    #[error("{0} 个视频的字幕下载失败")]
    BatchFailed(usize),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("临时文件持久化失败: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("无法解析来自 '{url}' 的API响应: {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn resolution(stage: ResolutionStage, details: impl fmt::Display) -> Self {
        AppError::Resolution {
            stage,
            details: details.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_message_carries_stage_and_details() {
        let err = AppError::resolution(ResolutionStage::SubResource, "未找到可用字幕条目");
        assert_eq!(err.to_string(), "获取字幕元数据失败: 未找到可用字幕条目");
    }

    #[test]
    fn test_batch_failed_is_not_reported_as_unknown() {
        assert_eq!(AppError::BatchFailed(3).to_string(), "3 个视频的字幕下载失败");
    }
}
