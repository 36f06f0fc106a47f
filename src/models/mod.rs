// src/models/mod.rs

pub mod api;

use itertools::Itertools;
use std::{fmt, path::PathBuf};

/// 批量任务中的一个条目 (一个视频)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub display_name: String,
}

impl Item {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }
}

/// 请求 B站 API 时附带的 Cookie 字符串
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    /// 按 `name=value; name2=value2` 的格式拼接
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: fmt::Display,
        V: fmt::Display,
    {
        Self(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .join("; "),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} bytes>)", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub locator: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleLine {
    pub offset: Option<f64>,
    pub text: String,
}

/// 转换后的纯文本字幕
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformedContent {
    pub lines: Vec<SubtitleLine>,
}

impl TransformedContent {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line.offset {
                Some(offset) => out.push_str(&format!("[{}] {}\n", format_offset(offset), line.text)),
                None => out.push_str(&format!("{}\n", line.text)),
            }
        }
        out
    }
}

/// 保留三位小数。恰好落在两个候选值正中间时取绝对值较大的一个，
/// 而不是 `{:.3}` 的四舍六入五成双 (与浏览器中 `toFixed(3)` 的输出一致)。
fn format_offset(offset: f64) -> String {
    let magnitude = offset.abs();
    let sign = if offset < 0.0 { "-" } else { "" };
    // 三位小数上的平局必为 m/16 形式，乘 16 与乘 2000 都是精确的
    let is_tie = (magnitude * 16.0).fract() == 0.0 && (magnitude * 2000.0) % 2.0 == 1.0;
    if is_tie {
        let rounded_up = ((magnitude * 2000.0 + 1.0) / 2.0) / 1000.0;
        format!("{}{:.3}", sign, rounded_up)
    } else {
        format!("{}{:.3}", sign, magnitude)
    }
}

/// 转换结果以及由视频 ID 和标题派生出的文件名
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    pub filename: String,
    pub content: TransformedContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub error: usize,
}

impl BatchStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn processed(&self) -> usize {
        self.success + self.error
    }

    pub fn record_success(&mut self) {
        debug_assert!(self.processed() < self.total);
        self.success += 1;
    }

    pub fn record_error(&mut self) {
        debug_assert!(self.processed() < self.total);
        self.error += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.processed() == self.total
    }
}

/// 批量任务结束后的汇总
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub stats: BatchStats,
    /// (视频 ID, 失败原因)
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.stats.error == 0
    }
}
