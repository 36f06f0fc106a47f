// src/utils.rs

use crate::constants;
use regex::Regex;
use std::sync::LazyLock;

pub static BVID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^BV[0-9a-z]+$").unwrap());
static VIDEO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)video/(BV[0-9a-z]+)").unwrap());
static ILLEGAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]+"#).unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub fn is_bvid(text: &str) -> bool {
    BVID_PATTERN.is_match(text)
}

/// 从视频页面链接 (…/video/BVxxxx/…) 或裸 BV 号中取出 BV 号
pub fn extract_bvid(text: &str) -> Option<String> {
    let text = text.trim();
    if is_bvid(text) {
        return Some(text.to_string());
    }
    VIDEO_URL_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 清理标题中的非法文件名字符。结果为空时返回 "untitled"。
pub fn sanitize_filename(name: &str) -> String {
    let name = ILLEGAL_CHARS_RE.replace_all(name, " ");
    let name = WHITESPACE_RE.replace_all(&name, " ");
    let name = name.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let name = safe_truncate_utf8(name, constants::MAX_FILENAME_BYTES)
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    if name.is_empty() {
        constants::UNTITLED.to_string()
    } else {
        name.to_string()
    }
}

/// `{视频ID}+{清理后的标题}.txt`
pub fn subtitle_filename(key: &str, title: &str) -> String {
    format!(
        "{}+{}.{}",
        key,
        sanitize_filename(title),
        constants::SUBTITLE_EXTENSION
    )
}

fn safe_truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes { return s; }
    let mut i = max_bytes;
    while i > 0 && !s.is_char_boundary(i) { i -= 1; }
    &s[..i]
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}
