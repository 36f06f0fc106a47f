// src/downloader/sink.rs

use crate::{error::*, models::SavedFile};
use async_trait::async_trait;
use log::{debug, info};
use std::{
    io::{ErrorKind, Write},
    path::{Component, Path, PathBuf},
};
use tempfile::NamedTempFile;

/// 最终的保存位置。同名文件已存在时由实现自行决定新的文件名，不覆盖已有文件。
#[async_trait]
pub trait Sink: Send + Sync {
    async fn save(&self, content: &str, filename: &str) -> AppResult<SavedFile>;
}

/// 保存到本地目录
pub struct FileSink {
    dir: PathBuf,
}

/// 同名文件最多尝试的次数
const MAX_NAME_ATTEMPTS: usize = 1000;

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_unique(dir: &Path, content: &str, filename: &str) -> AppResult<SavedFile> {
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = disambiguated_name(filename, attempt);
            let path = dir.join(&candidate);
            match tmp.persist_noclobber(&path) {
                Ok(_) => {
                    return Ok(SavedFile {
                        filename: candidate,
                        path,
                    });
                }
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    debug!("文件 '{}' 已存在，尝试新的文件名", path.display());
                    tmp = e.file;
                }
                Err(e) => return Err(AppError::from(e)),
            }
        }
        Err(AppError::Sink(format!(
            "'{}' 的同名文件过多，无法分配新的文件名",
            filename
        )))
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn save(&self, content: &str, filename: &str) -> AppResult<SavedFile> {
        ensure_plain_file_name(filename)?;
        let dir = self.dir.clone();
        let content = content.to_string();
        let filename = filename.to_string();
        let saved = tokio::task::spawn_blocking(move || Self::write_unique(&dir, &content, &filename))
            .await
            .map_err(|e| AppError::Sink(format!("写入任务异常结束: {}", e)))?
            .map_err(|e| match e {
                AppError::Sink(_) => e,
                other => AppError::Sink(other.to_string()),
            })?;
        info!("字幕已保存: {}", saved.path.display());
        Ok(saved)
    }
}

/// 文件名只能是单独的一段，不能带目录或 `..`，保证写入位置不会跑出输出目录
fn ensure_plain_file_name(filename: &str) -> AppResult<()> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(()),
        _ => Err(AppError::Sink(format!("非法的文件名: '{}'", filename))),
    }
}

/// `a.txt` -> `a.txt`, `a (1).txt`, `a (2).txt`, ...
fn disambiguated_name(filename: &str, attempt: usize) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, attempt, ext),
        _ => format!("{} ({})", filename, attempt),
    }
}
