// src/config/cookie.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
    models::AuthToken,
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

pub(crate) fn load_or_create_external_config() -> AppResult<ExternalConfig> {
    let config_path = get_config_path()?;
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

pub fn save_cookie(cookie: &AuthToken) -> AppResult<()> {
    if cookie.is_empty() {
        return Ok(());
    }

    let config_path = get_config_path()?;
    let mut config = load_or_create_external_config()?;

    config.cookie = Some(cookie.as_str().to_string());

    let json_content = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json_content)
        .with_context(|| format!("保存 Cookie 到 '{}' 失败", config_path.display()))?;

    info!("用户已将 Cookie 保存至配置文件: {}", config_path.display());
    println!(
        "{} Cookie 已成功保存至: {}",
        crate::ui::Mark::Info,
        config_path.display()
    );

    Ok(())
}

fn load_cookie_from_config() -> Option<String> {
    load_or_create_external_config()
        .ok()
        .and_then(|config| config.cookie)
}

/// 判断 cookie 所属域名是否属于 `domain` (包括其子域名)
fn domain_matches(cookie_domain: &str, domain: &str) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.').to_ascii_lowercase();
    cookie_domain == domain || cookie_domain.ends_with(&format!(".{}", domain))
}

/// 解析浏览器导出的 Netscape 格式 cookies.txt，只保留属于 `domain` 的条目。
///
/// 每行 7 个字段，以制表符分隔:
/// `domain  include_subdomains  path  secure  expires  name  value`
pub fn parse_netscape_cookies(content: &str, domain: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim_end_matches(['\r', '\n']);
            // HttpOnly 的条目以 "#HttpOnly_" 开头，不是注释
            let line = line.strip_prefix("#HttpOnly_").unwrap_or(line);
            if line.trim().is_empty() || line.starts_with('#') {
                return None;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 7 || !domain_matches(fields[0], domain) {
                return None;
            }
            let name = fields[5].trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), fields[6].trim().to_string()))
        })
        .collect()
}

pub fn load_cookie_file(path: &Path) -> AppResult<AuthToken> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取 Cookie 文件 '{}' 失败", path.display()))?;
    let pairs = parse_netscape_cookies(&content, constants::COOKIE_DOMAIN);
    debug!("从 '{}' 中读取到 {} 个 Cookie", path.display(), pairs.len());
    Ok(AuthToken::from_pairs(pairs))
}

/// 按优先级查找 Cookie: 命令行参数 > Cookie 文件 > 环境变量 > 本地配置文件
pub fn resolve_cookie(
    cli_cookie: Option<&str>,
    cookie_file: Option<&Path>,
) -> AppResult<(Option<AuthToken>, String)> {
    if let Some(cookie) = cli_cookie
        && !cookie.trim().is_empty()
    {
        debug!("使用来自命令行参数的 Cookie");
        return Ok((Some(AuthToken::new(cookie.trim())), "命令行参数".to_string()));
    }
    if let Some(path) = cookie_file {
        let token = load_cookie_file(path)?;
        if !token.is_empty() {
            debug!("使用来自 Cookie 文件的 Cookie");
            return Ok((Some(token), format!("Cookie 文件 ({})", path.display())));
        }
        debug!("Cookie 文件 '{}' 中没有 {} 的条目", path.display(), constants::COOKIE_DOMAIN);
    }
    if let Ok(cookie) = std::env::var(constants::COOKIE_ENV_VAR)
        && !cookie.trim().is_empty()
    {
        debug!("使用来自环境变量 {} 的 Cookie", constants::COOKIE_ENV_VAR);
        return Ok((
            Some(AuthToken::new(cookie.trim())),
            format!("环境变量 ({})", constants::COOKIE_ENV_VAR),
        ));
    }
    if let Some(cookie) = load_cookie_from_config()
        && !cookie.trim().is_empty()
    {
        debug!("使用来自本地配置文件的 Cookie");
        return Ok((Some(AuthToken::new(cookie.trim())), "本地配置文件".to_string()));
    }
    debug!("未在任何位置找到可用的 Cookie");
    Ok((None, "未找到".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAR: &str = "# Netscape HTTP Cookie File\n\
        .bilibili.com\tTRUE\t/\tFALSE\t1999999999\tbuvid3\tXYZ\n\
        #HttpOnly_.bilibili.com\tTRUE\t/\tTRUE\t1999999999\tSESSDATA\tabc%2C123\n\
        .example.com\tTRUE\t/\tFALSE\t1999999999\ttracker\tnope\n\
        www.bilibili.com\tFALSE\t/\tFALSE\t1999999999\tbili_jct\tdef\n\
        notbilibili.com\tFALSE\t/\tFALSE\t1999999999\tfake\tno\n\
        broken line without tabs\n";

    #[test]
    fn test_parse_netscape_keeps_only_domain_cookies() {
        let pairs = parse_netscape_cookies(JAR, "bilibili.com");
        assert_eq!(
            pairs,
            vec![
                ("buvid3".to_string(), "XYZ".to_string()),
                ("SESSDATA".to_string(), "abc%2C123".to_string()),
                ("bili_jct".to_string(), "def".to_string()),
            ]
        );
        assert_eq!(
            AuthToken::from_pairs(pairs).as_str(),
            "buvid3=XYZ; SESSDATA=abc%2C123; bili_jct=def"
        );
    }

    #[test]
    fn test_domain_matching() {
        assert!(domain_matches(".bilibili.com", "bilibili.com"));
        assert!(domain_matches("api.bilibili.com", "bilibili.com"));
        assert!(!domain_matches("notbilibili.com", "bilibili.com"));
    }

    #[test]
    fn test_cli_cookie_has_highest_priority() {
        let (token, source) = resolve_cookie(Some(" SESSDATA=1 "), None).unwrap();
        assert_eq!(token.unwrap().as_str(), "SESSDATA=1");
        assert_eq!(source, "命令行参数");
    }

    #[test]
    fn test_cookie_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.txt");
        fs::write(&path, JAR).unwrap();
        let (token, _) = resolve_cookie(None, Some(path.as_path())).unwrap();
        assert!(token.unwrap().as_str().starts_with("buvid3=XYZ"));
    }
}
