// src/constants.rs

use std::time::Duration;

pub const UI_WIDTH: usize = 88;
pub const TITLE_TRUNCATE_LENGTH: usize = 40;
pub const MAX_FILENAME_BYTES: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "subtitles";
pub const UNTITLED: &str = "untitled";
pub const SUBTITLE_EXTENSION: &str = "txt";
pub const COOKIE_DOMAIN: &str = "bilibili.com";
pub const COOKIE_ENV_VAR: &str = "BILI_COOKIE";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 每处理多少个视频后暂停一次
pub const BATCH_PAUSE_EVERY: usize = 10;
pub const BATCH_PAUSE: Duration = Duration::from_secs(1);

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const HELP_COOKIE_GUIDE: &str = r#"
1. 登录 B站: 使用 Chrome / Edge / Firefox 浏览器登录 https://www.bilibili.com
2. 方式一 (推荐): 使用 "Get cookies.txt" 一类的浏览器扩展，
   导出 bilibili.com 的 Cookie 文件，然后通过 --cookie-file 指定该文件。
3. 方式二: 打开开发者工具 (F12 或 Cmd+Opt+I)，切换到“网络” (Network) 标签页，
   刷新页面后任选一个发往 api.bilibili.com 的请求，
   复制请求头中 Cookie 的完整内容，然后通过 --cookie 传入。
4. 也可以设置环境变量 BILI_COOKIE，或加上 --save-cookie 将其保存到本地配置文件。"#;

pub mod api {
    pub const VIEW_URL: &str = "https://api.bilibili.com/x/web-interface/view";
    pub const PLAYER_URL: &str = "https://api.bilibili.com/x/player/wbi/v2";
    /// B站 API 中表示成功的 code
    pub const CODE_OK: i64 = 0;
}

pub mod selectors {
    pub const LIST_CONTAINER: &str = ".action-list-container";
    pub const LIST_ITEM: &str = ".action-list-item-wrap";
    pub const ITEM_TITLE: &str = ".title";
    pub const ITEM_KEY_ATTR: &str = "data-key";
}
