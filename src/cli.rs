// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["url", "bvid", "batch_file", "html", "cookie_help"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 下载单个视频页面的字幕 (例如 https://www.bilibili.com/video/BV...)
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// 通过 BV 号下载单个视频的字幕
    #[arg(long, help_heading = "Mode")]
    pub bvid: Option<String>,
    /// 从文本文件批量下载 (每行一个 BV 号或视频链接，可在其后附加标题)
    #[arg(short, long, value_name = "FILE", help_heading = "Mode")]
    pub batch_file: Option<PathBuf>,
    /// 从保存的合集/列表页面 (HTML) 中批量下载
    #[arg(long, value_name = "FILE", help_heading = "Mode")]
    pub html: Option<PathBuf>,
    /// 显示如何获取 B站 Cookie 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub cookie_help: bool,

    // --- 下载选项 (Options) ---
    /// 直接提供 Cookie 字符串 (name=value; name2=value2)，优先级最高
    #[arg(long, help_heading = "Options")]
    pub cookie: Option<String>,
    /// 从浏览器导出的 cookies.txt (Netscape 格式) 中读取 Cookie
    #[arg(long, value_name = "FILE", help_heading = "Options")]
    pub cookie_file: Option<PathBuf>,
    /// 将本次使用的 Cookie 保存到本地配置文件
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub save_cookie: bool,
    /// 设置字幕文件保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
