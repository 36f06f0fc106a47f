// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use bili_sub_dl::{cli::Cli, logging, run_from_cli};
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} 用户强制中断程序。", "[!]".yellow());
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "bili-sub-dl".to_string());

    let after_help = format!(
        "示例:\n  # 下载单个视频的字幕\n  {bin} --url \"https://www.bilibili.com/video/BV...\"\n\n  # 从保存的合集页面批量下载\n  {bin} --html list.html --cookie-file cookies.txt\n\n  # 从文本文件批量下载\n  {bin} -b my_list.txt -o ./subs\n\n  # 获取 Cookie 帮助\n  {bin} --cookie-help",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);

    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };
    logging::init_logger(args.log_level);

    if let Err(e) = run_from_cli(args).await {
        log::error!("程序执行出错: {}", e);
        eprintln!("\n{} {}", "[X]".red(), format!("程序执行出错: {}", e).red());
        std::process::exit(1);
    }
}
