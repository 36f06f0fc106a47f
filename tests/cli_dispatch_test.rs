// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

// 每个测试使用独立的 HOME，避免读写真实的配置文件
fn main_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path()).env_remove("BILI_COOKIE");
    cmd
}

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_cookie_help_command() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--cookie-help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cookie-file"));
}

#[test]
fn test_missing_mode_shows_help() {
    let home = tempdir().unwrap();
    main_command(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_cookie_aborts_before_any_request() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--bvid")
        .arg("BV1xx411c7mD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("未找到 B站 Cookie"));
    // 首次运行会创建默认配置文件
    assert!(home.path().join(".bili-sub-dl").join("config.json").is_file());
}

#[test]
fn test_non_video_url_is_rejected() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--url")
        .arg("https://space.bilibili.com/12345")
        .arg("--cookie")
        .arg("SESSDATA=abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("无法从"));
}

#[test]
fn test_html_without_list_reports_no_items() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let page = work.path().join("page.html");
    fs::write(&page, "<html><body><p>nothing here</p></body></html>").unwrap();
    let output = work.path().join("out");

    main_command(&home)
        .arg("--html")
        .arg(&page)
        .arg("--cookie")
        .arg("SESSDATA=abc")
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("未找到可下载的视频列表"));
    // 批次没有开始，输出目录不会被创建
    assert!(!output.exists());
}

#[test]
fn test_save_cookie_writes_config() {
    let home = tempdir().unwrap();
    let work = tempdir().unwrap();
    let list = work.path().join("list.txt");
    fs::write(&list, "# 空列表\n").unwrap();

    main_command(&home)
        .arg("-b")
        .arg(&list)
        .arg("--cookie")
        .arg("SESSDATA=saved")
        .arg("--save-cookie")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cookie 已成功保存至"));

    let config = fs::read_to_string(home.path().join(".bili-sub-dl").join("config.json")).unwrap();
    assert!(config.contains("SESSDATA=saved"));
}

#[test]
fn test_failed_items_give_batch_summary_error() {
    let mut server = mockito::Server::new();
    let view = server
        .mock("GET", "/view")
        .match_query(mockito::Matcher::Any)
        .with_body(r#"{"code":-404,"message":"啥都木有"}"#)
        .create();

    let home = tempdir().unwrap();
    let config_dir = home.path().join(".bili-sub-dl");
    fs::create_dir_all(&config_dir).unwrap();
    let config = serde_json::json!({
        "api": {
            "view_url": format!("{}/view", server.url()),
            "player_url": format!("{}/player", server.url()),
        }
    });
    fs::write(config_dir.join("config.json"), config.to_string()).unwrap();
    let work = tempdir().unwrap();

    main_command(&home)
        .arg("--bvid")
        .arg("BV1xx411c7mD")
        .arg("--cookie")
        .arg("SESSDATA=abc")
        .arg("-o")
        .arg(work.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 个视频的字幕下载失败"))
        .stderr(predicate::str::contains("未知错误").not());
    view.assert();
}
