// tests/pipeline_test.rs

use bili_sub_dl::{
    DownloadJobContext,
    config::AppConfig,
    downloader::{
        BatchOrchestrator, FileSink, ItemPipeline, NoopObserver, SubtitlePipeline,
        SubtitleResolver, SubtitleTransformer,
    },
    error::{AppError, AppResult, ResolutionStage},
    models::{AuthToken, BatchStats, Item, ResolvedResource},
};
use mockito::{Matcher, Server};
use std::{fs, sync::Arc};

const COOKIE: &str = "SESSDATA=abc; bili_jct=def";

fn test_context(server: &Server, output: &std::path::Path) -> AppResult<DownloadJobContext> {
    let mut config = AppConfig::default();
    config.view_api_url = format!("{}/x/web-interface/view", server.url());
    config.player_api_url = format!("{}/x/player/wbi/v2", server.url());
    DownloadJobContext::new(Arc::new(config), output.to_path_buf())
}

async fn mock_view(server: &mut Server, bvid: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/x/web-interface/view")
        .match_query(Matcher::UrlEncoded("bvid".into(), bvid.into()))
        .match_header("cookie", COOKIE)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_player(server: &mut Server, aid: &str, cid: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/x/player/wbi/v2")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("aid".into(), aid.into()),
            Matcher::UrlEncoded("cid".into(), cid.into()),
        ]))
        .match_header("cookie", COOKIE)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn player_body(subtitle_url: &str) -> String {
    format!(
        r#"{{"code":0,"message":"0","data":{{"subtitle":{{"subtitles":[
            {{"lan":"ai-zh","lan_doc":"中文","subtitle_url":"{}"}},
            {{"lan":"en","lan_doc":"English","subtitle_url":"//never.used/en.json"}}
        ]}}}}}}"#,
        subtitle_url
    )
}

#[tokio::test]
async fn test_resolver_prefixes_protocol_relative_locator() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir()?;
    let context = test_context(&server, dir.path())?;

    let view = mock_view(
        &mut server,
        "BVabc1",
        r#"{"code":0,"message":"0","data":{"aid":1,"cid":2,"title":"Test"}}"#,
    )
    .await;
    let player = mock_player(&mut server, "1", "2", &player_body("//x.com/s.json")).await;

    let resolver = SubtitleResolver::new(context.http_client.clone(), context.config.clone());
    let resolved = resolver.resolve("BVabc1", &AuthToken::new(COOKIE)).await?;

    view.assert_async().await;
    player.assert_async().await;
    assert_eq!(
        resolved,
        ResolvedResource {
            locator: "https://x.com/s.json".to_string(),
            title: "Test".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_single_item_end_to_end() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir()?;
    let context = test_context(&server, dir.path())?;

    mock_view(
        &mut server,
        "BVabc1",
        r#"{"code":0,"message":"0","data":{"aid":1,"cid":2,"title":"Test"}}"#,
    )
    .await;
    let subtitle_url = format!("{}/s.json", server.url());
    mock_player(&mut server, "1", "2", &player_body(&subtitle_url)).await;
    // 字幕文件请求不能携带 Cookie
    let resource = server
        .mock("GET", "/s.json")
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"body":[{"from":1.5,"content":"hi"}]}"#)
        .create_async()
        .await;

    let pipeline = SubtitlePipeline::new(&context, FileSink::new(dir.path()));
    let saved = pipeline
        .process(&Item::new("BVabc1", "BVabc1"), &AuthToken::new(COOKIE))
        .await?;

    resource.assert_async().await;
    assert_eq!(saved.filename, "BVabc1+Test.txt");
    assert_eq!(saved.path, dir.path().join("BVabc1+Test.txt"));
    assert_eq!(fs::read_to_string(&saved.path)?, "[1.500] hi\n");
    Ok(())
}

#[tokio::test]
async fn test_transformer_reports_missing_body() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir()?;
    let context = test_context(&server, dir.path())?;

    server
        .mock("GET", "/bad.json")
        .with_status(200)
        .with_body(r#"{"lines":[]}"#)
        .create_async()
        .await;

    let transformer = SubtitleTransformer::new(context.http_client.clone());
    let resource = ResolvedResource {
        locator: format!("{}/bad.json", server.url()),
        title: "Test".into(),
    };
    let err = transformer.transform("BVabc1", &resource).await.unwrap_err();
    assert!(matches!(err, AppError::Transform(_)));
    Ok(())
}

#[tokio::test]
async fn test_rejected_cookie_fails_metadata_stage() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir()?;
    let context = test_context(&server, dir.path())?;

    server
        .mock("GET", "/x/web-interface/view")
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    let resolver = SubtitleResolver::new(context.http_client.clone(), context.config.clone());
    let err = resolver
        .resolve("BVabc1", &AuthToken::new(COOKIE))
        .await
        .unwrap_err();
    match err {
        AppError::Resolution { stage, details } => {
            assert_eq!(stage, ResolutionStage::Metadata);
            assert!(details.contains("Cookie"), "{}", details);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_batch_continues_after_failed_items() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir()?;
    let context = test_context(&server, dir.path())?;

    // BVok1: 正常
    mock_view(
        &mut server,
        "BVok1",
        r#"{"code":0,"data":{"aid":11,"cid":12,"title":"第一集: 开始?"}}"#,
    )
    .await;
    let subtitle_url = format!("{}/ok1.json", server.url());
    mock_player(&mut server, "11", "12", &player_body(&subtitle_url)).await;
    server
        .mock("GET", "/ok1.json")
        .with_status(200)
        .with_body(r#"{"body":[{"from":0,"content":"你好"},{"from":"x","content":"skip"},{"from":2.25,"content":"世界"}]}"#)
        .create_async()
        .await;

    // BVgone: 视频不存在
    mock_view(&mut server, "BVgone", r#"{"code":-404,"message":"啥都木有","ttl":1}"#).await;

    // BVnosub: 没有字幕
    mock_view(
        &mut server,
        "BVnosub",
        r#"{"code":0,"data":{"aid":21,"cid":22,"title":"无字幕"}}"#,
    )
    .await;
    mock_player(
        &mut server,
        "21",
        "22",
        r#"{"code":0,"data":{"subtitle":{"subtitles":[]}}}"#,
    )
    .await;

    let pipeline = SubtitlePipeline::new(&context, FileSink::new(dir.path()));
    let orchestrator = BatchOrchestrator::new(pipeline);
    let items = vec![
        Item::new("BVgone", "不存在"),
        Item::new("BVok1", "第一集"),
        Item::new("BVnosub", "无字幕"),
    ];

    let report = orchestrator
        .run(items, &AuthToken::new(COOKIE), &NoopObserver)
        .await?;

    assert_eq!(report.stats, BatchStats { total: 3, success: 1, error: 2 });
    assert_eq!(report.failures[0].0, "BVgone");
    assert!(report.failures[0].1.contains("啥都木有"));
    assert_eq!(report.failures[1].0, "BVnosub");
    assert!(report.failures[1].1.contains("未找到可用字幕条目"));

    let saved = dir.path().join("BVok1+第一集 开始.txt");
    assert_eq!(fs::read_to_string(saved)?, "[0.000] 你好\n[2.250] 世界\n");
    Ok(())
}
