// src/client.rs

use crate::{config::AppConfig, error::*, models::AuthToken};
use log::debug;
use reqwest::{IntoUrl, Response, StatusCode, header};
use serde::de::DeserializeOwned;

/// 对 reqwest 的简单封装：统一 UA、超时以及 Cookie 头。
/// 不做任何重试，失败直接返回给调用方。
#[derive(Clone)]
pub struct ApiClient {
    pub client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get<T: IntoUrl>(
        &self,
        url: T,
        query: &[(&str, String)],
        cookie: Option<&AuthToken>,
    ) -> AppResult<Response> {
        let mut request = self.client.get(url).query(query);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie.as_str());
        }
        let res = request.send().await?;
        if res.status() == StatusCode::UNAUTHORIZED || res.status() == StatusCode::FORBIDDEN {
            return Err(AppError::CookieRejected);
        }
        Ok(res.error_for_status()?)
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        cookie: Option<&AuthToken>,
    ) -> AppResult<T> {
        let res = self.get(url, query, cookie).await?;
        let final_url = res.url().to_string();
        let body = res.text().await?;
        debug!("GET {} -> {} 字节", final_url, body.len());
        serde_json::from_str(&body).map_err(|source| AppError::ApiParseFailed {
            url: final_url,
            source,
        })
    }
}
