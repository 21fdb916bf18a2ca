//! # Token 交换逻辑
//!
//! 实现 OAuth 2.0 授权码到访问令牌的一次性交换流程：构建 form 请求、
//! 以机密客户端身份做 HTTP Basic 认证、按固定顺序分类提供商响应。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ExchangeError, ExchangeResult};
use crate::config::AppConfig;

/// 错误详情中保留的响应体片段上限
const BODY_SNIPPET_MAX_CHARS: usize = 256;

/// 发往提供商令牌端点的 form 载荷
///
/// `redirect_uri` 必须与提供商侧登记值完全一致，否则交换被拒绝
#[derive(Debug, Clone, Serialize)]
pub struct RedditTokenRequest {
    /// 固定为 `authorization_code`
    pub grant_type: String,
    /// 前端送来的一次性授权码
    pub code: String,
    /// 登记的回调地址
    pub redirect_uri: String,
}

impl RedditTokenRequest {
    fn new(code: &str, redirect_uri: &str) -> Self {
        Self {
            grant_type: "authorization_code".to_string(),
            code: code.to_string(),
            redirect_uri: redirect_uri.to_string(),
        }
    }
}

/// 令牌响应结构（来自提供商的原始响应）
///
/// 只取 `access_token`，其余提供商字段一律忽略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditTokenResponse {
    /// 提供商颁发的访问令牌；缺失时取空串，由分类逻辑拒绝
    #[serde(default)]
    pub access_token: String,
}

/// Token 交换客户端
///
/// 无状态，持有的配置只读；可在并发请求间安全克隆与共享
#[derive(Debug, Clone)]
pub struct TokenExchangeClient {
    http_client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl TokenExchangeClient {
    /// 创建新的 Token 交换客户端
    ///
    /// 出站超时与 User-Agent 在这里一次性固化到 HTTP 客户端上
    pub fn new(config: Arc<AppConfig>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_seconds))
            .user_agent(config.provider.user_agent.clone())
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            config,
        }
    }

    /// 交换授权码获取访问令牌
    ///
    /// 单次尝试，不重试：授权码一次性有效，携带同一 code 的重试
    /// 必然在提供商侧失败。
    pub async fn exchange(&self, code: &str) -> ExchangeResult<String> {
        let request = RedditTokenRequest::new(code, &self.config.provider.redirect_uri);

        self.send_token_request(&request).await
    }

    /// 发送 Token 请求并分类响应
    ///
    /// 分类顺序：非 200 状态 → Provider；响应体不是 JSON → Parse；
    /// `access_token` 为空 → Provider；否则成功。
    async fn send_token_request(&self, request: &RedditTokenRequest) -> ExchangeResult<String> {
        tracing::debug!(
            "发送 token exchange 请求: url={}, grant_type={}, redirect_uri={}",
            self.config.provider.token_url,
            request.grant_type,
            request.redirect_uri
        );

        let response = self
            .http_client
            .post(&self.config.provider.token_url)
            .basic_auth(
                &self.config.credentials.client_id,
                Some(&self.config.credentials.client_secret),
            )
            .header("Accept", "application/json")
            .form(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("token exchange 响应: status={status}, body={body}");

        if status != reqwest::StatusCode::OK {
            return Err(ExchangeError::provider(status.as_u16(), body_snippet(&body)));
        }

        let parsed: RedditTokenResponse = serde_json::from_str(&body)
            .map_err(|e| ExchangeError::parse(format!("无法解析令牌响应: {e}")))?;

        if parsed.access_token.is_empty() {
            return Err(ExchangeError::provider(status.as_u16(), "no token returned"));
        }

        Ok(parsed.access_token)
    }
}

/// 截取响应体片段，用于错误详情与日志
fn body_snippet(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_MAX_CHARS {
        body.to_string()
    } else {
        body.chars().take(BODY_SNIPPET_MAX_CHARS).collect()
    }
}
