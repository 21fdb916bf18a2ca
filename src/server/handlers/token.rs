//! # 令牌交换处理器
//!
//! 校验入站 JSON 形状，委托 Token 交换客户端，把结果映射为响应信封。
//! 交换失败的原始细节只进服务端日志，浏览器只收到通用提示。

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::server::{AppState, response};

/// 入站请求格式错误时返回的提示
const MALFORMED_REQUEST_MESSAGE: &str = "Malformed request, please try again";
/// 交换失败时返回的通用提示
const EXCHANGE_FAILED_MESSAGE: &str =
    "Unexpected error when authenticating with Reddit, please try again";

/// 入站交换请求
#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    /// 一次性授权码，非空
    pub code: String,
}

/// 成功信封中的 data 载荷
#[derive(Debug, Serialize)]
pub struct TokenData {
    /// 提供商颁发的访问令牌
    pub token: String,
}

/// POST /token
///
/// 请求体不合法时直接 400，不触发任何出站调用
pub async fn post_token(
    State(state): State<AppState>,
    payload: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("绑定令牌请求 JSON 失败: {rejection}");
            return response::error(StatusCode::BAD_REQUEST, MALFORMED_REQUEST_MESSAGE);
        }
    };

    if request.code.is_empty() {
        tracing::warn!("令牌请求携带空授权码");
        return response::error(StatusCode::BAD_REQUEST, MALFORMED_REQUEST_MESSAGE);
    }

    match state.exchange_client.exchange(&request.code).await {
        Ok(token) => response::success(TokenData { token }),
        Err(err) => {
            // 提供商侧状态码与响应体细节只记录，不回传
            tracing::error!("获取 Reddit 访问令牌失败: {err}");
            response::error(StatusCode::INTERNAL_SERVER_ERROR, EXCHANGE_FAILED_MESSAGE)
        }
    }
}
