//! # API 响应结构
//!
//! 定义返回给浏览器客户端的标准 JSON 响应信封

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 标准响应信封
///
/// `status` 为 `"success"` 或 `"error"`；成功时携带 `data`，
/// 失败时携带 `message`，缺席的字段不出现在 JSON 中
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<T: Serialize> {
    /// 结果状态
    pub status: String,
    /// 成功载荷
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 面向客户端的提示消息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// # API响应枚举
///
/// 统一所有API出口，方便转换为 `axum::response::Response`
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    /// 成功响应
    Success(T),
    /// 错误响应
    Error(StatusCode, String),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(data) => (
                StatusCode::OK,
                Json(ResponseEnvelope {
                    status: "success".to_string(),
                    data: Some(data),
                    message: None,
                }),
            )
                .into_response(),
            Self::Error(status_code, message) => (
                status_code,
                Json(ResponseEnvelope::<()> {
                    status: "error".to_string(),
                    data: None,
                    message: Some(message),
                }),
            )
                .into_response(),
        }
    }
}

/// # 便捷函数：成功响应
pub fn success<T: Serialize>(data: T) -> Response {
    ApiResponse::Success(data).into_response()
}

/// # 便捷函数：错误响应
pub fn error(status: StatusCode, message: &str) -> Response {
    ApiResponse::<()>::Error(status, message.to_string()).into_response()
}
