//! 健康检查相关处理器

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET /health
///
/// 存活探针：不依赖凭据与网络状态，始终返回 200 空响应体
pub async fn get_health() -> impl IntoResponse {
    StatusCode::OK
}
