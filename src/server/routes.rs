//! # 路由配置
//!
//! 定义所有API路由和路由组织

use axum::Router;
use axum::routing::{get, post};

use super::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查路由
        .route("/health", get(crate::server::handlers::health::get_health))
        // 令牌交换路由
        .route("/token", post(crate::server::handlers::token::post_token))
        .with_state(state)
}
