//! # HTTP 服务器
//!
//! Axum HTTP服务器，向浏览器客户端暴露令牌交换与健康检查接口

pub mod handlers;
pub mod response;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{AuthorizerError, Result};
use crate::oauth::TokenExchangeClient;

/// 服务器应用状态
///
/// 配置启动后只读；交换客户端无状态，可在并发请求间安全克隆，
/// 请求之间没有任何共享可变状态
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Arc<AppConfig>,
    /// Token 交换客户端
    pub exchange_client: TokenExchangeClient,
}

impl AppState {
    /// 创建应用状态
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        let exchange_client = TokenExchangeClient::new(Arc::clone(&config));
        Self {
            config,
            exchange_client,
        }
    }
}

/// 授权服务器
pub struct AuthorizerServer {
    /// 配置
    config: Arc<AppConfig>,
    /// 路由器
    router: Router,
}

impl AuthorizerServer {
    /// 创建新的授权服务器
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let state = AppState::new(Arc::clone(&config));
        let router = Self::create_router(state)?;

        Ok(Self { config, router })
    }

    /// 创建路由器
    fn create_router(state: AppState) -> Result<Router> {
        let cors_layer = Self::create_cors_layer(&state.config)?;

        let app = routes::create_routes(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        );

        Ok(app)
    }

    /// 配置CORS
    ///
    /// 只有配置的前端源可以跨域调用，且跨域只放行 POST（健康探针的
    /// GET 同样放行，供同域工具使用）
    fn create_cors_layer(config: &AppConfig) -> Result<CorsLayer> {
        let origins = config
            .server
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AuthorizerError::config_with_source("无效的 CORS 源配置", e))?;

        Ok(CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(origins))
    }

    /// 启动服务器
    pub async fn serve(self) -> Result<()> {
        let addr = self.bind_address()?;

        tracing::info!("Starting authorizer server on {addr}");

        let listener = TcpListener::bind(&addr).await?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| AuthorizerError::network_with_source("Authorizer server error", e))?;

        Ok(())
    }

    /// 获取绑定地址
    fn bind_address(&self) -> Result<SocketAddr> {
        let ip = self
            .config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| {
                AuthorizerError::config_with_source(
                    format!("无效的监听地址 '{}'", self.config.server.host),
                    e,
                )
            })?;

        Ok(SocketAddr::new(ip, self.config.server.port))
    }

    /// 暴露路由器，供进程内测试直接驱动
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
