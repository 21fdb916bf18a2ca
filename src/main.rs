//! # Reddit Authorizer 主程序
//!
//! 面向单页前端的 Reddit OAuth 授权码交换服务

use std::sync::Arc;

use reddit_authorizer::config::AppConfig;
use reddit_authorizer::logging;
use reddit_authorizer::server::AuthorizerServer;

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init_logging(None);

    tracing::info!("Server starting...");

    // 构建不可变配置；凭据缺失时快速失败，进程拒绝启动
    let config = match AppConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("配置加载失败: {e}");
            std::process::exit(1);
        }
    };

    let server = match AuthorizerServer::new(Arc::clone(&config)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("服务器初始化失败: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.serve().await {
        tracing::error!("服务启动失败: {e:?}");
        std::process::exit(1);
    }
}
