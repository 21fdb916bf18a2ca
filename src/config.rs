//! # 应用配置
//!
//! 进程启动时从环境变量构建一次的不可变配置。核心逻辑只接受注入的
//! 配置引用，不做任何全局查找；凭据缺失时快速失败，进程拒绝启动。

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AuthorizerError, Result};

/// dev 环境默认的本地凭据文件
const DEFAULT_CREDENTIALS_FILE: &str = "credentials.dev.toml";

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 允许的CORS源地址（前端源）
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// 提供商配置（Reddit）
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 令牌端点
    pub token_url: String,
    /// 注册时登记的回调地址，必须与提供商侧登记值完全一致
    pub redirect_uri: String,
    /// 出站请求的 User-Agent（Reddit 对缺省 UA 限流或拒绝）
    pub user_agent: String,
    /// 出站请求超时（秒）
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token_url: "https://www.reddit.com/api/v1/access_token".to_string(),
            redirect_uri: "localhost:3000/authorization".to_string(),
            user_agent: "Reddit Locker Server".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// 机密客户端凭据
///
/// 启动后只读；secret 不出现在任何响应或日志中
#[derive(Clone)]
pub struct Credentials {
    /// 客户端标识
    pub client_id: String,
    /// 客户端密钥
    pub client_secret: String,
}

// 手动实现 Debug，secret 一律脱敏
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// dev 凭据文件结构
#[derive(Debug, Default, Deserialize)]
struct CredentialFile {
    client_id: Option<String>,
    client_secret: Option<String>,
}

/// 应用主配置结构
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 提供商配置
    pub provider: ProviderConfig,
    /// 机密客户端凭据
    pub credentials: Credentials,
}

impl AppConfig {
    /// 从进程环境构建配置（启动时调用一次）
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// 由显式变量映射构建配置
    ///
    /// `from_env` 的可测试形式，映射即进程环境的快照。
    /// `ENVIRONMENT=dev` 时先加载本地凭据文件，环境变量仍然优先。
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let file_creds = if vars.get("ENVIRONMENT").map(String::as_str) == Some("dev") {
            let path = vars
                .get("AUTHORIZER_CREDENTIALS_FILE")
                .map_or(DEFAULT_CREDENTIALS_FILE, String::as_str);
            Self::load_credential_file(Path::new(path))?
        } else {
            CredentialFile::default()
        };

        let credentials = Credentials {
            client_id: vars
                .get("CLIENT_ID")
                .cloned()
                .or(file_creds.client_id)
                .unwrap_or_default(),
            client_secret: vars
                .get("CLIENT_SECRET")
                .cloned()
                .or(file_creds.client_secret)
                .unwrap_or_default(),
        };

        let mut server = ServerConfig::default();
        if let Some(host) = vars.get("AUTHORIZER_HOST") {
            server.host.clone_from(host);
        }
        if let Some(port) = vars.get("AUTHORIZER_PORT") {
            server.port = port.parse().map_err(|e| {
                AuthorizerError::config_with_source(format!("无效的监听端口: {port}"), e)
            })?;
        }
        if let Some(origins) = vars.get("AUTHORIZER_CORS_ORIGINS") {
            server.cors_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        let mut provider = ProviderConfig::default();
        if let Some(token_url) = vars.get("AUTHORIZER_TOKEN_URL") {
            provider.token_url.clone_from(token_url);
        }
        if let Some(redirect_uri) = vars.get("AUTHORIZER_REDIRECT_URI") {
            provider.redirect_uri.clone_from(redirect_uri);
        }

        let config = Self {
            server,
            provider,
            credentials,
        };
        config.validate()?;

        tracing::info!(
            "配置加载完成: listen={}:{}, token_url={}, client_id={}",
            config.server.host,
            config.server.port,
            config.provider.token_url,
            config.credentials.client_id
        );

        Ok(config)
    }

    /// 加载 dev 凭据文件
    ///
    /// dev 环境下文件必须存在，与环境变量缺失一样属于启动失败
    fn load_credential_file(path: &Path) -> Result<CredentialFile> {
        if !path.exists() {
            return Err(AuthorizerError::config(format!(
                "dev 凭据文件不存在: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthorizerError::config_with_source(format!("读取凭据文件失败: {}", path.display()), e)
        })?;

        let creds: CredentialFile = toml::from_str(&content)?;
        Ok(creds)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.credentials.client_id.is_empty() || self.credentials.client_secret.is_empty() {
            return Err(AuthorizerError::config(
                "CLIENT_ID 和 CLIENT_SECRET 必须同时设置",
            ));
        }

        if self.server.port == 0 {
            return Err(AuthorizerError::config("监听端口不能为 0"));
        }

        url::Url::parse(&self.provider.token_url).map_err(|e| {
            AuthorizerError::config_with_source(
                format!("无效的令牌端点: {}", self.provider.token_url),
                e,
            )
        })?;

        Ok(())
    }
}
