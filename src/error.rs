//! # 错误类型定义
//!
//! 应用级错误统一为 [`AuthorizerError`]；授权码交换自身的错误分类
//! 见 [`crate::oauth::ExchangeError`]

use thiserror::Error;

/// 统一的应用 `Result` 类型
pub type Result<T> = std::result::Result<T, AuthorizerError>;

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum AuthorizerError {
    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        /// 错误描述
        message: String,
        /// 底层来源
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 网络通信错误
    #[error("网络错误: {message}")]
    Network {
        /// 错误描述
        message: String,
        /// 底层来源
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        /// 错误描述
        message: String,
        /// 底层来源
        #[source]
        source: std::io::Error,
    },
}

impl AuthorizerError {
    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建网络错误
    pub fn network<T: Into<String>>(message: T) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的网络错误
    pub fn network_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// 自动转换常见错误类型
impl From<std::io::Error> for AuthorizerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "IO操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for AuthorizerError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML解析失败", err)
    }
}
