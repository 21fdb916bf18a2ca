//! OAuth 交换错误处理
//!
//! 定义授权码交换过程中可能出现的各种错误类型。调用方按枚举分支
//! 处理，而不是解析错误消息文本。

use thiserror::Error;

/// 授权码交换专用错误类型
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 网络请求错误（尚未获得提供商响应：连接、超时、传输中断）
    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    /// 提供商返回错误（非 200 状态，或 200 但未返回令牌）
    #[error("提供商错误 (status {status}): {detail}")]
    Provider {
        /// 提供商返回的 HTTP 状态码
        status: u16,
        /// 响应体片段，仅用于服务端日志
        detail: String,
    },

    /// 响应体解析错误（响应体不是合法 JSON）
    #[error("响应解析错误: {0}")]
    Parse(String),
}

impl ExchangeError {
    /// 创建提供商错误
    pub fn provider<S: Into<String>>(status: u16, detail: S) -> Self {
        Self::Provider {
            status,
            detail: detail.into(),
        }
    }

    /// 创建解析错误
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }
}

/// 交换结果类型别名
pub type ExchangeResult<T> = Result<T, ExchangeError>;
