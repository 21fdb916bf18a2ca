//! # OAuth 授权码交换
//!
//! 面向单一提供商（Reddit）的一次性 code-for-token 交换。
//! 无令牌存储、无刷新、无会话，每次调用彼此独立。

pub mod error;
pub mod token_exchange;

pub use error::{ExchangeError, ExchangeResult};
pub use token_exchange::{RedditTokenRequest, RedditTokenResponse, TokenExchangeClient};
