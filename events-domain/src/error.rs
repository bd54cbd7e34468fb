//! 统一错误定义
//!
//! 聚焦线格式编解码、传输与处理器执行的最小必要集合，
//! 便于在各适配层统一转换为 `EventError`。
//!
//! 未注册处理器不是错误：它表现为注册表查询未命中，由消费循环
//! 记录日志后丢弃该消息。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    // --- 线格式 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid event: {reason}")]
    InvalidEvent { reason: String },

    // --- 传输 ---
    #[error("transport error: {reason}")]
    Transport { reason: String },

    // --- 处理器 ---
    #[error("event handler error: handler={handler}, reason={reason}")]
    Handler { handler: String, reason: String },
}

impl EventError {
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn handler(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Handler {
            handler: handler.into(),
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type EventResult<T> = Result<T, EventError>;
