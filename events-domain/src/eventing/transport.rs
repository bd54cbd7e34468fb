//! 传输协议（Transport）
//!
//! 对外部发布/订阅中间件的最小契约：按通道名发布原始字节、
//! 订阅得到 `'static` 生命周期的入站字节流、关闭连接。
//! 通道名为扁平字符串（约定 `<domain>.<action>`，如 `book.reserved`），
//! 大小写敏感，发布与订阅使用同一名称。
//!
//! 传输语义为尽力而为的扇出：无持久化、无重放，晚到的订阅者
//! 收不到历史消息。
//!
use crate::error::EventResult;
use async_trait::async_trait;
use futures_core::stream::BoxStream;

/// 入站消息流：每项为一条原始线格式消息
pub type MessageStream = BoxStream<'static, EventResult<Vec<u8>>>;

/// 传输协议：任何具备通道扇出能力的中间件均可实现
#[async_trait]
pub trait Transport: Send + Sync {
    /// 向通道发布一条消息，投递给当前全部订阅者；
    /// 无订阅者时发布仍然成功，消息即丢失
    async fn publish(&self, channel: &str, payload: &[u8]) -> EventResult<()>;

    /// 订阅通道，返回可在 `tokio::spawn` 中消费的 `'static` 消息流
    async fn subscribe(&self, channel: &str) -> EventResult<MessageStream>;

    /// 释放底层连接
    async fn close(&self) -> EventResult<()>;
}
