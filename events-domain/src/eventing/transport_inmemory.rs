//! 内存版传输（InMemoryTransport）
//!
//! 基于 `tokio::sync::broadcast` 的按通道扇出实现，满足 `Transport` 协议：
//! - `publish`：向通道的全部在线订阅者广播；
//! - `subscribe`：返回 `'static` 生命周期消息流，便于在 `tokio::spawn` 中使用；
//! - 典型用途：测试环境、示例与本地开发。
//!
//! 注意：无订阅者时发送将被忽略（至多一次投递，与无持久化策略一致）。
//!
use crate::error::{EventError, EventResult};
use crate::eventing::transport::{MessageStream, Transport};
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// 简单的内存传输实现
pub struct InMemoryTransport {
    capacity: usize,
    channels: DashMap<String, broadcast::Sender<Vec<u8>>>,
}

impl InMemoryTransport {
    /// 创建内存传输，`capacity` 为每个通道的广播缓冲区容量
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: DashMap::new(),
        }
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<Vec<u8>> {
        self.channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// 通道当前的订阅者数量（测试与示例用）
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .get(channel)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn publish(&self, channel: &str, payload: &[u8]) -> EventResult<()> {
        // 若当前无订阅者，broadcast 的 send 会返回错误，这里视为非致命并忽略
        let _ = self.sender(channel).send(payload.to_vec());
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> EventResult<MessageStream> {
        let rx = self.sender(channel).subscribe();
        let stream =
            BroadcastStream::new(rx).map(|r| r.map_err(|e| EventError::transport(e.to_string())));
        Ok(Box::pin(stream))
    }

    async fn close(&self) -> EventResult<()> {
        self.channels.clear();
        Ok(())
    }
}
