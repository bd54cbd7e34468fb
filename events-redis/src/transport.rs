//! 基于 Redis pub/sub 的 `Transport` 实现
//!
//! - `connect` 建立客户端、获取发布用连接并 PING，
//!   中间件不可达在启动期即暴露；
//! - `publish`：自动重连的复用连接（ConnectionManager）上执行 PUBLISH；
//! - `subscribe`：专用异步 pub/sub 连接，返回 `'static` 消息流。
//!
use async_trait::async_trait;
use events_domain::error::{EventError, EventResult};
use events_domain::eventing::transport::{MessageStream, Transport};
use futures_util::StreamExt;
use redis::Client;
use redis::aio::ConnectionManager;

/// Redis 传输；通道名即 Redis pub/sub 通道（形如 `book.reserved`）
#[derive(Debug)]
pub struct RedisTransport {
    client: Client,
    publish_conn: ConnectionManager,
}

impl RedisTransport {
    /// 连接 Redis 并验证可达性
    pub async fn connect(url: &str) -> EventResult<Self> {
        let client = Client::open(url)
            .map_err(|e| EventError::transport(format!("failed to create redis client: {e}")))?;

        // 发布端使用断线自动重连的连接
        let mut publish_conn = client.get_connection_manager().await.map_err(|e| {
            EventError::transport(format!("failed to connect to redis at {url}: {e}"))
        })?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut publish_conn)
            .await
            .map_err(|e| EventError::transport(format!("redis ping failed: {e}")))?;
        if pong != "PONG" {
            return Err(EventError::transport("redis ping did not return pong"));
        }

        tracing::info!(url, "redis transport connected");
        Ok(Self {
            client,
            publish_conn,
        })
    }
}

#[async_trait]
impl Transport for RedisTransport {
    async fn publish(&self, channel: &str, payload: &[u8]) -> EventResult<()> {
        let mut conn = self.publish_conn.clone();
        redis::cmd("PUBLISH")
            .arg(channel)
            .arg(payload)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| EventError::transport(format!("redis publish on {channel} failed: {e}")))
    }

    async fn subscribe(&self, channel: &str) -> EventResult<MessageStream> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| EventError::transport(format!("failed to open redis pubsub: {e}")))?;
        pubsub.subscribe(channel).await.map_err(|e| {
            EventError::transport(format!("redis subscribe to {channel} failed: {e}"))
        })?;
        tracing::info!(channel, "subscribed to redis channel");

        let stream = pubsub.into_on_message().map(|msg| {
            msg.get_payload::<Vec<u8>>()
                .map_err(|e| EventError::transport(format!("bad redis message payload: {e}")))
        });
        Ok(Box::pin(stream))
    }

    async fn close(&self) -> EventResult<()> {
        // pub/sub 连接随各自的消息流释放；发布连接随 self 释放
        Ok(())
    }
}
