//! 事件生产者（EventProducer）协议与默认发布器
//!
//! 发布端语义为发后不理：除到中间件的一次网络往返外，
//! 不等待也不获取任何订阅者的接收确认；序列化或传输失败
//! 同步返回给调用方，不静默吞掉。
//!
use crate::error::EventResult;
use crate::event::Event;
use crate::eventing::transport::Transport;
use async_trait::async_trait;
use std::sync::Arc;

/// 事件生产者：将事件发布到命名通道
#[async_trait]
pub trait EventProducer: Send + Sync {
    async fn publish(&self, channel: &str, event: &Event) -> EventResult<()>;
}

/// 默认发布器：序列化为线格式后交给传输层
pub struct EventPublisher {
    transport: Arc<dyn Transport>,
}

impl EventPublisher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl EventProducer for EventPublisher {
    async fn publish(&self, channel: &str, event: &Event) -> EventResult<()> {
        let payload = event.to_bytes()?;
        self.transport.publish(channel, &payload).await?;
        tracing::debug!(
            channel,
            event_type = event.event_type(),
            "event published"
        );
        Ok(())
    }
}
