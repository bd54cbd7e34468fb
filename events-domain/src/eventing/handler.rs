//! 事件处理器（EventHandler）
//!
//! 定义消费某一类型事件的处理逻辑与元信息（名称）。
//!
use crate::event::Event;
use async_trait::async_trait;

/// 事件处理器：处理某一类型的事件
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理器名称（用于失败日志与审计）
    fn handler_name(&self) -> &str;

    /// 消费事件；返回错误由调度边界捕获并记录，不会终止消费循环
    async fn consume(&self, event: &Event) -> anyhow::Result<()>;
}
