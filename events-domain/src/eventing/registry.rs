//! 处理器注册表（HandlerRegistry）
//!
//! 事件类型字符串到处理器的映射：同类型重复注册后写覆盖
//! （last-write-wins），查询未命中返回 `None` 而非错误，
//! 由调用方决定降级策略（如记日志后丢弃）。
//!
//! 将"按类型字符串分发"与传输层解耦后，新增事件种类无需改动
//! 消费循环；注册表规模小，映射查找即可。
//!
use super::handler::EventHandler;
use dashmap::DashMap;
use std::sync::Arc;

/// 读多写少的注册表；注册可与查询并发进行
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<String, Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定处理器；同类型重复注册静默覆盖
    pub fn register(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.handlers.insert(event_type.into(), handler);
    }

    /// 查询处理器；未注册返回 `None`
    pub fn lookup(&self, event_type: &str) -> Option<Arc<dyn EventHandler>> {
        self.handlers.get(event_type).map(|handler| handler.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use async_trait::async_trait;

    struct NamedHandler {
        name: &'static str,
    }

    #[async_trait]
    impl EventHandler for NamedHandler {
        fn handler_name(&self) -> &str {
            self.name
        }

        async fn consume(&self, _event: &Event) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lookup_miss_returns_none() {
        let registry = HandlerRegistry::new();
        assert!(registry.lookup("Unknown").is_none());
    }

    #[test]
    fn register_overwrites_silently() {
        let registry = HandlerRegistry::new();
        registry.register("BookReserved", Arc::new(NamedHandler { name: "first" }));
        registry.register("BookReserved", Arc::new(NamedHandler { name: "second" }));

        let handler = registry.lookup("BookReserved").unwrap();
        assert_eq!(handler.handler_name(), "second");
    }
}
