/// 事件核心（内存版）示例
/// 展示 发布器 -> 传输 -> 监听器 -> 处理器 的闭环，
/// 以及未注册类型与坏消息被丢弃、循环继续的行为
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use events_domain::event::Event;
use events_domain::eventing::{
    EventHandler, EventListener, EventProducer, EventPublisher, HandlerRegistry, InMemoryTransport,
    Transport,
};
use serde_json::json;
use std::{sync::Arc, time::Duration};

// ============================================================================
// 示例处理器（EventHandler）
// ============================================================================

struct BookReservedHandler;

#[async_trait]
impl EventHandler for BookReservedHandler {
    fn handler_name(&self) -> &str {
        "book_reserved"
    }

    async fn consume(&self, event: &Event) -> AnyResult<()> {
        println!(
            "handler={} type={} payload={}",
            self.handler_name(),
            event.event_type(),
            serde_json::Value::Object(event.payload().clone())
        );
        Ok(())
    }
}

// ============================================================================
// 工具函数
// ============================================================================

fn mk_event(ty: &str, student_id: &str, book_id: &str) -> Event {
    let mut payload = serde_json::Map::new();
    payload.insert("student_id".to_string(), json!(student_id));
    payload.insert("book_id".to_string(), json!(book_id));
    Event::create(ty, payload)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== 事件核心（内存版）示例 ===\n");

    // Transport & Registry
    let transport = Arc::new(InMemoryTransport::default());
    let registry = Arc::new(HandlerRegistry::new());
    registry.register("BookReserved", Arc::new(BookReservedHandler));

    // Listener
    let listener = Arc::new(
        EventListener::builder()
            .transport(transport.clone())
            .channel("book.reserved")
            .registry(registry)
            .build(),
    );
    let handle = listener.start();
    println!("✅ 监听器已启动");

    // 等待订阅生效后再发布
    while transport.subscriber_count("book.reserved") == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let publisher = EventPublisher::new(transport.clone());
    publisher
        .publish("book.reserved", &mk_event("BookReserved", "123", "456"))
        .await?;
    println!("✅ 已发布 BookReserved(student=123, book=456)");

    // 未注册类型与坏消息：记录日志后丢弃，循环继续
    publisher
        .publish("book.reserved", &mk_event("BookReturned", "123", "456"))
        .await?;
    transport.publish("book.reserved", b"not json").await?;

    publisher
        .publish("book.reserved", &mk_event("BookReserved", "789", "012"))
        .await?;
    println!("✅ 已发布 BookReserved(student=789, book=012)");

    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.shutdown();
    handle.join().await;
    println!("\n✅ 优雅关闭完成");
    Ok(())
}
