use async_trait::async_trait;
use events_domain::event::Event;
use events_domain::eventing::{
    EventHandler, EventListener, EventProducer, EventPublisher, HandlerRegistry, InMemoryTransport,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct CapturingHandler {
    seen: Arc<Mutex<Vec<Event>>>,
}

impl CapturingHandler {
    fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl EventHandler for CapturingHandler {
    fn handler_name(&self) -> &str {
        "capturing"
    }

    async fn consume(&self, event: &Event) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(event.clone());
        Ok(())
    }
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if cond() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached within timeout");
}

#[tokio::test(flavor = "multi_thread")]
async fn book_reserved_flows_from_publisher_to_handler() {
    let transport = Arc::new(InMemoryTransport::default());
    let registry = Arc::new(HandlerRegistry::new());
    let handler = CapturingHandler::new();
    registry.register("BookReserved", Arc::new(handler.clone()));

    let listener = Arc::new(
        EventListener::builder()
            .transport(transport.clone())
            .channel("book.reserved")
            .registry(registry)
            .build(),
    );
    let handle = listener.start();
    wait_until(|| transport.subscriber_count("book.reserved") == 1).await;

    let mut payload = serde_json::Map::new();
    payload.insert("student_id".to_string(), json!("123"));
    payload.insert("book_id".to_string(), json!("456"));
    let published = Event::create("BookReserved", payload.clone());

    EventPublisher::new(transport.clone())
        .publish("book.reserved", &published)
        .await
        .unwrap();

    wait_until(|| handler.seen.lock().unwrap().len() == 1).await;
    let received = handler.seen.lock().unwrap()[0].clone();

    assert_eq!(received, published);
    assert_eq!(received.payload(), &payload);
    assert_eq!(received.version(), "1.0");
    assert!(received.timestamp().ends_with('Z'));

    handle.shutdown();
    handle.join().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn publish_without_subscriber_succeeds_and_message_is_lost() {
    let transport = Arc::new(InMemoryTransport::default());
    let publisher = EventPublisher::new(transport.clone());

    let mut payload = serde_json::Map::new();
    payload.insert("book_id".to_string(), json!("456"));
    publisher
        .publish("book.reserved", &Event::create("BookReserved", payload))
        .await
        .expect("publish should succeed with nobody listening");

    // 晚到的订阅者收不到历史消息
    let registry = Arc::new(HandlerRegistry::new());
    let handler = CapturingHandler::new();
    registry.register("BookReserved", Arc::new(handler.clone()));

    let listener = Arc::new(
        EventListener::builder()
            .transport(transport.clone())
            .channel("book.reserved")
            .registry(registry)
            .build(),
    );
    let handle = listener.start();
    wait_until(|| transport.subscriber_count("book.reserved") == 1).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(handler.seen.lock().unwrap().is_empty());

    handle.shutdown();
    handle.join().await;
}
