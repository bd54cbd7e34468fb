//! 事件子系统（eventing）
//!
//! 提供事件发布/订阅与处理的协议与运行时：
//! - `EventProducer` / `EventHandler`：发布与消费的统一抽象；
//! - `HandlerRegistry`：事件类型到处理器的注册表（后写覆盖）；
//! - `Transport`：通道化发布/订阅的传输协议（外部中间件契约）；
//! - `InMemoryTransport`：基于 broadcast 的内存实现；
//! - `EventListener`：订阅、解码、按类型分发的长驻消费循环。
//!
//! 该模块仅定义协议与消费运行时，不绑定具体传输实现，
//! 可对接任意具备通道扇出能力的消息系统或内存实现。
//!
pub mod handler;
pub mod listener;
pub mod producer;
pub mod registry;
pub mod transport;
pub mod transport_inmemory;

pub use handler::EventHandler;
pub use listener::{EventListener, ListenerConfig, ListenerHandle};
pub use producer::{EventProducer, EventPublisher};
pub use registry::HandlerRegistry;
pub use transport::{MessageStream, Transport};
pub use transport_inmemory::InMemoryTransport;
