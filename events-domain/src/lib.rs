//! 事件通知核心库（events-domain）
//!
//! 提供门户系统之间事件通知所需的基础构件：
//! - 事件模型（`event`）：不可变的领域事件值对象与 JSON 线格式
//! - 事件系统（`eventing`）：生产者/处理器协议、按类型分发的注册表、
//!   通道化传输协议与内存实现、带显式生命周期的消费监听器
//! - 刷新缓存（`cache`）：TTL 缓存组件，时钟可注入
//! - 统一错误（`error`）：序列化、传输与处理器错误的最小必要集合
//!
//! 本 crate 不绑定具体消息中间件，仅定义传输协议与内存实现，
//! 以便在不同中间件（例如 Redis pub/sub）上进行适配实现。
//!
//! 典型用法：
//! 1. 用 `Event::create` 在领域事实发生的时刻构造事件；
//! 2. 通过 `EventPublisher` 将事件发布到命名通道；
//! 3. 实现 `EventHandler` 并注册到 `HandlerRegistry`；
//! 4. 用 `EventListener::start` 启动消费循环，进程退出前通过句柄关闭。
//!
pub mod cache;
pub mod error;
pub mod event;
pub mod eventing;
