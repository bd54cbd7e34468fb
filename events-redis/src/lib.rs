//! Redis 传输适配（events-redis）
//!
//! 将 `events-domain` 的 `Transport` 协议绑定到 Redis 的发布/订阅原语：
//! 发布走复用连接上的 PUBLISH，订阅使用专用 pub/sub 连接。
//! 投递语义沿用 Redis pub/sub 本身：无持久化、不向晚到订阅者重放。
//!
mod transport;

pub use transport::RedisTransport;
