//! 消费监听器（EventListener）
//!
//! 订阅单一通道的长驻消费循环：
//! - 解码入站消息为事件，按 `type` 查注册表并在循环内同步调用处理器；
//! - 坏消息、未注册类型、处理器失败均记录日志后继续，循环即隔离边界；
//! - 流断开后按指数退避重连；
//! - `start` 显式启动并返回 `ListenerHandle`，支持关闭与等待，
//!   无任何隐式启动副作用。
//!
//! 并发模型：每个监听器一个 tokio 任务，调度与请求处理路径解耦；
//! 同一通道上的消息按投递顺序串行处理，慢处理器会推迟下一条消息。
//!
use super::registry::HandlerRegistry;
use super::transport::Transport;
use crate::event::Event;
use bon::Builder;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 监听器配置
#[derive(Clone, Copy, Debug)]
pub struct ListenerConfig {
    /// 重连退避的起始间隔
    pub reconnect_initial: Duration,
    /// 重连退避的上限
    pub reconnect_max: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            reconnect_initial: Duration::from_millis(500),
            reconnect_max: Duration::from_secs(30),
        }
    }
}

/// EventListener：
/// - 订阅 Transport 的单一通道
/// - 将消息解码为 Event，按类型分发到注册表中的处理器
#[derive(Builder)]
pub struct EventListener {
    transport: Arc<dyn Transport>,
    #[builder(into)]
    channel: String,
    registry: Arc<HandlerRegistry>,
    #[builder(default)]
    config: ListenerConfig,
}

impl EventListener {
    /// 启动监听循环，返回可用于关闭/等待的句柄
    pub fn start(self: Arc<Self>) -> ListenerHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(Self::listen_loop(self.clone(), token.clone()));

        ListenerHandle {
            token,
            task: Some(task),
        }
    }

    async fn listen_loop(self: Arc<Self>, token: CancellationToken) {
        let mut backoff = self.config.reconnect_initial;

        loop {
            let mut stream = tokio::select! {
                _ = token.cancelled() => break,
                subscribed = self.transport.subscribe(&self.channel) => match subscribed {
                    Ok(stream) => {
                        tracing::info!(channel = %self.channel, "subscribed");
                        backoff = self.config.reconnect_initial;
                        stream
                    }
                    Err(e) => {
                        tracing::warn!(channel = %self.channel, error = %e, "subscribe failed, retrying");
                        if Self::wait_backoff(&token, &mut backoff, self.config.reconnect_max).await {
                            break;
                        }
                        continue;
                    }
                },
            };

            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    maybe_message = stream.next() => {
                        match maybe_message {
                            Some(Ok(payload)) => self.dispatch(&payload).await,
                            Some(Err(e)) => {
                                // 单条消息级别的传输错误：记录后继续收取下一条
                                tracing::warn!(channel = %self.channel, error = %e, "inbound message error");
                            }
                            None => {
                                tracing::warn!(channel = %self.channel, "stream closed, reconnecting");
                                break;
                            }
                        }
                    }
                }
            }

            if Self::wait_backoff(&token, &mut backoff, self.config.reconnect_max).await {
                break;
            }
        }
    }

    /// 退避等待；被取消时返回 true
    async fn wait_backoff(
        token: &CancellationToken,
        backoff: &mut Duration,
        max: Duration,
    ) -> bool {
        let wait = *backoff;
        *backoff = (*backoff * 2).min(max);

        tokio::select! {
            _ = token.cancelled() => true,
            _ = tokio::time::sleep(wait) => false,
        }
    }

    async fn dispatch(&self, payload: &[u8]) {
        let event = match Event::from_bytes(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(channel = %self.channel, error = %e, "dropping malformed message");
                return;
            }
        };

        let Some(handler) = self.registry.lookup(event.event_type()) else {
            tracing::warn!(
                channel = %self.channel,
                event_type = event.event_type(),
                "no handler registered, dropping event"
            );
            return;
        };

        // 事件未携带关联 ID 时为本次分发生成一个，便于日志追踪
        let correlation_id = event
            .correlation_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Err(e) = handler.consume(&event).await {
            tracing::error!(
                handler = handler.handler_name(),
                event_type = event.event_type(),
                %correlation_id,
                error = %e,
                "handler failed, continuing"
            );
        }
    }
}

/// 监听句柄：用于优雅关闭与等待任务结束
pub struct ListenerHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    /// 取消监听循环并解除接收等待
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// 等待监听任务退出
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
