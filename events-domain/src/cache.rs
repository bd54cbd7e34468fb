//! 刷新缓存（RefreshCache）
//!
//! 将"模块级全局缓存变量 + TTL"改写为显式组件：状态为
//! `(value, fetched_at)`，时钟可注入，便于用假时钟进行测试；
//! 由持有方构造并注入使用，不依赖任何进程级全局状态。
//! 典型用途：网关侧按 TTL 缓存的凭据集合（如身份提供方的公钥集）。
//!
use crate::error::EventResult;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// 可注入时钟
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// 系统时钟（默认实现）
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 带 TTL 的单值缓存
pub struct RefreshCache<T> {
    state: Mutex<Option<(T, Instant)>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> RefreshCache<T> {
    /// 使用系统时钟创建
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(None),
            ttl,
            clock,
        }
    }

    /// TTL 内返回缓存值；过期或为空时执行 `fetch` 并缓存其结果。
    /// `fetch` 失败时保留已有旧值，错误原样返回给调用方。
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> EventResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = EventResult<T>>,
    {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some((value, fetched_at)) = state.as_ref()
            && now.duration_since(*fetched_at) < self.ttl
        {
            return Ok(value.clone());
        }

        let value = fetch().await?;
        *state = Some((value.clone(), now));
        Ok(value)
    }

    /// 主动失效缓存值
    pub async fn invalidate(&self) {
        *self.state.lock().await = None;
    }
}
