//! 领域事件模型
//!
//! `Event` 是一次领域事实的不可变记录：类型、模式版本、UTC 时间戳、
//! 载荷与元数据。构造是获得合法时间戳的唯一途径（调用方不得伪造），
//! 一经构造不再变更，下游消费方只读访问。
//!
//! 线格式为 JSON 对象：`type`/`version`/`timestamp` 为字符串，
//! `payload`/`metadata` 为开放的字符串键映射；`version` 与 `metadata`
//! 在线格式缺省时按默认值补齐。
//!
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EventError, EventResult};

fn default_version() -> String {
    "1.0".to_string()
}

/// 领域事件：`type` 决定分发路由，`metadata` 承载横切上下文（如关联 ID），
/// 核心本身从不解释其内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default = "default_version")]
    version: String,
    timestamp: String,
    payload: Map<String, Value>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl Event {
    /// 以当前 UTC 时间构造事件；版本默认 `"1.0"`，元数据默认为空
    pub fn create(event_type: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self::create_with(event_type, payload, default_version(), None)
    }

    /// 显式指定版本与元数据的构造方式；时间戳仍由构造时刻盖章
    pub fn create_with(
        event_type: impl Into<String>,
        payload: Map<String, Value>,
        version: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            version: version.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            payload,
            metadata: metadata.unwrap_or_default(),
        }
    }

    /// 事件类型（形如 `BookReserved`）
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// 模式版本（用于前向兼容，当前不参与分支）
    pub fn version(&self) -> &str {
        &self.version
    }

    /// 构造时刻的 ISO-8601 UTC 时间戳（以 `Z` 结尾）
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// 元数据中的关联 ID（若生产方携带）
    pub fn correlation_id(&self) -> Option<&str> {
        self.metadata.get("correlation_id").and_then(Value::as_str)
    }

    /// 序列化为 JSON 线格式
    pub fn to_bytes(&self) -> EventResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// 从线格式还原事件，并校验必备字段非空
    pub fn from_bytes(bytes: &[u8]) -> EventResult<Self> {
        let event: Self = serde_json::from_slice(bytes)?;
        if event.event_type.is_empty() {
            return Err(EventError::invalid_event("empty event type"));
        }
        if event.timestamp.is_empty() {
            return Err(EventError::invalid_event("empty timestamp"));
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    fn payload() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("student_id".to_string(), json!("123"));
        map.insert("book_id".to_string(), json!("456"));
        map
    }

    #[test]
    fn create_stamps_defaults() {
        let event = Event::create("BookReserved", payload());

        assert_eq!(event.event_type(), "BookReserved");
        assert_eq!(event.version(), "1.0");
        assert!(event.metadata().is_empty());
        assert!(event.timestamp().ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(event.timestamp()).is_ok());
    }

    #[test]
    fn wire_round_trip_preserves_all_fields() {
        let mut metadata = Map::new();
        metadata.insert("correlation_id".to_string(), json!("cor-1"));
        let event = Event::create_with("BookReserved", payload(), "2.0", Some(metadata));

        let bytes = event.to_bytes().unwrap();
        let decoded = Event::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, event);
        assert_eq!(decoded.timestamp(), event.timestamp());
        assert_eq!(decoded.correlation_id(), Some("cor-1"));
    }

    #[test]
    fn wire_defaults_version_and_metadata_when_omitted() {
        let raw = br#"{"type":"BookReserved","timestamp":"2026-01-01T00:00:00Z","payload":{"book_id":"456"}}"#;
        let event = Event::from_bytes(raw).unwrap();

        assert_eq!(event.version(), "1.0");
        assert!(event.metadata().is_empty());
    }

    #[test]
    fn wire_rejects_missing_required_fields() {
        let missing_type = br#"{"timestamp":"2026-01-01T00:00:00Z","payload":{}}"#;
        assert!(matches!(
            Event::from_bytes(missing_type),
            Err(EventError::Serde { .. })
        ));

        let empty_type = br#"{"type":"","timestamp":"2026-01-01T00:00:00Z","payload":{}}"#;
        assert!(matches!(
            Event::from_bytes(empty_type),
            Err(EventError::InvalidEvent { .. })
        ));

        let not_json = b"not json at all";
        assert!(matches!(
            Event::from_bytes(not_json),
            Err(EventError::Serde { .. })
        ));
    }
}
