//! 通用 API 响应模型
//!
//! 列表和详情接口统一包一层 `data`，错误统一为 `{error: message}`

use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use serde::{Deserialize, Serialize};

/// 获取北京时间（UTC+8）
pub fn get_beijing_time() -> chrono::DateTime<chrono_tz::Tz> {
    Utc::now().with_timezone(&Shanghai)
}

/// `{data: ...}` 包装
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    /// 北京时间，RFC 3339
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(service: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            timestamp: get_beijing_time().to_rfc3339(),
        }
    }
}
