//! HTTP 边界错误
//!
//! 只有两类：查无数据（404）与上游/内部失败（500），响应体统一为 `{error: message}`

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 代码或日期区间没有数据
    #[error("{0}")]
    NotFound(String),

    /// 数据源调用失败或处理过程中的其他异常
    #[error("{0}")]
    Upstream(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::NotFound(msg) => log::warn!("查无数据: {}", msg),
            Self::Upstream(msg) => log::error!("请求处理失败: {}", msg),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
