pub mod health;
pub mod index;

use actix_web::web;

use crate::error::ApiError;
use crate::services::index::DataSourceMode;

pub fn config(cfg: &mut web::ServiceConfig, mode: DataSourceMode) {
    // 查询参数解析失败（如 limit=abc）按 500 返回
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Upstream(err.to_string()).into()),
    )
    .configure(health::config)
    .service(web::scope("/api/v1").configure(|cfg| index::config(cfg, mode)));
}
