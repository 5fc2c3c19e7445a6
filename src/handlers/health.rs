use actix_web::{web, HttpResponse, Result};

use crate::models::HealthResponse;
use crate::services::index::IndexDataSource;

pub async fn health_check(source: web::Data<dyn IndexDataSource>) -> Result<HttpResponse> {
    let response = HealthResponse::ok(source.service_name());
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
