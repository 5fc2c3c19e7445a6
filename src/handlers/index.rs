//! 指数接口处理器
//!
//! ## API 列表
//! - GET /indexes - 支持的指数列表
//! - GET /index/{code}/daily - 日K线
//! - GET /index/{code}/weekly - 周K线
//! - GET /index/{code}/monthly - 月K线
//! - GET /index/{code}/info - 指数详情（仅实时数据源）
//! - GET /index/{code}/realtime - 最新行情

use actix_web::{web, HttpResponse, Result};

use crate::error::ApiError;
use crate::models::{
    DataResponse, IndexHistoryQuery, IndexHistoryResponse, KlinePeriod, RealtimeQuote,
};
use crate::services::index::{
    index_info, list_indexes, normalize_code, take_most_recent, DataSourceMode,
    IndexDataSource, DEFAULT_LIMIT,
};

/// 获取指数列表
///
/// GET /api/v1/indexes
pub async fn get_indexes() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(DataResponse::new(list_indexes())))
}

/// K线公共处理：取数、判空、截断
async fn history_response(
    source: &dyn IndexDataSource,
    code: String,
    period: KlinePeriod,
    query: &IndexHistoryQuery,
) -> Result<HttpResponse, ApiError> {
    let code = normalize_code(&code);
    let bars = source.history(&code, period, query).await?;

    if bars.is_empty() {
        return Err(ApiError::NotFound(format!(
            "未找到指数 {} 的{}数据",
            code,
            period.as_str()
        )));
    }

    let data = take_most_recent(bars, source.order(), query.limit.unwrap_or(DEFAULT_LIMIT));
    Ok(HttpResponse::Ok().json(IndexHistoryResponse {
        code,
        period,
        count: data.len(),
        data,
    }))
}

/// 获取日K线
///
/// GET /api/v1/index/{code}/daily?start_date=20250101&end_date=20251024&limit=100
pub async fn get_daily(
    path: web::Path<String>,
    query: web::Query<IndexHistoryQuery>,
    source: web::Data<dyn IndexDataSource>,
) -> Result<HttpResponse, ApiError> {
    history_response(source.get_ref(), path.into_inner(), KlinePeriod::Daily, &query).await
}

/// GET /api/v1/index/{code}/weekly
pub async fn get_weekly(
    path: web::Path<String>,
    query: web::Query<IndexHistoryQuery>,
    source: web::Data<dyn IndexDataSource>,
) -> Result<HttpResponse, ApiError> {
    history_response(source.get_ref(), path.into_inner(), KlinePeriod::Weekly, &query).await
}

/// GET /api/v1/index/{code}/monthly
pub async fn get_monthly(
    path: web::Path<String>,
    query: web::Query<IndexHistoryQuery>,
    source: web::Data<dyn IndexDataSource>,
) -> Result<HttpResponse, ApiError> {
    history_response(source.get_ref(), path.into_inner(), KlinePeriod::Monthly, &query).await
}

/// 获取指数详情
///
/// GET /api/v1/index/{code}/info
pub async fn get_info(path: web::Path<String>) -> Result<HttpResponse> {
    let code = normalize_code(&path.into_inner());
    Ok(HttpResponse::Ok().json(DataResponse::new(index_info(&code))))
}

/// 获取最新行情
///
/// GET /api/v1/index/{code}/realtime
pub async fn get_realtime(
    path: web::Path<String>,
    source: web::Data<dyn IndexDataSource>,
) -> Result<HttpResponse, ApiError> {
    let code = normalize_code(&path.into_inner());

    match source.latest_bar(&code).await? {
        Some(bar) => Ok(HttpResponse::Ok().json(RealtimeQuote::from_bar(&code, &bar))),
        None => Err(ApiError::NotFound(format!("未找到指数 {} 的行情数据", code))),
    }
}

/// 配置指数相关路由
pub fn config(cfg: &mut web::ServiceConfig, mode: DataSourceMode) {
    let scope = web::scope("/index/{code}")
        .route("/daily", web::get().to(get_daily))
        .route("/weekly", web::get().to(get_weekly))
        .route("/monthly", web::get().to(get_monthly))
        .route("/realtime", web::get().to(get_realtime));

    // 模拟服务不提供详情接口
    let scope = match mode {
        DataSourceMode::Live => scope.route("/info", web::get().to(get_info)),
        DataSourceMode::Mock => scope,
    };

    cfg.route("/indexes", web::get().to(get_indexes)).service(scope);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;

    use crate::handlers;
    use crate::services::index::test_support::{bar, FakeProvider};
    use crate::services::index::{
        DataSourceMode, IndexDataSource, LiveIndexSource, MockIndexSource,
    };

    macro_rules! init_app {
        ($source:expr, $mode:expr) => {{
            let source: Arc<dyn IndexDataSource> = $source;
            test::init_service(
                App::new()
                    .app_data(web::Data::from(source))
                    .configure(|cfg| handlers::config(cfg, $mode)),
            )
            .await
        }};
    }

    fn live(provider: FakeProvider) -> Arc<dyn IndexDataSource> {
        Arc::new(LiveIndexSource::new(Arc::new(provider)))
    }

    fn mock() -> Arc<dyn IndexDataSource> {
        Arc::new(MockIndexSource::new())
    }

    macro_rules! get_json {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let resp = test::call_service($app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    // ==================== 模拟数据源 ====================

    #[actix_web::test]
    async fn test_health() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/health");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "akindex-mock");
        assert!(body["timestamp"].as_str().unwrap().contains("+08:00"));
    }

    #[actix_web::test]
    async fn test_list_indexes() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/indexes");

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 7);
        for item in data {
            assert!(!item["code"].as_str().unwrap().is_empty());
            assert!(!item["name"].as_str().unwrap().is_empty());
            assert!(matches!(item["market"].as_str(), Some("SH") | Some("SZ")));
        }
    }

    #[actix_web::test]
    async fn test_mock_daily_limit() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily?limit=3");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "000300");
        assert_eq!(body["period"], "daily");
        assert_eq!(body["count"], 3);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["date"], "2025-10-24");
        assert_eq!(data[0]["close"], 4660.68);
        assert_eq!(data[2]["date"], "2025-10-22");
    }

    #[actix_web::test]
    async fn test_mock_daily_default_limit_and_suffix_code() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/index/000300.SH/daily");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "000300");
        assert_eq!(body["count"], 5);
    }

    #[actix_web::test]
    async fn test_mock_daily_unknown_code() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/index/999999/daily");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_limit_zero_and_negative() {
        let app = init_app!(mock(), DataSourceMode::Mock);

        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily?limit=0");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily?limit=-2");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn test_malformed_limit_is_server_error() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily?limit=abc");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_mock_realtime() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/realtime");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "000300");
        assert_eq!(body["price"], 4660.68);
        assert_eq!(body["change"], 1.18);
        assert_eq!(body["timestamp"], "2025-10-24");

        let (status, body) = get_json!(&app, "/api/v1/index/999999/realtime");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_mock_has_no_info_route() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        let req = test::TestRequest::get().uri("/api/v1/index/000300/info").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_mock_responses_are_identical() {
        let app = init_app!(mock(), DataSourceMode::Mock);
        for uri in ["/api/v1/index/399006/daily?limit=2", "/api/v1/index/000001/realtime"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let first = test::call_and_read_body(&app, req).await;
            let req = test::TestRequest::get().uri(uri).to_request();
            let second = test::call_and_read_body(&app, req).await;
            assert_eq!(first, second, "{}", uri);
        }
    }

    // ==================== 实时数据源 ====================

    #[actix_web::test]
    async fn test_live_daily_keeps_latest_bars() {
        let provider = FakeProvider::new(vec![Ok(vec![
            bar("2025-10-20", 4538.22),
            bar("2025-10-21", 4607.87),
            bar("2025-10-22", 4592.56),
            bar("2025-10-23", 4606.34),
            bar("2025-10-24", 4660.68),
        ])]);
        let app = init_app!(live(provider), DataSourceMode::Live);
        let (status, body) = get_json!(
            &app,
            "/api/v1/index/000300/daily?start_date=20251001&end_date=20251024&limit=2"
        );

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["date"], "2025-10-23");
        assert_eq!(body["data"][1]["date"], "2025-10-24");
    }

    #[actix_web::test]
    async fn test_live_weekly_period() {
        let provider = FakeProvider::new(vec![Ok(vec![bar("2025-10-24", 4660.68)])]);
        let app = init_app!(live(provider), DataSourceMode::Live);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/weekly");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "weekly");
    }

    #[actix_web::test]
    async fn test_live_daily_empty_is_not_found() {
        let app = init_app!(live(FakeProvider::new(vec![Ok(vec![])])), DataSourceMode::Live);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_live_provider_failure_is_server_error() {
        let provider = FakeProvider::new(vec![Err("获取指数K线失败: 502 Bad Gateway".to_string())]);
        let app = init_app!(live(provider), DataSourceMode::Live);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/daily");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "获取指数K线失败: 502 Bad Gateway");
    }

    #[actix_web::test]
    async fn test_live_realtime_fallback() {
        let provider = FakeProvider::new(vec![
            Ok(vec![]),
            Ok(vec![bar("2025-10-23", 4606.34), bar("2025-10-24", 4660.68)]),
        ]);
        let app = init_app!(live(provider), DataSourceMode::Live);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/realtime");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 4660.68);
        assert_eq!(body["timestamp"], "2025-10-24");
    }

    #[actix_web::test]
    async fn test_live_realtime_not_found() {
        let app = init_app!(live(FakeProvider::new(vec![])), DataSourceMode::Live);
        let (status, body) = get_json!(&app, "/api/v1/index/000300/realtime");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_live_info() {
        let app = init_app!(live(FakeProvider::new(vec![])), DataSourceMode::Live);

        let (status, body) = get_json!(&app, "/api/v1/index/000300/info");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["code"], "000300");
        assert_eq!(body["data"]["name"], "沪深300");
        assert_eq!(body["data"]["market"], "SH");
        assert!(body["data"]["description"].is_string());

        let (_, body) = get_json!(&app, "/api/v1/index/399673/info");
        assert_eq!(body["data"]["market"], "SZ");
    }

    #[actix_web::test]
    async fn test_live_health_service_name() {
        let app = init_app!(live(FakeProvider::new(vec![])), DataSourceMode::Live);
        let (_, body) = get_json!(&app, "/health");
        assert_eq!(body["service"], "akindex-live");
    }
}
