//! A 股指数行情服务
//!
//! 提供指数K线和最新行情的 RESTful API
//! 数据来源：东方财富（实时）或内置静态数据（模拟）

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use akindex_backend::config::AppConfig;
use akindex_backend::handlers;
use akindex_backend::services::index::{build_source, IndexDataSource};

/// 应用程序入口
///
/// 默认监听 0.0.0.0:5001，可通过 PORT 环境变量或 config.json 修改
#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(|e| io::Error::other(format!("{:#}", e)))?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match &config.loaded_from {
        Some(path) => log::info!("从 {} 加载配置成功", path.display()),
        None => log::info!("使用默认配置"),
    }

    let source = build_source(&config).map_err(|e| io::Error::other(e.to_string()))?;
    let mode = config.source.mode;
    let data = web::Data::from(source);

    log::info!(
        "启动 {} 服务，数据源: {:?}，监听 {}",
        data.service_name(),
        mode,
        config.bind_addr()
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(data.clone())
            .configure(|cfg| handlers::config(cfg, mode)) // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
