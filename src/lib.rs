//! A 股指数行情服务
//!
//! 提供指数K线和最新行情的 RESTful API
//! 数据来源：东方财富（实时）或内置静态数据（模拟）

pub mod config;   // 配置
pub mod error;    // 错误类型
pub mod handlers; // HTTP 请求处理器
pub mod models;   // 数据模型定义
pub mod services; // 业务逻辑服务
