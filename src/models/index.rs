//! 指数数据模型
//!
//! 定义 A 股指数相关的数据结构，包括：
//! - 指数基本信息（代码、名称、市场）
//! - 日/周/月K线数据
//! - 实时行情（由最近一根K线派生）

use serde::{Deserialize, Serialize};

/// 指数所属交易所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    /// 上海证券交易所
    SH,
    /// 深圳证券交易所
    SZ,
}

impl Market {
    /// 东方财富 secid 中的市场编号
    pub fn secid_prefix(&self) -> &'static str {
        match self {
            Self::SH => "1",
            Self::SZ => "0",
        }
    }
}

/// 指数基本信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// 指数代码（如 000300）
    pub code: String,
    /// 指数名称（如 沪深300）
    pub name: String,
    /// 所属交易所
    pub market: Market,
}

/// 指数详情，`/info` 接口返回
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexInfo {
    pub code: String,
    pub name: String,
    pub market: Market,
    pub description: String,
}

/// 指数K线数据
///
/// 单个交易周期的 OHLCV 及涨跌幅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 日期（YYYY-MM-DD）
    pub date: String,
    /// 开盘
    pub open: f64,
    /// 最高
    pub high: f64,
    /// 最低
    pub low: f64,
    /// 收盘
    pub close: f64,
    /// 成交量
    pub volume: f64,
    /// 涨跌幅（百分比）
    pub change_pct: f64,
}

/// 实时行情
///
/// 由最近一根日K线改名得到：close -> price，change_pct -> change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeQuote {
    pub code: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    pub volume: f64,
    /// K线日期
    pub timestamp: String,
}

impl RealtimeQuote {
    pub fn from_bar(code: &str, bar: &DailyBar) -> Self {
        Self {
            code: code.to_string(),
            price: bar.close,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            change: bar.change_pct,
            volume: bar.volume,
            timestamp: bar.date.clone(),
        }
    }
}

/// K线周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KlinePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl KlinePeriod {
    /// 东方财富 klt 参数：101 日线，102 周线，103 月线
    pub fn klt(&self) -> &'static str {
        match self {
            Self::Daily => "101",
            Self::Weekly => "102",
            Self::Monthly => "103",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// 数据源返回序列的时间顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOrder {
    /// 从旧到新（实时数据源）
    Ascending,
    /// 从新到旧（模拟数据源）
    Descending,
}

/// K线查询参数
#[derive(Debug, Default, Deserialize)]
pub struct IndexHistoryQuery {
    /// 开始日期（YYYYMMDD）
    pub start_date: Option<String>,
    /// 结束日期（YYYYMMDD）
    pub end_date: Option<String>,
    /// 返回数量限制，默认 100
    pub limit: Option<i64>,
}

/// K线接口响应
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexHistoryResponse {
    pub code: String,
    pub period: KlinePeriod,
    pub count: usize,
    pub data: Vec<DailyBar>,
}
