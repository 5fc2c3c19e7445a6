//! 指数数据服务
//!
//! 两种数据源实现同一套接口：
//! - 实时数据源：每次请求调用东方财富K线接口（akshare `index_zh_a_hist` 的上游）
//! - 模拟数据源：内存中的静态K线表
//!
//! 截断约定：始终保留最近的 N 根K线，保持数据源原有顺序

mod catalog;
mod common;
mod eastmoney;
mod live;
mod mock;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::{DailyBar, IndexHistoryQuery, KlinePeriod, SeriesOrder};

pub use catalog::{index_info, index_name, list_indexes};
pub use common::{
    beijing_today, compact_date, days_before, format_compact_date, market_for_code,
    normalize_code, DEFAULT_LIMIT, EASTMONEY_HIS_BASE_URL,
};
pub use eastmoney::EastMoneyProvider;
pub use live::LiveIndexSource;
pub use mock::MockIndexSource;

/// 外部行情源：给定代码、周期和起止日期（YYYYMMDD），返回按日期升序的K线
#[async_trait]
pub trait IndexHistoryProvider: Send + Sync {
    async fn index_history(
        &self,
        code: &str,
        period: KlinePeriod,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyBar>>;
}

/// HTTP 接口背后的数据源
#[async_trait]
pub trait IndexDataSource: Send + Sync {
    /// 健康检查中展示的服务名
    fn service_name(&self) -> &'static str;

    /// 返回序列的时间顺序
    fn order(&self) -> SeriesOrder;

    /// 完整K线序列（未截断）
    async fn history(
        &self,
        code: &str,
        period: KlinePeriod,
        query: &IndexHistoryQuery,
    ) -> Result<Vec<DailyBar>>;

    /// 最近一根日K线，没有数据时返回 None
    async fn latest_bar(&self, code: &str) -> Result<Option<DailyBar>>;
}

/// 数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Live,
    Mock,
}

impl FromStr for DataSourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "real" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("数据源只支持 live 或 mock: {}", s)),
        }
    }
}

/// 按配置创建数据源
pub fn build_source(config: &AppConfig) -> Result<Arc<dyn IndexDataSource>> {
    match config.source.mode {
        DataSourceMode::Live => {
            let provider = EastMoneyProvider::new(&config.provider)?;
            Ok(Arc::new(LiveIndexSource::new(Arc::new(provider))))
        }
        DataSourceMode::Mock => Ok(Arc::new(MockIndexSource::new())),
    }
}

/// 保留最近的 `limit` 根K线
///
/// 升序序列取末尾，降序序列取开头；负数按 0 处理
pub fn take_most_recent(mut bars: Vec<DailyBar>, order: SeriesOrder, limit: i64) -> Vec<DailyBar> {
    let keep = usize::try_from(limit).unwrap_or(0);
    if bars.len() <= keep {
        return bars;
    }

    match order {
        SeriesOrder::Ascending => bars.split_off(bars.len() - keep),
        SeriesOrder::Descending => {
            bars.truncate(keep);
            bars
        }
    }
}

/// 序列中最近的一根K线
pub fn most_recent(bars: Vec<DailyBar>, order: SeriesOrder) -> Option<DailyBar> {
    match order {
        SeriesOrder::Ascending => bars.into_iter().last(),
        SeriesOrder::Descending => bars.into_iter().next(),
    }
}
