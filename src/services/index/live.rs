//! 实时数据源：每次请求都调用外部行情源

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DailyBar, IndexHistoryQuery, KlinePeriod, SeriesOrder};

use super::common::{
    beijing_today, compact_date, days_before, DEFAULT_LOOKBACK_DAYS, REALTIME_FALLBACK_DAYS,
};
use super::{most_recent, IndexDataSource, IndexHistoryProvider};

pub struct LiveIndexSource {
    provider: Arc<dyn IndexHistoryProvider>,
}

impl LiveIndexSource {
    pub fn new(provider: Arc<dyn IndexHistoryProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl IndexDataSource for LiveIndexSource {
    fn service_name(&self) -> &'static str {
        "akindex-live"
    }

    fn order(&self) -> SeriesOrder {
        SeriesOrder::Ascending
    }

    async fn history(
        &self,
        code: &str,
        period: KlinePeriod,
        query: &IndexHistoryQuery,
    ) -> Result<Vec<DailyBar>> {
        let today = beijing_today();
        let start_date = query
            .start_date
            .clone()
            .unwrap_or_else(|| compact_date(days_before(today, DEFAULT_LOOKBACK_DAYS)));
        let end_date = query.end_date.clone().unwrap_or_else(|| compact_date(today));

        self.provider
            .index_history(code, period, &start_date, &end_date)
            .await
    }

    /// 先取当天；当天无数据（休市或盘前）时回溯 30 天取最后一根
    async fn latest_bar(&self, code: &str) -> Result<Option<DailyBar>> {
        let today = beijing_today();
        let today_str = compact_date(today);

        let bars = self
            .provider
            .index_history(code, KlinePeriod::Daily, &today_str, &today_str)
            .await?;
        if let Some(bar) = most_recent(bars, self.order()) {
            return Ok(Some(bar));
        }

        log::debug!("{} 当日无数据，回溯 {} 天", code, REALTIME_FALLBACK_DAYS);
        let start = compact_date(days_before(today, REALTIME_FALLBACK_DAYS));
        let bars = self
            .provider
            .index_history(code, KlinePeriod::Daily, &start, &today_str)
            .await?;

        Ok(most_recent(bars, self.order()))
    }
}
