//! 模拟数据源
//!
//! 静态日K线表，按日期从新到旧排列，不支持日期过滤

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{DailyBar, IndexHistoryQuery, KlinePeriod, SeriesOrder};

use super::{most_recent, IndexDataSource};

/// (日期, 开盘, 最高, 最低, 收盘, 成交量, 涨跌幅)
type BarRow = (&'static str, f64, f64, f64, f64, f64, f64);

const MOCK_BARS: [(&str, [BarRow; 5]); 5] = [
    (
        "000300",
        [
            ("2025-10-24", 4613.35, 4665.21, 4606.52, 4660.68, 215_480_000.0, 1.18),
            ("2025-10-23", 4598.10, 4612.77, 4581.20, 4606.34, 198_730_000.0, 0.30),
            ("2025-10-22", 4601.44, 4613.09, 4585.31, 4592.56, 192_160_000.0, -0.33),
            ("2025-10-21", 4552.93, 4610.26, 4550.87, 4607.87, 224_050_000.0, 1.53),
            ("2025-10-20", 4521.69, 4543.18, 4510.42, 4538.22, 187_920_000.0, 0.53),
        ],
    ),
    (
        "000001",
        [
            ("2025-10-24", 3926.28, 3953.46, 3920.01, 3950.31, 582_330_000.0, 0.71),
            ("2025-10-23", 3910.15, 3926.90, 3898.52, 3922.41, 541_870_000.0, 0.22),
            ("2025-10-22", 3915.03, 3921.76, 3899.08, 3913.76, 528_440_000.0, -0.07),
            ("2025-10-21", 3874.60, 3917.02, 3872.15, 3916.33, 596_210_000.0, 1.36),
            ("2025-10-20", 3846.70, 3866.51, 3838.94, 3863.89, 512_690_000.0, 0.63),
        ],
    ),
    (
        "399001",
        [
            ("2025-10-24", 13068.77, 13302.45, 13052.10, 13289.18, 781_520_000.0, 2.02),
            ("2025-10-23", 12960.34, 13041.88, 12917.63, 13025.45, 702_960_000.0, 0.22),
            ("2025-10-22", 13070.12, 13086.57, 12979.40, 12996.61, 688_310_000.0, -0.62),
            ("2025-10-21", 12858.93, 13081.70, 12850.26, 13077.32, 754_180_000.0, 2.06),
            ("2025-10-20", 12720.45, 12829.34, 12701.88, 12813.21, 667_450_000.0, 0.98),
        ],
    ),
    (
        "399006",
        [
            ("2025-10-24", 3078.04, 3175.92, 3074.31, 3171.57, 312_640_000.0, 3.57),
            ("2025-10-23", 3049.85, 3071.22, 3035.67, 3062.16, 268_900_000.0, 0.09),
            ("2025-10-22", 3085.40, 3088.13, 3052.76, 3059.32, 261_370_000.0, -0.79),
            ("2025-10-21", 3008.21, 3086.95, 3005.64, 3083.72, 297_480_000.0, 3.02),
            ("2025-10-20", 2947.83, 3001.56, 2941.27, 2993.45, 254_810_000.0, 1.98),
        ],
    ),
    (
        "000905",
        [
            ("2025-10-24", 7130.26, 7221.04, 7124.88, 7217.53, 168_250_000.0, 1.43),
            ("2025-10-23", 7095.47, 7126.39, 7079.15, 7115.78, 151_630_000.0, 0.17),
            ("2025-10-22", 7138.60, 7146.22, 7092.51, 7103.71, 149_080_000.0, -0.52),
            ("2025-10-21", 7031.45, 7143.97, 7026.30, 7140.84, 172_940_000.0, 1.76),
            ("2025-10-20", 6972.11, 7024.68, 6965.42, 7017.32, 143_570_000.0, 0.85),
        ],
    ),
];

/// 模拟数据源，进程启动后只读
#[derive(Debug, Default)]
pub struct MockIndexSource;

impl MockIndexSource {
    pub fn new() -> Self {
        Self
    }

    /// 指定指数的全部日K线，从新到旧
    pub fn daily_bars(code: &str) -> Option<Vec<DailyBar>> {
        MOCK_BARS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, rows)| {
                rows.iter()
                    .map(|&(date, open, high, low, close, volume, change_pct)| DailyBar {
                        date: date.to_string(),
                        open,
                        high,
                        low,
                        close,
                        volume,
                        change_pct,
                    })
                    .collect()
            })
    }
}

#[async_trait]
impl IndexDataSource for MockIndexSource {
    fn service_name(&self) -> &'static str {
        "akindex-mock"
    }

    fn order(&self) -> SeriesOrder {
        SeriesOrder::Descending
    }

    /// 忽略日期参数；只有日线数据
    async fn history(
        &self,
        code: &str,
        period: KlinePeriod,
        _query: &IndexHistoryQuery,
    ) -> Result<Vec<DailyBar>> {
        if period != KlinePeriod::Daily {
            return Ok(Vec::new());
        }
        Ok(Self::daily_bars(code).unwrap_or_default())
    }

    async fn latest_bar(&self, code: &str) -> Result<Option<DailyBar>> {
        Ok(Self::daily_bars(code).and_then(|bars| most_recent(bars, self.order())))
    }
}
