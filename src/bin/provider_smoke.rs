//! 行情源连通性测试
//!
//! 直接调用东方财富K线接口，拉取所有内置指数最近几天的日线，打印并保存为 JSON
//!
//! 用法: provider_smoke [输出文件]，回溯天数由 SMOKE_DAYS 指定（默认 10）

use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use env_logger::Env;
use futures::future::join_all;
use serde::Serialize;

use akindex_backend::config::AppConfig;
use akindex_backend::models::{DailyBar, KlinePeriod};
use akindex_backend::services::index::{
    beijing_today, compact_date, days_before, list_indexes, EastMoneyProvider,
    IndexHistoryProvider,
};

const DEFAULT_OUTPUT: &str = "provider_smoke.json";
const DEFAULT_DAYS: i64 = 10;

#[derive(Debug, Serialize)]
struct SmokeResult {
    code: String,
    name: String,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    data: Vec<DailyBar>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let output = env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let days = match env::var("SMOKE_DAYS") {
        Ok(v) => v.parse().with_context(|| format!("SMOKE_DAYS 无效: {}", v))?,
        Err(_) => DEFAULT_DAYS,
    };

    let config = AppConfig::load()?;
    let provider = EastMoneyProvider::new(&config.provider)?;

    let today = beijing_today();
    let start_date = compact_date(days_before(today, days));
    let end_date = compact_date(today);
    println!("📡 请求区间 {} ~ {}，数据源 {}", start_date, end_date, config.provider.base_url);

    let indexes = list_indexes();
    let fetches = indexes.iter().map(|idx| {
        provider.index_history(&idx.code, KlinePeriod::Daily, &start_date, &end_date)
    });
    let outcomes = join_all(fetches).await;

    let mut results = Vec::with_capacity(indexes.len());
    for (idx, outcome) in indexes.into_iter().zip(outcomes) {
        let result = match outcome {
            Ok(bars) => {
                println!("✅ {} {}: {} 条", idx.code, idx.name, bars.len());
                for bar in &bars {
                    println!(
                        "    {}  收盘 {:>10.2}  涨跌幅 {:>6.2}%  成交量 {:.0}",
                        bar.date, bar.close, bar.change_pct, bar.volume
                    );
                }
                SmokeResult {
                    code: idx.code,
                    name: idx.name,
                    count: bars.len(),
                    error: None,
                    data: bars,
                }
            }
            Err(e) => {
                println!("❌ {} {}: {}", idx.code, idx.name, e);
                SmokeResult {
                    code: idx.code,
                    name: idx.name,
                    count: 0,
                    error: Some(e.to_string()),
                    data: Vec::new(),
                }
            }
        };
        results.push(result);
    }

    fs::write(&output, serde_json::to_string_pretty(&results)?)
        .with_context(|| format!("写入 {} 失败", output))?;
    println!("💾 结果已保存到 {}", output);

    if results.iter().all(|r| r.error.is_some()) {
        return Err(anyhow!("所有指数请求均失败"));
    }
    Ok(())
}
