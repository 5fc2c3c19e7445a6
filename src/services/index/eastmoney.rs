//! 东方财富指数K线接口实现
//!
//! 对接 https://push2his.eastmoney.com/api/qt/stock/kline/get
//! 对应 akshare 的 index_zh_a_hist()

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{DailyBar, KlinePeriod};

use super::common::{
    format_compact_date, market_for_code, EASTMONEY_KLINE_FIELDS, EASTMONEY_KLINE_SEGMENTS,
    EASTMONEY_UT, SECID_MARKET_IDS,
};
use super::IndexHistoryProvider;

#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}

/// 东方财富行情客户端
pub struct EastMoneyProvider {
    client: Client,
    kline_url: Url,
}

impl EastMoneyProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .gzip(true)
            .build()?;
        let kline_url = kline_url(&config.base_url)?;

        Ok(Self { client, kline_url })
    }

    /// 按一个 secid 拉取K线
    async fn fetch_klines(
        &self,
        secid: &str,
        period: KlinePeriod,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyBar>> {
        log::debug!(
            "请求指数K线 secid={} klt={} {}~{}",
            secid,
            period.klt(),
            start_date,
            end_date
        );

        let response = self
            .client
            .get(self.kline_url.clone())
            .query(&[
                ("secid", secid),
                ("ut", EASTMONEY_UT),
                ("fields1", "f1,f2,f3,f4,f5,f6"),
                ("fields2", EASTMONEY_KLINE_FIELDS),
                ("klt", period.klt()),
                ("fqt", "0"),
                ("beg", start_date),
                ("end", end_date),
            ])
            .header("Referer", "https://quote.eastmoney.com/")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取指数K线失败: {}", response.status()));
        }

        // 按 Content-Type 声明的字符集解码，缺省 UTF-8
        let text = response.text_with_charset("utf-8").await?;

        parse_kline_response(&text)
    }
}

#[async_trait]
impl IndexHistoryProvider for EastMoneyProvider {
    async fn index_history(
        &self,
        code: &str,
        period: KlinePeriod,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyBar>> {
        for secid in secid_candidates(code) {
            let bars = self
                .fetch_klines(&secid, period, start_date, end_date)
                .await?;
            if !bars.is_empty() {
                log::info!("{} 获取到 {} 条K线", secid, bars.len());
                return Ok(bars);
            }
        }

        log::info!("指数 {} 在 {}~{} 无K线数据", code, start_date, end_date);
        Ok(Vec::new())
    }
}

/// secid 候选列表：先按代码前缀推断的市场，再尝试其余市场
fn secid_candidates(code: &str) -> Vec<String> {
    let primary = market_for_code(code).secid_prefix();
    std::iter::once(primary)
        .chain(SECID_MARKET_IDS.iter().copied().filter(|id| *id != primary))
        .map(|id| format!("{}.{}", id, code))
        .collect()
}

/// 在 base_url 的路径后追加K线接口路径，保留代理前缀
fn kline_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("provider.base_url 不能作为基础地址: {}", base_url))?
        .pop_if_empty()
        .extend(EASTMONEY_KLINE_SEGMENTS);
    Ok(url)
}

/// 解析K线响应
///
/// 行格式: "2025-10-24,4613.35,4660.68,4665.21,4606.52,215480000,5.1e11,1.27,1.18,54.34,0.52"
/// 依次为 日期,开盘,收盘,最高,最低,成交量,成交额,振幅,涨跌幅,涨跌额,换手率
fn parse_kline_response(text: &str) -> Result<Vec<DailyBar>> {
    let response: KlineResponse =
        serde_json::from_str(text).map_err(|e| anyhow!("解析K线JSON失败: {}", e))?;

    let Some(data) = response.data else {
        return Ok(Vec::new());
    };

    let bars = data
        .klines
        .iter()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 9 {
                log::warn!("K线字段不足，跳过: {}", line);
                return None;
            }
            Some(DailyBar {
                date: format_compact_date(fields[0]),
                open: fields[1].parse().unwrap_or(0.0),
                close: fields[2].parse().unwrap_or(0.0),
                high: fields[3].parse().unwrap_or(0.0),
                low: fields[4].parse().unwrap_or(0.0),
                volume: fields[5].parse().unwrap_or(0.0),
                change_pct: fields[8].parse().unwrap_or(0.0),
            })
        })
        .collect();

    Ok(bars)
}
