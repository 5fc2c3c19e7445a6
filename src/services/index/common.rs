//! 公共常量和辅助函数

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::models::{get_beijing_time, Market};

// ==================== 东方财富 API 常量 ====================

/// 东方财富历史行情默认地址
pub const EASTMONEY_HIS_BASE_URL: &str = "https://push2his.eastmoney.com";
/// K线接口路径，拼接在 base_url 已有路径之后
pub const EASTMONEY_KLINE_SEGMENTS: [&str; 5] = ["api", "qt", "stock", "kline", "get"];
/// 接口固定 ut 令牌
pub const EASTMONEY_UT: &str = "7eea3edcaed734bea9cbfc24409ed989";
/// 返回的K线字段：日期,开盘,收盘,最高,最低,成交量,成交额,振幅,涨跌幅,涨跌额,换手率
pub const EASTMONEY_KLINE_FIELDS: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61";
/// 依次尝试的 secid 市场编号（1 上交所，0 深交所，2 中证系列）
pub const SECID_MARKET_IDS: [&str; 3] = ["1", "0", "2"];

// ==================== 查询默认值 ====================

/// 未指定开始日期时回溯的天数
pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;
/// 实时行情当日无数据时回溯的天数
pub const REALTIME_FALLBACK_DAYS: i64 = 30;
/// 默认返回条数
pub const DEFAULT_LIMIT: i64 = 100;

static CODE_AFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:sh|sz)?([0-9]{6})(?i:\.(?:sh|sz))?$").expect("指数代码正则无效")
});

/// 北京时间的今天
pub fn beijing_today() -> NaiveDate {
    get_beijing_time().date_naive()
}

/// 今天往前推 `days` 天
pub fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

/// 日期转 YYYYMMDD
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// YYYYMMDD -> YYYY-MM-DD
///
/// 只按位置切分，不校验日期是否合法；长度不是 8 字节的输入原样返回
pub fn format_compact_date(value: &str) -> String {
    if value.len() != 8 || !value.is_ascii() {
        return value.to_string();
    }
    format!("{}-{}-{}", &value[..4], &value[4..6], &value[6..])
}

/// 去掉 `.SH` / `.SZ` 后缀或 `sh` / `sz` 前缀，如 000300.SH -> 000300
pub fn normalize_code(code: &str) -> String {
    let code = code.trim();
    CODE_AFFIX_RE
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// 按代码前缀推断市场：000 开头为上交所，其余为深交所
pub fn market_for_code(code: &str) -> Market {
    if code.starts_with("000") {
        Market::SH
    } else {
        Market::SZ
    }
}
