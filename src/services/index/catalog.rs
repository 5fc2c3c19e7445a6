//! 指数列表
//!
//! 手工维护的常用 A 股指数，修改需重新部署

use crate::models::{IndexDescriptor, IndexInfo, Market};

use super::common::market_for_code;

/// (代码, 名称, 市场)
const INDEX_CATALOG: [(&str, &str, Market); 7] = [
    ("000001", "上证指数", Market::SH),
    ("000016", "上证50", Market::SH),
    ("000300", "沪深300", Market::SH),
    ("000905", "中证500", Market::SH),
    ("000852", "中证1000", Market::SH),
    ("399001", "深证成指", Market::SZ),
    ("399006", "创业板指", Market::SZ),
];

/// 获取支持的指数列表
pub fn list_indexes() -> Vec<IndexDescriptor> {
    INDEX_CATALOG
        .iter()
        .map(|(code, name, market)| IndexDescriptor {
            code: code.to_string(),
            name: name.to_string(),
            market: *market,
        })
        .collect()
}

/// 按代码查找指数名称
pub fn index_name(code: &str) -> Option<&'static str> {
    INDEX_CATALOG
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

/// 组装指数详情
///
/// 市场由代码前缀推断，不查询交易所
pub fn index_info(code: &str) -> IndexInfo {
    let market = market_for_code(code);
    let name = index_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("指数 {}", code));
    let exchange = match market {
        Market::SH => "上海证券交易所",
        Market::SZ => "深圳证券交易所",
    };

    IndexInfo {
        description: format!("{}（{}），{}发布的 A 股指数", name, code, exchange),
        code: code.to_string(),
        name,
        market,
    }
}
