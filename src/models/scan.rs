use super::ResolvedProduct;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 扫码累计记录 (每个扫码值一条)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    #[serde(rename = "barcode")]
    pub scan_code: String,
    pub product: ResolvedProduct,
    /// 自上次重置以来成功扫码次数, 与远程库存无关
    pub counted_quantity: i64,
    pub last_scanned_at: DateTime<Utc>,
}

/// 单次扫码的返回摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub product: String,
    pub barcode: String,
    pub counted: i64,
    pub current_stock: Option<i64>,
    /// 本地计数 - 远程库存, 仅供展示
    pub difference: Option<i64>,
}

impl ScanSummary {
    pub fn from_record(record: &ScanRecord) -> Self {
        let current_stock = record.product.remote_stock;
        Self {
            product: record.product.name.clone(),
            barcode: record.scan_code.clone(),
            counted: record.counted_quantity,
            current_stock,
            difference: current_stock.map(|stock| record.counted_quantity - stock),
        }
    }
}
