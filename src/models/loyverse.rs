//! Loyverse REST API 报文
//!
//! 只声明用到的字段, 其余字段忽略。

use super::{ItemId, StoreId, VariantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Store {
    pub id: StoreId,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreList {
    #[serde(default)]
    pub stores: Vec<Store>,
}

/// 规格记录; 不同接口版本用 `variant_id` 或 `id` 表示规格自身 ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Variant {
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub id: Option<VariantId>,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub sku: Option<String>,
}

impl Variant {
    /// 规格自身的 ID (绝不是所属商品的 ID)
    pub fn identifier(&self) -> Option<&VariantId> {
        self.variant_id.as_ref().or(self.id.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantList {
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryLevel {
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    /// Loyverse 返回小数
    #[serde(default)]
    pub in_stock: f64,
}

impl InventoryLevel {
    /// 四舍五入为整数, 负库存按 0 处理
    pub fn rounded_stock(&self) -> i64 {
        let rounded = self.in_stock.round();
        if rounded.is_finite() && rounded > 0.0 {
            rounded as i64
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryLevelList {
    #[serde(default)]
    pub inventory_levels: Vec<InventoryLevel>,
}

/// 单条库存写入: 把某规格在某门店的库存设为 `stock_after`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryUpdate {
    pub variant_id: VariantId,
    pub store_id: StoreId,
    pub stock_after: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryUpdateRequest {
    pub inventory_levels: Vec<InventoryUpdate>,
}
