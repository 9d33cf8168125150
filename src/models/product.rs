use serde::{Deserialize, Serialize};
use std::fmt;

/// Loyverse 商品 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Loyverse 规格 (variant) ID, 库存按规格记账
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

/// Loyverse 门店 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(VariantId);
string_id!(StoreId);

/// 远程系统中商品/规格的稳定标识
///
/// `variant_id` 缺失是合法但降级的状态: 这样的记录同步时必须显式失败。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentity {
    pub item_id: ItemId,
    pub variant_id: Option<VariantId>,
}

impl ProductIdentity {
    pub fn new(item_id: ItemId, variant_id: Option<VariantId>) -> Self {
        Self { item_id, variant_id }
    }
}

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// 一次解析得到的商品快照, 创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProduct {
    pub identity: ProductIdentity,
    pub name: String,
    pub category: String,
    /// 远程库存; `None` 表示读取失败 (与真实的 0 库存区分)
    pub remote_stock: Option<i64>,
}
