//! 远程库存平台访问层

pub mod loyverse;

pub use loyverse::LoyverseClient;

use crate::error::UpstreamError;
use crate::models::{InventoryLevel, InventoryUpdate, Item, ItemId, Store, StoreId, Variant};
use async_trait::async_trait;

/// 远程库存平台的逻辑操作
///
/// 所有调用都不重试; 失败原样返回给调用方决定如何处理。
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_stores(&self) -> Result<Vec<Store>, UpstreamError>;

    /// 按 SKU 精确查询规格
    async fn variants_by_sku(&self, sku: &str) -> Result<Vec<Variant>, UpstreamError>;

    /// 按 SKU 精确查询商品
    async fn items_by_sku(&self, sku: &str) -> Result<Vec<Item>, UpstreamError>;

    async fn get_item(&self, item_id: &ItemId) -> Result<Item, UpstreamError>;

    async fn variants_by_item(&self, item_id: &ItemId) -> Result<Vec<Variant>, UpstreamError>;

    async fn inventory_levels(
        &self,
        store_id: &StoreId,
        item_id: &ItemId,
    ) -> Result<Vec<InventoryLevel>, UpstreamError>;

    async fn set_inventory(&self, update: &InventoryUpdate) -> Result<(), UpstreamError>;
}
