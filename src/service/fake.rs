//! 测试用的内存版 Loyverse

use crate::client::InventoryApi;
use crate::error::UpstreamError;
use crate::models::{
    InventoryLevel, InventoryUpdate, Item, ItemId, Store, StoreId, Variant, VariantId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub(crate) struct FakeInventory {
    stores: Result<Vec<Store>, UpstreamError>,
    variants_by_sku: HashMap<String, Result<Vec<Variant>, UpstreamError>>,
    items_by_sku: HashMap<String, Result<Vec<Item>, UpstreamError>>,
    items: HashMap<ItemId, Item>,
    variants_by_item: HashMap<ItemId, Result<Vec<Variant>, UpstreamError>>,
    levels: HashMap<ItemId, Result<Vec<InventoryLevel>, UpstreamError>>,
    write_failures: HashMap<VariantId, UpstreamError>,
    /// 置位后所有读取都返回 500
    offline: AtomicBool,
    writes: Mutex<Vec<InventoryUpdate>>,
    calls: Mutex<Vec<String>>,
}

pub(crate) fn server_error() -> UpstreamError {
    UpstreamError::Status {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

pub(crate) fn variant(id: &str, item_id: &str, sku: &str) -> Variant {
    Variant {
        variant_id: Some(VariantId::new(id)),
        id: None,
        item_id: Some(ItemId::new(item_id)),
        sku: Some(sku.to_string()),
    }
}

pub(crate) fn item(id: &str, name: &str) -> Item {
    Item {
        id: ItemId::new(id),
        item_name: name.to_string(),
        category_name: None,
        variants: Vec::new(),
    }
}

impl FakeInventory {
    /// 一个门店 `S1`, 没有任何商品
    pub fn new() -> Self {
        Self {
            stores: Ok(vec![Store {
                id: StoreId::new("S1"),
                name: Some("Main".to_string()),
            }]),
            variants_by_sku: HashMap::new(),
            items_by_sku: HashMap::new(),
            items: HashMap::new(),
            variants_by_item: HashMap::new(),
            levels: HashMap::new(),
            write_failures: HashMap::new(),
            offline: AtomicBool::new(false),
            writes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_stores(mut self) -> Self {
        self.stores = Ok(Vec::new());
        self
    }

    pub fn failing_stores(mut self) -> Self {
        self.stores = Err(server_error());
        self
    }

    /// 规格 SKU 命中, 同时登记所属商品
    pub fn with_variant_product(mut self, sku: &str, variant_id: &str, item: Item) -> Self {
        let v = variant(variant_id, item.id.as_str(), sku);
        if let Ok(list) = self
            .variants_by_sku
            .entry(sku.to_string())
            .or_insert_with(|| Ok(Vec::new()))
        {
            list.push(v);
        }
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn with_orphan_variant(mut self, sku: &str, variant_id: &str, item_id: &str) -> Self {
        self.variants_by_sku
            .insert(sku.to_string(), Ok(vec![variant(variant_id, item_id, sku)]));
        self
    }

    pub fn failing_variant_search(mut self, sku: &str) -> Self {
        self.variants_by_sku.insert(sku.to_string(), Err(server_error()));
        self
    }

    pub fn with_item_product(mut self, sku: &str, item: Item) -> Self {
        self.items_by_sku.insert(sku.to_string(), Ok(vec![item.clone()]));
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn failing_item_search(mut self, sku: &str) -> Self {
        self.items_by_sku.insert(sku.to_string(), Err(server_error()));
        self
    }

    pub fn with_item_variants(mut self, item_id: &str, variants: Vec<Variant>) -> Self {
        self.variants_by_item.insert(ItemId::new(item_id), Ok(variants));
        self
    }

    pub fn failing_item_variants(mut self, item_id: &str) -> Self {
        self.variants_by_item.insert(ItemId::new(item_id), Err(server_error()));
        self
    }

    pub fn with_stock(mut self, item_id: &str, variant_id: &str, in_stock: f64) -> Self {
        let level = InventoryLevel {
            variant_id: Some(VariantId::new(variant_id)),
            store_id: Some(StoreId::new("S1")),
            in_stock,
        };
        if let Ok(list) = self
            .levels
            .entry(ItemId::new(item_id))
            .or_insert_with(|| Ok(Vec::new()))
        {
            list.push(level);
        }
        self
    }

    pub fn failing_stock(mut self, item_id: &str) -> Self {
        self.levels.insert(ItemId::new(item_id), Err(server_error()));
        self
    }

    pub fn failing_write(mut self, variant_id: &str) -> Self {
        self.write_failures
            .insert(VariantId::new(variant_id), server_error());
        self
    }

    /// 构造之后切换: 后续所有读取失败
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<InventoryUpdate> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn reachable(&self) -> Result<(), UpstreamError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryApi for FakeInventory {
    async fn list_stores(&self) -> Result<Vec<Store>, UpstreamError> {
        self.record("list_stores".to_string());
        self.reachable()?;
        self.stores.clone()
    }

    async fn variants_by_sku(&self, sku: &str) -> Result<Vec<Variant>, UpstreamError> {
        self.record(format!("variants_by_sku:{sku}"));
        self.reachable()?;
        self.variants_by_sku.get(sku).cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn items_by_sku(&self, sku: &str) -> Result<Vec<Item>, UpstreamError> {
        self.record(format!("items_by_sku:{sku}"));
        self.reachable()?;
        self.items_by_sku.get(sku).cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn get_item(&self, item_id: &ItemId) -> Result<Item, UpstreamError> {
        self.record(format!("get_item:{item_id}"));
        self.reachable()?;
        self.items.get(item_id).cloned().ok_or(UpstreamError::Status {
            status: 404,
            body: "Not Found".to_string(),
        })
    }

    async fn variants_by_item(&self, item_id: &ItemId) -> Result<Vec<Variant>, UpstreamError> {
        self.record(format!("variants_by_item:{item_id}"));
        self.reachable()?;
        self.variants_by_item
            .get(item_id)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn inventory_levels(
        &self,
        store_id: &StoreId,
        item_id: &ItemId,
    ) -> Result<Vec<InventoryLevel>, UpstreamError> {
        self.record(format!("inventory_levels:{store_id}:{item_id}"));
        self.reachable()?;
        self.levels.get(item_id).cloned().unwrap_or(Ok(Vec::new()))
    }

    async fn set_inventory(&self, update: &InventoryUpdate) -> Result<(), UpstreamError> {
        self.record(format!("set_inventory:{}", update.variant_id));
        if let Some(err) = self.write_failures.get(&update.variant_id) {
            return Err(err.clone());
        }
        self.writes.lock().unwrap().push(update.clone());
        Ok(())
    }
}
