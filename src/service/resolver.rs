use crate::client::InventoryApi;
use crate::error::{ResolveError, UpstreamError};
use crate::models::{
    InventoryLevel, Item, ItemId, ProductIdentity, ResolvedProduct, StoreId, VariantId,
    UNKNOWN_CATEGORY,
};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type StrategyFuture<'a> = BoxFuture<'a, Result<ProductMatch, ResolveError>>;

/// 查找策略: 扫码值 -> 命中的商品 (未命中返回 `NotFound`)
pub type StrategyFn = for<'a> fn(&'a dyn InventoryApi, &'a str) -> StrategyFuture<'a>;

/// 策略命中结果, 库存尚未读取
#[derive(Debug, Clone)]
pub struct ProductMatch {
    pub item: Item,
    pub variant_id: Option<VariantId>,
}

/// 具名查找策略
#[derive(Clone, Copy)]
pub struct SearchStrategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

impl SearchStrategy {
    pub const fn new(name: &'static str, run: StrategyFn) -> Self {
        Self { name, run }
    }

    /// 默认顺序: 先按规格 SKU, 再按商品 SKU
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("variant_sku", by_variant_sku),
            Self::new("item_sku", by_item_sku),
        ]
    }
}

/// 扫码解析器
///
/// 按顺序尝试各策略, 第一个命中即返回。前面策略的上游错误只记日志,
/// 全部未命中时返回最后一个策略的错误。
pub struct Resolver {
    api: Arc<dyn InventoryApi>,
    strategies: Vec<SearchStrategy>,
}

impl Resolver {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self::with_strategies(api, SearchStrategy::defaults())
    }

    pub fn with_strategies(api: Arc<dyn InventoryApi>, strategies: Vec<SearchStrategy>) -> Self {
        Self { api, strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name).collect()
    }

    pub async fn resolve_product(&self, code: &str) -> Result<ResolvedProduct, ResolveError> {
        debug!(code, "Product search started");
        let mut last_error = ResolveError::NotFound(code.to_string());

        for strategy in &self.strategies {
            match (strategy.run)(self.api.as_ref(), code).await {
                Ok(found) => {
                    info!(
                        code,
                        strategy = strategy.name,
                        item_id = %found.item.id,
                        "Found product: {}",
                        found.item.item_name
                    );
                    return Ok(self.snapshot(found).await);
                }
                Err(ResolveError::NotFound(_)) => {
                    debug!(code, strategy = strategy.name, "No match");
                    last_error = ResolveError::NotFound(code.to_string());
                }
                Err(e) => {
                    warn!(code, strategy = strategy.name, error = %e, "Search strategy failed");
                    last_error = e;
                }
            }
        }

        info!(code, "Product not found");
        Err(last_error)
    }

    async fn snapshot(&self, found: ProductMatch) -> ResolvedProduct {
        let ProductMatch { item, variant_id } = found;
        let remote_stock = self.read_stock(&item.id, variant_id.as_ref()).await;

        ResolvedProduct {
            name: item.item_name,
            category: item
                .category_name
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            remote_stock,
            identity: ProductIdentity::new(item.id, variant_id),
        }
    }

    /// 读取单门店库存
    ///
    /// 无门店或任何调用失败返回 `None`; 查询成功但没有库存记录返回 `Some(0)`。
    pub async fn read_stock(&self, item_id: &ItemId, variant_id: Option<&VariantId>) -> Option<i64> {
        let store_id = match active_store(self.api.as_ref()).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(%item_id, "No stores found, stock unknown");
                return None;
            }
            Err(e) => {
                warn!(%item_id, error = %e, "Store lookup failed, stock unknown");
                return None;
            }
        };

        let levels = match self.api.inventory_levels(&store_id, item_id).await {
            Ok(levels) => levels,
            Err(e) => {
                warn!(%item_id, %store_id, error = %e, "Inventory lookup failed, stock unknown");
                return None;
            }
        };

        let level = variant_id
            .and_then(|v| levels.iter().find(|l| l.variant_id.as_ref() == Some(v)))
            .or_else(|| levels.first());
        let stock = level.map_or(0, InventoryLevel::rounded_stock);
        debug!(%item_id, %store_id, stock, "Current stock");
        Some(stock)
    }
}

/// 当前门店: 只支持单门店, 取列表第一个
pub(crate) async fn active_store(api: &dyn InventoryApi) -> Result<Option<StoreId>, UpstreamError> {
    let stores = api.list_stores().await?;
    Ok(stores.into_iter().next().map(|s| s.id))
}

/// 规格 SKU 命中后取所属商品; 返回的规格 ID 是规格自身的 ID
fn by_variant_sku<'a>(api: &'a dyn InventoryApi, code: &'a str) -> StrategyFuture<'a> {
    Box::pin(async move {
        let variants = api.variants_by_sku(code).await?;
        let Some(variant) = variants
            .into_iter()
            .find(|v| v.sku.as_deref().map_or(true, |sku| sku == code))
        else {
            return Err(ResolveError::NotFound(code.to_string()));
        };

        let (Some(variant_id), Some(item_id)) = (variant.identifier().cloned(), variant.item_id.clone())
        else {
            warn!(code, "Variant record has no id or item reference");
            return Err(ResolveError::NotFound(code.to_string()));
        };

        let item = api.get_item(&item_id).await?;
        Ok(ProductMatch {
            item,
            variant_id: Some(variant_id),
        })
    })
}

/// 商品 SKU 命中; 规格 ID 先取内嵌列表, 没有再按商品 ID 查询
fn by_item_sku<'a>(api: &'a dyn InventoryApi, code: &'a str) -> StrategyFuture<'a> {
    Box::pin(async move {
        let items = api.items_by_sku(code).await?;
        let Some(item) = items.into_iter().next() else {
            return Err(ResolveError::NotFound(code.to_string()));
        };

        let mut variant_id = item.variants.iter().find_map(|v| v.identifier().cloned());
        if variant_id.is_none() {
            variant_id = match api.variants_by_item(&item.id).await {
                Ok(variants) => variants.iter().find_map(|v| v.identifier().cloned()),
                Err(e) => {
                    warn!(code, item_id = %item.id, error = %e, "Variant lookup by item failed");
                    None
                }
            };
        }

        if variant_id.is_none() {
            warn!(code, item_id = %item.id, "Resolved without variant identity");
        }
        Ok(ProductMatch { item, variant_id })
    })
}
