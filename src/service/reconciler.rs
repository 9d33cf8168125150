use crate::client::InventoryApi;
use crate::error::{StockWriteError, SyncError};
use crate::models::{
    BatchResult, InventoryUpdate, ProductIdentity, ScanRecord, StoreId, SyncFailure, SyncedItem,
    VariantId,
};
use crate::service::resolver::active_store;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 两次远程写入之间的节流策略
#[async_trait]
pub trait Pacing: Send + Sync {
    async fn pause(&self);
}

/// 固定间隔 (Loyverse 限流)
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Pacing for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// 库存同步: 把本地计数写回 Loyverse
///
/// 逐条顺序写入, 单条失败只记录不中断, 不做重试。
pub struct Reconciler {
    api: Arc<dyn InventoryApi>,
    pacing: Arc<dyn Pacing>,
}

impl Reconciler {
    pub fn new(api: Arc<dyn InventoryApi>, pacing: Arc<dyn Pacing>) -> Self {
        Self { api, pacing }
    }

    pub async fn sync_all(&self, records: &[ScanRecord]) -> Result<BatchResult, SyncError> {
        if records.is_empty() {
            return Err(SyncError::NothingToSync);
        }

        let store_id = active_store(self.api.as_ref())
            .await?
            .ok_or(SyncError::NoStore)?;
        info!(%store_id, records = records.len(), "Starting Loyverse inventory update");

        let mut result = BatchResult::default();
        for record in records.iter().filter(|r| r.counted_quantity > 0) {
            let code = &record.scan_code;
            let Some(variant_id) = record.product.identity.variant_id.as_ref() else {
                warn!(code = %code, item_id = %record.product.identity.item_id, "Skipping write, no variant identity");
                result.failed.push(SyncFailure {
                    code: code.clone(),
                    error: StockWriteError::MissingVariantIdentity.to_string(),
                });
                continue;
            };

            match self.write(&store_id, variant_id, record.counted_quantity).await {
                Ok(()) => {
                    info!(code = %code, %variant_id, counted = record.counted_quantity, "Updated");
                    result.succeeded.push(SyncedItem {
                        code: code.clone(),
                        counted: record.counted_quantity,
                    });
                }
                Err(e) => {
                    warn!(code = %code, %variant_id, error = %e, "Update failed");
                    result.failed.push(SyncFailure {
                        code: code.clone(),
                        error: e.to_string(),
                    });
                }
            }

            self.pacing.pause().await;
        }

        info!(
            updates = result.succeeded.len(),
            errors = result.failed.len(),
            "Update complete"
        );
        Ok(result)
    }

    /// 单条写入: 把该规格在当前门店的库存设为 `new_count`
    pub async fn set_remote_stock(
        &self,
        identity: &ProductIdentity,
        new_count: i64,
    ) -> Result<(), StockWriteError> {
        let variant_id = identity
            .variant_id
            .as_ref()
            .ok_or(StockWriteError::MissingVariantIdentity)?;
        let store_id = active_store(self.api.as_ref())
            .await?
            .ok_or(StockWriteError::NoStore)?;
        self.write(&store_id, variant_id, new_count).await
    }

    async fn write(
        &self,
        store_id: &StoreId,
        variant_id: &VariantId,
        stock_after: i64,
    ) -> Result<(), StockWriteError> {
        let update = InventoryUpdate {
            variant_id: variant_id.clone(),
            store_id: store_id.clone(),
            stock_after,
        };
        self.api.set_inventory(&update).await?;
        Ok(())
    }
}
