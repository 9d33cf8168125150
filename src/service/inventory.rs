use super::accumulator::CountAccumulator;
use super::reconciler::{Pacing, Reconciler};
use super::report;
use super::resolver::Resolver;
use crate::client::InventoryApi;
use crate::error::{ResolveError, SyncError, UpstreamError};
use crate::models::{BatchResult, ScanRecord, ScanSummary};
use std::sync::Arc;
use tracing::info;

/// 盘点服务: 扫码、同步、重置、列表
///
/// 每个进程构造一次, 通过 `Arc` 共享给各请求。
pub struct InventoryService {
    api: Arc<dyn InventoryApi>,
    resolver: Resolver,
    accumulator: CountAccumulator,
    reconciler: Reconciler,
}

impl InventoryService {
    pub fn new(api: Arc<dyn InventoryApi>, pacing: Arc<dyn Pacing>) -> Self {
        Self::with_resolver(api.clone(), Resolver::new(api), pacing)
    }

    pub fn with_resolver(
        api: Arc<dyn InventoryApi>,
        resolver: Resolver,
        pacing: Arc<dyn Pacing>,
    ) -> Self {
        Self {
            reconciler: Reconciler::new(api.clone(), pacing),
            accumulator: CountAccumulator::new(),
            resolver,
            api,
        }
    }

    /// 扫码一次: 先解析 (锁外), 成功后才计数; 失败不改动任何记录
    pub async fn scan(&self, code: &str) -> Result<ScanSummary, ResolveError> {
        info!(code, "Scanning barcode");
        let product = self.resolver.resolve_product(code).await?;
        let summary = self.accumulator.record(code, product);
        info!(
            code,
            counted = summary.counted,
            remote_stock = ?summary.current_stock,
            "{}: local count {}",
            summary.product,
            summary.counted
        );
        Ok(summary)
    }

    /// 把当前所有计数写回 Loyverse
    pub async fn sync(&self) -> Result<BatchResult, SyncError> {
        let snapshot = self.accumulator.list();
        self.reconciler.sync_all(&snapshot).await
    }

    pub fn reset(&self) {
        self.accumulator.reset();
        info!("All counts reset");
    }

    pub fn list(&self) -> Vec<ScanRecord> {
        self.accumulator.list()
    }

    pub fn export_csv(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        report::export_to_csv(&self.accumulator.list())
    }

    /// 连通性检查, 返回门店数量
    pub async fn check_connection(&self) -> Result<usize, UpstreamError> {
        let stores = self.api.list_stores().await?;
        info!(stores = stores.len(), "Loyverse API connected");
        Ok(stores.len())
    }
}
