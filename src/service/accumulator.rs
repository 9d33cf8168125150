use crate::models::{ResolvedProduct, ScanRecord, ScanSummary};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard};

/// 扫码计数累加器 (进程内, 不持久化)
///
/// 所有修改都在同一把锁内完成: 单次计数的 读-加一-写回 不会与同码的另一次扫码交错,
/// `reset` 要么全部清空要么什么都不做。锁从不跨 `.await` 持有。
#[derive(Debug, Default)]
pub struct CountAccumulator {
    records: Mutex<IndexMap<String, ScanRecord>>,
}

impl CountAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, IndexMap<String, ScanRecord>> {
        // 记录只会整条替换或整体清空, 中毒后数据仍然完整
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 记入一次成功扫码, 返回本次摘要
    pub fn record(&self, code: &str, product: ResolvedProduct) -> ScanSummary {
        self.record_at(code, product, Utc::now())
    }

    pub(crate) fn record_at(
        &self,
        code: &str,
        product: ResolvedProduct,
        now: DateTime<Utc>,
    ) -> ScanSummary {
        let mut records = self.records();
        let (counted_quantity, last_scanned_at) = match records.get(code) {
            Some(prev) => (prev.counted_quantity + 1, now.max(prev.last_scanned_at)),
            None => (1, now),
        };

        let record = ScanRecord {
            scan_code: code.to_string(),
            product,
            counted_quantity,
            last_scanned_at,
        };
        let summary = ScanSummary::from_record(&record);
        records.insert(code.to_string(), record);
        summary
    }

    pub fn get(&self, code: &str) -> Option<ScanRecord> {
        self.records().get(code).cloned()
    }

    /// 当前所有记录的快照
    pub fn list(&self) -> Vec<ScanRecord> {
        self.records().values().cloned().collect()
    }

    pub fn reset(&self) {
        self.records().clear();
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}
