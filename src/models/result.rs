use serde::{Deserialize, Serialize};

/// 同步成功的条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedItem {
    pub code: String,
    pub counted: i64,
}

/// 同步失败的条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub code: String,
    pub error: String,
}

/// 一次批量同步的结果; 部分失败时 `failed` 非空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<SyncedItem>,
    pub failed: Vec<SyncFailure>,
}

impl BatchResult {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
