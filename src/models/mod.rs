pub mod loyverse;
pub mod product;
pub mod result;
pub mod scan;

pub use loyverse::{
    InventoryLevel, InventoryLevelList, InventoryUpdate, InventoryUpdateRequest, Item, ItemList,
    Store, StoreList, Variant, VariantList,
};
pub use product::{ItemId, ProductIdentity, ResolvedProduct, StoreId, VariantId, UNKNOWN_CATEGORY};
pub use result::{BatchResult, SyncFailure, SyncedItem};
pub use scan::{ScanRecord, ScanSummary};
