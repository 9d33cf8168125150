pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use client::{InventoryApi, LoyverseClient};
pub use config::AppConfig;
pub use service::InventoryService;
