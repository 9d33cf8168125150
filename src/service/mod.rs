pub mod accumulator;
pub mod inventory;
pub mod reconciler;
pub mod report;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fake;

pub use accumulator::CountAccumulator;
pub use inventory::InventoryService;
pub use reconciler::{FixedDelay, Pacing, Reconciler};
pub use resolver::{ProductMatch, Resolver, SearchStrategy};
