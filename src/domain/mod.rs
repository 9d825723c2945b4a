//! Domain layer: line items, the item tree store, copy and projection
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod copy;
pub mod entities;
pub mod error;
pub mod projection;
pub mod store;

pub use copy::copy_items;
pub use entities::*;
pub use error::DomainError;
pub use projection::{project, Cheaper, Comparison, CostAggregates, Projection, ProjectionPoint};
pub use store::{CostStructure, StoreResult};
