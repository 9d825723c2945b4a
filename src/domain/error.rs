//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::{CostType, ItemId};

/// Domain errors describe why a mutation was rejected.
///
/// The session treats all of them as silent rejections; they are typed so
/// front-ends and tests can tell the cases apart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("cost must be provided")]
    MissingCost,

    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("parent {parent} is not a {cost_type} heading")]
    InvalidParent { parent: ItemId, cost_type: CostType },

    #[error("no item matches id prefix: {0}")]
    NoMatch(String),

    #[error("id prefix is ambiguous: {0}")]
    AmbiguousId(String),

    #[error("unknown cost type: {0} (expected opex, capex or startup)")]
    UnknownCostType(String),

    #[error("unknown side: {0} (expected office or coworking)")]
    UnknownSide(String),

    #[error("invalid horizon: {0} months (expected 12, 36 or 60)")]
    InvalidHorizon(u32),
}
