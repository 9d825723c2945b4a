//! Domain entities: line items, cost types, structures and horizons

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Name given to the heading synthesized when only entries are copied.
pub const COPIED_ITEMS_HEADING: &str = "Copied Items";

/// Number of months the projection always covers.
pub const PROJECTION_MONTHS: u32 = 60;

/// Which cost bucket an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    /// Recurring monthly operating expense
    Opex,
    /// Recurring annual capital expense
    Capex,
    /// One-time expense at the start of the horizon
    Startup,
}

impl CostType {
    pub const ALL: [CostType; 3] = [CostType::Opex, CostType::Capex, CostType::Startup];

    /// Human readable label used in tree and summary output.
    pub fn label(&self) -> &'static str {
        match self {
            CostType::Opex => "Monthly OpEx",
            CostType::Capex => "Annual CapEx",
            CostType::Startup => "Startup",
        }
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CostType::Opex => "opex",
            CostType::Capex => "capex",
            CostType::Startup => "startup",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opex" => Ok(CostType::Opex),
            "capex" => Ok(CostType::Capex),
            "startup" => Ok(CostType::Startup),
            other => Err(DomainError::UnknownCostType(other.to_string())),
        }
    }
}

/// The two cost structures being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Office,
    Coworking,
}

impl Side {
    /// The structure on the other side, the target of a copy.
    pub fn other(&self) -> Side {
        match self {
            Side::Office => Side::Coworking,
            Side::Coworking => Side::Office,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Office => "Traditional Office",
            Side::Coworking => "Co-working Space",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Office => write!(f, "office"),
            Side::Coworking => write!(f, "coworking"),
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "office" => Ok(Side::Office),
            "coworking" | "co-working" => Ok(Side::Coworking),
            other => Err(DomainError::UnknownSide(other.to_string())),
        }
    }
}

/// Identity of a line item, stable for the item's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier (random v4 UUID).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to address items interactively.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Heading or cost entry. Only entries carry a cost and a parent.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Heading,
    Entry {
        cost: f64,
        parent_id: Option<ItemId>,
    },
}

/// A node in one cost structure's item collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub cost_type: CostType,
    pub kind: ItemKind,
}

impl LineItem {
    pub fn heading(cost_type: CostType, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            cost_type,
            kind: ItemKind::Heading,
        }
    }

    pub fn entry(
        cost_type: CostType,
        parent_id: Option<ItemId>,
        name: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            cost_type,
            kind: ItemKind::Entry { cost, parent_id },
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ItemKind::Heading)
    }

    /// Cost of an entry; `None` for headings.
    pub fn cost(&self) -> Option<f64> {
        match self.kind {
            ItemKind::Heading => None,
            ItemKind::Entry { cost, .. } => Some(cost),
        }
    }

    pub fn parent_id(&self) -> Option<ItemId> {
        match self.kind {
            ItemKind::Heading => None,
            ItemKind::Entry { parent_id, .. } => parent_id,
        }
    }
}

/// Parse user-entered cost text.
///
/// Blank, unparsable and non-finite input all become `0.0`.
pub fn parse_cost(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Display horizon: one, three or five years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Horizon {
    #[default]
    OneYear,
    ThreeYears,
    FiveYears,
}

impl Horizon {
    pub fn from_months(months: u32) -> Result<Self, DomainError> {
        match months {
            12 => Ok(Horizon::OneYear),
            36 => Ok(Horizon::ThreeYears),
            60 => Ok(Horizon::FiveYears),
            other => Err(DomainError::InvalidHorizon(other)),
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Horizon::OneYear => 12,
            Horizon::ThreeYears => 36,
            Horizon::FiveYears => 60,
        }
    }

    pub fn years(&self) -> u32 {
        self.months() / 12
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = self.years();
        write!(f, "{} year{}", years, if years > 1 { "s" } else { "" })
    }
}

/// Cosmetic currency symbol for a currency code. Unknown codes pass through.
pub fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "PKR" => "₨".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cost_defaults_to_zero() {
        assert_eq!(parse_cost(""), 0.0);
        assert_eq!(parse_cost("abc"), 0.0);
        assert_eq!(parse_cost("NaN"), 0.0);
        assert_eq!(parse_cost(" 12.5 "), 12.5);
    }

    #[test]
    fn parse_cost_rejects_trailing_garbage() {
        assert_eq!(parse_cost("12abc"), 0.0);
        assert_eq!(parse_cost("1,000"), 0.0);
    }

    #[test]
    fn short_id_is_prefix_of_full_id() {
        let id = ItemId::generate();
        assert!(id.to_string().starts_with(&id.short()));
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn heading_has_no_cost_or_parent() {
        let h = LineItem::heading(CostType::Opex, "Rent");
        assert!(h.is_heading());
        assert_eq!(h.cost(), None);
        assert_eq!(h.parent_id(), None);
    }
}
