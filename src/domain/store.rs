//! Item tree store: one flat, ordered collection of line items per side.
//!
//! Headings and entries live in the same list; entries point back at their
//! heading through `parent_id`. Children are looked up on demand.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::entities::{parse_cost, CostType, ItemId, ItemKind, LineItem};
use crate::domain::error::DomainError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, DomainError>;

/// Ordered collection of line items for one side of the comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostStructure {
    items: Vec<LineItem>,
}

impl CostStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Append a heading. Rejected when the trimmed name is empty.
    #[instrument(level = "debug", skip(self))]
    pub fn add_heading(&mut self, cost_type: CostType, name: &str) -> StoreResult<ItemId> {
        let name = non_empty(name)?;
        let heading = LineItem::heading(cost_type, name);
        let id = heading.id;
        self.items.push(heading);
        debug!("added heading {}", id.short());
        Ok(id)
    }

    /// Append a cost entry.
    ///
    /// `cost` is the raw user text: blank text counts as missing, unparsable
    /// text becomes 0. `parent_id` must name a heading of the same type.
    #[instrument(level = "debug", skip(self))]
    pub fn add_item(
        &mut self,
        cost_type: CostType,
        parent_id: Option<ItemId>,
        name: &str,
        cost: &str,
    ) -> StoreResult<ItemId> {
        let name = non_empty(name)?;
        if cost.trim().is_empty() {
            return Err(DomainError::MissingCost);
        }
        if let Some(parent) = parent_id {
            self.check_parent(parent, cost_type)?;
        }
        let entry = LineItem::entry(cost_type, parent_id, name, parse_cost(cost));
        let id = entry.id;
        self.items.push(entry);
        debug!("added entry {}", id.short());
        Ok(id)
    }

    /// Rename an item and, for entries, replace its cost.
    ///
    /// An empty name cancels the edit; nothing changes.
    #[instrument(level = "debug", skip(self))]
    pub fn edit_item(&mut self, id: ItemId, new_name: &str, new_cost: &str) -> StoreResult<()> {
        let name = non_empty(new_name)?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::ItemNotFound(id))?;
        item.name = name.to_string();
        if let ItemKind::Entry { cost, .. } = &mut item.kind {
            *cost = parse_cost(new_cost);
        }
        Ok(())
    }

    /// Remove an item; removing a heading also removes its children.
    ///
    /// Returns how many items were removed (0 for an unknown id).
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, id: ItemId) -> usize {
        let before = self.items.len();
        self.items
            .retain(|i| i.id != id && i.parent_id() != Some(id));
        let removed = before - self.items.len();
        debug!("removed {} item(s)", removed);
        removed
    }

    /// Append already-built items (used by cross-structure copy).
    pub(crate) fn extend(&mut self, items: Vec<LineItem>) {
        self.items.extend(items);
    }

    pub fn headings(&self, cost_type: CostType) -> impl Iterator<Item = &LineItem> {
        self.items
            .iter()
            .filter(move |i| i.is_heading() && i.cost_type == cost_type)
    }

    pub fn children(&self, heading_id: ItemId) -> impl Iterator<Item = &LineItem> {
        self.items
            .iter()
            .filter(move |i| i.parent_id() == Some(heading_id))
    }

    /// Entries of a type that belong to no heading.
    pub fn ungrouped(&self, cost_type: CostType) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(move |i| {
            !i.is_heading() && i.cost_type == cost_type && i.parent_id().is_none()
        })
    }

    /// Children grouped by heading id, built on demand.
    pub fn children_index(&self) -> HashMap<ItemId, Vec<&LineItem>> {
        let mut index: HashMap<ItemId, Vec<&LineItem>> = HashMap::new();
        for item in &self.items {
            if let Some(parent) = item.parent_id() {
                index.entry(parent).or_default().push(item);
            }
        }
        index
    }

    /// Sum of entry costs of one type.
    pub fn total(&self, cost_type: CostType) -> f64 {
        self.items
            .iter()
            .filter(|i| i.cost_type == cost_type)
            .filter_map(LineItem::cost)
            .sum()
    }

    /// Selection for copying a whole category: the heading then its children.
    pub fn category_selection(&self, heading_id: ItemId) -> StoreResult<Vec<LineItem>> {
        let heading = self
            .get(heading_id)
            .filter(|i| i.is_heading())
            .ok_or(DomainError::ItemNotFound(heading_id))?;
        let mut selection = vec![heading.clone()];
        selection.extend(self.children(heading_id).cloned());
        Ok(selection)
    }

    /// Selection for copying one item on its own.
    pub fn item_selection(&self, id: ItemId) -> StoreResult<Vec<LineItem>> {
        self.get(id)
            .map(|i| vec![i.clone()])
            .ok_or(DomainError::ItemNotFound(id))
    }

    /// Resolve a (possibly shortened) id.
    pub fn resolve_prefix(&self, prefix: &str) -> StoreResult<ItemId> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(DomainError::NoMatch(prefix));
        }
        let mut matches = self
            .items
            .iter()
            .filter(|i| i.id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.id),
            (None, _) => Err(DomainError::NoMatch(prefix)),
            (Some(_), Some(_)) => Err(DomainError::AmbiguousId(prefix)),
        }
    }

    /// True when every entry's parent is an existing heading of its type.
    pub fn is_consistent(&self) -> bool {
        self.items.iter().all(|item| match item.parent_id() {
            None => true,
            Some(parent) => self
                .get(parent)
                .is_some_and(|p| p.is_heading() && p.cost_type == item.cost_type),
        })
    }

    fn check_parent(&self, parent: ItemId, cost_type: CostType) -> StoreResult<()> {
        match self.get(parent) {
            Some(p) if p.is_heading() && p.cost_type == cost_type => Ok(()),
            _ => Err(DomainError::InvalidParent { parent, cost_type }),
        }
    }
}

fn non_empty(name: &str) -> StoreResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyName)
    } else {
        Ok(trimmed)
    }
}
