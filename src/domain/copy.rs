//! Cross-structure copy with fresh identities and remapped parents.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::entities::{ItemId, ItemKind, LineItem, COPIED_ITEMS_HEADING};
use crate::domain::store::CostStructure;

/// Duplicate `selection` into `target`.
///
/// - Only entries selected: they are grouped under a new "Copied Items"
///   heading typed after the first entry.
/// - Otherwise headings get fresh ids first, then entries are re-parented
///   through the old→new table; entries whose heading was not selected end up
///   ungrouped.
///
/// Returns the ids of the items appended to `target`, in order.
#[instrument(level = "debug", skip_all, fields(selected = selection.len()))]
pub fn copy_items(selection: &[LineItem], target: &mut CostStructure) -> Vec<ItemId> {
    let (headings, entries): (Vec<&LineItem>, Vec<&LineItem>) =
        selection.iter().partition(|i| i.is_heading());

    let mut copied = Vec::with_capacity(selection.len() + 1);

    if headings.is_empty() {
        let Some(first) = entries.first() else {
            return Vec::new();
        };
        let heading = LineItem::heading(first.cost_type, COPIED_ITEMS_HEADING);
        let heading_id = heading.id;
        copied.push(heading);
        for entry in &entries {
            // a heading only groups entries of its own type
            let parent = (entry.cost_type == first.cost_type).then_some(heading_id);
            copied.push(duplicate_entry(entry, parent));
        }
    } else {
        let mut id_map: HashMap<ItemId, ItemId> = HashMap::new();
        for heading in &headings {
            let fresh = LineItem::heading(heading.cost_type, heading.name.clone());
            id_map.insert(heading.id, fresh.id);
            copied.push(fresh);
        }
        for entry in &entries {
            let parent = entry
                .parent_id()
                .and_then(|old| id_map.get(&old).copied());
            copied.push(duplicate_entry(entry, parent));
        }
    }

    let ids: Vec<ItemId> = copied.iter().map(|i| i.id).collect();
    debug!("copying {} item(s) into target", ids.len());
    target.extend(copied);
    ids
}

fn duplicate_entry(entry: &LineItem, parent_id: Option<ItemId>) -> LineItem {
    let cost = match entry.kind {
        ItemKind::Entry { cost, .. } => cost,
        ItemKind::Heading => 0.0,
    };
    LineItem::entry(entry.cost_type, parent_id, entry.name.clone(), cost)
}
