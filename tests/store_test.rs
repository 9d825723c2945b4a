//! Tests for the item tree store (CostStructure)

use rstest::rstest;

use spacecost::domain::{CostStructure, CostType, DomainError, ItemId};
use spacecost::util::testing;

fn structure_with_rent() -> (CostStructure, ItemId, ItemId, ItemId) {
    let mut s = CostStructure::new();
    let rent = s.add_heading(CostType::Opex, "Rent").unwrap();
    let lease = s.add_item(CostType::Opex, Some(rent), "Lease", "1000").unwrap();
    let parking = s.add_item(CostType::Opex, Some(rent), "Parking", "150").unwrap();
    (s, rent, lease, parking)
}

// ============================================================
// addHeading / addItem
// ============================================================

#[test]
fn given_name_with_whitespace_when_adding_heading_then_name_is_trimmed() {
    let mut s = CostStructure::new();

    let id = s.add_heading(CostType::Capex, "  Furniture  ").unwrap();

    let heading = s.get(id).unwrap();
    assert_eq!(heading.name, "Furniture");
    assert!(heading.is_heading());
    assert_eq!(heading.cost(), None);
    assert_eq!(heading.parent_id(), None);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn given_blank_name_when_adding_heading_then_rejected_without_mutation(#[case] name: &str) {
    let mut s = CostStructure::new();

    let result = s.add_heading(CostType::Opex, name);

    assert_eq!(result, Err(DomainError::EmptyName));
    assert!(s.is_empty());
}

#[rstest]
#[case("", "100", DomainError::EmptyName)]
#[case("Desk", "", DomainError::MissingCost)]
#[case("Desk", "   ", DomainError::MissingCost)]
fn given_missing_input_when_adding_item_then_rejected(
    #[case] name: &str,
    #[case] cost: &str,
    #[case] expected: DomainError,
) {
    let mut s = CostStructure::new();

    let result = s.add_item(CostType::Opex, None, name, cost);

    assert_eq!(result, Err(expected));
    assert!(s.is_empty());
}

#[rstest]
#[case("1000", 1000.0)]
#[case("12.75", 12.75)]
#[case("0", 0.0)]
#[case("abc", 0.0)]
fn given_cost_text_when_adding_item_then_cost_is_parsed(#[case] raw: &str, #[case] expected: f64) {
    let mut s = CostStructure::new();

    let id = s.add_item(CostType::Startup, None, "Deposit", raw).unwrap();

    assert_eq!(s.get(id).unwrap().cost(), Some(expected));
}

#[test]
fn given_parent_of_other_type_when_adding_item_then_rejected() {
    let mut s = CostStructure::new();
    let capex = s.add_heading(CostType::Capex, "Equipment").unwrap();

    let result = s.add_item(CostType::Opex, Some(capex), "Internet", "80");

    assert_eq!(
        result,
        Err(DomainError::InvalidParent {
            parent: capex,
            cost_type: CostType::Opex
        })
    );
    assert_eq!(s.len(), 1);
}

#[test]
fn given_entry_as_parent_when_adding_item_then_rejected() {
    let (mut s, _, lease, _) = structure_with_rent();

    let result = s.add_item(CostType::Opex, Some(lease), "Sublease", "10");

    assert!(matches!(result, Err(DomainError::InvalidParent { .. })));
    assert_eq!(s.len(), 3);
}

#[test]
fn given_many_items_when_adding_then_ids_are_unique() {
    let mut s = CostStructure::new();
    for i in 0..200 {
        s.add_item(CostType::Opex, None, &format!("item {i}"), "1").unwrap();
    }

    let mut ids: Vec<ItemId> = s.items().iter().map(|i| i.id).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 200);
}

// ============================================================
// editItem
// ============================================================

#[test]
fn given_entry_when_editing_then_name_and_cost_change() {
    let (mut s, rent, lease, _) = structure_with_rent();

    s.edit_item(lease, " Main lease ", "1200").unwrap();

    let item = s.get(lease).unwrap();
    assert_eq!(item.name, "Main lease");
    assert_eq!(item.cost(), Some(1200.0));
    assert_eq!(item.parent_id(), Some(rent));
    assert_eq!(item.cost_type, CostType::Opex);
}

#[test]
fn given_empty_name_when_editing_then_edit_is_cancelled() {
    let (mut s, _, lease, _) = structure_with_rent();
    let before = s.clone();

    let result = s.edit_item(lease, "  ", "9999");

    assert_eq!(result, Err(DomainError::EmptyName));
    assert_eq!(s, before);
    assert_eq!(s.get(lease).unwrap().name, "Lease");
    assert_eq!(s.get(lease).unwrap().cost(), Some(1000.0));
}

#[rstest]
#[case("")]
#[case("n/a")]
fn given_invalid_cost_when_editing_then_cost_becomes_zero(#[case] raw: &str) {
    let (mut s, _, lease, _) = structure_with_rent();

    s.edit_item(lease, "Lease", raw).unwrap();

    assert_eq!(s.get(lease).unwrap().cost(), Some(0.0));
}

#[test]
fn given_heading_when_editing_then_only_name_changes() {
    let (mut s, rent, _, _) = structure_with_rent();

    s.edit_item(rent, "Premises", "500").unwrap();

    let heading = s.get(rent).unwrap();
    assert_eq!(heading.name, "Premises");
    assert_eq!(heading.cost(), None);
    assert!(heading.is_heading());
}

#[test]
fn given_unknown_id_when_editing_then_not_found() {
    let (mut s, _, _, _) = structure_with_rent();
    let stranger = ItemId::generate();

    assert_eq!(
        s.edit_item(stranger, "x", "1"),
        Err(DomainError::ItemNotFound(stranger))
    );
}

// ============================================================
// removeItem
// ============================================================

#[test]
fn given_heading_when_removing_then_children_go_with_it_and_nothing_else() {
    testing::init_test_setup();
    let (mut s, rent, _, _) = structure_with_rent();
    let other = s.add_heading(CostType::Opex, "Utilities").unwrap();
    let power = s.add_item(CostType::Opex, Some(other), "Power", "90").unwrap();
    let loose = s.add_item(CostType::Opex, None, "Coffee", "40").unwrap();

    let removed = s.remove_item(rent);

    assert_eq!(removed, 3);
    let remaining: Vec<ItemId> = s.items().iter().map(|i| i.id).collect();
    assert_eq!(remaining, vec![other, power, loose]);
}

#[test]
fn given_entry_when_removing_then_only_entry_goes() {
    let (mut s, rent, lease, parking) = structure_with_rent();

    assert_eq!(s.remove_item(lease), 1);

    let remaining: Vec<ItemId> = s.items().iter().map(|i| i.id).collect();
    assert_eq!(remaining, vec![rent, parking]);
}

#[test]
fn given_unknown_id_when_removing_then_noop() {
    let (mut s, _, _, _) = structure_with_rent();
    let before = s.clone();

    assert_eq!(s.remove_item(ItemId::generate()), 0);
    assert_eq!(s, before);
}

// ============================================================
// Lookups
// ============================================================

#[test]
fn given_mixed_items_when_querying_then_groups_are_separated() {
    let (mut s, rent, lease, parking) = structure_with_rent();
    let coffee = s.add_item(CostType::Opex, None, "Coffee", "40").unwrap();
    s.add_heading(CostType::Startup, "Fit-out").unwrap();

    let headings: Vec<ItemId> = s.headings(CostType::Opex).map(|i| i.id).collect();
    let children: Vec<ItemId> = s.children(rent).map(|i| i.id).collect();
    let ungrouped: Vec<ItemId> = s.ungrouped(CostType::Opex).map(|i| i.id).collect();

    assert_eq!(headings, vec![rent]);
    assert_eq!(children, vec![lease, parking]);
    assert_eq!(ungrouped, vec![coffee]);
    assert_eq!(s.total(CostType::Opex), 1190.0);
    assert_eq!(s.total(CostType::Startup), 0.0);
}

#[test]
fn given_full_and_short_ids_when_resolving_then_prefix_matches() {
    let (s, rent, _, _) = structure_with_rent();

    assert_eq!(s.resolve_prefix(&rent.to_string()), Ok(rent));
    assert_eq!(s.resolve_prefix(&rent.short()), Ok(rent));
    assert!(matches!(
        s.resolve_prefix("zzzz"),
        Err(DomainError::NoMatch(_))
    ));
    assert!(matches!(s.resolve_prefix(""), Err(DomainError::NoMatch(_))));
}

#[test]
fn given_heading_when_taking_category_selection_then_heading_first_then_children() {
    let (s, rent, lease, parking) = structure_with_rent();

    let selection = s.category_selection(rent).unwrap();
    let ids: Vec<ItemId> = selection.iter().map(|i| i.id).collect();

    assert_eq!(ids, vec![rent, lease, parking]);
    assert!(matches!(
        s.category_selection(lease),
        Err(DomainError::ItemNotFound(_))
    ));
}

// ============================================================
// Invariant under operation sequences
// ============================================================

/// Small deterministic generator so the sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[rstest]
#[case(1)]
#[case(42)]
#[case(2024)]
fn given_random_operation_sequence_when_applied_then_parent_links_stay_valid(#[case] seed: u64) {
    let mut rng = Lcg(seed);
    let mut s = CostStructure::new();
    let names = ["Rent", "", "  ", "Desk", "Power"];
    let costs = ["100", "", "x", "2.5"];

    for _ in 0..500 {
        let cost_type = spacecost::domain::CostType::ALL[rng.next(3)];
        let ids: Vec<ItemId> = s.items().iter().map(|i| i.id).collect();
        let pick = |rng: &mut Lcg| -> Option<ItemId> {
            if ids.is_empty() {
                None
            } else {
                Some(ids[rng.next(ids.len())])
            }
        };
        match rng.next(4) {
            0 => {
                let _ = s.add_heading(cost_type, names[rng.next(names.len())]);
            }
            1 => {
                let parent = pick(&mut rng);
                let _ = s.add_item(
                    cost_type,
                    parent,
                    names[rng.next(names.len())],
                    costs[rng.next(costs.len())],
                );
            }
            2 => {
                if let Some(id) = pick(&mut rng) {
                    let _ = s.edit_item(id, names[rng.next(names.len())], costs[rng.next(costs.len())]);
                }
            }
            _ => {
                if let Some(id) = pick(&mut rng) {
                    s.remove_item(id);
                }
            }
        }
        assert!(s.is_consistent());
        assert!(s.items().iter().all(|i| !i.name.trim().is_empty()));
        assert!(s
            .items()
            .iter()
            .all(|i| i.is_heading() == i.cost().is_none()));
    }
}
