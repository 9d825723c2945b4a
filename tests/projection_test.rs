//! Tests for the projection engine and derived comparison

use rstest::rstest;

use spacecost::domain::{
    project, Cheaper, Comparison, CostStructure, CostType, Horizon, ProjectionPoint,
};

fn structure(opex: &str, capex: &str, startup: &str) -> CostStructure {
    let mut s = CostStructure::new();
    s.add_item(CostType::Opex, None, "opex", opex).unwrap();
    s.add_item(CostType::Capex, None, "capex", capex).unwrap();
    s.add_item(CostType::Startup, None, "startup", startup).unwrap();
    s
}

#[test]
fn given_empty_structures_when_projecting_then_sixty_zero_points() {
    let p = project(&CostStructure::new(), &CostStructure::new(), 0.0);

    assert_eq!(p.points.len(), 60);
    assert!(p.points.iter().all(|pt| pt.office == 0.0 && pt.coworking == 0.0));
    let months: Vec<u32> = p.points.iter().map(|pt| pt.month).collect();
    assert_eq!(months, (1..=60).collect::<Vec<u32>>());
}

#[rstest]
#[case(1000.0, 5000.0, 2000.0)]
#[case(333.33, 0.0, 0.0)]
#[case(0.4, 12.6, 7.25)]
fn given_aggregates_when_projecting_then_closed_forms_hold(
    #[case] m: f64,
    #[case] c: f64,
    #[case] s: f64,
) {
    let office = structure(&m.to_string(), &c.to_string(), &s.to_string());

    let p = project(&office, &CostStructure::new(), 0.0);

    assert_eq!(p.points[0].office, (s + m).round());
    assert_eq!(p.points[11].office, (s + 12.0 * m + c).round());
    assert_eq!(p.points[23].office, (s + 24.0 * m + 2.0 * c).round());
    assert_eq!(p.office.monthly_opex, m);
    assert_eq!(p.office.annual_capex, c);
    assert_eq!(p.office.startup_cost, s);
}

#[test]
fn given_headings_and_grouped_items_when_aggregating_then_headings_are_ignored() {
    let mut s = CostStructure::new();
    let rent = s.add_heading(CostType::Opex, "Rent").unwrap();
    s.add_item(CostType::Opex, Some(rent), "Lease", "1000").unwrap();
    s.add_item(CostType::Opex, None, "Coffee", "50").unwrap();
    s.add_heading(CostType::Capex, "Empty").unwrap();

    let p = project(&s, &CostStructure::new(), 0.0);

    assert_eq!(p.office.monthly_opex, 1050.0);
    assert_eq!(p.office.annual_capex, 0.0);
}

#[test]
fn given_worked_example_when_comparing_at_one_year_then_coworking_is_cheaper() {
    let office = structure("1000", "5000", "2000");
    let coworking = structure("1200", "0", "500");

    let p = project(&office, &coworking, 0.0);
    let cmp = p.compare(Horizon::OneYear);

    assert_eq!(cmp.office_total, 19000.0);
    assert_eq!(cmp.coworking_total, 14900.0);
    assert_eq!(cmp.difference, 4100.0);
    assert!((cmp.percentage - 21.578947).abs() < 1e-4);
    assert_eq!(format!("{:.1}", cmp.percentage), "21.6");
    assert_eq!(cmp.cheaper, Cheaper::Coworking);
    assert_eq!(cmp.monthly_average(spacecost::domain::Side::Office), 1583.0);
}

#[rstest]
#[case(Horizon::OneYear, 12)]
#[case(Horizon::ThreeYears, 36)]
#[case(Horizon::FiveYears, 60)]
fn given_horizon_when_selecting_then_indexes_month_minus_one(
    #[case] horizon: Horizon,
    #[case] month: u32,
) {
    let p = project(&structure("10", "100", "1"), &structure("20", "0", "0"), 0.0);

    let point = p.at(horizon);

    assert_eq!(point.month, month);
    assert_eq!(p.up_to(horizon).len(), month as usize);
}

#[test]
fn given_non_negative_costs_when_projecting_then_series_never_decreases() {
    let p = project(&structure("17.3", "999", "40"), &structure("0", "1", "0"), 0.0);

    for pair in p.points.windows(2) {
        assert!(pair[1].office >= pair[0].office);
        assert!(pair[1].coworking >= pair[0].coworking);
    }
}

#[test]
fn given_zero_totals_when_comparing_then_percentage_is_zero() {
    let point = ProjectionPoint {
        month: 12,
        office: 0.0,
        coworking: 0.0,
    };

    let cmp = Comparison::new(point, Horizon::OneYear);

    assert_eq!(cmp.percentage, 0.0);
    assert_eq!(cmp.difference, 0.0);
    assert_eq!(cmp.cheaper, Cheaper::Even);
}

#[test]
fn given_office_cheaper_when_comparing_then_office_wins() {
    let point = ProjectionPoint {
        month: 36,
        office: 800.0,
        coworking: 1000.0,
    };

    let cmp = Comparison::new(point, Horizon::ThreeYears);

    assert_eq!(cmp.cheaper, Cheaper::Office);
    assert_eq!(cmp.percentage, 20.0);
}

#[test]
fn given_growth_rate_when_projecting_then_opex_compounds_per_year() {
    let office = structure("1000", "0", "0");

    let flat = project(&office, &CostStructure::new(), 0.0);
    let grown = project(&office, &CostStructure::new(), 10.0);

    assert_eq!(grown.points[11].office, flat.points[11].office);
    assert_eq!(grown.points[12].office, 12000.0 + 1100.0);
    assert_eq!(grown.points[24].office, 12000.0 + 13200.0 + 1210.0);
}

#[test]
fn given_same_input_when_projecting_twice_then_identical() {
    let office = structure("1", "2", "3");
    let coworking = structure("4", "5", "6");

    assert_eq!(
        project(&office, &coworking, 0.0),
        project(&office, &coworking, 0.0)
    );
}
