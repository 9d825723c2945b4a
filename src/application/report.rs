//! Plain-text rendering of a session: summary, table, chart and item trees
//!
//! Output is uncolored so it can be tested and piped; the CLI adds color to
//! headers only.

use std::fmt::Write;

use itertools::Itertools;
use termtree::Tree;

use crate::application::Session;
use crate::domain::{Cheaper, CostStructure, CostType, ItemId, LineItem, Side};

const CHART_WIDTH: usize = 40;

/// Format an amount with thousands separators: `1234567.0` → `1,234,567`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .join(",");
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}")
}

/// Totals, averages and savings at the session's horizon.
pub fn summary(session: &Session) -> String {
    let symbol = session.currency_symbol();
    let cmp = session.comparison();
    let horizon = cmp.horizon;
    let mut out = String::new();

    let _ = writeln!(out, "{}-Year Total Cost Comparison", horizon.years());
    for side in [Side::Office, Side::Coworking] {
        let _ = writeln!(
            out,
            "  {:<20} {:>14}   (~{}/mo avg)",
            side.label(),
            format_amount(&symbol, cmp.total(side)),
            format_amount(&symbol, cmp.monthly_average(side)),
        );
    }
    let _ = writeln!(out);

    let winner = match cmp.cheaper {
        Cheaper::Coworking => Some("Co-working"),
        Cheaper::Office => Some("Traditional Office"),
        Cheaper::Even => None,
    };
    match winner {
        Some(name) => {
            let _ = writeln!(
                out,
                "{} saves you {} ({:.1}% cost reduction over {})",
                name,
                format_amount(&symbol, cmp.difference),
                cmp.percentage,
                horizon
            );
        }
        None => {
            let _ = writeln!(out, "Both options cost the same over {}", horizon);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Cost breakdown:");
    for side in [Side::Office, Side::Coworking] {
        let agg = session.projection().aggregates(side);
        let _ = writeln!(
            out,
            "  {:<20} opex {}/mo, capex {}/yr, startup {}",
            side.label(),
            format_amount(&symbol, agg.monthly_opex),
            format_amount(&symbol, agg.annual_capex),
            format_amount(&symbol, agg.startup_cost),
        );
    }
    if session.growth_rate() != 0.0 {
        let _ = writeln!(
            out,
            "  OpEx grows {}% per year",
            session.growth_rate()
        );
    }
    out
}

/// Month-by-month cumulative totals up to the horizon.
pub fn table(session: &Session) -> String {
    let symbol = session.currency_symbol();
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:>14}  {:>14}", "Month", "Office", "Co-working");
    for point in session.projection().up_to(session.horizon()) {
        let _ = writeln!(
            out,
            "{:>5}  {:>14}  {:>14}",
            point.month,
            format_amount(&symbol, point.office),
            format_amount(&symbol, point.coworking),
        );
    }
    out
}

/// Horizontal bar chart of cumulative spend, one pair of bars per month.
///
/// Bars are scaled to the largest total shown; `step` thins out the months
/// (every `step`th month plus the last one).
pub fn chart(session: &Session, step: usize) -> String {
    let symbol = session.currency_symbol();
    let points = session.projection().up_to(session.horizon());
    let max = points
        .iter()
        .map(|p| p.office.max(p.coworking))
        .fold(0.0_f64, f64::max);
    let step = step.max(1);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cumulative Cost Projection ({} months)  O = office, C = co-working",
        points.len()
    );
    for (idx, point) in points.iter().enumerate() {
        let month = idx + 1;
        if month % step != 0 && month != points.len() {
            continue;
        }
        let _ = writeln!(
            out,
            "{:>3} O {:<width$} {}",
            point.month,
            bar(point.office, max),
            format_amount(&symbol, point.office),
            width = CHART_WIDTH
        );
        let _ = writeln!(
            out,
            "    C {:<width$} {}",
            bar(point.coworking, max),
            format_amount(&symbol, point.coworking),
            width = CHART_WIDTH
        );
    }
    out
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * CHART_WIDTH as f64).round() as usize;
    "█".repeat(len.min(CHART_WIDTH))
}

/// Item tree of one side, grouped by cost type.
///
/// Children of headings listed in `collapsed` are hidden.
pub fn item_tree(session: &Session, side: Side, collapsed: &[ItemId]) -> Tree<String> {
    let symbol = session.currency_symbol();
    let structure = session.structure(side);
    let mut root = Tree::new(side.label().to_string());
    for cost_type in CostType::ALL {
        root.push(type_tree(structure, cost_type, collapsed, &symbol));
    }
    root
}

fn type_tree(
    structure: &CostStructure,
    cost_type: CostType,
    collapsed: &[ItemId],
    symbol: &str,
) -> Tree<String> {
    let total = structure.total(cost_type);
    let mut node = Tree::new(format!(
        "{} ({})",
        cost_type.label(),
        format_amount(symbol, total)
    ));
    let index = structure.children_index();
    for heading in structure.headings(cost_type) {
        let children = index.get(&heading.id).map(Vec::as_slice).unwrap_or(&[]);
        let subtotal: f64 = children.iter().filter_map(|c| c.cost()).sum();
        let hidden = collapsed.contains(&heading.id);
        let marker = if hidden { "▸" } else { "▾" };
        let mut heading_node = Tree::new(format!(
            "{} {} [{}] {}",
            marker,
            heading.name,
            heading.id.short(),
            format_amount(symbol, subtotal)
        ));
        if !hidden {
            for child in children {
                heading_node.push(Tree::new(entry_label(child, symbol)));
            }
        }
        node.push(heading_node);
    }
    for entry in structure.ungrouped(cost_type) {
        node.push(Tree::new(entry_label(entry, symbol)));
    }
    node
}

fn entry_label(item: &LineItem, symbol: &str) -> String {
    format!(
        "{} [{}] {}",
        item.name,
        item.id.short(),
        format_amount(symbol, item.cost().unwrap_or_default())
    )
}
