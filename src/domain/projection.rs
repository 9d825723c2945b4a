//! Cumulative cost projection for both structures.
//!
//! Pure and deterministic: the same structures and growth rate always give
//! the same series. All 60 months are computed regardless of the display
//! horizon, so changing the horizon is just an index into the series.

use crate::domain::entities::{CostType, Horizon, Side, PROJECTION_MONTHS};
use crate::domain::store::CostStructure;

/// Per-type sums for one structure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostAggregates {
    pub monthly_opex: f64,
    pub annual_capex: f64,
    pub startup_cost: f64,
}

impl CostAggregates {
    pub fn of(structure: &CostStructure) -> Self {
        Self {
            monthly_opex: structure.total(CostType::Opex),
            annual_capex: structure.total(CostType::Capex),
            startup_cost: structure.total(CostType::Startup),
        }
    }

    /// Unrounded cumulative totals for months 1..=60.
    fn cumulative(&self, growth_rate: f64) -> Vec<f64> {
        let growth = 1.0 + growth_rate / 100.0;
        let mut total = self.startup_cost;
        let mut series = Vec::with_capacity(PROJECTION_MONTHS as usize);
        for month in 1..=PROJECTION_MONTHS {
            let year = (month - 1) / 12;
            total += self.monthly_opex * growth.powi(year as i32);
            if month % 12 == 0 {
                total += self.annual_capex;
            }
            series.push(total);
        }
        series
    }
}

/// Cumulative totals of both structures at one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPoint {
    pub month: u32,
    pub office: f64,
    pub coworking: f64,
}

impl ProjectionPoint {
    pub fn total(&self, side: Side) -> f64 {
        match side {
            Side::Office => self.office,
            Side::Coworking => self.coworking,
        }
    }
}

/// Output of the projection engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub points: Vec<ProjectionPoint>,
    pub office: CostAggregates,
    pub coworking: CostAggregates,
}

impl Projection {
    pub fn aggregates(&self, side: Side) -> &CostAggregates {
        match side {
            Side::Office => &self.office,
            Side::Coworking => &self.coworking,
        }
    }

    /// The point at the last month of `horizon`.
    pub fn at(&self, horizon: Horizon) -> ProjectionPoint {
        self.points[horizon.months() as usize - 1]
    }

    /// Points for months 1..=horizon, the slice a chart displays.
    pub fn up_to(&self, horizon: Horizon) -> &[ProjectionPoint] {
        &self.points[..horizon.months() as usize]
    }

    pub fn compare(&self, horizon: Horizon) -> Comparison {
        Comparison::new(self.at(horizon), horizon)
    }
}

/// Project cumulative spend of both structures over 60 months.
///
/// `growth_rate` is an annual percentage applied to monthly OpEx once per
/// year; 0 leaves OpEx flat.
pub fn project(office: &CostStructure, coworking: &CostStructure, growth_rate: f64) -> Projection {
    let office_agg = CostAggregates::of(office);
    let coworking_agg = CostAggregates::of(coworking);

    let points = office_agg
        .cumulative(growth_rate)
        .into_iter()
        .zip(coworking_agg.cumulative(growth_rate))
        .zip(1..=PROJECTION_MONTHS)
        .map(|((o, c), month)| ProjectionPoint {
            month,
            office: o.round(),
            coworking: c.round(),
        })
        .collect();

    Projection {
        points,
        office: office_agg,
        coworking: coworking_agg,
    }
}

/// Which option costs less at the selected horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheaper {
    Office,
    Coworking,
    Even,
}

/// Derived values shown in the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub horizon: Horizon,
    pub office_total: f64,
    pub coworking_total: f64,
    pub difference: f64,
    pub percentage: f64,
    pub cheaper: Cheaper,
}

impl Comparison {
    pub fn new(point: ProjectionPoint, horizon: Horizon) -> Self {
        let office_total = point.office;
        let coworking_total = point.coworking;
        let difference = (office_total - coworking_total).abs();
        let larger = office_total.max(coworking_total);
        let percentage = if larger > 0.0 {
            difference / larger * 100.0
        } else {
            0.0
        };
        let cheaper = if coworking_total < office_total {
            Cheaper::Coworking
        } else if office_total < coworking_total {
            Cheaper::Office
        } else {
            Cheaper::Even
        };
        Self {
            horizon,
            office_total,
            coworking_total,
            difference,
            percentage,
            cheaper,
        }
    }

    pub fn total(&self, side: Side) -> f64 {
        match side {
            Side::Office => self.office_total,
            Side::Coworking => self.coworking_total,
        }
    }

    /// Average monthly spend over the horizon, rounded.
    pub fn monthly_average(&self, side: Side) -> f64 {
        (self.total(side) / self.horizon.months() as f64).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_applies_startup_once_and_capex_yearly() {
        let agg = CostAggregates {
            monthly_opex: 10.0,
            annual_capex: 100.0,
            startup_cost: 5.0,
        };
        let series = agg.cumulative(0.0);
        assert_eq!(series.len(), 60);
        assert_eq!(series[0], 15.0);
        assert_eq!(series[10], 115.0);
        assert_eq!(series[11], 225.0);
    }

    #[test]
    fn growth_compounds_from_second_year() {
        let agg = CostAggregates {
            monthly_opex: 100.0,
            ..Default::default()
        };
        let series = agg.cumulative(10.0);
        assert_eq!(series[11], 1200.0);
        assert!((series[12] - 1310.0).abs() < 1e-9);
    }
}
