//! Calculator session: both cost structures plus display settings
//!
//! Every successful mutation recomputes the projection before returning, so
//! readers always see a projection that matches the current structures.
//! Rejected mutations are dropped silently (a debug event is the only trace).

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    copy_items, currency_symbol, project, Comparison, CostStructure, CostType, DomainError,
    Horizon, ItemId, LineItem, Projection, Side, StoreResult,
};

#[derive(Debug, Clone)]
pub struct Session {
    office: CostStructure,
    coworking: CostStructure,
    horizon: Horizon,
    currency: String,
    growth_rate: f64,
    projection: Projection,
}

impl Default for Session {
    fn default() -> Self {
        let settings = Settings::default();
        Self::with_parts(Horizon::default(), settings.currency, settings.growth_rate)
    }
}

impl Session {
    pub fn new(settings: &Settings) -> ApplicationResult<Self> {
        settings.validate()?;
        Ok(Self::with_parts(
            settings.horizon()?,
            settings.currency.clone(),
            settings.growth_rate,
        ))
    }

    fn with_parts(horizon: Horizon, currency: String, growth_rate: f64) -> Self {
        let office = CostStructure::new();
        let coworking = CostStructure::new();
        let projection = project(&office, &coworking, growth_rate);
        Self {
            office,
            coworking,
            horizon,
            currency,
            growth_rate,
            projection,
        }
    }

    pub fn structure(&self, side: Side) -> &CostStructure {
        match side {
            Side::Office => &self.office,
            Side::Coworking => &self.coworking,
        }
    }

    fn structure_mut(&mut self, side: Side) -> &mut CostStructure {
        match side {
            Side::Office => &mut self.office,
            Side::Coworking => &mut self.coworking,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn currency_symbol(&self) -> String {
        currency_symbol(&self.currency)
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Comparison of both sides at the selected horizon.
    pub fn comparison(&self) -> Comparison {
        self.projection.compare(self.horizon)
    }

    pub fn set_horizon(&mut self, horizon: Horizon) {
        // the series always spans 60 months; no recompute needed
        self.horizon = horizon;
    }

    pub fn set_currency(&mut self, code: &str) {
        self.currency = code.trim().to_string();
    }

    pub fn set_growth_rate(&mut self, rate: f64) {
        self.growth_rate = if rate.is_finite() { rate } else { 0.0 };
        self.recompute();
    }

    pub fn add_heading(&mut self, side: Side, cost_type: CostType, name: &str) -> Option<ItemId> {
        let result = self.structure_mut(side).add_heading(cost_type, name);
        self.settle(side, "add heading", result)
    }

    pub fn add_item(
        &mut self,
        side: Side,
        cost_type: CostType,
        parent_id: Option<ItemId>,
        name: &str,
        cost: &str,
    ) -> Option<ItemId> {
        let result = self
            .structure_mut(side)
            .add_item(cost_type, parent_id, name, cost);
        self.settle(side, "add item", result)
    }

    /// Returns false when the edit was cancelled or the id is unknown.
    pub fn edit_item(&mut self, side: Side, id: ItemId, new_name: &str, new_cost: &str) -> bool {
        let result = self.structure_mut(side).edit_item(id, new_name, new_cost);
        self.settle(side, "edit item", result).is_some()
    }

    /// Returns how many items were removed.
    pub fn remove_item(&mut self, side: Side, id: ItemId) -> usize {
        let removed = self.structure_mut(side).remove_item(id);
        if removed > 0 {
            self.recompute();
        }
        removed
    }

    /// Copy a heading and all its children to the other side.
    pub fn copy_category(&mut self, from: Side, heading_id: ItemId) -> Vec<ItemId> {
        let selection = self.structure(from).category_selection(heading_id);
        match self.settle(from, "copy category", selection) {
            Some(selection) => self.copy_selection(from, &selection),
            None => Vec::new(),
        }
    }

    /// Copy a single item to the other side.
    pub fn copy_item(&mut self, from: Side, id: ItemId) -> Vec<ItemId> {
        let selection = self.structure(from).item_selection(id);
        match self.settle(from, "copy item", selection) {
            Some(selection) => self.copy_selection(from, &selection),
            None => Vec::new(),
        }
    }

    /// Copy an arbitrary selection taken from `from` into the other side.
    #[instrument(level = "debug", skip(self, selection))]
    pub fn copy_selection(&mut self, from: Side, selection: &[LineItem]) -> Vec<ItemId> {
        let copied = copy_items(selection, self.structure_mut(from.other()));
        if !copied.is_empty() {
            self.recompute();
        }
        copied
    }

    /// Resolve an id prefix within one side.
    pub fn resolve(&self, side: Side, prefix: &str) -> Result<ItemId, DomainError> {
        self.structure(side).resolve_prefix(prefix)
    }

    /// Recompute after success; log and drop on rejection.
    fn settle<T>(&mut self, side: Side, action: &str, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.recompute();
                Some(value)
            }
            Err(e) => {
                debug!("{} on {} rejected: {}", action, side, e);
                None
            }
        }
    }

    fn recompute(&mut self) {
        self.projection = project(&self.office, &self.coworking, self.growth_rate);
    }
}
