//! Scenario files: TOML descriptions of both cost structures
//!
//! A scenario is replayed through the session's add operations, so the same
//! validation applies as for interactive input. Scenarios are read-only input.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, Session};
use crate::domain::{CostType, Side};

/// Cost as written in the file: a number or free text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CostField {
    Number(f64),
    Text(String),
}

impl CostField {
    /// Raw text handed to the store's cost parser.
    fn as_input(&self) -> String {
        match self {
            CostField::Number(n) => n.to_string(),
            CostField::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemSpec {
    pub name: String,
    pub cost: Option<CostField>,
}

/// A group of items; without `heading` the items are ungrouped.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategorySpec {
    pub heading: Option<String>,
    #[serde(rename = "type")]
    pub cost_type: CostType,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub office: Vec<CategorySpec>,
    pub coworking: Vec<CategorySpec>,
}

/// Counts from replaying a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub skipped: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} item(s) loaded, {} skipped", self.added, self.skipped)
    }
}

impl Scenario {
    pub fn from_toml(content: &str, path: &Path) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::Scenario {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read scenario", path)?;
        let scenario = Self::from_toml(&content, path)?;
        info!("loaded scenario {}", path.display());
        Ok(scenario)
    }

    fn categories(&self, side: Side) -> &[CategorySpec] {
        match side {
            Side::Office => &self.office,
            Side::Coworking => &self.coworking,
        }
    }

    /// Replay the scenario into `session`, skipping rejected entries.
    pub fn apply(&self, session: &mut Session) -> LoadStats {
        let mut stats = LoadStats::default();
        for side in [Side::Office, Side::Coworking] {
            for category in self.categories(side) {
                let parent = match &category.heading {
                    Some(name) => match session.add_heading(side, category.cost_type, name) {
                        Some(id) => {
                            stats.added += 1;
                            Some(id)
                        }
                        None => {
                            warn!("{}: skipping category with empty heading", side);
                            stats.skipped += 1 + category.items.len();
                            continue;
                        }
                    },
                    None => None,
                };
                for item in &category.items {
                    let cost = item.cost.as_ref().map(CostField::as_input).unwrap_or_default();
                    match session.add_item(side, category.cost_type, parent, &item.name, &cost) {
                        Some(_) => stats.added += 1,
                        None => {
                            warn!("{}: skipping item {:?}", side, item.name);
                            stats.skipped += 1;
                        }
                    }
                }
            }
        }
        stats
    }
}

/// Load a scenario file into a fresh session built from `base`.
pub fn open_session(path: &Path, base: Session) -> ApplicationResult<(Session, LoadStats)> {
    let path: PathBuf = crate::config::expand_path(path);
    let scenario = Scenario::load(&path)?;
    let mut session = base;
    let stats = scenario.apply(&mut session);
    Ok((session, stats))
}
