//! Load cases and load combinations per ACI 318M-25 Section 5.3
//!
//! # Overview
//!
//! - [`LoadType`] - Load categories used in the code combinations (D, L, Lr, S, R, W, E)
//! - [`LoadCase`] - A collection of service-level load magnitudes
//! - [`LoadCombination`] - Factors applied to obtain factored design actions
//! - [`CombinationSet`] - Strength vs service combination table selection
//!
//! # Example
//!
//! ```
//! use rc_core::loads::{CombinationSet, LoadCase, LoadType};
//!
//! let loads = LoadCase::new("Floor slab")
//!     .with_load(LoadType::Dead, 6.5)
//!     .with_load(LoadType::Live, 2.4);
//!
//! let governing = loads.governing(CombinationSet::Strength);
//! // 1.2*6.5 + 1.6*2.4 = 11.64 governs
//! assert!((governing.factored_value - 11.64).abs() < 0.001);
//! ```

pub mod combinations;

pub use combinations::{
    aci_service_combinations, aci_strength_combinations, evaluate_combinations,
    find_governing_combination, CombinationResult, LoadCombination,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Load types appearing in the ACI 318M-25 Section 5.3 combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight and permanent attachments)
    Dead,
    /// L - Live load (occupancy)
    Live,
    /// Lr - Roof live load
    RoofLive,
    /// S - Snow load
    Snow,
    /// R - Rain load
    Rain,
    /// W - Wind load
    Wind,
    /// E - Seismic (earthquake) load
    Seismic,
}

impl LoadType {
    /// All load types in standard order
    pub const ALL: [LoadType; 7] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::RoofLive,
        LoadType::Snow,
        LoadType::Rain,
        LoadType::Wind,
        LoadType::Seismic,
    ];

    /// Standard abbreviation code (D, L, Lr, S, R, W, E)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::RoofLive => "Lr",
            LoadType::Snow => "S",
            LoadType::Rain => "R",
            LoadType::Wind => "W",
            LoadType::Seismic => "E",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::RoofLive => "Roof live load",
            LoadType::Snow => "Snow load",
            LoadType::Rain => "Rain load",
            LoadType::Wind => "Wind load",
            LoadType::Seismic => "Seismic load",
        }
    }

    /// Whether this load type is a gravity load (acts downward)
    pub fn is_gravity(&self) -> bool {
        matches!(
            self,
            LoadType::Dead | LoadType::Live | LoadType::RoofLive | LoadType::Snow | LoadType::Rain
        )
    }

    /// Whether this load type is directional (may act in either sense)
    pub fn is_directional(&self) -> bool {
        matches!(self, LoadType::Wind | LoadType::Seismic)
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which combination table to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombinationSet {
    /// Factored strength design combinations - ACI 318M-25 Eq. (5.3.1a)-(5.3.1g)
    #[default]
    Strength,
    /// Unfactored service combinations for deflection and crack checks
    Service,
}

impl CombinationSet {
    /// The combinations of this set, in table order
    pub fn combinations(&self) -> Vec<LoadCombination> {
        match self {
            CombinationSet::Strength => aci_strength_combinations(),
            CombinationSet::Service => aci_service_combinations(),
        }
    }

    /// Short name
    pub fn code(&self) -> &'static str {
        match self {
            CombinationSet::Strength => "strength",
            CombinationSet::Service => "service",
        }
    }
}

/// A collection of service-level load magnitudes by type
///
/// Units depend on context (kN/m², kN/m, kN, kN·m); combinations only
/// scale and sum, so any consistent unit works.
///
/// # JSON Format
/// ```json
/// {
///   "label": "Roof",
///   "loads": { "Dead": 6.5, "Live": 2.4 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    /// User-provided label for this load case
    pub label: String,

    /// Service load magnitudes keyed by type
    pub loads: HashMap<LoadType, f64>,
}

impl LoadCase {
    /// Create a new empty load case with a label
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: HashMap::new(),
        }
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    /// Set a load value (mutable)
    pub fn set_load(&mut self, load_type: LoadType, value: f64) {
        self.loads.insert(load_type, value);
    }

    /// Get the load value for a type, defaulting to 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Check if a load type is defined (even if zero)
    pub fn has(&self, load_type: LoadType) -> bool {
        self.loads.contains_key(&load_type)
    }

    /// Validate the load case: gravity loads must be non-negative
    pub fn validate(&self) -> DesignResult<()> {
        for (load_type, value) in &self.loads {
            if load_type.is_gravity() && *value < 0.0 {
                return Err(DesignError::invalid_input(
                    format!("load_{}", load_type.code()),
                    value.to_string(),
                    format!("{} cannot be negative", load_type.description()),
                ));
            }
        }
        Ok(())
    }

    /// Evaluate every combination of a set against this case, in table order
    pub fn evaluate(&self, set: CombinationSet) -> Vec<CombinationResult> {
        evaluate_combinations(self, &set.combinations())
    }

    /// The governing (maximum) combination of a set; ties keep table order
    pub fn governing(&self, set: CombinationSet) -> CombinationResult {
        find_governing_combination(self, &set.combinations())
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase::new("Unnamed")
    }
}
