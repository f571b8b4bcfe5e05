//! ACI 318M-25 Load Combinations (Section 5.3)
//!
//! The strength set is the fixed table of Eq. (5.3.1a) through (5.3.1g);
//! the service set covers deflection and crack checks. Factor maps carry
//! only the nonzero factors of the published table. The display formula
//! strings reproduce the code text, including the "(Lr or S or R)"
//! alternatives; the factor maps key the governing alternative only.
//!
//! The governing combination is the first one in table order reaching the
//! maximum factored value; a later combination must strictly exceed it to
//! take over. This keeps result records stable across runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{LoadCase, LoadType};

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use rc_core::loads::{LoadCase, LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("Eq. (5.3.1a)", "1.4D", "Dead load only")
///     .with_factor(LoadType::Dead, 1.4);
///
/// let case = LoadCase::new("Footing").with_load(LoadType::Dead, 100.0);
/// assert_eq!(combo.apply(&case), 140.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Code equation identifier (e.g. "Eq. (5.3.1b)")
    pub name: String,

    /// Human-readable formula as printed in the code
    pub formula: String,

    /// Short description of the load scenario
    pub description: String,

    /// Load factors keyed by load type (nonzero factors only)
    pub factors: HashMap<LoadType, f64>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        LoadCombination {
            name: name.into(),
            formula: formula.into(),
            description: description.into(),
            factors: HashMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Apply this combination to a load case, returning the factored total.
    ///
    /// Load types missing from the case contribute zero.
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * case.get(*load_type))
            .sum()
    }

    /// Evaluate against a case, recording the arithmetic for reports
    pub fn evaluate(&self, case: &LoadCase) -> CombinationResult {
        let mut factored_value = 0.0;
        let mut terms: Vec<String> = Vec::new();

        // Iterate in standard type order so the calculation string is stable
        for load_type in LoadType::ALL {
            let factor = self.get_factor(load_type);
            if factor == 0.0 || !case.has(load_type) {
                continue;
            }
            let contribution = factor * case.get(load_type);
            factored_value += contribution;
            if contribution > 0.0 {
                terms.push(format!("{}x{:.1}", factor, case.get(load_type)));
            }
        }

        CombinationResult {
            name: self.name.clone(),
            formula: self.formula.clone(),
            factored_value,
            calculation: if terms.is_empty() {
                "0".to_string()
            } else {
                terms.join(" + ")
            },
        }
    }
}

/// One evaluated combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    /// Combination identifier
    pub name: String,
    /// Formula as printed in the code
    pub formula: String,
    /// Σ(factor × load) over the types present
    pub factored_value: f64,
    /// The arithmetic actually performed, e.g. "1.2x6.5 + 1.6x2.4"
    pub calculation: String,
}

/// Strength design combinations - ACI 318M-25 Eq. (5.3.1a)-(5.3.1g)
pub fn aci_strength_combinations() -> Vec<LoadCombination> {
    vec![
        // (a) 1.4D
        LoadCombination::new("Eq. (5.3.1a)", "1.4D", "Dead load only")
            .with_factor(LoadType::Dead, 1.4),
        // (b) 1.2D + 1.6L + 0.5(Lr or S or R)
        LoadCombination::new(
            "Eq. (5.3.1b)",
            "1.2D + 1.6L + 0.5(Lr or S or R)",
            "Dead and live loads",
        )
        .with_factor(LoadType::Dead, 1.2)
        .with_factor(LoadType::Live, 1.6)
        .with_factor(LoadType::RoofLive, 0.5),
        // (c) 1.2D + 1.6(Lr or S or R) + (1.0L or 0.5W)
        LoadCombination::new(
            "Eq. (5.3.1c)",
            "1.2D + 1.6(Lr or S or R) + (1.0L or 0.5W)",
            "Dead and roof live loads",
        )
        .with_factor(LoadType::Dead, 1.2)
        .with_factor(LoadType::Live, 1.0)
        .with_factor(LoadType::RoofLive, 1.6)
        .with_factor(LoadType::Wind, 0.5),
        // (d) 1.2D + 1.0W + 1.0L + 0.5(Lr or S or R)
        LoadCombination::new(
            "Eq. (5.3.1d)",
            "1.2D + 1.0W + 1.0L + 0.5(Lr or S or R)",
            "Dead, live, and wind loads",
        )
        .with_factor(LoadType::Dead, 1.2)
        .with_factor(LoadType::Live, 1.0)
        .with_factor(LoadType::RoofLive, 0.5)
        .with_factor(LoadType::Wind, 1.0),
        // (e) 1.2D + 1.0E + 1.0L + 0.2S
        LoadCombination::new(
            "Eq. (5.3.1e)",
            "1.2D + 1.0E + 1.0L + 0.2S",
            "Dead, live, and earthquake loads",
        )
        .with_factor(LoadType::Dead, 1.2)
        .with_factor(LoadType::Live, 1.0)
        .with_factor(LoadType::Seismic, 1.0),
        // (f) 0.9D + 1.0W
        LoadCombination::new("Eq. (5.3.1f)", "0.9D + 1.0W", "Dead and wind loads (uplift)")
            .with_factor(LoadType::Dead, 0.9)
            .with_factor(LoadType::Wind, 1.0),
        // (g) 0.9D + 1.0E
        LoadCombination::new(
            "Eq. (5.3.1g)",
            "0.9D + 1.0E",
            "Dead and earthquake loads (uplift)",
        )
        .with_factor(LoadType::Dead, 0.9)
        .with_factor(LoadType::Seismic, 1.0),
    ]
}

/// Service load combinations for deflection and crack checks
pub fn aci_service_combinations() -> Vec<LoadCombination> {
    vec![
        LoadCombination::new("Service-1", "1.0D + 1.0L", "Dead and live loads")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Live, 1.0),
        LoadCombination::new("Service-2", "1.0D + 1.0W", "Dead and wind loads")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Wind, 1.0),
        LoadCombination::new("Service-3", "1.0D + 1.0E", "Dead and earthquake loads")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Seismic, 1.0),
    ]
}

/// Evaluate every combination against a case, preserving table order
pub fn evaluate_combinations(
    case: &LoadCase,
    combinations: &[LoadCombination],
) -> Vec<CombinationResult> {
    combinations.iter().map(|c| c.evaluate(case)).collect()
}

/// Find the governing (maximum) combination.
///
/// Ties are broken by table order: a later combination must STRICTLY
/// exceed the running maximum to replace it, so the first of several
/// equal maxima wins.
pub fn find_governing_combination(
    case: &LoadCase,
    combinations: &[LoadCombination],
) -> CombinationResult {
    let mut governing: Option<CombinationResult> = None;

    for combo in combinations {
        let result = combo.evaluate(case);
        match &governing {
            Some(current) if result.factored_value <= current.factored_value => {}
            _ => governing = Some(result),
        }
    }

    governing.unwrap_or(CombinationResult {
        name: String::new(),
        formula: String::new(),
        factored_value: 0.0,
        calculation: "0".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_combination_count() {
        assert_eq!(aci_strength_combinations().len(), 7);
    }

    #[test]
    fn test_service_combination_count() {
        assert_eq!(aci_service_combinations().len(), 3);
    }

    #[test]
    fn test_dead_only_factor() {
        let combos = aci_strength_combinations();
        let eq_a = combos.iter().find(|c| c.name == "Eq. (5.3.1a)").unwrap();
        assert_eq!(eq_a.get_factor(LoadType::Dead), 1.4);
        assert_eq!(eq_a.get_factor(LoadType::Live), 0.0);
    }

    #[test]
    fn test_apply_combination() {
        let case = LoadCase::new("Test")
            .with_load(LoadType::Dead, 20.0)
            .with_load(LoadType::Live, 40.0);

        let combo = LoadCombination::new("test", "1.2D + 1.6L", "")
            .with_factor(LoadType::Dead, 1.2)
            .with_factor(LoadType::Live, 1.6);
        assert!((combo.apply(&case) - 88.0).abs() < 0.001);
    }

    #[test]
    fn test_scenario_dead_live() {
        // D=6.5, L=2.4: Eq. (5.3.1b) = 1.2*6.5 + 1.6*2.4 = 11.64 governs
        let case = LoadCase::new("Floor")
            .with_load(LoadType::Dead, 6.5)
            .with_load(LoadType::Live, 2.4);

        let governing = find_governing_combination(&case, &aci_strength_combinations());
        assert!((governing.factored_value - 11.64).abs() < 0.005);
        assert_eq!(governing.name, "Eq. (5.3.1b)");
        assert_eq!(governing.calculation, "1.2x6.5 + 1.6x2.4");
    }

    #[test]
    fn test_tie_break_keeps_first_in_table_order() {
        // Seismic-only case: Eq. (5.3.1e) gives 1.2*0 + 1.0*E and
        // Eq. (5.3.1g) gives 0.9*0 + 1.0*E - identical totals.
        let case = LoadCase::new("Seismic only").with_load(LoadType::Seismic, 50.0);

        let governing = find_governing_combination(&case, &aci_strength_combinations());
        assert!((governing.factored_value - 50.0).abs() < 1e-9);
        assert_eq!(governing.name, "Eq. (5.3.1e)");
    }

    #[test]
    fn test_missing_load_contributes_zero() {
        let case = LoadCase::new("Dead only").with_load(LoadType::Dead, 100.0);

        let combos = aci_strength_combinations();
        let eq_b = combos.iter().find(|c| c.name == "Eq. (5.3.1b)").unwrap();
        let result = eq_b.evaluate(&case);
        assert!((result.factored_value - 120.0).abs() < 1e-9);
        assert_eq!(result.calculation, "1.2x100.0");
    }

    #[test]
    fn test_evaluate_preserves_table_order() {
        let case = LoadCase::new("Any").with_load(LoadType::Dead, 10.0);
        let results = evaluate_combinations(&case, &aci_strength_combinations());
        assert_eq!(results.len(), 7);
        assert_eq!(results[0].name, "Eq. (5.3.1a)");
        assert_eq!(results[6].name, "Eq. (5.3.1g)");
    }

    #[test]
    fn test_wind_uplift_combination() {
        let case = LoadCase::new("Roof")
            .with_load(LoadType::Dead, 10.0)
            .with_load(LoadType::Wind, -30.0);

        let combos = aci_strength_combinations();
        let eq_f = combos.iter().find(|c| c.name == "Eq. (5.3.1f)").unwrap();
        // 0.9*10 - 1.0*30 = -21 (net uplift)
        assert!((eq_f.apply(&case) - (-21.0)).abs() < 1e-9);
    }

    #[test]
    fn test_combination_serialization() {
        let combo = LoadCombination::new("Eq. (5.3.1a)", "1.4D", "Dead load only")
            .with_factor(LoadType::Dead, 1.4);

        let json = serde_json::to_string(&combo).unwrap();
        let parsed: LoadCombination = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "Eq. (5.3.1a)");
        assert_eq!(parsed.get_factor(LoadType::Dead), 1.4);
    }

    #[test]
    fn test_empty_table_returns_zero() {
        let case = LoadCase::new("Empty");
        let governing = find_governing_combination(&case, &[]);
        assert_eq!(governing.factored_value, 0.0);
        assert!(governing.name.is_empty());
    }
}
