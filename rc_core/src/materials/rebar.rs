//! # Reinforcing Bar Database
//!
//! Standard deformed bar sizes per ACI 318M-25 Table 25.3.1: metric
//! designations (10M through 55M) plus the imperial series (#3 through #18)
//! for reference. The table is fixed by the code; unknown designations are
//! rejected with a typed error.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::rebar::BarSize;
//!
//! let bar = BarSize::from_designation("25M").unwrap();
//! assert_eq!(bar.area_mm2(), 500.0);
//! assert_eq!(bar.diameter_mm(), 25.2);
//! ```

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Standard reinforcing bar sizes - ACI 318M-25 Table 25.3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarSize {
    // Metric designations
    M10,
    M15,
    M20,
    M25,
    M30,
    M35,
    M45,
    M55,
    // Imperial designations (for reference)
    No3,
    No4,
    No5,
    No6,
    No7,
    No8,
    No9,
    No10,
    No11,
    No14,
    No18,
}

impl BarSize {
    /// All bar sizes, metric first, ascending
    pub const ALL: [BarSize; 19] = [
        BarSize::M10,
        BarSize::M15,
        BarSize::M20,
        BarSize::M25,
        BarSize::M30,
        BarSize::M35,
        BarSize::M45,
        BarSize::M55,
        BarSize::No3,
        BarSize::No4,
        BarSize::No5,
        BarSize::No6,
        BarSize::No7,
        BarSize::No8,
        BarSize::No9,
        BarSize::No10,
        BarSize::No11,
        BarSize::No14,
        BarSize::No18,
    ];

    /// Metric sizes used for main reinforcement selection, ascending.
    /// 10M is reserved for stirrups and ties, so selection starts at 15M.
    pub const SELECTABLE: [BarSize; 7] = [
        BarSize::M15,
        BarSize::M20,
        BarSize::M25,
        BarSize::M30,
        BarSize::M35,
        BarSize::M45,
        BarSize::M55,
    ];

    /// Designation string as printed on drawings ("20M", "#8")
    pub fn designation(&self) -> &'static str {
        match self {
            BarSize::M10 => "10M",
            BarSize::M15 => "15M",
            BarSize::M20 => "20M",
            BarSize::M25 => "25M",
            BarSize::M30 => "30M",
            BarSize::M35 => "35M",
            BarSize::M45 => "45M",
            BarSize::M55 => "55M",
            BarSize::No3 => "#3",
            BarSize::No4 => "#4",
            BarSize::No5 => "#5",
            BarSize::No6 => "#6",
            BarSize::No7 => "#7",
            BarSize::No8 => "#8",
            BarSize::No9 => "#9",
            BarSize::No10 => "#10",
            BarSize::No11 => "#11",
            BarSize::No14 => "#14",
            BarSize::No18 => "#18",
        }
    }

    /// Nominal diameter (mm)
    pub fn diameter_mm(&self) -> f64 {
        match self {
            BarSize::M10 => 11.3,
            BarSize::M15 => 16.0,
            BarSize::M20 => 19.5,
            BarSize::M25 => 25.2,
            BarSize::M30 => 29.9,
            BarSize::M35 => 35.7,
            BarSize::M45 => 43.7,
            BarSize::M55 => 56.4,
            BarSize::No3 => 9.5,
            BarSize::No4 => 12.7,
            BarSize::No5 => 15.9,
            BarSize::No6 => 19.1,
            BarSize::No7 => 22.2,
            BarSize::No8 => 25.4,
            BarSize::No9 => 28.7,
            BarSize::No10 => 32.3,
            BarSize::No11 => 35.8,
            BarSize::No14 => 43.0,
            BarSize::No18 => 57.3,
        }
    }

    /// Nominal cross-sectional area (mm²)
    pub fn area_mm2(&self) -> f64 {
        match self {
            BarSize::M10 => 100.0,
            BarSize::M15 => 200.0,
            BarSize::M20 => 300.0,
            BarSize::M25 => 500.0,
            BarSize::M30 => 700.0,
            BarSize::M35 => 1000.0,
            BarSize::M45 => 1500.0,
            BarSize::M55 => 2500.0,
            BarSize::No3 => 71.0,
            BarSize::No4 => 129.0,
            BarSize::No5 => 200.0,
            BarSize::No6 => 284.0,
            BarSize::No7 => 387.0,
            BarSize::No8 => 510.0,
            BarSize::No9 => 645.0,
            BarSize::No10 => 819.0,
            BarSize::No11 => 1006.0,
            BarSize::No14 => 1452.0,
            BarSize::No18 => 2581.0,
        }
    }

    /// Whether this is a metric (nnM) designation
    pub fn is_metric(&self) -> bool {
        matches!(
            self,
            BarSize::M10
                | BarSize::M15
                | BarSize::M20
                | BarSize::M25
                | BarSize::M30
                | BarSize::M35
                | BarSize::M45
                | BarSize::M55
        )
    }

    /// Case-insensitive lookup from a designation string
    pub fn from_designation(designation: &str) -> DesignResult<Self> {
        static BY_DESIGNATION: Lazy<HashMap<String, BarSize>> = Lazy::new(|| {
            BarSize::ALL
                .iter()
                .map(|bar| (bar.designation().to_uppercase(), *bar))
                .collect()
        });

        BY_DESIGNATION
            .get(&designation.trim().to_uppercase())
            .copied()
            .ok_or_else(|| DesignError::unknown_grade("bar size", designation))
    }

    /// Reinforcement area per meter width at the given spacing (mm²/m)
    pub fn area_per_meter(&self, spacing_mm: f64) -> f64 {
        self.area_mm2() * 1000.0 / spacing_mm
    }

    /// Minimum clear spacing - ACI 318M-25 Section 25.2.1
    ///
    /// `max(25mm, db, 4/3 × aggregate size)`
    pub fn min_spacing_mm(&self, aggregate_mm: f64) -> f64 {
        25.0_f64.max(self.diameter_mm()).max(4.0 / 3.0 * aggregate_mm)
    }
}

impl std::fmt::Display for BarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.designation())
    }
}

/// A group of identical bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub size: BarSize,
    pub count: u32,
}

impl BarGroup {
    /// Total area of the group (mm²)
    pub fn area_mm2(&self) -> f64 {
        self.size.area_mm2() * self.count as f64
    }
}

/// A selected set of bars covering a required steel area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSelection {
    /// Bar groups, largest size first
    pub groups: Vec<BarGroup>,
    /// Total provided area (mm²)
    pub provided_area_mm2: f64,
}

impl BarSelection {
    /// Total bar count across all groups
    pub fn bar_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Largest bar size in the selection, if any
    pub fn largest(&self) -> Option<BarSize> {
        self.groups.first().map(|g| g.size)
    }

    /// Callout string, e.g. "1-25M + 1-15M"
    pub fn callout(&self) -> String {
        self.groups
            .iter()
            .map(|g| format!("{}-{}", g.count, g.size.designation()))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Greedily select main bars to cover a required area.
///
/// Works from the largest selectable size downward, taking whole bars per
/// size; any residual area is covered by one bar of the smallest practical
/// size. Always returns at least one bar.
pub fn select_bars(required_area_mm2: f64) -> BarSelection {
    let smallest = BarSize::SELECTABLE[0];
    let mut groups: Vec<BarGroup> = Vec::new();
    let mut remaining = required_area_mm2;

    for &size in BarSize::SELECTABLE.iter().rev() {
        if remaining <= 0.0 {
            break;
        }
        let count = (remaining / size.area_mm2()) as u32;
        if count > 0 {
            groups.push(BarGroup { size, count });
            remaining -= count as f64 * size.area_mm2();
        }
    }

    if remaining > 0.0 || groups.is_empty() {
        // Merge into an existing smallest-size group if one exists
        if let Some(group) = groups.iter_mut().find(|g| g.size == smallest) {
            group.count += 1;
        } else {
            groups.push(BarGroup {
                size: smallest,
                count: 1,
            });
        }
    }

    let provided: f64 = groups.iter().map(|g| g.area_mm2()).sum();
    debug!(
        "bar selection: required {:.0} mm2 -> {} ({:.0} mm2)",
        required_area_mm2,
        groups
            .iter()
            .map(|g| format!("{}-{}", g.count, g.size))
            .collect::<Vec<_>>()
            .join("+"),
        provided
    );

    BarSelection {
        groups,
        provided_area_mm2: provided,
    }
}

/// Development length modification factors - ACI 318M-25 Section 25.4
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentFactors {
    /// ψt - casting position (1.3 for top bars with >300mm fresh concrete below)
    pub top_bar: f64,
    /// ψe - epoxy coating
    pub epoxy: f64,
    /// ψs - bar size
    pub size: f64,
    /// λ - lightweight concrete
    pub lambda: f64,
}

impl Default for DevelopmentFactors {
    fn default() -> Self {
        DevelopmentFactors {
            top_bar: 1.0,
            epoxy: 1.0,
            size: 1.0,
            lambda: 1.0,
        }
    }
}

/// Tension development length - ACI 318M-25 Eq. (25.4.2.3a)
///
/// `ld = (fy × ψt × ψe × ψs × λ) / (25 × λ × √fc') × db`,
/// not less than `max(300mm, 12·db)`.
pub fn development_length_mm(
    bar: BarSize,
    fc_prime: f64,
    fy: f64,
    factors: DevelopmentFactors,
) -> f64 {
    let db = bar.diameter_mm();

    let numerator = fy * factors.top_bar * factors.epoxy * factors.size * factors.lambda;
    let denominator = 25.0 * factors.lambda * fc_prime.sqrt();
    let ld = numerator / denominator * db;

    let ld_min = 300.0_f64.max(12.0 * db);
    ld.max(ld_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation_roundtrip() {
        for bar in BarSize::ALL {
            let parsed = BarSize::from_designation(bar.designation()).unwrap();
            assert_eq!(parsed, bar);
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(BarSize::from_designation("20m").unwrap(), BarSize::M20);
        assert_eq!(BarSize::from_designation(" #8 ").unwrap(), BarSize::No8);
        assert!(BarSize::from_designation("12M").is_err());
    }

    #[test]
    fn test_metric_table_values() {
        assert_eq!(BarSize::M10.area_mm2(), 100.0);
        assert_eq!(BarSize::M25.area_mm2(), 500.0);
        assert_eq!(BarSize::M55.area_mm2(), 2500.0);
        assert_eq!(BarSize::M15.diameter_mm(), 16.0);
    }

    #[test]
    fn test_area_per_meter() {
        // 15M @ 200mm = 200 * 1000 / 200 = 1000 mm²/m
        assert_eq!(BarSize::M15.area_per_meter(200.0), 1000.0);
    }

    #[test]
    fn test_min_spacing() {
        // 25mm aggregate: 4/3 * 25 = 33.3 governs for small bars
        let s = BarSize::M15.min_spacing_mm(25.0);
        assert!((s - 100.0 / 3.0).abs() < 0.01);
        // Large bar diameter governs
        let s = BarSize::M55.min_spacing_mm(25.0);
        assert_eq!(s, 56.4);
    }

    #[test]
    fn test_select_bars_exact_fit() {
        // 500 mm² = exactly one 25M
        let selection = select_bars(500.0);
        assert_eq!(selection.groups.len(), 1);
        assert_eq!(selection.groups[0].size, BarSize::M25);
        assert_eq!(selection.groups[0].count, 1);
        assert_eq!(selection.provided_area_mm2, 500.0);
    }

    #[test]
    fn test_select_bars_residual_adds_smallest() {
        // 600 mm²: one 25M (500) leaves 100, covered by one extra 15M
        let selection = select_bars(600.0);
        assert!(selection.provided_area_mm2 >= 600.0);
        assert_eq!(selection.largest(), Some(BarSize::M25));
        assert!(selection
            .groups
            .iter()
            .any(|g| g.size == BarSize::M15 && g.count == 1));
    }

    #[test]
    fn test_select_bars_always_returns_a_bar() {
        let selection = select_bars(1.0);
        assert_eq!(selection.bar_count(), 1);
        assert_eq!(selection.groups[0].size, BarSize::M15);
    }

    #[test]
    fn test_select_bars_provides_at_least_required() {
        for required in [150.0, 524.0, 1234.0, 2600.0, 5000.0] {
            let selection = select_bars(required);
            assert!(
                selection.provided_area_mm2 >= required,
                "required {} got {}",
                required,
                selection.provided_area_mm2
            );
        }
    }

    #[test]
    fn test_development_length_minimum_floor() {
        // 20M: computed ld is small, so the max(300, 12db) floor governs
        let ld = development_length_mm(BarSize::M20, 28.0, 420.0, DevelopmentFactors::default());
        assert_eq!(ld, 300.0);
        // 55M: 12db = 676.8 governs over the 300mm floor
        let ld = development_length_mm(BarSize::M55, 28.0, 420.0, DevelopmentFactors::default());
        assert!((ld - 12.0 * 56.4).abs() < 1e-9);
    }

    #[test]
    fn test_development_length_never_below_floor() {
        for bar in BarSize::SELECTABLE {
            let ld = development_length_mm(bar, 28.0, 420.0, DevelopmentFactors::default());
            assert!(ld >= 300.0);
            assert!(ld >= 12.0 * bar.diameter_mm());
        }
    }

    #[test]
    fn test_callout_format() {
        let selection = select_bars(600.0);
        let callout = selection.callout();
        assert!(callout.contains("25M"));
        assert!(callout.contains('+'));
    }
}
