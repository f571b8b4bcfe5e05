//! Column design - ACI 318M-25 Chapters 10 and 25
//!
//! Longitudinal steel sizing (1-8% of gross area, minimum four bars),
//! confinement design, slenderness magnification and the simplified
//! P-M interaction check.
//!
//! # Example
//! ```
//! use rc_core::calculations::axial::{ColumnSection, Confinement};
//! use rc_core::calculations::column::{design_column, ColumnInput};
//! use rc_core::materials::{ConcreteClass, SteelGrade};
//!
//! let input = ColumnInput {
//!     label: "C1".into(),
//!     section: ColumnSection::rectangular(400.0, 400.0, 40.0),
//!     confinement: Confinement::Tied,
//!     effective_length_mm: 3000.0,
//!     concrete: ConcreteClass::Fc28,
//!     steel: SteelGrade::G420,
//!     pu_kn: 2000.0,
//!     mux_knm: 0.0,
//!     muy_knm: 0.0,
//! };
//! let design = design_column(&input).unwrap();
//! assert!(design.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::axial::{
    axial_capacity_kn, check_slenderness, interaction_ratio, spiral_design, tie_design,
    ColumnSection, ColumnShape, Confinement, Slenderness, SpiralDesign,
};
use crate::errors::{DesignError, DesignResult};
use crate::materials::rebar::{BarGroup, BarSelection, BarSize};
use crate::materials::{ConcreteClass, MaterialProperties, SteelGrade};

/// Longitudinal reinforcement limits - ACI 318M-25 Section 10.6.1
const MIN_STEEL_RATIO: f64 = 0.01;
const MAX_STEEL_RATIO: f64 = 0.08;
const MIN_BAR_COUNT: u32 = 4;

/// Column design input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInput {
    pub label: String,
    pub section: ColumnSection,
    pub confinement: Confinement,
    /// Unsupported length lu (mm); k = 1.0 assumed
    pub effective_length_mm: f64,
    pub concrete: ConcreteClass,
    pub steel: SteelGrade,
    /// Factored axial load (kN)
    pub pu_kn: f64,
    /// Factored moment about x (kN·m)
    pub mux_knm: f64,
    /// Factored moment about y (kN·m)
    pub muy_knm: f64,
}

impl ColumnInput {
    pub fn validate(&self) -> DesignResult<()> {
        self.section.validate()?;
        if self.pu_kn <= 0.0 {
            return Err(DesignError::invalid_input(
                "pu_kn",
                self.pu_kn.to_string(),
                "Factored axial load must be positive",
            ));
        }
        if self.effective_length_mm <= 0.0 {
            return Err(DesignError::invalid_input(
                "effective_length_mm",
                self.effective_length_mm.to_string(),
                "Effective length must be positive",
            ));
        }
        if self.confinement == Confinement::Spiral && self.section.shape != ColumnShape::Circular {
            return Err(DesignError::invalid_input(
                "confinement",
                "Spiral",
                "Spiral confinement requires a circular section",
            ));
        }
        Ok(())
    }
}

/// Complete column design result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDesign {
    /// Required longitudinal steel area (mm²)
    pub required_area_mm2: f64,

    /// Selected longitudinal bars
    pub bars: BarSelection,

    /// Design axial capacity φPn at the provided steel area (kN)
    pub axial_capacity_kn: f64,

    /// P-M interaction ratio after slenderness magnification
    pub interaction: f64,

    pub slenderness: Slenderness,

    /// Tie design for tied columns
    pub ties: Option<(BarSize, f64)>,

    /// Spiral design for spiral columns
    pub spiral: Option<SpiralDesign>,

    pub notes: Vec<String>,
}

impl ColumnDesign {
    /// Whether the column is adequate
    pub fn passes(&self) -> bool {
        self.interaction <= 1.0
    }

    pub fn utilization(&self) -> f64 {
        self.interaction
    }
}

/// Select longitudinal bars for a required area
///
/// Prefers a uniform arrangement: the first bar size (20M and up) whose
/// rounded count is at least four and lands within 10% of the required
/// area. Falls back to a greedy largest-first combination padded with
/// 20M bars up to the four-bar minimum.
pub fn select_column_bars(required_area_mm2: f64) -> BarSelection {
    const CANDIDATES: [BarSize; 6] = [
        BarSize::M20,
        BarSize::M25,
        BarSize::M30,
        BarSize::M35,
        BarSize::M45,
        BarSize::M55,
    ];

    for bar in CANDIDATES {
        let count = (required_area_mm2 / bar.area_mm2()).round() as u32;
        if count >= MIN_BAR_COUNT {
            let provided = count as f64 * bar.area_mm2();
            if (provided - required_area_mm2).abs() / required_area_mm2 < 0.1 {
                return BarSelection {
                    groups: vec![BarGroup { size: bar, count }],
                    provided_area_mm2: provided,
                };
            }
        }
    }

    // Greedy combination, largest bars first
    let mut groups: Vec<BarGroup> = Vec::new();
    let mut remaining = required_area_mm2;
    for bar in CANDIDATES.iter().rev() {
        let count = (remaining / bar.area_mm2()).floor() as u32;
        if count > 0 {
            groups.push(BarGroup { size: *bar, count });
            remaining -= count as f64 * bar.area_mm2();
            if remaining <= 0.0 {
                break;
            }
        }
    }

    let mut total: u32 = groups.iter().map(|g| g.count).sum();
    while total < MIN_BAR_COUNT {
        match groups.iter_mut().find(|g| g.size == BarSize::M20) {
            Some(g) => g.count += 1,
            None => groups.push(BarGroup {
                size: BarSize::M20,
                count: 1,
            }),
        }
        total += 1;
    }

    let provided = groups.iter().map(|g| g.area_mm2()).sum();
    BarSelection {
        groups,
        provided_area_mm2: provided,
    }
}

/// Required longitudinal steel area (mm²)
///
/// Starts at the 1% gross-area minimum; when the moment eccentricity
/// exceeds the section kern an approximate lever-arm demand is added.
/// Capped at the 8% maximum.
fn required_steel_area(input: &ColumnInput, props: &MaterialProperties) -> f64 {
    let ag = input.section.gross_area_mm2();
    let mut required = MIN_STEEL_RATIO * ag;

    let mu = input.mux_knm.abs().max(input.muy_knm.abs());
    if mu > 0.0 {
        let kern = input.pu_kn * input.section.width_mm / 6.0 / 1000.0;
        if kern > 0.0 && mu / kern > 1.0 {
            let lever_arm = match input.section.shape {
                ColumnShape::Rectangular => 0.8 * input.section.depth_mm,
                ColumnShape::Circular => 0.6 * input.section.width_mm,
            };
            let as_moment = mu * 1e6 / (props.fy * lever_arm);
            required = required.max(as_moment);
        }
    }

    required.min(MAX_STEEL_RATIO * ag)
}

/// Design a column for factored axial load and biaxial moments
pub fn design_column(input: &ColumnInput) -> DesignResult<ColumnDesign> {
    input.validate()?;
    let props = MaterialProperties::resolve(input.concrete, input.steel);

    let required = required_steel_area(input, &props);
    let bars = select_column_bars(required);
    let provided = bars.provided_area_mm2;

    let (ties, spiral) = match input.confinement {
        Confinement::Tied => {
            let long_bar = bars.largest().unwrap_or(BarSize::M20);
            (Some(tie_design(&input.section, long_bar)), None)
        }
        Confinement::Spiral => (None, Some(spiral_design(&input.section, &props)?)),
    };

    let slenderness = check_slenderness(
        &input.section,
        input.effective_length_mm,
        input.mux_knm.abs().min(input.muy_knm.abs()),
        input.mux_knm.abs().max(input.muy_knm.abs()),
    );

    // Magnified moments feed the interaction check
    let mux = input.mux_knm * slenderness.magnification;
    let muy = input.muy_knm * slenderness.magnification;
    let interaction = interaction_ratio(
        &input.section,
        input.confinement,
        &props,
        provided,
        input.pu_kn,
        mux,
        muy,
    );

    let pn = axial_capacity_kn(&input.section, input.confinement, &props, provided);
    let phi_pn = input.confinement.phi() * pn;

    let mut notes = Vec::new();
    if slenderness.required {
        notes.push(format!(
            "Slenderness effects considered (magnification {:.2})",
            slenderness.magnification
        ));
    }
    if provided > required * 1.5 {
        notes.push("Consider reducing steel area or increasing section size".to_string());
    }
    if interaction > 1.0 {
        notes.push("Section inadequate - increase size or steel".to_string());
    }

    Ok(ColumnDesign {
        required_area_mm2: required,
        bars,
        axial_capacity_kn: phi_pn,
        interaction,
        slenderness,
        ties,
        spiral,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axial_input() -> ColumnInput {
        ColumnInput {
            label: "C1".into(),
            section: ColumnSection::rectangular(400.0, 400.0, 40.0),
            confinement: Confinement::Tied,
            effective_length_mm: 3000.0,
            concrete: ConcreteClass::Fc28,
            steel: SteelGrade::G420,
            pu_kn: 2000.0,
            mux_knm: 0.0,
            muy_knm: 0.0,
        }
    }

    #[test]
    fn test_axial_column_design() {
        let design = design_column(&axial_input()).unwrap();

        // 1% of 160,000 mm²
        assert_relative_eq!(design.required_area_mm2, 1600.0, epsilon = 0.1);
        assert!(design.bars.bar_count() >= 4);
        assert!(design.passes());
        assert!(design.ties.is_some());
        assert!(design.spiral.is_none());
    }

    #[test]
    fn test_uniform_bar_selection_within_tolerance() {
        // 5×20M = 1500 lands within 10% of 1600
        let bars = select_column_bars(1600.0);
        assert_eq!(bars.groups.len(), 1);
        assert_eq!(bars.groups[0].size, BarSize::M20);
        assert_eq!(bars.groups[0].count, 5);
    }

    #[test]
    fn test_bar_selection_minimum_four_bars() {
        let bars = select_column_bars(400.0);
        assert!(bars.bar_count() >= 4);
    }

    #[test]
    fn test_uniform_selection_prefers_first_matching_size() {
        // 27×20M = 8100 is within 10%, so 20M wins before larger sizes
        let bars = select_column_bars(8000.0);
        assert_eq!(bars.groups.len(), 1);
        assert_eq!(bars.groups[0].size, BarSize::M20);
        assert_eq!(bars.groups[0].count, 27);
        assert_relative_eq!(bars.provided_area_mm2, 8100.0, epsilon = 0.1);
    }

    #[test]
    fn test_slender_column_magnifies_moments() {
        let mut input = axial_input();
        input.effective_length_mm = 4000.0;
        input.mux_knm = 60.0;
        input.muy_knm = 60.0;
        let design = design_column(&input).unwrap();

        // klr = 34.6 exceeds the 22 limit (M1/M2 = 1)
        assert!(design.slenderness.required);
        assert!(design.slenderness.magnification > 1.0);
        assert!(design.notes.iter().any(|n| n.contains("Slenderness")));
    }

    #[test]
    fn test_overloaded_column_reports_inadequacy() {
        let mut input = axial_input();
        input.pu_kn = 4000.0;
        let design = design_column(&input).unwrap();

        assert!(!design.passes());
        assert!(design.notes.iter().any(|n| n.contains("inadequate")));
    }

    #[test]
    fn test_spiral_column() {
        let input = ColumnInput {
            label: "C2".into(),
            section: ColumnSection::circular(450.0, 40.0),
            confinement: Confinement::Spiral,
            effective_length_mm: 3000.0,
            concrete: ConcreteClass::Fc28,
            steel: SteelGrade::G420,
            pu_kn: 1500.0,
            mux_knm: 0.0,
            muy_knm: 0.0,
        };
        let design = design_column(&input).unwrap();
        assert!(design.spiral.is_some());
        assert!(design.ties.is_none());
        assert!(design.passes());
    }

    #[test]
    fn test_spiral_requires_circular_section() {
        let mut input = axial_input();
        input.confinement = Confinement::Spiral;
        assert!(design_column(&input).is_err());
    }

    #[test]
    fn test_rejects_nonpositive_axial_load() {
        let mut input = axial_input();
        input.pu_kn = 0.0;
        assert!(design_column(&input).is_err());
    }
}
