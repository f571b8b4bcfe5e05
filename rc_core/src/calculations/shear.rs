//! Shear design - ACI 318M-25 Sections 22.5 and 22.6
//!
//! One-way shear with three-branch stirrup logic (none / minimum /
//! strength-designed) and two-way punching shear capacity at the
//! critical perimeter d/2 from the column face.
//!
//! # Example
//! ```
//! use rc_core::calculations::section::RectSection;
//! use rc_core::calculations::shear::{design_stirrups, StirrupRequirement};
//! use rc_core::materials::{ConcreteClass, MaterialProperties, SteelGrade};
//!
//! let section = RectSection::new(300.0, 600.0, 550.0, 40.0);
//! let props = MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420);
//!
//! let stirrups = design_stirrups(300.0, &section, &props).unwrap();
//! assert_eq!(stirrups.requirement, StirrupRequirement::Strength);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::section::RectSection;
use crate::errors::{DesignError, DesignResult};
use crate::factors::FailureMode;
use crate::materials::rebar::BarSize;
use crate::materials::MaterialProperties;

/// Minimum practical stirrup spacing before escalating the bar size (mm)
const MIN_PRACTICAL_SPACING_MM: f64 = 75.0;

/// Why stirrups are (or are not) provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StirrupRequirement {
    /// Vu ≤ φVc/2, no shear reinforcement needed
    NotRequired,
    /// φVc/2 < Vu ≤ φVc, code-minimum stirrups
    Minimum,
    /// Vu > φVc, stirrups sized for the shear demand
    Strength,
}

impl StirrupRequirement {
    pub fn description(&self) -> &'static str {
        match self {
            StirrupRequirement::NotRequired => "No shear reinforcement required",
            StirrupRequirement::Minimum => "Minimum shear reinforcement",
            StirrupRequirement::Strength => "Stirrups designed for shear demand",
        }
    }
}

/// Result of stirrup design for one-way shear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StirrupDesign {
    /// Which branch of the shear provisions applied
    pub requirement: StirrupRequirement,

    /// Stirrup bar size, None when no reinforcement is required
    pub bar: Option<BarSize>,

    /// Stirrup spacing (mm), zero when no reinforcement is required
    pub spacing_mm: f64,

    /// Concrete design shear capacity φVc (kN)
    pub concrete_capacity_kn: f64,
}

/// Concrete one-way shear capacity Vc = 0.17·λ·√fc'·b·d (kN, nominal)
pub fn concrete_shear_kn(section: &RectSection, props: &MaterialProperties, lambda: f64) -> f64 {
    0.17 * lambda * props.fc_prime.sqrt() * section.width_mm * section.effective_depth_mm / 1000.0
}

/// Design transverse reinforcement for a factored shear force
///
/// Two-legged vertical stirrups starting at 10M; escalates once to 15M
/// when the computed spacing drops below the practical minimum.
pub fn design_stirrups(
    vu_kn: f64,
    section: &RectSection,
    props: &MaterialProperties,
) -> DesignResult<StirrupDesign> {
    section.validate()?;
    if vu_kn < 0.0 {
        return Err(DesignError::invalid_input(
            "vu_kn",
            vu_kn.to_string(),
            "Factored shear must be non-negative",
        ));
    }

    let phi = FailureMode::Shear.phi();
    let vc_kn = concrete_shear_kn(section, props, 1.0);
    let phi_vc_kn = phi * vc_kn;

    if vu_kn <= phi_vc_kn / 2.0 {
        return Ok(StirrupDesign {
            requirement: StirrupRequirement::NotRequired,
            bar: None,
            spacing_mm: 0.0,
            concrete_capacity_kn: phi_vc_kn,
        });
    }

    let d = section.effective_depth_mm;
    let s_limit = (d / 2.0).min(600.0);

    if vu_kn <= phi_vc_kn {
        // Av,min per unit length - ACI 318M-25 Section 9.6.3.4
        let av_min_per_mm = (0.062 * props.fc_prime.sqrt() * section.width_mm / props.fy)
            .max(0.35 * section.width_mm / props.fy);
        let av = 2.0 * BarSize::M10.area_mm2();
        let spacing = (av / av_min_per_mm).min(s_limit);

        return Ok(StirrupDesign {
            requirement: StirrupRequirement::Minimum,
            bar: Some(BarSize::M10),
            spacing_mm: spacing,
            concrete_capacity_kn: phi_vc_kn,
        });
    }

    // Vs = Av·fy·d / s, demand Vs = Vu/φ − Vc
    let vs_required_n = (vu_kn / phi - vc_kn) * 1000.0;
    let mut bar = BarSize::M10;
    let mut av = 2.0 * bar.area_mm2();
    let mut spacing = (av * props.fy * d / vs_required_n).min(s_limit);

    if spacing < MIN_PRACTICAL_SPACING_MM {
        debug!(
            "10M stirrup spacing {:.0} mm below practical minimum, escalating to 15M",
            spacing
        );
        bar = BarSize::M15;
        av = 2.0 * bar.area_mm2();
        spacing = (av * props.fy * d / vs_required_n).min(s_limit);
    }

    Ok(StirrupDesign {
        requirement: StirrupRequirement::Strength,
        bar: Some(bar),
        spacing_mm: spacing,
        concrete_capacity_kn: phi_vc_kn,
    })
}

/// Two-way punching shear capacity at the critical perimeter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchingCapacity {
    /// Critical perimeter bo at d/2 from the column faces (mm)
    pub perimeter_mm: f64,

    /// Governing shear stress vc = min of the three code equations (MPa)
    pub stress_mpa: f64,

    /// Design capacity φVn (kN)
    pub design_capacity_kn: f64,
}

/// Result of a punching shear check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchingShearCheck {
    pub capacity: PunchingCapacity,
    pub vu_kn: f64,
    pub utilization: f64,
    pub adequate: bool,
}

/// Punching shear capacity for an interior rectangular column
/// - ACI 318M-25 Section 22.6.5.2
///
/// Minimum of the three code equations: the column-aspect (β) term,
/// the perimeter (αs = 40, interior) term, and the 0.33√fc' cap.
pub fn punching_capacity(
    column_width_mm: f64,
    column_depth_mm: f64,
    effective_depth_mm: f64,
    fc_prime: f64,
) -> DesignResult<PunchingCapacity> {
    if column_width_mm <= 0.0 || column_depth_mm <= 0.0 || effective_depth_mm <= 0.0 {
        return Err(DesignError::invalid_geometry(
            "column_dimensions",
            format!(
                "{}x{} d={}",
                column_width_mm, column_depth_mm, effective_depth_mm
            ),
            "Column dimensions and effective depth must be positive",
        ));
    }

    let d = effective_depth_mm;
    let bo = 2.0 * (column_width_mm + d) + 2.0 * (column_depth_mm + d);

    let beta = column_width_mm / column_depth_mm;
    let beta = (beta.min(1.0 / beta)).max(1.0);

    let sqrt_fc = fc_prime.sqrt();
    let vc1 = 0.17 * (1.0 + 2.0 / beta) * sqrt_fc;
    let alpha_s = 40.0;
    let vc2 = 0.083 * (alpha_s * d / bo + 2.0) * sqrt_fc;
    let vc3 = 0.33 * sqrt_fc;
    let vc = vc1.min(vc2).min(vc3);

    let phi = FailureMode::Shear.phi();
    Ok(PunchingCapacity {
        perimeter_mm: bo,
        stress_mpa: vc,
        design_capacity_kn: phi * vc * bo * d / 1000.0,
    })
}

/// Check punching shear utilization; the ratio is reported, not raised
pub fn check_punching(
    vu_kn: f64,
    column_width_mm: f64,
    column_depth_mm: f64,
    effective_depth_mm: f64,
    fc_prime: f64,
) -> DesignResult<PunchingShearCheck> {
    let capacity = punching_capacity(column_width_mm, column_depth_mm, effective_depth_mm, fc_prime)?;

    let utilization = if capacity.design_capacity_kn > 0.0 {
        vu_kn / capacity.design_capacity_kn
    } else {
        f64::INFINITY
    };

    Ok(PunchingShearCheck {
        capacity,
        vu_kn,
        utilization,
        adequate: utilization <= 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteClass, SteelGrade};
    use approx::assert_relative_eq;

    fn standard_section() -> RectSection {
        RectSection::new(300.0, 600.0, 550.0, 40.0)
    }

    fn standard_props() -> MaterialProperties {
        MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420)
    }

    #[test]
    fn test_concrete_shear_capacity() {
        let vc = concrete_shear_kn(&standard_section(), &standard_props(), 1.0);
        // 0.17·√28·300·550/1000 = 148.4 kN
        assert_relative_eq!(vc, 148.4, epsilon = 0.1);
    }

    #[test]
    fn test_no_stirrups_below_half_phi_vc() {
        let design = design_stirrups(50.0, &standard_section(), &standard_props()).unwrap();
        assert_eq!(design.requirement, StirrupRequirement::NotRequired);
        assert!(design.bar.is_none());
        assert_eq!(design.spacing_mm, 0.0);
        assert_relative_eq!(design.concrete_capacity_kn, 111.3, epsilon = 0.1);
    }

    #[test]
    fn test_minimum_stirrups_between_branches() {
        let design = design_stirrups(100.0, &standard_section(), &standard_props()).unwrap();
        assert_eq!(design.requirement, StirrupRequirement::Minimum);
        assert_eq!(design.bar, Some(BarSize::M10));
        // Av,min = 0.35·300/420 = 0.25 mm²/mm governs; s = 200/0.25 = 800,
        // clamped to d/2 = 275
        assert_relative_eq!(design.spacing_mm, 275.0, epsilon = 0.1);
    }

    #[test]
    fn test_strength_stirrups() {
        let design = design_stirrups(300.0, &standard_section(), &standard_props()).unwrap();
        assert_eq!(design.requirement, StirrupRequirement::Strength);
        assert_eq!(design.bar, Some(BarSize::M10));
        // Vs = 300/0.75 − 148.4 = 251.6 kN; s = 200·420·550/251600 ≈ 184
        assert_relative_eq!(design.spacing_mm, 183.7, epsilon = 0.5);
    }

    #[test]
    fn test_stirrup_escalation_at_tight_spacing() {
        let design = design_stirrups(700.0, &standard_section(), &standard_props()).unwrap();
        assert_eq!(design.requirement, StirrupRequirement::Strength);
        assert_eq!(design.bar, Some(BarSize::M15));
        // 10M spacing would be ~59 mm; 15M doubles the leg area
        assert_relative_eq!(design.spacing_mm, 117.7, epsilon = 0.5);
    }

    #[test]
    fn test_spacing_never_exceeds_limit() {
        // Just over φVc so the strength branch applies with tiny Vs demand
        let design = design_stirrups(112.0, &standard_section(), &standard_props()).unwrap();
        assert_eq!(design.requirement, StirrupRequirement::Strength);
        assert!(design.spacing_mm <= 275.0);
    }

    #[test]
    fn test_rejects_negative_shear() {
        assert!(design_stirrups(-1.0, &standard_section(), &standard_props()).is_err());
    }

    #[test]
    fn test_punching_capacity_square_column() {
        let cap = punching_capacity(400.0, 400.0, 400.0, 28.0).unwrap();
        // bo = 2·800 + 2·800 = 3200
        assert_relative_eq!(cap.perimeter_mm, 3200.0, epsilon = 0.1);
        // 0.33√28 = 1.746 MPa governs
        assert_relative_eq!(cap.stress_mpa, 1.746, epsilon = 0.01);
        // φVn = 0.75·1.746·3200·400/1000 ≈ 1676 kN
        assert_relative_eq!(cap.design_capacity_kn, 1676.3, epsilon = 2.0);
    }

    #[test]
    fn test_punching_check_utilization() {
        let check = check_punching(1000.0, 400.0, 400.0, 400.0, 28.0).unwrap();
        assert!(check.adequate);
        assert!(check.utilization > 0.5 && check.utilization < 0.7);

        let overloaded = check_punching(2000.0, 400.0, 400.0, 400.0, 28.0).unwrap();
        assert!(!overloaded.adequate);
        assert!(overloaded.utilization > 1.0);
    }

    #[test]
    fn test_punching_rejects_bad_geometry() {
        assert!(punching_capacity(0.0, 400.0, 400.0, 28.0).is_err());
        assert!(punching_capacity(400.0, 400.0, -10.0, 28.0).is_err());
    }
}
