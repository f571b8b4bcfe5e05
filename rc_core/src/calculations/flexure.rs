//! Flexural reinforcement sizing - ACI 318M-25 Chapter 9
//!
//! Sizes tension (and where needed compression) reinforcement for a
//! rectangular section under a factored moment. The single-reinforced
//! case solves the quadratic that follows from
//! `Mu = φ·As·fy·(d − a/2)` with `a = As·fy/(0.85·fc'·b)`; when the
//! demand exceeds the capacity at the maximum tension-controlled ratio
//! (0.75·ρ_balanced) the sizing switches to a doubly-reinforced
//! procedure carrying the excess moment on compression steel at a lever
//! arm of `d − d'`.
//!
//! # Example
//! ```
//! use rc_core::calculations::flexure::size_flexure;
//! use rc_core::calculations::section::RectSection;
//! use rc_core::materials::{ConcreteClass, MaterialProperties, SteelGrade};
//!
//! let section = RectSection::new(300.0, 600.0, 550.0, 40.0);
//! let props = MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420);
//!
//! let design = size_flexure(97.2, &section, &props).unwrap();
//! assert!(design.minimum_governs);
//! assert!(design.design_capacity_knm >= 97.2);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::section::RectSection;
use crate::errors::{DesignError, DesignResult};
use crate::factors::FailureMode;
use crate::materials::rebar::{
    development_length_mm, select_bars, BarSelection, BarSize, DevelopmentFactors,
};
use crate::materials::{maximum_ratio, minimum_ratio, MaterialProperties};

/// Offset from cover to the centroid of compression bars (mm)
const COMPRESSION_BAR_OFFSET_MM: f64 = 20.0;

/// Result of flexural reinforcement sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexuralDesign {
    /// Tension steel area to provide, after minimum enforcement (mm²)
    pub required_area_mm2: f64,

    /// Tension steel area from section analysis, before minimum enforcement (mm²)
    pub computed_area_mm2: f64,

    /// Minimum tension steel area for the section (mm²)
    pub minimum_area_mm2: f64,

    /// Compression steel area, zero for singly reinforced sections (mm²)
    pub compression_area_mm2: f64,

    /// Selected tension bars
    pub tension_bars: BarSelection,

    /// Selected compression bars, if any
    pub compression_bars: Option<BarSelection>,

    /// Design moment capacity φMn at the required steel area (kN·m)
    pub design_capacity_knm: f64,

    /// Development length of the largest tension bar (mm)
    pub development_length_mm: f64,

    /// Whether the minimum-steel requirement set the final area
    pub minimum_governs: bool,

    /// Whether compression reinforcement was required
    pub doubly_reinforced: bool,
}

/// Tension steel area and design capacity at the maximum
/// tension-controlled ratio ρ_max = 0.75·ρ_balanced
///
/// Returns `(As_max in mm², φMn_max in kN·m)`.
pub fn singly_reinforced_limit(section: &RectSection, props: &MaterialProperties) -> (f64, f64) {
    let phi = FailureMode::TensionControlled.phi();
    let rho_max = maximum_ratio(props.fc_prime, props.fy);
    let as_max = rho_max * section.width_mm * section.effective_depth_mm;
    let a = as_max * props.fy / (0.85 * props.fc_prime * section.width_mm);
    let mn_max = as_max * props.fy * (section.effective_depth_mm - a / 2.0);
    (as_max, phi * mn_max / 1e6)
}

/// Design moment capacity φMn for a given tension steel area (kN·m)
///
/// Whitney stress-block analysis with the tension-controlled φ = 0.90.
pub fn moment_capacity(as_mm2: f64, section: &RectSection, props: &MaterialProperties) -> f64 {
    if as_mm2 <= 0.0 {
        return 0.0;
    }
    let phi = FailureMode::TensionControlled.phi();
    let a = as_mm2 * props.fy / (0.85 * props.fc_prime * section.width_mm);
    let mn = as_mm2 * props.fy * (section.effective_depth_mm - a / 2.0);
    phi * mn / 1e6
}

/// Size flexural reinforcement for a factored moment
///
/// Dispatches on the demand against the singly-reinforced capacity
/// limit: below it tension steel alone is sized, above it compression
/// steel carries the excess moment.
pub fn size_flexure(
    mu_knm: f64,
    section: &RectSection,
    props: &MaterialProperties,
) -> DesignResult<FlexuralDesign> {
    section.validate()?;
    if mu_knm <= 0.0 {
        return Err(DesignError::invalid_input(
            "mu_knm",
            mu_knm.to_string(),
            "Factored moment must be positive",
        ));
    }

    let (_, phi_mn_max_knm) = singly_reinforced_limit(section, props);

    if mu_knm <= phi_mn_max_knm {
        size_tension_only(mu_knm, section, props)
    } else {
        debug!(
            "Mu = {:.1} kN·m exceeds singly-reinforced limit {:.1} kN·m; adding compression steel",
            mu_knm, phi_mn_max_knm
        );
        size_doubly_reinforced(mu_knm, section, props)
    }
}

fn size_tension_only(
    mu_knm: f64,
    section: &RectSection,
    props: &MaterialProperties,
) -> DesignResult<FlexuralDesign> {
    let phi = FailureMode::TensionControlled.phi();
    let b = section.width_mm;
    let d = section.effective_depth_mm;
    let mu = mu_knm * 1e6;

    // Mu = φ·As·fy·d − φ·As²·fy² / (2·0.85·fc'·b)
    let a_coef = phi * props.fy * props.fy / (2.0 * 0.85 * props.fc_prime * b);
    let b_coef = phi * props.fy * d;
    let c_coef = -mu;

    let discriminant = b_coef * b_coef - 4.0 * a_coef * c_coef;
    if discriminant < 0.0 {
        return Err(DesignError::section_inadequate(
            "beam",
            format!(
                "Moment {:.1} kN·m exceeds the achievable capacity of a {:.0}x{:.0} section",
                mu_knm, b, section.height_mm
            ),
        ));
    }
    let computed = (-b_coef + discriminant.sqrt()) / (2.0 * a_coef);

    let minimum = minimum_ratio(props.fc_prime, props.fy) * b * d;
    let required = computed.max(minimum);
    let minimum_governs = minimum > computed;

    let tension_bars = select_bars(required);
    let ld = development_length_mm(
        tension_bars.largest().unwrap_or(BarSize::M20),
        props.fc_prime,
        props.fy,
        DevelopmentFactors::default(),
    );

    Ok(FlexuralDesign {
        required_area_mm2: required,
        computed_area_mm2: computed,
        minimum_area_mm2: minimum,
        compression_area_mm2: 0.0,
        design_capacity_knm: moment_capacity(required, section, props),
        development_length_mm: ld,
        tension_bars,
        compression_bars: None,
        minimum_governs,
        doubly_reinforced: false,
    })
}

fn size_doubly_reinforced(
    mu_knm: f64,
    section: &RectSection,
    props: &MaterialProperties,
) -> DesignResult<FlexuralDesign> {
    let phi = FailureMode::TensionControlled.phi();
    let b = section.width_mm;
    let d = section.effective_depth_mm;
    let d_prime = section.cover_mm + COMPRESSION_BAR_OFFSET_MM;

    if d_prime >= d {
        return Err(DesignError::invalid_geometry(
            "effective_depth_mm",
            d.to_string(),
            "Compression steel centroid falls below the tension steel",
        ));
    }

    // Tension steel at the maximum tension-controlled ratio
    let (as1, phi_mn1_knm) = singly_reinforced_limit(section, props);

    // Excess moment carried by compression steel, assumed yielded
    let mu2 = (mu_knm - phi_mn1_knm) * 1e6;
    let as2_prime = mu2 / (phi * props.fy * (d - d_prime));

    let total = as1 + as2_prime;
    let minimum = minimum_ratio(props.fc_prime, props.fy) * b * d;

    let tension_bars = select_bars(total);
    let compression_bars = select_bars(as2_prime);
    let ld = development_length_mm(
        tension_bars.largest().unwrap_or(BarSize::M25),
        props.fc_prime,
        props.fy,
        DevelopmentFactors::default(),
    );

    // Capacity: singly-reinforced limit plus the compression couple
    let capacity = phi_mn1_knm + phi * as2_prime * props.fy * (d - d_prime) / 1e6;

    Ok(FlexuralDesign {
        required_area_mm2: total,
        computed_area_mm2: total,
        minimum_area_mm2: minimum,
        compression_area_mm2: as2_prime,
        design_capacity_knm: capacity,
        development_length_mm: ld,
        tension_bars,
        compression_bars: Some(compression_bars),
        minimum_governs: false,
        doubly_reinforced: true,
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
    fn test_minimum_governs_at_moderate_moment() {
        let design = size_flexure(97.2, &standard_section(), &standard_props()).unwrap();

        // Quadratic gives ~456 mm²; 1.4·b·d/fy = 550 mm² governs
        assert!(design.minimum_governs);
        assert_relative_eq!(design.computed_area_mm2, 456.3, epsilon = 1.0);
        assert_relative_eq!(design.minimum_area_mm2, 550.0, epsilon = 0.1);
        assert_relative_eq!(design.required_area_mm2, 550.0, epsilon = 0.1);
        assert!(design.design_capacity_knm >= 97.2);
        assert!(!design.doubly_reinforced);
        assert_eq!(design.compression_area_mm2, 0.0);
    }

    #[test]
    fn test_minimum_area_uses_sqrt_branch_for_high_strength() {
        // For fc' = 55 MPa, 0.25·√fc'/fy exceeds 1.4/fy
        let props = MaterialProperties::resolve(ConcreteClass::Fc55, SteelGrade::G420);
        let design = size_flexure(97.2, &standard_section(), &props).unwrap();

        let expected = 0.25 * 55.0_f64.sqrt() * 300.0 * 550.0 / 420.0;
        assert_relative_eq!(design.minimum_area_mm2, expected, epsilon = 0.1);
        assert!(expected > 1.4 * 300.0 * 550.0 / 420.0);
    }

    #[test]
    fn test_required_area_increases_with_moment() {
        let section = standard_section();
        let props = standard_props();

        let low = size_flexure(200.0, &section, &props).unwrap();
        let high = size_flexure(300.0, &section, &props).unwrap();

        assert!(!low.minimum_governs);
        assert!(high.required_area_mm2 > low.required_area_mm2);
        assert!(high.design_capacity_knm > low.design_capacity_knm);
    }

    #[test]
    fn test_singly_reinforced_limit() {
        let (as_max, phi_mn_max) = singly_reinforced_limit(&standard_section(), &standard_props());

        // ρ_max = 0.75·ρ_b = 0.02125 for 28/420
        assert_relative_eq!(as_max, 0.02125 * 300.0 * 550.0, epsilon = 1.0);
        assert_relative_eq!(phi_mn_max, 592.3, epsilon = 0.5);
    }

    #[test]
    fn test_doubly_reinforced_above_limit() {
        let design = size_flexure(700.0, &standard_section(), &standard_props()).unwrap();

        assert!(design.doubly_reinforced);
        assert!(design.compression_area_mm2 > 0.0);
        assert!(design.compression_bars.is_some());
        // Capacity equals the demand by construction
        assert_relative_eq!(design.design_capacity_knm, 700.0, epsilon = 0.5);
        // d' = 40 + 20 = 60; As2' = Mu2 / (0.9·420·490)
        let mu2 = (700.0 - 592.27) * 1e6;
        let expected = mu2 / (0.9 * 420.0 * 490.0);
        assert_relative_eq!(design.compression_area_mm2, expected, epsilon = 5.0);
    }

    #[test]
    fn test_bars_cover_required_area() {
        let design = size_flexure(250.0, &standard_section(), &standard_props()).unwrap();
        assert!(design.tension_bars.provided_area_mm2 >= design.required_area_mm2);
        assert!(design.tension_bars.bar_count() >= 1);
    }

    #[test]
    fn test_development_length_reported() {
        let design = size_flexure(97.2, &standard_section(), &standard_props()).unwrap();
        assert!(design.development_length_mm >= 300.0);
    }

    #[test]
    fn test_moment_capacity_of_zero_area() {
        assert_eq!(moment_capacity(0.0, &standard_section(), &standard_props()), 0.0);
    }

    #[test]
    fn test_rejects_nonpositive_moment() {
        let err = size_flexure(0.0, &standard_section(), &standard_props()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(size_flexure(-50.0, &standard_section(), &standard_props()).is_err());
    }

    #[test]
    fn test_rejects_invalid_section() {
        let bad = RectSection::new(300.0, 600.0, 700.0, 40.0);
        assert!(size_flexure(100.0, &bad, &standard_props()).is_err());
    }

    #[test]
    fn test_shallow_section_needs_more_steel() {
        let deep = standard_section();
        let shallow = RectSection::new(300.0, 500.0, 450.0, 40.0);
        let props = standard_props();

        let a = size_flexure(250.0, &deep, &props).unwrap();
        let b = size_flexure(250.0, &shallow, &props).unwrap();
        assert!(b.required_area_mm2 > a.required_area_mm2);
    }
}
