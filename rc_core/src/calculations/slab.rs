//! Slab design - ACI 318M-25 Chapters 7 and 8
//!
//! One-way strip moments by support condition, two-way moments by a
//! simplified direct-design split, per-meter-strip reinforcement with
//! bar-and-spacing selection, shrinkage steel and deflection. Two-way
//! moment distribution uses fixed 0.35/0.65 positive/negative shares
//! with aspect-ratio direction coefficients; a documented approximation
//! of the direct design method.

use serde::{Deserialize, Serialize};

use crate::calculations::flexure::moment_capacity;
use crate::calculations::section::RectSection;
use crate::calculations::serviceability::{
    cracked_inertia, cracking_moment, effective_inertia,
};
use crate::calculations::shear::{check_punching, PunchingShearCheck};
use crate::errors::{DesignError, DesignResult};
use crate::factors::FailureMode;
use crate::loads::{CombinationSet, LoadCase, LoadType};
use crate::materials::rebar::BarSize;
use crate::materials::{modulus_of_rupture, ConcreteClass, MaterialProperties, SteelGrade};

/// Slab structural system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlabSystem {
    /// Load carried in one direction between parallel supports
    OneWay,
    /// Two-way action on a column- or beam-supported panel
    TwoWay,
}

/// Edge support condition for one-way strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportCondition {
    SimplySupported,
    Fixed,
    Continuous,
    Cantilever,
}

impl SupportCondition {
    /// Span/thickness ratio - ACI 318M-25 Table 7.3.1.1
    pub fn span_thickness_ratio(&self) -> f64 {
        match self {
            SupportCondition::SimplySupported => 20.0,
            SupportCondition::Continuous => 24.0,
            SupportCondition::Fixed => 28.0,
            SupportCondition::Cantilever => 10.0,
        }
    }
}

/// Slab design input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabInput {
    pub label: String,
    pub system: SlabSystem,
    pub support: SupportCondition,
    /// Shorter plan dimension (mm)
    pub lx_mm: f64,
    /// Longer plan dimension (mm)
    pub ly_mm: f64,
    pub thickness_mm: f64,
    pub cover_mm: f64,
    pub concrete: ConcreteClass,
    pub steel: SteelGrade,
    /// Dead load including self-weight (kN/m²)
    pub dead_kpa: f64,
    /// Superimposed dead load (kN/m²)
    pub superimposed_kpa: f64,
    /// Live load (kN/m²)
    pub live_kpa: f64,
    /// Supporting column plan size, for the punching check (mm)
    pub column_size_mm: Option<(f64, f64)>,
    /// Factored column reaction for the punching check (kN)
    pub column_reaction_kn: Option<f64>,
}

impl SlabInput {
    pub fn validate(&self) -> DesignResult<()> {
        if self.lx_mm <= 0.0 || self.ly_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "plan_dimensions",
                format!("{}x{}", self.lx_mm, self.ly_mm),
                "Plan dimensions must be positive",
            ));
        }
        if self.lx_mm > self.ly_mm {
            return Err(DesignError::invalid_geometry(
                "lx_mm",
                self.lx_mm.to_string(),
                "lx must be the shorter dimension",
            ));
        }
        if self.thickness_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "thickness_mm",
                self.thickness_mm.to_string(),
                "Thickness must be positive",
            ));
        }
        if self.effective_depth_x_mm() <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover leaves no effective depth",
            ));
        }
        if self.dead_kpa < 0.0 || self.live_kpa < 0.0 || self.superimposed_kpa < 0.0 {
            return Err(DesignError::invalid_input(
                "loads",
                format!("D={} SDL={} L={}", self.dead_kpa, self.superimposed_kpa, self.live_kpa),
                "Loads cannot be negative",
            ));
        }
        Ok(())
    }

    /// Effective depth of the outer (x-direction) layer: half a 15M bar
    /// below the cover
    pub fn effective_depth_x_mm(&self) -> f64 {
        self.thickness_mm - self.cover_mm - BarSize::M15.diameter_mm() / 2.0
    }

    /// Effective depth of the inner (y-direction) layer
    pub fn effective_depth_y_mm(&self) -> f64 {
        self.effective_depth_x_mm() - BarSize::M15.diameter_mm()
    }

    /// Governing factored area load (kN/m²)
    pub fn factored_load_kpa(&self) -> f64 {
        let case = LoadCase::new(self.label.clone())
            .with_load(LoadType::Dead, self.dead_kpa + self.superimposed_kpa)
            .with_load(LoadType::Live, self.live_kpa);
        case.governing(CombinationSet::Strength).factored_value
    }

    /// Unfactored service area load (kN/m²)
    pub fn service_load_kpa(&self) -> f64 {
        self.dead_kpa + self.superimposed_kpa + self.live_kpa
    }
}

/// Strip moments (kN·m/m) and shears (kN/m)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StripMoments {
    pub x_positive: f64,
    pub x_negative: f64,
    pub y_positive: f64,
    pub y_negative: f64,
    pub shear_x: f64,
    pub shear_y: f64,
}

/// Bar and spacing for a one-meter design strip
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlabBars {
    pub bar: BarSize,
    pub spacing_mm: f64,
    /// Provided area per meter of width (mm²/m)
    pub area_per_meter_mm2: f64,
}

/// Minimum slab thickness (mm)
///
/// One-way: longer span over the support-condition ratio. Two-way:
/// `ln·(0.8 + fy/1400)/36` with a 200 mm support-width allowance,
/// at least 125 mm.
pub fn minimum_thickness_mm(input: &SlabInput, props: &MaterialProperties) -> f64 {
    match input.system {
        SlabSystem::OneWay => input.ly_mm / input.support.span_thickness_ratio(),
        SlabSystem::TwoWay => {
            let ln = input.ly_mm - 200.0;
            (ln * (0.8 + props.fy / 1400.0) / 36.0).max(125.0)
        }
    }
}

/// Factored strip moments for the slab system
pub fn strip_moments(input: &SlabInput, wu_kpa: f64) -> StripMoments {
    match input.system {
        SlabSystem::OneWay => {
            let span_m = input.ly_mm / 1000.0;
            let w = wu_kpa;
            let (pos, neg) = match input.support {
                SupportCondition::SimplySupported => (w * span_m * span_m / 8.0, 0.0),
                SupportCondition::Fixed => {
                    (w * span_m * span_m / 24.0, w * span_m * span_m / 12.0)
                }
                SupportCondition::Continuous => {
                    (w * span_m * span_m / 16.0, w * span_m * span_m / 12.0)
                }
                SupportCondition::Cantilever => (0.0, w * span_m * span_m / 2.0),
            };
            StripMoments {
                x_positive: pos,
                x_negative: neg,
                shear_x: w * span_m / 2.0,
                ..Default::default()
            }
        }
        SlabSystem::TwoWay => {
            let lx = input.lx_mm / 1000.0;
            let ly = input.ly_mm / 1000.0;
            let beta = ly / lx;

            let (alpha_x, alpha_y) = if beta <= 1.5 {
                (0.5, 0.5)
            } else if beta <= 2.0 {
                (0.6, 0.4)
            } else {
                (0.8, 0.2)
            };

            // Total static moment per direction, Mo = wu·l1·l2²/8
            let mo_x = wu_kpa * lx * ly * ly / 8.0;
            let mo_y = wu_kpa * ly * lx * lx / 8.0;

            StripMoments {
                x_positive: 0.35 * mo_x * alpha_x,
                x_negative: 0.65 * mo_x * alpha_x,
                y_positive: 0.35 * mo_y * alpha_y,
                y_negative: 0.65 * mo_y * alpha_y,
                shear_x: wu_kpa * ly / 2.0,
                shear_y: wu_kpa * lx / 2.0,
            }
        }
    }
}

/// Shrinkage and temperature steel ratio - ACI 318M-25 Section 7.12
pub fn shrinkage_ratio(fy: f64) -> f64 {
    if fy <= 420.0 {
        0.0020
    } else if fy <= 520.0 {
        0.0018
    } else {
        0.0018 * 420.0 / fy
    }
}

/// Select a bar size and spacing providing a required area per meter
///
/// Walks 10M through 25M looking for a spacing inside the practical
/// window (75 mm to min(3h, 450)); falls back to 15M at the maximum
/// spacing if nothing fits.
pub fn select_slab_bars(required_mm2_per_m: f64, thickness_mm: f64) -> SlabBars {
    const CANDIDATES: [BarSize; 4] = [BarSize::M10, BarSize::M15, BarSize::M20, BarSize::M25];

    let max_spacing = (3.0 * thickness_mm).min(450.0);
    for bar in CANDIDATES {
        let spacing = bar.area_mm2() * 1000.0 / required_mm2_per_m;
        let min_spacing = (bar.area_mm2() / 25.0).max(75.0);
        if spacing >= min_spacing && spacing <= max_spacing {
            return SlabBars {
                bar,
                spacing_mm: spacing,
                area_per_meter_mm2: bar.area_mm2() * 1000.0 / spacing,
            };
        }
    }

    let bar = BarSize::M15;
    let spacing = (bar.area_mm2() * 1000.0 / required_mm2_per_m).min(max_spacing);
    SlabBars {
        bar,
        spacing_mm: spacing,
        area_per_meter_mm2: bar.area_mm2() * 1000.0 / spacing,
    }
}

/// Size flexural steel for a one-meter strip (mm²/m)
///
/// Same quadratic as beam flexure on a 1000 mm width; the slab minimum
/// is the larger of the flexural minimum 1.4·b·d/fy and the shrinkage
/// ratio. Required steel beyond 2.5% of b·d is rejected as impractical.
pub fn strip_steel_mm2(
    moment_knm_per_m: f64,
    effective_depth_mm: f64,
    props: &MaterialProperties,
) -> DesignResult<f64> {
    let b = 1000.0;
    let d = effective_depth_mm;
    let phi = FailureMode::TensionControlled.phi();

    let minimum = (1.4 * b * d / props.fy).max(shrinkage_ratio(props.fy) * b * d);
    if moment_knm_per_m <= 0.0 {
        return Ok(minimum);
    }

    let mu = moment_knm_per_m * 1e6;
    let a_coef = phi * props.fy * props.fy / (2.0 * 0.85 * props.fc_prime * b);
    let b_coef = phi * props.fy * d;
    let discriminant = b_coef * b_coef + 4.0 * a_coef * mu;
    let required = ((-b_coef + discriminant.sqrt()) / (2.0 * a_coef)).max(minimum);

    if required > 0.025 * b * d {
        return Err(DesignError::section_inadequate(
            "slab",
            format!(
                "Strip moment {:.1} kN·m/m needs more than 2.5% steel at d = {:.0} mm",
                moment_knm_per_m, d
            ),
        ));
    }
    Ok(required)
}

/// Complete slab design result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlabDesign {
    pub minimum_thickness_mm: f64,
    pub thickness_ok: bool,
    pub moments: StripMoments,

    /// Bottom steel, shorter-direction strip
    pub bottom_x: SlabBars,
    /// Bottom steel, longer-direction strip (two-way only)
    pub bottom_y: Option<SlabBars>,
    /// Top steel over supports, when a negative moment exists
    pub top: Option<SlabBars>,
    /// Shrinkage and temperature steel
    pub shrinkage: SlabBars,

    pub deflection_mm: f64,
    pub deflection_limit_mm: f64,

    pub punching: Option<PunchingShearCheck>,

    pub utilization: f64,
    pub notes: Vec<String>,
}

impl SlabDesign {
    pub fn passes(&self) -> bool {
        self.utilization <= 1.0
            && self.thickness_ok
            && self.punching.as_ref().map(|p| p.adequate).unwrap_or(true)
    }
}

fn strip_deflection_mm(input: &SlabInput, props: &MaterialProperties, as_mm2_per_m: f64) -> f64 {
    let h = input.thickness_mm;
    let d = input.effective_depth_x_mm();
    let span = match input.system {
        SlabSystem::OneWay => input.ly_mm,
        SlabSystem::TwoWay => input.lx_mm,
    };

    // Per-meter strip: w kN/m² on a 1 m width is w N/mm
    let w = input.service_load_kpa();
    let span_m = span / 1000.0;
    let m_service = match input.system {
        SlabSystem::OneWay => w * span_m * span_m / 8.0,
        SlabSystem::TwoWay => w * span_m * span_m / 16.0,
    };

    let strip = RectSection::new(1000.0, h, d, input.cover_mm);
    let ig = strip.gross_inertia_mm4();
    let fr = modulus_of_rupture(props.fc_prime, 1.0);
    let mcr = cracking_moment(fr, ig, h / 2.0);
    let icr = cracked_inertia(&strip, as_mm2_per_m, props.modular_ratio());
    let ie = effective_inertia(m_service * 1e6, mcr, ig, icr);

    match input.system {
        SlabSystem::OneWay => 5.0 * w * span.powi(4) / (384.0 * props.ec * ie),
        SlabSystem::TwoWay => 0.001 * w * span.powi(4) / (props.ec * ie),
    }
}

/// Design a slab: thickness check, strip steel, shrinkage steel,
/// deflection and optional punching check
pub fn design_slab(input: &SlabInput) -> DesignResult<SlabDesign> {
    input.validate()?;
    let props = MaterialProperties::resolve(input.concrete, input.steel);

    let h_min = minimum_thickness_mm(input, &props);
    let thickness_ok = input.thickness_mm >= h_min;

    let wu = input.factored_load_kpa();
    let moments = strip_moments(input, wu);

    let d_x = input.effective_depth_x_mm();
    let d_y = input.effective_depth_y_mm();

    let as_x = strip_steel_mm2(moments.x_positive, d_x, &props)?;
    let bottom_x = select_slab_bars(as_x, input.thickness_mm);

    let bottom_y = match input.system {
        SlabSystem::TwoWay => {
            let as_y = strip_steel_mm2(moments.y_positive, d_y, &props)?;
            Some(select_slab_bars(as_y, input.thickness_mm))
        }
        SlabSystem::OneWay => None,
    };

    let neg = moments.x_negative.max(moments.y_negative);
    let top = if neg > 0.0 {
        let as_top = strip_steel_mm2(neg, d_x, &props)?;
        Some(select_slab_bars(as_top, input.thickness_mm))
    } else {
        None
    };

    let shrinkage_area = shrinkage_ratio(props.fy) * 1000.0 * input.thickness_mm;
    let shrinkage = select_slab_bars(shrinkage_area, input.thickness_mm);

    let deflection = strip_deflection_mm(input, &props, bottom_x.area_per_meter_mm2);
    let span = match input.system {
        SlabSystem::OneWay => input.ly_mm,
        SlabSystem::TwoWay => input.lx_mm,
    };
    let deflection_limit = span / 360.0;

    let punching = match (input.column_size_mm, input.column_reaction_kn) {
        (Some((cw, cd)), Some(vu)) => {
            Some(check_punching(vu, cw, cd, d_x.min(d_y), props.fc_prime)?)
        }
        _ => None,
    };

    // Strip utilization against the provided bottom steel
    let strip_x = RectSection::new(1000.0, input.thickness_mm, d_x, input.cover_mm);
    let mut utilization: f64 = if moments.x_positive > 0.0 {
        moments.x_positive / moment_capacity(bottom_x.area_per_meter_mm2, &strip_x, &props)
    } else {
        0.0
    };
    if let (Some(bars_y), true) = (&bottom_y, moments.y_positive > 0.0) {
        let strip_y = RectSection::new(1000.0, input.thickness_mm, d_y, input.cover_mm);
        let ratio = moments.y_positive / moment_capacity(bars_y.area_per_meter_mm2, &strip_y, &props);
        utilization = utilization.max(ratio);
    }

    let mut notes = Vec::new();
    if !thickness_ok {
        notes.push(format!("Increase thickness to minimum {:.0} mm", h_min));
    }
    if deflection > deflection_limit {
        notes.push(format!(
            "Deflection {:.1} mm exceeds limit {:.1} mm",
            deflection, deflection_limit
        ));
    }
    if let Some(p) = &punching {
        if !p.adequate {
            notes.push(
                "Punching shear inadequate - increase slab thickness or add shear reinforcement"
                    .to_string(),
            );
        }
    }

    Ok(SlabDesign {
        minimum_thickness_mm: h_min,
        thickness_ok,
        moments,
        bottom_x,
        bottom_y,
        top,
        shrinkage,
        deflection_mm: deflection,
        deflection_limit_mm: deflection_limit,
        punching,
        utilization,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one_way_input() -> SlabInput {
        SlabInput {
            label: "S1".into(),
            system: SlabSystem::OneWay,
            support: SupportCondition::SimplySupported,
            lx_mm: 3000.0,
            ly_mm: 4000.0,
            thickness_mm: 200.0,
            cover_mm: 20.0,
            concrete: ConcreteClass::Fc28,
            steel: SteelGrade::G420,
            dead_kpa: 5.0,
            superimposed_kpa: 0.0,
            live_kpa: 3.0,
            column_size_mm: None,
            column_reaction_kn: None,
        }
    }

    #[test]
    fn test_one_way_minimum_thickness() {
        let input = one_way_input();
        let props = MaterialProperties::resolve(input.concrete, input.steel);
        // L/20 for simply supported
        assert_relative_eq!(minimum_thickness_mm(&input, &props), 200.0, epsilon = 0.1);
    }

    #[test]
    fn test_one_way_moments() {
        let input = one_way_input();
        // wu = 1.2·5 + 1.6·3 = 10.8 kN/m²
        assert_relative_eq!(input.factored_load_kpa(), 10.8, epsilon = 0.001);
        let m = strip_moments(&input, 10.8);
        // wL²/8 = 10.8·16/8 = 21.6
        assert_relative_eq!(m.x_positive, 21.6, epsilon = 0.01);
        assert_eq!(m.x_negative, 0.0);
        assert_eq!(m.y_positive, 0.0);
        assert_relative_eq!(m.shear_x, 21.6, epsilon = 0.01);
    }

    #[test]
    fn test_cantilever_moments_are_negative_only() {
        let mut input = one_way_input();
        input.support = SupportCondition::Cantilever;
        let m = strip_moments(&input, 10.8);
        assert_eq!(m.x_positive, 0.0);
        // wL²/2 = 10.8·16/2 = 86.4
        assert_relative_eq!(m.x_negative, 86.4, epsilon = 0.01);
    }

    #[test]
    fn test_strip_steel_minimum_governs() {
        let props = MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420);
        // d = 172: flexural minimum 1.4·1000·172/420 = 573 exceeds the
        // quadratic result (~327) and the shrinkage minimum (344)
        let required = strip_steel_mm2(21.6, 172.0, &props).unwrap();
        assert_relative_eq!(required, 573.3, epsilon = 0.5);
    }

    #[test]
    fn test_strip_steel_rejects_excessive_demand() {
        let props = MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420);
        let err = strip_steel_mm2(500.0, 120.0, &props).unwrap_err();
        assert_eq!(err.error_code(), "SECTION_INADEQUATE");
    }

    #[test]
    fn test_slab_bar_selection_window() {
        let bars = select_slab_bars(573.0, 200.0);
        assert_eq!(bars.bar, BarSize::M10);
        // 100·1000/573 ≈ 175 mm
        assert_relative_eq!(bars.spacing_mm, 174.5, epsilon = 0.5);
        assert!(bars.area_per_meter_mm2 >= 573.0 - 0.5);
    }

    #[test]
    fn test_heavy_strip_picks_larger_bar() {
        // 10M at 75 mm gives only 1333 mm²/m; demand above that moves up
        let bars = select_slab_bars(2000.0, 200.0);
        assert!(bars.bar.area_mm2() > BarSize::M10.area_mm2());
        assert!(bars.spacing_mm >= 75.0);
    }

    #[test]
    fn test_complete_one_way_design() {
        let design = design_slab(&one_way_input()).unwrap();

        assert!(design.thickness_ok);
        assert_eq!(design.bottom_x.bar, BarSize::M10);
        assert!(design.bottom_y.is_none());
        assert!(design.top.is_none());
        // Shrinkage: 0.0020·1000·200 = 400 mm²/m
        assert_relative_eq!(design.shrinkage.area_per_meter_mm2, 400.0, epsilon = 0.5);
        assert!(design.deflection_mm < design.deflection_limit_mm);
        assert!(design.passes());
    }

    #[test]
    fn test_two_way_design_square_panel() {
        let input = SlabInput {
            label: "S2".into(),
            system: SlabSystem::TwoWay,
            support: SupportCondition::Continuous,
            lx_mm: 6000.0,
            ly_mm: 6000.0,
            thickness_mm: 225.0,
            cover_mm: 20.0,
            concrete: ConcreteClass::Fc28,
            steel: SteelGrade::G420,
            dead_kpa: 6.0,
            superimposed_kpa: 0.0,
            live_kpa: 3.0,
            column_size_mm: Some((450.0, 450.0)),
            column_reaction_kn: Some(450.0),
        };
        let design = design_slab(&input).unwrap();

        // Square panel: equal direction coefficients
        assert_relative_eq!(design.moments.x_positive, design.moments.y_positive, epsilon = 0.01);
        assert!(design.moments.x_negative > design.moments.x_positive);
        assert!(design.bottom_y.is_some());
        assert!(design.top.is_some());
        assert!(design.punching.is_some());
        assert!(design.punching.as_ref().unwrap().adequate);
    }

    #[test]
    fn test_thin_slab_gets_thickness_note() {
        let mut input = one_way_input();
        input.thickness_mm = 150.0;
        let design = design_slab(&input).unwrap();
        assert!(!design.thickness_ok);
        assert!(design.notes.iter().any(|n| n.contains("Increase thickness")));
    }

    #[test]
    fn test_rejects_swapped_plan_dimensions() {
        let mut input = one_way_input();
        input.lx_mm = 5000.0;
        assert!(design_slab(&input).is_err());
    }
}
