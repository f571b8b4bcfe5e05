//! Wall design - ACI 318M-25 Chapters 11 and 14
//!
//! Minimum thickness by wall type, the empirical axial capacity for
//! walls, in-plane shear with the two-curtain reinforcement layout,
//! out-of-plane moment capacity and a simplified boundary-element
//! screen for seismic shear walls.

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::materials::rebar::BarSize;
use crate::materials::{ConcreteClass, MaterialProperties, SteelGrade};

/// Strength reduction factor for wall axial compression (tied)
const PHI_COMPRESSION: f64 = 0.65;
/// Strength reduction factor for shear
const PHI_SHEAR: f64 = 0.75;

/// Bar spacing window for wall curtains (mm)
const MIN_SPACING_MM: f64 = 75.0;
const MAX_SPACING_MM: f64 = 450.0;

/// c/lw threshold above which boundary elements are flagged
const NEUTRAL_AXIS_LIMIT: f64 = 0.1;

/// Wall classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallType {
    Bearing,
    Shear,
    Retaining,
    Basement,
}

impl WallType {
    /// Minimum thickness for a wall of the given clear height (mm)
    pub fn minimum_thickness_mm(self, height_mm: f64) -> f64 {
        match self {
            WallType::Bearing => (height_mm / 25.0).max(100.0),
            WallType::Shear => (height_mm / 16.0).max(150.0),
            WallType::Retaining => (height_mm / 12.0).max(200.0),
            WallType::Basement => (height_mm / 30.0).max(100.0),
        }
    }

    fn slenderness_limit(self) -> f64 {
        match self {
            WallType::Bearing | WallType::Shear => 30.0,
            WallType::Retaining | WallType::Basement => 22.0,
        }
    }
}

/// Governing load character, used to bump vertical steel and to screen
/// for boundary elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallLoading {
    GravityOnly,
    LateralWind,
    LateralSeismic,
    SoilPressure,
    Combined,
}

/// Wall design input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallInput {
    pub label: String,
    pub wall_type: WallType,
    pub loading: WallLoading,
    /// Wall length lw (mm)
    pub length_mm: f64,
    /// Clear height (mm)
    pub height_mm: f64,
    pub thickness_mm: f64,
    pub cover_mm: f64,
    /// Effective length k·lu for buckling (mm)
    pub effective_length_mm: f64,
    /// Factored axial force per unit length (kN/m)
    pub axial_kn_per_m: f64,
    /// Factored in-plane shear (kN)
    pub in_plane_shear_kn: f64,
    /// Factored out-of-plane moment per unit length (kN·m/m)
    pub out_of_plane_moment_knm_per_m: f64,
    pub concrete: ConcreteClass,
    pub steel: SteelGrade,
}

impl WallInput {
    pub fn validate(&self) -> DesignResult<()> {
        if self.length_mm <= 0.0 || self.height_mm <= 0.0 || self.thickness_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "wall_dimensions",
                format!(
                    "{}x{}x{}",
                    self.length_mm, self.height_mm, self.thickness_mm
                ),
                "Wall dimensions must be positive",
            ));
        }
        if self.effective_length_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "effective_length_mm",
                self.effective_length_mm.to_string(),
                "Effective length must be positive",
            ));
        }
        if self.cover_mm < 0.0 || self.cover_mm >= self.thickness_mm / 2.0 {
            return Err(DesignError::invalid_geometry(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover must be non-negative and less than half the thickness",
            ));
        }
        Ok(())
    }

    /// Gross area per unit length of wall (mm²/m)
    fn gross_area_per_m(&self) -> f64 {
        self.thickness_mm * 1000.0
    }

    /// In-plane shear area lw·t (mm²)
    fn shear_area_mm2(&self) -> f64 {
        self.length_mm * self.thickness_mm
    }
}

/// Slenderness reduction on the empirical axial capacity
///
/// Shear walls use the height-to-thickness ratio; other walls use
/// k·lu/r with r = t/√12.
pub fn slenderness_factor(input: &WallInput) -> f64 {
    if input.wall_type == WallType::Shear {
        let ht = input.height_mm / input.thickness_mm;
        if ht <= 30.0 {
            return 1.0;
        }
        return (1.0 - (ht - 30.0) * 0.01).max(0.7);
    }

    let klu_r = input.effective_length_mm / (input.thickness_mm / 3.46);
    let limit = input.wall_type.slenderness_limit();
    if klu_r <= limit {
        1.0
    } else {
        (1.0 - (klu_r - limit) / (2.0 * limit)).max(0.5)
    }
}

/// Nominal axial capacity per unit length (kN/m)
///
/// Empirical wall equation `0.55·fc'·Ag·(1 − (k·lu/32t)²)` plus the
/// vertical steel contribution, reduced for slenderness.
pub fn axial_capacity_kn_per_m(
    input: &WallInput,
    props: &MaterialProperties,
    vertical_ratio: f64,
) -> f64 {
    let ag = input.gross_area_per_m();
    let as_v = vertical_ratio * ag;
    let le_term = input.effective_length_mm / (32.0 * input.thickness_mm);

    let pn = 0.55 * props.fc_prime * ag * (1.0 - le_term * le_term) + as_v * props.fy;
    (pn * slenderness_factor(input) / 1000.0).max(0.0)
}

/// Nominal in-plane shear capacity (kN)
///
/// Shear walls use the 0.25√fc' concrete term, bearing walls 0.17√fc';
/// the total is capped at 0.83√fc'·Acv.
pub fn in_plane_shear_capacity_kn(
    input: &WallInput,
    props: &MaterialProperties,
    horizontal_ratio: f64,
) -> f64 {
    let acv = input.shear_area_mm2();
    let sqrt_fc = props.fc_prime.sqrt();

    let alpha = if input.wall_type == WallType::Shear {
        0.25
    } else {
        0.17
    };
    let vc = alpha * sqrt_fc * acv / 1000.0;
    let vs = horizontal_ratio * acv * props.fy / 1000.0;

    let vn_max = 0.83 * sqrt_fc * acv / 1000.0;
    (vc + vs).min(vn_max)
}

/// Out-of-plane design moment capacity per unit length (kN·m/m)
pub fn out_of_plane_moment_capacity(
    input: &WallInput,
    props: &MaterialProperties,
    vertical_ratio: f64,
) -> f64 {
    let t = input.thickness_mm;
    let d = t - input.cover_mm - 10.0;
    let as_v = vertical_ratio * t * 1000.0;
    if as_v <= 0.0 || d <= 0.0 {
        return 0.0;
    }

    let a = as_v * props.fy / (0.85 * props.fc_prime * 1000.0);
    let c = a / 0.85;
    let epsilon_t = 0.003 * (d - c) / c;

    let phi = if epsilon_t >= 0.005 {
        0.90
    } else {
        (0.65 + (epsilon_t - 0.002) * (0.25 / 0.003)).max(0.65)
    };

    let mn = as_v * props.fy * (d - a / 2.0) / 1e6;
    phi * mn
}

/// One curtain of distributed wall reinforcement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurtainBars {
    pub bar: BarSize,
    pub spacing_mm: f64,
}

impl CurtainBars {
    /// Steel ratio the selection actually provides
    pub fn provided_ratio(&self, thickness_mm: f64) -> f64 {
        self.bar.area_mm2() / (self.spacing_mm * thickness_mm)
    }
}

/// Select a curtain bar inside the 75-450 mm spacing window
fn select_curtain_bars(required_mm2_per_m: f64) -> CurtainBars {
    const CANDIDATES: [BarSize; 4] = [BarSize::M10, BarSize::M15, BarSize::M20, BarSize::M25];

    for bar in CANDIDATES {
        let spacing = bar.area_mm2() * 1000.0 / required_mm2_per_m;
        if (MIN_SPACING_MM..=MAX_SPACING_MM).contains(&spacing) {
            return CurtainBars {
                bar,
                spacing_mm: spacing,
            };
        }
    }

    let bar = BarSize::M15;
    let spacing = (bar.area_mm2() * 1000.0 / required_mm2_per_m).min(MAX_SPACING_MM);
    CurtainBars {
        bar,
        spacing_mm: spacing,
    }
}

/// Required vertical steel ratio
fn vertical_ratio_required(input: &WallInput, props: &MaterialProperties) -> f64 {
    let base = if props.fy <= 420.0 { 0.0012 } else { 0.0015 };
    if input.loading == WallLoading::GravityOnly {
        base
    } else {
        base + input.out_of_plane_moment_knm_per_m.abs() * 0.0001
    }
}

/// Required horizontal steel ratio, bumped for in-plane shear demand
fn horizontal_ratio_required(input: &WallInput, props: &MaterialProperties) -> f64 {
    let rho_min = 0.0020;
    if input.in_plane_shear_kn <= 0.0 {
        return rho_min;
    }

    let acv = input.shear_area_mm2();
    let vc = 0.17 * props.fc_prime.sqrt() * acv / 1000.0;
    let vs_required = (input.in_plane_shear_kn / PHI_SHEAR - vc).max(0.0);
    let as_shear = vs_required * 1000.0 / props.fy;

    rho_min.max(as_shear / acv)
}

/// Boundary-element screen for seismic shear walls
///
/// Flags when the estimated neutral-axis depth exceeds 0.1·lw under the
/// combined axial force. A positive flag is advisory only.
pub fn boundary_elements_required(input: &WallInput, props: &MaterialProperties) -> bool {
    if input.wall_type != WallType::Shear {
        return false;
    }
    if !matches!(
        input.loading,
        WallLoading::LateralSeismic | WallLoading::Combined
    ) {
        return false;
    }
    if input.out_of_plane_moment_knm_per_m <= 0.0 {
        return false;
    }

    // kN/m times mm is N, consistent with the MPa·mm² denominator
    let p = input.axial_kn_per_m * input.length_mm;
    let c_lw = p / (0.85 * props.fc_prime * input.thickness_mm * input.length_mm);
    c_lw > NEUTRAL_AXIS_LIMIT
}

/// Complete wall design result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallDesign {
    pub minimum_thickness_mm: f64,
    pub thickness_ok: bool,
    pub vertical: CurtainBars,
    pub horizontal: CurtainBars,
    /// Design axial capacity φPn per unit length (kN/m)
    pub axial_capacity_kn_per_m: f64,
    /// Design in-plane shear capacity φVn (kN)
    pub shear_capacity_kn: f64,
    /// Design out-of-plane moment capacity φMn (kN·m/m)
    pub moment_capacity_knm_per_m: f64,
    pub slenderness_factor: f64,
    pub boundary_elements: bool,
    pub utilization: f64,
    pub notes: Vec<String>,
}

impl WallDesign {
    pub fn passes(&self) -> bool {
        self.thickness_ok && self.utilization <= 1.0
    }
}

/// Design a wall for axial, in-plane shear and out-of-plane moment
pub fn design_wall(input: &WallInput) -> DesignResult<WallDesign> {
    input.validate()?;
    let props = MaterialProperties::resolve(input.concrete, input.steel);

    let t_min = input.wall_type.minimum_thickness_mm(input.height_mm);
    let thickness_ok = input.thickness_mm >= t_min;

    let rho_v_req = vertical_ratio_required(input, &props);
    let rho_h_req = horizontal_ratio_required(input, &props);
    let vertical = select_curtain_bars(rho_v_req * input.thickness_mm * 1000.0);
    let horizontal = select_curtain_bars(rho_h_req * input.thickness_mm * 1000.0);

    let rho_v = vertical.provided_ratio(input.thickness_mm);
    let rho_h = horizontal.provided_ratio(input.thickness_mm);

    let factor = slenderness_factor(input);
    let phi_pn = PHI_COMPRESSION * axial_capacity_kn_per_m(input, &props, rho_v);
    let phi_vn = PHI_SHEAR * in_plane_shear_capacity_kn(input, &props, rho_h);
    let phi_mn = out_of_plane_moment_capacity(input, &props, rho_v);

    let boundary = boundary_elements_required(input, &props);

    let util_axial = if phi_pn > 0.0 {
        input.axial_kn_per_m.abs() / phi_pn
    } else {
        0.0
    };
    let util_shear = if phi_vn > 0.0 {
        input.in_plane_shear_kn.abs() / phi_vn
    } else {
        0.0
    };
    let util_moment = if phi_mn > 0.0 {
        input.out_of_plane_moment_knm_per_m.abs() / phi_mn
    } else {
        0.0
    };
    let utilization = util_axial.max(util_shear).max(util_moment);

    let mut notes = Vec::new();
    if !thickness_ok {
        notes.push(format!("Increase thickness to minimum {:.0} mm", t_min));
    }
    if boundary {
        notes.push("Boundary elements required for seismic shear wall".to_string());
    }
    if factor <= 0.5 {
        notes.push("Slenderness at reduction floor - check stability".to_string());
    }
    if utilization > 1.0 {
        notes.push("Design inadequate - increase section or reinforcement".to_string());
    }

    Ok(WallDesign {
        minimum_thickness_mm: t_min,
        thickness_ok,
        vertical,
        horizontal,
        axial_capacity_kn_per_m: phi_pn,
        shear_capacity_kn: phi_vn,
        moment_capacity_knm_per_m: phi_mn,
        slenderness_factor: factor,
        boundary_elements: boundary,
        utilization,
        notes,
    })
}
