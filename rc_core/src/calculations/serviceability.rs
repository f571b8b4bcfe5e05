//! Serviceability checks - ACI 318M-25 Chapter 24
//!
//! Cracked transformed-section properties, effective moment of inertia,
//! deflection and the crack-control z parameter. Deflection uses the
//! uniformly-loaded simply-supported expression `Δ = 5·M·L²/(48·Ec·Ie)`
//! for every support condition; a documented approximation, not exact
//! double integration.

use serde::{Deserialize, Serialize};

use crate::calculations::section::RectSection;
use crate::materials::{modulus_of_rupture, MaterialProperties};

/// Crack-control z limit for interior exposure (N/mm)
pub const Z_LIMIT_INTERIOR: f64 = 30_000.0;

/// Crack-control z limit for exterior exposure (N/mm)
pub const Z_LIMIT_EXTERIOR: f64 = 25_000.0;

/// Cracking moment Mcr = fr·Ig/yt (N·mm) - ACI 318M-25 Section 24.2.3.5
pub fn cracking_moment(fr_mpa: f64, ig_mm4: f64, yt_mm: f64) -> f64 {
    fr_mpa * ig_mm4 / yt_mm
}

/// Cracked-section neutral axis depth ratio k = √(2ρn + (ρn)²) − ρn
pub fn neutral_axis_ratio(rho: f64, n: f64) -> f64 {
    let rho_n = rho * n;
    (2.0 * rho_n + rho_n * rho_n).sqrt() - rho_n
}

/// Cracked transformed moment of inertia (mm⁴)
///
/// `Icr = b·(k·d)³/3 + n·As·(d − k·d)²`
pub fn cracked_inertia(section: &RectSection, as_mm2: f64, n: f64) -> f64 {
    let b = section.width_mm;
    let d = section.effective_depth_mm;
    let rho = as_mm2 / (b * d);
    let k = neutral_axis_ratio(rho, n);

    b * (k * d).powi(3) / 3.0 + n * as_mm2 * (d * (1.0 - k)).powi(2)
}

/// Effective moment of inertia - ACI 318M-25 Eq. (24.2.3.5)
///
/// `Ie = Ig` for uncracked sections (Ma ≤ Mcr); otherwise the cubic
/// interpolation, never exceeding `Ig`. All moments in consistent units.
pub fn effective_inertia(ma: f64, mcr: f64, ig: f64, icr: f64) -> f64 {
    if ma <= mcr {
        return ig;
    }
    let ratio = (mcr / ma).powi(3);
    (ratio * ig + (1.0 - ratio) * icr).min(ig)
}

/// Midspan deflection of a uniformly loaded simply supported member (mm)
///
/// `Δ = 5·M·L²/(48·Ec·Ie)` with M the service midspan moment.
pub fn deflection_mm(service_moment_knm: f64, span_mm: f64, ec_mpa: f64, ie_mm4: f64) -> f64 {
    if ec_mpa <= 0.0 || ie_mm4 <= 0.0 {
        return 0.0;
    }
    5.0 * service_moment_knm * 1e6 * span_mm * span_mm / (48.0 * ec_mpa * ie_mm4)
}

/// Long-term deflection multiplier λΔ = ξ/(1 + 50ρ')
/// - ACI 318M-25 Eq. (24.2.4.1.1), ξ = 2.0 for sustained loads ≥ 5 years
pub fn long_term_multiplier(rho_prime: f64) -> f64 {
    2.0 / (1.0 + 50.0 * rho_prime)
}

/// Deflection-limit cases - ACI 318M-25 Table 24.2.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeflectionCase {
    /// Immediate, flat roof: L/180
    ImmediateFlatRoof,
    /// Immediate, floor: L/360
    ImmediateFloor,
    /// Immediate, supporting nonstructural elements: L/240
    ImmediateSupportingNonstructural,
    /// Long-term, supporting nonstructural elements likely to be damaged: L/480
    LongTermSupportingNonstructural,
    /// Long-term, not supporting nonstructural elements: L/240
    LongTermNotSupportingNonstructural,
}

impl DeflectionCase {
    /// Span divisor for the allowable deflection L/n
    pub fn denominator(&self) -> f64 {
        match self {
            DeflectionCase::ImmediateFlatRoof => 180.0,
            DeflectionCase::ImmediateFloor => 360.0,
            DeflectionCase::ImmediateSupportingNonstructural => 240.0,
            DeflectionCase::LongTermSupportingNonstructural => 480.0,
            DeflectionCase::LongTermNotSupportingNonstructural => 240.0,
        }
    }

    /// Allowable deflection for a span (mm)
    pub fn limit_mm(&self, span_mm: f64) -> f64 {
        span_mm / self.denominator()
    }
}

/// Crack-control z parameter result - ACI 318M-25 Section 24.3.2
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrackControl {
    /// z = fs·(dc·A)^(1/3) (N/mm)
    pub z_parameter: f64,
    pub interior_ok: bool,
    pub exterior_ok: bool,
}

/// Evaluate the crack-control parameter; reported, never a hard failure
///
/// `fs_mpa` is the service-level steel stress, `dc_mm` the cover to the
/// bar center, `area_per_bar_mm2` the concrete area tributary to one bar.
pub fn crack_control(fs_mpa: f64, dc_mm: f64, area_per_bar_mm2: f64) -> CrackControl {
    let z = fs_mpa * (dc_mm * area_per_bar_mm2).cbrt();
    CrackControl {
        z_parameter: z,
        interior_ok: z <= Z_LIMIT_INTERIOR,
        exterior_ok: z <= Z_LIMIT_EXTERIOR,
    }
}

/// Full deflection check for a reinforced rectangular section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionCheck {
    pub deflection_mm: f64,
    pub limit_mm: f64,
    pub ok: bool,
    /// Cracking moment (kN·m)
    pub cracking_moment_knm: f64,
    /// Effective moment of inertia used (mm⁴)
    pub effective_inertia_mm4: f64,
}

/// Compute the service deflection of a section and compare to a limit case
pub fn check_deflection(
    section: &RectSection,
    props: &MaterialProperties,
    as_mm2: f64,
    service_moment_knm: f64,
    span_mm: f64,
    case: DeflectionCase,
) -> DeflectionCheck {
    let ig = section.gross_inertia_mm4();
    let fr = modulus_of_rupture(props.fc_prime, 1.0);
    let mcr = cracking_moment(fr, ig, section.yt_mm());
    let n = props.modular_ratio();
    let icr = cracked_inertia(section, as_mm2, n);
    let ie = effective_inertia(service_moment_knm * 1e6, mcr, ig, icr);

    let delta = deflection_mm(service_moment_knm, span_mm, props.ec, ie);
    let limit = case.limit_mm(span_mm);

    DeflectionCheck {
        deflection_mm: delta,
        limit_mm: limit,
        ok: delta <= limit,
        cracking_moment_knm: mcr / 1e6,
        effective_inertia_mm4: ie,
    }
}
