//! Complete beam design - flexure, shear and deflection
//!
//! Composes the flexural sizer, stirrup designer and serviceability
//! checks into a single pass over a rectangular beam, reporting design
//! capacities, a combined utilization ratio and advisory notes.
//!
//! # Example
//! ```
//! use rc_core::calculations::beam::{design_beam, BeamInput};
//! use rc_core::calculations::section::RectSection;
//! use rc_core::materials::{ConcreteClass, SteelGrade};
//!
//! let input = BeamInput {
//!     label: "B1".into(),
//!     section: RectSection::new(300.0, 600.0, 550.0, 40.0),
//!     span_mm: 6000.0,
//!     concrete: ConcreteClass::Fc28,
//!     steel: SteelGrade::G420,
//!     mu_knm: 97.2,
//!     vu_kn: 120.0,
//!     service_moment_knm: Some(70.0),
//! };
//! let design = design_beam(&input).unwrap();
//! assert!(design.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::flexure::{moment_capacity, size_flexure, FlexuralDesign};
use crate::calculations::section::RectSection;
use crate::calculations::serviceability::{check_deflection, DeflectionCase, DeflectionCheck};
use crate::calculations::shear::{concrete_shear_kn, design_stirrups, StirrupDesign};
use crate::errors::{DesignError, DesignResult};
use crate::factors::FailureMode;
use crate::materials::{ConcreteClass, MaterialProperties, SteelGrade};

/// Beam design input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamInput {
    pub label: String,
    pub section: RectSection,
    /// Span between supports (mm)
    pub span_mm: f64,
    pub concrete: ConcreteClass,
    pub steel: SteelGrade,
    /// Factored design moment (kN·m)
    pub mu_knm: f64,
    /// Factored design shear (kN)
    pub vu_kn: f64,
    /// Service-level moment for the deflection check (kN·m)
    pub service_moment_knm: Option<f64>,
}

impl BeamInput {
    pub fn validate(&self) -> DesignResult<()> {
        self.section.validate()?;
        if self.span_mm <= 0.0 {
            return Err(DesignError::invalid_input(
                "span_mm",
                self.span_mm.to_string(),
                "Span must be positive",
            ));
        }
        Ok(())
    }
}

/// Complete beam design result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamDesign {
    /// Factored moment demand (kN·m)
    pub mu_knm: f64,

    /// Factored shear demand (kN)
    pub vu_kn: f64,

    pub flexure: FlexuralDesign,
    pub stirrups: StirrupDesign,

    /// Design moment capacity φMn at the required steel area (kN·m)
    pub moment_capacity_knm: f64,

    /// Design shear capacity φ(Vc + Vs) with the selected stirrups (kN)
    pub shear_capacity_kn: f64,

    /// Deflection check, present when a service moment was supplied
    pub deflection: Option<DeflectionCheck>,

    /// max(moment, shear) demand/capacity ratio
    pub utilization: f64,

    pub notes: Vec<String>,
}

impl BeamDesign {
    pub fn passes(&self) -> bool {
        self.utilization <= 1.0
    }

    /// Which check produced the utilization ratio
    pub fn governing_condition(&self) -> &'static str {
        let moment = if self.moment_capacity_knm > 0.0 {
            self.mu_knm / self.moment_capacity_knm
        } else {
            1.0
        };
        if moment >= self.utilization {
            "moment"
        } else {
            "shear"
        }
    }
}

/// Design a beam for factored moment and shear, with optional deflection
pub fn design_beam(input: &BeamInput) -> DesignResult<BeamDesign> {
    input.validate()?;
    let props = MaterialProperties::resolve(input.concrete, input.steel);

    let flexure = size_flexure(input.mu_knm, &input.section, &props)?;
    let stirrups = design_stirrups(input.vu_kn, &input.section, &props)?;

    let phi_mn = moment_capacity(flexure.required_area_mm2, &input.section, &props);

    let vc = concrete_shear_kn(&input.section, &props, 1.0);
    let vs = match (stirrups.bar, stirrups.spacing_mm) {
        (Some(bar), s) if s > 0.0 => {
            2.0 * bar.area_mm2() * props.fy * input.section.effective_depth_mm / s / 1000.0
        }
        _ => 0.0,
    };
    let phi_vn = FailureMode::Shear.phi() * (vc + vs);

    let deflection = input.service_moment_knm.map(|m| {
        check_deflection(
            &input.section,
            &props,
            flexure.required_area_mm2,
            m,
            input.span_mm,
            DeflectionCase::ImmediateFloor,
        )
    });

    let util_moment = if phi_mn > 0.0 {
        input.mu_knm / phi_mn
    } else {
        1.0
    };
    let util_shear = if phi_vn > 0.0 {
        input.vu_kn / phi_vn
    } else {
        1.0
    };
    let utilization = util_moment.max(util_shear);

    let mut notes = Vec::new();
    if flexure.doubly_reinforced {
        notes.push("Compression reinforcement required".to_string());
    }
    if flexure.minimum_governs {
        notes.push("Minimum reinforcement governs".to_string());
    }
    if stirrups.bar.is_none() {
        notes.push("No shear reinforcement required".to_string());
    }
    if let Some(check) = &deflection {
        if !check.ok {
            notes.push("Deflection may exceed typical limits".to_string());
        }
    }
    if utilization > 1.0 {
        notes.push("Section inadequate for factored demands".to_string());
    }

    Ok(BeamDesign {
        mu_knm: input.mu_knm,
        vu_kn: input.vu_kn,
        flexure,
        stirrups,
        moment_capacity_knm: phi_mn,
        shear_capacity_kn: phi_vn,
        deflection,
        utilization,
        notes,
    })
}
