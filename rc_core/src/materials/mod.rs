//! # Materials
//!
//! Material grades and derived properties per ACI 318M-25.
//!
//! The code defines a closed set of concrete strength classes
//! (Section 19.2.1.1) and reinforcement grades (Section 20.2.2.4).
//! Everything downstream (stress-block factor, modulus, reinforcement
//! ratio limits) is a deterministic function of the grade pair.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{ConcreteClass, SteelGrade, MaterialProperties};
//!
//! let props = MaterialProperties::resolve(ConcreteClass::Fc28, SteelGrade::G420);
//! assert_eq!(props.fc_prime, 28.0);
//! assert_eq!(props.fy, 420.0);
//! // Ec = 4700 * sqrt(28) ≈ 24870 MPa
//! assert!((props.ec - 24870.0).abs() < 1.0);
//! ```

pub mod cover;
pub mod rebar;

pub use cover::{concrete_cover_mm, ConstructionType, ElementKind, Exposure};
pub use rebar::{BarSelection, BarSize, DevelopmentFactors};

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Standard unit weight of normal-weight concrete (kN/m³)
pub const NORMAL_WEIGHT: f64 = 24.0;

/// Modulus of elasticity of reinforcing steel (MPa)
pub const STEEL_MODULUS: f64 = 200_000.0;

/// Ultimate compressive strain of concrete
pub const CONCRETE_CRUSHING_STRAIN: f64 = 0.003;

/// Supported building codes.
///
/// Callers select the code with a typed value; string-named code
/// lookup is not supported. Material resolution dispatches on this
/// enum, so adding a code means adding a variant and its property
/// tables, not a dynamic registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignCode {
    /// ACI 318M-25, SI units
    #[default]
    Aci318M25,
}

impl DesignCode {
    /// Code identifier as printed in reports
    pub fn identifier(&self) -> &'static str {
        match self {
            DesignCode::Aci318M25 => "ACI 318M-25",
        }
    }
}

/// Concrete strength classes - ACI 318M-25 Section 19.2.1.1
///
/// The numeric suffix is the specified compressive strength fc' in MPa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteClass {
    Fc14,
    Fc17,
    Fc21,
    Fc28,
    Fc35,
    Fc42,
    Fc50,
    Fc55,
    Fc70,
    Fc80,
    Fc100,
}

impl ConcreteClass {
    /// All classes in ascending strength order
    pub const ALL: [ConcreteClass; 11] = [
        ConcreteClass::Fc14,
        ConcreteClass::Fc17,
        ConcreteClass::Fc21,
        ConcreteClass::Fc28,
        ConcreteClass::Fc35,
        ConcreteClass::Fc42,
        ConcreteClass::Fc50,
        ConcreteClass::Fc55,
        ConcreteClass::Fc70,
        ConcreteClass::Fc80,
        ConcreteClass::Fc100,
    ];

    /// Specified compressive strength fc' (MPa)
    pub fn fc_prime(&self) -> f64 {
        match self {
            ConcreteClass::Fc14 => 14.0,
            ConcreteClass::Fc17 => 17.0,
            ConcreteClass::Fc21 => 21.0,
            ConcreteClass::Fc28 => 28.0,
            ConcreteClass::Fc35 => 35.0,
            ConcreteClass::Fc42 => 42.0,
            ConcreteClass::Fc50 => 50.0,
            ConcreteClass::Fc55 => 55.0,
            ConcreteClass::Fc70 => 70.0,
            ConcreteClass::Fc80 => 80.0,
            ConcreteClass::Fc100 => 100.0,
        }
    }

    /// Class designation as written in drawings (e.g. "FC28")
    pub fn code(&self) -> &'static str {
        match self {
            ConcreteClass::Fc14 => "FC14",
            ConcreteClass::Fc17 => "FC17",
            ConcreteClass::Fc21 => "FC21",
            ConcreteClass::Fc28 => "FC28",
            ConcreteClass::Fc35 => "FC35",
            ConcreteClass::Fc42 => "FC42",
            ConcreteClass::Fc50 => "FC50",
            ConcreteClass::Fc55 => "FC55",
            ConcreteClass::Fc70 => "FC70",
            ConcreteClass::Fc80 => "FC80",
            ConcreteClass::Fc100 => "FC100",
        }
    }

    /// Typical usage note for the class
    pub fn usage(&self) -> &'static str {
        match self {
            ConcreteClass::Fc14 => "Plain concrete, non-structural",
            ConcreteClass::Fc17 => "Plain concrete, footings",
            ConcreteClass::Fc21 => "Structural concrete, normal applications",
            ConcreteClass::Fc28 => "Structural concrete, standard",
            ConcreteClass::Fc35 => "High-strength applications",
            ConcreteClass::Fc42 | ConcreteClass::Fc50 => "High-strength structural concrete",
            ConcreteClass::Fc55 | ConcreteClass::Fc70 => "High-performance concrete",
            ConcreteClass::Fc80 | ConcreteClass::Fc100 => "Ultra-high-strength concrete",
        }
    }

    /// Case-insensitive lookup from a designation string
    pub fn from_code(code: &str) -> DesignResult<Self> {
        let normalized = code.trim().to_uppercase();
        ConcreteClass::ALL
            .iter()
            .find(|c| c.code() == normalized)
            .copied()
            .ok_or_else(|| DesignError::unknown_grade("concrete class", code))
    }
}

impl std::fmt::Display for ConcreteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Reinforcement grades - ACI 318M-25 Section 20.2.2.4 (ASTM A615/A615M)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// Grade 280 (40 ksi)
    G280,
    /// Grade 420 (60 ksi) - most common for structural concrete
    G420,
    /// Grade 520 (75 ksi)
    G520,
}

impl SteelGrade {
    /// All grades in ascending strength order
    pub const ALL: [SteelGrade; 3] = [SteelGrade::G280, SteelGrade::G420, SteelGrade::G520];

    /// Specified yield strength fy (MPa)
    pub fn fy(&self) -> f64 {
        match self {
            SteelGrade::G280 => 280.0,
            SteelGrade::G420 => 420.0,
            SteelGrade::G520 => 520.0,
        }
    }

    /// Specified tensile strength fu (MPa)
    pub fn fu(&self) -> f64 {
        match self {
            SteelGrade::G280 => 420.0,
            SteelGrade::G420 => 620.0,
            SteelGrade::G520 => 690.0,
        }
    }

    /// Grade designation string (e.g. "Grade 420 (60 ksi)")
    pub fn designation(&self) -> &'static str {
        match self {
            SteelGrade::G280 => "Grade 280 (40 ksi)",
            SteelGrade::G420 => "Grade 420 (60 ksi)",
            SteelGrade::G520 => "Grade 520 (75 ksi)",
        }
    }

    /// Case-insensitive lookup from a short code ("280", "G420", "grade 520")
    pub fn from_code(code: &str) -> DesignResult<Self> {
        let normalized: String = code
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        match normalized.as_str() {
            "280" => Ok(SteelGrade::G280),
            "420" => Ok(SteelGrade::G420),
            "520" => Ok(SteelGrade::G520),
            _ => Err(DesignError::unknown_grade("steel grade", code)),
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.designation())
    }
}

/// Resolved material properties for a (concrete, steel) grade pair
///
/// All fields in MPa except the unit weight. Immutable once resolved;
/// safe to share read-only across threads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Specified compressive strength fc' (MPa)
    pub fc_prime: f64,
    /// Specified yield strength fy (MPa)
    pub fy: f64,
    /// Specified tensile strength fu (MPa)
    pub fu: f64,
    /// Modulus of elasticity of steel Es (MPa)
    pub es: f64,
    /// Modulus of elasticity of concrete Ec (MPa)
    pub ec: f64,
    /// Unit weight of concrete (kN/m³)
    pub gamma_c: f64,
}

impl MaterialProperties {
    /// Resolve the full property record for a grade pair.
    ///
    /// Normal-weight concrete (γc = 24 kN/m³, λ = 1.0) is assumed;
    /// use [`concrete_modulus`] directly for lightweight mixes.
    pub fn resolve(concrete: ConcreteClass, steel: SteelGrade) -> Self {
        let fc_prime = concrete.fc_prime();
        MaterialProperties {
            fc_prime,
            fy: steel.fy(),
            fu: steel.fu(),
            es: STEEL_MODULUS,
            ec: concrete_modulus(fc_prime, 1.0, NORMAL_WEIGHT),
            gamma_c: NORMAL_WEIGHT,
        }
    }

    /// Resolve properties under an explicitly selected building code.
    ///
    /// [`resolve`](Self::resolve) is the ACI 318M-25 shorthand; this
    /// entry point is the seam for additional codes.
    pub fn resolve_for(code: DesignCode, concrete: ConcreteClass, steel: SteelGrade) -> Self {
        match code {
            DesignCode::Aci318M25 => Self::resolve(concrete, steel),
        }
    }

    /// Steel/concrete modular ratio n = Es/Ec
    pub fn modular_ratio(&self) -> f64 {
        self.es / self.ec
    }

    /// Stress-block depth factor β1 for this concrete
    pub fn beta1(&self) -> f64 {
        beta1(self.fc_prime)
    }
}

/// Modulus of elasticity of concrete - ACI 318M-25 Eq. (19.2.2.1b)
///
/// `Ec = γc^1.5 × 0.043 × √fc' × λ`; for normal-weight concrete
/// (γc = 24 kN/m³) the code's simplified form `Ec = 4700√fc' × λ` is used.
pub fn concrete_modulus(fc_prime: f64, lambda: f64, gamma_c: f64) -> f64 {
    if gamma_c == NORMAL_WEIGHT {
        4700.0 * fc_prime.sqrt() * lambda
    } else {
        gamma_c.powf(1.5) * 0.043 * fc_prime.sqrt() * lambda
    }
}

/// Modulus of rupture - ACI 318M-25 Section 24.2.3.5
///
/// `fr = 0.62 × λ × √fc'` (MPa)
pub fn modulus_of_rupture(fc_prime: f64, lambda: f64) -> f64 {
    0.62 * lambda * fc_prime.sqrt()
}

/// Stress-block depth factor β1 - ACI 318M-25 Section 22.2.2.4.3
pub fn beta1(fc_prime: f64) -> f64 {
    if fc_prime <= 28.0 {
        0.85
    } else if fc_prime <= 55.0 {
        0.85 - 0.05 * (fc_prime - 28.0) / 7.0
    } else {
        0.65
    }
}

/// Balanced reinforcement ratio - ACI 318M-25 Section 22.2.2.1
///
/// Derived from strain compatibility at simultaneous crushing and yield:
/// `ρb = (0.85·fc'·β1/fy) × εcu/(εcu + εy)`
pub fn balanced_ratio(fc_prime: f64, fy: f64) -> f64 {
    let ey = fy / STEEL_MODULUS;
    let cb_over_d = CONCRETE_CRUSHING_STRAIN / (CONCRETE_CRUSHING_STRAIN + ey);
    (0.85 * fc_prime * beta1(fc_prime) / fy) * cb_over_d
}

/// Minimum flexural reinforcement ratio - ACI 318M-25 Section 9.6.1.2
///
/// `ρmin = max(1.4/fy, 0.25√fc'/fy)`
pub fn minimum_ratio(fc_prime: f64, fy: f64) -> f64 {
    (1.4 / fy).max(0.25 * fc_prime.sqrt() / fy)
}

/// Maximum reinforcement ratio for tension-controlled behavior
/// (approximately 75% of balanced) - ACI 318M-25 Section 21.2.2
pub fn maximum_ratio(fc_prime: f64, fy: f64) -> f64 {
    0.75 * balanced_ratio(fc_prime, fy)
}

/// List all concrete classes (configuration layer interface)
pub fn list_concrete_grades() -> Vec<ConcreteClass> {
    ConcreteClass::ALL.to_vec()
}

/// List all steel grades (configuration layer interface)
pub fn list_steel_grades() -> Vec<SteelGrade> {
    SteelGrade::ALL.to_vec()
}

/// List all bar sizes (configuration layer interface)
pub fn list_bar_sizes() -> Vec<BarSize> {
    BarSize::ALL.to_vec()
}
