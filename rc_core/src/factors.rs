//! Strength reduction factors (φ) per ACI 318M-25 Section 21.2
//!
//! Design capacity = φ × nominal capacity. The factor depends on the
//! governing failure mode, not on the member type.

use serde::{Deserialize, Serialize};

/// Failure modes with distinct strength reduction factors
///
/// # Example
/// ```
/// use rc_core::factors::FailureMode;
///
/// assert_eq!(FailureMode::TensionControlled.phi(), 0.90);
/// assert_eq!(FailureMode::Shear.phi(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    /// Flexure with net tensile strain >= 0.005
    TensionControlled,
    /// Compression-controlled section with tie confinement
    CompressionTied,
    /// Compression-controlled section with spiral confinement
    CompressionSpiral,
    /// One-way or two-way shear
    Shear,
    /// Torsion
    Torsion,
    /// Bearing on concrete
    Bearing,
    /// Plain (unreinforced) concrete
    PlainConcrete,
}

impl FailureMode {
    /// All failure modes in table order
    pub const ALL: [FailureMode; 7] = [
        FailureMode::TensionControlled,
        FailureMode::CompressionTied,
        FailureMode::CompressionSpiral,
        FailureMode::Shear,
        FailureMode::Torsion,
        FailureMode::Bearing,
        FailureMode::PlainConcrete,
    ];

    /// Strength reduction factor φ
    pub fn phi(&self) -> f64 {
        match self {
            FailureMode::TensionControlled => 0.90,
            FailureMode::CompressionTied => 0.65,
            FailureMode::CompressionSpiral => 0.75,
            FailureMode::Shear => 0.75,
            FailureMode::Torsion => 0.75,
            FailureMode::Bearing => 0.65,
            FailureMode::PlainConcrete => 0.60,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            FailureMode::TensionControlled => "Tension-controlled flexure",
            FailureMode::CompressionTied => "Compression-controlled, tied",
            FailureMode::CompressionSpiral => "Compression-controlled, spiral",
            FailureMode::Shear => "Shear",
            FailureMode::Torsion => "Torsion",
            FailureMode::Bearing => "Bearing on concrete",
            FailureMode::PlainConcrete => "Plain concrete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_values() {
        assert_eq!(FailureMode::TensionControlled.phi(), 0.90);
        assert_eq!(FailureMode::CompressionTied.phi(), 0.65);
        assert_eq!(FailureMode::CompressionSpiral.phi(), 0.75);
        assert_eq!(FailureMode::Shear.phi(), 0.75);
        assert_eq!(FailureMode::Bearing.phi(), 0.65);
    }

    #[test]
    fn test_all_modes_have_phi_below_one() {
        for mode in FailureMode::ALL {
            assert!(mode.phi() < 1.0);
            assert!(mode.phi() >= 0.60);
        }
    }
}
