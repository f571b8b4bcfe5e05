//! # rc_core - Reinforced Concrete Member Design Engine
//!
//! `rc_core` computes reinforced-concrete member capacities and required
//! reinforcement per ACI 318M-25 (SI units): beams, columns, slabs,
//! footings, walls and diaphragms. Given material grades, member
//! geometry and applied loads, it produces factored capacities, required
//! steel areas, selected bar sizes and spacings, and pass/fail
//! utilization ratios.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **SI throughout**: mm, MPa, kN and kN·m at the API surface
//!
//! ## Quick Start
//!
//! ```rust
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
//!     service_moment_knm: None,
//! };
//!
//! let design = design_beam(&input).unwrap();
//! assert!(design.passes());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Member designers and shared design mechanics
//! - [`loads`] - Load cases and ACI Section 5.3 combinations
//! - [`materials`] - Concrete classes, steel grades, rebar and cover
//! - [`factors`] - Strength reduction factors φ
//! - [`errors`] - Structured error types
//!
//! All quantities are raw `f64` with unit-suffixed field names
//! (`width_mm`, `mu_knm`, `fc_prime` in MPa).

pub mod calculations;
pub mod errors;
pub mod factors;
pub mod loads;
pub mod materials;

// Re-export commonly used types at crate root for convenience
pub use calculations::MemberItem;
pub use errors::{DesignError, DesignResult};
pub use materials::{ConcreteClass, DesignCode, MaterialProperties, SteelGrade};
