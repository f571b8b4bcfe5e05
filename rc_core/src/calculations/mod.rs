//! Member design calculations per ACI 318M-25
//!
//! Each member designer follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Design` - Design results with selected reinforcement
//! - `design_*(input) -> DesignResult<*Design>` - Pure design function
//!
//! The shared mechanics live in their own modules and are composed by
//! the member designers:
//!
//! - [`section`] - Rectangular section geometry
//! - [`flexure`] - Flexural steel sizing and moment capacity
//! - [`shear`] - Stirrup design and punching shear
//! - [`axial`] - Column axial capacity, slenderness and confinement
//! - [`serviceability`] - Deflection and crack control
//!
//! # Member designers
//!
//! - [`beam`] - Rectangular beam: flexure, shear, deflection
//! - [`column`] - Tied or spiral column with P-M interaction
//! - [`slab`] - One-way and two-way slabs with strip moments
//! - [`footing`] - Isolated footings with soil bearing
//! - [`wall`] - Bearing, shear and retaining walls
//! - [`diaphragm`] - Floor diaphragms, chords and collectors

pub mod axial;
pub mod beam;
pub mod column;
pub mod diaphragm;
pub mod flexure;
pub mod footing;
pub mod section;
pub mod serviceability;
pub mod shear;
pub mod slab;
pub mod wall;

use serde::{Deserialize, Serialize};

pub use beam::{design_beam, BeamDesign, BeamInput};
pub use column::{design_column, ColumnDesign, ColumnInput};
pub use diaphragm::{design_diaphragm, DiaphragmDesign, DiaphragmInput};
pub use footing::{design_footing, FootingDesign, FootingInput};
pub use section::RectSection;
pub use slab::{design_slab, SlabDesign, SlabInput};
pub use wall::{design_wall, WallDesign, WallInput};

/// Enum wrapper for all member design inputs.
///
/// Allows storing heterogeneous members in a single collection while
/// keeping type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MemberItem {
    Beam(BeamInput),
    Column(ColumnInput),
    Slab(SlabInput),
    Footing(FootingInput),
    Wall(WallInput),
    Diaphragm(DiaphragmInput),
}

impl MemberItem {
    /// User-provided label for this member
    pub fn label(&self) -> &str {
        match self {
            MemberItem::Beam(b) => &b.label,
            MemberItem::Column(c) => &c.label,
            MemberItem::Slab(s) => &s.label,
            MemberItem::Footing(f) => &f.label,
            MemberItem::Wall(w) => &w.label,
            MemberItem::Diaphragm(d) => &d.label,
        }
    }

    /// Member type as a string
    pub fn member_type(&self) -> &'static str {
        match self {
            MemberItem::Beam(_) => "Beam",
            MemberItem::Column(_) => "Column",
            MemberItem::Slab(_) => "Slab",
            MemberItem::Footing(_) => "Footing",
            MemberItem::Wall(_) => "Wall",
            MemberItem::Diaphragm(_) => "Diaphragm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConcreteClass, SteelGrade};

    #[test]
    fn test_member_item_roundtrip() {
        let item = MemberItem::Beam(BeamInput {
            label: "B1".into(),
            section: RectSection::new(300.0, 600.0, 550.0, 40.0),
            span_mm: 6000.0,
            concrete: ConcreteClass::Fc28,
            steel: SteelGrade::G420,
            mu_knm: 97.2,
            vu_kn: 120.0,
            service_moment_knm: None,
        });

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Beam\""));

        let back: MemberItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label(), "B1");
        assert_eq!(back.member_type(), "Beam");
    }
}
