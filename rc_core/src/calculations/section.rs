//! Rectangular section geometry shared by the member designers

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Rectangular concrete section
///
/// Dimensions in mm. The effective depth is measured from the extreme
/// compression fiber to the centroid of the tension reinforcement.
///
/// # Example
/// ```
/// use rc_core::calculations::section::RectSection;
///
/// let section = RectSection::new(300.0, 600.0, 550.0, 40.0);
/// assert!(section.validate().is_ok());
/// assert_eq!(section.gross_area_mm2(), 180_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSection {
    /// Section width b (mm)
    pub width_mm: f64,
    /// Total section height h (mm)
    pub height_mm: f64,
    /// Effective depth d to tension steel centroid (mm)
    pub effective_depth_mm: f64,
    /// Concrete cover to outermost reinforcement (mm)
    pub cover_mm: f64,
}

impl RectSection {
    /// Create a section with explicit effective depth
    pub fn new(width_mm: f64, height_mm: f64, effective_depth_mm: f64, cover_mm: f64) -> Self {
        RectSection {
            width_mm,
            height_mm,
            effective_depth_mm,
            cover_mm,
        }
    }

    /// Create a section estimating d = h - cover - 10mm stirrup - half a 20M bar
    pub fn with_estimated_depth(width_mm: f64, height_mm: f64, cover_mm: f64) -> Self {
        let effective_depth_mm = height_mm - cover_mm - 10.0 - 19.5 / 2.0;
        RectSection {
            width_mm,
            height_mm,
            effective_depth_mm,
            cover_mm,
        }
    }

    /// Gross cross-sectional area (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.width_mm * self.height_mm
    }

    /// Gross moment of inertia about the strong axis (mm⁴)
    pub fn gross_inertia_mm4(&self) -> f64 {
        self.width_mm * self.height_mm.powi(3) / 12.0
    }

    /// Distance from centroid to extreme tension fiber (mm)
    pub fn yt_mm(&self) -> f64 {
        self.height_mm / 2.0
    }

    /// Validate the physical consistency of the section
    pub fn validate(&self) -> DesignResult<()> {
        if self.width_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "width_mm",
                self.width_mm.to_string(),
                "Width must be positive",
            ));
        }
        if self.height_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "height_mm",
                self.height_mm.to_string(),
                "Height must be positive",
            ));
        }
        if self.cover_mm < 0.0 {
            return Err(DesignError::invalid_geometry(
                "cover_mm",
                self.cover_mm.to_string(),
                "Cover cannot be negative",
            ));
        }
        if self.effective_depth_mm <= 0.0 {
            return Err(DesignError::invalid_geometry(
                "effective_depth_mm",
                self.effective_depth_mm.to_string(),
                "Effective depth must be positive",
            ));
        }
        if self.effective_depth_mm >= self.height_mm {
            return Err(DesignError::invalid_geometry(
                "effective_depth_mm",
                self.effective_depth_mm.to_string(),
                "Effective depth must be less than total height",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_section() {
        let s = RectSection::new(300.0, 600.0, 550.0, 40.0);
        assert!(s.validate().is_ok());
        assert_eq!(s.gross_area_mm2(), 180_000.0);
        assert_eq!(s.yt_mm(), 300.0);
        // Ig = 300 * 600^3 / 12 = 5.4e9
        assert!((s.gross_inertia_mm4() - 5.4e9).abs() < 1.0);
    }

    #[test]
    fn test_estimated_depth() {
        let s = RectSection::with_estimated_depth(300.0, 600.0, 40.0);
        // 600 - 40 - 10 - 9.75 = 540.25
        assert!((s.effective_depth_mm - 540.25).abs() < 1e-9);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_rejects_effective_depth_above_height() {
        let s = RectSection::new(300.0, 500.0, 500.0, 40.0);
        let err = s.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_rejects_nonpositive_dimensions() {
        assert!(RectSection::new(0.0, 600.0, 550.0, 40.0).validate().is_err());
        assert!(RectSection::new(300.0, -1.0, 550.0, 40.0).validate().is_err());
        assert!(RectSection::new(300.0, 600.0, 550.0, -5.0).validate().is_err());
    }
}
