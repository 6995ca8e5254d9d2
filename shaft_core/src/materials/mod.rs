//! # Materials Catalog
//!
//! Mechanical properties and allowable-stress coefficients for shaft and hub
//! materials. The catalog is an immutable name → [`Material`] mapping that is
//! validated once when it is built and read-only afterwards.
//!
//! ## Allowable Stress
//!
//! ```text
//! σ_zul = R_e  / max(SF, 1.2)   (ductile)
//! σ_zul = R_m  / max(SB, 2.0)   (brittle)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::standard();
//! let sigma = catalog.allowable_stress("Steel C45").unwrap();
//! // 340 MPa / 1.5
//! assert!((sigma - 226.67).abs() < 0.01);
//! ```

pub mod din_materials;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Minimum design factor applied to ductile materials
pub const MIN_DUCTILE_FACTOR: f64 = 1.2;

/// Minimum design factor applied to brittle materials
pub const MIN_BRITTLE_FACTOR: f64 = 2.0;

static STANDARD_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| MaterialCatalog {
    materials: din_materials::standard_materials()
        .into_iter()
        .map(|m| (m.name.clone(), m))
        .collect(),
});

/// Material family used for friction pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Steel,
    CastIron,
    Bronze,
    Aluminum,
}

impl MaterialCategory {
    /// All categories
    pub const ALL: [MaterialCategory; 4] = [
        MaterialCategory::Steel,
        MaterialCategory::CastIron,
        MaterialCategory::Bronze,
        MaterialCategory::Aluminum,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Steel => "Steel",
            MaterialCategory::CastIron => "Cast iron",
            MaterialCategory::Bronze => "Bronze",
            MaterialCategory::Aluminum => "Aluminum",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Shaft or hub material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Steel C45",
///   "e_mpa": 210000.0,
///   "poisson": 0.30,
///   "yield_mpa": 340.0,
///   "ultimate_mpa": 600.0,
///   "ductile": true,
///   "sf_ductile": 1.5,
///   "sf_brittle": 2.5,
///   "tau_allow_key_mpa": 60.0,
///   "p_allow_key_mpa": 90.0,
///   "p_allow_spline_mpa": 70.0,
///   "thermal_expansion_per_k": 11.5e-6,
///   "category": "steel"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog name (e.g., "Steel C45")
    pub name: String,
    /// Young's modulus E (MPa)
    pub e_mpa: f64,
    /// Poisson ratio ν
    pub poisson: f64,
    /// Yield strength R_e (MPa); 0.2% proof stress for materials without a yield point
    pub yield_mpa: f64,
    /// Ultimate tensile strength R_m (MPa)
    pub ultimate_mpa: f64,
    /// Ductile (yield-governed) or brittle (fracture-governed)
    pub ductile: bool,
    /// Safety factor against yielding (ductile)
    pub sf_ductile: f64,
    /// Safety factor against fracture (brittle)
    pub sf_brittle: f64,
    /// Allowable key shear stress (MPa)
    pub tau_allow_key_mpa: f64,
    /// Allowable key flank bearing pressure (MPa)
    pub p_allow_key_mpa: f64,
    /// Allowable spline flank bearing pressure (MPa)
    pub p_allow_spline_mpa: f64,
    /// Linear thermal expansion coefficient α (1/K)
    pub thermal_expansion_per_k: f64,
    /// Friction pairing category
    pub category: MaterialCategory,
}

impl Material {
    /// Allowable stress σ_zul (MPa).
    pub fn allowable_stress_mpa(&self) -> f64 {
        if self.ductile {
            self.yield_mpa / self.sf_ductile.max(MIN_DUCTILE_FACTOR)
        } else {
            self.ultimate_mpa / self.sf_brittle.max(MIN_BRITTLE_FACTOR)
        }
    }

    /// Validate a single record.
    pub fn validate(&self) -> CalcResult<()> {
        let table = "materials";
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_table(table, "material name must not be empty"));
        }
        let positive = [
            ("e_mpa", self.e_mpa),
            ("yield_mpa", self.yield_mpa),
            ("ultimate_mpa", self.ultimate_mpa),
            ("sf_ductile", self.sf_ductile),
            ("sf_brittle", self.sf_brittle),
            ("tau_allow_key_mpa", self.tau_allow_key_mpa),
            ("p_allow_key_mpa", self.p_allow_key_mpa),
            ("p_allow_spline_mpa", self.p_allow_spline_mpa),
            ("thermal_expansion_per_k", self.thermal_expansion_per_k),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_table(
                    table,
                    format!("{}: {} must be positive, got {}", self.name, field, value),
                ));
            }
        }
        if !(0.0..0.5).contains(&self.poisson) {
            return Err(CalcError::invalid_table(
                table,
                format!("{}: poisson must be in [0, 0.5), got {}", self.name, self.poisson),
            ));
        }
        Ok(())
    }
}

/// Read-only mapping from material name to [`Material`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCatalog {
    materials: HashMap<String, Material>,
}

impl MaterialCatalog {
    /// Built-in catalog (DIN-grade steels, cast irons, bronze, aluminum).
    pub fn standard() -> MaterialCatalog {
        STANDARD_CATALOG.clone()
    }

    /// Shared reference to the built-in catalog
    pub fn standard_ref() -> &'static MaterialCatalog {
        &STANDARD_CATALOG
    }

    /// Build a catalog from explicit records, validating each one and
    /// rejecting duplicate names.
    pub fn from_records(records: Vec<Material>) -> CalcResult<MaterialCatalog> {
        if records.is_empty() {
            return Err(CalcError::invalid_table("materials", "catalog must contain at least one material"));
        }
        let mut materials = HashMap::with_capacity(records.len());
        for record in records {
            record.validate()?;
            if materials.contains_key(&record.name) {
                return Err(CalcError::invalid_table(
                    "materials",
                    format!("duplicate material name '{}'", record.name),
                ));
            }
            materials.insert(record.name.clone(), record);
        }
        Ok(MaterialCatalog { materials })
    }

    /// Load a catalog from a JSON array of [`Material`] records.
    pub fn from_json_str(json: &str) -> CalcResult<MaterialCatalog> {
        let records: Vec<Material> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Look up a material by exact name.
    pub fn get(&self, name: &str) -> CalcResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Allowable stress σ_zul (MPa) of a named material.
    pub fn allowable_stress(&self, name: &str) -> CalcResult<f64> {
        Ok(self.get(name)?.allowable_stress_mpa())
    }

    /// Friction category of a named material.
    pub fn category(&self, name: &str) -> CalcResult<MaterialCategory> {
        Ok(self.get(name)?.category)
    }

    /// Material names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.len(), 9);
        for name in catalog.names() {
            catalog.get(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn test_ductile_allowable_stress() {
        let catalog = MaterialCatalog::standard();
        // 650 / 1.5
        let sigma = catalog.allowable_stress("Steel 42CrMo4").unwrap();
        assert!((sigma - 433.333).abs() < 0.001);
    }

    #[test]
    fn test_brittle_allowable_stress() {
        let catalog = MaterialCatalog::standard();
        // Grey cast iron is brittle: 250 / max(3.0, 2.0)
        let sigma = catalog.allowable_stress("Cast Iron GG25").unwrap();
        assert!((sigma - 83.333).abs() < 0.001);
    }

    #[test]
    fn test_design_factor_floor() {
        let mut mat = MaterialCatalog::standard().get("Steel S235").unwrap().clone();
        mat.sf_ductile = 1.0;
        // Floored to 1.2
        assert!((mat.allowable_stress_mpa() - 235.0 / 1.2).abs() < 1e-9);

        mat.ductile = false;
        mat.sf_brittle = 1.5;
        assert!((mat.allowable_stress_mpa() - 360.0 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_material() {
        let catalog = MaterialCatalog::standard();
        let err = catalog.allowable_stress("Unobtainium").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Unobtainium"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_categories() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.category("Stainless 304").unwrap(), MaterialCategory::Steel);
        assert_eq!(catalog.category("Cast Iron GGG40").unwrap(), MaterialCategory::CastIron);
        assert_eq!(catalog.category("Bronze CuSn8").unwrap(), MaterialCategory::Bronze);
        assert_eq!(catalog.category("Aluminum 7075").unwrap(), MaterialCategory::Aluminum);
    }

    #[test]
    fn test_names_sorted() {
        let catalog = MaterialCatalog::standard();
        let names = catalog.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"Steel C45"));
    }

    #[test]
    fn test_from_json_roundtrip() {
        let records: Vec<Material> = din_materials::standard_materials();
        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains("\"category\":\"cast_iron\""));
        let catalog = MaterialCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.names(), MaterialCatalog::standard().names());
        let c45 = catalog.get("Steel C45").unwrap();
        assert_eq!(c45.category, MaterialCategory::Steel);
        assert!((c45.p_allow_spline_mpa - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut records = din_materials::standard_materials();
        records.push(records[0].clone());
        let err = MaterialCatalog::from_records(records).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TABLE");
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut records = din_materials::standard_materials();
        records[1].poisson = 0.7;
        assert!(MaterialCatalog::from_records(records).is_err());

        let mut records = din_materials::standard_materials();
        records[2].p_allow_spline_mpa = 0.0;
        assert!(MaterialCatalog::from_records(records).is_err());

        assert!(MaterialCatalog::from_records(Vec::new()).is_err());
    }
}
