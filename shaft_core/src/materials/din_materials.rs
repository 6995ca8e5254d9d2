//! Built-in material records.
//!
//! Strength values follow the usual DIN EN designations (S235, C45, 42CrMo4,
//! X5CrNi18-10, EN-GJL-250, EN-GJS-400, CuSn8, EN AW-6061/7075). Key and
//! spline allowables are static bearing/shear limits for a steady load.

use super::{Material, MaterialCategory};

#[allow(clippy::too_many_arguments)]
fn record(
    name: &str,
    e_mpa: f64,
    poisson: f64,
    yield_mpa: f64,
    ultimate_mpa: f64,
    ductile: bool,
    sf_ductile: f64,
    sf_brittle: f64,
    allowables: [f64; 3],
    thermal_expansion_per_k: f64,
    category: MaterialCategory,
) -> Material {
    let [tau_allow_key_mpa, p_allow_key_mpa, p_allow_spline_mpa] = allowables;
    Material {
        name: name.to_string(),
        e_mpa,
        poisson,
        yield_mpa,
        ultimate_mpa,
        ductile,
        sf_ductile,
        sf_brittle,
        tau_allow_key_mpa,
        p_allow_key_mpa,
        p_allow_spline_mpa,
        thermal_expansion_per_k,
        category,
    }
}

/// The standard catalog records.
///
/// Allowables are `[τ_key, p_key, p_spline]` in MPa.
pub fn standard_materials() -> Vec<Material> {
    use MaterialCategory::*;

    vec![
        // Steels
        record("Steel S235", 210_000.0, 0.30, 235.0, 360.0, true, 1.5, 2.5, [45.0, 70.0, 55.0], 12.0e-6, Steel),
        record("Steel C45", 210_000.0, 0.30, 340.0, 600.0, true, 1.5, 2.5, [60.0, 90.0, 70.0], 11.5e-6, Steel),
        record("Steel 42CrMo4", 210_000.0, 0.30, 650.0, 900.0, true, 1.5, 2.5, [100.0, 150.0, 120.0], 11.5e-6, Steel),
        record("Stainless 304", 193_000.0, 0.29, 215.0, 505.0, true, 1.6, 2.5, [40.0, 65.0, 50.0], 16.0e-6, Steel),
        // Cast irons: grey iron has no yield point (0.2% proof stress listed)
        record("Cast Iron GG25", 110_000.0, 0.26, 165.0, 250.0, false, 2.0, 3.0, [30.0, 50.0, 40.0], 10.0e-6, CastIron),
        record("Cast Iron GGG40", 169_000.0, 0.275, 250.0, 400.0, true, 1.6, 2.5, [50.0, 75.0, 60.0], 11.0e-6, CastIron),
        // Bronze
        record("Bronze CuSn8", 110_000.0, 0.34, 150.0, 300.0, true, 1.6, 2.5, [30.0, 45.0, 35.0], 18.0e-6, Bronze),
        // Aluminum
        record("Aluminum 6061", 69_000.0, 0.33, 95.0, 290.0, true, 1.6, 2.5, [25.0, 40.0, 30.0], 23.0e-6, Aluminum),
        record("Aluminum 7075", 71_700.0, 0.33, 503.0, 572.0, true, 1.6, 2.5, [80.0, 120.0, 95.0], 23.5e-6, Aluminum),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count_and_uniqueness() {
        let records = standard_materials();
        assert_eq!(records.len(), 9);
        let mut names: Vec<_> = records.iter().map(|m| m.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_only_grey_iron_is_brittle() {
        let brittle: Vec<_> = standard_materials()
            .into_iter()
            .filter(|m| !m.ductile)
            .map(|m| m.name)
            .collect();
        assert_eq!(brittle, vec!["Cast Iron GG25".to_string()]);
    }
}
