//! Cross-section biasing operators.
//!
//! Every operator biases one process inside one logical volume by `factor`.
//! Thresholds are kinetic energies in MeV below which no biasing happens.

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::parameters::{Parameters, ParametersBuilder};

fn operator(type_name: &str, name: &str, volume: &str, factor: f64) -> ParametersBuilder {
    Parameters::builder(
        type_name,
        ConfigKind::BiasingOperator,
        format!("g4fire::biasing::{type_name}"),
    )
    .name(name)
    .param("volume", volume)
    .param("factor", factor)
}

/// Photo-nuclear biasing.
///
/// `down_bias_conv` lowers the conversion cross-section to compensate;
/// `only_children_of_primary` restricts biasing to photons from the primary.
pub fn photo_nuclear(
    name: &str,
    volume: &str,
    factor: f64,
    threshold: f64,
) -> Result<Parameters, ValidationError> {
    operator("PhotoNuclear", name, volume, factor)
        .param("threshold", threshold)
        .param("down_bias_conv", true)
        .param("only_children_of_primary", false)
        .build()
}

/// Dark bremsstrahlung biasing.
pub fn dark_brem(name: &str, volume: &str, factor: f64) -> Result<Parameters, ValidationError> {
    operator("DarkBrem", name, volume, factor)
        .param("bias_all", false)
        .build()
}

/// Biases muon pair conversion of photons above `threshold` MeV.
pub fn gamma_to_mu_pair(
    name: &str,
    volume: &str,
    factor: f64,
    threshold: f64,
) -> Result<Parameters, ValidationError> {
    operator("GammaToMuPair", name, volume, factor)
        .param("threshold", threshold)
        .build()
}

/// Biases K0L inelastic interactions above `threshold` MeV.
pub fn k0_long_inelastic(
    name: &str,
    volume: &str,
    factor: f64,
    threshold: f64,
) -> Result<Parameters, ValidationError> {
    operator("K0LongInelastic", name, volume, factor)
        .param("threshold", threshold)
        .build()
}

/// Biases neutron inelastic interactions above `threshold` MeV.
pub fn neutron_inelastic(
    name: &str,
    volume: &str,
    factor: f64,
    threshold: f64,
) -> Result<Parameters, ValidationError> {
    operator("NeutronInelastic", name, volume, factor)
        .param("threshold", threshold)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_nuclear() {
        let mut pn = photo_nuclear("pn_target", "target", 450.0, 2500.0).unwrap();
        assert_eq!(pn.class_name(), "g4fire::biasing::PhotoNuclear");
        assert_eq!(pn.name(), Some("pn_target"));
        assert_eq!(pn.get_bool("down_bias_conv"), Some(true));
        pn.set("only_children_of_primary", true).unwrap();
        assert!(pn.set("threshold", 2500).is_err());
    }

    #[test]
    fn test_dark_brem() {
        let db = dark_brem("db", "target", 1e6).unwrap();
        assert_eq!(db.get_bool("bias_all"), Some(false));
        assert!(!db.contains("threshold"));
    }

    #[test]
    fn test_threshold_operators() {
        for op in [
            gamma_to_mu_pair("a", "ecal", 10.0, 100.0),
            k0_long_inelastic("b", "hcal", 5.0, 50.0),
            neutron_inelastic("c", "hcal", 2.0, 20.0),
        ] {
            let op = op.unwrap();
            assert_eq!(op.kind(), ConfigKind::BiasingOperator);
            assert!(op.get_f64("threshold").is_some());
            assert!(op.class_name().starts_with("g4fire::biasing::"));
        }
    }
}
