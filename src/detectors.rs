//! A few simple detector constructions shipped with g4fire.

use crate::error::ValidationError;
use crate::generators::NOT_GIVEN;
use crate::kind::ConfigKind;
use crate::parameters::Parameters;

const GDML: &str = "g4fire::plugins::detector_constructors::GDML";
const SIMPLE_PRISM: &str = "g4fire::plugins::detector_constructors::SimplePrism";

/// Detector parsed from a GDML file.
pub fn gdml(file_path: &str) -> Result<Parameters, ValidationError> {
    let mut p = Parameters::builder("GDML", ConfigKind::DetectorConstruction, GDML)
        .param("file_path", NOT_GIVEN)
        .build()?;
    p.set("file_path", file_path)?;
    Ok(p)
}

/// A single-material box inside a world volume.
///
/// Materials are named as in `G4NistManager`; `box_dimensions_mm` is the
/// `[x, y, z]` size of the box in mm.
pub fn simple_prism(
    box_material: &str,
    world_material: &str,
    box_dimensions_mm: [f64; 3],
) -> Result<Parameters, ValidationError> {
    let mut p = Parameters::builder("SimplePrism", ConfigKind::DetectorConstruction, SIMPLE_PRISM)
        .param("box_material", NOT_GIVEN)
        .param("world_material", NOT_GIVEN)
        .param("box_dimensions_mm", [10.0, 10.0, 10.0])
        .build()?;
    p.set("box_material", box_material)?;
    p.set("world_material", world_material)?;
    p.set("box_dimensions_mm", box_dimensions_mm)?;
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gdml() {
        let det = gdml("/tmp/geom.gdml").unwrap();
        assert_eq!(det.kind(), ConfigKind::DetectorConstruction);
        assert_eq!(det.get_str("file_path"), Some("/tmp/geom.gdml"));
    }

    #[test]
    fn test_simple_prism() {
        let mut det = simple_prism("G4_Pb", "G4_AIR", [5.0, 5.0, 5.0]).unwrap();
        assert_eq!(det.get_str("box_material"), Some("G4_Pb"));
        assert_eq!(det.get_f64_list("box_dimensions_mm"), Some(&[5.0, 5.0, 5.0][..]));
        assert!(det.set("box_dimensions_mm", vec![5_i64, 5, 5]).is_err());
    }
}
