//! Sensitive detectors and their per-subsystem presets.
//!
//! Sensitive detectors are named: several instances of one class (a scoring
//! plane per subsystem, say) coexist in a run and are told apart by name.

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::parameters::Parameters;

const SCORING_PLANE_SD: &str = "simcore::ScoringPlaneSD";
const TRACKER_SD: &str = "simcore::TrackerSD";
const HCAL_SD: &str = "simcore::HcalSD";

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Scoring plane for `subsystem`.
///
/// Hits go to `{Subsystem}ScoringPlaneHits`; volumes are matched on
/// `sp_{subsystem}`, which depends on the GDML naming.
pub fn scoring_plane(subsystem: &str) -> Result<Parameters, ValidationError> {
    Parameters::builder("ScoringPlaneSD", ConfigKind::SensitiveDetector, SCORING_PLANE_SD)
        .name(format!("{subsystem}_sp"))
        .param("collection_name", format!("{}ScoringPlaneHits", capitalize(subsystem)))
        .param("match_substr", format!("sp_{}", subsystem.to_lowercase()))
        .build()
}

/// `ecal_sp`, writing `EcalScoringPlaneHits`.
pub fn ecal_scoring_plane() -> Result<Parameters, ValidationError> {
    scoring_plane("ecal")
}

/// `hcal_sp`.
pub fn hcal_scoring_plane() -> Result<Parameters, ValidationError> {
    scoring_plane("hcal")
}

/// `target_sp`.
pub fn target_scoring_plane() -> Result<Parameters, ValidationError> {
    scoring_plane("target")
}

/// `magnet_sp`.
pub fn magnet_scoring_plane() -> Result<Parameters, ValidationError> {
    scoring_plane("magnet")
}

/// Tracker sensitive detector for `subsystem` with its subdetector id.
pub fn tracker(subsystem: &str, subdet_id: i64) -> Result<Parameters, ValidationError> {
    Parameters::builder("TrackerSD", ConfigKind::SensitiveDetector, TRACKER_SD)
        .name(format!("{subsystem}_TrackerSD"))
        .param("subsystem", subsystem)
        .param("subdet_id", subdet_id)
        .param("collection_name", format!("{subsystem}SimHits"))
        .build()
}

/// Tagger tracker, subdetector id 1.
pub fn tagger_tracker() -> Result<Parameters, ValidationError> {
    tracker("Tagger", 1)
}

/// Recoil tracker, subdetector id 4.
pub fn recoil_tracker() -> Result<Parameters, ValidationError> {
    tracker("Recoil", 4)
}

/// Hadronic calorimeter sensitive detector.
pub fn hcal() -> Result<Parameters, ValidationError> {
    Parameters::builder("HcalSD", ConfigKind::SensitiveDetector, HCAL_SD)
        .name("hcal_sd")
        .param("collection_name", "HcalSimHits")
        .build()
}
