//! Run configuration handed to the native simulator.
//!
//! A [`Simulator`] collects one detector, the primary generators and any
//! number of sensitive detectors, user actions, biasing operators and extra
//! physics constructors. Each slot only accepts configurations of its own
//! [`ConfigKind`]; beyond that nothing about how the objects relate is
//! checked here, the engine resolves it.

use serde::Serialize;
use tracing::info;

use crate::error::{ConfigResult, ValidationError};
use crate::kind::ConfigKind;
use crate::parameters::Parameters;

/// Native class of the simulator processor.
pub const SIMULATOR_CLASS: &str = "g4fire::Simulator";

/// Library the processor is loaded from.
pub const SIMULATOR_MODULE: &str = "g4fire_simulator";

/// Substrings that may not appear in pre/post init commands because the
/// simulator issues those commands itself.
pub const RESERVED_COMMANDS: [&str; 5] = [
    "/run/initialize",
    "/run/beamOn",
    "/random/setSeeds",
    "ldmx",
    "/persistency/gdml/read",
];

/// Returns the reserved substring `command` contains, if any.
#[must_use]
pub fn reserved_in(command: &str) -> Option<&'static str> {
    RESERVED_COMMANDS
        .iter()
        .copied()
        .find(|reserved| command.contains(reserved))
}

fn check_kind(slot: &str, expected: ConfigKind, p: &Parameters) -> Result<(), ValidationError> {
    if p.kind() == expected {
        Ok(())
    } else {
        Err(ValidationError::WrongKind {
            slot: slot.to_string(),
            expected,
            received: p.kind(),
        })
    }
}

fn check_command(command: &str) -> Result<(), ValidationError> {
    match reserved_in(command) {
        Some(reserved) => Err(ValidationError::ForbiddenCommand {
            command: command.to_string(),
            reserved: reserved.to_string(),
        }),
        None => Ok(()),
    }
}

/// A complete simulation run configuration.
///
/// Scalar settings are plain fields; the configuration-object slots go
/// through the `set_*`/`add_*` methods so their kinds are checked.
///
/// # Examples
///
/// ```
/// use g4fire_cfg::{detectors, generators, Simulator};
///
/// let mut sim = Simulator::new(
///     "basic",
///     "basic test sim",
///     detectors::simple_prism("G4_Pb", "G4_AIR", [5.0, 5.0, 5.0]).unwrap(),
/// )
/// .unwrap();
/// sim.add_generator(generators::particle_gun().unwrap()).unwrap();
/// assert!(sim.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulator {
    instance_name: String,
    class_name: String,
    module: String,
    /// Human-readable description of this run.
    pub description: String,
    detector: Parameters,
    generators: Vec<Parameters>,
    sensitive_detectors: Vec<Parameters>,
    actions: Vec<Parameters>,
    biasing_operators: Vec<Parameters>,
    additional_phys: Vec<Parameters>,
    pre_init_cmds: Vec<String>,
    post_init_cmds: Vec<String>,
    /// Path to the scoring-plane GDML, empty for none.
    pub scoring_planes: String,
    /// Widths (x, y) or (x, y, z) in mm to smear every primary vertex by.
    pub beam_spot_delta: Vec<f64>,
    /// Shift primary times so that z = 0 mm corresponds to t = 0 ns.
    pub time_shift_primaries: bool,
    /// Record the per-particle contributions to each calorimeter hit.
    pub enable_hit_contribs: bool,
    /// Merge contributions from the same incident particle.
    pub compress_hit_contribs: bool,
    /// Prefix for Geant4 log files.
    pub logging_prefix: String,
    /// Have Geant4 validate the GDML while reading it.
    pub validate_detector: bool,
    /// Geant4 reference physics list to start from.
    pub reference_phys_list: String,
    /// Geant4 verbosity, 0 to 5.
    pub verbosity: i64,
}

impl Simulator {
    /// Creates a run configuration around `detector`.
    ///
    /// Fails with `WrongKind` if `detector` is not a detector construction.
    pub fn new(
        instance_name: impl Into<String>,
        description: impl Into<String>,
        detector: Parameters,
    ) -> Result<Self, ValidationError> {
        check_kind("detector", ConfigKind::DetectorConstruction, &detector)?;
        Ok(Self {
            instance_name: instance_name.into(),
            class_name: SIMULATOR_CLASS.to_string(),
            module: SIMULATOR_MODULE.to_string(),
            description: description.into(),
            detector,
            generators: Vec::new(),
            sensitive_detectors: Vec::new(),
            actions: Vec::new(),
            biasing_operators: Vec::new(),
            additional_phys: Vec::new(),
            pre_init_cmds: Vec::new(),
            post_init_cmds: Vec::new(),
            scoring_planes: String::new(),
            beam_spot_delta: Vec::new(),
            time_shift_primaries: true,
            enable_hit_contribs: true,
            compress_hit_contribs: true,
            logging_prefix: String::new(),
            validate_detector: false,
            reference_phys_list: "FTFP_BERT".to_string(),
            verbosity: 0,
        })
    }

    /// Name of this run configuration.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// The world to simulate.
    #[must_use]
    pub const fn detector(&self) -> &Parameters {
        &self.detector
    }

    /// Mutable access to the detector; its own schema still guards writes.
    pub fn detector_mut(&mut self) -> &mut Parameters {
        &mut self.detector
    }

    /// Replaces the detector.
    pub fn set_detector(&mut self, detector: Parameters) -> Result<(), ValidationError> {
        check_kind("detector", ConfigKind::DetectorConstruction, &detector)?;
        self.detector = detector;
        Ok(())
    }

    /// Primary generators, fired in order each event.
    #[must_use]
    pub fn generators(&self) -> &[Parameters] {
        &self.generators
    }

    /// Mutable access to the generators; each keeps its own schema.
    pub fn generators_mut(&mut self) -> &mut [Parameters] {
        &mut self.generators
    }

    /// Appends a primary generator.
    pub fn add_generator(&mut self, generator: Parameters) -> Result<(), ValidationError> {
        check_kind("generators", ConfigKind::PrimaryGenerator, &generator)?;
        self.generators.push(generator);
        Ok(())
    }

    /// Sensitive detectors, one per instance name.
    #[must_use]
    pub fn sensitive_detectors(&self) -> &[Parameters] {
        &self.sensitive_detectors
    }

    /// Appends a sensitive detector.
    pub fn add_sensitive_detector(&mut self, sd: Parameters) -> Result<(), ValidationError> {
        check_kind("sensitive_detectors", ConfigKind::SensitiveDetector, &sd)?;
        self.sensitive_detectors.push(sd);
        Ok(())
    }

    /// User actions.
    #[must_use]
    pub fn actions(&self) -> &[Parameters] {
        &self.actions
    }

    /// Appends a user action.
    pub fn add_action(&mut self, action: Parameters) -> Result<(), ValidationError> {
        check_kind("actions", ConfigKind::UserAction, &action)?;
        self.actions.push(action);
        Ok(())
    }

    /// Biasing operators.
    #[must_use]
    pub fn biasing_operators(&self) -> &[Parameters] {
        &self.biasing_operators
    }

    /// Appends a biasing operator.
    pub fn add_biasing_operator(&mut self, op: Parameters) -> Result<(), ValidationError> {
        check_kind("biasing_operators", ConfigKind::BiasingOperator, &op)?;
        self.biasing_operators.push(op);
        Ok(())
    }

    /// Physics constructors registered on top of the reference list.
    #[must_use]
    pub fn additional_phys(&self) -> &[Parameters] {
        &self.additional_phys
    }

    /// Appends a physics constructor.
    pub fn add_physics(&mut self, physics: Parameters) -> Result<(), ValidationError> {
        check_kind("additional_phys", ConfigKind::PhysicsConstructor, &physics)?;
        self.additional_phys.push(physics);
        Ok(())
    }

    /// Commands run before initialization.
    #[must_use]
    pub fn pre_init_cmds(&self) -> &[String] {
        &self.pre_init_cmds
    }

    /// Queues a Geant4 command to run before the run is initialized.
    pub fn add_pre_init_cmd(&mut self, command: impl Into<String>) -> Result<(), ValidationError> {
        let command = command.into();
        check_command(&command)?;
        self.pre_init_cmds.push(command);
        Ok(())
    }

    /// Commands run after initialization.
    #[must_use]
    pub fn post_init_cmds(&self) -> &[String] {
        &self.post_init_cmds
    }

    /// Queues a Geant4 command to run after initialization, before the run starts.
    pub fn add_post_init_cmd(&mut self, command: impl Into<String>) -> Result<(), ValidationError> {
        let command = command.into();
        check_command(&command)?;
        self.post_init_cmds.push(command);
        Ok(())
    }

    /// Every contained configuration object, detector first.
    pub fn objects(&self) -> impl Iterator<Item = &Parameters> {
        std::iter::once(&self.detector)
            .chain(&self.generators)
            .chain(&self.sensitive_detectors)
            .chain(&self.actions)
            .chain(&self.biasing_operators)
            .chain(&self.additional_phys)
    }

    /// Checks the run is complete enough to hand to the engine.
    ///
    /// Needs at least one generator, a beam spot of 0, 2 or 3 widths, and
    /// no contained parameter left unset.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generators.is_empty() {
            return Err(ValidationError::MissingField {
                field: "generators".to_string(),
            });
        }
        if !matches!(self.beam_spot_delta.len(), 0 | 2 | 3) {
            return Err(ValidationError::InvalidField {
                field: "beam_spot_delta".to_string(),
                reason: format!(
                    "expected 0, 2 or 3 widths, got {}",
                    self.beam_spot_delta.len()
                ),
            });
        }
        for object in self.objects() {
            object.ensure_complete()?;
        }
        info!(
            instance = %self.instance_name,
            generators = self.generators.len(),
            sensitive_detectors = self.sensitive_detectors.len(),
            actions = self.actions.len(),
            biasing_operators = self.biasing_operators.len(),
            "run configuration validated"
        );
        Ok(())
    }

    /// Validates, then renders the run as pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{biasing, detectors, generators, physics, sensitive_detectors, user};

    fn sim() -> Simulator {
        Simulator::new("sim", "test run", detectors::gdml("/tmp/geom.gdml").unwrap()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = sim();
        assert_eq!(s.instance_name(), "sim");
        assert!(s.time_shift_primaries);
        assert!(s.enable_hit_contribs);
        assert!(!s.validate_detector);
        assert_eq!(s.reference_phys_list, "FTFP_BERT");
        assert_eq!(s.objects().count(), 1);
    }

    #[test]
    fn test_detector_slot_kind() {
        let err = Simulator::new("sim", "", generators::particle_gun().unwrap()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongKind {
                slot: "detector".to_string(),
                expected: ConfigKind::DetectorConstruction,
                received: ConfigKind::PrimaryGenerator,
            }
        );
    }

    #[test]
    fn test_slots_check_kind() {
        let mut s = sim();
        assert!(s.add_generator(sensitive_detectors::hcal().unwrap()).is_err());
        assert!(s.add_sensitive_detector(generators::particle_gun().unwrap()).is_err());
        assert!(s.add_action(physics::gamma_physics("g").unwrap()).is_err());
        assert!(s.add_biasing_operator(user::user_action("a::B", user::NO_DEFAULTS).unwrap()).is_err());
        assert!(s.add_physics(biasing::dark_brem("db", "target", 1.0).unwrap()).is_err());
        assert!(s.set_detector(sensitive_detectors::hcal().unwrap()).is_err());

        s.add_generator(generators::particle_gun().unwrap()).unwrap();
        s.add_sensitive_detector(sensitive_detectors::hcal().unwrap()).unwrap();
        s.add_action(user::user_action("a::B", user::NO_DEFAULTS).unwrap()).unwrap();
        s.add_biasing_operator(biasing::dark_brem("db", "target", 1.0).unwrap()).unwrap();
        s.add_physics(physics::gamma_physics("g").unwrap()).unwrap();
        assert_eq!(s.objects().count(), 6);
    }

    #[test]
    fn test_reserved_commands() {
        let mut s = sim();
        s.add_pre_init_cmd("/process/list").unwrap();
        let err = s.add_pre_init_cmd("/run/beamOn 10").unwrap_err();
        assert!(matches!(err, ValidationError::ForbiddenCommand { ref reserved, .. } if reserved == "/run/beamOn"));
        assert!(s.add_post_init_cmd("/random/setSeeds 1 2").is_err());
        assert_eq!(s.pre_init_cmds(), &["/process/list".to_string()]);
        assert!(s.post_init_cmds().is_empty());
    }

    #[test]
    fn test_validate_requires_generator() {
        let s = sim();
        assert_eq!(
            s.validate().unwrap_err(),
            ValidationError::MissingField { field: "generators".to_string() }
        );
    }

    #[test]
    fn test_validate_beam_spot() {
        let mut s = sim();
        s.add_generator(generators::particle_gun().unwrap()).unwrap();
        s.beam_spot_delta = vec![1.0];
        assert!(matches!(s.validate(), Err(ValidationError::InvalidField { .. })));
        s.beam_spot_delta = vec![1.0, 1.0];
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unset_parameters() {
        let mut s = sim();
        let g = user::primary_generator("my::Gen", [("seed_file", crate::Value::Unset)]).unwrap();
        s.add_generator(g).unwrap();
        assert_eq!(
            s.validate().unwrap_err(),
            ValidationError::MissingField { field: "PrimaryGenerator.seed_file".to_string() }
        );
        s.generators_mut()[0].set("seed_file", "seeds.txt").unwrap();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_to_json() {
        let mut s = sim();
        s.add_generator(generators::particle_gun().unwrap()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&s.to_json().unwrap()).unwrap();
        assert_eq!(json["class_name"], SIMULATOR_CLASS);
        assert_eq!(json["module"], SIMULATOR_MODULE);
        assert_eq!(json["detector"]["file_path"], "/tmp/geom.gdml");
        assert_eq!(json["generators"][0]["energy"], 4.0);
    }

    #[test]
    fn test_detector_mut_is_guarded() {
        let mut s = sim();
        assert!(s.detector_mut().set("file_path", 1).is_err());
        s.detector_mut().set("file_path", "/other.gdml").unwrap();
        assert_eq!(s.detector().get_str("file_path"), Some("/other.gdml"));
    }
}
