//! Primary generators shipped with g4fire.
//!
//! Each constructor fixes the native class name and the default parameter
//! set the engine-side plugin reads, so those names live in one place.

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::parameters::Parameters;

const PARTICLE_GUN: &str = "g4fire::plugins::primary_generators::ParticleGun";
const MULTI_PARTICLE_GUN: &str =
    "g4fire::plugins::primary_generators::MultiParticleGunPrimaryGenerator";
const LHE: &str = "g4fire::plugins::primary_generators::LHEPrimaryGenerator";
const GENERAL_PARTICLE_SOURCE: &str = "g4fire::plugins::primary_generators::GeneralParticleSource";

/// Placeholder for required paths not given yet.
pub const NOT_GIVEN: &str = "NOTGIVEN";

/// Basic particle gun.
///
/// | parameter | default | unit |
/// |---|---|---|
/// | `particle` | `"e-"` | Geant4 particle name |
/// | `energy` | `4.0` | GeV |
/// | `time` | `0.0` | ns |
/// | `verbosity` | `0` | |
/// | `position` | `[0, 0, 0]` | mm |
/// | `direction` | `[0, 0, 1]` | unit vector |
///
/// ```
/// let mut gun = g4fire_cfg::generators::particle_gun().unwrap();
/// gun.set("particle", "mu-").unwrap();
/// gun.set("energy", 8.0).unwrap();
/// ```
pub fn particle_gun() -> Result<Parameters, ValidationError> {
    Parameters::builder("ParticleGun", ConfigKind::PrimaryGenerator, PARTICLE_GUN)
        .param("particle", "e-")
        .param("energy", 4.0)
        .param("time", 0.0)
        .param("verbosity", 0)
        .param("position", [0.0, 0.0, 0.0])
        .param("direction", [0.0, 0.0, 1.0])
        .build()
}

/// Gun firing one or several (optionally Poisson-distributed) particles.
///
/// `vertex` is in mm, `momentum` in MeV, `pdgID` selects the particle.
pub fn multi_particle_gun() -> Result<Parameters, ValidationError> {
    Parameters::builder("MultiParticleGun", ConfigKind::PrimaryGenerator, MULTI_PARTICLE_GUN)
        .param("enablePoisson", false)
        .param("vertex", [0.0, 0.0, 0.0])
        .param("momentum", [0.0, 0.0, 1.0])
        .param("nParticles", 1)
        .param("pdgID", 11)
        .build()
}

/// Primary vertices read from an LHE file.
pub fn lhe(file_path: &str) -> Result<Parameters, ValidationError> {
    let mut p = Parameters::builder("LHEPrimaryGenerator", ConfigKind::PrimaryGenerator, LHE)
        .param("file_path", NOT_GIVEN)
        .build()?;
    p.set("file_path", file_path)?;
    Ok(p)
}

/// Geant4 general particle source, set up by `/gps/...` commands.
///
/// The commands run in the order given.
pub fn general_particle_source<S: Into<String>>(
    init_cmds: impl IntoIterator<Item = S>,
) -> Result<Parameters, ValidationError> {
    let mut p = Parameters::builder(
        "GeneralParticleSource",
        ConfigKind::PrimaryGenerator,
        GENERAL_PARTICLE_SOURCE,
    )
    .param("init_cmds", Vec::<String>::new())
    .build()?;
    let cmds: Vec<String> = init_cmds.into_iter().map(Into::into).collect();
    p.set("init_cmds", cmds)?;
    Ok(p)
}

fn electron_gun(energy: f64, position: [f64; 3], direction: [f64; 3]) -> Result<Parameters, ValidationError> {
    let mut gun = particle_gun()?;
    gun.set("particle", "e-")?;
    gun.set("energy", energy)?;
    gun.set("position", position)?;
    gun.set("direction", direction)?;
    Ok(gun)
}

/// A single 4 GeV electron fired upstream of the tagger tracker.
///
/// Position and direction are chosen so the field bends it onto the target
/// at roughly the origin.
pub fn single_4gev_e_upstream_tagger() -> Result<Parameters, ValidationError> {
    electron_gun(
        4.0,
        [-27.926, 5.0, -700.0],
        [313.8 / 4000.0, 0.0, 3987.7 / 4000.0],
    )
}

/// A single 4 GeV electron fired just upstream of the target.
pub fn single_4gev_e_upstream_target() -> Result<Parameters, ValidationError> {
    electron_gun(4.0, [0.0, 0.0, -1.2], [0.0, 0.0, 1.0])
}

/// A single 1.2 GeV electron fired from far upstream of the target.
pub fn far_upstream_single_1p2gev_electron() -> Result<Parameters, ValidationError> {
    electron_gun(1.2, [-36.387, 5.0, -700.0], [0.2292 / 1.2, 0.0, 1.1779 / 1.2])
}
