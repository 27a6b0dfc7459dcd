//! Additional physics constructors.

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::parameters::Parameters;

/// Dark photon (A') physics. `ap_mass` is in MeV; off unless `enable` is set.
pub fn aprime_physics(name: &str) -> Result<Parameters, ValidationError> {
    Parameters::builder("APrimePhysics", ConfigKind::PhysicsConstructor, "g4fire::darkbrem::APrimePhysics")
        .name(name)
        .param("ap_mass", 0.0)
        .param("enable", false)
        .build()
}

/// Reorders photon processes and adds gamma to mu+mu-.
pub fn gamma_physics(name: &str) -> Result<Parameters, ValidationError> {
    Parameters::builder("GammaPhysics", ConfigKind::PhysicsConstructor, "g4fire::GammaPhysics")
        .name(name)
        .build()
}
