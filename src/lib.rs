//! # g4fire-cfg - Configuration objects for the g4fire simulation
//!
//! g4fire runs Geant4 simulations whose detector, primary generators,
//! sensitive detectors, biasing operators and user actions are plugins
//! selected by native class name. This crate builds the configuration for
//! those plugins and refuses mistakes while the run is being assembled,
//! before any engine resource is touched.
//!
//! ## Core Concepts
//!
//! - **Parameters**: a named set of values for one native class. Its keys
//!   are fixed when it is built and each key keeps the kind of its value.
//! - **Value**: the closed set of value kinds the engine can read.
//! - **ConfigKind**: which engine base class a configuration targets.
//! - **Simulator**: the run configuration collecting everything for the engine.
//!
//! ## Usage
//!
//! ```rust
//! use g4fire_cfg::{detectors, generators, Simulator};
//!
//! let mut gun = generators::particle_gun()?;
//! gun.set("energy", 8.0)?;
//! assert!(gun.set("energy", "8").is_err());
//! assert!(gun.set("beam_color", "red").is_err());
//!
//! let mut sim = Simulator::new(
//!     "basic",
//!     "basic test sim",
//!     detectors::simple_prism("G4_Pb", "G4_AIR", [5.0, 5.0, 5.0])?,
//! )?;
//! sim.add_generator(gun)?;
//! let json = sim.to_json()?;
//! # assert!(json.contains("ParticleGun"));
//! # Ok::<(), g4fire_cfg::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod kind;
pub mod parameters;
pub mod value;

// Leaf configurations
pub mod biasing;
pub mod detectors;
pub mod generators;
pub mod physics;
pub mod sensitive_detectors;
pub mod user;

pub mod overrides;
pub mod simulator;

// Re-export primary types at crate root for convenience
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use kind::ConfigKind;
pub use parameters::{Parameters, ParametersBuilder};
pub use simulator::Simulator;
pub use value::{Value, ValueKind};
