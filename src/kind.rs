//! The categories of native user classes a configuration can target.

use std::fmt;

use serde::Serialize;

/// Which engine-side base class a configuration object parameterizes.
///
/// Kinds whose instances can be created several times in one run carry an
/// instance `name` alongside the class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigKind {
    /// Produces the primary particles of each event.
    PrimaryGenerator,
    /// Hooks into run, event, tracking or stepping.
    UserAction,
    /// Builds the world volume.
    DetectorConstruction,
    /// Turns steps in a set of volumes into hits.
    SensitiveDetector,
    /// Biases a process in a volume.
    BiasingOperator,
    /// Registers extra physics on top of the reference list.
    PhysicsConstructor,
}

impl ConfigKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PrimaryGenerator,
        Self::UserAction,
        Self::DetectorConstruction,
        Self::SensitiveDetector,
        Self::BiasingOperator,
        Self::PhysicsConstructor,
    ];

    /// Returns true if instances of this kind carry a `name` parameter.
    #[must_use]
    pub const fn requires_name(self) -> bool {
        matches!(
            self,
            Self::SensitiveDetector | Self::BiasingOperator | Self::PhysicsConstructor
        )
    }

    /// The kind's name, used as the declared type of generic configurations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryGenerator => "PrimaryGenerator",
            Self::UserAction => "UserAction",
            Self::DetectorConstruction => "DetectorConstruction",
            Self::SensitiveDetector => "SensitiveDetector",
            Self::BiasingOperator => "BiasingOperator",
            Self::PhysicsConstructor => "PhysicsConstructor",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
