//! Generic constructors for each kind of user class.
//!
//! These cover plugins the crate knows nothing about: pass the native class
//! name and the default parameters, get back a validated [`Parameters`] whose
//! declared type is the kind itself. The leaf modules (`generators`,
//! `detectors`, ...) build on the same builder with fixed defaults.

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::parameters::Parameters;
use crate::value::Value;

fn unnamed<K, V>(
    kind: ConfigKind,
    class_name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    Parameters::new(kind.as_str(), kind, class_name, defaults)
}

fn named<K, V>(
    kind: ConfigKind,
    class_name: &str,
    name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    defaults
        .into_iter()
        .fold(
            Parameters::builder(kind.as_str(), kind, class_name).name(name),
            |b, (k, v)| b.param(k, v),
        )
        .build()
}

/// A primary generator of the given native class.
pub fn primary_generator<K, V>(
    class_name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    unnamed(ConfigKind::PrimaryGenerator, class_name, defaults)
}

/// A user action of the given native class.
pub fn user_action<K, V>(
    class_name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    unnamed(ConfigKind::UserAction, class_name, defaults)
}

/// A detector construction of the given native class.
pub fn detector_construction<K, V>(
    class_name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    unnamed(ConfigKind::DetectorConstruction, class_name, defaults)
}

/// A sensitive detector instance; `name` tells instances of one class apart.
pub fn sensitive_detector<K, V>(
    class_name: &str,
    name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    named(ConfigKind::SensitiveDetector, class_name, name, defaults)
}

/// A biasing operator instance.
pub fn biasing_operator<K, V>(
    class_name: &str,
    name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    named(ConfigKind::BiasingOperator, class_name, name, defaults)
}

/// A physics constructor instance.
pub fn physics_constructor<K, V>(
    class_name: &str,
    name: &str,
    defaults: impl IntoIterator<Item = (K, V)>,
) -> Result<Parameters, ValidationError>
where
    K: Into<String>,
    V: Into<Value>,
{
    named(ConfigKind::PhysicsConstructor, class_name, name, defaults)
}

/// Shorthand for "no defaults" when calling the constructors above.
pub const NO_DEFAULTS: [(&str, Value); 0] = [];
