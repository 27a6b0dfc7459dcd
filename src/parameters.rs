//! Schema-validated configuration parameters.
//!
//! A [`Parameters`] set is the one real mechanism of this crate. Its key set
//! is fixed when it is built and every later write is checked against it:
//! unknown keys are rejected, and a key that already holds a value only
//! accepts values of the same [`ValueKind`]. Keys built as [`Value::Unset`]
//! adopt the kind of their first write.
//!
//! Catching typos and wrongly typed values here means configuration bugs
//! surface while the run is being assembled, not inside the native engine
//! after it has started.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::kind::ConfigKind;
use crate::value::{Value, ValueKind};

/// Key under which the native class name is stored.
pub const CLASS_NAME_KEY: &str = "class_name";

/// Key under which the instance name of named kinds is stored.
pub const NAME_KEY: &str = "name";

static CLASS_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn class_name_regex() -> &'static Regex {
    CLASS_NAME_RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*::)*[A-Za-z_][A-Za-z0-9_]*$")
            .expect("class name pattern is valid")
    })
}

/// Validate that `class_name` looks like a (possibly namespaced) C++ class.
pub fn validate_class_name(class_name: &str) -> Result<(), ValidationError> {
    if class_name_regex().is_match(class_name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidClassName {
            class_name: class_name.to_string(),
        })
    }
}

/// Validate that an instance name is not blank.
pub fn validate_instance_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::MissingField {
            field: NAME_KEY.to_string(),
        })
    } else {
        Ok(())
    }
}

/// A named set of configuration values for one native class.
///
/// # Examples
///
/// ```
/// use g4fire_cfg::{ConfigKind, Parameters};
///
/// let mut gun = Parameters::builder("ParticleGun", ConfigKind::PrimaryGenerator, "g4fire::ParticleGun")
///     .param("energy", 4.0)
///     .build()
///     .unwrap();
///
/// assert!(gun.set("energy", 5.0).is_ok());
/// assert!(gun.set("energy", "5").is_err());
/// assert!(gun.set("beam_color", "red").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    type_name: String,
    kind: ConfigKind,
    values: IndexMap<String, Value>,
}

impl Parameters {
    /// Starts building a parameter set.
    pub fn builder(
        type_name: impl Into<String>,
        kind: ConfigKind,
        class_name: impl Into<String>,
    ) -> ParametersBuilder {
        ParametersBuilder::new(type_name, kind, class_name)
    }

    /// Creates a parameter set from a class name and its ordered defaults.
    ///
    /// Named kinds must be given their instance name through
    /// [`ParametersBuilder::name`]; use the builder for those.
    pub fn new<K, V>(
        type_name: impl Into<String>,
        kind: ConfigKind,
        class_name: impl Into<String>,
        defaults: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ValidationError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        defaults
            .into_iter()
            .fold(Self::builder(type_name, kind, class_name), |b, (k, v)| {
                b.param(k, v)
            })
            .build()
    }

    /// The declared configuration type, used in messages.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The category of native class configured.
    #[must_use]
    pub const fn kind(&self) -> ConfigKind {
        self.kind
    }

    /// The native class this set configures.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.get_str(CLASS_NAME_KEY).unwrap_or_default()
    }

    /// The instance name, for kinds that carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str(NAME_KEY)
    }

    /// Short form: declared type and native class.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} ({})", self.type_name, self.class_name())
    }

    /// Writes `value` into an existing parameter.
    ///
    /// Fails with [`ValidationError::SchemaViolation`] if `key` was not
    /// declared at construction and with [`ValidationError::TypeMismatch`]
    /// if the key already holds a value of another kind.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ValidationError> {
        let value = value.into();
        let Some(slot) = self.values.get_mut(key) else {
            warn!(type_name = %self.type_name, key, "rejected write to undeclared parameter");
            return Err(ValidationError::SchemaViolation {
                type_name: self.type_name.clone(),
                key: key.to_string(),
            });
        };

        if !slot.is_unset() && slot.kind() != value.kind() {
            warn!(
                type_name = %self.type_name,
                key,
                expected = %slot.kind(),
                received = %value.kind(),
                "rejected write of mismatched kind"
            );
            return Err(ValidationError::TypeMismatch {
                key: key.to_string(),
                expected: slot.kind(),
                received: value.kind(),
            });
        }

        if key == CLASS_NAME_KEY {
            if let Some(class_name) = value.as_str() {
                validate_class_name(class_name)?;
            }
        } else if key == NAME_KEY && self.kind.requires_name() {
            if let Some(name) = value.as_str() {
                validate_instance_name(name)?;
            }
        }

        debug!(type_name = %self.type_name, key, value = %value, "parameter set");
        *slot = value;
        Ok(())
    }

    /// Applies several writes in order, stopping at the first failure.
    ///
    /// Writes before the failing one stay applied.
    pub fn update<K, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), ValidationError>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether `key` is part of the schema.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The kind currently fixed for `key`, `Unset` if none yet.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.values.get(key).map(Value::kind)
    }

    /// Keys in construction order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Key/value pairs in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters, reserved keys included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a built set: `class_name` is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed lookups: `None` if the key is absent or holds another kind.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_f64_list(&self, key: &str) -> Option<&[f64]> {
        self.get(key).and_then(Value::as_f64_list)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_i64_list(&self, key: &str) -> Option<&[i64]> {
        self.get(key).and_then(Value::as_i64_list)
    }

    /// See [`Parameters::get_bool`].
    #[must_use]
    pub fn get_str_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_str_list)
    }

    /// Keys that never received a value.
    #[must_use]
    pub fn unset_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| v.is_unset())
            .map(|(k, _)| k)
            .collect()
    }

    /// Fails with `MissingField` naming the first key still unset.
    pub fn ensure_complete(&self) -> Result<(), ValidationError> {
        match self.unset_keys().first() {
            Some(key) => Err(ValidationError::MissingField {
                field: format!("{}.{key}", self.type_name),
            }),
            None => Ok(()),
        }
    }

    /// Renders the flat engine-facing view as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} :", self.summary())?;
        for (key, value) in &self.values {
            writeln!(f, "  {key} : {value}")?;
        }
        Ok(())
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Builder for [`Parameters`].
///
/// The builder only records declarations; all checks run in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    type_name: String,
    kind: ConfigKind,
    class_name: String,
    name: Option<String>,
    defaults: Vec<(String, Value)>,
}

impl ParametersBuilder {
    /// Creates a new builder with no defaults.
    pub fn new(type_name: impl Into<String>, kind: ConfigKind, class_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            class_name: class_name.into(),
            name: None,
            defaults: Vec::new(),
        }
    }

    /// Set the instance name (required for named kinds).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a parameter with its default value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defaults.push((key.into(), default.into()));
        self
    }

    /// Declare a parameter without a default.
    #[must_use]
    pub fn unset(self, key: impl Into<String>) -> Self {
        self.param(key, Value::Unset)
    }

    /// Build the parameter set.
    ///
    /// Returns `InvalidClassName` for a malformed class name, `MissingField`
    /// if a named kind has no (or a blank) instance name, and `DuplicateKey`
    /// if a key is declared twice or collides with a reserved key.
    pub fn build(self) -> Result<Parameters, ValidationError> {
        validate_class_name(&self.class_name)?;

        // Order is name, defaults, class_name.
        let mut values = IndexMap::with_capacity(self.defaults.len() + 2);

        if self.kind.requires_name() {
            let name = self.name.unwrap_or_default();
            validate_instance_name(&name)?;
            values.insert(NAME_KEY.to_string(), Value::Text(name.trim().to_string()));
        } else if self.name.is_some() {
            return Err(ValidationError::InvalidField {
                field: NAME_KEY.to_string(),
                reason: format!("{} configurations do not take an instance name", self.kind),
            });
        }

        for (key, value) in self.defaults {
            if values.contains_key(&key) {
                return Err(ValidationError::DuplicateKey { key });
            }
            values.insert(key, value);
        }

        if values.contains_key(CLASS_NAME_KEY) {
            return Err(ValidationError::DuplicateKey {
                key: CLASS_NAME_KEY.to_string(),
            });
        }
        values.insert(CLASS_NAME_KEY.to_string(), Value::Text(self.class_name));

        debug!(type_name = %self.type_name, kind = %self.kind, keys = values.len(), "parameters built");
        Ok(Parameters {
            type_name: self.type_name,
            kind: self.kind,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gun() -> Parameters {
        Parameters::builder("ParticleGun", ConfigKind::PrimaryGenerator, "g4fire::ParticleGun")
            .param("particle", "e-")
            .param("energy", 4.0)
            .param("verbosity", 0)
            .param("direction", [0.0, 0.0, 1.0])
            .unset("scoring_planes")
            .build()
            .unwrap()
    }

    #[test]
    fn test_class_name_is_last_key() {
        let p = gun();
        assert_eq!(p.keys().next(), Some("particle"));
        assert_eq!(p.keys().last(), Some(CLASS_NAME_KEY));
        assert_eq!(p.class_name(), "g4fire::ParticleGun");
        assert_eq!(p.len(), 6);
        assert_eq!(p.name(), None);
    }

    #[test]
    fn test_set_same_kind() {
        let mut p = gun();
        p.set("energy", 5.0).unwrap();
        assert_eq!(p.get_f64("energy"), Some(5.0));
        p.set("direction", vec![1.0, 0.0]).unwrap();
        assert_eq!(p.get_f64_list("direction"), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut p = gun();
        let err = p.set("beam_color", "red").unwrap_err();
        assert_eq!(
            err,
            ValidationError::SchemaViolation {
                type_name: "ParticleGun".to_string(),
                key: "beam_color".to_string(),
            }
        );
        assert!(!p.contains("beam_color"));
    }

    #[test]
    fn test_set_wrong_kind() {
        let mut p = gun();
        let err = p.set("energy", "5").unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                key: "energy".to_string(),
                expected: ValueKind::Float,
                received: ValueKind::Text,
            }
        );
        assert_eq!(p.get_f64("energy"), Some(4.0));
    }

    #[test]
    fn test_int_does_not_coerce_to_float() {
        let mut p = gun();
        assert!(p.set("energy", 5).is_err());
        assert!(p.set("verbosity", 1.0).is_err());
    }

    #[test]
    fn test_unset_adopts_first_kind() {
        let mut p = gun();
        assert_eq!(p.kind_of("scoring_planes"), Some(ValueKind::Unset));
        p.set("scoring_planes", "sp.gdml").unwrap();
        assert_eq!(p.kind_of("scoring_planes"), Some(ValueKind::Text));
        assert!(p.set("scoring_planes", 3).is_err());
    }

    #[test]
    fn test_cannot_reset_to_unset() {
        let mut p = gun();
        let err = p.set("particle", Value::Unset).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { received: ValueKind::Unset, .. }));
    }

    #[test]
    fn test_class_name_rewrite_is_validated() {
        let mut p = gun();
        p.set(CLASS_NAME_KEY, "other::Gun").unwrap();
        assert_eq!(p.class_name(), "other::Gun");
        assert!(p.set(CLASS_NAME_KEY, "not a class").is_err());
        assert!(p.set(CLASS_NAME_KEY, 1).is_err());
    }

    #[test]
    fn test_update_stops_at_first_error() {
        let mut p = gun();
        let err = p
            .update([("energy", Value::from(8.0)), ("bogus", Value::from(1)), ("verbosity", Value::from(2))])
            .unwrap_err();
        assert!(matches!(err, ValidationError::SchemaViolation { .. }));
        assert_eq!(p.get_f64("energy"), Some(8.0));
        assert_eq!(p.get_i64("verbosity"), Some(0));
    }

    #[test]
    fn test_duplicate_key() {
        let err = Parameters::builder("X", ConfigKind::UserAction, "ns::X")
            .param("a", 1)
            .param("a", 2)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateKey { key: "a".to_string() });

        let err = Parameters::builder("X", ConfigKind::UserAction, "ns::X")
            .param(CLASS_NAME_KEY, "ns::Y")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateKey { .. }));
    }

    #[test]
    fn test_invalid_class_name() {
        for bad in ["", "ns::", "::X", "a b", "1abc", "ns:X"] {
            let err = Parameters::builder("X", ConfigKind::UserAction, bad)
                .build()
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidClassName { .. }), "{bad}");
        }
        assert!(validate_class_name("g4fire::plugins::primary_generators::ParticleGun").is_ok());
        assert!(validate_class_name("Standalone").is_ok());
    }

    #[test]
    fn test_named_kind_requires_name() {
        let err = Parameters::builder("SD", ConfigKind::SensitiveDetector, "simcore::HcalSD")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: NAME_KEY.to_string() });

        let err = Parameters::builder("SD", ConfigKind::SensitiveDetector, "simcore::HcalSD")
            .name("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));

        let sd = Parameters::builder("SD", ConfigKind::SensitiveDetector, "simcore::HcalSD")
            .name("hcal_sd")
            .build()
            .unwrap();
        assert_eq!(sd.name(), Some("hcal_sd"));
        assert_eq!(sd.keys().collect::<Vec<_>>(), vec![NAME_KEY, CLASS_NAME_KEY]);
    }

    #[test]
    fn test_named_kind_rejects_blank_name_write() {
        let mut sd = Parameters::builder("SD", ConfigKind::SensitiveDetector, "simcore::HcalSD")
            .name("hcal_sd")
            .build()
            .unwrap();
        let err = sd.set(NAME_KEY, "   ").unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: NAME_KEY.to_string() });
        assert_eq!(sd.name(), Some("hcal_sd"));

        sd.set(NAME_KEY, "hcal_sd_2").unwrap();
        assert_eq!(sd.name(), Some("hcal_sd_2"));
    }

    #[test]
    fn test_unnamed_kind_may_declare_name_parameter() {
        let mut p = Parameters::builder("Gun", ConfigKind::PrimaryGenerator, "ns::Gun")
            .param(NAME_KEY, "label")
            .build()
            .unwrap();
        p.set(NAME_KEY, "").unwrap();
        assert_eq!(p.get_str(NAME_KEY), Some(""));
    }

    #[test]
    fn test_unnamed_kind_rejects_name() {
        let err = Parameters::builder("Gun", ConfigKind::PrimaryGenerator, "ns::Gun")
            .name("gun")
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_display() {
        let p = gun();
        let expected = "ParticleGun (g4fire::ParticleGun) :\n\
                        \x20 particle : \"e-\"\n\
                        \x20 energy : 4.0\n\
                        \x20 verbosity : 0\n\
                        \x20 direction : [0.0, 0.0, 1.0]\n\
                        \x20 scoring_planes : unset\n\
                        \x20 class_name : \"g4fire::ParticleGun\"\n";
        assert_eq!(p.to_string(), expected);
        assert_eq!(p.summary(), "ParticleGun (g4fire::ParticleGun)");
    }

    #[test]
    fn test_ensure_complete() {
        let mut p = gun();
        assert_eq!(p.unset_keys(), vec!["scoring_planes"]);
        assert_eq!(
            p.ensure_complete().unwrap_err(),
            ValidationError::MissingField { field: "ParticleGun.scoring_planes".to_string() }
        );
        p.set("scoring_planes", "sp.gdml").unwrap();
        assert!(p.ensure_complete().is_ok());
    }

    #[test]
    fn test_json_is_flat_and_ordered() {
        let p = gun();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r#"{"particle":"e-","energy":4.0,"verbosity":0,"direction":[0.0,0.0,1.0],"scoring_planes":null,"class_name":"g4fire::ParticleGun"}"#
        );
    }

    #[test]
    fn test_new_from_pairs() {
        let p = Parameters::new(
            "UserAction",
            ConfigKind::UserAction,
            "ns::Filter",
            [("threshold", Value::from(1.5)), ("verbose", Value::from(false))],
        )
        .unwrap();
        assert_eq!(p.get_bool("verbose"), Some(false));
        assert_eq!(p.kind(), ConfigKind::UserAction);
    }
}
