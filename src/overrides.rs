//! Applying parameter overrides from TOML or JSON tables.
//!
//! Every entry goes through [`Parameters::set`], so a file can only change
//! declared parameters and only with values of the declared kind. Lists are
//! typed by their elements; an empty list takes the kind the parameter
//! already has.
//!
//! A table is applied as a whole: entries are written to a copy, and the
//! target only changes when every entry was accepted.

use std::path::Path;

use tracing::debug;

use crate::error::{ConfigResult, ValidationError};
use crate::parameters::Parameters;
use crate::value::{Value, ValueKind};

fn unsupported(key: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::UnsupportedValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn empty_list(key: &str, hint: Option<ValueKind>) -> Result<Value, ValidationError> {
    match hint {
        Some(ValueKind::FloatList) => Ok(Value::FloatList(Vec::new())),
        Some(ValueKind::IntList) => Ok(Value::IntList(Vec::new())),
        Some(ValueKind::TextList) => Ok(Value::TextList(Vec::new())),
        _ => Err(unsupported(key, "cannot infer the element type of an empty list")),
    }
}

/// Collects a homogeneous list, keyed on the kind of its first element.
fn collect_list(key: &str, items: Vec<Value>, hint: Option<ValueKind>) -> Result<Value, ValidationError> {
    let Some(first) = items.first() else {
        return empty_list(key, hint);
    };
    let mixed = || unsupported(key, "list elements must all have the same type");
    match first.kind() {
        ValueKind::Float => items
            .iter()
            .map(|v| v.as_f64().ok_or_else(mixed))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::FloatList),
        ValueKind::Int => items
            .iter()
            .map(|v| v.as_i64().ok_or_else(mixed))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::IntList),
        ValueKind::Text => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(mixed))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::TextList),
        other => Err(unsupported(key, format!("lists of {other} are not supported"))),
    }
}

/// Converts a TOML value into a parameter value.
pub fn from_toml(key: &str, value: toml::Value, hint: Option<ValueKind>) -> Result<Value, ValidationError> {
    match value {
        toml::Value::Boolean(b) => Ok(Value::Bool(b)),
        toml::Value::Integer(i) => Ok(Value::Int(i)),
        toml::Value::Float(f) => Ok(Value::Float(f)),
        toml::Value::String(s) => Ok(Value::Text(s)),
        toml::Value::Array(items) => {
            let items = items
                .into_iter()
                .map(|item| from_toml(key, item, None))
                .collect::<Result<Vec<_>, _>>()?;
            collect_list(key, items, hint)
        }
        toml::Value::Datetime(_) => Err(unsupported(key, "datetimes are not supported")),
        toml::Value::Table(_) => Err(unsupported(key, "nested tables are not supported")),
    }
}

/// Converts a JSON value into a parameter value. `null` maps to `Unset`.
pub fn from_json(key: &str, value: serde_json::Value, hint: Option<ValueKind>) -> Result<Value, ValidationError> {
    match value {
        serde_json::Value::Null => Ok(Value::Unset),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_f64() {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| unsupported(key, format!("number {n} is not representable")))
            } else {
                Err(unsupported(key, format!("integer {n} does not fit in 64 bits")))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        serde_json::Value::Array(items) => {
            let items = items
                .into_iter()
                .map(|item| from_json(key, item, None))
                .collect::<Result<Vec<_>, _>>()?;
            collect_list(key, items, hint)
        }
        serde_json::Value::Object(_) => Err(unsupported(key, "nested objects are not supported")),
    }
}

/// Applies every entry of a TOML table to `params`.
///
/// ```
/// let mut gun = g4fire_cfg::generators::particle_gun().unwrap();
/// g4fire_cfg::overrides::apply_toml(&mut gun, "energy = 8.0\nparticle = \"mu-\"").unwrap();
/// assert_eq!(gun.get_f64("energy"), Some(8.0));
/// ```
pub fn apply_toml(params: &mut Parameters, source: &str) -> ConfigResult<()> {
    let table: toml::Table = source.parse()?;
    let mut staged = params.clone();
    for (key, raw) in table {
        let value = from_toml(&key, raw, staged.kind_of(&key))?;
        staged.set(&key, value)?;
    }
    *params = staged;
    debug!(target_type = %params.type_name(), "applied TOML overrides");
    Ok(())
}

/// Applies every entry of a JSON object to `params`.
pub fn apply_json(params: &mut Parameters, source: &str) -> ConfigResult<()> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(source)?;
    let mut staged = params.clone();
    for (key, raw) in object {
        let value = from_json(&key, raw, staged.kind_of(&key))?;
        staged.set(&key, value)?;
    }
    *params = staged;
    debug!(target_type = %params.type_name(), "applied JSON overrides");
    Ok(())
}

/// Reads a TOML file and applies it to `params`.
pub fn apply_toml_file(params: &mut Parameters, path: &Path) -> ConfigResult<()> {
    let content = std::fs::read_to_string(path)?;
    apply_toml(params, &content)
}
