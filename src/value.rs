//! Value types that configuration parameters can hold.
//!
//! The set of kinds is closed: whatever the native engine can read out of a
//! parameter set (scalars, text, booleans and small numeric or text
//! sequences) plus the `Unset` marker for parameters without a default.

use std::fmt;

use serde::Serialize;

/// Possible values a configuration parameter can hold.
///
/// # Examples
///
/// ```
/// use g4fire_cfg::{Value, ValueKind};
///
/// let energy = Value::from(4.0);
/// let particle = Value::from("e-");
///
/// assert_eq!(energy.kind(), ValueKind::Float);
/// assert_eq!(particle.as_str(), Some("e-"));
/// assert!(Value::Unset.is_unset());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A real number, usually in engine units (MeV, mm, ns).
    Float(f64),
    /// A string.
    Text(String),
    /// A sequence of real numbers, e.g. a position or direction.
    FloatList(Vec<f64>),
    /// A sequence of integers.
    IntList(Vec<i64>),
    /// A sequence of strings, e.g. macro commands.
    TextList(Vec<String>),
    /// No default was given; the first write fixes the kind.
    Unset,
}

/// The runtime kind of a [`Value`].
///
/// Two values are write-compatible exactly when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
    /// [`Value::FloatList`]
    FloatList,
    /// [`Value::IntList`]
    IntList,
    /// [`Value::TextList`]
    TextList,
    /// [`Value::Unset`]
    Unset,
}

impl ValueKind {
    /// Returns a human-readable kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::FloatList => "list[float]",
            Self::IntList => "list[int]",
            Self::TextList => "list[text]",
            Self::Unset => "unset",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the runtime kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::FloatList(_) => ValueKind::FloatList,
            Self::IntList(_) => ValueKind::IntList,
            Self::TextList(_) => ValueKind::TextList,
            Self::Unset => ValueKind::Unset,
        }
    }

    /// Returns a human-readable kind name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true for a parameter that has no value yet.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the flag, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number, if this is a `Float`. Integers are not widened.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string, if this is `Text`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements of a `FloatList`.
    #[must_use]
    pub fn as_f64_list(&self) -> Option<&[f64]> {
        match self {
            Self::FloatList(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements of an `IntList`.
    #[must_use]
    pub fn as_i64_list(&self) -> Option<&[i64]> {
        match self {
            Self::IntList(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements of a `TextList`.
    #[must_use]
    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Unset
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::FloatList(v) => {
                let shown: Vec<String> = v.iter().map(|x| format!("{x:?}")).collect();
                write_list(f, &shown)
            }
            Self::IntList(v) => write_list(f, v),
            Self::TextList(v) => {
                let shown: Vec<String> = v.iter().map(|s| format!("{s:?}")).collect();
                write_list(f, &shown)
            }
            Self::Unset => write!(f, "unset"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::FloatList(v)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Self::FloatList(v.to_vec())
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::IntList(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::TextList(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::TextList(v.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Unset, Into::into)
    }
}
