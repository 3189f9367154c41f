//! The document tree produced by the parser.
//!
//! A [`Value`] is a closed tagged union. Each variant owns its payload outright, so
//! moving a value moves the whole subtree and [`Clone`] performs a deep copy that
//! shares nothing with the source.
//!
//! Payload accessors are checked: asking an `Integer` for its string is a bug in the
//! calling code and is reported as [`ValueError::TypeMismatch`] rather than coerced.

use crate::error::ValueError;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Uninitialized,
    Integer,
    Fraction,
    String,
    Array,
    Object,
    Boolean,
    Null,
}

impl ValueType {
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Uninitialized => "Uninitialized",
            ValueType::Integer => "Integer",
            ValueType::Fraction => "Fraction",
            ValueType::String => "String",
            ValueType::Array => "Array",
            ValueType::Object => "Object",
            ValueType::Boolean => "Boolean",
            ValueType::Null => "Null",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of a parsed document.
///
/// `Uninitialized` means "no value was produced". The parser returns it when a
/// production fails, and for empty input; it never appears inside a successfully
/// parsed tree.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Uninitialized,
    Integer(i64),
    Fraction(f64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Value>),
    /// Keys are unique; inserting an existing key replaces its value.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Creates a value of the given type holding that type's empty payload
    /// (`0`, `0.0`, `false`, `""`, `[]` or `{}`).
    pub fn new(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Uninitialized => Value::Uninitialized,
            ValueType::Integer => Value::Integer(0),
            ValueType::Fraction => Value::Fraction(0.0),
            ValueType::String => Value::String(String::new()),
            ValueType::Array => Value::Array(Vec::new()),
            ValueType::Object => Value::Object(BTreeMap::new()),
            ValueType::Boolean => Value::Boolean(false),
            ValueType::Null => Value::Null,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Uninitialized => ValueType::Uninitialized,
            Value::Integer(_) => ValueType::Integer,
            Value::Fraction(_) => ValueType::Fraction,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    // === Predicates ===

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Value::Uninitialized)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, Value::Fraction(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // === Checked scalar access ===

    pub fn integer(&self) -> Result<i64, ValueError> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.mismatch(ValueType::Integer)),
        }
    }

    pub fn set_integer(&mut self, value: i64) -> Result<(), ValueError> {
        match self {
            Value::Integer(n) => {
                *n = value;
                Ok(())
            }
            _ => Err(self.mismatch(ValueType::Integer)),
        }
    }

    pub fn fraction(&self) -> Result<f64, ValueError> {
        match self {
            Value::Fraction(x) => Ok(*x),
            _ => Err(self.mismatch(ValueType::Fraction)),
        }
    }

    pub fn set_fraction(&mut self, value: f64) -> Result<(), ValueError> {
        match self {
            Value::Fraction(x) => {
                *x = value;
                Ok(())
            }
            _ => Err(self.mismatch(ValueType::Fraction)),
        }
    }

    pub fn boolean(&self) -> Result<bool, ValueError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    pub fn set_boolean(&mut self, value: bool) -> Result<(), ValueError> {
        match self {
            Value::Boolean(b) => {
                *b = value;
                Ok(())
            }
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    pub fn string(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn set_string(&mut self, value: impl Into<String>) -> Result<(), ValueError> {
        match self {
            Value::String(s) => {
                *s = value.into();
                Ok(())
            }
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    // === Arrays ===

    pub fn array(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    pub fn array_mut(&mut self) -> Result<&mut Vec<Value>, ValueError> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(self.mismatch(ValueType::Array)),
        }
    }

    pub fn array_len(&self) -> Result<usize, ValueError> {
        self.array().map(<[Value]>::len)
    }

    /// Appends to an array. Passing an owned `Value` moves it in; passing
    /// `&Value` appends a deep clone.
    pub fn push_back(&mut self, value: impl Into<Value>) -> Result<(), ValueError> {
        self.array_mut()?.push(value.into());
        Ok(())
    }

    pub fn element(&self, index: usize) -> Result<&Value, ValueError> {
        let items = self.array()?;
        items.get(index).ok_or(ValueError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    pub fn element_mut(&mut self, index: usize) -> Result<&mut Value, ValueError> {
        let items = self.array_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfBounds { index, len })
    }

    // === Objects ===

    pub fn object(&self) -> Result<&BTreeMap<String, Value>, ValueError> {
        match self {
            Value::Object(members) => Ok(members),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    pub fn object_mut(&mut self) -> Result<&mut BTreeMap<String, Value>, ValueError> {
        match self {
            Value::Object(members) => Ok(members),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    pub fn object_len(&self) -> Result<usize, ValueError> {
        self.object().map(BTreeMap::len)
    }

    /// Inserts a member, replacing any existing member with the same key.
    /// Passing `&Value` inserts a deep clone.
    pub fn add_member(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), ValueError> {
        self.object_mut()?.insert(key.into(), value.into());
        Ok(())
    }

    pub fn member(&self, key: &str) -> Result<&Value, ValueError> {
        self.object()?
            .get(key)
            .ok_or_else(|| ValueError::MissingMember {
                key: key.to_string(),
            })
    }

    pub fn member_mut(&mut self, key: &str) -> Result<&mut Value, ValueError> {
        self.object_mut()?
            .get_mut(key)
            .ok_or_else(|| ValueError::MissingMember {
                key: key.to_string(),
            })
    }

    // === Unchecked-style lookups ===

    /// Returns the integer if this is an Integer, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        self.integer().ok()
    }

    /// Returns the fraction if this is a Fraction, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        self.fraction().ok()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.boolean().ok()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string().ok()
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        self.array().ok()
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        self.object().ok()
    }

    /// Object member lookup that tolerates non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// Array element lookup that tolerates non-arrays.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn mismatch(&self, expected: ValueType) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            found: self.value_type(),
        }
    }
}

/// Structural equality. Tags must match; containers compare element by element.
///
/// Fractions compare numerically except that NaN equals NaN, so every value
/// equals its own clone.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Uninitialized, Value::Uninitialized) | (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Fraction(a), Value::Fraction(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Fraction(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(members: BTreeMap<String, Value>) -> Self {
        Value::Object(members)
    }
}

/// Borrowed values are deep-cloned.
impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Panics if `self` is not an array or `index` is out of bounds.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self.element(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self.element_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Panics if `self` is not an object or has no member `key`.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.member(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Inserts `Null` under `key` if absent. Panics if `self` is not an object.
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.object_mut() {
            Ok(members) => members.entry(key.to_string()).or_insert(Value::Null),
            Err(err) => panic!("{err}"),
        }
    }
}
