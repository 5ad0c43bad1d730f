//! Per-object tunables keyed by field name
//!
//! Level objects read offsets, scales, densities and durations from a
//! [`ConstantTable`]. The table is read-only once a level is built and the
//! core never cares which file format produced it.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec2;

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// Boolean flag
    Bool(bool),
    /// Scalar number
    Number(f32),
    /// Fixed list of numbers (offsets, polygons, scales)
    Floats(Vec<f32>),
    /// Free text
    Text(String),
    /// Nested table
    Table(ConstantTable),
}

impl From<f32> for ConstantValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<f32>> for ConstantValue {
    fn from(value: Vec<f32>) -> Self {
        Self::Floats(value)
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<ConstantTable> for ConstantValue {
    fn from(value: ConstantTable) -> Self {
        Self::Table(value)
    }
}

/// Read-only tree of named constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantTable {
    values: BTreeMap<String, ConstantValue>,
}

impl Config for ConstantTable {}

impl ConstantTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder pattern)
    pub fn with(mut self, key: &str, value: impl Into<ConstantValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&ConstantValue> {
        self.values.get(key)
    }

    /// Whether the table holds `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Required number
    pub fn f32(&self, key: &str) -> Result<f32, ConfigError> {
        match self.get(key) {
            Some(ConstantValue::Number(value)) => Ok(*value),
            Some(_) => Err(wrong_type(key, "a number")),
            None => Err(ConfigError::MissingField(key.to_string())),
        }
    }

    /// Optional number; a value of another kind is an error
    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(_) => self.f32(key),
        }
    }

    /// Optional boolean; a value of another kind is an error
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(ConstantValue::Bool(value)) => Ok(*value),
            Some(_) => Err(wrong_type(key, "a boolean")),
        }
    }

    /// Optional text
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(ConstantValue::Text(value)) => Ok(value),
            Some(_) => Err(wrong_type(key, "a string")),
        }
    }

    /// Required list of numbers
    pub fn floats(&self, key: &str) -> Result<&[f32], ConfigError> {
        match self.get(key) {
            Some(ConstantValue::Floats(values)) => Ok(values),
            Some(_) => Err(wrong_type(key, "a list of numbers")),
            None => Err(ConfigError::MissingField(key.to_string())),
        }
    }

    /// Required two-component vector
    pub fn vec2(&self, key: &str) -> Result<Vec2, ConfigError> {
        match self.floats(key)? {
            [x, y] => Ok(Vec2::new(*x, *y)),
            _ => Err(wrong_type(key, "a list of two numbers")),
        }
    }

    /// Optional two-component vector
    pub fn vec2_or(&self, key: &str, default: Vec2) -> Result<Vec2, ConfigError> {
        if self.contains(key) {
            self.vec2(key)
        } else {
            Ok(default)
        }
    }

    /// Optional nested table; absent tables read as empty
    pub fn section(&self, key: &str) -> Result<Cow<'_, Self>, ConfigError> {
        match self.get(key) {
            None => Ok(Cow::Owned(Self::new())),
            Some(_) => self.table(key).map(Cow::Borrowed),
        }
    }

    /// Required nested table
    pub fn table(&self, key: &str) -> Result<&Self, ConfigError> {
        match self.get(key) {
            Some(ConstantValue::Table(table)) => Ok(table),
            Some(_) => Err(wrong_type(key, "a table")),
            None => Err(ConfigError::MissingField(key.to_string())),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::WrongType {
        field: key.to_string(),
        expected,
    }
}
