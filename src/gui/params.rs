//! Extra named arguments bound to a widget at creation time
//!
//! A [`Params`] bundle is fixed when the option or selector is built and handed,
//! unchanged, to every callback invocation of that widget. It is an ordered list
//! rather than a map so iteration order is the binding order.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A single bound argument value (also used as selector choice values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Color),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Color> for ParamValue {
    fn from(value: Color) -> Self {
        ParamValue::Color(value)
    }
}

/// Ordered `(name, value)` pairs with unique names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Binds `name`; re-binding an existing name replaces the value in place
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebinding_replaces_in_place() {
        let params = Params::new()
            .with("write_on_console", true)
            .with("prefix", "bg")
            .with("write_on_console", false);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get_bool("write_on_console"), Some(false));

        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["write_on_console", "prefix"]);
    }

    #[test]
    fn test_typed_lookups() {
        let params = Params::new()
            .with("color", Color::RGB(1, 2, 3))
            .with("count", 3_i64);

        assert_eq!(params.get("color").and_then(ParamValue::as_color), Some(Color::RGB(1, 2, 3)));
        assert_eq!(params.get("count"), Some(&ParamValue::Int(3)));
        assert_eq!(params.get_bool("count"), None);
        assert_eq!(params.get("missing"), None);
        assert!(Params::new().is_empty());
    }
}
