//! Module parameters.

use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parameter from a module's `#( ... )` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The declared type (`logic` when none was given).
    pub data_type: DataType,
    /// The default value, verbatim. Never evaluated.
    pub default: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl Parameter {
    /// Creates a parameter without a description.
    pub fn new(name: impl Into<String>, data_type: DataType, default: Option<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            default,
            description: None,
        }
    }

    /// Returns the single-line label of the parameter type.
    pub fn type_name(&self) -> String {
        self.data_type.to_string()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parameter {} {}", self.data_type, self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}
