//! Module interface descriptions.

use crate::param::Parameter;
use crate::port::Port;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The interface of one module: its name, parameters and ports in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The module name.
    pub name: String,
    /// Parameters from the `#( ... )` list.
    pub parameters: Vec<Parameter>,
    /// ANSI ports from the header port list.
    pub ports: Vec<Port>,
    /// Free-form description.
    pub description: Option<String>,
}

impl Module {
    /// Creates a module without a description.
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, ports: Vec<Port>) -> Self {
        Self {
            name: name.into(),
            parameters,
            ports,
            description: None,
        }
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module {}", self.name)
    }
}
