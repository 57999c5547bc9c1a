//! Ports of a module's ANSI header.

use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction keyword that introduced a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

impl Direction {
    /// Maps a direction keyword to its variant. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "input" => Some(Direction::Input),
            "output" => Some(Direction::Output),
            "inout" => Some(Direction::Inout),
            _ => None,
        }
    }

    /// Returns the source keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module port.
///
/// The annotation fields (`reset_value`, `default_value`, `clk_domain`,
/// `description`) are never filled in by the extractor; they exist for
/// downstream tools that merge in documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// The port direction.
    pub direction: Direction,
    /// The resolved port type.
    pub data_type: DataType,
    /// Value after reset.
    pub reset_value: Option<String>,
    /// Value when undriven.
    pub default_value: Option<String>,
    /// Clock domain the port is synchronous to.
    pub clk_domain: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl Port {
    /// Creates a port with no annotations.
    pub fn new(name: impl Into<String>, direction: Direction, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            direction,
            data_type,
            reset_value: None,
            default_value: None,
            clk_domain: None,
            description: None,
        }
    }

    /// Returns the single-line label of the port type.
    pub fn type_name(&self) -> String {
        self.data_type.to_string()
    }

    /// Returns the bit width of the port type.
    pub fn width(&self) -> Option<u64> {
        self.data_type.width()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.direction, self.data_type, self.name)
    }
}
