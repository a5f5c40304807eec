use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// The closed table of comparison operators.
///
/// Each entry knows how to render its storage-syntax fragment from a rendered
/// left operand (an attribute alias, or `alias.subkey` for object expansion)
/// and a rendered right operand (a value alias, ignored by the existence
/// checks). Names outside this table are a hard error at parse time, never
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Equality (`left = right`)
    #[serde(rename = "eq")]
    Eq,

    /// Negated equality (`NOT left = right`)
    #[serde(rename = "neq")]
    Neq,

    /// Attribute presence (`attribute_exists(left)`)
    #[serde(rename = "exists")]
    Exists,

    /// Attribute absence (`attribute_not_exists(left)`)
    #[serde(rename = "notExists")]
    NotExists,

    /// String prefix match (`begins_with(left, right)`)
    #[serde(rename = "beginsWith")]
    BeginsWith,
}

impl Comparison {
    /// Wire name of the comparison, as it appears in query strings and
    /// nested filter documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Neq => "neq",
            Comparison::Exists => "exists",
            Comparison::NotExists => "notExists",
            Comparison::BeginsWith => "beginsWith",
        }
    }

    /// Whether the comparison carries a right-hand literal.
    pub fn takes_value(self) -> bool {
        !matches!(self, Comparison::Exists | Comparison::NotExists)
    }

    /// Build the storage-syntax fragment for this comparison.
    ///
    /// The existence checks ignore `right`.
    pub fn fragment(self, left: &str, right: &str) -> String {
        match self {
            Comparison::Eq => format!("{} = {}", left, right),
            Comparison::Neq => format!("NOT {} = {}", left, right),
            Comparison::BeginsWith => format!("begins_with({}, {})", left, right),
            Comparison::Exists => format!("attribute_exists({})", left),
            Comparison::NotExists => format!("attribute_not_exists({})", left),
        }
    }
}

impl FromStr for Comparison {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, FilterError> {
        match name {
            "eq" => Ok(Comparison::Eq),
            "neq" => Ok(Comparison::Neq),
            "exists" => Ok(Comparison::Exists),
            "notExists" => Ok(Comparison::NotExists),
            "beginsWith" => Ok(Comparison::BeginsWith),
            _ => Err(FilterError::UnknownComparison(name.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
