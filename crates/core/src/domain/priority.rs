// Priority Class Domain Model

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Severity tier of a waiting entry (lower number = more urgent)
///
/// The set is closed: anything outside {1, 2, 3} is rejected on conversion,
/// so a `PriorityClass` value is always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum PriorityClass {
    Critical = 1,
    Serious = 2,
    Stable = 3,
}

impl PriorityClass {
    /// All classes, most urgent first
    pub const ALL: [PriorityClass; 3] = [
        PriorityClass::Critical,
        PriorityClass::Serious,
        PriorityClass::Stable,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-facing label, e.g. for dashboards and CLI tables
    pub fn label(self) -> &'static str {
        match self {
            PriorityClass::Critical => "Critical",
            PriorityClass::Serious => "Serious",
            PriorityClass::Stable => "Stable",
        }
    }
}

impl TryFrom<i64> for PriorityClass {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PriorityClass::Critical),
            2 => Ok(PriorityClass::Serious),
            3 => Ok(PriorityClass::Stable),
            other => Err(DomainError::InvalidPriorityClass(other)),
        }
    }
}

impl From<PriorityClass> for u8 {
    fn from(class: PriorityClass) -> Self {
        class.as_u8()
    }
}

impl std::fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_u8())
    }
}
