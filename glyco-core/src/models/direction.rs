//! Trend direction for a glucose reading.

use serde::{Deserialize, Serialize};

/// Trend arrow reported alongside a sensor glucose value.
///
/// The variants mirror the direction strings Nightscout servers emit.
/// Anything the server sends that is not recognized (including `"NONE"`,
/// `"NOT COMPUTABLE"` and `"RATE OUT OF RANGE"`) collapses to
/// [`Direction::Unknown`] rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Direction {
    /// Rising very rapidly.
    DoubleUp,
    /// Rising rapidly.
    SingleUp,
    /// Rising.
    FortyFiveUp,
    /// Steady.
    Flat,
    /// Falling.
    FortyFiveDown,
    /// Falling rapidly.
    SingleDown,
    /// Falling very rapidly.
    DoubleDown,
    /// Absent or unrecognized trend.
    #[default]
    Unknown,
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        Self::from_wire(&s)
    }
}

impl Direction {
    /// Parses a server direction string, defaulting to `Unknown`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "DoubleUp" => Self::DoubleUp,
            "SingleUp" => Self::SingleUp,
            "FortyFiveUp" => Self::FortyFiveUp,
            "Flat" => Self::Flat,
            "FortyFiveDown" => Self::FortyFiveDown,
            "SingleDown" => Self::SingleDown,
            "DoubleDown" => Self::DoubleDown,
            _ => Self::Unknown,
        }
    }

    /// Returns the server wire name for this direction.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::DoubleUp => "DoubleUp",
            Self::SingleUp => "SingleUp",
            Self::FortyFiveUp => "FortyFiveUp",
            Self::Flat => "Flat",
            Self::FortyFiveDown => "FortyFiveDown",
            Self::SingleDown => "SingleDown",
            Self::DoubleDown => "DoubleDown",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns an arrow glyph for terminal output.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::DoubleUp => "⇈",
            Self::SingleUp => "↑",
            Self::FortyFiveUp => "↗",
            Self::Flat => "→",
            Self::FortyFiveDown => "↘",
            Self::SingleDown => "↓",
            Self::DoubleDown => "⇊",
            Self::Unknown => "-",
        }
    }

    /// Returns true if the server actually reported a trend.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}
