//! Maze construction errors.
//!
//! The simulation itself has no failure modes at runtime: out-of-range
//! geometry is clamped. Errors only come from invalid configuration, which
//! is rejected when a maze is built.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// A count (rows, cols, rings, sectors, substeps) is below its minimum.
    InvalidDimension {
        name: &'static str,
        value: usize,
        min: usize,
    },

    /// A length (cell size, spacing, radius, tolerance) is not a usable
    /// positive finite number.
    InvalidLength {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The clock overlay maps one sector to each hour.
    ClockRequiresTwelveSectors { sectors: usize },

    /// The clock overlay was asked for on a rectangular maze.
    ClockRequiresPolar,

    /// Settings JSON could not be parsed.
    Config(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { name, value, min } => {
                write!(f, "invalid {}: got {}, need at least {}", name, value, min)
            }
            MazeError::InvalidLength {
                name,
                value,
                reason,
            } => write!(f, "invalid {}: {} ({})", name, value, reason),
            MazeError::ClockRequiresTwelveSectors { sectors } => write!(
                f,
                "clock overlay needs a 12-sector polar maze, got {} sectors",
                sectors
            ),
            MazeError::ClockRequiresPolar => {
                write!(f, "clock overlay needs a polar maze, got a rectangular one")
            }
            MazeError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for MazeError {}

impl From<serde_json::Error> for MazeError {
    fn from(e: serde_json::Error) -> Self {
        MazeError::Config(e.to_string())
    }
}

/// Reject counts below `min`.
pub(crate) fn check_count(name: &'static str, value: usize, min: usize) -> Result<(), MazeError> {
    if value < min {
        return Err(MazeError::InvalidDimension { name, value, min });
    }
    Ok(())
}

/// Reject zero, negative, NaN and infinite lengths.
pub(crate) fn check_length(name: &'static str, value: f32) -> Result<(), MazeError> {
    if !value.is_finite() {
        return Err(MazeError::InvalidLength {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(MazeError::InvalidLength {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = MazeError::InvalidDimension {
            name: "rings",
            value: 1,
            min: 2,
        };
        assert_eq!(e.to_string(), "invalid rings: got 1, need at least 2");

        let e = MazeError::ClockRequiresTwelveSectors { sectors: 18 };
        assert!(e.to_string().contains("18"));

        let e = MazeError::ClockRequiresPolar;
        assert!(e.to_string().contains("rectangular"));
        assert!(!e.to_string().contains("sectors"));
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("spacing", 13.0).is_ok());
        assert!(check_length("spacing", 0.0).is_err());
        assert!(check_length("spacing", -1.0).is_err());
        assert!(check_length("spacing", f32::NAN).is_err());
        assert!(check_length("spacing", f32::INFINITY).is_err());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: MazeError = err.into();
        assert!(matches!(e, MazeError::Config(_)));
    }
}
