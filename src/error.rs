use std::fmt;

use crate::hud::HudStat;

/// Errors raised outside the per-frame draw path
///
/// Drawing itself reports surface failures as `String` (the SDL2
/// convention); everything that parses or loads input uses this type.
#[derive(Debug)]
pub enum HudError {
    /// Config file could not be read
    Io(std::io::Error),

    /// Config or bridge payload is not valid JSON for the expected shape
    Json(serde_json::Error),

    /// A stat update carried a value of the wrong shape for that stat
    InvalidStat {
        stat: HudStat,
        expected: &'static str,
    },

    /// Numeric stat id outside the known range
    UnknownStat(u8),

    /// Render surface failure surfaced through a non-draw API
    Render(String),
}

impl fmt::Display for HudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudError::Io(e) => write!(f, "IO error: {}", e),
            HudError::Json(e) => write!(f, "JSON error: {}", e),
            HudError::InvalidStat { stat, expected } => {
                write!(f, "Invalid value for stat {:?}: expected {}", stat, expected)
            }
            HudError::UnknownStat(id) => write!(f, "Unknown HUD stat id: {}", id),
            HudError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for HudError {}

impl From<std::io::Error> for HudError {
    fn from(err: std::io::Error) -> Self {
        HudError::Io(err)
    }
}

impl From<serde_json::Error> for HudError {
    fn from(err: serde_json::Error) -> Self {
        HudError::Json(err)
    }
}

impl From<HudError> for String {
    fn from(error: HudError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = HudError::UnknownStat(42);
        assert_eq!(err.to_string(), "Unknown HUD stat id: 42");

        let err = HudError::InvalidStat {
            stat: HudStat::Text,
            expected: "string",
        };
        assert_eq!(err.to_string(), "Invalid value for stat Text: expected string");
    }

    #[test]
    fn test_converts_into_string() {
        let msg: String = HudError::Render("surface lost".to_string()).into();
        assert_eq!(msg, "Render error: surface lost");
    }
}
