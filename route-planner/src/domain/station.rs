//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// Validate a three-letter uppercase code, shared by station and line codes.
pub(super) fn parse_code3(s: &str) -> Result<[u8; 3], &'static str> {
    let bytes = s.as_bytes();

    if bytes.len() != 3 {
        return Err("must be exactly 3 characters");
    }

    for &b in bytes {
        if !b.is_ascii_uppercase() {
            return Err("must be uppercase ASCII letters A-Z");
        }
    }

    Ok([bytes[0], bytes[1], bytes[2]])
}

/// A valid 3-letter MTR station code, such as `HOK` or `CEN`.
///
/// # Examples
///
/// ```
/// use route_planner::domain::StationCode;
///
/// let hok = StationCode::parse("HOK").unwrap();
/// assert_eq!(hok.as_str(), "HOK");
///
/// assert!(StationCode::parse("hok").is_err());
/// assert_eq!(StationCode::parse_normalized(" hok ").unwrap(), hok);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code. The input must be exactly 3 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        parse_code3(s)
            .map(StationCode)
            .map_err(|reason| InvalidStationCode { reason })
    }

    /// Parse user input: surrounding whitespace is trimmed and letters uppercased.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
