//! Rail line codes.

use std::fmt;

use serde::{Serialize, Serializer};

use super::station::parse_code3;

/// Error returned when parsing an invalid line code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line code: {reason}")]
pub struct InvalidLineCode {
    reason: &'static str,
}

/// A 3-letter MTR line code, such as `AEL` or `TWL`.
///
/// ```
/// use route_planner::domain::LineCode;
///
/// let twl = LineCode::parse("TWL").unwrap();
/// assert_eq!(twl.to_string(), "TWL");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCode([u8; 3]);

impl LineCode {
    pub fn parse(s: &str) -> Result<Self, InvalidLineCode> {
        parse_code3(s)
            .map(LineCode)
            .map_err(|reason| InvalidLineCode { reason })
    }

    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLineCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.as_str())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LineCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_and_display() {
        let code = LineCode::parse("KTL").unwrap();
        assert_eq!(code.as_str(), "KTL");
        assert_eq!(format!("{:?}", code), "LineCode(KTL)");
        assert!(LineCode::parse("ktl").is_err());
        assert_eq!(LineCode::parse_normalized("ktl").unwrap(), code);
    }

    #[test]
    fn map_keys_order_alphabetically() {
        let mut codes = vec![
            LineCode::parse("TWL").unwrap(),
            LineCode::parse("AEL").unwrap(),
            LineCode::parse("ISL").unwrap(),
        ];
        codes.sort();
        let names: Vec<_> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["AEL", "ISL", "TWL"]);
    }

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = LineCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }
    }
}
