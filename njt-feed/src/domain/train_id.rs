//! Train number type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ParseError;

/// A numeric NJ Transit train number.
///
/// The vehicle feeds decorate train numbers in several ways: Amtrak
/// interline services carry a letter suffix (`"3874a"`) and some records
/// have stray punctuation (`".41."`). [`TrainId::normalize`] recovers the
/// number from those. Feeds that are expected to carry a plain number use
/// [`str::parse`] instead, which rejects anything else.
///
/// # Examples
///
/// ```
/// use njt_feed::domain::TrainId;
///
/// assert_eq!(TrainId::normalize("3874a").unwrap(), TrainId::new(3874));
/// assert_eq!(TrainId::normalize(".41.").unwrap(), TrainId::new(41));
/// assert!(TrainId::normalize("AMTK").is_err());
///
/// assert!("A123".parse::<TrainId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrainId(u32);

impl TrainId {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the train number.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Extract the first run of ASCII digits in `raw` as the train number.
    pub fn normalize(raw: &str) -> Result<Self, ParseError> {
        let err = || ParseError::TrainId(raw.to_string());

        let start = raw.find(|c: char| c.is_ascii_digit()).ok_or_else(err)?;
        let digits = &raw[start..];
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());

        digits[..end].parse().map(Self).map_err(|_| err())
    }
}

impl FromStr for TrainId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(Self)
            .map_err(|_| ParseError::TrainId(s.to_string()))
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TrainId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any number survives arbitrary non-digit decoration
        #[test]
        fn decoration_is_ignored(n in any::<u32>(), prefix in "[a-zA-Z. -]{0,3}", suffix in "[a-zA-Z. -]{0,3}") {
            let raw = format!("{prefix}{n}{suffix}");
            prop_assert_eq!(TrainId::normalize(&raw).unwrap(), TrainId::new(n));
        }

        /// Strings without digits never normalize
        #[test]
        fn letters_only_rejected(s in "[a-zA-Z. ]{0,8}") {
            prop_assert!(TrainId::normalize(&s).is_err());
        }

        /// Plain numbers parse identically both ways
        #[test]
        fn strict_agrees_on_plain_numbers(n in any::<u32>()) {
            let s = n.to_string();
            prop_assert_eq!(s.parse::<TrainId>().unwrap(), TrainId::normalize(&s).unwrap());
        }
    }
}
