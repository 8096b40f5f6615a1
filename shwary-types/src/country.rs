//! Per-country payment policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Countries supported by the Shwary gateway.
///
/// Each variant carries the gateway's policy for that market: the phone
/// dial code prefix, the minimum payable amount, and the settlement
/// currency. Adding a country means adding a variant and extending the
/// match arms below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Drc,
    Kenya,
    Uganda,
}

impl Country {
    /// Returns the endpoint path segment for this country.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Drc => "drc",
            Country::Kenya => "kenya",
            Country::Uganda => "uganda",
        }
    }

    /// Returns the E.164 dial code prefix for this country.
    pub fn dial_code(&self) -> &'static str {
        match self {
            Country::Drc => "+243",
            Country::Kenya => "+254",
            Country::Uganda => "+256",
        }
    }

    /// Returns the minimum payable amount, in the gateway's unit for the
    /// country's currency. Payments must be strictly greater than this.
    pub fn minimum_amount(&self) -> i64 {
        match self {
            Country::Drc => 100,
            Country::Kenya => 10,
            Country::Uganda => 500,
        }
    }

    /// Returns the settlement currency code.
    pub fn currency(&self) -> &'static str {
        match self {
            Country::Drc => "CDF",
            Country::Kenya => "KES",
            Country::Uganda => "UGX",
        }
    }

    /// All supported countries.
    pub fn all() -> &'static [Country] {
        &[Country::Drc, Country::Kenya, Country::Uganda]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drc" => Ok(Country::Drc),
            "kenya" => Ok(Country::Kenya),
            "uganda" => Ok(Country::Uganda),
            _ => Err(format!("Unknown country: {}. Supported: drc, kenya, uganda", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_invariants() {
        for country in Country::all() {
            assert!(!country.dial_code().is_empty());
            assert!(country.dial_code().starts_with('+'));
            assert!(country.minimum_amount() >= 0);
            assert!(!country.currency().is_empty());
        }
    }

    #[test]
    fn test_drc_policy() {
        assert_eq!(Country::Drc.dial_code(), "+243");
        assert_eq!(Country::Drc.currency(), "CDF");
        assert_eq!(Country::Drc.code(), "drc");
    }

    #[test]
    fn test_country_parse() {
        assert_eq!("kenya".parse::<Country>().unwrap(), Country::Kenya);
        assert_eq!("UGANDA".parse::<Country>().unwrap(), Country::Uganda);
        assert!("france".parse::<Country>().is_err());
    }

    #[test]
    fn test_country_display() {
        assert_eq!(Country::Kenya.to_string(), "kenya");
    }
}
