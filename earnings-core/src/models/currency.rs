use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a currency code is not one of the supported codes.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised currency code '{0}'")]
pub struct UnknownCurrency(pub String);

/// Currencies offered by the calculator's source/destination selectors.
///
/// A currency is a display label only: it never participates in the
/// arithmetic, and no live exchange rate is fetched for it. The rate is
/// always supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Aud,
    Cad,
}

impl Currency {
    /// ISO 4217 code, e.g. `"USD"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
        }
    }

    /// Symbol prefixed to formatted amounts, e.g. `"₹"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Inr => "₹",
            Self::Aud => "A$",
            Self::Cad => "C$",
        }
    }

    /// Case-insensitive lookup by ISO code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            "INR" => Some(Self::Inr),
            "AUD" => Some(Self::Aud),
            "CAD" => Some(Self::Cad),
            _ => None,
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
