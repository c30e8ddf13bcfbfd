use cmship_core::Coordinates;
use serde::{Deserialize, Serialize};

/// Which rule produced a quote's fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// City matched the fixed-rate table.
    FixedRate,
    /// Base rate plus per-km charge, clamped.
    Distance,
    /// Flat fallback for manually entered addresses.
    Default,
}

impl std::fmt::Display for RateBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateBasis::FixedRate => write!(f, "fixed rate"),
            RateBasis::Distance => write!(f, "distance"),
            RateBasis::Default => write!(f, "default"),
        }
    }
}

/// A delivery-fee quote for one selected location.
///
/// Quotes are values: re-quoting produces a new one, nothing mutates an
/// existing quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub address: String,
    pub city: String,
    /// `None` only for [`RateBasis::Default`] quotes.
    pub coordinates: Option<Coordinates>,
    pub distance_km: Option<f64>,
    /// Fee in XAF.
    pub fee: u64,
    pub basis: RateBasis,
}
