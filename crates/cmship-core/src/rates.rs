use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::normalize::normalize_city;
use crate::ConfigError;

/// Depot the distance formula measures from.
pub const DEFAULT_ORIGIN: Coordinates = Coordinates::new(4.0511, 9.7679);

/// Fee charged when no location could be resolved (manual address entry).
pub const DEFAULT_SHIPPING_FEE: u64 = 5000;

/// Pricing configuration for delivery fees, in XAF.
///
/// Distance-based fees are `round(base_rate + km * per_km_rate)` clamped to
/// `[min_fee, max_fee]`. Cities listed in `fixed_rates` bypass the formula
/// and the clamp entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRates {
    pub origin: Coordinates,
    pub base_rate: u64,
    pub per_km_rate: f64,
    pub min_fee: u64,
    pub max_fee: u64,
    #[serde(default = "default_fee")]
    pub default_fee: u64,
    #[serde(default)]
    pub fixed_rates: BTreeMap<String, u64>,
}

fn default_fee() -> u64 {
    DEFAULT_SHIPPING_FEE
}

impl ShippingRates {
    /// Built-in table for deliveries from the Douala depot.
    #[must_use]
    pub fn cameroon_default() -> Self {
        let fixed_rates = [
            ("Buea", 1000),
            ("Limbe", 1000),
            ("Mutengene", 1000),
            ("Tiko", 1500),
            ("Kumba", 2000),
            ("Douala", 2500),
            ("Yaoundé", 3000),
            ("Bamenda", 3500),
            ("Garoua", 4000),
            ("Maroua", 4500),
            ("Ngaoundéré", 4500),
        ]
        .into_iter()
        .map(|(city, fee)| (city.to_string(), fee))
        .collect();

        Self {
            origin: DEFAULT_ORIGIN,
            base_rate: 1000,
            per_km_rate: 100.0,
            min_fee: 1000,
            max_fee: 5000,
            default_fee: DEFAULT_SHIPPING_FEE,
            fixed_rates,
        }
    }

    /// Fixed-rate table keyed by [`normalize_city`] output.
    #[must_use]
    pub fn normalized_fixed_rates(&self) -> HashMap<String, u64> {
        self.fixed_rates
            .iter()
            .map(|(city, fee)| (normalize_city(city), *fee))
            .collect()
    }
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self::cameroon_default()
    }
}

/// Load and validate a rates configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rates(path: &Path) -> Result<ShippingRates, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RatesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rates(&content)
}

/// Parse and validate a rates configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rates(content: &str) -> Result<ShippingRates, ConfigError> {
    let rates: ShippingRates = serde_yaml::from_str(content)?;
    validate_rates(&rates)?;
    Ok(rates)
}

fn validate_rates(rates: &ShippingRates) -> Result<(), ConfigError> {
    if !rates.origin.is_valid() {
        return Err(ConfigError::Validation(format!(
            "origin ({}) is outside valid latitude/longitude ranges",
            rates.origin
        )));
    }

    if !rates.per_km_rate.is_finite() || rates.per_km_rate < 0.0 {
        return Err(ConfigError::Validation(format!(
            "per_km_rate must be a finite non-negative number, got {}",
            rates.per_km_rate
        )));
    }

    if rates.min_fee > rates.max_fee {
        return Err(ConfigError::Validation(format!(
            "min_fee {} exceeds max_fee {}",
            rates.min_fee, rates.max_fee
        )));
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    for city in rates.fixed_rates.keys() {
        let key = normalize_city(city);
        if key.is_empty() {
            return Err(ConfigError::Validation(
                "fixed-rate city name must be non-empty".to_string(),
            ));
        }
        if let Some(previous) = seen.insert(key, city) {
            return Err(ConfigError::Validation(format!(
                "fixed-rate cities '{previous}' and '{city}' collide after normalization"
            )));
        }
    }

    Ok(())
}
