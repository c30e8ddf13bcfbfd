//! Delivery-fee quoting.
//!
//! [`ShippingEstimator`] is a pure function of its [`ShippingRates`]: the
//! same candidate always produces the same quote.

use std::collections::HashMap;

use cmship_core::{normalize_city, AddressComponents, Coordinates, GeocodeResult, ShippingRates};

use crate::error::EstimateError;
use crate::geo::haversine_km;
use crate::quote::{RateBasis, ShippingQuote};

/// Quotes delivery fees from a rate configuration.
#[derive(Debug, Clone)]
pub struct ShippingEstimator {
    rates: ShippingRates,
    /// Fixed-rate table keyed by normalized city name.
    fixed: HashMap<String, u64>,
}

impl ShippingEstimator {
    #[must_use]
    pub fn new(rates: ShippingRates) -> Self {
        let fixed = rates.normalized_fixed_rates();
        Self { rates, fixed }
    }

    #[must_use]
    pub fn rates(&self) -> &ShippingRates {
        &self.rates
    }

    /// Picks the city name for a candidate: first non-empty of
    /// `city`, `town`, `state`, `village`; empty string if none.
    #[must_use]
    pub fn resolve_city(components: &AddressComponents) -> String {
        [
            &components.city,
            &components.town,
            &components.state,
            &components.village,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
    }

    /// Fixed fee for `city`, matched after [`normalize_city`].
    #[must_use]
    pub fn fixed_rate(&self, city: &str) -> Option<u64> {
        let key = normalize_city(city);
        if key.is_empty() {
            return None;
        }
        self.fixed.get(&key).copied()
    }

    /// `round(base_rate + km * per_km_rate)` clamped to `[min_fee, max_fee]`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn fee_for_distance(&self, distance_km: f64) -> u64 {
        let r = &self.rates;
        let raw = (r.base_rate as f64 + distance_km * r.per_km_rate).round();
        if !raw.is_finite() {
            return r.max_fee;
        }
        raw.clamp(r.min_fee as f64, r.max_fee as f64) as u64
    }

    /// Quotes a selected geocoding candidate.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::MissingCoordinates`] if the candidate has no
    /// geometry, or [`EstimateError::InvalidCoordinates`] if its coordinates
    /// are out of range. Both mean the caller quoted something that should
    /// never have been offered as a suggestion.
    pub fn quote(&self, selected: &GeocodeResult) -> Result<ShippingQuote, EstimateError> {
        let coordinates =
            selected
                .coordinates
                .ok_or_else(|| EstimateError::MissingCoordinates {
                    address: selected.formatted.clone(),
                })?;

        if !coordinates.is_valid() {
            return Err(EstimateError::InvalidCoordinates {
                address: selected.formatted.clone(),
                lat: coordinates.lat,
                lng: coordinates.lng,
            });
        }

        let city = Self::resolve_city(&selected.components);
        Ok(self.quote_coordinates(&selected.formatted, &city, coordinates))
    }

    /// Quotes an already-resolved point. The fixed-rate table wins over the
    /// distance formula whenever `city` matches it.
    #[must_use]
    pub fn quote_coordinates(
        &self,
        address: &str,
        city: &str,
        coordinates: Coordinates,
    ) -> ShippingQuote {
        let distance_km = haversine_km(self.rates.origin, coordinates);
        let (fee, basis) = match self.fixed_rate(city) {
            Some(fee) => (fee, RateBasis::FixedRate),
            None => (self.fee_for_distance(distance_km), RateBasis::Distance),
        };

        tracing::debug!(city, distance_km, fee, %basis, "computed shipping quote");

        ShippingQuote {
            address: address.to_string(),
            city: city.to_string(),
            coordinates: Some(coordinates),
            distance_km: Some(distance_km),
            fee,
            basis,
        }
    }

    /// Flat-fee quote for an address typed in by hand when geocoding is
    /// unavailable.
    #[must_use]
    pub fn default_quote(&self, address: &str) -> ShippingQuote {
        ShippingQuote {
            address: address.trim().to_string(),
            city: String::new(),
            coordinates: None,
            distance_km: None,
            fee: self.rates.default_fee,
            basis: RateBasis::Default,
        }
    }
}

impl Default for ShippingEstimator {
    fn default() -> Self {
        Self::new(ShippingRates::cameroon_default())
    }
}

#[cfg(test)]
#[path = "estimator_test.rs"]
mod tests;
