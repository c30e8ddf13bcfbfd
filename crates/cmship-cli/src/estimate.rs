//! Offline commands: rate inspection and coordinate quotes.

use cmship_checkout::format_xaf;
use cmship_core::{AppConfig, Coordinates, ShippingRates};
use cmship_estimator::{ShippingEstimator, ShippingQuote};

/// Builds the estimator from `CMSHIP_RATES_PATH`, or the built-in table when
/// unset.
///
/// # Errors
///
/// Returns an error if the rate file cannot be read or fails validation.
pub(crate) fn build_estimator(config: &AppConfig) -> anyhow::Result<ShippingEstimator> {
    let rates = match &config.rates_path {
        Some(path) => {
            let rates = cmship_core::load_rates(path)?;
            tracing::info!(
                path = %path.display(),
                fixed_rates = rates.fixed_rates.len(),
                "loaded shipping rates"
            );
            rates
        }
        None => ShippingRates::cameroon_default(),
    };
    Ok(ShippingEstimator::new(rates))
}

/// Quotes a delivery to `(lat, lng)`.
///
/// # Errors
///
/// Returns an error if the coordinates are out of range.
pub(crate) fn run_distance(
    estimator: &ShippingEstimator,
    lat: f64,
    lng: f64,
    city: Option<&str>,
) -> anyhow::Result<()> {
    let coordinates = Coordinates::new(lat, lng);
    if !coordinates.is_valid() {
        anyhow::bail!("coordinates out of range: {coordinates}");
    }
    let city = city.unwrap_or_default();
    let quote = estimator.quote_coordinates(&coordinates.to_string(), city, coordinates);
    print_quote(&quote);
    Ok(())
}

pub(crate) fn run_rates(estimator: &ShippingEstimator) {
    let rates = estimator.rates();
    println!("Origin:       {}", rates.origin);
    println!("Base rate:    {}", format_xaf(rates.base_rate));
    println!("Per km:       {} FCFA", rates.per_km_rate);
    println!(
        "Bounds:       {} - {}",
        format_xaf(rates.min_fee),
        format_xaf(rates.max_fee)
    );
    println!("Manual entry: {}", format_xaf(rates.default_fee));
    println!();
    println!("{:<20}FEE", "CITY");
    for (city, fee) in &rates.fixed_rates {
        println!("{city:<20}{}", format_xaf(*fee));
    }
}

pub(crate) fn print_quote(quote: &ShippingQuote) {
    println!("Address:  {}", quote.address);
    if !quote.city.is_empty() {
        println!("City:     {}", quote.city);
    }
    if let Some(km) = quote.distance_km {
        println!("Distance: {km:.1} km");
    }
    println!("Fee:      {} ({})", format_xaf(quote.fee), quote.basis);
}
