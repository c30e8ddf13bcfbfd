//! Commands that call the geocoding provider.

use std::sync::Arc;

use anyhow::Context;
use cmship_checkout::CheckoutFlow;
use cmship_core::AppConfig;
use cmship_estimator::{LocationLookup, LookupOutcome, LookupSettings, ShippingEstimator};
use cmship_geocode::OpenCageClient;

fn build_lookup(config: &AppConfig) -> anyhow::Result<LocationLookup<OpenCageClient>> {
    let api_key = config
        .opencage_api_key
        .as_deref()
        .context("OPENCAGE_API_KEY is not set")?;
    let client = OpenCageClient::with_base_url(
        api_key,
        config.geocoder_timeout_secs,
        &config.user_agent,
        &config.geocoder_base_url,
    )?;
    Ok(LocationLookup::new(client, LookupSettings::from_config(config)))
}

fn print_suggestions(outcome: &LookupOutcome) {
    if let Some(notice) = &outcome.notice {
        eprintln!("{notice}");
        return;
    }
    if outcome.is_empty() {
        println!("no locations found");
        return;
    }
    for (i, result) in outcome.results.iter().enumerate() {
        let coords = result
            .coordinates
            .map(|c| c.to_string())
            .unwrap_or_default();
        let n = i + 1;
        let name = &result.formatted;
        println!("{n:>2}. {name:<50}{coords}");
    }
}

/// Prints suggestions for `query`.
///
/// # Errors
///
/// Returns an error if no API key is configured or the client cannot be
/// built. Provider failures are reported as a notice, not an error.
pub(crate) async fn run_suggest(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let lookup = build_lookup(config)?;
    let outcome = lookup.lookup(query).await;
    print_suggestions(&outcome);
    Ok(())
}

/// Looks up `query`, quotes suggestion number `pick` and confirms it.
///
/// When the provider is unavailable the flat manual-entry fee is quoted for
/// the query text instead.
///
/// # Errors
///
/// Returns an error if no API key is configured, nothing matched, or `pick`
/// is out of range.
pub(crate) async fn run_quote(
    config: &AppConfig,
    estimator: ShippingEstimator,
    query: &str,
    pick: usize,
) -> anyhow::Result<()> {
    let lookup = build_lookup(config)?;
    let mut flow = CheckoutFlow::new(Arc::new(estimator));

    flow.edit_location(query);
    let outcome = lookup.lookup(query).await;

    if let Some(notice) = &outcome.notice {
        eprintln!("{notice}");
        let quote = flow.enter_manual_address(query)?;
        super::estimate::print_quote(&quote);
        return Ok(());
    }
    if outcome.is_empty() {
        anyhow::bail!("no locations found for '{}'", query.trim());
    }

    print_suggestions(&outcome);
    println!();

    flow.suggestions_arrived(query, outcome.results);
    let index = pick.checked_sub(1).context("--pick is 1-based")?;
    flow.select(index)?;
    let quote = flow.confirm()?;
    super::estimate::print_quote(&quote);
    Ok(())
}
