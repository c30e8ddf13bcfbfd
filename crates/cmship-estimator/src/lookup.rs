//! Turning shopper text into geocoding candidates.
//!
//! [`LocationLookup::lookup`] never fails: provider errors become an empty
//! candidate list plus a [`LookupNotice`] the UI can show, so the storefront
//! stays usable with manual address entry.

use cmship_core::{AppConfig, GeocodeResult};
use cmship_geocode::{GeocodeProvider, GeocodeRequest};
use serde::{Deserialize, Serialize};

/// Request shaping applied to every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub country_code: Option<String>,
    /// Appended as `"<query>, <hint>"` unless the query already mentions it.
    pub query_hint: Option<String>,
    pub limit: u32,
}

impl LookupSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            country_code: Some(config.geocoder_country_code.clone()),
            query_hint: config.geocoder_query_hint.clone(),
            limit: config.geocoder_result_limit,
        }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            country_code: Some("cm".to_string()),
            query_hint: Some("Cameroon".to_string()),
            limit: 5,
        }
    }
}

/// Transient, user-visible notice attached to a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupNotice {
    ProviderUnavailable { provider: String, detail: String },
}

impl std::fmt::Display for LookupNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupNotice::ProviderUnavailable { .. } => write!(
                f,
                "location suggestions are temporarily unavailable; enter your address manually"
            ),
        }
    }
}

/// Candidates for one query, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupOutcome {
    pub results: Vec<GeocodeResult>,
    pub notice: Option<LookupNotice>,
}

impl LookupOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for LookupOutcome {
    type Item = GeocodeResult;
    type IntoIter = std::vec::IntoIter<GeocodeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Geocoding front-end over any [`GeocodeProvider`].
pub struct LocationLookup<P> {
    provider: P,
    settings: LookupSettings,
}

impl<P: GeocodeProvider> LocationLookup<P> {
    #[must_use]
    pub fn new(provider: P, settings: LookupSettings) -> Self {
        Self { provider, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    /// Looks up candidates for `query`.
    ///
    /// Blank queries return immediately without touching the provider.
    /// Candidates without coordinates are dropped; results beyond the
    /// configured limit are truncated.
    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        let Some(full_query) = build_query(query, self.settings.query_hint.as_deref()) else {
            return LookupOutcome::default();
        };

        let request = GeocodeRequest {
            query: full_query,
            country_code: self.settings.country_code.clone(),
            limit: self.settings.limit,
        };

        match self.provider.geocode(&request).await {
            Ok(candidates) => {
                let limit = usize::try_from(self.settings.limit).unwrap_or(usize::MAX);
                let results: Vec<GeocodeResult> = candidates
                    .into_iter()
                    .filter(|c| {
                        if c.coordinates.is_none() {
                            tracing::debug!(
                                formatted = %c.formatted,
                                "dropping geocoding candidate without coordinates"
                            );
                            false
                        } else {
                            true
                        }
                    })
                    .take(limit)
                    .collect();
                LookupOutcome {
                    results,
                    notice: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    query = %request.query,
                    error = %err,
                    "geocoding lookup failed"
                );
                LookupOutcome {
                    results: Vec::new(),
                    notice: Some(LookupNotice::ProviderUnavailable {
                        provider: self.provider.name().to_string(),
                        detail: err.to_string(),
                    }),
                }
            }
        }
    }
}

/// Trims `query` and appends the country hint. Returns `None` for blank input.
#[must_use]
pub fn build_query(query: &str, hint: Option<&str>) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    match hint.map(str::trim).filter(|h| !h.is_empty()) {
        Some(h) if !trimmed.to_lowercase().contains(&h.to_lowercase()) => {
            Some(format!("{trimmed}, {h}"))
        }
        _ => Some(trimmed.to_string()),
    }
}
