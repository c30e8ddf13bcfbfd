//! Shipping-location stage of checkout.
//!
//! Stages advance `Idle -> Searching -> SuggestionsShown -> Quoted ->
//! Confirmed`. Editing the location from any stage restarts the search and
//! drops whatever quote was held. Manual address entry jumps straight to
//! `Confirmed` with the flat default fee.

use std::fmt;
use std::sync::Arc;

use cmship_core::GeocodeResult;
use cmship_estimator::{ShippingEstimator, ShippingQuote, Suggestions};
use serde::Serialize;

use crate::error::FlowError;
use crate::order::OrderSummary;

/// Where the shopper is in choosing a delivery location.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckoutStage {
    #[default]
    Idle,
    /// Waiting on lookup results for `query`.
    Searching {
        query: String,
    },
    SuggestionsShown {
        query: String,
        candidates: Vec<GeocodeResult>,
    },
    Quoted {
        quote: ShippingQuote,
    },
    /// Shipping fee accepted; checkout may proceed.
    Confirmed {
        quote: ShippingQuote,
    },
}

/// Payload-free view of [`CheckoutStage`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Idle,
    Searching,
    SuggestionsShown,
    Quoted,
    Confirmed,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageKind::Idle => "idle",
            StageKind::Searching => "searching",
            StageKind::SuggestionsShown => "showing suggestions",
            StageKind::Quoted => "quoted",
            StageKind::Confirmed => "confirmed",
        };
        f.write_str(s)
    }
}

impl CheckoutStage {
    #[must_use]
    pub fn kind(&self) -> StageKind {
        match self {
            CheckoutStage::Idle => StageKind::Idle,
            CheckoutStage::Searching { .. } => StageKind::Searching,
            CheckoutStage::SuggestionsShown { .. } => StageKind::SuggestionsShown,
            CheckoutStage::Quoted { .. } => StageKind::Quoted,
            CheckoutStage::Confirmed { .. } => StageKind::Confirmed,
        }
    }
}

/// Drives one shopper's shipping-location choice through [`CheckoutStage`]s.
///
/// Quotes come from the shared [`ShippingEstimator`]; the flow itself owns
/// only the current stage.
pub struct CheckoutFlow {
    estimator: Arc<ShippingEstimator>,
    stage: CheckoutStage,
}

impl CheckoutFlow {
    /// Starts a flow in [`CheckoutStage::Idle`].
    #[must_use]
    pub fn new(estimator: Arc<ShippingEstimator>) -> Self {
        Self {
            estimator,
            stage: CheckoutStage::Idle,
        }
    }

    #[must_use]
    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// Shopper changed the location text. Blank text returns to `Idle`.
    pub fn edit_location(&mut self, query: &str) {
        let query = query.trim();
        self.stage = if query.is_empty() {
            CheckoutStage::Idle
        } else {
            CheckoutStage::Searching {
                query: query.to_string(),
            }
        };
    }

    /// Delivers lookup results. Returns `false` and leaves the stage alone
    /// unless the flow is still searching for exactly `query`.
    pub fn suggestions_arrived(&mut self, query: &str, results: Vec<GeocodeResult>) -> bool {
        match &self.stage {
            CheckoutStage::Searching { query: current } if current == query.trim() => {
                self.stage = CheckoutStage::SuggestionsShown {
                    query: query.trim().to_string(),
                    candidates: results,
                };
                true
            }
            other => {
                tracing::debug!(
                    query,
                    stage = %other.kind(),
                    "ignoring suggestions for a query no longer being searched"
                );
                false
            }
        }
    }

    /// Convenience for feeding a published [`Suggestions`] value.
    pub fn apply_suggestions(&mut self, suggestions: &Suggestions) -> bool {
        self.suggestions_arrived(&suggestions.query, suggestions.results.clone())
    }

    /// Quotes the candidate at `index`.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] outside `SuggestionsShown`,
    /// [`FlowError::NoSuchSuggestion`] for an out-of-range index, or
    /// [`FlowError::Estimate`] if the candidate cannot be quoted. The stage is
    /// unchanged on error.
    pub fn select(&mut self, index: usize) -> Result<ShippingQuote, FlowError> {
        let CheckoutStage::SuggestionsShown { candidates, .. } = &self.stage else {
            return Err(self.invalid("select a suggestion"));
        };
        let candidate = candidates
            .get(index)
            .ok_or(FlowError::NoSuchSuggestion {
                index,
                available: candidates.len(),
            })?;

        let quote = self.estimator.quote(candidate)?;
        self.stage = CheckoutStage::Quoted {
            quote: quote.clone(),
        };
        Ok(quote)
    }

    /// # Errors
    ///
    /// [`FlowError::InvalidTransition`] unless a quote is held.
    pub fn confirm(&mut self) -> Result<ShippingQuote, FlowError> {
        match std::mem::take(&mut self.stage) {
            CheckoutStage::Quoted { quote } | CheckoutStage::Confirmed { quote } => {
                self.stage = CheckoutStage::Confirmed {
                    quote: quote.clone(),
                };
                Ok(quote)
            }
            other => {
                self.stage = other;
                Err(self.invalid("confirm shipping"))
            }
        }
    }

    /// Confirms a hand-typed address at the flat default fee.
    ///
    /// # Errors
    ///
    /// [`FlowError::EmptyAddress`] for blank input.
    pub fn enter_manual_address(&mut self, address: &str) -> Result<ShippingQuote, FlowError> {
        if address.trim().is_empty() {
            return Err(FlowError::EmptyAddress);
        }
        let quote = self.estimator.default_quote(address);
        tracing::info!(fee = quote.fee, "shipping confirmed from manual address");
        self.stage = CheckoutStage::Confirmed {
            quote: quote.clone(),
        };
        Ok(quote)
    }

    /// The quote the shopper accepted, if the flow is confirmed.
    #[must_use]
    pub fn confirmed_quote(&self) -> Option<&ShippingQuote> {
        match &self.stage {
            CheckoutStage::Confirmed { quote } => Some(quote),
            _ => None,
        }
    }

    #[must_use]
    pub fn shipping_fee(&self) -> Option<u64> {
        self.confirmed_quote().map(|q| q.fee)
    }

    /// Totals for `subtotal`; shipping counts as zero until confirmed.
    #[must_use]
    pub fn summary(&self, subtotal: u64) -> OrderSummary {
        OrderSummary::new(subtotal, self.shipping_fee().unwrap_or(0))
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            stage: self.stage.kind(),
        }
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;
