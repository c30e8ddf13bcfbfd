//! Provider abstraction the estimator talks to.
//!
//! The trait is object-safe so callers can hold an `Arc<dyn GeocodeProvider>`
//! and swap the HTTP client for a stub in tests.

use std::sync::Arc;

use cmship_core::GeocodeResult;
use futures::future::BoxFuture;

use crate::error::GeocodeError;

/// One forward-geocoding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    /// Free-text query, already trimmed and suffixed with any country hint.
    pub query: String,
    /// ISO 3166-1 alpha-2 code results are restricted to, lowercase.
    pub country_code: Option<String>,
    /// Maximum number of candidates to return.
    pub limit: u32,
}

/// A forward-geocoding backend.
///
/// Implementations must preserve the provider's ordering of candidates.
pub trait GeocodeProvider: Send + Sync {
    fn geocode<'a>(
        &'a self,
        request: &'a GeocodeRequest,
    ) -> BoxFuture<'a, Result<Vec<GeocodeResult>, GeocodeError>>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

impl<P: GeocodeProvider + ?Sized> GeocodeProvider for Arc<P> {
    fn geocode<'a>(
        &'a self,
        request: &'a GeocodeRequest,
    ) -> BoxFuture<'a, Result<Vec<GeocodeResult>, GeocodeError>> {
        (**self).geocode(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
