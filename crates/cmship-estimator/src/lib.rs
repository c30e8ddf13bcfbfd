//! Shipping-fee estimation for storefront checkout.
//!
//! [`LocationLookup`] turns shopper text into geocoding candidates,
//! [`LookupSession`] debounces it and drops stale answers, and
//! [`ShippingEstimator`] quotes a selected candidate.

pub mod error;
pub mod estimator;
pub mod geo;
pub mod lookup;
pub mod quote;
pub mod session;

pub use error::EstimateError;
pub use estimator::ShippingEstimator;
pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use lookup::{build_query, LocationLookup, LookupNotice, LookupOutcome, LookupSettings};
pub use quote::{RateBasis, ShippingQuote};
pub use session::{LookupSession, Suggestions};
