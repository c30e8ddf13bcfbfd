use thiserror::Error;

/// Contract violations when quoting a selected candidate.
///
/// These indicate a caller bug (quoting something that was never a valid
/// suggestion) rather than a runtime condition to recover from.
#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("cannot quote '{address}': candidate has no coordinates")]
    MissingCoordinates { address: String },

    #[error("cannot quote '{address}': coordinates ({lat}, {lng}) are out of range")]
    InvalidCoordinates { address: String, lat: f64, lng: f64 },
}
