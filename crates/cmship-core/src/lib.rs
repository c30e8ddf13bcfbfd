pub mod app_config;
pub mod config;
pub mod geo;
pub mod normalize;
pub mod rates;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{AddressComponents, Coordinates, GeocodeResult};
pub use normalize::normalize_city;
pub use rates::{load_rates, ShippingRates};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rates file {path}: {source}")]
    RatesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rates file: {0}")]
    RatesFileParse(#[from] serde_yaml::Error),

    #[error("invalid rates configuration: {0}")]
    Validation(String),
}
