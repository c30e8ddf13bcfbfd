pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::OpenCageClient;
pub use error::GeocodeError;
pub use provider::{GeocodeProvider, GeocodeRequest};
