/*
[INPUT]:  HTTP client configuration and renewal service endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod renewal;
pub mod submission;

pub use error::{RenewalError, Result};

pub use client::{ClientConfig, ClientIdentity, RenewalClient};
