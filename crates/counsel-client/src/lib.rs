//! HTTP-speaking layer: the `reqwest` implementation of the API seams defined
//! in `counsel-core`, plus environment-driven configuration.

pub mod config;
pub mod rest;

pub use config::ClientConfig;
pub use rest::RestClient;
