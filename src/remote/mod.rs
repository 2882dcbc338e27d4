//! Remote episode feed.
//!
//! - [`source`]: RemoteSource trait and FetchFailure
//! - [`http`]: reqwest-backed client for the episodes REST API

pub mod http;
pub mod source;

pub use http::HttpRemoteSource;
pub use source::{FetchFailure, RemoteSource};
