//! Incremental episode loading.
//!
//! - [`state`]: LoadState and the observable StateChannel
//! - [`request`]: PageRequest and the cacheability rule
//! - [`controller`]: PagingController, one page load with cache fallback
//! - [`feed`]: SessionFactory and the EpisodeFeed pagination driver
//! - [`metrics`]: Prometheus load counters

pub mod controller;
pub mod feed;
pub mod metrics;
pub mod request;
pub mod state;

pub use controller::PagingController;
pub use feed::{EpisodeFeed, SessionFactory};
pub use metrics::{LoadOutcome, PagingMetrics};
pub use request::PageRequest;
pub use state::{LoadState, StateChannel};
