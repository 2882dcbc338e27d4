//! Domain types for the episode feed.
//!
//! - [`episode`]: Episode, the date-keyed paginated record
//! - [`search`]: SearchQuery, the filter narrowing the remote result set

pub mod episode;
pub mod search;

pub use episode::Episode;
pub use search::SearchQuery;
