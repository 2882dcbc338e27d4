//! episode-pager: cursor-paginated episode loading with offline fallback.
//!
//! Pages of episodes are fetched forward from a remote feed, newest first.
//! The first page of the unfiltered feed is kept in a local cache so that
//! an unreachable network still yields something to show:
//!   remote feed (fresh) → first-page cache (stale) → error state
//!
//! Load progress is reported through observable state channels rather than
//! return values; the load entry points never fail.

pub mod cache;
pub mod config;
pub mod model;
pub mod paging;
pub mod remote;
