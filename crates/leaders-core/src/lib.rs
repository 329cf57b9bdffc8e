// League leaders for a team's sidebar: fetch season stats, rank each
// category, memoize per request, and render a compact table.

pub mod cache;
pub mod categories;
pub mod compute;
pub mod error;
pub mod fetcher;
pub mod ranking;
pub mod service;
pub mod table;

pub use cache::{CacheKey, CachePolicy, LeaderCache};
pub use categories::Role;
pub use compute::{LeaderParams, LeaderSet};
pub use error::LeadersError;
pub use fetcher::{HttpStatsSource, PlayerRecord, StatsQuery, StatsSource};
pub use ranking::{LeaderEntry, LeaderValue};
pub use service::{LeaderRequest, Leaders};
