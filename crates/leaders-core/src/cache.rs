// Per-process memoization of leader sets.
//
// Entries are keyed by (role, year, game type, count) and never expire.
// Season stats for a finished (year, game type) don't change, so reuse is the
// default; callers that need live numbers for an in-progress season ask for
// `CachePolicy::Refresh`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::categories::Role;
use crate::compute::{compute, LeaderParams, LeaderSet};
use crate::error::LeadersError;
use crate::fetcher::StatsSource;

/// Identity of a cached leader set. All four fields take part in equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub role: Role,
    pub year: i32,
    pub game_type: String,
    pub count: usize,
}

impl CacheKey {
    pub fn new(role: Role, params: &LeaderParams) -> Self {
        Self {
            role,
            year: params.year,
            game_type: params.game_type.clone(),
            count: params.count,
        }
    }
}

/// Whether a lookup may reuse a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Return the stored set if there is one, computing it otherwise.
    #[default]
    Reuse,
    /// Recompute and replace whatever is stored.
    Refresh,
}

/// Memoizing front for [`compute`].
///
/// One lock covers the whole map and is held while a missing entry is
/// computed, so concurrent callers asking for the same key wait for the
/// first computation instead of fetching again.
pub struct LeaderCache<S> {
    source: S,
    team_id: u32,
    entries: Mutex<HashMap<CacheKey, Arc<LeaderSet>>>,
}

impl<S: StatsSource> LeaderCache<S> {
    pub fn new(source: S, team_id: u32) -> Self {
        Self {
            source,
            team_id,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Leader set for `role` and `params`, computed at most once per key
    /// under [`CachePolicy::Reuse`].
    pub async fn get(
        &self,
        role: Role,
        params: &LeaderParams,
    ) -> Result<Arc<LeaderSet>, LeadersError> {
        self.get_with_policy(role, params, CachePolicy::Reuse).await
    }

    pub async fn get_with_policy(
        &self,
        role: Role,
        params: &LeaderParams,
        policy: CachePolicy,
    ) -> Result<Arc<LeaderSet>, LeadersError> {
        let key = CacheKey::new(role, params);
        let mut entries = self.entries.lock().await;

        if policy == CachePolicy::Reuse {
            if let Some(set) = entries.get(&key) {
                debug!(?key, "leader cache hit");
                return Ok(Arc::clone(set));
            }
        }

        info!(?key, ?policy, "leader cache miss");
        let set = Arc::new(compute(&self.source, self.team_id, role, params).await?);
        entries.insert(key, Arc::clone(&set));
        Ok(set)
    }

    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
