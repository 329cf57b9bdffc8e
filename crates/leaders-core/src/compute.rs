// Computing a role's full leader set.
//
// Fetches the all-players and qualified pools for the role's stat group,
// then ranks every category in the role's table against its declared pool.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::categories::{Role, SourcePool};
use crate::error::LeadersError;
use crate::fetcher::{PlayerPool, PlayerRecord, StatsQuery, StatsSource};
use crate::ranking::{rank_top, LeaderEntry};

// ---------------------------------------------------------------------------
// LeaderSet
// ---------------------------------------------------------------------------

/// Ranked leaders per stat key for one (role, year, game type, count).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeaderSet {
    categories: BTreeMap<String, Vec<LeaderEntry>>,
}

impl LeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, leaders: Vec<LeaderEntry>) {
        self.categories.insert(key.into(), leaders);
    }

    /// Leaders for `key`, best first.
    pub fn get(&self, key: &str) -> Option<&[LeaderEntry]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// The rank-1 leader for `key`, if any.
    pub fn top(&self, key: &str) -> Option<&LeaderEntry> {
        self.get(key).and_then(|leaders| leaders.first())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Fully resolved parameters of a leaders computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderParams {
    pub year: i32,
    pub game_type: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// compute
// ---------------------------------------------------------------------------

/// Fetch both pools for `role` and rank every one of its categories.
///
/// Issues exactly two fetches, all-players first. Fetch or parse failures
/// propagate; empty pools do not.
pub async fn compute<S>(
    source: &S,
    team_id: u32,
    role: Role,
    params: &LeaderParams,
) -> Result<LeaderSet, LeadersError>
where
    S: StatsSource + ?Sized,
{
    info!(
        %role,
        year = params.year,
        game_type = %params.game_type,
        count = params.count,
        "computing leaders"
    );

    let query = |pool| StatsQuery {
        group: role.group(),
        year: params.year,
        game_type: params.game_type.clone(),
        pool,
        team_id,
    };
    let all = source.fetch(&query(PlayerPool::All)).await?;
    let qualified = source.fetch(&query(PlayerPool::Qualified)).await?;

    Ok(rank_categories(role, &all, &qualified, params.count))
}

/// Rank every category of `role` against already fetched pools.
pub fn rank_categories(
    role: Role,
    all: &[PlayerRecord],
    qualified: &[PlayerRecord],
    count: usize,
) -> LeaderSet {
    let mut set = LeaderSet::new();
    for category in role.categories() {
        let pool = match category.pool {
            SourcePool::All => all,
            SourcePool::Qualified => qualified,
        };
        let leaders = rank_top(
            category.key,
            Some(pool),
            category.direction,
            count,
            category.cast,
        );
        if leaders.first().is_some_and(LeaderEntry::is_none_qualified) {
            warn!(%role, key = category.key, "no qualified players");
        }
        set.insert(category.key, leaders);
    }
    set
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
