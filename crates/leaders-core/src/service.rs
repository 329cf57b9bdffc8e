// Caller-facing entry points: leader sets and rendered tables.

use std::sync::Arc;

use chrono::Datelike;

use crate::cache::{CachePolicy, LeaderCache};
use crate::categories::Role;
use crate::compute::{LeaderParams, LeaderSet};
use crate::error::LeadersError;
use crate::fetcher::{StatsSource, REGULAR_SEASON};
use crate::table;

/// Optional request parameters. Unset fields fall back to the current
/// calendar year, the service's default game type, and its default count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderRequest {
    pub year: Option<i32>,
    pub game_type: Option<String>,
    pub count: Option<usize>,
    pub policy: CachePolicy,
}

impl LeaderRequest {
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn game_type(mut self, game_type: impl Into<String>) -> Self {
        self.game_type = Some(game_type.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn refresh(mut self) -> Self {
        self.policy = CachePolicy::Refresh;
        self
    }
}

/// Leaders for one team, backed by a per-process cache.
pub struct Leaders<S> {
    cache: LeaderCache<S>,
    default_game_type: String,
    default_count: usize,
}

impl<S: StatsSource> Leaders<S> {
    pub fn new(source: S, team_id: u32) -> Self {
        Self {
            cache: LeaderCache::new(source, team_id),
            default_game_type: REGULAR_SEASON.to_string(),
            default_count: 1,
        }
    }

    pub fn with_defaults(mut self, game_type: impl Into<String>, count: usize) -> Self {
        self.default_game_type = game_type.into();
        self.default_count = count;
        self
    }

    /// Fill in a request's unset fields.
    pub fn resolve(&self, request: &LeaderRequest) -> LeaderParams {
        LeaderParams {
            year: request
                .year
                .unwrap_or_else(|| chrono::Local::now().year()),
            game_type: request
                .game_type
                .clone()
                .unwrap_or_else(|| self.default_game_type.clone()),
            count: request.count.unwrap_or(self.default_count),
        }
    }

    pub async fn get_leaders(
        &self,
        role: Role,
        request: &LeaderRequest,
    ) -> Result<Arc<LeaderSet>, LeadersError> {
        let params = self.resolve(request);
        self.cache
            .get_with_policy(role, &params, request.policy)
            .await
    }

    /// Render the requested stat keys for `role` as a pipe-delimited table.
    pub async fn render_table<K: AsRef<str>>(
        &self,
        role: Role,
        keys: &[K],
        request: &LeaderRequest,
    ) -> Result<String, LeadersError> {
        let leaders = self.get_leaders(role, request).await?;
        Ok(table::render(&leaders, keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{PlayerRecord, StatsQuery};
    use async_trait::async_trait;

    struct EmptySource;

    #[async_trait]
    impl StatsSource for EmptySource {
        async fn fetch(&self, _query: &StatsQuery) -> Result<Vec<PlayerRecord>, LeadersError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn unset_fields_take_defaults() {
        let leaders = Leaders::new(EmptySource, 119);
        let params = leaders.resolve(&LeaderRequest::default());
        assert_eq!(params.year, chrono::Local::now().year());
        assert_eq!(params.game_type, "R");
        assert_eq!(params.count, 1);
    }

    #[test]
    fn configured_defaults_and_explicit_fields() {
        let leaders = Leaders::new(EmptySource, 119).with_defaults("P", 3);
        let params = leaders.resolve(&LeaderRequest::default().year(2019));
        assert_eq!(params.year, 2019);
        assert_eq!(params.game_type, "P");
        assert_eq!(params.count, 3);

        let params = leaders.resolve(&LeaderRequest::default().game_type("W").count(5));
        assert_eq!(params.game_type, "W");
        assert_eq!(params.count, 5);
    }

    #[tokio::test]
    async fn empty_provider_renders_none_qualified_rows() {
        let leaders = Leaders::new(EmptySource, 119);
        let table = leaders
            .render_table(Role::Hitter, &["hr", "avg"], &LeaderRequest::default().year(2020))
            .await
            .unwrap();
        assert_eq!(
            table,
            "Stat|Player|Total\n-|-|-\nHR|None Qualified|0\nAVG|None Qualified|0\n"
        );
    }
}
