// Season stats fetching from the stats provider.
//
// One request per (season, group, game type, player pool, team). The
// response body is a JSON object whose `stats` array holds one aggregate
// record per player.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::categories::StatGroup;
use crate::error::LeadersError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://bdfed.stitch.mlbinfra.com/bdfed/stats/player";

/// Provider game type code for the regular season.
pub const REGULAR_SEASON: &str = "R";

/// One player's season line, keyed by the provider's field names.
pub type PlayerRecord = Map<String, Value>;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// The provider's `playerPool` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerPool {
    All,
    Qualified,
}

impl PlayerPool {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerPool::All => "ALL",
            PlayerPool::Qualified => "QUALIFIED",
        }
    }
}

/// Parameters for a single season-stats request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub group: StatGroup,
    pub year: i32,
    pub game_type: String,
    pub pool: PlayerPool,
    pub team_id: u32,
}

impl StatsQuery {
    /// Query parameters in the order the provider documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("stitch_env", "prod".to_string()),
            ("season", self.year.to_string()),
            ("group", self.group.as_str().to_string()),
            ("stats", "season".to_string()),
            ("gameType", self.game_type.clone()),
            ("playerPool", self.pool.as_str().to_string()),
            ("teamId", self.team_id.to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// StatsSource trait
// ---------------------------------------------------------------------------

/// Anything that can answer a season-stats query.
///
/// The HTTP implementation is [`HttpStatsSource`]; tests plug in in-memory
/// sources so ranking and caching run without the network.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<PlayerRecord>, LeadersError>;
}

#[async_trait]
impl<S: StatsSource + ?Sized> StatsSource for std::sync::Arc<S> {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<PlayerRecord>, LeadersError> {
        (**self).fetch(query).await
    }
}

// ---------------------------------------------------------------------------
// HttpStatsSource
// ---------------------------------------------------------------------------

/// Fetches season stats over HTTP. Makes exactly one request per call.
pub struct HttpStatsSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStatsSource {
    /// Wrap an already configured client (user agent, timeouts).
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Build a client with the given user agent and timeouts.
    pub fn with_settings(
        base_url: impl Into<String>,
        user_agent: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, LeadersError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(|source| LeadersError::Fetch {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: reqwest::Request) -> Result<String, reqwest::Error> {
        self.http
            .execute(request)
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self, query: &StatsQuery) -> Result<Vec<PlayerRecord>, LeadersError> {
        let request = self
            .http
            .get(&self.base_url)
            .query(&query.params())
            .build()
            .map_err(|source| LeadersError::Fetch {
                url: self.base_url.clone(),
                source,
            })?;
        let url = request.url().to_string();
        debug!(%url, "fetching season stats");

        let body = self
            .send(request)
            .await
            .map_err(|source| LeadersError::Fetch {
                url: url.clone(),
                source,
            })?;

        let records = parse_stats_body(&body).map_err(|source| LeadersError::Parse {
            url: url.clone(),
            source,
        })?;
        debug!(%url, players = records.len(), "season stats received");
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Option<Vec<PlayerRecord>>,
}

/// Extract the `stats` array from a response body. A missing or null
/// `stats` key yields no players rather than an error.
pub fn parse_stats_body(body: &str) -> Result<Vec<PlayerRecord>, serde_json::Error> {
    let response: StatsResponse = serde_json::from_str(body)?;
    Ok(response.stats.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pool: PlayerPool) -> StatsQuery {
        StatsQuery {
            group: StatGroup::Hitting,
            year: 2024,
            game_type: REGULAR_SEASON.to_string(),
            pool,
            team_id: 119,
        }
    }

    #[test]
    fn params_carry_all_five_inputs_and_fixed_markers() {
        let params = query(PlayerPool::Qualified).params();
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("stitch_env"), Some("prod"));
        assert_eq!(get("stats"), Some("season"));
        assert_eq!(get("season"), Some("2024"));
        assert_eq!(get("group"), Some("hitting"));
        assert_eq!(get("gameType"), Some("R"));
        assert_eq!(get("playerPool"), Some("QUALIFIED"));
        assert_eq!(get("teamId"), Some("119"));
    }

    #[test]
    fn built_url_matches_provider_template() {
        let source = HttpStatsSource::new(reqwest::Client::new(), DEFAULT_BASE_URL);
        let request = source
            .http
            .get(source.base_url())
            .query(&query(PlayerPool::All).params())
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://bdfed.stitch.mlbinfra.com/bdfed/stats/player?stitch_env=prod\
             &season=2024&group=hitting&stats=season&gameType=R&playerPool=ALL&teamId=119"
        );
    }

    #[test]
    fn parses_stats_array() {
        let body = r#"{"stats":[
            {"playerInitLastName":"A Smith","homeRuns":31},
            {"playerInitLastName":"B Jones","homeRuns":"12"}
        ]}"#;
        let records = parse_stats_body(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["homeRuns"], Value::from(31));
        assert_eq!(records[1]["playerInitLastName"], Value::from("B Jones"));
    }

    #[test]
    fn missing_or_null_stats_is_empty_not_error() {
        assert!(parse_stats_body("{}").unwrap().is_empty());
        assert!(parse_stats_body(r#"{"stats":null}"#).unwrap().is_empty());
        assert!(parse_stats_body(r#"{"stats":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(parse_stats_body("<html>502 Bad Gateway</html>").is_err());
        assert!(parse_stats_body(r#"{"stats":"nope"}"#).is_err());
    }

    // -- Local HTTP server tests --

    /// Serve one canned response on a local port. The task resolves to the
    /// request line the client sent.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();

            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{addr}/stats"), server)
    }

    fn local_source(base_url: String) -> HttpStatsSource {
        HttpStatsSource::with_settings(
            base_url,
            "leaders-test",
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn pitching_query() -> StatsQuery {
        StatsQuery {
            group: StatGroup::Pitching,
            year: 2023,
            game_type: REGULAR_SEASON.to_string(),
            pool: PlayerPool::Qualified,
            team_id: 119,
        }
    }

    #[tokio::test]
    async fn fetch_sends_one_get_with_every_param() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"stats":[{"playerInitLastName":"C Kershaw","era":"2.46"}]}"#,
        )
        .await;

        let records = local_source(base_url)
            .fetch(&pitching_query())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["playerInitLastName"], Value::from("C Kershaw"));

        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /stats?stitch_env=prod&season=2023&group=pitching&stats=season\
             &gameType=R&playerPool=QUALIFIED&teamId=119 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn error_status_is_a_fetch_error() {
        let (base_url, server) = serve_once("503 Service Unavailable", "").await;

        let err = local_source(base_url.clone())
            .fetch(&pitching_query())
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            LeadersError::Fetch { url, source } => {
                assert!(url.starts_with(&base_url), "{url}");
                assert_eq!(source.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_body_with_ok_status_is_a_parse_error() {
        let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = local_source(base_url)
            .fetch(&pitching_query())
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, LeadersError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn silent_server_hits_the_read_timeout() {
        use tokio::io::AsyncReadExt;
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let source = HttpStatsSource::with_settings(
            format!("http://{addr}/stats"),
            "leaders-test",
            Duration::from_secs(5),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = source.fetch(&pitching_query()).await.unwrap_err();
        server.abort();

        match err {
            LeadersError::Fetch { source, .. } => assert!(source.is_timeout(), "{source:?}"),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_source(format!("http://{addr}/stats"))
            .fetch(&pitching_query())
            .await
            .unwrap_err();
        assert!(matches!(err, LeadersError::Fetch { .. }), "{err:?}");
    }
}
