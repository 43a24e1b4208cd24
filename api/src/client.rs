use crate::live::{GameEnvelope, ScoreboardEnvelope, WireGame, WirePlayByPlay, map_box_score};
use crate::stats::{
    AllPlayersRow, ChampionshipRow, CoachRow, CommonPlayerInfoRow, GameHeaderRow, GameLogRow,
    HeadlineStatsRow, LineScoreRow, RanksRow, RosterRow, StandingsWireRow, StatsResponse,
    TeamBackgroundRow, TeamHistoryRow, TotalsRow, WinProbRow,
};
use crate::{
    CareerStats, GameLogQuery, LiveBoxScore, LiveGame, PlayAction, PlayerGameLog, PlayerProfile,
    PlayerRef, Roster, Scoreboard, SeasonType, StandingsRow, StatsProvider,
    TeamDetails, TeamGameLog, TeamRef, WinProbabilityPoint, teams,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

pub type ApiResult<T> = Result<T, ApiError>;

const STATS_BASE: &str = "https://stats.nba.com/stats";
const LIVE_BASE: &str = "https://cdn.nba.com/static/json/liveData";
const LEAGUE_ID: &str = "00";
const REGULAR_SEASON: &str = "Regular Season";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// NBA stats client backed by stats.nba.com tables and the cdn.nba.com live feeds.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    stats_base: String,
    live_base: String,
    players: Arc<OnceCell<Vec<PlayerRef>>>,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::with_base_urls(STATS_BASE, LIVE_BASE)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Decode(serde_json::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Decode(e, table) => write!(f, "Unexpected row in {table}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at other hosts; tests use this with a mock server.
    pub fn with_base_urls(stats_base: &str, live_base: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Referer", HeaderValue::from_static("https://www.nba.com/"));
        headers.insert("Origin", HeaderValue::from_static("https://www.nba.com"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            stats_base: stats_base.trim_end_matches('/').to_owned(),
            live_base: live_base.trim_end_matches('/').to_owned(),
            players: Arc::new(OnceCell::new()),
        }
    }

    /// Every player who has appeared in the league, fetched once per process.
    async fn player_index(&self) -> ApiResult<&[PlayerRef]> {
        let players = self
            .players
            .get_or_try_init(|| async {
                let season = current_season_label(Utc::now());
                let resp = self
                    .stats(
                        "commonallplayers",
                        &[
                            ("LeagueID", LEAGUE_ID.into()),
                            ("Season", season),
                            ("IsOnlyCurrentSeason", "0".into()),
                        ],
                    )
                    .await?;
                let rows: Vec<AllPlayersRow> = table(&resp, "CommonAllPlayers")?;
                log::debug!("loaded player index with {} entries", rows.len());
                Ok::<_, ApiError>(rows.into_iter().map(PlayerRef::from).collect())
            })
            .await?;
        Ok(players.as_slice())
    }

    async fn stats(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<StatsResponse> {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}/{endpoint}?{query}", self.stats_base);
        self.get(&url).await
    }

    async fn get<T: Default + DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

fn table<T: DeserializeOwned>(resp: &StatsResponse, name: &str) -> ApiResult<Vec<T>> {
    resp.table(name).map_err(|e| ApiError::Decode(e, name.to_owned()))
}

/// Decode a table straight into its domain type.
fn rows<W, T>(resp: &StatsResponse, name: &str) -> ApiResult<Vec<T>>
where
    W: DeserializeOwned + Into<T>,
{
    Ok(table::<W>(resp, name)?.into_iter().map(Into::into).collect())
}

#[async_trait]
impl StatsProvider for NbaApi {
    async fn find_players(&self, name: &str) -> ApiResult<Vec<PlayerRef>> {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let index = self.player_index().await?;
        Ok(index
            .iter()
            .filter(|p| p.full_name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn player_by_id(&self, id: u32) -> ApiResult<Option<PlayerRef>> {
        let index = self.player_index().await?;
        Ok(index.iter().find(|p| p.id == id).cloned())
    }

    async fn find_teams(&self, name: &str) -> ApiResult<Vec<TeamRef>> {
        Ok(teams::find_teams(name))
    }

    async fn team_by_id(&self, id: u32) -> ApiResult<Option<TeamRef>> {
        Ok(teams::team_by_id(id))
    }

    async fn player_profile(&self, player_id: u32) -> ApiResult<PlayerProfile> {
        let resp = self
            .stats("commonplayerinfo", &[("PlayerID", player_id.to_string())])
            .await?;
        let info = table::<CommonPlayerInfoRow>(&resp, "CommonPlayerInfo")?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("no player info for {player_id}")))?;
        let headline = rows::<HeadlineStatsRow, _>(&resp, "PlayerHeadlineStats")?
            .into_iter()
            .next();
        Ok(PlayerProfile { info: info.into(), headline })
    }

    async fn career_stats(&self, player_id: u32) -> ApiResult<CareerStats> {
        let resp = self
            .stats(
                "playercareerstats",
                &[("PlayerID", player_id.to_string()), ("PerMode", "Totals".into())],
            )
            .await?;

        let kinds = [
            (SeasonType::Regular, "RegularSeason"),
            (SeasonType::Playoffs, "PostSeason"),
            (SeasonType::AllStar, "AllStarSeason"),
            (SeasonType::College, "CollegeSeason"),
        ];
        let mut stats = CareerStats::default();
        for (kind, suffix) in kinds {
            let seasons = rows::<TotalsRow, _>(&resp, &format!("SeasonTotals{suffix}"))?;
            let career = rows::<TotalsRow, _>(&resp, &format!("CareerTotals{suffix}"))?;
            stats.season_totals.push((kind, seasons));
            stats.career_totals.push((kind, career));
        }
        stats.regular_season_ranks = rows::<RanksRow, _>(&resp, "SeasonRankingsRegularSeason")?;
        stats.post_season_ranks = rows::<RanksRow, _>(&resp, "SeasonRankingsPostSeason")?;
        Ok(stats)
    }

    async fn player_game_logs(
        &self,
        player_id: u32,
        query: &GameLogQuery,
    ) -> ApiResult<Vec<PlayerGameLog>> {
        let mut params = vec![
            ("PlayerID", player_id.to_string()),
            ("Season", query.season.clone()),
            ("SeasonType", REGULAR_SEASON.into()),
        ];
        if let Some(n) = query.last_n {
            params.push(("LastNGames", n.to_string()));
        }
        if let Some(date) = query.date {
            let date = date.format("%m/%d/%Y").to_string();
            params.push(("DateFrom", date.clone()));
            params.push(("DateTo", date));
        }
        let resp = self.stats("playergamelogs", &params).await?;
        rows::<GameLogRow, _>(&resp, "PlayerGameLogs")
    }

    async fn team_game_logs(
        &self,
        team_id: u32,
        season: &str,
        last_n: Option<u32>,
    ) -> ApiResult<Vec<TeamGameLog>> {
        let mut params = vec![
            ("TeamID", team_id.to_string()),
            ("Season", season.to_owned()),
            ("SeasonType", REGULAR_SEASON.into()),
        ];
        if let Some(n) = last_n {
            params.push(("LastNGames", n.to_string()));
        }
        let resp = self.stats("teamgamelogs", &params).await?;
        rows::<GameLogRow, _>(&resp, "TeamGameLogs")
    }

    async fn team_games_vs_league(&self, team_id: u32, season: &str) -> ApiResult<Vec<TeamGameLog>> {
        let resp = self
            .stats(
                "leaguegamefinder",
                &[
                    ("PlayerOrTeam", "T".into()),
                    ("LeagueID", LEAGUE_ID.into()),
                    ("TeamID", team_id.to_string()),
                    ("Season", season.to_owned()),
                    ("SeasonType", REGULAR_SEASON.into()),
                ],
            )
            .await?;
        rows::<GameLogRow, _>(&resp, "LeagueGameFinderResults")
    }

    async fn team_details(&self, team_id: u32) -> ApiResult<TeamDetails> {
        let resp = self.stats("teamdetails", &[("TeamID", team_id.to_string())]).await?;
        let background = table::<TeamBackgroundRow>(&resp, "TeamBackground")?
            .into_iter()
            .next()
            .unwrap_or_default();
        let history = rows::<TeamHistoryRow, _>(&resp, "TeamHistory")?;
        let championships = table::<ChampionshipRow>(&resp, "TeamAwardsChampionships")?
            .into_iter()
            .filter_map(|c| c.year_awarded)
            .map(|y| y as u16)
            .collect();
        Ok(TeamDetails {
            arena: background.arena,
            arena_capacity: background.arena_capacity.filter(|c| *c > 0),
            owner: background.owner,
            general_manager: background.general_manager,
            head_coach: background.head_coach,
            history,
            championships,
        })
    }

    async fn team_roster(&self, team_id: u32, season: &str) -> ApiResult<Roster> {
        let resp = self
            .stats(
                "commonteamroster",
                &[("TeamID", team_id.to_string()), ("Season", season.to_owned())],
            )
            .await?;
        Ok(Roster {
            coaches: rows::<CoachRow, _>(&resp, "Coaches")?,
            players: rows::<RosterRow, _>(&resp, "CommonTeamRoster")?,
        })
    }

    async fn standings(&self, season: &str) -> ApiResult<Vec<StandingsRow>> {
        let resp = self
            .stats(
                "leaguestandingsv3",
                &[
                    ("LeagueID", LEAGUE_ID.into()),
                    ("Season", season.to_owned()),
                    ("SeasonType", REGULAR_SEASON.into()),
                ],
            )
            .await?;
        rows::<StandingsWireRow, _>(&resp, "Standings")
    }

    async fn scoreboard(&self, date: NaiveDate) -> ApiResult<Scoreboard> {
        let params = [
            ("LeagueID", LEAGUE_ID.to_owned()),
            ("GameDate", date.format("%m/%d/%Y").to_string()),
            ("DayOffset", "0".to_owned()),
        ];
        let resp = self.stats("scoreboardv2", &params).await?;
        Ok(Scoreboard {
            games: rows::<GameHeaderRow, _>(&resp, "GameHeader")?,
            line_scores: rows::<LineScoreRow, _>(&resp, "LineScore")?,
        })
    }

    async fn live_scoreboard(&self) -> ApiResult<Vec<LiveGame>> {
        let url = format!("{}/scoreboard/todaysScoreboard_{LEAGUE_ID}.json", self.live_base);
        let raw: ScoreboardEnvelope = self.get(&url).await?;
        Ok(raw.scoreboard.games.into_iter().map(Into::into).collect())
    }

    async fn live_box_score(&self, game_id: &str) -> ApiResult<LiveBoxScore> {
        let url = format!("{}/boxscore/boxscore_{game_id}.json", self.live_base);
        let raw: GameEnvelope<WireGame> = self.get(&url).await?;
        Ok(map_box_score(raw.game))
    }

    async fn play_by_play(&self, game_id: &str) -> ApiResult<Vec<PlayAction>> {
        let url = format!("{}/playbyplay/playbyplay_{game_id}.json", self.live_base);
        let raw: GameEnvelope<WirePlayByPlay> = self.get(&url).await?;
        Ok(raw.game.actions.into_iter().map(Into::into).collect())
    }

    async fn win_probability(&self, game_id: &str) -> ApiResult<Vec<WinProbabilityPoint>> {
        let resp = self
            .stats(
                "winprobabilitypbp",
                &[("GameID", game_id.to_owned()), ("RunType", "each second".into())],
            )
            .await?;
        rows::<WinProbRow, _>(&resp, "WinProbPBP")
    }
}

/// Season label ("2021-22") for the season in progress at `now`. A season
/// opens in the fall, so January through June belong to the previous year's season.
fn current_season_label(now: DateTime<Utc>) -> String {
    let start = if now.month() < 7 { now.year() - 1 } else { now.year() };
    format!("{start}-{:02}", (start + 1) % 100)
}
