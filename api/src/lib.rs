pub mod client;
pub mod live;
pub mod stats;
pub mod teams;

use crate::client::ApiResult;
use async_trait::async_trait;
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Domain types, independent of the NBA wire formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRef {
    pub id: u32,
    pub full_name: String,
    pub last_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRef {
    pub id: u32,
    pub full_name: String,    // "Portland Trail Blazers"
    pub nickname: String,     // "Trail Blazers"
    pub abbreviation: String, // "POR"
}

/// Which slice of a player's career a stats table covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeasonType {
    #[default]
    Regular,
    Playoffs,
    AllStar,
    College,
}

impl SeasonType {
    /// Parse the optional leading keyword of career/season commands.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "playoffs" => Some(SeasonType::Playoffs),
            "all-star" => Some(SeasonType::AllStar),
            "college" => Some(SeasonType::College),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerProfile {
    pub info: PlayerInfo,
    pub headline: Option<HeadlineStats>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerInfo {
    pub display_name: String,
    pub birthdate: String, // "1988-03-14T00:00:00"
    pub team_id: u32,
    pub team_name: String,
    pub position: String,
    pub jersey: String,
    pub height: String,
    pub weight: String,
    pub school: String,
    pub draft_year: String, // year or "Undrafted"
    pub draft_round: String,
    pub draft_number: String,
    pub from_year: Option<u16>,
    pub to_year: Option<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlineStats {
    pub time_frame: String,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
}

/// One row of a totals table: a single season, or a whole career when
/// `season_id` is absent.
#[derive(Debug, Clone, Default)]
pub struct SeasonTotals {
    pub season_id: Option<String>,
    pub team_abbreviation: Option<String>,
    pub school_name: Option<String>,
    pub gp: f64,
    pub gs: f64,
    pub min: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fg3m: f64,
    pub fg3a: f64,
    pub ftm: f64,
    pub fta: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub pts: f64,
}

/// League rank per stat for one season. `None` means not ranked.
#[derive(Debug, Clone, Default)]
pub struct SeasonRanks {
    pub season_id: Option<String>,
    pub team_abbreviation: Option<String>,
    pub ranks: Vec<(&'static str, Option<u32>)>,
}

#[derive(Debug, Clone, Default)]
pub struct CareerStats {
    pub season_totals: Vec<(SeasonType, Vec<SeasonTotals>)>,
    pub career_totals: Vec<(SeasonType, Vec<SeasonTotals>)>,
    pub regular_season_ranks: Vec<SeasonRanks>,
    pub post_season_ranks: Vec<SeasonRanks>,
}

impl CareerStats {
    pub fn seasons(&self, kind: SeasonType) -> &[SeasonTotals] {
        lookup(&self.season_totals, kind)
    }

    pub fn career(&self, kind: SeasonType) -> &[SeasonTotals] {
        lookup(&self.career_totals, kind)
    }

    /// Rankings only exist for the regular season and playoffs.
    pub fn ranks(&self, kind: SeasonType) -> &[SeasonRanks] {
        match kind {
            SeasonType::Playoffs => &self.post_season_ranks,
            _ => &self.regular_season_ranks,
        }
    }
}

fn lookup(tables: &[(SeasonType, Vec<SeasonTotals>)], kind: SeasonType) -> &[SeasonTotals] {
    tables
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, rows)| rows.as_slice())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct PlayerGameLog {
    pub player_name: String,
    pub game_date: String, // "2021-11-23T00:00:00"
    pub matchup: String,   // "POR vs. LAL" / "POR @ LAL"
    pub wl: String,
    pub min: f64,
    pub pts: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fg3m: f64,
    pub fg3a: f64,
    pub ftm: f64,
    pub fta: f64,
    pub oreb: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub plus_minus: f64,
}

/// Filters for a player game-log request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLogQuery {
    pub season: String,
    pub last_n: Option<u32>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamGameLog {
    pub game_date: String,
    pub matchup: String,
    pub wl: String,
    pub pts: f64,
    pub plus_minus: f64,
}

impl TeamGameLog {
    /// `plus_minus` is the game's margin from this team's side.
    pub fn opponent_points(&self) -> f64 {
        self.pts - self.plus_minus
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamDetails {
    pub arena: String,
    pub arena_capacity: Option<u32>,
    pub owner: String,
    pub general_manager: String,
    pub head_coach: String,
    pub history: Vec<TeamEra>,
    pub championships: Vec<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamEra {
    pub city: String,
    pub nickname: String,
    pub year_founded: u16,
    pub year_active_till: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub coaches: Vec<Coach>,
    pub players: Vec<RosterPlayer>,
}

#[derive(Debug, Clone, Default)]
pub struct Coach {
    pub name: String,
    pub is_head_coach: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RosterPlayer {
    pub number: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct StandingsRow {
    pub team_id: u32,
    pub team_name: String,
    pub conference: String, // "East" | "West"
    pub wins: u16,
    pub losses: u16,
    pub win_pct: f64,
    pub streak: Option<String>, // "W 3"
    pub last_ten: String,
    pub conference_record: String,
    pub home: String,
    pub road: String,
    pub playoff_rank: u16,
}

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    pub games: Vec<GameHeader>,
    pub line_scores: Vec<LineScore>,
}

/// Status ids: 1 scheduled, 2 in progress, 3 final.
#[derive(Debug, Clone, Default)]
pub struct GameHeader {
    pub game_id: String,
    pub game_date: String,
    pub status_id: u8,
    pub status_text: String,
    pub home_team_id: u32,
    pub visitor_team_id: u32,
    pub national_tv: Option<String>,
}

impl GameHeader {
    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.visitor_team_id == team_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineScore {
    pub game_id: String,
    pub game_date: String,
    pub team_abbreviation: String,
    pub pts: Option<u16>,
}

/// An entry of the real-time scoreboard.
#[derive(Debug, Clone, Default)]
pub struct LiveGame {
    pub game_id: String,
    pub status: u8,
    pub status_text: String,
    pub home: LiveTeamScore,
    pub away: LiveTeamScore,
    pub home_leader: GameLeader,
    pub away_leader: GameLeader,
}

#[derive(Debug, Clone, Default)]
pub struct LiveTeamScore {
    pub tricode: String,
    pub score: u16,
}

#[derive(Debug, Clone, Default)]
pub struct GameLeader {
    pub person_id: u32,
    pub points: u16,
    pub rebounds: u16,
    pub assists: u16,
}

#[derive(Debug, Clone, Default)]
pub struct LiveBoxScore {
    pub game_id: String,
    pub status_text: String,
    pub home_players: Vec<LivePlayerLine>,
    pub away_players: Vec<LivePlayerLine>,
}

#[derive(Debug, Clone, Default)]
pub struct LivePlayerLine {
    pub person_id: u32,
    pub name: String,
    pub points: u16,
    pub fgm: u16,
    pub fga: u16,
    pub ftm: u16,
    pub fta: u16,
    pub fg3m: u16,
    pub fg3a: u16,
    pub reb: u16,
    pub oreb: u16,
    pub ast: u16,
    pub blk: u16,
    pub stl: u16,
    pub tov: u16,
    pub pf: u16,
    pub minutes: String, // ISO-8601 duration, "PT24M"
    pub plus_minus: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PlayAction {
    pub period: u8,
    pub clock: String, // "PT08M17.00S"
    pub description: Option<String>,
    pub score_home: String,
    pub score_away: String,
}

#[derive(Debug, Clone, Default)]
pub struct WinProbabilityPoint {
    pub home_pct: Option<f64>,
    pub visitor_pct: Option<f64>,
    pub home_pts: Option<u16>,
    pub visitor_pts: Option<u16>,
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// A request/response source of basketball statistics. Missing rows come back
/// as empty collections, never as errors.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Case-insensitive substring search over full names, provider order.
    async fn find_players(&self, name: &str) -> ApiResult<Vec<PlayerRef>>;
    async fn player_by_id(&self, id: u32) -> ApiResult<Option<PlayerRef>>;
    async fn find_teams(&self, name: &str) -> ApiResult<Vec<TeamRef>>;
    async fn team_by_id(&self, id: u32) -> ApiResult<Option<TeamRef>>;

    async fn player_profile(&self, player_id: u32) -> ApiResult<PlayerProfile>;
    async fn career_stats(&self, player_id: u32) -> ApiResult<CareerStats>;
    async fn player_game_logs(
        &self,
        player_id: u32,
        query: &GameLogQuery,
    ) -> ApiResult<Vec<PlayerGameLog>>;

    async fn team_game_logs(
        &self,
        team_id: u32,
        season: &str,
        last_n: Option<u32>,
    ) -> ApiResult<Vec<TeamGameLog>>;
    /// Every regular-season game the team played in `season`.
    async fn team_games_vs_league(&self, team_id: u32, season: &str) -> ApiResult<Vec<TeamGameLog>>;
    async fn team_details(&self, team_id: u32) -> ApiResult<TeamDetails>;
    async fn team_roster(&self, team_id: u32, season: &str) -> ApiResult<Roster>;
    async fn standings(&self, season: &str) -> ApiResult<Vec<StandingsRow>>;

    /// Game headers and line scores for the slate of `date`.
    async fn scoreboard(&self, date: NaiveDate) -> ApiResult<Scoreboard>;
    async fn live_scoreboard(&self) -> ApiResult<Vec<LiveGame>>;
    async fn live_box_score(&self, game_id: &str) -> ApiResult<LiveBoxScore>;
    async fn play_by_play(&self, game_id: &str) -> ApiResult<Vec<PlayAction>>;
    async fn win_probability(&self, game_id: &str) -> ApiResult<Vec<WinProbabilityPoint>>;
}
