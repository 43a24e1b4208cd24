/// Wire types for the stats.nba.com table endpoints.
/// Every endpoint answers `{"resultSets": [{"name", "headers", "rowSet"}]}`;
/// rows are zipped with their headers and decoded into the structs below,
/// which map to our clean domain types via the From impls at the bottom.
use crate::{
    Coach, GameHeader, HeadlineStats, LineScore, PlayerGameLog, PlayerInfo, PlayerRef,
    RosterPlayer, SeasonRanks, SeasonTotals, StandingsRow, TeamEra, TeamGameLog,
    WinProbabilityPoint,
};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub result_sets: Vec<ResultSet>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub name: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub row_set: Vec<Vec<Value>>,
}

impl StatsResponse {
    /// Decode the named table. A table the response doesn't carry is empty.
    pub fn table<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, serde_json::Error> {
        let Some(set) = self.result_sets.iter().find(|s| s.name == name) else {
            return Ok(Vec::new());
        };
        set.row_set
            .iter()
            .map(|row| {
                let record: Map<String, Value> =
                    set.headers.iter().cloned().zip(row.iter().cloned()).collect();
                serde_json::from_value(Value::Object(record))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Lenient scalars: the tables mix numbers, numeric strings, "NR" and null
// ---------------------------------------------------------------------------

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(number).unwrap_or_default())
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(number)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

// ---------------------------------------------------------------------------
// commonallplayers
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
pub struct AllPlayersRow {
    #[serde(rename = "PERSON_ID", default, deserialize_with = "lenient_u32")]
    pub person_id: Option<u32>,
    #[serde(rename = "DISPLAY_FIRST_LAST", default, deserialize_with = "lenient_string")]
    pub display_first_last: String,
    #[serde(rename = "DISPLAY_LAST_COMMA_FIRST", default, deserialize_with = "lenient_string")]
    pub display_last_comma_first: String,
    #[serde(rename = "ROSTERSTATUS", default, deserialize_with = "lenient_f64")]
    pub roster_status: f64,
}

impl From<AllPlayersRow> for PlayerRef {
    fn from(row: AllPlayersRow) -> Self {
        let last_name = match row.display_last_comma_first.split_once(',') {
            Some((last, _)) => last.trim().to_owned(),
            None => row.display_last_comma_first.trim().to_owned(),
        };
        PlayerRef {
            id: row.person_id.unwrap_or_default(),
            full_name: row.display_first_last,
            last_name,
            is_active: row.roster_status >= 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// commonplayerinfo
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CommonPlayerInfoRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_first_last: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub birthdate: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub team_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub jersey: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub draft_year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub draft_round: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub draft_number: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub from_year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub to_year: Option<u32>,
}

impl From<CommonPlayerInfoRow> for PlayerInfo {
    fn from(row: CommonPlayerInfoRow) -> Self {
        PlayerInfo {
            display_name: row.display_first_last,
            birthdate: row.birthdate,
            team_id: row.team_id.unwrap_or_default(),
            team_name: row.team_name,
            position: row.position,
            jersey: row.jersey,
            height: row.height,
            weight: row.weight,
            school: row.school,
            draft_year: row.draft_year,
            draft_round: row.draft_round,
            draft_number: row.draft_number,
            from_year: row.from_year.filter(|y| *y > 0).map(|y| y as u16),
            to_year: row.to_year.filter(|y| *y > 0).map(|y| y as u16),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct HeadlineStatsRow {
    #[serde(rename = "TimeFrame", default, deserialize_with = "lenient_string")]
    pub time_frame: String,
    #[serde(rename = "PTS", default, deserialize_with = "lenient_f64")]
    pub pts: f64,
    #[serde(rename = "AST", default, deserialize_with = "lenient_f64")]
    pub ast: f64,
    #[serde(rename = "REB", default, deserialize_with = "lenient_f64")]
    pub reb: f64,
}

impl From<HeadlineStatsRow> for HeadlineStats {
    fn from(row: HeadlineStatsRow) -> Self {
        HeadlineStats { time_frame: row.time_frame, pts: row.pts, ast: row.ast, reb: row.reb }
    }
}

// ---------------------------------------------------------------------------
// playercareerstats
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TotalsRow {
    #[serde(default)]
    pub season_id: Option<String>,
    #[serde(default)]
    pub team_abbreviation: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gp: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gs: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fgm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fga: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fg3m: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fg3a: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ftm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fta: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reb: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ast: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub blk: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tov: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pf: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pts: f64,
}

impl From<TotalsRow> for SeasonTotals {
    fn from(row: TotalsRow) -> Self {
        SeasonTotals {
            season_id: row.season_id,
            team_abbreviation: row.team_abbreviation,
            school_name: row.school_name,
            gp: row.gp,
            gs: row.gs,
            min: row.min,
            fgm: row.fgm,
            fga: row.fga,
            fg3m: row.fg3m,
            fg3a: row.fg3a,
            ftm: row.ftm,
            fta: row.fta,
            reb: row.reb,
            ast: row.ast,
            stl: row.stl,
            blk: row.blk,
            tov: row.tov,
            pf: row.pf,
            pts: row.pts,
        }
    }
}

/// Stats a rankings table carries, in display order.
pub const RANKED_STATS: [&str; 16] = [
    "PTS", "FGM", "FGA", "FG_PCT", "FTM", "FTA", "FT_PCT", "FG3M", "FG3A", "FG3_PCT", "REB",
    "AST", "BLK", "STL", "TOV", "EFF",
];

/// Rankings rows are kept loose: columns are `RANK_<STAT>` and hold either a
/// number or "NR".
#[derive(Deserialize, Debug, Default)]
pub struct RanksRow {
    #[serde(rename = "SEASON_ID", default)]
    pub season_id: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    pub team_abbreviation: Option<String>,
    #[serde(flatten)]
    pub columns: Map<String, Value>,
}

impl From<RanksRow> for SeasonRanks {
    fn from(row: RanksRow) -> Self {
        let ranks = RANKED_STATS
            .iter()
            .map(|stat| {
                let rank = row
                    .columns
                    .get(&format!("RANK_{stat}"))
                    .and_then(number)
                    .filter(|n| *n > 0.0)
                    .map(|n| n as u32);
                (*stat, rank)
            })
            .collect();
        SeasonRanks { season_id: row.season_id, team_abbreviation: row.team_abbreviation, ranks }
    }
}

// ---------------------------------------------------------------------------
// playergamelogs / teamgamelogs / leaguegamefinder
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GameLogRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub player_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub matchup: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub wl: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pts: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fgm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fga: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fg3m: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fg3a: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ftm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fta: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub oreb: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reb: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ast: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub blk: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tov: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pf: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub plus_minus: f64,
}

impl From<GameLogRow> for PlayerGameLog {
    fn from(row: GameLogRow) -> Self {
        PlayerGameLog {
            player_name: row.player_name,
            game_date: row.game_date,
            matchup: row.matchup,
            wl: row.wl,
            min: row.min,
            pts: row.pts,
            fgm: row.fgm,
            fga: row.fga,
            fg3m: row.fg3m,
            fg3a: row.fg3a,
            ftm: row.ftm,
            fta: row.fta,
            oreb: row.oreb,
            reb: row.reb,
            ast: row.ast,
            stl: row.stl,
            blk: row.blk,
            tov: row.tov,
            pf: row.pf,
            plus_minus: row.plus_minus,
        }
    }
}

impl From<GameLogRow> for TeamGameLog {
    fn from(row: GameLogRow) -> Self {
        TeamGameLog {
            game_date: row.game_date,
            matchup: row.matchup,
            wl: row.wl,
            pts: row.pts,
            plus_minus: row.plus_minus,
        }
    }
}

// ---------------------------------------------------------------------------
// teamdetails
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TeamBackgroundRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub arena: String,
    #[serde(rename = "ARENACAPACITY", default, deserialize_with = "lenient_u32")]
    pub arena_capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner: String,
    #[serde(rename = "GENERALMANAGER", default, deserialize_with = "lenient_string")]
    pub general_manager: String,
    #[serde(rename = "HEADCOACH", default, deserialize_with = "lenient_string")]
    pub head_coach: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct TeamHistoryRow {
    #[serde(rename = "CITY", default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(rename = "NICKNAME", default, deserialize_with = "lenient_string")]
    pub nickname: String,
    #[serde(rename = "YEARFOUNDED", default, deserialize_with = "lenient_u32")]
    pub year_founded: Option<u32>,
    #[serde(rename = "YEARACTIVETILL", default, deserialize_with = "lenient_u32")]
    pub year_active_till: Option<u32>,
}

impl From<TeamHistoryRow> for TeamEra {
    fn from(row: TeamHistoryRow) -> Self {
        TeamEra {
            city: row.city,
            nickname: row.nickname,
            year_founded: row.year_founded.unwrap_or_default() as u16,
            year_active_till: row.year_active_till.unwrap_or_default() as u16,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ChampionshipRow {
    #[serde(rename = "YEARAWARDED", default, deserialize_with = "lenient_u32")]
    pub year_awarded: Option<u32>,
}

// ---------------------------------------------------------------------------
// commonteamroster
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
pub struct RosterRow {
    #[serde(rename = "NUM", default, deserialize_with = "lenient_string")]
    pub num: String,
    #[serde(rename = "PLAYER", default, deserialize_with = "lenient_string")]
    pub player: String,
}

impl From<RosterRow> for RosterPlayer {
    fn from(row: RosterRow) -> Self {
        RosterPlayer { number: row.num, name: row.player }
    }
}

/// `IS_ASSISTANT` is 1 for the head coach on this endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct CoachRow {
    #[serde(rename = "COACH_NAME", default, deserialize_with = "lenient_string")]
    pub coach_name: String,
    #[serde(rename = "IS_ASSISTANT", default, deserialize_with = "lenient_f64")]
    pub is_assistant: f64,
}

impl From<CoachRow> for Coach {
    fn from(row: CoachRow) -> Self {
        Coach { name: row.coach_name, is_head_coach: row.is_assistant == 1.0 }
    }
}

// ---------------------------------------------------------------------------
// leaguestandingsv3
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
pub struct StandingsWireRow {
    #[serde(rename = "TeamID", default, deserialize_with = "lenient_u32")]
    pub team_id: Option<u32>,
    #[serde(rename = "TeamName", default, deserialize_with = "lenient_string")]
    pub team_name: String,
    #[serde(rename = "Conference", default, deserialize_with = "lenient_string")]
    pub conference: String,
    #[serde(rename = "WINS", default, deserialize_with = "lenient_u32")]
    pub wins: Option<u32>,
    #[serde(rename = "LOSSES", default, deserialize_with = "lenient_u32")]
    pub losses: Option<u32>,
    #[serde(rename = "WinPCT", default, deserialize_with = "lenient_f64")]
    pub win_pct: f64,
    #[serde(rename = "strCurrentStreak", default)]
    pub current_streak: Option<String>,
    #[serde(rename = "L10", default, deserialize_with = "lenient_string")]
    pub l10: String,
    #[serde(rename = "ConferenceRecord", default, deserialize_with = "lenient_string")]
    pub conference_record: String,
    #[serde(rename = "HOME", default, deserialize_with = "lenient_string")]
    pub home: String,
    #[serde(rename = "ROAD", default, deserialize_with = "lenient_string")]
    pub road: String,
    #[serde(rename = "PlayoffRank", default, deserialize_with = "lenient_u32")]
    pub playoff_rank: Option<u32>,
}

impl From<StandingsWireRow> for StandingsRow {
    fn from(row: StandingsWireRow) -> Self {
        StandingsRow {
            team_id: row.team_id.unwrap_or_default(),
            team_name: row.team_name,
            conference: row.conference,
            wins: row.wins.unwrap_or_default() as u16,
            losses: row.losses.unwrap_or_default() as u16,
            win_pct: row.win_pct,
            streak: row.current_streak.filter(|s| !s.trim().is_empty()),
            last_ten: row.l10.trim().to_owned(),
            conference_record: row.conference_record.trim().to_owned(),
            home: row.home.trim().to_owned(),
            road: row.road.trim().to_owned(),
            playoff_rank: row.playoff_rank.unwrap_or_default() as u16,
        }
    }
}

// ---------------------------------------------------------------------------
// scoreboardv2
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GameHeaderRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_date_est: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub game_status_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_status_text: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub home_team_id: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub visitor_team_id: Option<u32>,
    #[serde(default)]
    pub natl_tv_broadcaster_abbreviation: Option<String>,
}

impl From<GameHeaderRow> for GameHeader {
    fn from(row: GameHeaderRow) -> Self {
        GameHeader {
            game_id: row.game_id,
            game_date: row.game_date_est,
            status_id: row.game_status_id.unwrap_or_default() as u8,
            status_text: row.game_status_text.trim().to_owned(),
            home_team_id: row.home_team_id.unwrap_or_default(),
            visitor_team_id: row.visitor_team_id.unwrap_or_default(),
            national_tv: row
                .natl_tv_broadcaster_abbreviation
                .map(|tv| tv.trim().to_owned())
                .filter(|tv| !tv.is_empty()),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LineScoreRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub game_date_est: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team_abbreviation: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pts: Option<u32>,
}

impl From<LineScoreRow> for LineScore {
    fn from(row: LineScoreRow) -> Self {
        LineScore {
            game_id: row.game_id,
            game_date: row.game_date_est,
            team_abbreviation: row.team_abbreviation,
            pts: row.pts.map(|p| p as u16),
        }
    }
}

// ---------------------------------------------------------------------------
// winprobabilitypbp
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WinProbRow {
    #[serde(default)]
    pub home_pct: Option<f64>,
    #[serde(default)]
    pub visitor_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub home_pts: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub visitor_pts: Option<u32>,
}

impl From<WinProbRow> for WinProbabilityPoint {
    fn from(row: WinProbRow) -> Self {
        WinProbabilityPoint {
            home_pct: row.home_pct,
            visitor_pct: row.visitor_pct,
            home_pts: row.home_pts.map(|p| p as u16),
            visitor_pts: row.visitor_pts.map(|p| p as u16),
        }
    }
}
