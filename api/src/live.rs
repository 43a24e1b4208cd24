/// Wire types for the cdn.nba.com live-data feeds (scoreboard, box score,
/// play-by-play). Shapes are camelCase JSON; every field is optional on the
/// wire and defaulted when mapped to the domain types.
use crate::{GameLeader, LiveBoxScore, LiveGame, LivePlayerLine, LiveTeamScore, PlayAction};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// todaysScoreboard_00.json
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct ScoreboardEnvelope {
    #[serde(default)]
    pub scoreboard: LiveScoreboard,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LiveScoreboard {
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub games: Vec<WireGame>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireGame {
    pub game_id: Option<String>,
    pub game_status: Option<u8>,
    pub game_status_text: Option<String>,
    #[serde(default)]
    pub home_team: WireTeam,
    #[serde(default)]
    pub away_team: WireTeam,
    #[serde(default)]
    pub game_leaders: WireLeaders,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    pub team_id: Option<u32>,
    pub team_tricode: Option<String>,
    pub score: Option<u16>,
    /// Only present on box scores.
    #[serde(default)]
    pub players: Vec<WirePlayer>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireLeaders {
    #[serde(default)]
    pub home_leaders: WireLeader,
    #[serde(default)]
    pub away_leaders: WireLeader,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireLeader {
    pub person_id: Option<u32>,
    pub points: Option<u16>,
    pub rebounds: Option<u16>,
    pub assists: Option<u16>,
}

impl From<WireLeader> for GameLeader {
    fn from(l: WireLeader) -> Self {
        GameLeader {
            person_id: l.person_id.unwrap_or_default(),
            points: l.points.unwrap_or_default(),
            rebounds: l.rebounds.unwrap_or_default(),
            assists: l.assists.unwrap_or_default(),
        }
    }
}

impl From<WireGame> for LiveGame {
    fn from(g: WireGame) -> Self {
        let team = |t: &WireTeam| LiveTeamScore {
            tricode: t.team_tricode.clone().unwrap_or_default(),
            score: t.score.unwrap_or_default(),
        };
        LiveGame {
            game_id: g.game_id.unwrap_or_default(),
            status: g.game_status.unwrap_or_default(),
            status_text: g.game_status_text.unwrap_or_default().trim().to_owned(),
            home: team(&g.home_team),
            away: team(&g.away_team),
            home_leader: g.game_leaders.home_leaders.into(),
            away_leader: g.game_leaders.away_leaders.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// boxscore_{gameId}.json
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct GameEnvelope<T> {
    #[serde(default)]
    pub game: T,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    pub person_id: Option<u32>,
    pub name: Option<String>,
    #[serde(default)]
    pub statistics: WirePlayerStats,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayerStats {
    pub points: Option<u16>,
    pub field_goals_made: Option<u16>,
    pub field_goals_attempted: Option<u16>,
    pub free_throws_made: Option<u16>,
    pub free_throws_attempted: Option<u16>,
    pub three_pointers_made: Option<u16>,
    pub three_pointers_attempted: Option<u16>,
    pub rebounds_total: Option<u16>,
    pub rebounds_offensive: Option<u16>,
    pub assists: Option<u16>,
    pub blocks: Option<u16>,
    pub steals: Option<u16>,
    pub turnovers: Option<u16>,
    pub fouls_personal: Option<u16>,
    pub minutes_calculated: Option<String>,
    pub plus_minus_points: Option<f64>,
}

impl From<WirePlayer> for LivePlayerLine {
    fn from(p: WirePlayer) -> Self {
        let s = p.statistics;
        LivePlayerLine {
            person_id: p.person_id.unwrap_or_default(),
            name: p.name.unwrap_or_default(),
            points: s.points.unwrap_or_default(),
            fgm: s.field_goals_made.unwrap_or_default(),
            fga: s.field_goals_attempted.unwrap_or_default(),
            ftm: s.free_throws_made.unwrap_or_default(),
            fta: s.free_throws_attempted.unwrap_or_default(),
            fg3m: s.three_pointers_made.unwrap_or_default(),
            fg3a: s.three_pointers_attempted.unwrap_or_default(),
            reb: s.rebounds_total.unwrap_or_default(),
            oreb: s.rebounds_offensive.unwrap_or_default(),
            ast: s.assists.unwrap_or_default(),
            blk: s.blocks.unwrap_or_default(),
            stl: s.steals.unwrap_or_default(),
            tov: s.turnovers.unwrap_or_default(),
            pf: s.fouls_personal.unwrap_or_default(),
            minutes: s.minutes_calculated.unwrap_or_default(),
            plus_minus: s.plus_minus_points.unwrap_or_default(),
        }
    }
}

pub fn map_box_score(game: WireGame) -> LiveBoxScore {
    LiveBoxScore {
        game_id: game.game_id.unwrap_or_default(),
        status_text: game.game_status_text.unwrap_or_default().trim().to_owned(),
        home_players: game.home_team.players.into_iter().map(Into::into).collect(),
        away_players: game.away_team.players.into_iter().map(Into::into).collect(),
    }
}

// ---------------------------------------------------------------------------
// playbyplay_{gameId}.json
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct WirePlayByPlay {
    #[serde(default)]
    pub actions: Vec<WireAction>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireAction {
    pub period: Option<u8>,
    pub clock: Option<String>,
    pub description: Option<String>,
    pub score_home: Option<String>,
    pub score_away: Option<String>,
}

impl From<WireAction> for PlayAction {
    fn from(a: WireAction) -> Self {
        PlayAction {
            period: a.period.unwrap_or_default(),
            clock: a.clock.unwrap_or_default(),
            description: a.description.filter(|d| !d.trim().is_empty()),
            score_home: a.score_home.unwrap_or_default(),
            score_away: a.score_away.unwrap_or_default(),
        }
    }
}
