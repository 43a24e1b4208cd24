//! In-memory provider for dispatch tests. Every call is recorded so tests can
//! check what a command asked for, and in which order.

use async_trait::async_trait;
use chrono::NaiveDate;
use nba_api::client::{ApiError, ApiResult};
use nba_api::{
    CareerStats, GameLogQuery, LiveBoxScore, LiveGame, PlayAction, PlayerGameLog, PlayerProfile, PlayerRef,
    Roster, Scoreboard, StandingsRow, StatsProvider, TeamDetails, TeamGameLog, TeamRef, WinProbabilityPoint,
    teams,
};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeProvider {
    pub players: Vec<PlayerRef>,
    pub profile: PlayerProfile,
    pub career: CareerStats,
    pub game_logs: Vec<PlayerGameLog>,
    pub team_logs: Vec<TeamGameLog>,
    pub league_games: Vec<TeamGameLog>,
    pub details: TeamDetails,
    pub roster: Roster,
    pub standings: Vec<StandingsRow>,
    pub scoreboard: Scoreboard,
    pub live_games: Vec<LiveGame>,
    pub box_score: LiveBoxScore,
    pub plays: Vec<PlayAction>,
    pub win_probability: Vec<WinProbabilityPoint>,
    /// Name lookups still answer; every data call fails.
    pub offline: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn answer<T: Clone>(&self, call: String, value: &T) -> ApiResult<T> {
        self.record(call);
        if self.offline {
            return Err(ApiError::Other("provider offline".into()));
        }
        Ok(value.clone())
    }
}

#[async_trait]
impl StatsProvider for FakeProvider {
    async fn find_players(&self, name: &str) -> ApiResult<Vec<PlayerRef>> {
        self.record(format!("find_players {name}"));
        let needle = name.to_lowercase();
        Ok(self
            .players
            .iter()
            .filter(|p| p.full_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn player_by_id(&self, id: u32) -> ApiResult<Option<PlayerRef>> {
        self.record(format!("player_by_id {id}"));
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    async fn find_teams(&self, name: &str) -> ApiResult<Vec<TeamRef>> {
        self.record(format!("find_teams {name}"));
        Ok(teams::find_teams(name))
    }

    async fn team_by_id(&self, id: u32) -> ApiResult<Option<TeamRef>> {
        self.record(format!("team_by_id {id}"));
        Ok(teams::team_by_id(id))
    }

    async fn player_profile(&self, player_id: u32) -> ApiResult<PlayerProfile> {
        self.answer(format!("player_profile {player_id}"), &self.profile)
    }

    async fn career_stats(&self, player_id: u32) -> ApiResult<CareerStats> {
        self.answer(format!("career_stats {player_id}"), &self.career)
    }

    async fn player_game_logs(
        &self,
        player_id: u32,
        query: &GameLogQuery,
    ) -> ApiResult<Vec<PlayerGameLog>> {
        let call = format!(
            "player_game_logs {player_id} {} last={:?} date={:?}",
            query.season, query.last_n, query.date
        );
        self.answer(call, &self.game_logs)
    }

    async fn team_game_logs(
        &self,
        team_id: u32,
        season: &str,
        last_n: Option<u32>,
    ) -> ApiResult<Vec<TeamGameLog>> {
        self.answer(format!("team_game_logs {team_id} {season} {last_n:?}"), &self.team_logs)
    }

    async fn team_games_vs_league(&self, team_id: u32, season: &str) -> ApiResult<Vec<TeamGameLog>> {
        self.answer(format!("team_games_vs_league {team_id} {season}"), &self.league_games)
    }

    async fn team_details(&self, team_id: u32) -> ApiResult<TeamDetails> {
        self.answer(format!("team_details {team_id}"), &self.details)
    }

    async fn team_roster(&self, team_id: u32, season: &str) -> ApiResult<Roster> {
        self.answer(format!("team_roster {team_id} {season}"), &self.roster)
    }

    async fn standings(&self, season: &str) -> ApiResult<Vec<StandingsRow>> {
        self.answer(format!("standings {season}"), &self.standings)
    }

    async fn scoreboard(&self, date: NaiveDate) -> ApiResult<Scoreboard> {
        self.answer(format!("scoreboard {date}"), &self.scoreboard)
    }

    async fn live_scoreboard(&self) -> ApiResult<Vec<LiveGame>> {
        self.answer("live_scoreboard".into(), &self.live_games)
    }

    async fn live_box_score(&self, game_id: &str) -> ApiResult<LiveBoxScore> {
        self.answer(format!("live_box_score {game_id}"), &self.box_score)
    }

    async fn play_by_play(&self, game_id: &str) -> ApiResult<Vec<PlayAction>> {
        self.answer(format!("play_by_play {game_id}"), &self.plays)
    }

    async fn win_probability(&self, game_id: &str) -> ApiResult<Vec<WinProbabilityPoint>> {
        self.answer(format!("win_probability {game_id}"), &self.win_probability)
    }
}
