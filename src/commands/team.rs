use super::Bot;
use crate::error::Result;
use crate::render::team::Conference;
use crate::render::{self, NO_RECORD, TEAM_NOT_FOUND};
use crate::resolve::resolve_team;
use nba_api::StatsProvider;

impl<P: StatsProvider> Bot<P> {
    pub(super) async fn team(&self, name: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let details = self.provider.team_details(team.id).await?;
        Ok(render::team::team_line(&team, &details, self.config.season))
    }

    pub(super) async fn roster(&self, season: Option<&str>, name: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let season = self.season_or_current(season);
        let roster = self.provider.team_roster(team.id, &season.to_string()).await?;
        Ok(render::team::roster_line(&team, &roster, season, self.config.season))
    }

    pub(super) async fn record(&self, season: Option<&str>, name: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let season = self.season_or_current(season);
        let rows = self.provider.standings(&season.to_string()).await?;
        Ok(render::team::record_line(&team, &rows, season, self.config.season)
            .unwrap_or_else(|| NO_RECORD.into()))
    }

    pub(super) async fn standings(
        &self,
        season: Option<&str>,
        conference: Option<Conference>,
    ) -> Result<String> {
        let season = self.season_or_current(season);
        let rows = self.provider.standings(&season.to_string()).await?;
        Ok(render::team::standings_line(&rows, conference, season, self.config.season))
    }

    pub(super) async fn lottery(&self, conference: Option<Conference>) -> Result<String> {
        let rows = self.provider.standings(&self.config.season.to_string()).await?;
        Ok(render::team::lottery_line(&rows, conference))
    }

    /// This season's series from the first team's side.
    pub(super) async fn head_to_head(&self, name: &str, opponent: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let Some(opponent) = resolve_team(&self.provider, opponent).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let season = self.config.season.to_string();
        let games = self.provider.team_games_vs_league(team.id, &season).await?;
        Ok(render::team::head_to_head_line(&team, &opponent, &games)?)
    }
}
