use super::Bot;
use crate::error::Result;
use crate::render::scores::STATUS_LIVE;
use crate::render::{self, NO_LIVE_GAME, NO_PLAYS, NO_WIN_PROBABILITY, TEAM_NOT_FOUND};
use crate::resolve::resolve_team;
use nba_api::{Scoreboard, StatsProvider, TeamRef};

/// A team's game on the current slate that has tipped off.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveGameRef {
    pub game_id: String,
    pub team_is_home: bool,
    pub home_team_id: u32,
    pub visitor_team_id: u32,
}

/// Only the team's first game on the board counts, and only once it has
/// started.
pub fn find_live_game(board: &Scoreboard, team_id: u32) -> Option<LiveGameRef> {
    let game = board.games.iter().find(|g| g.involves(team_id))?;
    (game.status_id >= STATUS_LIVE).then(|| LiveGameRef {
        game_id: game.game_id.clone(),
        team_is_home: game.home_team_id == team_id,
        home_team_id: game.home_team_id,
        visitor_team_id: game.visitor_team_id,
    })
}

impl<P: StatsProvider> Bot<P> {
    async fn live_game(&self, team_id: u32) -> Result<Option<LiveGameRef>> {
        let board = self.provider.scoreboard(self.config.clock.slate_date()).await?;
        Ok(find_live_game(&board, team_id))
    }

    async fn team_or_id(&self, id: u32) -> Result<TeamRef> {
        Ok(self.provider.team_by_id(id).await?.unwrap_or_else(|| TeamRef {
            id,
            nickname: id.to_string(),
            ..Default::default()
        }))
    }

    async fn sides(&self, game: &LiveGameRef) -> Result<(TeamRef, TeamRef)> {
        let home = self.team_or_id(game.home_team_id).await?;
        let visitor = self.team_or_id(game.visitor_team_id).await?;
        Ok((home, visitor))
    }

    /// The player's line from the team's game in progress, if there is one
    /// and the player has appeared in it.
    pub(super) async fn live_stat_line(&self, player_id: u32, team_id: u32) -> Result<Option<String>> {
        if team_id == 0 {
            return Ok(None);
        }
        let Some(game) = self.live_game(team_id).await? else {
            return Ok(None);
        };
        let box_score = self.provider.live_box_score(&game.game_id).await?;
        let side = if game.team_is_home { &box_score.home_players } else { &box_score.away_players };
        Ok(side
            .iter()
            .find(|p| p.person_id == player_id)
            .map(|p| render::player::live_line(p, &box_score.status_text)))
    }

    pub(super) async fn win_chance(&self, name: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let Some(game) = self.live_game(team.id).await? else {
            return Ok(NO_LIVE_GAME.into());
        };
        let points = self.provider.win_probability(&game.game_id).await?;
        let (home, visitor) = self.sides(&game).await?;
        Ok(render::scores::win_chance_line(&home, &visitor, game.team_is_home, &points)
            .unwrap_or_else(|| NO_WIN_PROBABILITY.into()))
    }

    pub(super) async fn play_by_play(&self, name: &str) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let Some(game) = self.live_game(team.id).await? else {
            return Ok(NO_LIVE_GAME.into());
        };
        let actions = self.provider.play_by_play(&game.game_id).await?;
        let (home, visitor) = self.sides(&game).await?;
        Ok(render::scores::play_by_play_line(&home, &visitor, &actions).unwrap_or_else(|| NO_PLAYS.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeProvider;
    use crate::commands::tests::{bot, live_board};
    use nba_api::{PlayAction, WinProbabilityPoint};

    const POR: u32 = 1610612757;
    const LAL: u32 = 1610612747;

    #[test]
    fn test_first_game_for_team_only_once_started() {
        let mut board = live_board(2);
        assert_eq!(
            find_live_game(&board, LAL),
            Some(LiveGameRef {
                game_id: "0022100250".into(),
                team_is_home: false,
                home_team_id: POR,
                visitor_team_id: LAL,
            })
        );
        assert!(find_live_game(&board, 1610612744).is_none());

        board.games[0].status_id = 1;
        assert!(find_live_game(&board, POR).is_none());
        board.games[0].status_id = 3;
        assert!(find_live_game(&board, POR).is_some());
    }

    #[tokio::test]
    async fn test_win_chance_for_visitors() {
        let bot = bot(FakeProvider {
            scoreboard: live_board(2),
            win_probability: vec![
                WinProbabilityPoint {
                    home_pct: Some(0.6),
                    visitor_pct: Some(0.4),
                    home_pts: Some(70),
                    visitor_pts: Some(66),
                },
                WinProbabilityPoint { home_pct: Some(0.0), visitor_pct: Some(0.0), ..Default::default() },
            ],
            ..Default::default()
        });
        assert_eq!(
            bot.respond("winchance lakers").await,
            vec!["Trail Blazers 70 - Lakers 66 | Lakers win chance: 40.0%"]
        );
    }

    #[tokio::test]
    async fn test_play_by_play_without_plays() {
        let bot = bot(FakeProvider {
            scoreboard: live_board(2),
            plays: vec![PlayAction { period: 1, clock: "PT12M00.00S".into(), ..Default::default() }],
            ..Default::default()
        });
        assert_eq!(bot.respond("playbyplay blazers").await, vec!["No plays yet."]);
    }

    #[tokio::test]
    async fn test_free_agent_has_no_live_game() {
        let bot = bot(FakeProvider { scoreboard: live_board(2), ..Default::default() });
        assert_eq!(bot.live_stat_line(1, 0).await.unwrap(), None);
        assert!(bot.provider.calls().is_empty());
    }
}
