use super::{Bot, ScoresArgs};
use crate::error::Result;
use crate::format::{self, DateError};
use crate::render::scores::{STATUS_SCHEDULED, points_leader};
use crate::render::{self, NO_GAMES, TEAM_NOT_FOUND};
use crate::resolve::resolve_team;
use chrono::{Days, NaiveDate};
use nba_api::{LiveGame, StatsProvider};

/// The day asked for, or `None` for today (read from the live feed).
fn slate_day(args: &ScoresArgs, today: NaiveDate) -> Result<Option<NaiveDate>> {
    if let Some(text) = &args.date {
        return Ok(Some(format::parse_date(text)?));
    }
    let (n, day) = match (args.days_ago, args.days_ahead) {
        (Some(n), _) if n > 0 => (n, today.checked_sub_days(Days::new(n.into()))),
        (_, Some(n)) if n > 0 => (n, today.checked_add_days(Days::new(n.into()))),
        _ => return Ok(None),
    };
    let day = day.ok_or_else(|| DateError(format!("{n} days from {today}")))?;
    Ok(Some(day))
}

impl<P: StatsProvider> Bot<P> {
    pub(super) async fn scores(&self, args: &ScoresArgs) -> Result<String> {
        if !args.team.is_empty() {
            return self.team_scores(&args.team.join(" "), args.last).await;
        }

        let today = self.today();
        if args.topic {
            let board = self.provider.scoreboard(today).await?;
            let live = self.provider.live_scoreboard().await?;
            return Ok(render::scores::topic_line(&board, &live).unwrap_or_else(|| NO_GAMES.into()));
        }

        let line = match slate_day(args, today)? {
            Some(day) => {
                let board = self.provider.scoreboard(day).await?;
                render::scores::scoreboard_line(&board, None, today)?
            }
            None => {
                let board = self.provider.scoreboard(today).await?;
                let live = self.live_games_with_leaders().await?;
                render::scores::scoreboard_line(&board, Some(live.as_slice()), today)?
            }
        };
        Ok(line.unwrap_or_else(|| NO_GAMES.into()))
    }

    /// Today's live games with the last name of each points leader.
    async fn live_games_with_leaders(&self) -> Result<Vec<(LiveGame, Option<String>)>> {
        let games = self.provider.live_scoreboard().await?;
        let mut out = Vec::with_capacity(games.len());
        for game in games {
            let leader_id = points_leader(&game).person_id;
            let last_name = if game.status == STATUS_SCHEDULED || leader_id == 0 {
                None
            } else {
                self.provider.player_by_id(leader_id).await?.map(|p| p.last_name)
            };
            out.push((game, last_name));
        }
        Ok(out)
    }

    async fn team_scores(&self, name: &str, last: Option<u32>) -> Result<String> {
        let Some(team) = resolve_team(&self.provider, name).await? else {
            return Ok(TEAM_NOT_FOUND.into());
        };
        let games = last.unwrap_or(self.config.team_scores_games).max(1);
        let season = self.config.season.to_string();
        let logs = self.provider.team_game_logs(team.id, &season, Some(games)).await?;
        Ok(render::team::team_scores_line(&logs, self.today())?.unwrap_or_else(|| NO_GAMES.into()))
    }
}
