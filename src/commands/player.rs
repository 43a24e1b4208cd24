use super::Bot;
use crate::error::Result;
use crate::format;
use crate::render::{self, NO_GAMES, NO_STATS, PLAYER_NOT_FOUND};
use crate::resolve::{SeasonKey, resolve_player};
use nba_api::{GameLogQuery, PlayerRef, SeasonType, StatsProvider};

/// Rows for `season`; the most recent row when no season is given or none
/// match.
fn select_season<'a, T>(
    rows: &'a [T],
    season: Option<SeasonKey>,
    season_id: impl Fn(&T) -> Option<&str>,
) -> Vec<&'a T> {
    if let Some(season) = season {
        let label = season.to_string();
        let matched: Vec<&T> = rows
            .iter()
            .filter(|r| season_id(r) == Some(label.as_str()))
            .collect();
        if !matched.is_empty() {
            return matched;
        }
    }
    rows.last().into_iter().collect()
}

impl<P: StatsProvider> Bot<P> {
    async fn find_player(&self, name: &str) -> Result<Option<PlayerRef>> {
        Ok(resolve_player(&self.provider, &self.config.nicknames, name).await?)
    }

    pub(super) async fn player(&self, name: &str) -> Result<String> {
        let Some(player) = self.find_player(name).await? else {
            return Ok(PLAYER_NOT_FOUND.into());
        };
        let profile = self.provider.player_profile(player.id).await?;
        Ok(render::player::player_line(&profile, self.today())?)
    }

    pub(super) async fn career(&self, kind: SeasonType, name: &str) -> Result<Vec<String>> {
        let Some(player) = self.find_player(name).await? else {
            return Ok(vec![PLAYER_NOT_FOUND.into()]);
        };
        let stats = self.provider.career_stats(player.id).await?;
        let rows = stats.career(kind);
        if rows.is_empty() {
            return Ok(vec![NO_STATS.into()]);
        }
        Ok(rows.iter().map(|t| render::player::season_line(&player.full_name, t)).collect())
    }

    pub(super) async fn season_stats(
        &self,
        kind: SeasonType,
        season: Option<&str>,
        name: &str,
    ) -> Result<Vec<String>> {
        let Some(player) = self.find_player(name).await? else {
            return Ok(vec![PLAYER_NOT_FOUND.into()]);
        };
        let stats = self.provider.career_stats(player.id).await?;
        let season = season.and_then(SeasonKey::parse);
        let rows = select_season(stats.seasons(kind), season, |t| t.season_id.as_deref());
        if rows.is_empty() {
            return Ok(vec![NO_STATS.into()]);
        }
        Ok(rows.into_iter().map(|t| render::player::season_line(&player.full_name, t)).collect())
    }

    pub(super) async fn season_ranks(
        &self,
        kind: SeasonType,
        season: Option<&str>,
        name: &str,
    ) -> Result<Vec<String>> {
        let Some(player) = self.find_player(name).await? else {
            return Ok(vec![PLAYER_NOT_FOUND.into()]);
        };
        let stats = self.provider.career_stats(player.id).await?;
        let season = season.and_then(SeasonKey::parse);
        let rows = select_season(stats.ranks(kind), season, |r| r.season_id.as_deref());
        if rows.is_empty() {
            return Ok(vec![NO_STATS.into()]);
        }
        Ok(rows.into_iter().map(|r| render::player::ranks_line(&player.full_name, r)).collect())
    }

    /// `-d` picks one date; otherwise the last `last` games (default one),
    /// where a single game is read live when the player's team is playing.
    pub(super) async fn stats(
        &self,
        last: Option<u32>,
        date: Option<&str>,
        name: &str,
    ) -> Result<String> {
        let Some(player) = self.find_player(name).await? else {
            return Ok(PLAYER_NOT_FOUND.into());
        };

        let query = match date {
            Some(text) => {
                let date = format::parse_date(text)?;
                GameLogQuery {
                    season: SeasonKey::for_date(date).to_string(),
                    last_n: None,
                    date: Some(date),
                }
            }
            None => {
                let n = last.unwrap_or(1).max(1);
                if n == 1 {
                    let profile = self.provider.player_profile(player.id).await?;
                    if let Some(line) = self.live_stat_line(player.id, profile.info.team_id).await? {
                        return Ok(line);
                    }
                }
                GameLogQuery {
                    season: self.config.season.to_string(),
                    last_n: Some(n),
                    date: None,
                }
            }
        };

        let logs = self.provider.player_game_logs(player.id, &query).await?;
        Ok(match logs.as_slice() {
            [] => NO_GAMES.into(),
            [game] => render::player::game_line(game, self.today())?,
            _ => render::player::aggregate_line(&logs).unwrap_or_else(|| NO_GAMES.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeProvider;
    use crate::commands::tests::{bot, dame};
    use nba_api::{CareerStats, SeasonRanks};

    fn ranks(season: &str, pts: Option<u32>) -> SeasonRanks {
        SeasonRanks {
            season_id: Some(season.into()),
            team_abbreviation: Some("POR".into()),
            ranks: vec![("PTS", pts)],
        }
    }

    #[test]
    fn test_select_season() {
        fn label(row: &String) -> Option<&str> {
            Some(row.as_str())
        }
        let rows: Vec<String> =
            ["2019-20", "2020-21", "2020-21", "2021-22"].map(String::from).into();
        assert_eq!(
            select_season(&rows, SeasonKey::parse("2020"), label),
            vec![&rows[1], &rows[2]]
        );
        assert_eq!(select_season(&rows, None, label), vec![&rows[3]]);
        assert_eq!(select_season(&rows, SeasonKey::parse("1990"), label), vec![&rows[3]]);
        assert!(select_season(&rows[..0], None, label).is_empty());
    }

    #[tokio::test]
    async fn test_playoff_ranks() {
        let career = CareerStats {
            regular_season_ranks: vec![ranks("2020-21", Some(7))],
            post_season_ranks: vec![ranks("2019-20", Some(2)), ranks("2020-21", None)],
            ..Default::default()
        };
        let bot = bot(FakeProvider { players: vec![dame()], career, ..Default::default() });

        let expected = render::player::ranks_line("Damian Lillard", &ranks("2019-20", Some(2)));
        assert_eq!(bot.respond("seasonranks -s 19 playoffs dame").await, vec![expected]);
        let expected = render::player::ranks_line("Damian Lillard", &ranks("2020-21", Some(7)));
        assert_eq!(bot.respond("seasonranks dame").await, vec![expected]);
    }

    #[tokio::test]
    async fn test_player_uses_profile() {
        let bot = bot(FakeProvider { players: vec![dame()], ..Default::default() });
        assert_eq!(bot.respond("player dame").await.len(), 1);
        assert_eq!(
            bot.provider.calls(),
            vec!["find_players damian lillard", "player_profile 203081"]
        );
    }
}
