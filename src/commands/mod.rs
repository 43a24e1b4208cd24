//! Chat command grammar and dispatch. Each command resolves its names first,
//! then makes its provider calls one after another and hands the records to
//! `render`.

#[cfg(test)]
pub mod fake;
mod live;
mod player;
mod scores;
mod team;

use crate::config::BotConfig;
use crate::error::Result;
use crate::render::team::Conference;
use crate::resolve::SeasonKey;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use log::{debug, error};
use nba_api::{SeasonType, StatsProvider};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "hoopsbot",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: BotCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BotCommand {
    /// Bio, draft and headline averages
    Player {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Career totals, optionally for all-star, playoffs or college
    Career {
        #[arg(required = true)]
        words: Vec<String>,
    },
    Seasonstats {
        #[arg(short)]
        season: Option<String>,
        #[arg(required = true)]
        words: Vec<String>,
    },
    Seasonranks {
        #[arg(short)]
        season: Option<String>,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Latest game (live if one is on), the last N games, or one date
    Stats {
        #[arg(short, conflicts_with = "date")]
        last: Option<u32>,
        #[arg(short)]
        date: Option<String>,
        #[arg(required = true)]
        name: Vec<String>,
    },
    Team {
        #[arg(required = true)]
        name: Vec<String>,
    },
    Scores(ScoresArgs),
    Standings {
        #[arg(short)]
        season: Option<String>,
        #[arg(value_enum, ignore_case = true)]
        conference: Option<Conference>,
    },
    Record {
        #[arg(short)]
        season: Option<String>,
        #[arg(required = true)]
        team: Vec<String>,
    },
    Lottery {
        #[arg(value_enum, ignore_case = true)]
        conference: Option<Conference>,
    },
    Roster {
        #[arg(short)]
        season: Option<String>,
        #[arg(required = true)]
        team: Vec<String>,
    },
    Winchance {
        #[arg(required = true)]
        team: Vec<String>,
    },
    Playbyplay {
        #[arg(required = true)]
        team: Vec<String>,
    },
    Headtohead {
        team: String,
        opponent: String,
    },
}

/// One team's recent results, or a whole day's slate.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ScoresArgs {
    /// Games to list for a team
    #[arg(short, requires = "team")]
    pub last: Option<u32>,
    #[arg(short = 'a', conflicts_with_all = ["days_ahead", "date", "topic", "team"])]
    pub days_ago: Option<u32>,
    #[arg(short = 'f', conflicts_with_all = ["date", "topic", "team"])]
    pub days_ahead: Option<u32>,
    #[arg(short, conflicts_with_all = ["topic", "team"])]
    pub date: Option<String>,
    #[arg(long, conflicts_with = "team")]
    pub topic: bool,
    pub team: Vec<String>,
}

/// True when `word` names a command of the grammar.
fn is_command(word: &str) -> bool {
    CommandLine::command().get_subcommands().any(|c| c.get_name() == word)
}

/// The `Usage:` line of a grammar error, without the program name.
fn usage_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    rendered
        .lines()
        .find(|l| l.starts_with("Usage:"))
        .map(|l| l.replacen("hoopsbot ", "", 1))
        .unwrap_or_else(|| err.kind().to_string())
}

/// Splits an optional leading season-type keyword off the name. A keyword
/// alone is taken as the name.
fn split_season_type(words: &[String], allowed: &[SeasonType]) -> (SeasonType, String) {
    if let [first, rest @ ..] = words
        && !rest.is_empty()
        && let Some(kind) = SeasonType::from_keyword(first)
        && allowed.contains(&kind)
    {
        return (kind, rest.join(" "));
    }
    (SeasonType::Regular, words.join(" "))
}

/// Answers chat commands from one provider.
pub struct Bot<P> {
    provider: P,
    config: Arc<BotConfig>,
}

impl<P: StatsProvider> Bot<P> {
    pub fn new(provider: P, config: Arc<BotConfig>) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &Arc<BotConfig> {
        &self.config
    }

    /// Later commands see `config`; the previous one is returned.
    pub fn set_config(&mut self, config: Arc<BotConfig>) -> Arc<BotConfig> {
        std::mem::replace(&mut self.config, config)
    }

    fn today(&self) -> NaiveDate {
        self.config.clock.today()
    }

    fn season_or_current(&self, token: Option<&str>) -> SeasonKey {
        token.and_then(SeasonKey::parse).unwrap_or(self.config.season)
    }

    /// Lines to post for one command line (prefix already stripped). Words
    /// that are not commands get no answer.
    pub async fn respond(&self, line: &str) -> Vec<String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            Some(word) if is_command(word) => {}
            _ => return Vec::new(),
        }

        let command = match CommandLine::try_parse_from(words.iter().copied()) {
            Ok(parsed) => parsed.command,
            Err(err) => return vec![usage_line(&err)],
        };
        debug!("Dispatching {command:?}");

        match self.dispatch(command).await {
            Ok(lines) => lines,
            Err(e) => {
                error!("Command {line:?} failed: {e}");
                vec![format!("Error: {e}")]
            }
        }
    }

    async fn dispatch(&self, command: BotCommand) -> Result<Vec<String>> {
        let all = [SeasonType::AllStar, SeasonType::Playoffs, SeasonType::College];
        let lines = match command {
            BotCommand::Player { name } => vec![self.player(&name.join(" ")).await?],
            BotCommand::Career { words } => {
                let (kind, name) = split_season_type(&words, &all);
                self.career(kind, &name).await?
            }
            BotCommand::Seasonstats { season, words } => {
                let (kind, name) = split_season_type(&words, &all);
                self.season_stats(kind, season.as_deref(), &name).await?
            }
            BotCommand::Seasonranks { season, words } => {
                let (kind, name) = split_season_type(&words, &[SeasonType::Playoffs]);
                self.season_ranks(kind, season.as_deref(), &name).await?
            }
            BotCommand::Stats { last, date, name } => {
                vec![self.stats(last, date.as_deref(), &name.join(" ")).await?]
            }
            BotCommand::Team { name } => vec![self.team(&name.join(" ")).await?],
            BotCommand::Scores(args) => vec![self.scores(&args).await?],
            BotCommand::Standings { season, conference } => {
                vec![self.standings(season.as_deref(), conference).await?]
            }
            BotCommand::Record { season, team } => {
                vec![self.record(season.as_deref(), &team.join(" ")).await?]
            }
            BotCommand::Lottery { conference } => vec![self.lottery(conference).await?],
            BotCommand::Roster { season, team } => {
                vec![self.roster(season.as_deref(), &team.join(" ")).await?]
            }
            BotCommand::Winchance { team } => vec![self.win_chance(&team.join(" ")).await?],
            BotCommand::Playbyplay { team } => vec![self.play_by_play(&team.join(" ")).await?],
            BotCommand::Headtohead { team, opponent } => vec![self.head_to_head(&team, &opponent).await?],
        };
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::LeagueClock;
    use crate::commands::fake::FakeProvider;
    use crate::config::Settings;
    use crate::render;
    use chrono::{FixedOffset, TimeZone};
    use nba_api::{
        CareerStats, GameHeader, LiveBoxScore, LivePlayerLine, PlayerGameLog, PlayerInfo, PlayerProfile,
        PlayerRef, Scoreboard, SeasonTotals,
    };

    const POR: u32 = 1610612757;
    const LAL: u32 = 1610612747;
    const DAME: u32 = 203081;

    pub(super) fn config() -> BotConfig {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        let clock = LeagueClock::fixed(tz.with_ymd_and_hms(2021, 11, 23, 19, 30, 0).unwrap());
        BotConfig::new(Settings::default(), Some("2021-22"), clock)
    }

    pub(super) fn bot(fake: FakeProvider) -> Bot<FakeProvider> {
        Bot::new(fake, Arc::new(config()))
    }

    pub(super) fn dame() -> PlayerRef {
        PlayerRef {
            id: DAME,
            full_name: "Damian Lillard".into(),
            last_name: "Lillard".into(),
            is_active: true,
        }
    }

    fn log(pts: f64) -> PlayerGameLog {
        PlayerGameLog {
            player_name: "Damian Lillard".into(),
            game_date: "2021-11-20T00:00:00".into(),
            matchup: "POR vs. LAL".into(),
            wl: "W".into(),
            min: 36.0,
            pts,
            fgm: 8.0,
            fga: 17.0,
            ..Default::default()
        }
    }

    fn totals(season: &str, pts: f64) -> SeasonTotals {
        SeasonTotals {
            season_id: Some(season.into()),
            team_abbreviation: Some("POR".into()),
            gp: 10.0,
            pts,
            ..Default::default()
        }
    }

    pub(super) fn live_board(status_id: u8) -> Scoreboard {
        Scoreboard {
            games: vec![GameHeader {
                game_id: "0022100250".into(),
                game_date: "2021-11-23T00:00:00".into(),
                status_id,
                status_text: "Q3 5:12".into(),
                home_team_id: POR,
                visitor_team_id: LAL,
                national_tv: None,
            }],
            line_scores: Vec::new(),
        }
    }

    fn on_blazers() -> PlayerProfile {
        PlayerProfile {
            info: PlayerInfo { team_id: POR, display_name: "Damian Lillard".into(), ..Default::default() },
            headline: None,
        }
    }

    #[tokio::test]
    async fn test_unresolved_team_stops_after_lookup() {
        for line in [
            "team zzz",
            "roster zzz",
            "record zzz",
            "scores zzz",
            "headtohead zzz blazers",
            "winchance zzz",
            "playbyplay zzz",
        ] {
            let bot = bot(FakeProvider::default());
            assert_eq!(bot.respond(line).await, vec!["Team not found."], "{line}");
            assert_eq!(bot.provider.calls(), vec!["find_teams zzz"], "{line}");
        }
    }

    #[tokio::test]
    async fn test_unresolved_player_stops_after_lookup() {
        for line in ["player nobody", "career nobody", "seasonstats nobody", "seasonranks nobody", "stats nobody"] {
            let bot = bot(FakeProvider::default());
            assert_eq!(bot.respond(line).await, vec!["Player not found."], "{line}");
            assert_eq!(bot.provider.calls(), vec!["find_players nobody"], "{line}");
        }
    }

    #[tokio::test]
    async fn test_unresolved_opponent() {
        let bot = bot(FakeProvider::default());
        assert_eq!(bot.respond("headtohead blazers zzz").await, vec!["Team not found."]);
        assert_eq!(bot.provider.calls(), vec!["find_teams blazers", "find_teams zzz"]);
    }

    #[tokio::test]
    async fn test_empty_game_log() {
        let bot = bot(FakeProvider { players: vec![dame()], ..Default::default() });
        assert_eq!(bot.respond("stats -l 5 damian lillard").await, vec!["No games found."]);
        assert_eq!(
            bot.provider.calls(),
            vec![
                "find_players damian lillard",
                "player_game_logs 203081 2021-22 last=Some(5) date=None",
            ]
        );
    }

    #[tokio::test]
    async fn test_last_n_games_average() {
        let bot = bot(FakeProvider {
            players: vec![dame()],
            game_logs: vec![log(20.0), log(30.0), log(10.0)],
            ..Default::default()
        });
        let lines = bot.respond("stats -l 3 dame").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Damian Lillard 20.0 PT"), "{}", lines[0]);
        assert!(lines[0].ends_with("(last 3 games)"), "{}", lines[0]);
    }

    #[tokio::test]
    async fn test_latest_game_prefers_live_box_score() {
        let line = LivePlayerLine {
            person_id: DAME,
            name: "Damian Lillard".into(),
            points: 28,
            minutes: "PT30M".into(),
            ..Default::default()
        };
        let bot = bot(FakeProvider {
            players: vec![dame()],
            profile: on_blazers(),
            scoreboard: live_board(2),
            box_score: LiveBoxScore {
                game_id: "0022100250".into(),
                status_text: "Q3 5:12".into(),
                home_players: vec![line.clone()],
                away_players: Vec::new(),
            },
            game_logs: vec![log(40.0)],
            ..Default::default()
        });
        assert_eq!(bot.respond("stats dame").await, vec![render::player::live_line(&line, "Q3 5:12")]);
        assert_eq!(
            bot.provider.calls(),
            vec![
                "find_players damian lillard",
                "player_profile 203081",
                "scoreboard 2021-11-23",
                "live_box_score 0022100250",
            ]
        );
    }

    #[tokio::test]
    async fn test_latest_game_overnight_reads_last_nights_slate() {
        let line = LivePlayerLine {
            person_id: DAME,
            name: "Damian Lillard".into(),
            points: 41,
            minutes: "PT40M".into(),
            ..Default::default()
        };
        let fake = || FakeProvider {
            players: vec![dame()],
            profile: on_blazers(),
            scoreboard: live_board(3),
            box_score: LiveBoxScore {
                game_id: "0022100250".into(),
                status_text: "Final".into(),
                home_players: vec![line.clone()],
                away_players: Vec::new(),
            },
            ..Default::default()
        };
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        let at = |h: u32| {
            let clock = LeagueClock::fixed(tz.with_ymd_and_hms(2021, 11, 24, h, 0, 0).unwrap());
            BotConfig::new(Settings::default(), Some("2021-22"), clock)
        };

        let bot = Bot::new(fake(), Arc::new(at(3)));
        assert_eq!(bot.respond("stats dame").await, vec![render::player::live_line(&line, "Final")]);
        assert_eq!(
            bot.provider.calls(),
            vec![
                "find_players damian lillard",
                "player_profile 203081",
                "scoreboard 2021-11-23",
                "live_box_score 0022100250",
            ]
        );

        let bot = Bot::new(fake(), Arc::new(at(9)));
        bot.respond("stats dame").await;
        assert_eq!(bot.provider.calls()[2], "scoreboard 2021-11-24");
    }

    #[tokio::test]
    async fn test_latest_game_falls_back_to_log_before_tipoff() {
        let bot = bot(FakeProvider {
            players: vec![dame()],
            profile: on_blazers(),
            scoreboard: live_board(1),
            game_logs: vec![log(40.0)],
            ..Default::default()
        });
        let today = config().clock.today();
        let expected = render::player::game_line(&log(40.0), today).unwrap();
        assert_eq!(bot.respond("stats dame").await, vec![expected]);
        assert!(!bot.provider.calls().iter().any(|c| c.starts_with("live_box_score")));
    }

    #[tokio::test]
    async fn test_stats_on_a_date_uses_that_season() {
        let bot = bot(FakeProvider { players: vec![dame()], ..Default::default() });
        assert_eq!(bot.respond("stats -d 2020-01-20 dame").await, vec!["No games found."]);
        assert_eq!(
            bot.provider.calls()[1],
            "player_game_logs 203081 2019-20 last=None date=Some(2020-01-20)"
        );
    }

    #[tokio::test]
    async fn test_bad_date_is_an_error_line() {
        let bot = bot(FakeProvider { players: vec![dame()], ..Default::default() });
        let lines = bot.respond("stats -d yesterday dame").await;
        assert_eq!(lines, vec!["Error: unrecognized date \"yesterday\""]);
    }

    #[tokio::test]
    async fn test_season_stats_selection() {
        let career = CareerStats {
            season_totals: vec![(
                SeasonType::Regular,
                vec![totals("2019-20", 1866.0), totals("2020-21", 1928.0)],
            )],
            ..Default::default()
        };
        let bot = bot(FakeProvider { players: vec![dame()], career, ..Default::default() });

        let latest = render::player::season_line("Damian Lillard", &totals("2020-21", 1928.0));
        let older = render::player::season_line("Damian Lillard", &totals("2019-20", 1866.0));
        assert_eq!(bot.respond("seasonstats dame").await, vec![latest.clone()]);
        assert_eq!(bot.respond("seasonstats -s 2019 dame").await, vec![older]);
        assert_eq!(bot.respond("seasonstats -s 1999 dame").await, vec![latest.clone()]);
        assert_eq!(bot.respond("seasonstats -s junk dame").await, vec![latest]);
        assert_eq!(bot.respond("seasonstats playoffs dame").await, vec!["No stats found."]);
    }

    #[tokio::test]
    async fn test_career_season_type_keyword() {
        let career = CareerStats {
            career_totals: vec![(SeasonType::Playoffs, vec![SeasonTotals { gp: 60.0, ..Default::default() }])],
            ..Default::default()
        };
        let bot = bot(FakeProvider { players: vec![dame()], career, ..Default::default() });
        assert_eq!(bot.respond("career dame").await, vec!["No stats found."]);
        assert_eq!(bot.respond("career playoffs dame").await.len(), 1);
    }

    #[tokio::test]
    async fn test_record_without_row() {
        let bot = bot(FakeProvider::default());
        assert_eq!(bot.respond("record blazers").await, vec!["Team record not found."]);
    }

    #[tokio::test]
    async fn test_win_chance_needs_a_started_game() {
        let bot = bot(FakeProvider { scoreboard: live_board(1), ..Default::default() });
        assert_eq!(bot.respond("winchance blazers").await, vec!["Live game not found."]);
        assert_eq!(bot.respond("playbyplay lakers").await, vec!["Live game not found."]);
    }

    #[tokio::test]
    async fn test_empty_slate() {
        let bot = bot(FakeProvider::default());
        assert_eq!(bot.respond("scores").await, vec!["No games found."]);
        assert_eq!(bot.respond("scores -a 1").await, vec!["No games found."]);
        assert_eq!(bot.respond("scores --topic").await, vec!["No games found."]);
        assert!(bot.provider.calls().contains(&"scoreboard 2021-11-22".to_string()));
    }

    #[tokio::test]
    async fn test_provider_failure_is_one_error_line() {
        let bot = bot(FakeProvider { players: vec![dame()], offline: true, ..Default::default() });
        assert_eq!(bot.respond("player dame").await, vec!["Error: provider offline"]);
    }

    #[tokio::test]
    async fn test_unknown_words_are_ignored() {
        let bot = bot(FakeProvider::default());
        assert!(bot.respond("").await.is_empty());
        assert!(bot.respond("hello there").await.is_empty());
        assert!(bot.respond("reload").await.is_empty());
        assert!(bot.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_grammar_errors_give_usage() {
        let bot = bot(FakeProvider::default());
        for line in ["stats", "stats -l 2 -d 2021-11-20 dame", "scores -a 1 -f 2", "headtohead blazers"] {
            let lines = bot.respond(line).await;
            assert_eq!(lines.len(), 1, "{line}");
            assert!(lines[0].starts_with("Usage:"), "{line}: {}", lines[0]);
        }
        assert!(bot.provider.calls().is_empty());
    }

    #[test]
    fn test_season_type_keyword() {
        let words = |s: &str| s.split(' ').map(String::from).collect::<Vec<_>>();
        let all = [SeasonType::AllStar, SeasonType::Playoffs, SeasonType::College];
        assert_eq!(
            split_season_type(&words("playoffs lebron james"), &all),
            (SeasonType::Playoffs, "lebron james".to_string())
        );
        assert_eq!(split_season_type(&words("playoffs"), &all), (SeasonType::Regular, "playoffs".to_string()));
        assert_eq!(
            split_season_type(&words("college zion"), &[SeasonType::Playoffs]),
            (SeasonType::Regular, "college zion".to_string())
        );
    }

    #[test]
    fn test_swap_config() {
        let mut bot = bot(FakeProvider::default());
        let mut next = config();
        next.prefix = "!".into();
        let old = bot.set_config(Arc::new(next));
        assert_eq!(old.prefix, "-");
        assert_eq!(bot.config().prefix, "!");
    }
}
