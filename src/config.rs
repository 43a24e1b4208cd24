use crate::clock::LeagueClock;
use crate::error::{BotError, Result};
use crate::resolve::{NICKNAMES, SeasonKey};
use clap::Parser;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "hoopsbot", version, about = "Basketball stats bot for a chat room")]
pub struct Cli {
    /// WebSocket chat relay to join
    #[arg(long, env = "HOOPS_CHAT_WS", default_value = "ws://127.0.0.1:8787")]
    pub chat_ws: String,

    /// Room to answer in
    #[arg(long, env = "HOOPS_CHAT_ROOM", default_value = "nba")]
    pub room: String,

    /// Name the bot posts under
    #[arg(long, env = "HOOPS_BOT_NICK", default_value = "hoopsbot")]
    pub nick: String,

    /// TOML settings file; reread by the `reload` command
    #[arg(long, env = "HOOPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Current season, e.g. 2021-22 (overrides the settings file)
    #[arg(long, env = "HOOPS_SEASON")]
    pub season: Option<String>,

    /// League time zone as hours from UTC
    #[arg(
        long,
        env = "HOOPS_UTC_OFFSET",
        default_value_t = -8,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i32).range(-23..=23)
    )]
    pub utc_offset: i32,

    /// Answer one command (without prefix) on stdout and exit
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Contents of the optional settings file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub current_season: Option<String>,
    /// Games listed by `scores <team>`.
    pub team_scores_games: u32,
    pub command_prefix: String,
    /// Chat names allowed to run `reload`.
    pub admins: Vec<String>,
    /// Extra player nicknames, merged over the built-in table.
    pub nicknames: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_season: None,
            team_scores_games: 7,
            command_prefix: "-".to_string(),
            admins: Vec::new(),
            nicknames: HashMap::new(),
        }
    }
}

impl Settings {
    /// No path means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|source| BotError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Everything a command needs besides the provider. Immutable once built;
/// a reload builds a new one.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub season: SeasonKey,
    pub team_scores_games: u32,
    pub prefix: String,
    pub admins: Vec<String>,
    pub nicknames: HashMap<String, String>,
    pub clock: LeagueClock,
}

impl BotConfig {
    /// Season precedence: `season_override`, then the settings file, then
    /// the season in progress on the league clock.
    pub fn new(settings: Settings, season_override: Option<&str>, clock: LeagueClock) -> Self {
        let season = season_override
            .or(settings.current_season.as_deref())
            .and_then(SeasonKey::parse)
            .unwrap_or_else(|| SeasonKey::for_date(clock.today()));

        let mut nicknames: HashMap<String, String> =
            NICKNAMES.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        nicknames.extend(settings.nicknames);

        Self {
            season,
            team_scores_games: settings.team_scores_games.max(1),
            prefix: settings.command_prefix,
            admins: settings.admins,
            nicknames,
            clock,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = Settings::load(cli.config.as_deref())?;
        Ok(Self::new(settings, cli.season.as_deref(), LeagueClock::new(cli.utc_offset)))
    }

    pub fn is_admin(&self, nick: &str) -> bool {
        self.admins.iter().any(|a| a == nick)
    }
}
