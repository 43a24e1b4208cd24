//! Free text to canonical ids: players (through the nickname table), teams
//! and season labels.
use chrono::{Datelike, NaiveDate};
use nba_api::client::ApiResult;
use nba_api::{PlayerRef, StatsProvider, TeamRef};
use std::collections::HashMap;
use std::fmt;

pub const NICKNAMES: [(&str, &str); 7] = [
    ("steph", "stephen curry"),
    ("steph curry", "stephen curry"),
    ("cp3", "chris paul"),
    ("pg", "paul george"),
    ("dame", "damian lillard"),
    ("shaq", "shaquille o'neal"),
    ("freedom", "enes kanter"),
];

/// Look `text` up in the player index after nickname substitution (exact,
/// case-sensitive). The first active match wins, else the first match.
pub async fn resolve_player<P: StatsProvider + ?Sized>(
    provider: &P,
    nicknames: &HashMap<String, String>,
    text: &str,
) -> ApiResult<Option<PlayerRef>> {
    let name = nicknames.get(text).map(String::as_str).unwrap_or(text);
    let mut matches = provider.find_players(name).await?;
    if let Some(i) = matches.iter().position(|p| p.is_active) {
        return Ok(Some(matches.swap_remove(i)));
    }
    Ok(matches.into_iter().next())
}

pub async fn resolve_team<P: StatsProvider + ?Sized>(
    provider: &P,
    text: &str,
) -> ApiResult<Option<TeamRef>> {
    Ok(provider.find_teams(text).await?.into_iter().next())
}

/// A season label such as `2021-22`, keyed by the year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeasonKey {
    start_year: i32,
}

impl SeasonKey {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// `2021`, `2021-22` and `21` all read as 2021-22. Two-digit years
    /// above 35 are 19xx. Anything without a leading year is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let digits: String = token.trim().chars().take_while(char::is_ascii_digit).collect();
        let year = if digits.len() >= 4 {
            digits[..4].parse::<i32>().ok()?
        } else if digits.len() >= 2 {
            let short = digits[..2].parse::<i32>().ok()?;
            if short > 35 { 1900 + short } else { 2000 + short }
        } else {
            return None;
        };
        Some(Self::new(year))
    }

    /// Seasons start in the fall: dates before July belong to the season
    /// that began the previous year.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() < 7 {
            Self::new(date.year() - 1)
        } else {
            Self::new(date.year())
        }
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}
