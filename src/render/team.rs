use crate::format::{self, DateError, num, win_pct};
use crate::resolve::SeasonKey;
use chrono::NaiveDate;
use nba_api::{Roster, StandingsRow, TeamDetails, TeamGameLog, TeamRef};

/// Conference filter for standings and lottery views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub fn label(self) -> &'static str {
        match self {
            Conference::East => "East",
            Conference::West => "West",
        }
    }
}

const STANDINGS_ROWS: usize = 12;
const LOTTERY_TEAMS: usize = 14;
const PLAYOFF_SPOTS: usize = 7;

/// `(W3)` from a streak like `W 3`; empty when there is no streak.
fn streak_tag(row: &StandingsRow) -> String {
    row.streak
        .as_deref()
        .map(|s| format!(" ({})", s.replace(' ', "")))
        .unwrap_or_default()
}

fn sorted_by_pct(rows: &[StandingsRow], descending: bool) -> Vec<&StandingsRow> {
    let mut rows: Vec<&StandingsRow> = rows.iter().collect();
    rows.sort_by(|a, b| {
        let ord = a.win_pct.total_cmp(&b.win_pct);
        if descending { ord.reverse() } else { ord }
    });
    rows
}

/// Arena, franchise history, front office and titles.
///
/// An era still running in `season` prints open-ended (`1970-`).
pub fn team_line(team: &TeamRef, d: &TeamDetails, season: SeasonKey) -> String {
    let mut line = format!("{}: {}", team.full_name, d.arena);
    if let Some(capacity) = d.arena_capacity {
        line.push_str(&format!(" {}", format::thousands(capacity)));
    }
    if !d.history.is_empty() {
        let eras: Vec<String> = d
            .history
            .iter()
            .map(|era| {
                let until = if i32::from(era.year_active_till) >= season.start_year() {
                    String::new()
                } else {
                    era.year_active_till.to_string()
                };
                format!("{} {} {}-{until}", era.city, era.nickname, era.year_founded)
            })
            .collect();
        line.push_str(&format!(" ({})", eras.join(", ")));
    }
    line.push_str(&format!(" | o: {} gm: {} c: {}", d.owner, d.general_manager, d.head_coach));
    if !d.championships.is_empty() {
        let years: Vec<String> = d.championships.iter().map(u16::to_string).collect();
        line.push_str(&format!(" | 🏆 {}", years.join(",")));
    }
    line
}

/// ` 2019-20` when `season` is not the current one.
fn season_suffix(season: SeasonKey, current: SeasonKey) -> String {
    if season == current { String::new() } else { format!(" {season}") }
}

pub fn roster_line(team: &TeamRef, roster: &Roster, season: SeasonKey, current: SeasonKey) -> String {
    let mut parts = vec![format!("{}{}:", team.full_name, season_suffix(season, current))];
    if let Some(coach) = roster.coaches.iter().find(|c| c.is_head_coach) {
        parts.push(format!("Coach - {}", coach.name));
    }
    parts.extend(roster.players.iter().map(|p| format!("#{} {}", p.number, p.name)));
    parts.join(" ")
}

/// Record line; `None` when the team has no row in `rows`.
pub fn record_line(
    team: &TeamRef,
    rows: &[StandingsRow],
    season: SeasonKey,
    current: SeasonKey,
) -> Option<String> {
    let row = rows.iter().find(|r| r.team_id == team.id)?;
    let mut line = format!(
        "{}{} (#{} Playoff): {}-{} ({}) {} Conf {} Home {} Road",
        team.full_name,
        season_suffix(season, current),
        row.playoff_rank,
        row.wins,
        row.losses,
        win_pct(row.win_pct),
        row.conference_record,
        row.home,
        row.road,
    );
    if season == current {
        line.push_str(&format!(" {} L10{}", row.last_ten, streak_tag(row)));
    }
    Some(line)
}

pub fn standings_line(
    rows: &[StandingsRow],
    conference: Option<Conference>,
    season: SeasonKey,
    current: SeasonKey,
) -> String {
    let teams: Vec<String> = sorted_by_pct(rows, true)
        .into_iter()
        .filter(|r| conference.is_none_or(|c| r.conference == c.label()))
        .take(STANDINGS_ROWS)
        .enumerate()
        .map(|(i, r)| {
            format!("{}. {} {}-{} {}{}", i + 1, r.team_name, r.wins, r.losses, win_pct(r.win_pct), streak_tag(r))
        })
        .collect();
    let season_text = if season == current { String::new() } else { format!("{season} ") };
    let conf = conference.map(Conference::label).unwrap_or("NBA");
    format!("{season_text}{conf} Standings: {}", teams.join(" "))
}

/// Draft-lottery order. League-wide: the worst records first. For one
/// conference: the teams seeded below the playoff spots.
pub fn lottery_line(rows: &[StandingsRow], conference: Option<Conference>) -> String {
    let entry = |i: usize, r: &StandingsRow| {
        format!("{}. {} {}-{} {}", i + 1, r.team_name, r.wins, r.losses, win_pct(r.win_pct))
    };
    let teams: Vec<String> = match conference {
        None => sorted_by_pct(rows, false)
            .into_iter()
            .take(LOTTERY_TEAMS)
            .enumerate()
            .map(|(i, r)| entry(i, r))
            .collect(),
        Some(c) => sorted_by_pct(rows, true)
            .into_iter()
            .filter(|r| r.conference == c.label())
            .enumerate()
            .skip(PLAYOFF_SPOTS)
            .map(|(i, r)| entry(i, r))
            .collect(),
    };
    let conf = conference.map(Conference::label).unwrap_or("NBA");
    format!("{conf} Lottery: {}", teams.join("  "))
}

/// `11/23 vs. LAL W 110-105 | ...`; `None` when there are no games.
pub fn team_scores_line(logs: &[TeamGameLog], today: NaiveDate) -> Result<Option<String>, DateError> {
    if logs.is_empty() {
        return Ok(None);
    }
    let games = logs
        .iter()
        .map(|g| {
            Ok(format!(
                "{} {} {} {}-{}",
                format::small_date(&g.game_date, today)?,
                format::opp_from_matchup(&g.matchup),
                g.wl,
                num(g.pts),
                num(g.opponent_points())
            ))
        })
        .collect::<Result<Vec<_>, DateError>>()?;
    Ok(Some(games.join(" | ")))
}

/// Season series of `team` against `opponent`, from `team`'s game list.
pub fn head_to_head_line(team: &TeamRef, opponent: &TeamRef, games: &[TeamGameLog]) -> Result<String, DateError> {
    let mut wins = 0;
    let mut losses = 0;
    let mut list = Vec::new();
    for g in games.iter().filter(|g| g.matchup.ends_with(opponent.abbreviation.as_str())) {
        if g.wl == "W" {
            wins += 1;
        } else {
            losses += 1;
        }
        list.push(format!(
            "{} {} {} {}-{}",
            format::h2h_date(&g.game_date)?,
            format::opp_from_matchup(&g.matchup),
            g.wl,
            num(g.pts),
            num(g.opponent_points())
        ));
    }
    let mut line = format!("{} vs {} {wins}-{losses}", team.nickname, opponent.nickname);
    if !list.is_empty() {
        line.push_str(&format!(" | {}", list.join(" | ")));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::{Coach, RosterPlayer, TeamEra, teams};

    fn blazers() -> TeamRef {
        teams::find_teams("blazers").remove(0)
    }

    fn lakers() -> TeamRef {
        teams::find_teams("lakers").remove(0)
    }

    fn row(team_id: u32, name: &str, conf: &str, wins: u16, losses: u16) -> StandingsRow {
        StandingsRow {
            team_id,
            team_name: name.into(),
            conference: conf.into(),
            wins,
            losses,
            win_pct: f64::from(wins) / f64::from(wins + losses),
            streak: Some("W 2".into()),
            last_ten: "6-4".into(),
            conference_record: "8-6".into(),
            home: "7-3".into(),
            road: "3-7".into(),
            playoff_rank: 6,
        }
    }

    fn league() -> Vec<StandingsRow> {
        let mut rows = Vec::new();
        for i in 0..15u16 {
            rows.push(row(1000 + u32::from(i), &format!("East{i}"), "East", 30 - i, 10 + i));
            rows.push(row(2000 + u32::from(i), &format!("West{i}"), "West", 31 - i, 9 + i));
        }
        rows
    }

    fn season(y: i32) -> SeasonKey {
        SeasonKey::new(y)
    }

    #[test]
    fn test_team_line() {
        let details = TeamDetails {
            arena: "Moda Center".into(),
            arena_capacity: Some(19441),
            owner: "Jody Allen".into(),
            general_manager: "Joe Cronin".into(),
            head_coach: "Chauncey Billups".into(),
            history: vec![TeamEra {
                city: "Portland".into(),
                nickname: "Trail Blazers".into(),
                year_founded: 1970,
                year_active_till: 2021,
            }],
            championships: vec![1977],
        };
        assert_eq!(
            team_line(&blazers(), &details, season(2021)),
            "Portland Trail Blazers: Moda Center 19,441 (Portland Trail Blazers 1970-) | o: Jody Allen gm: Joe Cronin c: Chauncey Billups | 🏆 1977"
        );
    }

    #[test]
    fn test_team_line_closed_eras_and_no_titles() {
        let details = TeamDetails {
            arena: "Arena".into(),
            history: vec![
                TeamEra { city: "Buffalo".into(), nickname: "Braves".into(), year_founded: 1970, year_active_till: 1977 },
                TeamEra { city: "San Diego".into(), nickname: "Clippers".into(), year_founded: 1978, year_active_till: 1983 },
            ],
            ..Default::default()
        };
        let line = team_line(&blazers(), &details, season(2021));
        assert!(line.contains("(Buffalo Braves 1970-1977, San Diego Clippers 1978-1983)"), "{line}");
        assert!(!line.contains('🏆'));
    }

    #[test]
    fn test_roster_line() {
        let roster = Roster {
            coaches: vec![
                Coach { name: "Scott Brooks".into(), is_head_coach: false },
                Coach { name: "Chauncey Billups".into(), is_head_coach: true },
            ],
            players: vec![
                RosterPlayer { number: "0".into(), name: "Damian Lillard".into() },
                RosterPlayer { number: "9".into(), name: "Jerami Grant".into() },
            ],
        };
        assert_eq!(
            roster_line(&blazers(), &roster, season(2021), season(2021)),
            "Portland Trail Blazers: Coach - Chauncey Billups #0 Damian Lillard #9 Jerami Grant"
        );
        assert!(roster_line(&blazers(), &roster, season(2019), season(2021)).starts_with("Portland Trail Blazers 2019-20: "));
    }

    #[test]
    fn test_record_line_current_season_has_streak() {
        let rows = vec![row(blazers().id, "Trail Blazers", "West", 10, 10)];
        assert_eq!(
            record_line(&blazers(), &rows, season(2021), season(2021)).unwrap(),
            "Portland Trail Blazers (#6 Playoff): 10-10 (.500) 8-6 Conf 7-3 Home 3-7 Road 6-4 L10 (W2)"
        );
        assert_eq!(
            record_line(&blazers(), &rows, season(2019), season(2021)).unwrap(),
            "Portland Trail Blazers 2019-20 (#6 Playoff): 10-10 (.500) 8-6 Conf 7-3 Home 3-7 Road"
        );
        assert!(record_line(&lakers(), &rows, season(2021), season(2021)).is_none());
    }

    #[test]
    fn test_standings_caps_at_twelve() {
        let line = standings_line(&league(), None, season(2021), season(2021));
        assert!(line.starts_with("NBA Standings: 1. West0 31-9 .775 (W2) 2. East0 30-10 .750 (W2)"), "{line}");
        assert!(line.contains("12. "));
        assert!(!line.contains("13. "));
    }

    #[test]
    fn test_standings_by_conference_and_season() {
        let line = standings_line(&league(), Some(Conference::East), season(2019), season(2021));
        assert!(line.starts_with("2019-20 East Standings: 1. East0 30-10 .750"), "{line}");
        assert!(!line.contains("West"));
    }

    #[test]
    fn test_lottery_league_wide_is_worst_first() {
        let line = lottery_line(&league(), None);
        assert!(line.starts_with("NBA Lottery: 1. East14 16-24 .400  2. East13 17-23 .425"), "{line}");
        assert!(line.contains("14. "));
        assert!(!line.contains("15. "));
    }

    #[test]
    fn test_lottery_conference_skips_playoff_seeds() {
        let line = lottery_line(&league(), Some(Conference::West));
        assert!(line.starts_with("West Lottery: 8. West7 24-16 .600"), "{line}");
        assert!(line.ends_with("15. West14 17-23 .425"), "{line}");
    }

    #[test]
    fn test_team_scores_line() {
        let today = NaiveDate::from_ymd_opt(2021, 12, 1).unwrap();
        let logs = vec![
            TeamGameLog { game_date: "2021-11-23T00:00:00".into(), matchup: "POR vs. LAL".into(), wl: "W".into(), pts: 107.0, plus_minus: 3.0 },
            TeamGameLog { game_date: "2021-11-21T00:00:00".into(), matchup: "POR @ UTA".into(), wl: "L".into(), pts: 96.0, plus_minus: -7.0 },
        ];
        assert_eq!(
            team_scores_line(&logs, today).unwrap().unwrap(),
            "11/23 vs. LAL W 107-104 | 11/21 @ UTA L 96-103"
        );
        assert!(team_scores_line(&[], today).unwrap().is_none());
    }

    #[test]
    fn test_head_to_head() {
        let games = vec![
            TeamGameLog { game_date: "2021-11-05".into(), matchup: "POR vs. LAL".into(), wl: "W".into(), pts: 105.0, plus_minus: 15.0 },
            TeamGameLog { game_date: "2021-11-07".into(), matchup: "POR @ UTA".into(), wl: "L".into(), pts: 100.0, plus_minus: -5.0 },
            TeamGameLog { game_date: "2022-01-10".into(), matchup: "POR @ LAL".into(), wl: "L".into(), pts: 101.0, plus_minus: -2.0 },
        ];
        assert_eq!(
            head_to_head_line(&blazers(), &lakers(), &games).unwrap(),
            "Trail Blazers vs Lakers 1-1 | 11/5 vs. LAL W 105-90 | 1/10 @ LAL L 101-103"
        );
    }
}
