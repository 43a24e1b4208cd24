use crate::format::{self, DateError};
use chrono::NaiveDate;
use nba_api::{GameHeader, GameLeader, LineScore, LiveGame, PlayAction, Scoreboard, TeamRef, WinProbabilityPoint, teams};

pub const STATUS_SCHEDULED: u8 = 1;
pub const STATUS_LIVE: u8 = 2;

fn nickname(team_id: u32) -> String {
    teams::team_by_id(team_id).map(|t| t.nickname).unwrap_or_else(|| team_id.to_string())
}

fn abbreviation(team_id: u32) -> String {
    teams::team_by_id(team_id).map(|t| t.abbreviation).unwrap_or_else(|| team_id.to_string())
}

/// The side with more points; ties go to the visitors.
pub fn points_leader(game: &LiveGame) -> &GameLeader {
    if game.home_leader.points > game.away_leader.points {
        &game.home_leader
    } else {
        &game.away_leader
    }
}

/// `Suns vs Lakers 10:00 pm ET [TNT]`
fn upcoming_entry(g: &GameHeader) -> String {
    let mut entry = format!(
        "{} vs {} {}",
        nickname(g.home_team_id),
        nickname(g.visitor_team_id),
        g.status_text
    );
    if let Some(tv) = &g.national_tv {
        entry.push_str(&format!(" [{tv}]"));
    }
    entry
}

/// `POR 80 LAL 77 Lillard 28/4/7 Q3 5:12`
fn live_entry(g: &LiveGame, leader_last_name: Option<&str>) -> String {
    let mut entry = format!("{} {} {} {}", g.home.tricode, g.home.score, g.away.tricode, g.away.score);
    if let Some(name) = leader_last_name {
        let leader = points_leader(g);
        entry.push_str(&format!(
            " {} {}/{}/{}",
            format::shorten(name, 8),
            leader.points,
            leader.rebounds,
            leader.assists
        ));
    }
    if g.status == STATUS_LIVE {
        entry.push_str(&format!(" {}", g.status_text));
    }
    entry
}

/// Finished games from the line scores: two consecutive rows per game.
fn final_entries(lines: &[LineScore]) -> Vec<(&LineScore, String)> {
    let scored: Vec<&LineScore> = lines.iter().filter(|l| l.pts.is_some()).collect();
    scored
        .windows(2)
        .filter(|pair| pair[0].game_id == pair[1].game_id)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let entry = format!(
                "{} {} {} {}",
                a.team_abbreviation,
                a.pts.unwrap_or_default(),
                b.team_abbreviation,
                b.pts.unwrap_or_default()
            );
            (a, entry)
        })
        .collect()
}

/// Future slates lead with the weekday (`Wed 11/24`), others with the
/// short date.
fn slate_label(game_date: &str, today: NaiveDate) -> Result<String, DateError> {
    if format::parse_date(game_date)? > today {
        format::schedule_date(game_date)
    } else {
        format::short_date(game_date, today)
    }
}

/// One line for a day's slate: games yet to start, then either today's live
/// results (`live` set) or the day's final scores. `None` when empty.
pub fn scoreboard_line(
    board: &Scoreboard,
    live: Option<&[(LiveGame, Option<String>)]>,
    today: NaiveDate,
) -> Result<Option<String>, DateError> {
    let upcoming: Vec<&GameHeader> = board.games.iter().filter(|g| g.status_id == STATUS_SCHEDULED).collect();
    let mut label = match upcoming.first() {
        Some(g) => Some(format!("🏀{}", slate_label(&g.game_date, today)?)),
        None => None,
    };
    let mut entries: Vec<String> = upcoming.into_iter().map(upcoming_entry).collect();

    match live {
        Some(games) => {
            for (game, leader) in games.iter().filter(|(g, _)| g.status != STATUS_SCHEDULED) {
                entries.push(live_entry(game, leader.as_deref()));
                label.get_or_insert_with(|| "Today".to_string());
            }
        }
        None => {
            for (line, entry) in final_entries(&board.line_scores) {
                if label.is_none() {
                    label = Some(format!("🏀{}", format::short_date(&line.game_date, today)?));
                }
                entries.push(entry);
            }
        }
    }

    Ok(label
        .filter(|_| !entries.is_empty())
        .map(|label| format!("{label}: {}", entries.join(" | "))))
}

/// Compact channel-topic summary. Games not yet over read visitor first,
/// `LAL@POR`, as schedules print them. Finished games flip to home first
/// with the winner's side of the comparison open: `POR>LAL` / `POR<LAL`.
/// Neither form is a plain `home@visitor` listing.
pub fn topic_line(board: &Scoreboard, live: &[LiveGame]) -> Option<String> {
    let mut entries: Vec<String> = board
        .games
        .iter()
        .filter(|g| g.status_id == STATUS_SCHEDULED)
        .map(|g| format!("{}@{}", abbreviation(g.visitor_team_id), abbreviation(g.home_team_id)))
        .collect();
    for g in live.iter().filter(|g| g.status != STATUS_SCHEDULED) {
        if g.status == STATUS_LIVE {
            entries.push(format!("{}@{}", g.away.tricode, g.home.tricode));
        } else {
            let sign = if g.home.score > g.away.score { '>' } else { '<' };
            entries.push(format!("{}{sign}{}", g.home.tricode, g.away.tricode));
        }
    }
    (!entries.is_empty()).then(|| entries.join(" "))
}

/// Latest win probability for `team_is_home`'s side, skipping trailing
/// zero rows. `None` when the series has no usable row.
pub fn win_chance_line(
    home: &TeamRef,
    visitor: &TeamRef,
    team_is_home: bool,
    points: &[WinProbabilityPoint],
) -> Option<String> {
    let (point, chance) = points.iter().rev().find_map(|p| {
        let pct = if team_is_home { p.home_pct } else { p.visitor_pct };
        pct.filter(|v| *v != 0.0).map(|v| (p, v))
    })?;
    let team = if team_is_home { home } else { visitor };
    Some(format!(
        "{} {} - {} {} | {} win chance: {}%",
        home.nickname,
        point.home_pts.unwrap_or_default(),
        visitor.nickname,
        point.visitor_pts.unwrap_or_default(),
        team.nickname,
        format::chance(chance)
    ))
}

/// Score and clock of the latest described play, then the last three
/// descriptions in order.
pub fn play_by_play_line(home: &TeamRef, visitor: &TeamRef, actions: &[PlayAction]) -> Option<String> {
    let described: Vec<(&PlayAction, &str)> = actions
        .iter()
        .filter_map(|a| a.description.as_deref().map(|d| (a, d)))
        .collect();
    let recent = &described[described.len().saturating_sub(3)..];
    let (last, _) = recent.last()?;

    let mut line = format!(
        "{} {} - {} {} ({} {})",
        home.nickname,
        last.score_home,
        visitor.nickname,
        last.score_away,
        format::game_clock(&last.clock),
        format::period_label(last.period)
    );
    for (_, description) in recent {
        line.push_str(&format!(" | {description}"));
    }
    Some(line)
}
