use crate::format::{self, DateError, avg, num, pct, signed};
use chrono::NaiveDate;
use nba_api::{LivePlayerLine, PlayerGameLog, PlayerProfile, SeasonRanks, SeasonTotals};

/// Counting stats of one box-score line, whatever feed it came from.
struct BoxLine {
    pts: f64,
    fgm: f64,
    fga: f64,
    ftm: f64,
    fta: f64,
    fg3m: f64,
    fg3a: f64,
    reb: f64,
    oreb: f64,
    ast: f64,
    blk: f64,
    stl: f64,
    tov: f64,
    pf: f64,
}

impl From<&PlayerGameLog> for BoxLine {
    fn from(g: &PlayerGameLog) -> Self {
        BoxLine {
            pts: g.pts,
            fgm: g.fgm,
            fga: g.fga,
            ftm: g.ftm,
            fta: g.fta,
            fg3m: g.fg3m,
            fg3a: g.fg3a,
            reb: g.reb,
            oreb: g.oreb,
            ast: g.ast,
            blk: g.blk,
            stl: g.stl,
            tov: g.tov,
            pf: g.pf,
        }
    }
}

impl From<&LivePlayerLine> for BoxLine {
    fn from(p: &LivePlayerLine) -> Self {
        BoxLine {
            pts: p.points.into(),
            fgm: p.fgm.into(),
            fga: p.fga.into(),
            ftm: p.ftm.into(),
            fta: p.fta.into(),
            fg3m: p.fg3m.into(),
            fg3a: p.fg3a.into(),
            reb: p.reb.into(),
            oreb: p.oreb.into(),
            ast: p.ast.into(),
            blk: p.blk.into(),
            stl: p.stl.into(),
            tov: p.tov.into(),
            pf: p.pf.into(),
        }
    }
}

impl BoxLine {
    fn render(&self, name: &str, minutes: &str) -> String {
        format!(
            "{name} {} PT {}-{} FG {}-{} FT {}-{} 3P {}/{} RB {} AS {} BL {} ST {} TO {} PF {minutes} MN",
            num(self.pts),
            num(self.fgm),
            num(self.fga),
            num(self.ftm),
            num(self.fta),
            num(self.fg3m),
            num(self.fg3a),
            num(self.reb),
            num(self.oreb),
            num(self.ast),
            num(self.blk),
            num(self.stl),
            num(self.tov),
            num(self.pf),
        )
    }
}

/// Bio line: birth date, team, body, draft and headline averages.
pub fn player_line(profile: &PlayerProfile, today: NaiveDate) -> Result<String, DateError> {
    let p = &profile.info;
    let born = if p.birthdate.trim().is_empty() {
        String::new()
    } else {
        format!(" {}", format::small_date(&p.birthdate, today)?)
    };
    let mut line = format!(
        "{}{born} ({} {} #{}) - {} {}lbs - {}",
        p.display_name, p.team_name, p.position, p.jersey, p.height, p.weight, p.school
    );
    if p.draft_year == "Undrafted" || p.draft_year.is_empty() {
        line.push_str(" (Undrafted)");
    } else {
        line.push_str(&format!(" (#{} R{} {})", p.draft_number, p.draft_round, p.draft_year));
    }
    if let Some(from) = p.from_year {
        let to = p.to_year.map(|y| y.to_string()).unwrap_or_default();
        line.push_str(&format!(" ({from}-{to})"));
    }
    if let Some(h) = &profile.headline {
        line.push_str(&format!(
            " | {}: {}pts {}ast {}reb",
            h.time_frame,
            num(h.pts),
            num(h.ast),
            num(h.reb)
        ));
    }
    Ok(line)
}

/// Per-game averages for a season or career totals row.
pub fn season_line(full_name: &str, t: &SeasonTotals) -> String {
    let mut parts = vec![full_name.to_string(), format!("{:.1} PT", avg(t.pts, t.gp))];
    for (label, made, attempted) in [("FG", t.fgm, t.fga), ("FT", t.ftm, t.fta), ("3P", t.fg3m, t.fg3a)] {
        parts.push(format!("{} of {:.1} {label}", pct(made, attempted), avg(attempted, t.gp)));
    }
    for (label, total) in [
        ("RB", t.reb),
        ("AS", t.ast),
        ("BLK", t.blk),
        ("ST", t.stl),
        ("TO", t.tov),
        ("PF", t.pf),
        ("MIN", t.min),
    ] {
        parts.push(format!("{:.1} {label}", avg(total, t.gp)));
    }
    parts.push(format!("{}/{} GS", num(t.gs), num(t.gp)));
    if let Some(season) = &t.season_id {
        let tag: Vec<&str> = [Some(season.as_str()), t.team_abbreviation.as_deref(), t.school_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        parts.push(format!("({})", tag.join(" ")));
    }
    parts.join(" ")
}

pub fn ranks_line(full_name: &str, r: &SeasonRanks) -> String {
    let mut parts = vec![full_name.to_string()];
    parts.extend(r.ranks.iter().map(|(stat, rank)| format::rank(stat, *rank)));
    if let Some(season) = &r.season_id {
        match &r.team_abbreviation {
            Some(team) => parts.push(format!("({season} {team})")),
            None => parts.push(format!("({season})")),
        }
    }
    parts.join(" ")
}

/// One finished game from the game log.
pub fn game_line(g: &PlayerGameLog, today: NaiveDate) -> Result<String, DateError> {
    let minutes = (g.min as i64).to_string();
    Ok(format!(
        "{} ({}) ({} {})",
        BoxLine::from(g).render(&g.player_name, &minutes),
        signed(g.plus_minus),
        format::short_date(&g.game_date, today)?,
        format::opp_from_matchup(&g.matchup)
    ))
}

/// A line from a game in progress, tagged with the game status.
pub fn live_line(p: &LivePlayerLine, status_text: &str) -> String {
    format!(
        "{} ({}) ({status_text})",
        BoxLine::from(p).render(&p.name, &format::live_minutes(&p.minutes)),
        signed(p.plus_minus)
    )
}

/// Averages over a run of games; `None` for an empty run.
pub fn aggregate_line(logs: &[PlayerGameLog]) -> Option<String> {
    let first = logs.first()?;
    let n = logs.len() as f64;
    let sum = |f: fn(&PlayerGameLog) -> f64| logs.iter().map(f).sum::<f64>();
    let minutes = logs.iter().map(|g| g.min.trunc()).sum::<f64>();

    let mut parts = vec![first.player_name.clone(), format!("{:.1} PT", avg(sum(|g| g.pts), n))];
    for (label, made, attempted) in [
        ("FG", sum(|g| g.fgm), sum(|g| g.fga)),
        ("FT", sum(|g| g.ftm), sum(|g| g.fta)),
        ("3P", sum(|g| g.fg3m), sum(|g| g.fg3a)),
    ] {
        parts.push(format!("{} of {:.1} {label}", pct(made, attempted), avg(attempted, n)));
    }
    for (label, total) in [
        ("RB", sum(|g| g.reb)),
        ("AS", sum(|g| g.ast)),
        ("BLK", sum(|g| g.blk)),
        ("ST", sum(|g| g.stl)),
        ("TO", sum(|g| g.tov)),
        ("PF", sum(|g| g.pf)),
        ("MN", minutes),
    ] {
        parts.push(format!("{:.1} {label}", avg(total, n)));
    }
    parts.push(format!("(last {} games)", logs.len()));
    Some(parts.join(" "))
}
