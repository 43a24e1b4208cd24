//! Small, pure text helpers shared by every renderer.
use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Debug, thiserror::Error)]
#[error("unrecognized date {0:?}")]
pub struct DateError(pub String);

/// `total / count` rounded to one decimal; zero when either side is zero.
pub fn avg(total: f64, count: f64) -> f64 {
    if total == 0.0 || count == 0.0 {
        return 0.0;
    }
    (total / count * 10.0).round() / 10.0
}

/// Shooting-percentage style: `.487`, `1.000` for a perfect line, `.000`
/// when nothing was attempted or made.
pub fn pct(made: f64, attempts: f64) -> String {
    if made == 0.0 || attempts == 0.0 {
        return ".000".to_string();
    }
    if made == attempts {
        return "1.000".to_string();
    }
    let s = format!("{:.3}", made / attempts);
    s.strip_prefix('0').map(str::to_owned).unwrap_or(s)
}

/// Standings win percentage, same shape as [`pct`].
pub fn win_pct(value: f64) -> String {
    if value >= 1.0 {
        return "1.000".to_string();
    }
    let s = format!("{:.3}", value.max(0.0));
    s.strip_prefix('0').map(str::to_owned).unwrap_or(s)
}

/// A fraction as a percentage to at most two decimals: `61.0`, `61.23`.
pub fn chance(fraction: f64) -> String {
    let value = (fraction * 10_000.0).round() / 100.0;
    if value.fract() == 0.0 { format!("{value:.1}") } else { value.to_string() }
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// `19th PTS`, or `NR PTS` for an unranked stat.
pub fn rank(stat: &str, rank: Option<u32>) -> String {
    match rank {
        Some(r) => format!("{} {stat}", ordinal(r)),
        None => format!("NR {stat}"),
    }
}

/// Whole numbers print without a fraction.
pub fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Plus/minus: `+` only when strictly positive.
pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", num(value))
    } else {
        num(value)
    }
}

pub fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Accepts `2021-11-23T00:00:00`, `2021-11-23`, `Nov 23, 2021`,
/// `11/23/2021` and `11/23/21`.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let text = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    let slash_format = match text.rsplit_once('/') {
        Some((_, year)) if year.len() == 2 => "%m/%d/%y",
        _ => "%m/%d/%Y",
    };
    ["%Y-%m-%d", "%b %d, %Y", slash_format]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| DateError(text.to_owned()))
}

/// `11/23`, with a two-digit year outside the current one.
pub fn small_date(text: &str, today: NaiveDate) -> Result<String, DateError> {
    let date = parse_date(text)?;
    let fmt = if date.year() == today.year() { "%-m/%-d" } else { "%-m/%-d/%y" };
    Ok(date.format(fmt).to_string())
}

/// `Nov 23`, with the full year outside the current one.
pub fn short_date(text: &str, today: NaiveDate) -> Result<String, DateError> {
    let date = parse_date(text)?;
    let fmt = if date.year() == today.year() { "%b %-d" } else { "%b %-d, %Y" };
    Ok(date.format(fmt).to_string())
}

/// `Tue 11/23`
pub fn schedule_date(text: &str) -> Result<String, DateError> {
    Ok(parse_date(text)?.format("%a %-m/%-d").to_string())
}

pub fn h2h_date(text: &str) -> Result<String, DateError> {
    Ok(parse_date(text)?.format("%-m/%-d").to_string())
}

/// Cut `word` to `length` chars plus a period. A word at most one char over
/// the limit is left alone, since the period would save nothing.
pub fn shorten(word: &str, length: usize) -> String {
    if word.chars().count() <= length + 1 {
        return word.to_string();
    }
    let head: String = word.chars().take(length).collect();
    format!("{head}.")
}

/// `"LAL @ BOS"` -> `"@ BOS"`, `"LAL vs. BOS"` -> `"vs. BOS"`.
pub fn opp_from_matchup(matchup: &str) -> &str {
    matchup
        .find('@')
        .or_else(|| matchup.find("vs."))
        .map(|i| &matchup[i..])
        .unwrap_or(matchup)
}

/// ISO-8601 game clock `PT08M17.00S` -> `08:17`.
pub fn game_clock(clock: &str) -> String {
    clock
        .trim_start_matches("PT")
        .replacen('M', ":", 1)
        .trim_end_matches('S')
        .trim_end_matches(".00")
        .to_string()
}

pub fn period_label(period: u8) -> String {
    match period {
        1..=4 => format!("Q{period}"),
        0 => String::new(),
        n => format!("OT{}", n - 4),
    }
}

/// Live minutes `PT24M` / `PT07M` -> `24` / `7`.
pub fn live_minutes(minutes: &str) -> String {
    let m = minutes
        .trim_start_matches("PT")
        .trim_start_matches('0')
        .trim_end_matches('M');
    if m.is_empty() { "0".to_string() } else { m.to_string() }
}
