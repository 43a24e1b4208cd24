//! Static NBA team index. Franchise ids and names only change on relocation,
//! so they ship with the crate instead of being fetched.
use crate::TeamRef;

struct TeamEntry {
    id: u32,
    abbreviation: &'static str,
    nickname: &'static str,
    city: &'static str,
}

const TEAMS: [TeamEntry; 30] = [
    TeamEntry { id: 1610612737, abbreviation: "ATL", nickname: "Hawks", city: "Atlanta" },
    TeamEntry { id: 1610612738, abbreviation: "BOS", nickname: "Celtics", city: "Boston" },
    TeamEntry { id: 1610612739, abbreviation: "CLE", nickname: "Cavaliers", city: "Cleveland" },
    TeamEntry { id: 1610612740, abbreviation: "NOP", nickname: "Pelicans", city: "New Orleans" },
    TeamEntry { id: 1610612741, abbreviation: "CHI", nickname: "Bulls", city: "Chicago" },
    TeamEntry { id: 1610612742, abbreviation: "DAL", nickname: "Mavericks", city: "Dallas" },
    TeamEntry { id: 1610612743, abbreviation: "DEN", nickname: "Nuggets", city: "Denver" },
    TeamEntry { id: 1610612744, abbreviation: "GSW", nickname: "Warriors", city: "Golden State" },
    TeamEntry { id: 1610612745, abbreviation: "HOU", nickname: "Rockets", city: "Houston" },
    TeamEntry { id: 1610612746, abbreviation: "LAC", nickname: "Clippers", city: "Los Angeles" },
    TeamEntry { id: 1610612747, abbreviation: "LAL", nickname: "Lakers", city: "Los Angeles" },
    TeamEntry { id: 1610612748, abbreviation: "MIA", nickname: "Heat", city: "Miami" },
    TeamEntry { id: 1610612749, abbreviation: "MIL", nickname: "Bucks", city: "Milwaukee" },
    TeamEntry { id: 1610612750, abbreviation: "MIN", nickname: "Timberwolves", city: "Minnesota" },
    TeamEntry { id: 1610612751, abbreviation: "BKN", nickname: "Nets", city: "Brooklyn" },
    TeamEntry { id: 1610612752, abbreviation: "NYK", nickname: "Knicks", city: "New York" },
    TeamEntry { id: 1610612753, abbreviation: "ORL", nickname: "Magic", city: "Orlando" },
    TeamEntry { id: 1610612754, abbreviation: "IND", nickname: "Pacers", city: "Indiana" },
    TeamEntry { id: 1610612755, abbreviation: "PHI", nickname: "76ers", city: "Philadelphia" },
    TeamEntry { id: 1610612756, abbreviation: "PHX", nickname: "Suns", city: "Phoenix" },
    TeamEntry { id: 1610612757, abbreviation: "POR", nickname: "Trail Blazers", city: "Portland" },
    TeamEntry { id: 1610612758, abbreviation: "SAC", nickname: "Kings", city: "Sacramento" },
    TeamEntry { id: 1610612759, abbreviation: "SAS", nickname: "Spurs", city: "San Antonio" },
    TeamEntry { id: 1610612760, abbreviation: "OKC", nickname: "Thunder", city: "Oklahoma City" },
    TeamEntry { id: 1610612761, abbreviation: "TOR", nickname: "Raptors", city: "Toronto" },
    TeamEntry { id: 1610612762, abbreviation: "UTA", nickname: "Jazz", city: "Utah" },
    TeamEntry { id: 1610612763, abbreviation: "MEM", nickname: "Grizzlies", city: "Memphis" },
    TeamEntry { id: 1610612764, abbreviation: "WAS", nickname: "Wizards", city: "Washington" },
    TeamEntry { id: 1610612765, abbreviation: "DET", nickname: "Pistons", city: "Detroit" },
    TeamEntry { id: 1610612766, abbreviation: "CHA", nickname: "Hornets", city: "Charlotte" },
];

impl TeamEntry {
    fn to_ref(&self) -> TeamRef {
        TeamRef {
            id: self.id,
            full_name: format!("{} {}", self.city, self.nickname),
            nickname: self.nickname.to_owned(),
            abbreviation: self.abbreviation.to_owned(),
        }
    }
}

/// Teams whose full name contains `query` (case-insensitive), or whose
/// abbreviation or nickname equals it. Index order is preserved.
pub fn find_teams(query: &str) -> Vec<TeamRef> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    TEAMS
        .iter()
        .filter(|t| {
            format!("{} {}", t.city, t.nickname).to_lowercase().contains(&query)
                || t.abbreviation.eq_ignore_ascii_case(&query)
                || t.nickname.eq_ignore_ascii_case(&query)
        })
        .map(TeamEntry::to_ref)
        .collect()
}

pub fn team_by_id(id: u32) -> Option<TeamRef> {
    TEAMS.iter().find(|t| t.id == id).map(TeamEntry::to_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matches_full_name() {
        let teams = find_teams("blazers");
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].full_name, "Portland Trail Blazers");
        assert_eq!(teams[0].abbreviation, "POR");
    }

    #[test]
    fn city_shared_by_two_teams_keeps_index_order() {
        let teams = find_teams("los angeles");
        let abbrevs: Vec<&str> = teams.iter().map(|t| t.abbreviation.as_str()).collect();
        assert_eq!(abbrevs, vec!["LAC", "LAL"]);
    }

    #[test]
    fn abbreviation_matches_exactly() {
        assert_eq!(find_teams("gsw")[0].nickname, "Warriors");
        assert!(find_teams("").is_empty());
        assert!(find_teams("sonics").is_empty());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(team_by_id(1610612747).map(|t| t.abbreviation), Some("LAL".to_string()));
        assert!(team_by_id(1).is_none());
    }
}
