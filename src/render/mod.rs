//! Records in, chat lines out. Nothing in here talks to the provider.

pub mod player;
pub mod scores;
pub mod team;

pub const PLAYER_NOT_FOUND: &str = "Player not found.";
pub const TEAM_NOT_FOUND: &str = "Team not found.";
pub const NO_GAMES: &str = "No games found.";
pub const NO_STATS: &str = "No stats found.";
pub const NO_RECORD: &str = "Team record not found.";
pub const NO_LIVE_GAME: &str = "Live game not found.";
pub const NO_WIN_PROBABILITY: &str = "Win probability not available.";
pub const NO_PLAYS: &str = "No plays yet.";
