use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One team's side of a game, as supplied by the stats provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub team_abbreviation: String,
    pub team_name: String,
}

/// ISO-8601 week bucket. `year` is the week-numbering year, which differs
/// from the calendar year for a few days around New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameWeek {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for GameWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledGame {
    pub game: GameRecord,
    pub week: GameWeek,
    pub weekday: Weekday,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedGame {
    pub game: LabeledGame,
    pub back_to_back: bool,
    /// Weekday of the team's previous game; only set when `back_to_back` is true.
    pub prev_weekday: Option<Weekday>,
}

/// One row of the processed table: a team's games in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    #[serde(rename = "TEAM_ABBREVIATION")]
    pub team_abbreviation: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "WEEK")]
    pub week: u32,
    pub games_played: usize,
    pub back_to_backs: usize,
    pub b2b_days: String,
}

impl WeeklySummary {
    pub fn game_week(&self) -> GameWeek {
        GameWeek {
            year: self.year,
            week: self.week,
        }
    }

    pub fn has_back_to_back(&self) -> bool {
        self.back_to_backs > 0
    }
}

/// Games and participating teams across one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTotal {
    pub week: GameWeek,
    pub team_count: usize,
    pub games_played: usize,
    pub back_to_backs: usize,
}
