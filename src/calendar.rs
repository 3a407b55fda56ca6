use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::models::{GameRecord, GameWeek, LabeledGame};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses the provider's GAME_DATE column. Any time of day is discarded.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
}

pub fn game_week(date: NaiveDate) -> GameWeek {
    let iso = date.iso_week();
    GameWeek {
        year: iso.year(),
        week: iso.week(),
    }
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// First three letters of the day name, e.g. "Mon".
pub fn day_abbrev(day: Weekday) -> &'static str {
    &day_name(day)[..3]
}

pub fn label_game(game: GameRecord) -> LabeledGame {
    let week = game_week(game.game_date);
    let weekday = game.game_date.weekday();
    LabeledGame {
        game,
        week,
        weekday,
    }
}

pub fn label_games(games: Vec<GameRecord>) -> Vec<LabeledGame> {
    games.into_iter().map(label_game).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_supported_date_formats() {
        let expected = Some(date(2023, 10, 24));
        assert_eq!(parse_game_date("2023-10-24"), expected);
        assert_eq!(parse_game_date(" 2023-10-24 "), expected);
        assert_eq!(parse_game_date("2023-10-24 00:00:00"), expected);
        assert_eq!(parse_game_date("2023-10-24T19:30:00"), expected);
        assert_eq!(parse_game_date("10/24/2023"), expected);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_game_date(""), None);
        assert_eq!(parse_game_date("tomorrow"), None);
        assert_eq!(parse_game_date("2023-02-30"), None);
    }

    #[test]
    fn week_follows_iso_numbering_year() {
        assert_eq!(game_week(date(2024, 1, 1)), GameWeek { year: 2024, week: 1 });
        assert_eq!(game_week(date(2024, 12, 30)), GameWeek { year: 2025, week: 1 });
        assert_eq!(game_week(date(2021, 1, 3)), GameWeek { year: 2020, week: 53 });
        assert_eq!(game_week(date(2020, 12, 31)), GameWeek { year: 2020, week: 53 });
    }

    #[test]
    fn day_names_and_abbreviations() {
        assert_eq!(day_name(Weekday::Wed), "Wednesday");
        assert_eq!(day_abbrev(Weekday::Wed), "Wed");
        assert_eq!(day_abbrev(Weekday::Sun), "Sun");
    }

    #[test]
    fn labels_are_pure_functions_of_the_date() {
        let game = GameRecord {
            game_id: "0022300001".to_string(),
            game_date: date(2023, 12, 25),
            team_abbreviation: "LAL".to_string(),
            team_name: "Los Angeles Lakers".to_string(),
        };

        let first = label_game(game.clone());
        let second = label_game(game);
        assert_eq!(first, second);
        assert_eq!(first.week, GameWeek { year: 2023, week: 52 });
        assert_eq!(first.weekday, Weekday::Mon);
    }
}
