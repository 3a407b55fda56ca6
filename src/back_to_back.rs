use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use log::{debug, trace};

use crate::models::{FlaggedGame, LabeledGame};

/// Splits games into per-team schedules and flags every game played the day
/// after that team's previous game. Output is grouped by team (alphabetical),
/// date-ascending within each team.
pub fn mark_back_to_backs(games: Vec<LabeledGame>) -> Vec<FlaggedGame> {
    let mut by_team: BTreeMap<String, Vec<LabeledGame>> = BTreeMap::new();
    for game in games {
        by_team
            .entry(game.game.team_abbreviation.clone())
            .or_default()
            .push(game);
    }

    by_team
        .into_iter()
        .flat_map(|(team, schedule)| {
            let team_name = schedule
                .first()
                .map(|game| game.game.team_name.as_str())
                .unwrap_or_default();
            debug!("{team} ({team_name}): {} games", schedule.len());
            flag_team_schedule(schedule)
        })
        .collect()
}

/// Same-day duplicates keep their input order and never count as a
/// back-to-back; only an exact one-day gap does.
fn flag_team_schedule(mut schedule: Vec<LabeledGame>) -> Vec<FlaggedGame> {
    schedule.sort_by_key(|game| game.game.game_date);

    let mut previous: Option<(NaiveDate, Weekday)> = None;
    schedule
        .into_iter()
        .map(|game| {
            let date = game.game.game_date;
            let prev_weekday = previous
                .filter(|(prev_date, _)| (date - *prev_date).num_days() == 1)
                .map(|(_, weekday)| weekday);
            previous = Some((date, game.weekday));
            if prev_weekday.is_some() {
                trace!("back-to-back: game {} on {date}", game.game.game_id);
            }

            FlaggedGame {
                back_to_back: prev_weekday.is_some(),
                prev_weekday,
                game,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::label_game;
    use crate::models::GameRecord;

    fn sample_game(team: &str, game_id: &str, year: i32, month: u32, day: u32) -> LabeledGame {
        label_game(GameRecord {
            game_id: game_id.to_string(),
            game_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            team_abbreviation: team.to_string(),
            team_name: format!("{team} Team"),
        })
    }

    fn team_flags(flagged: &[FlaggedGame], team: &str) -> Vec<(String, bool)> {
        flagged
            .iter()
            .filter(|game| game.game.game.team_abbreviation == team)
            .map(|game| (game.game.game.game_id.clone(), game.back_to_back))
            .collect()
    }

    #[test]
    fn flags_consecutive_days_only() {
        let games = vec![
            sample_game("BOS", "1", 2024, 1, 1),
            sample_game("BOS", "2", 2024, 1, 2),
            sample_game("BOS", "3", 2024, 1, 4),
            sample_game("BOS", "4", 2024, 1, 5),
            sample_game("BOS", "5", 2024, 1, 12),
        ];

        let flagged = mark_back_to_backs(games);
        assert_eq!(
            team_flags(&flagged, "BOS"),
            vec![
                ("1".to_string(), false),
                ("2".to_string(), true),
                ("3".to_string(), false),
                ("4".to_string(), true),
                ("5".to_string(), false),
            ]
        );
        assert_eq!(flagged[1].prev_weekday, Some(Weekday::Mon));
        assert_eq!(flagged[3].prev_weekday, Some(Weekday::Thu));
        assert_eq!(flagged[2].prev_weekday, None);
    }

    #[test]
    fn sorts_each_team_by_date_before_flagging() {
        let games = vec![
            sample_game("MIA", "c", 2024, 3, 10),
            sample_game("MIA", "a", 2024, 3, 8),
            sample_game("MIA", "b", 2024, 3, 9),
        ];

        let flagged = mark_back_to_backs(games);
        let dates: Vec<NaiveDate> = flagged.iter().map(|game| game.game.game.game_date).collect();
        assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(
            team_flags(&flagged, "MIA"),
            vec![
                ("a".to_string(), false),
                ("b".to_string(), true),
                ("c".to_string(), true),
            ]
        );
    }

    #[test]
    fn teams_are_flagged_independently() {
        // DEN plays the day after BOS, which must not flag DEN.
        let games = vec![
            sample_game("BOS", "1", 2024, 2, 1),
            sample_game("DEN", "1", 2024, 2, 2),
            sample_game("BOS", "2", 2024, 2, 3),
            sample_game("DEN", "2", 2024, 2, 3),
        ];

        let flagged = mark_back_to_backs(games);
        assert_eq!(
            team_flags(&flagged, "BOS"),
            vec![("1".to_string(), false), ("2".to_string(), false)]
        );
        assert_eq!(
            team_flags(&flagged, "DEN"),
            vec![("1".to_string(), false), ("2".to_string(), true)]
        );
    }

    #[test]
    fn duplicate_dates_are_not_back_to_backs() {
        let games = vec![
            sample_game("LAL", "dup-1", 2024, 1, 10),
            sample_game("LAL", "dup-2", 2024, 1, 10),
        ];

        let flagged = mark_back_to_backs(games);
        assert!(flagged.iter().all(|game| !game.back_to_back));
        // Stable order on ties.
        assert_eq!(flagged[0].game.game.game_id, "dup-1");
        assert_eq!(flagged[1].game.game.game_id, "dup-2");
    }

    #[test]
    fn single_game_team_is_never_flagged() {
        let flagged = mark_back_to_backs(vec![sample_game("UTA", "1", 2024, 1, 1)]);
        assert_eq!(flagged.len(), 1);
        assert!(!flagged[0].back_to_back);
        assert_eq!(flagged[0].prev_weekday, None);
    }

    #[test]
    fn flag_matches_one_day_delta_for_every_position() {
        let days = [1, 2, 3, 5, 6, 6, 7, 10, 11, 20, 21, 22];
        let games: Vec<LabeledGame> = days
            .iter()
            .enumerate()
            .map(|(index, day)| sample_game("NYK", &index.to_string(), 2024, 3, *day))
            .collect();

        let flagged = mark_back_to_backs(games);
        assert!(!flagged[0].back_to_back);
        for pair in flagged.windows(2) {
            let gap = (pair[1].game.game.game_date - pair[0].game.game.game_date).num_days();
            assert_eq!(pair[1].back_to_back, gap == 1);
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(mark_back_to_backs(Vec::new()).is_empty());
    }
}
