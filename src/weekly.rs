use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::back_to_back::mark_back_to_backs;
use crate::calendar::{day_abbrev, label_games};
use crate::models::{FlaggedGame, GameRecord, GameWeek, WeeklySummary};
use crate::roster::TeamRoster;

#[derive(Default)]
struct WeekTally {
    games_played: usize,
    b2b_pairs: Vec<String>,
}

/// Full pipeline: roster filter, week labels, back-to-back flags, weekly rollup.
pub fn process_schedule(games: Vec<GameRecord>, roster: &TeamRoster) -> Vec<WeeklySummary> {
    let games = retain_roster_teams(games, roster);
    let team_count = games
        .iter()
        .map(|game| game.team_abbreviation.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    info!(
        "Filtered to {team_count} of {} roster teams and {} games.",
        roster.len(),
        games.len()
    );

    let flagged = mark_back_to_backs(label_games(games));
    let summaries = summarize_weeks(&flagged);
    debug!("built {} weekly summary rows", summaries.len());
    summaries
}

pub fn retain_roster_teams(games: Vec<GameRecord>, roster: &TeamRoster) -> Vec<GameRecord> {
    games
        .into_iter()
        .filter(|game| roster.contains(&game.team_abbreviation))
        .collect()
}

/// Rolls flagged games up into one row per (team, ISO year, ISO week), sorted
/// by that key. Back-to-back labels follow the order of `flagged`, which the
/// detector hands over date-ascending per team.
pub fn summarize_weeks(flagged: &[FlaggedGame]) -> Vec<WeeklySummary> {
    let mut tallies: BTreeMap<(&str, GameWeek), WeekTally> = BTreeMap::new();

    for game in flagged {
        let key = (
            game.game.game.team_abbreviation.as_str(),
            game.game.week,
        );
        let tally = tallies.entry(key).or_default();
        tally.games_played += 1;
        if let Some(pair) = b2b_pair(game) {
            tally.b2b_pairs.push(pair);
        }
    }

    tallies
        .into_iter()
        .map(|((team, week), tally)| WeeklySummary {
            team_abbreviation: team.to_string(),
            year: week.year,
            week: week.week,
            games_played: tally.games_played,
            back_to_backs: tally.b2b_pairs.len(),
            b2b_days: tally.b2b_pairs.join("/"),
        })
        .collect()
}

fn b2b_pair(game: &FlaggedGame) -> Option<String> {
    if !game.back_to_back {
        return None;
    }
    game.prev_weekday.map(|prev| {
        format!(
            "{}/{}",
            day_abbrev(prev),
            day_abbrev(game.game.weekday)
        )
    })
}
