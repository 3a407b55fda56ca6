use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde::Serialize;

use crate::models::{GameWeek, WeekTotal, WeeklySummary};
use crate::roster::TeamRoster;

/// A summary row as shown in the week view.
#[derive(Debug, Serialize)]
struct WeekRow<'a> {
    team: &'a str,
    year: i32,
    week: u32,
    games_played: usize,
    back_to_backs: usize,
    b2b_days: &'a str,
    has_back_to_back: bool,
}

impl<'a> From<&'a WeeklySummary> for WeekRow<'a> {
    fn from(summary: &'a WeeklySummary) -> Self {
        WeekRow {
            team: &summary.team_abbreviation,
            year: summary.year,
            week: summary.week,
            games_played: summary.games_played,
            back_to_backs: summary.back_to_backs,
            b2b_days: &summary.b2b_days,
            has_back_to_back: summary.has_back_to_back(),
        }
    }
}

/// Rows for one ISO week, busiest teams first.
pub fn select_week(summaries: &[WeeklySummary], week: u32, year: Option<i32>) -> Vec<WeeklySummary> {
    let mut rows: Vec<WeeklySummary> = summaries
        .iter()
        .filter(|row| row.week == week && year.map_or(true, |year| row.year == year))
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        b.games_played
            .cmp(&a.games_played)
            .then_with(|| a.team_abbreviation.cmp(&b.team_abbreviation))
            .then_with(|| a.year.cmp(&b.year))
    });
    rows
}

pub fn week_totals(summaries: &[WeeklySummary]) -> Vec<WeekTotal> {
    let mut totals: BTreeMap<GameWeek, WeekTotal> = BTreeMap::new();

    for row in summaries {
        let week = row.game_week();
        let total = totals.entry(week).or_insert(WeekTotal {
            week,
            team_count: 0,
            games_played: 0,
            back_to_backs: 0,
        });
        total.team_count += 1;
        total.games_played += row.games_played;
        total.back_to_backs += row.back_to_backs;
    }

    totals.into_values().collect()
}

pub fn render_table(rows: &[WeeklySummary]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<6} {:>4} {:>4} {:>6} {:>4}  {}",
        "TEAM", "YEAR", "WEEK", "GAMES", "B2B", "B2B DAYS"
    );
    for row in rows {
        let marker = if row.has_back_to_back() { "*" } else { " " };
        let _ = writeln!(
            output,
            "{:<6} {:>4} {:>4} {:>6} {:>3}{}  {}",
            row.team_abbreviation,
            row.year,
            row.week,
            row.games_played,
            row.back_to_backs,
            marker,
            row.b2b_days
        );
    }
    output
}

pub fn render_json(rows: &[WeeklySummary]) -> serde_json::Result<String> {
    let rows: Vec<WeekRow> = rows.iter().map(WeekRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

pub fn render_csv(rows: &[WeeklySummary]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(WeekRow::from(row))?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn build_report(
    week: u32,
    year: Option<i32>,
    rows: &[WeeklySummary],
    roster: &TeamRoster,
) -> String {
    let mut output = String::new();
    let year_label = match year {
        Some(year) => year.to_string(),
        None => {
            let years: BTreeSet<i32> = rows.iter().map(|row| row.year).collect();
            if years.is_empty() {
                "any year".to_string()
            } else {
                years
                    .iter()
                    .map(|year| year.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    };
    let total_games: usize = rows.iter().map(|row| row.games_played).sum();

    let _ = writeln!(output, "# Weekly Team Schedule Report");
    let _ = writeln!(
        output,
        "Week {} ({}): {} team games across {} teams",
        week,
        year_label,
        total_games,
        rows.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Games Per Team");

    if rows.is_empty() {
        let _ = writeln!(output, "No games recorded for this week.");
    } else {
        for row in rows {
            let _ = writeln!(
                output,
                "- {}: {} games, {} back-to-backs",
                row.team_abbreviation, row.games_played, row.back_to_backs
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Back-to-Backs");

    let b2b_rows: Vec<&WeeklySummary> = rows.iter().filter(|row| row.has_back_to_back()).collect();
    if b2b_rows.is_empty() {
        let _ = writeln!(output, "No back-to-backs this week.");
    } else {
        for row in b2b_rows {
            let _ = writeln!(output, "- {}: {}", row.team_abbreviation, row.b2b_days);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Idle Teams");

    let idle: Vec<&str> = roster
        .teams()
        .filter(|team| !rows.iter().any(|row| row.team_abbreviation == *team))
        .collect();
    if idle.is_empty() {
        let _ = writeln!(output, "Every team played this week.");
    } else {
        let _ = writeln!(output, "{}", idle.join(", "));
    }

    output
}
