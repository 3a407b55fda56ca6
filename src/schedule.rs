use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use log::{info, warn};
use serde::Deserialize;

use crate::calendar::parse_game_date;
use crate::error::RowError;
use crate::models::{GameRecord, WeeklySummary};

const REQUIRED_COLUMNS: [&str; 4] = ["GAME_ID", "GAME_DATE", "TEAM_ABBREVIATION", "TEAM_NAME"];
const SUMMARY_HEADERS: [&str; 6] = [
    "TEAM_ABBREVIATION",
    "YEAR",
    "WEEK",
    "games_played",
    "back_to_backs",
    "b2b_days",
];

#[derive(Debug, Deserialize)]
struct RawGameRow {
    #[serde(rename = "GAME_ID", default)]
    game_id: Option<String>,
    #[serde(rename = "GAME_DATE", default)]
    game_date: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    team_abbreviation: Option<String>,
    #[serde(rename = "TEAM_NAME", default)]
    team_name: Option<String>,
}

impl TryFrom<RawGameRow> for GameRecord {
    type Error = RowError;

    fn try_from(row: RawGameRow) -> Result<Self, Self::Error> {
        let game_id = required(row.game_id, "GAME_ID")?;
        let raw_date = required(row.game_date, "GAME_DATE")?;
        let game_date =
            parse_game_date(&raw_date).ok_or_else(|| RowError::InvalidDate(raw_date.clone()))?;
        let team_abbreviation = required(row.team_abbreviation, "TEAM_ABBREVIATION")?;
        let team_name = required(row.team_name, "TEAM_NAME")?;

        Ok(GameRecord {
            game_id,
            game_date,
            team_abbreviation,
            team_name,
        })
    }
}

fn required(value: Option<String>, column: &'static str) -> Result<String, RowError> {
    optional(value).ok_or(RowError::MissingField(column))
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Raw game rows that survived parsing, plus a count of the ones that didn't.
#[derive(Debug)]
pub struct LoadedSchedule {
    pub games: Vec<GameRecord>,
    pub skipped: usize,
}

pub fn load_games(path: &Path) -> anyhow::Result<LoadedSchedule> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("input file not found: {}", path.display()))?;
    let loaded =
        read_games(file).with_context(|| format!("failed to read {}", path.display()))?;
    info!("Loaded {} games.", loaded.games.len());
    Ok(loaded)
}

/// Malformed rows are logged and skipped; only a missing header column aborts.
pub fn read_games<R: Read>(rdr: R) -> anyhow::Result<LoadedSchedule> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader.headers().context("missing CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        bail!("missing required columns: {}", missing.join(", "));
    }

    let mut games = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in reader.deserialize::<RawGameRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        match result
            .map_err(RowError::from)
            .and_then(GameRecord::try_from)
        {
            Ok(game) => games.push(game),
            Err(err) => {
                warn!("skipping game row on line {line}: {err}");
                skipped += 1;
            }
        }
    }

    Ok(LoadedSchedule { games, skipped })
}

pub fn write_summaries<W: Write>(wtr: W, summaries: &[WeeklySummary]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(wtr);
    writer.write_record(SUMMARY_HEADERS)?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}

/// Serializes the whole table before touching the filesystem so a failed run
/// leaves no partial file behind.
pub fn save_summaries(path: &Path, summaries: &[WeeklySummary]) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    write_summaries(&mut buffer, summaries)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, buffer).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Processed data saved to {}", path.display());
    Ok(())
}

pub fn load_summaries(path: &Path) -> anyhow::Result<Vec<WeeklySummary>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("processed file not found: {}", path.display()))?;
    read_summaries(file).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_summaries<R: Read>(rdr: R) -> anyhow::Result<Vec<WeeklySummary>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut summaries = Vec::new();
    for result in reader.deserialize::<WeeklySummary>() {
        summaries.push(result?);
    }
    Ok(summaries)
}
