// Season dataset loading: skater records parsed from the stats CSV.
//
// Reads NHL.com-style skater CSVs: one row per player, stat columns keyed
// by abbreviation (P, G, A, +/-, P/GP, EVP, PPP, PIM). Cells may be empty
// or "-"; those parse to None and render as a placeholder downstream.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The eight tracked statistics, in radar-axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Points,
    Goals,
    Assists,
    PlusMinus,
    PointsPerGame,
    EvenStrengthPoints,
    PowerPlayPoints,
    PenaltyMinutes,
}

impl Stat {
    /// All tracked statistics in the fixed axis order.
    pub const ALL: [Stat; 8] = [
        Stat::Points,
        Stat::Goals,
        Stat::Assists,
        Stat::PlusMinus,
        Stat::PointsPerGame,
        Stat::EvenStrengthPoints,
        Stat::PowerPlayPoints,
        Stat::PenaltyMinutes,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Column abbreviation as it appears in the CSV header and chart labels.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Stat::Points => "P",
            Stat::Goals => "G",
            Stat::Assists => "A",
            Stat::PlusMinus => "+/-",
            Stat::PointsPerGame => "P/GP",
            Stat::EvenStrengthPoints => "EVP",
            Stat::PowerPlayPoints => "PPP",
            Stat::PenaltyMinutes => "PIM",
        }
    }

    /// Full statistic name for labels and detail lines.
    pub fn full_name(&self) -> &'static str {
        match self {
            Stat::Points => "Points",
            Stat::Goals => "Goals",
            Stat::Assists => "Assists",
            Stat::PlusMinus => "Plus/Minus",
            Stat::PointsPerGame => "Points Per Game",
            Stat::EvenStrengthPoints => "Even Strength Points",
            Stat::PowerPlayPoints => "Power Play Points",
            Stat::PenaltyMinutes => "Penalty Minutes",
        }
    }
}

/// The eight tracked stat values for one skater. `None` means the CSV cell
/// was absent, blank, a placeholder dash, or not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatLine {
    pub points: Option<f64>,
    pub goals: Option<f64>,
    pub assists: Option<f64>,
    pub plus_minus: Option<f64>,
    pub points_per_game: Option<f64>,
    pub even_strength_points: Option<f64>,
    pub power_play_points: Option<f64>,
    pub penalty_minutes: Option<f64>,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Points => self.points,
            Stat::Goals => self.goals,
            Stat::Assists => self.assists,
            Stat::PlusMinus => self.plus_minus,
            Stat::PointsPerGame => self.points_per_game,
            Stat::EvenStrengthPoints => self.even_strength_points,
            Stat::PowerPlayPoints => self.power_play_points,
            Stat::PenaltyMinutes => self.penalty_minutes,
        }
    }
}

/// One row of the season dataset.
#[derive(Debug, Clone)]
pub struct SkaterRecord {
    pub name: String,
    /// Raw team field, possibly multi-value ("TOR, BOS").
    pub team: String,
    /// Raw position field, possibly multi-value ("C/R").
    pub position: String,
    pub games_played: Option<f64>,
    pub stats: StatLine,
}

/// The loaded season dataset. Immutable after load; records keep CSV order
/// (the source file is sorted by scoring rank).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SkaterRecord>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to fetch dataset from {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw skater CSV row. Stat cells stay `String` so that blanks, dashes, and
/// junk degrade to `None` per field instead of dropping the whole row.
/// Extra columns are absorbed via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
struct RawSkaterRow {
    #[serde(rename = "Player", default)]
    player: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "Pos", default)]
    pos: String,
    #[serde(rename = "GP", default)]
    gp: String,
    #[serde(rename = "P", default)]
    points: String,
    #[serde(rename = "G", default)]
    goals: String,
    #[serde(rename = "A", default)]
    assists: String,
    #[serde(rename = "+/-", default)]
    plus_minus: String,
    #[serde(rename = "P/GP", default)]
    points_per_game: String,
    #[serde(rename = "EVP", default)]
    even_strength_points: String,
    #[serde(rename = "PPP", default)]
    power_play_points: String,
    #[serde(rename = "PIM", default)]
    penalty_minutes: String,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

impl RawSkaterRow {
    fn into_record(self) -> SkaterRecord {
        SkaterRecord {
            name: self.player.trim().to_string(),
            team: self.team.trim().to_string(),
            position: self.pos.trim().to_string(),
            games_played: parse_stat_cell(&self.gp),
            stats: StatLine {
                points: parse_stat_cell(&self.points),
                goals: parse_stat_cell(&self.goals),
                assists: parse_stat_cell(&self.assists),
                plus_minus: parse_stat_cell(&self.plus_minus),
                points_per_game: parse_stat_cell(&self.points_per_game),
                even_strength_points: parse_stat_cell(&self.even_strength_points),
                power_play_points: parse_stat_cell(&self.power_play_points),
                penalty_minutes: parse_stat_cell(&self.penalty_minutes),
            },
        }
    }
}

/// Parse one stat cell. Blank, "-", and non-numeric or non-finite content
/// all yield `None`.
fn parse_stat_cell(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

impl Dataset {
    /// Parse a dataset from any reader. Rows without a player name are
    /// skipped; an empty result is allowed here (the path/URL entry points
    /// validate non-emptiness at startup).
    pub fn from_reader<R: Read>(rdr: R) -> Result<Dataset, DatasetError> {
        let mut reader = csv::Reader::from_reader(rdr);
        let mut records = Vec::new();
        for result in reader.deserialize::<RawSkaterRow>() {
            match result {
                Ok(raw) => {
                    let record = raw.into_record();
                    if record.name.is_empty() {
                        warn!("skipping skater row with empty Player name");
                        continue;
                    }
                    records.push(record);
                }
                Err(e) => {
                    warn!("skipping malformed skater row: {}", e);
                }
            }
        }
        Ok(Dataset { records })
    }

    /// Load the dataset from a local CSV file.
    pub fn from_path(path: &Path) -> Result<Dataset, DatasetError> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let dataset = Dataset::from_reader(file)?;
        dataset.reject_empty(&path.display().to_string())?;
        Ok(dataset)
    }

    /// Fetch the dataset CSV over HTTP and parse it.
    pub async fn from_url(url: &str) -> Result<Dataset, DatasetError> {
        let body = fetch_body(url).await.map_err(|e| DatasetError::Http {
            url: url.to_string(),
            source: e,
        })?;
        let dataset = Dataset::from_reader(body.as_bytes())?;
        dataset.reject_empty(url)?;
        Ok(dataset)
    }

    fn reject_empty(&self, source: &str) -> Result<(), DatasetError> {
        if self.records.is_empty() {
            return Err(DatasetError::Validation(format!(
                "{source} produced zero valid skater rows"
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SkaterRecord] {
        &self.records
    }

    /// Case-insensitive exact-name lookup. Blank or unmatched input yields
    /// `None`; the first match wins when the dataset holds duplicates.
    pub fn lookup(&self, name: &str) -> Option<&SkaterRecord> {
        let needle = name.trim();
        if needle.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(needle))
    }
}

async fn fetch_body(url: &str) -> Result<String, reqwest::Error> {
    let response = reqwest::get(url).await?.error_for_status()?;
    response.text().await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
