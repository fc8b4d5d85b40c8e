//! Mapping artifact: writing, reading back, and review summaries

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;

use crate::mapper::{MappingRow, MatchStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain JSON array of rows
    #[default]
    Json,
    /// TypeScript module exporting `EXERCISE_DB_MAPPING`
    Typescript,
}

const TS_INTERFACE: &str = "export interface ExerciseDbMappingRow {
  localId: string;
  localName: string;
  exerciseDbId: string | null;
  exerciseDbName?: string;
  bodyPart?: string;
  target?: string;
  equipment?: string;
  confidence: number;
  notes?: string;
  status: \"matched\" | \"low_confidence\" | \"no_results\" | \"api_error\";
}
";

pub fn render_mapping(rows: &[MappingRow], format: OutputFormat) -> Result<String> {
    let json = serde_json::to_string_pretty(rows)?;
    let rendered = match format {
        OutputFormat::Json => format!("{}\n", json),
        OutputFormat::Typescript => format!(
            "// Auto-generated mapping from local exercises to ExerciseDB ({})\n{}export const EXERCISE_DB_MAPPING: ExerciseDbMappingRow[] = {};\n",
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
            TS_INTERFACE,
            json
        ),
    };
    Ok(rendered)
}

/// Write `content` to `path`, creating parent directories first
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write all rows to `path`, replacing whatever was there
pub fn write_mapping(path: &Path, rows: &[MappingRow], format: OutputFormat) -> Result<()> {
    let content = render_mapping(rows, format)?;
    write_output(path, &content)
}

/// Read a JSON mapping written by [`write_mapping`]
pub fn read_mapping(path: &Path) -> Result<Vec<MappingRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON mapping", path.display()))?;
    Ok(rows)
}

/// Counts per status over a finished mapping
#[derive(Debug, Clone, Default)]
pub struct MappingSummary {
    pub total: usize,
    pub by_status: HashMap<MatchStatus, usize>,
    /// Mean confidence of matched rows
    pub mean_matched_confidence: Option<f64>,
}

impl MappingSummary {
    pub fn from_rows(rows: &[MappingRow]) -> Self {
        let mut by_status = HashMap::new();
        for row in rows {
            *by_status.entry(row.status).or_insert(0) += 1;
        }

        let matched: Vec<f64> = rows
            .iter()
            .filter(|r| r.status == MatchStatus::Matched)
            .map(|r| r.confidence)
            .collect();
        let mean_matched_confidence = if matched.is_empty() {
            None
        } else {
            Some(matched.iter().sum::<f64>() / matched.len() as f64)
        };

        Self {
            total: rows.len(),
            by_status,
            mean_matched_confidence,
        }
    }

    pub fn count(&self, status: MatchStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Unmatched rows, lowest confidence first
pub fn needs_review(rows: &[MappingRow]) -> Vec<&MappingRow> {
    let mut pending: Vec<&MappingRow> = rows.iter().filter(|r| r.status != MatchStatus::Matched).collect();
    pending.sort_by(|a, b| a.confidence.total_cmp(&b.confidence));
    pending
}
