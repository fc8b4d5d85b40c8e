//! Local exercise → ExerciseDB matching
//!
//! One lookup per exercise, strictly in catalog order. ExerciseDB is
//! rate limited, so the batch never issues overlapping requests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{ExerciseCatalog, RemoteExercise};
use crate::error::CatalogError;
use crate::exercises::LocalExercise;
use crate::similarity;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
/// Best scores below this are rejected
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

pub const NOTE_NO_RESULTS: &str = "no results from ExerciseDB";
pub const NOTE_LOW_CONFIDENCE: &str = "low confidence match, manual review recommended";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    LowConfidence,
    NoResults,
    ApiError,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::LowConfidence => "low confidence",
            MatchStatus::NoResults => "no results",
            MatchStatus::ApiError => "API error",
        }
    }
}

/// Outcome of matching one exercise. Errors are a variant, so every
/// exercise still turns into exactly one row.
#[derive(Debug)]
pub enum MatchOutcome {
    Matched { candidate: RemoteExercise, confidence: f64 },
    LowConfidence { best: f64 },
    NoResults,
    Failed(CatalogError),
}

/// One line of the generated mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    pub local_id: String,
    pub local_name: String,
    pub exercise_db_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_db_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: MatchStatus,
}

impl MappingRow {
    pub fn from_outcome(exercise: &LocalExercise, outcome: MatchOutcome) -> Self {
        let unmatched = |confidence: f64, status: MatchStatus, notes: String| MappingRow {
            local_id: exercise.id.clone(),
            local_name: exercise.name.clone(),
            exercise_db_id: None,
            exercise_db_name: None,
            body_part: None,
            target: None,
            equipment: None,
            confidence,
            notes: Some(notes),
            status,
        };

        match outcome {
            MatchOutcome::Matched { candidate, confidence } => MappingRow {
                local_id: exercise.id.clone(),
                local_name: exercise.name.clone(),
                exercise_db_id: Some(candidate.id),
                exercise_db_name: Some(candidate.name),
                body_part: Some(candidate.body_part),
                target: Some(candidate.target),
                equipment: Some(candidate.equipment),
                confidence,
                notes: None,
                status: MatchStatus::Matched,
            },
            MatchOutcome::LowConfidence { best } => {
                unmatched(best, MatchStatus::LowConfidence, NOTE_LOW_CONFIDENCE.to_string())
            }
            MatchOutcome::NoResults => unmatched(0.0, MatchStatus::NoResults, NOTE_NO_RESULTS.to_string()),
            MatchOutcome::Failed(err) => unmatched(0.0, MatchStatus::ApiError, format!("API error: {}", err)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatcherOptions {
    /// Candidates requested per search
    pub limit: usize,
    pub min_confidence: f64,
    /// Pause between exercises in a batch
    pub delay: Duration,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            delay: Duration::ZERO,
        }
    }
}

/// A candidate with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: RemoteExercise,
    pub score: f64,
    pub exact: bool,
}

pub struct Matcher<C> {
    catalog: C,
    options: MatcherOptions,
}

impl<C: ExerciseCatalog> Matcher<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, MatcherOptions::default())
    }

    pub fn with_options(catalog: C, options: MatcherOptions) -> Self {
        Self { catalog, options }
    }

    /// Search by name; if nothing comes back, retry once with the lowercased name
    pub async fn lookup(&self, search_name: &str) -> Result<Vec<RemoteExercise>, CatalogError> {
        let results = self.catalog.search_by_name(search_name, self.options.limit, 0).await?;
        if !results.is_empty() {
            return Ok(results);
        }

        let normalized = search_name.to_lowercase();
        if normalized != search_name {
            return self.catalog.search_by_name(&normalized, self.options.limit, 0).await;
        }
        Ok(results)
    }

    /// Pick the best candidate for `exercise` out of `candidates`.
    ///
    /// A case-insensitive exact name hit wins outright with confidence 1.
    /// Otherwise the first candidate with the highest score wins, provided
    /// it reaches `min_confidence`.
    pub fn select(&self, exercise: &LocalExercise, mut candidates: Vec<RemoteExercise>) -> MatchOutcome {
        if candidates.is_empty() {
            return MatchOutcome::NoResults;
        }

        let search = exercise.search_name().to_lowercase();
        if let Some(exact) = candidates.iter().position(|c| c.name.to_lowercase() == search) {
            let candidate = candidates.swap_remove(exact);
            return MatchOutcome::Matched { candidate, confidence: 1.0 };
        }

        let mut best: Option<(RemoteExercise, f64)> = None;
        for candidate in candidates {
            let s = similarity::score(exercise, &candidate);
            if best.as_ref().is_none_or(|(_, top)| s > *top) {
                best = Some((candidate, s));
            }
        }

        match best {
            Some((candidate, confidence)) if confidence >= self.options.min_confidence => {
                MatchOutcome::Matched { candidate, confidence }
            }
            Some((_, best)) => MatchOutcome::LowConfidence { best },
            None => MatchOutcome::NoResults,
        }
    }

    /// Score every candidate, in catalog order
    pub fn rank_candidates(&self, exercise: &LocalExercise, candidates: &[RemoteExercise]) -> Vec<ScoredCandidate> {
        let search = exercise.search_name().to_lowercase();
        candidates
            .iter()
            .map(|c| ScoredCandidate {
                candidate: c.clone(),
                score: similarity::score(exercise, c),
                exact: c.name.to_lowercase() == search,
            })
            .collect()
    }

    pub async fn match_exercise(&self, exercise: &LocalExercise) -> MatchOutcome {
        match self.lookup(exercise.search_name()).await {
            Ok(candidates) => self.select(exercise, candidates),
            Err(err) => {
                warn!("ExerciseDB lookup failed for {}: {}", exercise.id, err);
                MatchOutcome::Failed(err)
            }
        }
    }

    pub async fn map_exercise(&self, exercise: &LocalExercise) -> MappingRow {
        let outcome = self.match_exercise(exercise).await;
        MappingRow::from_outcome(exercise, outcome)
    }

    /// Map every exercise one after another, preserving input order
    pub async fn map_all(&self, exercises: &[LocalExercise]) -> Vec<MappingRow> {
        let mut rows = Vec::with_capacity(exercises.len());

        for (i, exercise) in exercises.iter().enumerate() {
            if i > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            let row = self.map_exercise(exercise).await;
            info!(
                "Mapped {} -> {} (conf={:.2})",
                exercise.id,
                row.exercise_db_id.as_deref().unwrap_or("none"),
                row.confidence
            );
            rows.push(row);
        }

        rows
    }
}
