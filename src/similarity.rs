//! Name similarity scoring between local exercises and ExerciseDB candidates

use std::collections::BTreeSet;

use crate::catalog::RemoteExercise;
use crate::exercises::{BodyRegion, LocalExercise};

/// Bonus for a matching equipment or body-region attribute
pub const ATTRIBUTE_BONUS: f64 = 0.1;

/// Lowercase word tokens of `text`. Anything outside `[a-z0-9]` and
/// whitespace acts as a separator.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// |a ∩ b| / |a ∪ b|, or 0 when either set is empty
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

pub fn equipment_bonus(local_equipment: &[String], remote_equipment: &str) -> f64 {
    if remote_equipment.is_empty() {
        return 0.0;
    }
    let remote = remote_equipment.to_lowercase();
    let hit = local_equipment
        .iter()
        .any(|e| remote.contains(&e.to_lowercase()));
    if hit { ATTRIBUTE_BONUS } else { 0.0 }
}

pub fn region_bonus(region: BodyRegion, body_part: &str) -> f64 {
    if body_part.is_empty() {
        return 0.0;
    }
    let bp = body_part.to_lowercase();
    let keywords: &[&str] = match region {
        BodyRegion::Lower => &["leg"],
        BodyRegion::Upper => &["back", "chest", "shoulder", "upper"],
        BodyRegion::Core => &["waist", "core", "abs"],
        BodyRegion::Full => &[],
    };
    if keywords.iter().any(|k| bp.contains(k)) {
        ATTRIBUTE_BONUS
    } else {
        0.0
    }
}

/// Token Jaccard of the display names plus attribute bonuses.
///
/// Bonuses are additive, so a perfect name match with both bonuses scores 1.2.
pub fn score(local: &LocalExercise, remote: &RemoteExercise) -> f64 {
    let base = jaccard(&tokenize(&local.name), &tokenize(&remote.name));
    base + equipment_bonus(&local.equipment, &remote.equipment)
        + region_bonus(local.body_region, &remote.body_part)
}
