//! ExerciseDB catalog access
//!
//! The mapper only needs name search, so that is the trait seam; the HTTP
//! client additionally exposes lookup by id and paginated listing.

mod client;

pub use client::ExerciseDbClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;

/// Candidate record returned by ExerciseDB
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub body_part: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_muscles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
}

/// Name search against an exercise catalog
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Candidates whose name matches `name`, in catalog order
    async fn search_by_name(
        &self,
        name: &str,
        limit: usize,
        offset: usize,
    ) -> CatalogResult<Vec<RemoteExercise>>;
}
