//! exercise-mapper - links the local exercise catalog to ExerciseDB
//!
//! Each local exercise is searched by name, candidates are scored by token
//! overlap plus equipment and body-region hints, and one mapping row per
//! exercise is written out for review.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exercises;
pub mod mapper;
pub mod report;
pub mod similarity;

pub use catalog::{ExerciseCatalog, ExerciseDbClient, RemoteExercise};
pub use config::Config;
pub use exercises::LocalExercise;
pub use mapper::{MappingRow, MatchOutcome, MatchStatus, Matcher, MatcherOptions};
