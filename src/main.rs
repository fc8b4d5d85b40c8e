//! exercise-mapper - links the local exercise catalog to ExerciseDB

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exercise_mapper::config::{API_HOST_ENV, API_KEY_ENV, BASE_URL_ENV, Config};
use exercise_mapper::exercises::{self, LocalExercise, find_exercise};
use exercise_mapper::mapper::{DEFAULT_MIN_CONFIDENCE, DEFAULT_SEARCH_LIMIT, MappingRow, MatchStatus, Matcher, MatcherOptions};
use exercise_mapper::report::{self, MappingSummary, OutputFormat};
use exercise_mapper::ExerciseDbClient;

const DEFAULT_OUTPUT: &str = "data/exercise_db_mapping.json";

#[derive(Parser)]
#[command(name = "exercise-mapper")]
#[command(author, version, about = "Map local exercises onto ExerciseDB")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// RapidAPI key for ExerciseDB
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// RapidAPI host header
    #[arg(long, global = true, env = API_HOST_ENV)]
    api_host: Option<String>,

    /// ExerciseDB base URL
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,
}

impl ConnectionArgs {
    /// Credentials are checked here, before any request goes out
    fn connect(&self) -> Result<ExerciseDbClient> {
        let config = Config::resolve(self.api_key.clone(), self.api_host.clone(), self.base_url.clone())?
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(ExerciseDbClient::new(config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Map every local exercise and write the mapping file
    Map {
        /// JSON catalog to map instead of the built-in one
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Candidates requested per search
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,

        /// Reject best matches scoring below this
        #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
        min_confidence: f64,

        /// Pause between exercises, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,
    },

    /// Show scored candidates for one local exercise
    Lookup {
        /// Local exercise id (e.g. "goblet_squat")
        exercise_id: String,

        #[arg(short, long)]
        catalog: Option<PathBuf>,

        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Fetch a single ExerciseDB record by id
    Remote {
        /// ExerciseDB id (e.g. "0534")
        id: String,
    },

    /// Download the full ExerciseDB listing as JSON
    Download {
        #[arg(short, long, default_value = "data/exercisedb.json")]
        output: PathBuf,

        #[arg(long, default_value = "100")]
        page_size: usize,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// List the local exercise catalog
    List {
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Summarize a mapping file and list rows needing manual review
    Review {
        /// JSON mapping produced by `map`
        #[arg(default_value = DEFAULT_OUTPUT)]
        mapping: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn load_exercises(catalog: Option<&Path>) -> Result<Vec<LocalExercise>> {
    match catalog {
        Some(path) => exercises::load_catalog(path),
        None => Ok(exercises::builtin_catalog()),
    }
}

fn print_row(row: &MappingRow) {
    println!(
        "{:28} | {:>4.2} | {:14} | {}",
        row.local_id,
        row.confidence,
        row.status.label(),
        row.exercise_db_name
            .as_deref()
            .or(row.notes.as_deref())
            .unwrap_or("-")
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Map { catalog, output, format, limit, min_confidence, delay_ms } => {
            let client = cli.connection.connect()?;
            let exercises = load_exercises(catalog.as_deref())?;
            let options = MatcherOptions {
                limit,
                min_confidence,
                delay: Duration::from_millis(delay_ms),
            };
            let matcher = Matcher::with_options(client, options);

            info!("Mapping {} exercises", exercises.len());
            let rows = matcher.map_all(&exercises).await;

            report::write_mapping(&output, &rows, format)?;
            info!("Wrote mapping to {}", output.display());

            let summary = MappingSummary::from_rows(&rows);
            println!(
                "{} exercises: {} matched, {} low confidence, {} no results, {} API errors",
                summary.total,
                summary.count(MatchStatus::Matched),
                summary.count(MatchStatus::LowConfidence),
                summary.count(MatchStatus::NoResults),
                summary.count(MatchStatus::ApiError),
            );
        }

        Commands::Lookup { exercise_id, catalog, limit } => {
            let client = cli.connection.connect()?;
            let exercises = load_exercises(catalog.as_deref())?;
            let Some(exercise) = exercises.iter().find(|e| e.id == exercise_id) else {
                bail!("unknown exercise id: {}", exercise_id);
            };

            let matcher = Matcher::with_options(client, MatcherOptions { limit, ..Default::default() });
            println!("Searching ExerciseDB for \"{}\"", exercise.search_name());

            match matcher.lookup(exercise.search_name()).await {
                Ok(candidates) => {
                    println!("{:-<72}", "");
                    for scored in matcher.rank_candidates(exercise, &candidates) {
                        let c = &scored.candidate;
                        println!(
                            "{:>6} | {:>4.2}{} | {:36} | {} / {}",
                            c.id,
                            scored.score,
                            if scored.exact { "*" } else { " " },
                            c.name,
                            c.body_part,
                            c.equipment
                        );
                    }
                    println!("{:-<72}", "");
                    let row = MappingRow::from_outcome(exercise, matcher.select(exercise, candidates));
                    print_row(&row);
                }
                Err(e) => println!("API error: {}", e),
            }
        }

        Commands::Remote { id } => {
            let client = cli.connection.connect()?;
            match client.get_by_id(&id).await? {
                Some(exercise) => println!("{}", serde_json::to_string_pretty(&exercise)?),
                None => bail!("ExerciseDB has no exercise with id {}", id),
            }
        }

        Commands::Download { output, page_size, max_pages } => {
            if page_size == 0 {
                bail!("page size must be positive");
            }
            let client = cli.connection.connect()?;
            let all = client.list_all(page_size, max_pages).await?;
            report::write_output(&output, &serde_json::to_string_pretty(&all)?)?;
            println!("Downloaded {} exercises to {}", all.len(), output.display());
        }

        Commands::List { catalog } => {
            let exercises = load_exercises(catalog.as_deref())?;
            println!("Local exercises:");
            println!("{:-<72}", "");
            for ex in &exercises {
                let category = find_exercise(&ex.id)
                    .map(|e| e.category.emoji())
                    .unwrap_or(" ");
                println!(
                    "{} {:28} | {:5} | {}",
                    category,
                    ex.id,
                    ex.body_region,
                    ex.equipment.join(", ")
                );
            }
        }

        Commands::Review { mapping, limit } => {
            let rows = report::read_mapping(&mapping)?;
            let summary = MappingSummary::from_rows(&rows);

            println!("Mapping review: {}", mapping.display());
            println!("{:-<72}", "");
            println!("Total rows:      {}", summary.total);
            for status in [MatchStatus::Matched, MatchStatus::LowConfidence, MatchStatus::NoResults, MatchStatus::ApiError] {
                println!("{:16} {}", format!("{}:", status.label()), summary.count(status));
            }
            if let Some(mean) = summary.mean_matched_confidence {
                println!("Mean confidence: {:.2}", mean);
            }

            let pending = report::needs_review(&rows);
            if !pending.is_empty() {
                println!();
                println!("Needs review ({} of {}):", pending.len().min(limit), pending.len());
                println!("{:-<72}", "");
                for row in pending.into_iter().take(limit) {
                    print_row(row);
                }
            }
        }
    }

    Ok(())
}
