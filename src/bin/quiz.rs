//! Quiz driver binary.
//!
//! Usage:
//!   cargo run --release --bin quiz -- <COMMAND> [OPTIONS]
//!
//! Commands:
//!   generate   Generate a batch of questions into a JSON file
//!   grade      Grade an answer to one stored question
//!   explain    Print the solution to one stored question
//!
//! Set `RUST_LOG=debug` to see generation and grading details.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use matrix_game_quiz::question::{DetailLevel, Difficulty, GenerateOptions, QuestionRegistry, StoredQuestion};

/// Strategic-form game quiz generator and grader
#[derive(Parser, Debug)]
#[command(name = "quiz")]
#[command(about = "Generate, grade and explain matrix game questions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate questions and write them as JSON
    Generate {
        /// Question family
        #[arg(short, long, default_value = "nash")]
        kind: String,

        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Number of questions
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Options JSON file (rows, cols, min_payoff, max_payoff)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of rows
        #[arg(long)]
        rows: Option<usize>,

        /// Override the number of columns
        #[arg(long)]
        cols: Option<usize>,

        /// Override the smallest payoff
        #[arg(long)]
        min_payoff: Option<i32>,

        /// Override the largest payoff
        #[arg(long)]
        max_payoff: Option<i32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of threads (default: auto)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Output file
        #[arg(short, long, default_value = "questions.json")]
        output: PathBuf,
    },

    /// Grade an answer to a stored question
    Grade {
        /// Questions file written by `generate`
        questions: PathBuf,

        /// Index of the question in the file
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// The student's answer
        answer: String,
    },

    /// Explain the solution to a stored question
    Explain {
        /// Questions file written by `generate`
        questions: PathBuf,

        /// Index of the question in the file
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// One-line answer instead of the step-by-step analysis
        #[arg(long)]
        concise: bool,
    },
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();
    let registry = QuestionRegistry::with_defaults();

    match cli.command {
        Command::Generate {
            kind,
            difficulty,
            count,
            config,
            rows,
            cols,
            min_payoff,
            max_payoff,
            seed,
            threads,
            output,
        } => {
            let base = match &config {
                Some(path) => GenerateOptions::from_json_file(path)
                    .with_context(|| format!("loading options from {}", path.display()))?,
                None => GenerateOptions::default(),
            };
            let options = apply_overrides(base, rows, cols, min_payoff, max_payoff);

            if threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("configuring thread pool")?;
            }

            let seed = seed.unwrap_or_else(rand::random);
            log::info!("generating {} {} question(s) at {} (seed {})", count, kind, difficulty, seed);

            let progress = ProgressBar::new(count as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}]")
                    .context("building progress style")?,
            );

            let start_time = Instant::now();
            let questions = registry
                .generate_batch_with_callback(&kind, count, difficulty, &options, seed, |done| {
                    progress.set_position(done as u64);
                })
                .with_context(|| format!("generating {} questions", kind))?;
            progress.finish_and_clear();

            let json = serde_json::to_string_pretty(&questions)?;
            fs::write(&output, json).with_context(|| format!("writing {}", output.display()))?;

            println!(
                "Wrote {} question(s) to {} in {:.2}s",
                questions.len(),
                output.display(),
                start_time.elapsed().as_secs_f64()
            );
            if let Some(first) = questions.first() {
                println!();
                println!("{}", first.question_text);
            }
        }

        Command::Grade { questions, index, answer } => {
            let question = load_question(&questions, index)?;
            let report = registry.evaluate(&question, &answer)?;

            println!("Score: {:.2}/100", report.score);
            for line in &report.feedback {
                println!("  {}", line);
            }
        }

        Command::Explain {
            questions,
            index,
            concise,
        } => {
            let question = load_question(&questions, index)?;
            let detail = if concise { DetailLevel::Concise } else { DetailLevel::Detailed };
            println!("{}", registry.explain(&question, detail)?);
        }
    }

    Ok(())
}

/// Layer command-line overrides on top of the loaded options.
fn apply_overrides(
    mut options: GenerateOptions,
    rows: Option<usize>,
    cols: Option<usize>,
    min_payoff: Option<i32>,
    max_payoff: Option<i32>,
) -> GenerateOptions {
    if let Some(rows) = rows {
        options = options.with_rows(rows);
    }
    if let Some(cols) = cols {
        options = options.with_cols(cols);
    }
    if min_payoff.is_some() || max_payoff.is_some() {
        let min = min_payoff.unwrap_or(options.min_payoff);
        let max = max_payoff.unwrap_or(options.max_payoff);
        options = options.with_payoff_range(min, max);
    }
    options
}

fn load_question(path: &Path, index: usize) -> Result<StoredQuestion> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut questions: Vec<StoredQuestion> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;

    if index >= questions.len() {
        bail!("{} holds {} question(s), no index {}", path.display(), questions.len(), index);
    }
    Ok(questions.swap_remove(index))
}
