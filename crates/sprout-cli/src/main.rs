mod repl;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;

use sprout_engine::{RunConfig, RunStatus, DEFAULT_ITERATION_CAP};
use sprout_lessons::Lesson;

#[derive(Parser, Debug)]
#[command(
    name = "sprout",
    about = "Simulate and grade flow-control practice snippets"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a snippet and show what it would print
    Run {
        /// Path to the snippet file
        path: PathBuf,

        /// Total loop iterations allowed for the run
        #[arg(long, default_value_t = DEFAULT_ITERATION_CAP)]
        iteration_cap: u32,
    },
    /// Grade a snippet against a lesson document
    Check {
        /// Path to the snippet file
        path: PathBuf,

        /// Path to the lesson JSON document
        #[arg(short, long)]
        lesson: PathBuf,

        /// Write a JSON report of the check to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// JSON document written by `check --report`.
#[derive(Debug, Serialize)]
struct CheckReport {
    timestamp: String,
    lesson_id: String,
    success: bool,
    status: RunStatus,
    output: Vec<String>,
    elapsed_seconds: f64,
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        None => {
            repl::start_playground();
            0
        }
        Some(Command::Run {
            path,
            iteration_cap,
        }) => cmd_run(&path, iteration_cap),
        Some(Command::Check {
            path,
            lesson,
            report,
        }) => cmd_check(&path, &lesson, report.as_deref()),
    };
    std::process::exit(code);
}

fn read_snippet(path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!(
            "{}: {}",
            "error".red().bold(),
            format!("Failed to read {}: {}", path.display(), e).red()
        );
        2
    })
}

fn cmd_run(path: &Path, iteration_cap: u32) -> i32 {
    let source = match read_snippet(path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let (output, status) = sprout_lessons::simulate(&source, RunConfig { iteration_cap });
    for line in &output {
        println!("{}", line);
    }
    render_status_hint(status);
    0
}

fn cmd_check(path: &Path, lesson_path: &Path, report: Option<&Path>) -> i32 {
    let source = match read_snippet(path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let lesson = match Lesson::load(lesson_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e.to_string().red());
            return 2;
        }
    };

    let started = Instant::now();
    let result = sprout_lessons::check(&source, &lesson);
    let elapsed = started.elapsed().as_secs_f64();

    println!("{} {}", lesson.title.bold(), format!("({})", lesson.id).bright_black());
    for line in &result.output {
        println!("  {}", line);
    }
    render_status_hint(result.status);

    if result.success {
        println!("{}", "Passed!".green().bold());
        if lesson.reward.xp > 0 || lesson.reward.coins > 0 {
            println!(
                "{}",
                format!(
                    "Earned {} XP and {} coins.",
                    lesson.reward.xp, lesson.reward.coins
                )
                .green()
            );
        }
    } else {
        println!("{}", "Not yet, keep trying!".yellow().bold());
    }

    if let Some(report_path) = report {
        let doc = CheckReport {
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            lesson_id: lesson.id.clone(),
            success: result.success,
            status: result.status,
            output: result.output.clone(),
            elapsed_seconds: elapsed,
        };
        let json = match serde_json::to_string_pretty(&doc) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e.to_string().red());
                return 2;
            }
        };
        if let Err(e) = fs::write(report_path, json) {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to write {}: {}", report_path.display(), e).red()
            );
            return 2;
        }
        println!("Saved report to {}", report_path.display());
    }

    if result.success {
        0
    } else {
        1
    }
}

/// Explain a non-ok run status as a hint, never as a raw error.
fn render_status_hint(status: RunStatus) {
    match status {
        RunStatus::Ok => {}
        RunStatus::IterationCapExceeded => println!(
            "{}",
            "The loop ran too many times. Does your loop variable change inside the loop?"
                .yellow()
        ),
        RunStatus::NoOutput => println!(
            "{}",
            "Nothing was printed. Try adding a print(...) statement.".yellow()
        ),
    }
}
