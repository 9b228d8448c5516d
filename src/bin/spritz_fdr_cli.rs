use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use spritz_fdr_rs::summary::SchemaVariant;
use spritz_fdr_rs::{analyze_folders, RunConfig, DEFAULT_FDR_CUTOFF};

/// FDR statistics for proteogenomic search results.
#[derive(Parser, Debug)]
#[command(name = "spritz-fdr-rs", version)]
struct Args {
    /// Result folders, each holding the Task1/Task2/Task3 layout.
    #[arg(required = true)]
    folders: Vec<PathBuf>,

    /// Destination of the tab-separated report.
    #[arg(short, long, default_value = "out.txt")]
    output: PathBuf,

    /// Quality-score cutoff; scanning stops at the first row at or above it.
    #[arg(long, default_value_t = DEFAULT_FDR_CUTOFF)]
    cutoff: f64,

    /// Shared modification list (ptmlist text, e.g. aListOfMods.txt).
    #[arg(long)]
    mods: Option<PathBuf>,

    /// Track contaminants and novel-transcript categories.
    #[arg(long)]
    extended: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = RunConfig {
        folders: args.folders,
        output_path: args.output,
        cutoff: args.cutoff,
        variant: if args.extended {
            SchemaVariant::Extended
        } else {
            SchemaVariant::Basic
        },
        mod_list_path: args.mods,
        echo_console: true,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(format!("Analyzing {} folder(s)...", config.folders.len()));

    let run = match analyze_folders(&config) {
        Ok(run) => run,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("analysis failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    spinner.finish_with_message(format!(
        "Analyzed {} result file(s).",
        run.summaries.len()
    ));

    if let Err(e) = run.write_report(&config.output_path) {
        eprintln!("could not write {}: {e}", config.output_path.display());
        return ExitCode::FAILURE;
    }
    println!("Report written to {}", config.output_path.display());
    ExitCode::SUCCESS
}
