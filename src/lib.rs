// src/lib.rs
pub mod error;
pub mod folders;
pub mod modifications;
pub mod peptide;
pub mod psm;
pub mod reader;
pub mod report;
pub mod summary;

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::folders::analyze_results_folder;
use crate::modifications::{read_mods_from_file, Modification};
use crate::report::ReportTable;
use crate::summary::{report_columns, FdrSummary, SchemaVariant};

/// Records at or above this quality score are outside the confident prefix.
pub const DEFAULT_FDR_CUTOFF: f64 = 0.01;

/// Externalized run configuration: which result folders to analyze, where
/// the report goes, and how records are classified.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Result folders, each holding the fixed Task1/Task2/Task3 layout.
    pub folders: Vec<PathBuf>,
    /// Destination of the tab-separated report.
    pub output_path: PathBuf,
    /// Quality-score cutoff; scanning stops at the first row at or above it.
    pub cutoff: f64,
    /// Which optional categories are tracked.
    pub variant: SchemaVariant,
    /// Optional shared modification list (ptmlist text), merged with each
    /// folder's GPTMD database modifications.
    pub mod_list_path: Option<PathBuf>,
    /// Echo each file's statistics to stdout as it is processed.
    pub echo_console: bool,
}

impl RunConfig {
    pub fn new(folders: Vec<PathBuf>, output_path: PathBuf) -> RunConfig {
        RunConfig {
            folders,
            output_path,
            cutoff: DEFAULT_FDR_CUTOFF,
            variant: SchemaVariant::Basic,
            mod_list_path: None,
            echo_console: false,
        }
    }
}

/// Accumulated results of one run: the per-file summaries plus the report
/// table they were mapped onto.
pub struct AnalysisRun {
    pub summaries: Vec<FdrSummary>,
    pub table: ReportTable,
}

impl AnalysisRun {
    /// The full tab-separated report text.
    pub fn report_text(&self) -> String {
        self.table.table_string()
    }

    /// Writes the report to `path`, creating parent directories as needed
    /// and replacing any previous report.
    pub fn write_report(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.report_text())?;
        Ok(())
    }
}

/// Runs the whole analysis: loads the shared modification list once, walks
/// the configured folders sequentially, and accumulates one report row per
/// result file. A folder that fails (missing files, corrupt rows) is
/// logged and skipped; the remaining folders still run. Within a folder a
/// failing file aborts the folder before it contributes any rows.
pub fn analyze_folders(config: &RunConfig) -> Result<AnalysisRun> {
    let common_mods: Vec<Modification> = match &config.mod_list_path {
        Some(path) => read_mods_from_file(path)?,
        None => Vec::new(),
    };
    log::info!("loaded {} shared modification definitions", common_mods.len());

    let mut table = ReportTable::new(report_columns(config.variant));
    let mut summaries = Vec::new();

    for folder in &config.folders {
        let folder_summaries =
            match analyze_results_folder(folder, &common_mods, config.cutoff, config.variant) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("skipping folder {}: {}", folder.display(), e);
                    continue;
                }
            };

        for summary in folder_summaries {
            let row = table.new_row(summary.values())?;
            table.append_row(row);
            if config.echo_console {
                println!("{}", table.console_string());
            }
            summaries.push(summary);
        }
    }

    Ok(AnalysisRun { summaries, table })
}
