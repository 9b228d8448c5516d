// src/folders.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};
use crate::modifications::{build_mod_index, read_mods_from_protein_xml, Modification};
use crate::reader::read_psm_file;
use crate::summary::{FdrSummary, SchemaVariant};

/// Database files with this marker in their name are the contaminant
/// database, not the search database.
pub const CONTAMINANT_DB_MARKER: &str = "MPI_Contaminants";

pub fn task1_search_psms(folder: &Path) -> PathBuf {
    folder.join("Task1SearchTask").join("AllPSMs.psmtsv")
}

pub fn task1_search_peptides(folder: &Path) -> PathBuf {
    folder.join("Task1SearchTask").join("AllPeptides.psmtsv")
}

pub fn task3_search_psms(folder: &Path) -> PathBuf {
    folder.join("Task3SearchTask").join("AllPSMs.psmtsv")
}

pub fn task3_search_peptides(folder: &Path) -> PathBuf {
    folder.join("Task3SearchTask").join("AllPeptides.psmtsv")
}

/// The four result files analyzed per folder: two search passes, each with
/// per-PSM and per-peptide-group results.
pub fn result_files(folder: &Path) -> [PathBuf; 4] {
    [
        task1_search_psms(folder),
        task1_search_peptides(folder),
        task3_search_psms(folder),
        task3_search_peptides(folder),
    ]
}

/// Locates the GPTMD database: the first `.xml` file (case-insensitive)
/// under `Task2GptmdTask/` whose name does not contain the contaminant
/// marker.
pub fn gptmd_database(folder: &Path) -> Result<PathBuf> {
    let task_dir = folder.join("Task2GptmdTask");
    let mut entries: Vec<PathBuf> = fs::read_dir(&task_dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    entries
        .into_iter()
        .find(|p| {
            let name = p.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            !name.contains(CONTAMINANT_DB_MARKER) && name.to_lowercase().ends_with(".xml")
        })
        .ok_or(AnalysisError::MissingDatabase {
            folder: folder.to_path_buf(),
        })
}

/// Analyzes one result folder: merges the shared modification list with the
/// modifications recorded in the folder's GPTMD database (first inserted
/// definition wins), then scans and aggregates each of the four result
/// files. A failing file aborts the whole folder before any result for it
/// is produced.
pub fn analyze_results_folder(
    folder: &Path,
    common_mods: &[Modification],
    cutoff: f64,
    variant: SchemaVariant,
) -> Result<Vec<FdrSummary>> {
    let db = gptmd_database(folder)?;
    log::info!("{}: using GPTMD database {}", folder.display(), db.display());
    let xml_mods = read_mods_from_protein_xml(&db)?;
    let mods = build_mod_index(common_mods.iter().cloned().chain(xml_mods));

    let mut summaries = Vec::new();
    for file in result_files(folder) {
        let (targets, decoys) = read_psm_file(&file, cutoff, &mods, variant)?;
        let summary =
            FdrSummary::from_psms(file.to_string_lossy(), &targets, &decoys, variant);
        log::info!(
            "{}: {} targets, {} decoys, fdr {}",
            file.display(),
            summary.targets,
            summary.decoys,
            summary.fdr
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_with_dbs(name: &str, files: &[&str]) -> PathBuf {
        let folder = std::env::temp_dir().join("spritz_fdr_folders_test").join(name);
        let task_dir = folder.join("Task2GptmdTask");
        std::fs::create_dir_all(&task_dir).unwrap();
        for f in files {
            std::fs::write(task_dir.join(f), "<mzLibProteinDb/>").unwrap();
        }
        folder
    }

    #[test]
    fn result_file_layout_is_fixed() {
        let files = result_files(Path::new("run"));
        assert_eq!(
            files[0],
            Path::new("run").join("Task1SearchTask").join("AllPSMs.psmtsv")
        );
        assert_eq!(
            files[3],
            Path::new("run")
                .join("Task3SearchTask")
                .join("AllPeptides.psmtsv")
        );
    }

    #[test]
    fn database_lookup_skips_contaminants() {
        let folder = folder_with_dbs(
            "skips_contaminants",
            &["MPI_Contaminants.xml", "search.xml", "notes.txt"],
        );
        let db = gptmd_database(&folder).unwrap();
        assert_eq!(db.file_name().unwrap(), "search.xml");
    }

    #[test]
    fn missing_database_is_an_error() {
        let folder = folder_with_dbs("no_database", &["MPI_Contaminants.xml"]);
        let err = gptmd_database(&folder).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingDatabase { .. }));
    }
}
