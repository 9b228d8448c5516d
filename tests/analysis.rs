use std::fs;
use std::path::{Path, PathBuf};

use spritz_fdr_rs::summary::SchemaVariant;
use spritz_fdr_rs::{analyze_folders, RunConfig};

const MOD_LIST: &str = "\
ID   Oxidation
MT   Common Variable
TG   M
MM   15.994915
//
";

const DB_XML: &str = "\
<mzLibProteinDb>
  <modification>ID   Deamidation
MT   Gptmd
TG   N
MM   0.984016
//</modification>
</mzLibProteinDb>
";

const HEADER: &str =
    "File Name\tQValue\tDecoy/Contaminant/Target\tIdentified Sequence Variations\tFull Sequence";

fn write_result_file(path: &Path, rows: &[&str]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(path, text).unwrap();
}

fn make_folder(root: &Path, name: &str) -> PathBuf {
    let folder = root.join(name);
    fs::create_dir_all(folder.join("Task2GptmdTask")).unwrap();
    fs::write(folder.join("Task2GptmdTask").join("search.xml"), DB_XML).unwrap();

    // One modified target (via the GPTMD mod), one variant target, one
    // decoy, and a terminating row at the cutoff.
    let rows = [
        "f.raw\t0.001\tT\t\tPEPTIDE",
        "f.raw\t0.002\tT\t\tPEN[Gptmd:Deamidation on N]K",
        "f.raw\t0.003\tT\tA4V\tPEPTIDE",
        "f.raw\t0.004\tD\t\tEDITPEP",
        "f.raw\t0.5\tT\t\tPEPTIDE",
    ];
    for file in [
        folder.join("Task1SearchTask").join("AllPSMs.psmtsv"),
        folder.join("Task1SearchTask").join("AllPeptides.psmtsv"),
        folder.join("Task3SearchTask").join("AllPSMs.psmtsv"),
        folder.join("Task3SearchTask").join("AllPeptides.psmtsv"),
    ] {
        write_result_file(&file, &rows);
    }
    folder
}

fn workspace(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join("spritz_fdr_integration").join(name);
    if root.exists() {
        fs::remove_dir_all(&root).unwrap();
    }
    fs::create_dir_all(&root).unwrap();
    root
}

#[test]
fn analyzes_a_folder_end_to_end() {
    let root = workspace("end_to_end");
    let folder = make_folder(&root, "run1");

    let mod_list = root.join("aListOfMods.txt");
    fs::write(&mod_list, MOD_LIST).unwrap();

    let mut config = RunConfig::new(vec![folder], root.join("out.txt"));
    config.mod_list_path = Some(mod_list);
    let run = analyze_folders(&config).unwrap();

    // Four result files, one row each.
    assert_eq!(run.summaries.len(), 4);
    for s in &run.summaries {
        assert_eq!(s.targets, 3);
        assert_eq!(s.decoys, 1);
        assert_eq!(s.targets_with_variant, 1);
        assert_eq!(s.targets_with_mods, 1);
        assert_eq!(s.fdr, 1.0 / 3.0);
        assert_eq!(s.fdr_variant, 0.0);
    }

    run.write_report(&config.output_path).unwrap();
    let text = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("File\tTargets\t"));

    // Every data line re-splits to the header's width.
    let width = lines[0].split('\t').count();
    for line in &lines[1..] {
        assert_eq!(line.split('\t').count(), width);
    }
}

#[test]
fn failing_folder_is_skipped_but_run_continues() {
    let root = workspace("skip_failing");
    let good = make_folder(&root, "good");
    let missing = root.join("does_not_exist");

    let config = RunConfig::new(vec![missing, good], root.join("out.txt"));
    let run = analyze_folders(&config).unwrap();
    assert_eq!(run.summaries.len(), 4);
}

#[test]
fn extended_variant_needs_the_novel_transcript_column() {
    let root = workspace("extended_missing_column");
    let folder = make_folder(&root, "run1");

    let mut config = RunConfig::new(vec![folder], root.join("out.txt"));
    config.variant = SchemaVariant::Extended;
    // The fixture files lack the Novel Transcript column, so the folder is
    // skipped and the run produces an empty report body.
    let run = analyze_folders(&config).unwrap();
    assert!(run.summaries.is_empty());
    assert_eq!(run.report_text().lines().count(), 1);
}
