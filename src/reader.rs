// src/reader.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{AnalysisError, Result};
use crate::modifications::ModificationIndex;
use crate::psm::{parse_row, HeaderIndex, PsmRecord, RowOutcome, HEADER_PREFIX};
use crate::summary::SchemaVariant;

/// Reads one result file into (targets, decoys). Files ending in `gz`
/// (`.gz`, also the rarer `.bgz`/`.tgz`) are decompressed transparently.
/// The first line starting with `"File Name"` is the header; rows are
/// pre-sorted by ascending quality score, so the scan ends at the first
/// row at or above the cutoff and later rows are never examined.
pub fn read_psm_file<P: AsRef<Path>>(
    path: P,
    cutoff: f64,
    mods: &ModificationIndex,
    variant: SchemaVariant,
) -> Result<(Vec<PsmRecord>, Vec<PsmRecord>)> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with("gz"))
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let mut header: Option<HeaderIndex> = None;
    let mut targets = Vec::new();
    let mut decoys = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;

        if line.starts_with(HEADER_PREFIX) && header.is_none() {
            let columns: Vec<String> = line.split('\t').map(|s| s.to_string()).collect();
            header = Some(HeaderIndex::locate(&columns, variant)?);
            continue;
        }

        // A data row before the header means the file is corrupt.
        let header = header
            .as_ref()
            .ok_or(AnalysisError::MissingColumn { name: HEADER_PREFIX })?;

        let values: Vec<&str> = line.split('\t').collect();
        match parse_row(header, &values, cutoff, mods, line_no)? {
            RowOutcome::Accepted(psm) => {
                if psm.is_decoy {
                    decoys.push(psm);
                } else {
                    targets.push(psm);
                }
            }
            RowOutcome::Stop => break,
        }
    }

    log::debug!(
        "{}: {} targets, {} decoys below cutoff {}",
        path.display(),
        targets.len(),
        decoys.len(),
        cutoff
    );
    Ok((targets, decoys))
}
