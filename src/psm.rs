// src/psm.rs

use crate::error::{AnalysisError, Result};
use crate::modifications::ModificationIndex;
use crate::peptide::PeptideForm;
use crate::summary::SchemaVariant;

/// Header line prefix that identifies the column-name row.
pub const HEADER_PREFIX: &str = "File Name";

/// Quality-score column; lower is better.
pub const QVALUE_COLUMN: &str = "QValue";

/// Three-way discriminator column.
pub const DISCRIMINATOR_COLUMN: &str = "Decoy/Contaminant/Target";

/// Pipe-delimited sequence-variation annotations.
pub const VARIATIONS_COLUMN: &str = "Identified Sequence Variations";

/// Pipe-delimited candidate full sequences.
pub const FULL_SEQUENCE_COLUMN: &str = "Full Sequence";

/// Novel-transcript indicator, only present in the extended schema.
pub const NOVEL_TRANSCRIPT_COLUMN: &str = "Novel Transcript";

pub const DECOY_MARKER: &str = "D";
pub const CONTAMINANT_MARKER: &str = "C";

/// Candidate sequences and variation annotations are pipe-delimited.
pub const PIPE: char = '|';

/// A variation annotation carrying a modification contains a bracket.
pub const MOD_BRACKET: char = '[';

/// Resolved positions of the required columns within one file's header.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    pub column_count: usize,
    qvalue: usize,
    discriminator: usize,
    variations: usize,
    full_sequence: usize,
    novel_transcript: Option<usize>,
}

impl HeaderIndex {
    /// Locates required columns by exact name. The novel-transcript column
    /// is only required by the extended schema.
    pub fn locate(header: &[String], variant: SchemaVariant) -> Result<HeaderIndex> {
        let find = |name: &'static str| -> Result<usize> {
            header
                .iter()
                .position(|c| c == name)
                .ok_or(AnalysisError::MissingColumn { name })
        };

        let novel_transcript = match variant {
            SchemaVariant::Basic => None,
            SchemaVariant::Extended => Some(find(NOVEL_TRANSCRIPT_COLUMN)?),
        };

        Ok(HeaderIndex {
            column_count: header.len(),
            qvalue: find(QVALUE_COLUMN)?,
            discriminator: find(DISCRIMINATOR_COLUMN)?,
            variations: find(VARIATIONS_COLUMN)?,
            full_sequence: find(FULL_SEQUENCE_COLUMN)?,
            novel_transcript,
        })
    }
}

/// One classified identification record (PSM or peptide-group row).
#[derive(Debug, Clone, PartialEq)]
pub struct PsmRecord {
    pub q_value: f64,
    pub is_decoy: bool,
    pub is_contaminant: bool,
    pub is_variant: bool,
    pub is_variant_with_mod: bool,
    pub candidate_peptides: Vec<PeptideForm>,
    pub is_modified: bool,
    pub is_novel_transcript: bool,
}

/// Outcome of parsing one data row. Rows are pre-sorted by ascending
/// quality score, so the first row at or above the cutoff ends the useful
/// prefix and the caller must stop scanning.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(PsmRecord),
    Stop,
}

/// Converts one tab-split data row into a classified record, or signals
/// `Stop` at the quality cutoff. Pure function of its inputs; `line` is
/// carried only for error context.
pub fn parse_row(
    header: &HeaderIndex,
    values: &[&str],
    cutoff: f64,
    mods: &ModificationIndex,
    line: usize,
) -> Result<RowOutcome> {
    if values.len() != header.column_count {
        return Err(AnalysisError::SchemaMismatch {
            expected: header.column_count,
            found: values.len(),
            line,
        });
    }

    let raw_q = values[header.qvalue];
    let q_value: f64 = raw_q.parse().map_err(|_| AnalysisError::MalformedNumber {
        value: raw_q.to_string(),
        line,
    })?;
    if q_value >= cutoff {
        return Ok(RowOutcome::Stop);
    }

    let discriminator = values[header.discriminator];
    let variations = values[header.variations];
    let is_variant = variations.split(PIPE).any(|v| !v.is_empty());
    let is_variant_with_mod = variations.split(PIPE).any(|v| v.contains(MOD_BRACKET));

    let candidate_peptides = values[header.full_sequence]
        .split(PIPE)
        .map(|s| PeptideForm::parse(s, mods))
        .collect::<Result<Vec<_>>>()?;
    let is_modified = candidate_peptides.iter().any(|p| p.has_internal_mod());

    let is_novel_transcript = header
        .novel_transcript
        .map(|i| is_truthy(values[i]))
        .unwrap_or(false);

    Ok(RowOutcome::Accepted(PsmRecord {
        q_value,
        is_decoy: discriminator == DECOY_MARKER,
        is_contaminant: discriminator == CONTAMINANT_MARKER,
        is_variant,
        is_variant_with_mod,
        candidate_peptides,
        is_modified,
        is_novel_transcript,
    }))
}

/// The novel-transcript indicator is a loosely-formatted boolean field.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim(),
        "Y" | "y" | "T" | "t" | "1" | "TRUE" | "True" | "true"
    )
}
