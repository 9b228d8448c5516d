// src/summary.rs

use crate::psm::PsmRecord;
use crate::report::{CellValue, Column, ColumnKind};

/// Which optional categories a run tracks. The two schemas found in the
/// wild differ only here: the basic one has no contaminant concept (every
/// non-decoy row counts as a target) and no novel-transcript annotation;
/// the extended one tracks contaminants separately from targets and adds
/// the three novel-transcript categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Basic,
    Extended,
}

impl SchemaVariant {
    pub fn tracks_contaminants(&self) -> bool {
        matches!(self, SchemaVariant::Extended)
    }

    pub fn tracks_novel_transcripts(&self) -> bool {
        matches!(self, SchemaVariant::Extended)
    }
}

/// Per-file category counts and FDR ratios. Immutable once built; the
/// report table owns these for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct FdrSummary {
    pub file: String,
    pub variant: SchemaVariant,

    pub targets: usize,
    pub contaminants: usize,
    pub targets_with_variant: usize,
    pub targets_with_variant_mods: usize,
    pub targets_with_mods: usize,
    pub targets_novel_transcript: usize,
    pub targets_novel_transcript_mods: usize,
    pub targets_novel_transcript_variant: usize,

    pub decoys: usize,
    pub decoys_with_variant: usize,
    pub decoys_with_variant_mods: usize,
    pub decoys_with_mods: usize,
    pub decoys_novel_transcript: usize,
    pub decoys_novel_transcript_mods: usize,
    pub decoys_novel_transcript_variant: usize,

    pub fdr: f64,
    pub fdr_variant: f64,
    pub fdr_mod_variant: f64,
    pub fdr_mods: f64,
    pub fdr_novel_transcript: f64,
    pub fdr_novel_transcript_mods: f64,
    pub fdr_novel_transcript_variant: f64,
}

/// decoy / target ratio, defined as exactly 0 when there are no targets.
fn ratio(decoys: usize, targets: usize) -> f64 {
    if targets == 0 {
        0.0
    } else {
        decoys as f64 / targets as f64
    }
}

impl FdrSummary {
    /// Aggregates one file's records. `targets` and `decoys` must already
    /// be split on the decoy flag by the caller. Every category predicate
    /// is evaluated independently per record, so a composite count can
    /// never exceed either of its components.
    pub fn from_psms(
        file: impl Into<String>,
        targets: &[PsmRecord],
        decoys: &[PsmRecord],
        variant: SchemaVariant,
    ) -> FdrSummary {
        let count = |records: &[PsmRecord], pred: fn(&PsmRecord) -> bool| {
            records.iter().filter(|r| pred(r)).count()
        };

        let (target_count, contaminants) = if variant.tracks_contaminants() {
            let t = targets.iter().filter(|r| !r.is_contaminant).count();
            (t, targets.len() - t)
        } else {
            (targets.len(), 0)
        };

        let targets_with_variant = count(targets, |r| r.is_variant);
        let targets_with_variant_mods = count(targets, |r| r.is_variant_with_mod);
        let targets_with_mods = count(targets, |r| r.is_modified);
        let decoys_with_variant = count(decoys, |r| r.is_variant);
        let decoys_with_variant_mods = count(decoys, |r| r.is_variant_with_mod);
        let decoys_with_mods = count(decoys, |r| r.is_modified);

        let (
            targets_novel_transcript,
            targets_novel_transcript_mods,
            targets_novel_transcript_variant,
            decoys_novel_transcript,
            decoys_novel_transcript_mods,
            decoys_novel_transcript_variant,
        ) = if variant.tracks_novel_transcripts() {
            (
                count(targets, |r| r.is_novel_transcript),
                count(targets, |r| r.is_novel_transcript && r.is_modified),
                count(targets, |r| r.is_novel_transcript && r.is_variant),
                count(decoys, |r| r.is_novel_transcript),
                count(decoys, |r| r.is_novel_transcript && r.is_modified),
                count(decoys, |r| r.is_novel_transcript && r.is_variant),
            )
        } else {
            (0, 0, 0, 0, 0, 0)
        };

        FdrSummary {
            file: file.into(),
            variant,

            targets: target_count,
            contaminants,
            targets_with_variant,
            targets_with_variant_mods,
            targets_with_mods,
            targets_novel_transcript,
            targets_novel_transcript_mods,
            targets_novel_transcript_variant,

            decoys: decoys.len(),
            decoys_with_variant,
            decoys_with_variant_mods,
            decoys_with_mods,
            decoys_novel_transcript,
            decoys_novel_transcript_mods,
            decoys_novel_transcript_variant,

            fdr: ratio(decoys.len(), target_count + contaminants),
            fdr_variant: ratio(decoys_with_variant, targets_with_variant),
            fdr_mod_variant: ratio(decoys_with_variant_mods, targets_with_variant_mods),
            fdr_mods: ratio(decoys_with_mods, targets_with_mods),
            fdr_novel_transcript: ratio(decoys_novel_transcript, targets_novel_transcript),
            fdr_novel_transcript_mods: ratio(
                decoys_novel_transcript_mods,
                targets_novel_transcript_mods,
            ),
            fdr_novel_transcript_variant: ratio(
                decoys_novel_transcript_variant,
                targets_novel_transcript_variant,
            ),
        }
    }

    /// Cell values in declared column order; the static counterpart of
    /// [`report_columns`] for the same variant.
    pub fn values(&self) -> Vec<CellValue> {
        let mut v = vec![
            CellValue::Text(self.file.clone()),
            CellValue::Count(self.targets),
        ];
        if self.variant.tracks_contaminants() {
            v.push(CellValue::Count(self.contaminants));
        }
        v.push(CellValue::Count(self.targets_with_variant));
        v.push(CellValue::Count(self.targets_with_variant_mods));
        v.push(CellValue::Count(self.targets_with_mods));
        if self.variant.tracks_novel_transcripts() {
            v.push(CellValue::Count(self.targets_novel_transcript));
            v.push(CellValue::Count(self.targets_novel_transcript_mods));
            v.push(CellValue::Count(self.targets_novel_transcript_variant));
        }
        v.push(CellValue::Count(self.decoys));
        v.push(CellValue::Count(self.decoys_with_variant));
        v.push(CellValue::Count(self.decoys_with_variant_mods));
        v.push(CellValue::Count(self.decoys_with_mods));
        if self.variant.tracks_novel_transcripts() {
            v.push(CellValue::Count(self.decoys_novel_transcript));
            v.push(CellValue::Count(self.decoys_novel_transcript_mods));
            v.push(CellValue::Count(self.decoys_novel_transcript_variant));
        }
        v.push(CellValue::Ratio(self.fdr));
        v.push(CellValue::Ratio(self.fdr_variant));
        v.push(CellValue::Ratio(self.fdr_mod_variant));
        v.push(CellValue::Ratio(self.fdr_mods));
        if self.variant.tracks_novel_transcripts() {
            v.push(CellValue::Ratio(self.fdr_novel_transcript));
            v.push(CellValue::Ratio(self.fdr_novel_transcript_mods));
            v.push(CellValue::Ratio(self.fdr_novel_transcript_variant));
        }
        v
    }
}

/// The declared, ordered column schema for a variant: the string file
/// column, then the count columns, then the ratio columns.
pub fn report_columns(variant: SchemaVariant) -> Vec<Column> {
    let mut cols = vec![
        Column::new("File", ColumnKind::Text),
        Column::new("Targets", ColumnKind::Count),
    ];
    if variant.tracks_contaminants() {
        cols.push(Column::new("Contaminants", ColumnKind::Count));
    }
    cols.push(Column::new("TargetsWithVariant", ColumnKind::Count));
    cols.push(Column::new("TargetsWithVariantMods", ColumnKind::Count));
    cols.push(Column::new("TargetsWithMods", ColumnKind::Count));
    if variant.tracks_novel_transcripts() {
        cols.push(Column::new("TargetsNovelTranscriptPeptides", ColumnKind::Count));
        cols.push(Column::new("TargetsNovelTranscriptModPeptides", ColumnKind::Count));
        cols.push(Column::new(
            "TargetsNovelTranscriptVariantPeptides",
            ColumnKind::Count,
        ));
    }
    cols.push(Column::new("Decoys", ColumnKind::Count));
    cols.push(Column::new("DecoysWithVariant", ColumnKind::Count));
    cols.push(Column::new("DecoysWithVariantMods", ColumnKind::Count));
    cols.push(Column::new("DecoysWithMods", ColumnKind::Count));
    if variant.tracks_novel_transcripts() {
        cols.push(Column::new("DecoysNovelTranscriptPeptides", ColumnKind::Count));
        cols.push(Column::new("DecoysNovelTranscriptModPeptides", ColumnKind::Count));
        cols.push(Column::new(
            "DecoysNovelTranscriptVariantPeptides",
            ColumnKind::Count,
        ));
    }
    cols.push(Column::new("Fdr", ColumnKind::Ratio));
    cols.push(Column::new("FdrVariant", ColumnKind::Ratio));
    cols.push(Column::new("FdrModVariant", ColumnKind::Ratio));
    cols.push(Column::new("FdrMods", ColumnKind::Ratio));
    if variant.tracks_novel_transcripts() {
        cols.push(Column::new("FdrNovelTranscriptPeptides", ColumnKind::Ratio));
        cols.push(Column::new("FdrNovelTranscriptModPeptides", ColumnKind::Ratio));
        cols.push(Column::new(
            "FdrNovelTranscriptVariantPeptides",
            ColumnKind::Ratio,
        ));
    }
    cols
}
