// src/peptide.rs

use crate::error::{AnalysisError, Result};
use crate::modifications::ModificationIndex;

/// A candidate peptide parsed from one full-sequence token, e.g.
/// `PEPT[Common Variable:Phospho on T]IDE`. Residue positions count from 1;
/// position 0 is the N-terminus (an annotation written before the first
/// residue).
#[derive(Debug, Clone, PartialEq)]
pub struct PeptideForm {
    pub base_sequence: String,
    /// (position, composite modification id) pairs in sequence order.
    pub mods: Vec<(usize, String)>,
}

impl PeptideForm {
    /// Parses a full-sequence string, resolving every bracketed annotation
    /// against the modification index. Brackets may nest (glycan
    /// annotations do); only the outermost pair delimits one annotation.
    /// An annotation that does not resolve is an [`AnalysisError::UnknownModification`].
    pub fn parse(full_sequence: &str, index: &ModificationIndex) -> Result<PeptideForm> {
        let mut base_sequence = String::new();
        let mut mods = Vec::new();
        let mut annotation = String::new();
        let mut depth = 0usize;

        for c in full_sequence.chars() {
            match c {
                '[' => {
                    if depth > 0 {
                        annotation.push(c);
                    }
                    depth += 1;
                }
                ']' => {
                    depth = depth.saturating_sub(1);
                    if depth > 0 {
                        annotation.push(c);
                    } else {
                        let key = resolve_key(&annotation);
                        if !index.contains_key(key) {
                            return Err(AnalysisError::UnknownModification {
                                token: annotation.clone(),
                            });
                        }
                        mods.push((base_sequence.len(), key.to_string()));
                        annotation.clear();
                    }
                }
                _ if depth > 0 => annotation.push(c),
                _ => base_sequence.push(c),
            }
        }

        Ok(PeptideForm {
            base_sequence,
            mods,
        })
    }

    /// True when any modification sits on a residue rather than on the
    /// N-terminus.
    pub fn has_internal_mod(&self) -> bool {
        self.mods.iter().any(|(pos, _)| *pos > 0)
    }

    pub fn is_modified(&self) -> bool {
        !self.mods.is_empty()
    }
}

/// Annotations carry `type:id on motif`; the index is keyed by the part
/// after the type prefix. Annotations without a type prefix are looked up
/// whole.
fn resolve_key(annotation: &str) -> &str {
    match annotation.split_once(':') {
        Some((_, key)) => key,
        None => annotation,
    }
}
