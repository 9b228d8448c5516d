// src/modifications.rs

use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;

/// Lookup from composite modification identifier (`"<id> on <motif>"`) to
/// its definition.
pub type ModificationIndex = AHashMap<String, Modification>;

/// One post-translational modification definition from a ptmlist-style file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modification {
    /// Short identifier, e.g. `Oxidation`.
    pub id: String,
    /// Category, e.g. `Common Variable`.
    pub modification_type: String,
    /// Target residue motif, e.g. `M`.
    pub motif: String,
    /// Monoisotopic mass shift in Da, when the entry declares one.
    pub monoisotopic_mass: Option<f64>,
}

impl Modification {
    /// A definition is usable only when id, type and motif are all present.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.modification_type.is_empty() && !self.motif.is_empty()
    }

    /// Composite identifier used as the index key and inside bracketed
    /// full-sequence annotations, e.g. `Oxidation on M`.
    pub fn id_with_motif(&self) -> String {
        format!("{} on {}", self.id, self.motif)
    }
}

/// Parses ptmlist-style flat text into modification definitions.
/// Each record is a run of `XX   value` lines terminated by `//`:
/// ```text
/// ID   Oxidation
/// MT   Common Variable
/// TG   M
/// MM   15.994915
/// //
/// ```
/// Unrecognized line codes are ignored, as are records missing their
/// mandatory fields.
pub fn parse_ptm_entries(text: &str) -> Vec<Modification> {
    let mut mods = Vec::new();
    let mut current = Modification::default();

    for line in text.lines() {
        let line = line.trim_end();
        if line.starts_with("//") {
            if current != Modification::default() {
                mods.push(std::mem::take(&mut current));
            }
            continue;
        }
        let (code, value) = match line.split_once(char::is_whitespace) {
            Some((code, value)) => (code, value.trim()),
            None => continue,
        };
        match code {
            "ID" => current.id = value.to_string(),
            "MT" => current.modification_type = value.to_string(),
            "TG" => current.motif = value.to_string(),
            "MM" => current.monoisotopic_mass = value.parse().ok(),
            _ => {}
        }
    }
    // Tolerate a final record without a trailing terminator
    if current != Modification::default() {
        mods.push(current);
    }
    mods
}

/// Reads a ptm list file, e.g. the `aListOfMods.txt` shipped alongside the
/// search engine.
pub fn read_mods_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Modification>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_ptm_entries(&text))
}

/// Extracts the ptmlist blocks embedded in `<modification>` elements of a
/// GPTMD protein XML database. The blocks are plain ptmlist text, so a line
/// scan suffices; no XML engine is involved.
pub fn read_mods_from_protein_xml<P: AsRef<Path>>(path: P) -> Result<Vec<Modification>> {
    let text = fs::read_to_string(path)?;
    let mut blocks = String::new();

    let mut rest = text.as_str();
    while let Some(start) = rest.find("<modification>") {
        rest = &rest[start + "<modification>".len()..];
        let end = match rest.find("</modification>") {
            Some(end) => end,
            None => break,
        };
        blocks.push_str(&rest[..end]);
        blocks.push('\n');
        rest = &rest[end..];
    }
    Ok(parse_ptm_entries(&blocks))
}

/// Builds the index from definitions: invalid entries are skipped, and on a
/// duplicate composite identifier the first inserted definition wins.
pub fn build_mod_index<I>(mods: I) -> ModificationIndex
where
    I: IntoIterator<Item = Modification>,
{
    let mut index = ModificationIndex::new();
    for m in mods {
        if !m.is_valid() {
            continue;
        }
        index.entry(m.id_with_motif()).or_insert(m);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    const PTM_TEXT: &str = "\
ID   Oxidation
MT   Common Variable
TG   M
MM   15.994915
//
ID   Phospho
MT   Common Biological
TG   S
MM   79.966331
//
ID   Nameless
MT   Broken
//
";

    #[test]
    fn parses_ptm_records() {
        let mods = parse_ptm_entries(PTM_TEXT);
        assert_eq!(mods.len(), 3);
        assert_eq!(mods[0].id, "Oxidation");
        assert_eq!(mods[0].motif, "M");
        assert_eq!(mods[0].monoisotopic_mass, Some(15.994915));
        assert_eq!(mods[1].id_with_motif(), "Phospho on S");
        assert!(!mods[2].is_valid());
    }

    #[test]
    fn index_skips_invalid_and_keeps_first_duplicate() {
        let first = Modification {
            id: "Oxidation".into(),
            modification_type: "Common Variable".into(),
            motif: "M".into(),
            monoisotopic_mass: Some(15.994915),
        };
        let duplicate = Modification {
            monoisotopic_mass: Some(16.0),
            ..first.clone()
        };
        let invalid = Modification {
            id: "Nameless".into(),
            ..Default::default()
        };

        let index = build_mod_index(vec![first.clone(), duplicate, invalid]);
        assert_eq!(index.len(), 1);
        assert_eq!(index["Oxidation on M"], first);
    }

    #[test]
    fn extracts_mods_from_protein_xml() {
        let xml = "\
<mzLibProteinDb>
  <modification>ID   Carbamidomethyl
MT   Fixed
TG   C
MM   57.021464
//</modification>
  <modification>ID   Deamidation
MT   Gptmd
TG   N
MM   0.984016
//</modification>
  <protein></protein>
</mzLibProteinDb>
";
        let dir = std::env::temp_dir().join("spritz_fdr_xml_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("db.xml");
        std::fs::write(&path, xml).unwrap();

        let mods = read_mods_from_protein_xml(&path).unwrap();
        assert_eq!(mods.len(), 2);
        assert_eq!(mods[0].id_with_motif(), "Carbamidomethyl on C");
        assert_eq!(mods[1].id_with_motif(), "Deamidation on N");
    }
}
