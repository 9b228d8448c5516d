// src/report.rs

use std::fmt;

use crate::error::{AnalysisError, Result};

/// Semantic type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Count,
    Ratio,
}

/// One declared report column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: &'static str, kind: ColumnKind) -> Column {
        Column { name, kind }
    }
}

/// One typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Count(usize),
    Ratio(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Count(n) => write!(f, "{n}"),
            CellValue::Ratio(r) => write!(f, "{r}"),
        }
    }
}

/// One accumulated row, already validated against the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<CellValue>,
}

/// Accumulates one row per analyzed file under a schema fixed at
/// construction, and renders to console text or a tab-separated dump.
#[derive(Debug, Clone)]
pub struct ReportTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl ReportTable {
    pub fn new(columns: Vec<Column>) -> ReportTable {
        ReportTable {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Validates a positional value list against the schema width. A
    /// mismatch means the value mapping and the schema disagree, which is
    /// a programming defect rather than bad input.
    pub fn new_row(&self, values: Vec<CellValue>) -> Result<Row> {
        if values.len() != self.columns.len() {
            return Err(AnalysisError::ColumnCountMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        Ok(Row { values })
    }

    pub fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// `name value` lines for the most recently appended row, for
    /// interactive inspection while files are processed. Empty when no row
    /// has been appended yet.
    pub fn console_string(&self) -> String {
        let mut out = String::new();
        if let Some(row) = self.rows.last() {
            for (col, value) in self.columns.iter().zip(&row.values) {
                out.push_str(col.name);
                out.push(' ');
                out.push_str(&value.to_string());
                out.push('\n');
            }
        }
        out
    }

    /// Full tab-separated dump: one header line of column names, then one
    /// line per accumulated row in insertion order.
    pub fn table_string(&self) -> String {
        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
        out.push_str(&header.join("\t"));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<Column> {
        vec![
            Column::new("File", ColumnKind::Text),
            Column::new("Targets", ColumnKind::Count),
            Column::new("Fdr", ColumnKind::Ratio),
        ]
    }

    #[test]
    fn rejects_width_mismatch() {
        let table = ReportTable::new(schema());
        let err = table
            .new_row(vec![CellValue::Text("a".into())])
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::ColumnCountMismatch {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn console_string_shows_last_row_only() {
        let mut table = ReportTable::new(schema());
        assert_eq!(table.console_string(), "");

        for (name, fdr) in [("a.psmtsv", 0.01), ("b.psmtsv", 0.002)] {
            let row = table
                .new_row(vec![
                    CellValue::Text(name.into()),
                    CellValue::Count(100),
                    CellValue::Ratio(fdr),
                ])
                .unwrap();
            table.append_row(row);
        }

        assert_eq!(
            table.console_string(),
            "File b.psmtsv\nTargets 100\nFdr 0.002\n"
        );
    }

    #[test]
    fn table_string_round_trips() {
        let mut table = ReportTable::new(schema());
        let rows = [
            ("a.psmtsv", 100usize, 0.01),
            ("b.psmtsv", 250, 0.0),
        ];
        for (name, targets, fdr) in rows {
            let row = table
                .new_row(vec![
                    CellValue::Text(name.into()),
                    CellValue::Count(targets),
                    CellValue::Ratio(fdr),
                ])
                .unwrap();
            table.append_row(row);
        }

        let text = table.table_string();
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(header, vec!["File", "Targets", "Fdr"]);

        for (line, (name, targets, fdr)) in lines.zip(rows) {
            let cells: Vec<&str> = line.split('\t').collect();
            assert_eq!(cells[0], name);
            assert_eq!(cells[1], targets.to_string());
            assert_eq!(cells[2], fdr.to_string());
        }
    }
}
