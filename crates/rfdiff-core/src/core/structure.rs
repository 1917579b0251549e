use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Record name prefix of atomic coordinate lines.
pub const ATOM_RECORD_PREFIX: &str = "ATOM";

/// Upper bound on the number of `ATOM` records submitted to the service.
pub const DEFAULT_MAX_ATOM_RECORDS: usize = 400;

/// Reference structure used when no identifier is given.
pub const DEFAULT_STRUCTURE_ID: &str = "1R42";

const STRUCTURE_FILE_EXTENSION: &str = "pdb";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureIdError {
    #[error("Structure identifier cannot be empty")]
    Empty,

    #[error("Structure identifier '{0}' contains non-alphanumeric characters")]
    InvalidCharacters(String),
}

/// Identifier of a structure in the public repository (e.g. `1R42`).
///
/// The identifier doubles as the local file stem, so it is restricted to ASCII
/// alphanumerics. Case is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructureId(String);

impl StructureId {
    pub fn new(id: impl Into<String>) -> Result<Self, StructureIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(StructureIdError::Empty);
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(StructureIdError::InvalidCharacters(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the local structure file, e.g. `1R42.pdb`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, STRUCTURE_FILE_EXTENSION)
    }
}

impl Default for StructureId {
    fn default() -> Self {
        Self(DEFAULT_STRUCTURE_ID.to_string())
    }
}

impl FromStr for StructureId {
    type Err = StructureIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if the line is an atomic coordinate record.
#[inline]
pub fn is_atom_record(line: &str) -> bool {
    line.starts_with(ATOM_RECORD_PREFIX)
}

/// Keeps the first `max_records` `ATOM` lines of `content`, in their original order.
///
/// Lines are split on `\n` only, so a trailing `\r` from CRLF input stays attached to its line.
/// When the content holds fewer `ATOM` lines than `max_records`, all of them are returned.
pub fn extract_atom_records(content: &str, max_records: usize) -> String {
    content
        .split('\n')
        .filter(|line| is_atom_record(line))
        .take(max_records)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Counts the lines of a string produced by [`extract_atom_records`].
pub fn record_count(records: &str) -> usize {
    if records.is_empty() {
        0
    } else {
        records.split('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom_line(serial: usize) -> String {
        format!(
            "ATOM  {:>5}  CA  ALA A{:>4}      11.104  13.207   2.100  1.00  0.00           C",
            serial, serial
        )
    }

    fn mixed_content(atom_lines: usize, other_lines: usize) -> String {
        let mut lines = vec!["HEADER    TEST STRUCTURE".to_string()];
        for i in 0..other_lines.saturating_sub(1) {
            lines.push(format!("REMARK {}", i));
        }
        for i in 1..=atom_lines {
            lines.push(atom_line(i));
        }
        lines.push("END".to_string());
        lines.join("\n")
    }

    #[test]
    fn extraction_is_bounded_by_max_records() {
        let content = mixed_content(450, 50);
        let records = extract_atom_records(&content, DEFAULT_MAX_ATOM_RECORDS);
        assert_eq!(record_count(&records), 400);
    }

    #[test]
    fn fewer_records_than_limit_returns_all_of_them() {
        let content = mixed_content(12, 5);
        let records = extract_atom_records(&content, DEFAULT_MAX_ATOM_RECORDS);
        assert_eq!(record_count(&records), 12);
    }

    #[test]
    fn extraction_preserves_source_order() {
        let content = mixed_content(30, 3);
        let records = extract_atom_records(&content, 10);
        let expected: Vec<String> = (1..=10).map(atom_line).collect();
        assert_eq!(records, expected.join("\n"));
    }

    #[test]
    fn every_extracted_line_is_an_atom_record() {
        let content = [
            "HETATM    1  O   HOH A 101       1.000   1.000   1.000  1.00  0.00           O",
            &atom_line(1),
            "ANISOU    1  N   ALA A   1     1000   1000   1000      0      0      0       N",
            " ATOM indented lines do not count",
            &atom_line(2),
            "TER",
        ]
        .join("\n");
        let records = extract_atom_records(&content, DEFAULT_MAX_ATOM_RECORDS);
        assert_eq!(record_count(&records), 2);
        assert!(records.split('\n').all(is_atom_record));
    }

    #[test]
    fn carriage_returns_are_kept_verbatim() {
        let content = format!("{}\r\n{}\r\nEND\r\n", atom_line(1), atom_line(2));
        let records = extract_atom_records(&content, DEFAULT_MAX_ATOM_RECORDS);
        assert_eq!(records, format!("{}\r\n{}\r", atom_line(1), atom_line(2)));
    }

    #[test]
    fn content_without_atom_records_yields_empty_string() {
        let records = extract_atom_records("HEADER\nREMARK\nEND\n", DEFAULT_MAX_ATOM_RECORDS);
        assert!(records.is_empty());
        assert_eq!(record_count(&records), 0);
    }

    #[test]
    fn structure_id_builds_file_name() {
        let id: StructureId = "1R42".parse().unwrap();
        assert_eq!(id.file_name(), "1R42.pdb");
        assert_eq!(StructureId::default(), id);
    }

    #[test]
    fn structure_id_rejects_path_like_input() {
        assert_eq!(StructureId::new(""), Err(StructureIdError::Empty));
        assert!(matches!(
            StructureId::new("../1R42"),
            Err(StructureIdError::InvalidCharacters(_))
        ));
    }
}
