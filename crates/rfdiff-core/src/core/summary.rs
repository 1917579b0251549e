use super::structure::is_atom_record;
use std::collections::BTreeSet;

// Fixed PDB columns (0-based, end exclusive).
const CHAIN_ID_COLUMN: usize = 21;
const RESIDUE_NUMBER_COLUMNS: std::ops::Range<usize> = 22..26;
const INSERTION_CODE_COLUMN: usize = 26;

/// Residue coverage of a single chain within a set of `ATOM` records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub chain_id: char,
    pub atom_count: usize,
    pub first_residue: isize,
    pub last_residue: isize,
    residues: BTreeSet<(isize, char)>,
}

impl ChainSummary {
    fn new(chain_id: char, residue_number: isize, insertion_code: char) -> Self {
        Self {
            chain_id,
            atom_count: 0,
            first_residue: residue_number,
            last_residue: residue_number,
            residues: BTreeSet::from([(residue_number, insertion_code)]),
        }
    }

    fn add_atom(&mut self, residue_number: isize, insertion_code: char) {
        self.atom_count += 1;
        self.first_residue = self.first_residue.min(residue_number);
        self.last_residue = self.last_residue.max(residue_number);
        self.residues.insert((residue_number, insertion_code));
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }
}

/// Chain and residue overview of a block of structure text.
///
/// Chains are listed in the order they first appear. Lines that are not `ATOM` records are
/// skipped. `ATOM` lines too short to carry a residue number are counted as unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureSummary {
    pub atom_records: usize,
    pub unparsed_records: usize,
    pub chains: Vec<ChainSummary>,
}

impl StructureSummary {
    pub fn from_records(records: &str) -> Self {
        let mut summary = Self::default();

        for line in records.lines().filter(|l| is_atom_record(l)) {
            summary.atom_records += 1;

            let Some((chain_id, residue_number, insertion_code)) = parse_residue_fields(line)
            else {
                summary.unparsed_records += 1;
                continue;
            };

            match summary.chains.iter_mut().find(|c| c.chain_id == chain_id) {
                Some(chain) => chain.add_atom(residue_number, insertion_code),
                None => {
                    let mut chain = ChainSummary::new(chain_id, residue_number, insertion_code);
                    chain.add_atom(residue_number, insertion_code);
                    summary.chains.push(chain);
                }
            }
        }

        summary
    }

    pub fn chain(&self, chain_id: char) -> Option<&ChainSummary> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }
}

fn parse_residue_fields(line: &str) -> Option<(char, isize, char)> {
    let chain_id = line
        .get(CHAIN_ID_COLUMN..CHAIN_ID_COLUMN + 1)?
        .chars()
        .next()?;
    let residue_number = line.get(RESIDUE_NUMBER_COLUMNS)?.trim().parse().ok()?;
    let insertion_code = line
        .get(INSERTION_CODE_COLUMN..INSERTION_CODE_COLUMN + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ');
    Some((chain_id, residue_number, insertion_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(serial: usize, name: &str, chain: char, residue: isize, icode: char) -> String {
        format!(
            "ATOM  {:>5} {:<4} ALA {}{:>4}{}   11.104  13.207   2.100  1.00  0.00           C",
            serial, name, chain, residue, icode
        )
    }

    #[test]
    fn chains_are_summarized_in_order_of_appearance() {
        let records = [
            atom(1, "N", 'B', 5, ' '),
            atom(2, "CA", 'B', 5, ' '),
            atom(3, "N", 'A', 20, ' '),
            atom(4, "N", 'A', 21, ' '),
            atom(5, "N", 'A', 21, 'A'),
            atom(6, "N", 'B', 7, ' '),
        ]
        .join("\n");

        let summary = StructureSummary::from_records(&records);
        assert_eq!(summary.atom_records, 6);
        assert_eq!(summary.unparsed_records, 0);
        assert_eq!(
            summary.chains.iter().map(|c| c.chain_id).collect::<Vec<_>>(),
            vec!['B', 'A']
        );

        let chain_a = summary.chain('A').unwrap();
        assert_eq!(chain_a.atom_count, 3);
        assert_eq!((chain_a.first_residue, chain_a.last_residue), (20, 21));
        assert_eq!(chain_a.residue_count(), 3);

        let chain_b = summary.chain('B').unwrap();
        assert_eq!(chain_b.atom_count, 3);
        assert_eq!((chain_b.first_residue, chain_b.last_residue), (5, 7));
        assert_eq!(chain_b.residue_count(), 2);
    }

    #[test]
    fn truncated_atom_lines_are_counted_as_unparsed() {
        let records = format!("ATOM      1  N\n{}", atom(2, "CA", 'A', 50, ' '));
        let summary = StructureSummary::from_records(&records);
        assert_eq!(summary.atom_records, 2);
        assert_eq!(summary.unparsed_records, 1);
        assert_eq!(summary.chains.len(), 1);
    }

    #[test]
    fn non_atom_lines_are_ignored() {
        let summary = StructureSummary::from_records("HEADER\nHETATM    1  O   HOH A 101\nEND");
        assert_eq!(summary, StructureSummary::default());
    }
}
