use crate::cli::InspectArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use rfdiff::core::summary::StructureSummary;
use rfdiff::workflows::generate;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: InspectArgs) -> Result<()> {
    let config = PartialAppConfig::load(args.structure.config.as_deref())?
        .merge_with_structure_args(&args.structure)?;
    let path = args
        .input
        .clone()
        .unwrap_or_else(|| config.job.structure_path());

    info!("Inspecting {:?}", path);
    let records = generate::extract_truncated_records(&path, config.job.max_atom_records)?;
    let summary = StructureSummary::from_records(&records);
    if summary.unparsed_records > 0 {
        warn!(
            "{} ATOM record(s) had no readable chain or residue number.",
            summary.unparsed_records
        );
    }

    print!("{}", render_summary(&summary, &path, config.job.max_atom_records));
    Ok(())
}

fn render_summary(summary: &StructureSummary, path: &Path, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Structure: {}", path.display());
    let _ = writeln!(
        out,
        "ATOM records submitted: {} (limit {})",
        summary.atom_records, limit
    );
    if summary.chains.is_empty() {
        let _ = writeln!(out, "No chains found.");
        return out;
    }
    for chain in &summary.chains {
        let _ = writeln!(
            out,
            "  Chain {}: residues {}-{} ({} residues, {} atoms)",
            chain.chain_id,
            chain.first_residue,
            chain.last_residue,
            chain.residue_count(),
            chain.atom_count
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_each_chain_with_its_residue_range() {
        let records = [
            "ATOM      1  N   MET A  20      11.104  13.207   2.100  1.00  0.00           N",
            "ATOM      2  CA  MET A  20      12.104  13.207   2.100  1.00  0.00           C",
            "ATOM      3  N   LYS A  21      13.104  13.207   2.100  1.00  0.00           N",
        ]
        .join("\n");
        let summary = StructureSummary::from_records(&records);

        let rendered = render_summary(&summary, Path::new("1R42.pdb"), 400);

        assert_eq!(
            rendered,
            "Structure: 1R42.pdb\n\
             ATOM records submitted: 3 (limit 400)\n  \
             Chain A: residues 20-21 (2 residues, 3 atoms)\n"
        );
    }

    #[test]
    fn empty_summary_reports_no_chains() {
        let rendered = render_summary(&StructureSummary::default(), Path::new("x.pdb"), 10);
        assert!(rendered.ends_with("No chains found.\n"));
    }
}
