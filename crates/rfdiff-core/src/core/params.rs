use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTIGS: &str = "A20-60/0 50-100";
pub const DEFAULT_HOTSPOT_RESIDUES: [&str; 5] = ["A50", "A51", "A52", "A53", "A54"];
pub const DEFAULT_DIFFUSION_STEPS: u32 = 15;

/// Generation parameters forwarded to the service.
///
/// The service interprets these values. The client passes them through
/// without checking them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Contig specification, e.g. `A20-60/0 50-100`.
    pub contigs: String,
    /// Ordered hotspot residue identifiers, e.g. `A50`.
    pub hotspot_res: Vec<String>,
    pub diffusion_steps: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            contigs: DEFAULT_CONTIGS.to_string(),
            hotspot_res: DEFAULT_HOTSPOT_RESIDUES
                .iter()
                .map(|r| r.to_string())
                .collect(),
            diffusion_steps: DEFAULT_DIFFUSION_STEPS,
        }
    }
}
