mod models;

pub use models::AppConfig;

use crate::cli::{GenerateArgs, StructureArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use rfdiff::client::ClientConfigBuilder;
use rfdiff::core::structure::StructureId;
use rfdiff::workflows::generate::GenerationJob;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialStructureConfig {
    pdb_id: Option<String>,
    work_dir: Option<PathBuf>,
    download_url: Option<String>,
    max_atom_records: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialServiceConfig {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    check_status: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGenerationConfig {
    contigs: Option<String>,
    hotspot_res: Option<Vec<String>>,
    diffusion_steps: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    structure: Option<PartialStructureConfig>,
    service: Option<PartialServiceConfig>,
    generation: Option<PartialGenerationConfig>,
    output: Option<PartialOutputConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file if one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the settings used by `fetch` and `inspect`.
    pub fn merge_with_structure_args(self, args: &StructureArgs) -> Result<AppConfig> {
        self.merge(args, None)
    }

    /// Resolves the settings used by `generate`, including `--set` overrides.
    pub fn merge_with_cli(mut self, args: &GenerateArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;
        self.merge(&args.structure, Some(args))
    }

    fn merge(self, structure_args: &StructureArgs, args: Option<&GenerateArgs>) -> Result<AppConfig> {
        let structure = self.structure.unwrap_or_default();
        let service = self.service.unwrap_or_default();
        let generation = self.generation.unwrap_or_default();
        let output = self.output.unwrap_or_default();
        let defaults = GenerationJob::default();

        let structure_id = match structure_args.pdb_id.as_ref().or(structure.pdb_id.as_ref()) {
            Some(id) => StructureId::new(id.as_str())
                .map_err(|e| CliError::Argument(e.to_string()))?,
            None => defaults.structure_id,
        };

        let max_atom_records = structure_args
            .max_atom_records
            .or(structure.max_atom_records)
            .unwrap_or(defaults.max_atom_records);
        if max_atom_records == 0 {
            return Err(CliError::Config(
                "`structure.max-atom-records` must be greater than zero.".to_string(),
            ));
        }

        let mut params = defaults.params;
        if let Some(contigs) = args.and_then(|a| a.contigs.clone()).or(generation.contigs) {
            params.contigs = contigs;
        }
        match args.map(|a| &a.hotspots) {
            Some(hotspots) if !hotspots.is_empty() => params.hotspot_res = hotspots.clone(),
            _ => {
                if let Some(hotspots) = generation.hotspot_res {
                    params.hotspot_res = hotspots;
                }
            }
        }
        if let Some(steps) = args
            .and_then(|a| a.diffusion_steps)
            .or(generation.diffusion_steps)
        {
            params.diffusion_steps = steps;
        }

        let job = GenerationJob {
            structure_id,
            work_dir: structure_args
                .work_dir
                .clone()
                .or(structure.work_dir)
                .unwrap_or(defaults.work_dir),
            output_path: args
                .and_then(|a| a.output.clone())
                .or(output.path)
                .unwrap_or(defaults.output_path),
            max_atom_records,
            params,
        };

        let mut builder = ClientConfigBuilder::new()
            .timeout(
                args.and_then(|a| a.timeout_secs)
                    .or(service.timeout_secs)
                    .map(Duration::from_secs),
            )
            .check_status(
                args.is_some_and(|a| a.check_status) || service.check_status.unwrap_or(false),
            );
        if let Some(template) = structure.download_url {
            builder = builder.download_url_template(template);
        }
        if let Some(endpoint) = args.and_then(|a| a.endpoint.clone()).or(service.endpoint) {
            builder = builder.endpoint(endpoint);
        }
        let client = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        Ok(AppConfig { job, client })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::parse_set_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "structure.pdb-id" => {
                    self.structure
                        .get_or_insert_with(Default::default)
                        .pdb_id = Some(value_str.to_string());
                }
                "structure.max-atom-records" => {
                    self.structure
                        .get_or_insert_with(Default::default)
                        .max_atom_records = Some(parse_value(key, value_str, "integer")?);
                }
                "service.endpoint" => {
                    self.service.get_or_insert_with(Default::default).endpoint =
                        Some(value_str.to_string());
                }
                "service.timeout-secs" => {
                    self.service
                        .get_or_insert_with(Default::default)
                        .timeout_secs = Some(parse_value(key, value_str, "integer")?);
                }
                "service.check-status" => {
                    self.service
                        .get_or_insert_with(Default::default)
                        .check_status = Some(parse_value(key, value_str, "boolean")?);
                }
                "generation.contigs" => {
                    self.generation
                        .get_or_insert_with(Default::default)
                        .contigs = Some(value_str.to_string());
                }
                "generation.diffusion-steps" => {
                    self.generation
                        .get_or_insert_with(Default::default)
                        .diffusion_steps = Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}
