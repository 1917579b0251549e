use crate::cli::GenerateArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use rfdiff::client::progress::ProgressReporter;
use rfdiff::client::{NimClient, RcsbClient};
use rfdiff::workflows::generate;
use tracing::{info, warn};

pub async fn run(args: GenerateArgs) -> Result<()> {
    let partial_config = PartialAppConfig::load(args.structure.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let source = RcsbClient::new(&config.client)?;
    let service = NimClient::new(&config.client)?;

    let progress_handler = CliProgressHandler::new(config.job.output_path.clone());
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Submitting structure {} to {}",
        config.job.structure_id,
        service.endpoint()
    );
    let outcome = generate::run(&config.job, &source, &service, &reporter).await?;

    if !outcome.response.is_success() {
        warn!(
            "Service answered with status {} {} but returned a usable structure.",
            outcome.response.status,
            outcome.response.reason.as_deref().unwrap_or("")
        );
    }
    info!(
        "Generated structure from {} ATOM record(s) written to {:?}",
        outcome.submitted_records, outcome.output_path
    );

    Ok(())
}
