use crate::cli::FetchArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use rfdiff::client::RcsbClient;
use rfdiff::client::progress::ProgressReporter;
use rfdiff::workflows::generate;
use tracing::info;

pub async fn run(args: FetchArgs) -> Result<()> {
    let config = PartialAppConfig::load(args.structure.config.as_deref())?
        .merge_with_structure_args(&args.structure)?;
    let job = config.job;
    let source = RcsbClient::new(&config.client)?;

    let progress_handler = CliProgressHandler::new(job.output_path.clone());
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    if args.force {
        info!("--force specified, downloading {} again.", job.structure_id);
        let path = job.structure_path();
        generate::download_structure(&source, &job.structure_id, &path, &reporter).await?;
        println!("Downloaded {} to {}", job.structure_id, path.display());
        return Ok(());
    }

    let local =
        generate::ensure_local_structure(&source, &job.structure_id, &job.work_dir, &reporter)
            .await?;
    if local.downloaded {
        println!("Downloaded {} to {}", job.structure_id, local.path.display());
    } else {
        println!(
            "Structure {} already present at {}",
            job.structure_id,
            local.path.display()
        );
    }
    Ok(())
}
