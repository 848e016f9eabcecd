use crate::cli::CountArgs;
use crate::config::PartialScreeningConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use chemscreen::engine::progress::ProgressReporter;
use chemscreen::workflows;
use tracing::info;

pub fn run(args: CountArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialScreeningConfig::from_file(path)?,
        None => PartialScreeningConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the screening workflow...");
    let report = workflows::screen::run(&final_config, &reporter)?;

    info!(
        elements = report.universe.len(),
        rounds = report.rounds.len(),
        "Screening finished in {:.3} s.",
        report.elapsed.as_secs_f64()
    );
    Ok(())
}
