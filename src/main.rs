use anyhow::Result;
use clap::Parser;
use kpi_workflow_analyzer::cli;
use kpi_workflow_analyzer::generator::workflow::launch;
use kpi_workflow_analyzer::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.to_config()?;
    logging::init_logging(config.verbose);

    let action = args.to_action()?;
    launch(&config, action).await
}
