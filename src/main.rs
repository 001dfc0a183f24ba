use clap::Parser;
use console::style;
use log::{error, info};
use std::process::ExitCode;
use timelapse_builder::cli::Cli;
use timelapse_builder::component::timelapse_builder::{RunOutcome, TimelapseBuilder};
use timelapse_builder::config::Config;
use timelapse_builder::error::TimelapseError;
use timelapse_builder::init;
use timelapse_builder::signal::setup_shutdown_signal;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init::init(cli.verbose);
    let shutdown_signal = setup_shutdown_signal();

    let config = Config::new();
    let mut builder =
        TimelapseBuilder::new(config, shutdown_signal, cli.framerate, cli.skip_frames);

    match builder.run() {
        Ok(RunOutcome::Created { output, frames }) => {
            info!("完成: {} ({frames} 幀)", output.display());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(TimelapseError::EmptySelection) = TimelapseError::find(&e) {
                eprintln!("{}", style(TimelapseError::EmptySelection).red().bold());
            } else {
                error!("{e:#}");
                eprintln!("{} {:#}", style("Error:").red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}
