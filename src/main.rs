use std::process::ExitCode;

use clap::Parser;
use config::{Args, Config};
use tracing::{error, info, warn};

mod config;
mod error;
mod getstars;
mod logging;
mod rank;
mod repolist;
mod report;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(&args.log_level);

    let config = match Config::resolve(args) {
        Ok(config) => config,
        Err(err) => {
            error!("config err: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// load, fetch, rank, write. Only a failure to read the input or to set up
/// the client is returned; a failed write is logged.
fn run(config: &Config) -> error::Result<()> {
    let mut repos = repolist::get_repositories_from_file(&config.input)?;
    info!(count = repos.len(), input = %config.input.display(), "parsed repositories");

    let client = getstars::GitHubClient::new(&config.token, &config.api_url, config.timeout)?;
    getstars::fetch_all(&client, &mut repos, config.jobs);
    rank::rank(&mut repos);

    match report::save_to_file(&config.output, &repos) {
        Ok(()) => info!(output = %config.output.display(), "saved rank"),
        Err(err) => warn!("save to file err: {err}"),
    }
    Ok(())
}
