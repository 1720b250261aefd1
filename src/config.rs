use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_INPUT: &str = "themes.txt";
pub const DEFAULT_OUTPUT: &str = "theme-rank.txt";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// One day. Larger values overflow the client's request deadline.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Rank repositories by their GitHub star count
#[derive(Parser, Debug)]
#[command(name = "theme-rank", version, about, long_about = None)]
pub struct Args {
    /// Address file, one repository per line
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Rank file, truncated on every run
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// GitHub personal token
    #[arg(long)]
    pub token: Option<String>,

    /// TOML file providing any of the other settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-request API timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of repositories fetched at once
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// GitHub REST API base url
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,
}

/// Settings read from `--config`. Command line flags take precedence.
#[derive(Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub token: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
    pub api_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Config {
    pub token: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub timeout: Duration,
    pub jobs: usize,
    pub api_url: String,
}

impl Config {
    /// Builds the run configuration. Fails on an empty token before any
    /// repository data is touched.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<Self> {
        let token = args.token.or(file.token).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(Error::EmptyToken);
        }

        let timeout_secs = args
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if !(1..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(Error::InvalidConfig {
                field: "timeout",
                message: format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds"),
            });
        }

        let jobs = args.jobs.or(file.jobs).unwrap_or(1);
        if jobs == 0 {
            return Err(Error::InvalidConfig {
                field: "jobs",
                message: "must be at least 1".to_string(),
            });
        }

        let api_url = args
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        if api_url.is_empty() {
            return Err(Error::InvalidConfig {
                field: "api_url",
                message: "must not be empty".to_string(),
            });
        }

        Ok(Config {
            token,
            input: args
                .input
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: args
                .output
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            timeout: Duration::from_secs(timeout_secs),
            jobs,
            api_url,
        })
    }
}
