//! Error type shared by every stage of the ranking pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("empty token")]
    EmptyToken,

    #[error("invalid {field}: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    #[error("read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("read repositories from {}: {source}", path.display())]
    Input { path: PathBuf, source: io::Error },

    #[error("read repositories: {0}")]
    Read(#[source] io::Error),

    #[error("get repo {owner}/{name}: {status}: {message}")]
    Api {
        owner: String,
        name: String,
        status: u16,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("write {line:?}: {source}")]
    Write { line: String, source: io::Error },

    #[error("create {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
