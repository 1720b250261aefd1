use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Repository {
    /// The input line, written back unchanged in the report.
    pub address: String,
    pub owner: String,
    pub name: String,
    pub stars: u64,
}

impl Repository {
    /// Reads `<prefix>/<owner>/<name>[/...]`. Anything with fewer than three
    /// segments is not a repository.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split('/');
        let (Some(_), Some(owner), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        Some(Repository {
            address: line.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            stars: 0,
        })
    }
}

pub fn get_repositories_from_file(path: &Path) -> Result<Vec<Repository>> {
    let file = File::open(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    get_repositories(BufReader::new(file))
}

pub fn get_repositories<R: BufRead>(reader: R) -> Result<Vec<Repository>> {
    let mut repos = Vec::with_capacity(100);
    for line in reader.lines() {
        let line = line.map_err(Error::Read)?;
        match Repository::parse(&line) {
            Some(repo) => repos.push(repo),
            None => warn!("invalid line: {line}"),
        }
    }
    Ok(repos)
}
