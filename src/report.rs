use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::repolist::Repository;

pub fn format_line(repo: &Repository) -> String {
    format!("{:>4} {}\n", repo.stars, repo.address)
}

/// Writes one line per repository, in the given order. A failed final flush
/// is only logged.
pub fn save<W: Write>(w: W, repos: &[Repository]) -> Result<()> {
    let mut buf = BufWriter::new(w);
    let written = repos.iter().try_for_each(|repo| {
        let line = format_line(repo);
        buf.write_all(line.as_bytes())
            .map_err(|source| Error::Write { line, source })
    });
    if let Err(err) = buf.flush() {
        warn!("flush err: {err}");
    }
    written
}

/// Replaces `path` with the report and syncs it to disk.
pub fn save_to_file(path: &Path, repos: &[Repository]) -> Result<()> {
    let mut file = File::create(path).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;
    let written = save(&mut file, repos);
    if let Err(err) = file.sync_all() {
        warn!("sync file err: {err}");
    }
    written
}
