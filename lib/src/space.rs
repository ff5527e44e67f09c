use std::path::{Path, PathBuf};

use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("statvfs failed for {}: {}", .0.display(), .1)]
    Statvfs(PathBuf, #[source] Errno),
}

/// Free disk space, in decimal megabytes, on the filesystem containing `path`.
///
/// Queried fresh on every call; nothing is cached.
pub fn available_space_mb(path: &Path) -> Result<u64, ProbeError> {
    let stat = nix::sys::statvfs::statvfs(path)
        .map_err(|errno| ProbeError::Statvfs(path.to_owned(), errno))?;

    let available_mb =
        (stat.block_size() as u64).saturating_mul(stat.blocks_available() as u64) / 1_000_000;

    log::info!(
        "Available disk space on {}: {} MB",
        path.display(),
        available_mb
    );
    Ok(available_mb)
}
