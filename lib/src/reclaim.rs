use std::{
    io,
    path::{Path, PathBuf},
    thread,
};

/// Directories on a hosted build agent which are known to be large and safe
/// to drop. Pre-installed toolchains the build does not need.
pub const RECLAIM_TARGETS: &[&str] = &[
    "/usr/local/lib/android",
    "/usr/local/.ghcup",
    "/opt/hostedtoolcache/CodeQL",
    "/opt/microsoft/",
    "/usr/local/share",
    "/usr/share/swift/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimStatus {
    Removed,
    NotFound,
    PermissionDenied,
    Failed(String),
}

impl ReclaimStatus {
    /// Whether this outcome counts towards the aggregate failure tally.
    /// A missing target is benign: the helper only cares that the directory
    /// is gone afterwards.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct ReclaimOutcome {
    pub path: PathBuf,
    pub status: ReclaimStatus,
}

#[derive(Debug)]
pub struct ReclaimReport {
    pub outcomes: Vec<ReclaimOutcome>,
}

impl ReclaimReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_failure())
            .count()
    }
}

/// Delete every target, best effort.
///
/// One worker thread per target, all joined before returning, regardless of
/// individual failures. One target failing must not affect any other
/// target's attempt. The report holds one outcome per target, in input
/// order.
pub fn reclaim_all<I>(targets: I) -> ReclaimReport
where
    I: IntoIterator,
    I::Item: Into<PathBuf>,
{
    let workers = targets
        .into_iter()
        .map(Into::into)
        .map(|path| {
            let worker = thread::spawn({
                let path = path.clone();
                move || remove_target(&path)
            });
            (path, worker)
        })
        .collect::<Vec<_>>();

    let outcomes = workers
        .into_iter()
        .map(|(path, worker)| {
            let status = worker
                .join()
                .unwrap_or_else(|_| ReclaimStatus::Failed("removal worker panicked".to_string()));
            ReclaimOutcome { path, status }
        })
        .collect();

    ReclaimReport { outcomes }
}

fn remove_target(path: &Path) -> ReclaimStatus {
    log::info!("Deleting: {}", path.display());

    let Err(error) = std::fs::remove_dir_all(path) else {
        return ReclaimStatus::Removed;
    };

    let status = classify(&error);
    match &status {
        ReclaimStatus::NotFound => log::warn!("Directory not found: {}", path.display()),
        ReclaimStatus::PermissionDenied => log::error!("Permission denied: {}", path.display()),
        _ => log::error!("Failed to delete {}: {:#}", path.display(), error),
    }

    status
}

fn classify(error: &io::Error) -> ReclaimStatus {
    match error.kind() {
        io::ErrorKind::NotFound => ReclaimStatus::NotFound,
        io::ErrorKind::PermissionDenied => ReclaimStatus::PermissionDenied,
        _ => ReclaimStatus::Failed(error.to_string()),
    }
}
